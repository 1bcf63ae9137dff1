use flow_core::ConfigError;
use flow_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("invalid run configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{got} machine names supplied for a line of {expected} machines")]
    MachineNameMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("simulation aborted: {0}")]
    Engine(#[from] EngineError),
}

pub type ShopResult<T> = Result<T, ShopError>;
