//! The assembled flow shop and its entry points.

use flow_core::{RunConfig, Tick};
use flow_engine::{Engine, EngineObserver, NoopObserver};
use log::info;

use crate::{FlowShopBuilder, Machine, ShopResult, ShopState, StatisticsLog};

/// A validated, ready-to-run flow line.
///
/// Build with [`FlowShopBuilder`].  `run` consumes the shop: one engine, one
/// run, one statistics log.
pub struct FlowShop {
    pub(crate) engine:  Engine<ShopState>,
    pub(crate) horizon: Tick,
}

impl FlowShop {
    /// Machines in visitation order.
    pub fn machines(&self) -> &[Machine] {
        &self.engine.world().machines
    }

    /// Last tick at which events still fire.
    pub fn horizon(&self) -> Tick {
        self.horizon
    }

    pub fn engine(&self) -> &Engine<ShopState> {
        &self.engine
    }

    /// Run to the horizon and return the completed-job log.
    ///
    /// Jobs still in progress at the horizon are dropped without a record.
    pub fn run<O: EngineObserver>(mut self, observer: &mut O) -> ShopResult<StatisticsLog> {
        info!(
            "running {} machines to {}",
            self.engine.world().machines.len(),
            self.horizon
        );
        self.engine.run(self.horizon, observer)?;
        let stats = self.engine.into_world().stats;
        info!("{} jobs completed", stats.len());
        Ok(stats)
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Validate `config`, build a line of machines named `Machine_1..N`, run it
/// to the horizon and return the log.
pub fn run_simulation(config: &RunConfig) -> ShopResult<StatisticsLog> {
    FlowShopBuilder::new(config.clone())
        .build()?
        .run(&mut NoopObserver)
}

/// Run independent configurations, returning one result per input in order.
///
/// With the `parallel` Cargo feature the runs are spread over Rayon's thread
/// pool.  Every run owns its engine, so the results match a sequential loop.
pub fn run_many(configs: &[RunConfig]) -> Vec<ShopResult<StatisticsLog>> {
    #[cfg(not(feature = "parallel"))]
    {
        configs.iter().map(run_simulation).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        configs.par_iter().map(run_simulation).collect()
    }
}
