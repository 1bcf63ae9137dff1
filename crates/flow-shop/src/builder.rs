//! Fluent builder for constructing a [`FlowShop`].

use flow_core::{MachineId, RunConfig};
use flow_engine::Engine;

use crate::generator::Generator;
use crate::{FlowShop, Machine, ShopError, ShopResult, ShopState};

/// Fluent builder for [`FlowShop`].
///
/// # Required inputs
///
/// - [`RunConfig`] — horizon, machine count, arrival interval, jobs
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                        |
/// |----------------------|--------------------------------|
/// | `.machine_names(v)`  | `Machine_1`, `Machine_2`, …    |
///
/// # Example
///
/// ```rust,ignore
/// let shop = FlowShopBuilder::new(config)
///     .machine_names(vec!["cut".into(), "weld".into(), "paint".into()])
///     .build()?;
/// let stats = shop.run(&mut NoopObserver)?;
/// ```
pub struct FlowShopBuilder {
    config: RunConfig,
    names:  Option<Vec<String>>,
}

impl FlowShopBuilder {
    pub fn new(config: RunConfig) -> Self {
        Self { config, names: None }
    }

    /// Supply one display name per machine (must be length `machine_count`).
    pub fn machine_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    /// Validate inputs, create the machines and register the generator.
    ///
    /// Nothing runs yet; a rejected configuration never reaches the engine.
    pub fn build(self) -> ShopResult<FlowShop> {
        self.config.validate()?;
        let machine_count = self.config.machine_count;

        // ── Resolve optional inputs ───────────────────────────────────────
        let names = match self.names {
            Some(n) => {
                if n.len() != machine_count {
                    return Err(ShopError::MachineNameMismatch {
                        expected: machine_count,
                        got:      n.len(),
                    });
                }
                n
            }
            None => (0..machine_count).map(Machine::default_name).collect(),
        };

        // ── Machines, each backed by one engine resource ──────────────────
        let mut engine = Engine::new(ShopState::new(machine_count));
        for (i, name) in names.into_iter().enumerate() {
            let resource = engine.add_resource(name.clone());
            engine
                .world_mut()
                .machines
                .push(Machine::new(MachineId(i as u32), name, resource));
        }

        // ── Arrivals ──────────────────────────────────────────────────────
        let horizon = self.config.end_tick();
        engine.spawn(Box::new(Generator::new(
            self.config.jobs,
            self.config.arrival_interval,
        )));

        Ok(FlowShop { engine, horizon })
    }
}
