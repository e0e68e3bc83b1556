use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::runtime::{FrameSender, Service, ServiceContext, SharedTwinState};

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "SimulationConfig::default_interval")]
    pub interval: u64,
    /// Fixed seed for a reproducible telemetry walk.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    fn default_interval() -> u64 {
        2_000
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            seed: None,
        }
    }
}

/// Telemetry simulator service.
///
/// Advances the telemetry walk once per scheduler period, commits the
/// snapshot and publishes a frame. A busy twin lock skips the tick, the
/// previous snapshot stays valid until the next period.
pub struct Simulator {
    rng: StdRng,
}

impl Service<SimulationConfig> for Simulator {
    fn new(config: SimulationConfig) -> Self
    where
        Self: Sized,
    {
        log::debug!("Starting telemetry simulator");

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { rng }
    }

    fn ctx(&self) -> ServiceContext {
        ServiceContext::new("simulator")
    }

    async fn tick(&mut self, twin: SharedTwinState, frame_tx: FrameSender) {
        match twin.try_write() {
            Ok(mut twin) => {
                let next = crate::sim::advance(twin.snapshot(), &mut self.rng);
                twin.commit_snapshot(next);

                log::trace!("Telemetry iteration {}", twin.iteration());

                if frame_tx.send(twin.frame()).is_err() {
                    log::trace!("No frame subscribers");
                }
            }
            Err(_) => {
                log::warn!("Telemetry tick skipped, state is busy");
            }
        }
    }
}
