use crate::core::ComponentStatus;
use crate::runtime::{FrameSender, Service, ServiceContext, SharedTwinState};

/// Periodic facility health reporter.
///
/// Summarizes the latest snapshot in the log so operators can follow the
/// facility without a connected renderer.
pub struct Reporter;

impl<Cnf> Service<Cnf> for Reporter {
    fn new(_config: Cnf) -> Self
    where
        Self: Sized,
    {
        Self
    }

    fn ctx(&self) -> ServiceContext {
        ServiceContext::new("reporter")
    }

    async fn tick(&mut self, twin: SharedTwinState, _frame_tx: FrameSender) {
        if let Ok(twin) = twin.try_read() {
            log::info!("{}", twin.metrics());

            for component in twin.snapshot() {
                match component.status() {
                    ComponentStatus::Hot => {
                        log::warn!(
                            "{} is running hot: {:.1}°C",
                            component.id,
                            component.temperature
                        );
                    }
                    ComponentStatus::Overloaded => {
                        log::warn!("{} is overloaded: {:.1}%", component.id, component.load);
                    }
                    ComponentStatus::Nominal => {}
                }
            }
        }
    }
}
