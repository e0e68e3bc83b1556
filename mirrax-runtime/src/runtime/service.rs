use std::future::Future;

use crate::runtime::{FrameSender, SharedTwinState};

/// Service descriptor used in scheduler logs.
#[derive(Clone, Debug, Default)]
pub struct ServiceContext {
    /// Service name.
    name: String,
    /// Service address, if network facing.
    address: Option<String>,
}

impl ServiceContext {
    /// Construct a context with a name only.
    pub fn new(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            address: None,
        }
    }

    /// Construct a context with a name and a network address.
    pub fn with_address(name: impl ToString, address: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            address: Some(address.to_string()),
        }
    }
}

impl std::fmt::Display for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(address) = &self.address {
            write!(f, "{} on {}", self.name, address)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Unit of work the runtime schedules.
///
/// Periodic services implement `tick`, accept style services implement
/// `wait_io` which is invoked again as soon as it returns. The futures
/// carry a `Send` bound so services schedule onto the multithreaded
/// runtime.
pub trait Service<Cnf> {
    /// Construct the service from its configuration.
    fn new(config: Cnf) -> Self
    where
        Self: Sized;

    /// Service context descriptor.
    fn ctx(&self) -> ServiceContext {
        ServiceContext::default()
    }

    /// Run once before the service enters its schedule.
    fn setup(&mut self) -> impl Future<Output = ()> + Send {
        async {}
    }

    /// Run once after the service left its schedule.
    fn teardown(&mut self) -> impl Future<Output = ()> + Send {
        async {}
    }

    /// Run on every scheduler period.
    fn tick(
        &mut self,
        _twin: SharedTwinState,
        _frame_tx: FrameSender,
    ) -> impl Future<Output = ()> + Send {
        async {}
    }

    /// Wait for I/O and handle one unit of it.
    fn wait_io(
        &mut self,
        _twin: SharedTwinState,
        _frame_tx: FrameSender,
    ) -> impl Future<Output = ()> + Send {
        async {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_context_display() {
        assert_eq!(ServiceContext::new("simulator").to_string(), "simulator");
        assert_eq!(
            ServiceContext::with_address("server", "127.0.0.1:30061").to_string(),
            "server on 127.0.0.1:30061"
        );
    }
}
