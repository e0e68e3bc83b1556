mod error;
mod service;

pub use self::error::Error;
pub use self::service::{Service, ServiceContext};

pub use crate::twin::SharedTwinState;

pub type Result<T = ()> = std::result::Result<T, error::Error>;

/// Frame publication endpoint.
pub type FrameSender = tokio::sync::broadcast::Sender<crate::twin::Frame>;
/// Frame subscription endpoint.
pub type FrameReceiver = tokio::sync::broadcast::Receiver<crate::twin::Frame>;

/// Configuration for services that take none.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullConfig {}

/// Construct a runtime builder from the validated hardware registry and
/// the facility layout.
pub fn builder(
    registry: crate::registry::HardwareRegistry,
    facility: crate::facility::Facility,
) -> Builder {
    Builder::new(registry, facility)
}

/// Runtime builder.
pub struct Builder {
    twin: crate::twin::TwinState,
    enable_shutdown: bool,
}

impl Builder {
    /// Construct a builder with a fresh twin state.
    pub fn new(
        registry: crate::registry::HardwareRegistry,
        facility: crate::facility::Facility,
    ) -> Self {
        Self {
            twin: crate::twin::TwinState::new(registry, facility),
            enable_shutdown: false,
        }
    }

    /// Feed the interrupt signal into the runtime shutdown channel.
    pub fn with_shutdown(mut self) -> Self {
        self.enable_shutdown = true;
        self
    }

    /// Build the runtime.
    pub fn build(self) -> Runtime {
        let shutdown = tokio::sync::broadcast::channel(1);
        let (frame_tx, _) = tokio::sync::broadcast::channel(crate::consts::QUEUE_SIZE_FRAME);

        if self.enable_shutdown {
            let sender = shutdown.0.clone();

            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    log::info!("Termination requested");

                    sender.send(()).ok();
                }
            });
        }

        Runtime {
            twin: std::sync::Arc::new(tokio::sync::RwLock::new(self.twin)),
            frame_tx,
            shutdown,
        }
    }
}

/// Handle to a scheduled service.
///
/// Dropping the handle stops the service at its next loop turn. Use
/// [`ServiceHandle::cancel`] to stop it and wait for the service task to
/// finish: once `cancel` returns the service has run its teardown and
/// will not tick again.
pub struct ServiceHandle {
    stop: tokio::sync::broadcast::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

impl ServiceHandle {
    /// Cancel the service and wait for it to terminate.
    pub async fn cancel(self) {
        self.stop.send(()).ok();
        self.task.await.ok();
    }
}

pub struct Runtime {
    twin: SharedTwinState,
    frame_tx: FrameSender,
    /// Runtime event bus.
    pub shutdown: (
        tokio::sync::broadcast::Sender<()>,
        tokio::sync::broadcast::Receiver<()>,
    ),
}

impl Runtime {
    /// Shared twin state handle.
    pub fn twin(&self) -> SharedTwinState {
        self.twin.clone()
    }

    /// Subscribe to the frame stream.
    pub fn subscribe(&self) -> FrameReceiver {
        self.frame_tx.subscribe()
    }

    /// Listen for shutdown signal.
    pub fn shutdown_signal(&self) -> tokio::sync::broadcast::Receiver<()> {
        self.shutdown.0.subscribe()
    }

    /// Schedule a periodic service on the given interval.
    ///
    /// The service ticks until the runtime shuts down or the returned
    /// handle cancels it. Ticks run to completion before the next period
    /// starts, they never overlap.
    pub fn schedule_service<S, C>(&self, config: C, period: std::time::Duration) -> ServiceHandle
    where
        S: Service<C> + Send + 'static,
        C: Send + 'static,
    {
        let twin = self.twin.clone();
        let frame_tx = self.frame_tx.clone();
        let mut shutdown_rx = self.shutdown_signal();

        let (stop_tx, mut stop_rx) = tokio::sync::broadcast::channel(1);

        let task = tokio::spawn(async move {
            let mut service = S::new(config);
            let ctx = service.ctx();

            log::debug!(
                "Scheduled service '{}' with {}ms interval",
                ctx,
                period.as_millis()
            );

            service.setup().await;

            loop {
                tokio::select! {
                    _ = tokio::time::sleep(period) => {
                        service.tick(twin.clone(), frame_tx.clone()).await;
                    }
                    _ = shutdown_rx.recv() => break,
                    _ = stop_rx.recv() => break,
                }
            }

            service.teardown().await;

            log::debug!("Service '{}' terminated", ctx);
        });

        ServiceHandle {
            stop: stop_tx,
            task,
        }
    }

    /// Schedule an I/O bound service.
    ///
    /// The service waits for I/O in a loop until the runtime shuts down.
    pub fn schedule_io_service<S, C>(&self, config: C)
    where
        S: Service<C> + Send + 'static,
        C: Send + 'static,
    {
        let twin = self.twin.clone();
        let frame_tx = self.frame_tx.clone();
        let mut shutdown_rx = self.shutdown_signal();

        tokio::spawn(async move {
            let mut service = S::new(config);
            let ctx = service.ctx();

            log::debug!("Scheduled I/O service '{}'", ctx);

            service.setup().await;

            loop {
                tokio::select! {
                    _ = service.wait_io(twin.clone(), frame_tx.clone()) => {}
                    _ = shutdown_rx.recv() => break,
                }
            }

            service.teardown().await;

            log::debug!("Service '{}' terminated", ctx);
        });
    }

    /// Wait for the runtime to shutdown.
    ///
    /// This method will block until the runtime is shutdown.
    pub async fn wait_for_shutdown(&self) {
        let mut shutdown_rx = self.shutdown_signal();

        shutdown_rx.recv().await.ok();
    }
}
