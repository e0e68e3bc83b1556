use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{tcp::OwnedWriteHalf, TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::core::Action;
use crate::facility::Facility;
use crate::runtime::{FrameSender, Service, ServiceContext, SharedTwinState};
use crate::twin::Frame;
use crate::vision::{VisionClient, VisionConfig};

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Network address to listen on.
    #[serde(default = "ServerConfig::default_listen")]
    pub listen: String,
    /// Maximum number of connections.
    #[serde(default = "ServerConfig::default_max_connections")]
    pub max_connections: usize,
    /// Vision backend for image analysis.
    #[serde(default)]
    pub vision: Option<VisionConfig>,
}

impl ServerConfig {
    fn default_listen() -> String {
        "127.0.0.1:30061".to_owned()
    }

    fn default_max_connections() -> usize {
        10
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: Self::default_listen(),
            max_connections: Self::default_max_connections(),
            vision: None,
        }
    }
}

#[derive(Debug, serde_derive::Serialize)]
struct Hello {
    instance: crate::core::Instance,
    facility: Facility,
}

/// Server to client message, one JSON object per line.
#[derive(Debug, serde_derive::Serialize)]
#[serde(tag = "message", rename_all = "snake_case")]
enum Outbound {
    Hello(Hello),
    Frame(Frame),
}

async fn write_line(writer: &mut OwnedWriteHalf, message: &Outbound) -> std::io::Result<()> {
    let mut line = serde_json::to_vec(message)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    line.push(b'\n');

    writer.write_all(&line).await
}

/// Session server for renderers.
///
/// Streams a hello message and then frames to every connected client and
/// accepts one action per line in return. Clients that fall behind the
/// frame broadcast skip ahead to the latest frame.
pub struct Server {
    config: ServerConfig,
    vision: Option<VisionClient>,
    semaphore: Arc<Semaphore>,
    listener: Option<TcpListener>,
}

impl Server {
    async fn spawn_client_session(
        stream: TcpStream,
        addr: std::net::SocketAddr,
        twin: SharedTwinState,
        frame_tx: FrameSender,
        vision: Option<VisionClient>,
        _permit: tokio::sync::OwnedSemaphorePermit,
    ) {
        log::debug!("Client session started");

        let mut frame_rx = frame_tx.subscribe();

        let (read_half, mut write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();

        let (hello, frame) = {
            let twin = twin.read().await;

            (
                Outbound::Hello(Hello {
                    instance: crate::global::instance().clone(),
                    facility: twin.facility().clone(),
                }),
                Outbound::Frame(twin.frame()),
            )
        };

        if write_line(&mut write_half, &hello).await.is_err() {
            return;
        }
        if write_line(&mut write_half, &frame).await.is_err() {
            return;
        }

        log::info!("Session started for {}", addr);

        loop {
            tokio::select! {
                frame = frame_rx.recv() => {
                    match frame {
                        Ok(frame) => {
                            if let Err(e) = write_line(&mut write_half, &Outbound::Frame(frame)).await {
                                log::error!("Failed to send frame: {}", e);
                                break;
                            }
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                            log::debug!("Session lagged, skipping {} frames", missed);
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                            log::warn!("Frame channel closed");
                            break;
                        }
                    }
                }
                line = lines.next_line() => {
                    match line {
                        Ok(Some(line)) => {
                            Self::handle_line(&line, &twin, &frame_tx, &vision).await;
                        }
                        Ok(None) => {
                            log::debug!("Session shutdown requested for: {}", addr);
                            break;
                        }
                        Err(e) => {
                            log::warn!("Failed to read line: {}", e);
                            break;
                        }
                    }
                }
            }
        }

        log::info!("Session shutdown for: {}", addr);
    }

    async fn handle_line(
        line: &str,
        twin: &SharedTwinState,
        frame_tx: &FrameSender,
        vision: &Option<VisionClient>,
    ) {
        let action: Action = match serde_json::from_str(line) {
            Ok(action) => action,
            Err(e) => {
                log::warn!("Discarding malformed action: {}", e);
                return;
            }
        };

        log::debug!("Applying action '{}'", action.kind());

        let image = {
            let mut twin = twin.write().await;
            let image = twin.apply(action);

            if frame_tx.send(twin.frame()).is_err() {
                log::trace!("No frame subscribers");
            }

            image
        };

        // The analysis request runs off the update path so a slow or
        // unreachable backend never blocks frames or further actions.
        if let Some(image) = image {
            match vision {
                Some(client) => {
                    let client = client.clone();
                    let twin = twin.clone();
                    let frame_tx = frame_tx.clone();

                    tokio::spawn(async move {
                        let result = client.analyze(&image).await;

                        let mut twin = twin.write().await;
                        twin.complete_analysis(result);

                        if frame_tx.send(twin.frame()).is_err() {
                            log::trace!("No frame subscribers");
                        }
                    });
                }
                None => {
                    log::warn!("Analysis requested without a vision backend");

                    let mut twin = twin.write().await;
                    twin.complete_analysis(None);

                    if frame_tx.send(twin.frame()).is_err() {
                        log::trace!("No frame subscribers");
                    }
                }
            }
        }
    }
}

impl Service<ServerConfig> for Server {
    fn new(config: ServerConfig) -> Self
    where
        Self: Sized,
    {
        let semaphore = Arc::new(Semaphore::new(config.max_connections));

        let vision = match &config.vision {
            Some(vision_config) => match VisionClient::new(vision_config) {
                Ok(client) => Some(client),
                Err(e) => {
                    log::error!("Vision backend disabled: {}", e);
                    None
                }
            },
            None => {
                log::debug!("No vision backend configured");
                None
            }
        };

        Self {
            config,
            vision,
            semaphore,
            listener: None,
        }
    }

    fn ctx(&self) -> ServiceContext {
        ServiceContext::with_address("server", self.config.listen.clone())
    }

    async fn setup(&mut self) {
        log::debug!("Listening on: {}", self.config.listen);

        // FUTURE: Bind here since constructors cannot be asynchronous
        self.listener = Some(TcpListener::bind(self.config.listen.clone()).await.unwrap());
    }

    async fn wait_io(&mut self, twin: SharedTwinState, frame_tx: FrameSender) {
        let (stream, addr) = self.listener.as_ref().unwrap().accept().await.unwrap();

        log::debug!("Accepted connection from: {}", addr);

        let permit = match self.semaphore.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                log::warn!("Too many connections");
                return;
            }
        };

        let active_client_count = self.config.max_connections - self.semaphore.available_permits();

        log::debug!(
            "Active connections: {}/{}",
            active_client_count,
            self.config.max_connections
        );

        tokio::spawn(Self::spawn_client_session(
            stream,
            addr,
            twin,
            frame_tx,
            self.vision.clone(),
            permit,
        ));
    }
}
