pub use reporter::Reporter;
pub use server::{Server, ServerConfig};
pub use simulator::{SimulationConfig, Simulator};

mod reporter;
mod server;
mod simulator;
