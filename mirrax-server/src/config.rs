use mirrax::Configurable;

#[derive(Clone, Debug, serde_derive::Deserialize, PartialEq)]
pub struct NodeConfig {
    /// Hardware components tracked by the digital twin.
    #[serde(default = "mirrax::registry::default_seed")]
    pub components: Vec<mirrax::core::HardwareComponent>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            components: mirrax::registry::default_seed(),
        }
    }
}

#[derive(Clone, Debug, serde_derive::Deserialize)]
pub struct Config {
    /// Facility instance.
    pub instance: mirrax::core::Instance,
    /// Hardware node configuration.
    #[serde(default)]
    pub node: NodeConfig,
    /// Facility topology configuration.
    #[serde(default)]
    pub facility: mirrax::facility::FacilityLayout,
    /// Telemetry simulation configuration.
    #[serde(default)]
    pub simulation: mirrax::service::SimulationConfig,
    /// Session server configuration.
    #[serde(default)]
    pub server: mirrax::service::ServerConfig,
}

impl Configurable for Config {}
