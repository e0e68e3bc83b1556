use serde_derive::{Deserialize, Serialize};

/// Lower temperature bound in degrees celsius.
pub const TEMPERATURE_MIN: f64 = 30.0;
/// Upper temperature bound in degrees celsius.
pub const TEMPERATURE_MAX: f64 = 85.0;
/// Temperature above which a component is reported as hot.
pub const TEMPERATURE_WARN: f64 = 70.0;

/// Lower load bound in percent.
pub const LOAD_MIN: f64 = 0.0;
/// Upper load bound in percent.
pub const LOAD_MAX: f64 = 100.0;
/// Load above which a component is reported as overloaded.
pub const LOAD_WARN: f64 = 80.0;

/// Hardware component class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentType {
    /// Central processing unit.
    Cpu,
    /// Graphics processing unit.
    Gpu,
    /// Memory module.
    Ram,
    /// Motherboard.
    Mobo,
    /// Power supply unit.
    Psu,
    /// Cooling fan.
    Fan,
    /// Storage drive.
    Disk,
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentType::Cpu => write!(f, "CPU"),
            ComponentType::Gpu => write!(f, "GPU"),
            ComponentType::Ram => write!(f, "RAM"),
            ComponentType::Mobo => write!(f, "MOBO"),
            ComponentType::Psu => write!(f, "PSU"),
            ComponentType::Fan => write!(f, "FAN"),
            ComponentType::Disk => write!(f, "DISK"),
        }
    }
}

/// Operational condition derived from the live telemetry.
///
/// The condition is never stored, it is recomputed from the latest
/// temperature and load values whenever it is needed. A hot component
/// takes precedence over an overloaded one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    /// Component operates within nominal limits.
    Nominal,
    /// Component temperature exceeds the warning threshold.
    Hot,
    /// Component load exceeds the warning threshold.
    Overloaded,
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentStatus::Nominal => write!(f, "Nominal"),
            ComponentStatus::Hot => write!(f, "Hot"),
            ComponentStatus::Overloaded => write!(f, "Overloaded"),
        }
    }
}

/// Single hardware component inside a server node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HardwareComponent {
    /// Component unique identifier.
    pub id: String,
    /// Component display name.
    pub name: String,
    /// Component class.
    #[serde(rename = "type")]
    pub ty: ComponentType,
    /// Capability description.
    pub specs: String,
    /// Wear indicator in percent.
    pub health: u8,
    /// Temperature in degrees celsius.
    pub temperature: f64,
    /// Utilization in percent.
    pub load: f64,
}

impl HardwareComponent {
    /// Derive the operational condition from the current telemetry.
    pub fn status(&self) -> ComponentStatus {
        if self.temperature > TEMPERATURE_WARN {
            ComponentStatus::Hot
        } else if self.load > LOAD_WARN {
            ComponentStatus::Overloaded
        } else {
            ComponentStatus::Nominal
        }
    }

    /// Whether the component operates within nominal limits.
    #[inline]
    pub fn is_nominal(&self) -> bool {
        self.status() == ComponentStatus::Nominal
    }
}

impl std::fmt::Display for HardwareComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: Temperature: {:.1}°C; Load: {:.1}%; Health: {}%",
            self.ty, self.id, self.temperature, self.load, self.health
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(temperature: f64, load: f64) -> HardwareComponent {
        HardwareComponent {
            id: "cpu-0".to_string(),
            name: "Test CPU".to_string(),
            ty: ComponentType::Cpu,
            specs: "16 cores / 32 threads".to_string(),
            health: 98,
            temperature,
            load,
        }
    }

    #[test]
    fn test_status_nominal() {
        assert_eq!(component(42.0, 15.0).status(), ComponentStatus::Nominal);
        assert!(component(42.0, 15.0).is_nominal());
    }

    #[test]
    fn test_status_hot() {
        assert_eq!(component(70.5, 15.0).status(), ComponentStatus::Hot);
    }

    #[test]
    fn test_status_overloaded() {
        assert_eq!(component(42.0, 80.5).status(), ComponentStatus::Overloaded);
    }

    #[test]
    fn test_status_hot_takes_precedence() {
        assert_eq!(component(75.0, 95.0).status(), ComponentStatus::Hot);
    }

    #[test]
    fn test_type_wire_format() {
        let json = serde_json::to_string(&ComponentType::Gpu).unwrap();
        assert_eq!(json, "\"GPU\"");

        let ty: ComponentType = serde_json::from_str("\"DISK\"").unwrap();
        assert_eq!(ty, ComponentType::Disk);
    }

    #[test]
    fn test_component_wire_format() {
        let component = component(42.0, 15.0);

        let json = serde_json::to_string(&component).unwrap();
        assert!(json.contains("\"type\":\"CPU\""));

        let component2: HardwareComponent = serde_json::from_str(&json).unwrap();
        assert_eq!(component, component2);
    }
}
