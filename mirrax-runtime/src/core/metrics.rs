use serde_derive::Serialize;

use super::HardwareComponent;

/// Facility level aggregates over one telemetry snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct FacilityMetrics {
    /// Mean temperature in degrees celsius.
    pub average_temperature: f64,
    /// Mean utilization in percent.
    pub average_load: f64,
    /// Number of components outside nominal limits.
    pub alerts: usize,
    /// Number of components in the snapshot.
    pub components: usize,
}

impl FacilityMetrics {
    /// Aggregate over a snapshot. An empty snapshot yields all zeroes.
    pub fn from_snapshot(snapshot: &[HardwareComponent]) -> Self {
        if snapshot.is_empty() {
            return Self {
                average_temperature: 0.0,
                average_load: 0.0,
                alerts: 0,
                components: 0,
            };
        }

        let count = snapshot.len() as f64;

        Self {
            average_temperature: snapshot.iter().map(|c| c.temperature).sum::<f64>() / count,
            average_load: snapshot.iter().map(|c| c.load).sum::<f64>() / count,
            alerts: snapshot.iter().filter(|c| !c.is_nominal()).count(),
            components: snapshot.len(),
        }
    }
}

impl std::fmt::Display for FacilityMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Average temperature: {:.1}°C; Average load: {:.1}%; Alerts: {}/{}",
            self.average_temperature, self.average_load, self.alerts, self.components
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ComponentType;

    fn component(id: &str, temperature: f64, load: f64) -> HardwareComponent {
        HardwareComponent {
            id: id.to_string(),
            name: id.to_string(),
            ty: ComponentType::Cpu,
            specs: String::new(),
            health: 100,
            temperature,
            load,
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let metrics = FacilityMetrics::from_snapshot(&[]);

        assert_eq!(metrics.average_temperature, 0.0);
        assert_eq!(metrics.average_load, 0.0);
        assert_eq!(metrics.alerts, 0);
        assert_eq!(metrics.components, 0);
    }

    #[test]
    fn test_averages() {
        let snapshot = vec![component("cpu-0", 40.0, 10.0), component("gpu-0", 60.0, 30.0)];

        let metrics = FacilityMetrics::from_snapshot(&snapshot);

        assert_eq!(metrics.average_temperature, 50.0);
        assert_eq!(metrics.average_load, 20.0);
        assert_eq!(metrics.alerts, 0);
        assert_eq!(metrics.components, 2);
    }

    #[test]
    fn test_alert_count() {
        let snapshot = vec![
            component("cpu-0", 75.0, 10.0),
            component("gpu-0", 40.0, 90.0),
            component("ram-0", 40.0, 10.0),
        ];

        assert_eq!(FacilityMetrics::from_snapshot(&snapshot).alerts, 2);
    }
}
