use serde_derive::{Deserialize, Serialize};

/// Hardware component detected in a photograph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedComponent {
    /// Detected component name.
    pub name: String,
    /// Detected component category.
    pub category: String,
    /// Additional detail, if the analysis provided any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Image analysis lifecycle.
///
/// A request moves the state to pending; exactly one completion follows,
/// either with results or as unavailable. A completion arriving after the
/// state left pending is dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisState {
    /// No analysis requested.
    #[default]
    Idle,
    /// Request in flight.
    Pending,
    /// Analysis returned a component list.
    Ready { components: Vec<DetectedComponent> },
    /// Analysis failed or no backend is configured.
    Unavailable,
}

impl AnalysisState {
    /// Whether a request is currently in flight.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, AnalysisState::Pending)
    }
}

impl std::fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisState::Idle => write!(f, "Idle"),
            AnalysisState::Pending => write!(f, "Pending"),
            AnalysisState::Ready { components } => {
                write!(f, "Ready: {} components", components.len())
            }
            AnalysisState::Unavailable => write!(f, "Unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(AnalysisState::default(), AnalysisState::Idle);
        assert!(!AnalysisState::default().is_pending());
        assert!(AnalysisState::Pending.is_pending());
    }

    #[test]
    fn test_detected_component_requires_name_and_category() {
        let component: DetectedComponent =
            serde_json::from_str(r#"{"name":"RTX 4090","category":"GPU"}"#).unwrap();

        assert_eq!(component.name, "RTX 4090");
        assert_eq!(component.category, "GPU");
        assert_eq!(component.description, None);

        assert!(serde_json::from_str::<DetectedComponent>(r#"{"name":"RTX 4090"}"#).is_err());
        assert!(serde_json::from_str::<DetectedComponent>(r#"{"category":"GPU"}"#).is_err());
    }

    #[test]
    fn test_ready_wire_format() {
        let state = AnalysisState::Ready {
            components: vec![DetectedComponent {
                name: "RTX 4090".to_string(),
                category: "GPU".to_string(),
                description: Some("Triple fan".to_string()),
            }],
        };

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"state\":\"ready\""));
        assert!(json.contains("\"name\":\"RTX 4090\""));
    }
}
