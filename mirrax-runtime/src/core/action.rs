use serde_derive::{Deserialize, Serialize};

use super::ViewMode;

/// Discrete user action against the twin.
///
/// Actions arrive over the session wire as one JSON object per line,
/// tagged by the `action` field. Dispatch is exhaustive so adding a
/// variant forces every consumer to handle it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Focus a server unit, moving the scene to node detail.
    SelectServer { server: String },
    /// Return the scene to the facility overview.
    ReturnToFacility,
    /// Switch the rendering mode.
    SetViewMode { mode: ViewMode },
    /// Replace or clear the component selection.
    SelectComponent { component: Option<String> },
    /// Request image analysis for a base64 encoded photograph.
    RequestAnalysis { image: String },
    /// Dismiss the current analysis result.
    DismissAnalysis,
}

impl Action {
    /// Action kind for logging, without dragging payloads into the log.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SelectServer { .. } => "select_server",
            Action::ReturnToFacility => "return_to_facility",
            Action::SetViewMode { .. } => "set_view_mode",
            Action::SelectComponent { .. } => "select_component",
            Action::RequestAnalysis { .. } => "request_analysis",
            Action::DismissAnalysis => "dismiss_analysis",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_server_wire_format() {
        let action: Action =
            serde_json::from_str(r#"{"action":"select_server","server":"A1-unit-3"}"#).unwrap();

        assert_eq!(
            action,
            Action::SelectServer {
                server: "A1-unit-3".to_string()
            }
        );
    }

    #[test]
    fn test_return_to_facility_wire_format() {
        let action: Action = serde_json::from_str(r#"{"action":"return_to_facility"}"#).unwrap();

        assert_eq!(action, Action::ReturnToFacility);
    }

    #[test]
    fn test_set_view_mode_wire_format() {
        let action: Action =
            serde_json::from_str(r#"{"action":"set_view_mode","mode":"thermal"}"#).unwrap();

        assert_eq!(
            action,
            Action::SetViewMode {
                mode: ViewMode::Thermal
            }
        );
    }

    #[test]
    fn test_select_component_wire_format() {
        let action: Action =
            serde_json::from_str(r#"{"action":"select_component","component":"gpu-0"}"#).unwrap();

        assert_eq!(
            action,
            Action::SelectComponent {
                component: Some("gpu-0".to_string())
            }
        );

        let action: Action =
            serde_json::from_str(r#"{"action":"select_component","component":null}"#).unwrap();

        assert_eq!(action, Action::SelectComponent { component: None });
    }

    #[test]
    fn test_malformed_action_is_rejected() {
        assert!(serde_json::from_str::<Action>(r#"{"action":"warp_drive"}"#).is_err());
        assert!(serde_json::from_str::<Action>(r#"{"server":"A1-unit-3"}"#).is_err());
        assert!(serde_json::from_str::<Action>("not json at all").is_err());
    }

    #[test]
    fn test_action_kind() {
        let action = Action::RequestAnalysis {
            image: "aGVsbG8=".to_string(),
        };

        assert_eq!(action.kind(), "request_analysis");
        assert_eq!(Action::DismissAnalysis.kind(), "dismiss_analysis");
    }
}
