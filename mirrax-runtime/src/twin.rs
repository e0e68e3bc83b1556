use serde_derive::Serialize;

use crate::core::{
    Action, AnalysisState, DetectedComponent, FacilityMetrics, HardwareComponent, ViewState,
};
use crate::facility::{Facility, ServerUnit};
use crate::registry::HardwareRegistry;

/// Twin state shared between services and sessions.
pub type SharedTwinState = std::sync::Arc<tokio::sync::RwLock<TwinState>>;

/// Render boundary value, published on every tick and every applied action.
///
/// Frames are self contained. Consumers never diff, the latest frame
/// always wins.
#[derive(Clone, Debug, Serialize)]
pub struct Frame {
    /// Snapshot iteration counter.
    pub iteration: u64,
    /// Publication timestamp.
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Latest telemetry snapshot in registry order.
    pub components: Vec<HardwareComponent>,
    /// Current view state.
    pub view: ViewState,
    /// Current analysis state.
    pub analysis: AnalysisState,
    /// Facility aggregates over the snapshot.
    pub metrics: FacilityMetrics,
}

/// Digital twin of one server node inside a facility.
///
/// Owns the registry, the facility layout, the latest telemetry snapshot
/// and the view and analysis state. All mutation goes through the methods
/// below while holding the write lock; the snapshot itself is replaced
/// wholesale and never edited in place.
pub struct TwinState {
    registry: HardwareRegistry,
    facility: Facility,
    snapshot: Vec<HardwareComponent>,
    view: ViewState,
    analysis: AnalysisState,
    iteration: u64,
}

impl TwinState {
    /// Construct the twin with the registry seed as the first snapshot.
    pub fn new(registry: HardwareRegistry, facility: Facility) -> Self {
        let snapshot = registry.all().to_vec();

        Self {
            registry,
            facility,
            snapshot,
            view: ViewState::default(),
            analysis: AnalysisState::default(),
            iteration: 0,
        }
    }

    /// Latest telemetry snapshot in registry order.
    #[inline]
    pub fn snapshot(&self) -> &[HardwareComponent] {
        &self.snapshot
    }

    /// Snapshot iteration counter, incremented on every commit.
    #[inline]
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Hardware registry backing the twin.
    #[inline]
    pub fn registry(&self) -> &HardwareRegistry {
        &self.registry
    }

    /// Facility layout backing the twin.
    #[inline]
    pub fn facility(&self) -> &Facility {
        &self.facility
    }

    /// Current view state.
    #[inline]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Current analysis state.
    #[inline]
    pub fn analysis(&self) -> &AnalysisState {
        &self.analysis
    }

    /// Replace the snapshot wholesale with the next tick.
    pub fn commit_snapshot(&mut self, next: Vec<HardwareComponent>) {
        self.snapshot = next;
        self.iteration += 1;
    }

    /// Apply one user action.
    ///
    /// Unknown server or component identifiers are stored anyway; detail
    /// lookups then resolve to nothing. An analysis request marks the
    /// analysis pending and hands the image payload back to the caller,
    /// the request itself must run off the update path.
    pub fn apply(&mut self, action: Action) -> Option<String> {
        match action {
            Action::SelectServer { server } => {
                if !self.facility.contains_unit(&server) {
                    log::warn!("Server unit '{}' is not part of the facility", server);
                }
                self.view.select_server(server);
                None
            }
            Action::ReturnToFacility => {
                self.view.return_to_facility();
                None
            }
            Action::SetViewMode { mode } => {
                self.view.set_view_mode(mode);
                None
            }
            Action::SelectComponent { component } => {
                if let Some(id) = &component {
                    if self.registry.by_id(id).is_none() {
                        log::warn!("Component '{}' is not in the registry", id);
                    }
                }
                self.view.select_component(component);
                None
            }
            Action::RequestAnalysis { image } => {
                self.analysis = AnalysisState::Pending;
                Some(image)
            }
            Action::DismissAnalysis => {
                self.analysis = AnalysisState::Idle;
                None
            }
        }
    }

    /// Commit an analysis completion.
    ///
    /// Only applies while a request is pending. A late completion, for
    /// example after the user dismissed the analysis, is dropped.
    pub fn complete_analysis(&mut self, result: Option<Vec<DetectedComponent>>) {
        if !self.analysis.is_pending() {
            log::debug!("Dropping analysis completion, no request pending");
            return;
        }

        self.analysis = match result {
            Some(components) => AnalysisState::Ready { components },
            None => AnalysisState::Unavailable,
        };
    }

    /// Dismiss the analysis, returning it to idle.
    pub fn dismiss_analysis(&mut self) {
        self.analysis = AnalysisState::Idle;
    }

    /// Currently selected component in the latest snapshot.
    ///
    /// Resolves through the registry index, which is valid for every
    /// snapshot. An unset or unknown selection yields nothing.
    pub fn selected_component(&self) -> Option<&HardwareComponent> {
        let id = self.view.selected_component.as_ref()?;
        let position = self.registry.index_of(id)?;

        self.snapshot.get(position)
    }

    /// Currently active server unit, if it exists in the facility.
    pub fn active_server(&self) -> Option<&ServerUnit> {
        let id = self.view.active_server.as_ref()?;

        self.facility.unit(id)
    }

    /// Facility aggregates over the latest snapshot.
    pub fn metrics(&self) -> FacilityMetrics {
        FacilityMetrics::from_snapshot(&self.snapshot)
    }

    /// Assemble the render boundary frame for the current state.
    pub fn frame(&self) -> Frame {
        Frame {
            iteration: self.iteration,
            timestamp: chrono::Utc::now(),
            components: self.snapshot.clone(),
            view: self.view.clone(),
            analysis: self.analysis.clone(),
            metrics: self.metrics(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SceneLevel, ViewMode};
    use crate::registry::default_seed;

    fn twin() -> TwinState {
        TwinState::new(
            HardwareRegistry::new(default_seed()).unwrap(),
            Facility::default(),
        )
    }

    #[test]
    fn test_initial_snapshot_is_seed() {
        let twin = twin();

        assert_eq!(twin.iteration(), 0);
        assert_eq!(twin.snapshot(), twin.registry().all());
        assert_eq!(twin.view().scene_level, SceneLevel::Facility);
        assert_eq!(twin.analysis(), &AnalysisState::Idle);
    }

    #[test]
    fn test_commit_replaces_wholesale() {
        let mut twin = twin();

        let mut next = twin.snapshot().to_vec();
        next[0].temperature = 43.0;
        twin.commit_snapshot(next);

        assert_eq!(twin.iteration(), 1);
        assert_eq!(twin.snapshot()[0].temperature, 43.0);
        assert_eq!(twin.registry().all()[0].temperature, 42.0);
    }

    #[test]
    fn test_apply_select_server() {
        let mut twin = twin();

        let payload = twin.apply(Action::SelectServer {
            server: "A1-unit-3".to_string(),
        });

        assert_eq!(payload, None);
        assert_eq!(twin.view().scene_level, SceneLevel::NodeDetail);
        assert_eq!(twin.active_server().unwrap().rack, "A1");
    }

    #[test]
    fn test_apply_unknown_server_yields_empty_detail() {
        let mut twin = twin();

        twin.apply(Action::SelectServer {
            server: "Z9-unit-1".to_string(),
        });

        assert_eq!(twin.view().active_server, Some("Z9-unit-1".to_string()));
        assert!(twin.active_server().is_none());
    }

    #[test]
    fn test_apply_return_to_facility() {
        let mut twin = twin();

        twin.apply(Action::SelectServer {
            server: "A1-unit-3".to_string(),
        });
        twin.apply(Action::ReturnToFacility);

        assert_eq!(twin.view().scene_level, SceneLevel::Facility);
        assert_eq!(twin.view().active_server, None);
    }

    #[test]
    fn test_selected_component_resolves_in_snapshot() {
        let mut twin = twin();

        twin.apply(Action::SelectComponent {
            component: Some("gpu-0".to_string()),
        });

        let mut next = twin.snapshot().to_vec();
        next[1].load = 60.0;
        twin.commit_snapshot(next);

        let selected = twin.selected_component().unwrap();
        assert_eq!(selected.id, "gpu-0");
        assert_eq!(selected.load, 60.0);
    }

    #[test]
    fn test_unknown_selection_yields_empty_detail() {
        let mut twin = twin();

        twin.apply(Action::SelectComponent {
            component: Some("fan-9".to_string()),
        });

        assert_eq!(twin.view().selected_component, Some("fan-9".to_string()));
        assert!(twin.selected_component().is_none());
    }

    #[test]
    fn test_analysis_lifecycle() {
        let mut twin = twin();

        let payload = twin.apply(Action::RequestAnalysis {
            image: "aGVsbG8=".to_string(),
        });

        assert_eq!(payload, Some("aGVsbG8=".to_string()));
        assert!(twin.analysis().is_pending());

        twin.complete_analysis(Some(vec![DetectedComponent {
            name: "RTX 4090".to_string(),
            category: "GPU".to_string(),
            description: None,
        }]));

        assert!(matches!(
            twin.analysis(),
            AnalysisState::Ready { components } if components.len() == 1
        ));

        twin.dismiss_analysis();
        assert_eq!(twin.analysis(), &AnalysisState::Idle);
    }

    #[test]
    fn test_failed_analysis_is_unavailable() {
        let mut twin = twin();

        twin.apply(Action::RequestAnalysis {
            image: "aGVsbG8=".to_string(),
        });
        twin.complete_analysis(None);

        assert_eq!(twin.analysis(), &AnalysisState::Unavailable);
    }

    #[test]
    fn test_late_completion_is_dropped() {
        let mut twin = twin();

        twin.apply(Action::RequestAnalysis {
            image: "aGVsbG8=".to_string(),
        });
        twin.apply(Action::DismissAnalysis);

        twin.complete_analysis(Some(vec![DetectedComponent {
            name: "RTX 4090".to_string(),
            category: "GPU".to_string(),
            description: None,
        }]));

        assert_eq!(twin.analysis(), &AnalysisState::Idle);
    }

    #[test]
    fn test_analysis_failure_keeps_state_interactive() {
        let mut twin = twin();

        twin.apply(Action::RequestAnalysis {
            image: "not valid base64".to_string(),
        });
        twin.complete_analysis(None);

        twin.apply(Action::SetViewMode {
            mode: ViewMode::Thermal,
        });

        assert_eq!(twin.view().view_mode, ViewMode::Thermal);
        assert_eq!(twin.analysis(), &AnalysisState::Unavailable);
    }

    #[test]
    fn test_frame_reflects_state() {
        let mut twin = twin();

        twin.apply(Action::SetViewMode {
            mode: ViewMode::Xray,
        });
        let next = twin.snapshot().to_vec();
        twin.commit_snapshot(next);

        let frame = twin.frame();

        assert_eq!(frame.iteration, 1);
        assert_eq!(frame.components.len(), 5);
        assert_eq!(frame.view.view_mode, ViewMode::Xray);
        assert_eq!(frame.metrics.components, 5);
    }
}
