use serde_derive::{Deserialize, Serialize};

/// Camera scene level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneLevel {
    /// Facility overview with all racks in view.
    #[default]
    Facility,
    /// Close-up of a single server node.
    NodeDetail,
}

impl std::fmt::Display for SceneLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLevel::Facility => write!(f, "Facility"),
            SceneLevel::NodeDetail => write!(f, "Node detail"),
        }
    }
}

/// Rendering mode, orthogonal to the scene level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Standard shaded rendering.
    #[default]
    Normal,
    /// See-through rendering exposing internals.
    Xray,
    /// Heatmap rendering driven by component temperature.
    Thermal,
    /// Edge-only rendering.
    Wireframe,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Normal => write!(f, "Normal"),
            ViewMode::Xray => write!(f, "X-Ray"),
            ViewMode::Thermal => write!(f, "Thermal"),
            ViewMode::Wireframe => write!(f, "Wireframe"),
        }
    }
}

/// View state driving the external renderer.
///
/// The state mutates only through the transition methods below, one
/// discrete user action at a time. There is no terminal state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    /// Current scene level.
    pub scene_level: SceneLevel,
    /// Selected server unit, if any.
    pub active_server: Option<String>,
    /// Current rendering mode.
    pub view_mode: ViewMode,
    /// Selected hardware component, if any.
    pub selected_component: Option<String>,
}

impl ViewState {
    /// Select a server unit and move to the node detail level.
    ///
    /// Selecting another unit while already in node detail replaces the
    /// active unit without returning to the facility level first.
    pub fn select_server(&mut self, server: impl ToString) {
        self.scene_level = SceneLevel::NodeDetail;
        self.active_server = Some(server.to_string());
    }

    /// Return to the facility overview, clearing the active unit.
    pub fn return_to_facility(&mut self) {
        self.scene_level = SceneLevel::Facility;
        self.active_server = None;
    }

    /// Switch the rendering mode, leaving the rest of the state untouched.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Replace or clear the single component selection.
    pub fn select_component(&mut self, component: Option<String>) {
        self.selected_component = component;
    }
}
