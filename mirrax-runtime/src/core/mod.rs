pub use self::action::Action;
pub use self::analysis::{AnalysisState, DetectedComponent};
pub use self::component::{ComponentStatus, ComponentType, HardwareComponent};
pub use self::component::{LOAD_MAX, LOAD_MIN, LOAD_WARN};
pub use self::component::{TEMPERATURE_MAX, TEMPERATURE_MIN, TEMPERATURE_WARN};
pub use self::instance::Instance;
pub use self::metrics::FacilityMetrics;
pub use self::view::{SceneLevel, ViewMode, ViewState};

mod action;
mod analysis;
mod component;
mod instance;
mod metrics;
mod view;
