//! Responsive master/detail screens.
//!
//! - `layout_mode`: viewport breakpoint detection (`ResponsiveModeDetector`)
//! - `detail_phase`: open/close lifecycle of the detail region
//! - `controller`: headless orchestration of mode, phase and close gestures
//! - `view`: the `MasterDetailLayout` Leptos component

pub mod controller;
pub mod detail_phase;
pub mod layout_mode;
pub mod view;

pub use controller::{LayoutPlan, MasterDetailController};
pub use detail_phase::DetailPhase;
pub use layout_mode::{LayoutMode, ResponsiveModeDetector, DEFAULT_BREAKPOINT_PX};
pub use view::{MasterDetailLayout, DEFAULT_TRANSITION_MS};
