//! Create/edit department dialog
//!
//! - model.rs: REST calls and audit payloads
//! - view_model.rs: form state and the save command
//! - view.rs: the dialog

mod model;
mod view;
mod view_model;

pub use view::DepartmentForm;
