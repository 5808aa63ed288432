//! Member registration form (create and edit)
//!
//! - model.rs: REST calls, audit payloads and the local draft
//! - view_model.rs: form state, step navigation and the save command
//! - view.rs: the page

mod model;
mod view;
mod view_model;

pub use view::{edit_path, MemberFormPage, ADD_PATH};
