//! Department detail pane (roster of members and staff)

mod model;
mod view;
mod view_model;

pub use view::DepartmentDetails;
