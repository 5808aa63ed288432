//! Member detail pane

mod view;

pub use view::MemberDetails;
