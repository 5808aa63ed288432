//! Church detail pane: headline numbers and departments with their staff

mod model;
mod view;

pub use view::ChurchDetails;
