pub mod aggregate;
pub mod diff;
pub mod feed;
