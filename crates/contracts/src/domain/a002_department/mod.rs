pub mod aggregate;
pub mod roster;
