pub mod a001_church;
pub mod a002_department;
pub mod a003_member;
pub mod a004_activity_log;
pub mod common;
