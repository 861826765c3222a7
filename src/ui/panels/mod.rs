// LogDash - ui/panels/mod.rs

pub mod about;
pub mod filters;
pub mod log_list;
pub mod log_row;
