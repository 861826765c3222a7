// LogDash - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app, or direct I/O.

pub mod export;
pub mod filter;
pub mod format;
pub mod loader;
pub mod model;
pub mod row;
