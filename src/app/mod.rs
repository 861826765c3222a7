// LogDash - app/mod.rs
//
// Application layer: state management and load orchestration.
// Dependencies: core layer, platform config/fs.
// Must NOT depend on: ui.

pub mod state;
