// metamerge - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, serde, chrono.
// Must NOT depend on: ui, platform, app, or any I/O directly.

pub mod log_view;
pub mod model;
pub mod settings;
