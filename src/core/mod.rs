// InternDesk - core/mod.rs
//
// Core business logic layer.
// Dependencies: util, serde, chrono, csv.
// Must NOT depend on: ui, platform, app, or any network crate directly.

pub mod animation;
pub mod chart;
pub mod export;
pub mod filter;
pub mod model;
pub mod stats;
