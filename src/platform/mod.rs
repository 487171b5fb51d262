// InternDesk - platform/mod.rs
//
// Platform abstraction layer: the portal HTTP client, directories, config.
// Dependencies: util, core (models only), reqwest, directories, toml.
// Must NOT depend on: app, ui.

pub mod api;
pub mod config;
