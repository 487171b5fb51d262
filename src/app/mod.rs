// InternDesk - app/mod.rs
//
// Application layer: session context, background fetching, view state and
// session persistence.
// Dependencies: core, platform (the PortalApi seam and config types).
// Must NOT depend on: ui.

pub mod context;
pub mod fetch;
pub mod session;
pub mod state;
