// InternDesk - ui/panels/mod.rs

pub mod about;
pub mod alert;
pub mod chart;
pub mod dashboard;
pub mod intern_modal;
pub mod interns;
pub mod notifications;
pub mod skeleton;
