//! Application wiring
//!
//! Connects terminal events, key bindings and the notification provider.

pub mod app_runner;
