//! Presentation layer
//!
//! This module contains UI widgets and their configuration:
//! - Notification overlay and help pane widgets
//! - Key bindings

pub mod config;
pub mod widgets;
