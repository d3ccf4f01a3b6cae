//! Infrastructure layer
//!
//! This module handles runtime services and external integrations:
//! - Notification provider (queue task and expiry timers)
//! - TUI foundation
//! - CLI argument processing
//! - Configuration loading

pub mod cli;
pub mod config;
pub mod notification_service;
pub mod tui;
