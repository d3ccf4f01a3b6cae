//! UI state models
//!
//! Pure state containers updated through messages.

pub mod notification_queue;
