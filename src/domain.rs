//! Domain types
//!
//! Plain data shared by the queue, the provider and the overlay, plus the
//! text helpers used to fit messages on screen.

pub mod notification;
pub mod text;
