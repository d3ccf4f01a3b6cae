//! # pharmadoc-ui - transient notifications for the document transfer client
//!
//! The pharmacy and patient screens of the document transfer service report
//! the outcome of every operation (upload, deletion, download, code
//! generation) through short-lived notifications. This crate implements that
//! notification core and a small terminal host to drive it.
//!
//! ## Architecture Overview
//!
//! - **Domain** (`domain`): `Notification`, its id and its kind
//! - **Model** (`model`): the ordered queue, updated through messages
//! - **Provider** (`infrastructure::notification_service`): the task that owns
//!   the queue and one expiry timer per notification
//! - **View** (`presentation`): overlay and help widgets
//! - **Host** (`integration`): event loop mapping keys to notifications
//!
//! ## Example Usage
//!
//! ```rust
//! use pharmadoc_ui::{
//!     domain::notification::NotificationKind,
//!     infrastructure::{config::NotificationConfig, notification_service::NotificationProvider},
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> pharmadoc_ui::Result<()> {
//! let provider = NotificationProvider::create(NotificationConfig::default());
//! let notifier = provider.notifier();
//! let mut list = provider.subscribe();
//!
//! notifier.notify("Document envoyé avec succès !", NotificationKind::Success);
//! list.wait_for(|list| list.len() == 1).await?;
//!
//! // timers still pending are cancelled, never fired
//! assert_eq!(provider.dispose().await?, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`domain`] - Notification types and text helpers
//! - [`model`] - Pure queue state
//! - [`infrastructure`] - Provider, configuration, CLI and terminal backends
//! - [`presentation`] - Widgets and key bindings
//! - [`integration`] - Terminal host
//! - [`utils`] - Logging, panic handling, paths

pub mod action;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod model;
pub mod presentation;
pub mod utils;

pub use action::Action;
pub use domain::notification::{Notification, NotificationId, NotificationKind};
pub use infrastructure::notification_service::{NotificationProvider, Notifier};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;
