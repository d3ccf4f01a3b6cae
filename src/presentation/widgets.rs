//! Reusable widgets
//!
//! Rendering for the notification overlay and the main help pane.

pub mod key_help;
pub mod notification_list;

pub use key_help::KeyHelpWidget;
pub use notification_list::NotificationListWidget;
