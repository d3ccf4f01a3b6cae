use serde::{Deserialize, Serialize};
use strum::Display;

use crate::domain::notification::NotificationKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Notify {
        message: String,
        #[serde(default)]
        kind: NotificationKind,
    },
}
