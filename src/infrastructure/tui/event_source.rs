use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::infrastructure::tui::{Event, TuiLike};

/// Where the runner pulls terminal events from.
pub enum EventSource {
    /// Events produced by a terminal (real or headless).
    Tui(Arc<Mutex<dyn TuiLike + Send>>),
    /// A fixed script; `None` once it runs dry.
    Scripted(VecDeque<Event>),
}

impl EventSource {
    pub fn tui(tui: Arc<Mutex<dyn TuiLike + Send>>) -> Self {
        EventSource::Tui(tui)
    }

    pub fn scripted(events: impl IntoIterator<Item = Event>) -> Self {
        EventSource::Scripted(events.into_iter().collect())
    }

    pub async fn next(&mut self) -> Option<Event> {
        match self {
            EventSource::Tui(tui) => {
                let mut guard = tui.lock().await;
                guard.next().await
            }
            EventSource::Scripted(queue) => queue.pop_front(),
        }
    }
}
