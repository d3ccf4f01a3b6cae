//! Notification provider
//!
//! One task owns the [`NotificationQueue`] together with a `DelayQueue` that
//! holds exactly one expiry per live notification. Callers reach it through a
//! cloneable [`Notifier`]; renderers watch the ordered list, which is replaced
//! whole on every change.
//!
//! Teardown cancels every pending expiry at once. A disposed provider never
//! publishes another change.

use std::time::Duration;

use color_eyre::eyre::Result;
use futures::StreamExt;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tokio_util::{sync::CancellationToken, time::DelayQueue};

use crate::{
    domain::notification::{Notification, NotificationId, NotificationKind},
    infrastructure::config::NotificationConfig,
    model::notification_queue::{Message, NotificationQueue},
};

#[derive(Debug)]
enum Command {
    Notify {
        message: String,
        kind: NotificationKind,
    },
}

/// Handle used by the rest of the UI to raise notifications.
#[derive(Clone, Debug)]
pub struct Notifier {
    command_tx: mpsc::UnboundedSender<Command>,
}

impl Notifier {
    /// Appends a notification that disappears after the configured delay.
    ///
    /// Never fails; once the provider is gone the call is dropped with a warning.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        let message = message.into();
        if self
            .command_tx
            .send(Command::Notify { message, kind })
            .is_err()
        {
            tracing::warn!(%kind, "notification dropped: provider already disposed");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Error);
    }
}

/// Owner of the notification queue and its expiry timers.
///
/// Must be created inside a tokio runtime. Call [`dispose`](Self::dispose) to
/// tear it down; dropping it cancels the timers the same way without waiting.
pub struct NotificationProvider {
    command_tx: mpsc::UnboundedSender<Command>,
    notifications_rx: watch::Receiver<Vec<Notification>>,
    cancellation_token: CancellationToken,
    task: Option<JoinHandle<usize>>,
}

impl NotificationProvider {
    pub fn create(config: NotificationConfig) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (notifications_tx, notifications_rx) = watch::channel(Vec::new());
        let cancellation_token = CancellationToken::new();

        let dismiss_after = config.dismiss_after();
        if dismiss_after.as_millis() != u128::from(config.dismiss_after_ms) {
            tracing::warn!(
                dismiss_after_ms = config.dismiss_after_ms,
                clamped_ms = dismiss_after.as_millis(),
                "notification delay out of range"
            );
        }

        let driver = QueueDriver {
            dismiss_after,
            queue: NotificationQueue::new(),
            timers: DelayQueue::new(),
            command_rx,
            notifications_tx,
            cancellation_token: cancellation_token.clone(),
        };
        tracing::debug!(
            dismiss_after_ms = config.dismiss_after_ms,
            "notification provider created"
        );
        let task = tokio::spawn(driver.run());

        Self {
            command_tx,
            notifications_rx,
            cancellation_token,
            task: Some(task),
        }
    }

    pub fn notifier(&self) -> Notifier {
        Notifier {
            command_tx: self.command_tx.clone(),
        }
    }

    /// Ordered list of live notifications, replaced whole on every change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.notifications_rx.clone()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications_rx.borrow().clone()
    }

    /// Cancels every pending expiry and stops the queue task.
    ///
    /// Returns how many timers were cancelled before they fired.
    pub async fn dispose(mut self) -> Result<usize> {
        self.cancellation_token.cancel();
        let Some(task) = self.task.take() else {
            return Ok(0);
        };
        let cancelled = task.await?;
        tracing::info!(cancelled, "notification provider disposed");
        Ok(cancelled)
    }
}

impl Drop for NotificationProvider {
    fn drop(&mut self) {
        self.cancellation_token.cancel();
    }
}

struct QueueDriver {
    dismiss_after: Duration,
    queue: NotificationQueue,
    timers: DelayQueue<NotificationId>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    notifications_tx: watch::Sender<Vec<Notification>>,
    cancellation_token: CancellationToken,
}

impl QueueDriver {
    async fn run(mut self) -> usize {
        loop {
            tokio::select! {
                biased;
                _ = self.cancellation_token.cancelled() => break,
                Some(expired) = self.timers.next(), if !self.timers.is_empty() => {
                    let id = expired.into_inner();
                    self.apply(Message::Dismissed(id));
                    tracing::debug!(%id, "notification expired");
                }
                command = self.command_rx.recv() => match command {
                    Some(Command::Notify { message, kind }) => self.push(message, kind),
                    // every sender is gone, so nothing can be raised any more
                    None => break,
                },
            }
        }
        self.teardown()
    }

    fn push(&mut self, message: String, kind: NotificationKind) {
        let notification = Notification::new(message, kind);
        let id = notification.id();
        self.timers.insert(id, self.dismiss_after);
        self.apply(Message::Pushed(notification));
        tracing::debug!(%id, %kind, "notification raised");
    }

    fn apply(&mut self, message: Message) {
        if self.queue.update(message) {
            self.notifications_tx.send_replace(self.queue.to_vec());
        }
    }

    fn teardown(mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        cancelled
    }
}
