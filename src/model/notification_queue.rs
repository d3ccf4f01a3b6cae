use crate::domain::notification::{Notification, NotificationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Pushed(Notification),
    Dismissed(NotificationId),
}

/// Live notifications in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn contains(&self, id: NotificationId) -> bool {
        self.notifications.iter().any(|n| n.id() == id)
    }

    pub fn to_vec(&self) -> Vec<Notification> {
        self.notifications.clone()
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Removes the notification with `id`. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.notifications.iter().position(|n| n.id() == id) {
            Some(pos) => {
                self.notifications.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Applies `message` and returns whether the visible list changed.
    pub fn update(&mut self, message: Message) -> bool {
        match message {
            Message::Pushed(notification) => {
                self.push(notification);
                true
            }
            Message::Dismissed(id) => self.dismiss(id),
        }
    }
}
