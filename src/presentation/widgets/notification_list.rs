use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Padding, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{
    notification::{Notification, NotificationKind},
    text::{single_line, truncate_to_width},
};

/// Rows taken by one entry: top border, message, bottom border.
const ENTRY_HEIGHT: u16 = 3;
/// Borders plus one column of padding on each side.
const CHROME_WIDTH: u16 = 4;
const DEFAULT_MAX_WIDTH: u16 = 48;

/// Overlay stacking live notifications in the top-right corner, oldest first.
///
/// Entries that do not fit vertically are skipped; they are still in the
/// queue and show up once earlier entries expire.
pub struct NotificationListWidget<'a> {
    notifications: &'a [Notification],
    max_width: u16,
}

impl<'a> NotificationListWidget<'a> {
    pub fn new(notifications: &'a [Notification]) -> Self {
        Self {
            notifications,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }

    pub fn max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn kind_style(kind: NotificationKind) -> Style {
        match kind {
            NotificationKind::Success => Style::default().fg(Color::Green),
            NotificationKind::Error => Style::default().fg(Color::Red),
        }
    }

    fn entry_width(&self, area: Rect) -> u16 {
        let widest = self
            .notifications
            .iter()
            .map(|n| single_line(n.message()).width())
            .max()
            .unwrap_or(0);
        let wanted = u16::try_from(widest)
            .unwrap_or(u16::MAX)
            .saturating_add(CHROME_WIDTH);
        wanted.min(self.max_width).min(area.width)
    }
}

impl<'a> Widget for NotificationListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let width = self.entry_width(area);
        if width <= CHROME_WIDTH {
            return;
        }
        let text_width = usize::from(width - CHROME_WIDTH);

        let mut y = area.top();
        for notification in self.notifications {
            if y.saturating_add(ENTRY_HEIGHT) > area.bottom() {
                break;
            }
            let entry = Rect::new(area.right() - width, y, width, ENTRY_HEIGHT);
            let style = Self::kind_style(notification.kind());
            let message = truncate_to_width(&single_line(notification.message()), text_width);

            Clear.render(entry, buf);
            Paragraph::new(message)
                .block(
                    Block::bordered()
                        .border_style(style)
                        .title(format!(" {} ", notification.kind()))
                        .padding(Padding::horizontal(1)),
                )
                .render(entry, buf);

            y += ENTRY_HEIGHT;
        }
    }
}
