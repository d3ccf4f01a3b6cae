use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph, Wrap},
};

use crate::{
    action::Action,
    presentation::{
        config::keybindings::{key_event_to_string, KeyBindings},
        widgets::notification_list::NotificationListWidget,
    },
};

/// Main pane listing what each bound key does.
pub struct KeyHelpWidget<'a> {
    keybindings: &'a KeyBindings,
}

impl<'a> KeyHelpWidget<'a> {
    pub fn new(keybindings: &'a KeyBindings) -> Self {
        Self { keybindings }
    }

    /// One line per binding, sorted by key so the layout is stable.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut entries: Vec<(String, &Action)> = self
            .keybindings
            .iter()
            .map(|(key, action)| (key_event_to_string(key), action))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        entries
            .into_iter()
            .filter_map(|(key, action)| {
                let description = match action {
                    Action::Quit => Span::raw("quit"),
                    Action::Notify { message, kind } => Span::styled(
                        format!("{kind}: {message}"),
                        NotificationListWidget::kind_style(*kind),
                    ),
                    Action::Tick | Action::Render | Action::Resize(..) => return None,
                };
                Some(Line::from(vec![
                    Span::styled(format!("{key:<12}"), Style::default().bold()),
                    description,
                ]))
            })
            .collect()
    }
}

impl<'a> Widget for KeyHelpWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(format!(" {} ", env!("CARGO_PKG_NAME"))))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::notification::NotificationKind;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_lines_are_sorted_and_skip_internal_actions() {
        let mut keybindings = KeyBindings::default();
        keybindings.insert(
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE),
            Action::Notify {
                message: "Document envoyé avec succès !".to_string(),
                kind: NotificationKind::Success,
            },
        );
        keybindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            Action::Quit,
        );
        keybindings.insert(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
            Action::Render,
        );

        let lines: Vec<String> = KeyHelpWidget::new(&keybindings)
            .lines()
            .iter()
            .map(line_text)
            .collect();

        assert_eq!(
            lines,
            vec![
                format!("{:<12}quit", "<q>"),
                format!("{:<12}success: Document envoyé avec succès !", "<u>"),
            ]
        );
    }

    #[test]
    fn test_render_shows_title() {
        let keybindings = KeyBindings::default();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        KeyHelpWidget::new(&keybindings).render(area, &mut buf);

        let top: String = (0..30).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(top.contains(" pharmadoc-ui "));
    }
}
