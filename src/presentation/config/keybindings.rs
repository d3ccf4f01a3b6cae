use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{de, Deserialize, Deserializer};

use crate::action::Action;

/// Single-key bindings, e.g. `"<Ctrl-c>": "Quit"`.
#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyBindings(pub HashMap<KeyEvent, Action>);

impl KeyBindings {
    /// Looks up `key`, ignoring the event kind and state flags reported by the terminal.
    pub fn action_for(&self, key: &KeyEvent) -> Option<&Action> {
        self.0.get(&KeyEvent::new(key.code, key.modifiers))
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<String, Action>::deserialize(deserializer)?;
        let keybindings = parsed_map
            .into_iter()
            .map(|(raw, action)| {
                parse_key_event(&raw)
                    .map(|key| (key, action))
                    .map_err(de::Error::custom)
            })
            .collect::<Result<_, _>>()?;
        Ok(KeyBindings(keybindings))
    }
}

/// Parses `"<Ctrl-c>"`, `"<enter>"`, `"<U>"` and friends into a key event.
pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    let inner = raw
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(raw);
    if inner.is_empty() {
        return Err(format!("Unable to parse empty key binding `{raw}`"));
    }
    if inner == "-" {
        return Ok(KeyEvent::new(KeyCode::Char('-'), KeyModifiers::NONE));
    }

    let mut parts: Vec<&str> = inner.split('-').collect();
    let key = parts.pop().unwrap_or_default();
    let mut modifiers = KeyModifiers::NONE;
    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" => modifiers.insert(KeyModifiers::CONTROL),
            "alt" => modifiers.insert(KeyModifiers::ALT),
            "shift" => modifiers.insert(KeyModifiers::SHIFT),
            other => return Err(format!("Unknown modifier `{other}` in `{raw}`")),
        }
    }

    let code = parse_key_code(key, &mut modifiers)
        .ok_or_else(|| format!("Unknown key `{key}` in `{raw}`"))?;
    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(key: &str, modifiers: &mut KeyModifiers) -> Option<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_uppercase() {
            modifiers.insert(KeyModifiers::SHIFT);
        }
        let c = if modifiers.contains(KeyModifiers::SHIFT) {
            c.to_ascii_uppercase()
        } else {
            c
        };
        return Some(KeyCode::Char(c));
    }

    let lower = key.to_ascii_lowercase();
    let code = match lower.as_str() {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        }
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        f if f.starts_with('f') => KeyCode::F(f[1..].parse::<u8>().ok()?),
        _ => return None,
    };
    Some(code)
}

/// Renders a key event back into the `"<Ctrl-c>"` notation.
pub fn key_event_to_string(key: &KeyEvent) -> String {
    let code = match key.code {
        KeyCode::Char(' ') => String::from("space"),
        KeyCode::Char('-') => String::from("minus"),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => String::from("esc"),
        KeyCode::Enter => String::from("enter"),
        KeyCode::Left => String::from("left"),
        KeyCode::Right => String::from("right"),
        KeyCode::Up => String::from("up"),
        KeyCode::Down => String::from("down"),
        KeyCode::Home => String::from("home"),
        KeyCode::End => String::from("end"),
        KeyCode::PageUp => String::from("pageup"),
        KeyCode::PageDown => String::from("pagedown"),
        KeyCode::BackTab => String::from("backtab"),
        KeyCode::Backspace => String::from("backspace"),
        KeyCode::Delete => String::from("delete"),
        KeyCode::Insert => String::from("insert"),
        KeyCode::Tab => String::from("tab"),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    };

    let mut parts = Vec::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push(String::from("Ctrl"));
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push(String::from("Alt"));
    }
    // an upper-case char or backtab already implies shift
    if key.modifiers.contains(KeyModifiers::SHIFT)
        && !matches!(key.code, KeyCode::Char(_) | KeyCode::BackTab)
    {
        parts.push(String::from("Shift"));
    }
    parts.push(code);
    format!("<{}>", parts.join("-"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::notification::NotificationKind;

    #[rstest]
    #[case("<q>", KeyCode::Char('q'), KeyModifiers::NONE)]
    #[case("q", KeyCode::Char('q'), KeyModifiers::NONE)]
    #[case("<U>", KeyCode::Char('U'), KeyModifiers::SHIFT)]
    #[case("<Shift-u>", KeyCode::Char('U'), KeyModifiers::SHIFT)]
    #[case("<Ctrl-c>", KeyCode::Char('c'), KeyModifiers::CONTROL)]
    #[case("<ctrl-alt-x>", KeyCode::Char('x'), KeyModifiers::CONTROL | KeyModifiers::ALT)]
    #[case("<enter>", KeyCode::Enter, KeyModifiers::NONE)]
    #[case("<Esc>", KeyCode::Esc, KeyModifiers::NONE)]
    #[case("<space>", KeyCode::Char(' '), KeyModifiers::NONE)]
    #[case("<F5>", KeyCode::F(5), KeyModifiers::NONE)]
    #[case("<->", KeyCode::Char('-'), KeyModifiers::NONE)]
    fn test_parse_key_event(
        #[case] raw: &str,
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
    ) {
        assert_eq!(parse_key_event(raw), Ok(KeyEvent::new(code, modifiers)));
    }

    #[rstest]
    #[case("<q>")]
    #[case("<U>")]
    #[case("<Ctrl-c>")]
    #[case("<Ctrl-Alt-x>")]
    #[case("<Shift-enter>")]
    #[case("<space>")]
    #[case("<minus>")]
    #[case("<F12>")]
    fn test_key_event_to_string_round_trips(#[case] raw: &str) {
        let key = parse_key_event(raw).expect("valid key");
        assert_eq!(key_event_to_string(&key), raw);
    }

    #[rstest]
    #[case("<>")]
    #[case("<hyper-x>")]
    #[case("<nokey>")]
    #[case("<fx>")]
    fn test_parse_key_event_errors(#[case] raw: &str) {
        assert!(parse_key_event(raw).is_err());
    }

    #[test]
    fn test_deserialize_keybindings() {
        let keybindings: KeyBindings = json5::from_str(
            r#"{
                "<q>": "Quit",
                "<u>": { "Notify": { "message": "Document envoyé avec succès !" } }
            }"#,
        )
        .expect("valid keybindings");

        assert_eq!(keybindings.len(), 2);
        assert_eq!(
            keybindings.action_for(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(&Action::Quit)
        );
        assert_eq!(
            keybindings.action_for(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE)),
            Some(&Action::Notify {
                message: "Document envoyé avec succès !".to_string(),
                kind: NotificationKind::Success,
            })
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_key() {
        let result = json5::from_str::<KeyBindings>(r#"{ "<hyper-q>": "Quit" }"#);
        assert!(result.is_err());
    }
}
