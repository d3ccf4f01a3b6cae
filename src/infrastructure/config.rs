use std::path::{Path, PathBuf};
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;

use crate::presentation::config::keybindings::KeyBindings;
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_DISMISS_AFTER_MS: u64 = 3000;
/// Longest accepted delay, about 49 days. Well below what a `DelayQueue` can hold.
pub const MAX_DISMISS_AFTER_MS: u64 = u32::MAX as u64;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct NotificationConfig {
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

fn default_dismiss_after_ms() -> u64 {
    DEFAULT_DISMISS_AFTER_MS
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: DEFAULT_DISMISS_AFTER_MS,
        }
    }
}

impl NotificationConfig {
    /// Delay before a notification is dismissed, kept within
    /// `1..=MAX_DISMISS_AFTER_MS` ms for configs built without [`Config::load`].
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms.clamp(1, MAX_DISMISS_AFTER_MS))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Config {
    /// Loads the user configuration from the platform directories, on top of
    /// the embedded defaults.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(&utils::get_data_dir(), &utils::get_config_dir())
    }

    /// Built-in configuration only.
    pub fn defaults() -> Result<Self, ConfigError> {
        json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))
    }

    pub fn load(data_dir: &Path, config_dir: &Path) -> Result<Self, ConfigError> {
        let default_config = Self::defaults()?;
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!(
                "No configuration file found in {}, using defaults",
                config_dir.display()
            );
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        // User bindings win; defaults fill the keys they leave unbound.
        for (key, action) in default_config.keybindings.iter() {
            cfg.keybindings
                .entry(*key)
                .or_insert_with(|| action.clone());
        }

        match cfg.notifications.dismiss_after_ms {
            0 => {
                return Err(ConfigError::Message(String::from(
                    "notifications.dismiss_after_ms must be greater than zero",
                )))
            }
            ms if ms > MAX_DISMISS_AFTER_MS => {
                return Err(ConfigError::Message(format!(
                    "notifications.dismiss_after_ms must be at most {MAX_DISMISS_AFTER_MS}, got {ms}"
                )))
            }
            _ => {}
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::action::Action;
    use crate::domain::notification::NotificationKind;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_embedded_defaults() {
        let cfg = Config::defaults().expect("embedded config parses");
        assert_eq!(cfg.notifications, NotificationConfig::default());
        assert_eq!(cfg.notifications.dismiss_after(), Duration::from_millis(3000));
        assert_eq!(cfg.keybindings.action_for(&key('q')), Some(&Action::Quit));
        assert_eq!(
            cfg.keybindings.action_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(&Action::Quit)
        );
        assert_eq!(
            cfg.keybindings.action_for(&key('u')),
            Some(&Action::Notify {
                message: "Document envoyé avec succès !".to_string(),
                kind: NotificationKind::Success,
            })
        );
    }

    #[test]
    fn test_load_without_user_file_uses_defaults() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let config_dir = tempfile::tempdir().expect("tempdir");

        let cfg = Config::load(data_dir.path(), config_dir.path()).expect("config loads");

        assert_eq!(cfg.notifications.dismiss_after_ms, DEFAULT_DISMISS_AFTER_MS);
        assert_eq!(cfg.config._config_dir, config_dir.path());
        assert_eq!(cfg.config._data_dir, data_dir.path());
        assert_eq!(
            cfg.keybindings.len(),
            Config::defaults().expect("defaults").keybindings.len()
        );
    }

    #[test]
    fn test_user_file_overrides_and_merges() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let config_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            config_dir.path().join("config.json5"),
            r#"{
                "notifications": { "dismiss_after_ms": 5000 },
                "keybindings": {
                    "<q>": { "Notify": { "message": "Code invalide", "kind": "error" } },
                    "<x>": "Quit"
                }
            }"#,
        )
        .expect("write config");

        let cfg = Config::load(data_dir.path(), config_dir.path()).expect("config loads");

        assert_eq!(cfg.notifications.dismiss_after(), Duration::from_secs(5));
        assert_eq!(cfg.keybindings.action_for(&key('x')), Some(&Action::Quit));
        assert_eq!(
            cfg.keybindings.action_for(&key('q')),
            Some(&Action::Notify {
                message: "Code invalide".to_string(),
                kind: NotificationKind::Error,
            })
        );
        // untouched defaults are still bound
        assert!(cfg.keybindings.action_for(&key('u')).is_some());
    }

    #[test]
    fn test_zero_delay_is_rejected() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let config_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            config_dir.path().join("config.toml"),
            "[notifications]\ndismiss_after_ms = 0\n",
        )
        .expect("write config");

        let err = Config::load(data_dir.path(), config_dir.path()).expect_err("must fail");
        assert!(err.to_string().contains("dismiss_after_ms"));
    }

    #[test]
    fn test_oversized_delay_is_rejected() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let config_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            config_dir.path().join("config.json5"),
            r#"{ "notifications": { "dismiss_after_ms": 100000000000 } }"#,
        )
        .expect("write config");

        let err = Config::load(data_dir.path(), config_dir.path()).expect_err("must fail");
        assert!(err.to_string().contains("at most 4294967295"), "{err}");
    }

    #[test]
    fn test_largest_delay_is_accepted() {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let config_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            config_dir.path().join("config.json5"),
            format!(r#"{{ "notifications": {{ "dismiss_after_ms": {MAX_DISMISS_AFTER_MS} }} }}"#),
        )
        .expect("write config");

        let cfg = Config::load(data_dir.path(), config_dir.path()).expect("config loads");
        assert_eq!(cfg.notifications.dismiss_after_ms, MAX_DISMISS_AFTER_MS);
    }

    #[test]
    fn test_dismiss_after_is_clamped() {
        let oversized = NotificationConfig {
            dismiss_after_ms: u64::MAX,
        };
        let zero = NotificationConfig {
            dismiss_after_ms: 0,
        };
        assert_eq!(
            oversized.dismiss_after(),
            Duration::from_millis(MAX_DISMISS_AFTER_MS)
        );
        assert_eq!(zero.dismiss_after(), Duration::from_millis(1));
    }
}
