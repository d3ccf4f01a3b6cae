//! Logging utilities

use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    filter::EnvFilter, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
    Layer,
};

use super::paths::{get_data_dir, LOG_ENV, LOG_FILE};

/// Routes `tracing` (and `log`) records to `<data dir>/pharmadoc-ui.log`.
///
/// The filter comes from `RUST_LOG`, then `PHARMADOC_UI_LOGLEVEL`, and falls
/// back to `info` for this crate.
pub fn initialize_logging() -> Result<()> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(directory.join(LOG_FILE.as_str()))?;

    let directives = filter_directives(
        std::env::var("RUST_LOG").ok(),
        std::env::var(LOG_ENV.as_str()).ok(),
    );
    let file_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::try_new(directives)?);
    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

fn filter_directives(rust_log: Option<String>, app_level: Option<String>) -> String {
    let non_blank = |directives: &String| !directives.trim().is_empty();
    rust_log
        .filter(non_blank)
        .or_else(|| app_level.filter(non_blank))
        .unwrap_or_else(|| format!("{}=info", env!("CARGO_CRATE_NAME")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins() {
        assert_eq!(
            filter_directives(Some("debug".into()), Some("warn".into())),
            "debug"
        );
    }

    #[test]
    fn test_app_level_is_second_choice() {
        assert_eq!(
            filter_directives(None, Some("pharmadoc_ui=trace".into())),
            "pharmadoc_ui=trace"
        );
    }

    #[test]
    fn test_defaults_to_crate_info() {
        assert_eq!(filter_directives(None, None), "pharmadoc_ui=info");
        assert_eq!(filter_directives(Some("  ".into()), None), "pharmadoc_ui=info");
        assert_eq!(
            filter_directives(Some(String::new()), Some("warn".into())),
            "warn"
        );
    }
}
