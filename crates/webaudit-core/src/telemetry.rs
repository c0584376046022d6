//! Tracing initialisation for processes embedding webaudit.
//!
//! `RUST_LOG` wins when set; otherwise the level passed in (or read from
//! `WEBAUDIT_LOG_LEVEL`) applies. Only the first initialisation in a process
//! takes effect.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// * `json` — emit newline-delimited JSON log lines.
/// * `level` — default verbosity when `RUST_LOG` is not set.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let (json_layer, text_layer) = if json {
        (Some(fmt::layer().with_target(false).json()), None)
    } else {
        (None, Some(fmt::layer().with_target(false)))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .ok();
}

/// Initialise from `WEBAUDIT_LOG_FORMAT` (`json` or `text`) and
/// `WEBAUDIT_LOG_LEVEL`; unknown values fall back to text at `INFO`.
pub fn init_tracing_from_env() {
    let json = std::env::var("WEBAUDIT_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let level = std::env::var("WEBAUDIT_LOG_LEVEL")
        .ok()
        .and_then(|l| Level::from_str(l.trim()).ok())
        .unwrap_or(Level::INFO);
    init_tracing(json, level);
}
