//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events and spans; binaries, demos and
//! test harnesses call [`init_tracing`] once to see them. `RUST_LOG` takes
//! precedence over the default directive.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Install a global subscriber filtered by `RUST_LOG` or `default_directive`.
///
/// Returns `false` when a global subscriber was already installed, which
/// makes it safe to call from every test.
pub fn init_tracing(default_directive: &str, format: LogFormat) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_current_span(true)).try_init(),
    };

    installed.is_ok()
}
