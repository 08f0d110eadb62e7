//! Log setup for the `eol-check` binary.
//!
//! Everything goes to stderr; stdout carries the report.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// `RUST_LOG` wins over `level` when set. `json` switches to one JSON
/// object per line. Later calls are no-ops.
pub fn init_tracing(json: bool, level: Level) {
    let filter = filter_for(level);
    let _ = tracing_subscriber::registry()
        .with(stderr_layer(json))
        .with(filter)
        .try_init();
}

fn filter_for(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

fn stderr_layer(json: bool) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}
