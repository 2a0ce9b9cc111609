use std::sync::Once;

static TRACING_INIT: Once = Once::new();

pub const DEFAULT_LOG_DIRECTIVE: &str = "money_magnet=info";

/// Initializes the global tracing subscriber. `RUST_LOG` wins over `directive`.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(directive.unwrap_or(DEFAULT_LOG_DIRECTIVE))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
        });

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
