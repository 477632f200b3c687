use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TELEMETRY: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVES: &str = "info,expense_tracker=debug";

/// Installs the JSON subscriber once; later calls are no-ops.
pub fn init() {
    TELEMETRY.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .init();
    });
}
