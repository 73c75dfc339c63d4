use tracing::{debug, error, info, warn};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize logging for the binary. Honours `RUST_LOG`, defaulting to
/// info-level output for this crate only.
pub fn init_logger() -> anyhow::Result<()> {
    let timer = ChronoUtc::rfc_3339();

    let format_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_timer(timer)
        .compact();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("crosswatch=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(format_layer)
        .init();

    Ok(())
}

/// Contextual logger carried by the service structs.
#[derive(Debug)]
pub struct Logger {
    context: String,
}

impl Logger {
    pub fn new(context: &str) -> Self {
        Self {
            context: context.to_string(),
        }
    }

    pub fn info(&self, message: &str) {
        info!("{}: {}", self.context, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("{}: {}", self.context, message);
    }

    pub fn warn_with_error(&self, message: &str, error: &dyn std::error::Error) {
        warn!("{}: {}: {}", self.context, message, error);
    }

    pub fn error(&self, message: &str) {
        error!("{}: {}", self.context, message);
    }

    pub fn debug(&self, message: &str) {
        debug!("{}: {}", self.context, message);
    }
}

/// Performance timing helper for fetch and batch logging.
pub struct Timer {
    start: std::time::Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        Self {
            start: std::time::Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn log_elapsed(&self) {
        info!("{} completed in {:.1}ms", self.name, self.elapsed_ms());
    }
}
