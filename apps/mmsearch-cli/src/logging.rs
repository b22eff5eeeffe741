use tracing_subscriber::{fmt, EnvFilter};

/// Stderr subscriber. `APP_LOG` takes precedence over the configured level so
/// a single run can be made verbose without touching config files.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env("APP_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already set");
    }
}
