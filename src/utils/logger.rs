use crate::config::toml_config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match (verbose, level) {
        (true, _) => EnvFilter::new("small_order=debug,info"),
        (false, Some(level)) => EnvFilter::new(format!("small_order={}", level)),
        (false, None) => EnvFilter::new("small_order=info"),
    })
}

pub fn init_cli_logger(verbose: bool, logging: Option<&LoggingConfig>) {
    let level = logging.and_then(|l| l.level.as_deref());
    let filter = default_filter(verbose, level);

    if logging.map(LoggingConfig::json_enabled).unwrap_or(false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}
