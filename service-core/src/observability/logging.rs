use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the JSON subscriber used by every function.
///
/// `RUST_LOG` wins over `log_level` when set. Timestamps are left out because
/// the Lambda log pipeline stamps ingestion time on every line.
pub fn init_tracing(service_name: &str, log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let initialized = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .without_time()
                .json()
                .flatten_event(true),
        )
        .try_init();

    match initialized {
        Ok(()) => tracing::info!(service = service_name, "Tracing initialized"),
        Err(e) => eprintln!(
            "Tracing for service '{}' was already initialized: {}",
            service_name, e
        ),
    }
}
