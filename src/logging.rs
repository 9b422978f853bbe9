//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `log_level`. ANSI colours are dropped inside Lambda,
/// where output ends up in `CloudWatch`.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let in_lambda = std::env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some();
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!in_lambda)
        .with_writer(std::io::stderr)
        .init();
}
