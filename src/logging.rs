use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes logging with console output and a daily-rolling JSON log file.
///
/// The console level defaults to `info` (`debug` when `verbose` is set) and
/// can always be overridden through `RUST_LOG`.
pub fn init_logging(verbose: bool) {
    let _ = fs::create_dir_all("logs");

    // Non-blocking file appender for daily log rotation
    let file_appender = tracing_appender::rolling::daily("logs", "customer-merge.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let default_level = if verbose { "debug" } else { "info" };
    let directive = format!("customer_merge={default_level}")
        .parse()
        .expect("static directive parses");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(directive))
        .with(file_layer)
        .with(console_layer)
        .init();

    // Keep the guard alive for the process lifetime so logs flush on exit
    std::mem::forget(guard);
}
