use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging with the specified level and format
///
/// # Arguments
/// * `level` - Log level (trace, debug, info, warn, error)
/// * `json_format` - If true, output logs in JSON format
/// * `strip_ansi` - If true, disable ANSI color codes in logs
///
/// Logs always go to stderr; stdout is reserved for the diagram text.
pub fn init(level: &str, json_format: bool, strip_ansi: bool) -> Result<()> {
    // Create filter from level
    let filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!(
            "Invalid log level '{}': {}. Falling back to 'info'",
            level, e
        );
        EnvFilter::new("info")
    });

    let registry = tracing_subscriber::registry();

    if json_format {
        let fmt_layer = fmt::layer().json().with_writer(std::io::stderr);
        registry.with(filter).with(fmt_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(!strip_ansi)
            .with_writer(std::io::stderr);

        registry.with(filter).with(fmt_layer).init();
    }

    Ok(())
}
