use crate::config::Config;
use crate::pipeline::RunSummary;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        // Result lines on stdout are the only output by default
        builder.filter_level(log::LevelFilter::Off);
    }

    let _ = builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized (verbose={verbose})");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: method={}, user_agent={:?}, concurrency={}",
        config.method(),
        config.user_agent(),
        config.concurrency()
    );
    info!(
        "Pacing: timeout={}s, delay={}ms, max_body_bytes={}",
        config.timeout_duration().as_secs(),
        config.delay_duration().as_millis(),
        config.max_body_bytes()
    );
}

/// Log the counters of a finished run
pub fn log_run_summary(summary: &RunSummary, duration_ms: u128) {
    info!(
        "Run complete: {} lines read, {} skipped, {} probed, {} reported, {} filtered, {} dropped ({}ms)",
        summary.lines_read,
        summary.skipped,
        summary.dispatched,
        summary.reported,
        summary.filtered,
        summary.dropped,
        duration_ms
    );
    if summary.read_error.is_some() {
        warn!("Input was not read to the end");
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
