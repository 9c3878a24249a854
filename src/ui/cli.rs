// Command-line interface definitions and parsing for urlpulse

use crate::config::CliConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File with one URL per line (reads standard input when omitted)
    pub input: Option<String>,

    // Request
    /// HTTP request method; HEAD is the fastest (default: HEAD)
    #[arg(short = 'X', long, value_name = "METHOD", help_heading = "Request")]
    pub method: Option<String>,

    /// User-Agent header (default: Mozilla)
    #[arg(long, value_name = "AGENT", help_heading = "Request")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds, covering connect, headers and body (default: 5)
    #[arg(long, value_name = "SECONDS", help_heading = "Request")]
    pub timeout: Option<u64>,

    // Pacing
    /// Maximum concurrent probes (default: 50)
    #[arg(
        short = 't',
        long,
        value_name = "COUNT",
        visible_alias = "threads",
        help_heading = "Pacing"
    )]
    pub concurrency: Option<usize>,

    /// Delay in ms after each probe before its slot is freed (default: 0)
    #[arg(long, value_name = "MS", help_heading = "Pacing")]
    pub delay: Option<u64>,

    // Output & Verbosity
    /// Enable verbose logging on stderr
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        method: cli.method.clone(),
        user_agent: cli.user_agent.clone(),
        concurrency: cli.concurrency,
        delay: cli.delay,
        timeout: cli.timeout,
        verbose: cli.verbose,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
