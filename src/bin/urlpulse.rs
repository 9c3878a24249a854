use clap::Parser;
use urlpulse::config::{CliConfig, Config};
use urlpulse::input::open_input;
use urlpulse::logging;
use urlpulse::pipeline::Dispatcher;
use urlpulse::probe::{HttpProber, ProbeSettings, build_client};
use urlpulse::report::LineReporter;
use urlpulse::ui::{Cli, cli_to_config};

use std::path::Path;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_urlpulse_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main probing logic extracted from main() for testing
pub async fn run_urlpulse_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    // Load and merge configuration
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.is_verbose());
    logging::log_config_info(&config);

    // Opening the input is the last step that may abort the run
    let source = open_input(cli.input.as_deref().map(Path::new)).await?;

    let client = build_client(&config)?;
    let prober = HttpProber::new(client, ProbeSettings::from_config(&config));
    let dispatcher = Dispatcher::from_config(prober, LineReporter::stdout(), &config);

    let start = Instant::now();
    let summary = dispatcher.run(source).await;
    logging::log_run_summary(&summary, start.elapsed().as_millis());

    // Read errors are reported but do not change the exit code
    if let Some(ref err) = summary.read_error {
        logging::log_error("Could not read input", Some(err));
        eprintln!("error: {err}");
    }

    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()?
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}
