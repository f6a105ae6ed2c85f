use provider_match::config::{LoggingSettings, Settings};
use provider_match::services::{load_scenario, run_scenario};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings.logging);

    let Some(input) = std::env::args().nth(1).or_else(|| settings.batch.input.clone()) else {
        error!("No scenario file given (pass a path or set batch.input)");
        return ExitCode::from(2);
    };

    info!("Matching providers for scenario {}", input);

    let scenario = match load_scenario(&input) {
        Ok(scenario) => scenario,
        Err(e) => {
            error!("Failed to load scenario: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = run_scenario(&scenario);

    let encoded = if settings.batch.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };

    match encoded {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to encode report: {}", e);
            ExitCode::FAILURE
        }
    }
}
