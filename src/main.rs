use std::sync::Arc;

use sessiontron::config::{load_config, print_schema};
use sessiontron::startup::run;
use sessiontron::utils::logger::init_logging;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

#[tokio::main]
async fn main() {
    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("--schema") {
        if let Err(e) = print_schema() {
            eprintln!("Error printing schema: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Configuration problems are fatal: nothing is served with a bad config.
    let config_path = arg.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) if e.is_config_error() => {
            eprintln!("Invalid configuration in '{}': {}", config_path, e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    info!("Loaded configuration from '{}'", config_path);

    if let Err(e) = run(Arc::new(config)).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
