use std::env;
use std::path::PathBuf;

use swipe_core::{SwipeConfig, CONFIG_ENV, DEFAULT_CONFIG_FILE};
use swipe_desktop::run_app;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(filter)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Sensory Swipe starting");
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Sensory Swipe config error: {e}");
            std::process::exit(2);
        }
    };
    if let Err(e) = run_app(&config) {
        eprintln!("Sensory Swipe error: {e}");
        std::process::exit(1);
    }
}

/// `$SENSORY_SWIPE_CONFIG`, then `./sensory-swipe.toml`, then built-in defaults.
fn load_config() -> Result<SwipeConfig, swipe_core::ConfigError> {
    let path = match env::var_os(CONFIG_ENV) {
        Some(path) => PathBuf::from(path),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !local.is_file() {
                info!("no config file found, using defaults");
                return Ok(SwipeConfig::default());
            }
            local
        }
    };
    info!("loading config from {}", path.display());
    SwipeConfig::load(&path)
}
