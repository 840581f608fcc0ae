use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use feedhub_core::HubConfig;
use feedhub_io::{
    default_preferences_path, HttpFeedbackApi, MemoryPreferenceStore, TomlPreferenceStore,
};
use feedhub_platform::{PreferenceStore, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const CONFIG_ENV: &str = "FEEDHUB_CONFIG";
const API_URL_ENV: &str = "FEEDHUB_API_URL";
const DEFAULT_CONFIG_FILE: &str = "feedhub.toml";

fn main() {
    // Init logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Feedhub starting");
    if let Err(e) = run_app() {
        eprintln!("Feedhub error: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let mut config = load_config(env::var_os(CONFIG_ENV).map(PathBuf::from).as_deref())?;
    if let Ok(endpoint) = env::var(API_URL_ENV) {
        info!("{API_URL_ENV} overrides endpoint: {endpoint}");
        config.api.endpoint = endpoint;
    }
    info!("feedback endpoint: {}", config.api.endpoint);

    let api = Arc::new(HttpFeedbackApi::new(config.api.endpoint.clone(), config.api.timeout())?);
    let store = open_preferences(config.shell.preferences_path.as_deref());
    feedhub_ui::run_ui(config, api, store).map_err(|e| e.to_string())?;
    Ok(())
}

/// An explicit path must exist; the default file is optional.
fn load_config(explicit: Option<&Path>) -> Result<HubConfig> {
    match explicit {
        Some(path) => {
            info!("config: {}", path.display());
            Ok(HubConfig::load(path)?)
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            info!("config: {DEFAULT_CONFIG_FILE}");
            Ok(HubConfig::load(Path::new(DEFAULT_CONFIG_FILE))?)
        }
        None => {
            info!("no config file, using defaults");
            Ok(HubConfig::default())
        }
    }
}

/// Falls back to an in-memory store so a broken preferences file never
/// blocks startup.
fn open_preferences(configured: Option<&Path>) -> Box<dyn PreferenceStore> {
    let path = match configured {
        Some(path) => path.to_path_buf(),
        None => match default_preferences_path() {
            Ok(path) => path,
            Err(err) => {
                warn!("{err}; theme choice will not persist");
                return Box::new(MemoryPreferenceStore::default());
            }
        },
    };
    match TomlPreferenceStore::open(path) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("{err}; theme choice will not persist");
            Box::new(MemoryPreferenceStore::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedhub.toml");
        std::fs::write(&path, "[celebration]\nbase_count = 10\n").unwrap();
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.celebration.confetti_count(2), 60);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn unreadable_preferences_fall_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let mut store = open_preferences(Some(path.as_path()));
        store.save("fh_theme", "dark").unwrap();
        assert_eq!(store.load("fh_theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not = [valid");
    }
}
