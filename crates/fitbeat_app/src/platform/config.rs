//! Deployment configuration for fitbeat_app.
//!
//! Read from `./fitbeat.ron` in the current working directory; a missing or
//! unparsable file falls back to defaults so the app always starts.

use std::fs;
use std::path::Path;
use std::time::Duration;

use engine_logging::engine_warn;
use fitbeat_core::SessionSettings;
use fitbeat_engine::ClientSettings;
use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "fitbeat.ron";
const BASE_URL_ENV: &str = "FITBEAT_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// Address the local web UI binds to.
    pub listen_addr: String,
    /// Prefix of the remote recommendation service.
    pub api_base_url: String,
    /// Play the simulated progress transcript before polling.
    pub simulate_progress: bool,
    pub transcript_step_ms: u64,
    pub poll_delay_ms: u64,
    pub max_poll_retries: u32,
    /// Also write logs to `./fitbeat.log`.
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5870".to_string(),
            api_base_url: ClientSettings::default().base_url,
            simulate_progress: true,
            transcript_step_ms: 800,
            poll_delay_ms: 4000,
            max_poll_retries: 150,
            log_to_file: false,
        }
    }
}

impl AppConfig {
    /// Loads the config file, then applies the `FITBEAT_API_BASE_URL`
    /// environment override.
    pub(crate) fn load() -> Self {
        let mut config = Self::load_from(Path::new(CONFIG_FILENAME));
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.api_base_url = base_url;
        }
        config
    }

    fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                engine_warn!("Failed to read config from {:?}: {}", path, err);
                return Self::default();
            }
        };

        match ron::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                engine_warn!("Failed to parse config from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub(crate) fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            simulate_progress: self.simulate_progress,
            step_delay: Duration::from_millis(self.transcript_step_ms),
            poll_delay: Duration::from_millis(self.poll_delay_ms),
            max_retries: self.max_poll_retries,
        }
    }

    pub(crate) fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.clone(),
            ..ClientSettings::default()
        }
    }
}
