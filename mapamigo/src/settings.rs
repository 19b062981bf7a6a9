//! Runtime settings loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";

fn default_data_dir() -> PathBuf {
    PathBuf::from(".mapamigo")
}

/// Configuration values for the command-line driver.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MAPAMIGO")]
pub struct Settings {
    /// Directory holding the file-backed store.
    pub data_dir: Option<PathBuf>,
    /// Base URL of the ViaCEP-compatible lookup service.
    pub viacep_base_url: Option<String>,
}

impl Settings {
    /// Return the configured storage directory, falling back to the default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Return the configured lookup base URL, falling back to the default.
    pub fn viacep_base_url(&self) -> &str {
        self.viacep_base_url
            .as_deref()
            .unwrap_or(DEFAULT_VIACEP_BASE_URL)
    }
}
