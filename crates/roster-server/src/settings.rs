//! Server configuration, read from `config.toml` and `ROSTER_*` variables.

use std::path::{Path, PathBuf};

use roster_enrich::Endpoints;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  pub age_api_url:         String,
  pub gender_api_url:      String,
  pub nationality_api_url: String,
  pub log_level:           String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "0.0.0.0".to_string(),
      port:                8080,
      store_path:          PathBuf::from("roster.db"),
      age_api_url:         "https://api.agify.io".to_string(),
      gender_api_url:      "https://api.genderize.io".to_string(),
      nationality_api_url: "https://api.nationalize.io".to_string(),
      log_level:           "info".to_string(),
    }
  }
}

impl ServerConfig {
  /// Layer `file` (optional) and the environment over the defaults.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("ROSTER"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn endpoints(&self) -> Endpoints {
    Endpoints {
      age:         self.age_api_url.clone(),
      gender:      self.gender_api_url.clone(),
      nationality: self.nationality_api_url.clone(),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
