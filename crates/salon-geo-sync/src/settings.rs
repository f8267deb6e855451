//! Runtime configuration for the `populate-geo` binary.
//!
//! Layered with the [`config`] crate: an optional TOML file, then `SALON_*`
//! environment variables. CLI flags are applied on top by the binary.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use salon_core::geo::NewCountry;
use salon_ibge::{DEFAULT_BASE_URL, IbgeConfig};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SyncSettings {
  #[serde(default = "default_store_path")]
  pub store_path:           PathBuf,
  #[serde(default = "default_base_url")]
  pub ibge_base_url:        String,
  #[serde(default = "default_timeout_secs")]
  pub request_timeout_secs: u64,
  #[serde(default = "default_country_name")]
  pub country_name:         String,
  #[serde(default = "default_country_code")]
  pub country_code:         String,
}

fn default_store_path() -> PathBuf { PathBuf::from("salon.db") }
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_country_name() -> String { NewCountry::default().name }
fn default_country_code() -> String { NewCountry::default().code }

impl SyncSettings {
  /// Read `path` (if it exists) and `SALON_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::build(Config::builder().add_source(File::from(path).required(false)))
  }

  fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
    let settings: Self = builder
      .add_source(Environment::with_prefix("SALON"))
      .build()?
      .try_deserialize()?;
    settings.validate()?;
    Ok(settings)
  }

  /// The country columns are `name` (at most 100 characters) and a
  /// three-letter `code`; reject anything the store would refuse.
  fn validate(&self) -> Result<(), ConfigError> {
    let name_len = self.country_name.chars().count();
    if name_len == 0 || name_len > 100 {
      return Err(ConfigError::Message(format!(
        "country_name must be 1 to 100 characters, got {:?}",
        self.country_name
      )));
    }
    if self.country_code.len() != 3
      || !self.country_code.chars().all(|c| c.is_ascii_alphabetic())
    {
      return Err(ConfigError::Message(format!(
        "country_code must be three letters, got {:?}",
        self.country_code
      )));
    }
    Ok(())
  }

  /// The store path with a leading `~` expanded to the home directory.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn ibge(&self) -> IbgeConfig {
    IbgeConfig {
      base_url: self.ibge_base_url.clone(),
      timeout:  Duration::from_secs(self.request_timeout_secs),
    }
  }

  pub fn country(&self) -> NewCountry {
    NewCountry::new(self.country_name.clone(), self.country_code.clone())
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
