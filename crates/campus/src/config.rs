//! Configuration management for the campus assistant
//!
//! Locates and loads the JSON config, and builds the record store and
//! responder it points at.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::responder::{Responder, RuleTable};
use crate::session::TypingDelay;
use crate::store::RecordStore;
use crate::text::Folding;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "CAMPUS_CONFIG";

const LOCAL_CONFIG_PATHS: [&str; 2] = [".campus.json", "campus.json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampusConfig {
  /// YAML record store replacing the built-in sample data
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data_path: Option<PathBuf>,
  /// YAML rule table replacing the built-in rules
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rules_path: Option<PathBuf>,
  #[serde(default)]
  pub typing_delay: TypingDelay,
  #[serde(default)]
  pub folding: Folding,
}

impl CampusConfig {
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(path)?;
    let config: CampusConfig = serde_json::from_str(&content)?;
    Ok(config)
  }

  /// Load the explicit path if given, otherwise the first config found
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    match explicit.map(Path::to_path_buf).or_else(Self::discover) {
      Some(path) => Self::load_from_file(path),
      None => {
        debug!("no config file found, using defaults");
        Ok(Self::default())
      }
    }
  }

  fn discover() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
      if !path.is_empty() {
        return Some(PathBuf::from(path));
      }
    }

    LOCAL_CONFIG_PATHS
      .iter()
      .map(PathBuf::from)
      .chain(dirs::config_dir().map(|dir| dir.join("campus").join("config.json")))
      .find(|path| path.exists())
  }

  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }

  pub fn record_store(&self) -> Result<RecordStore> {
    match &self.data_path {
      Some(path) => RecordStore::load_from_file(path),
      None => RecordStore::builtin(),
    }
  }

  pub fn responder(&self) -> Result<Responder> {
    let table = match &self.rules_path {
      Some(path) => RuleTable::load_from_file(path)?,
      None => RuleTable::default(),
    };
    Responder::new(table, self.folding)
  }
}
