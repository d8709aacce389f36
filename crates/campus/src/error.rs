use thiserror::Error;

/// Errors raised at the edges of the assistant: loading data, rules and
/// config, and mutating caller-owned state. The filter engine and the
/// responder themselves never fail.
#[derive(Debug, Error)]
pub enum CampusError {
  #[error("Duplicate id '{id}' in {collection}")]
  DuplicateId { collection: String, id: String },

  #[error("No record with id '{id}' in {collection}")]
  RecordNotFound { collection: String, id: String },

  #[error("Invalid numeric bucket '{0}' (expected all, <N, A-B or >N)")]
  InvalidBucket(String),

  #[error("Invalid rule table: {0}")]
  InvalidRuleTable(String),

  #[error("Unknown collection '{0}'")]
  UnknownCollection(String),

  #[error(transparent)]
  Login(#[from] LoginError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("YAML error: {0}")]
  Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
  #[error("Email must not be empty")]
  EmptyEmail,

  #[error("Password must not be empty")]
  EmptyPassword,
}

pub type Result<T> = std::result::Result<T, CampusError>;
