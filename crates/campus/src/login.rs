//! Mock login: fields are only checked for non-emptiness.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LoginError, Result};

const INSTITUTIONAL_DOMAIN: &str = "eafit.edu.co";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Guest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id: String,
  pub name: String,
  pub email: String,
  pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
  pub email: String,
  pub password: String,
}

impl Credentials {
  pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
    Self { email: email.into(), password: password.into() }
  }

  pub fn validate(&self) -> std::result::Result<(), LoginError> {
    if self.email.trim().is_empty() {
      return Err(LoginError::EmptyEmail);
    }
    if self.password.trim().is_empty() {
      return Err(LoginError::EmptyPassword);
    }
    Ok(())
  }
}

fn short_id() -> String {
  Uuid::new_v4().simple().to_string()[..9].to_string()
}

pub fn login(credentials: &Credentials) -> Result<User> {
  credentials.validate()?;

  let email = credentials.email.trim();
  let name = match email.split('@').next() {
    Some(local) if !local.is_empty() => local,
    _ => "Usuario",
  };
  let role = if email.contains(INSTITUTIONAL_DOMAIN) { Role::Student } else { Role::Guest };

  Ok(User { id: short_id(), name: name.to_string(), email: email.to_string(), role })
}

pub fn guest_login() -> User {
  User {
    id: format!("guest-{}", short_id()),
    name: "Invitado".to_string(),
    email: format!("invitado@{INSTITUTIONAL_DOMAIN}"),
    role: Role::Guest,
  }
}
