//! Append-only chat transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::responder::Response;

pub const STARTER_SUGGESTIONS: [&str; 4] =
  ["¿Dónde está el Bloque 38?", "Horario de biblioteca", "Próximos eventos", "Aulas disponibles"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
  User,
  Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
  pub id: Uuid,
  pub text: String,
  pub sender: Sender,
  pub timestamp: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub suggestions: Vec<String>,
}

impl Message {
  fn new(text: String, sender: Sender, suggestions: Vec<String>) -> Self {
    Self { id: Uuid::new_v4(), text, sender, timestamp: Utc::now(), suggestions }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
  user_name: String,
  messages: Vec<Message>,
}

impl Conversation {
  /// Start a conversation with the assistant's greeting
  pub fn new(user_name: impl Into<String>) -> Self {
    let user_name = user_name.into();
    let greeting = Message::new(
      format!("¡Hola {user_name}! Soy el Asistente Virtual de EAFIT. ¿En qué puedo ayudarte hoy?"),
      Sender::Assistant,
      STARTER_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    );

    Self { user_name, messages: vec![greeting] }
  }

  pub fn user_name(&self) -> &str {
    &self.user_name
  }

  pub fn messages(&self) -> &[Message] {
    &self.messages
  }

  /// Blank input is ignored
  pub fn push_user(&mut self, text: &str) -> Option<&Message> {
    let text = text.trim();
    if text.is_empty() {
      return None;
    }
    self.messages.push(Message::new(text.to_string(), Sender::User, Vec::new()));
    self.messages.last()
  }

  pub fn push_assistant(&mut self, response: &Response) -> &Message {
    let index = self.messages.len();
    self.messages.push(Message::new(response.text.clone(), Sender::Assistant, response.suggestions.clone()));
    &self.messages[index]
  }

  pub fn last_assistant(&self) -> Option<&Message> {
    self.messages.iter().rev().find(|message| message.sender == Sender::Assistant)
  }

  /// Text of the `index`-th suggestion offered by the latest assistant message
  pub fn suggestion(&self, index: usize) -> Option<&str> {
    self.last_assistant()?.suggestions.get(index).map(String::as_str)
  }
}
