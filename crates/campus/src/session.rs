//! Async chat session: a conversation, a responder and a cancellable
//! "assistant is typing" delay between the user message and the reply.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::conversation::{Conversation, Message};
use crate::responder::Responder;

fn default_min_ms() -> u64 {
  1000
}

fn default_jitter_ms() -> u64 {
  1000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingDelay {
  #[serde(default = "default_min_ms")]
  pub min_ms: u64,
  #[serde(default = "default_jitter_ms")]
  pub jitter_ms: u64,
}

impl Default for TypingDelay {
  fn default() -> Self {
    Self { min_ms: default_min_ms(), jitter_ms: default_jitter_ms() }
  }
}

impl TypingDelay {
  pub fn none() -> Self {
    Self { min_ms: 0, jitter_ms: 0 }
  }

  /// `min_ms` plus a uniform draw from `0..=jitter_ms`
  pub fn sample(&self) -> Duration {
    let jitter = if self.jitter_ms == 0 { 0 } else { rand::rng().random_range(0..=self.jitter_ms) };
    Duration::from_millis(self.min_ms.saturating_add(jitter))
  }
}

pub struct ChatSession {
  conversation: Conversation,
  responder: Responder,
  delay: TypingDelay,
  cancel: CancellationToken,
}

impl ChatSession {
  pub fn new(user_name: impl Into<String>, responder: Responder, delay: TypingDelay) -> Self {
    Self { conversation: Conversation::new(user_name), responder, delay, cancel: CancellationToken::new() }
  }

  pub fn conversation(&self) -> &Conversation {
    &self.conversation
  }

  /// Token that ends the session; any pending reply is discarded
  pub fn cancel_handle(&self) -> CancellationToken {
    self.cancel.clone()
  }

  pub fn is_cancelled(&self) -> bool {
    self.cancel.is_cancelled()
  }

  /// Append `text` as a user message, wait the typing delay, then append and
  /// return the reply. Returns `None` for blank input or when the session is
  /// cancelled before the delay elapses.
  pub async fn send(&mut self, text: &str) -> Option<&Message> {
    if self.cancel.is_cancelled() {
      return None;
    }
    let utterance = self.conversation.push_user(text)?.text.clone();

    let wait = self.delay.sample();
    debug!(delay_ms = wait.as_millis() as u64, "assistant typing");

    tokio::select! {
      biased;
      _ = self.cancel.cancelled() => {
        debug!("session cancelled, reply discarded");
        return None;
      }
      _ = tokio::time::sleep(wait) => {}
    }

    let response = self.responder.respond_to(&utterance).clone();
    Some(self.conversation.push_assistant(&response))
  }

  /// Text to send for a line of user input. A bare number `n` picks the
  /// n-th suggestion of the latest assistant message when there is one;
  /// anything else, including an out-of-range number, is sent as typed.
  pub fn resolve_input(&self, input: &str) -> String {
    let input = input.trim();
    input
      .parse::<usize>()
      .ok()
      .and_then(|choice| choice.checked_sub(1))
      .and_then(|index| self.conversation.suggestion(index))
      .unwrap_or(input)
      .to_string()
  }

  /// Send the `index`-th suggestion of the latest assistant message
  pub async fn send_suggestion(&mut self, index: usize) -> Option<&Message> {
    let text = self.conversation.suggestion(index)?.to_string();
    self.send(&text).await
  }
}

impl Drop for ChatSession {
  fn drop(&mut self) {
    self.cancel.cancel();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::conversation::Sender;
  use tokio::time::Instant;

  fn session(delay: TypingDelay) -> ChatSession {
    ChatSession::new("Ana", Responder::default(), delay)
  }

  #[test]
  fn test_delay_sample_bounds() {
    let delay = TypingDelay { min_ms: 1000, jitter_ms: 1000 };
    for _ in 0..100 {
      let sample = delay.sample();
      assert!(sample >= Duration::from_millis(1000) && sample <= Duration::from_millis(2000));
    }
    assert_eq!(TypingDelay::none().sample(), Duration::ZERO);
  }

  #[tokio::test(start_paused = true)]
  async fn test_reply_after_delay() {
    let mut session = session(TypingDelay { min_ms: 1000, jitter_ms: 0 });
    let start = Instant::now();

    let reply = session.send("horario de la biblioteca").await.unwrap();
    assert_eq!(reply.sender, Sender::Assistant);
    assert!(reply.text.contains("Carlos Gaviria Díaz"));
    assert!(start.elapsed() >= Duration::from_millis(1000));
    assert_eq!(session.conversation().messages().len(), 3);
  }

  #[tokio::test(start_paused = true)]
  async fn test_cancel_discards_pending_reply() {
    let mut session = session(TypingDelay::default());
    let handle = session.cancel_handle();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(500)).await;
      handle.cancel();
    });

    assert!(session.send("¿dónde está el bloque 38?").await.is_none());
    let messages = session.conversation().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender, Sender::User);

    assert!(session.send("hola").await.is_none());
    assert_eq!(session.conversation().messages().len(), 2);
  }

  #[tokio::test(start_paused = true)]
  async fn test_blank_input_gets_no_reply() {
    let mut session = session(TypingDelay::none());
    assert!(session.send("  ").await.is_none());
    assert_eq!(session.conversation().messages().len(), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn test_send_suggestion() {
    let mut session = session(TypingDelay::none());
    let reply = session.send_suggestion(3).await.unwrap();
    assert!(reply.text.starts_with("Actualmente hay 23 aulas"));
    assert_eq!(session.conversation().messages()[1].text, "Aulas disponibles");
    assert!(session.send_suggestion(9).await.is_none());
  }

  #[tokio::test(start_paused = true)]
  async fn test_numbers_without_a_suggestion_are_sent_as_typed() {
    let mut session = session(TypingDelay::none());
    assert_eq!(session.resolve_input("2"), "Horario de biblioteca");
    assert_eq!(session.resolve_input("0"), "0");
    assert_eq!(session.resolve_input("38"), "38");

    let text = session.resolve_input("2026");
    let reply = session.send(&text).await.unwrap();
    assert!(reply.text.starts_with("Entiendo tu consulta"));
    assert_eq!(session.conversation().messages()[1].text, "2026");
  }

  #[test]
  fn test_drop_cancels() {
    let session = session(TypingDelay::none());
    let handle = session.cancel_handle();
    assert!(!handle.is_cancelled());
    drop(session);
    assert!(handle.is_cancelled());
  }
}
