//! Bentley - terminal logging for the campus assistant
//!
//! ## Features
//!
//! - Level-prefixed output (info, warn, error, debug, success)
//! - Multi-line message support with consistent formatting
//! - Timestamped event lines
//! - Banner announcements
//! - All output to stderr so stdout stays clean for listings and JSON
//!
//! Diagnostics from library code go through `tracing`; `init` wires the
//! subscriber so both streams land on stderr.

use chrono::Local;
use colored::*;
use tracing_subscriber::EnvFilter;

/// Environment variable read by [`init`] for a `tracing` filter directive
pub const LOG_ENV: &str = "CAMPUS_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Verbose,
  Debug,
  Info,
  Warn,
  Error,
  Success,
}

impl Level {
  fn tag(self) -> &'static str {
    match self {
      Level::Verbose => "verb",
      Level::Debug => "debug",
      Level::Info => "info",
      Level::Warn => "warn",
      Level::Error => "error",
      Level::Success => "sccs",
    }
  }

  fn color(self) -> Color {
    match self {
      Level::Verbose => Color::Cyan,
      Level::Debug => Color::Magenta,
      Level::Info => Color::Blue,
      Level::Warn => Color::Yellow,
      Level::Error => Color::Red,
      Level::Success => Color::Green,
    }
  }
}

/// Install the `tracing` subscriber.
///
/// `CAMPUS_LOG` wins when set; otherwise the verbosity count picks the
/// default directive. Calling this more than once is harmless.
pub fn init(verbosity: u8) {
  let fallback = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

/// Core logging function that handles the actual output
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

fn format_prefix(level: Level) -> String {
  let tag = level.tag();
  let pad = 7usize.saturating_sub(tag.len() + 2);
  format!("[{}]{:<pad$}", tag.color(level.color()).bold(), "")
}

/// Render every line of `message` behind the level prefix
pub fn render(level: Level, message: &str) -> Vec<String> {
  let prefix = format_prefix(level);
  message.lines().map(|line| format!("{prefix} {line}")).collect()
}

pub fn emit(level: Level, message: &str) {
  for line in render(level, message) {
    log(&line);
  }
}

pub fn verbose(message: &str) {
  emit(Level::Verbose, message);
}

/// Info level logging - general information
pub fn info(message: &str) {
  emit(Level::Info, message);
}

/// Warning level logging - something needs attention
pub fn warn(message: &str) {
  emit(Level::Warn, message);
}

/// Error level logging - something went wrong
pub fn error(message: &str) {
  emit(Level::Error, message);
}

pub fn debug(message: &str) {
  emit(Level::Debug, message);
}

/// Success level logging - something completed successfully
pub fn success(message: &str) {
  emit(Level::Success, message);
}

/// Timestamped event line
pub fn event(level: Level, message: &str) {
  let timestamp = Local::now().format("%H:%M:%S").to_string();
  let prefix = format!("[{}] [{}]", "event".color(level.color()).bold(), timestamp.cyan());
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// Create a banner line of the specified length and character
pub fn banner_line(length: usize, fill: char) -> String {
  fill.to_string().repeat(length)
}

/// Announcement framed by banner lines
pub fn announce(message: &str) {
  let width = message.lines().map(|l| l.chars().count()).max().unwrap_or(0).clamp(20, 60);
  let banner = banner_line(width, '-');

  log(&banner.blue().bold().to_string());
  log(&message.blue().bold().to_string());
  log(&banner.blue().bold().to_string());
}

/// Macros for coverage-excluded logging - these expand with LCOV_EXCL_LINE at call sites
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => {
    $crate::info(&format!($($arg)*)); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! warn {
  ($($arg:tt)*) => {
    $crate::warn(&format!($($arg)*)); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => {
    $crate::error(&format!($($arg)*)); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => {
    $crate::debug(&format!($($arg)*)); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => {
    $crate::success(&format!($($arg)*)); // LCOV_EXCL_LINE
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_prefixes_every_line() {
    colored::control::set_override(false);
    let lines = render(Level::Info, "first\nsecond");
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[info]"));
    assert!(lines[0].ends_with("first"));
    assert!(lines[1].ends_with("second"));
  }

  #[test]
  fn test_render_empty_message() {
    assert!(render(Level::Warn, "").is_empty());
  }

  #[test]
  fn test_prefix_width_is_stable() {
    colored::control::set_override(false);
    let info = render(Level::Info, "x").remove(0);
    let sccs = render(Level::Success, "x").remove(0);
    assert_eq!(info.len(), sccs.len());
  }

  #[test]
  fn test_banner_line() {
    assert_eq!(banner_line(4, '='), "====");
    assert_eq!(banner_line(0, '-'), "");
  }
}
