//! Text normalisation shared by the filter engine and the responder.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// How free text is folded before substring comparison.
///
/// `Diacritics` strips accents after lowercasing so that "cafeteria" finds
/// "Cafetería"; `Lowercase` only lowercases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folding {
  Lowercase,
  #[default]
  Diacritics,
}

impl Folding {
  pub fn fold(self, text: &str) -> String {
    match self {
      Folding::Lowercase => text.to_lowercase(),
      Folding::Diacritics => text.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)).collect(),
    }
  }

  /// Substring test where `needle` is already folded
  pub fn contains_folded(self, haystack: &str, needle: &str) -> bool {
    self.fold(haystack).contains(needle)
  }
}
