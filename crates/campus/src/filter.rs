//! Filter engine: a conjunction of optional predicates over a collection.
//!
//! `filter_records` never reorders, never inserts and never fails. A
//! predicate left at its default (`All`, empty query) imposes no constraint,
//! so filtering with `FilterCriteria::default()` returns the collection as is.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::CampusError;
use crate::record::Record;
use crate::text::Folding;

/// A categorical selection: either everything or one exact value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
  #[default]
  All,
  Only(String),
}

impl Selection {
  pub fn only(value: impl Into<String>) -> Self {
    Selection::Only(value.into())
  }

  /// Exact, case-sensitive comparison; a record without the attribute only
  /// passes `All`
  pub fn admits(&self, value: Option<&str>) -> bool {
    match self {
      Selection::All => true,
      Selection::Only(wanted) => value == Some(wanted.as_str()),
    }
  }
}

impl FromStr for Selection {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
      Ok(Selection::All)
    } else {
      Ok(Selection::Only(trimmed.to_string()))
    }
  }
}

impl fmt::Display for Selection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Selection::All => f.write_str("all"),
      Selection::Only(value) => f.write_str(value),
    }
  }
}

/// Range membership against a record's numeric attribute.
///
/// `Below` and `Above` are strict, `Between` is inclusive on both ends:
/// `<30`, `30-50` and `>50` partition the non-negative numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum NumericBucket {
  #[default]
  All,
  Below(f64),
  Between(f64, f64),
  Above(f64),
}

impl NumericBucket {
  pub fn contains(&self, value: Option<f64>) -> bool {
    match (self, value) {
      (NumericBucket::All, _) => true,
      (_, None) => false,
      (NumericBucket::Below(limit), Some(v)) => v < *limit,
      (NumericBucket::Between(low, high), Some(v)) => v >= *low && v <= *high,
      (NumericBucket::Above(limit), Some(v)) => v > *limit,
    }
  }
}

impl FromStr for NumericBucket {
  type Err = CampusError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || CampusError::InvalidBucket(s.to_string());
    let number = |text: &str| text.trim().parse::<f64>().ok().filter(|n| n.is_finite());

    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
      return Ok(NumericBucket::All);
    }

    if let Some(rest) = trimmed.strip_prefix('<') {
      return number(rest).map(NumericBucket::Below).ok_or_else(invalid);
    }

    if let Some(rest) = trimmed.strip_prefix('>') {
      return number(rest).map(NumericBucket::Above).ok_or_else(invalid);
    }

    let (low, high) = trimmed.split_once('-').ok_or_else(invalid)?;
    match (number(low), number(high)) {
      (Some(low), Some(high)) if low <= high => Ok(NumericBucket::Between(low, high)),
      _ => Err(invalid()),
    }
  }
}

impl fmt::Display for NumericBucket {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NumericBucket::All => f.write_str("all"),
      NumericBucket::Below(limit) => write!(f, "<{limit}"),
      NumericBucket::Between(low, high) => write!(f, "{low}-{high}"),
      NumericBucket::Above(limit) => write!(f, ">{limit}"),
    }
  }
}

/// Transient set of predicates built per interaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
  pub text_query: String,
  pub category: Selection,
  pub status: Selection,
  pub bucket: NumericBucket,
  pub folding: Folding,
}

impl FilterCriteria {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_text(mut self, query: impl Into<String>) -> Self {
    self.text_query = query.into();
    self
  }

  pub fn with_category(mut self, category: Selection) -> Self {
    self.category = category;
    self
  }

  pub fn with_status(mut self, status: Selection) -> Self {
    self.status = status;
    self
  }

  pub fn with_bucket(mut self, bucket: NumericBucket) -> Self {
    self.bucket = bucket;
    self
  }

  pub fn with_folding(mut self, folding: Folding) -> Self {
    self.folding = folding;
    self
  }

  /// True when no predicate constrains anything
  pub fn is_unconstrained(&self) -> bool {
    self.folded_query().is_none()
      && self.category == Selection::All
      && self.status == Selection::All
      && self.bucket == NumericBucket::All
  }

  pub fn matches<R: Record>(&self, record: &R) -> bool {
    self.matches_folded(record, self.folded_query().as_deref())
  }

  fn folded_query(&self) -> Option<String> {
    let trimmed = self.text_query.trim();
    (!trimmed.is_empty()).then(|| self.folding.fold(trimmed))
  }

  fn matches_folded<R: Record>(&self, record: &R, needle: Option<&str>) -> bool {
    let text_ok = needle.map_or(true, |needle| {
      record.search_fields().into_iter().any(|field| self.folding.contains_folded(field, needle))
    });

    text_ok
      && self.category.admits(record.category())
      && self.status.admits(record.status())
      && self.bucket.contains(record.numeric())
  }
}

/// Ordered subset of `records` satisfying every active predicate
pub fn filter_records<'a, R: Record>(records: &'a [R], criteria: &FilterCriteria) -> Vec<&'a R> {
  let needle = criteria.folded_query();
  let matched: Vec<&R> =
    records.iter().filter(|record| criteria.matches_folded(*record, needle.as_deref())).collect();

  debug!(
    collection = %R::COLLECTION,
    total = records.len(),
    matched = matched.len(),
    "filtered records"
  );

  matched
}
