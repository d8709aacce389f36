use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CampusError, Result};
use crate::record::*;

const BUILTIN_DATA: &str = include_str!("../data/campus.yaml");

/// Names of the collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
  Classrooms,
  Events,
  Restaurants,
  Directory,
  Groups,
  Map,
  Calendar,
  Sources,
}

impl Collection {
  pub fn as_str(self) -> &'static str {
    match self {
      Collection::Classrooms => "classrooms",
      Collection::Events => "events",
      Collection::Restaurants => "restaurants",
      Collection::Directory => "directory",
      Collection::Groups => "groups",
      Collection::Map => "map",
      Collection::Calendar => "calendar",
      Collection::Sources => "sources",
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Collection {
  type Err = CampusError;

  fn from_str(s: &str) -> Result<Self> {
    <Collection as ValueEnum>::from_str(s, true).map_err(|_| CampusError::UnknownCollection(s.to_string()))
  }
}

/// Static record collections, loaded once and never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStore {
  #[serde(default)]
  pub classrooms: Vec<Classroom>,
  #[serde(default)]
  pub events: Vec<Event>,
  #[serde(default)]
  pub restaurants: Vec<Restaurant>,
  #[serde(default)]
  pub directory: Vec<StaffMember>,
  #[serde(default)]
  pub groups: Vec<StudentGroup>,
  #[serde(default)]
  pub map: Vec<MapLocation>,
  #[serde(default)]
  pub calendar: Vec<CalendarEntry>,
  #[serde(default)]
  pub sources: Vec<KnowledgeSource>,
}

impl RecordStore {
  /// The sample data that ships with the assistant
  pub fn builtin() -> Result<Self> {
    Self::from_yaml(BUILTIN_DATA)
  }

  pub fn from_yaml(content: &str) -> Result<Self> {
    let store: RecordStore = serde_yaml::from_str(content)?;
    store.validate()?;
    Ok(store)
  }

  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading record store");
    let content = std::fs::read_to_string(path)?;
    Self::from_yaml(&content)
  }

  /// Every collection must have unique identifiers
  pub fn validate(&self) -> Result<()> {
    ensure_unique(&self.classrooms)?;
    ensure_unique(&self.events)?;
    ensure_unique(&self.restaurants)?;
    ensure_unique(&self.directory)?;
    ensure_unique(&self.groups)?;
    ensure_unique(&self.map)?;
    ensure_unique(&self.calendar)?;
    ensure_unique(&self.sources)?;
    Ok(())
  }

  pub fn len(&self, collection: Collection) -> usize {
    match collection {
      Collection::Classrooms => self.classrooms.len(),
      Collection::Events => self.events.len(),
      Collection::Restaurants => self.restaurants.len(),
      Collection::Directory => self.directory.len(),
      Collection::Groups => self.groups.len(),
      Collection::Map => self.map.len(),
      Collection::Calendar => self.calendar.len(),
      Collection::Sources => self.sources.len(),
    }
  }

  /// Distinct category values in first-appearance order
  pub fn categories(&self, collection: Collection) -> Vec<String> {
    match collection {
      Collection::Classrooms => distinct_categories(&self.classrooms),
      Collection::Events => distinct_categories(&self.events),
      Collection::Restaurants => distinct_categories(&self.restaurants),
      Collection::Directory => distinct_categories(&self.directory),
      Collection::Groups => distinct_categories(&self.groups),
      Collection::Map => distinct_categories(&self.map),
      Collection::Calendar => distinct_categories(&self.calendar),
      Collection::Sources => distinct_categories(&self.sources),
    }
  }
}

fn ensure_unique<R: Record>(records: &[R]) -> Result<()> {
  let mut seen = HashSet::new();
  for record in records {
    if !seen.insert(record.id()) {
      return Err(CampusError::DuplicateId {
        collection: R::COLLECTION.to_string(),
        id: record.id().to_string(),
      });
    }
  }
  Ok(())
}

fn distinct_categories<R: Record>(records: &[R]) -> Vec<String> {
  let mut seen = HashSet::new();
  records
    .iter()
    .filter_map(|record| record.category())
    .filter(|category| seen.insert(*category))
    .map(str::to_string)
    .collect()
}
