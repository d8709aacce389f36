//! Record types held by the store and the trait the filter engine reads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Collection;

/// The shape every collection shares, as seen by the filter engine.
///
/// `search_fields` are the designated free-text fields a text query is
/// matched against; `category`, `status` and `numeric` are `None` when the
/// record type has no such attribute.
pub trait Record {
  const COLLECTION: Collection;

  fn id(&self) -> &str;
  fn name(&self) -> &str;
  fn search_fields(&self) -> Vec<&str>;

  fn category(&self) -> Option<&str> {
    None
  }

  fn status(&self) -> Option<&str> {
    None
  }

  fn numeric(&self) -> Option<f64> {
    None
  }
}

/// Records carrying a user-toggled boolean
pub trait Toggleable: Record {
  fn flag_mut(&mut self) -> &mut bool;
}

macro_rules! labeled_enum {
  ($name:ident { $($variant:ident => $key:literal, $label:literal),+ $(,)? }) => {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum $name {
      $($variant),+
    }

    impl $name {
      pub const ALL: &'static [$name] = &[$($name::$variant),+];

      /// Key used in data files and filter criteria
      pub fn as_str(self) -> &'static str {
        match self {
          $($name::$variant => $key),+
        }
      }

      /// Spanish display label
      pub fn label(self) -> &'static str {
        match self {
          $($name::$variant => $label),+
        }
      }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
      }
    }
  };
}

labeled_enum!(EventKind {
  Conference => "conference", "Conferencia",
  Seminar => "seminar", "Seminario",
  Workshop => "workshop", "Taller",
  Cultural => "cultural", "Cultural",
  Sports => "sports", "Deportivo",
});

labeled_enum!(GroupCategory {
  Investigacion => "investigacion", "Investigación",
  Cultural => "cultural", "Cultural",
  Deportivo => "deportivo", "Deportivo",
  Academico => "academico", "Académico",
});

labeled_enum!(CalendarCategory {
  Examen => "examen", "Examen",
  Matricula => "matricula", "Matrícula",
  Evento => "evento", "Evento",
  Cancelacion => "cancelacion", "Cancelación",
});

labeled_enum!(LocationKind {
  Building => "building", "Edificio",
  Library => "library", "Biblioteca",
  Cafeteria => "cafeteria", "Cafetería",
  Sports => "sports", "Deportes",
  Admin => "admin", "Administrativo",
});

labeled_enum!(SourceStatus {
  Verified => "verified", "Verificada",
  Pending => "pending", "Pendiente",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
  pub id: String,
  pub name: String,
  pub building: String,
  pub capacity: u32,
  pub available: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub next_available: Option<String>,
  #[serde(default)]
  pub features: Vec<String>,
  pub floor: u8,
}

impl Record for Classroom {
  const COLLECTION: Collection = Collection::Classrooms;

  fn id(&self) -> &str {
    &self.id
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn search_fields(&self) -> Vec<&str> {
    vec![self.name.as_str(), self.building.as_str()]
  }

  fn category(&self) -> Option<&str> {
    Some(self.building.as_str())
  }

  fn status(&self) -> Option<&str> {
    Some(if self.available { "available" } else { "occupied" })
  }

  fn numeric(&self) -> Option<f64> {
    Some(f64::from(self.capacity))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
  pub id: String,
  pub title: String,
  pub kind: EventKind,
  pub date: NaiveDate,
  pub time: String,
  pub location: String,
  pub organizer: String,
  pub capacity: u32,
  pub registered: u32,
  pub description: String,
}

impl Event {
  pub fn seats_left(&self) -> u32 {
    self.capacity.saturating_sub(self.registered)
  }

  pub fn is_full(&self) -> bool {
    self.seats_left() == 0
  }
}

impl Record for Event {
  const COLLECTION: Collection = Collection::Events;

  fn id(&self) -> &str {
    &self.id
  }

  fn name(&self) -> &str {
    &self.title
  }

  fn search_fields(&self) -> Vec<&str> {
    vec![self.title.as_str(), self.location.as_str()]
  }

  fn category(&self) -> Option<&str> {
    Some(self.kind.as_str())
  }

  fn status(&self) -> Option<&str> {
    Some(if self.is_full() { "full" } else { "open" })
  }

  fn numeric(&self) -> Option<f64> {
    Some(f64::from(self.capacity))
  }
}

/// Stable by-date ordering used when presenting events
pub fn sorted_by_date<'a>(events: &[&'a Event]) -> Vec<&'a Event> {
  let mut sorted = events.to_vec();
  sorted.sort_by_key(|event| event.date);
  sorted
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
  pub id: String,
  pub name: String,
  pub kind: String,
  pub location: String,
  pub hours: String,
  pub price_range: String,
  pub rating: f64,
  #[serde(default)]
  pub menu: Vec<String>,
  pub open: bool,
}

impl Record for Restaurant {
  const COLLECTION: Collection = Collection::Restaurants;

  fn id(&self) -> &str {
    &self.id
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn search_fields(&self) -> Vec<&str> {
    vec![self.name.as_str(), self.location.as_str()]
  }

  fn category(&self) -> Option<&str> {
    Some(self.kind.as_str())
  }

  fn status(&self) -> Option<&str> {
    Some(if self.open { "open" } else { "closed" })
  }

  fn numeric(&self) -> Option<f64> {
    Some(self.rating)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
  pub id: String,
  pub name: String,
  pub position: String,
  pub department: String,
  pub office: String,
  pub email: String,
  pub phone: String,
  pub schedule: String,
}

impl Record for StaffMember {
  const COLLECTION: Collection = Collection::Directory;

  fn id(&self) -> &str {
    &self.id
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn search_fields(&self) -> Vec<&str> {
    vec![self.name.as_str(), self.department.as_str(), self.position.as_str()]
  }

  fn category(&self) -> Option<&str> {
    Some(self.department.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentGroup {
  pub id: String,
  pub name: String,
  pub category: GroupCategory,
  pub description: String,
  pub members: u32,
  pub contact: String,
  pub location: String,
  pub schedule: String,
  pub next_meeting: NaiveDate,
  pub coordinator: String,
  #[serde(default)]
  pub interested: bool,
}

impl Record for StudentGroup {
  const COLLECTION: Collection = Collection::Groups;

  fn id(&self) -> &str {
    &self.id
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn search_fields(&self) -> Vec<&str> {
    vec![self.name.as_str(), self.description.as_str()]
  }

  fn category(&self) -> Option<&str> {
    Some(self.category.as_str())
  }

  fn status(&self) -> Option<&str> {
    Some(if self.interested { "interested" } else { "not-interested" })
  }

  fn numeric(&self) -> Option<f64> {
    Some(f64::from(self.members))
  }
}

impl Toggleable for StudentGroup {
  fn flag_mut(&mut self) -> &mut bool {
    &mut self.interested
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLocation {
  pub id: String,
  pub name: String,
  pub kind: LocationKind,
  pub x: u16,
  pub y: u16,
  pub description: String,
}

impl Record for MapLocation {
  const COLLECTION: Collection = Collection::Map;

  fn id(&self) -> &str {
    &self.id
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn search_fields(&self) -> Vec<&str> {
    vec![self.name.as_str()]
  }

  fn category(&self) -> Option<&str> {
    Some(self.kind.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
  pub id: String,
  pub title: String,
  pub date: NaiveDate,
  pub time: String,
  pub category: CalendarCategory,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  pub description: String,
}

impl Record for CalendarEntry {
  const COLLECTION: Collection = Collection::Calendar;

  fn id(&self) -> &str {
    &self.id
  }

  fn name(&self) -> &str {
    &self.title
  }

  fn search_fields(&self) -> Vec<&str> {
    vec![self.title.as_str(), self.description.as_str()]
  }

  fn category(&self) -> Option<&str> {
    Some(self.category.as_str())
  }
}

/// Information source tracked on the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSource {
  pub id: String,
  pub name: String,
  pub url: String,
  pub category: String,
  pub status: SourceStatus,
  pub last_updated: NaiveDate,
}

impl Record for KnowledgeSource {
  const COLLECTION: Collection = Collection::Sources;

  fn id(&self) -> &str {
    &self.id
  }

  fn name(&self) -> &str {
    &self.name
  }

  fn search_fields(&self) -> Vec<&str> {
    vec![self.name.as_str(), self.url.as_str()]
  }

  fn category(&self) -> Option<&str> {
    Some(self.category.as_str())
  }

  fn status(&self) -> Option<&str> {
    Some(self.status.as_str())
  }
}
