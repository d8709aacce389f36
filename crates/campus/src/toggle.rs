//! Boolean flips on caller-owned state: group interest and user preferences.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CampusError, Result};
use crate::record::Toggleable;

/// Flip the flag of the record with `id` and return its new value.
///
/// Exactly one record changes. An unknown id leaves every record untouched.
pub fn toggle<R: Toggleable>(records: &mut [R], id: &str) -> Result<bool> {
  let record = records
    .iter_mut()
    .find(|record| record.id() == id)
    .ok_or_else(|| CampusError::RecordNotFound { collection: R::COLLECTION.to_string(), id: id.to_string() })?;

  let flag = record.flag_mut();
  *flag = !*flag;
  debug!(collection = %R::COLLECTION, id, value = *flag, "toggled");
  Ok(*flag)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
  pub events: bool,
  pub classrooms: bool,
  pub general: bool,
}

impl Default for NotificationPrefs {
  fn default() -> Self {
    Self { events: true, classrooms: false, general: true }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
  pub dark_mode: bool,
  pub language: String,
  pub notifications: NotificationPrefs,
}

impl Default for Preferences {
  fn default() -> Self {
    Self { dark_mode: false, language: "es".to_string(), notifications: NotificationPrefs::default() }
  }
}

/// Boolean preferences a user can flip from the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Setting {
  DarkMode,
  EventNotifications,
  ClassroomNotifications,
  GeneralNotifications,
}

impl Preferences {
  pub fn toggle(&mut self, setting: Setting) -> bool {
    let flag = match setting {
      Setting::DarkMode => &mut self.dark_mode,
      Setting::EventNotifications => &mut self.notifications.events,
      Setting::ClassroomNotifications => &mut self.notifications.classrooms,
      Setting::GeneralNotifications => &mut self.notifications.general,
    };
    *flag = !*flag;
    *flag
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::RecordStore;

  #[test]
  fn test_toggle_flips_exactly_one_group() {
    let mut groups = RecordStore::builtin().unwrap().groups;
    let before = groups.clone();

    assert!(toggle(&mut groups, "3").unwrap());

    for (old, new) in before.iter().zip(&groups) {
      if old.id == "3" {
        assert!(new.interested);
      } else {
        assert_eq!(old, new);
      }
    }
  }

  #[test]
  fn test_toggle_twice_restores() {
    let mut groups = RecordStore::builtin().unwrap().groups;
    let before = groups.clone();
    assert!(toggle(&mut groups, "1").unwrap());
    assert!(!toggle(&mut groups, "1").unwrap());
    assert_eq!(groups, before);
  }

  #[test]
  fn test_toggle_unknown_id() {
    let mut groups = RecordStore::builtin().unwrap().groups;
    let before = groups.clone();
    let err = toggle(&mut groups, "999").unwrap_err();
    assert!(matches!(err, CampusError::RecordNotFound { ref collection, .. } if collection == "groups"));
    assert_eq!(groups, before);
  }

  #[test]
  fn test_preferences() {
    let mut prefs = Preferences::default();
    assert!(!prefs.dark_mode);
    assert_eq!(prefs.language, "es");
    assert!(prefs.toggle(Setting::DarkMode));
    assert!(prefs.toggle(Setting::ClassroomNotifications));
    assert!(!prefs.toggle(Setting::EventNotifications));
    assert!(prefs.notifications.general);
  }
}
