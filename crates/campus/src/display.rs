//! Rendering of records, replies and users for the terminal.

use clap::ValueEnum;
use colored::*;
use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::login::User;
use crate::record::*;
use crate::responder::Response;
use crate::toggle::Preferences;

const WRAP_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  /// Colored, human-readable text
  #[default]
  Pretty,
  /// Machine-readable JSON
  Json,
}

/// Per-record detail lines for pretty output
pub trait Present: Record + Serialize {
  fn details(&self) -> Vec<String>;
}

impl Present for Classroom {
  fn details(&self) -> Vec<String> {
    let status = if self.available {
      "Disponible".green().to_string()
    } else {
      match &self.next_available {
        Some(time) => format!("{} (libre a las {time})", "Ocupada".red()),
        None => "Ocupada".red().to_string(),
      }
    };

    let mut lines = vec![
      format!("{} · Piso {} · Capacidad: {}", self.building, self.floor, self.capacity),
      format!("Estado: {status}"),
    ];
    if !self.features.is_empty() {
      lines.push(format!("Equipamiento: {}", self.features.join(", ")));
    }
    lines
  }
}

impl Present for Event {
  fn details(&self) -> Vec<String> {
    let seats = if self.is_full() {
      "Cupo lleno".red().to_string()
    } else {
      format!("{} cupos disponibles de {}", self.seats_left(), self.capacity)
    };

    vec![
      format!("{} · {} {} · {}", self.kind.label().cyan(), self.date, self.time, self.location),
      format!("Organiza: {} · {seats}", self.organizer),
      self.description.clone(),
    ]
  }
}

impl Present for Restaurant {
  fn details(&self) -> Vec<String> {
    let open = if self.open { "Abierto".green() } else { "Cerrado".red() };
    let mut lines = vec![
      format!("{} · {} · {open}", self.kind, self.location),
      format!("Horario: {} · Precio: {} · ★ {:.1}", self.hours, self.price_range, self.rating),
    ];
    if !self.menu.is_empty() {
      lines.push(format!("Menú: {}", self.menu.join(", ")));
    }
    lines
  }
}

impl Present for StaffMember {
  fn details(&self) -> Vec<String> {
    vec![
      format!("{} · {}", self.position, self.department),
      format!("Oficina: {} · Horario: {}", self.office, self.schedule),
      format!("{} · {}", self.email, self.phone),
    ]
  }
}

impl Present for StudentGroup {
  fn details(&self) -> Vec<String> {
    let mut lines = vec![
      format!("{} · {} miembros · Coordina: {}", self.category.label().cyan(), self.members, self.coordinator),
      self.description.clone(),
      format!("{} · {} · Próxima reunión: {}", self.schedule, self.location, self.next_meeting),
      format!("Contacto: {}", self.contact),
    ];
    if self.interested {
      lines.push("★ Te interesa".yellow().to_string());
    }
    lines
  }
}

impl Present for MapLocation {
  fn details(&self) -> Vec<String> {
    vec![format!("{} · ({}, {})", self.kind.label().cyan(), self.x, self.y), self.description.clone()]
  }
}

impl Present for CalendarEntry {
  fn details(&self) -> Vec<String> {
    let mut lines = vec![format!("{} · {} {}", self.category.label().cyan(), self.date, self.time)];
    if let Some(location) = &self.location {
      lines.push(location.clone());
    }
    lines.push(self.description.clone());
    lines
  }
}

impl Present for KnowledgeSource {
  fn details(&self) -> Vec<String> {
    let status = match self.status {
      SourceStatus::Verified => self.status.label().green(),
      SourceStatus::Pending => self.status.label().yellow(),
    };
    vec![
      self.url.clone(),
      format!("{} · {status} · Actualizada: {}", self.category, self.last_updated),
    ]
  }
}

/// Render a filtered listing; pretty output says so when nothing matched
pub fn render_records<R: Present>(records: &[&R], format: OutputFormat) -> Result<String> {
  match format {
    OutputFormat::Json => {
      let value = json!({
        "collection": R::COLLECTION,
        "total": records.len(),
        "items": records,
      });
      Ok(serde_json::to_string_pretty(&value)?)
    }
    OutputFormat::Pretty => {
      if records.is_empty() {
        return Ok(format!("{}\n", "No matches found".yellow()));
      }

      let mut output = String::new();
      for record in records {
        output.push_str(&format!("=== {}/{} ===\n", R::COLLECTION.as_str().blue().bold(), record.name().yellow().bold()));
        for line in record.details() {
          for wrapped in wrap_text(&line, WRAP_WIDTH) {
            output.push_str(&wrapped);
            output.push('\n');
          }
        }
        output.push('\n');
      }
      Ok(output)
    }
  }
}

pub fn render_response(response: &Response, format: OutputFormat) -> Result<String> {
  match format {
    OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
    OutputFormat::Pretty => {
      let mut output = String::new();
      for line in wrap_text(&response.text, WRAP_WIDTH) {
        output.push_str(&line);
        output.push('\n');
      }
      for (index, suggestion) in response.suggestions.iter().enumerate() {
        output.push_str(&format!("  {} {}\n", format!("[{}]", index + 1).dimmed(), suggestion.cyan()));
      }
      Ok(output)
    }
  }
}

pub fn render_user(user: &User, format: OutputFormat) -> Result<String> {
  match format {
    OutputFormat::Json => Ok(serde_json::to_string_pretty(user)?),
    OutputFormat::Pretty => Ok(format!(
      "Sesión iniciada como {} <{}> ({:?}, id {})\n",
      user.name.bold(),
      user.email,
      user.role,
      user.id
    )),
  }
}

pub fn render_preferences(preferences: &Preferences, format: OutputFormat) -> Result<String> {
  match format {
    OutputFormat::Json => Ok(serde_json::to_string_pretty(preferences)?),
    OutputFormat::Pretty => {
      let mark = |on: bool| if on { "sí".green() } else { "no".red() };
      let notifications = &preferences.notifications;
      Ok(format!(
        "Modo oscuro: {}\nIdioma: {}\nNotificaciones de eventos: {}\nNotificaciones de aulas: {}\nNotificaciones generales: {}\n",
        mark(preferences.dark_mode),
        preferences.language,
        mark(notifications.events),
        mark(notifications.classrooms),
        mark(notifications.general)
      ))
    }
  }
}

/// Wrap text to fit within a specified width
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.split('\n') {
    if paragraph.trim().is_empty() {
      lines.push(String::new());
      continue;
    }

    let mut current_line = String::new();
    for word in paragraph.split_whitespace() {
      if current_line.is_empty() {
        current_line = word.to_string();
      } else if current_line.chars().count() + 1 + word.chars().count() <= width {
        current_line.push(' ');
        current_line.push_str(word);
      } else {
        lines.push(std::mem::take(&mut current_line));
        current_line = word.to_string();
      }
    }

    if !current_line.is_empty() {
      lines.push(current_line);
    }
  }

  lines
}
