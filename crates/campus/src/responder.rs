//! Keyword responder.
//!
//! An ordered table of trigger substrings. The first rule with any trigger
//! contained in the normalised utterance wins, regardless of how many
//! triggers of later rules also match. The fallback is part of the table
//! type itself, so `respond_to` always has an answer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

use crate::error::{CampusError, Result};
use crate::text::Folding;

/// Reply payload shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
  pub text: String,
  #[serde(default)]
  pub suggestions: Vec<String>,
}

impl Response {
  pub fn new(text: impl Into<String>, suggestions: &[&str]) -> Self {
    Self {
      text: text.into(),
      suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
  pub triggers: Vec<String>,
  pub response: Response,
}

impl Rule {
  pub fn new(triggers: &[&str], response: Response) -> Self {
    Self {
      triggers: triggers.iter().map(|t| t.to_string()).collect(),
      response,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
  pub rules: Vec<Rule>,
  pub fallback: Response,
}

impl RuleTable {
  pub fn from_yaml(content: &str) -> Result<Self> {
    let table: RuleTable = serde_yaml::from_str(content)?;
    table.validate()?;
    Ok(table)
  }

  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading rule table");
    let content = std::fs::read_to_string(path)?;
    Self::from_yaml(&content)
  }

  /// Rejects tables that could break totality or match everything
  pub fn validate(&self) -> Result<()> {
    if self.fallback.text.trim().is_empty() {
      return Err(CampusError::InvalidRuleTable("fallback response text is empty".to_string()));
    }

    for (index, rule) in self.rules.iter().enumerate() {
      if rule.triggers.is_empty() {
        return Err(CampusError::InvalidRuleTable(format!("rule {index} has no triggers")));
      }
      if rule.triggers.iter().any(|t| t.trim().is_empty()) {
        return Err(CampusError::InvalidRuleTable(format!("rule {index} has an empty trigger")));
      }
      if rule.response.text.trim().is_empty() {
        return Err(CampusError::InvalidRuleTable(format!("rule {index} has an empty response")));
      }
    }

    Ok(())
  }
}

impl Default for RuleTable {
  fn default() -> Self {
    Self {
      rules: vec![
        Rule::new(
          &["bloque", "ubicación", "dónde"],
          Response::new(
            "Puedo ayudarte a encontrar cualquier edificio en el campus. El Bloque 38 se encuentra en la zona norte, cerca de la biblioteca. ¿Te gustaría ver la ubicación en el mapa?",
            &["Ver en mapa", "Otros bloques", "Cómo llegar"],
          ),
        ),
        Rule::new(
          &["biblioteca", "horario"],
          Response::new(
            "La biblioteca Carlos Gaviria Díaz está abierta de Lunes a Viernes de 7:00 AM a 10:00 PM, y Sábados de 8:00 AM a 6:00 PM. ¿Necesitas saber sobre algún servicio específico?",
            &["Salas de estudio", "Préstamo de libros", "Computadores disponibles"],
          ),
        ),
        Rule::new(
          &["evento", "seminario", "actividad"],
          Response::new(
            "Tenemos varios eventos interesantes esta semana. Puedo mostrarte el calendario completo con conferencias, seminarios y actividades culturales. ¿Te gustaría verlos?",
            &["Ver eventos", "Eventos de hoy", "Registrarme a un evento"],
          ),
        ),
        Rule::new(
          &["aula", "salón", "disponible"],
          Response::new(
            "Actualmente hay 23 aulas disponibles en diferentes bloques. ¿Buscas alguna capacidad o ubicación específica?",
            &["Ver aulas disponibles", "Bloque específico", "Reservar aula"],
          ),
        ),
        Rule::new(
          &["comida", "cafetería", "restaurante"],
          Response::new(
            "Tenemos varias opciones de alimentación en el campus: Cafetería Central, Restaurante de Posgrados, y varias cafeterías distribuidas por los bloques. ¿Quieres ver horarios y ubicaciones?",
            &["Ver restaurantes", "Menú del día", "Más cercano"],
          ),
        ),
      ],
      fallback: Response::new(
        "Entiendo tu consulta. Puedo ayudarte con información sobre el campus, horarios, ubicaciones, eventos y mucho más. ¿Sobre qué tema te gustaría saber más?",
        &["Ubicaciones", "Eventos", "Servicios", "Aulas"],
      ),
    }
  }
}

/// A validated rule table with its triggers pre-folded
#[derive(Debug, Clone)]
pub struct Responder {
  table: RuleTable,
  folding: Folding,
  folded_triggers: Vec<Vec<String>>,
}

impl Responder {
  pub fn new(table: RuleTable, folding: Folding) -> Result<Self> {
    table.validate()?;
    Ok(Self::prepared(table, folding))
  }

  fn prepared(table: RuleTable, folding: Folding) -> Self {
    let folded_triggers = table
      .rules
      .iter()
      .map(|rule| rule.triggers.iter().map(|t| folding.fold(t.trim())).collect())
      .collect();

    Self { table, folding, folded_triggers }
  }

  pub fn table(&self) -> &RuleTable {
    &self.table
  }

  /// Index of the first rule matching `utterance`, `None` for the fallback
  pub fn matched_rule(&self, utterance: &str) -> Option<usize> {
    let input = self.folding.fold(utterance);
    let index = self
      .folded_triggers
      .iter()
      .position(|triggers| triggers.iter().any(|trigger| input.contains(trigger.as_str())));

    trace!(?index, "keyword match");
    index
  }

  pub fn respond_to(&self, utterance: &str) -> &Response {
    match self.matched_rule(utterance) {
      Some(index) => &self.table.rules[index].response,
      None => &self.table.fallback,
    }
  }
}

impl Default for Responder {
  fn default() -> Self {
    Self::prepared(RuleTable::default(), Folding::default())
  }
}

/// Answer `utterance` with the built-in rule table
pub fn respond_to(utterance: &str) -> Response {
  Responder::default().respond_to(utterance).clone()
}
