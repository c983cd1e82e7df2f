//! The worksheet's column layout and the value vocabularies of its cells.
//!
//! Column names are per deployment and come from configuration; the defaults
//! are the headers of the "Incidencias" worksheet the tracker was built for.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// `created_at` / `resolved_at` cell format.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// `travel_date` cell format. Never validated; used only for ordering.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

// ─── Vocabularies ────────────────────────────────────────────────────────────

/// The lifecycle state of a ticket.
///
/// Transitions are not enforced. The only behaviour tied to a state is the
/// `resolved_at` stamp written on entry into [`TicketState::Resolved`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
  EnumIter,
)]
pub enum TicketState {
  #[default]
  #[serde(rename = "Abierta")]
  #[strum(serialize = "Abierta")]
  Open,
  #[serde(rename = "En proceso")]
  #[strum(serialize = "En proceso")]
  InProgress,
  #[serde(rename = "Resuelta")]
  #[strum(serialize = "Resuelta")]
  Resolved,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
  EnumIter,
)]
pub enum Priority {
  #[serde(rename = "Baja")]
  #[strum(serialize = "Baja")]
  Low,
  #[serde(rename = "Media")]
  #[strum(serialize = "Media")]
  Medium,
  #[serde(rename = "Alta")]
  #[strum(serialize = "Alta")]
  High,
}

impl TicketState {
  pub fn all_values() -> Vec<String> {
    Self::iter().map(|s| s.to_string()).collect()
  }
}

impl Priority {
  pub fn all_values() -> Vec<String> {
    Self::iter().map(|p| p.to_string()).collect()
  }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

/// Column names of the worksheet.
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
  pub code:            String,
  pub locator:         String,
  pub basic_reference: String,
  pub travel_date:     String,
  pub description:     String,
  pub priority:        String,
  pub state:           String,
  pub created_at:      String,
  pub resolved_at:     String,
  pub assignee:        String,
  pub department:      String,
  /// Display-only column derived from `state`; never written back.
  pub indicator:       String,
  /// Further display-only columns the grid may add.
  pub decorative:      Vec<String>,
}

impl Default for Schema {
  fn default() -> Self {
    Self {
      code:            "Código".into(),
      locator:         "Localizador".into(),
      basic_reference: "Básico".into(),
      travel_date:     "Fecha del Viaje".into(),
      description:     "Descripción".into(),
      priority:        "Prioridad".into(),
      state:           "Estado".into(),
      created_at:      "Fecha de creación".into(),
      resolved_at:     "Fecha de resolución".into(),
      assignee:        "Asignado a".into(),
      department:      "Departamento".into(),
      indicator:       "Indicador".into(),
      decorative:      vec![],
    }
  }
}

impl Schema {
  /// The persisted columns, in the order used to initialise a worksheet.
  pub fn default_header(&self) -> Vec<String> {
    vec![
      self.code.clone(),
      self.locator.clone(),
      self.basic_reference.clone(),
      self.travel_date.clone(),
      self.description.clone(),
      self.priority.clone(),
      self.state.clone(),
      self.created_at.clone(),
      self.resolved_at.clone(),
      self.assignee.clone(),
      self.department.clone(),
    ]
  }

  pub fn is_decorative(&self, column: &str) -> bool {
    let column = column.trim();
    column == self.indicator || self.decorative.iter().any(|c| c == column)
  }
}
