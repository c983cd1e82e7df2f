//! Ticket records and the creation path.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
  Error, Result,
  code::next_code,
  schema::{Schema, TIMESTAMP_FORMAT, TicketState},
  store::RowStore,
  table::Record,
};

/// What the new-ticket form submits. No field is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTicket {
  pub locator:         String,
  pub basic_reference: String,
  /// `DD/MM/YYYY`, kept as typed.
  pub travel_date:     String,
  pub description:     String,
  pub priority:        String,
  pub assignee:        Option<String>,
  pub department:      Option<String>,
}

/// One row of the worksheet, by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
  pub code:            String,
  pub locator:         String,
  pub basic_reference: String,
  pub travel_date:     String,
  pub description:     String,
  pub priority:        String,
  pub state:           String,
  pub created_at:      String,
  /// Empty until the ticket first enters the resolved state.
  pub resolved_at:     String,
  pub assignee:        Option<String>,
  pub department:      Option<String>,
}

impl Ticket {
  /// Read a ticket out of a record; absent columns read as empty.
  pub fn from_record(record: &Record<'_>, schema: &Schema) -> Self {
    let get = |c: &str| record.get(c).unwrap_or("").to_owned();
    let opt = |c: &str| {
      record
        .get(c)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
    };
    Self {
      code:            get(&schema.code),
      locator:         get(&schema.locator),
      basic_reference: get(&schema.basic_reference),
      travel_date:     get(&schema.travel_date),
      description:     get(&schema.description),
      priority:        get(&schema.priority),
      state:           get(&schema.state),
      created_at:      get(&schema.created_at),
      resolved_at:     get(&schema.resolved_at),
      assignee:        opt(&schema.assignee),
      department:      opt(&schema.department),
    }
  }

  /// The value this ticket holds for `column`, if the schema knows it.
  fn field(&self, column: &str, schema: &Schema) -> Option<&str> {
    let fields = [
      (schema.code.as_str(), self.code.as_str()),
      (schema.locator.as_str(), self.locator.as_str()),
      (schema.basic_reference.as_str(), self.basic_reference.as_str()),
      (schema.travel_date.as_str(), self.travel_date.as_str()),
      (schema.description.as_str(), self.description.as_str()),
      (schema.priority.as_str(), self.priority.as_str()),
      (schema.state.as_str(), self.state.as_str()),
      (schema.created_at.as_str(), self.created_at.as_str()),
      (schema.resolved_at.as_str(), self.resolved_at.as_str()),
      (schema.assignee.as_str(), self.assignee.as_deref().unwrap_or("")),
      (schema.department.as_str(), self.department.as_deref().unwrap_or("")),
    ];
    fields
      .into_iter()
      .find(|(name, _)| *name == column)
      .map(|(_, value)| value)
  }

  /// Lay the ticket out in `header` order. Unknown columns are left empty.
  pub fn to_row(&self, header: &[String], schema: &Schema) -> Vec<String> {
    header
      .iter()
      .map(|c| self.field(c, schema).unwrap_or("").to_owned())
      .collect()
  }
}

/// Allocate a code for `input` and append it to the store.
///
/// The store is re-read right before allocation and the row is laid out in
/// the store's current column order. Two creators racing between the read and
/// the append can still receive the same code.
pub async fn create_ticket<S: RowStore>(
  store: &S,
  schema: &Schema,
  input: NewTicket,
  now: NaiveDateTime,
) -> Result<Ticket, S::Error> {
  let existing = store
    .get_all_records()
    .await
    .map_err(Error::StoreUnavailable)?;
  if existing.columns.is_empty() {
    return Err(Error::EmptySchema);
  }

  let ticket = Ticket {
    code:            next_code(&existing, &schema.code),
    locator:         input.locator,
    basic_reference: input.basic_reference,
    travel_date:     input.travel_date,
    description:     input.description,
    priority:        input.priority,
    state:           TicketState::Open.to_string(),
    created_at:      now.format(TIMESTAMP_FORMAT).to_string(),
    resolved_at:     String::new(),
    assignee:        input.assignee,
    department:      input.department,
  };

  store
    .append_row(ticket.to_row(&existing.columns, schema))
    .await
    .map_err(Error::StoreUnavailable)?;

  info!(code = %ticket.code, priority = %ticket.priority, "ticket created");
  Ok(ticket)
}
