//! Display-only columns derived from stored values.
//!
//! These are computed after every read and stripped before every write; they
//! never reach the store.

use std::str::FromStr;

use crate::{
  schema::{Schema, TicketState},
  table::Table,
};

/// Symbol shown next to a state in the grid.
pub fn indicator(state: &str) -> &'static str {
  match TicketState::from_str(state) {
    Ok(TicketState::Open) => "🔴",
    Ok(TicketState::InProgress) => "🟡",
    Ok(TicketState::Resolved) => "🟢",
    Err(_) => "⚪",
  }
}

/// Insert the indicator column right after the state column.
///
/// Returns the table unchanged if it has no state column or already carries
/// the indicator.
pub fn with_indicator(table: &Table, schema: &Schema) -> Table {
  let Some(state) = table.column_index(&schema.state) else {
    return table.clone();
  };
  if table.has_column(&schema.indicator) {
    return table.clone();
  }

  let mut columns = table.columns.clone();
  columns.insert(state + 1, schema.indicator.clone());

  let rows = (0..table.len())
    .map(|r| {
      let mut row: Vec<String> = (0..table.columns.len())
        .map(|c| table.cell(r, c).to_owned())
        .collect();
      row.insert(state + 1, indicator(table.cell(r, state)).to_owned());
      row
    })
    .collect();

  Table::new(columns, rows)
}

/// Remove every decorative column.
pub fn strip_decorative(table: &Table, schema: &Schema) -> Table {
  table.without_columns(|c| schema.is_decorative(c))
}
