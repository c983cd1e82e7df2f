//! Filtering and sorting of the ticket listing.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
  schema::{DATE_FORMAT, Schema, TIMESTAMP_FORMAT},
  table::Table,
};

/// What the grid asked to see.
///
/// A `None` value set means "every value currently present".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
  pub states:     Option<Vec<String>>,
  pub priorities: Option<Vec<String>>,
  /// Case-insensitive substring of the ticket code.
  pub code:       Option<String>,
  pub sort_by:    Option<String>,
  #[serde(default)]
  pub descending: bool,
}

/// Apply `query` to `table`, returning a new table with the same columns.
pub fn list(table: &Table, schema: &Schema, query: &ListingQuery) -> Table {
  let mut out = filter(table, schema, query);
  if let Some(column) = &query.sort_by {
    sort(&mut out, column, query.descending);
  }
  out
}

/// Keep rows whose state and priority are in the selected sets and whose
/// code contains the search text. A predicate on a column the table lacks
/// is not applied.
pub fn filter(table: &Table, schema: &Schema, query: &ListingQuery) -> Table {
  let state = table.column_index(&schema.state);
  let priority = table.column_index(&schema.priority);
  let code = table.column_index(&schema.code);
  let needle = query
    .code
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_lowercase);

  let in_set = |set: &Option<Vec<String>>, col: Option<usize>, row: usize| {
    match (set, col) {
      (Some(set), Some(col)) => set.iter().any(|v| v == table.cell(row, col)),
      _ => true,
    }
  };

  let rows = (0..table.len())
    .filter(|&r| in_set(&query.states, state, r))
    .filter(|&r| in_set(&query.priorities, priority, r))
    .filter(|&r| match (&needle, code) {
      (Some(needle), Some(col)) => {
        table.cell(r, col).to_lowercase().contains(needle.as_str())
      }
      _ => true,
    })
    .map(|r| table.rows[r].clone())
    .collect();

  Table::new(table.columns.clone(), rows)
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// How a column's values compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKind {
  Numeric,
  Date,
  Text,
}

/// Stable sort on `column`. Numeric and `DD/MM/YYYY[ HH:MM:SS]` columns
/// are ordered by value, everything else lexicographically. Empty cells go
/// last when ascending. An unknown column leaves the order untouched.
pub fn sort(table: &mut Table, column: &str, descending: bool) {
  let Some(col) = table.column_index(column) else {
    return;
  };
  let order: Vec<usize> = {
    let values: Vec<&str> =
      (0..table.len()).map(|r| table.cell(r, col)).collect();
    let kind = detect_kind(&values);
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
      let ord = compare(values[a], values[b], kind);
      if descending { ord.reverse() } else { ord }
    });
    order
  };

  let mut slots: Vec<Option<Vec<String>>> =
    std::mem::take(&mut table.rows).into_iter().map(Some).collect();
  table.rows = order.into_iter().filter_map(|i| slots[i].take()).collect();
}

fn detect_kind(values: &[&str]) -> SortKind {
  let present: Vec<&str> =
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect();
  if present.is_empty() {
    SortKind::Text
  } else if present.iter().all(|v| v.parse::<f64>().is_ok()) {
    SortKind::Numeric
  } else if present.iter().all(|v| parse_date(v).is_some()) {
    SortKind::Date
  } else {
    SortKind::Text
  }
}

fn compare(a: &str, b: &str, kind: SortKind) -> Ordering {
  let (a, b) = (a.trim(), b.trim());
  match (a.is_empty(), b.is_empty()) {
    (true, true) => return Ordering::Equal,
    (true, false) => return Ordering::Greater,
    (false, true) => return Ordering::Less,
    (false, false) => {}
  }
  match kind {
    SortKind::Numeric => {
      let (x, y) = (a.parse::<f64>(), b.parse::<f64>());
      match (x, y) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        _ => a.cmp(b),
      }
    }
    SortKind::Date => parse_date(a).cmp(&parse_date(b)),
    SortKind::Text => a.cmp(b),
  }
}

fn parse_date(s: &str) -> Option<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok().or_else(|| {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
      .ok()
      .and_then(|d| d.and_hms_opt(0, 0, 0))
  })
}
