//! Grid edits → minimal cell writes against the sheet of record.
//!
//! [`diff`] compares the table the grid was loaded with against the table the
//! user saved and yields one [`CellChange`] per edited cell. [`apply`] pushes
//! those changes through a [`RowStore`], one cell at a time, and reports the
//! rows it could not write instead of aborting.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  display::strip_decorative,
  error::FailureReason,
  schema::{Schema, TIMESTAMP_FORMAT, TicketState},
  store::RowStore,
  table::Table,
};

// ─── Change set ──────────────────────────────────────────────────────────────

/// How a changed row is found again in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowKey {
  /// The ticket code. Used whenever both tables carry the code column.
  Code(String),
  /// 0-based data-row position at diff time; fallback for sheets without
  /// a code column.
  Position(usize),
}

impl std::fmt::Display for RowKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RowKey::Code(c) => f.write_str(c),
      RowKey::Position(p) => write!(f, "#{p}"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
  pub row_key:   RowKey,
  pub column:    String,
  pub old_value: String,
  pub new_value: String,
}

impl CellChange {
  /// True when this change moves a ticket into the resolved state.
  fn resolves(&self, schema: &Schema) -> bool {
    let resolved = TicketState::Resolved.as_ref();
    self.column.trim() == schema.state
      && self.new_value == resolved
      && self.old_value != resolved
  }
}

// ─── Diff ────────────────────────────────────────────────────────────────────

/// Compute the cell-level changes that turn `original` into `edited`.
///
/// Only columns present in both headers are compared, and decorative columns
/// never are. Rows are paired by code when both tables have the code column
/// (first occurrence wins in `original`), positionally otherwise. Rows that
/// exist on only one side are ignored.
pub fn diff(original: &Table, edited: &Table, schema: &Schema) -> Vec<CellChange> {
  let columns: Vec<(usize, usize)> = edited
    .columns
    .iter()
    .enumerate()
    .filter(|(_, name)| !schema.is_decorative(name))
    .filter_map(|(ei, name)| original.column_index(name).map(|oi| (oi, ei)))
    .collect();

  let mut changes = vec![];
  for (row_key, oi, ei) in pair_rows(original, edited, &schema.code) {
    for &(oc, ec) in &columns {
      let old = original.cell(oi, oc);
      let new = edited.cell(ei, ec);
      if old != new {
        changes.push(CellChange {
          row_key:   row_key.clone(),
          column:    edited.columns[ec].clone(),
          old_value: old.to_owned(),
          new_value: new.to_owned(),
        });
      }
    }
  }
  changes
}

/// `(key, original_row, edited_row)` for every row present on both sides,
/// in edited order.
fn pair_rows(
  original: &Table,
  edited: &Table,
  code_column: &str,
) -> Vec<(RowKey, usize, usize)> {
  let (Some(oc), Some(ec)) =
    (original.column_index(code_column), edited.column_index(code_column))
  else {
    return (0..original.len().min(edited.len()))
      .map(|i| (RowKey::Position(i), i, i))
      .collect();
  };

  let by_code = index_by_code(original, oc);
  (0..edited.len())
    .filter_map(|ei| {
      let code = edited.cell(ei, ec);
      by_code
        .get(code)
        .map(|&oi| (RowKey::Code(code.to_owned()), oi, ei))
    })
    .collect()
}

/// Map each non-empty code to the first data row carrying it.
fn index_by_code(table: &Table, code_col: usize) -> HashMap<&str, usize> {
  let mut by_code = HashMap::new();
  for i in 0..table.len() {
    let code = table.cell(i, code_col);
    if !code.is_empty() {
      by_code.entry(code).or_insert(i);
    }
  }
  by_code
}

// ─── Apply ───────────────────────────────────────────────────────────────────

/// A row (or cell) that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailure {
  pub row_key: RowKey,
  pub reason:  FailureReason,
}

/// Outcome of an [`apply`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
  /// Cells written, including `resolved_at` stamps.
  pub cells_updated: usize,
  pub failures:      Vec<RowFailure>,
}

impl ApplyReport {
  pub fn is_clean(&self) -> bool { self.failures.is_empty() }

  fn fail(&mut self, row_key: &RowKey, reason: FailureReason) {
    warn!(row = %row_key, %reason, "cell change not applied");
    let failure = RowFailure {
      row_key: row_key.clone(),
      reason,
    };
    if !self.failures.contains(&failure) {
      self.failures.push(failure);
    }
  }
}

/// Resolves row keys and column names against one snapshot of the store.
struct Locator<'a> {
  snapshot: &'a Table,
  by_code:  HashMap<&'a str, usize>,
}

impl<'a> Locator<'a> {
  fn new(snapshot: &'a Table, schema: &Schema) -> Self {
    let by_code = snapshot
      .column_index(&schema.code)
      .map(|c| index_by_code(snapshot, c))
      .unwrap_or_default();
    Self { snapshot, by_code }
  }

  /// 1-based sheet row; data starts below the header on row 2.
  fn row(&self, key: &RowKey) -> Option<u32> {
    let idx = match key {
      RowKey::Code(code) => *self.by_code.get(code.as_str())?,
      RowKey::Position(p) if *p < self.snapshot.len() => *p,
      RowKey::Position(_) => return None,
    };
    u32::try_from(idx + 2).ok()
  }

  /// 1-based sheet column.
  fn column(&self, name: &str) -> Option<u32> {
    u32::try_from(self.snapshot.column_index(name)? + 1).ok()
  }
}

/// Write `changes` to `store`, one `update_cell` per change.
///
/// Rows are located in a snapshot read at the start of the pass, not in the
/// table the edits were made against. A change whose row or column cannot be
/// found, or whose write fails, is recorded in the report and the pass moves
/// on; nothing is rolled back. Entering the resolved state also stamps
/// `now` into the resolution column of the same row.
///
/// Only the initial snapshot read can fail the whole call.
pub async fn apply<S: RowStore>(
  store: &S,
  schema: &Schema,
  changes: &[CellChange],
  now: NaiveDateTime,
) -> Result<ApplyReport, S::Error> {
  let mut report = ApplyReport::default();
  if changes.is_empty() {
    return Ok(report);
  }

  let snapshot = store
    .get_all_records()
    .await
    .map_err(Error::StoreUnavailable)?;
  let locate = Locator::new(&snapshot, schema);

  for change in changes {
    let Some(row) = locate.row(&change.row_key) else {
      report.fail(&change.row_key, FailureReason::RowNotFound);
      continue;
    };
    let Some(col) = locate.column(&change.column) else {
      report.fail(
        &change.row_key,
        FailureReason::ColumnNotFound(change.column.clone()),
      );
      continue;
    };

    debug!(row, col, column = %change.column, "writing cell");
    if let Err(e) = store.update_cell(row, col, change.new_value.clone()).await {
      report.fail(&change.row_key, FailureReason::StoreWrite(e.to_string()));
      continue;
    }
    report.cells_updated += 1;

    if !change.resolves(schema) {
      continue;
    }
    let Some(stamp_col) = locate.column(&schema.resolved_at) else {
      warn!(
        row = %change.row_key,
        column = %schema.resolved_at,
        "resolution column missing; ticket not stamped"
      );
      continue;
    };
    let stamp = now.format(TIMESTAMP_FORMAT).to_string();
    debug!(row, col = stamp_col, %stamp, "stamping resolution");
    match store.update_cell(row, stamp_col, stamp).await {
      Ok(()) => report.cells_updated += 1,
      Err(e) => {
        report.fail(&change.row_key, FailureReason::StoreWrite(e.to_string()))
      }
    }
  }

  info!(
    changes = changes.len(),
    cells_updated = report.cells_updated,
    failures = report.failures.len(),
    "applied grid changes"
  );
  Ok(report)
}

/// [`diff`] followed by [`apply`].
pub async fn reconcile<S: RowStore>(
  store: &S,
  schema: &Schema,
  original: &Table,
  edited: &Table,
  now: NaiveDateTime,
) -> Result<ApplyReport, S::Error> {
  let changes = diff(original, edited, schema);
  apply(store, schema, &changes, now).await
}

// ─── Whole-table save ────────────────────────────────────────────────────────

/// Replace the worksheet with `table`, minus its decorative columns.
pub async fn rewrite<S: RowStore>(
  store: &S,
  schema: &Schema,
  table: &Table,
) -> Result<(), S::Error> {
  let persisted = strip_decorative(table, schema);
  info!(rows = persisted.len(), "rewriting worksheet");
  store
    .clear_and_rewrite(persisted.columns, persisted.rows)
    .await
    .map_err(Error::StoreUnavailable)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
