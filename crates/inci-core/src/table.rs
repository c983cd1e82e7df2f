//! Tabular data as exchanged with the row store and the grid.
//!
//! Every cell is a string. Diffing compares these string representations, so
//! no typed parsing happens at this layer.

use serde::{Deserialize, Serialize};

// ─── Table ───────────────────────────────────────────────────────────────────

/// A header plus data rows, in schema column order.
///
/// Rows may be shorter than the header; missing cells read as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
  pub columns: Vec<String>,
  #[serde(default)]
  pub rows:    Vec<Vec<String>>,
}

impl Table {
  pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
    Self { columns, rows }
  }

  /// Build a table from string slices. Mostly useful in tests.
  pub fn from_strs(columns: &[&str], rows: &[&[&str]]) -> Self {
    Self {
      columns: columns.iter().map(|c| c.to_string()).collect(),
      rows:    rows
        .iter()
        .map(|r| r.iter().map(|v| v.to_string()).collect())
        .collect(),
    }
  }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  pub fn len(&self) -> usize { self.rows.len() }

  /// 0-based index of `column` in the header.
  ///
  /// Names match after trimming, so a hand-typed `"Estado "` still counts as
  /// `Estado`.
  pub fn column_index(&self, column: &str) -> Option<usize> {
    position_of(&self.columns, column)
  }

  pub fn has_column(&self, column: &str) -> bool {
    self.column_index(column).is_some()
  }

  /// The cell at `(row, col)`, or `""` when the row is short.
  pub fn cell(&self, row: usize, col: usize) -> &str {
    self
      .rows
      .get(row)
      .and_then(|r| r.get(col))
      .map(String::as_str)
      .unwrap_or("")
  }

  /// Iterate over rows as name-addressable records.
  pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
    self.rows.iter().map(move |values| Record {
      columns: &self.columns,
      values,
    })
  }

  /// A copy of this table with the named columns removed.
  pub fn without_columns(&self, drop: impl Fn(&str) -> bool) -> Table {
    let keep: Vec<usize> = (0..self.columns.len())
      .filter(|&i| !drop(&self.columns[i]))
      .collect();
    Table {
      columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
      rows:    (0..self.rows.len())
        .map(|r| keep.iter().map(|&i| self.cell(r, i).to_string()).collect())
        .collect(),
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
  columns: &'a [String],
  values:  &'a [String],
}

impl<'a> Record<'a> {
  /// The value of `column`; `None` if the header has no such column.
  pub fn get(&self, column: &str) -> Option<&'a str> {
    let idx = position_of(self.columns, column)?;
    Some(self.values.get(idx).map(String::as_str).unwrap_or(""))
  }

  pub fn values(&self) -> &'a [String] { self.values }
}

fn position_of(columns: &[String], column: &str) -> Option<usize> {
  let column = column.trim();
  columns.iter().position(|c| c.trim() == column)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_rows_read_as_empty() {
    let t = Table::from_strs(&["a", "b", "c"], &[&["1"]]);
    assert_eq!(t.cell(0, 0), "1");
    assert_eq!(t.cell(0, 2), "");
    assert_eq!(t.cell(5, 0), "");
    let r = t.records().next().unwrap();
    assert_eq!(r.get("b"), Some(""));
    assert_eq!(r.get("missing"), None);
  }

  #[test]
  fn without_columns_drops_and_pads() {
    let t = Table::from_strs(&["a", "x", "b"], &[&["1", "!", "2"], &["3"]]);
    let s = t.without_columns(|c| c == "x");
    assert_eq!(s.columns, vec!["a", "b"]);
    assert_eq!(s.rows, vec![vec!["1", "2"], vec!["3", ""]]);
  }

  #[test]
  fn padded_header_names_still_match() {
    let t = Table::from_strs(&["Código", " Estado "], &[&["INCI0001", "Abierta"]]);
    assert_eq!(t.column_index("Estado"), Some(1));
    assert!(t.has_column("Estado"));
    assert_eq!(t.records().next().unwrap().get("Estado"), Some("Abierta"));
  }

  #[test]
  fn deserialises_without_rows() {
    let t: Table = serde_json::from_str(r#"{"columns":["a"]}"#).unwrap();
    assert!(t.is_empty());
  }
}
