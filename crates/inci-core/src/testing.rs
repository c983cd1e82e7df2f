//! In-memory `RowStore` used by the core's tests.

use std::{
  collections::HashSet,
  sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
  },
};

use thiserror::Error;

use crate::{store::RowStore, table::Table};

#[derive(Debug, Error)]
#[error("fake store: {0}")]
pub struct FakeError(pub String);

/// A sheet held in memory that records every cell write.
#[derive(Default)]
pub struct FakeStore {
  table:       Mutex<Table>,
  writes:      Mutex<Vec<(u32, u32, String)>>,
  fail_rows:   Mutex<HashSet<u32>>,
  fail_cols:   Mutex<HashSet<u32>>,
  unavailable: AtomicBool,
}

impl FakeStore {
  pub fn with(table: Table) -> Self {
    Self {
      table: Mutex::new(table),
      ..Default::default()
    }
  }

  pub fn table(&self) -> Table { self.table.lock().unwrap().clone() }

  pub fn writes(&self) -> Vec<(u32, u32, String)> {
    self.writes.lock().unwrap().clone()
  }

  pub fn clear_writes(&self) { self.writes.lock().unwrap().clear(); }

  /// Make every `update_cell` on sheet row `row` fail.
  pub fn fail_row(&self, row: u32) { self.fail_rows.lock().unwrap().insert(row); }

  /// Make every `update_cell` on sheet column `col` fail.
  pub fn fail_col(&self, col: u32) { self.fail_cols.lock().unwrap().insert(col); }

  /// Make every call fail.
  pub fn go_offline(&self) { self.unavailable.store(true, Ordering::SeqCst); }

  fn check_online(&self) -> Result<(), FakeError> {
    if self.unavailable.load(Ordering::SeqCst) {
      Err(FakeError("offline".into()))
    } else {
      Ok(())
    }
  }
}

impl RowStore for FakeStore {
  type Error = FakeError;

  async fn get_all_records(&self) -> Result<Table, FakeError> {
    self.check_online()?;
    Ok(self.table())
  }

  async fn append_row(&self, values: Vec<String>) -> Result<(), FakeError> {
    self.check_online()?;
    self.table.lock().unwrap().rows.push(values);
    Ok(())
  }

  async fn update_cell(&self, row: u32, col: u32, value: String) -> Result<(), FakeError> {
    self.check_online()?;
    if self.fail_rows.lock().unwrap().contains(&row) {
      return Err(FakeError(format!("row {row} rejected")));
    }
    if self.fail_cols.lock().unwrap().contains(&col) {
      return Err(FakeError(format!("column {col} rejected")));
    }
    self.writes.lock().unwrap().push((row, col, value.clone()));

    let mut table = self.table.lock().unwrap();
    let c = col as usize - 1;
    let target = if row == 1 {
      &mut table.columns
    } else {
      let r = row as usize - 2;
      if table.rows.len() <= r {
        table.rows.resize(r + 1, vec![]);
      }
      &mut table.rows[r]
    };
    if target.len() <= c {
      target.resize(c + 1, String::new());
    }
    target[c] = value;
    Ok(())
  }

  async fn clear_and_rewrite(
    &self,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
  ) -> Result<(), FakeError> {
    self.check_online()?;
    *self.table.lock().unwrap() = Table::new(header, rows);
    Ok(())
  }
}
