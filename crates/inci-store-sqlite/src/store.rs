//! [`SqliteSheetStore`], the SQLite implementation of [`RowStore`].

use std::path::Path;

use inci_core::{store::RowStore, table::Table};
use rusqlite::OptionalExtension as _;
use tracing::debug;

use crate::{
  Error, Result,
  encode::{RawCell, assemble_table, row_cells},
  schema::SCHEMA,
};

const UPSERT_CELL: &str = "
  INSERT INTO cells (worksheet, row_number, col_number, value)
  VALUES (?1, ?2, ?3, ?4)
  ON CONFLICT (worksheet, row_number, col_number)
  DO UPDATE SET value = excluded.value";

const DELETE_CELL: &str = "
  DELETE FROM cells
  WHERE worksheet = ?1 AND row_number = ?2 AND col_number = ?3";

// ─── Store ───────────────────────────────────────────────────────────────────

/// One worksheet stored in a SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteSheetStore {
  conn:      tokio_rusqlite::Connection,
  worksheet: String,
}

impl SqliteSheetStore {
  /// Open (or create) the store at `path` and address `worksheet` in it.
  pub async fn open(
    path: impl AsRef<Path>,
    worksheet: impl Into<String>,
  ) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self {
      conn,
      worksheet: worksheet.into(),
    };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store. Useful for testing.
  pub async fn open_in_memory(worksheet: impl Into<String>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self {
      conn,
      worksheet: worksheet.into(),
    };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub fn worksheet(&self) -> &str { &self.worksheet }

  /// Another worksheet in the same file, sharing this connection.
  pub fn with_worksheet(&self, worksheet: impl Into<String>) -> Self {
    Self {
      conn:      self.conn.clone(),
      worksheet: worksheet.into(),
    }
  }

  /// Write `header` into row 1 unless the worksheet already has a header.
  ///
  /// Returns whether the header was written.
  pub async fn ensure_header(&self, header: &[String]) -> Result<bool> {
    let ws = self.worksheet.clone();
    let header = header.to_vec();

    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let present: bool = tx
          .query_row(
            "SELECT 1 FROM cells WHERE worksheet = ?1 AND row_number = 1 LIMIT 1",
            rusqlite::params![ws],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if present {
          return Ok(false);
        }
        {
          let mut stmt = tx.prepare(UPSERT_CELL)?;
          for (col, value) in row_cells(&header) {
            stmt.execute(rusqlite::params![ws, 1_i64, col, value])?;
          }
        }
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if written {
      debug!(worksheet = %self.worksheet, "initialised worksheet header");
    }
    Ok(written)
  }
}

// ─── RowStore impl ───────────────────────────────────────────────────────────

impl RowStore for SqliteSheetStore {
  type Error = Error;

  async fn get_all_records(&self) -> Result<Table> {
    let ws = self.worksheet.clone();

    let cells: Vec<RawCell> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT row_number, col_number, value
           FROM cells
           WHERE worksheet = ?1
           ORDER BY row_number, col_number",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![ws], |row| {
            Ok(RawCell {
              row:   row.get(0)?,
              col:   row.get(1)?,
              value: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(assemble_table(cells))
  }

  async fn append_row(&self, values: Vec<String>) -> Result<()> {
    let ws = self.worksheet.clone();

    let row = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let last: i64 = tx.query_row(
          "SELECT COALESCE(MAX(row_number), 1) FROM cells WHERE worksheet = ?1",
          rusqlite::params![ws],
          |r| r.get(0),
        )?;
        let row = last + 1;
        {
          let mut stmt = tx.prepare(UPSERT_CELL)?;
          for (col, value) in row_cells(&values) {
            stmt.execute(rusqlite::params![ws, row, col, value])?;
          }
        }
        tx.commit()?;
        Ok(row)
      })
      .await?;

    debug!(worksheet = %self.worksheet, row, "appended row");
    Ok(())
  }

  async fn update_cell(&self, row: u32, col: u32, value: String) -> Result<()> {
    if row == 0 || col == 0 {
      return Err(Error::InvalidCell { row, col });
    }
    let ws = self.worksheet.clone();

    self
      .conn
      .call(move |conn| {
        if value.is_empty() {
          conn.execute(DELETE_CELL, rusqlite::params![ws, row, col])?;
        } else {
          conn.execute(UPSERT_CELL, rusqlite::params![ws, row, col, value])?;
        }
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear_and_rewrite(
    &self,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
  ) -> Result<()> {
    let ws = self.worksheet.clone();
    let row_count = rows.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM cells WHERE worksheet = ?1",
          rusqlite::params![ws],
        )?;
        {
          let mut stmt = tx.prepare(UPSERT_CELL)?;
          for (col, value) in row_cells(&header) {
            stmt.execute(rusqlite::params![ws, 1_i64, col, value])?;
          }
          for (i, values) in rows.iter().enumerate() {
            let row = i as i64 + 2;
            for (col, value) in row_cells(values) {
              stmt.execute(rusqlite::params![ws, row, col, value])?;
            }
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    debug!(worksheet = %self.worksheet, rows = row_count, "rewrote worksheet");
    Ok(())
  }
}
