//! Integration tests for `SqliteSheetStore` against an in-memory database.

use chrono::{NaiveDate, NaiveDateTime};
use inci_core::{
  reconcile::{self, RowKey},
  schema::Schema,
  store::RowStore,
  table::Table,
  ticket::{NewTicket, create_ticket},
};

use crate::{Error, SqliteSheetStore};

async fn store() -> SqliteSheetStore {
  SqliteSheetStore::open_in_memory("Incidencias")
    .await
    .expect("in-memory store")
}

fn header(cols: &[&str]) -> Vec<String> {
  cols.iter().map(|c| c.to_string()).collect()
}

fn now() -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2024, 6, 1)
    .unwrap()
    .and_hms_opt(12, 0, 0)
    .unwrap()
}

// ─── Header ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_worksheet_reads_empty() {
  let s = store().await;
  assert_eq!(s.get_all_records().await.unwrap(), Table::default());
}

#[tokio::test]
async fn ensure_header_writes_once() {
  let s = store().await;
  assert!(s.ensure_header(&header(&["A", "B"])).await.unwrap());
  assert!(!s.ensure_header(&header(&["X"])).await.unwrap());

  let t = s.get_all_records().await.unwrap();
  assert_eq!(t.columns, vec!["A", "B"]);
  assert!(t.is_empty());
}

// ─── Rows ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_lands_after_last_row() {
  let s = store().await;
  s.ensure_header(&header(&["A", "B", "C"])).await.unwrap();
  s.append_row(header(&["1", "", "3"])).await.unwrap();
  s.append_row(header(&["4", "5"])).await.unwrap();

  let t = s.get_all_records().await.unwrap();
  assert_eq!(t.rows, vec![vec!["1", "", "3"], vec!["4", "5", ""]]);
}

#[tokio::test]
async fn values_beyond_header_are_not_returned() {
  let s = store().await;
  s.ensure_header(&header(&["A"])).await.unwrap();
  s.append_row(header(&["1", "extra"])).await.unwrap();

  let t = s.get_all_records().await.unwrap();
  assert_eq!(t.rows, vec![vec!["1"]]);
}

#[tokio::test]
async fn update_cell_overwrites_and_blanks() {
  let s = store().await;
  s.ensure_header(&header(&["A", "B"])).await.unwrap();
  s.append_row(header(&["1", "2"])).await.unwrap();
  s.append_row(header(&["3", "4"])).await.unwrap();

  s.update_cell(2, 2, "two".into()).await.unwrap();
  s.update_cell(3, 1, String::new()).await.unwrap();

  let t = s.get_all_records().await.unwrap();
  assert_eq!(t.rows, vec![vec!["1", "two"], vec!["", "4"]]);
}

#[tokio::test]
async fn update_cell_rejects_zero_address() {
  let s = store().await;
  let err = s.update_cell(0, 1, "x".into()).await.unwrap_err();
  assert!(matches!(err, Error::InvalidCell { row: 0, col: 1 }));
}

#[tokio::test]
async fn trailing_blank_rows_are_dropped() {
  let s = store().await;
  s.ensure_header(&header(&["A"])).await.unwrap();
  s.append_row(header(&["1"])).await.unwrap();
  s.append_row(header(&["2"])).await.unwrap();
  s.update_cell(3, 1, String::new()).await.unwrap();

  assert_eq!(s.get_all_records().await.unwrap().len(), 1);
}

#[tokio::test]
async fn clear_and_rewrite_replaces_everything() {
  let s = store().await;
  s.ensure_header(&header(&["A", "B"])).await.unwrap();
  s.append_row(header(&["1", "2"])).await.unwrap();
  s.append_row(header(&["3", "4"])).await.unwrap();

  s.clear_and_rewrite(header(&["X"]), vec![header(&["9"])])
    .await
    .unwrap();

  let t = s.get_all_records().await.unwrap();
  assert_eq!(t, Table::from_strs(&["X"], &[&["9"]]));
}

#[tokio::test]
async fn padded_header_names_read_trimmed() {
  let s = store().await;
  s.ensure_header(&header(&["Código", "Estado ", "  Fecha de resolución"]))
    .await
    .unwrap();
  s.append_row(header(&["INCI0001", "Abierta"])).await.unwrap();

  let original = s.get_all_records().await.unwrap();
  assert_eq!(original.columns, vec!["Código", "Estado", "Fecha de resolución"]);

  let mut edited = original.clone();
  edited.rows[0][1] = "Resuelta".into();
  let report = reconcile::reconcile(&s, &Schema::default(), &original, &edited, now())
    .await
    .unwrap();
  assert_eq!(report.cells_updated, 2);

  let after = s.get_all_records().await.unwrap();
  assert_eq!(after.cell(0, 1), "Resuelta");
  assert_eq!(after.cell(0, 2), "01/06/2024 12:00:00");
}

#[tokio::test]
async fn worksheets_are_isolated() {
  let a = store().await;
  let b = a.with_worksheet("Archivo");
  a.ensure_header(&header(&["A"])).await.unwrap();
  b.ensure_header(&header(&["B"])).await.unwrap();
  b.append_row(header(&["b1"])).await.unwrap();

  assert!(a.get_all_records().await.unwrap().is_empty());
  assert_eq!(b.get_all_records().await.unwrap().columns, vec!["B"]);
}

// ─── Through the core ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_edit_and_resolve() {
  let s = store().await;
  let schema = Schema::default();
  s.ensure_header(&schema.default_header()).await.unwrap();

  for locator in ["L1", "L2"] {
    let input = NewTicket {
      locator: locator.into(),
      priority: "Media".into(),
      ..Default::default()
    };
    create_ticket(&s, &schema, input, now()).await.unwrap();
  }

  let original = s.get_all_records().await.unwrap();
  let state = original.column_index(&schema.state).unwrap();
  let resolved = original.column_index(&schema.resolved_at).unwrap();
  let mut edited = original.clone();
  edited.rows[1][state] = "Resuelta".into();

  let changes = reconcile::diff(&original, &edited, &schema);
  assert_eq!(changes.len(), 1);
  assert_eq!(changes[0].row_key, RowKey::Code("INCI0002".into()));

  let report = reconcile::apply(&s, &schema, &changes, now()).await.unwrap();
  assert_eq!(report.cells_updated, 2);

  let after = s.get_all_records().await.unwrap();
  assert_eq!(after.cell(1, state), "Resuelta");
  assert_eq!(after.cell(1, resolved), "01/06/2024 12:00:00");
  assert_eq!(after.cell(0, resolved), "");

  // Saving the same grid again writes nothing.
  let again = reconcile::reconcile(&s, &schema, &after, &after, now())
    .await
    .unwrap();
  assert_eq!(again.cells_updated, 0);
}
