//! Spreadsheet export of a ticket listing.
//!
//! Pure transformation from a [`Table`] to the bytes of an `.xlsx` workbook;
//! the store is never consulted.

pub mod error;

pub use error::{Error, Result};

use inci_core::table::Table;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};

/// Suggested download name.
pub const DEFAULT_FILE_NAME: &str = "incidencias.xlsx";

/// MIME type of the produced bytes.
pub const CONTENT_TYPE: &str =
  "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Render `table` as a single-sheet workbook.
///
/// The header row is bold and every cell is written as a string, exactly as
/// listed. Blank cells are left empty.
pub fn to_xlsx(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
  let mut workbook = Workbook::new();
  let worksheet = workbook.add_worksheet();
  worksheet.set_name(sheet_name)?;

  let bold = Format::new().set_bold();
  for (c, name) in table.columns.iter().enumerate() {
    worksheet.write_string_with_format(0, col_num(c)?, name, &bold)?;
  }

  for r in 0..table.len() {
    let row = row_num(r + 1)?;
    for c in 0..table.columns.len() {
      let value = table.cell(r, c);
      if !value.is_empty() {
        worksheet.write_string(row, col_num(c)?, value)?;
      }
    }
  }

  worksheet.autofit();
  Ok(workbook.save_to_buffer()?)
}

fn row_num(r: usize) -> Result<RowNum> {
  RowNum::try_from(r).map_err(|_| Error::TooLarge("rows"))
}

fn col_num(c: usize) -> Result<ColNum> {
  ColNum::try_from(c).map_err(|_| Error::TooLarge("columns"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn produces_a_zip_container() {
    let t = Table::from_strs(&["Código", "Estado"], &[
      &["INCI0001", "Abierta"],
      &["INCI0002"],
    ]);
    let bytes = to_xlsx(&t, "Incidencias").unwrap();
    assert!(bytes.starts_with(b"PK"), "not a zip archive");
  }

  #[test]
  fn empty_listing_still_exports() {
    let t = Table::from_strs(&["Código"], &[]);
    assert!(!to_xlsx(&t, "Incidencias").unwrap().is_empty());
  }

  #[test]
  fn invalid_sheet_name_is_an_error() {
    let t = Table::default();
    assert!(matches!(to_xlsx(&t, "bad/name"), Err(Error::Xlsx(_))));
  }
}
