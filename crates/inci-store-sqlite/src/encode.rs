//! Conversions between stored cells and [`Table`]s.

use inci_core::table::Table;

/// One non-blank cell as read from the `cells` table.
pub struct RawCell {
  pub row:   i64,
  pub col:   i64,
  pub value: String,
}

/// Assemble a sparse set of cells into a table.
///
/// The header is row 1 up to its last non-blank cell, with each name
/// trimmed of surrounding whitespace. Data rows run from
/// row 2 to the last row holding any cell, and every row is padded or cut
/// to the header width.
pub fn assemble_table(cells: Vec<RawCell>) -> Table {
  let width = cells
    .iter()
    .filter(|c| c.row == 1)
    .map(|c| c.col as usize)
    .max()
    .unwrap_or(0);
  let last_row = cells.iter().map(|c| c.row).max().unwrap_or(1).max(1);

  let mut columns = vec![String::new(); width];
  let mut rows = vec![vec![String::new(); width]; (last_row - 1) as usize];

  for cell in cells {
    let col = cell.col as usize - 1;
    if col >= width {
      continue;
    }
    if cell.row == 1 {
      columns[col] = cell.value.trim().to_owned();
    } else {
      rows[(cell.row - 2) as usize][col] = cell.value;
    }
  }

  Table::new(columns, rows)
}

/// `(col_number, value)` for each non-blank value, 1-based.
pub fn row_cells(values: &[String]) -> impl Iterator<Item = (i64, &str)> {
  values
    .iter()
    .enumerate()
    .filter(|(_, v)| !v.is_empty())
    .map(|(i, v)| (i as i64 + 1, v.as_str()))
}
