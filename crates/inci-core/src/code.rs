//! Sequential ticket codes (`INCI0001`, `INCI0002`, ...).

use crate::table::Table;

pub const CODE_PREFIX: &str = "INCI";

/// Minimum width of the numeric suffix; larger numbers simply grow.
const CODE_WIDTH: usize = 4;

/// Derive the next ticket code from the existing records.
///
/// Values in `code_column` that don't start with [`CODE_PREFIX`], or whose
/// suffix is not an unsigned integer below `u64::MAX`, are skipped: rows
/// typed in by hand must not block allocation. A table without the column
/// yields `INCI0001`.
///
/// Pure; the caller should read `records` right before allocating to keep the
/// window for a duplicate code small.
pub fn next_code(records: &Table, code_column: &str) -> String {
  let max_seen = records
    .records()
    .filter_map(|r| r.get(code_column))
    .filter_map(parse_code)
    // A code with no successor cannot anchor the sequence.
    .filter(|n| *n < u64::MAX)
    .max()
    .unwrap_or(0);
  format_code(max_seen + 1)
}

/// The sequence number of a well-formed code.
pub fn parse_code(code: &str) -> Option<u64> {
  let suffix = code.strip_prefix(CODE_PREFIX)?;
  if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  suffix.parse().ok()
}

pub fn format_code(n: u64) -> String {
  format!("{CODE_PREFIX}{n:0width$}", width = CODE_WIDTH)
}
