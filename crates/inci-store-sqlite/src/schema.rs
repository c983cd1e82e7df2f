//! SQL schema for the inci SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per non-blank cell. Several worksheets may share a file.
-- Writing an empty value deletes the cell.
CREATE TABLE IF NOT EXISTS cells (
    worksheet   TEXT    NOT NULL,
    row_number  INTEGER NOT NULL CHECK (row_number >= 1),  -- 1 = header
    col_number  INTEGER NOT NULL CHECK (col_number >= 1),
    value       TEXT    NOT NULL CHECK (value != ''),
    PRIMARY KEY (worksheet, row_number, col_number)
);

PRAGMA user_version = 1;
";
