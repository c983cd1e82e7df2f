//! Error type for `inci-xlsx`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("xlsx error: {0}")]
  Xlsx(#[from] rust_xlsxwriter::XlsxError),

  #[error("too many {0} for a worksheet")]
  TooLarge(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
