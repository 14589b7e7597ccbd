// src/formatting/databases/render.rs
//! RFC 4180 encoding of a built table.

use super::builder::Table;
use crate::error::AppError;
use csv::{QuoteStyle, Terminator, WriterBuilder};

impl Table {
    /// Encodes the header and every row as CSV with `\n` line endings.
    ///
    /// Fields containing a comma, quote, or line break are quoted with
    /// inner quotes doubled.
    pub fn render_csv(&self) -> Result<String, AppError> {
        if self.columns.is_empty() {
            return Ok("\n".to_string());
        }

        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .quote_style(QuoteStyle::Necessary)
            .from_writer(Vec::new());

        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        let bytes = writer.into_inner().map_err(|err| {
            AppError::Io(std::io::Error::new(err.error().kind(), err.to_string()))
        })?;

        String::from_utf8(bytes).map_err(|err| {
            AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
        })
    }
}
