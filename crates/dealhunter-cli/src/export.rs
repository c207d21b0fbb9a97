//! CSV sink for batch campaigns.
//!
//! The file is rewritten from scratch on every export and always starts with
//! the header row, so an exported file can be read back by column name.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use dealhunter_core::DealRecord;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row read back from an exported file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportedRow {
    #[serde(rename = "Store")]
    pub store: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Discount")]
    pub discount: String,
    #[serde(rename = "Special Price")]
    pub special_price: String,
    #[serde(rename = "Link")]
    pub link: String,
}

impl ExportedRow {
    #[must_use]
    pub fn fields(&self) -> [&str; 8] {
        [
            self.store.as_str(),
            self.category.as_str(),
            self.title.as_str(),
            self.image.as_str(),
            self.price.as_str(),
            self.discount.as_str(),
            self.special_price.as_str(),
            self.link.as_str(),
        ]
    }
}

/// Writes the header and one row per record. Returns the number of records.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if the underlying writer fails.
pub fn write_deals<W: Write>(writer: W, deals: &[DealRecord]) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(DealRecord::COLUMNS)?;
    for deal in deals {
        csv_writer.write_record(deal.row())?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(deals.len())
}

/// Truncates `path` and writes `deals` to it.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created, or
/// [`ExportError::Csv`] if writing fails.
pub fn export_csv(path: &Path, deals: &[DealRecord]) -> Result<usize, ExportError> {
    if path.exists() {
        tracing::info!(path = %path.display(), "overwriting existing export");
    }
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let written = write_deals(file, deals)?;
    tracing::info!(path = %path.display(), records = written, "export written");
    Ok(written)
}

/// Reads exported rows from any reader.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if the header is missing a column or a row
/// cannot be decoded.
pub fn read_deals<R: Read>(reader: R) -> Result<Vec<ExportedRow>, ExportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader
        .deserialize()
        .collect::<Result<Vec<ExportedRow>, csv::Error>>()?;
    Ok(rows)
}

/// # Errors
///
/// Returns [`ExportError::Io`] if `path` cannot be opened, otherwise as
/// [`read_deals`].
pub fn read_deals_csv(path: &Path) -> Result<Vec<ExportedRow>, ExportError> {
    let file = File::open(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_deals(file)
}

#[must_use]
pub fn rows_per_store(rows: &[ExportedRow]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.store.as_str()).or_insert(0) += 1;
    }
    counts
}
