//! Store export encoders.
//!
//! # Responsibility
//! - Encode a store snapshot to CSV or pretty JSON text.
//! - Name export files and report their media types.
//!
//! # Invariants
//! - Encoders are pure over the snapshot they are given.
//! - Writing the encoded text anywhere is the caller's concern.

pub mod csv;
pub mod json;

use crate::model::date::IsoDate;
use crate::model::store::DayStore;

const EXPORT_FILE_PREFIX: &str = "burnout_buddy";

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }

    /// Encodes `store` in this format.
    pub fn encode(self, store: &DayStore) -> Result<String, serde_json::Error> {
        match self {
            Self::Csv => Ok(csv::to_csv(store)),
            Self::Json => json::to_json(store),
        }
    }
}

/// `burnout_buddy_<YYYY-MM-DD>.<ext>` for an export made on `today`.
pub fn export_file_name(format: ExportFormat, today: IsoDate) -> String {
    format!("{EXPORT_FILE_PREFIX}_{today}.{}", format.extension())
}
