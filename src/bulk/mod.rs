use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod bulkerror;
pub mod cell;
pub mod columns;
pub mod entities;
pub mod fault;
pub mod manager;
pub mod mapping;
pub mod reader;
pub mod row;
pub mod service;
pub mod writer;

pub use bulkerror::{BulkError, BulkErrorKind};
pub use cell::CellValue;
pub use entities::*;
pub use fault::ApiFault;
pub use manager::BulkServiceManager;
pub use reader::{BulkFileReader, ReaderOptions};
pub use row::{ColumnHeader, RowValues};
pub use service::{BulkService, DownloadParameters, FileUploadParameters, RestBulkService};
pub use writer::BulkFileWriter;

/// Delimited format of a bulk file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    #[default]
    Csv,
    Tsv,
}

impl FileType {
    pub fn delimiter(self) -> u8 {
        match self {
            FileType::Csv => b',',
            FileType::Tsv => b'\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Tsv => "tsv",
        }
    }

    /// Guess from the file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> FileType {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => FileType::Tsv,
            _ => FileType::Csv,
        }
    }
}
