use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::bulk::FileType;
use crate::bulk::cell::CellValue;
use crate::bulk::columns;
use crate::bulk::entities::BulkEntity;
use crate::bulk::row::{ColumnHeader, RowValues};
use crate::error::{Error, Result};

/// Writes entities as an upload file in the current format version.
pub struct BulkFileWriter<W: Write> {
    writer: csv::Writer<W>,
    header: Arc<ColumnHeader>,
    rows_written: usize,
}

impl BulkFileWriter<File> {
    /// Create (or truncate) a bulk file. The delimiter follows the file extension.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        log::debug!("Writing bulk file {}", path.display());
        BulkFileWriter::new(file, FileType::from_path(path))
    }
}

impl<W: Write> BulkFileWriter<W> {
    /// Write the header and the format version row to `inner`.
    pub fn new(inner: W, file_type: FileType) -> Result<Self> {
        let header = ColumnHeader::standard();
        let mut writer = csv::WriterBuilder::new()
            .delimiter(file_type.delimiter())
            .from_writer(inner);
        writer.write_record(header.names())?;

        let mut version = RowValues::new(Arc::clone(&header));
        version.set(columns::TYPE, CellValue::from(columns::FORMAT_VERSION_TYPE))?;
        version.set(columns::NAME, CellValue::from(columns::FORMAT_VERSION))?;
        writer.write_record(version.raw_cells())?;

        Ok(BulkFileWriter {
            writer,
            header,
            rows_written: 0,
        })
    }

    /// Append every row of `entity`.
    pub fn write_entity(&mut self, entity: &BulkEntity) -> Result<()> {
        for row in entity.to_rows(&self.header)? {
            self.writer.write_record(row.raw_cells())?;
            self.rows_written += 1;
        }
        Ok(())
    }

    pub fn write_entities<'a, I>(&mut self, entities: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a BulkEntity>,
    {
        for entity in entities {
            self.write_entity(entity)?;
        }
        Ok(())
    }

    /// Entity rows written so far, not counting the header and version rows.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying writer.
    pub fn close(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}
