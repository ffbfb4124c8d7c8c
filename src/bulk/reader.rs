use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::bulk::FileType;
use crate::bulk::bulkerror::BulkError;
use crate::bulk::cell::parse_optional;
use crate::bulk::columns;
use crate::bulk::entities::{
    BulkCampaignAgeTargetBid, BulkCampaignRadiusTargetBid, BulkCampaignTarget, BulkEntity,
    SingleRecordEntity, UnknownRecord,
};
use crate::bulk::row::{ColumnHeader, RowValues};
use crate::error::{Error, Result};

const BOM: char = '\u{feff}';

/// How rows are assembled into entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Gather consecutive target bid rows of one campaign into a single target entity.
    pub group_targets: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            group_targets: true,
        }
    }
}

/// Forward-only reader over the entities of a bulk file.
///
/// Rows are read one at a time. Error rows of a result file are attached to
/// the entity they follow.
pub struct BulkFileReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    header: Arc<ColumnHeader>,
    options: ReaderOptions,
    pending: Option<Result<RowValues>>,
    finished: bool,
}

impl<R: Read> std::fmt::Debug for BulkFileReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkFileReader")
            .field("options", &self.options)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl BulkFileReader<File> {
    /// Open a bulk file. The delimiter follows the file extension.
    pub fn open(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        log::debug!("Opened bulk file {}", path.display());
        BulkFileReader::new(file, FileType::from_path(path), options)
    }
}

impl<R: Read> BulkFileReader<R> {
    /// Wrap a reader positioned at the header line.
    pub fn new(inner: R, file_type: FileType, options: ReaderOptions) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(file_type.delimiter())
            .has_headers(false)
            .flexible(true)
            .from_reader(inner);

        let mut first = csv::StringRecord::new();
        if !reader.read_record(&mut first)? {
            return Err(Error::InvalidFile("bulk file has no header row".to_string()));
        }
        let header = ColumnHeader::new(
            first
                .iter()
                .enumerate()
                .map(|(i, name)| if i == 0 { name.trim_start_matches(BOM) } else { name }),
        );
        if !header.contains(columns::TYPE) {
            return Err(Error::InvalidFile(format!(
                "header has no '{}' column",
                columns::TYPE
            )));
        }

        Ok(BulkFileReader {
            records: reader.into_records(),
            header: Arc::new(header),
            options,
            pending: None,
            finished: false,
        })
    }

    /// Columns of the file, in file order.
    pub fn header(&self) -> &Arc<ColumnHeader> {
        &self.header
    }

    fn next_row(&mut self) -> Option<Result<RowValues>> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }
        if self.finished {
            return None;
        }
        match self.records.next()? {
            Ok(record) => {
                let line = record.position().map(|position| position.line());
                Some(Ok(RowValues::from_record(
                    Arc::clone(&self.header),
                    &record,
                    line,
                )))
            }
            Err(e) => {
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    self.finished = true;
                }
                Some(Err(e.into()))
            }
        }
    }

    fn assemble(&self, row: RowValues) -> BulkEntity {
        let entity = BulkEntity::from_row(row);
        if !self.options.group_targets {
            return entity;
        }
        match entity {
            BulkEntity::CampaignAgeTargetBid(bid) => {
                BulkEntity::CampaignAgeTarget(BulkCampaignTarget::from_bid(bid))
            }
            BulkEntity::CampaignRadiusTargetBid(bid) => {
                BulkEntity::CampaignRadiusTarget(BulkCampaignTarget::from_bid(bid))
            }
            other => other,
        }
    }
}

/// Fold a following row into `entity` if it belongs to it. Hands the row back otherwise.
fn absorb(entity: &mut BulkEntity, row: RowValues) -> std::result::Result<(), RowValues> {
    let (is_error, is_age_bid, is_radius_bid) = match row.record_type() {
        Some(record_type) => (
            BulkError::is_error_type(record_type),
            record_type == BulkCampaignAgeTargetBid::RECORD_TYPE,
            record_type == BulkCampaignRadiusTargetBid::RECORD_TYPE,
        ),
        None => return Err(row),
    };

    if is_error {
        entity.add_error(BulkError::from_row(&row));
        return Ok(());
    }

    let campaign_id: Option<i64> = parse_optional(row.get(columns::PARENT_ID)).ok().flatten();
    match entity {
        BulkEntity::CampaignAgeTarget(target)
            if is_age_bid && campaign_id.is_some() && campaign_id == target.campaign_id =>
        {
            target.push(BulkCampaignAgeTargetBid::from_row(row));
            Ok(())
        }
        BulkEntity::CampaignRadiusTarget(target)
            if is_radius_bid && campaign_id.is_some() && campaign_id == target.campaign_id =>
        {
            target.push(BulkCampaignRadiusTargetBid::from_row(row));
            Ok(())
        }
        _ => Err(row),
    }
}

impl<R: Read> Iterator for BulkFileReader<R> {
    type Item = Result<BulkEntity>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = loop {
            let row = match self.next_row()? {
                Ok(row) => row,
                Err(e) => return Some(Err(e)),
            };
            match row.record_type() {
                Some(columns::FORMAT_VERSION_TYPE) => {
                    log::debug!(
                        "Bulk file format version {}",
                        row.get(columns::NAME).as_raw()
                    );
                }
                Some(record_type) if BulkError::is_error_type(record_type) => {
                    log::warn!("Error row at line {:?} does not follow an entity", row.line());
                    let error = BulkError::from_row(&row);
                    return Some(Ok(BulkEntity::Unknown(UnknownRecord {
                        row,
                        errors: vec![error],
                    })));
                }
                _ => break row,
            }
        };

        let mut entity = self.assemble(row);
        while let Some(next) = self.next_row() {
            match next {
                Ok(next) => {
                    if let Err(next) = absorb(&mut entity, next) {
                        self.pending = Some(Ok(next));
                        break;
                    }
                }
                Err(e) => {
                    self.pending = Some(Err(e));
                    break;
                }
            }
        }
        Some(Ok(entity))
    }
}
