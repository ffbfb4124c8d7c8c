use std::sync::Arc;

use crate::bulk::bulkerror::BulkError;
use crate::bulk::cell::CellValue;
use crate::bulk::columns;
use crate::bulk::mapping::{BulkMapping, convert_to_entity, convert_to_values};
use crate::bulk::row::{ColumnHeader, RowValues};
use crate::error::Result;

mod adgroup;
mod campaign;
mod keyword;
mod negativekeyword;
mod targets;
mod textad;

pub use adgroup::BulkAdGroup;
pub use campaign::BulkCampaign;
pub use keyword::BulkKeyword;
pub use negativekeyword::{BulkNegativeKeyword, NegativeKeywordScope};
pub use targets::{
    BulkCampaignAgeTarget, BulkCampaignAgeTargetBid, BulkCampaignRadiusTarget,
    BulkCampaignRadiusTargetBid, BulkCampaignTarget, TargetBidRecord,
};
pub use textad::BulkTextAd;

/// Per-record bookkeeping shared by every single-record entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordState {
    errors: Vec<BulkError>,
    source: Option<RowValues>,
}

/// An entity stored as exactly one bulk row.
pub trait SingleRecordEntity: Default + Sized + 'static {
    /// Name used in validation messages.
    const ENTITY_NAME: &'static str;

    /// `Type` column value written for this entity.
    fn record_type(&self) -> &'static str;

    /// Column mappings, applied in order.
    fn mappings() -> &'static [BulkMapping<Self>];

    fn state(&self) -> &RecordState;

    fn state_mut(&mut self) -> &mut RecordState;

    /// Hook run before the mappings when reading a row of `record_type`.
    fn prepare_read(&mut self, _record_type: &str) {}

    /// Check the entity carries what the service needs to locate it.
    fn validate_for_write(&self) -> Result<()> {
        Ok(())
    }

    /// Errors attached while reading or by the service.
    fn errors(&self) -> &[BulkError] {
        &self.state().errors
    }

    fn has_errors(&self) -> bool {
        !self.state().errors.is_empty()
    }

    fn add_error(&mut self, error: BulkError) {
        self.state_mut().errors.push(error);
    }

    /// Row this entity was read from, if any.
    fn source_row(&self) -> Option<&RowValues> {
        self.state().source.as_ref()
    }

    /// Build the entity from a row. Unparsable columns become parse errors on the entity.
    fn from_row(row: RowValues) -> Self {
        let mut entity = Self::default();
        if let Some(record_type) = row.record_type() {
            entity.prepare_read(record_type);
        }
        let line = row.line();
        let failures = convert_to_entity(&row, Self::mappings(), &mut entity);
        let state = entity.state_mut();
        state
            .errors
            .extend(failures.into_iter().map(|failure| BulkError::from_mapping(failure, line)));
        state.source = Some(row);
        entity
    }

    /// Serialize onto `header`. Columns of the source row without a mapping are carried over.
    fn to_row(&self, header: &Arc<ColumnHeader>) -> Result<RowValues> {
        self.validate_for_write()?;
        let mut row = match self.source_row() {
            Some(source) => source.with_header(Arc::clone(header)),
            None => RowValues::new(Arc::clone(header)),
        };
        row.set(columns::TYPE, CellValue::from(self.record_type()))?;
        convert_to_values(self, Self::mappings(), &mut row)?;
        Ok(row)
    }
}

/// A row whose type has no mapping table. Written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownRecord {
    pub row: RowValues,
    pub errors: Vec<BulkError>,
}

/// Any entity that can appear in a bulk file.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkEntity {
    Campaign(BulkCampaign),
    AdGroup(BulkAdGroup),
    Keyword(BulkKeyword),
    TextAd(BulkTextAd),
    NegativeKeyword(BulkNegativeKeyword),
    CampaignAgeTargetBid(BulkCampaignAgeTargetBid),
    CampaignRadiusTargetBid(BulkCampaignRadiusTargetBid),
    CampaignAgeTarget(BulkCampaignAgeTarget),
    CampaignRadiusTarget(BulkCampaignRadiusTarget),
    Unknown(UnknownRecord),
}

impl BulkEntity {
    /// Decode a row according to its `Type` column.
    pub fn from_row(row: RowValues) -> BulkEntity {
        match row.record_type() {
            Some(BulkCampaign::RECORD_TYPE) => BulkEntity::Campaign(BulkCampaign::from_row(row)),
            Some(BulkAdGroup::RECORD_TYPE) => BulkEntity::AdGroup(BulkAdGroup::from_row(row)),
            Some(BulkKeyword::RECORD_TYPE) => BulkEntity::Keyword(BulkKeyword::from_row(row)),
            Some(BulkTextAd::RECORD_TYPE) => BulkEntity::TextAd(BulkTextAd::from_row(row)),
            Some(record_type) if NegativeKeywordScope::from_record_type(record_type).is_some() => {
                BulkEntity::NegativeKeyword(BulkNegativeKeyword::from_row(row))
            }
            Some(BulkCampaignAgeTargetBid::RECORD_TYPE) => {
                BulkEntity::CampaignAgeTargetBid(BulkCampaignAgeTargetBid::from_row(row))
            }
            Some(BulkCampaignRadiusTargetBid::RECORD_TYPE) => {
                BulkEntity::CampaignRadiusTargetBid(BulkCampaignRadiusTargetBid::from_row(row))
            }
            _ => BulkEntity::Unknown(UnknownRecord {
                row,
                errors: vec![],
            }),
        }
    }

    /// Rows for this entity, in write order. Multi-record entities may yield none.
    pub fn to_rows(&self, header: &Arc<ColumnHeader>) -> Result<Vec<RowValues>> {
        match self {
            BulkEntity::Campaign(entity) => Ok(vec![entity.to_row(header)?]),
            BulkEntity::AdGroup(entity) => Ok(vec![entity.to_row(header)?]),
            BulkEntity::Keyword(entity) => Ok(vec![entity.to_row(header)?]),
            BulkEntity::TextAd(entity) => Ok(vec![entity.to_row(header)?]),
            BulkEntity::NegativeKeyword(entity) => Ok(vec![entity.to_row(header)?]),
            BulkEntity::CampaignAgeTargetBid(entity) => Ok(vec![entity.to_row(header)?]),
            BulkEntity::CampaignRadiusTargetBid(entity) => Ok(vec![entity.to_row(header)?]),
            BulkEntity::CampaignAgeTarget(target) => target.to_rows(header),
            BulkEntity::CampaignRadiusTarget(target) => target.to_rows(header),
            BulkEntity::Unknown(record) => Ok(vec![record.row.with_header(Arc::clone(header))]),
        }
    }

    /// `Type` value of the entity's rows.
    pub fn record_type(&self) -> &str {
        match self {
            BulkEntity::Campaign(entity) => entity.record_type(),
            BulkEntity::AdGroup(entity) => entity.record_type(),
            BulkEntity::Keyword(entity) => entity.record_type(),
            BulkEntity::TextAd(entity) => entity.record_type(),
            BulkEntity::NegativeKeyword(entity) => entity.record_type(),
            BulkEntity::CampaignAgeTargetBid(entity) => entity.record_type(),
            BulkEntity::CampaignRadiusTargetBid(entity) => entity.record_type(),
            BulkEntity::CampaignAgeTarget(_) => BulkCampaignAgeTargetBid::RECORD_TYPE,
            BulkEntity::CampaignRadiusTarget(_) => BulkCampaignRadiusTargetBid::RECORD_TYPE,
            BulkEntity::Unknown(record) => record.row.record_type().unwrap_or_default(),
        }
    }

    /// Every error attached to the entity (all bids of a multi-record entity).
    pub fn errors(&self) -> Vec<&BulkError> {
        match self {
            BulkEntity::Campaign(entity) => entity.errors().iter().collect(),
            BulkEntity::AdGroup(entity) => entity.errors().iter().collect(),
            BulkEntity::Keyword(entity) => entity.errors().iter().collect(),
            BulkEntity::TextAd(entity) => entity.errors().iter().collect(),
            BulkEntity::NegativeKeyword(entity) => entity.errors().iter().collect(),
            BulkEntity::CampaignAgeTargetBid(entity) => entity.errors().iter().collect(),
            BulkEntity::CampaignRadiusTargetBid(entity) => entity.errors().iter().collect(),
            BulkEntity::CampaignAgeTarget(target) => target.errors().collect(),
            BulkEntity::CampaignRadiusTarget(target) => target.errors().collect(),
            BulkEntity::Unknown(record) => record.errors.iter().collect(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// Attach an error row that followed this entity in a result file.
    pub fn add_error(&mut self, error: BulkError) {
        match self {
            BulkEntity::Campaign(entity) => entity.add_error(error),
            BulkEntity::AdGroup(entity) => entity.add_error(error),
            BulkEntity::Keyword(entity) => entity.add_error(error),
            BulkEntity::TextAd(entity) => entity.add_error(error),
            BulkEntity::NegativeKeyword(entity) => entity.add_error(error),
            BulkEntity::CampaignAgeTargetBid(entity) => entity.add_error(error),
            BulkEntity::CampaignRadiusTargetBid(entity) => entity.add_error(error),
            BulkEntity::CampaignAgeTarget(target) => target.add_error(error),
            BulkEntity::CampaignRadiusTarget(target) => target.add_error(error),
            BulkEntity::Unknown(record) => record.errors.push(error),
        }
    }
}

macro_rules! impl_from_entity {
    ($($variant:ident => $entity:ty),+ $(,)?) => {
        $(
            impl From<$entity> for BulkEntity {
                fn from(entity: $entity) -> Self {
                    BulkEntity::$variant(entity)
                }
            }
        )+
    };
}

impl_from_entity! {
    Campaign => BulkCampaign,
    AdGroup => BulkAdGroup,
    Keyword => BulkKeyword,
    TextAd => BulkTextAd,
    NegativeKeyword => BulkNegativeKeyword,
    CampaignAgeTargetBid => BulkCampaignAgeTargetBid,
    CampaignRadiusTargetBid => BulkCampaignRadiusTargetBid,
    CampaignAgeTarget => BulkCampaignAgeTarget,
    CampaignRadiusTarget => BulkCampaignRadiusTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_type_column() {
        let row = RowValues::from_pairs([
            (columns::TYPE, "Keyword".into()),
            (columns::KEYWORD, "running shoes".into()),
        ]);
        let entity = BulkEntity::from_row(row);
        assert!(matches!(entity, BulkEntity::Keyword(_)));
        assert_eq!(entity.record_type(), "Keyword");
    }

    #[test]
    fn unknown_types_round_trip_unchanged() {
        let header = ColumnHeader::standard();
        let mut row = RowValues::new(Arc::clone(&header));
        row.set(columns::TYPE, "Account".into()).unwrap();
        row.set(columns::ID, "149".into()).unwrap();
        row.set(columns::NAME, "My Account".into()).unwrap();

        let entity = BulkEntity::from_row(row.clone());
        assert!(matches!(entity, BulkEntity::Unknown(_)));
        assert_eq!(entity.to_rows(&header).unwrap(), vec![row]);
    }

    #[test]
    fn every_mapping_column_is_a_known_column() {
        let header = ColumnHeader::standard();
        let check = |columns: Vec<&'static str>| {
            for column in columns {
                assert!(header.contains(column), "{column} missing from format");
            }
        };
        check(BulkCampaign::mappings().iter().map(|m| m.column_name()).collect());
        check(BulkAdGroup::mappings().iter().map(|m| m.column_name()).collect());
        check(BulkKeyword::mappings().iter().map(|m| m.column_name()).collect());
        check(BulkTextAd::mappings().iter().map(|m| m.column_name()).collect());
        check(BulkNegativeKeyword::mappings().iter().map(|m| m.column_name()).collect());
        check(BulkCampaignAgeTargetBid::mappings().iter().map(|m| m.column_name()).collect());
        check(BulkCampaignRadiusTargetBid::mappings().iter().map(|m| m.column_name()).collect());
    }
}
