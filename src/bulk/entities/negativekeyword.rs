use crate::bulk::cell::{CellValue, parse_optional, parse_text, to_cell, to_plain_text};
use crate::bulk::columns;
use crate::bulk::entities::{RecordState, SingleRecordEntity};
use crate::bulk::mapping::BulkMapping;
use crate::campaignmanagement::{NegativeKeyword, Status};
use crate::error::{Error, Result};

/// Level a negative keyword is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NegativeKeywordScope {
    #[default]
    Campaign,
    AdGroup,
}

impl NegativeKeywordScope {
    pub fn record_type(self) -> &'static str {
        match self {
            NegativeKeywordScope::Campaign => "Campaign Negative Keyword",
            NegativeKeywordScope::AdGroup => "Ad Group Negative Keyword",
        }
    }

    pub fn from_record_type(record_type: &str) -> Option<Self> {
        match record_type {
            "Campaign Negative Keyword" => Some(NegativeKeywordScope::Campaign),
            "Ad Group Negative Keyword" => Some(NegativeKeywordScope::AdGroup),
            _ => None,
        }
    }
}

/// A campaign or ad group negative keyword row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkNegativeKeyword {
    pub scope: NegativeKeywordScope,
    pub status: Option<Status>,
    /// Campaign or ad group id, depending on `scope`.
    pub parent_id: Option<i64>,
    pub campaign_name: Option<String>,
    /// Only written for ad group scope.
    pub ad_group_name: Option<String>,
    pub negative_keyword: NegativeKeyword,
    pub(crate) state: RecordState,
}

impl BulkNegativeKeyword {
    pub fn new(scope: NegativeKeywordScope, parent_id: i64, text: &str) -> Self {
        BulkNegativeKeyword {
            scope,
            parent_id: Some(parent_id),
            negative_keyword: NegativeKeyword {
                text: Some(text.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

static MAPPINGS: &[BulkMapping<BulkNegativeKeyword>] = &[
    BulkMapping::new(
        columns::ID,
        |c: &BulkNegativeKeyword| to_cell(c.negative_keyword.id),
        |v: &CellValue, c: &mut BulkNegativeKeyword| {
            c.negative_keyword.id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::STATUS,
        |c: &BulkNegativeKeyword| to_cell(c.status),
        |v: &CellValue, c: &mut BulkNegativeKeyword| {
            c.status = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARENT_ID,
        |c: &BulkNegativeKeyword| to_cell(c.parent_id),
        |v: &CellValue, c: &mut BulkNegativeKeyword| {
            c.parent_id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CAMPAIGN,
        |c: &BulkNegativeKeyword| to_plain_text(c.campaign_name.as_deref()),
        |v: &CellValue, c: &mut BulkNegativeKeyword| {
            c.campaign_name = parse_text(v);
            Ok(())
        },
    ),
    // Depends on `scope`, which `prepare_read` sets from the row type.
    BulkMapping::new(
        columns::AD_GROUP,
        |c: &BulkNegativeKeyword| match c.scope {
            NegativeKeywordScope::AdGroup => to_plain_text(c.ad_group_name.as_deref()),
            NegativeKeywordScope::Campaign => CellValue::Absent,
        },
        |v: &CellValue, c: &mut BulkNegativeKeyword| {
            if c.scope == NegativeKeywordScope::AdGroup {
                c.ad_group_name = parse_text(v);
            }
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::KEYWORD,
        |c: &BulkNegativeKeyword| to_plain_text(c.negative_keyword.text.as_deref()),
        |v: &CellValue, c: &mut BulkNegativeKeyword| {
            c.negative_keyword.text = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::MATCH_TYPE,
        |c: &BulkNegativeKeyword| to_cell(c.negative_keyword.match_type),
        |v: &CellValue, c: &mut BulkNegativeKeyword| {
            c.negative_keyword.match_type = parse_optional(v)?;
            Ok(())
        },
    ),
];

impl SingleRecordEntity for BulkNegativeKeyword {
    const ENTITY_NAME: &'static str = "BulkNegativeKeyword";

    fn record_type(&self) -> &'static str {
        self.scope.record_type()
    }

    fn mappings() -> &'static [BulkMapping<Self>] {
        MAPPINGS
    }

    fn state(&self) -> &RecordState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RecordState {
        &mut self.state
    }

    fn prepare_read(&mut self, record_type: &str) {
        if let Some(scope) = NegativeKeywordScope::from_record_type(record_type) {
            self.scope = scope;
        }
    }

    fn validate_for_write(&self) -> Result<()> {
        if self.negative_keyword.id.is_none() && self.parent_id.is_none() {
            return Err(Error::MissingField {
                entity: Self::ENTITY_NAME,
                field: "NegativeKeyword.Id or ParentId",
            });
        }
        Ok(())
    }
}
