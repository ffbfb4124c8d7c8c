use crate::bulk::cell::{
    CellValue, parse_bid, parse_optional, parse_text, parse_url_list, to_bid_cell, to_cell,
    to_optional_text, to_plain_text, to_url_list_cell,
};
use crate::bulk::columns;
use crate::bulk::entities::{RecordState, SingleRecordEntity};
use crate::bulk::mapping::BulkMapping;
use crate::campaignmanagement::Keyword;
use crate::error::{Error, Result};

/// A keyword row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkKeyword {
    /// Ad group that owns the keyword (`Parent Id`).
    pub ad_group_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub ad_group_name: Option<String>,
    pub client_id: Option<String>,
    pub keyword: Keyword,
    pub(crate) state: RecordState,
}

impl BulkKeyword {
    pub const RECORD_TYPE: &'static str = "Keyword";
}

static MAPPINGS: &[BulkMapping<BulkKeyword>] = &[
    BulkMapping::new(
        columns::ID,
        |c: &BulkKeyword| to_cell(c.keyword.id),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::STATUS,
        |c: &BulkKeyword| to_cell(c.keyword.status),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.status = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARENT_ID,
        |c: &BulkKeyword| to_cell(c.ad_group_id),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.ad_group_id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CAMPAIGN,
        |c: &BulkKeyword| to_plain_text(c.campaign_name.as_deref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.campaign_name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::AD_GROUP,
        |c: &BulkKeyword| to_plain_text(c.ad_group_name.as_deref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.ad_group_name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::KEYWORD,
        |c: &BulkKeyword| to_plain_text(c.keyword.text.as_deref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.text = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::MATCH_TYPE,
        |c: &BulkKeyword| to_cell(c.keyword.match_type),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.match_type = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::BID,
        |c: &BulkKeyword| to_bid_cell(c.keyword.bid.as_ref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.bid = parse_bid(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARAM1,
        |c: &BulkKeyword| to_optional_text(c.keyword.param1.as_deref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.param1 = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARAM2,
        |c: &BulkKeyword| to_optional_text(c.keyword.param2.as_deref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.param2 = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARAM3,
        |c: &BulkKeyword| to_optional_text(c.keyword.param3.as_deref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.param3 = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::DESTINATION_URL,
        |c: &BulkKeyword| to_optional_text(c.keyword.destination_url.as_deref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.destination_url = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::FINAL_URL,
        |c: &BulkKeyword| to_url_list_cell(c.keyword.final_urls.as_deref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.final_urls = parse_url_list(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::EDITORIAL_STATUS,
        |c: &BulkKeyword| to_cell(c.keyword.editorial_status),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.keyword.editorial_status = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CLIENT_ID,
        |c: &BulkKeyword| to_plain_text(c.client_id.as_deref()),
        |v: &CellValue, c: &mut BulkKeyword| {
            c.client_id = parse_text(v);
            Ok(())
        },
    ),
];

impl SingleRecordEntity for BulkKeyword {
    const ENTITY_NAME: &'static str = "BulkKeyword";

    fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
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

    fn validate_for_write(&self) -> Result<()> {
        if self.keyword.id.is_none() && self.ad_group_id.is_none() {
            return Err(Error::MissingField {
                entity: Self::ENTITY_NAME,
                field: "Keyword.Id or AdGroupId",
            });
        }
        Ok(())
    }
}
