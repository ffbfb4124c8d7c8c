use crate::bulk::cell::{
    CellValue, parse_bid, parse_date, parse_optional, parse_text, to_bid_cell, to_cell,
    to_date_cell, to_plain_text,
};
use crate::bulk::columns;
use crate::bulk::entities::{RecordState, SingleRecordEntity};
use crate::bulk::mapping::BulkMapping;
use crate::campaignmanagement::AdGroup;
use crate::error::{Error, Result};

/// An ad group row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkAdGroup {
    /// Campaign that owns the ad group (`Parent Id`).
    pub campaign_id: Option<i64>,
    /// Read-only in upload files.
    pub campaign_name: Option<String>,
    pub client_id: Option<String>,
    pub ad_group: AdGroup,
    pub(crate) state: RecordState,
}

impl BulkAdGroup {
    pub const RECORD_TYPE: &'static str = "Ad Group";
}

static MAPPINGS: &[BulkMapping<BulkAdGroup>] = &[
    BulkMapping::new(
        columns::ID,
        |c: &BulkAdGroup| to_cell(c.ad_group.id),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.ad_group.id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::STATUS,
        |c: &BulkAdGroup| to_cell(c.ad_group.status),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.ad_group.status = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARENT_ID,
        |c: &BulkAdGroup| to_cell(c.campaign_id),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.campaign_id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CAMPAIGN,
        |c: &BulkAdGroup| to_plain_text(c.campaign_name.as_deref()),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.campaign_name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::AD_GROUP,
        |c: &BulkAdGroup| to_plain_text(c.ad_group.name.as_deref()),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.ad_group.name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::START_DATE,
        |c: &BulkAdGroup| to_date_cell(c.ad_group.start_date),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.ad_group.start_date = parse_date(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::END_DATE,
        |c: &BulkAdGroup| to_date_cell(c.ad_group.end_date),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.ad_group.end_date = parse_date(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::NETWORK_DISTRIBUTION,
        |c: &BulkAdGroup| to_cell(c.ad_group.network),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.ad_group.network = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::LANGUAGE,
        |c: &BulkAdGroup| to_plain_text(c.ad_group.language.as_deref()),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.ad_group.language = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::BID,
        |c: &BulkAdGroup| to_bid_cell(c.ad_group.search_bid.as_ref()),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.ad_group.search_bid = parse_bid(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CLIENT_ID,
        |c: &BulkAdGroup| to_plain_text(c.client_id.as_deref()),
        |v: &CellValue, c: &mut BulkAdGroup| {
            c.client_id = parse_text(v);
            Ok(())
        },
    ),
];

impl SingleRecordEntity for BulkAdGroup {
    const ENTITY_NAME: &'static str = "BulkAdGroup";

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
        if self.ad_group.id.is_none() && self.campaign_id.is_none() {
            return Err(Error::MissingField {
                entity: Self::ENTITY_NAME,
                field: "AdGroup.Id or CampaignId",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::bulk::row::{ColumnHeader, RowValues};
    use crate::campaignmanagement::{AdGroupStatus, Bid, Network};

    #[test]
    fn reads_dates_and_network() {
        let ad_group = BulkAdGroup::from_row(RowValues::from_pairs([
            (columns::TYPE, "Ad Group".into()),
            (columns::PARENT_ID, "200".into()),
            (columns::START_DATE, "10/15/2025".into()),
            (columns::END_DATE, CellValue::Empty),
            (columns::NETWORK_DISTRIBUTION, "OwnedAndOperatedOnly".into()),
        ]));
        assert!(!ad_group.has_errors());
        assert_eq!(ad_group.campaign_id, Some(200));
        assert_eq!(
            ad_group.ad_group.start_date,
            NaiveDate::from_ymd_opt(2025, 10, 15)
        );
        assert_eq!(ad_group.ad_group.end_date, None);
        assert_eq!(ad_group.ad_group.network, Some(Network::OwnedAndOperatedOnly));
    }

    #[test]
    fn bad_date_is_reported_without_losing_other_fields() {
        let ad_group = BulkAdGroup::from_row(RowValues::from_pairs([
            (columns::TYPE, "Ad Group".into()),
            (columns::ID, "300".into()),
            (columns::STATUS, "Paused".into()),
            (columns::START_DATE, "2025-10-15".into()),
        ]));
        assert_eq!(ad_group.ad_group.id, Some(300));
        assert_eq!(ad_group.ad_group.status, Some(AdGroupStatus::Paused));
        assert_eq!(ad_group.errors().len(), 1);
        assert_eq!(ad_group.errors()[0].column.as_deref(), Some("Start Date"));
    }

    #[test]
    fn inherited_bid_writes_delete_keyword() {
        let mut ad_group = BulkAdGroup::default();
        ad_group.ad_group.id = Some(300);
        ad_group.ad_group.search_bid = Some(Bid { amount: None });
        let row = ad_group.to_row(&ColumnHeader::standard()).unwrap();
        assert_eq!(row.get(columns::BID), &CellValue::Text("delete_value".into()));
    }
}
