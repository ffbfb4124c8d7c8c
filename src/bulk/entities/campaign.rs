use crate::bulk::cell::{CellValue, parse_optional, parse_text, to_cell, to_optional_text, to_plain_text};
use crate::bulk::columns;
use crate::bulk::entities::{RecordState, SingleRecordEntity};
use crate::bulk::mapping::BulkMapping;
use crate::campaignmanagement::Campaign;
use crate::error::{Error, Result};

/// A campaign row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkCampaign {
    /// Account that owns the campaign (`Parent Id`).
    pub account_id: Option<i64>,
    pub client_id: Option<String>,
    pub campaign: Campaign,
    pub(crate) state: RecordState,
}

impl BulkCampaign {
    pub const RECORD_TYPE: &'static str = "Campaign";
}

static MAPPINGS: &[BulkMapping<BulkCampaign>] = &[
    BulkMapping::new(
        columns::ID,
        |c: &BulkCampaign| to_cell(c.campaign.id),
        |v: &CellValue, c: &mut BulkCampaign| {
            c.campaign.id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::STATUS,
        |c: &BulkCampaign| to_cell(c.campaign.status),
        |v: &CellValue, c: &mut BulkCampaign| {
            c.campaign.status = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARENT_ID,
        |c: &BulkCampaign| to_cell(c.account_id),
        |v: &CellValue, c: &mut BulkCampaign| {
            c.account_id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CAMPAIGN,
        |c: &BulkCampaign| to_plain_text(c.campaign.name.as_deref()),
        |v: &CellValue, c: &mut BulkCampaign| {
            c.campaign.name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::BUDGET,
        |c: &BulkCampaign| to_cell(c.campaign.daily_budget),
        |v: &CellValue, c: &mut BulkCampaign| {
            c.campaign.daily_budget = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::BUDGET_TYPE,
        |c: &BulkCampaign| to_cell(c.campaign.budget_type),
        |v: &CellValue, c: &mut BulkCampaign| {
            c.campaign.budget_type = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::TIME_ZONE,
        |c: &BulkCampaign| to_plain_text(c.campaign.time_zone.as_deref()),
        |v: &CellValue, c: &mut BulkCampaign| {
            c.campaign.time_zone = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::DESCRIPTION,
        |c: &BulkCampaign| to_optional_text(c.campaign.description.as_deref()),
        |v: &CellValue, c: &mut BulkCampaign| {
            c.campaign.description = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CLIENT_ID,
        |c: &BulkCampaign| to_plain_text(c.client_id.as_deref()),
        |v: &CellValue, c: &mut BulkCampaign| {
            c.client_id = parse_text(v);
            Ok(())
        },
    ),
];

impl SingleRecordEntity for BulkCampaign {
    const ENTITY_NAME: &'static str = "BulkCampaign";

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
        if self.campaign.id.is_none() && self.campaign.name.is_none() {
            return Err(Error::MissingField {
                entity: Self::ENTITY_NAME,
                field: "Campaign.Id or Campaign.Name",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;
    use crate::bulk::row::{ColumnHeader, RowValues};
    use crate::campaignmanagement::{BudgetLimitType, CampaignStatus};

    fn read(column: &'static str, value: CellValue) -> BulkCampaign {
        BulkCampaign::from_row(RowValues::from_pairs([
            (columns::TYPE, "Campaign".into()),
            (column, value),
        ]))
    }

    #[test]
    fn reads_status_values() {
        assert_eq!(
            read(columns::STATUS, "Active".into()).campaign.status,
            Some(CampaignStatus::Active)
        );
        assert_eq!(read(columns::STATUS, CellValue::Empty).campaign.status, None);
        assert_eq!(read(columns::STATUS, CellValue::Absent).campaign.status, None);
    }

    #[test]
    fn unknown_status_becomes_parse_error() {
        let campaign = read(columns::STATUS, "Running".into());
        assert_eq!(campaign.campaign.status, None);
        assert!(campaign.has_errors());
        assert_eq!(campaign.errors()[0].column.as_deref(), Some("Status"));
    }

    #[test]
    fn writes_name_with_empty_and_absent_distinguished() {
        let header = ColumnHeader::standard();
        let mut campaign = BulkCampaign::default();
        campaign.campaign.id = Some(1);

        campaign.campaign.name = Some("Test Campaign 1".into());
        let row = campaign.to_row(&header).unwrap();
        assert_eq!(row.get(columns::CAMPAIGN), &CellValue::Text("Test Campaign 1".into()));

        campaign.campaign.name = Some(String::new());
        let row = campaign.to_row(&header).unwrap();
        assert_eq!(row.get(columns::CAMPAIGN), &CellValue::Empty);

        campaign.campaign.name = None;
        let row = campaign.to_row(&header).unwrap();
        assert_eq!(row.get(columns::CAMPAIGN), &CellValue::Absent);
    }

    #[test]
    fn budget_round_trips() {
        let header = ColumnHeader::standard();
        let mut campaign = BulkCampaign::default();
        campaign.campaign.name = Some("Spring".into());
        campaign.campaign.daily_budget = Some(Decimal::from_str("25.50").unwrap());
        campaign.campaign.budget_type = Some(BudgetLimitType::DailyBudgetStandard);

        let copy = BulkCampaign::from_row(campaign.to_row(&header).unwrap());
        assert_eq!(copy.campaign, campaign.campaign);
        assert!(!copy.has_errors());
    }

    #[test]
    fn unidentifiable_campaign_is_rejected() {
        let err = BulkCampaign::default()
            .to_row(&ColumnHeader::standard())
            .unwrap_err();
        assert!(matches!(err, Error::MissingField { entity: "BulkCampaign", .. }));
    }
}
