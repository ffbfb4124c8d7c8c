use std::sync::Arc;

use crate::bulk::bulkerror::BulkError;
use crate::bulk::cell::{CellValue, parse_optional, parse_text, to_cell, to_plain_text};
use crate::bulk::columns;
use crate::bulk::entities::{RecordState, SingleRecordEntity};
use crate::bulk::mapping::BulkMapping;
use crate::bulk::row::{ColumnHeader, RowValues};
use crate::campaignmanagement::{AgeTargetBid, Distance, DistanceUnit, RadiusTargetBid, Status};
use crate::error::{Error, Result};

/// A campaign target bid row, one of possibly many for the same campaign.
pub trait TargetBidRecord: SingleRecordEntity + Clone {
    fn campaign_id(&self) -> Option<i64>;
    fn set_campaign_id(&mut self, campaign_id: Option<i64>);
    fn campaign_name(&self) -> Option<&str>;
    fn set_campaign_name(&mut self, campaign_name: Option<String>);
}

/// Bid adjustment for one age range of a campaign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkCampaignAgeTargetBid {
    pub status: Option<Status>,
    /// Target id (`Id`).
    pub target_id: Option<i64>,
    /// Campaign that owns the target (`Parent Id`).
    pub campaign_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub age_target_bid: AgeTargetBid,
    pub(crate) state: RecordState,
}

impl BulkCampaignAgeTargetBid {
    pub const RECORD_TYPE: &'static str = "Campaign Age Target";
}

static AGE_MAPPINGS: &[BulkMapping<BulkCampaignAgeTargetBid>] = &[
    BulkMapping::new(
        columns::STATUS,
        |c: &BulkCampaignAgeTargetBid| to_cell(c.status),
        |v: &CellValue, c: &mut BulkCampaignAgeTargetBid| {
            c.status = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::ID,
        |c: &BulkCampaignAgeTargetBid| to_cell(c.target_id),
        |v: &CellValue, c: &mut BulkCampaignAgeTargetBid| {
            c.target_id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARENT_ID,
        |c: &BulkCampaignAgeTargetBid| to_cell(c.campaign_id),
        |v: &CellValue, c: &mut BulkCampaignAgeTargetBid| {
            c.campaign_id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CAMPAIGN,
        |c: &BulkCampaignAgeTargetBid| to_plain_text(c.campaign_name.as_deref()),
        |v: &CellValue, c: &mut BulkCampaignAgeTargetBid| {
            c.campaign_name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::TARGET,
        |c: &BulkCampaignAgeTargetBid| to_cell(c.age_target_bid.age),
        |v: &CellValue, c: &mut BulkCampaignAgeTargetBid| {
            c.age_target_bid.age = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::BID_ADJUSTMENT,
        |c: &BulkCampaignAgeTargetBid| to_cell(c.age_target_bid.bid_adjustment),
        |v: &CellValue, c: &mut BulkCampaignAgeTargetBid| {
            c.age_target_bid.bid_adjustment = parse_optional(v)?;
            Ok(())
        },
    ),
];

impl SingleRecordEntity for BulkCampaignAgeTargetBid {
    const ENTITY_NAME: &'static str = "BulkCampaignAgeTargetBid";

    fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    fn mappings() -> &'static [BulkMapping<Self>] {
        AGE_MAPPINGS
    }

    fn state(&self) -> &RecordState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RecordState {
        &mut self.state
    }

    fn validate_for_write(&self) -> Result<()> {
        require_campaign(Self::ENTITY_NAME, self.campaign_id)
    }
}

impl TargetBidRecord for BulkCampaignAgeTargetBid {
    fn campaign_id(&self) -> Option<i64> {
        self.campaign_id
    }

    fn set_campaign_id(&mut self, campaign_id: Option<i64>) {
        self.campaign_id = campaign_id;
    }

    fn campaign_name(&self) -> Option<&str> {
        self.campaign_name.as_deref()
    }

    fn set_campaign_name(&mut self, campaign_name: Option<String>) {
        self.campaign_name = campaign_name;
    }
}

/// Bid adjustment for a radius around a point, for one campaign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkCampaignRadiusTargetBid {
    pub status: Option<Status>,
    pub target_id: Option<i64>,
    pub campaign_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub radius_target_bid: RadiusTargetBid,
    /// `Unit` as read, consumed by the `Radius` mapping.
    unit: Option<DistanceUnit>,
    pub(crate) state: RecordState,
}

impl BulkCampaignRadiusTargetBid {
    pub const RECORD_TYPE: &'static str = "Campaign Radius Target";
}

// `Unit` must come before `Radius`: the radius is typed by its unit.
static RADIUS_MAPPINGS: &[BulkMapping<BulkCampaignRadiusTargetBid>] = &[
    BulkMapping::new(
        columns::STATUS,
        |c: &BulkCampaignRadiusTargetBid| to_cell(c.status),
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            c.status = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::ID,
        |c: &BulkCampaignRadiusTargetBid| to_cell(c.target_id),
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            c.target_id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARENT_ID,
        |c: &BulkCampaignRadiusTargetBid| to_cell(c.campaign_id),
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            c.campaign_id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CAMPAIGN,
        |c: &BulkCampaignRadiusTargetBid| to_plain_text(c.campaign_name.as_deref()),
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            c.campaign_name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::NAME,
        |c: &BulkCampaignRadiusTargetBid| to_plain_text(c.radius_target_bid.name.as_deref()),
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            c.radius_target_bid.name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::UNIT,
        |c: &BulkCampaignRadiusTargetBid| {
            to_cell(c.radius_target_bid.radius.map(|d| d.unit()).or(c.unit))
        },
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            c.unit = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::RADIUS,
        |c: &BulkCampaignRadiusTargetBid| to_cell(c.radius_target_bid.radius.map(|d| d.value())),
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            let value: Option<u32> = parse_optional(v)?;
            c.radius_target_bid.radius = match (value, c.unit) {
                (None, _) => None,
                (Some(value), Some(unit)) => Some(Distance::new(unit, value)),
                (Some(_), None) => return Err("Radius requires a Unit".to_string()),
            };
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::LATITUDE,
        |c: &BulkCampaignRadiusTargetBid| to_cell(c.radius_target_bid.latitude),
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            c.radius_target_bid.latitude = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::LONGITUDE,
        |c: &BulkCampaignRadiusTargetBid| to_cell(c.radius_target_bid.longitude),
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            c.radius_target_bid.longitude = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::BID_ADJUSTMENT,
        |c: &BulkCampaignRadiusTargetBid| to_cell(c.radius_target_bid.bid_adjustment),
        |v: &CellValue, c: &mut BulkCampaignRadiusTargetBid| {
            c.radius_target_bid.bid_adjustment = parse_optional(v)?;
            Ok(())
        },
    ),
];

impl SingleRecordEntity for BulkCampaignRadiusTargetBid {
    const ENTITY_NAME: &'static str = "BulkCampaignRadiusTargetBid";

    fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    fn mappings() -> &'static [BulkMapping<Self>] {
        RADIUS_MAPPINGS
    }

    fn state(&self) -> &RecordState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RecordState {
        &mut self.state
    }

    fn validate_for_write(&self) -> Result<()> {
        require_campaign(Self::ENTITY_NAME, self.campaign_id)
    }
}

impl TargetBidRecord for BulkCampaignRadiusTargetBid {
    fn campaign_id(&self) -> Option<i64> {
        self.campaign_id
    }

    fn set_campaign_id(&mut self, campaign_id: Option<i64>) {
        self.campaign_id = campaign_id;
    }

    fn campaign_name(&self) -> Option<&str> {
        self.campaign_name.as_deref()
    }

    fn set_campaign_name(&mut self, campaign_name: Option<String>) {
        self.campaign_name = campaign_name;
    }
}

fn require_campaign(entity: &'static str, campaign_id: Option<i64>) -> Result<()> {
    if campaign_id.is_none() {
        return Err(Error::MissingField {
            entity,
            field: "CampaignId",
        });
    }
    Ok(())
}

/// All target bids of one kind for one campaign, stored as one row per bid.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkCampaignTarget<B> {
    pub campaign_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub bids: Vec<B>,
}

pub type BulkCampaignAgeTarget = BulkCampaignTarget<BulkCampaignAgeTargetBid>;
pub type BulkCampaignRadiusTarget = BulkCampaignTarget<BulkCampaignRadiusTargetBid>;

impl<B: TargetBidRecord> BulkCampaignTarget<B> {
    pub fn new(campaign_id: i64) -> Self {
        BulkCampaignTarget {
            campaign_id: Some(campaign_id),
            campaign_name: None,
            bids: vec![],
        }
    }

    /// Start a target from its first bid row.
    pub fn from_bid(bid: B) -> Self {
        BulkCampaignTarget {
            campaign_id: bid.campaign_id(),
            campaign_name: bid.campaign_name().map(str::to_string),
            bids: vec![bid],
        }
    }

    /// True when `bid` belongs to the same campaign.
    pub fn accepts(&self, bid: &B) -> bool {
        self.campaign_id.is_some() && bid.campaign_id() == self.campaign_id
    }

    pub fn push(&mut self, bid: B) {
        self.bids.push(bid);
    }

    /// One row per bid; the target's campaign fills in bids that lack one.
    pub fn to_rows(&self, header: &Arc<ColumnHeader>) -> Result<Vec<RowValues>> {
        self.bids
            .iter()
            .map(|bid| {
                if bid.campaign_id().is_some() {
                    return bid.to_row(header);
                }
                let mut bid = bid.clone();
                bid.set_campaign_id(self.campaign_id);
                if bid.campaign_name().is_none() {
                    bid.set_campaign_name(self.campaign_name.clone());
                }
                bid.to_row(header)
            })
            .collect()
    }

    pub fn errors(&self) -> impl Iterator<Item = &BulkError> {
        self.bids.iter().flat_map(|bid| bid.errors().iter())
    }

    /// Error rows follow the bid they refer to, so they attach to the last bid.
    pub fn add_error(&mut self, error: BulkError) {
        if let Some(bid) = self.bids.last_mut() {
            bid.add_error(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaignmanagement::AgeRange;

    fn age_row(status: CellValue) -> RowValues {
        RowValues::from_pairs([
            (columns::TYPE, "Campaign Age Target".into()),
            (columns::STATUS, status),
            (columns::PARENT_ID, "200".into()),
            (columns::TARGET, "EighteenToTwentyFive".into()),
            (columns::BID_ADJUSTMENT, "20".into()),
        ])
    }

    #[test]
    fn reads_age_target_status() {
        for (cell, expected) in [
            (CellValue::from("Active"), Some(Status::Active)),
            (CellValue::from("Deleted"), Some(Status::Deleted)),
            (CellValue::Empty, None),
            (CellValue::Absent, None),
        ] {
            let bid = BulkCampaignAgeTargetBid::from_row(age_row(cell));
            assert_eq!(bid.status, expected);
            assert_eq!(bid.age_target_bid.age, Some(AgeRange::EighteenToTwentyFive));
            assert_eq!(bid.age_target_bid.bid_adjustment, Some(20));
        }
    }

    #[test]
    fn writes_radius_target_name() {
        let header = ColumnHeader::standard();
        for (name, expected) in [
            (Some("Test Campaign 1"), CellValue::Text("Test Campaign 1".into())),
            (Some(""), CellValue::Empty),
            (None, CellValue::Absent),
        ] {
            let mut bid = BulkCampaignRadiusTargetBid {
                campaign_id: Some(200),
                ..Default::default()
            };
            bid.radius_target_bid.name = name.map(str::to_string);
            let row = bid.to_row(&header).unwrap();
            assert_eq!(row.get(columns::NAME), &expected);
        }
    }

    #[test]
    fn unit_is_applied_before_radius() {
        let unit_index = RADIUS_MAPPINGS
            .iter()
            .position(|m| m.column_name() == columns::UNIT);
        let radius_index = RADIUS_MAPPINGS
            .iter()
            .position(|m| m.column_name() == columns::RADIUS);
        assert!(unit_index < radius_index);

        let bid = BulkCampaignRadiusTargetBid::from_row(RowValues::from_pairs([
            (columns::TYPE, "Campaign Radius Target".into()),
            (columns::RADIUS, "15".into()),
            (columns::UNIT, "Kilometers".into()),
            (columns::LATITUDE, "47.6062".into()),
        ]));
        assert!(!bid.has_errors());
        assert_eq!(bid.radius_target_bid.radius, Some(Distance::Kilometers(15)));
        assert_eq!(bid.radius_target_bid.latitude, Some(47.6062));
    }

    #[test]
    fn radius_without_unit_is_a_parse_error() {
        let bid = BulkCampaignRadiusTargetBid::from_row(RowValues::from_pairs([
            (columns::TYPE, "Campaign Radius Target".into()),
            (columns::UNIT, CellValue::Empty),
            (columns::RADIUS, "15".into()),
            (columns::BID_ADJUSTMENT, "10".into()),
        ]));
        assert_eq!(bid.radius_target_bid.radius, None);
        assert_eq!(bid.radius_target_bid.bid_adjustment, Some(10));
        assert_eq!(bid.errors().len(), 1);
        assert_eq!(bid.errors()[0].column.as_deref(), Some("Radius"));
    }

    #[test]
    fn radius_round_trips_through_a_row() {
        let mut bid = BulkCampaignRadiusTargetBid {
            campaign_id: Some(200),
            ..Default::default()
        };
        bid.radius_target_bid.radius = Some(Distance::Miles(5));
        let row = bid.to_row(&ColumnHeader::standard()).unwrap();
        assert_eq!(row.get(columns::UNIT), &CellValue::Text("Miles".into()));
        assert_eq!(row.get(columns::RADIUS), &CellValue::Text("5".into()));

        let copy = BulkCampaignRadiusTargetBid::from_row(row);
        assert_eq!(copy.radius_target_bid.radius, Some(Distance::Miles(5)));
    }

    #[test]
    fn unit_without_radius_is_written_back() {
        let bid = BulkCampaignRadiusTargetBid::from_row(RowValues::from_pairs([
            (columns::TYPE, "Campaign Radius Target".into()),
            (columns::PARENT_ID, "200".into()),
            (columns::UNIT, "Kilometers".into()),
            (columns::RADIUS, CellValue::Empty),
        ]));
        assert!(!bid.has_errors());
        assert_eq!(bid.radius_target_bid.radius, None);

        let row = bid.to_row(&ColumnHeader::standard()).unwrap();
        assert_eq!(row.get(columns::UNIT), &CellValue::Text("Kilometers".into()));
        assert_eq!(row.get(columns::RADIUS), &CellValue::Absent);
    }

    #[test]
    fn target_writes_one_row_per_bid_and_fills_campaign() {
        let header = ColumnHeader::standard();
        let mut target = BulkCampaignAgeTarget::new(200);
        assert!(target.to_rows(&header).unwrap().is_empty());

        for age in [AgeRange::EighteenToTwentyFive, AgeRange::SixtyFiveAndAbove] {
            let mut bid = BulkCampaignAgeTargetBid::default();
            bid.age_target_bid.age = Some(age);
            bid.age_target_bid.bid_adjustment = Some(10);
            target.push(bid);
        }

        let rows = target.to_rows(&header).unwrap();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.get(columns::PARENT_ID), &CellValue::Text("200".into()));
            assert_eq!(row.record_type(), Some("Campaign Age Target"));
        }
    }

    #[test]
    fn target_accepts_only_its_campaign() {
        let first = BulkCampaignAgeTargetBid::from_row(age_row("Active".into()));
        let target = BulkCampaignAgeTarget::from_bid(first.clone());
        assert!(target.accepts(&first));

        let mut other = first;
        other.campaign_id = Some(201);
        assert!(!target.accepts(&other));
    }
}
