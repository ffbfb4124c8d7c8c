use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::campaignmanagement::valuesets::{
    AdGroupStatus, AdStatus, AgeRange, BudgetLimitType, CampaignStatus, DistanceUnit,
    EditorialStatus, KeywordStatus, MatchType, Network,
};

/// Bid amount. A bid without an amount tells the service to inherit the parent bid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bid {
    /// Amount in the account currency.
    pub amount: Option<Decimal>,
}

impl Bid {
    /// Bid with a fixed amount.
    pub fn new(amount: Decimal) -> Self {
        Bid {
            amount: Some(amount),
        }
    }
}

/// Campaign settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Campaign {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub status: Option<CampaignStatus>,
    pub budget_type: Option<BudgetLimitType>,
    pub daily_budget: Option<Decimal>,
    pub time_zone: Option<String>,
    pub description: Option<String>,
}

/// Ad group settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdGroup {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub status: Option<AdGroupStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub network: Option<Network>,
    pub language: Option<String>,
    pub search_bid: Option<Bid>,
}

/// Keyword with its bid and landing page settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Keyword {
    pub id: Option<i64>,
    pub text: Option<String>,
    pub match_type: Option<MatchType>,
    pub status: Option<KeywordStatus>,
    pub bid: Option<Bid>,
    pub param1: Option<String>,
    pub param2: Option<String>,
    pub param3: Option<String>,
    pub destination_url: Option<String>,
    pub final_urls: Option<Vec<String>>,
    pub editorial_status: Option<EditorialStatus>,
}

/// Text ad.
///
/// `destination_url` follows the bulk clear semantics: `Some("")` is written
/// as an explicit delete, `None` leaves the service value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextAd {
    pub id: Option<i64>,
    pub status: Option<AdStatus>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub display_url: Option<String>,
    pub destination_url: Option<String>,
    pub final_urls: Option<Vec<String>>,
    pub final_mobile_urls: Option<Vec<String>>,
    pub editorial_status: Option<EditorialStatus>,
}

/// Negative keyword attached to a campaign or an ad group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NegativeKeyword {
    pub id: Option<i64>,
    pub text: Option<String>,
    pub match_type: Option<MatchType>,
}

/// Bid adjustment for one age bracket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgeTargetBid {
    pub age: Option<AgeRange>,
    pub bid_adjustment: Option<i32>,
}

/// Radius around a point, in the unit the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    Miles(u32),
    Kilometers(u32),
}

impl Distance {
    /// Build a distance from a unit and magnitude.
    pub fn new(unit: DistanceUnit, value: u32) -> Self {
        match unit {
            DistanceUnit::Miles => Distance::Miles(value),
            DistanceUnit::Kilometers => Distance::Kilometers(value),
        }
    }

    pub fn unit(&self) -> DistanceUnit {
        match self {
            Distance::Miles(_) => DistanceUnit::Miles,
            Distance::Kilometers(_) => DistanceUnit::Kilometers,
        }
    }

    pub fn value(&self) -> u32 {
        match self {
            Distance::Miles(value) | Distance::Kilometers(value) => *value,
        }
    }
}

/// Bid adjustment for a radius around a coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RadiusTargetBid {
    pub name: Option<String>,
    pub radius: Option<Distance>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub bid_adjustment: Option<i32>,
}
