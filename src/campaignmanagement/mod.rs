/// Campaign, ad group, ad, keyword and target objects.
pub mod objects;
/// Enumerated value sets shared by the objects and the bulk columns.
pub mod valuesets;

pub use objects::{
    AdGroup, AgeTargetBid, Bid, Campaign, Distance, Keyword, NegativeKeyword, RadiusTargetBid,
    TextAd,
};
pub use valuesets::{
    AdGroupStatus, AdStatus, AgeRange, BudgetLimitType, CampaignStatus, DistanceUnit,
    EditorialStatus, KeywordStatus, MatchType, Network, Status,
};

/// A string did not name any member of a value set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {type_name}")]
pub struct UnknownValue {
    /// Value set that rejected the string.
    pub type_name: &'static str,
    /// Rejected input.
    pub value: String,
}
