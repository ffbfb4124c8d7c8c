use serde::{Deserialize, Serialize};

use crate::campaignmanagement::UnknownValue;

/// Declares a value set whose members serialize to the exact service strings.
macro_rules! value_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Service string for this member.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownValue;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err(UnknownValue {
                        type_name: stringify!($name),
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}

value_set! {
    /// Status of bulk-only records such as negative keywords and target bids.
    Status {
        Active => "Active",
        Deleted => "Deleted",
    }
}

value_set! {
    /// Campaign status.
    CampaignStatus {
        Active => "Active",
        Paused => "Paused",
        BudgetPaused => "BudgetPaused",
        BudgetAndManualPaused => "BudgetAndManualPaused",
        Deleted => "Deleted",
        Suspended => "Suspended",
    }
}

value_set! {
    /// Ad group status.
    AdGroupStatus {
        Draft => "Draft",
        Active => "Active",
        Paused => "Paused",
        Deleted => "Deleted",
        Expired => "Expired",
    }
}

value_set! {
    /// Keyword status.
    KeywordStatus {
        Active => "Active",
        Paused => "Paused",
        Deleted => "Deleted",
        Inactive => "Inactive",
    }
}

value_set! {
    /// Ad status.
    AdStatus {
        Inactive => "Inactive",
        Active => "Active",
        Paused => "Paused",
        Deleted => "Deleted",
    }
}

value_set! {
    /// Keyword match type.
    MatchType {
        Exact => "Exact",
        Phrase => "Phrase",
        Broad => "Broad",
        Content => "Content",
    }
}

value_set! {
    /// Editorial review outcome reported by the service.
    EditorialStatus {
        Active => "Active",
        Disapproved => "Disapproved",
        Inactive => "Inactive",
        ActiveLimited => "ActiveLimited",
    }
}

value_set! {
    /// Daily budget spending strategy.
    BudgetLimitType {
        DailyBudgetAccelerated => "DailyBudgetAccelerated",
        DailyBudgetStandard => "DailyBudgetStandard",
    }
}

value_set! {
    /// Search networks an ad group serves on.
    Network {
        OwnedAndOperatedAndSyndicatedSearch => "OwnedAndOperatedAndSyndicatedSearch",
        OwnedAndOperatedOnly => "OwnedAndOperatedOnly",
        SyndicatedSearchOnly => "SyndicatedSearchOnly",
    }
}

value_set! {
    /// Age bracket of an age target bid.
    AgeRange {
        ZeroToThirteen => "ZeroToThirteen",
        ThirteenToSeventeen => "ThirteenToSeventeen",
        EighteenToTwentyFive => "EighteenToTwentyFive",
        TwentyFiveToThirtyFive => "TwentyFiveToThirtyFive",
        ThirtyFiveToFifty => "ThirtyFiveToFifty",
        FiftyToSixtyFive => "FiftyToSixtyFive",
        SixtyFiveAndAbove => "SixtyFiveAndAbove",
    }
}

value_set! {
    /// Unit of a radius target.
    DistanceUnit {
        Miles => "Miles",
        Kilometers => "Kilometers",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_strings() {
        assert_eq!("Active".parse::<Status>(), Ok(Status::Active));
        assert_eq!("Deleted".parse::<Status>(), Ok(Status::Deleted));
        assert_eq!(
            "BudgetAndManualPaused".parse::<CampaignStatus>(),
            Ok(CampaignStatus::BudgetAndManualPaused)
        );
    }

    #[test]
    fn rejects_unknown_strings_with_type_name() {
        let err = "active".parse::<AdStatus>().unwrap_err();
        assert_eq!(err.type_name, "AdStatus");
        assert_eq!(err.value, "active");
    }

    #[test]
    fn display_matches_parse_for_every_member() {
        for status in AdStatus::ALL {
            assert_eq!(status.to_string().parse::<AdStatus>().unwrap(), *status);
        }
        for range in AgeRange::ALL {
            assert_eq!(range.as_str().parse::<AgeRange>().unwrap(), *range);
        }
    }

    #[test]
    fn serializes_to_service_strings() {
        let json = serde_json::to_string(&MatchType::Phrase).unwrap();
        assert_eq!(json, "\"Phrase\"");
    }
}
