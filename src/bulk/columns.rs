//! Column names of the bulk file format, version 6.0.

/// Format version written to and expected from bulk files.
pub const FORMAT_VERSION: &str = "6.0";

/// `Type` value of the row that carries the format version in its `Name` column.
pub const FORMAT_VERSION_TYPE: &str = "Format Version";

pub const TYPE: &str = "Type";
pub const STATUS: &str = "Status";
pub const ID: &str = "Id";
pub const PARENT_ID: &str = "Parent Id";
pub const CLIENT_ID: &str = "Client Id";
pub const MODIFIED_TIME: &str = "Modified Time";
pub const CAMPAIGN: &str = "Campaign";
pub const AD_GROUP: &str = "Ad Group";
pub const NAME: &str = "Name";
pub const DESCRIPTION: &str = "Description";
pub const TIME_ZONE: &str = "Time Zone";
pub const BUDGET: &str = "Budget";
pub const BUDGET_TYPE: &str = "Budget Type";
pub const START_DATE: &str = "Start Date";
pub const END_DATE: &str = "End Date";
pub const NETWORK_DISTRIBUTION: &str = "Network Distribution";
pub const LANGUAGE: &str = "Language";
pub const BID: &str = "Bid";
pub const KEYWORD: &str = "Keyword";
pub const MATCH_TYPE: &str = "Match Type";
pub const PARAM1: &str = "Param1";
pub const PARAM2: &str = "Param2";
pub const PARAM3: &str = "Param3";
pub const TITLE: &str = "Title";
pub const TEXT: &str = "Text";
pub const DISPLAY_URL: &str = "Display Url";
pub const DESTINATION_URL: &str = "Destination Url";
pub const FINAL_URL: &str = "Final Url";
pub const MOBILE_FINAL_URL: &str = "Mobile Final Url";
pub const EDITORIAL_STATUS: &str = "Editorial Status";
pub const TARGET: &str = "Target";
pub const BID_ADJUSTMENT: &str = "Bid Adjustment";
pub const RADIUS: &str = "Radius";
pub const UNIT: &str = "Unit";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const ERROR: &str = "Error";
pub const ERROR_NUMBER: &str = "Error Number";
pub const EDITORIAL_LOCATION: &str = "Editorial Location";
pub const EDITORIAL_REASON_CODE: &str = "Editorial Reason Code";
pub const EDITORIAL_TERM: &str = "Editorial Term";
pub const PUBLISHER_COUNTRIES: &str = "Publisher Countries";

/// Every column of the format, in file order. Written as the header of upload files.
pub const ALL: &[&str] = &[
    TYPE,
    STATUS,
    ID,
    PARENT_ID,
    CLIENT_ID,
    MODIFIED_TIME,
    CAMPAIGN,
    AD_GROUP,
    NAME,
    DESCRIPTION,
    TIME_ZONE,
    BUDGET,
    BUDGET_TYPE,
    START_DATE,
    END_DATE,
    NETWORK_DISTRIBUTION,
    LANGUAGE,
    BID,
    KEYWORD,
    MATCH_TYPE,
    PARAM1,
    PARAM2,
    PARAM3,
    TITLE,
    TEXT,
    DISPLAY_URL,
    DESTINATION_URL,
    FINAL_URL,
    MOBILE_FINAL_URL,
    EDITORIAL_STATUS,
    TARGET,
    BID_ADJUSTMENT,
    RADIUS,
    UNIT,
    LATITUDE,
    LONGITUDE,
    ERROR,
    ERROR_NUMBER,
    EDITORIAL_LOCATION,
    EDITORIAL_REASON_CODE,
    EDITORIAL_TERM,
    PUBLISHER_COUNTRIES,
];
