use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::campaignmanagement::Bid;

/// Keyword the service reads as "clear this field".
pub const DELETE_VALUE: &str = "delete_value";

const DATE_PARSE_FORMAT: &str = "%m/%d/%Y";
const DATE_WRITE_FORMAT: &str = "%-m/%-d/%Y";
const URL_SEPARATOR: &str = ";";

/// Value of one column in one bulk row.
///
/// `Absent` means the column is not part of the row at all; `Empty` means the
/// column exists and holds a zero-length string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CellValue {
    #[default]
    Absent,
    Empty,
    Text(String),
}

impl CellValue {
    /// Wrap a raw cell read from a file.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// Text of a present cell. `Empty` yields `""`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Absent => None,
            CellValue::Empty => Some(""),
            CellValue::Text(value) => Some(value),
        }
    }

    /// What the cell looks like on disk.
    pub fn as_raw(&self) -> &str {
        self.as_str().unwrap_or_default()
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::from_raw(value)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map(CellValue::from_raw).unwrap_or_default()
    }
}

/// Parse a present value, treating an empty cell as "no value".
pub fn parse_optional<V>(cell: &CellValue) -> Result<Option<V>, String>
where
    V: FromStr,
    V::Err: Display,
{
    match cell {
        CellValue::Absent | CellValue::Empty => Ok(None),
        CellValue::Text(value) => value.trim().parse::<V>().map(Some).map_err(|e| e.to_string()),
    }
}

/// Read a free-text column. Empty cells and the delete keyword both read as `Some("")`.
pub fn parse_text(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Absent => None,
        CellValue::Empty => Some(String::new()),
        CellValue::Text(value) if value == DELETE_VALUE => Some(String::new()),
        CellValue::Text(value) => Some(value.clone()),
    }
}

pub fn parse_date(cell: &CellValue) -> Result<Option<NaiveDate>, String> {
    match cell {
        CellValue::Absent | CellValue::Empty => Ok(None),
        CellValue::Text(value) => NaiveDate::parse_from_str(value.trim(), DATE_PARSE_FORMAT)
            .map(Some)
            .map_err(|e| format!("'{value}' is not a M/D/YYYY date: {e}")),
    }
}

/// Read a `;`-separated URL list. The delete keyword reads as an empty list.
pub fn parse_url_list(cell: &CellValue) -> Option<Vec<String>> {
    match cell {
        CellValue::Absent | CellValue::Empty => None,
        CellValue::Text(value) if value == DELETE_VALUE => Some(vec![]),
        CellValue::Text(value) => Some(
            value
                .split(URL_SEPARATOR)
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    }
}

/// Read a bid column. The delete keyword reads as a bid without amount.
pub fn parse_bid(cell: &CellValue) -> Result<Option<Bid>, String> {
    match cell {
        CellValue::Text(value) if value == DELETE_VALUE => Ok(Some(Bid { amount: None })),
        _ => Ok(parse_optional::<Decimal>(cell)?.map(Bid::new)),
    }
}

/// Format any displayable field. `None` leaves the column absent.
pub fn to_cell<V: Display>(value: Option<V>) -> CellValue {
    match value {
        None => CellValue::Absent,
        Some(value) => CellValue::from_raw(&value.to_string()),
    }
}

/// Format a clearable text field: `Some("")` becomes the delete keyword.
pub fn to_optional_text(value: Option<&str>) -> CellValue {
    match value {
        None => CellValue::Absent,
        Some("") => CellValue::Text(DELETE_VALUE.to_string()),
        Some(value) => CellValue::Text(value.to_string()),
    }
}

/// Format a plain text field: `Some("")` stays an empty cell.
pub fn to_plain_text(value: Option<&str>) -> CellValue {
    value.map(CellValue::from_raw).unwrap_or_default()
}

pub fn to_date_cell(value: Option<NaiveDate>) -> CellValue {
    to_cell(value.map(|date| date.format(DATE_WRITE_FORMAT)))
}

/// Format a URL list. An empty list becomes the delete keyword.
pub fn to_url_list_cell(value: Option<&[String]>) -> CellValue {
    match value {
        None => CellValue::Absent,
        Some([]) => CellValue::Text(DELETE_VALUE.to_string()),
        Some(urls) => CellValue::Text(urls.join("; ")),
    }
}

/// Format a bid. A bid without amount becomes the delete keyword.
pub fn to_bid_cell(value: Option<&Bid>) -> CellValue {
    match value {
        None => CellValue::Absent,
        Some(Bid { amount: None }) => CellValue::Text(DELETE_VALUE.to_string()),
        Some(Bid {
            amount: Some(amount),
        }) => CellValue::Text(amount.to_string()),
    }
}
