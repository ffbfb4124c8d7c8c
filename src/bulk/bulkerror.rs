use serde::Serialize;

use crate::bulk::cell::{CellValue, parse_optional, parse_text, to_cell, to_plain_text};
use crate::bulk::columns;
use crate::bulk::mapping::{BulkMapping, MappingError, convert_to_entity};
use crate::bulk::row::RowValues;

/// Suffix of the `Type` value of error rows in upload result files.
pub const ERROR_TYPE_SUFFIX: &str = " Error";

/// Where an entity error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BulkErrorKind {
    /// Reported by the service in a result file.
    Service,
    /// A column of the entity's row could not be parsed.
    Parse,
}

/// Error attached to a single bulk entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkError {
    pub kind: BulkErrorKind,
    /// Service error code name, or the parse failure message.
    pub error: Option<String>,
    /// Service error number.
    pub number: Option<i32>,
    /// Column that failed to parse.
    pub column: Option<String>,
    /// Raw value that failed to parse.
    pub value: Option<String>,
    pub editorial_location: Option<String>,
    pub editorial_reason_code: Option<i32>,
    pub editorial_term: Option<String>,
    pub publisher_countries: Option<String>,
    /// Line of the bulk file the error was read from.
    pub line: Option<u64>,
}

static MAPPINGS: &[BulkMapping<BulkError>] = &[
    BulkMapping::new(
        columns::ERROR,
        |e: &BulkError| to_plain_text(e.error.as_deref()),
        |v: &CellValue, e: &mut BulkError| {
            e.error = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::ERROR_NUMBER,
        |e: &BulkError| to_cell(e.number),
        |v: &CellValue, e: &mut BulkError| {
            e.number = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::EDITORIAL_LOCATION,
        |e: &BulkError| to_plain_text(e.editorial_location.as_deref()),
        |v: &CellValue, e: &mut BulkError| {
            e.editorial_location = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::EDITORIAL_REASON_CODE,
        |e: &BulkError| to_cell(e.editorial_reason_code),
        |v: &CellValue, e: &mut BulkError| {
            e.editorial_reason_code = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::EDITORIAL_TERM,
        |e: &BulkError| to_plain_text(e.editorial_term.as_deref()),
        |v: &CellValue, e: &mut BulkError| {
            e.editorial_term = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PUBLISHER_COUNTRIES,
        |e: &BulkError| to_plain_text(e.publisher_countries.as_deref()),
        |v: &CellValue, e: &mut BulkError| {
            e.publisher_countries = parse_text(v);
            Ok(())
        },
    ),
];

impl BulkError {
    fn empty(kind: BulkErrorKind) -> Self {
        BulkError {
            kind,
            error: None,
            number: None,
            column: None,
            value: None,
            editorial_location: None,
            editorial_reason_code: None,
            editorial_term: None,
            publisher_countries: None,
            line: None,
        }
    }

    /// True when `record_type` names an error row.
    pub fn is_error_type(record_type: &str) -> bool {
        record_type.ends_with(ERROR_TYPE_SUFFIX)
    }

    /// Decode an error row of a result file.
    pub fn from_row(row: &RowValues) -> Self {
        let mut error = BulkError::empty(BulkErrorKind::Service);
        error.line = row.line();
        for failure in convert_to_entity(row, MAPPINGS, &mut error) {
            log::warn!(
                "Ignoring malformed error row column at line {:?}: {}",
                row.line(),
                failure
            );
        }
        error
    }

    /// Parse failure of one column of an entity row.
    pub fn from_mapping(failure: MappingError, line: Option<u64>) -> Self {
        let mut error = BulkError::empty(BulkErrorKind::Parse);
        error.error = Some(failure.message);
        error.column = Some(failure.column.to_string());
        error.value = Some(failure.value);
        error.line = line;
        error
    }

    /// True when the service flagged the entity during editorial review.
    pub fn is_editorial(&self) -> bool {
        self.editorial_reason_code.is_some()
    }
}

impl std::fmt::Display for BulkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            BulkErrorKind::Service => write!(
                f,
                "{} ({})",
                self.error.as_deref().unwrap_or("Unknown error"),
                self.number.map(|n| n.to_string()).unwrap_or_default()
            ),
            BulkErrorKind::Parse => write!(
                f,
                "Column '{}': {}",
                self.column.as_deref().unwrap_or_default(),
                self.error.as_deref().unwrap_or_default()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_error_row() {
        let row = RowValues::from_pairs([
            (columns::TYPE, "Text Ad Error".into()),
            (columns::ERROR, "CampaignServiceEditorialValidationError".into()),
            (columns::ERROR_NUMBER, "1042".into()),
            (columns::EDITORIAL_REASON_CODE, "17".into()),
            (columns::EDITORIAL_TERM, "free".into()),
        ]);
        let error = BulkError::from_row(&row);
        assert_eq!(error.kind, BulkErrorKind::Service);
        assert_eq!(
            error.error.as_deref(),
            Some("CampaignServiceEditorialValidationError")
        );
        assert_eq!(error.number, Some(1042));
        assert!(error.is_editorial());
        assert_eq!(error.to_string(), "CampaignServiceEditorialValidationError (1042)");
    }

    #[test]
    fn error_types_end_with_suffix() {
        assert!(BulkError::is_error_type("Keyword Error"));
        assert!(!BulkError::is_error_type("Keyword"));
    }

    #[test]
    fn parse_failure_keeps_column_and_value() {
        let failure = MappingError {
            column: columns::ID,
            value: "abc".into(),
            message: "invalid digit found in string".into(),
        };
        let error = BulkError::from_mapping(failure, Some(4));
        assert_eq!(error.kind, BulkErrorKind::Parse);
        assert_eq!(error.column.as_deref(), Some("Id"));
        assert_eq!(error.value.as_deref(), Some("abc"));
        assert_eq!(error.line, Some(4));
    }
}
