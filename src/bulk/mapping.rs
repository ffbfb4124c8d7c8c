use crate::bulk::cell::CellValue;
use crate::bulk::row::RowValues;
use crate::error::Result;

/// Reads a field of `T` as a cell.
pub type ReadFn<T> = fn(&T) -> CellValue;
/// Parses a present cell into a field of `T`.
pub type WriteFn<T> = fn(&CellValue, &mut T) -> Result<(), String>;

/// A column whose value could not be parsed into its field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value '{value}' for column '{column}': {message}")]
pub struct MappingError {
    pub column: &'static str,
    pub value: String,
    pub message: String,
}

/// Binds one bulk column to one field of `T`.
///
/// Mappings are plain function pointers so each entity's table can live in a
/// `static` slice.
pub struct BulkMapping<T> {
    column_name: &'static str,
    read: ReadFn<T>,
    write: WriteFn<T>,
}

impl<T> BulkMapping<T> {
    pub const fn new(column_name: &'static str, read: ReadFn<T>, write: WriteFn<T>) -> Self {
        BulkMapping {
            column_name,
            read,
            write,
        }
    }

    pub fn column_name(&self) -> &'static str {
        self.column_name
    }

    pub fn read(&self, entity: &T) -> CellValue {
        (self.read)(entity)
    }

    /// Apply a cell to the entity. An absent cell leaves the field untouched.
    pub fn write(&self, value: &CellValue, entity: &mut T) -> Result<(), MappingError> {
        if value.is_absent() {
            return Ok(());
        }
        (self.write)(value, entity).map_err(|message| MappingError {
            column: self.column_name,
            value: value.as_raw().to_string(),
            message,
        })
    }
}

/// Populate `entity` from `row`, running the mappings in table order.
///
/// A failing mapping does not stop the pass; every failure is returned.
pub fn convert_to_entity<T>(
    row: &RowValues,
    mappings: &[BulkMapping<T>],
    entity: &mut T,
) -> Vec<MappingError> {
    mappings
        .iter()
        .filter_map(|mapping| mapping.write(row.get(mapping.column_name), entity).err())
        .collect()
}

/// Write the mapped fields of `entity` into `row`, in table order.
pub fn convert_to_values<T>(
    entity: &T,
    mappings: &[BulkMapping<T>],
    row: &mut RowValues,
) -> Result<()> {
    for mapping in mappings {
        row.set(mapping.column_name, mapping.read(entity))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk::cell::{parse_optional, parse_text, to_cell, to_plain_text};
    use crate::bulk::row::ColumnHeader;
    use crate::error::Error;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        id: Option<i64>,
        name: Option<String>,
    }

    static SAMPLE_MAPPINGS: &[BulkMapping<Sample>] = &[
        BulkMapping::new(
            "Id",
            |s: &Sample| to_cell(s.id),
            |v: &CellValue, s: &mut Sample| {
                s.id = parse_optional(v)?;
                Ok(())
            },
        ),
        BulkMapping::new(
            "Name",
            |s: &Sample| to_plain_text(s.name.as_deref()),
            |v: &CellValue, s: &mut Sample| {
                s.name = parse_text(v);
                Ok(())
            },
        ),
    ];

    #[test]
    fn bad_value_is_reported_and_other_fields_still_written() {
        let row = RowValues::from_pairs([("Id", "abc".into()), ("Name", "Campaign".into())]);
        let mut sample = Sample::default();

        let errors = convert_to_entity(&row, SAMPLE_MAPPINGS, &mut sample);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column, "Id");
        assert_eq!(errors[0].value, "abc");
        assert_eq!(sample.id, None);
        assert_eq!(sample.name.as_deref(), Some("Campaign"));
    }

    #[test]
    fn failed_write_keeps_previous_field_value() {
        let mut sample = Sample {
            id: Some(7),
            name: None,
        };
        let result = SAMPLE_MAPPINGS[0].write(&"12x".into(), &mut sample);
        assert!(result.is_err());
        assert_eq!(sample.id, Some(7));
    }

    #[test]
    fn absent_column_does_not_touch_field() {
        let mut sample = Sample {
            id: Some(7),
            name: Some("kept".into()),
        };
        let row = RowValues::from_pairs([("Other", "x".into())]);
        assert!(convert_to_entity(&row, SAMPLE_MAPPINGS, &mut sample).is_empty());
        assert_eq!(sample.id, Some(7));
        assert_eq!(sample.name.as_deref(), Some("kept"));
    }

    #[test]
    fn write_then_read_round_trips() {
        let header = std::sync::Arc::new(ColumnHeader::new(["Id", "Name"]));
        let original = Sample {
            id: Some(123),
            name: Some("Test Campaign 1".into()),
        };
        let mut row = RowValues::new(header);
        convert_to_values(&original, SAMPLE_MAPPINGS, &mut row).unwrap();

        let mut copy = Sample::default();
        assert!(convert_to_entity(&row, SAMPLE_MAPPINGS, &mut copy).is_empty());
        assert_eq!(copy, original);
    }

    #[test]
    fn unknown_mapping_column_is_an_error() {
        let mut row = RowValues::new(std::sync::Arc::new(ColumnHeader::new(["Id"])));
        let err = convert_to_values(&Sample::default(), SAMPLE_MAPPINGS, &mut row).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(_)));
    }
}
