use std::collections::HashMap;
use std::sync::Arc;

use crate::bulk::cell::CellValue;
use crate::bulk::columns;
use crate::error::{Error, Result};

static ABSENT: CellValue = CellValue::Absent;

/// Ordered column names of one bulk file, shared by all of its rows.
#[derive(Debug, PartialEq, Eq)]
pub struct ColumnHeader {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnHeader {
    /// Build a header. When a name repeats, the first occurrence wins lookups.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(position);
        }
        ColumnHeader { names, index }
    }

    /// Header of the current bulk format version.
    pub fn standard() -> Arc<ColumnHeader> {
        Arc::new(ColumnHeader::new(columns::ALL.iter().copied()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One line of a bulk file: a cell per header column.
#[derive(Debug, Clone, PartialEq)]
pub struct RowValues {
    header: Arc<ColumnHeader>,
    cells: Vec<CellValue>,
    line: Option<u64>,
}

impl RowValues {
    /// Row with every column absent.
    pub fn new(header: Arc<ColumnHeader>) -> Self {
        let cells = vec![CellValue::Absent; header.len()];
        RowValues {
            header,
            cells,
            line: None,
        }
    }

    /// Row built from a parsed file record. Missing trailing cells stay absent.
    pub fn from_record(
        header: Arc<ColumnHeader>,
        record: &csv::StringRecord,
        line: Option<u64>,
    ) -> Self {
        let mut cells: Vec<CellValue> = record
            .iter()
            .take(header.len())
            .map(CellValue::from_raw)
            .collect();
        cells.resize(header.len(), CellValue::Absent);
        RowValues {
            header,
            cells,
            line,
        }
    }

    /// Row whose header is exactly the given columns, in order.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, CellValue)>,
    {
        let (names, cells): (Vec<&str>, Vec<CellValue>) = pairs.into_iter().unzip();
        RowValues {
            header: Arc::new(ColumnHeader::new(names)),
            cells,
            line: None,
        }
    }

    pub fn header(&self) -> &Arc<ColumnHeader> {
        &self.header
    }

    /// Line of the source file this row was read from.
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Cell for `column`; absent when the header does not carry it.
    pub fn get(&self, column: &str) -> &CellValue {
        self.header
            .position(column)
            .and_then(|position| self.cells.get(position))
            .unwrap_or(&ABSENT)
    }

    pub fn set(&mut self, column: &str, value: CellValue) -> Result<()> {
        let position = self
            .header
            .position(column)
            .ok_or_else(|| Error::UnknownColumn(column.to_string()))?;
        self.cells[position] = value;
        Ok(())
    }

    /// Value of the `Type` column, if any.
    pub fn record_type(&self) -> Option<&str> {
        self.get(columns::TYPE)
            .as_str()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Copy every present cell into `target`, skipping columns its header lacks.
    pub fn copy_into(&self, target: &mut RowValues) {
        for (name, cell) in self.iter() {
            if cell.is_absent() {
                continue;
            }
            if let Some(position) = target.header.position(name) {
                target.cells[position] = cell.clone();
            }
        }
    }

    /// Re-home this row onto another header, keeping the source line.
    pub fn with_header(&self, header: Arc<ColumnHeader>) -> RowValues {
        let mut row = RowValues::new(header);
        self.copy_into(&mut row);
        row.line = self.line;
        row
    }

    /// Column names paired with their cells, in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.header
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }

    /// Raw cell strings in header order, as written to disk.
    pub fn raw_cells(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(CellValue::as_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_read_as_absent() {
        let row = RowValues::from_pairs([(columns::STATUS, CellValue::from("Active"))]);
        assert_eq!(row.get(columns::STATUS), &CellValue::Text("Active".into()));
        assert_eq!(row.get(columns::ID), &CellValue::Absent);
    }

    #[test]
    fn set_rejects_columns_outside_the_header() {
        let mut row = RowValues::new(ColumnHeader::standard());
        assert!(row.set(columns::KEYWORD, "shoes".into()).is_ok());
        let err = row.set("Not A Column", "x".into()).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(name) if name == "Not A Column"));
    }

    #[test]
    fn short_records_pad_with_absent() {
        let header = Arc::new(ColumnHeader::new(["Type", "Id", "Status"]));
        let record = csv::StringRecord::from(vec!["Keyword", ""]);
        let row = RowValues::from_record(header, &record, Some(3));
        assert_eq!(row.get("Id"), &CellValue::Empty);
        assert_eq!(row.get("Status"), &CellValue::Absent);
        assert_eq!(row.line(), Some(3));
    }

    #[test]
    fn with_header_keeps_known_columns_only() {
        let source = RowValues::from_pairs([
            (columns::TYPE, CellValue::from("Keyword")),
            ("Custom Column", CellValue::from("kept out")),
        ]);
        let row = source.with_header(ColumnHeader::standard());
        assert_eq!(row.record_type(), Some("Keyword"));
        assert!(!row.header().contains("Custom Column"));
        assert_eq!(row.raw_cells().count(), columns::ALL.len());
    }
}
