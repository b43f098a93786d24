//! Result set types for query responses.

use crate::types::TypeDescriptor;
use crate::value::WireValue;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Name and declared type of one result column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Declared column type.
    pub type_spec: TypeDescriptor,
}

impl ColumnSpec {
    /// Create a new column spec.
    pub fn new(name: impl Into<String>, type_spec: impl Into<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            type_spec: type_spec.into(),
        }
    }
}

/// One row of wire values, parallel with the result set's columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireRow {
    /// Values in column order.
    pub values: Vec<WireValue>,
}

impl WireRow {
    /// Create a row from its values.
    pub fn new(values: Vec<WireValue>) -> Self {
        Self { values }
    }

    /// Get the number of values in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this row has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Rows returned by a query, with their column metadata.
///
/// `columns` is empty when the server skipped result metadata; the rows are
/// then only usable positionally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    /// Column metadata.
    pub columns: Vec<ColumnSpec>,
    /// Result rows.
    pub rows: Vec<WireRow>,
    /// Opaque paging state for fetching the next page.
    pub paging_state: Option<Bytes>,
    /// Page size the server used.
    pub page_size: Option<i32>,
}

impl ResultSet {
    /// Create a result set with columns and rows.
    pub fn new(columns: Vec<ColumnSpec>, rows: Vec<WireRow>) -> Self {
        Self {
            columns,
            rows,
            paging_state: None,
            page_size: None,
        }
    }

    /// Attach a paging state.
    pub fn with_paging_state(mut self, paging_state: impl Into<Bytes>) -> Self {
        self.paging_state = Some(paging_state.into());
        self
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether more pages are available.
    pub fn has_more(&self) -> bool {
        self.paging_state.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BasicType;

    #[test]
    fn test_result_set() {
        let rs = ResultSet::new(
            vec![
                ColumnSpec::new("name", BasicType::Text),
                ColumnSpec::new("age", BasicType::Int),
            ],
            vec![
                WireRow::new(vec![WireValue::from("Alice"), WireValue::Int(30)]),
                WireRow::new(vec![WireValue::from("Bob"), WireValue::Int(25)]),
            ],
        );

        assert_eq!(rs.len(), 2);
        assert!(!rs.is_empty());
        assert!(!rs.has_more());
        assert_eq!(rs.rows[0].len(), 2);
        assert_eq!(rs.columns[1].type_spec, TypeDescriptor::Basic(BasicType::Int));
    }

    #[test]
    fn test_paging_state() {
        let rs = ResultSet::default().with_paging_state(vec![1u8, 2, 3]);
        assert!(rs.is_empty());
        assert!(rs.has_more());
    }
}
