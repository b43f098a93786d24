//! Decoded result rows.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use bytes::Bytes;
use cqlgate_proto::{ColumnSpec, ResultSet, WireValue};

use crate::codec::{decode_row, decode_untyped, DecodeError};
use crate::native::NativeValue;
use crate::scan::{FromNative, FromRow, ScanError, ScanTarget};

/// Column names of a result set and their positions.
///
/// Built once per result set and shared by all of its rows. When two columns
/// share a name, lookup by name finds the later one; both stay reachable by
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build the index for a set of column specs. `None` when there are no
    /// columns.
    pub fn build(columns: &[ColumnSpec]) -> Option<Self> {
        if columns.is_empty() {
            return None;
        }
        let mut names = Vec::with_capacity(columns.len());
        let mut positions = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            names.push(column.name.clone());
            positions.insert(column.name.clone(), i);
        }
        Some(Self { names, positions })
    }

    /// Column names in wire order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

/// One decoded row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Option<Arc<ColumnIndex>>,
    values: Vec<NativeValue>,
}

/// One page of decoded rows, in server order.
///
/// Dereferences to a slice of [`Row`]. When the server has more rows it
/// returns a paging state; pass it to [`Query::paging_state`] (or use
/// [`Query::next_page`]) to fetch the next page.
///
/// [`Query::paging_state`]: crate::Query::paging_state
/// [`Query::next_page`]: crate::Query::next_page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    rows: Vec<Row>,
    paging_state: Option<Bytes>,
}

impl Rows {
    /// Create a page with no paging state.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            paging_state: None,
        }
    }

    /// Attach the server's paging state.
    pub fn with_paging_state(mut self, paging_state: Option<Bytes>) -> Self {
        self.paging_state = paging_state;
        self
    }

    /// Paging state to resume after this page.
    pub fn paging_state(&self) -> Option<&Bytes> {
        self.paging_state.as_ref()
    }

    /// Whether the server has more rows after this page.
    pub fn has_more(&self) -> bool {
        self.paging_state.is_some()
    }

    /// Consume the page, returning its rows.
    pub fn into_vec(self) -> Vec<Row> {
        self.rows
    }
}

impl Deref for Rows {
    type Target = [Row];

    fn deref(&self) -> &[Row] {
        &self.rows
    }
}

impl IntoIterator for Rows {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rows {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Row {
    /// Decode one wire row against its column specs.
    ///
    /// With no column specs the row is decoded without type information and
    /// only positional access is available.
    pub fn materialize(columns: &[ColumnSpec], values: &[WireValue]) -> Result<Self, DecodeError> {
        let index = ColumnIndex::build(columns).map(Arc::new);
        Self::materialize_with(index, columns, values)
    }

    fn materialize_with(
        index: Option<Arc<ColumnIndex>>,
        columns: &[ColumnSpec],
        values: &[WireValue],
    ) -> Result<Self, DecodeError> {
        let values = if columns.is_empty() {
            decode_untyped(values)?
        } else {
            decode_row(values, columns)?
        };
        Ok(Self {
            columns: index,
            values,
        })
    }

    /// Decode every row of a result set, keeping its paging state.
    ///
    /// The first row that fails is reported with its index.
    pub fn from_result_set(result_set: &ResultSet) -> Result<Rows, DecodeError> {
        let index = ColumnIndex::build(&result_set.columns).map(Arc::new);
        let rows = result_set
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Self::materialize_with(index.clone(), &result_set.columns, &row.values).map_err(
                    |e| DecodeError::Row {
                        index: i,
                        source: Box::new(e),
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Rows::new(rows).with_paging_state(result_set.paging_state.clone()))
    }

    /// The decoded values, in column order.
    pub fn values(&self) -> &[NativeValue] {
        &self.values
    }

    /// Consume the row, returning its values.
    pub fn into_values(self) -> Vec<NativeValue> {
        self.values
    }

    /// Get the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by position.
    pub fn get(&self, index: usize) -> Option<&NativeValue> {
        self.values.get(index)
    }

    /// Get a value by column name.
    pub fn get_by_name(&self, name: &str) -> Option<&NativeValue> {
        self.column_position(name).and_then(|i| self.values.get(i))
    }

    /// Position of a column by name, if the row carries column names.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.as_ref().and_then(|c| c.position(name))
    }

    /// Column names, if the row carries them.
    pub fn column_names(&self) -> Option<&[String]> {
        self.columns.as_deref().map(ColumnIndex::names)
    }

    /// Convert the value at `index` into `T`.
    pub fn try_get<T: FromNative>(&self, index: usize) -> Result<T, ScanError> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| ScanError::ColumnNotFound(index.to_string()))?;
        T::from_native(value).map_err(|e| e.at(index))
    }

    /// Convert the value of column `name` into `T`.
    pub fn try_get_by_name<T: FromNative>(&self, name: &str) -> Result<T, ScanError> {
        let index = self
            .column_position(name)
            .ok_or_else(|| ScanError::ColumnNotFound(name.to_string()))?;
        self.try_get(index)
    }

    /// Copy the row's values into `destinations`, one per column.
    ///
    /// Stops at the first value that cannot be assigned.
    pub fn scan(&self, destinations: &mut [&mut dyn ScanTarget]) -> Result<(), ScanError> {
        if destinations.len() != self.values.len() {
            return Err(ScanError::ArityMismatch {
                expected: self.values.len(),
                actual: destinations.len(),
            });
        }
        for (i, (dest, value)) in destinations.iter_mut().zip(&self.values).enumerate() {
            dest.assign(value).map_err(|e| e.at(i))?;
        }
        Ok(())
    }

    /// Convert the whole row into a tuple.
    pub fn scan_into<T: FromRow>(&self) -> Result<T, ScanError> {
        T::from_row(self)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
