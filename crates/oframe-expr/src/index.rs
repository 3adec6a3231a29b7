//! Index sets: ordered tables of dimension-key tuples.
//!
//! An [`IndexSet`] plays the role of the relational table backing a
//! dimensioned variable: one named key column per dimension, one row per
//! scalar sub-variable. Row order is load-bearing — it fixes id
//! assignment and rendering order downstream.

/// One scalar value inside a dimension key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for KeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyValue::Int(value) => write!(f, "{value}"),
            KeyValue::Str(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        KeyValue::Int(value)
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::Str(value.to_string())
    }
}

/// One concrete tuple of values for all dimensions of an expression.
pub type Key = Vec<KeyValue>;

/// Comma-joined key values, as used in group headers.
pub fn format_key(key: &Key) -> String {
    let parts: Vec<String> = key.iter().map(ToString::to_string).collect();
    parts.join(",")
}

/// Index set error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSetError {
    /// A row's arity does not match the number of key columns.
    RowArityMismatch { columns: usize, row_len: usize },
    /// The same key tuple appears in two rows.
    DuplicateKey { key: String },
    /// An index set must have at least one key column.
    NoColumns,
}

impl IndexSetError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            IndexSetError::RowArityMismatch { .. } => "INDEX_ROW_ARITY_MISMATCH",
            IndexSetError::DuplicateKey { .. } => "INDEX_DUPLICATE_KEY",
            IndexSetError::NoColumns => "INDEX_NO_COLUMNS",
        }
    }
}

impl std::fmt::Display for IndexSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexSetError::RowArityMismatch { columns, row_len } => write!(
                f,
                "[{}] Row has {} values but the index set has {} key columns",
                self.code(),
                row_len,
                columns
            ),
            IndexSetError::DuplicateKey { key } => {
                write!(f, "[{}] Key [{}] appears more than once", self.code(), key)
            }
            IndexSetError::NoColumns => {
                write!(f, "[{}] Index set has no key columns", self.code())
            }
        }
    }
}

impl std::error::Error for IndexSetError {}

/// An ordered table of key tuples with named key columns.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSet {
    columns: Vec<String>,
    rows: Vec<Key>,
}

impl IndexSet {
    /// Build an index set from explicit rows.
    ///
    /// Rejects arity mismatches and duplicate key tuples.
    pub fn new(columns: Vec<String>, rows: Vec<Key>) -> Result<Self, IndexSetError> {
        if columns.is_empty() {
            return Err(IndexSetError::NoColumns);
        }
        for row in &rows {
            if row.len() != columns.len() {
                return Err(IndexSetError::RowArityMismatch {
                    columns: columns.len(),
                    row_len: row.len(),
                });
            }
        }
        for (pos, row) in rows.iter().enumerate() {
            if rows[..pos].contains(row) {
                return Err(IndexSetError::DuplicateKey {
                    key: format_key(row),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build an index set from parallel columns of values, dataframe-style.
    pub fn from_columns(
        columns: Vec<(&str, Vec<KeyValue>)>,
    ) -> Result<Self, IndexSetError> {
        if columns.is_empty() {
            return Err(IndexSetError::NoColumns);
        }
        let len = columns[0].1.len();
        for (_, values) in &columns {
            if values.len() != len {
                return Err(IndexSetError::RowArityMismatch {
                    columns: columns.len(),
                    row_len: values.len(),
                });
            }
        }
        let names: Vec<String> = columns.iter().map(|(n, _)| (*n).to_string()).collect();
        let rows: Vec<Key> = (0..len)
            .map(|r| columns.iter().map(|(_, values)| values[r].clone()).collect())
            .collect();
        Self::new(names, rows)
    }

    /// Single-column convenience constructor.
    pub fn single(column: &str, values: Vec<KeyValue>) -> Result<Self, IndexSetError> {
        Self::from_columns(vec![(column, values)])
    }

    /// Key column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Key tuples, in table row order.
    pub fn rows(&self) -> &[Key] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{format_key, IndexSet, IndexSetError, KeyValue};

    fn ints(values: &[i64]) -> Vec<KeyValue> {
        values.iter().map(|v| KeyValue::Int(*v)).collect()
    }

    #[test]
    fn from_columns_preserves_row_order() {
        let set = IndexSet::from_columns(vec![
            ("x", ints(&[1, 2, 1, 2])),
            ("y", ints(&[1, 1, 2, 2])),
        ])
        .expect("index set");

        assert_eq!(set.columns(), &["x".to_string(), "y".to_string()]);
        assert_eq!(set.len(), 4);
        assert_eq!(format_key(&set.rows()[0]), "1,1");
        assert_eq!(format_key(&set.rows()[1]), "2,1");
        assert_eq!(format_key(&set.rows()[2]), "1,2");
        assert_eq!(format_key(&set.rows()[3]), "2,2");
    }

    #[test]
    fn rejects_mismatched_column_lengths() {
        let result = IndexSet::from_columns(vec![("x", ints(&[1, 2])), ("y", ints(&[1]))]);
        assert!(matches!(
            result,
            Err(IndexSetError::RowArityMismatch { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let result = IndexSet::single("x", ints(&[1, 2, 1]));
        assert_eq!(
            result,
            Err(IndexSetError::DuplicateKey {
                key: "1".to_string()
            })
        );
    }

    #[test]
    fn rejects_empty_column_list() {
        let result = IndexSet::new(Vec::new(), Vec::new());
        assert_eq!(result, Err(IndexSetError::NoColumns));
    }

    #[test]
    fn string_keys_format_without_quotes() {
        let set = IndexSet::single(
            "plant",
            vec![KeyValue::from("north"), KeyValue::from("south")],
        )
        .expect("index set");
        assert_eq!(format_key(&set.rows()[0]), "north");
    }
}
