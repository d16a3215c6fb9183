use std::collections::HashSet;
use std::fmt;

use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a spreadsheet-derived row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as exported from the source spreadsheets.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// The cell as a finite number, if it holds one.
    ///
    /// Numeric-looking strings are *not* numbers here: loaders decide cell
    /// types up front, and label columns such as `"2020"` stay labels.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Convert a JSON scalar. Nested arrays and objects are kept as their
    /// JSON text.
    pub fn from_json(val: &JsonValue) -> Self {
        match val {
            JsonValue::String(s) => CellValue::String(s.clone()),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    CellValue::Float(f)
                } else {
                    CellValue::String(n.to_string())
                }
            }
            JsonValue::Bool(b) => CellValue::Bool(*b),
            JsonValue::Null => CellValue::Null,
            other => CellValue::String(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one record of the source table
// ---------------------------------------------------------------------------

/// A single record: column name → value, in source column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. A repeated column name replaces the earlier value in
    /// place so lookups stay unambiguous.
    pub fn push(&mut self, column: impl Into<String>, value: CellValue) {
        let column = column.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.push(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    /// Numeric value of `column`, if present and finite.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_f64)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.push(k, v);
        }
        row
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with its column index.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All rows, in source order.
    pub rows: Vec<Row>,
    /// Union of column names across every row, in first-seen order.
    pub column_names: Vec<String>,
}

impl Dataset {
    /// Build the column index from the loaded rows.
    ///
    /// Later years may add columns absent in earlier ones, so every row is
    /// scanned, not just the first.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut column_names = Vec::new();
        {
            let mut seen: HashSet<&str> = HashSet::new();
            for row in &rows {
                for col in row.columns() {
                    if seen.insert(col) {
                        column_names.push(col.to_string());
                    }
                }
            }
        }

        Dataset { rows, column_names }
    }

    /// Build a dataset from an in-memory JSON document: either an array of
    /// flat objects or an object carrying such an array under `"data"`.
    pub fn from_json_value(root: &JsonValue) -> anyhow::Result<Self> {
        use anyhow::Context;

        let records = match root {
            JsonValue::Array(items) => items,
            JsonValue::Object(obj) => obj
                .get("data")
                .and_then(JsonValue::as_array)
                .context("Expected a top-level array or a \"data\" array")?,
            _ => anyhow::bail!("Expected a top-level JSON array"),
        };

        let rows = records
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let obj = rec
                    .as_object()
                    .with_context(|| format!("Row {i} is not a JSON object"))?;
                Ok(obj
                    .iter()
                    .map(|(k, v)| (k.clone(), CellValue::from_json(v)))
                    .collect::<Row>())
            })
            .collect::<anyhow::Result<Vec<Row>>>()?;

        Ok(Dataset::from_rows(rows))
    }

    /// Whether at least one row holds a finite number under `column`.
    pub fn has_numeric(&self, column: &str) -> bool {
        self.rows.iter().any(|row| row.number(column).is_some())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn column_union_scans_all_rows_in_first_seen_order() {
        let ds = Dataset::from_json_value(&json!([
            {"Year": 2019, "Revenue": 1.0},
            {"Year": 2020, "Revenue": 2.0, "Employees": 10},
            {"Employees": 12, "Year": 2021, "Firms": 4}
        ]))
        .unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names, vec!["Year", "Revenue", "Employees", "Firms"]);
    }

    #[test]
    fn numeric_presence_ignores_strings_and_non_finite() {
        let ds = Dataset::from_rows(vec![
            Row::new()
                .with("Label", CellValue::String("12".into()))
                .with("Broken", CellValue::Float(f64::NAN)),
            Row::new().with("Value", CellValue::Integer(3)),
        ]);

        assert!(!ds.has_numeric("Label"));
        assert!(!ds.has_numeric("Broken"));
        assert!(ds.has_numeric("Value"));
        assert!(!ds.has_numeric("Missing"));
    }

    #[test]
    fn data_wrapper_object_is_accepted() {
        let ds = Dataset::from_json_value(&json!({"data": [{"Vuosi": 2020}]})).unwrap();
        assert_eq!(ds.column_names, vec!["Vuosi"]);
    }

    #[test]
    fn non_object_rows_are_rejected() {
        assert!(Dataset::from_json_value(&json!([1, 2])).is_err());
        assert!(Dataset::from_json_value(&json!("rows")).is_err());
    }

    #[test]
    fn repeated_column_replaces_in_place() {
        let row = Row::new()
            .with("A", CellValue::Integer(1))
            .with("B", CellValue::Integer(2))
            .with("A", CellValue::Integer(3));
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(row.number("A"), Some(3.0));
    }
}
