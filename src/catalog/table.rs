use serde::{Deserialize, Deserializer, Serialize};

use super::value::Value;

/// One row of a table. Values are positional, aligned with the owning
/// table's column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }
}

/// A named table with a fixed, ordered column list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Table name, as written in CREATE TABLE
    pub name: String,
    /// Column names; order defines `SELECT *` and positional storage
    columns: Vec<String>,
    /// Rows in insertion order
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Returns the referenced names that are not columns of this table,
    /// in the order given and without repeats.
    pub fn missing_columns<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut missing: Vec<String> = Vec::new();
        for name in names {
            if !self.has_column(name) && !missing.contains(name) {
                missing.push(name.clone());
            }
        }
        missing
    }

    /// Builds a full row from `(position, value)` pairs. Positions not given
    /// hold `NULL`; positions past the last column are ignored.
    pub fn build_row<'a, I>(&self, pairs: I) -> Row
    where
        I: IntoIterator<Item = (usize, &'a Value)>,
    {
        let mut values = vec![Value::Null; self.columns.len()];
        for (index, value) in pairs {
            if let Some(slot) = values.get_mut(index) {
                *slot = value.clone();
            }
        }
        Row(values)
    }

    pub fn push_row(&mut self, row: Row) {
        debug_assert_eq!(row.0.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Overwrites `assignments` in every row matching `predicate`.
    /// Returns the number of rows touched.
    pub fn update_where<F>(&mut self, assignments: &[(usize, Value)], mut predicate: F) -> usize
    where
        F: FnMut(&Row) -> bool,
    {
        let mut touched = 0;
        for row in self.rows.iter_mut() {
            if predicate(row) {
                for (index, value) in assignments {
                    row.0[*index] = value.clone();
                }
                touched += 1;
            }
        }
        touched
    }

    /// Keeps only the rows for which `keep` holds. Returns the number removed.
    pub fn retain_rows<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&Row) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(keep);
        before - self.rows.len()
    }
}

#[derive(Deserialize)]
struct RawTable {
    name: String,
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTable::deserialize(deserializer)?;
        if let Some(bad) = raw.rows.iter().position(|r| r.0.len() != raw.columns.len()) {
            return Err(serde::de::Error::custom(format!(
                "row {} of table '{}' has {} values for {} columns",
                bad + 1,
                raw.name,
                raw.rows[bad].0.len(),
                raw.columns.len()
            )));
        }
        Ok(Table {
            name: raw.name,
            columns: raw.columns,
            rows: raw.rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Table {
        Table::new("users", vec!["name".to_string(), "email".to_string()])
    }

    #[test]
    fn test_build_row_fills_nulls() {
        let table = users();
        let value = Value::from("a@x.com");
        let row = table.build_row([(1, &value)]);
        assert_eq!(row.values(), &[Value::Null, Value::from("a@x.com")]);
    }

    #[test]
    fn test_build_row_ignores_positions_past_the_end() {
        let table = users();
        let value = Value::from("555");
        let row = table.build_row([(2, &value)]);
        assert_eq!(row.values(), &[Value::Null, Value::Null]);
    }

    #[test]
    fn test_missing_columns() {
        let table = users();
        let names = vec![
            "name".to_string(),
            "age".to_string(),
            "age".to_string(),
            "Email".to_string(),
        ];
        assert_eq!(
            table.missing_columns(&names),
            vec!["age".to_string(), "Email".to_string()]
        );
    }

    #[test]
    fn test_update_and_retain() {
        let mut table = users();
        for who in ["Ana", "Bo", "Ana"] {
            let v = Value::from(who);
            let row = table.build_row([(0, &v)]);
            table.push_row(row);
        }

        let touched = table.update_where(&[(1, Value::from("x@y"))], |row| {
            row.get(0) == Some(&Value::from("Ana"))
        });
        assert_eq!(touched, 2);
        assert_eq!(table.rows()[2].get(1), Some(&Value::from("x@y")));

        let removed = table.retain_rows(|row| row.get(0) != Some(&Value::from("Ana")));
        assert_eq!(removed, 2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_partial_rows() {
        let json = r#"{"name":"t","columns":["a","b"],"rows":[["x"]]}"#;
        let err = serde_json::from_str::<Table>(json).unwrap_err();
        assert!(err.to_string().contains("has 1 values for 2 columns"));

        let json = r#"{"name":"t","columns":["a","b"],"rows":[["x", null]]}"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 1);
    }
}
