use std::collections::HashMap;
use std::fmt::Display;

use super::error::DatabaseError;
use super::row::{RawValue, Row, Value};
use super::schema::{Column, DataType};

/// A named list of typed columns and the rows stored under them.
///
/// Rows are identified by their position only. Deleting a row moves every
/// later row one position up.
///
/// Every operation either applies completely or returns an error and leaves
/// the table as it was; values are validated before anything is written.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Table {
        //! Create a table with no columns and no rows.

        Table {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn from_parts(name: String, columns: Vec<Column>, rows: Vec<Row>) -> Table {
        Table {
            name,
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Result<&Row, DatabaseError> {
        self.rows.get(index).ok_or(DatabaseError::IndexOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    pub fn get(&self, index: usize, column: &str) -> Result<&Value, DatabaseError> {
        //! Read a single value by row position and column name.

        let column_index = self
            .column_index(column)
            .ok_or_else(|| DatabaseError::unknown_column(column))?;
        let row = self.row(index)?;
        Ok(&row.0[column_index])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn add_column(&mut self, column: Column) -> Result<(), DatabaseError> {
        //! Append a column to the schema. Every existing row gets a null in
        //! the new slot.

        if self.column_index(&column.name).is_some() {
            return Err(DatabaseError::duplicate_column(&column.name));
        }
        column.check_definition()?;

        self.columns.push(column);
        for row in self.rows.iter_mut() {
            row.0.push(Value::Null);
        }

        Ok(())
    }

    pub fn delete_column(&mut self, name: &str) -> Result<Column, DatabaseError> {
        //! Remove a column from the schema and its value from every row.
        //!
        //! Returns the removed [`Column`].

        let index = self
            .column_index(name)
            .ok_or_else(|| DatabaseError::unknown_column(name))?;

        for row in self.rows.iter_mut() {
            row.0.remove(index);
        }
        Ok(self.columns.remove(index))
    }

    pub fn rename_column(&mut self, old_name: &str, new_name: &str) -> Result<(), DatabaseError> {
        let index = self
            .column_index(old_name)
            .ok_or_else(|| DatabaseError::unknown_column(old_name))?;

        if old_name == new_name {
            return Ok(());
        }
        if self.column_index(new_name).is_some() {
            return Err(DatabaseError::duplicate_column(new_name));
        }

        self.columns[index].name = new_name.to_string();
        Ok(())
    }

    pub fn alter_column(&mut self, name: &str, datatype: DataType) -> Result<(), DatabaseError> {
        //! Change the type of a column and convert the values stored in it.
        //!
        //! All existing non-null values are validated under the new type first.
        //! If any one of them does not convert, nothing changes.

        let index = self
            .column_index(name)
            .ok_or_else(|| DatabaseError::unknown_column(name))?;
        let column = Column::new(name, datatype);
        column.check_definition()?;

        let converted = self
            .rows
            .iter()
            .map(|row| match &row.0[index] {
                Value::Null => Ok(Value::Null),
                value => column.validate(&RawValue::from(value)),
            })
            .collect::<Result<Vec<Value>, DatabaseError>>()?;

        for (row, value) in self.rows.iter_mut().zip(converted) {
            row.0[index] = value;
        }
        self.columns[index] = column;

        Ok(())
    }

    pub fn add_row<I, K, V>(&mut self, values: I) -> Result<usize, DatabaseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        //! Validate and append a row. Columns without a value become null and
        //! keys that are not columns are ignored.
        //!
        //! Returns the position of the new row.

        let values = Self::_collect_values(values);
        let row = self
            .columns
            .iter()
            .map(|column| match values.get(&column.name) {
                Some(raw) => column.validate(raw),
                None => Ok(Value::Null),
            })
            .collect::<Result<Vec<Value>, DatabaseError>>()?;

        self.rows.push(Row(row));
        Ok(self.rows.len() - 1)
    }

    pub fn edit_row<I, K, V>(&mut self, index: usize, values: I) -> Result<(), DatabaseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        //! Update some values of the row at `index`.
        //!
        //! Only the given columns change. Keys that are not columns are
        //! ignored. If one value fails validation, none is written.

        let len = self.rows.len();
        if index >= len {
            return Err(DatabaseError::IndexOutOfRange { index, len });
        }

        let values = Self::_collect_values(values);
        let mut updated = self.rows[index].clone();

        for (column_index, column) in self.columns.iter().enumerate() {
            if let Some(raw) = values.get(&column.name) {
                updated.0[column_index] = column.validate(raw)?;
            }
        }

        self.rows[index] = updated;
        Ok(())
    }

    pub fn delete_row(&mut self, index: usize) -> Result<Row, DatabaseError> {
        //! Remove the row at `index`, shifting the rows after it up by one.
        //!
        //! Returns the removed [`Row`].

        let len = self.rows.len();
        if index >= len {
            return Err(DatabaseError::IndexOutOfRange { index, len });
        }
        Ok(self.rows.remove(index))
    }

    fn _collect_values<I, K, V>(values: I) -> HashMap<String, RawValue>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        values
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect()
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header: Vec<String> = self.columns.iter().map(|column| column.to_string()).collect();
        let rows: Vec<String> = self.rows.iter().map(|row| row.to_string()).collect();

        writeln!(f, "{}", header.join(" | "))?;
        for row in rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
