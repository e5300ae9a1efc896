//! The portable document: a plain, serde-friendly picture of a [`Database`].
//!
//! ```json
//! { "name": "shop",
//!   "tables": { "Users": { "name": "Users",
//!                          "columns": [{ "name": "id", "dtype": "integer", "enum_values": null }],
//!                          "rows": [{ "id": 1 }] } } }
//! ```
//!
//! Loading a document rebuilds the database through the normal table
//! operations, so every column definition and every value is checked again.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::database::Database;
use super::error::DatabaseError;
use super::row::RawValue;
use super::schema::{Column, DataType};
use super::table::Table;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseDocument {
    pub name: String,
    #[serde(default)]
    pub tables: IndexMap<String, TableDocument>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TableDocument {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDocument>,
    #[serde(default)]
    pub rows: Vec<IndexMap<String, serde_json::Value>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ColumnDocument {
    pub name: String,
    pub dtype: String,
    #[serde(default)]
    pub enum_values: Option<Vec<String>>,
}

impl Database {
    pub fn to_portable(&self) -> DatabaseDocument {
        DatabaseDocument {
            name: self.name().to_string(),
            tables: self
                .tables()
                .map(|table| (table.name().to_string(), table.to_portable()))
                .collect(),
        }
    }

    pub fn from_portable(document: DatabaseDocument) -> Result<Database, DatabaseError> {
        //! Rebuild a database from its document.
        //!
        //! Fails if a table is filed under a key other than its own name, or
        //! if any table fails [`Table::from_portable`].

        let mut tables = IndexMap::with_capacity(document.tables.len());

        for (key, table_document) in document.tables {
            if key != table_document.name {
                return Err(DatabaseError::MalformedDocument(format!(
                    "table '{}' is stored under the key '{}'",
                    table_document.name, key
                )));
            }
            tables.insert(key, Table::from_portable(table_document)?);
        }

        Ok(Database::from_tables(document.name, tables))
    }
}

impl Table {
    pub fn to_portable(&self) -> TableDocument {
        let columns: Vec<ColumnDocument> = self
            .columns()
            .iter()
            .map(|column| ColumnDocument {
                name: column.name().to_string(),
                dtype: column.datatype().tag().to_string(),
                enum_values: column.datatype().enum_values().map(<[String]>::to_vec),
            })
            .collect();

        let rows: Vec<IndexMap<String, serde_json::Value>> = self
            .rows()
            .iter()
            .map(|row| {
                self.columns()
                    .iter()
                    .zip(row.values())
                    .map(|(column, value)| {
                        (column.name().to_string(), serde_json::Value::from(value))
                    })
                    .collect()
            })
            .collect();

        TableDocument {
            name: self.name().to_string(),
            columns,
            rows,
        }
    }

    pub fn from_portable(document: TableDocument) -> Result<Table, DatabaseError> {
        //! Rebuild a table from its document.
        //!
        //! Each row must have exactly one entry per column. Values are coerced
        //! through their columns, which also restores their stored variant
        //! (a `char` comes back as a char, not as text).

        let mut table = Table::new(document.name);

        for column_document in document.columns {
            let datatype = DataType::from_tag(&column_document.dtype, column_document.enum_values)
                .map_err(|reason| DatabaseError::InvalidDefinition {
                    column: column_document.name.clone(),
                    reason,
                })?;
            table.add_column(Column::new(column_document.name, datatype))?;
        }

        for (position, row_document) in document.rows.iter().enumerate() {
            if let Some(unknown) = row_document
                .keys()
                .find(|key| table.column_index(key).is_none())
            {
                return Err(DatabaseError::MalformedDocument(format!(
                    "row {} of table '{}' has a value for unknown column '{}'",
                    position,
                    table.name(),
                    unknown
                )));
            }
            if let Some(missing) = table
                .columns()
                .iter()
                .find(|column| !row_document.contains_key(column.name()))
            {
                return Err(DatabaseError::MalformedDocument(format!(
                    "row {} of table '{}' has no value for column '{}'",
                    position,
                    table.name(),
                    missing.name()
                )));
            }

            table.add_row(
                row_document
                    .iter()
                    .map(|(name, value)| (name.as_str(), RawValue::from(value))),
            )?;
        }

        Ok(table)
    }
}
