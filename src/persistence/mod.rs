//! Persistence as tables needs to have the following components
//! - Schema (typed columns, each one able to validate raw input)
//! - Row (one value per column, in column order)
//! - Table (named columns plus positional rows)
//! - Database (tables keyed by unique name, in creation order)
//! - Join (inner equi-join of two tables on a shared key column)
//! - Portable documents (the serde picture of a database, for storage)
//!

//  All modules of this lib
mod database;
mod error;
mod index;
mod join;
mod portable;
mod row;
mod schema;
mod table;

//  External API
pub use database::Database;
pub use error::{DatabaseError, NameKind};
pub use join::{DEFAULT_JOIN_SUFFIXES, join, join_with_suffixes};
pub use portable::{ColumnDocument, DatabaseDocument, TableDocument};
pub use row::{RawValue, Row, Value};
pub use schema::{Column, DataType};
pub use table::Table;
