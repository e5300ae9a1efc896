//! Every failure the table store can report.
//!
//! The store never prints or logs anything itself. A failed call returns one
//! of these values and leaves the database exactly as it was before the call,
//! so the caller is free to report it however it likes.

use std::fmt::Display;

use thiserror::Error;

/// What kind of object a name refers to in a [`DatabaseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    Table,
    Column,
}

impl Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            NameKind::Table => "table",
            NameKind::Column => "column",
        };
        write!(f, "{}", kind)
    }
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum DatabaseError {
    /// A raw value could not be coerced into the type of its column.
    #[error("invalid value '{value}': {reason}, on column '{column}'")]
    Validation {
        column: String,
        value: String,
        reason: String,
    },

    /// A table or column with the name exists already.
    #[error("integrity violation; {kind} '{name}' already exists")]
    DuplicateName { kind: NameKind, name: String },

    /// A table or column with the name does not exist.
    #[error("does not exist: {kind} '{name}'")]
    UnknownName { kind: NameKind, name: String },

    #[error("out of bound; row index {index} (table has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The join key is not a column of one of the joined tables.
    #[error("invalid join key '{key}': not a column of table '{table}'")]
    JoinKey { key: String, table: String },

    /// A column definition breaks the schema rules (e.g. an enum without values).
    #[error("invalid definition of column '{column}': {reason}")]
    InvalidDefinition { column: String, reason: String },

    /// A portable document does not describe a consistent database.
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

impl DatabaseError {
    pub(crate) fn unknown_table(name: &str) -> DatabaseError {
        DatabaseError::UnknownName {
            kind: NameKind::Table,
            name: name.to_string(),
        }
    }

    pub(crate) fn unknown_column(name: &str) -> DatabaseError {
        DatabaseError::UnknownName {
            kind: NameKind::Column,
            name: name.to_string(),
        }
    }

    pub(crate) fn duplicate_table(name: &str) -> DatabaseError {
        DatabaseError::DuplicateName {
            kind: NameKind::Table,
            name: name.to_string(),
        }
    }

    pub(crate) fn duplicate_column(name: &str) -> DatabaseError {
        DatabaseError::DuplicateName {
            kind: NameKind::Column,
            name: name.to_string(),
        }
    }
}
