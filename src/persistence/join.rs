//! Key-based inner join of two tables.
//!
//! The right table is indexed on the key column once, then the left table is
//! walked in order and every left row is paired with each matching right row.
//! Left rows without a partner are dropped.

use std::collections::HashSet;

use super::error::DatabaseError;
use super::index::JoinIndex;
use super::row::Row;
use super::schema::Column;
use super::table::Table;

/// Suffixes applied to colliding column names, `(left, right)`.
///
/// Only the right suffix is used; left columns keep their names.
pub const DEFAULT_JOIN_SUFFIXES: (&str, &str) = ("_x", "_y");

pub fn join(left: &Table, right: &Table, key: &str) -> Result<Table, DatabaseError> {
    join_with_suffixes(left, right, key, DEFAULT_JOIN_SUFFIXES)
}

pub fn join_with_suffixes(
    left: &Table,
    right: &Table,
    key: &str,
    suffixes: (&str, &str),
) -> Result<Table, DatabaseError> {
    //! Join `left` and `right` on the column `key`, which both must have.
    //!
    //! The result has all columns of `left` followed by the columns of `right`
    //! without its key column. A right column whose name is taken gets the
    //! second suffix appended, repeatedly if needed. With an empty suffix a
    //! counter is appended instead (`name_1`, `name_2`, ...). Neither input
    //! is modified.

    let left_key = left.column_index(key).ok_or_else(|| DatabaseError::JoinKey {
        key: key.to_string(),
        table: left.name().to_string(),
    })?;
    let right_key = right.column_index(key).ok_or_else(|| DatabaseError::JoinKey {
        key: key.to_string(),
        table: right.name().to_string(),
    })?;

    let (_, y_suffix) = suffixes;
    let mut columns: Vec<Column> = left.columns().to_vec();
    let mut taken: HashSet<String> = columns.iter().map(|column| column.name.clone()).collect();
    let mut right_slots = Vec::with_capacity(right.columns().len().saturating_sub(1));

    for (slot, column) in right.columns().iter().enumerate() {
        if slot == right_key {
            continue;
        }

        let name = _free_column_name(&column.name, y_suffix, &taken);
        taken.insert(name.clone());

        columns.push(Column::new(name, column.datatype.clone()));
        right_slots.push(slot);
    }

    let index = JoinIndex::build(right.rows(), right_key);
    let mut rows = Vec::new();

    for left_row in left.rows() {
        for &position in index.get(&left_row.0[left_key]) {
            let right_row = &right.rows()[position];
            let mut merged = left_row.0.clone();
            merged.extend(right_slots.iter().map(|&slot| right_row.0[slot].clone()));
            rows.push(Row(merged));
        }
    }

    Ok(Table::from_parts(
        format!("{}_JOIN_{}", left.name(), right.name()),
        columns,
        rows,
    ))
}

fn _free_column_name(name: &str, suffix: &str, taken: &HashSet<String>) -> String {
    let mut candidate = name.to_string();
    if suffix.is_empty() {
        let mut counter = 0;
        while taken.contains(&candidate) {
            counter += 1;
            candidate = format!("{}_{}", name, counter);
        }
    } else {
        while taken.contains(&candidate) {
            candidate.push_str(suffix);
        }
    }
    candidate
}
