use std::collections::HashMap;

use super::row::{Row, Value};

/// The hashable form of a [`Value`] used to match join keys.
///
/// Values that compare equal share a key: an integral real becomes an
/// integer and a char becomes a one-letter text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum JoinKey {
    Null,
    Integer(i64),
    Real(u64),
    Text(String),
}

impl From<&Value> for JoinKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => JoinKey::Null,
            Value::Integer(number) => JoinKey::Integer(*number),
            Value::Real(number) => {
                if number.fract() == 0.0 && *number >= i64::MIN as f64 && *number < i64::MAX as f64
                {
                    // Also folds -0.0 into 0.
                    JoinKey::Integer(*number as i64)
                } else {
                    JoinKey::Real(number.to_bits())
                }
            }
            Value::Char(character) => JoinKey::Text(character.to_string()),
            Value::Text(text) => JoinKey::Text(text.clone()),
        }
    }
}

/// A lookup from key value to the positions of all rows carrying it.
///
/// Positions of one key are kept in row order, duplicates included.
///
/// # Issues
/// - The index is a snapshot. It is built for one join and goes stale as soon
/// as the indexed table changes.
pub(crate) struct JoinIndex {
    key_rows_map: HashMap<JoinKey, Vec<usize>>,
}

impl JoinIndex {
    pub fn build(rows: &[Row], column_index: usize) -> JoinIndex {
        //! Index `rows` on the value in slot `column_index`.

        let mut key_rows_map: HashMap<JoinKey, Vec<usize>> = HashMap::new();

        for (position, row) in rows.iter().enumerate() {
            let key = row.get(column_index).map_or(JoinKey::Null, JoinKey::from);
            key_rows_map.entry(key).or_default().push(position);
        }

        JoinIndex { key_rows_map }
    }

    pub fn get(&self, value: &Value) -> &[usize] {
        self.key_rows_map
            .get(&JoinKey::from(value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
