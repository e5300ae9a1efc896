use ferrum_tables::persistence::{
    Column, DataType, DatabaseError, Table, Value, join, join_with_suffixes,
};
use serde_json::json;

use crate::database::_shop_database;

fn _keyed_table(
    name: &str,
    columns: Vec<(&str, DataType)>,
    rows: Vec<Vec<serde_json::Value>>,
) -> Table {
    let mut table = Table::new(name);
    let names: Vec<&str> = columns.iter().map(|(column, _)| *column).collect();

    for (column, datatype) in columns {
        table.add_column(Column::new(column, datatype)).unwrap();
    }
    for row in rows {
        table
            .add_row(names.iter().copied().zip(row))
            .unwrap();
    }
    table
}

#[test]
fn join_emits_one_row_per_match() {
    let left = _keyed_table(
        "left",
        vec![("k", DataType::Integer), ("a", DataType::String)],
        vec![
            vec![json!(1), json!("first")],
            vec![json!(1), json!("second")],
            vec![json!(2), json!("third")],
        ],
    );
    let right = _keyed_table(
        "right",
        vec![("k", DataType::Integer), ("b", DataType::String)],
        vec![vec![json!(1), json!("one")], vec![json!(2), json!("two")]],
    );

    let joined = join(&left, &right, "k").unwrap();

    assert_eq!(joined.name(), "left_JOIN_right");
    assert_eq!(joined.column_names(), vec!["k", "a", "b"]);
    assert_eq!(joined.len(), 3);
    assert_eq!(joined.get(0, "b").unwrap(), &Value::Text("one".to_string()));
    assert_eq!(joined.get(1, "a").unwrap(), &Value::Text("second".to_string()));
    assert_eq!(joined.get(2, "b").unwrap(), &Value::Text("two".to_string()));
}

#[test]
fn join_drops_left_rows_without_match() {
    let left = _keyed_table(
        "left",
        vec![("k", DataType::Integer)],
        vec![vec![json!(1)], vec![json!(3)], vec![json!(2)]],
    );
    let right = _keyed_table(
        "right",
        vec![("k", DataType::Integer), ("b", DataType::Char)],
        vec![vec![json!(2), json!("x")], vec![json!(1), json!("y")]],
    );

    let joined = join(&left, &right, "k").unwrap();
    let keys: Vec<&Value> = (0..joined.len())
        .map(|index| joined.get(index, "k").unwrap())
        .collect();

    assert_eq!(keys, vec![&Value::Integer(1), &Value::Integer(2)]);
}

#[test]
fn join_groups_by_left_then_right_order() {
    let left = _keyed_table(
        "left",
        vec![("k", DataType::String), ("l", DataType::Integer)],
        vec![vec![json!("b"), json!(1)], vec![json!("a"), json!(2)]],
    );
    let right = _keyed_table(
        "right",
        vec![("r", DataType::Integer), ("k", DataType::String)],
        vec![
            vec![json!(10), json!("a")],
            vec![json!(20), json!("b")],
            vec![json!(30), json!("a")],
            vec![json!(40), json!("b")],
        ],
    );

    let joined = join(&left, &right, "k").unwrap();
    let pairs: Vec<(Value, Value)> = joined
        .rows()
        .iter()
        .map(|row| (row.get(1).unwrap().clone(), row.get(2).unwrap().clone()))
        .collect();

    assert_eq!(joined.column_names(), vec!["k", "l", "r"]);
    assert_eq!(
        pairs,
        vec![
            (Value::Integer(1), Value::Integer(20)),
            (Value::Integer(1), Value::Integer(40)),
            (Value::Integer(2), Value::Integer(10)),
            (Value::Integer(2), Value::Integer(30)),
        ]
    );
}

#[test]
fn join_renames_colliding_right_columns() {
    let left = _keyed_table(
        "left",
        vec![("id", DataType::Integer), ("name", DataType::String), ("name_y", DataType::String)],
        vec![vec![json!(1), json!("L"), json!("LY")]],
    );
    let right = _keyed_table(
        "right",
        vec![("id", DataType::Integer), ("name", DataType::Email)],
        vec![vec![json!(1), json!("r@example.com")]],
    );

    let joined = join_with_suffixes(&left, &right, "id", ("_left", "_y")).unwrap();

    assert_eq!(joined.column_names(), vec!["id", "name", "name_y", "name_y_y"]);
    assert_eq!(joined.column("name_y_y").unwrap().datatype(), &DataType::Email);
    assert_eq!(
        joined.get(0, "name_y_y").unwrap(),
        &Value::Text("r@example.com".to_string())
    );
}

#[test]
fn join_keeps_column_types_and_enum_values() {
    let database = _shop_database();

    let joined = database.join_tables("Users", "Orders", "id").unwrap();

    assert_eq!(joined.column_names(), vec!["id", "name", "email", "user_id", "status"]);
    assert_eq!(
        joined.column("status").unwrap().datatype().enum_values(),
        Some(&["NEW".to_string(), "PAID".to_string(), "CANCELLED".to_string()][..])
    );
}

#[test]
fn join_orders_with_users() {
    let mut database = _shop_database();
    let users = database.get_table_mut("Users").unwrap();
    users
        .add_column(Column::new("user_id", DataType::Integer))
        .unwrap();
    users.edit_row(0, [("user_id", 1)]).unwrap();
    users.edit_row(1, [("user_id", 2)]).unwrap();

    let joined = database.join_tables("Orders", "Users", "user_id").unwrap();

    assert_eq!(joined.len(), 3);
    assert_eq!(
        joined.column_names(),
        vec!["id", "user_id", "status", "id_y", "name", "email"]
    );
    assert_eq!(joined.get(2, "name").unwrap(), &Value::Text("Bob".to_string()));
}

#[test]
fn join_requires_key_on_both_sides() {
    let database = _shop_database();
    let users = database.get_table("Users").unwrap();
    let orders = database.get_table("Orders").unwrap();

    assert_eq!(
        join(orders, users, "unknown_key").unwrap_err(),
        DatabaseError::JoinKey {
            key: "unknown_key".to_string(),
            table: "Orders".to_string()
        }
    );
    assert_eq!(
        join(orders, users, "status").unwrap_err(),
        DatabaseError::JoinKey {
            key: "status".to_string(),
            table: "Users".to_string()
        }
    );
}

#[test]
fn join_matches_null_keys_and_numeric_equality() {
    let left = _keyed_table(
        "left",
        vec![("k", DataType::Real), ("a", DataType::Integer)],
        vec![vec![json!(null), json!(1)], vec![json!(2.0), json!(2)]],
    );
    let right = _keyed_table(
        "right",
        vec![("k", DataType::Integer), ("b", DataType::Integer)],
        vec![vec![json!(2), json!(20)], vec![json!(null), json!(10)]],
    );

    let joined = join(&left, &right, "k").unwrap();

    assert_eq!(joined.len(), 2);
    assert_eq!(joined.get(0, "b").unwrap(), &Value::Integer(10));
    assert_eq!(joined.get(1, "b").unwrap(), &Value::Integer(20));
}

#[test]
fn join_with_empty_suffix_numbers_colliding_columns() {
    let left = _keyed_table(
        "left",
        vec![("id", DataType::Integer), ("name", DataType::String), ("name_1", DataType::String)],
        vec![vec![json!(1), json!("L"), json!("L1")]],
    );
    let right = _keyed_table(
        "right",
        vec![("id", DataType::Integer), ("name", DataType::String)],
        vec![vec![json!(1), json!("R")]],
    );

    let joined = join_with_suffixes(&left, &right, "id", ("_x", "")).unwrap();

    assert_eq!(joined.column_names(), vec!["id", "name", "name_1", "name_2"]);
    assert_eq!(joined.get(0, "name_2").unwrap(), &Value::Text("R".to_string()));
}
