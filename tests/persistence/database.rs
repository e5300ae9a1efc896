use ferrum_tables::persistence::{Column, DataType, Database, DatabaseError, NameKind, Table, Value};
use serde_json::json;

fn _prepare_database() -> Database {
    Database::new("test_db")
}

fn _create_table(database: &mut Database, name: &str, columns: Vec<(&str, DataType)>) {
    let table = database
        .create_table(name)
        .expect("table exists already");
    for (column, datatype) in columns {
        table.add_column(Column::new(column, datatype)).unwrap();
    }
}

fn _statuses() -> DataType {
    DataType::Enum(vec![
        "NEW".to_string(),
        "PAID".to_string(),
        "CANCELLED".to_string(),
    ])
}

pub(crate) fn _shop_database() -> Database {
    let mut database = Database::new("TestDB");

    _create_table(
        &mut database,
        "Users",
        vec![
            ("id", DataType::Integer),
            ("name", DataType::String),
            ("email", DataType::Email),
        ],
    );
    let users = database.get_table_mut("Users").unwrap();
    users
        .add_row([("id", json!(1)), ("name", json!("Alice")), ("email", json!("alice@example.com"))])
        .unwrap();
    users
        .add_row([("id", json!(2)), ("name", json!("Bob")), ("email", json!("bob@example.com"))])
        .unwrap();

    _create_table(
        &mut database,
        "Orders",
        vec![
            ("id", DataType::Integer),
            ("user_id", DataType::Integer),
            ("status", _statuses()),
        ],
    );
    let orders = database.get_table_mut("Orders").unwrap();
    for (id, user_id, status) in [(10, 1, "NEW"), (11, 1, "PAID"), (12, 2, "NEW")] {
        orders
            .add_row([("id", json!(id)), ("user_id", json!(user_id)), ("status", json!(status))])
            .unwrap();
    }

    database
}

#[test]
fn database_create_table_starts_empty() {
    let mut database = _prepare_database();

    let table = database.create_table("test_tb1").unwrap();

    assert_eq!(table.name(), "test_tb1");
    assert!(table.columns().is_empty());
    assert!(table.is_empty());
    assert!(database.contains_table("test_tb1"));
}

#[test]
fn database_create_table_rejects_duplicates() {
    let mut database = _prepare_database();
    _create_table(&mut database, "test_tb1", vec![("id", DataType::Integer)]);

    let result = database.create_table("test_tb1").map(|_| ());

    assert_eq!(
        result,
        Err(DatabaseError::DuplicateName {
            kind: NameKind::Table,
            name: "test_tb1".to_string()
        })
    );
    assert_eq!(database.get_table("test_tb1").unwrap().columns().len(), 1);
}

#[test]
fn database_unknown_tables() {
    let mut database = _prepare_database();

    assert!(matches!(
        database.get_table("missing"),
        Err(DatabaseError::UnknownName { kind: NameKind::Table, .. })
    ));
    assert!(database.delete_table("missing").is_err());
    assert!(database.get_table_mut("missing").is_err());
    assert!(database.rename_table("missing", "other").is_err());
}

#[test]
fn database_lists_tables_in_creation_order() {
    let mut database = _prepare_database();
    for name in ["zeta", "alpha", "mid"] {
        database.create_table(name).unwrap();
    }

    assert_eq!(database.list_tables(), vec!["zeta", "alpha", "mid"]);

    database.delete_table("alpha").unwrap();
    database.create_table("beta").unwrap();

    assert_eq!(database.list_tables(), vec!["zeta", "mid", "beta"]);
}

#[test]
fn database_rename_table_moves_key_and_name() {
    let mut database = _shop_database();

    database.rename_table("Users", "Customers").unwrap();

    assert_eq!(database.list_tables(), vec!["Customers", "Orders"]);
    let customers = database.get_table("Customers").unwrap();
    assert_eq!(customers.name(), "Customers");
    assert_eq!(customers.len(), 2);
    assert!(!database.contains_table("Users"));
}

#[test]
fn database_rename_table_rejects_taken_name() {
    let mut database = _shop_database();
    let before = database.clone();

    let result = database.rename_table("Users", "Orders");

    assert!(matches!(result, Err(DatabaseError::DuplicateName { .. })));
    assert_eq!(database, before);
    assert!(database.rename_table("Users", "Users").is_ok());
    assert_eq!(database.list_tables(), vec!["Users", "Orders"]);
}

#[test]
fn database_delete_table_returns_it() {
    let mut database = _shop_database();

    let orders = database.delete_table("Orders").unwrap();

    assert_eq!(orders.len(), 3);
    assert_eq!(database.list_tables(), vec!["Users"]);
}

#[test]
fn database_insert_table_checks_name() {
    let mut database = _shop_database();

    assert!(database.insert_table(Table::new("Users")).is_err());
    database.insert_table(Table::new("Books")).unwrap();

    assert_eq!(database.list_tables(), vec!["Users", "Orders", "Books"]);
}

#[test]
fn database_store_join_picks_free_names() {
    let mut database = _shop_database();
    let users = database.get_table_mut("Users").unwrap();
    users
        .add_column(Column::new("user_id", DataType::Integer))
        .unwrap();
    for index in 0..users.len() {
        let id = users.get(index, "id").unwrap().clone();
        users.edit_row(index, [("user_id", id)]).unwrap();
    }

    let first = database
        .store_join("Orders", "Users", "user_id", ("_x", "_y"))
        .unwrap();
    let second = database
        .store_join("Orders", "Users", "user_id", ("_x", "_y"))
        .unwrap();

    assert_eq!(first, "Orders_JOIN_Users");
    assert_eq!(second, "Orders_JOIN_Users_1");
    assert_eq!(database.get_table(&second).unwrap().name(), second);
    assert_eq!(database.get_table(&first).unwrap().len(), 3);
}

#[test]
fn database_join_tables_does_not_modify() {
    let database = _shop_database();
    let before = database.clone();

    let joined = database.join_tables("Orders", "Users", "id").unwrap();

    assert_eq!(joined.len(), 0);
    assert_eq!(database, before);
    assert!(matches!(
        database.join_tables("Orders", "Missing", "id"),
        Err(DatabaseError::UnknownName { .. })
    ));
}

#[test]
fn database_edits_reach_stored_table() {
    let mut database = _shop_database();

    database
        .get_table_mut("Orders")
        .unwrap()
        .edit_row(0, [("status", "PAID")])
        .unwrap();

    assert_eq!(
        database.get_table("Orders").unwrap().get(0, "status").unwrap(),
        &Value::Text("PAID".to_string())
    );
}
