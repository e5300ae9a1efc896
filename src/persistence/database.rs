use indexmap::IndexMap;

use super::error::DatabaseError;
use super::join;
use super::table::Table;

/// The collective of multiple [`Table`] objects.
///
/// A [`Database`] owns its tables and keys them by name. The key and the
/// name stored in the table itself always agree, including after a rename.
///
/// Tables are kept in an [`IndexMap`], so [`Database::list_tables`] returns
/// them in the order they were created in.
///
/// # Issues
/// - There is no locking. A caller sharing a database between threads has to
/// serialize access to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Database {
    name: String,
    tables: IndexMap<String, Table>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Database {
        //! Create a new database with no tables.

        Database {
            name: name.into(),
            tables: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create_table(&mut self, name: &str) -> Result<&mut Table, DatabaseError> {
        //! Create an empty [`Table`] and store it under `name`.
        //!
        //! Returns the new table so columns can be added right away.

        if self.tables.contains_key(name) {
            return Err(DatabaseError::duplicate_table(name));
        }

        let (index, _) = self.tables.insert_full(name.to_string(), Table::new(name));
        Ok(&mut self.tables[index])
    }

    pub fn insert_table(&mut self, table: Table) -> Result<(), DatabaseError> {
        //! Store a table built elsewhere, e.g. the result of a join.

        if self.tables.contains_key(table.name()) {
            return Err(DatabaseError::duplicate_table(table.name()));
        }

        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    pub fn delete_table(&mut self, name: &str) -> Result<Table, DatabaseError> {
        //! Remove a table, keeping the order of the remaining ones.

        self.tables
            .shift_remove(name)
            .ok_or_else(|| DatabaseError::unknown_table(name))
    }

    pub fn get_table(&self, name: &str) -> Result<&Table, DatabaseError> {
        self.tables
            .get(name)
            .ok_or_else(|| DatabaseError::unknown_table(name))
    }

    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut Table, DatabaseError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| DatabaseError::unknown_table(name))
    }

    pub fn rename_table(&mut self, old_name: &str, new_name: &str) -> Result<(), DatabaseError> {
        //! Move a table to a new name. The table keeps its place in the
        //! listing order.

        if !self.tables.contains_key(old_name) {
            return Err(DatabaseError::unknown_table(old_name));
        }
        if old_name == new_name {
            return Ok(());
        }
        if self.tables.contains_key(new_name) {
            return Err(DatabaseError::duplicate_table(new_name));
        }

        if let Some((index, _, mut table)) = self.tables.shift_remove_full(old_name) {
            table.set_name(new_name.to_string());
            self.tables.shift_insert(index, new_name.to_string(), table);
        }
        Ok(())
    }

    pub fn list_tables(&self) -> Vec<String> {
        //! Names of all tables, in creation order.

        self.tables.keys().cloned().collect()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn join_tables(&self, left: &str, right: &str, key: &str) -> Result<Table, DatabaseError> {
        //! Join two tables of this database by name. The database is not
        //! modified; see [`Database::store_join`] for that.

        self.join_tables_with_suffixes(left, right, key, join::DEFAULT_JOIN_SUFFIXES)
    }

    pub fn join_tables_with_suffixes(
        &self,
        left: &str,
        right: &str,
        key: &str,
        suffixes: (&str, &str),
    ) -> Result<Table, DatabaseError> {
        let left = self.get_table(left)?;
        let right = self.get_table(right)?;
        join::join_with_suffixes(left, right, key, suffixes)
    }

    pub fn store_join(
        &mut self,
        left: &str,
        right: &str,
        key: &str,
        suffixes: (&str, &str),
    ) -> Result<String, DatabaseError> {
        //! Join two tables and keep the result as a new table.
        //!
        //! The result is named `LEFT_JOIN_RIGHT`; if that is taken, `_1`, `_2`
        //! and so on is appended until the name is free.
        //!
        //! Returns the name the joined table was stored under.

        let mut table = self.join_tables_with_suffixes(left, right, key, suffixes)?;
        let name = self.free_name(table.name());

        table.set_name(name.clone());
        self.insert_table(table)?;
        Ok(name)
    }

    fn free_name(&self, base: &str) -> String {
        let mut name = base.to_string();
        let mut counter = 1;

        while self.tables.contains_key(&name) {
            name = format!("{}_{}", base, counter);
            counter += 1;
        }
        name
    }

    pub(crate) fn from_tables(name: String, tables: IndexMap<String, Table>) -> Database {
        Database { name, tables }
    }
}
