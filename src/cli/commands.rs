//! This module is where all the commands are run.
//!
//! Ferrum command line syntax:
//!
//! - ferrum --help | Command Line Help
//! - ferrum -d shop.json new shop | Create a database file.
//! - ferrum -d shop.json tables | List the tables.
//! - ferrum -d shop.json insert Users id=1 name=Alice | Add a row.
//! - ferrum -d shop.json join Orders Users user_id | Join and store.
//!
//! Each run loads the database, applies one command and, if the command
//! changed anything, saves the database again.

use std::fmt::Display;
use std::path::PathBuf;

use log::debug;

use crate::cli::config::Config;
use crate::cli::messages::highlight_argument;
use crate::cli::parsers::Command;
use crate::persistence::{Column, Database, RawValue, Table};
use crate::storage::{self, StorageError};

/// The executor that runs a single [`Command`] against a database file.
pub struct CommandExecutor {
    command: Command,
    config: Config,
}

/// What a command hands back to the terminal after it ran.
///
/// `table` is set when there is a table worth printing, `message` always
/// describes what happened.
pub struct CommandResult {
    pub message: String,
    pub table: Option<Table>,
}

impl Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.message)?;
        if let Some(table) = &self.table {
            write!(f, "{}", table)?;
        }
        Ok(())
    }
}

impl CommandResult {
    fn message(message: String) -> CommandResult {
        CommandResult {
            message,
            table: None,
        }
    }
}

impl CommandExecutor {
    pub fn new(command: Command, config: Config) -> CommandExecutor {
        CommandExecutor { command, config }
    }

    fn _database_path(&self) -> Result<PathBuf, String> {
        self.config.database_path.clone().ok_or_else(|| {
            format!(
                "No database file given. Use {} or set {}.",
                highlight_argument("--database"),
                highlight_argument(crate::cli::config::DATABASE_VAR)
            )
        })
    }

    pub fn execute(self) -> Result<CommandResult, String> {
        //! Run the command.
        //!
        //! The database file is only written when the command succeeded, so
        //! a failed command never changes the file.

        let path = self._database_path()?;
        debug!("running {:?} on {}", self.command, path.display());

        if let Command::New { name } = &self.command {
            if path.exists() {
                return Err(format!(
                    "File {} exists already.",
                    highlight_argument(&path.display().to_string())
                ));
            }
            let database = Database::new(name.as_str());
            storage::save_to_file(&database, &path).map_err(_storage_message)?;
            return Ok(CommandResult::message(format!(
                "Database {} created.",
                highlight_argument(name)
            )));
        }

        let mut database = storage::load_from_file(&path).map_err(_storage_message)?;
        let (result, changed) = self.apply(&mut database)?;

        if changed {
            storage::save_to_file(&database, &path).map_err(_storage_message)?;
        }
        Ok(result)
    }

    fn apply(self, database: &mut Database) -> Result<(CommandResult, bool), String> {
        //! Apply the command to the loaded database.
        //!
        //! Returns the result and whether the database was changed.

        let CommandExecutor { command, config } = self;
        let to_string = |error: crate::persistence::DatabaseError| error.to_string();

        let result = match command {
            Command::New { name } => {
                return Err(format!(
                    "Database {} cannot be created inside an open database.",
                    highlight_argument(&name)
                ));
            }
            Command::Tables => {
                let names = database.list_tables();
                let message = if names.is_empty() {
                    format!("Database {} has no tables.", highlight_argument(database.name()))
                } else {
                    names.join("\n")
                };
                return Ok((CommandResult::message(message), false));
            }
            Command::Show { table } => {
                let table = database.get_table(&table).map_err(to_string)?;
                return Ok((
                    CommandResult {
                        message: format!(
                            "{} row(s) in {}",
                            table.len(),
                            highlight_argument(table.name())
                        ),
                        table: Some(table.clone()),
                    },
                    false,
                ));
            }
            Command::CreateTable { name } => {
                database.create_table(&name).map_err(to_string)?;
                CommandResult::message(format!("Table {} created.", highlight_argument(&name)))
            }
            Command::RenameTable { old_name, new_name } => {
                database.rename_table(&old_name, &new_name).map_err(to_string)?;
                CommandResult::message(format!(
                    "Table {} renamed to {}.",
                    highlight_argument(&old_name),
                    highlight_argument(&new_name)
                ))
            }
            Command::DropTable { name } => {
                database.delete_table(&name).map_err(to_string)?;
                CommandResult::message(format!("Table {} dropped.", highlight_argument(&name)))
            }
            Command::AddColumn {
                table,
                name,
                dtype,
                values,
            } => {
                let datatype = dtype.into_datatype(values)?;
                let target = database.get_table_mut(&table).map_err(to_string)?;
                target
                    .add_column(Column::new(name.as_str(), datatype))
                    .map_err(to_string)?;
                CommandResult::message(format!("Column {} added.", highlight_argument(&name)))
            }
            Command::AlterColumn {
                table,
                name,
                dtype,
                values,
            } => {
                let datatype = dtype.into_datatype(values)?;
                let target = database.get_table_mut(&table).map_err(to_string)?;
                target.alter_column(&name, datatype).map_err(to_string)?;
                CommandResult::message(format!(
                    "Column {} converted, {} row(s) processed.",
                    highlight_argument(&name),
                    target.len()
                ))
            }
            Command::RenameColumn {
                table,
                old_name,
                new_name,
            } => {
                let target = database.get_table_mut(&table).map_err(to_string)?;
                target.rename_column(&old_name, &new_name).map_err(to_string)?;
                CommandResult::message(format!(
                    "Column {} renamed to {}.",
                    highlight_argument(&old_name),
                    highlight_argument(&new_name)
                ))
            }
            Command::DropColumn { table, name } => {
                let target = database.get_table_mut(&table).map_err(to_string)?;
                target.delete_column(&name).map_err(to_string)?;
                CommandResult::message(format!("Column {} dropped.", highlight_argument(&name)))
            }
            Command::Insert { table, values } => {
                let target = database.get_table_mut(&table).map_err(to_string)?;
                let index = target.add_row(_raw_values(values)).map_err(to_string)?;
                CommandResult::message(format!(
                    "Row inserted at position {}.",
                    highlight_argument(&index.to_string())
                ))
            }
            Command::Update {
                table,
                index,
                values,
            } => {
                let target = database.get_table_mut(&table).map_err(to_string)?;
                target.edit_row(index, _raw_values(values)).map_err(to_string)?;
                CommandResult::message(format!(
                    "Row {} updated.",
                    highlight_argument(&index.to_string())
                ))
            }
            Command::DeleteRow { table, index } => {
                let target = database.get_table_mut(&table).map_err(to_string)?;
                let row = target.delete_row(index).map_err(to_string)?;
                CommandResult::message(format!("Row deleted: {}", row))
            }
            Command::Join { left, right, key } => {
                let (x_suffix, y_suffix) = &config.join_suffixes;
                let name = database
                    .store_join(&left, &right, &key, (x_suffix.as_str(), y_suffix.as_str()))
                    .map_err(to_string)?;
                let joined = database.get_table(&name).map_err(to_string)?;
                CommandResult {
                    message: format!(
                        "Join created as table {} with {} row(s).",
                        highlight_argument(&name),
                        joined.len()
                    ),
                    table: Some(joined.clone()),
                }
            }
        };

        Ok((result, true))
    }
}

fn _raw_values(values: Vec<(String, Option<String>)>) -> Vec<(String, RawValue)> {
    values
        .into_iter()
        .map(|(column, value)| (column, RawValue::from(value)))
        .collect()
}

fn _storage_message(error: StorageError) -> String {
    error.to_string()
}
