//! The place where the command line is defined.
//!
//! Every command works on a single database file. Commands that change
//! the database write the file back once they succeed.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::persistence::DataType;

#[derive(Parser)]
#[command(name = "ferrum")]
#[command(about = "A Rust-powered table store", long_about = None)]
pub struct CliParser {
    /// Database file to work on. Falls back to FERRUM_DATABASE.
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Log more; repeat for even more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new, empty database file.
    New { name: String },

    /// List the tables of the database.
    Tables,

    /// Print the columns and rows of a table.
    Show { table: String },

    CreateTable { name: String },

    RenameTable { old_name: String, new_name: String },

    DropTable { name: String },

    /// Add a column; enum columns need --values.
    AddColumn {
        table: String,
        name: String,
        dtype: DtypeArg,
        #[arg(long, value_delimiter = ',')]
        values: Vec<String>,
    },

    /// Change the type of a column, converting the stored values.
    AlterColumn {
        table: String,
        name: String,
        dtype: DtypeArg,
        #[arg(long, value_delimiter = ',')]
        values: Vec<String>,
    },

    RenameColumn {
        table: String,
        old_name: String,
        new_name: String,
    },

    DropColumn { table: String, name: String },

    /// Append a row given as column=value pairs. An empty value is null.
    Insert {
        table: String,
        #[arg(value_parser = parse_assignment)]
        values: Vec<(String, Option<String>)>,
    },

    /// Change some values of the row at a position.
    Update {
        table: String,
        index: usize,
        #[arg(value_parser = parse_assignment, required = true)]
        values: Vec<(String, Option<String>)>,
    },

    DeleteRow { table: String, index: usize },

    /// Join two tables on a shared key column and store the result.
    Join {
        left: String,
        right: String,
        key: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DtypeArg {
    Integer,
    Real,
    Char,
    String,
    Email,
    Enum,
}

impl DtypeArg {
    pub fn into_datatype(self, values: Vec<String>) -> Result<DataType, String> {
        //! Combine the type with the `--values` list.

        let tag = match self {
            DtypeArg::Integer => "integer",
            DtypeArg::Real => "real",
            DtypeArg::Char => "char",
            DtypeArg::String => "string",
            DtypeArg::Email => "email",
            DtypeArg::Enum => "enum",
        };

        let values: Vec<String> = values
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();

        DataType::from_tag(tag, Some(values))
    }
}

pub fn parse_assignment(assignment: &str) -> Result<(String, Option<String>), String> {
    //! Split `column=value`. An empty value stands for null.

    let (column, value) = assignment
        .split_once('=')
        .ok_or_else(|| format!("expected column=value, got '{}'", assignment))?;

    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{}'", assignment));
    }

    let value = (!value.is_empty()).then(|| value.to_string());
    Ok((column.to_string(), value))
}
