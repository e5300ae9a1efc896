//! Reading and writing databases as JSON documents.
//!
//! The file format is the pretty-printed [`DatabaseDocument`]. A file is
//! only ever written from a complete in-memory database, and a load either
//! yields a fully validated [`Database`] or an error.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::persistence::{Database, DatabaseDocument, DatabaseError};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("could not access database file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read database document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub fn to_json(database: &Database) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(&database.to_portable())?)
}

pub fn from_json(text: &str) -> Result<Database, StorageError> {
    let document: DatabaseDocument = serde_json::from_str(text)?;
    Ok(Database::from_portable(document)?)
}

pub fn save_to_file(database: &Database, path: &Path) -> Result<(), StorageError> {
    //! Write the database to `path`, replacing whatever was there.

    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &database.to_portable())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        "saved database '{}' ({} tables) to {}",
        database.name(),
        database.len(),
        path.display()
    );
    Ok(())
}

pub fn load_from_file(path: &Path) -> Result<Database, StorageError> {
    let file = fs::File::open(path)?;
    let document: DatabaseDocument = serde_json::from_reader(BufReader::new(file))?;
    debug!(
        "read document '{}' with {} tables from {}",
        document.name,
        document.tables.len(),
        path.display()
    );

    let database = Database::from_portable(document)?;
    info!("loaded database '{}' from {}", database.name(), path.display());
    Ok(database)
}
