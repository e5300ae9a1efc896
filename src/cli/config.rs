//! Settings that come from the environment.
//!
//! A `.env` file in the working directory is read first, so the same
//! variables can be kept there instead of exported in the shell.
//!
//! - `FERRUM_DATABASE`: database file used when `--database` is not given.
//! - `FERRUM_JOIN_SUFFIXES`: `x,y` suffix pair for joins, `_x,_y` by default.

use std::env;
use std::path::PathBuf;

use log::{debug, warn};

use crate::persistence::DEFAULT_JOIN_SUFFIXES;

pub const DATABASE_VAR: &str = "FERRUM_DATABASE";
pub const JOIN_SUFFIXES_VAR: &str = "FERRUM_JOIN_SUFFIXES";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database_path: Option<PathBuf>,
    pub join_suffixes: (String, String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: None,
            join_suffixes: (
                DEFAULT_JOIN_SUFFIXES.0.to_string(),
                DEFAULT_JOIN_SUFFIXES.1.to_string(),
            ),
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        //! Load `.env` (if any) and read the settings from the environment.

        match dotenvy::dotenv() {
            Ok(path) => debug!("loaded environment from {}", path.display()),
            Err(error) if error.not_found() => {}
            Err(error) => warn!("ignoring .env file: {}", error),
        }

        Config::from_vars(env::var(DATABASE_VAR).ok(), env::var(JOIN_SUFFIXES_VAR).ok())
    }

    pub fn from_vars(database: Option<String>, join_suffixes: Option<String>) -> Config {
        let mut config = Config::default();

        config.database_path = database
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        if let Some(suffixes) = join_suffixes {
            match suffixes.split_once(',') {
                Some((x_suffix, y_suffix)) if !y_suffix.is_empty() => {
                    config.join_suffixes = (x_suffix.to_string(), y_suffix.to_string());
                }
                _ => warn!(
                    "{} must look like 'x,y' with a non-empty y suffix, got '{}'",
                    JOIN_SUFFIXES_VAR, suffixes
                ),
            }
        }

        config
    }

    pub fn with_database(mut self, path: Option<PathBuf>) -> Config {
        //! Let a path given on the command line win over the environment.

        if path.is_some() {
            self.database_path = path;
        }
        self
    }
}
