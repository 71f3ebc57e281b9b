//! Storage connection settings.
//!
//! # Responsibility
//! - Resolve connection parameters from the process environment, with an
//!   optional `.env` file loaded first.
//! - Map those parameters onto a SQLite database location.
//!
//! # Invariants
//! - Every parameter has a fallback default; resolving settings never fails
//!   because a variable is unset.
//! - The password never appears in `Debug` output or log lines.

use crate::db::SchemaVariant;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_HOST: &str = "DB_Host";
pub const ENV_DB_USER: &str = "DB_User";
pub const ENV_DB_PASSWORD: &str = "DB_Password";
pub const ENV_DB_NAME: &str = "DB_name";
pub const ENV_DB_VARIANT: &str = "DB_Variant";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_USER: &str = "root";
const DEFAULT_DATABASE: &str = "bankdesk";
const MEMORY_DATABASE: &str = ":memory:";
const SQLITE_EXTENSION: &str = "sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownVariant(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariant(value) => write!(
                f,
                "unsupported schema variant `{value}`; expected bank|contacts"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Where the SQLite engine keeps the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqliteTarget {
    Memory,
    File(PathBuf),
}

/// Connection parameters for the data-access layer.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub user: String,
    pub password: String,
    /// Database name; used as the SQLite file name.
    pub database: String,
    pub variant: SchemaVariant,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            variant: SchemaVariant::default(),
        }
    }
}

impl Debug for ConnectionSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("variant", &self.variant)
            .finish()
    }
}

impl ConnectionSettings {
    /// Loads `.env` (when present) and resolves settings from the environment.
    ///
    /// # Errors
    /// - Returns an error when `DB_Variant` names an unknown schema variant.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults for
    /// unset or blank values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let variant = match value(ENV_DB_VARIANT) {
            Some(raw) => raw.parse()?,
            None => defaults.variant,
        };

        Ok(Self {
            host: value(ENV_DB_HOST).unwrap_or(defaults.host),
            user: value(ENV_DB_USER).unwrap_or(defaults.user),
            // Passwords may legitimately carry surrounding whitespace.
            password: lookup(ENV_DB_PASSWORD).unwrap_or(defaults.password),
            database: value(ENV_DB_NAME).unwrap_or(defaults.database),
            variant,
        })
    }

    /// Settings for a throwaway in-memory database.
    pub fn in_memory(variant: SchemaVariant) -> Self {
        Self {
            database: MEMORY_DATABASE.to_string(),
            variant,
            ..Self::default()
        }
    }

    /// Maps the database name onto a SQLite location.
    ///
    /// `:memory:` selects an in-memory database; a name without an extension
    /// gets `.sqlite3` appended.
    pub fn sqlite_target(&self) -> SqliteTarget {
        if self.database == MEMORY_DATABASE {
            return SqliteTarget::Memory;
        }

        let path = Path::new(&self.database);
        if path.extension().is_some() {
            SqliteTarget::File(path.to_path_buf())
        } else {
            SqliteTarget::File(path.with_extension(SQLITE_EXTENSION))
        }
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!(
            "event=config_load module=config status=ok dotenv={}",
            path.display()
        ),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(
            "event=config_load module=config status=error error_code=dotenv_invalid error={}",
            err
        ),
    }
}
