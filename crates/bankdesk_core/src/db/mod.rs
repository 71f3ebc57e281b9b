//! SQLite storage bootstrap and connection ownership.
//!
//! # Responsibility
//! - Open and configure SQLite connections for bankdesk core.
//! - Create the tables of one schema variant before the connection is used.
//! - Register the Unicode folding used by search and ordering.
//! - Own the connection lifetime through [`Database`].
//!
//! # Invariants
//! - Core code must not read/write entity data before the schema is ensured.
//! - A closed [`Database`] never hands out a connection.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod database;
mod open;
pub mod schema;
pub mod text;

pub use database::Database;
pub use open::{open_db, open_db_in_memory};
pub use schema::SchemaVariant;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The owning [`Database`] was closed.
    Closed,
    /// The requested table is not part of the opened schema variant.
    TableUnavailable {
        table: &'static str,
        variant: SchemaVariant,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Closed => write!(f, "database connection is closed"),
            Self::TableUnavailable { table, variant } => write!(
                f,
                "table `{table}` is not available in the `{}` schema",
                variant.as_str()
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Closed | Self::TableUnavailable { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
