//! Table definitions and idempotent schema bootstrap.
//!
//! # Responsibility
//! - Register the `CREATE TABLE IF NOT EXISTS` statement of every entity table.
//! - Group tables into the two supported schema variants.
//!
//! # Invariants
//! - Every statement is idempotent; ensuring a schema twice is a no-op.
//! - A variant lists tables in dependency order (referenced tables first).

use crate::config::ConfigError;
use crate::db::DbResult;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One entity table and its bootstrap statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    sql: &'static str,
}

impl TableSchema {
    /// Creates this table when absent.
    pub fn ensure(&self, conn: &Connection) -> DbResult<()> {
        conn.execute_batch(self.sql)?;
        Ok(())
    }
}

pub const BRANCHES: TableSchema = TableSchema {
    name: "branches",
    sql: include_str!("branches.sql"),
};

pub const EMPLOYEES: TableSchema = TableSchema {
    name: "employees",
    sql: include_str!("employees.sql"),
};

pub const CUSTOMERS: TableSchema = TableSchema {
    name: "customers",
    sql: include_str!("customers.sql"),
};

pub const CONTACTS: TableSchema = TableSchema {
    name: "contacts",
    sql: include_str!("contacts.sql"),
};

const BANK_TABLES: &[TableSchema] = &[BRANCHES, EMPLOYEES, CUSTOMERS];
const CONTACT_TABLES: &[TableSchema] = &[CONTACTS];

/// Which family of tables a database is opened for.
///
/// The bank and contact schemas are alternatives: a database holds one of
/// them, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// Branches, employees and customers.
    #[default]
    Bank,
    /// Plain address-book contacts.
    Contacts,
}

impl SchemaVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::Contacts => "contacts",
        }
    }

    /// Tables owned by this variant, referenced tables first.
    pub fn tables(self) -> &'static [TableSchema] {
        match self {
            Self::Bank => BANK_TABLES,
            Self::Contacts => CONTACT_TABLES,
        }
    }

    pub fn contains(self, table: &str) -> bool {
        self.tables().iter().any(|schema| schema.name == table)
    }
}

impl Display for SchemaVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVariant {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bank" => Ok(Self::Bank),
            "contacts" | "contact" => Ok(Self::Contacts),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

/// Creates every table of `variant` that does not exist yet.
pub fn ensure_schema(conn: &Connection, variant: SchemaVariant) -> DbResult<()> {
    for table in variant.tables() {
        table.ensure(conn)?;
    }
    Ok(())
}

/// Returns whether a table named `table` exists on this connection.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
