//! Owned connection handle for the data-access layer.
//!
//! # Responsibility
//! - Hold the single connection used by every repository.
//! - Hand out repositories bound to that connection.
//! - Release the connection exactly once.
//!
//! # Invariants
//! - `close()` is idempotent and safe on a handle whose connection is gone.
//! - Repositories are only handed out for tables of the opened variant.

use super::open::{bootstrap_connection, open_db, open_db_in_memory};
use super::schema::{self, ensure_schema, SchemaVariant, TableSchema};
use super::{DbError, DbResult};
use crate::config::{ConnectionSettings, SqliteTarget};
use crate::repo::branch_repo::SqliteBranchRepository;
use crate::repo::contact_repo::SqliteContactRepository;
use crate::repo::customer_repo::SqliteCustomerRepository;
use crate::repo::employee_repo::SqliteEmployeeRepository;
use log::{error, info};
use rusqlite::Connection;

/// Database handle owning the connection lifetime.
///
/// Components that need storage take `&Database` instead of reaching for a
/// global connection.
pub struct Database {
    conn: Option<Connection>,
    variant: SchemaVariant,
}

impl Database {
    /// Opens the database described by `settings` and ensures its schema.
    pub fn open(settings: &ConnectionSettings) -> DbResult<Self> {
        info!(
            "event=db_connect module=db status=start host={} user={} database={}",
            settings.host, settings.user, settings.database
        );
        let conn = match settings.sqlite_target() {
            SqliteTarget::Memory => open_db_in_memory(settings.variant)?,
            SqliteTarget::File(path) => open_db(path, settings.variant)?,
        };
        Ok(Self {
            conn: Some(conn),
            variant: settings.variant,
        })
    }

    /// Opens a fresh in-memory database for `variant`.
    pub fn open_in_memory(variant: SchemaVariant) -> DbResult<Self> {
        Ok(Self {
            conn: Some(open_db_in_memory(variant)?),
            variant,
        })
    }

    /// Adopts an already-open connection and applies the same bootstrap as
    /// [`Database::open`].
    pub fn from_connection(conn: Connection, variant: SchemaVariant) -> DbResult<Self> {
        bootstrap_connection(&conn, variant)?;
        Ok(Self {
            conn: Some(conn),
            variant,
        })
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Borrows the live connection.
    ///
    /// # Errors
    /// - Returns [`DbError::Closed`] after `close()`.
    pub fn connection(&self) -> DbResult<&Connection> {
        self.conn.as_ref().ok_or(DbError::Closed)
    }

    /// Creates any missing table of the opened variant. Safe to repeat.
    pub fn ensure_schema(&self) -> DbResult<()> {
        ensure_schema(self.connection()?, self.variant)
    }

    pub fn branches(&self) -> DbResult<SqliteBranchRepository<'_>> {
        Ok(SqliteBranchRepository::new(self.table_connection(&schema::BRANCHES)?))
    }

    pub fn employees(&self) -> DbResult<SqliteEmployeeRepository<'_>> {
        Ok(SqliteEmployeeRepository::new(self.table_connection(&schema::EMPLOYEES)?))
    }

    pub fn customers(&self) -> DbResult<SqliteCustomerRepository<'_>> {
        Ok(SqliteCustomerRepository::new(self.table_connection(&schema::CUSTOMERS)?))
    }

    pub fn contacts(&self) -> DbResult<SqliteContactRepository<'_>> {
        Ok(SqliteContactRepository::new(self.table_connection(&schema::CONTACTS)?))
    }

    /// Releases the connection.
    ///
    /// Calling this on an already-closed handle is a no-op. When SQLite
    /// refuses to close, the connection stays owned and the error is returned.
    pub fn close(&mut self) -> DbResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((conn, err)) => {
                error!(
                    "event=db_close module=db status=error error_code=db_close_failed error={}",
                    err
                );
                self.conn = Some(conn);
                Err(err.into())
            }
        }
    }

    fn table_connection(&self, table: &TableSchema) -> DbResult<&Connection> {
        if !self.variant.contains(table.name) {
            return Err(DbError::TableUnavailable {
                table: table.name,
                variant: self.variant,
            });
        }
        self.connection()
    }
}
