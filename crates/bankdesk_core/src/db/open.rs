//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Ensure the schema variant's tables before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have every table of the requested variant.
//! - Returned connections carry `unicode_fold` and `UNICODE_NOCASE`.

use super::schema::{ensure_schema, SchemaVariant};
use super::text::register_text_functions;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and ensures the variant's tables.
///
/// # Side effects
/// - Creates the file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>, variant: SchemaVariant) -> DbResult<Connection> {
    open_logged("file", variant, || Connection::open(path))
}

/// Opens an in-memory SQLite database and ensures the variant's tables.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory(variant: SchemaVariant) -> DbResult<Connection> {
    open_logged("memory", variant, Connection::open_in_memory)
}

fn open_logged(
    mode: &str,
    variant: SchemaVariant,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode={} variant={}",
        mode, variant
    );

    let conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn, variant) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} variant={} duration_ms={}",
                mode,
                variant,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Applies pragmas, text functions and the variant's tables to `conn`.
pub(super) fn bootstrap_connection(conn: &Connection, variant: SchemaVariant) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    register_text_functions(conn)?;
    ensure_schema(conn, variant)?;
    Ok(())
}
