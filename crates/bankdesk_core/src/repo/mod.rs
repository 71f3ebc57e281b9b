//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data-access contract shared by every entity table.
//! - Isolate SQLite query details from service/presentation code.
//!
//! # Invariants
//! - Every caller-supplied value is a bound parameter, never interpolated.
//! - Each write runs in its own transaction; a failed write is rolled back
//!   and logged before the error is returned.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`) in
//!   addition to DB transport errors.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::RecordId;
use chrono::NaiveDate;
use log::{error, info, warn};
use rusqlite::{Connection, Params, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub mod branch_repo;
pub mod contact_repo;
pub mod customer_repo;
pub mod employee_repo;

pub type RepoResult<T> = Result<T, RepoError>;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Payload failed write-side validation; nothing was written.
    Validation(ValidationError),
    /// Storage engine failure (constraint, I/O, closed connection, ...).
    Db(DbError),
    /// No row with this id exists.
    NotFound(RecordId),
    /// A stored row cannot be decoded into its record type.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract implemented once per entity table.
pub trait Repository {
    /// Stored row shape.
    type Record;
    /// Payload accepted by `create`.
    type Create;
    /// Partial payload accepted by `update`.
    type Update;

    /// Creates the backing table when absent. Safe to repeat.
    fn ensure_schema(&self) -> RepoResult<()>;
    /// Inserts a row and returns the engine-assigned id.
    fn create(&self, input: &Self::Create) -> RepoResult<RecordId>;
    /// Returns `None` when no row has this id.
    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Self::Record>>;
    /// Returns every row ordered by display name, ascending.
    fn get_all(&self) -> RepoResult<Vec<Self::Record>>;
    /// Case- and accent-insensitive substring search; same order as `get_all`.
    fn search(&self, term: &str) -> RepoResult<Vec<Self::Record>>;
    /// Rewrites the full row, keeping stored values for omitted fields.
    fn update(&self, id: RecordId, changes: &Self::Update) -> RepoResult<()>;
    /// Hard-deletes the row.
    fn delete(&self, id: RecordId) -> RepoResult<()>;
}

/// Builds a `LIKE` pattern matching `term` anywhere, with wildcards in the
/// term itself matched literally. Use with `ESCAPE '\'`.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Decodes an ISO calendar date column, rejecting anything else as corrupt.
pub(crate) fn parse_iso_date(column: &str, value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{value}` in {column}"))
    })
}

pub(crate) fn query_all<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(parse(row)?);
    }
    Ok(records)
}

pub(crate) fn query_one<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Option<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse(row)?));
    }
    Ok(None)
}

/// Runs one write inside its own transaction.
///
/// Commits when `write` succeeds. Otherwise the transaction is rolled back,
/// the failure is logged, and the original error is returned.
pub(crate) fn write_in_transaction<T>(
    conn: &Connection,
    entity: &'static str,
    op: &'static str,
    write: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
) -> RepoResult<T> {
    let started_at = Instant::now();
    let result = conn
        .unchecked_transaction()
        .map_err(RepoError::from)
        .and_then(|tx| match write(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=record_{} module=repo entity={} status=rollback_failed error={}",
                        op, entity, rollback_err
                    );
                }
                Err(err)
            }
        });

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!(
            "event=record_{} module=repo entity={} status=ok duration_ms={}",
            op, entity, duration_ms
        ),
        Err(RepoError::NotFound(id)) => info!(
            "event=record_{} module=repo entity={} status=not_found id={} duration_ms={}",
            op, entity, id, duration_ms
        ),
        Err(RepoError::Validation(err)) => warn!(
            "event=record_{} module=repo entity={} status=rejected error_code=validation_failed error={}",
            op, entity, err
        ),
        Err(err) => error!(
            "event=record_{} module=repo entity={} status=error error_code=write_failed duration_ms={} error={}",
            op, entity, duration_ms, err
        ),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::{contains_pattern, parse_iso_date, RepoError};
    use chrono::NaiveDate;

    #[test]
    fn contains_pattern_escapes_like_wildcards() {
        assert_eq!(contains_pattern("elm"), "%elm%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn contains_pattern_of_blank_term_matches_everything() {
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn parse_iso_date_rejects_non_iso_text() {
        assert_eq!(
            parse_iso_date("employees.date_of_birth", "1990-04-12").unwrap(),
            NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()
        );
        let err = parse_iso_date("employees.date_of_birth", "12/04/1990").unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("12/04/1990")));
    }
}
