//! Branch repository over the `branches` table.
//!
//! # Invariants
//! - Lists are ordered by `name` (case- and accent-insensitive), then `id`.
//! - Search covers name, city, state and postal code.

use super::{
    contains_pattern, query_all, query_one, write_in_transaction, RepoError, RepoResult,
    Repository,
};
use crate::db::schema::BRANCHES;
use crate::model::branch::{Branch, BranchCreate, BranchUpdate};
use crate::model::RecordId;
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "branch";

const BRANCH_SELECT_SQL: &str = "SELECT
    id,
    name,
    address,
    city,
    state,
    postal_code
FROM branches";

const BRANCH_ORDER_SQL: &str = "ORDER BY name COLLATE UNICODE_NOCASE ASC, id ASC";

/// SQLite-backed branch repository.
pub struct SqliteBranchRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBranchRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteBranchRepository<'_> {
    type Record = Branch;
    type Create = BranchCreate;
    type Update = BranchUpdate;

    fn ensure_schema(&self) -> RepoResult<()> {
        BRANCHES.ensure(self.conn)?;
        Ok(())
    }

    fn create(&self, input: &BranchCreate) -> RepoResult<RecordId> {
        write_in_transaction(self.conn, ENTITY, "create", |tx| {
            input.validate()?;
            tx.execute(
                "INSERT INTO branches (
                    name,
                    address,
                    city,
                    state,
                    postal_code
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    input.name.as_str(),
                    input.address.as_str(),
                    input.city.as_str(),
                    input.state.as_str(),
                    input.postal_code.as_str(),
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Branch>> {
        fetch_branch(self.conn, id)
    }

    fn get_all(&self) -> RepoResult<Vec<Branch>> {
        query_all(
            self.conn,
            &format!("{BRANCH_SELECT_SQL} {BRANCH_ORDER_SQL};"),
            [],
            parse_branch_row,
        )
    }

    fn search(&self, term: &str) -> RepoResult<Vec<Branch>> {
        query_all(
            self.conn,
            &format!(
                "{BRANCH_SELECT_SQL}
                 WHERE unicode_fold(name) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(city) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(state) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(postal_code) LIKE unicode_fold(?1) ESCAPE '\\'
                 {BRANCH_ORDER_SQL};"
            ),
            [contains_pattern(term)],
            parse_branch_row,
        )
    }

    fn update(&self, id: RecordId, changes: &BranchUpdate) -> RepoResult<()> {
        write_in_transaction(self.conn, ENTITY, "update", |tx| {
            let current = fetch_branch(tx, id)?.ok_or(RepoError::NotFound(id))?;
            let row = changes.merge(&current);
            row.validate()?;

            let changed = tx.execute(
                "UPDATE branches
                 SET
                    name = ?1,
                    address = ?2,
                    city = ?3,
                    state = ?4,
                    postal_code = ?5
                 WHERE id = ?6;",
                params![
                    row.name.as_str(),
                    row.address.as_str(),
                    row.city.as_str(),
                    row.state.as_str(),
                    row.postal_code.as_str(),
                    id,
                ],
            )?;

            if changed == 0 {
                return Err(RepoError::NotFound(id));
            }
            Ok(())
        })
    }

    fn delete(&self, id: RecordId) -> RepoResult<()> {
        write_in_transaction(self.conn, ENTITY, "delete", |tx| {
            let changed = tx.execute("DELETE FROM branches WHERE id = ?1;", [id])?;
            if changed == 0 {
                return Err(RepoError::NotFound(id));
            }
            Ok(())
        })
    }
}

fn fetch_branch(conn: &Connection, id: RecordId) -> RepoResult<Option<Branch>> {
    query_one(
        conn,
        &format!("{BRANCH_SELECT_SQL} WHERE id = ?1;"),
        [id],
        parse_branch_row,
    )
}

fn parse_branch_row(row: &Row<'_>) -> RepoResult<Branch> {
    Ok(Branch {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        city: row.get("city")?,
        state: row.get("state")?,
        postal_code: row.get("postal_code")?,
    })
}
