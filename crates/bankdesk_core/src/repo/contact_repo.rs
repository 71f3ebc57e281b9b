//! Contact repository over the `contacts` table.
//!
//! # Invariants
//! - `created_at` is filled by the column default and never part of an
//!   UPDATE statement.
//! - Search covers name, phone and email; NULL columns never match.

use super::{
    contains_pattern, query_all, query_one, write_in_transaction, RepoError, RepoResult,
    Repository,
};
use crate::db::schema::CONTACTS;
use crate::model::contact::{Contact, ContactCreate, ContactUpdate};
use crate::model::RecordId;
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "contact";

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    gender,
    phone,
    email,
    address,
    created_at
FROM contacts";

const CONTACT_ORDER_SQL: &str = "ORDER BY name COLLATE UNICODE_NOCASE ASC, id ASC";

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteContactRepository<'_> {
    type Record = Contact;
    type Create = ContactCreate;
    type Update = ContactUpdate;

    fn ensure_schema(&self) -> RepoResult<()> {
        CONTACTS.ensure(self.conn)?;
        Ok(())
    }

    fn create(&self, input: &ContactCreate) -> RepoResult<RecordId> {
        write_in_transaction(self.conn, ENTITY, "create", |tx| {
            input.validate()?;
            tx.execute(
                "INSERT INTO contacts (
                    name,
                    gender,
                    phone,
                    email,
                    address
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    input.name.as_str(),
                    input.gender.as_deref(),
                    input.phone.as_deref(),
                    input.email.as_deref(),
                    input.address.as_deref(),
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Contact>> {
        fetch_contact(self.conn, id)
    }

    fn get_all(&self) -> RepoResult<Vec<Contact>> {
        query_all(
            self.conn,
            &format!("{CONTACT_SELECT_SQL} {CONTACT_ORDER_SQL};"),
            [],
            parse_contact_row,
        )
    }

    fn search(&self, term: &str) -> RepoResult<Vec<Contact>> {
        query_all(
            self.conn,
            &format!(
                "{CONTACT_SELECT_SQL}
                 WHERE unicode_fold(name) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(phone) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(email) LIKE unicode_fold(?1) ESCAPE '\\'
                 {CONTACT_ORDER_SQL};"
            ),
            [contains_pattern(term)],
            parse_contact_row,
        )
    }

    fn update(&self, id: RecordId, changes: &ContactUpdate) -> RepoResult<()> {
        write_in_transaction(self.conn, ENTITY, "update", |tx| {
            let current = fetch_contact(tx, id)?.ok_or(RepoError::NotFound(id))?;
            let row = changes.merge(&current);
            row.validate()?;

            let changed = tx.execute(
                "UPDATE contacts
                 SET
                    name = ?1,
                    gender = ?2,
                    phone = ?3,
                    email = ?4,
                    address = ?5
                 WHERE id = ?6;",
                params![
                    row.name.as_str(),
                    row.gender.as_deref(),
                    row.phone.as_deref(),
                    row.email.as_deref(),
                    row.address.as_deref(),
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
            let changed = tx.execute("DELETE FROM contacts WHERE id = ?1;", [id])?;
            if changed == 0 {
                return Err(RepoError::NotFound(id));
            }
            Ok(())
        })
    }
}

fn fetch_contact(conn: &Connection, id: RecordId) -> RepoResult<Option<Contact>> {
    query_one(
        conn,
        &format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"),
        [id],
        parse_contact_row,
    )
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        gender: row.get("gender")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}
