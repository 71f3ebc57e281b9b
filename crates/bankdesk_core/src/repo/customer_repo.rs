//! Customer repository over the `customers` table.
//!
//! Mirrors the employee repository: branch name joined on read, search over
//! name, phone and email.

use super::{
    contains_pattern, parse_iso_date, query_all, query_one, write_in_transaction, RepoError,
    RepoResult, Repository,
};
use crate::db::schema::CUSTOMERS;
use crate::model::customer::{Customer, CustomerCreate, CustomerUpdate};
use crate::model::RecordId;
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "customer";

const CUSTOMER_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.name AS name,
    c.date_of_birth AS date_of_birth,
    c.phone AS phone,
    c.email AS email,
    c.address AS address,
    c.branch_id AS branch_id,
    b.name AS branch_name
FROM customers c
LEFT JOIN branches b ON b.id = c.branch_id";

const CUSTOMER_ORDER_SQL: &str = "ORDER BY c.name COLLATE UNICODE_NOCASE ASC, c.id ASC";

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteCustomerRepository<'_> {
    type Record = Customer;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;

    fn ensure_schema(&self) -> RepoResult<()> {
        CUSTOMERS.ensure(self.conn)?;
        Ok(())
    }

    fn create(&self, input: &CustomerCreate) -> RepoResult<RecordId> {
        write_in_transaction(self.conn, ENTITY, "create", |tx| {
            input.validate()?;
            tx.execute(
                "INSERT INTO customers (
                    name,
                    date_of_birth,
                    phone,
                    email,
                    address,
                    branch_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    input.name.as_str(),
                    input.date_of_birth,
                    input.phone.as_str(),
                    input.email.as_str(),
                    input.address.as_str(),
                    input.branch_id,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Customer>> {
        fetch_customer(self.conn, id)
    }

    fn get_all(&self) -> RepoResult<Vec<Customer>> {
        query_all(
            self.conn,
            &format!("{CUSTOMER_SELECT_SQL} {CUSTOMER_ORDER_SQL};"),
            [],
            parse_customer_row,
        )
    }

    fn search(&self, term: &str) -> RepoResult<Vec<Customer>> {
        query_all(
            self.conn,
            &format!(
                "{CUSTOMER_SELECT_SQL}
                 WHERE unicode_fold(c.name) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(c.phone) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(c.email) LIKE unicode_fold(?1) ESCAPE '\\'
                 {CUSTOMER_ORDER_SQL};"
            ),
            [contains_pattern(term)],
            parse_customer_row,
        )
    }

    fn update(&self, id: RecordId, changes: &CustomerUpdate) -> RepoResult<()> {
        write_in_transaction(self.conn, ENTITY, "update", |tx| {
            let current = fetch_customer(tx, id)?.ok_or(RepoError::NotFound(id))?;
            let row = changes.merge(&current);
            row.validate()?;

            let changed = tx.execute(
                "UPDATE customers
                 SET
                    name = ?1,
                    date_of_birth = ?2,
                    phone = ?3,
                    email = ?4,
                    address = ?5,
                    branch_id = ?6
                 WHERE id = ?7;",
                params![
                    row.name.as_str(),
                    row.date_of_birth,
                    row.phone.as_str(),
                    row.email.as_str(),
                    row.address.as_str(),
                    row.branch_id,
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
            let changed = tx.execute("DELETE FROM customers WHERE id = ?1;", [id])?;
            if changed == 0 {
                return Err(RepoError::NotFound(id));
            }
            Ok(())
        })
    }
}

fn fetch_customer(conn: &Connection, id: RecordId) -> RepoResult<Option<Customer>> {
    query_one(
        conn,
        &format!("{CUSTOMER_SELECT_SQL} WHERE c.id = ?1;"),
        [id],
        parse_customer_row,
    )
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let date_text: String = row.get("date_of_birth")?;
    Ok(Customer {
        id: row.get("id")?,
        name: row.get("name")?,
        date_of_birth: parse_iso_date("customers.date_of_birth", &date_text)?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        branch_id: row.get("branch_id")?,
        branch_name: row.get("branch_name")?,
    })
}
