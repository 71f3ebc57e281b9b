//! Employee repository over the `employees` table.
//!
//! # Responsibility
//! - CRUD and search for employees.
//! - Join the referenced branch name into every read.
//!
//! # Invariants
//! - `date_of_birth` is stored as `YYYY-MM-DD` text.
//! - A branch reference to a missing branch is rejected by SQLite
//!   (`foreign_keys=ON`) and surfaces as `RepoError::Db`.

use super::{
    contains_pattern, parse_iso_date, query_all, query_one, write_in_transaction, RepoError,
    RepoResult, Repository,
};
use crate::db::schema::EMPLOYEES;
use crate::model::employee::{Employee, EmployeeCreate, EmployeeUpdate};
use crate::model::RecordId;
use rusqlite::{params, Connection, Row};

const ENTITY: &str = "employee";

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    e.id AS id,
    e.name AS name,
    e.date_of_birth AS date_of_birth,
    e.phone AS phone,
    e.email AS email,
    e.position AS position,
    e.branch_id AS branch_id,
    b.name AS branch_name
FROM employees e
LEFT JOIN branches b ON b.id = e.branch_id";

const EMPLOYEE_ORDER_SQL: &str = "ORDER BY e.name COLLATE UNICODE_NOCASE ASC, e.id ASC";

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Lists the employees assigned to one branch.
    pub fn list_by_branch(&self, branch_id: RecordId) -> RepoResult<Vec<Employee>> {
        query_all(
            self.conn,
            &format!("{EMPLOYEE_SELECT_SQL} WHERE e.branch_id = ?1 {EMPLOYEE_ORDER_SQL};"),
            [branch_id],
            parse_employee_row,
        )
    }
}

impl Repository for SqliteEmployeeRepository<'_> {
    type Record = Employee;
    type Create = EmployeeCreate;
    type Update = EmployeeUpdate;

    fn ensure_schema(&self) -> RepoResult<()> {
        EMPLOYEES.ensure(self.conn)?;
        Ok(())
    }

    fn create(&self, input: &EmployeeCreate) -> RepoResult<RecordId> {
        write_in_transaction(self.conn, ENTITY, "create", |tx| {
            input.validate()?;
            tx.execute(
                "INSERT INTO employees (
                    name,
                    date_of_birth,
                    phone,
                    email,
                    position,
                    branch_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    input.name.as_str(),
                    input.date_of_birth,
                    input.phone.as_str(),
                    input.email.as_str(),
                    input.position.as_str(),
                    input.branch_id,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Employee>> {
        fetch_employee(self.conn, id)
    }

    fn get_all(&self) -> RepoResult<Vec<Employee>> {
        query_all(
            self.conn,
            &format!("{EMPLOYEE_SELECT_SQL} {EMPLOYEE_ORDER_SQL};"),
            [],
            parse_employee_row,
        )
    }

    fn search(&self, term: &str) -> RepoResult<Vec<Employee>> {
        query_all(
            self.conn,
            &format!(
                "{EMPLOYEE_SELECT_SQL}
                 WHERE unicode_fold(e.name) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(e.phone) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(e.email) LIKE unicode_fold(?1) ESCAPE '\\'
                    OR unicode_fold(e.position) LIKE unicode_fold(?1) ESCAPE '\\'
                 {EMPLOYEE_ORDER_SQL};"
            ),
            [contains_pattern(term)],
            parse_employee_row,
        )
    }

    fn update(&self, id: RecordId, changes: &EmployeeUpdate) -> RepoResult<()> {
        write_in_transaction(self.conn, ENTITY, "update", |tx| {
            let current = fetch_employee(tx, id)?.ok_or(RepoError::NotFound(id))?;
            let row = changes.merge(&current);
            row.validate()?;

            let changed = tx.execute(
                "UPDATE employees
                 SET
                    name = ?1,
                    date_of_birth = ?2,
                    phone = ?3,
                    email = ?4,
                    position = ?5,
                    branch_id = ?6
                 WHERE id = ?7;",
                params![
                    row.name.as_str(),
                    row.date_of_birth,
                    row.phone.as_str(),
                    row.email.as_str(),
                    row.position.as_str(),
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
            let changed = tx.execute("DELETE FROM employees WHERE id = ?1;", [id])?;
            if changed == 0 {
                return Err(RepoError::NotFound(id));
            }
            Ok(())
        })
    }
}

fn fetch_employee(conn: &Connection, id: RecordId) -> RepoResult<Option<Employee>> {
    query_one(
        conn,
        &format!("{EMPLOYEE_SELECT_SQL} WHERE e.id = ?1;"),
        [id],
        parse_employee_row,
    )
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let date_text: String = row.get("date_of_birth")?;
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        date_of_birth: parse_iso_date("employees.date_of_birth", &date_text)?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        position: row.get("position")?,
        branch_id: row.get("branch_id")?,
        branch_name: row.get("branch_name")?,
    })
}
