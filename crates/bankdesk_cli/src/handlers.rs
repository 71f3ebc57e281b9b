//! Use-case handlers for the front-desk flows.
//!
//! # Responsibility
//! - Expose one stable function per entity action (load, search, select,
//!   save, update, delete) over a borrowed [`Database`].
//! - Validate raw form input before storage is touched.
//! - Fold every outcome into a plain response envelope.
//!
//! # Invariants
//! - Handlers never panic; every failure becomes `ok = false` plus a message.
//! - Form messages are returned verbatim so callers can show them as-is.

use crate::forms::{BranchForm, ContactForm, CustomerForm, EmployeeForm, FormError};
use bankdesk_core::{
    Branch, Contact, Customer, Database, DbResult, Employee, RecordId, RecordService, RepoError,
    Repository,
};
use log::info;

/// Generic action response envelope for write flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the created or saved record.
    pub record_id: Option<RecordId>,
    /// Human-readable message for the operator.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, record_id: Option<RecordId>) -> Self {
        Self {
            ok: true,
            record_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

/// List envelope for load and search flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse<T> {
    pub ok: bool,
    /// Records in display order; empty on failure.
    pub items: Vec<T>,
    pub message: String,
}

/// Single-record envelope for the select flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailResponse<T> {
    pub ok: bool,
    /// `None` when the id is unknown or the lookup failed.
    pub item: Option<T>,
    pub message: String,
}

#[derive(Clone, Copy)]
struct Kind {
    name: &'static str,
    title: &'static str,
}

const BRANCH: Kind = Kind {
    name: "branch",
    title: "Branch",
};
const EMPLOYEE: Kind = Kind {
    name: "employee",
    title: "Employee",
};
const CUSTOMER: Kind = Kind {
    name: "customer",
    title: "Customer",
};
const CONTACT: Kind = Kind {
    name: "contact",
    title: "Contact",
};

pub fn load_branches(db: &Database) -> ListResponse<Branch> {
    load(BRANCH, db.branches())
}

pub fn search_branches(db: &Database, term: &str) -> ListResponse<Branch> {
    search(BRANCH, db.branches(), term)
}

pub fn select_branch(db: &Database, id: RecordId) -> DetailResponse<Branch> {
    select(BRANCH, db.branches(), id)
}

/// Saves the full branch form: rewrites `current` when set, inserts otherwise.
pub fn save_branch(
    db: &Database,
    current: Option<RecordId>,
    form: &BranchForm,
) -> ActionResponse {
    save(BRANCH, db.branches(), current, form.to_create())
}

pub fn update_branch(db: &Database, id: RecordId, form: &BranchForm) -> ActionResponse {
    update(BRANCH, db.branches(), id, form.to_update())
}

pub fn delete_branch(db: &Database, id: RecordId) -> ActionResponse {
    delete(BRANCH, db.branches(), id)
}

pub fn load_employees(db: &Database) -> ListResponse<Employee> {
    load(EMPLOYEE, db.employees())
}

pub fn search_employees(db: &Database, term: &str) -> ListResponse<Employee> {
    search(EMPLOYEE, db.employees(), term)
}

pub fn select_employee(db: &Database, id: RecordId) -> DetailResponse<Employee> {
    select(EMPLOYEE, db.employees(), id)
}

pub fn save_employee(
    db: &Database,
    current: Option<RecordId>,
    form: &EmployeeForm,
) -> ActionResponse {
    save(EMPLOYEE, db.employees(), current, form.to_create())
}

pub fn update_employee(db: &Database, id: RecordId, form: &EmployeeForm) -> ActionResponse {
    update(EMPLOYEE, db.employees(), id, form.to_update())
}

pub fn delete_employee(db: &Database, id: RecordId) -> ActionResponse {
    delete(EMPLOYEE, db.employees(), id)
}

pub fn load_customers(db: &Database) -> ListResponse<Customer> {
    load(CUSTOMER, db.customers())
}

pub fn search_customers(db: &Database, term: &str) -> ListResponse<Customer> {
    search(CUSTOMER, db.customers(), term)
}

pub fn select_customer(db: &Database, id: RecordId) -> DetailResponse<Customer> {
    select(CUSTOMER, db.customers(), id)
}

pub fn save_customer(
    db: &Database,
    current: Option<RecordId>,
    form: &CustomerForm,
) -> ActionResponse {
    save(CUSTOMER, db.customers(), current, form.to_create())
}

pub fn update_customer(db: &Database, id: RecordId, form: &CustomerForm) -> ActionResponse {
    update(CUSTOMER, db.customers(), id, form.to_update())
}

pub fn delete_customer(db: &Database, id: RecordId) -> ActionResponse {
    delete(CUSTOMER, db.customers(), id)
}

pub fn load_contacts(db: &Database) -> ListResponse<Contact> {
    load(CONTACT, db.contacts())
}

pub fn search_contacts(db: &Database, term: &str) -> ListResponse<Contact> {
    search(CONTACT, db.contacts(), term)
}

pub fn select_contact(db: &Database, id: RecordId) -> DetailResponse<Contact> {
    select(CONTACT, db.contacts(), id)
}

pub fn save_contact(
    db: &Database,
    current: Option<RecordId>,
    form: &ContactForm,
) -> ActionResponse {
    save(CONTACT, db.contacts(), current, form.to_create())
}

pub fn update_contact(db: &Database, id: RecordId, form: &ContactForm) -> ActionResponse {
    update(CONTACT, db.contacts(), id, form.to_update())
}

pub fn delete_contact(db: &Database, id: RecordId) -> ActionResponse {
    delete(CONTACT, db.contacts(), id)
}

fn load<R: Repository>(kind: Kind, repo: DbResult<R>) -> ListResponse<R::Record> {
    list_response(kind, "load", with_service(repo, |service| service.get_all()))
}

fn search<R: Repository>(kind: Kind, repo: DbResult<R>, term: &str) -> ListResponse<R::Record> {
    list_response(
        kind,
        "search",
        with_service(repo, |service| service.search(term)),
    )
}

fn select<R: Repository>(
    kind: Kind,
    repo: DbResult<R>,
    id: RecordId,
) -> DetailResponse<R::Record> {
    match with_service(repo, |service| service.get_by_id(id)) {
        Ok(Some(item)) => DetailResponse {
            ok: true,
            item: Some(item),
            message: format!("{} {id} loaded.", kind.title),
        },
        Ok(None) => DetailResponse {
            ok: false,
            item: None,
            message: not_found_message(kind, id),
        },
        Err(Failure::NotFound(id)) => DetailResponse {
            ok: false,
            item: None,
            message: not_found_message(kind, id),
        },
        Err(Failure::Other(message)) => DetailResponse {
            ok: false,
            item: None,
            message: failed_message(kind, "select", &message),
        },
    }
}

fn save<R>(
    kind: Kind,
    repo: DbResult<R>,
    current: Option<RecordId>,
    input: Result<R::Create, FormError>,
) -> ActionResponse
where
    R: Repository,
    R::Create: Clone,
    R::Update: From<R::Create>,
{
    let input = match input {
        Ok(input) => input,
        Err(err) => return form_rejected(kind, "save", err),
    };

    match with_service(repo, |service| service.save(current, &input)) {
        Ok(id) => {
            let verb = if current.is_some() { "updated" } else { "created" };
            ActionResponse::success(format!("{} {verb}.", kind.title), Some(id))
        }
        Err(Failure::NotFound(id)) => ActionResponse::failure(not_found_message(kind, id)),
        Err(Failure::Other(message)) => {
            ActionResponse::failure(failed_message(kind, "save", &message))
        }
    }
}

fn update<R: Repository>(
    kind: Kind,
    repo: DbResult<R>,
    id: RecordId,
    changes: Result<R::Update, FormError>,
) -> ActionResponse {
    let changes = match changes {
        Ok(changes) => changes,
        Err(err) => return form_rejected(kind, "update", err),
    };

    match with_service(repo, |service| service.update(id, &changes)) {
        Ok(()) => ActionResponse::success(format!("{} updated.", kind.title), Some(id)),
        Err(Failure::NotFound(id)) => ActionResponse::failure(not_found_message(kind, id)),
        Err(Failure::Other(message)) => {
            ActionResponse::failure(failed_message(kind, "update", &message))
        }
    }
}

fn delete<R: Repository>(kind: Kind, repo: DbResult<R>, id: RecordId) -> ActionResponse {
    match with_service(repo, |service| service.delete(id)) {
        Ok(()) => ActionResponse::success(format!("{} deleted.", kind.title), Some(id)),
        Err(Failure::NotFound(id)) => ActionResponse::failure(not_found_message(kind, id)),
        Err(Failure::Other(message)) => {
            ActionResponse::failure(failed_message(kind, "delete", &message))
        }
    }
}

enum Failure {
    NotFound(RecordId),
    Other(String),
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

fn with_service<R: Repository, T>(
    repo: DbResult<R>,
    f: impl FnOnce(&RecordService<R>) -> Result<T, RepoError>,
) -> Result<T, Failure> {
    let repo = repo.map_err(|err| Failure::Other(err.to_string()))?;
    let service = RecordService::new(repo);
    f(&service).map_err(|err| match err {
        RepoError::NotFound(id) => Failure::NotFound(id),
        other => Failure::Other(other.to_string()),
    })
}

fn list_response<T>(kind: Kind, op: &str, result: Result<Vec<T>, Failure>) -> ListResponse<T> {
    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No results.".to_string()
            } else {
                format!("Found {} result(s).", items.len())
            };
            ListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => ListResponse {
            ok: false,
            items: Vec::new(),
            message: failed_message(kind, op, &err.to_string()),
        },
    }
}

fn form_rejected(kind: Kind, op: &str, err: FormError) -> ActionResponse {
    info!(
        "event=form_rejected module=cli entity={} op={op} reason={err}",
        kind.name
    );
    ActionResponse::failure(err.to_string())
}

fn not_found_message(kind: Kind, id: RecordId) -> String {
    format!("{} {id} not found.", kind.title)
}

fn failed_message(kind: Kind, op: &str, detail: &str) -> String {
    format!("{op}_{} failed: {detail}", kind.name)
}
