//! Core data-access logic for bankdesk.
//! This crate is the single source of truth for storage invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ConnectionSettings, SqliteTarget};
pub use db::{Database, DbError, DbResult, SchemaVariant};
pub use logging::{default_log_level, init_logging, LogConfig, LoggingError};
pub use model::branch::{Branch, BranchCreate, BranchUpdate};
pub use model::contact::{Contact, ContactCreate, ContactUpdate};
pub use model::customer::{Customer, CustomerCreate, CustomerUpdate};
pub use model::employee::{Employee, EmployeeCreate, EmployeeUpdate};
pub use model::validation::ValidationError;
pub use model::{BranchId, RecordId};
pub use repo::branch_repo::SqliteBranchRepository;
pub use repo::contact_repo::SqliteContactRepository;
pub use repo::customer_repo::SqliteCustomerRepository;
pub use repo::employee_repo::SqliteEmployeeRepository;
pub use repo::{RepoError, RepoResult, Repository};
pub use service::record_service::RecordService;
