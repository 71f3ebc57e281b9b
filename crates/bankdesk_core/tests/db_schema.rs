use bankdesk_core::db::schema::table_exists;
use bankdesk_core::db::{open_db, open_db_in_memory};
use bankdesk_core::{
    BranchCreate, ConnectionSettings, Database, DbError, RepoError, Repository, SchemaVariant,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_bank_tables_only() {
    let conn = open_db_in_memory(SchemaVariant::Bank).unwrap();

    assert_table_exists(&conn, "branches");
    assert_table_exists(&conn, "employees");
    assert_table_exists(&conn, "customers");
    assert!(!table_exists(&conn, "contacts").unwrap());
}

#[test]
fn open_db_in_memory_creates_contacts_table_only() {
    let conn = open_db_in_memory(SchemaVariant::Contacts).unwrap();

    assert_table_exists(&conn, "contacts");
    assert!(!table_exists(&conn, "branches").unwrap());
}

#[test]
fn opened_connection_enforces_foreign_keys() {
    let conn = open_db_in_memory(SchemaVariant::Bank).unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.sqlite3");

    let first = open_db(&path, SchemaVariant::Bank).unwrap();
    first
        .execute(
            "INSERT INTO branches (name, address, city, state, postal_code)
             VALUES ('Elm St', '123 Elm', 'Springfield', 'IL', '62704');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path, SchemaVariant::Bank).unwrap();
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM branches;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn database_open_uses_settings_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ConnectionSettings {
        database: dir.path().join("project").to_string_lossy().into_owned(),
        ..ConnectionSettings::default()
    };

    let mut db = Database::open(&settings).unwrap();
    db.branches()
        .unwrap()
        .create(&BranchCreate::new("Elm St", "123 Elm", "Springfield", "IL", "62704"))
        .unwrap();
    db.close().unwrap();

    assert!(dir.path().join("project.sqlite3").exists());
}

#[test]
fn ensure_schema_is_safe_to_repeat() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let branches = db.branches().unwrap();
    let id = branches
        .create(&BranchCreate::new("Elm St", "123 Elm", "Springfield", "IL", "62704"))
        .unwrap();

    db.ensure_schema().unwrap();
    branches.ensure_schema().unwrap();

    assert!(branches.get_by_id(id).unwrap().is_some());
}

#[test]
fn from_connection_bootstraps_a_bare_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let db = Database::from_connection(conn, SchemaVariant::Contacts).unwrap();

    assert_eq!(db.variant(), SchemaVariant::Contacts);
    assert_table_exists(db.connection().unwrap(), "contacts");
}

#[test]
fn from_connection_applies_the_same_bootstrap_as_open() {
    let conn = Connection::open_in_memory().unwrap();
    let db = Database::from_connection(conn, SchemaVariant::Bank).unwrap();
    let conn = db.connection().unwrap();

    let busy_timeout_ms: i64 = conn
        .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(busy_timeout_ms, 5000);

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);

    let folded: String = conn
        .query_row("SELECT unicode_fold('Émile');", [], |row| row.get(0))
        .unwrap();
    assert_eq!(folded, "emile");
}

#[test]
fn close_is_idempotent_and_blocks_further_access() {
    let mut db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    assert!(db.is_open());

    db.close().unwrap();
    db.close().unwrap();

    assert!(!db.is_open());
    assert!(matches!(db.connection(), Err(DbError::Closed)));
    assert!(matches!(db.branches(), Err(DbError::Closed)));
    assert!(matches!(db.ensure_schema(), Err(DbError::Closed)));
}

#[test]
fn repositories_outside_the_variant_are_unavailable() {
    let db = Database::open_in_memory(SchemaVariant::Contacts).unwrap();

    match db.branches() {
        Err(DbError::TableUnavailable { table, variant }) => {
            assert_eq!(table, "branches");
            assert_eq!(variant, SchemaVariant::Contacts);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected table unavailable error"),
    }
    assert!(db.contacts().is_ok());
}

#[test]
fn writes_through_raw_connection_without_schema_fail_as_db_errors() {
    let conn = Connection::open_in_memory().unwrap();
    let repo = bankdesk_core::SqliteBranchRepository::new(&conn);

    let err = repo
        .create(&BranchCreate::new("Elm St", "123 Elm", "Springfield", "IL", "62704"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));

    repo.ensure_schema().unwrap();
    assert_eq!(
        repo.create(&BranchCreate::new("Elm St", "123 Elm", "Springfield", "IL", "62704"))
            .unwrap(),
        1
    );
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert!(
        table_exists(conn, table_name).unwrap(),
        "table {table_name} does not exist"
    );
}
