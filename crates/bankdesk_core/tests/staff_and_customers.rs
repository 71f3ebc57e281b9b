use bankdesk_core::{
    BranchCreate, BranchId, CustomerCreate, CustomerUpdate, Database, DbError, EmployeeCreate,
    EmployeeUpdate, RepoError, Repository, SchemaVariant,
};
use chrono::NaiveDate;

#[test]
fn employee_roundtrip_includes_branch_name() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let branch_id = seed_branch(&db, "Maple");
    let repo = db.employees().unwrap();

    let input = employee("Dana Reyes", "Teller", branch_id);
    let id = repo.create(&input).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, input.name);
    assert_eq!(loaded.date_of_birth, input.date_of_birth);
    assert_eq!(loaded.phone, input.phone);
    assert_eq!(loaded.email, input.email);
    assert_eq!(loaded.position, "Teller");
    assert_eq!(loaded.branch_id, branch_id);
    assert_eq!(loaded.branch_name.as_deref(), Some("Maple"));
}

#[test]
fn employee_with_unknown_branch_is_rejected_by_storage() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let repo = db.employees().unwrap();

    let err = repo.create(&employee("Dana Reyes", "Teller", 77)).unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn employee_partial_update_preserves_omitted_fields() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let maple = seed_branch(&db, "Maple");
    let birch = seed_branch(&db, "Birch");
    let repo = db.employees().unwrap();

    let input = employee("Dana Reyes", "Teller", maple);
    let id = repo.create(&input).unwrap();

    let promotion = EmployeeUpdate {
        position: Some("Branch Manager".to_string()),
        branch_id: Some(birch),
        ..EmployeeUpdate::default()
    };
    repo.update(id, &promotion).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.position, "Branch Manager");
    assert_eq!(loaded.branch_id, birch);
    assert_eq!(loaded.branch_name.as_deref(), Some("Birch"));
    assert_eq!(loaded.name, input.name);
    assert_eq!(loaded.date_of_birth, input.date_of_birth);
    assert_eq!(loaded.email, input.email);
}

#[test]
fn employee_search_covers_position_and_orders_by_name() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let branch_id = seed_branch(&db, "Maple");
    let repo = db.employees().unwrap();

    repo.create(&employee("Zoe Park", "Loan Officer", branch_id))
        .unwrap();
    repo.create(&employee("Ari Cole", "loan clerk", branch_id))
        .unwrap();
    repo.create(&employee("Mia Ford", "Teller", branch_id))
        .unwrap();

    let names: Vec<_> = repo
        .search("LOAN")
        .unwrap()
        .into_iter()
        .map(|employee| employee.name)
        .collect();
    assert_eq!(names, vec!["Ari Cole", "Zoe Park"]);
    assert!(repo.search("auditor").unwrap().is_empty());
}

#[test]
fn employees_can_be_listed_per_branch() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let maple = seed_branch(&db, "Maple");
    let birch = seed_branch(&db, "Birch");
    let repo = db.employees().unwrap();

    repo.create(&employee("Zoe Park", "Teller", maple)).unwrap();
    repo.create(&employee("Ari Cole", "Teller", birch)).unwrap();

    let at_maple = repo.list_by_branch(maple).unwrap();
    assert_eq!(at_maple.len(), 1);
    assert_eq!(at_maple[0].name, "Zoe Park");
}

#[test]
fn employee_delete_then_get_is_none() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let branch_id = seed_branch(&db, "Maple");
    let repo = db.employees().unwrap();

    let id = repo.create(&employee("Zoe Park", "Teller", branch_id)).unwrap();
    repo.delete(id).unwrap();

    assert!(repo.get_by_id(id).unwrap().is_none());
    assert!(matches!(repo.delete(id), Err(RepoError::NotFound(missing)) if missing == id));
}

#[test]
fn corrupt_stored_date_is_invalid_data() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let branch_id = seed_branch(&db, "Maple");
    let repo = db.employees().unwrap();
    let id = repo.create(&employee("Zoe Park", "Teller", branch_id)).unwrap();

    db.connection()
        .unwrap()
        .execute(
            "UPDATE employees SET date_of_birth = '04/12/1990' WHERE id = ?1;",
            [id],
        )
        .unwrap();

    let err = repo.get_by_id(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn customer_lifecycle_with_partial_update() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let branch_id = seed_branch(&db, "Maple");
    let repo = db.customers().unwrap();

    let input = CustomerCreate {
        name: "Lee Wong".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1978, 1, 30).unwrap(),
        phone: "555-0199".to_string(),
        email: "lee@mail.test".to_string(),
        address: "9 Oak Ave".to_string(),
        branch_id,
    };
    let id = repo.create(&input).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.address, "9 Oak Ave");
    assert_eq!(loaded.branch_name.as_deref(), Some("Maple"));

    let moved = CustomerUpdate {
        address: Some("12 Pine Ct".to_string()),
        ..CustomerUpdate::default()
    };
    repo.update(id, &moved).unwrap();

    let updated = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(updated.address, "12 Pine Ct");
    assert_eq!(updated.phone, "555-0199");
    assert_eq!(updated.date_of_birth, input.date_of_birth);

    assert_eq!(repo.search("mail.test").unwrap().len(), 1);
    assert!(repo.search("Oak").unwrap().is_empty());

    repo.delete(id).unwrap();
    assert!(repo.get_by_id(id).unwrap().is_none());
    assert!(matches!(
        repo.update(id, &CustomerUpdate::default()),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn customer_with_unknown_branch_is_rejected_by_storage() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let repo = db.customers().unwrap();

    let err = repo.create(&customer("Lee Wong", 77)).unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn customers_are_listed_by_name_regardless_of_insert_order() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let branch_id = seed_branch(&db, "Maple");
    let repo = db.customers().unwrap();

    repo.create(&customer("Zed Alder", branch_id)).unwrap();
    repo.create(&customer("ana Bell", branch_id)).unwrap();
    repo.create(&customer("Óscar Ruiz", branch_id)).unwrap();
    repo.create(&customer("Mo Chen", branch_id)).unwrap();

    let names: Vec<_> = repo
        .get_all()
        .unwrap()
        .into_iter()
        .map(|customer| customer.name)
        .collect();
    assert_eq!(names, vec!["ana Bell", "Mo Chen", "Óscar Ruiz", "Zed Alder"]);
}

fn seed_branch(db: &Database, name: &str) -> BranchId {
    db.branches()
        .unwrap()
        .create(&BranchCreate::new(name, "1 Main St", "Springfield", "IL", "62704"))
        .unwrap()
}

fn employee(name: &str, position: &str, branch_id: BranchId) -> EmployeeCreate {
    EmployeeCreate {
        name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
        phone: "555-0101".to_string(),
        email: format!("{}@bank.test", name.to_lowercase().replace(' ', ".")),
        position: position.to_string(),
        branch_id,
    }
}

fn customer(name: &str, branch_id: BranchId) -> CustomerCreate {
    CustomerCreate {
        name: name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1978, 1, 30).unwrap(),
        phone: "555-0199".to_string(),
        email: "customer@mail.test".to_string(),
        address: "9 Oak Ave".to_string(),
        branch_id,
    }
}
