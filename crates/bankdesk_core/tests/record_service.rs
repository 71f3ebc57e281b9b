use bankdesk_core::{
    BranchCreate, Database, RecordService, RepoError, Repository, SchemaVariant,
};

#[test]
fn save_without_selection_creates_and_with_selection_rewrites() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let service = RecordService::new(db.branches().unwrap());

    let id = service
        .save(None, &BranchCreate::new("Elm St", "123 Elm", "Springfield", "IL", "62704"))
        .unwrap();

    let saved_id = service
        .save(
            Some(id),
            &BranchCreate::new("Elm Street", "125 Elm", "Springfield", "IL", "62704"),
        )
        .unwrap();
    assert_eq!(saved_id, id);

    let all = service.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Elm Street");
    assert_eq!(all[0].address, "125 Elm");
}

#[test]
fn save_with_unknown_selection_is_not_found() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let service = RecordService::new(db.branches().unwrap());

    let err = service
        .save(Some(5), &BranchCreate::new("Elm St", "123 Elm", "Springfield", "IL", "62704"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(5)));
    assert!(service.get_all().unwrap().is_empty());
}

#[test]
fn blank_search_lists_everything() {
    let db = Database::open_in_memory(SchemaVariant::Bank).unwrap();
    let service = RecordService::new(db.branches().unwrap());
    service
        .create(&BranchCreate::new("Elm St", "123 Elm", "Springfield", "IL", "62704"))
        .unwrap();
    service
        .create(&BranchCreate::new("Oak St", "9 Oak", "Peoria", "IL", "61602"))
        .unwrap();

    assert_eq!(service.search("   ").unwrap().len(), 2);
    assert_eq!(service.search(" oak ").unwrap().len(), 1);
    assert_eq!(
        service.repository().get_all().unwrap(),
        service.get_all().unwrap()
    );
}
