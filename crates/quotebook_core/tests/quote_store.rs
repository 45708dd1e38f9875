use quotebook_core::{
    derive_categories, seed_quotes, Quote, QuoteStore, QuoteValidationError, SlotRepository,
    SqliteSlotRepository, StoreError, QUOTES_SLOT,
};

fn durable_at(path: &std::path::Path) -> SqliteSlotRepository {
    SqliteSlotRepository::open_durable(path).unwrap()
}

#[test]
fn add_survives_restart_exactly_once_in_append_position() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotes.db");

    {
        let mut store = QuoteStore::load(durable_at(&path)).unwrap();
        let added = store.add("  Stay curious.  ", " Life ").unwrap();
        assert_eq!(added, Quote::new("Stay curious.", "Life").unwrap());
    }

    let reloaded = QuoteStore::load(durable_at(&path)).unwrap();
    let expected = Quote::new("Stay curious.", "Life").unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded.quotes().last(), Some(&expected));
    assert_eq!(
        reloaded
            .quotes()
            .iter()
            .filter(|quote| **quote == expected)
            .count(),
        1
    );
    assert_eq!(&reloaded.quotes()[..3], seed_quotes().as_slice());
}

#[test]
fn add_rejects_blank_fields_without_mutation() {
    let repo = SqliteSlotRepository::open_session().unwrap();
    let mut store = QuoteStore::load(repo.clone()).unwrap();

    let err = store.add("   ", "Life").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(QuoteValidationError::EmptyText)
    ));
    let err = store.add("text", "").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(QuoteValidationError::EmptyCategory)
    ));

    assert_eq!(store.len(), 3);
    assert_eq!(repo.get_slot(QUOTES_SLOT).unwrap(), None);
}

#[test]
fn invalid_json_in_durable_slot_loads_seed() {
    let repo = SqliteSlotRepository::open_session().unwrap();
    repo.set_slot(QUOTES_SLOT, "{not json").unwrap();

    let store = QuoteStore::load(repo).unwrap();
    assert_eq!(store.quotes(), seed_quotes().as_slice());
}

#[test]
fn slot_with_invalid_record_loads_seed() {
    let repo = SqliteSlotRepository::open_session().unwrap();
    repo.set_slot(QUOTES_SLOT, r#"[{"text":"","category":"Life"}]"#)
        .unwrap();

    let store = QuoteStore::load(repo).unwrap();
    assert_eq!(store.quotes(), seed_quotes().as_slice());
}

#[test]
fn save_then_load_roundtrips_exactly() {
    let repo = SqliteSlotRepository::open_session().unwrap();
    let mut store = QuoteStore::load(repo.clone()).unwrap();
    store.add("one", "A").unwrap();
    store.add("two", "B").unwrap();

    let reloaded = QuoteStore::load(repo).unwrap();
    assert_eq!(reloaded.quotes(), store.quotes());
}

#[test]
fn merge_is_idempotent() {
    let repo = SqliteSlotRepository::open_session().unwrap();
    let mut store = QuoteStore::load(repo.clone()).unwrap();
    let batch = vec![
        Quote::new("remote one", "Remote").unwrap(),
        Quote::new("Life is what happens when you're busy making other plans.", "Life").unwrap(),
        Quote::new("remote two", "Life").unwrap(),
    ];

    let first = store.merge(batch.clone()).unwrap();
    assert_eq!(first.appended, 2);
    assert!(first.changed());
    let after_first = store.quotes().to_vec();

    let second = store.merge(batch).unwrap();
    assert_eq!(second.appended, 0);
    assert!(!second.changed());
    assert_eq!(store.quotes(), after_first.as_slice());
    assert_eq!(QuoteStore::load(repo).unwrap().quotes(), after_first.as_slice());
}

#[test]
fn merge_identity_is_exact_match_on_both_fields() {
    let repo = SqliteSlotRepository::open_session().unwrap();
    let mut store = QuoteStore::load(repo).unwrap();

    let report = store
        .merge(vec![
            Quote::new("JavaScript is the language of the web.", "programming").unwrap(),
            Quote::new("JavaScript is the language of the web.", "Programming").unwrap(),
        ])
        .unwrap();
    assert_eq!(report.appended, 1);
    assert_eq!(store.quotes().last().unwrap().category(), "programming");
}

#[test]
fn seed_plus_life_quote_keeps_category_index_size() {
    let repo = SqliteSlotRepository::open_session().unwrap();
    let mut store = QuoteStore::load(repo).unwrap();
    store.add("X", "Life").unwrap();

    assert_eq!(
        derive_categories(store.quotes()),
        vec!["all", "Motivation", "Life", "Programming"]
    );
}
