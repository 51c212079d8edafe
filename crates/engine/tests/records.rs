use async_trait::async_trait;

use engine::{
    Category, EngineError, FormState, MemoryStore, RecordId, RecordKind, RecordStore,
    SequenceSource, StoreError, SubmitOutcome, TransactionRecord, form,
};

fn lunch_form() -> FormState {
    FormState {
        kind: RecordKind::Expense,
        description: "Lunch".to_string(),
        amount: "R$ 45,00".to_string(),
        date: "12/05/2024".to_string(),
        category: "Alimentação".to_string(),
    }
}

/// Collaborator that fails every call, for the error-surface path.
struct BrokenStore;

#[async_trait]
impl RecordStore for BrokenStore {
    async fn create(&self, _record: &TransactionRecord) -> Result<(), StoreError> {
        Err(StoreError::Server("boom".to_string()))
    }

    async fn update(&self, _record: &TransactionRecord) -> Result<(), StoreError> {
        Err(StoreError::Server("boom".to_string()))
    }
}

#[tokio::test]
async fn create_flow_builds_and_dispatches() {
    let store = MemoryStore::new();
    let mut ids = SequenceSource::new();

    let outcome = form::save(&lunch_form(), None, &mut ids, &store).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Created(RecordId::from("1")));
    let stored = store.get(&RecordId::from("1")).unwrap();
    assert_eq!(stored.description, "Lunch");
    assert_eq!(stored.amount.minor(), 4500);
    assert_eq!(stored.category, Category::Alimentacao);
    assert_eq!(stored.kind, RecordKind::Expense);
}

#[tokio::test]
async fn invalid_input_never_reaches_the_store() {
    let store = MemoryStore::new();
    let mut ids = SequenceSource::new();

    let mut zero_amount = lunch_form();
    zero_amount.amount = "R$ 0,00".to_string();
    let err = form::save(&zero_amount, None, &mut ids, &store).await.unwrap_err();

    assert!(matches!(err, EngineError::InvalidInput(_)));
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn update_flow_keeps_the_record_identity() {
    let store = MemoryStore::new();
    let mut ids = SequenceSource::new();

    let existing = lunch_form().build_record(None, &mut ids).unwrap();
    store.create(&existing).await.unwrap();

    let mut edited = FormState::from_record(&existing);
    edited.description = "Jantar no centro".to_string();
    edited.amount = "R$ 80,00".to_string();

    let outcome = form::save(&edited, Some(&existing), &mut ids, &store)
        .await
        .unwrap();

    assert_eq!(outcome, SubmitOutcome::Updated(existing.id.clone()));
    let stored = store.get(&existing.id).unwrap();
    assert_eq!(stored.description, "Jantar no centro");
    assert_eq!(stored.amount.minor(), 8000);
    assert_eq!(store.records().len(), 1);
}

#[tokio::test]
async fn each_create_mints_a_distinct_id() {
    let store = MemoryStore::new();
    let mut ids = SequenceSource::new();

    let first = form::save(&lunch_form(), None, &mut ids, &store).await.unwrap();
    let second = form::save(&lunch_form(), None, &mut ids, &store).await.unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(store.records().len(), 2);
}

#[tokio::test]
async fn store_failure_surfaces_without_local_mutation() {
    let mut ids = SequenceSource::new();

    let err = form::save(&lunch_form(), None, &mut ids, &BrokenStore)
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Store(StoreError::Server(_))));
}

#[tokio::test]
async fn date_shape_failure_is_reported_after_stage_one() {
    let store = MemoryStore::new();
    let mut ids = SequenceSource::new();

    let mut iso_date = lunch_form();
    iso_date.date = "2024-05-12".to_string();
    let err = form::save(&iso_date, None, &mut ids, &store).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidDateFormat(_)));

    // But a missing field masks the bad date: stage 1 short-circuits.
    let mut both_wrong = iso_date.clone();
    both_wrong.category = String::new();
    let err = form::save(&both_wrong, None, &mut ids, &store).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn permissive_dates_flow_through_to_the_store() {
    let store = MemoryStore::new();
    let mut ids = SequenceSource::new();

    let mut impossible = lunch_form();
    impossible.date = "31/13/2024".to_string();
    form::save(&impossible, None, &mut ids, &store).await.unwrap();

    let stored = store.get(&RecordId::from("1")).unwrap();
    assert_eq!(stored.date.as_str(), "31/13/2024");
}
