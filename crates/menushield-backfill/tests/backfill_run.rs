use async_trait::async_trait;
use menushield_backfill::{
    translation_status, BackfillConfig, BackfillError, BackfillResult, Backfiller, EntityStore,
    InMemoryStore, RecordUpdate, TranslatableRecord,
};
use menushield_test_utils::{record, record_with_stored};
use menushield_translate::{EntityKind, TemplateTranslationService, TranslatorConfig};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn backfiller(config: BackfillConfig) -> Backfiller {
    let service = TemplateTranslationService::new(TranslatorConfig::default()).unwrap();
    Backfiller::new(Arc::new(service), config)
}

fn dish_store(records: Vec<TranslatableRecord>) -> InMemoryStore {
    InMemoryStore::new().with_records(EntityKind::Dish, records)
}

/// Store whose listed write-back calls fail
struct FlakyStore {
    inner: InMemoryStore,
    failing_calls: Vec<usize>,
    calls: Mutex<usize>,
}

#[async_trait]
impl EntityStore for FlakyStore {
    async fn fetch_all(&self, kind: EntityKind) -> BackfillResult<Vec<TranslatableRecord>> {
        self.inner.fetch_all(kind).await
    }

    async fn apply_updates(&self, kind: EntityKind, updates: &[RecordUpdate]) -> BackfillResult<()> {
        let call = {
            let mut calls = self.calls.lock();
            *calls += 1;
            *calls
        };
        if self.failing_calls.contains(&call) {
            return Err(BackfillError::store("connection reset"));
        }
        self.inner.apply_updates(kind, updates).await
    }
}

struct UnreachableStore;

#[async_trait]
impl EntityStore for UnreachableStore {
    async fn fetch_all(&self, _kind: EntityKind) -> BackfillResult<Vec<TranslatableRecord>> {
        Err(BackfillError::store("database offline"))
    }

    async fn apply_updates(&self, _kind: EntityKind, _updates: &[RecordUpdate]) -> BackfillResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn fills_missing_languages() {
    let store = dish_store(vec![
        record("d1", "Caesar Salad"),
        record("d2", "xyzzyqwerty"),
        record_with_stored(
            "d3",
            "Margherita Pizza",
            r#"{"fi":{"name":"Margherita","confidence":90,"method":"template"}}"#,
            r#"["fi"]"#,
        ),
    ]);

    let report = backfiller(BackfillConfig::default())
        .run(&store, EntityKind::Dish)
        .await
        .unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.translated, 2);
    assert_eq!(report.updated, 2);
    assert_eq!(report.errors, 0);
    assert_eq!(report.by_language["fi"], 1);
    assert_eq!(report.by_language["sv"], 2);

    let stored = store.records(EntityKind::Dish);
    assert_eq!(
        stored[0].translations.as_deref(),
        Some(
            r#"{"fi":{"name":"Caesar-salaatti","confidence":90,"method":"template"},"sv":{"name":"Caesarsallad","confidence":90,"method":"template"}}"#
        )
    );
    assert_eq!(stored[0].translated_languages.as_deref(), Some(r#"["fi","sv"]"#));
    assert!(stored[1].translations.is_none());
    assert_eq!(stored[2].translated_languages(), vec!["fi", "sv"]);
    assert_eq!(stored[2].translated_name("fi"), "Margherita");
    assert_eq!(stored[2].translated_name("sv"), "Margherita");
}

#[tokio::test]
async fn second_run_changes_nothing() {
    let store = dish_store(vec![record("d1", "Greek Salad"), record("d2", "Fish Soup")]);
    let job = backfiller(BackfillConfig::default());

    job.run(&store, EntityKind::Dish).await.unwrap();
    let before = store.records(EntityKind::Dish);
    let report = job.run(&store, EntityKind::Dish).await.unwrap();

    assert_eq!(report.translated, 0);
    assert_eq!(report.updated, 0);
    assert_eq!(store.records(EntityKind::Dish), before);
}

#[tokio::test]
async fn identical_translation_is_not_stored() {
    let store = dish_store(vec![record("d1", "Tiramisu")]);
    let report = backfiller(BackfillConfig::default())
        .run(&store, EntityKind::Dish)
        .await
        .unwrap();

    assert_eq!(report.translated, 0);
    assert!(store.records(EntityKind::Dish)[0].translations.is_none());
}

#[tokio::test]
async fn invalid_stored_json_is_reset() {
    let store = dish_store(vec![record_with_stored("d1", "Greek Salad", "{oops", r#""fi""#)]);
    let report = backfiller(BackfillConfig::default())
        .run(&store, EntityKind::Dish)
        .await
        .unwrap();

    assert_eq!(report.by_language["fi"], 1);
    assert_eq!(report.by_language["sv"], 1);
    let stored = &store.records(EntityKind::Dish)[0];
    assert_eq!(stored.translated_languages(), vec!["fi", "sv"]);
    assert_eq!(stored.translated_name("fi"), "Kreikkalainen salaatti");
}

#[tokio::test]
async fn existing_entries_of_any_shape_are_kept() {
    let store = dish_store(vec![
        record_with_stored(
            "d1",
            "Greek Salad",
            r#"{"fi":{"name":"Käsin käännetty","confidence":"95","method":"manual"}}"#,
            r#"["fi"]"#,
        ),
        record_with_stored("d2", "Caesar Salad", r#"{"de":"Caesar-Salat","fi":null}"#, "[]"),
    ]);

    let report = backfiller(BackfillConfig::default())
        .run(&store, EntityKind::Dish)
        .await
        .unwrap();
    assert_eq!(report.updated, 2);

    let stored = store.records(EntityKind::Dish);
    assert_eq!(
        stored[0].translations.as_deref(),
        Some(
            r#"{"fi":{"name":"Käsin käännetty","confidence":"95","method":"manual"},"sv":{"name":"Grekisk sallad","confidence":90,"method":"template"}}"#
        )
    );
    assert_eq!(stored[0].translated_name("fi"), "Käsin käännetty");
    assert_eq!(
        stored[1].translations.as_deref(),
        Some(
            r#"{"de":"Caesar-Salat","fi":{"name":"Caesar-salaatti","confidence":90,"method":"template"},"sv":{"name":"Caesarsallad","confidence":90,"method":"template"}}"#
        )
    );
}

#[tokio::test]
async fn failed_batch_is_counted_and_run_continues() {
    let inner = dish_store(vec![
        record("d1", "Caesar Salad"),
        record("d2", "Greek Salad"),
        record("d3", "Fish Soup"),
        record("d4", "Red Wine"),
    ]);
    let store = FlakyStore {
        inner,
        failing_calls: vec![1],
        calls: Mutex::new(0),
    };

    let report = backfiller(BackfillConfig::default().with_batch_size(2))
        .run(&store, EntityKind::Dish)
        .await
        .unwrap();

    assert_eq!(report.translated, 4);
    assert_eq!(report.errors, 2);
    assert_eq!(report.updated, 2);

    let stored = store.inner.records(EntityKind::Dish);
    assert!(stored[0].translations.is_none());
    assert!(stored[3].translations.is_some());
}

#[tokio::test]
async fn read_failure_is_returned() {
    let err = backfiller(BackfillConfig::default())
        .run(&UnreachableStore, EntityKind::Dish)
        .await
        .unwrap_err();
    assert!(matches!(err, BackfillError::Store(_)));
}

#[tokio::test]
async fn ingredients_use_ingredient_method() {
    let store = InMemoryStore::new()
        .with_records(EntityKind::Ingredient, vec![record("i1", "Garlic")]);
    let report = backfiller(BackfillConfig::default().with_languages(["sv"]))
        .run(&store, EntityKind::Ingredient)
        .await
        .unwrap();

    assert_eq!(report.updated, 1);
    assert_eq!(report.by_language.keys().collect::<Vec<_>>(), vec!["sv"]);
    assert_eq!(
        store.records(EntityKind::Ingredient)[0].translations.as_deref(),
        Some(r#"{"sv":{"name":"vitlök","confidence":90,"method":"ingredient_template"}}"#)
    );
}

#[tokio::test]
async fn batches_honor_delay() {
    let store = dish_store(vec![record("d1", "Caesar Salad"), record("d2", "Greek Salad")]);
    let config = BackfillConfig::default()
        .with_batch_size(1)
        .with_batch_delay(Duration::from_millis(5));

    let started = std::time::Instant::now();
    let report = backfiller(config).run(&store, EntityKind::Dish).await.unwrap();
    assert_eq!(report.updated, 2);
    assert!(started.elapsed() >= Duration::from_millis(5));
}

#[test]
fn status_counts_languages() {
    let records = vec![
        record("a", "A"),
        record_with_stored("b", "B", "{}", r#"["fi"]"#),
        record_with_stored("c", "C", "{}", r#"["fi","sv"]"#),
        record_with_stored("d", "D", "{}", "not json"),
    ];
    let status = translation_status(&records, &["fi".to_string(), "sv".to_string()]);

    assert_eq!(status.total, 4);
    assert_eq!(status.by_language["fi"], 2);
    assert_eq!(status.by_language["sv"], 1);
    assert_eq!(status.with_all, 1);
    assert_eq!(status.with_none, 2);
}

proptest! {
    #[test]
    fn prop_stored_fields_never_break_parsing(translations in ".{0,40}", languages in ".{0,40}") {
        let record = record_with_stored("p", "Pizza", &translations, &languages);
        let _ = record.translations();
        let parsed = record.translated_languages();
        prop_assert!(parsed.len() <= languages.len());
        prop_assert!(!record.translated_name("fi").is_empty());
    }
}
