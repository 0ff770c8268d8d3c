//! Subcommand implementations
//!
//! Each command reads its JSON inputs, runs the library operation and returns
//! the JSON document to print.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use menushield_backfill::{translation_status, Backfiller, InMemoryStore, TranslatableRecord};
use menushield_safety::{
    analyze_dish_safety, migrate_dish_to_components, normalize_allergen_id, search_allergens,
    Dish, DishSafetyStatus, Ingredient,
};
use menushield_translate::{EntityKind, TemplateTranslationService};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Safety verdict for one dish of the `analyze` output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DishReport {
    id: String,
    name: String,
    #[serde(flatten)]
    safety: DishSafetyStatus,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let source =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("parsing {}", path.display()))
}

/// Split a comma-separated allergen list into canonical ids
pub(crate) fn parse_avoid_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(normalize_allergen_id)
        .collect()
}

/// Rewrite every component tag to its canonical id
///
/// The avoid list is canonical too, so legacy tags and their aliases match.
pub(crate) fn normalize_dish_tags(dish: &mut Dish) {
    for component in &mut dish.components {
        component.allergen_tags = component
            .allergen_tags
            .iter()
            .map(|tag| normalize_allergen_id(tag))
            .collect();
    }
}

/// `analyze`: migrate legacy dishes and report safety for the avoided allergens
pub(crate) fn analyze(dishes: &Path, avoid: &str, ingredients: Option<&Path>) -> Result<Value> {
    let dishes: Vec<Dish> = read_json(dishes)?;
    let catalog: Option<Vec<Ingredient>> = ingredients.map(read_json).transpose()?;
    let avoided = parse_avoid_list(avoid);

    let mut reports = Vec::with_capacity(dishes.len());
    for dish in &dishes {
        let mut dish = migrate_dish_to_components(dish, catalog.as_deref());
        normalize_dish_tags(&mut dish);
        dish.validate()
            .with_context(|| format!("invalid dish {}", dish.id))?;
        let safety = analyze_dish_safety(&dish, &avoided);
        tracing::debug!(dish_id = %dish.id, status = safety.status.as_str(), "analyzed dish");
        reports.push(DishReport {
            id: dish.id,
            name: dish.name,
            safety,
        });
    }
    tracing::info!(dishes = reports.len(), avoided = avoided.len(), "analysis complete");
    Ok(serde_json::to_value(reports)?)
}

/// `translate`: one name through the template engine
pub(crate) async fn translate(
    config: &AppConfig,
    text: &str,
    language: &str,
    kind: EntityKind,
) -> Result<Value> {
    let service = TemplateTranslationService::new(config.translator.clone())?;
    let result = service.translate_text(text, language, kind).await;
    Ok(serde_json::to_value(result)?)
}

/// `backfill`: fill missing translations of a JSON array of records
///
/// The updated records are written to `output` when given.
pub(crate) async fn backfill(
    config: &AppConfig,
    input: &Path,
    kind: EntityKind,
    output: Option<&Path>,
) -> Result<Value> {
    let records: Vec<TranslatableRecord> = read_json(input)?;
    let store = InMemoryStore::new().with_records(kind, records);
    let service = Arc::new(TemplateTranslationService::new(config.translator.clone())?);

    let report = Backfiller::new(service, config.backfill.clone())
        .run(&store, kind)
        .await?;

    if let Some(output) = output {
        let updated = serde_json::to_string_pretty(&store.records(kind))?;
        std::fs::write(output, updated)
            .with_context(|| format!("writing {}", output.display()))?;
        tracing::info!(path = %output.display(), "wrote updated records");
    }
    Ok(serde_json::to_value(report)?)
}

/// `status`: how many records already list each configured language
pub(crate) fn status(config: &AppConfig, input: &Path) -> Result<Value> {
    let records: Vec<TranslatableRecord> = read_json(input)?;
    let status = translation_status(&records, &config.backfill.languages);
    Ok(serde_json::to_value(status)?)
}

/// `allergens`: catalog lookup
pub(crate) fn allergens(query: &str) -> Result<Value> {
    Ok(serde_json::to_value(search_allergens(query))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn write(dir: &tempfile::TempDir, name: &str, value: &Value) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn avoid_list_is_normalized() {
        let avoided = parse_avoid_list(" Milk, tree_nuts,,gluten ");
        let expected: HashSet<String> =
            ["dairy", "nuts", "gluten"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(avoided, expected);
    }

    #[test]
    fn shellfish_dish_is_unsafe_for_shellfish_guest() {
        let dir = tempfile::tempdir().unwrap();
        let dishes = write(
            &dir,
            "dishes.json",
            &json!([{
                "id": "prawns",
                "name": "Garlic Prawns",
                "components": [{
                    "id": "prawns-base",
                    "name": "Prawns",
                    "type": "base",
                    "ingredients": ["prawns"],
                    "allergenTags": ["shellfish"],
                    "isRequired": true
                }]
            }]),
        );

        for avoid in ["shellfish", "crustaceans", "Shellfish"] {
            let report = analyze(&dishes, avoid, None).unwrap();
            assert_eq!(report[0]["status"], "unsafe", "avoiding {avoid}");
            assert_eq!(report[0]["allergens"][0]["tag"], "crustaceans");
        }
    }

    #[test]
    fn catalog_migrated_dish_matches_alias() {
        let dir = tempfile::tempdir().unwrap();
        let dishes = write(
            &dir,
            "dishes.json",
            &json!([{"id": "scampi", "name": "Scampi", "ingredients": ["Shrimp", "Butter"], "allergenTags": []}]),
        );
        let catalog = write(
            &dir,
            "ingredients.json",
            &json!([
                {"name": "Shrimp", "allergenTags": ["shellfish"]},
                {"name": "Butter", "allergenTags": ["milk"]}
            ]),
        );

        let report = analyze(&dishes, "shellfish", Some(&catalog)).unwrap();
        assert_eq!(report[0]["status"], "unsafe");
        let report = analyze(&dishes, "milk", Some(&catalog)).unwrap();
        assert_eq!(report[0]["status"], "unsafe");
        let report = analyze(&dishes, "gluten", Some(&catalog)).unwrap();
        assert_eq!(report[0]["status"], "safe");
    }

    #[test]
    fn analyze_migrates_legacy_dishes() {
        let dir = tempfile::tempdir().unwrap();
        let dishes = write(
            &dir,
            "dishes.json",
            &json!([
                {"id": "toast", "name": "Toast", "ingredients": ["bread", "butter"], "allergenTags": ["gluten", "dairy"]},
                {"id": "tea", "name": "Tea", "ingredients": ["tea"], "allergenTags": []}
            ]),
        );

        let report = analyze(&dishes, "dairy", None).unwrap();
        assert_eq!(report[0]["id"], "toast");
        assert_eq!(report[0]["status"], "unsafe");
        assert_eq!(report[1]["status"], "safe");
    }

    #[test]
    fn analyze_reports_unreadable_input() {
        let err = analyze(Path::new("/nonexistent/dishes.json"), "dairy", None).unwrap_err();
        assert!(err.to_string().contains("reading"));
    }

    #[tokio::test]
    async fn translate_prints_result() {
        let value = translate(&AppConfig::default(), "Caesar Salad", "fi", EntityKind::Dish)
            .await
            .unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["translation"], "Caesar-salaatti");
        assert_eq!(value["method"], "template");
    }

    #[tokio::test]
    async fn backfill_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(
            &dir,
            "records.json",
            &json!([{"id": "d1", "name": "Greek Salad"}, {"id": "d2", "name": "xyzzyqwerty"}]),
        );
        let output = dir.path().join("out.json");

        let report = backfill(&AppConfig::default(), &input, EntityKind::Dish, Some(&output))
            .await
            .unwrap();
        assert_eq!(report["updated"], 1);
        assert_eq!(report["byLanguage"]["fi"], 1);

        let written: Vec<TranslatableRecord> = read_json(&output).unwrap();
        assert_eq!(written[0].translated_languages(), vec!["fi", "sv"]);
        assert_eq!(written[1].translations, None);

        let status = status(&AppConfig::default(), &output).unwrap();
        assert_eq!(status["withAll"], 1);
        assert_eq!(status["withNone"], 1);
    }

    #[test]
    fn allergen_search() {
        let all = allergens("").unwrap();
        assert_eq!(all.as_array().map(Vec::len), Some(8));
        let found = allergens("sesa").unwrap();
        assert_eq!(found[0]["id"], "sesame");
    }
}
