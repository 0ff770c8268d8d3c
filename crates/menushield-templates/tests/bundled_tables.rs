use menushield_templates::{TableKind, TemplateError, TemplateSet, TemplateTable};
use pretty_assertions::assert_eq;

#[test]
fn bundled_tables_load() {
    let set = TemplateSet::builtin().unwrap();
    assert_eq!(
        set.category_names(),
        vec!["pizza", "pasta", "fish", "meat", "salad", "soup", "dessert", "beverage"]
    );
    assert!(set.total_templates() > 40);
    assert_eq!(set.ingredients().len(), 9);
    assert_eq!(set.categories().len(), 4);
}

#[test]
fn every_bundled_term_has_finnish_and_swedish() {
    let set = TemplateSet::builtin().unwrap();
    for table in [set.dishes(), set.ingredients(), set.categories()] {
        for (category, template) in table.iter() {
            for (name, term) in template.translations.iter().chain(template.components.iter()) {
                assert!(term.get("fi").is_some(), "{category}/{name} lacks fi");
                assert!(term.get("sv").is_some(), "{category}/{name} lacks sv");
            }
        }
    }
    for phrases in [set.preparations(), set.descriptions()] {
        for (phrase, term) in phrases.iter() {
            assert!(term.get("fi").is_some() && term.get("sv").is_some(), "{phrase}");
        }
    }
}

#[test]
fn bundled_order_is_kept() {
    let set = TemplateSet::builtin().unwrap();
    let connectors: Vec<&str> = set.descriptions().iter().map(|(p, _)| p).collect();
    assert_eq!(&connectors[..3], ["with", "served with", "topped with"]);

    let preparations: Vec<&str> = set.preparations().iter().map(|(p, _)| p).collect();
    assert_eq!(preparations.first(), Some(&"grilled"));

    let keys = |table: &TemplateTable, category: &str| -> Vec<String> {
        table.get(category).unwrap().translations.keys().cloned().collect()
    };
    let ingredients = set.ingredients();
    assert_eq!(
        &keys(ingredients, "vegetables")[..4],
        ["tomato", "tomatoes", "onion", "onions"]
    );
    assert_eq!(
        keys(ingredients, "grains"),
        ["rice", "brown rice", "oats", "wheat", "wheat flour", "flour"]
    );
    assert_eq!(&keys(ingredients, "fruits")[..2], ["apples", "apple"]);

    let pizza = keys(set.dishes(), "pizza");
    assert_eq!(&pizza[pizza.len() - 2..], ["mac and cheese", "macaroni and cheese"]);
}

#[test]
fn meat_components_cover_tomato_sauce() {
    let set = TemplateSet::builtin().unwrap();
    let meat = set.dishes().get("meat").unwrap();
    assert_eq!(
        meat.components["tomato sauce"].get("fi"),
        Some("tomaattikastike")
    );
    assert_eq!(set.preparations().iter().find(|(p, _)| *p == "grilled").unwrap().1.get("fi"), Some("grillittu"));
}

fn write_bundled_copy(dir: &std::path::Path) {
    let set = TemplateSet::builtin().unwrap();
    let write = |kind: TableKind, yaml: String| {
        std::fs::write(dir.join(kind.file_name()), yaml).unwrap();
    };
    write(TableKind::Dishes, serde_yaml::to_string(set.dishes()).unwrap());
    write(TableKind::Ingredients, serde_yaml::to_string(set.ingredients()).unwrap());
    write(TableKind::Categories, serde_yaml::to_string(set.categories()).unwrap());
    write(TableKind::Preparations, serde_yaml::to_string(set.preparations()).unwrap());
    write(TableKind::Descriptions, serde_yaml::to_string(set.descriptions()).unwrap());
}

#[test]
fn directory_override_loads() {
    let dir = tempfile::tempdir().unwrap();
    write_bundled_copy(dir.path());

    let loaded = TemplateSet::from_dir(dir.path()).unwrap();
    assert_eq!(&loaded, TemplateSet::builtin().unwrap().as_ref());
}

#[test]
fn directory_accepts_json_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_bundled_copy(dir.path());
    std::fs::remove_file(dir.path().join("descriptions.yaml")).unwrap();
    std::fs::write(
        dir.path().join("descriptions.json"),
        r#"{"with": {"fi": "ja", "sv": "med"}}"#,
    )
    .unwrap();

    let loaded = TemplateSet::from_dir(dir.path()).unwrap();
    assert_eq!(loaded.descriptions().len(), 1);
}

#[test]
fn missing_table_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TemplateSet::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, TemplateError::Io { .. }));
}

#[test]
fn empty_dish_table_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_bundled_copy(dir.path());
    std::fs::write(dir.path().join("dishes.yaml"), "{}\n").unwrap();

    let err = TemplateSet::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, TemplateError::EmptyTable(ref t) if t == "dishes"));
}
