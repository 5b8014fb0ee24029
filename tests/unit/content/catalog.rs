use serde_json::json;

use super::*;

fn catalog() -> JsonCatalog {
    JsonCatalog::new(
        "en",
        json!({
            "sections": [
                { "title": "Hi", "items": ["a", "b", 3] },
                { "title": "Work", "count_one": "{{count}} project", "count_other": "{{count}} projects" }
            ],
            "footer": { "year": 2026, "label": "Made with stars" }
        }),
    )
    .unwrap()
}

#[test]
fn dotted_keys_walk_objects_and_arrays() {
    let c = catalog();
    assert_eq!(c.text("sections.0.title").as_deref(), Some("Hi"));
    assert_eq!(c.text("footer.label").as_deref(), Some("Made with stars"));
    assert_eq!(c.text("footer.year").as_deref(), Some("2026"));
    assert_eq!(c.text("sections.9.title"), None);
    assert_eq!(c.text("sections.x.title"), None);
    assert_eq!(c.text("footer"), None);
}

#[test]
fn lists_keep_only_strings() {
    let c = catalog();
    assert_eq!(
        c.list("sections.0.items"),
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(c.list("sections.1.items"), None);
}

#[test]
fn plural_picks_suffix_and_interpolates() {
    let c = catalog();
    assert_eq!(c.plural("sections.1.count", 1).as_deref(), Some("1 project"));
    assert_eq!(c.plural("sections.1.count", 4).as_deref(), Some("4 projects"));
    assert_eq!(c.plural("sections.0.title", 2).as_deref(), Some("Hi"));
    assert_eq!(c.plural("sections.0.count", 2), None);
}

#[test]
fn root_must_be_object() {
    assert!(JsonCatalog::new("en", json!([1, 2])).is_err());
    assert!(JsonCatalog::from_json_str("en", "not json").is_err());
    let c = JsonCatalog::from_json_str("de", r#"{"a":"b"}"#).unwrap();
    assert_eq!(c.language(), "de");
    assert_eq!(c.text("a").as_deref(), Some("b"));
}
