//! The unit and test vectors shipped under `demos/`.

use std::path::PathBuf;

use json_model_check::Model;
use serde_json::Value;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn person_vectors() {
    let model = Model::from_file(demo("person.unit.json"));
    assert_eq!(model.initialize().unwrap().names(), vec!["", "Person"]);

    let src = std::fs::read_to_string(demo("person.cases.json")).unwrap();
    let cases: Vec<(bool, Value)> = serde_json::from_str(&src).unwrap();
    assert!(!cases.is_empty());
    for (i, (expected, value)) in cases.iter().enumerate() {
        let out = model.validate("", value).unwrap();
        assert_eq!(out.valid, *expected, "case #{i}: {}", out.report);
        assert_eq!(out.report.is_empty(), *expected, "case #{i}");
    }
}

#[test]
fn nested_friend_is_located() {
    let model = Model::from_file(demo("person.unit.json"));
    let value = serde_json::json!({
        "name": "Dave", "born": "1990-04-01", "friends": [{ "name": "Eve" }]
    });
    let out = model.validate("Person", &value).unwrap();
    assert_eq!(out.report.lines(), vec![
        "$.friends[0]: missing mandatory prop <born> [$Person]",
        "$.friends: not array or unexpected array [$Person.friends]",
        "$: unexpected value for optional prop <friends> [$Person]",
    ]);
}

#[test]
fn shipped_document_is_valid() {
    let model = Model::from_file(demo("person.unit.json"));
    let src = std::fs::read_to_string(demo("alice.json")).unwrap();
    let value: Value = serde_json::from_str(&src).unwrap();
    assert!(model.validate("", &value).unwrap().valid);
}
