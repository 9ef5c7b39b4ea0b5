//! Override merging through the builder

use super::test_utils::{fixture_data_dir, seeded_builder};
use fixture_builder::config::BuilderConfig;
use fixture_builder::source::{DataSource, YamlDataSource};
use fixture_builder::{DataBuilder, DirectiveEvaluator, MergeStrategy, Value};

#[test]
fn test_flat_override_replaces_one_field() {
    let mut builder = seeded_builder(3);
    let data = builder
        .data_for("account/test", &Value::mapping([("name", "X")]))
        .unwrap();

    assert_eq!(data["name"], Value::from("X"));
    assert_eq!(data["owner"], Value::from("Jeff Nyman"));
    assert_eq!(data["seats"], Value::Integer(5));
}

#[test]
fn test_override_keyed_by_record_name() {
    let mut builder = seeded_builder(3);
    let overrides = Value::mapping([("test", Value::mapping([("owner", "Ann")]))]);
    let data = builder.data_for("account/test", &overrides).unwrap();

    assert_eq!(data["owner"], Value::from("Ann"));
    assert_eq!(data["name"], Value::from("TesterStories"));
}

#[test]
fn test_nested_override_replaces_whole_value() {
    let mut builder = seeded_builder(3);
    let overrides = Value::mapping([("valid", Value::mapping([("name", "X")]))]);
    let data = builder.data_for("account/test", &overrides).unwrap();

    assert_eq!(data["valid"], Value::mapping([("name", "X")]));
    assert_eq!(data["name"], Value::from("TesterStories"));
    assert_eq!(data["owner"], Value::from("Jeff Nyman"));
}

#[test]
fn test_override_adds_new_fields_and_directives() {
    let mut builder = seeded_builder(3);
    let overrides = Value::mapping([("nickname", "~'tester' + 1"), ("extra", "plain")]);
    let data = builder.data_for("account/test", &overrides).unwrap();

    assert_eq!(data["nickname"], Value::from("tester1"));
    assert_eq!(data["extra"], Value::from("plain"));
}

#[test]
fn test_override_can_replace_a_directive_with_a_literal() {
    let mut builder = seeded_builder(3);
    let data = builder
        .data_for("account/generated", &Value::mapping([("name", "Acme")]))
        .unwrap();
    assert_eq!(data["name"], Value::from("Acme"));
}

#[test]
fn test_stored_records_are_never_mutated() {
    let mut source = YamlDataSource::new(fixture_data_dir());
    let before = source.load("account.yml").unwrap();
    let snapshot = (*before).clone();

    let mut builder = seeded_builder(3);
    builder.load("account.yml").unwrap();
    let overrides = Value::mapping([("name", "X"), ("owner", "Y")]);
    for key in ["test", "generated"] {
        builder.data_for(key, &overrides).unwrap();
        builder.data_for(key, &Value::Null).unwrap();
    }
    let after = builder.load("account.yml").unwrap();

    assert_eq!(*after, snapshot);
    assert_eq!(after["generated"]["contact"], Value::from("~full_name"));
}

#[test]
fn test_deep_merge_from_config() {
    let config = BuilderConfig {
        merge: MergeStrategy::Deep,
        ..BuilderConfig::with_data_path(fixture_data_dir())
    };
    let mut builder = DataBuilder::from_parts(
        config,
        Box::new(YamlDataSource::new(fixture_data_dir())),
        DirectiveEvaluator::new(Some(3)),
    );
    let overrides = Value::mapping([("valid", Value::mapping([("code", "V1")]))]);
    let data = builder.data_for("account/test", &overrides).unwrap();

    assert_eq!(data["valid"]["name"], Value::from("TesterStories Inc."));
    assert_eq!(data["valid"]["code"], Value::from("V1"));
}
