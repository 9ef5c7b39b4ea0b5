//! Record lookup against the bundled YAML data files

use super::test_utils::{fixture_data_dir, seeded_builder};
use fixture_builder::config::BuilderConfig;
use fixture_builder::{BuildError, DataBuilder, SourceError, Value};

#[test]
fn test_bare_key_uses_default_document() {
    let mut builder = seeded_builder(1);
    let data = builder.data_for("test", &Value::Null).unwrap();

    assert_eq!(data["data_01"], Value::from("Testing"));
    assert_eq!(data["data_02"], Value::from("Stories"));
    assert_eq!(builder.current_source(), Some("default.yml"));
}

#[test]
fn test_file_prefixed_key_loads_that_file() {
    let mut builder = seeded_builder(1);
    let data = builder.data_for("account/test", &Value::Null).unwrap();

    assert_eq!(data["name"], Value::from("TesterStories"));
    assert_eq!(data["owner"], Value::from("Jeff Nyman"));
    assert_eq!(builder.current_source(), Some("account.yml"));

    // The loaded file stays current for bare keys
    let again = builder.data_for("test", &Value::Null).unwrap();
    assert_eq!(again, data);
}

#[test]
fn test_explicit_load_switches_document() {
    let mut builder = seeded_builder(1);
    let document = builder.load("account.yml").unwrap();
    assert!(document.contains_key("generated"));

    let data = builder.data_for("test", &Value::Null).unwrap();
    assert_eq!(data["name"], Value::from("TesterStories"));
}

#[test]
fn test_scalars_pass_through_unchanged() {
    let mut builder = seeded_builder(1);
    let data = builder.data_for("test", &Value::Null).unwrap();
    assert_eq!(data["data_03"], Value::Integer(42));
    assert_eq!(data["data_04"], Value::Bool(true));

    let account = builder.data_for("account/test", &Value::Null).unwrap();
    assert_eq!(account["active"], Value::Bool(true));
    assert_eq!(account["seats"], Value::Integer(5));
}

#[test]
fn test_numeric_keys_resolve_as_text() {
    let mut builder = seeded_builder(1);
    let data = builder.data_for("statuses/http", &Value::Null).unwrap();

    assert_eq!(data["200"], Value::from("ok"));
    assert_eq!(data["404"], Value::from("missing"));
    assert_eq!(data["500"], Value::from("server error"));
}

#[test]
fn test_undefined_key() {
    let mut builder = seeded_builder(1);
    let err = builder.data_for("no_such_key", &Value::Null).unwrap_err();
    assert!(matches!(err, BuildError::UndefinedKey(ref key) if key == "no_such_key"));
    assert_eq!(err.to_string(), "Undefined key for data: no_such_key");
}

#[test]
fn test_missing_data_file() {
    let mut builder = seeded_builder(1);
    match builder.data_for("nothing_here/test", &Value::Null) {
        Err(BuildError::SourceUnavailable(SourceError::NotFound(path))) => {
            assert!(path.ends_with("nothing_here.yml"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_missing_default_document() {
    let config = BuilderConfig {
        source: "absent.yml".to_string(),
        ..BuilderConfig::with_data_path(fixture_data_dir())
    };
    let mut builder = DataBuilder::new(config).unwrap();
    assert!(matches!(
        builder.data_for("test", &Value::Null),
        Err(BuildError::SourceUnavailable(_))
    ));
}

#[test]
fn test_data_path_without_files() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut builder = DataBuilder::new(BuilderConfig::with_data_path(temp.path())).unwrap();
    let err = builder.data_for("test", &Value::Null).unwrap_err();
    assert!(err.to_string().contains("default.yml"), "got {}", err);
}
