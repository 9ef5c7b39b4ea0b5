//! Directive resolution with the real fixture source

use super::test_utils::{pinned_date, seeded_builder};
use fixture_builder::generation::dates::{DAY_ABBRS, MONTH_NAMES};
use fixture_builder::{BuildError, CallerId, EvalError, Value};

fn text(value: &Value) -> &str {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected a string, got {:?}", value))
}

#[test]
fn test_people_and_contact_details() {
    let mut builder = seeded_builder(11);
    let person = builder.data_for("generators/person", &Value::Null).unwrap();

    assert!(text(&person["full_name"]).contains(' '));
    assert!(!text(&person["first_name"]).is_empty());
    assert!(text(&person["email"]).starts_with("jeff@"));
    for field in ["phone", "cell"] {
        let number = text(&person[field]);
        assert!(!number.is_empty());
        assert!(!number.contains('x'), "extension left in {}", number);
    }
}

#[test]
fn test_addresses() {
    let mut builder = seeded_builder(12);
    let address = builder.data_for("generators/address", &Value::Null).unwrap();

    let street = text(&address["street"]);
    assert!(street.chars().next().unwrap().is_ascii_digit(), "got {}", street);
    assert!(text(&address["street_full"]).len() > street.len() / 2);
    assert_eq!(text(&address["state_abbr"]).len(), 2);
    assert!(!text(&address["zip"]).is_empty());
}

#[test]
fn test_text_counts() {
    let mut builder = seeded_builder(13);
    let text_record = builder.data_for("generators/text", &Value::Null).unwrap();

    assert_eq!(text(&text_record["words"]).split(' ').count(), 3);
    assert_eq!(text(&text_record["five_words"]).split(' ').count(), 5);
    assert!(text(&text_record["sentence"]).split(' ').count() >= 4);
    assert_eq!(text(&text_record["paragraphs"]).split("\n\n").count(), 2);
    let chars = text(&text_record["characters"]);
    assert_eq!(chars.len(), 12);
    assert!(chars.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_dates_against_pinned_today() {
    let mut builder = seeded_builder(14);
    let dates = builder.data_for("generators/dates", &Value::Null).unwrap();
    assert_eq!(pinned_date().to_string(), "2024-02-28");

    assert_eq!(dates["today"], Value::from("02/28/24"));
    assert_eq!(dates["iso"], Value::from("2024-02-28"));
    assert_eq!(dates["tomorrow"], Value::from("02/29/24"));
    assert_eq!(dates["yesterday"], Value::from("02/27/24"));
    assert_eq!(dates["next_week"], Value::from("03/06/24"));
    assert_eq!(dates["last_week"], Value::from("2024-02-21"));
    assert!(MONTH_NAMES.contains(&text(&dates["month"])));
    assert!(DAY_ABBRS.contains(&text(&dates["weekday"])));
}

#[test]
fn test_choices() {
    let mut builder = seeded_builder(15);
    for _ in 0..20 {
        let choices = builder.data_for("generators/choices", &Value::Null).unwrap();
        assert!(["red", "green", "blue"].contains(&text(&choices["color"])));
        let dice = choices["dice"].as_i64().unwrap();
        assert!((1..=6).contains(&dice));

        let code: Vec<char> = text(&choices["code"]).chars().collect();
        assert_eq!(code.len(), 11);
        assert!(code[..3].iter().all(char::is_ascii_digit));
        assert!(code[4..7].iter().all(char::is_ascii_uppercase));
        assert!(code[8..].iter().all(char::is_ascii_lowercase));
    }
}

#[test]
fn test_sequential_wraps_per_caller() {
    let mut builder = seeded_builder(16);
    let slots: Vec<Value> = (0..4)
        .map(|_| {
            builder
                .data_for("generators/choices", &Value::Null)
                .unwrap()["slot"]
                .clone()
        })
        .collect();
    assert_eq!(
        slots,
        vec![
            Value::from("a"),
            Value::from("b"),
            Value::from("c"),
            Value::from("a")
        ]
    );
}

#[test]
fn test_sequential_cursor_shared_through_global_store() {
    // Two builders on the process-wide store with a unique caller share one cursor.
    let caller = CallerId::new("directives::global-store");
    let config = fixture_builder::config::BuilderConfig::with_data_path(
        super::test_utils::fixture_data_dir(),
    );
    let mut first = fixture_builder::DataBuilder::new(config.clone())
        .unwrap()
        .with_caller(caller.clone());
    let mut second = fixture_builder::DataBuilder::new(config)
        .unwrap()
        .with_caller(caller);

    let slot = |b: &mut fixture_builder::DataBuilder| {
        b.data_for("generators/choices", &Value::Null).unwrap()["slot"].clone()
    };
    assert_eq!(slot(&mut first), Value::from("a"));
    assert_eq!(slot(&mut second), Value::from("b"));
    assert_eq!(slot(&mut first), Value::from("c"));
}

#[test]
fn test_same_seed_same_record() {
    let first = seeded_builder(99)
        .data_for("account/generated", &Value::Null)
        .unwrap();
    let second = seeded_builder(99)
        .data_for("account/generated", &Value::Null)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first["tags"],
        Value::Sequence(vec![Value::from("username"), Value::from("second")])
    );
}

#[test]
fn test_unknown_generator_names_the_method() {
    let mut builder = seeded_builder(17);
    let err = builder
        .data_for("generators/broken", &Value::Null)
        .unwrap_err();

    assert!(matches!(err, BuildError::UnknownGenerator { .. }));
    let message = err.to_string();
    assert!(message.contains("non_existing_method"), "got {}", message);
    assert!(message.starts_with("Failed to generate: ~non_existing_method"));
}

#[test]
fn test_generation_errors_from_overrides() {
    let mut builder = seeded_builder(18);
    let err = builder
        .data_for(
            "account/test",
            &Value::mapping([("when", "~today('%Q')")]),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::Generation {
            source: EvalError::Format(_),
            ..
        }
    ));

    let err = builder
        .data_for("account/test", &Value::mapping([("bad", "~words(")]))
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::Generation {
            source: EvalError::Parse(_),
            ..
        }
    ));
}

#[test]
fn test_alias_prefix() {
    let builder = seeded_builder(19);
    let card = builder.evaluate("~db_credit_card_number").unwrap();
    assert!(text(&card).chars().any(|c| c.is_ascii_digit()));
    assert_eq!(builder.evaluate("db_today").unwrap(), Value::from("02/28/24"));
}
