//! Property-based tests for record resolution

use fixture_builder::generation::CursorStore;
use fixture_builder::{CallerId, DirectiveEvaluator, Document, MergeStrategy, StructuralResolver, Value};
use proptest::prelude::*;
use std::sync::Arc;

/// Values without any directive-marked string.
fn plain_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        "[a-zA-Z0-9 _.-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(Value::Mapping),
        ]
    })
}

fn evaluator(seed: u64) -> DirectiveEvaluator {
    DirectiveEvaluator::new(Some(seed)).with_cursor_store(Arc::new(CursorStore::new()))
}

/// Records without directives come back exactly as stored
#[test]
fn test_plain_records_resolve_to_themselves() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&plain_value(), |record| {
            let mut document = Document::new();
            document.insert("test".to_string(), record.clone());
            let evaluator = evaluator(1);
            let caller = CallerId::default();
            let resolver = StructuralResolver::new(&evaluator, &caller);

            let resolved = resolver.resolve(&document, &Value::Null, "test").unwrap();
            prop_assert_eq!(resolved, record);
            Ok(())
        })
        .unwrap();
}

/// Resolution never changes the stored record, whatever the overrides
#[test]
fn test_resolution_does_not_mutate_source() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(plain_value(), plain_value(), any::<bool>()),
            |(record, overrides, deep)| {
                let mut document = Document::new();
                document.insert("test".to_string(), record);
                let before = document.clone();
                let strategy = if deep {
                    MergeStrategy::Deep
                } else {
                    MergeStrategy::Shallow
                };
                let evaluator = evaluator(2);
                let caller = CallerId::default();
                let resolver =
                    StructuralResolver::new(&evaluator, &caller).with_merge_strategy(strategy);

                resolver.resolve(&document, &overrides, "test").unwrap();
                prop_assert_eq!(document, before);
                Ok(())
            },
        )
        .unwrap();
}

/// A flat override wins for its field and leaves the others alone
#[test]
fn test_flat_override_semantics() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::btree_map("[a-z]{1,6}", plain_value(), 1..5),
                "[a-z]{1,6}",
                "[A-Za-z]{1,8}",
            ),
            |(fields, field, replacement)| {
                prop_assume!(field != "test");
                let record = Value::Mapping(fields.clone());
                let mut document = Document::new();
                document.insert("test".to_string(), record);
                let evaluator = evaluator(3);
                let caller = CallerId::default();
                let resolver = StructuralResolver::new(&evaluator, &caller);

                let overrides = Value::mapping([(field.clone(), replacement.clone())]);
                let resolved = resolver.resolve(&document, &overrides, "test").unwrap();

                prop_assert_eq!(&resolved[field.as_str()], &Value::from(replacement));
                for (key, value) in &fields {
                    if key != &field {
                        prop_assert_eq!(&resolved[key.as_str()], value);
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Same seed, same mask output; always the same character classes
#[test]
fn test_mask_shape_is_stable() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<u64>(), "[#Aa_-]{0,16}"), |(seed, pattern)| {
            let caller = CallerId::default();
            let directive = format!("mask('{}')", pattern);
            let first = evaluator(seed).evaluate(&directive, &caller).unwrap();
            let second = evaluator(seed).evaluate(&directive, &caller).unwrap();
            prop_assert_eq!(&first, &second);

            let output = first.as_str().unwrap().to_string();
            prop_assert_eq!(output.chars().count(), pattern.chars().count());
            for (mask_char, out) in pattern.chars().zip(output.chars()) {
                match mask_char {
                    '#' => prop_assert!(out.is_ascii_digit()),
                    'A' => prop_assert!(out.is_ascii_uppercase()),
                    'a' => prop_assert!(out.is_ascii_lowercase()),
                    other => prop_assert_eq!(out, other),
                }
            }
            Ok(())
        })
        .unwrap();
}

/// `sequential` over n items returns them in order and wraps after n calls
#[test]
fn test_sequential_cycles() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(any::<i64>(), 1..6), |items| {
            let evaluator = evaluator(4);
            let caller = CallerId::new("property");
            let list = items
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let directive = format!("sequential([{}])", list);

            for round in 0..2 * items.len() {
                let value = evaluator.evaluate(&directive, &caller).unwrap();
                prop_assert_eq!(value, Value::Integer(items[round % items.len()]));
            }
            Ok(())
        })
        .unwrap();
}
