//! CLI route table over a real workspace

use super::test_utils::fixture_data_dir;
use clap::Parser;
use fixture_builder::cli::{Cli, RunContext};
use fixture_builder::config::BuilderConfig;
use fixture_builder::BuildError;
use std::path::PathBuf;

fn context(seed: u64) -> RunContext {
    let config = BuilderConfig {
        seed: Some(seed),
        ..BuilderConfig::with_data_path(fixture_data_dir())
    };
    RunContext::from_config(PathBuf::from("."), config).unwrap()
}

fn run(context: &mut RunContext, args: &[&str]) -> Result<String, BuildError> {
    let cli = Cli::try_parse_from(std::iter::once("fixture-builder").chain(args.iter().copied()))
        .unwrap();
    context.execute(&cli.command)
}

#[test]
fn test_resolve_prints_json() {
    let mut ctx = context(1);
    let output = run(&mut ctx, &["resolve", "account/test", "--set", "seats=9"]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["name"], "TesterStories");
    assert_eq!(parsed["seats"], 9);
}

#[test]
fn test_resolve_yaml_and_toml() {
    let mut ctx = context(1);
    let yaml = run(&mut ctx, &["resolve", "test", "--format", "yaml"]).unwrap();
    assert!(yaml.contains("data_01: Testing"));

    let toml_text = run(
        &mut ctx,
        &["resolve", "account/test", "--set", "valid.code=V1", "--format", "toml"],
    )
    .unwrap();
    assert!(toml_text.contains("name = \"TesterStories\""));
    assert!(toml_text.contains("code = \"V1\""));
}

#[test]
fn test_eval_prints_plain_value() {
    let mut ctx = context(1);
    assert_eq!(run(&mut ctx, &["eval", "~'user' + 'name'"]).unwrap(), "username");
    assert_eq!(run(&mut ctx, &["eval", "2 + 3"]).unwrap(), "5");

    let err = run(&mut ctx, &["eval", "non_existing_method"]).unwrap_err();
    assert!(fixture_builder::cli::map_error(&err).contains("non_existing_method"));
}

#[test]
fn test_capabilities_table() {
    let mut ctx = context(1);
    let table = run(&mut ctx, &["capabilities"]).unwrap();
    for name in ["full_name", "mask", "sequential", "N.days_from_today"] {
        assert!(table.contains(name), "missing {}", name);
    }
}

#[test]
fn test_undefined_key_error() {
    let mut ctx = context(1);
    let err = run(&mut ctx, &["resolve", "account/missing"]).unwrap_err();
    assert_eq!(err.to_string(), "Undefined key for data: account/missing");
}
