//! Shared test utilities for integration tests
//!
//! Fixture paths, builders over the bundled data files, and serialized access to
//! the environment variables the configuration layer reads.

use chrono::NaiveDate;
use fixture_builder::config::BuilderConfig;
use fixture_builder::generation::CursorStore;
use fixture_builder::source::YamlDataSource;
use fixture_builder::{DataBuilder, DirectiveEvaluator};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "FIXTURE_BUILDER_ENV",
    "FIXTURE_BUILDER_SOURCE",
    "FIXTURE_BUILDER_DATA_PATH",
    "FIXTURE_BUILDER_SEED",
    "FIXTURE_BUILDER_CALLER",
    "FIXTURE_BUILDER_MERGE",
];

pub fn fixture_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("data")
}

pub fn pinned_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()
}

/// Builder over the bundled data files with a fixed seed, a pinned date and a
/// private cursor store.
pub fn seeded_builder(seed: u64) -> DataBuilder {
    let config = BuilderConfig {
        seed: Some(seed),
        ..BuilderConfig::with_data_path(fixture_data_dir())
    };
    let evaluator = DirectiveEvaluator::new(Some(seed)).with_fixed_date(pinned_date());
    DataBuilder::from_parts(
        config,
        Box::new(YamlDataSource::new(fixture_data_dir())),
        evaluator,
    )
    .with_cursor_store(Arc::new(CursorStore::new()))
}

/// Run `f` with HOME pointed at an empty directory and every FIXTURE_BUILDER_*
/// variable cleared; the previous environment is restored afterwards.
pub fn with_clean_env<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> = ENV_VARS
        .iter()
        .map(|var| (*var, std::env::var(var).ok()))
        .collect();
    let home = tempfile::TempDir::new().unwrap();
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
    std::env::set_var("HOME", home.path());

    let result = f();

    for (var, value) in saved {
        match value {
            Some(value) => std::env::set_var(var, value),
            None => std::env::remove_var(var),
        }
    }
    result
}
