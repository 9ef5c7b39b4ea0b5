//! Random selection capabilities: `randomize`, `mask`, `characters`.

use crate::error::EvalError;
use crate::value::Value;
use rand::Rng;

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Uniform pick from a non-empty slice.
pub fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[rng.random_range(0..items.len())])
    }
}

/// Uniform element of a sequence.
pub fn randomize_sequence<R: Rng>(rng: &mut R, items: &[Value]) -> Result<Value, EvalError> {
    pick(rng, items)
        .cloned()
        .ok_or_else(|| EvalError::invalid_arguments("randomize", "collection is empty"))
}

/// Uniform integer in `lo..=hi`.
pub fn randomize_range<R: Rng>(rng: &mut R, lo: i64, hi: i64) -> Result<Value, EvalError> {
    if lo > hi {
        return Err(EvalError::invalid_arguments(
            "randomize",
            format!("range {}..{} is empty", lo, hi),
        ));
    }
    Ok(Value::Integer(rng.random_range(lo..=hi)))
}

/// Expand a mask: `#` digit, `A` uppercase letter, `a` lowercase letter,
/// anything else copied through.
pub fn mask<R: Rng>(rng: &mut R, pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| match c {
            '#' => char::from(b'0' + rng.random_range(0..10u8)),
            'A' => char::from(b'A' + rng.random_range(0..26u8)),
            'a' => char::from(b'a' + rng.random_range(0..26u8)),
            other => other,
        })
        .collect()
}

/// `count` random lowercase alphanumeric characters.
pub fn characters<R: Rng>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| char::from(ALPHANUMERIC[rng.random_range(0..ALPHANUMERIC.len())]))
        .collect()
}
