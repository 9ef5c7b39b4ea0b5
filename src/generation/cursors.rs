//! Sequential Cursors
//!
//! Round-robin positions backing the `sequential` capability. Each cursor is keyed
//! by the caller that asked and a content digest of the collection it cycles over,
//! so one caller can run several independent cycles without naming them.

use crate::value::Value;
use blake3::Hasher;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

static GLOBAL_CURSORS: OnceLock<Arc<CursorStore>> = OnceLock::new();

/// Opaque identity of whoever requests fixture data (a test, a page object, a worker).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallerId(String);

impl CallerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CallerId {
    fn default() -> Self {
        Self::new("default")
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// BLAKE3 digest of a collection's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionKey([u8; 32]);

impl CollectionKey {
    /// Digest of a type-tagged encoding of `items`; equal contents give equal keys.
    pub fn of(items: &[Value]) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(b"sequence");
        hasher.update(&(items.len() as u64).to_be_bytes());
        for item in items {
            hash_value(&mut hasher, item);
        }
        Self(*hasher.finalize().as_bytes())
    }

    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

fn hash_value(hasher: &mut Hasher, value: &Value) {
    match value {
        Value::Null => {
            hasher.update(b"null");
        }
        Value::Bool(b) => {
            hasher.update(b"bool");
            hasher.update(&[u8::from(*b)]);
        }
        Value::Integer(n) => {
            hasher.update(b"int");
            hasher.update(&n.to_be_bytes());
        }
        Value::Float(x) => {
            hasher.update(b"float");
            hasher.update(&x.to_bits().to_be_bytes());
        }
        Value::String(s) => {
            hasher.update(b"str");
            hasher.update(&(s.len() as u64).to_be_bytes());
            hasher.update(s.as_bytes());
        }
        Value::Sequence(items) => {
            hasher.update(b"seq");
            hasher.update(&(items.len() as u64).to_be_bytes());
            for item in items {
                hash_value(hasher, item);
            }
        }
        Value::Mapping(map) => {
            // BTreeMap iteration is sorted, so the encoding is deterministic
            hasher.update(b"map");
            hasher.update(&(map.len() as u64).to_be_bytes());
            for (key, item) in map {
                hasher.update(&(key.len() as u64).to_be_bytes());
                hasher.update(key.as_bytes());
                hash_value(hasher, item);
            }
        }
    }
}

/// Cursor table: (CallerId, CollectionKey) -> index of the element last handed out
#[derive(Debug, Default)]
pub struct CursorStore {
    cursors: Mutex<HashMap<(CallerId, CollectionKey), usize>>,
}

impl CursorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide store shared by every builder that does not bring its own.
    pub fn global() -> Arc<CursorStore> {
        Arc::clone(GLOBAL_CURSORS.get_or_init(|| Arc::new(CursorStore::new())))
    }

    /// Advance the caller's cursor over `items` and return the element it lands on.
    ///
    /// The first call for a (caller, collection) pair yields `items[0]`; the cursor
    /// wraps to 0 after the last element. Returns `None` for an empty collection.
    pub fn next(&self, caller: &CallerId, items: &[Value]) -> Option<Value> {
        if items.is_empty() {
            return None;
        }

        let key = (caller.clone(), CollectionKey::of(items));
        let mut cursors = self.cursors.lock();
        let index = match cursors.get(&key) {
            Some(current) => (current + 1) % items.len(),
            None => 0,
        };
        cursors.insert(key, index);
        Some(items[index].clone())
    }

    /// Index most recently handed out for this caller and collection.
    pub fn position(&self, caller: &CallerId, items: &[Value]) -> Option<usize> {
        self.cursors
            .lock()
            .get(&(caller.clone(), CollectionKey::of(items)))
            .copied()
    }

    /// Drop every cursor.
    pub fn reset(&self) {
        self.cursors.lock().clear();
    }

    /// Drop the cursors owned by one caller.
    pub fn reset_caller(&self, caller: &CallerId) {
        self.cursors.lock().retain(|(owner, _), _| owner != caller);
    }

    pub fn len(&self) -> usize {
        self.cursors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
