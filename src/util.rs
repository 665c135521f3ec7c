//! Small pure helpers over typed records.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use serde_json::Value;

/// Keep the first item for each distinct key, preserving input order.
pub fn find_unique<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key_fn(item)))
        .collect()
}

/// Group items by key. Groups are ordered by key; items keep input order.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> BTreeMap<K, Vec<T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}

/// Walk a dotted path (`response.docs[0].hgnc_id`) through a JSON value.
///
/// Returns `default` when any segment is missing or the wrong shape.
pub fn deep_get<'a>(value: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    let mut current = value;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let (field, indexes) = split_indexes(segment);
        if !field.is_empty() {
            match current.get(field) {
                Some(next) => current = next,
                None => return default,
            }
        }
        for index in indexes {
            match index.and_then(|i| current.get(i)) {
                Some(next) => current = next,
                None => return default,
            }
        }
    }
    current
}

/// Like [`deep_get`] but yields an owned string for scalar leaves.
pub fn deep_get_string(value: &Value, path: &str) -> Option<String> {
    match deep_get(value, path, &Value::Null) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// "docs[0][1]" -> ("docs", [Some(0), Some(1)])
fn split_indexes(segment: &str) -> (&str, Vec<Option<usize>>) {
    let Some(open) = segment.find('[') else {
        return (segment, Vec::new());
    };
    let indexes = segment[open..]
        .split('[')
        .filter(|part| !part.is_empty())
        .map(|part| part.trim_end_matches(']').parse::<usize>().ok())
        .collect();
    (&segment[..open], indexes)
}
