// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Deep merge — combines layered option mappings with override precedence.
//
// Every merge borrows both sides and builds a new value. The same defaults are
// merged into every theme and every theme into every document, so neither input
// may ever be modified in place.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Merge an override layer onto a complete base value.
///
/// Fields the override leaves unset keep the base value. Nested mappings are
/// merged recursively; everything else (scalars, sequences) is replaced whole.
pub trait Merge<Rhs: ?Sized = Self> {
    fn merge(&self, overrides: &Rhs) -> Self;
}

/// Merge two keyed maps entry by entry.
///
/// Keys present on both sides are merged with [`Merge`]; keys only in
/// `overrides` are added; keys only in `base` are kept.
pub fn merge_maps<V>(base: &BTreeMap<String, V>, overrides: &BTreeMap<String, V>) -> BTreeMap<String, V>
where
    V: Merge + Clone,
{
    let mut merged = base.clone();
    for (key, value) in overrides {
        let next = match base.get(key) {
            Some(existing) => existing.merge(value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

/// Deep-merge free-form JSON.
///
/// Objects merge key by key. Arrays and scalars in `overrides` replace the base
/// value wholesale; arrays are never combined element-wise.
pub fn merge_values(base: &Value, overrides: &Value) -> Value {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            Value::Object(merge_objects(base_map, override_map))
        }
        (_, replacement) => replacement.clone(),
    }
}

/// Deep-merge two JSON objects with [`merge_values`] semantics.
pub fn merge_objects(base: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        let next = match base.get(key) {
            Some(existing) => merge_values(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

impl Merge for Value {
    fn merge(&self, overrides: &Value) -> Value {
        merge_values(self, overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_override_is_a_copy() {
        let base = json!({"margin": {"left": 0, "right": 0}, "imageDpi": 120});
        assert_eq!(merge_values(&base, &json!({})), base);
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let base = json!({"margin": {"left": 0, "right": 0, "top": 0, "bottom": 0}, "imageDpi": 120});
        let merged = merge_values(&base, &json!({"margin": {"left": 10}}));
        assert_eq!(
            merged,
            json!({"margin": {"left": 10, "right": 0, "top": 0, "bottom": 0}, "imageDpi": 120})
        );
    }

    #[test]
    fn arrays_are_replaced_not_combined() {
        let base = json!({"fontDir": ["/a", "/b", "/c"]});
        let merged = merge_values(&base, &json!({"fontDir": ["/x"]}));
        assert_eq!(merged, json!({"fontDir": ["/x"]}));
    }

    #[test]
    fn scalar_replaces_object_and_object_replaces_scalar() {
        let base = json!({"a": {"nested": true}, "b": 1});
        let merged = merge_values(&base, &json!({"a": 3, "b": {"now": "object"}}));
        assert_eq!(merged, json!({"a": 3, "b": {"now": "object"}}));
    }

    #[test]
    fn inputs_are_not_modified() {
        let base = json!({"margin": {"left": 0}});
        let overrides = json!({"margin": {"left": 5, "top": 2}});
        let base_before = base.clone();
        let overrides_before = overrides.clone();

        let merged = merge_values(&base, &overrides);

        assert_eq!(base, base_before);
        assert_eq!(overrides, overrides_before);
        assert_eq!(merged, json!({"margin": {"left": 5, "top": 2}}));
    }

    #[test]
    fn merge_objects_matches_merge_values() {
        let base = json!({"header": {"logo": "a.png", "height": 20}, "tags": [1, 2]});
        let overrides = json!({"header": {"height": 30}, "tags": [3]});
        let (Value::Object(b), Value::Object(o)) = (&base, &overrides) else {
            unreachable!()
        };
        let merged = merge_objects(b, o);
        assert_eq!(Value::Object(merged.clone()), merge_values(&base, &overrides));
        assert_eq!(merged["header"], json!({"logo": "a.png", "height": 30}));
        assert_eq!(merged["tags"], json!([3]));
    }

    #[test]
    fn merge_maps_keeps_and_adds_keys() {
        let base = BTreeMap::from([
            ("a".to_string(), json!({"x": 1, "y": 2})),
            ("b".to_string(), json!(true)),
        ]);
        let overrides = BTreeMap::from([
            ("a".to_string(), json!({"y": 20})),
            ("c".to_string(), json!("new")),
        ]);
        let merged = merge_maps(&base, &overrides);
        assert_eq!(merged["a"], json!({"x": 1, "y": 20}));
        assert_eq!(merged["b"], json!(true));
        assert_eq!(merged["c"], json!("new"));
    }
}
