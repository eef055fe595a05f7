//! `serde_json::Value` → `rhai::Dynamic` conversion for scope building.

use rhai::Dynamic;
use serde_json::{Map, Value};

/// Convert a JSON value into a script-side dynamic value.
pub fn to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::Null => Dynamic::UNIT,
        Value::Bool(b) => Dynamic::from(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Dynamic::from(i)
            } else if let Some(f) = n.as_f64() {
                Dynamic::from(f)
            } else {
                Dynamic::UNIT
            }
        }
        Value::String(s) => Dynamic::from(s.clone()),
        Value::Array(arr) => {
            let items: rhai::Array = arr.iter().map(to_dynamic).collect();
            Dynamic::from(items)
        }
        Value::Object(obj) => Dynamic::from(object_to_map(obj)),
    }
}

/// Convert a JSON object into a script-side map.
pub fn object_to_map(obj: &Map<String, Value>) -> rhai::Map {
    let mut map = rhai::Map::new();
    for (k, v) in obj {
        map.insert(k.clone().into(), to_dynamic(v));
    }
    map
}

/// An optional namespace: `None` reads as an empty mapping, never as a
/// missing variable.
pub fn namespace_to_map(obj: Option<&Map<String, Value>>) -> rhai::Map {
    match obj {
        Some(obj) => object_to_map(obj),
        None => rhai::Map::new(),
    }
}
