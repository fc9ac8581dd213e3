use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Structural description of a JSON value, inferred from one concrete example.
///
/// Properties exist only on `Object`, an item schema only on `Array`; the enum
/// makes both invariants hold by construction. Property names are the exact
/// observed JSON keys. A schema is an immutable value once inferred.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Schema {
    Object {
        properties: IndexMap<String, Schema>,
        /// Names of properties whose observed value was non-null.
        required: BTreeSet<String>,
    },
    Array {
        items: Box<Schema>,
    },
    String,
    Number,
    Boolean,
    Null,
    /// No example to infer from, e.g. the item type of an empty array.
    Unknown,
}

impl Schema {
    /// Infers a schema from a concrete JSON value.
    ///
    /// Arrays take their item schema from element 0 (`Unknown` when empty).
    /// Object properties are required iff the observed value was non-null.
    /// No integer/float distinction is made: every JSON number is `Number`.
    pub fn infer(value: &Value) -> Schema {
        match value {
            Value::Null => Schema::Null,
            Value::Bool(_) => Schema::Boolean,
            Value::Number(_) => Schema::Number,
            Value::String(_) => Schema::String,
            Value::Array(items) => {
                let items = match items.first() {
                    Some(first) => Schema::infer(first),
                    None => Schema::Unknown,
                };
                Schema::Array {
                    items: Box::new(items),
                }
            }
            Value::Object(map) => {
                let mut properties = IndexMap::new();
                let mut required = BTreeSet::new();
                for (key, value) in map {
                    properties.insert(key.clone(), Schema::infer(value));
                    if !value.is_null() {
                        required.insert(key.clone());
                    }
                }
                Schema::Object {
                    properties,
                    required,
                }
            }
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Schema::Object { .. })
    }

    /// Structural identity hash used for deduplication.
    ///
    /// Property names are visited in sorted order, so two schemas with the same
    /// shape fingerprint identically regardless of observed key order.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.hash_structure(&mut hasher);
        hasher.finish()
    }

    fn hash_structure<H: Hasher>(&self, hasher: &mut H) {
        match self {
            Schema::Object {
                properties,
                required,
            } => {
                0u8.hash(hasher);
                let mut names: Vec<&String> = properties.keys().collect();
                names.sort();
                for name in names {
                    name.hash(hasher);
                    properties[name.as_str()].hash_structure(hasher);
                }
                for name in required {
                    name.hash(hasher);
                }
            }
            Schema::Array { items } => {
                1u8.hash(hasher);
                items.hash_structure(hasher);
            }
            Schema::String => 2u8.hash(hasher),
            Schema::Number => 3u8.hash(hasher),
            Schema::Boolean => 4u8.hash(hasher),
            Schema::Null => 5u8.hash(hasher),
            Schema::Unknown => 6u8.hash(hasher),
        }
    }
}
