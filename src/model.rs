//! ER model types deserialized from the request payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A complete entity-relationship model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErModel {
    /// Entities in input order.
    pub entities: Vec<Entity>,
    /// Relations in input order.
    #[serde(default)]
    pub relations: Vec<Relation>,
}

/// A table or concept with typed attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name, used as the block header.
    pub name: String,
    /// Attributes in input order.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// A single column of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Column name.
    pub name: String,
    /// Column type, passed through as written.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether this column is part of the primary key. `null` means no.
    #[serde(default, deserialize_with = "flag_or_false")]
    pub primary_key: bool,
    /// Whether this column accepts nulls. Absent or `null` means nullable.
    #[serde(default = "default_nullable", deserialize_with = "flag_or_true")]
    pub nullable: bool,
}

/// An association between two entities.
///
/// Entity names are not checked against the model's entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Left-hand entity name.
    pub entity1: String,
    /// Right-hand entity name.
    pub entity2: String,
    /// Cardinality marker on the left side; scalars such as `1` are accepted.
    #[serde(default, deserialize_with = "scalar_text")]
    pub cardinality1: String,
    /// Cardinality marker on the right side.
    #[serde(default, deserialize_with = "scalar_text")]
    pub cardinality2: String,
}

fn default_nullable() -> bool {
    true
}

fn flag_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn flag_or_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_nullable))
}

/// Render any JSON scalar as script text: strings unquoted, `null` as empty.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
