//! Declarative route configuration.
//!
//! Config data arrives already parsed by the host application; the
//! structures here deserialize from any self-describing serde format.
//! [`from_json`] covers the common JSON case.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// A full route configuration: route name to entry, in declaration
/// order.
pub type RouteConfig = IndexMap<String, RouteConfigEntry>;

/// One route's declarative definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfigEntry {
    /// The url pattern (literal segments and `:name` placeholders).
    ///
    /// Optional here so that its absence can be reported per entry;
    /// `RouteCollection::add_from_config` requires it.
    #[serde(default)]
    pub route: Option<String>,
    /// Opaque controller identifier. Required, like `route`.
    #[serde(default)]
    pub controller: Option<String>,
    /// Per-parameter declarations, keyed by placeholder name.
    #[serde(default)]
    pub params: IndexMap<String, ParamConfig>,
}

/// One parameter's declarative definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamConfig {
    /// Declared type: `"string"`, `"int"`, `"mixed"`, or a custom
    /// regular-expression fragment. Defaults to `"string"` when unset.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Whether the parameter must be present in the url. Coerced
    /// truthily from whatever the config supplies.
    #[serde(default, deserialize_with = "truthy")]
    pub mandatory: bool,
}

/// Parses a JSON document into a [`RouteConfig`].
///
/// # Errors
///
/// Returns [`RoutingError::ConfigParse`](crate::RoutingError::ConfigParse)
/// on malformed JSON.
pub fn from_json(json: &str) -> Result<RouteConfig> {
    Ok(serde_json::from_str(json)?)
}

/// Truthy coercion for the `mandatory` flag.
///
/// `false`, `0`, `""`, `"0"`, `null` and empty containers read as
/// false; everything else reads as true.
fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => flag,
        serde_json::Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(text) => !text.is_empty() && text != "0",
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(entries) => !entries.is_empty(),
    })
}
