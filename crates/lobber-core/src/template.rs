//! Ability template: the field layout of a generated skill

use crate::{Result, Value, ValueMap};
use serde::{Deserialize, Serialize};

/// Declarative shape of a generated skill
///
/// Each entry names a skill field and the value it takes when the source
/// record does not carry that field. Fields outside the template are never
/// copied, which is what strips item/equip-only data such as `price`,
/// `consumable`, `params` or `traits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityTemplate {
    /// Field name -> default value, in skill field order
    pub defaults: ValueMap,
}

impl AbilityTemplate {
    /// Create an empty template
    pub fn new() -> Self {
        Self {
            defaults: ValueMap::new(),
        }
    }

    /// The host's skill record layout
    pub fn standard() -> Self {
        let mut damage = ValueMap::new();
        damage.insert("critical".to_string(), Value::Bool(false));
        damage.insert("elementId".to_string(), Value::Int(0));
        damage.insert("formula".to_string(), Value::from("0"));
        damage.insert("type".to_string(), Value::Int(0));
        damage.insert("variance".to_string(), Value::Int(20));

        Self::new()
            .with_default("id", 0i64)
            .with_default("animationId", 0i64)
            .with_default("damage", damage)
            .with_default("description", "")
            .with_default("effects", Value::List(Vec::new()))
            .with_default("hitType", 0i64)
            .with_default("iconIndex", 0i64)
            .with_default("message1", "")
            .with_default("message2", "")
            .with_default("mpCost", 0i64)
            .with_default("name", "")
            .with_default("note", "")
            .with_default("occasion", 0i64)
            .with_default("repeats", 1i64)
            .with_default("requiredWtypeId1", 0i64)
            .with_default("requiredWtypeId2", 0i64)
            .with_default("scope", 1i64)
            .with_default("speed", 0i64)
            .with_default("stypeId", 0i64)
            .with_default("successRate", 100i64)
            .with_default("tpCost", 0i64)
            .with_default("tpGain", 0i64)
    }

    /// Parse a template from RON, e.g. `(defaults: {"id": Int(0)})`
    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Add or replace a field default
    pub fn with_default(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(field.into(), value.into());
        self
    }

    /// Get the default for a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.defaults.get(field)
    }

    /// Iterate field names and defaults in order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

impl Default for AbilityTemplate {
    fn default() -> Self {
        Self::standard()
    }
}
