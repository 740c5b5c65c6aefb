//! Customization scripts for generated skills
//!
//! A `<Throwable Eval>` block runs in an embedded Rhai engine with the
//! generated skill bound as the object map `skill`. The engine has no file,
//! network or process access; besides `skill` the script only sees the
//! read-only constant `skill_count` (length of the skill catalog).
//!
//! Blocks use Rhai syntax: strings are double-quoted and variables are
//! declared with `let`. Blocks written for a JavaScript host need rewriting.
//!
//! Failures are contained: the error is logged and whatever the script
//! changed before failing is kept.

use lobber_core::{Skill, Value, ValueMap};
use rhai::{Dynamic, Engine, Scope, INT};

/// Name of the skill binding inside scripts
pub const SKILL_VAR: &str = "skill";
/// Name of the catalog length constant inside scripts
pub const SKILL_COUNT_VAR: &str = "skill_count";

/// What happened to a skill's customization block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomizeOutcome {
    /// The block was empty; nothing ran
    Skipped,
    /// The block ran to completion
    Applied,
    /// The block raised an error; partial changes were kept
    Failed(String),
}

/// Runs customization blocks against skills
pub struct ScriptRunner {
    engine: Engine,
}

impl ScriptRunner {
    /// Create a runner
    ///
    /// `max_operations` bounds each script's work; 0 leaves it unlimited.
    pub fn new(max_operations: u64) -> Self {
        let mut engine = Engine::new();
        engine.set_strict_variables(true);
        engine.set_max_operations(max_operations);
        engine.on_print(|text| tracing::info!(target: "lobber::script", "{}", text));
        engine.on_debug(|text, source, pos| {
            tracing::debug!(target: "lobber::script", source, %pos, "{}", text)
        });
        Self { engine }
    }

    /// Run a block with `skill` bound to the given skill
    ///
    /// The binding is written back to the skill whether or not the script
    /// succeeded, so a failing script leaves its partial changes in place.
    pub fn customize(
        &self,
        skill: &mut Skill,
        script: &str,
        skill_count: usize,
    ) -> CustomizeOutcome {
        if script.trim().is_empty() {
            return CustomizeOutcome::Skipped;
        }

        let mut scope = Scope::new();
        scope.push_dynamic(SKILL_VAR, Dynamic::from_map(map_to_rhai(&skill.fields)));
        scope.push_constant(SKILL_COUNT_VAR, skill_count as INT);

        let result = self.engine.run_with_scope(&mut scope, script);

        if let Some(after) = scope.get_value::<rhai::Map>(SKILL_VAR) {
            merge_fields(&mut skill.fields, after);
        }

        match result {
            Ok(()) => CustomizeOutcome::Applied,
            Err(err) => {
                let id = skill.id().map(|id| id.raw());
                tracing::warn!(skill = ?id, error = %err, "throwable customization script failed");
                CustomizeOutcome::Failed(err.to_string())
            }
        }
    }
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Write script results back, keeping the original order of existing fields
fn merge_fields(fields: &mut ValueMap, after: rhai::Map) {
    fields.retain(|key, _| after.contains_key(key.as_str()));
    for (key, value) in after {
        let value = dynamic_to_value(value);
        // Map equality ignores order, so untouched nested maps keep their layout
        if fields.get(key.as_str()) != Some(&value) {
            fields.insert(key.to_string(), value);
        }
    }
}

/// Convert a Value to a Rhai Dynamic
pub fn value_to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::Null => Dynamic::UNIT,
        Value::Bool(b) => Dynamic::from_bool(*b),
        Value::Int(i) => Dynamic::from_int(*i),
        Value::Float(f) => Dynamic::from_float(*f),
        Value::String(s) => Dynamic::from(s.clone()),
        Value::List(list) => Dynamic::from_array(list.iter().map(value_to_dynamic).collect()),
        Value::Map(map) => Dynamic::from_map(map_to_rhai(map)),
    }
}

/// Convert a Rhai Dynamic to a Value
pub fn dynamic_to_value(value: Dynamic) -> Value {
    if value.is_unit() {
        return Value::Null;
    }
    if let Ok(b) = value.as_bool() {
        return Value::Bool(b);
    }
    if let Ok(i) = value.as_int() {
        return Value::Int(i);
    }
    if let Ok(f) = value.as_float() {
        return Value::Float(f);
    }
    if value.is::<rhai::Array>() {
        return match value.try_cast::<rhai::Array>() {
            Some(list) => Value::List(list.into_iter().map(dynamic_to_value).collect()),
            None => Value::Null,
        };
    }
    if value.is::<rhai::Map>() {
        return match value.try_cast::<rhai::Map>() {
            Some(map) => Value::Map(map_from_rhai(map)),
            None => Value::Null,
        };
    }
    // Strings, chars and anything else the script produced
    Value::String(value.to_string())
}

fn map_to_rhai(map: &ValueMap) -> rhai::Map {
    map.iter()
        .map(|(key, value)| (key.as_str().into(), value_to_dynamic(value)))
        .collect()
}

fn map_from_rhai(map: rhai::Map) -> ValueMap {
    map.into_iter()
        .map(|(key, value)| (key.to_string(), dynamic_to_value(value)))
        .collect()
}
