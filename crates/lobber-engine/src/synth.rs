//! Throw skill synthesis
//!
//! Turns one item, weapon or armour record into a skill:
//! 1. every template field is copied from the record when present, else the
//!    template default is used
//! 2. behavior fields are forced (throw skill type, battle-only, no MP/TP
//!    cost, battle log message)
//! 3. the target scope is collapsed to a single enemy or a single ally
//! 4. the id is the slot the skill is about to occupy
//! 5. the origin record is attached

use lobber_core::{
    scope, AbilityTemplate, SkillId, Skill, SourceRecord, SourceRef, ThrowConfig, Value,
    ValueMap,
};

/// Occasion code for "battle screen only"
pub const OCCASION_BATTLE: i64 = 1;

/// Builds throw skills from source records
#[derive(Debug, Clone)]
pub struct Synthesizer {
    template: AbilityTemplate,
    config: ThrowConfig,
}

impl Synthesizer {
    /// Create a synthesizer for a template and configuration
    pub fn new(template: AbilityTemplate, config: ThrowConfig) -> Self {
        Self { template, config }
    }

    pub fn template(&self) -> &AbilityTemplate {
        &self.template
    }

    pub fn config(&self) -> &ThrowConfig {
        &self.config
    }

    /// Build the throw skill for a record
    ///
    /// No validation happens here: a record missing e.g. its name yields a
    /// skill carrying the template default for that field.
    pub fn synthesize(&self, record: &SourceRecord, origin: SourceRef, id: SkillId) -> Skill {
        let mut fields = ValueMap::with_capacity(self.template.len());
        for (name, default) in self.template.fields() {
            let value = record.get(name).unwrap_or(default).clone();
            fields.insert(name.to_string(), value);
        }

        let mut skill = Skill::new(fields).with_origin(origin);

        skill.set("stypeId", self.config.throw_skill_type_id);
        skill.set("occasion", OCCASION_BATTLE);
        skill.set("mpCost", 0i64);
        skill.set("tpCost", 0i64);
        skill.set(
            "message1",
            self.config.format_message(record.name().unwrap_or_default()),
        );
        skill.set("message2", "");

        if let Some(code) = skill.scope() {
            skill.set("scope", scope::remap_throw_scope(code));
        }

        skill.set("id", Value::Int(id.raw() as i64));
        skill
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(AbilityTemplate::standard(), ThrowConfig::default())
    }
}
