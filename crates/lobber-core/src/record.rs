//! Host database records: source records, skills and classes

use crate::{Error, RecordKind, Result, SkillId, SourceRef, Value, ValueMap};
use serde::{Deserialize, Serialize};

/// An item, weapon or armour entry from the host database
///
/// Fields are kept dynamic since the set copied into a skill is decided by
/// the ability template, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Which catalog this record belongs to
    pub kind: RecordKind,
    /// All fields as loaded (e.g., {"id": 1, "name": "Rock", "note": "<Throwable>"})
    pub fields: ValueMap,
}

impl SourceRecord {
    /// Create a record with an id and a name
    pub fn new(kind: RecordKind, id: u32, name: impl Into<String>) -> Self {
        let mut fields = ValueMap::new();
        fields.insert("id".to_string(), Value::Int(id as i64));
        fields.insert("name".to_string(), Value::String(name.into()));
        fields.insert("note".to_string(), Value::String(String::new()));
        Self { kind, fields }
    }

    /// Build a record from a loaded map value
    pub fn from_value(kind: RecordKind, value: Value) -> Result<Self> {
        match value {
            Value::Map(fields) => Ok(Self { kind, fields }),
            other => Err(Error::TypeError {
                expected: "map".to_string(),
                got: other.type_name().to_string(),
            }),
        }
    }

    /// Set the note blob
    pub fn with_note(self, note: impl Into<String>) -> Self {
        self.with_field("note", note.into())
    }

    /// Set an arbitrary field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<u32> {
        self.get("id")
            .and_then(Value::as_int)
            .and_then(|id| u32::try_from(id).ok())
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// The free-text note blob, empty when absent
    pub fn note(&self) -> &str {
        self.get("note").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn scope(&self) -> Option<i64> {
        self.get("scope").and_then(Value::as_int)
    }

    /// Reference to this record for inventory lookups
    pub fn source_ref(&self) -> Option<SourceRef> {
        self.id().map(|id| SourceRef::new(self.kind, id))
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check whether the record carries a field
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

/// A skill in the global skill catalog
///
/// Hand-authored skills have no origin; generated throw skills always
/// reference the record they were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill fields in host layout (e.g., "stypeId", "scope", "message1")
    pub fields: ValueMap,
    /// The record this skill throws, if any
    #[serde(default)]
    pub origin: Option<SourceRef>,
}

impl Skill {
    /// Create a skill from its fields
    pub fn new(fields: ValueMap) -> Self {
        Self {
            fields,
            origin: None,
        }
    }

    /// Build a hand-authored skill from a loaded map value
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(fields) => Ok(Self::new(fields)),
            other => Err(Error::TypeError {
                expected: "map".to_string(),
                got: other.type_name().to_string(),
            }),
        }
    }

    /// Attach the origin record
    pub fn with_origin(mut self, origin: SourceRef) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn id(&self) -> Option<SkillId> {
        self.get("id")
            .and_then(Value::as_int)
            .and_then(|id| u32::try_from(id).ok())
            .map(SkillId::new)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn note(&self) -> &str {
        self.get("note").and_then(Value::as_str).unwrap_or_default()
    }

    /// Skill type (menu category) id
    pub fn stype_id(&self) -> Option<i64> {
        self.get("stypeId").and_then(Value::as_int)
    }

    pub fn scope(&self) -> Option<i64> {
        self.get("scope").and_then(Value::as_int)
    }

    pub fn occasion(&self) -> Option<i64> {
        self.get("occasion").and_then(Value::as_int)
    }

    pub fn message1(&self) -> Option<&str> {
        self.get("message1").and_then(Value::as_str)
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a field value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }
}

/// One entry of a class's learnable skill list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Learning {
    pub level: i64,
    #[serde(default)]
    pub note: String,
    pub skill_id: u32,
}

impl Learning {
    /// A learning available from level 1 with an empty note
    pub fn at_level_one(skill_id: SkillId) -> Self {
        Self {
            level: 1,
            note: String::new(),
            skill_id: skill_id.raw(),
        }
    }
}

/// A character class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub learnings: Vec<Learning>,
}

impl ClassDef {
    /// Create a class with no learnings
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            learnings: Vec::new(),
        }
    }

    /// Learnings that grant the given skill
    pub fn learnings_for(&self, skill_id: SkillId) -> impl Iterator<Item = &Learning> {
        self.learnings
            .iter()
            .filter(move |l| l.skill_id == skill_id.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_record_accessors() {
        let rock = SourceRecord::new(RecordKind::Item, 4, "Rock")
            .with_note("<Throwable>")
            .with_field("scope", 1i64);

        assert_eq!(rock.id(), Some(4));
        assert_eq!(rock.name(), Some("Rock"));
        assert_eq!(rock.note(), "<Throwable>");
        assert_eq!(rock.scope(), Some(1));
        assert_eq!(rock.source_ref(), Some(SourceRef::item(4)));
        assert!(!rock.has_field("price"));
    }

    #[test]
    fn test_source_record_from_non_map() {
        let err = SourceRecord::from_value(RecordKind::Armor, Value::Int(1)).unwrap_err();
        assert!(matches!(err, Error::TypeError { .. }));
    }

    #[test]
    fn test_missing_note_is_empty() {
        let mut fields = ValueMap::new();
        fields.insert("id".to_string(), Value::Int(1));
        let record = SourceRecord::from_value(RecordKind::Weapon, Value::Map(fields)).unwrap();
        assert_eq!(record.note(), "");
        assert_eq!(record.name(), None);
    }

    #[test]
    fn test_skill_accessors() {
        let mut skill = Skill::new(ValueMap::new()).with_origin(SourceRef::weapon(2));
        skill.set("id", 9i64);
        skill.set("stypeId", 1i64);
        skill.set("message1", "throws a Dagger!");

        assert_eq!(skill.id(), Some(SkillId::new(9)));
        assert_eq!(skill.stype_id(), Some(1));
        assert_eq!(skill.message1(), Some("throws a Dagger!"));
        assert_eq!(skill.origin, Some(SourceRef::weapon(2)));
    }

    #[test]
    fn test_class_json_shape() {
        let class: ClassDef = serde_json::from_str(
            r#"{"id": 1, "name": "Hero", "expParams": [30, 20, 30, 30],
                "learnings": [{"level": 1, "note": "", "skillId": 8}]}"#,
        )
        .unwrap();

        assert_eq!(class.learnings, vec![Learning::at_level_one(SkillId::new(8))]);
        assert_eq!(class.learnings_for(SkillId::new(8)).count(), 1);
    }
}
