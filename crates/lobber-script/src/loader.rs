//! Host data loader
//!
//! Reads the host's JSON data files (positional arrays with a leading `null`)
//! plus the optional RON files for throw configuration and the ability template.

use crate::error::{Error, Result};
use lobber_core::{
    AbilityTemplate, ClassDef, Database, RecordKind, Skill, SkillCatalog, SourceRecord,
    ThrowConfig, Value,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Data file names inside a host data directory
pub const ITEMS_FILE: &str = "Items.json";
pub const WEAPONS_FILE: &str = "Weapons.json";
pub const ARMORS_FILE: &str = "Armors.json";
pub const SKILLS_FILE: &str = "Skills.json";
pub const CLASSES_FILE: &str = "Classes.json";
pub const SYSTEM_FILE: &str = "System.json";
pub const PARAMETERS_FILE: &str = "throw_parameters.json";
pub const CONFIG_FILE: &str = "throw_config.ron";
pub const TEMPLATE_FILE: &str = "throw_template.ron";

/// Everything the throw system needs at boot
#[derive(Debug, Default)]
pub struct GameData {
    /// The host database
    pub database: Database,
    /// Shape of generated skills
    pub template: AbilityTemplate,
    /// Throw settings
    pub config: ThrowConfig,
}

/// Loader for host data files
pub struct Loader {
    data: GameData,
}

impl Loader {
    /// Create a new loader with an empty database and default settings
    pub fn new() -> Self {
        Self {
            data: GameData::default(),
        }
    }

    /// Load a source catalog (items, weapons or armour) from JSON
    pub fn load_records_str(&mut self, kind: RecordKind, content: &str) -> Result<()> {
        let mut records = Vec::new();
        for slot in parse_slots(content)? {
            records.push(match slot {
                Value::Null => None,
                value => Some(SourceRecord::from_value(kind, value)?),
            });
        }

        let catalog = match kind {
            RecordKind::Item => &mut self.data.database.items,
            RecordKind::Weapon => &mut self.data.database.weapons,
            RecordKind::Armor => &mut self.data.database.armors,
        };
        *catalog = records;
        Ok(())
    }

    /// Load the skill catalog from JSON
    pub fn load_skills_str(&mut self, content: &str) -> Result<()> {
        let mut slots = Vec::new();
        for slot in parse_slots(content)? {
            slots.push(match slot {
                Value::Null => None,
                value => Some(Skill::from_value(value)?),
            });
        }
        self.data.database.skills = SkillCatalog::from_slots(slots);
        Ok(())
    }

    /// Load the class catalog from JSON
    pub fn load_classes_str(&mut self, content: &str) -> Result<()> {
        let classes: Vec<Option<ClassDef>> = serde_json::from_str(content)?;
        self.data.database.classes = classes;
        Ok(())
    }

    /// Load skill type names from the host's system file
    pub fn load_system_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct SystemFile {
            #[serde(default)]
            skill_types: Vec<Option<String>>,
        }

        let system: SystemFile = serde_json::from_str(content)?;
        self.data.database.skill_types = system
            .skill_types
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();
        Ok(())
    }

    /// Load throw settings from RON
    pub fn load_config_str(&mut self, content: &str) -> Result<()> {
        self.data.config = ThrowConfig::from_ron(content)?;
        Ok(())
    }

    /// Load throw settings from the host's plugin parameter table
    ///
    /// The table is a JSON object of string values keyed by parameter name,
    /// as the host stores plugin parameters.
    pub fn load_plugin_parameters_str(&mut self, content: &str) -> Result<()> {
        let params: HashMap<String, String> = serde_json::from_str(content)?;
        self.data.config = ThrowConfig::from_plugin_parameters(&params)?;
        Ok(())
    }

    /// Load an ability template from RON
    pub fn load_template_str(&mut self, content: &str) -> Result<()> {
        let template = AbilityTemplate::from_ron(content)?;
        if template.is_empty() {
            return Err(Error::InvalidSchema(
                "ability template defines no fields".to_string(),
            ));
        }
        self.data.template = template;
        Ok(())
    }

    /// Load every known file present in a host data directory
    ///
    /// Missing files are skipped and keep whatever was loaded before. When
    /// both a plugin parameter table and a RON config exist, the RON config wins.
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let read = |name: &str| -> Result<Option<String>> {
            let file = path.join(name);
            if file.is_file() {
                Ok(Some(fs::read_to_string(file)?))
            } else {
                Ok(None)
            }
        };

        if let Some(content) = read(ITEMS_FILE)? {
            self.load_records_str(RecordKind::Item, &content)?;
        }
        if let Some(content) = read(WEAPONS_FILE)? {
            self.load_records_str(RecordKind::Weapon, &content)?;
        }
        if let Some(content) = read(ARMORS_FILE)? {
            self.load_records_str(RecordKind::Armor, &content)?;
        }
        if let Some(content) = read(SKILLS_FILE)? {
            self.load_skills_str(&content)?;
        }
        if let Some(content) = read(CLASSES_FILE)? {
            self.load_classes_str(&content)?;
        }
        if let Some(content) = read(SYSTEM_FILE)? {
            self.load_system_str(&content)?;
        }
        if let Some(content) = read(PARAMETERS_FILE)? {
            self.load_plugin_parameters_str(&content)?;
        }
        if let Some(content) = read(CONFIG_FILE)? {
            self.load_config_str(&content)?;
        }
        if let Some(content) = read(TEMPLATE_FILE)? {
            self.load_template_str(&content)?;
        }

        Ok(())
    }

    /// Finish loading and return the data
    pub fn finish(self) -> GameData {
        self.data
    }

    /// Get the current data (for inspection during loading)
    pub fn data(&self) -> &GameData {
        &self.data
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_slots(content: &str) -> Result<Vec<Value>> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    match Value::from(json) {
        Value::List(slots) => Ok(slots),
        other => Err(Error::InvalidSchema(format!(
            "expected a JSON array of records, got {}",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lobber_core::{SkillId, SourceRef, PARAM_THROW_SKILL_TYPE_ID};

    #[test]
    fn test_load_items() {
        let content = r#"[
            null,
            {"id": 1, "name": "Potion", "note": "", "scope": 7, "consumable": true},
            null,
            {"id": 3, "name": "Rock", "note": "<Throwable>", "scope": 1}
        ]"#;

        let mut loader = Loader::new();
        loader.load_records_str(RecordKind::Item, content).unwrap();

        let data = loader.finish();
        assert_eq!(data.database.items.len(), 4);
        assert!(data.database.items[2].is_none());
        let rock = data.database.source(SourceRef::item(3)).unwrap();
        assert_eq!(rock.name(), Some("Rock"));
        assert_eq!(rock.kind, RecordKind::Item);
    }

    #[test]
    fn test_load_records_rejects_non_array() {
        let mut loader = Loader::new();
        let err = loader
            .load_records_str(RecordKind::Weapon, r#"{"id": 1}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_load_records_rejects_non_object_slot() {
        let mut loader = Loader::new();
        let err = loader
            .load_records_str(RecordKind::Armor, "[null, 5]")
            .unwrap_err();
        assert!(matches!(err, Error::Core(_)));
    }

    #[test]
    fn test_load_skills_and_classes() {
        let mut loader = Loader::new();
        loader
            .load_skills_str(r#"[null, {"id": 1, "name": "Attack", "stypeId": 0}]"#)
            .unwrap();
        loader
            .load_classes_str(
                r#"[null, {"id": 1, "name": "Hero", "learnings": [{"level": 1, "note": "", "skillId": 1}]}]"#,
            )
            .unwrap();

        let data = loader.finish();
        assert_eq!(data.database.skills.len(), 2);
        assert_eq!(data.database.skills.next_id(), SkillId::new(2));
        let hero = data.database.classes[1].as_ref().unwrap();
        assert_eq!(hero.learnings_for(SkillId::new(1)).count(), 1);
    }

    #[test]
    fn test_load_system_skill_types() {
        let mut loader = Loader::new();
        loader
            .load_system_str(r#"{"gameTitle": "Demo", "skillTypes": ["", "Throw", "Magic"]}"#)
            .unwrap();

        let data = loader.finish();
        assert_eq!(data.database.skill_type_name(2), Some("Magic"));
    }

    #[test]
    fn test_load_config_and_template() {
        let mut loader = Loader::new();
        loader
            .load_config_str(r#"(throw_skill_type_id: 3, disable_throw_menu: true)"#)
            .unwrap();
        loader
            .load_template_str(r#"(defaults: {"id": Int(0), "scope": Int(1)})"#)
            .unwrap();

        let data = loader.finish();
        assert_eq!(data.config.throw_skill_type_id, 3);
        assert!(data.config.disable_throw_menu);
        assert_eq!(data.template.len(), 2);
    }

    #[test]
    fn test_load_plugin_parameters() {
        let mut loader = Loader::new();
        loader
            .load_plugin_parameters_str(
                r#"{"Throw Skill Type ID": "4", "Item Count Font Size": "0",
                    "Disable Throw Menu": "true", "Throw Message": "hurls %1!"}"#,
            )
            .unwrap();

        let config = loader.finish().config;
        assert_eq!(config.throw_skill_type_id, 4);
        assert_eq!(config.item_count_font_size, 1);
        assert!(config.disable_throw_menu);
        assert_eq!(config.format_message("Rock"), "hurls Rock!");
    }

    #[test]
    fn test_bad_plugin_parameter_rejected() {
        let mut loader = Loader::new();
        let err = loader
            .load_plugin_parameters_str(&format!(r#"{{"{}": "many"}}"#, PARAM_THROW_SKILL_TYPE_ID))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Core(lobber_core::Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_load_directory_reads_parameters() {
        let dir = std::env::temp_dir().join(format!("lobber-loader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PARAMETERS_FILE), r#"{"Throw Skill Type ID": "3"}"#).unwrap();
        fs::write(
            dir.join(ITEMS_FILE),
            r#"[null, {"id": 1, "name": "Rock", "note": "<Throwable>"}]"#,
        )
        .unwrap();

        let mut loader = Loader::new();
        let result = loader.load_directory(&dir);
        fs::remove_dir_all(&dir).unwrap();
        result.unwrap();

        let data = loader.finish();
        assert_eq!(data.config.throw_skill_type_id, 3);
        assert_eq!(data.database.items.len(), 2);
    }

    #[test]
    fn test_empty_template_rejected() {
        let mut loader = Loader::new();
        let err = loader.load_template_str("(defaults: {})").unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(_)));
    }

    #[test]
    fn test_load_directory_missing() {
        let mut loader = Loader::new();
        let err = loader
            .load_directory("/definitely/not/a/data/dir")
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
