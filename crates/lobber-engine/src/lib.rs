//! Lobber Engine - throw skills for the host's skill system
//!
//! - `synth`: builds a throw skill from an item, weapon or armour record
//! - `extender`: appends the throw skills to the catalog once, at boot
//! - `bridge`: cost, payment, list and menu intercepts used during play
//!
//! # Example
//!
//! ```
//! use lobber_core::{ClassDef, Database, RecordKind, SourceRecord};
//! use lobber_engine::CatalogExtender;
//!
//! let mut db = Database::new();
//! db.push_record(SourceRecord::new(RecordKind::Item, 1, "Rock").with_note("<Throwable>"));
//! db.push_class(ClassDef::new(1, "Hero"));
//!
//! let mut extender = CatalogExtender::default();
//! assert!(extender.is_database_loaded(&mut db, || true));
//! assert_eq!(db.skills.len(), 2);
//! ```

pub mod bridge;
mod extender;
mod synth;

pub use bridge::{
    AbilityVariant, Align, CostWindow, PartyInventory, SkillTypeCommand, ThrowBridge,
};
pub use extender::{CatalogExtender, ExtensionReport};
pub use synth::{Synthesizer, OCCASION_BATTLE};

#[cfg(test)]
mod tests {
    use super::*;
    use lobber_core::{scope, SkillId, SourceRef, Value};
    use lobber_script::{GameData, Loader};
    use std::collections::HashMap;

    struct Party(HashMap<SourceRef, u32>);

    impl PartyInventory for Party {
        fn num_items(&self, item: SourceRef) -> u32 {
            self.0.get(&item).copied().unwrap_or(0)
        }

        fn lose_item(&mut self, item: SourceRef, amount: u32) {
            if let Some(count) = self.0.get_mut(&item) {
                *count = count.saturating_sub(amount);
            }
        }
    }

    fn game() -> GameData {
        let mut loader = Loader::new();
        loader
            .load_records_str(
                lobber_core::RecordKind::Item,
                r#"[null,
                    {"id": 1, "name": "Potion", "note": "", "scope": 7, "price": 50},
                    {"id": 2, "name": "Rock", "note": "<Throwable>", "scope": 1, "animationId": 1}
                ]"#,
            )
            .unwrap();
        loader
            .load_records_str(
                lobber_core::RecordKind::Armor,
                r#"[null,
                    {"id": 1, "name": "Buckler", "atypeId": 5, "etypeId": 2,
                     "note": "<Throwable Eval>\nskill.animationId = 5;\n</Throwable Eval>"}
                ]"#,
            )
            .unwrap();
        loader
            .load_skills_str(r#"[null, {"id": 1, "name": "Attack", "stypeId": 0}]"#)
            .unwrap();
        loader
            .load_classes_str(r#"[null, {"id": 1, "name": "Hero", "learnings": []}]"#)
            .unwrap();
        loader.finish()
    }

    fn booted() -> GameData {
        let mut data = game();
        let mut extender = CatalogExtender::new(data.template.clone(), data.config.clone());
        extender.is_database_loaded(&mut data.database, || true);
        data
    }

    #[test]
    fn test_consumable_becomes_throw_skill() {
        let data = booted();
        let rock = data.database.skills.get(SkillId::new(2)).unwrap();

        assert_eq!(rock.name(), Some("Rock"));
        assert_eq!(rock.stype_id(), Some(data.config.throw_skill_type_id));
        assert_eq!(rock.message1(), Some("throws a Rock!"));
        assert_eq!(rock.scope(), Some(scope::ONE_ENEMY));
        assert_eq!(rock.origin, Some(SourceRef::item(2)));
    }

    #[test]
    fn test_armor_customized_after_generation() {
        let data = booted();
        let buckler = data.database.skills.get(SkillId::new(3)).unwrap();

        assert_eq!(buckler.name(), Some("Buckler"));
        assert_eq!(buckler.get("animationId"), Some(&Value::Int(5)));
        assert_eq!(buckler.origin, Some(SourceRef::armor(1)));
    }

    #[test]
    fn test_empty_inventory_blocks_throw() {
        let data = booted();
        let bridge = ThrowBridge::new(data.config.clone());
        let rock = data.database.skills.get(SkillId::new(2)).unwrap();
        let party = Party(HashMap::from([(SourceRef::item(2), 0)]));

        assert!(!bridge.can_pay_skill_cost(rock, &party, || true));
    }

    #[test]
    fn test_throw_consumes_exactly_one() {
        let data = booted();
        let bridge = ThrowBridge::new(data.config.clone());
        let rock = data.database.skills.get(SkillId::new(2)).unwrap();
        let mut party = Party(HashMap::from([
            (SourceRef::item(1), 3),
            (SourceRef::item(2), 5),
            (SourceRef::armor(1), 1),
        ]));

        assert!(bridge.can_pay_skill_cost(rock, &party, || true));
        bridge.pay_skill_cost(rock, &mut party, || {});

        assert_eq!(party.num_items(SourceRef::item(2)), 4);
        assert_eq!(party.num_items(SourceRef::item(1)), 3);
        assert_eq!(party.num_items(SourceRef::armor(1)), 1);
    }

    #[test]
    fn test_class_learns_throw_skills() {
        let data = booted();
        let hero = data.database.classes[1].as_ref().unwrap();

        let learned: Vec<u32> = hero.learnings.iter().map(|l| l.skill_id).collect();
        assert_eq!(learned, vec![2, 3]);
        assert!(hero.learnings.iter().all(|l| l.level == 1));
    }
}
