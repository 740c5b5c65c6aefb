//! One-time catalog extension
//!
//! Runs once per process, the first time the host reports its database as
//! loaded. Every throwable item, armour and weapon (in that order) gets a
//! synthesized skill appended to the skill catalog and granted to every
//! class at level 1. Once all skills exist, each new skill's customization
//! block runs.

use crate::synth::Synthesizer;
use lobber_core::{
    grant_to_classes, AbilityTemplate, Database, RecordKind, SkillId, SourceRef, ThrowConfig,
};
use lobber_script::{tags, CustomizeOutcome, ScriptRunner};

/// Summary of one extension pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionReport {
    /// Ids of the generated skills, in generation order
    pub generated: Vec<SkillId>,
    /// Skills whose customization block ran to completion
    pub customized: usize,
    /// Skills whose customization block failed
    pub failed: usize,
}

/// Extends the host database with throw skills exactly once
pub struct CatalogExtender {
    synthesizer: Synthesizer,
    runner: ScriptRunner,
    extended: bool,
}

impl CatalogExtender {
    /// Create an extender for a template and configuration
    pub fn new(template: AbilityTemplate, config: ThrowConfig) -> Self {
        let runner = ScriptRunner::new(config.script_max_operations);
        Self {
            synthesizer: Synthesizer::new(template, config),
            runner,
            extended: false,
        }
    }

    /// Whether the extension pass has already run
    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Readiness hook wrapped around the host's own check
    ///
    /// Returns the host's answer. The first time it is `true` the database is
    /// extended before returning; later calls only forward the answer.
    pub fn is_database_loaded(
        &mut self,
        db: &mut Database,
        host_loaded: impl FnOnce() -> bool,
    ) -> bool {
        if !host_loaded() {
            return false;
        }
        self.extend(db);
        true
    }

    /// Run the extension pass unless it already ran
    ///
    /// Returns `None` when the database was already extended.
    pub fn extend(&mut self, db: &mut Database) -> Option<ExtensionReport> {
        if self.extended {
            return None;
        }
        self.extended = true;

        let start = db.skills.next_id();
        let mut report = ExtensionReport::default();

        for kind in RecordKind::EXTENSION_ORDER {
            self.generate(db, kind, &mut report.generated);
        }

        self.customize_from(db, start, &mut report);

        tracing::info!(
            generated = report.generated.len(),
            customized = report.customized,
            failed = report.failed,
            skills = db.skills.len(),
            "throw skills added to the skill catalog"
        );

        Some(report)
    }

    fn generate(&self, db: &mut Database, kind: RecordKind, generated: &mut Vec<SkillId>) {
        let (records, skills, classes) = db.split_for(kind);

        for (index, slot) in records.iter().enumerate() {
            let Some(record) = slot else {
                continue;
            };
            if !tags::is_throwable(record.note()) {
                continue;
            }

            let origin = SourceRef::new(kind, index as u32);
            let skill_id =
                skills.append_with(|id| self.synthesizer.synthesize(record, origin, id));
            let granted = grant_to_classes(classes, skill_id);

            tracing::debug!(
                skill = %skill_id,
                origin = %origin,
                classes = granted,
                "generated throw skill"
            );
            generated.push(skill_id);
        }
    }

    fn customize_from(&self, db: &mut Database, start: SkillId, report: &mut ExtensionReport) {
        let skill_count = db.skills.len();
        let ids: Vec<SkillId> = db.skills.ids_from(start).collect();

        for id in ids {
            let Some(skill) = db.skills.get_mut(id) else {
                continue;
            };
            let script = tags::extract_script(skill.note());
            match self.runner.customize(skill, &script, skill_count) {
                CustomizeOutcome::Skipped => {}
                CustomizeOutcome::Applied => report.customized += 1,
                CustomizeOutcome::Failed(_) => report.failed += 1,
            }
        }
    }
}

impl Default for CatalogExtender {
    fn default() -> Self {
        Self::new(AbilityTemplate::standard(), ThrowConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lobber_core::{ClassDef, Learning, Skill, SourceRecord, Value, ValueMap};

    fn database() -> Database {
        let mut db = Database::new();

        let mut attack = Skill::new(ValueMap::new());
        attack.set("id", 1i64);
        attack.set("name", "Attack");
        db.skills.append_with(|_| attack);

        db.push_record(SourceRecord::new(RecordKind::Item, 1, "Potion").with_field("scope", 7i64));
        db.push_record(
            SourceRecord::new(RecordKind::Item, 2, "Rock")
                .with_note("<Throwable>")
                .with_field("scope", 1i64),
        );
        db.push_record(
            SourceRecord::new(RecordKind::Weapon, 1, "Dagger")
                .with_note("<throwable>")
                .with_field("animationId", 6i64),
        );
        db.push_record(
            SourceRecord::new(RecordKind::Armor, 1, "Buckler").with_note("<Throwable>"),
        );

        db.push_class(ClassDef::new(1, "Hero"));
        db.push_class(ClassDef::new(2, "Mage"));
        db
    }

    #[test]
    fn test_extension_order_and_ids() {
        let mut db = database();
        let mut extender = CatalogExtender::default();

        let report = extender.extend(&mut db).unwrap();

        assert_eq!(
            report.generated,
            vec![SkillId::new(2), SkillId::new(3), SkillId::new(4)]
        );
        let names: Vec<_> = report
            .generated
            .iter()
            .filter_map(|id| db.skills.get(*id).and_then(Skill::name))
            .collect();
        assert_eq!(names, vec!["Rock", "Buckler", "Dagger"]);

        for (id, skill) in db.skills.iter() {
            assert_eq!(skill.id(), Some(id));
        }
        let dagger = db.skills.get(SkillId::new(4)).unwrap();
        assert_eq!(dagger.origin, Some(SourceRef::weapon(1)));
    }

    #[test]
    fn test_every_class_learns_each_skill_once() {
        let mut db = database();
        let mut extender = CatalogExtender::default();
        let report = extender.extend(&mut db).unwrap();

        for class in db.classes.iter().flatten() {
            for id in &report.generated {
                let learned: Vec<_> = class.learnings_for(*id).collect();
                assert_eq!(learned, vec![&Learning::at_level_one(*id)]);
            }
        }
    }

    #[test]
    fn test_extension_runs_once() {
        let mut db = database();
        let mut extender = CatalogExtender::default();

        assert!(extender.is_database_loaded(&mut db, || true));
        let len = db.skills.len();
        assert!(extender.is_database_loaded(&mut db, || true));
        assert!(extender.extend(&mut db).is_none());

        assert_eq!(db.skills.len(), len);
        assert_eq!(db.classes[1].as_ref().unwrap().learnings.len(), 3);
    }

    #[test]
    fn test_not_loaded_defers_extension() {
        let mut db = database();
        let mut extender = CatalogExtender::default();

        assert!(!extender.is_database_loaded(&mut db, || false));
        assert!(!extender.is_extended());
        assert_eq!(db.skills.len(), 2);

        assert!(extender.is_database_loaded(&mut db, || true));
        assert!(extender.is_extended());
        assert_eq!(db.skills.len(), 5);
    }

    #[test]
    fn test_no_throwable_records() {
        let mut db = Database::new();
        db.push_record(SourceRecord::new(RecordKind::Item, 1, "Potion"));
        db.push_record(SourceRecord::new(RecordKind::Weapon, 1, "Sword").with_note("</Throwable>"));
        db.push_class(ClassDef::new(1, "Hero"));

        let mut extender = CatalogExtender::default();
        let report = extender.extend(&mut db).unwrap();

        assert!(report.generated.is_empty());
        assert_eq!(db.skills.len(), 1);
        assert!(db.classes[1].as_ref().unwrap().learnings.is_empty());
    }

    #[test]
    fn test_empty_slots_are_skipped() {
        let mut db = Database::new();
        db.items.push(None);
        db.push_record(SourceRecord::new(RecordKind::Item, 2, "Rock").with_note("<Throwable>"));

        let mut extender = CatalogExtender::default();
        let report = extender.extend(&mut db).unwrap();

        assert_eq!(report.generated, vec![SkillId::new(1)]);
        let rock = db.skills.get(SkillId::new(1)).unwrap();
        assert_eq!(rock.origin, Some(SourceRef::item(2)));
    }

    #[test]
    fn test_customization_blocks_run_after_generation() {
        let mut db = Database::new();
        db.push_record(
            SourceRecord::new(RecordKind::Item, 1, "Bomb")
                .with_note("<Throwable>\n<Throwable Eval>\nskill.animationId = 5;\nskill.tpGain = skill_count;\n</Throwable Eval>"),
        );
        db.push_record(SourceRecord::new(RecordKind::Item, 2, "Rock").with_note("<Throwable>"));
        db.push_record(
            SourceRecord::new(RecordKind::Armor, 1, "Shield")
                .with_note("<Throwable Eval>\nskill.animationId = 3;\nundefined_call();\n</Throwable Eval>"),
        );

        let mut extender = CatalogExtender::default();
        let report = extender.extend(&mut db).unwrap();

        assert_eq!(report.generated.len(), 3);
        assert_eq!(report.customized, 1);
        assert_eq!(report.failed, 1);

        let bomb = db.skills.get(SkillId::new(1)).unwrap();
        assert_eq!(bomb.get("animationId"), Some(&Value::Int(5)));
        // Every throw skill already exists when scripts run
        assert_eq!(bomb.get("tpGain"), Some(&Value::Int(4)));

        let rock = db.skills.get(SkillId::new(2)).unwrap();
        assert_eq!(rock.get("animationId"), Some(&Value::Int(0)));

        let shield = db.skills.get(SkillId::new(3)).unwrap();
        assert_eq!(shield.get("animationId"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_hand_authored_skills_untouched() {
        let mut db = database();
        let before = db.skills.get(SkillId::new(1)).cloned();

        let mut extender = CatalogExtender::default();
        extender.extend(&mut db);

        assert_eq!(db.skills.get(SkillId::new(1)).cloned(), before);
    }
}
