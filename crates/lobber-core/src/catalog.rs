//! The host database and its skill catalog

use crate::{ClassDef, Learning, RecordKind, Skill, SkillId, SourceRecord, SourceRef};
use serde::{Deserialize, Serialize};

/// The global skill catalog
///
/// Slots are positional: a skill's id is its index. Slot 0 is the host's
/// empty slot, so a fresh catalog already has length 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCatalog {
    slots: Vec<Option<Skill>>,
}

impl SkillCatalog {
    /// Create a catalog holding only the empty slot 0
    pub fn new() -> Self {
        Self { slots: vec![None] }
    }

    /// Create a catalog from loaded slots
    pub fn from_slots(slots: Vec<Option<Skill>>) -> Self {
        Self { slots }
    }

    /// The id the next appended skill will receive
    pub fn next_id(&self) -> SkillId {
        SkillId::new(self.slots.len() as u32)
    }

    /// Append a skill built for the next id
    ///
    /// The builder receives the id the skill must carry; nothing else can be
    /// inserted between choosing the id and storing the skill.
    pub fn append_with(&mut self, build: impl FnOnce(SkillId) -> Skill) -> SkillId {
        let id = self.next_id();
        let skill = build(id);
        debug_assert_eq!(skill.id(), Some(id), "skill id must equal its slot");
        self.slots.push(Some(skill));
        id
    }

    /// Get a skill by ID
    pub fn get(&self, id: SkillId) -> Option<&Skill> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Get a mutable reference to a skill
    pub fn get_mut(&mut self, id: SkillId) -> Option<&mut Skill> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Number of slots, including empty ones
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the catalog has no slots at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate all present skills with their ids
    pub fn iter(&self) -> impl Iterator<Item = (SkillId, &Skill)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|s| (SkillId::new(i as u32), s)))
    }

    /// Ids of the slots from `start` to the end, in order
    pub fn ids_from(&self, start: SkillId) -> impl Iterator<Item = SkillId> {
        (start.raw()..self.slots.len() as u32).map(SkillId::new)
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// The host's static database
///
/// Every catalog is positional with an empty slot 0, like the host's data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub items: Vec<Option<SourceRecord>>,
    pub weapons: Vec<Option<SourceRecord>>,
    pub armors: Vec<Option<SourceRecord>>,
    pub skills: SkillCatalog,
    pub classes: Vec<Option<ClassDef>>,
    /// Skill type names by id
    pub skill_types: Vec<String>,
}

impl Database {
    /// Create an empty database
    pub fn new() -> Self {
        Self {
            items: vec![None],
            weapons: vec![None],
            armors: vec![None],
            skills: SkillCatalog::new(),
            classes: vec![None],
            skill_types: vec![String::new()],
        }
    }

    /// Get the source catalog for a record kind
    pub fn catalog(&self, kind: RecordKind) -> &[Option<SourceRecord>] {
        match kind {
            RecordKind::Item => &self.items,
            RecordKind::Weapon => &self.weapons,
            RecordKind::Armor => &self.armors,
        }
    }

    fn catalog_mut(&mut self, kind: RecordKind) -> &mut Vec<Option<SourceRecord>> {
        match kind {
            RecordKind::Item => &mut self.items,
            RecordKind::Weapon => &mut self.weapons,
            RecordKind::Armor => &mut self.armors,
        }
    }

    /// Add a source record at the end of its catalog
    pub fn push_record(&mut self, record: SourceRecord) {
        self.catalog_mut(record.kind).push(Some(record));
    }

    /// Add a class at the end of the class catalog
    pub fn push_class(&mut self, class: ClassDef) {
        self.classes.push(Some(class));
    }

    /// Resolve an origin reference
    pub fn source(&self, source: SourceRef) -> Option<&SourceRecord> {
        self.catalog(source.kind)
            .get(source.id as usize)
            .and_then(Option::as_ref)
    }

    /// Borrow one source catalog alongside the skill and class catalogs
    ///
    /// Lets a pass read source records while appending skills and learnings.
    pub fn split_for(
        &mut self,
        kind: RecordKind,
    ) -> (&[Option<SourceRecord>], &mut SkillCatalog, &mut [Option<ClassDef>]) {
        let records = match kind {
            RecordKind::Item => &self.items,
            RecordKind::Weapon => &self.weapons,
            RecordKind::Armor => &self.armors,
        };
        (records, &mut self.skills, &mut self.classes)
    }

    /// Name of a skill type
    pub fn skill_type_name(&self, stype_id: i64) -> Option<&str> {
        usize::try_from(stype_id)
            .ok()
            .and_then(|i| self.skill_types.get(i))
            .map(String::as_str)
    }
}

/// Give a skill to every class at level 1, in class order
///
/// Returns the number of classes that received it.
pub fn grant_to_classes(classes: &mut [Option<ClassDef>], skill_id: SkillId) -> usize {
    let mut granted = 0;
    for class in classes.iter_mut().flatten() {
        class.learnings.push(Learning::at_level_one(skill_id));
        granted += 1;
    }
    granted
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
