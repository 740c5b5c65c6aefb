//! Identity types for host records and skills

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which host catalog a source record lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// Consumable items
    Item,
    /// Weapons
    Weapon,
    /// Armour
    Armor,
}

impl RecordKind {
    /// Catalog processing order for the extension pass
    pub const EXTENSION_ORDER: [RecordKind; 3] =
        [RecordKind::Item, RecordKind::Armor, RecordKind::Weapon];

    /// Get the kind as a lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Item => "item",
            RecordKind::Weapon => "weapon",
            RecordKind::Armor => "armor",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-owning reference to a record in one of the host's source catalogs
///
/// The record itself stays owned by the host database; this is only the
/// (catalog, index) pair used to look it up or count it in the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    pub kind: RecordKind,
    pub id: u32,
}

impl SourceRef {
    /// Create a new source reference
    pub fn new(kind: RecordKind, id: u32) -> Self {
        Self { kind, id }
    }

    pub fn item(id: u32) -> Self {
        Self::new(RecordKind::Item, id)
    }

    pub fn weapon(id: u32) -> Self {
        Self::new(RecordKind::Weapon, id)
    }

    pub fn armor(id: u32) -> Self {
        Self::new(RecordKind::Armor, id)
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Index of a skill in the global skill catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub u32);

impl SkillId {
    /// Create a new skill ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Position of this skill in the catalog
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill:{}", self.0)
    }
}
