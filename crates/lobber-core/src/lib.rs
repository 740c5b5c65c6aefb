//! Lobber Core - data model for throwable items
//!
//! This crate provides the types the throw system reads and writes:
//! - Dynamic value types (`Value`, `ValueMap`) for host records
//! - Source records (items, weapons, armour) and origin references
//! - Skills, classes and their learnings
//! - The ability template that shapes generated skills
//! - The host database with its append-only skill catalog
//! - Configuration and the throw scope remap

mod catalog;
mod config;
mod error;
mod identity;
mod record;
pub mod scope;
mod template;
mod value;

pub use catalog::{grant_to_classes, Database, SkillCatalog};
pub use config::{
    ThrowConfig, PARAM_DISABLE_THROW_MENU, PARAM_ITEM_COUNT_FONT_SIZE, PARAM_THROW_MESSAGE,
    PARAM_THROW_SKILL_TYPE_ID,
};
pub use error::{Error, Result};
pub use identity::{RecordKind, SkillId, SourceRef};
pub use record::{ClassDef, Learning, Skill, SourceRecord};
pub use template::AbilityTemplate;
pub use value::{Value, ValueMap};
