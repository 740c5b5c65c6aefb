//! Throw system configuration
//!
//! Settings can come from a RON file or from the host's plugin parameter
//! table, where every value arrives as a string.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Plugin parameter keys as they appear in the host's parameter table
pub const PARAM_THROW_SKILL_TYPE_ID: &str = "Throw Skill Type ID";
pub const PARAM_ITEM_COUNT_FONT_SIZE: &str = "Item Count Font Size";
pub const PARAM_DISABLE_THROW_MENU: &str = "Disable Throw Menu";
pub const PARAM_THROW_MESSAGE: &str = "Throw Message";

/// Configuration for throw skill generation and display
///
/// # Example
///
/// ```
/// use lobber_core::ThrowConfig;
///
/// let config = ThrowConfig::default();
/// assert_eq!(config.throw_skill_type_id, 1);
/// assert_eq!(config.format_message("Rock"), "throws a Rock!");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowConfig {
    /// Skill type id that marks a skill as a throw skill (min 1)
    pub throw_skill_type_id: i64,
    /// Font size used for the item count in the skill list (min 1)
    pub item_count_font_size: u32,
    /// Grey out the throw category in the out-of-battle skill type menu
    pub disable_throw_menu: bool,
    /// Battle log message; `%1` is replaced by the thrown record's name
    pub throw_message: String,
    /// Operation budget for customization scripts, 0 for unlimited
    pub script_max_operations: u64,
}

impl ThrowConfig {
    /// Parse a configuration from RON; missing fields keep their defaults
    pub fn from_ron(content: &str) -> Result<Self> {
        let config: ThrowConfig = ron::from_str(content)?;
        Ok(config.clamped())
    }

    /// Read the host's string-typed plugin parameters
    ///
    /// Absent keys keep their defaults. Numbers below the minimum are
    /// clamped up to it.
    pub fn from_plugin_parameters(params: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = params.get(PARAM_THROW_SKILL_TYPE_ID) {
            config.throw_skill_type_id = parse_param(PARAM_THROW_SKILL_TYPE_ID, raw)?;
        }
        if let Some(raw) = params.get(PARAM_ITEM_COUNT_FONT_SIZE) {
            let size: i64 = parse_param(PARAM_ITEM_COUNT_FONT_SIZE, raw)?;
            config.item_count_font_size = u32::try_from(size.max(1)).unwrap_or(u32::MAX);
        }
        if let Some(raw) = params.get(PARAM_DISABLE_THROW_MENU) {
            config.disable_throw_menu = parse_param(PARAM_DISABLE_THROW_MENU, raw)?;
        }
        if let Some(raw) = params.get(PARAM_THROW_MESSAGE) {
            config.throw_message = raw.clone();
        }

        Ok(config.clamped())
    }

    /// Substitute a record name into the throw message
    pub fn format_message(&self, name: &str) -> String {
        self.throw_message.replace("%1", name)
    }

    /// Check whether a skill type id is the throw category
    pub fn is_throw_type(&self, stype_id: i64) -> bool {
        stype_id == self.throw_skill_type_id
    }

    fn clamped(mut self) -> Self {
        self.throw_skill_type_id = self.throw_skill_type_id.max(1);
        self.item_count_font_size = self.item_count_font_size.max(1);
        self
    }
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            throw_skill_type_id: 1,
            item_count_font_size: 28,
            disable_throw_menu: false,
            throw_message: "throws a %1!".to_string(),
            script_max_operations: 0,
        }
    }
}

fn parse_param<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::InvalidParameter {
        name: name.to_string(),
        value: raw.to_string(),
    })
}
