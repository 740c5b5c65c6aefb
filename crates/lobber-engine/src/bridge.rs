//! Runtime bridge between throw skills and the host
//!
//! The host keeps its own cost, payment, list-filter and cost-display
//! routines. Each intercept here takes the host's routine as a closure and
//! augments it for throw skills: the origin record must be in the party
//! inventory, paying consumes one, and the list shows the count instead of
//! an MP/TP cost.

use lobber_core::{Database, Skill, SourceRef, ThrowConfig};

/// Host skill-type menu symbol for skill categories
pub const SKILL_SYMBOL: &str = "skill";

/// How a skill is treated by the runtime intercepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityVariant {
    /// Any skill outside the throw category; host behavior is untouched
    Ordinary,
    /// A throw skill, consuming its origin record
    Throw { origin: Option<SourceRef> },
}

impl AbilityVariant {
    /// Whether the party holds at least one origin record
    ///
    /// Ordinary skills are always in stock; a throw skill without an origin
    /// never is.
    pub fn in_stock(&self, party: &impl PartyInventory) -> bool {
        match self {
            AbilityVariant::Ordinary => true,
            AbilityVariant::Throw { origin: Some(origin) } => party.has_item(*origin),
            AbilityVariant::Throw { origin: None } => false,
        }
    }

    /// Origin count held by the party (0 for ordinary skills)
    pub fn stock(&self, party: &impl PartyInventory) -> u32 {
        match self {
            AbilityVariant::Throw { origin: Some(origin) } => party.num_items(*origin),
            _ => 0,
        }
    }
}

/// The acting party's inventory
pub trait PartyInventory {
    /// Quantity held of a record
    fn num_items(&self, item: SourceRef) -> u32;

    /// Whether at least one of a record is held
    fn has_item(&self, item: SourceRef) -> bool {
        self.num_items(item) > 0
    }

    /// Remove a quantity of a record
    fn lose_item(&mut self, item: SourceRef, amount: u32);
}

/// Text alignment for [`CostWindow::draw_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Drawing surface of the host's skill list window
pub trait CostWindow {
    fn set_font_size(&mut self, size: u32);

    /// Width of a string in the current font
    fn text_width(&self, text: &str) -> i32;

    fn draw_text(&mut self, text: &str, x: i32, y: i32, width: i32, align: Align);

    fn reset_font_settings(&mut self);
}

/// One entry of the skill-type command menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTypeCommand {
    pub name: String,
    pub symbol: &'static str,
    pub enabled: bool,
    /// Skill type id
    pub ext: i64,
}

/// Runtime intercepts for throw skills
#[derive(Debug, Clone, Default)]
pub struct ThrowBridge {
    config: ThrowConfig,
}

impl ThrowBridge {
    /// Create a bridge with the given configuration
    pub fn new(config: ThrowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThrowConfig {
        &self.config
    }

    /// Classify a skill by its category
    pub fn classify(&self, skill: &Skill) -> AbilityVariant {
        match skill.stype_id() {
            Some(stype) if self.config.is_throw_type(stype) => AbilityVariant::Throw {
                origin: skill.origin,
            },
            _ => AbilityVariant::Ordinary,
        }
    }

    /// Affordability check
    ///
    /// A throw skill additionally needs its origin in stock. The host check
    /// always runs.
    pub fn can_pay_skill_cost(
        &self,
        skill: &Skill,
        party: &impl PartyInventory,
        host_can_pay: impl FnOnce() -> bool,
    ) -> bool {
        let base = host_can_pay();
        base && self.classify(skill).in_stock(party)
    }

    /// Cost payment
    ///
    /// The host payment runs first; a throw skill then consumes one origin record.
    pub fn pay_skill_cost(
        &self,
        skill: &Skill,
        party: &mut impl PartyInventory,
        host_pay: impl FnOnce(),
    ) {
        host_pay();
        if let AbilityVariant::Throw {
            origin: Some(origin),
        } = self.classify(skill)
        {
            party.lose_item(origin, 1);
        }
    }

    /// Skill list filter
    ///
    /// Throw skills are hidden while their origin is out of stock.
    pub fn includes(
        &self,
        skill: &Skill,
        party: &impl PartyInventory,
        host_includes: impl FnOnce() -> bool,
    ) -> bool {
        let base = host_includes();
        base && self.classify(skill).in_stock(party)
    }

    /// Cost column of the skill list
    ///
    /// Throw skills show the origin count, right-aligned and preceded by a
    /// colon; every other skill is drawn by the host.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_skill_cost<W: CostWindow>(
        &self,
        skill: &Skill,
        party: &impl PartyInventory,
        window: &mut W,
        x: i32,
        y: i32,
        width: i32,
        host_draw: impl FnOnce(&mut W),
    ) {
        let variant = self.classify(skill);
        if variant == AbilityVariant::Ordinary {
            host_draw(window);
            return;
        }

        window.set_font_size(self.config.item_count_font_size);
        let colon_width = width - window.text_width("00");
        window.draw_text(":", x, y, colon_width, Align::Right);
        window.draw_text(&variant.stock(party).to_string(), x, y, width, Align::Right);
        window.reset_font_settings();
    }

    /// Skill-type command menu for an actor
    ///
    /// `added_types` are the actor's skill types (`None` when no actor is
    /// selected); names come from the database's skill type table.
    pub fn skill_type_commands(
        &self,
        added_types: Option<&[i64]>,
        db: &Database,
    ) -> Vec<SkillTypeCommand> {
        let Some(added_types) = added_types else {
            return Vec::new();
        };

        let mut types = added_types.to_vec();
        types.sort_unstable();

        types
            .into_iter()
            .map(|stype| {
                let name = db.skill_type_name(stype).unwrap_or_default().to_string();
                let enabled = !(self.config.disable_throw_menu && self.config.is_throw_type(stype));
                SkillTypeCommand {
                    name,
                    symbol: SKILL_SYMBOL,
                    enabled,
                    ext: stype,
                }
            })
            .collect()
    }
}
