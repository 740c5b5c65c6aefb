//! Throw Report Example
//!
//! Loads a host data folder (or a small built-in sample), runs the boot-time
//! extension and prints the generated throw skills along with how they look
//! in the skill list for a sample party.
//!
//! ```text
//! cargo run -p throw_report -- path/to/data
//! RUST_LOG=debug cargo run -p throw_report
//! ```

use lobber_core::{ClassDef, Database, RecordKind, SourceRecord, SourceRef, Value};
use lobber_engine::{Align, CatalogExtender, CostWindow, PartyInventory, ThrowBridge};
use lobber_script::{GameData, Loader};
use std::collections::HashMap;

/// Inventory holding three of every odd-numbered record and none of the rest
struct SampleParty {
    items: HashMap<SourceRef, u32>,
}

impl SampleParty {
    fn stocked_from(db: &Database) -> Self {
        let mut items = HashMap::new();
        for kind in RecordKind::EXTENSION_ORDER {
            for (index, _) in db.catalog(kind).iter().enumerate().skip(1) {
                let count = if index % 2 == 1 { 3 } else { 0 };
                items.insert(SourceRef::new(kind, index as u32), count);
            }
        }
        Self { items }
    }
}

impl PartyInventory for SampleParty {
    fn num_items(&self, item: SourceRef) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    fn lose_item(&mut self, item: SourceRef, amount: u32) {
        if let Some(count) = self.items.get_mut(&item) {
            *count = count.saturating_sub(amount);
        }
    }
}

/// Renders the cost column into a fixed-width text cell, one char per unit
#[derive(Default)]
struct TextCell {
    cell: Vec<char>,
}

impl CostWindow for TextCell {
    fn set_font_size(&mut self, _size: u32) {}

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32
    }

    fn draw_text(&mut self, text: &str, x: i32, _y: i32, width: i32, align: Align) {
        let len = self.text_width(text);
        let start = match align {
            Align::Left => x,
            Align::Center => x + (width - len) / 2,
            Align::Right => x + width - len,
        };
        for (offset, ch) in text.chars().enumerate() {
            let Ok(pos) = usize::try_from(start + offset as i32) else {
                continue;
            };
            if pos >= self.cell.len() {
                self.cell.resize(pos + 1, ' ');
            }
            self.cell[pos] = ch;
        }
    }

    fn reset_font_settings(&mut self) {}
}

fn sample_data() -> GameData {
    let mut data = GameData::default();
    let db = &mut data.database;

    db.push_record(SourceRecord::new(RecordKind::Item, 1, "Potion").with_field("scope", 7i64));
    db.push_record(
        SourceRecord::new(RecordKind::Item, 2, "Rock")
            .with_note("<Throwable>")
            .with_field("scope", 1i64)
            .with_field("animationId", 1i64),
    );
    db.push_record(
        SourceRecord::new(RecordKind::Item, 3, "Firebomb")
            .with_note(
                "<Throwable>\n<Throwable Eval>\n\
                 skill.damage.formula = \"120 + a.mat\";\n\
                 skill.damage.elementId = 2;\n\
                 skill.scope = 2;\n\
                 </Throwable Eval>",
            )
            .with_field("scope", 1i64),
    );
    db.push_record(
        SourceRecord::new(RecordKind::Weapon, 1, "Throwing Knife")
            .with_note("<Throwable>")
            .with_field("animationId", 6i64),
    );
    db.push_record(
        SourceRecord::new(RecordKind::Armor, 1, "Buckler")
            .with_note("<Throwable Eval>\nskill.animationId = 5;\n</Throwable Eval>"),
    );

    db.push_class(ClassDef::new(1, "Hero"));
    db.push_class(ClassDef::new(2, "Thief"));
    db.skill_types = vec![String::new(), "Throw".to_string(), "Magic".to_string()];
    data
}

fn main() -> lobber_script::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Lobber Throw Report ===\n");

    let mut data = match std::env::args().nth(1) {
        Some(dir) => {
            let mut loader = Loader::new();
            loader.load_directory(&dir)?;
            println!("Loaded data from {}\n", dir);
            loader.finish()
        }
        None => {
            println!("No data folder given, using the built-in sample\n");
            sample_data()
        }
    };

    let mut extender = CatalogExtender::new(data.template.clone(), data.config.clone());
    let start = data.database.skills.next_id();
    extender.is_database_loaded(&mut data.database, || true);

    let bridge = ThrowBridge::new(data.config.clone());
    let party = SampleParty::stocked_from(&data.database);

    println!("Generated throw skills:");
    let ids: Vec<_> = data.database.skills.ids_from(start).collect();
    for id in ids {
        let Some(skill) = data.database.skills.get(id) else {
            continue;
        };
        let origin = skill
            .origin
            .map(|o| o.to_string())
            .unwrap_or_else(|| "-".to_string());
        let formula = skill
            .get("damage")
            .and_then(Value::as_map)
            .and_then(|d| d.get("formula"))
            .map(Value::to_string)
            .unwrap_or_default();

        let mut cell = TextCell::default();
        bridge.draw_skill_cost(skill, &party, &mut cell, 0, 0, 6, |_| {});
        let listed = bridge.includes(skill, &party, || true);

        println!(
            "  {:>3} {:<16} from {:<10} scope {} anim {} formula {:<14} [{}]{}",
            id.raw(),
            skill.name().unwrap_or_default(),
            origin,
            skill.scope().unwrap_or_default(),
            skill.get("animationId").and_then(Value::as_int).unwrap_or_default(),
            formula,
            cell.cell.iter().collect::<String>(),
            if listed { "" } else { " (hidden)" }
        );
        println!("      log: {}", skill.message1().unwrap_or_default());
    }

    println!("\nSkill type menu:");
    let types: Vec<i64> = (1..data.database.skill_types.len() as i64).collect();
    for command in bridge.skill_type_commands(Some(types.as_slice()), &data.database) {
        println!(
            "  {} {}{}",
            command.ext,
            command.name,
            if command.enabled { "" } else { " (disabled)" }
        );
    }

    Ok(())
}
