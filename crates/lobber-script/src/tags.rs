//! Note tag scanner
//!
//! Recognizes the opt-in marker and pulls the customization block out of a
//! record's note:
//!
//! ```text
//! <Throwable>
//! <Throwable Eval>
//!   skill.animationId = 5;
//! </Throwable Eval>
//! ```
//!
//! Tags are case-insensitive and tolerate whitespace around the tag name.

use regex::Regex;
use std::sync::OnceLock;

fn throwable_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<\s*Throwable(?:\s*Eval)?\s*>").expect("marker regex is valid")
    })
}

fn eval_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<\s*Throwable\s*Eval\s*>").expect("block start regex is valid")
    })
}

fn eval_stop() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<\s*/\s*Throwable\s*Eval\s*>").expect("block stop regex is valid")
    })
}

/// Result of scanning a note
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagScan {
    /// The note opts in to a throw skill
    pub throwable: bool,
    /// Raw customization script, empty when there is no block
    pub script: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ReadMode {
    Normal,
    Eval,
}

/// Scan a note for both the marker and the customization block
pub fn scan(note: &str) -> TagScan {
    TagScan {
        throwable: is_throwable(note),
        script: extract_script(note),
    }
}

/// Check whether a note carries `<Throwable>` or `<Throwable Eval>` anywhere
pub fn is_throwable(note: &str) -> bool {
    throwable_marker().is_match(note)
}

/// Collect the lines between `<Throwable Eval>` and `</Throwable Eval>`
///
/// Each collected line is terminated with `\n`. Blocks do not nest; a block
/// that is never closed runs to the end of the note. Blank lines are
/// dropped since line breaks are split as runs.
pub fn extract_script(note: &str) -> String {
    let mut mode = ReadMode::Normal;
    let mut script = String::new();

    for line in note.split(['\r', '\n']).filter(|l| !l.is_empty()) {
        if eval_start().is_match(line) {
            mode = ReadMode::Eval;
        } else if eval_stop().is_match(line) {
            mode = ReadMode::Normal;
        } else if mode == ReadMode::Eval {
            script.push_str(line);
            script.push('\n');
        }
    }

    script
}
