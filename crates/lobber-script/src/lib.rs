//! Lobber Script - note tags, customization scripts and data loading
//!
//! - `tags`: finds the `<Throwable>` marker and the `<Throwable Eval>` block
//! - `customize`: runs a block against a generated skill in a Rhai engine
//! - `loader`: reads the host's JSON data files and the RON settings

pub mod customize;
mod error;
mod loader;
pub mod tags;

pub use customize::{CustomizeOutcome, ScriptRunner};
pub use error::{Error, Result};
pub use loader::{GameData, Loader};
pub use tags::TagScan;
