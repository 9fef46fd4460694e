//! Office Simulator core crate.
//!
//! A parody XP desktop where the player dodges work through four minigames
//! while a boss pushes them back toward productivity. Reaching FIRED wins;
//! PROMOTED is the bad ending. `start_game()` mounts the desktop in the page.
//! Everything outside `desktop` is plain Rust and tested natively.

use wasm_bindgen::prelude::*;

pub mod boss;
pub mod config;
pub mod desktop;
pub mod flow;
pub mod games;
pub mod meter;
pub mod punishment;
pub mod stage;

pub use config::{ConfigError, GameConfig};
pub use flow::{Director, Event, Notice};
pub use stage::Stage;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Word lists for the jargon decoder
// -----------------------------------------------------------------------------

/// Possible answers.
pub const BUZZWORDS: &[&str] = &[
    "SYNCS", "AGILE", "PIVOT", "SCRUM", "EPICS", "SLACK", "STAND", "ALIGN", "SCOPE", "TREND",
];

/// Accepted guesses when the dictionary file is unavailable.
pub const VALID_WORDS: &[&str] = &[
    "SYNCS", "AGILE", "PIVOT", "SCRUM", "EPICS", "FLEET", "RAPID", "SLACK", "STAND", "FOCUS",
    "ALIGN", "SCOPE", "PATCH", "BRICK", "CRANE", "GLOBE", "HOUSE", "LIGHT", "MONEY", "POWER",
    "QUEST", "RAISE", "SMART", "THINK", "ULTRA", "VALVE", "WATER", "YIELD", "BLAST", "CHARM",
    "DRAFT", "EIGHT", "FLAME", "GRAPE", "HASTE", "INPUT", "JUDGE", "KNEEL", "LEAPS", "MANGO",
    "NOBLE", "OCEAN", "PLUMB", "QUITE", "ROUND", "SHARP", "TOWER", "UNITE", "WATCH", "WORLD",
    "BRAIN", "CLOUD", "DAILY", "EXTRA", "FRESH", "GRAIN", "TREND", "TRACK", "TRADE", "TRAIN",
    "TRAIL", "TRIAL", "TWEAK", "SWARM", "SPARK", "SPACE", "SOLVE", "SOLID", "SHIFT", "SHARE",
    "SHAPE", "SERVE",
];

// -----------------------------------------------------------------------------
// Outlook inbox: (from, subject, time)
// -----------------------------------------------------------------------------

pub const UNREAD_EMAILS: &[(&str, &str, &str)] = &[
    ("Michael (VP)", "RE: RE: RE: Q3 Sprint Planning - URGENT", "9:02 AM"),
    ("Sandra (HR)", "Mandatory Fun: Team Building Next Friday", "9:15 AM"),
    ("Dave (ED)", "Quick sync? (will take 2 hrs)", "9:23 AM"),
    ("Karen (SE)", "Budget cuts - please review ASAP", "9:41 AM"),
    ("Brian (VP)", "Why is prod down again???", "10:05 AM"),
    ("Tom (MD)", "Can you stay late tonight?", "10:30 AM"),
    ("Jenny (ED)", "Git blame says this is your fault", "11:18 AM"),
];

pub const READ_EMAILS: &[(&str, &str, &str)] = &[
    ("IT Support", "Your password expires in 1 day", "Yesterday"),
    ("Noreply (HR)", "Updated: Holiday policy 2026 (please read)", "Yesterday"),
    ("Michael (VP)", "RE: Team offsite — venue confirmed", "Mon"),
    ("All Staff", "Reminder: submit timesheets by Friday", "Mon"),
    ("Facilities", "AC on floor 2 is fixed (finally)", "Sun"),
];

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    desktop::start(GameConfig::default())
}

/// Start with a JSON config; missing fields keep their defaults.
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    desktop::start(config)
}
