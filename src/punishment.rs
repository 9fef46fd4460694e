//! Forced-work overlay. Shown after a lost minigame, or when the player
//! voluntarily answers a Teams ping / joins a Zoom call.

use crate::stage::Stage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PunishmentKind {
    Teams,
    Zoom,
    Jira,
    Email,
}

/// One chat line of the Teams punishment: (author, text, from_player).
pub const TEAMS_CHAT: &[(&str, &str, bool)] = &[
    ("Sarah", "Prod DB connections are high.", false),
    ("You", "Do we need to scale?", true),
    ("Michael", "API looks slow too.", false),
    ("You", "Checking the dashboards now.", true),
    ("Sarah", "Found a connection leak. Rolling back.", false),
];

pub const ZOOM_TILES: &[&str] = &["Dev", "PM", "QA", "HR", "CEO", "CTO", "VP", "Mgr", "Lead", "Jr"];
pub const ZOOM_TILE_COUNT: usize = 20;

/// Sprint board columns: (heading, cards).
pub const JIRA_COLUMNS: &[(&str, &[&str])] = &[
    ("TO DO", &["Fix mobile layout", "Update docs", "Add dark mode"]),
    ("IN PROGRESS", &["Refactor API", "Auth flow"]),
    ("DONE", &["Update README"]),
];

pub const EMAIL_LINES: &[&str] = &[
    "Inbox (99+ unread)",
    "Subject: \"Quick question\"",
    "Subject: \"gentle reminder #4\"",
    "Subject: \"RE: RE: RE: action needed\"",
    "Attachment: final_v2_REAL_final.pptx",
    "CC: entire company",
    "Sent from my iPhone",
];

impl PunishmentKind {
    /// Theme for the minigame stage the punishment belongs to.
    pub fn for_game(game: Stage) -> Self {
        match game {
            Stage::Pingpong => PunishmentKind::Teams,
            Stage::Wordle => PunishmentKind::Zoom,
            Stage::Tetris => PunishmentKind::Jira,
            Stage::Pacman => PunishmentKind::Email,
            _ => PunishmentKind::Zoom,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PunishmentKind::Teams => "Microsoft Teams - Sprint Chat",
            PunishmentKind::Zoom => "Zoom - All Hands Meeting",
            PunishmentKind::Jira => "Jira - Sprint Board",
            PunishmentKind::Email => "Email - Inbox Overflow",
        }
    }

    pub fn footer(self) -> &'static str {
        match self {
            PunishmentKind::Teams => "typing...",
            PunishmentKind::Zoom => "\"Can everyone see my screen?\" — Someone, always",
            PunishmentKind::Jira => "Sprint ends in 3 minutes...",
            PunishmentKind::Email => "",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Punishment {
    pub kind: PunishmentKind,
    pub game: Stage,
    pub next: Stage,
    /// False when the player chose to work (reply / join); the copy is softer.
    pub punitive: bool,
    started_ms: f64,
    duration_s: u32,
}

impl Punishment {
    pub fn new(game: Stage, next: Stage, punitive: bool, now: f64, duration_s: u32) -> Self {
        Self {
            kind: PunishmentKind::for_game(game),
            game,
            next,
            punitive,
            started_ms: now,
            duration_s: duration_s.max(1),
        }
    }

    fn elapsed_s(&self, now: f64) -> f64 {
        ((now - self.started_ms) / 1000.0).max(0.0)
    }

    /// Whole seconds still to endure (counts down from the duration to 1).
    pub fn seconds_left(&self, now: f64) -> u32 {
        let whole = self.elapsed_s(now).floor() as u32;
        self.duration_s.saturating_sub(whole)
    }

    /// Fill of the progress bar, advancing in whole-second steps.
    pub fn progress(&self, now: f64) -> f64 {
        let left = self.seconds_left(now) as f64;
        let total = self.duration_s as f64;
        ((total - left) / total).clamp(0.0, 1.0)
    }

    pub fn finished(&self, now: f64) -> bool {
        self.seconds_left(now) == 0
    }

    pub fn heading(&self, now: f64) -> String {
        let n = self.seconds_left(now);
        if self.punitive {
            format!("⚠️ PUNISHMENT: You must endure {n}s of work!")
        } else {
            format!("You chose work. Enjoy {n}s of it.")
        }
    }
}
