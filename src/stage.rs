//! Named stages of the office day. The active stage decides which overlay the
//! desktop shows.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Intro,
    Procrastination,
    Teams,
    BossTeams,
    PongHowto,
    Pingpong,
    PongDone,
    Zoom,
    BossZoom,
    WordleHowto,
    Wordle,
    WordleDone,
    BossEmail,
    PacmanHowto,
    Pacman,
    PacmanDone,
    Outlook,
    Jira,
    TetrisHowto,
    Tetris,
    TetrisDone,
    Punishment,
    Fired,
    Promoted,
}

/// The four minigames hosted on the desktop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MinigameKind {
    Pong,
    Wordle,
    Pacman,
    Tetris,
}

/// Static content of a "How to Play" window.
#[derive(Clone, Copy, Debug)]
pub struct HowTo {
    pub window_title: &'static str,
    pub game_title: &'static str,
    pub width: u32,
    pub instructions: &'static [&'static str],
}

const PONG_HOWTO: HowTo = HowTo {
    window_title: "Work Avoidance.exe",
    game_title: "Pong",
    width: 400,
    instructions: &[
        "Use W/S or ↑/↓ to move your paddle (left side)",
        "Score 3 points to win and earn demerit!",
        "Losing means you did work... punishment awaits.",
    ],
};

const WORDLE_HOWTO: HowTo = HowTo {
    window_title: "Corporate Jargon Decoder",
    game_title: "Wordle",
    width: 340,
    instructions: &[
        "Guess the 5-letter corporate buzzword in 6 tries",
        "Green = correct letter & position",
        "Yellow = correct letter, wrong position",
        "Getting it in ≤3 tries = slacking (good!)",
    ],
};

const PACMAN_HOWTO: HowTo = HowTo {
    window_title: "Email Client - Inbox (10)",
    game_title: "Email Pacman",
    width: 340,
    instructions: &[
        "Eat all 📧 emails while avoiding coworkers",
        "Arrow keys or WASD to move",
        "Ghosts are PM, HR, and CEO - avoid them!",
        "Clear all emails = slacking success!",
    ],
};

const TETRIS_HOWTO: HowTo = HowTo {
    window_title: "Jira Backlog Refinement",
    game_title: "Backlog Tetris",
    width: 470,
    instructions: &[
        "Survive for 15 seconds!",
        "Arrow keys: ←→ move, ↑ rotate, ↓ drop",
        "Surviving = you're actively avoiding work = moving toward FIRED",
        "If you let the tasks pile up... You will be forced to do the work and get some points...",
    ],
};

const ALL: [Stage; 24] = [
    Stage::Intro,
    Stage::Procrastination,
    Stage::Teams,
    Stage::BossTeams,
    Stage::PongHowto,
    Stage::Pingpong,
    Stage::PongDone,
    Stage::Zoom,
    Stage::BossZoom,
    Stage::WordleHowto,
    Stage::Wordle,
    Stage::WordleDone,
    Stage::BossEmail,
    Stage::PacmanHowto,
    Stage::Pacman,
    Stage::PacmanDone,
    Stage::Outlook,
    Stage::Jira,
    Stage::TetrisHowto,
    Stage::Tetris,
    Stage::TetrisDone,
    Stage::Punishment,
    Stage::Fired,
    Stage::Promoted,
];

impl Stage {
    pub fn all() -> &'static [Stage] {
        &ALL
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Intro => "intro",
            Stage::Procrastination => "procrastination",
            Stage::Teams => "teams",
            Stage::BossTeams => "boss-teams",
            Stage::PongHowto => "pong-howto",
            Stage::Pingpong => "pingpong",
            Stage::PongDone => "pong-done",
            Stage::Zoom => "zoom",
            Stage::BossZoom => "boss-zoom",
            Stage::WordleHowto => "wordle-howto",
            Stage::Wordle => "wordle",
            Stage::WordleDone => "wordle-done",
            Stage::BossEmail => "boss-email",
            Stage::PacmanHowto => "pacman-howto",
            Stage::Pacman => "pacman",
            Stage::PacmanDone => "pacman-done",
            Stage::Outlook => "outlook",
            Stage::Jira => "jira",
            Stage::TetrisHowto => "tetris-howto",
            Stage::Tetris => "tetris",
            Stage::TetrisDone => "tetris-done",
            Stage::Punishment => "punishment",
            Stage::Fired => "fired",
            Stage::Promoted => "promoted",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Fired | Stage::Promoted)
    }

    pub fn is_howto(self) -> bool {
        matches!(
            self,
            Stage::PongHowto | Stage::WordleHowto | Stage::PacmanHowto | Stage::TetrisHowto
        )
    }

    /// Minigame actually being played in this stage.
    pub fn minigame(self) -> Option<MinigameKind> {
        match self {
            Stage::Pingpong => Some(MinigameKind::Pong),
            Stage::Wordle => Some(MinigameKind::Wordle),
            Stage::Pacman => Some(MinigameKind::Pacman),
            Stage::Tetris => Some(MinigameKind::Tetris),
            _ => None,
        }
    }

    /// A minigame or its tutorial is on screen; the desktop gets greyed out.
    pub fn is_game_active(self) -> bool {
        self.minigame().is_some() || self.is_howto()
    }

    pub fn howto(self) -> Option<&'static HowTo> {
        match self {
            Stage::PongHowto => Some(&PONG_HOWTO),
            Stage::WordleHowto => Some(&WORDLE_HOWTO),
            Stage::PacmanHowto => Some(&PACMAN_HOWTO),
            Stage::TetrisHowto => Some(&TETRIS_HOWTO),
            _ => None,
        }
    }

    /// Stage reached by pressing "Start!" on a tutorial.
    pub fn play_stage(self) -> Option<Stage> {
        match self {
            Stage::PongHowto => Some(Stage::Pingpong),
            Stage::WordleHowto => Some(Stage::Wordle),
            Stage::PacmanHowto => Some(Stage::Pacman),
            Stage::TetrisHowto => Some(Stage::Tetris),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown stage `{0}`")]
pub struct StageParseError(pub String);

impl FromStr for Stage {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| StageParseError(s.to_string()))
    }
}
