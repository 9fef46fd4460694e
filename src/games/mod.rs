//! Minigames hosted inside desktop windows. Each game is a plain state
//! machine fed with key names (as reported by `KeyboardEvent.key`) and elapsed
//! time; drawing lives in `desktop::canvas`.

use rand::rngs::SmallRng;

use crate::config::GameConfig;
use crate::stage::MinigameKind;

pub mod pacman;
pub mod pong;
pub mod tetris;
pub mod wordle;

pub use pacman::PacmanGame;
pub use pong::PongGame;
pub use tetris::TetrisGame;
pub use wordle::WordleGame;

/// How a minigame ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Player escaped work (won pong, cleared the inbox, survived the backlog).
    Won,
    /// Player ended up working.
    Lost,
    /// Wordle solved after `guesses` attempts.
    Decoded { guesses: u8 },
}

pub trait Minigame {
    fn key_down(&mut self, key: &str);
    fn key_up(&mut self, _key: &str) {}
    /// Advance by `dt_ms`; returns the outcome once, on the step the game ends.
    fn advance(&mut self, dt_ms: f64, rng: &mut SmallRng) -> Option<Outcome>;
}

/// Converts wall-clock deltas into whole fixed frames (60 Hz).
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    carry_ms: f64,
}

pub const FRAME_MS: f64 = 1000.0 / 60.0;
/// Upper bound on frames simulated per call, so a backgrounded tab does not
/// fast-forward a whole game when it regains focus.
const MAX_FRAMES_PER_ADVANCE: u32 = 8;

impl FrameClock {
    pub fn frames(&mut self, dt_ms: f64) -> u32 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.carry_ms += dt_ms;
        let n = (self.carry_ms / FRAME_MS).floor();
        self.carry_ms -= n * FRAME_MS;
        (n as u32).min(MAX_FRAMES_PER_ADVANCE)
    }
}

/// Currently mounted minigame.
pub enum ActiveGame {
    Pong(PongGame),
    Wordle(WordleGame),
    Pacman(PacmanGame),
    Tetris(TetrisGame),
}

impl ActiveGame {
    pub fn new(kind: MinigameKind, cfg: &GameConfig, dictionary: &[String], rng: &mut SmallRng) -> Self {
        match kind {
            MinigameKind::Pong => ActiveGame::Pong(PongGame::new(cfg.pong_target_score)),
            MinigameKind::Wordle => ActiveGame::Wordle(WordleGame::new(rng, dictionary)),
            MinigameKind::Pacman => ActiveGame::Pacman(PacmanGame::new(rng)),
            MinigameKind::Tetris => {
                ActiveGame::Tetris(TetrisGame::new(rng, cfg.tetris_survive_seconds))
            }
        }
    }

    pub fn kind(&self) -> MinigameKind {
        match self {
            ActiveGame::Pong(_) => MinigameKind::Pong,
            ActiveGame::Wordle(_) => MinigameKind::Wordle,
            ActiveGame::Pacman(_) => MinigameKind::Pacman,
            ActiveGame::Tetris(_) => MinigameKind::Tetris,
        }
    }

    pub fn as_minigame(&mut self) -> &mut dyn Minigame {
        match self {
            ActiveGame::Pong(g) => g,
            ActiveGame::Wordle(g) => g,
            ActiveGame::Pacman(g) => g,
            ActiveGame::Tetris(g) => g,
        }
    }
}
