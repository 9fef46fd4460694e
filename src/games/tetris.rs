//! Backlog Tetris: survive the Jira refinement until the timer runs out.
//! Cleared rows are "reassigned"; a stack reaching the spawn row means the
//! whole backlog is now yours.

use rand::Rng;
use rand::rngs::SmallRng;

use super::{Minigame, Outcome};

pub const COLS: usize = 11;
pub const ROWS: usize = 20;
pub const CELL: f64 = 22.0;
/// Any filled cell in this row lights up the danger overlay.
pub const DANGER_ROW: usize = 7;

const FLASH_MS: f64 = 1300.0;
const BASE_DROP_MS: f64 = 300.0;
const MIN_DROP_MS: f64 = 80.0;
const DROP_SPEEDUP_PER_PIECE: f64 = 25.0;

type Shape = Vec<Vec<u8>>;

fn shapes() -> [Shape; 5] {
    [
        vec![vec![1, 1, 1, 1], vec![1, 1, 1, 1]],
        vec![vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]],
        vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]],
        vec![vec![1, 1, 0], vec![1, 1, 1], vec![1, 1, 1]],
        vec![vec![0, 1, 1], vec![0, 1, 1], vec![1, 1, 1]],
    ]
}

/// Ticket priority; doubles as the block colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    Crit,
    High,
    Med,
    Low,
}

pub const PRIORITIES: [Priority; 4] = [Priority::Crit, Priority::High, Priority::Med, Priority::Low];

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Crit => "CRIT",
            Priority::High => "HIGH",
            Priority::Med => "MED",
            Priority::Low => "LOW",
        }
    }

    /// (fill, highlight, shadow)
    pub fn colors(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Priority::Crit => ("#ff3333", "#ff9999", "#7a0000"),
            Priority::High => ("#fb5607", "#fdb080", "#7d2b03"),
            Priority::Med => ("#ffbe0b", "#ffe580", "#806000"),
            Priority::Low => ("#22c55e", "#86efac", "#14532d"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub shape: Shape,
    pub priority: Priority,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Board cells covered by the piece.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != 0)
                .map(move |(c, _)| (self.x + c as i32, self.y + r as i32))
        })
    }
}

/// Rotate a shape 90° clockwise.
pub fn rotate_cw(shape: &Shape) -> Shape {
    let rows = shape.len();
    let cols = shape.first().map(|r| r.len()).unwrap_or(0);
    (0..cols)
        .map(|c| (0..rows).rev().map(|r| shape[r][c]).collect())
        .collect()
}

pub struct TetrisGame {
    pub grid: Vec<[Option<Priority>; COLS]>,
    pub current: Option<Piece>,
    pieces_placed: u32,
    drop_counter_ms: f64,
    elapsed_ms: f64,
    survive_ms: f64,
    flash: Option<(&'static str, f64)>,
    running: bool,
    pending: Option<Outcome>,
    /// Keys are applied on the next `advance`; a drop may need the rng to spawn.
    queued_keys: Vec<String>,
}

impl TetrisGame {
    pub fn new(rng: &mut SmallRng, survive_seconds: f64) -> Self {
        let mut game = Self::empty(survive_seconds);
        game.spawn(rng);
        game
    }

    pub fn empty(survive_seconds: f64) -> Self {
        Self {
            grid: vec![[None; COLS]; ROWS],
            current: None,
            pieces_placed: 0,
            drop_counter_ms: 0.0,
            elapsed_ms: 0.0,
            survive_ms: survive_seconds * 1000.0,
            flash: None,
            running: true,
            pending: None,
            queued_keys: Vec::new(),
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    /// Whole seconds left on the survival timer.
    pub fn seconds_left(&self) -> u32 {
        ((self.survive_ms - self.elapsed_ms).max(0.0) / 1000.0).ceil() as u32
    }

    pub fn flash(&self) -> Option<&'static str> {
        self.flash.map(|(msg, _)| msg)
    }

    pub fn drop_interval_ms(&self) -> f64 {
        (BASE_DROP_MS - self.pieces_placed as f64 * DROP_SPEEDUP_PER_PIECE).max(MIN_DROP_MS)
    }

    pub fn in_danger(&self) -> bool {
        self.grid[DANGER_ROW].iter().any(Option::is_some)
    }

    fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| {
            if x < 0 || x >= COLS as i32 || y >= ROWS as i32 {
                return true;
            }
            y >= 0 && self.grid[y as usize][x as usize].is_some()
        })
    }

    /// Place a fresh piece at the top; if it does not fit the stack has topped out.
    pub fn spawn_piece(&mut self, piece: Piece) {
        if self.collides(&piece) {
            self.running = false;
            self.pending = Some(Outcome::Lost);
        }
        self.current = Some(piece);
    }

    fn spawn(&mut self, rng: &mut SmallRng) {
        let all = shapes();
        let shape = all[rng.gen_range(0..all.len())].clone();
        let priority = PRIORITIES[rng.gen_range(0..PRIORITIES.len())];
        self.spawn_piece(Piece {
            shape,
            priority,
            x: COLS as i32 / 2 - 1,
            y: 0,
        });
    }

    fn merge(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        for (x, y) in piece.cells() {
            if (0..ROWS as i32).contains(&y) && (0..COLS as i32).contains(&x) {
                self.grid[y as usize][x as usize] = Some(piece.priority);
            }
        }
        self.pieces_placed += 1;
        let before = self.grid.len();
        self.grid.retain(|row| row.iter().any(Option::is_none));
        let cleared = before - self.grid.len();
        for _ in 0..cleared {
            self.grid.insert(0, [None; COLS]);
        }
        match cleared {
            0 => {}
            1 => self.flash = Some(("Pawned off!", FLASH_MS)),
            _ => self.flash = Some(("Reassigned to the whole team!", FLASH_MS)),
        }
    }

    /// Move the piece one row down, locking it (and spawning the next) on contact.
    pub fn drop_piece(&mut self, rng: &mut SmallRng) {
        let Some(mut moved) = self.current.clone() else {
            return;
        };
        moved.y += 1;
        if self.collides(&moved) {
            self.merge();
            self.spawn(rng);
        } else {
            self.current = Some(moved);
        }
    }

    pub fn shift(&mut self, dx: i32) {
        let Some(mut moved) = self.current.clone() else {
            return;
        };
        moved.x += dx;
        if !self.collides(&moved) {
            self.current = Some(moved);
        }
    }

    pub fn rotate(&mut self) {
        let Some(mut turned) = self.current.clone() else {
            return;
        };
        turned.shape = rotate_cw(&turned.shape);
        if !self.collides(&turned) {
            self.current = Some(turned);
        }
    }

    fn handle_key(&mut self, key: &str, rng: &mut SmallRng) {
        if !self.running {
            return;
        }
        match key.to_ascii_lowercase().as_str() {
            "arrowleft" | "a" => self.shift(-1),
            "arrowright" | "d" => self.shift(1),
            "arrowdown" | "s" => self.drop_piece(rng),
            "arrowup" | "w" => self.rotate(),
            _ => {}
        }
    }
}

impl Minigame for TetrisGame {
    fn key_down(&mut self, key: &str) {
        if self.running {
            self.queued_keys.push(key.to_string());
        }
    }

    fn advance(&mut self, dt_ms: f64, rng: &mut SmallRng) -> Option<Outcome> {
        for key in std::mem::take(&mut self.queued_keys) {
            self.handle_key(&key, rng);
        }
        if let Some(outcome) = self.pending.take() {
            return Some(outcome);
        }
        if !self.running {
            return None;
        }
        let dt = dt_ms.max(0.0);
        if let Some((_, left)) = self.flash.as_mut() {
            *left -= dt;
            if *left <= 0.0 {
                self.flash = None;
            }
        }
        self.elapsed_ms += dt;
        if self.elapsed_ms >= self.survive_ms {
            self.running = false;
            return Some(Outcome::Won);
        }
        self.drop_counter_ms += dt;
        if self.drop_counter_ms > self.drop_interval_ms() {
            self.drop_piece(rng);
            self.drop_counter_ms = 0.0;
        }
        self.pending.take()
    }
}
