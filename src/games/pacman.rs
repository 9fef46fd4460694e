//! Email Pac-Man: clear the inbox before a coworker catches you.

use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::{FrameClock, Minigame, Outcome};

pub const CELL: f64 = 20.0;
pub const COLS: usize = 15;
pub const ROWS: usize = 13;
pub const EMAIL_COUNT: usize = 20;

const PLAYER_EVERY_FRAMES: u64 = 8;
const GHOST_EVERY_FRAMES: u64 = 12;
const MOUTH_EVERY_FRAMES: u64 = 10;
const GHOST_CHASE_CHANCE: f64 = 0.4;
const GHOST_FIRST_PICK_CHANCE: f64 = 0.6;
const START: (i32, i32) = (1, 1);

/// `#` wall, `.` path.
const MAZE: [&str; ROWS] = [
    "###############",
    "#......#......#",
    "#.##.#...#.##.#",
    "#.............#",
    "#.#.##.#.##.#.#",
    "#.............#",
    "###.#.###.#.###",
    "#.............#",
    "#.#.##.#.##.#.#",
    "#.............#",
    "#.##.#...#.##.#",
    "#......#......#",
    "###############",
];

pub fn is_wall(x: i32, y: i32) -> bool {
    if x < 0 || y < 0 || x as usize >= COLS || y as usize >= ROWS {
        return true;
    }
    MAZE[y as usize].as_bytes()[x as usize] == b'#'
}

fn can_move(x: i32, y: i32) -> bool {
    !is_wall(x, y)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Email {
    pub x: i32,
    pub y: i32,
    pub eaten: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ghost {
    pub x: i32,
    pub y: i32,
    pub color: &'static str,
    pub label: &'static str,
}

const DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub struct PacmanGame {
    pub px: i32,
    pub py: i32,
    /// Last requested direction; also where the mouth faces.
    pub dir: (i32, i32),
    pub emails: Vec<Email>,
    pub ghosts: Vec<Ghost>,
    pub mouth_open: bool,
    frame: u64,
    running: bool,
    clock: FrameClock,
}

impl PacmanGame {
    pub fn new(rng: &mut SmallRng) -> Self {
        let mut paths: Vec<(i32, i32)> = (0..ROWS as i32)
            .flat_map(|y| (0..COLS as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| can_move(x, y) && (x, y) != START)
            .collect();
        paths.shuffle(rng);
        let emails = paths
            .into_iter()
            .take(EMAIL_COUNT)
            .map(|(x, y)| Email { x, y, eaten: false })
            .collect();
        Self::with_emails(emails)
    }

    pub fn with_emails(emails: Vec<Email>) -> Self {
        Self {
            px: START.0,
            py: START.1,
            dir: (0, 0),
            emails,
            ghosts: vec![
                Ghost { x: 7, y: 6, color: "#f72585", label: "PM" },
                Ghost { x: 13, y: 1, color: "#7209b7", label: "HR" },
                Ghost { x: 1, y: 11, color: "#4361ee", label: "CEO" },
            ],
            mouth_open: true,
            frame: 0,
            running: true,
            clock: FrameClock::default(),
        }
    }

    pub fn emails_left(&self) -> usize {
        self.emails.iter().filter(|e| !e.eaten).count()
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Facing angle of the mouth in radians.
    pub fn facing(&self) -> f64 {
        use std::f64::consts::PI;
        match self.dir {
            (-1, _) => PI,
            (_, -1) => -PI / 2.0,
            (_, 1) => PI / 2.0,
            _ => 0.0,
        }
    }

    fn move_player(&mut self) -> Option<Outcome> {
        let (nx, ny) = (self.px + self.dir.0, self.py + self.dir.1);
        if can_move(nx, ny) {
            self.px = nx;
            self.py = ny;
        }
        let (px, py) = (self.px, self.py);
        if let Some(email) = self
            .emails
            .iter_mut()
            .find(|e| !e.eaten && e.x == px && e.y == py)
        {
            email.eaten = true;
            if self.emails_left() == 0 {
                self.running = false;
                return Some(Outcome::Won);
            }
        }
        None
    }

    fn move_ghosts(&mut self, rng: &mut SmallRng) -> Option<Outcome> {
        let (px, py) = (self.px, self.py);
        for g in self.ghosts.iter_mut() {
            let mut open: Vec<(i32, i32)> = DIRS
                .iter()
                .copied()
                .filter(|(dx, dy)| can_move(g.x + dx, g.y + dy))
                .collect();
            if !open.is_empty() {
                if rng.gen_bool(GHOST_CHASE_CHANCE) {
                    open.sort_by_key(|(dx, dy)| (g.x + dx - px).abs() + (g.y + dy - py).abs());
                }
                let pick = if rng.gen_bool(GHOST_FIRST_PICK_CHANCE) {
                    open[0]
                } else {
                    open[rng.gen_range(0..open.len())]
                };
                g.x += pick.0;
                g.y += pick.1;
            }
            if g.x == px && g.y == py {
                self.running = false;
                return Some(Outcome::Lost);
            }
        }
        None
    }

    pub fn step(&mut self, rng: &mut SmallRng) -> Option<Outcome> {
        if !self.running {
            return None;
        }
        self.frame += 1;
        if self.frame % PLAYER_EVERY_FRAMES == 0 {
            if let Some(outcome) = self.move_player() {
                return Some(outcome);
            }
        }
        if self.frame % GHOST_EVERY_FRAMES == 0 {
            if let Some(outcome) = self.move_ghosts(rng) {
                return Some(outcome);
            }
        }
        if self.frame % MOUTH_EVERY_FRAMES == 0 {
            self.mouth_open = !self.mouth_open;
        }
        None
    }
}

impl Minigame for PacmanGame {
    fn key_down(&mut self, key: &str) {
        self.dir = match key {
            "ArrowUp" | "w" => (0, -1),
            "ArrowDown" | "s" => (0, 1),
            "ArrowLeft" | "a" => (-1, 0),
            "ArrowRight" | "d" => (1, 0),
            _ => return,
        };
    }

    fn advance(&mut self, dt_ms: f64, rng: &mut SmallRng) -> Option<Outcome> {
        for _ in 0..self.clock.frames(dt_ms) {
            if let Some(outcome) = self.step(rng) {
                return Some(outcome);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn maze_is_closed_and_start_is_open() {
        for x in 0..COLS as i32 {
            assert!(is_wall(x, 0) && is_wall(x, ROWS as i32 - 1));
        }
        assert!(!is_wall(START.0, START.1));
        assert!(is_wall(-1, 3));
    }

    #[test]
    fn emails_are_placed_on_distinct_paths() {
        let mut rng = SmallRng::seed_from_u64(7);
        let g = PacmanGame::new(&mut rng);
        assert_eq!(g.emails.len(), EMAIL_COUNT);
        for (i, e) in g.emails.iter().enumerate() {
            assert!(!is_wall(e.x, e.y));
            assert_ne!((e.x, e.y), START);
            assert!(g.emails[i + 1..].iter().all(|o| (o.x, o.y) != (e.x, e.y)));
        }
    }

    #[test]
    fn walls_block_and_last_email_wins() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut g = PacmanGame::with_emails(vec![Email { x: 2, y: 1, eaten: false }]);
        g.ghosts.clear();
        g.key_down("ArrowUp");
        for _ in 0..PLAYER_EVERY_FRAMES {
            g.step(&mut rng);
        }
        assert_eq!((g.px, g.py), START);
        g.key_down("d");
        let mut outcome = None;
        for _ in 0..PLAYER_EVERY_FRAMES {
            outcome = outcome.or(g.step(&mut rng));
        }
        assert_eq!(outcome, Some(Outcome::Won));
        assert_eq!(g.emails_left(), 0);
    }

    #[test]
    fn ghost_on_player_loses() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut g = PacmanGame::with_emails(vec![Email { x: 13, y: 11, eaten: false }]);
        g.ghosts = vec![Ghost { x: 2, y: 1, color: "#fff", label: "PM" }];
        g.px = 1;
        g.py = 1;
        let mut outcome = None;
        for _ in 0..(GHOST_EVERY_FRAMES * 5_000) {
            if let Some(o) = g.step(&mut rng) {
                outcome = Some(o);
                break;
            }
        }
        assert_eq!(outcome, Some(Outcome::Lost));
    }

    #[test]
    fn mouth_toggles_every_ten_frames() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut g = PacmanGame::with_emails(vec![Email { x: 13, y: 11, eaten: false }]);
        g.ghosts.clear();
        for _ in 0..MOUTH_EVERY_FRAMES - 1 {
            g.step(&mut rng);
        }
        assert!(g.mouth_open);
        g.step(&mut rng);
        assert!(!g.mouth_open);
        for _ in 0..MOUTH_EVERY_FRAMES {
            g.step(&mut rng);
        }
        assert!(g.mouth_open);
    }
}
