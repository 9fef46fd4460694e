//! Pong against "Marty Supreme". First to the target score wins.

use std::collections::HashSet;

use rand::rngs::SmallRng;

use super::{FrameClock, Minigame, Outcome};

pub const FIELD_W: f64 = 350.0;
pub const FIELD_H: f64 = 240.0;
pub const PADDLE_H: f64 = 60.0;
pub const PADDLE_W: f64 = 12.0;
pub const PLAYER_PADDLE_X: f64 = 5.0;
pub const AI_PADDLE_X: f64 = 333.0;
pub const BALL_RADIUS: f64 = 6.0;

const BALL_VX: f64 = 4.0;
const BALL_VY_START: f64 = 2.2;
const MAX_VY: f64 = 3.5;
const PADDLE_SPEED: f64 = 5.0;
const AI_PADDLE_SPEED: f64 = 2.2;
/// AI only chases when the ball is further than this from its centre.
const AI_DEAD_ZONE: f64 = 15.0;
const PLAYER_HIT_X: f64 = 18.0;
const AI_HIT_X: f64 = 332.0;

pub struct PongGame {
    pub ball_x: f64,
    pub ball_y: f64,
    ball_vx: f64,
    ball_vy: f64,
    pub paddle_y: f64,
    pub ai_y: f64,
    pub player_score: u32,
    pub ai_score: u32,
    target_score: u32,
    running: bool,
    keys_down: HashSet<String>,
    clock: FrameClock,
}

impl PongGame {
    pub fn new(target_score: u32) -> Self {
        Self {
            ball_x: FIELD_W / 2.0,
            ball_y: 120.0,
            ball_vx: BALL_VX,
            ball_vy: BALL_VY_START,
            paddle_y: 90.0,
            ai_y: 90.0,
            player_score: 0,
            ai_score: 0,
            target_score: target_score.max(1),
            running: true,
            keys_down: HashSet::new(),
            clock: FrameClock::default(),
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    fn held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.keys_down.contains(*k))
    }

    /// Re-serve from the centre toward `vx`'s sign.
    fn serve(&mut self, vx: f64) {
        self.ball_x = FIELD_W / 2.0;
        self.ball_y = 120.0;
        self.ball_vx = vx;
        self.ball_vy = BALL_VY_START;
    }

    /// One fixed-rate simulation frame.
    pub fn step(&mut self) -> Option<Outcome> {
        if !self.running {
            return None;
        }
        if self.held(&["w", "W", "ArrowUp"]) {
            self.paddle_y = (self.paddle_y - PADDLE_SPEED).max(0.0);
        }
        if self.held(&["s", "S", "ArrowDown"]) {
            self.paddle_y = (self.paddle_y + PADDLE_SPEED).min(FIELD_H - PADDLE_H);
        }

        self.ball_x += self.ball_vx;
        self.ball_y += self.ball_vy;
        if self.ball_y <= 0.0 || self.ball_y >= FIELD_H {
            self.ball_vy = -self.ball_vy;
        }

        let ai_center = self.ai_y + PADDLE_H / 2.0;
        if ai_center < self.ball_y - AI_DEAD_ZONE {
            self.ai_y = (self.ai_y + AI_PADDLE_SPEED).min(FIELD_H - PADDLE_H);
        } else if ai_center > self.ball_y + AI_DEAD_ZONE {
            self.ai_y = (self.ai_y - AI_PADDLE_SPEED).max(0.0);
        }

        if self.ball_x <= PLAYER_HIT_X
            && self.ball_y >= self.paddle_y
            && self.ball_y <= self.paddle_y + PADDLE_H
        {
            self.ball_vx = BALL_VX;
            self.ball_vy = hit_point(self.ball_y, self.paddle_y) * MAX_VY;
        }
        if self.ball_x >= AI_HIT_X && self.ball_y >= self.ai_y && self.ball_y <= self.ai_y + PADDLE_H
        {
            self.ball_vx = -BALL_VX;
            self.ball_vy = hit_point(self.ball_y, self.ai_y) * MAX_VY;
        }

        if self.ball_x < 0.0 {
            self.ai_score += 1;
            if self.ai_score >= self.target_score {
                self.running = false;
                return Some(Outcome::Lost);
            }
            self.serve(BALL_VX);
        }
        if self.ball_x > FIELD_W {
            self.player_score += 1;
            if self.player_score >= self.target_score {
                self.running = false;
                return Some(Outcome::Won);
            }
            self.serve(-BALL_VX);
        }
        None
    }
}

/// Where on the paddle the ball landed: -1 top edge, 0 centre, 1 bottom edge.
fn hit_point(ball_y: f64, paddle_y: f64) -> f64 {
    (ball_y - (paddle_y + PADDLE_H / 2.0)) / (PADDLE_H / 2.0)
}

impl Minigame for PongGame {
    fn key_down(&mut self, key: &str) {
        self.keys_down.insert(key.to_string());
    }

    fn key_up(&mut self, key: &str) {
        self.keys_down.remove(key);
    }

    fn advance(&mut self, dt_ms: f64, _rng: &mut SmallRng) -> Option<Outcome> {
        for _ in 0..self.clock.frames(dt_ms) {
            if let Some(outcome) = self.step() {
                return Some(outcome);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paddle_moves_and_clamps() {
        let mut g = PongGame::new(3);
        g.key_down("ArrowUp");
        for _ in 0..40 {
            g.step();
        }
        assert_eq!(g.paddle_y, 0.0);
        g.key_up("ArrowUp");
        g.key_down("s");
        for _ in 0..40 {
            g.step();
        }
        assert_eq!(g.paddle_y, FIELD_H - PADDLE_H);
    }

    #[test]
    fn player_paddle_reflects_ball_by_hit_point() {
        let mut g = PongGame::new(3);
        g.ball_x = 20.0;
        g.ball_y = 120.0;
        g.ball_vx = -4.0;
        g.ball_vy = 0.0;
        g.paddle_y = 90.0;
        g.step();
        assert_eq!(g.ball_vx, BALL_VX);
        assert!(g.ball_vy.abs() < 1e-9, "centre hit goes straight");
    }

    #[test]
    fn missed_ball_at_target_score_ends_match() {
        let mut g = PongGame::new(1);
        g.ball_x = 2.0;
        g.ball_y = 10.0;
        g.ball_vx = -4.0;
        g.ball_vy = 0.0;
        g.paddle_y = 180.0;
        assert_eq!(g.step(), Some(Outcome::Lost));
        assert_eq!(g.ai_score, 1);
        assert!(!g.running());
        assert_eq!(g.step(), None);
    }

    #[test]
    fn player_point_resets_toward_player() {
        let mut g = PongGame::new(3);
        g.ball_x = 349.0;
        g.ball_y = 10.0;
        g.ball_vx = 4.0;
        g.ball_vy = 0.0;
        g.ai_y = 180.0;
        assert_eq!(g.step(), None);
        assert_eq!(g.player_score, 1);
        assert_eq!(g.ball_x, FIELD_W / 2.0);
        assert_eq!(g.ball_vx, -BALL_VX);
    }

    #[test]
    fn ball_bounces_off_top_and_bottom_walls() {
        let mut g = PongGame::new(3);
        g.ball_y = 1.0;
        g.ball_vy = -2.2;
        g.step();
        assert_eq!(g.ball_vy, 2.2);
        g.ball_y = FIELD_H - 1.0;
        g.step();
        assert_eq!(g.ball_vy, -2.2);
    }

    #[test]
    fn ai_ignores_ball_inside_dead_zone() {
        let mut g = PongGame::new(3);
        g.ball_vy = 0.0;
        g.ball_y = 130.0;
        g.step();
        assert_eq!(g.ai_y, 90.0);
        g.ball_y = 140.0;
        g.step();
        assert!((g.ai_y - (90.0 + AI_PADDLE_SPEED)).abs() < 1e-9);
        g.ball_y = 50.0;
        g.step();
        assert!((g.ai_y - 90.0).abs() < 1e-9);
    }
}
