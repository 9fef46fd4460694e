//! Stage director: the scripted office day as an explicit state machine.
//!
//! The director never reads a clock. Every entry point takes `now` (ms) so the
//! browser runtime can drive it from `requestAnimationFrame` timestamps and
//! tests can drive it with plain numbers. Delayed steps live in a small timer
//! queue; timers bound to a stage die when the stage changes.

use crate::boss::{AltButton, BossDialog, FollowUp};
use crate::config::GameConfig;
use crate::games::Outcome;
use crate::meter::{PerformanceMeter, Verdict};
use crate::punishment::{Punishment, PunishmentKind};
use crate::stage::Stage;

pub const TEAMS_CLOSE_MSG: &str = "Ignoring my pings? Fine. If you won't reply, then you'll rebound. Put your paddle where your mouse is and let's see if you can keep up.";
pub const PONG_WIN_MSG: &str =
    "You WON?! Instead of working?! The meter moves toward FIRED. Now get to the standup!";
pub const PONG_LOSE_MSG: &str =
    "Ha! You lost to ME?! Guess you have to reply, loser. Back to the Teams chat!";
pub const ZOOM_DECLINE_MSG: &str = "Think you can skip the standup? Decode this corporate jargon!";
pub const WORDLE_LOSE_MSG: &str = "Can't even decode corporate buzzwords?! Back to the grind. Punishment first, then emails.";
pub const EMAIL_MSG: &str = "Check your emails! 10 unread messages! You're on prod support!";
pub const PACMAN_WIN_MSG: &str =
    "You are AVOIDING work?! Impressive slacking! Keep it up and you might get FIRED!";
pub const PACMAN_LOSE_MSG: &str = "Eaten by your own coworkers?! Pathetic. That's what happens when you don't clear your inbox. Punishment time!";
pub const JIRA_MSG: &str =
    "The sprint is on fire! It's all your fault for not working! Survive the backlog of tasks!";
pub const TETRIS_TOP_MSG: &str = "Ha got you, better luck next time, pay attention during the Jira Refinement! You can have some points for doing work...";
pub const TETRIS_SURVIVED_MSG: &str = "Wait... NO WORK ASSIGNED TO YOU?! You survived the backlog without lifting a finger?! You absolute DEAD WEIGHT! 😤 I'll get you next time, Slacker..";

pub fn wordle_win_msg(guesses: u8) -> String {
    format!(
        "Decoded in {guesses} tries?! You are trying to escape work, aren't you? The meter moves toward FIRED!"
    )
}

const FINE_BUTTON: AltButton = AltButton {
    label: "Fine.",
    target: Stage::Outlook,
};

/// Player (or page) input understood by the director.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    IntroStart,
    ToggleSkipTutorials,
    TeamsClose,
    TeamsJoin,
    HowToStart,
    GameOver(Outcome),
    ZoomJoin,
    ZoomDecline,
    BossDismiss,
    BossAlt,
    OutlookClose,
    Restart,
}

/// Things that happened, for logging and re-rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    StageChanged { from: Stage, to: Stage },
    MeterMoved { delta: i32, value: i32 },
    BossOpened,
    BossClosed,
    PunishmentStarted(PunishmentKind),
    PunishmentFinished,
    SkipTutorials(bool),
}

#[derive(Clone, Debug, PartialEq)]
enum Scheduled {
    Stage(Stage),
    Boss {
        message: &'static str,
        next: Stage,
        alt: Option<AltButton>,
    },
}

#[derive(Clone, Debug)]
struct Timer {
    due_ms: f64,
    action: Scheduled,
    /// `Some(stage)`: cancelled once the director leaves `stage`.
    /// `None`: the single "delayed stage" slot, replaced by each new request.
    bound: Option<Stage>,
}

pub struct Director {
    config: GameConfig,
    stage: Stage,
    meter: PerformanceMeter,
    skip_tutorials: bool,
    loop_done: bool,
    boss: Option<BossDialog>,
    punishment: Option<Punishment>,
    timers: Vec<Timer>,
    notices: Vec<Notice>,
}

impl Director {
    pub fn new(config: GameConfig) -> Self {
        Self {
            skip_tutorials: config.skip_tutorials,
            config,
            stage: Stage::Intro,
            meter: PerformanceMeter::new(),
            loop_done: false,
            boss: None,
            punishment: None,
            timers: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn meter(&self) -> &PerformanceMeter {
        &self.meter
    }

    pub fn skip_tutorials(&self) -> bool {
        self.skip_tutorials
    }

    pub fn loop_done(&self) -> bool {
        self.loop_done
    }

    pub fn boss(&self) -> Option<&BossDialog> {
        self.boss.as_ref()
    }

    pub fn punishment(&self) -> Option<&Punishment> {
        self.punishment.as_ref()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Feed one input. Inputs that make no sense in the current situation
    /// (a boss is talking, a punishment is running, wrong stage) are ignored.
    pub fn handle(&mut self, event: Event, now: f64) {
        if event == Event::Restart {
            let config = self.config.clone();
            let from = self.stage;
            *self = Director::new(config);
            self.notices.push(Notice::StageChanged {
                from,
                to: Stage::Intro,
            });
            return;
        }
        if self.stage.is_terminal() || self.punishment.is_some() {
            return;
        }
        if self.boss.is_some() {
            match event {
                Event::BossDismiss => self.dismiss_boss(now),
                Event::BossAlt if self.boss.as_ref().is_some_and(|b| b.alt.is_some()) => {
                    self.boss_alt(now)
                }
                _ => {}
            }
            return;
        }
        match (event, self.stage) {
            (Event::ToggleSkipTutorials, Stage::Intro) => {
                self.skip_tutorials = !self.skip_tutorials;
                self.notices.push(Notice::SkipTutorials(self.skip_tutorials));
            }
            (Event::IntroStart, Stage::Intro) => self.set_stage(Stage::Procrastination, now),
            (Event::TeamsClose, Stage::Teams) => {
                let next = self.tutorial_or(Stage::Pingpong);
                self.open_boss(BossDialog::new(TEAMS_CLOSE_MSG, next, now, self.typing_ms()));
            }
            (Event::TeamsJoin, Stage::Teams) => {
                if self.nudge(10) {
                    return;
                }
                self.start_punishment(Stage::Pingpong, Stage::PongDone, false, now);
            }
            (Event::HowToStart, stage) => {
                if let Some(play) = stage.play_stage() {
                    self.set_stage(play, now);
                }
            }
            (Event::GameOver(outcome), stage) if stage.minigame().is_some() => {
                self.game_over(stage, outcome, now)
            }
            (Event::ZoomJoin, Stage::Zoom) => {
                if self.nudge(20) {
                    return;
                }
                self.start_punishment(Stage::Wordle, Stage::WordleDone, false, now);
            }
            (Event::ZoomDecline, Stage::Zoom) => {
                if self.nudge(-15) {
                    return;
                }
                let next = self.tutorial_or(Stage::Wordle);
                self.open_boss(BossDialog::new(ZOOM_DECLINE_MSG, next, now, self.typing_ms()));
            }
            (Event::OutlookClose, Stage::Outlook) => self.set_stage(Stage::Jira, now),
            _ => {}
        }
    }

    /// Fire due timers, auto-advance the boss and finish punishments.
    pub fn tick(&mut self, now: f64) {
        while let Some(idx) = self.next_due(now) {
            let timer = self.timers.remove(idx);
            match timer.action {
                Scheduled::Stage(stage) => self.set_stage(stage, now),
                Scheduled::Boss { message, next, alt } => {
                    let mut dialog = BossDialog::new(message, next, now, self.typing_ms());
                    if let Some(alt) = alt {
                        dialog = dialog.with_alt(alt);
                    }
                    self.open_boss(dialog);
                }
            }
        }
        if self.boss.as_ref().is_some_and(|b| b.auto_advance_due(now)) {
            self.dismiss_boss(now);
        }
        if self.punishment.as_ref().is_some_and(|p| p.finished(now)) {
            if let Some(p) = self.punishment.take() {
                self.notices.push(Notice::PunishmentFinished);
                self.set_stage(p.next, now);
            }
        }
    }

    fn next_due(&self, now: f64) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now)
            .min_by(|a, b| a.1.due_ms.total_cmp(&b.1.due_ms))
            .map(|(i, _)| i)
    }

    fn typing_ms(&self) -> f64 {
        self.config.boss_typing_ms_per_char
    }

    fn tutorial_or(&self, game: Stage) -> Stage {
        if self.skip_tutorials {
            return game;
        }
        match game {
            Stage::Pingpong => Stage::PongHowto,
            Stage::Wordle => Stage::WordleHowto,
            Stage::Pacman => Stage::PacmanHowto,
            Stage::Tetris => Stage::TetrisHowto,
            other => other,
        }
    }

    /// Move the meter. Returns true when the move ended the game.
    fn nudge(&mut self, delta: i32) -> bool {
        let verdict = self.meter.nudge(delta);
        self.notices.push(Notice::MeterMoved {
            delta,
            value: self.meter.value(),
        });
        match verdict {
            Some(v) => {
                self.finish(v);
                true
            }
            None => false,
        }
    }

    fn finish(&mut self, verdict: Verdict) {
        let end = match verdict {
            Verdict::Fired => Stage::Fired,
            Verdict::Promoted => Stage::Promoted,
        };
        // Overlays and timers belong to the game that just ended.
        self.boss = None;
        self.punishment = None;
        self.timers.clear();
        let from = self.stage;
        self.stage = end;
        self.notices.push(Notice::StageChanged { from, to: end });
    }

    fn set_stage(&mut self, stage: Stage, now: f64) {
        if stage == self.stage {
            return;
        }
        let from = self.stage;
        self.stage = stage;
        self.timers
            .retain(|t| t.bound.is_none() || t.bound == Some(stage));
        self.notices.push(Notice::StageChanged { from, to: stage });
        self.on_enter(stage, now);
    }

    /// The single delayed stage change; a newer request replaces an older one.
    fn delay_stage(&mut self, stage: Stage, delay_ms: f64, now: f64) {
        self.timers.retain(|t| t.bound.is_some());
        self.timers.push(Timer {
            due_ms: now + delay_ms,
            action: Scheduled::Stage(stage),
            bound: None,
        });
    }

    fn schedule_bound(&mut self, action: Scheduled, delay_ms: f64, now: f64) {
        self.timers.push(Timer {
            due_ms: now + delay_ms,
            action,
            bound: Some(self.stage),
        });
    }

    /// After the first loop, a meter past the cutoff ends the day early.
    fn cutoff_reached(&mut self) -> bool {
        match self.meter.verdict_at_cutoff(self.config.meter_cutoff) {
            Some(v) => {
                self.finish(v);
                true
            }
            None => false,
        }
    }

    fn on_enter(&mut self, stage: Stage, now: f64) {
        let delay = self.config.stage_delay_ms;
        match stage {
            Stage::Procrastination => self.delay_stage(Stage::Teams, delay, now),
            Stage::PongDone => {
                if self.loop_done && self.cutoff_reached() {
                    return;
                }
                self.delay_stage(Stage::Zoom, delay, now);
            }
            Stage::WordleDone => {
                if self.loop_done && self.cutoff_reached() {
                    return;
                }
                let next = self.tutorial_or(Stage::Pacman);
                self.schedule_bound(
                    Scheduled::Boss {
                        message: EMAIL_MSG,
                        next,
                        alt: Some(FINE_BUTTON),
                    },
                    self.config.second_delay_ms,
                    now,
                );
            }
            Stage::Outlook => self.schedule_bound(Scheduled::Stage(Stage::Jira), delay, now),
            Stage::PacmanDone => {
                if self.loop_done && self.cutoff_reached() {
                    return;
                }
                self.delay_stage(Stage::Jira, delay, now);
            }
            Stage::Jira => {
                let next = self.tutorial_or(Stage::Tetris);
                self.schedule_bound(
                    Scheduled::Boss {
                        message: JIRA_MSG,
                        next,
                        alt: None,
                    },
                    self.config.jira_boss_delay_ms,
                    now,
                );
            }
            Stage::TetrisDone => {
                if self.cutoff_reached() {
                    return;
                }
                self.loop_done = true;
                self.delay_stage(Stage::Procrastination, delay, now);
            }
            _ => {}
        }
    }

    fn open_boss(&mut self, dialog: BossDialog) {
        self.boss = Some(dialog);
        self.notices.push(Notice::BossOpened);
    }

    fn dismiss_boss(&mut self, now: f64) {
        let Some(dialog) = self.boss.take() else {
            return;
        };
        self.notices.push(Notice::BossClosed);
        match dialog.follow_up {
            Some(FollowUp::Punish { next, game }) => self.start_punishment(game, next, true, now),
            None => self.set_stage(dialog.next, now),
        }
    }

    fn boss_alt(&mut self, now: f64) {
        let Some(alt) = self.boss.as_ref().and_then(|b| b.alt) else {
            return;
        };
        self.boss = None;
        self.notices.push(Notice::BossClosed);
        self.set_stage(alt.target, now);
    }

    fn start_punishment(&mut self, game: Stage, next: Stage, punitive: bool, now: f64) {
        let p = Punishment::new(game, next, punitive, now, self.config.punishment_seconds);
        self.notices.push(Notice::PunishmentStarted(p.kind));
        self.punishment = Some(p);
    }

    /// Boss reaction to a lost game: auto-advancing rant, then a punishment
    /// themed on `game`.
    fn lost_game(&mut self, message: &str, game: Stage, done: Stage, now: f64) {
        let dialog = BossDialog::new(message, done, now, self.typing_ms())
            .with_auto_advance(self.config.boss_auto_advance_ms)
            .with_follow_up(FollowUp::Punish { next: done, game });
        self.open_boss(dialog);
    }

    fn game_over(&mut self, stage: Stage, outcome: Outcome, now: f64) {
        let typing = self.typing_ms();
        match (stage, outcome) {
            (Stage::Pingpong, Outcome::Won) => {
                if !self.nudge(-30) {
                    self.open_boss(BossDialog::new(PONG_WIN_MSG, Stage::PongDone, now, typing));
                }
            }
            (Stage::Pingpong, _) => {
                if !self.nudge(10) {
                    self.lost_game(PONG_LOSE_MSG, Stage::Pingpong, Stage::PongDone, now);
                }
            }
            (Stage::Wordle, Outcome::Decoded { guesses }) if guesses <= 6 => {
                if !self.nudge(-25) {
                    let msg = wordle_win_msg(guesses);
                    self.open_boss(BossDialog::new(msg, Stage::WordleDone, now, typing));
                }
            }
            (Stage::Wordle, _) => {
                if !self.nudge(10) {
                    self.lost_game(WORDLE_LOSE_MSG, Stage::Wordle, Stage::WordleDone, now);
                }
            }
            (Stage::Pacman, Outcome::Won) => {
                if !self.nudge(-30) {
                    self.open_boss(BossDialog::new(PACMAN_WIN_MSG, Stage::PacmanDone, now, typing));
                }
            }
            (Stage::Pacman, _) => {
                if !self.nudge(10) {
                    self.lost_game(PACMAN_LOSE_MSG, Stage::Pacman, Stage::PacmanDone, now);
                }
            }
            (Stage::Tetris, Outcome::Won) => {
                if !self.nudge(-30) {
                    self.open_boss(BossDialog::new(
                        TETRIS_SURVIVED_MSG,
                        Stage::TetrisDone,
                        now,
                        typing,
                    ));
                }
            }
            (Stage::Tetris, _) => {
                // Topping out still counts as having done some work; no punishment.
                if !self.nudge(10) {
                    self.open_boss(BossDialog::new(TETRIS_TOP_MSG, Stage::TetrisDone, now, typing));
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn director() -> Director {
        Director::new(GameConfig::default())
    }

    #[test]
    fn intro_leads_to_teams_after_delay() {
        let mut d = director();
        d.handle(Event::IntroStart, 0.0);
        assert_eq!(d.stage(), Stage::Procrastination);
        d.tick(2999.0);
        assert_eq!(d.stage(), Stage::Procrastination);
        d.tick(3000.0);
        assert_eq!(d.stage(), Stage::Teams);
        let notices = d.drain_notices();
        assert!(notices.contains(&Notice::StageChanged {
            from: Stage::Procrastination,
            to: Stage::Teams
        }));
    }

    #[test]
    fn boss_blocks_other_input_until_dismissed() {
        let mut d = director();
        d.handle(Event::IntroStart, 0.0);
        d.tick(3000.0);
        d.handle(Event::TeamsClose, 3000.0);
        assert!(d.boss().is_some());
        d.handle(Event::TeamsJoin, 3001.0);
        assert_eq!(d.meter().value(), 0);
        d.handle(Event::BossDismiss, 3002.0);
        assert_eq!(d.stage(), Stage::Pingpong);
    }

    #[test]
    fn tutorials_are_shown_when_not_skipped() {
        let mut d = director();
        d.handle(Event::ToggleSkipTutorials, 0.0);
        assert!(!d.skip_tutorials());
        d.handle(Event::IntroStart, 0.0);
        d.tick(3000.0);
        d.handle(Event::TeamsClose, 3000.0);
        d.handle(Event::BossDismiss, 3000.0);
        assert_eq!(d.stage(), Stage::PongHowto);
        d.handle(Event::HowToStart, 3100.0);
        assert_eq!(d.stage(), Stage::Pingpong);
    }

    #[test]
    fn lost_game_auto_advances_into_punishment() {
        let mut d = director();
        d.handle(Event::IntroStart, 0.0);
        d.tick(3000.0);
        d.handle(Event::TeamsClose, 3000.0);
        d.handle(Event::BossDismiss, 3000.0);
        d.handle(Event::GameOver(Outcome::Lost), 4000.0);
        assert_eq!(d.meter().value(), 10);
        let typed_at = 4000.0 + PONG_LOSE_MSG.chars().count() as f64 * 25.0;
        d.tick(typed_at + 1499.0);
        assert!(d.boss().is_some());
        d.tick(typed_at + 1500.0);
        assert!(d.boss().is_none());
        let p = d.punishment().expect("punishment running");
        assert_eq!(p.kind, PunishmentKind::Teams);
        assert!(p.punitive);
        let start = typed_at + 1500.0;
        d.tick(start + 4999.0);
        assert_eq!(d.stage(), Stage::Pingpong);
        d.tick(start + 5000.0);
        assert!(d.punishment().is_none());
        assert_eq!(d.stage(), Stage::PongDone);
        d.tick(start + 8000.0);
        assert_eq!(d.stage(), Stage::Zoom);
    }

    #[test]
    fn teams_join_is_voluntary_work() {
        let mut d = director();
        d.handle(Event::IntroStart, 0.0);
        d.tick(3000.0);
        d.handle(Event::TeamsJoin, 3000.0);
        assert_eq!(d.meter().value(), 10);
        assert!(!d.punishment().expect("overlay").punitive);
        d.tick(8000.0);
        assert_eq!(d.stage(), Stage::PongDone);
    }

    #[test]
    fn wordle_done_offers_outlook_escape() {
        let mut d = director();
        d.handle(Event::IntroStart, 0.0);
        d.tick(3000.0);
        d.handle(Event::TeamsClose, 3000.0);
        d.handle(Event::BossDismiss, 3000.0);
        d.handle(Event::GameOver(Outcome::Won), 3500.0);
        d.handle(Event::BossDismiss, 3600.0);
        assert_eq!(d.stage(), Stage::PongDone);
        d.tick(6600.0);
        assert_eq!(d.stage(), Stage::Zoom);
        d.handle(Event::ZoomDecline, 6700.0);
        d.handle(Event::BossDismiss, 6800.0);
        assert_eq!(d.stage(), Stage::Wordle);
        d.handle(Event::GameOver(Outcome::Decoded { guesses: 3 }), 7000.0);
        assert!(d.boss().expect("boss").message.contains("Decoded in 3 tries"));
        d.handle(Event::BossDismiss, 7100.0);
        assert_eq!(d.stage(), Stage::WordleDone);
        assert_eq!(d.meter().value(), -30 - 15 - 25);
        d.tick(10_100.0);
        let boss = d.boss().expect("email boss");
        assert_eq!(boss.alt, Some(FINE_BUTTON));
        assert_eq!(boss.dismiss_label(), "AGH, no...");
        d.handle(Event::BossAlt, 10_200.0);
        assert_eq!(d.stage(), Stage::Outlook);
        d.tick(13_200.0);
        assert_eq!(d.stage(), Stage::Jira);
        d.tick(14_200.0);
        assert_eq!(d.boss().map(|b| b.next), Some(Stage::Tetris));
    }

    #[test]
    fn leaving_a_stage_cancels_its_timers() {
        let mut d = director();
        d.stage = Stage::WordleDone;
        d.on_enter(Stage::WordleDone, 0.0);
        assert_eq!(d.pending_timers(), 1);
        d.set_stage(Stage::Outlook, 10.0);
        // Only the outlook timeout remains.
        assert_eq!(d.pending_timers(), 1);
        d.handle(Event::OutlookClose, 20.0);
        assert_eq!(d.stage(), Stage::Jira);
        d.tick(5000.0);
        assert_eq!(d.stage(), Stage::Jira);
        assert_eq!(d.boss().map(|b| b.message.as_str()), Some(JIRA_MSG));
    }

    #[test]
    fn meter_extreme_ends_game_immediately() {
        let mut d = director();
        d.meter.nudge(-80);
        d.stage = Stage::Pacman;
        d.handle(Event::GameOver(Outcome::Won), 0.0);
        assert_eq!(d.stage(), Stage::Fired);
        assert!(d.boss().is_none());
        d.handle(Event::BossDismiss, 1.0);
        assert_eq!(d.stage(), Stage::Fired);
        d.handle(Event::Restart, 2.0);
        assert_eq!(d.stage(), Stage::Intro);
        assert_eq!(d.meter().value(), 0);
    }

    #[test]
    fn tetris_done_checks_cutoff_and_loops() {
        let mut d = director();
        d.stage = Stage::Tetris;
        d.handle(Event::GameOver(Outcome::Lost), 0.0);
        assert!(d.punishment().is_none());
        d.handle(Event::BossDismiss, 10.0);
        // +10 is past the default cutoff of 9.
        assert_eq!(d.stage(), Stage::Promoted);

        let mut d = director();
        d.meter.nudge(-5);
        d.stage = Stage::Tetris;
        d.handle(Event::GameOver(Outcome::Won), 0.0);
        d.handle(Event::BossDismiss, 10.0);
        assert_eq!(d.stage(), Stage::Fired);

        let mut d = director();
        d.meter.nudge(-5);
        d.stage = Stage::Tetris;
        d.handle(Event::GameOver(Outcome::Lost), 0.0);
        d.handle(Event::BossDismiss, 10.0);
        assert_eq!(d.stage(), Stage::TetrisDone);
        assert!(d.loop_done());
        d.tick(3010.0);
        assert_eq!(d.stage(), Stage::Procrastination);
        d.tick(6010.0);
        assert_eq!(d.stage(), Stage::Teams);
    }

    #[test]
    fn second_loop_done_stages_check_cutoff() {
        let mut d = director();
        d.loop_done = true;
        d.meter.nudge(-9);
        d.stage = Stage::Pingpong;
        d.handle(Event::GameOver(Outcome::Lost), 0.0);
        assert_eq!(d.meter().value(), 1);
        d.handle(Event::BossDismiss, 10.0);
        assert!(d.punishment().is_some());
        d.tick(5010.0);
        assert_eq!(d.stage(), Stage::PongDone);
        d.tick(8010.0);
        assert_eq!(d.stage(), Stage::Zoom);
        d.handle(Event::ZoomJoin, 8020.0);
        d.tick(13_020.0);
        assert_eq!(d.stage(), Stage::Promoted);
    }

    #[test]
    fn alt_on_a_boss_without_alt_button_is_ignored() {
        let mut d = director();
        d.stage = Stage::Outlook;
        d.set_stage(Stage::Jira, 0.0);
        d.tick(1000.0);
        assert_eq!(d.boss().map(|b| b.alt), Some(None));
        d.handle(Event::BossAlt, 1100.0);
        assert!(d.boss().is_some());
        assert_eq!(d.stage(), Stage::Jira);
        d.handle(Event::BossDismiss, 1200.0);
        assert_eq!(d.stage(), Stage::Tetris);
    }

    #[test]
    fn zoom_join_is_voluntary_zoom_work() {
        let mut d = director();
        d.stage = Stage::Zoom;
        d.handle(Event::ZoomJoin, 0.0);
        assert_eq!(d.meter().value(), 20);
        let p = d.punishment().expect("overlay");
        assert_eq!(p.kind, PunishmentKind::Zoom);
        assert!(!p.punitive);
        assert_eq!(p.heading(0.0), "You chose work. Enjoy 5s of it.");
        d.tick(4999.0);
        assert_eq!(d.stage(), Stage::Zoom);
        d.tick(5000.0);
        assert!(d.punishment().is_none());
        assert_eq!(d.stage(), Stage::WordleDone);
    }

    #[test]
    fn newer_delayed_stage_replaces_older() {
        let mut d = director();
        d.delay_stage(Stage::Zoom, 3000.0, 0.0);
        d.delay_stage(Stage::Teams, 100.0, 0.0);
        assert_eq!(d.pending_timers(), 1);
        d.tick(100.0);
        assert_eq!(d.stage(), Stage::Teams);
        d.tick(5000.0);
        assert_eq!(d.stage(), Stage::Teams);
    }
}
