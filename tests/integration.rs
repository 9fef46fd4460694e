// Integration tests (native) for the `office-simulator` crate.
// They drive the director and the games through the public API only, with
// hand-picked timestamps instead of a browser clock.

use office_simulator::flow::{Director, Event, Notice};
use office_simulator::games::{Minigame, Outcome, WordleGame};
use office_simulator::punishment::PunishmentKind;
use office_simulator::{GameConfig, Stage};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn fast_config() -> GameConfig {
    GameConfig::from_json(r#"{"stageDelayMs": 100, "secondDelayMs": 200, "bossTypingMsPerChar": 0}"#)
        .expect("valid config")
}

#[test]
fn partial_json_config_keeps_defaults() {
    let cfg = fast_config();
    assert_eq!(cfg.stage_delay_ms, 100.0);
    assert_eq!(cfg.punishment_seconds, 5);
    assert!(cfg.skip_tutorials);
    assert!(GameConfig::from_json(r#"{"meterCutoff": 0}"#).is_err());
    assert!(GameConfig::from_json("not json").is_err());
}

#[test]
fn slacking_through_the_morning_gets_you_fired() {
    let mut d = Director::new(fast_config());
    d.handle(Event::IntroStart, 0.0);
    d.tick(100.0);
    assert_eq!(d.stage(), Stage::Teams);

    d.handle(Event::TeamsClose, 100.0);
    d.handle(Event::BossDismiss, 110.0);
    assert_eq!(d.stage(), Stage::Pingpong);
    d.handle(Event::GameOver(Outcome::Won), 200.0);
    d.handle(Event::BossDismiss, 210.0);
    d.tick(310.0);
    assert_eq!(d.stage(), Stage::Zoom);

    d.handle(Event::ZoomDecline, 320.0);
    d.handle(Event::BossDismiss, 330.0);
    assert_eq!(d.stage(), Stage::Wordle);

    // Play the real decoder to produce the outcome.
    let mut rng = SmallRng::seed_from_u64(42);
    let mut wordle = WordleGame::with_target("SCRUM", &[]);
    for key in ["S", "C", "R", "U", "M", "Enter"] {
        wordle.key_down(key);
    }
    let outcome = wordle.advance(16.0, &mut rng).expect("solved");
    assert_eq!(outcome, Outcome::Decoded { guesses: 1 });
    d.handle(Event::GameOver(outcome), 400.0);
    d.handle(Event::BossDismiss, 410.0);
    assert_eq!(d.stage(), Stage::WordleDone);
    assert_eq!(d.meter().value(), -70);

    d.tick(610.0);
    assert!(d.boss().is_some());
    d.handle(Event::BossDismiss, 620.0);
    assert_eq!(d.stage(), Stage::Pacman);
    d.handle(Event::GameOver(Outcome::Won), 700.0);
    assert_eq!(d.stage(), Stage::Fired);

    let notices = d.drain_notices();
    assert!(notices.contains(&Notice::StageChanged {
        from: Stage::Pacman,
        to: Stage::Fired
    }));
}

#[test]
fn working_hard_gets_you_promoted() {
    let mut d = Director::new(fast_config());
    d.handle(Event::IntroStart, 0.0);
    d.tick(100.0);
    d.handle(Event::TeamsJoin, 100.0);
    assert_eq!(d.punishment().map(|p| p.kind), Some(PunishmentKind::Teams));
    // Inputs are ignored while the overlay runs.
    d.handle(Event::TeamsClose, 200.0);
    assert!(d.boss().is_none());
    d.tick(5_100.0);
    assert_eq!(d.stage(), Stage::PongDone);
    d.tick(5_200.0);
    d.handle(Event::ZoomJoin, 5_200.0);
    d.tick(10_200.0);
    assert_eq!(d.stage(), Stage::WordleDone);
    assert_eq!(d.meter().value(), 30);

    // Pacman lost, then tetris topped out.
    d.tick(10_400.0);
    d.handle(Event::BossDismiss, 10_400.0);
    d.handle(Event::GameOver(Outcome::Lost), 10_500.0);
    d.tick(10_500.0 + 1_500.0);
    assert_eq!(d.punishment().map(|p| p.kind), Some(PunishmentKind::Email));
    d.tick(17_000.0);
    assert_eq!(d.stage(), Stage::PacmanDone);
    d.tick(17_100.0);
    assert_eq!(d.stage(), Stage::Jira);
    d.tick(18_100.0);
    d.handle(Event::BossDismiss, 18_100.0);
    assert_eq!(d.stage(), Stage::Tetris);
    d.handle(Event::GameOver(Outcome::Lost), 18_200.0);
    d.handle(Event::BossDismiss, 18_300.0);
    assert_eq!(d.stage(), Stage::Promoted);

    d.handle(Event::Restart, 19_000.0);
    assert_eq!(d.stage(), Stage::Intro);
    assert_eq!(d.meter().value(), 0);
}

#[test]
fn stage_names_round_trip() {
    for &stage in Stage::all() {
        assert_eq!(stage.as_str().parse::<Stage>(), Ok(stage));
    }
    assert!("coffee-break".parse::<Stage>().is_err());
}
