//! Tunable timings and thresholds. Every field has a default so a page can
//! pass a partial JSON object (or nothing at all) to `start_game_with_config`.

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config field `{field}` out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Gap between a finished step and the next scripted stage.
    pub stage_delay_ms: f64,
    /// Gap before the "check your emails" boss after Wordle.
    pub second_delay_ms: f64,
    /// Gap before the sprint-on-fire boss once Jira opens.
    pub jira_boss_delay_ms: f64,
    /// Auto-advance delay for boss dialogs that lead into a punishment.
    pub boss_auto_advance_ms: f64,
    /// Typewriter speed of the boss dialog.
    pub boss_typing_ms_per_char: f64,
    pub punishment_seconds: u32,
    /// After the first loop, |meter| >= cutoff ends the game between minigames.
    pub meter_cutoff: i32,
    pub skip_tutorials: bool,
    pub pong_target_score: u32,
    pub tetris_survive_seconds: f64,
    /// Optional newline-separated dictionary merged into the Wordle word list.
    pub dictionary_url: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stage_delay_ms: 3000.0,
            second_delay_ms: 3000.0,
            jira_boss_delay_ms: 1000.0,
            boss_auto_advance_ms: 1500.0,
            boss_typing_ms_per_char: 25.0,
            punishment_seconds: 5,
            meter_cutoff: 9,
            skip_tutorials: true,
            pong_target_score: 3,
            tetris_survive_seconds: 15.0,
            dictionary_url: Some("/words.txt".to_string()),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let delays = [
            ("stageDelayMs", self.stage_delay_ms),
            ("secondDelayMs", self.second_delay_ms),
            ("jiraBossDelayMs", self.jira_boss_delay_ms),
            ("bossAutoAdvanceMs", self.boss_auto_advance_ms),
            ("bossTypingMsPerChar", self.boss_typing_ms_per_char),
        ];
        for (field, v) in delays {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::OutOfRange {
                    field,
                    reason: "must be a finite, non-negative number of milliseconds",
                });
            }
        }
        if self.punishment_seconds == 0 {
            return Err(ConfigError::OutOfRange {
                field: "punishmentSeconds",
                reason: "must be at least 1",
            });
        }
        if !(1..=100).contains(&self.meter_cutoff) {
            return Err(ConfigError::OutOfRange {
                field: "meterCutoff",
                reason: "must be within 1..=100",
            });
        }
        if self.pong_target_score == 0 {
            return Err(ConfigError::OutOfRange {
                field: "pongTargetScore",
                reason: "must be at least 1",
            });
        }
        if !self.tetris_survive_seconds.is_finite() || self.tetris_survive_seconds <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "tetrisSurviveSeconds",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{"stageDelayMs": 500, "skipTutorials": false}"#)
            .expect("valid config");
        assert_eq!(cfg.stage_delay_ms, 500.0);
        assert!(!cfg.skip_tutorials);
        assert_eq!(cfg.meter_cutoff, 9);
        assert_eq!(cfg.dictionary_url.as_deref(), Some("/words.txt"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{"meterCutoff": 0}"#),
            Err(ConfigError::OutOfRange { field: "meterCutoff", .. })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"stageDelayMs": -1}"#),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }
}
