//! Performance meter: one bounded integer that decides how the job ends.
//!
//! Negative values point toward FIRED (the player is successfully slacking),
//! positive values toward PROMOTED (the player accidentally did work).

pub const METER_MIN: i32 = -100;
pub const METER_MAX: i32 = 100;

/// Terminal outcome of the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Fired,
    Promoted,
}

/// Coarse status shown under the gauge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeterStatus {
    Critical,
    Neutral,
    Excellent,
}

impl MeterStatus {
    pub fn label(self) -> &'static str {
        match self {
            MeterStatus::Critical => "CRITICAL",
            MeterStatus::Neutral => "NEUTRAL",
            MeterStatus::Excellent => "EXCELLENT",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MeterStatus::Critical => "hsl(0, 70%, 50%)",
            MeterStatus::Neutral => "hsl(45, 90%, 50%)",
            MeterStatus::Excellent => "hsl(120, 60%, 40%)",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerformanceMeter {
    value: i32,
}

impl PerformanceMeter {
    pub fn new() -> Self {
        Self { value: 0 }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Move the meter by `delta`, clamping to the gauge. Hitting either end
    /// decides the game on the spot.
    pub fn nudge(&mut self, delta: i32) -> Option<Verdict> {
        self.value = (self.value + delta).clamp(METER_MIN, METER_MAX);
        match self.value {
            METER_MAX => Some(Verdict::Promoted),
            METER_MIN => Some(Verdict::Fired),
            _ => None,
        }
    }

    /// Softer end check used between minigames once a full loop has been played.
    pub fn verdict_at_cutoff(&self, cutoff: i32) -> Option<Verdict> {
        if self.value <= -cutoff {
            Some(Verdict::Fired)
        } else if self.value >= cutoff {
            Some(Verdict::Promoted)
        } else {
            None
        }
    }

    pub fn status(&self) -> MeterStatus {
        if self.value <= -11 {
            MeterStatus::Critical
        } else if self.value <= 11 {
            MeterStatus::Neutral
        } else {
            MeterStatus::Excellent
        }
    }

    /// Needle angle in degrees: 180 at FIRED, 90 upright, 0 at PROMOTED.
    pub fn needle_angle_deg(&self) -> f64 {
        90.0 - (self.value as f64 / 100.0) * 90.0
    }

    pub fn signed_label(&self) -> String {
        if self.value > 0 {
            format!("+{}", self.value)
        } else {
            self.value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudge_clamps_and_reports_terminal_ends() {
        let mut m = PerformanceMeter::new();
        assert_eq!(m.nudge(-30), None);
        assert_eq!(m.value(), -30);
        assert_eq!(m.nudge(-200), Some(Verdict::Fired));
        assert_eq!(m.value(), METER_MIN);
        assert_eq!(m.nudge(500), Some(Verdict::Promoted));
        assert_eq!(m.value(), METER_MAX);
    }

    #[test]
    fn cutoff_is_inclusive_on_both_sides() {
        let mut m = PerformanceMeter::new();
        m.nudge(-9);
        assert_eq!(m.verdict_at_cutoff(9), Some(Verdict::Fired));
        m.nudge(17);
        assert_eq!(m.verdict_at_cutoff(9), None);
        m.nudge(1);
        assert_eq!(m.verdict_at_cutoff(9), Some(Verdict::Promoted));
    }

    #[test]
    fn status_bands_and_needle() {
        let mut m = PerformanceMeter::new();
        assert_eq!(m.status(), MeterStatus::Neutral);
        assert!((m.needle_angle_deg() - 90.0).abs() < 1e-9);
        m.nudge(-11);
        assert_eq!(m.status(), MeterStatus::Critical);
        m.nudge(23);
        assert_eq!(m.status(), MeterStatus::Excellent);
        assert_eq!(m.signed_label(), "+12");
        m.nudge(88);
        assert!(m.needle_angle_deg().abs() < 1e-9);
    }
}
