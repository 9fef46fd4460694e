//! Boss Baby popup: typewriter message, dismiss button, optional alternative
//! button and optional auto-advance.

use crate::stage::Stage;

/// What happens when the dialog goes away, in place of jumping to `next`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    /// Start a punishment overlay themed on `game`, then continue at `next`.
    Punish { next: Stage, game: Stage },
}

/// Secondary button shown next to the dismiss button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AltButton {
    pub label: &'static str,
    pub target: Stage,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BossDialog {
    pub message: String,
    pub next: Stage,
    pub follow_up: Option<FollowUp>,
    pub alt: Option<AltButton>,
    /// Dismiss automatically this long after the message is fully typed.
    pub auto_advance_ms: Option<f64>,
    opened_ms: f64,
    ms_per_char: f64,
}

impl BossDialog {
    pub fn new(message: impl Into<String>, next: Stage, now: f64, ms_per_char: f64) -> Self {
        Self {
            message: message.into(),
            next,
            follow_up: None,
            alt: None,
            auto_advance_ms: None,
            opened_ms: now,
            ms_per_char,
        }
    }

    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }

    pub fn with_alt(mut self, alt: AltButton) -> Self {
        self.alt = Some(alt);
        self
    }

    pub fn with_auto_advance(mut self, delay_ms: f64) -> Self {
        self.auto_advance_ms = Some(delay_ms);
        self
    }

    fn char_count(&self) -> usize {
        self.message.chars().count()
    }

    fn typed_chars(&self, now: f64) -> usize {
        if self.ms_per_char <= 0.0 {
            return self.char_count();
        }
        let n = ((now - self.opened_ms) / self.ms_per_char).floor().max(0.0) as usize;
        n.min(self.char_count())
    }

    /// Prefix of the message revealed so far.
    pub fn visible_text(&self, now: f64) -> &str {
        let n = self.typed_chars(now);
        match self.message.char_indices().nth(n) {
            Some((byte_idx, _)) => &self.message[..byte_idx],
            None => &self.message,
        }
    }

    pub fn fully_typed(&self, now: f64) -> bool {
        self.typed_chars(now) >= self.char_count()
    }

    fn typed_at_ms(&self) -> f64 {
        self.opened_ms + self.char_count() as f64 * self.ms_per_char.max(0.0)
    }

    /// Buttons appear once typing finishes, unless the dialog auto-advances.
    pub fn shows_buttons(&self, now: f64) -> bool {
        self.auto_advance_ms.is_none() && self.fully_typed(now)
    }

    pub fn auto_advance_due(&self, now: f64) -> bool {
        match self.auto_advance_ms {
            Some(delay) => !self.message.is_empty() && now >= self.typed_at_ms() + delay,
            None => false,
        }
    }

    pub fn dismiss_label(&self) -> &'static str {
        let lower = self.message.to_lowercase();
        if lower.contains("email") || lower.contains("outlook") {
            "AGH, no..."
        } else {
            "AGH, fine..."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typewriter_reveals_one_char_per_tick() {
        let d = BossDialog::new("Héllo", Stage::Zoom, 1000.0, 25.0);
        assert_eq!(d.visible_text(1000.0), "");
        assert_eq!(d.visible_text(1050.0), "Hé");
        assert!(!d.fully_typed(1100.0));
        assert_eq!(d.visible_text(1125.0), "Héllo");
        assert!(d.fully_typed(1125.0));
        assert!(d.shows_buttons(1125.0));
    }

    #[test]
    fn auto_advance_waits_for_typing_then_delay() {
        let d = BossDialog::new("abcd", Stage::PongDone, 0.0, 25.0).with_auto_advance(1500.0);
        assert!(!d.shows_buttons(10_000.0));
        assert!(!d.auto_advance_due(1599.0));
        assert!(d.auto_advance_due(1600.0));
    }

    #[test]
    fn dismiss_label_depends_on_message() {
        let email = BossDialog::new("Check your Emails!", Stage::Pacman, 0.0, 25.0);
        assert_eq!(email.dismiss_label(), "AGH, no...");
        let other = BossDialog::new("Decode this!", Stage::Wordle, 0.0, 25.0);
        assert_eq!(other.dismiss_label(), "AGH, fine...");
    }
}
