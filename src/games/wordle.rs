//! Corporate Jargon Decoder: guess the 5-letter buzzword in 6 tries.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use rand::rngs::SmallRng;

use super::{Minigame, Outcome};
use crate::{BUZZWORDS, VALID_WORDS};

pub const WORD_LEN: usize = 5;
pub const MAX_GUESSES: usize = 6;
const INVALID_FLASH_MS: f64 = 1500.0;

pub const KEYBOARD_ROWS: [&[&str]; 3] = [
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L"],
    &["ENTER", "Z", "X", "C", "V", "B", "N", "M", "⌫"],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LetterState {
    Absent,
    Present,
    Correct,
}

impl LetterState {
    pub fn css_class(self) -> &'static str {
        match self {
            LetterState::Correct => "tile-correct",
            LetterState::Present => "tile-present",
            LetterState::Absent => "tile-absent",
        }
    }
}

/// Colour one guess against the target: exact matches first, then
/// present letters limited by how often they remain in the target.
pub fn score_guess(guess: &str, target: &str) -> [LetterState; WORD_LEN] {
    let g: Vec<char> = guess.chars().collect();
    let t: Vec<char> = target.chars().collect();
    let mut result = [LetterState::Absent; WORD_LEN];
    let mut remaining: BTreeMap<char, usize> = BTreeMap::new();
    for &c in &t {
        *remaining.entry(c).or_default() += 1;
    }
    for i in 0..WORD_LEN.min(g.len()).min(t.len()) {
        if g[i] == t[i] {
            result[i] = LetterState::Correct;
            if let Some(n) = remaining.get_mut(&g[i]) {
                *n -= 1;
            }
        }
    }
    for i in 0..WORD_LEN.min(g.len()) {
        if result[i] == LetterState::Correct {
            continue;
        }
        if let Some(n) = remaining.get_mut(&g[i]) {
            if *n > 0 {
                result[i] = LetterState::Present;
                *n -= 1;
            }
        }
    }
    result
}

fn is_dictionary_word(word: &str) -> bool {
    word.len() == WORD_LEN && word.chars().all(|c| c.is_ascii_uppercase())
}

/// Parse a newline-separated word list, keeping 5-letter alphabetic words.
pub fn parse_dictionary(text: &str) -> Vec<String> {
    text.lines()
        .map(|w| w.trim().to_ascii_uppercase())
        .filter(|w| is_dictionary_word(w))
        .collect()
}

pub struct WordleGame {
    target: &'static str,
    guesses: Vec<String>,
    current: String,
    done: bool,
    error_ms_left: f64,
    valid: HashSet<String>,
    letter_states: BTreeMap<char, LetterState>,
    pending: Option<Outcome>,
}

impl WordleGame {
    pub fn new(rng: &mut SmallRng, extra_words: &[String]) -> Self {
        let target = BUZZWORDS[rng.gen_range(0..BUZZWORDS.len())];
        Self::with_target(target, extra_words)
    }

    pub fn with_target(target: &'static str, extra_words: &[String]) -> Self {
        let mut valid: HashSet<String> = VALID_WORDS.iter().map(|w| w.to_string()).collect();
        valid.insert(target.to_string());
        let mut game = Self {
            target,
            guesses: Vec::new(),
            current: String::new(),
            done: false,
            error_ms_left: 0.0,
            valid,
            letter_states: BTreeMap::new(),
            pending: None,
        };
        game.merge_dictionary(extra_words);
        game
    }

    pub fn merge_dictionary(&mut self, words: &[String]) {
        for w in words {
            let upper = w.trim().to_ascii_uppercase();
            if is_dictionary_word(&upper) {
                self.valid.insert(upper);
            }
        }
    }

    pub fn target(&self) -> &str {
        self.target
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn error(&self) -> Option<&'static str> {
        (self.error_ms_left > 0.0).then_some("Not a valid word!")
    }

    /// The answer is revealed once the player runs out of guesses.
    pub fn revealed_answer(&self) -> Option<&str> {
        let solved = self.guesses.last().map(|g| g == self.target).unwrap_or(false);
        (self.done && !solved).then_some(self.target)
    }

    pub fn key_state(&self, letter: char) -> Option<LetterState> {
        self.letter_states.get(&letter).copied()
    }

    pub fn row_states(&self, row: usize) -> Option<[LetterState; WORD_LEN]> {
        self.guesses.get(row).map(|g| score_guess(g, self.target))
    }

    fn update_letter_states(&mut self, word: &str) {
        let t: Vec<char> = self.target.chars().collect();
        for (i, c) in word.chars().enumerate() {
            let state = if t.get(i) == Some(&c) {
                LetterState::Correct
            } else if t.contains(&c) {
                LetterState::Present
            } else {
                LetterState::Absent
            };
            let entry = self.letter_states.entry(c).or_insert(state);
            if state > *entry {
                *entry = state;
            }
        }
    }

    fn submit(&mut self) {
        if self.done || self.current.len() != WORD_LEN {
            return;
        }
        let word = self.current.to_ascii_uppercase();
        if !self.valid.contains(&word) {
            self.error_ms_left = INVALID_FLASH_MS;
            return;
        }
        self.current.clear();
        self.update_letter_states(&word);
        let solved = word == self.target;
        self.guesses.push(word);
        if solved {
            self.done = true;
            self.pending = Some(Outcome::Decoded {
                guesses: self.guesses.len() as u8,
            });
        } else if self.guesses.len() >= MAX_GUESSES {
            self.done = true;
            self.pending = Some(Outcome::Lost);
        }
    }
}

impl Minigame for WordleGame {
    fn key_down(&mut self, key: &str) {
        if self.done {
            return;
        }
        match key {
            "Enter" | "ENTER" => self.submit(),
            "Backspace" | "⌫" => {
                self.current.pop();
            }
            _ => {
                let mut chars = key.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    if c.is_ascii_alphabetic() && self.current.len() < WORD_LEN {
                        self.current.push(c.to_ascii_uppercase());
                    }
                }
            }
        }
    }

    fn advance(&mut self, dt_ms: f64, _rng: &mut SmallRng) -> Option<Outcome> {
        if self.error_ms_left > 0.0 {
            self.error_ms_left = (self.error_ms_left - dt_ms.max(0.0)).max(0.0);
        }
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn type_word(g: &mut WordleGame, word: &str) {
        for c in word.chars() {
            g.key_down(&c.to_string());
        }
        g.key_down("Enter");
    }

    #[test]
    fn scoring_handles_repeated_letters() {
        use LetterState::*;
        assert_eq!(
            score_guess("SYNCS", "SCRUM"),
            [Correct, Absent, Absent, Present, Absent]
        );
        assert_eq!(
            score_guess("AGILE", "AGILE"),
            [Correct, Correct, Correct, Correct, Correct]
        );
        assert_eq!(
            score_guess("LEAPS", "SLACK"),
            [Present, Absent, Correct, Absent, Present]
        );
    }

    #[test]
    fn decoded_reports_guess_count() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut g = WordleGame::with_target("PIVOT", &[]);
        type_word(&mut g, "AGILE");
        assert_eq!(g.advance(16.0, &mut rng), None);
        type_word(&mut g, "pivot");
        assert_eq!(g.advance(16.0, &mut rng), Some(Outcome::Decoded { guesses: 2 }));
        assert!(g.done());
        assert_eq!(g.revealed_answer(), None);
        assert_eq!(g.key_state('P'), Some(LetterState::Correct));
        assert_eq!(g.key_state('G'), Some(LetterState::Absent));
    }

    #[test]
    fn invalid_word_flashes_and_is_not_counted() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut g = WordleGame::with_target("PIVOT", &[]);
        type_word(&mut g, "ZZZZZ");
        assert_eq!(g.guesses().len(), 0);
        assert_eq!(g.error(), Some("Not a valid word!"));
        assert_eq!(g.current(), "ZZZZZ");
        g.advance(1600.0, &mut rng);
        assert_eq!(g.error(), None);
    }

    #[test]
    fn six_misses_lose_and_reveal() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut g = WordleGame::with_target("TREND", &[]);
        for w in ["AGILE", "PIVOT", "SCRUM", "EPICS", "SLACK", "STAND"] {
            type_word(&mut g, w);
        }
        assert_eq!(g.advance(16.0, &mut rng), Some(Outcome::Lost));
        assert_eq!(g.revealed_answer(), Some("TREND"));
        g.key_down("A");
        assert_eq!(g.current(), "");
    }

    #[test]
    fn dictionary_merge_filters_words() {
        let words = parse_dictionary("hello\r\nab\nWORLD \nfo0ba\n");
        assert_eq!(words, vec!["HELLO".to_string(), "WORLD".to_string()]);
        let mut g = WordleGame::with_target("PIVOT", &words);
        type_word(&mut g, "HELLO");
        assert_eq!(g.guesses().len(), 1);
    }

    #[test]
    fn typing_caps_at_five_letters() {
        let mut g = WordleGame::with_target("PIVOT", &[]);
        for c in ["a", "b", "c", "d", "e", "f", "Shift"] {
            g.key_down(c);
        }
        assert_eq!(g.current(), "ABCDE");
        g.key_down("⌫");
        assert_eq!(g.current(), "ABCD");
    }

    #[test]
    fn correct_keys_are_never_downgraded() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut g = WordleGame::with_target("TREND", &[]);
        type_word(&mut g, "TRACK");
        g.advance(16.0, &mut rng);
        assert_eq!(g.key_state('T'), Some(LetterState::Correct));
        assert_eq!(g.key_state('R'), Some(LetterState::Correct));
        type_word(&mut g, "SHIFT");
        g.advance(16.0, &mut rng);
        type_word(&mut g, "SHARE");
        g.advance(16.0, &mut rng);
        assert_eq!(g.guesses().len(), 3);
        assert_eq!(g.key_state('T'), Some(LetterState::Correct));
        assert_eq!(g.key_state('R'), Some(LetterState::Correct));
        assert_eq!(g.key_state('E'), Some(LetterState::Present));
    }
}
