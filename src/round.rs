use crate::config::DifficultySettings;
use crate::words::WordEntry;
use std::collections::HashSet;

/// Phase of a single round. Terminal phases freeze all further events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Won,
    Lost,
}

/// Terminal result of a round, handed to the session controller for scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    Won {
        wrong_guesses: u32,
        time_left: u32,
        hint1_used: bool,
        hint2_used: bool,
    },
    Lost {
        wrong_guesses: u32,
        time_left: u32,
    },
}

impl RoundOutcome {
    pub fn is_won(&self) -> bool {
        matches!(self, RoundOutcome::Won { .. })
    }

    /// A loss with the clock at zero; losses by wrong guesses keep time_left > 0.
    pub fn timed_out(&self) -> bool {
        matches!(self, RoundOutcome::Lost { time_left: 0, .. })
    }
}

/// One word-guessing attempt: guessed letters, wrong-guess budget, countdown,
/// and the two-stage hints. Drives `Idle -> Active -> Won | Lost`.
///
/// Every event is a no-op outside `Active`, so stray key presses or timer
/// ticks after the round resolves cannot corrupt the outcome.
#[derive(Debug, Clone)]
pub struct Round {
    entry: WordEntry,
    guessed: HashSet<char>,
    wrong_guesses: u32,
    time_left: u32,
    time_per_question: u32,
    max_wrong_guesses: u32,
    hint1_used: bool,
    hint2_used: bool,
    hint1_shown: bool,
    hint2_shown: bool,
    phase: Phase,
}

impl Round {
    pub fn new(entry: WordEntry, settings: &DifficultySettings) -> Self {
        Self {
            entry,
            guessed: HashSet::new(),
            wrong_guesses: 0,
            time_left: settings.time_per_question,
            time_per_question: settings.time_per_question,
            max_wrong_guesses: settings.max_wrong_guesses,
            hint1_used: false,
            hint2_used: false,
            hint1_shown: false,
            hint2_shown: false,
            phase: Phase::Idle,
        }
    }

    /// Explicit `Idle -> Active` transition, resetting all per-round state.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.guessed.clear();
        self.wrong_guesses = 0;
        self.time_left = self.time_per_question;
        self.hint1_used = false;
        self.hint2_used = false;
        self.hint1_shown = false;
        self.hint2_shown = false;
        self.phase = Phase::Active;
    }

    /// Apply a letter guess. Non A-Z input and repeated letters are ignored.
    pub fn guess(&mut self, letter: char) {
        if self.phase != Phase::Active {
            return;
        }
        let letter = letter.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return;
        }
        if !self.guessed.insert(letter) {
            return;
        }
        if !self.entry.word.contains(letter) {
            self.wrong_guesses += 1;
        }
        self.evaluate();
    }

    /// One-second timer tick. Floors the clock at zero.
    pub fn tick(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        self.evaluate();
    }

    /// Hint 1 is available once per round.
    pub fn reveal_hint1(&mut self) {
        if self.phase != Phase::Active || self.hint1_used {
            return;
        }
        self.hint1_used = true;
        self.hint1_shown = true;
    }

    /// Hint 2 requires hint 1 to have been taken first.
    pub fn reveal_hint2(&mut self) {
        if self.phase != Phase::Active || self.hint2_used || !self.hint1_used {
            return;
        }
        self.hint2_used = true;
        self.hint2_shown = true;
    }

    // The win check runs before the loss check: a correct final guess on the
    // same instant the clock hits zero still resolves as a win.
    fn evaluate(&mut self) {
        if self.is_complete() {
            self.phase = Phase::Won;
        } else if self.wrong_guesses >= self.max_wrong_guesses || self.time_left == 0 {
            self.phase = Phase::Lost;
        }
    }

    /// Complete when every non-space character of the word has been guessed.
    pub fn is_complete(&self) -> bool {
        self.entry
            .word
            .chars()
            .all(|c| c == ' ' || self.guessed.contains(&c))
    }

    /// Word with unguessed letters masked out, spaces preserved.
    pub fn masked_word(&self) -> String {
        self.entry
            .word
            .chars()
            .map(|c| {
                if c == ' ' || self.guessed.contains(&c) {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            Phase::Won => Some(RoundOutcome::Won {
                wrong_guesses: self.wrong_guesses,
                time_left: self.time_left,
                hint1_used: self.hint1_used,
                hint2_used: self.hint2_used,
            }),
            Phase::Lost => Some(RoundOutcome::Lost {
                wrong_guesses: self.wrong_guesses,
                time_left: self.time_left,
            }),
            Phase::Idle | Phase::Active => None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn word(&self) -> &str {
        &self.entry.word
    }

    pub fn hint1(&self) -> &str {
        &self.entry.hints[0]
    }

    pub fn hint2(&self) -> &str {
        &self.entry.hints[1]
    }

    pub fn guessed(&self) -> &HashSet<char> {
        &self.guessed
    }

    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    pub fn max_wrong_guesses(&self) -> u32 {
        self.max_wrong_guesses
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn time_per_question(&self) -> u32 {
        self.time_per_question
    }

    pub fn hint1_used(&self) -> bool {
        self.hint1_used
    }

    pub fn hint2_used(&self) -> bool {
        self.hint2_used
    }

    pub fn hint1_shown(&self) -> bool {
        self.hint1_shown
    }

    pub fn hint2_shown(&self) -> bool {
        self.hint2_shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn settings(max_wrong_guesses: u32, time_per_question: u32) -> DifficultySettings {
        DifficultySettings {
            max_wrong_guesses,
            time_per_question,
            base_score: 100,
            time_bonus: true,
            time_bonus_multiplier: 1.0,
            difficulty_multiplier: 1.0,
            confetti_threshold: 600,
        }
    }

    fn round(word: &str) -> Round {
        let entry = WordEntry {
            word: word.to_string(),
            hints: ["first".to_string(), "second".to_string()],
        };
        let mut round = Round::new(entry, &settings(6, 30));
        round.start();
        round
    }

    #[test]
    fn test_new_round_is_idle_until_started() {
        let entry = WordEntry {
            word: "HI".to_string(),
            hints: ["a".to_string(), "b".to_string()],
        };
        let mut r = Round::new(entry, &settings(6, 30));
        assert_eq!(r.phase(), Phase::Idle);

        // Events before start are ignored.
        r.guess('H');
        r.tick();
        r.reveal_hint1();
        assert!(r.guessed().is_empty());
        assert_eq!(r.time_left(), 30);
        assert!(!r.hint1_used());

        r.start();
        assert_eq!(r.phase(), Phase::Active);
    }

    #[test]
    fn test_correct_guess_does_not_count_as_wrong() {
        let mut r = round("HELLO");
        r.guess('L');
        assert_eq!(r.wrong_guesses(), 0);
        assert!(r.guessed().contains(&'L'));
    }

    #[test]
    fn test_wrong_guess_increments_counter() {
        let mut r = round("HELLO");
        r.guess('Z');
        assert_eq!(r.wrong_guesses(), 1);
    }

    #[test]
    fn test_repeated_wrong_guess_counts_once() {
        let mut r = round("HELLO");
        r.guess('Z');
        r.guess('Z');
        assert_eq!(r.wrong_guesses(), 1);
        assert_eq!(r.guessed().len(), 1);
    }

    #[test]
    fn test_non_letter_input_is_ignored() {
        let mut r = round("HELLO");
        r.guess('1');
        r.guess('!');
        r.guess(' ');
        assert!(r.guessed().is_empty());
        assert_eq!(r.wrong_guesses(), 0);
    }

    #[test]
    fn test_lowercase_input_is_normalized() {
        let mut r = round("HI");
        r.guess('h');
        r.guess('i');
        assert_eq!(r.phase(), Phase::Won);
    }

    #[test]
    fn test_repeated_letter_in_word_needs_single_guess() {
        let mut r = round("LLAMA");
        r.guess('L');
        r.guess('A');
        r.guess('M');
        assert_eq!(r.phase(), Phase::Won);
    }

    #[test]
    fn test_word_with_space_completes_without_space_guess() {
        let mut r = round("ICE CREAM");
        for c in ['I', 'C', 'E', 'R', 'A'] {
            r.guess(c);
        }
        assert!(!r.is_complete());
        r.guess('M');
        assert!(r.is_complete());
        assert_eq!(r.phase(), Phase::Won);
    }

    #[test]
    fn test_masked_word_preserves_spaces() {
        let mut r = round("ICE CREAM");
        r.guess('C');
        r.guess('E');
        assert_eq!(r.masked_word(), "_CE C_E__");
    }

    #[test]
    fn test_loss_by_wrong_guesses() {
        let mut r = round("HELLO");
        for c in ['Q', 'Z', 'X', 'J', 'K', 'V'] {
            r.guess(c);
        }
        assert_eq!(r.phase(), Phase::Lost);
        assert_eq!(r.wrong_guesses(), r.max_wrong_guesses());
        assert_matches!(
            r.outcome(),
            Some(RoundOutcome::Lost { wrong_guesses: 6, time_left }) if time_left > 0
        );
    }

    #[test]
    fn test_loss_by_timeout() {
        let mut r = round("HELLO");
        for _ in 0..30 {
            r.tick();
        }
        assert_eq!(r.phase(), Phase::Lost);
        assert_eq!(r.time_left(), 0);
        assert!(r.outcome().unwrap().timed_out());
    }

    #[test]
    fn test_time_floors_at_zero() {
        let mut r = round("HELLO");
        for _ in 0..100 {
            r.tick();
        }
        assert_eq!(r.time_left(), 0);
    }

    #[test]
    fn test_win_on_final_tick_beats_timeout() {
        let mut r = round("HI");
        r.guess('H');
        for _ in 0..29 {
            r.tick();
        }
        assert_eq!(r.time_left(), 1);
        // The winning guess lands as the clock would hit zero.
        r.guess('I');
        assert_eq!(r.phase(), Phase::Won);
        assert_matches!(r.outcome(), Some(RoundOutcome::Won { .. }));
    }

    #[test]
    fn test_terminal_round_freezes_events() {
        let mut r = round("HI");
        r.guess('H');
        r.guess('I');
        assert_eq!(r.phase(), Phase::Won);

        let outcome = r.outcome();
        r.guess('Z');
        r.tick();
        r.reveal_hint1();
        assert_eq!(r.outcome(), outcome);
        assert_eq!(r.wrong_guesses(), 0);
        assert!(!r.hint1_used());
    }

    #[test]
    fn test_hint1_only_once() {
        let mut r = round("HELLO");
        r.reveal_hint1();
        assert!(r.hint1_used());
        assert!(r.hint1_shown());
        r.reveal_hint1();
        assert!(r.hint1_used());
    }

    #[test]
    fn test_hint2_requires_hint1() {
        let mut r = round("HELLO");
        r.reveal_hint2();
        assert!(!r.hint2_used());
        assert!(!r.hint2_shown());

        r.reveal_hint1();
        r.reveal_hint2();
        assert!(r.hint2_used());
        assert!(r.hint2_shown());
    }

    #[test]
    fn test_outcome_carries_hint_flags() {
        let mut r = round("HI");
        r.reveal_hint1();
        r.guess('X');
        r.guess('H');
        r.guess('I');
        assert_matches!(
            r.outcome(),
            Some(RoundOutcome::Won {
                wrong_guesses: 1,
                hint1_used: true,
                hint2_used: false,
                ..
            })
        );
    }

    #[test]
    fn test_hint_text_accessors() {
        let r = round("HELLO");
        assert_eq!(r.hint1(), "first");
        assert_eq!(r.hint2(), "second");
    }
}
