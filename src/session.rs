use std::time::{Duration, Instant};

use crate::compare::{classify, correct_word_count, WordState};
use crate::metrics::{self, compute_result, TestResult};
use crate::samples::Difficulty;
use crate::test_run::{RunStatus, TestRun};
use crate::tokenize::{SampleText, TypedInput};

/// Provisional numbers shown while a test is running
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveStats {
    pub elapsed_secs: f64,
    pub wpm: u32,
    pub accuracy: f64,
}

/// All state of one typing test, threaded through every handler
#[derive(Debug, Clone)]
pub struct TypingTest {
    difficulty: Difficulty,
    sample: SampleText,
    buffer: String,
    typed: TypedInput,
    word_states: Vec<WordState>,
    run: TestRun,
    accepting_input: bool,
    result: Option<TestResult>,
}

impl TypingTest {
    pub fn new(difficulty: Difficulty, text: &str) -> Self {
        let sample = SampleText::new(text);
        let word_states = vec![WordState::Pending; sample.len()];

        Self {
            difficulty,
            sample,
            buffer: String::new(),
            typed: TypedInput::default(),
            word_states,
            run: TestRun::new(),
            accepting_input: false,
            result: None,
        }
    }

    /// Swap in a new sentence and go back to idle
    pub fn replace_sample(&mut self, difficulty: Difficulty, text: &str) {
        *self = Self::new(difficulty, text);
    }

    /// Start (or restart) timing and open the input gate with an empty buffer
    pub fn start(&mut self, now: Instant) {
        self.run.start(now);
        self.clear_input();
        self.result = None;
        self.accepting_input = true;
    }

    /// Stop timing, close the input gate and compute the result.
    /// Does nothing unless the test is running.
    pub fn stop(&mut self, now: Instant) -> Option<TestResult> {
        if !self.run.stop(now) {
            return None;
        }

        self.accepting_input = false;
        self.commit_last_word();
        self.result = compute_result(&self.run, self.correct_word_count());
        self.result
    }

    pub fn reset(&mut self) {
        self.run.reset();
        self.clear_input();
        self.result = None;
        self.accepting_input = false;
    }

    /// Feed the current raw buffer. Ignored while the input gate is closed.
    pub fn update_input(&mut self, buffer: &str) -> bool {
        if !self.accepting_input {
            return false;
        }

        self.buffer = buffer.to_owned();
        self.refresh_states();
        true
    }

    pub fn live_stats(&self, now: Instant) -> Option<LiveStats> {
        if !self.run.is_running() {
            return None;
        }

        let elapsed_secs = self.elapsed(now)?.as_secs_f64();
        Some(LiveStats {
            elapsed_secs,
            wpm: metrics::wpm(self.correct_word_count(), elapsed_secs),
            accuracy: metrics::word_accuracy(&self.word_states),
        })
    }

    pub fn correct_word_count(&self) -> usize {
        correct_word_count(self.sample.words(), &self.typed.words)
    }

    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.run.elapsed(now)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn sample(&self) -> &SampleText {
        &self.sample
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn typed(&self) -> &TypedInput {
        &self.typed
    }

    pub fn word_states(&self) -> &[WordState] {
        &self.word_states
    }

    pub fn run(&self) -> &TestRun {
        &self.run
    }

    pub fn status(&self) -> RunStatus {
        self.run.status()
    }

    pub fn accepts_input(&self) -> bool {
        self.accepting_input
    }

    pub fn result(&self) -> Option<&TestResult> {
        self.result.as_ref()
    }

    fn clear_input(&mut self) {
        self.buffer.clear();
        self.refresh_states();
    }

    /// No more input is coming, so the trailing word is judged as final.
    fn commit_last_word(&mut self) {
        self.typed = TypedInput::from_buffer(&self.buffer);
        self.typed.last_word_complete = true;
        self.word_states = classify(self.sample.words(), &self.typed.words, true);
    }

    fn refresh_states(&mut self) {
        self.typed = TypedInput::from_buffer(&self.buffer);
        self.word_states = classify(
            self.sample.words(),
            &self.typed.words,
            self.typed.last_word_complete,
        );
    }
}
