use std::time::Instant;

use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};

use crate::command::Command;
use crate::compare::WordState;
use crate::metrics::TestResult;
use crate::samples::{Difficulty, SampleBank};
use crate::session::TypingTest;
use crate::tokenize::SampleText;

/// Where the controller publishes feedback. Rendering is up to the implementor.
pub trait DisplaySurface {
    fn show_sample(&mut self, sample: &SampleText, states: &[WordState]);
    fn show_difficulty(&mut self, difficulty: Difficulty);
    fn show_stats(&mut self, elapsed_secs: f64, wpm: u32);
    fn clear_stats(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reacts to user commands by driving the [`TypingTest`] and publishing the
/// outcome. Without a display every publish is skipped.
pub struct Controller<D, R = ThreadRng> {
    test: TypingTest,
    bank: SampleBank,
    display: Option<D>,
    rng: R,
}

impl<D: DisplaySurface> Controller<D> {
    pub fn with_thread_rng(bank: SampleBank, difficulty: Difficulty, display: Option<D>) -> Self {
        Self::new(bank, difficulty, display, rand::thread_rng())
    }
}

impl<D: DisplaySurface, R: Rng> Controller<D, R> {
    pub fn new(bank: SampleBank, difficulty: Difficulty, display: Option<D>, mut rng: R) -> Self {
        let test = TypingTest::new(difficulty, bank.random_text(difficulty, &mut rng));
        let mut controller = Self {
            test,
            bank,
            display,
            rng,
        };
        controller.publish_all();
        controller
    }

    pub fn test(&self) -> &TypingTest {
        &self.test
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }

    pub fn handle(&mut self, command: Command, now: Instant) -> Flow {
        match command {
            Command::Start => self.start(now),
            Command::Stop => {
                self.stop(now);
            }
            Command::Retry => self.retry(),
            Command::SelectDifficulty(difficulty) => self.select_difficulty(difficulty),
            Command::Type(c) => {
                let mut buffer = self.test.buffer().to_owned();
                buffer.push(c);
                self.input_changed(&buffer);
            }
            Command::Backspace => {
                let mut buffer = self.test.buffer().to_owned();
                if buffer.pop().is_some() {
                    self.input_changed(&buffer);
                }
            }
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        info!("difficulty changed to: {difficulty}");
        self.load_sample(difficulty);
    }

    pub fn start(&mut self, now: Instant) {
        if self.test.run().is_running() {
            info!("restarting running test");
        } else {
            info!("test started ({})", self.test.difficulty());
        }

        self.test.start(now);
        self.publish_sample();
        if let Some(display) = self.display.as_mut() {
            display.show_stats(0.0, 0);
        }
    }

    pub fn stop(&mut self, now: Instant) -> Option<TestResult> {
        let Some(result) = self.test.stop(now) else {
            debug!("stop ignored while {:?}", self.test.status());
            return None;
        };

        info!(
            "test stopped: {} correct words in {:.2}s, {} wpm",
            result.correct_word_count, result.elapsed_secs, result.wpm
        );
        self.publish_sample();
        if let Some(display) = self.display.as_mut() {
            display.show_stats(result.elapsed_secs, result.wpm);
        }
        Some(result)
    }

    /// Back to idle with a fresh sentence of the current difficulty
    pub fn retry(&mut self) {
        info!("retry");
        self.load_sample(self.test.difficulty());
    }

    pub fn input_changed(&mut self, buffer: &str) -> bool {
        if !self.test.update_input(buffer) {
            debug!("input ignored while {:?}", self.test.status());
            return false;
        }

        debug!("input changed: {buffer:?}");
        self.publish_sample();
        true
    }

    /// Refresh the running clock on the display. Has no effect on the test itself.
    pub fn tick(&mut self, now: Instant) {
        let Some(stats) = self.test.live_stats(now) else {
            return;
        };

        if let Some(display) = self.display.as_mut() {
            display.show_stats(stats.elapsed_secs, stats.wpm);
        }
    }

    fn load_sample(&mut self, difficulty: Difficulty) {
        let text = self.bank.random_text(difficulty, &mut self.rng).to_owned();
        self.test.replace_sample(difficulty, &text);
        self.publish_all();
    }

    fn publish_sample(&mut self) {
        if let Some(display) = self.display.as_mut() {
            display.show_sample(self.test.sample(), self.test.word_states());
        }
    }

    fn publish_all(&mut self) {
        if let Some(display) = self.display.as_mut() {
            display.show_difficulty(self.test.difficulty());
            display.clear_stats();
        }
        self.publish_sample();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::UNAVAILABLE;
    use crate::test_run::RunStatus;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Duration;
    use WordState::*;

    #[derive(Debug, Default)]
    struct Recorder {
        words: Vec<String>,
        states: Vec<WordState>,
        difficulty: Option<Difficulty>,
        stats: Option<(f64, u32)>,
        sample_updates: usize,
    }

    impl DisplaySurface for Recorder {
        fn show_sample(&mut self, sample: &SampleText, states: &[WordState]) {
            self.words = sample.words().to_vec();
            self.states = states.to_vec();
            self.sample_updates += 1;
        }

        fn show_difficulty(&mut self, difficulty: Difficulty) {
            self.difficulty = Some(difficulty);
        }

        fn show_stats(&mut self, elapsed_secs: f64, wpm: u32) {
            self.stats = Some((elapsed_secs, wpm));
        }

        fn clear_stats(&mut self) {
            self.stats = None;
        }
    }

    fn controller(text: &str) -> Controller<Recorder, StdRng> {
        Controller::new(
            SampleBank::single(text),
            Difficulty::Easy,
            Some(Recorder::default()),
            StdRng::seed_from_u64(42),
        )
    }

    fn type_str(c: &mut Controller<Recorder, StdRng>, s: &str, now: Instant) {
        for ch in s.chars() {
            c.handle(Command::Type(ch), now);
        }
    }

    #[test]
    fn test_new_publishes_sample_and_difficulty() {
        let c = controller("The quick brown fox");
        let display = c.display().unwrap();

        assert_eq!(display.words, vec!["The", "quick", "brown", "fox"]);
        assert_eq!(display.states, vec![Pending; 4]);
        assert_eq!(display.difficulty, Some(Difficulty::Easy));
        assert_eq!(display.stats, None);
    }

    #[test]
    fn test_typing_before_start_is_ignored() {
        let mut c = controller("The quick brown fox");
        let now = Instant::now();

        type_str(&mut c, "The ", now);

        assert_eq!(c.test().buffer(), "");
        assert_eq!(c.display().unwrap().sample_updates, 1);
    }

    #[test]
    fn test_full_session() {
        let mut c = controller("The quick brown fox");
        let t0 = Instant::now();

        assert_eq!(c.handle(Command::Start, t0), Flow::Continue);
        type_str(&mut c, "The quikc ", t0);
        assert_eq!(
            c.display().unwrap().states,
            vec![Correct, Incorrect, Pending, Pending]
        );

        c.handle(Command::Stop, t0 + Duration::from_secs(12));

        let result = c.test().result().unwrap();
        assert_eq!(result.correct_word_count, 1);
        assert_eq!(result.wpm, 5);
        assert_eq!(c.display().unwrap().stats, Some((12.0, 5)));
    }

    #[test]
    fn test_backspace_edits_buffer() {
        let mut c = controller("the cat");
        let t0 = Instant::now();
        c.start(t0);

        type_str(&mut c, "teh", t0);
        assert_eq!(c.display().unwrap().states, vec![Incorrect, Pending]);

        c.handle(Command::Backspace, t0);
        c.handle(Command::Backspace, t0);
        assert_eq!(c.test().buffer(), "t");
        assert_eq!(c.display().unwrap().states, vec![Pending, Pending]);
    }

    #[test]
    fn test_backspace_on_empty_buffer_is_noop() {
        let mut c = controller("the cat");
        let t0 = Instant::now();
        c.start(t0);
        let updates = c.display().unwrap().sample_updates;

        c.handle(Command::Backspace, t0);

        assert_eq!(c.test().buffer(), "");
        assert_eq!(c.display().unwrap().sample_updates, updates);
    }

    #[test]
    fn test_stop_while_idle_is_ignored() {
        let mut c = controller("the cat");

        assert!(c.stop(Instant::now()).is_none());
        assert_eq!(c.test().status(), RunStatus::Idle);
        assert_eq!(c.display().unwrap().stats, None);
    }

    #[test]
    fn test_tick_updates_live_stats_only_while_running() {
        let mut c = controller("the cat");
        let t0 = Instant::now();

        c.tick(t0);
        assert_eq!(c.display().unwrap().stats, None);

        c.start(t0);
        type_str(&mut c, "the ", t0);
        c.tick(t0 + Duration::from_secs(6));
        assert_eq!(c.display().unwrap().stats, Some((6.0, 10)));

        c.stop(t0 + Duration::from_secs(6));
        c.tick(t0 + Duration::from_secs(30));
        assert_eq!(c.display().unwrap().stats, Some((6.0, 10)));
    }

    #[test]
    fn test_retry_resets_to_idle() {
        let mut c = controller("the cat");
        let t0 = Instant::now();
        c.start(t0);
        type_str(&mut c, "the ", t0);
        c.stop(t0 + Duration::from_secs(1));

        c.handle(Command::Retry, t0);

        assert_eq!(c.test().status(), RunStatus::Idle);
        assert!(c.test().result().is_none());
        assert_eq!(c.test().buffer(), "");
        assert_eq!(c.display().unwrap().stats, None);
        assert_eq!(c.display().unwrap().states, vec![Pending, Pending]);
    }

    #[test]
    fn test_select_difficulty_replaces_sample() {
        let bank = SampleBank {
            easy: vec!["easy words".to_string()],
            hard: vec!["hard words here".to_string()],
            ..Default::default()
        };
        let mut c = Controller::new(
            bank,
            Difficulty::Easy,
            Some(Recorder::default()),
            StdRng::seed_from_u64(1),
        );

        c.handle(Command::SelectDifficulty(Difficulty::Hard), Instant::now());
        assert_eq!(c.test().sample().text(), "hard words here");
        assert_eq!(c.display().unwrap().difficulty, Some(Difficulty::Hard));

        c.select_difficulty(Difficulty::Medium);
        assert_eq!(c.test().sample().text(), UNAVAILABLE);
    }

    #[test]
    fn test_quit() {
        let mut c = controller("the cat");
        assert_eq!(c.handle(Command::Quit, Instant::now()), Flow::Quit);
    }

    #[test]
    fn test_without_display_still_runs() {
        let mut c: Controller<Recorder, StdRng> = Controller::new(
            SampleBank::single("the cat"),
            Difficulty::Easy,
            None,
            StdRng::seed_from_u64(0),
        );
        let t0 = Instant::now();

        c.start(t0);
        assert!(c.input_changed("the cat"));
        let result = c.stop(t0 + Duration::from_secs(60)).unwrap();

        assert_eq!(result.correct_word_count, 2);
        assert!(c.display().is_none());
    }
}
