use itertools::Itertools;

use crate::compare::WordState;
use crate::test_run::{RunStatus, TestRun};

/// Outcome of a finished test
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestResult {
    pub elapsed_secs: f64,
    pub correct_word_count: usize,
    pub wpm: u32,
}

/// Correct words per elapsed minute, rounded. Zero elapsed time gives zero.
pub fn wpm(correct_word_count: usize, elapsed_secs: f64) -> u32 {
    if elapsed_secs <= 0.0 {
        return 0;
    }

    let wpm = (correct_word_count as f64 / (elapsed_secs / 60.0)).round();

    if wpm.is_finite() {
        wpm as u32
    } else {
        0
    }
}

/// Build the result of a stopped run. Returns `None` for runs that are not stopped.
pub fn compute_result(run: &TestRun, correct_word_count: usize) -> Option<TestResult> {
    if run.status() != RunStatus::Stopped {
        return None;
    }

    let ended_at = run.ended_at()?;
    let elapsed_secs = run.elapsed(ended_at)?.as_secs_f64();

    Some(TestResult {
        elapsed_secs,
        correct_word_count,
        wpm: wpm(correct_word_count, elapsed_secs),
    })
}

/// Share of decided words that are correct, as a rounded percentage.
/// Pending words are not counted; with nothing decided yet this is 100.
pub fn word_accuracy(states: &[WordState]) -> f64 {
    let counts = states.iter().counts();
    let correct = counts.get(&WordState::Correct).copied().unwrap_or(0);
    let incorrect = counts.get(&WordState::Incorrect).copied().unwrap_or(0);

    match correct + incorrect {
        0 => 100.0,
        decided => ((correct as f64 / decided as f64) * 100.0).round(),
    }
}
