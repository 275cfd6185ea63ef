use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running {
        started_at: Instant,
    },
    Stopped {
        started_at: Instant,
        ended_at: Instant,
    },
}

/// Lifecycle and timing of a single test attempt.
///
/// The instants live inside the phase, so an end instant only ever exists
/// together with a start instant on a stopped run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestRun {
    phase: Phase,
}

impl Default for TestRun {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl TestRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin timing at `now`. Calling this on a running test restarts it.
    pub fn start(&mut self, now: Instant) {
        self.phase = Phase::Running { started_at: now };
    }

    /// Stop timing at `now`. Returns false, leaving the run untouched, unless it was running.
    pub fn stop(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Running { started_at } => {
                self.phase = Phase::Stopped {
                    started_at,
                    ended_at: now,
                };
                true
            }
            Phase::Idle | Phase::Stopped { .. } => false,
        }
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn status(&self) -> RunStatus {
        match self.phase {
            Phase::Idle => RunStatus::Idle,
            Phase::Running { .. } => RunStatus::Running,
            Phase::Stopped { .. } => RunStatus::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == RunStatus::Running
    }

    pub fn started_at(&self) -> Option<Instant> {
        match self.phase {
            Phase::Idle => None,
            Phase::Running { started_at } | Phase::Stopped { started_at, .. } => Some(started_at),
        }
    }

    pub fn ended_at(&self) -> Option<Instant> {
        match self.phase {
            Phase::Stopped { ended_at, .. } => Some(ended_at),
            _ => None,
        }
    }

    /// Time spent so far while running, or the final duration once stopped
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::Idle => None,
            Phase::Running { started_at } => Some(now.saturating_duration_since(started_at)),
            Phase::Stopped {
                started_at,
                ended_at,
            } => Some(ended_at.saturating_duration_since(started_at)),
        }
    }
}
