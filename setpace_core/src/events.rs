//! Side-effect signals emitted by the interval timer engine.
//!
//! The engine never plays audio or renders anything itself. It reports
//! boundary crossings as [`TimerEvent`] values and forwards the matching
//! [`Cue`] to a sink injected at construction time. The presentation
//! layer decides what a cue sounds like.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Discrete signals produced by timer transitions.
///
/// Every boundary crossing produces exactly one `PhaseBoundary`, even
/// when several elapsed seconds are processed in one catch-up call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    /// A phase finished counting down (work ended, or rest ended).
    PhaseBoundary {
        /// Whether the phase that just expired was a work phase.
        finished_work: bool,
        /// Round the expired phase belonged to.
        round: u32,
        at: DateTime<Utc>,
    },
    /// The final round's final phase expired; the machine stopped ticking.
    SessionComplete {
        rounds: u32,
        at: DateTime<Utc>,
    },
    /// The countdown entered the configured warning window.
    ThresholdWarning {
        secs_remaining: u32,
        at: DateTime<Utc>,
    },
}

/// Audible cue kinds, in order of urgency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// Short beep when the countdown enters the warning window.
    Warning,
    /// Beep marking a work/rest or round boundary.
    Boundary,
    /// Fanfare on natural session completion. Never played on `stop()`.
    Completion,
}

/// Playback sink for audible cues.
///
/// Injected into the engine at construction; the engine calls `play`
/// synchronously during the transition that triggered the cue.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Sink that discards every cue. Useful for headless runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn play(&mut self, _cue: Cue) {}
}

/// Sink that records cues in order, observable through clones.
///
/// Clones share the same buffer, so a caller can keep one clone and hand
/// the other to the engine.
#[derive(Clone, Debug, Default)]
pub struct RecordingCues {
    cues: Rc<RefCell<Vec<Cue>>>,
}

impl RecordingCues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every cue played so far.
    pub fn cues(&self) -> Vec<Cue> {
        self.cues.borrow().clone()
    }
}

impl CueSink for RecordingCues {
    fn play(&mut self, cue: Cue) {
        self.cues.borrow_mut().push(cue);
    }
}
