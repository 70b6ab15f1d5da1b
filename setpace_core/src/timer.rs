//! Interval timer engine.
//!
//! A phase-and-round countdown state machine driven by an external tick
//! source. One machine covers both presets the app ships: a single-phase
//! rest countdown (`rounds = 1`, no rest duration) and a multi-round
//! work/rest interval timer.
//!
//! The engine owns no clock and no thread. The caller feeds it one
//! logical tick per elapsed second ([`IntervalTimer::tick`]), or a batch
//! of coalesced seconds after a scheduling delay
//! ([`IntervalTimer::catch_up`]); every boundary crossed in the batch is
//! processed individually so no side effect is skipped or doubled.

use crate::events::{Cue, CueSink, TimerEvent};
use crate::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default warning window for interval work, in seconds.
pub const DEFAULT_WARN_SECS: u32 = 3;

/// Default warning window for standalone rest countdowns, in seconds.
pub const DEFAULT_REST_WARN_SECS: u32 = 10;

/// Immutable countdown configuration, supplied at construction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerConfig {
    /// Duration of the work phase in seconds.
    pub work_secs: u32,

    /// Duration of the rest phase in seconds. `None` or zero selects
    /// single-phase mode: the work duration is consumed once per round
    /// with no rest in between.
    #[serde(default)]
    pub rest_secs: Option<u32>,

    /// Number of rounds to run.
    #[serde(default = "default_rounds")]
    pub rounds: u32,

    /// Window (in seconds remaining) in which the urgency signal holds.
    #[serde(default = "default_warn_secs")]
    pub warn_secs: u32,
}

fn default_rounds() -> u32 {
    1
}

fn default_warn_secs() -> u32 {
    DEFAULT_WARN_SECS
}

impl TimerConfig {
    /// Multi-round work/rest configuration with the standard warning window.
    pub fn intervals(work_secs: u32, rest_secs: u32, rounds: u32) -> Self {
        Self {
            work_secs,
            rest_secs: Some(rest_secs),
            rounds,
            warn_secs: DEFAULT_WARN_SECS,
        }
    }

    /// Single-phase countdown, used as the standalone rest timer.
    pub fn rest_only(secs: u32) -> Self {
        Self {
            work_secs: secs,
            rest_secs: None,
            rounds: 1,
            warn_secs: DEFAULT_REST_WARN_SECS,
        }
    }

    /// Override the warning window.
    pub fn with_warning(mut self, warn_secs: u32) -> Self {
        self.warn_secs = warn_secs;
        self
    }

    /// Effective rest duration. A configured zero means "no rest phase".
    pub fn rest(&self) -> Option<u32> {
        self.rest_secs.filter(|&r| r > 0)
    }

    pub fn is_single_phase(&self) -> bool {
        self.rest().is_none()
    }

    /// Reject malformed configurations. Nothing is ever clamped.
    pub fn validate(&self) -> Result<()> {
        if self.work_secs == 0 {
            return Err(Error::Configuration(
                "work duration must be at least one second".into(),
            ));
        }
        if self.rounds == 0 {
            return Err(Error::Configuration("round count must be at least 1".into()));
        }
        Ok(())
    }
}

/// Lifecycle state of the machine.
///
/// Phase boundaries (work ending, rest ending) resolve inside a single
/// tick, so there is no observable "between phases" state; crossings
/// surface as [`TimerEvent::PhaseBoundary`] instead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Configured but not yet started; the only state accepting `configure`.
    Configuring,
    /// Counting down.
    Active,
    /// Counting suspended, remaining time preserved.
    Paused,
    /// Terminal: every round's every phase expired naturally.
    SessionComplete,
}

/// Externally observable state, recomputed on demand and safe to render
/// directly. Never partially mutated.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    /// Whether the current countdown is a work phase. Meaningful only
    /// outside `Configuring`/`SessionComplete`.
    pub is_work_phase: bool,
    pub current_round: u32,
    pub total_rounds: u32,
    pub secs_remaining: u32,
    /// Configured duration of the phase being counted down.
    pub phase_secs: u32,
    pub warn_secs: u32,
}

impl TimerSnapshot {
    /// Urgency signal: the active countdown is inside the warning window.
    ///
    /// Derived from snapshot fields on every call, so it can never
    /// disagree with `secs_remaining`.
    pub fn warning(&self) -> bool {
        self.phase == TimerPhase::Active && self.secs_remaining <= self.warn_secs
    }
}

/// The countdown state machine.
///
/// All commands are total: out-of-order calls (say, `pause` while
/// `Configuring`) are no-ops rather than errors, because the presentation
/// layer may issue commands from stale UI. The only surfaced error is a
/// rejected configuration.
pub struct IntervalTimer {
    config: TimerConfig,
    phase: TimerPhase,
    is_work_phase: bool,
    current_round: u32,
    secs_remaining: u32,
    cue: Option<Box<dyn CueSink>>,
}

impl IntervalTimer {
    /// Build a timer in `Configuring` from a validated configuration.
    pub fn new(config: TimerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            phase: TimerPhase::Configuring,
            is_work_phase: true,
            current_round: 1,
            secs_remaining: config.work_secs,
            cue: None,
        })
    }

    /// Attach the audio cue sink. The engine never plays audio itself;
    /// it forwards cues here during the transition that caused them.
    pub fn with_cue(mut self, sink: Box<dyn CueSink>) -> Self {
        self.cue = Some(sink);
        self
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Replace the configuration. Accepted only while `Configuring`;
    /// ignored in any other state. Invalid configurations are rejected
    /// without touching the current one.
    pub fn configure(&mut self, config: TimerConfig) -> Result<TimerSnapshot> {
        if self.phase != TimerPhase::Configuring {
            tracing::debug!("configure ignored in {:?}", self.phase);
            return Ok(self.snapshot());
        }
        config.validate()?;
        self.config = config;
        self.secs_remaining = config.work_secs;
        tracing::debug!(
            "configured: work {}s, rest {:?}s, {} rounds",
            config.work_secs,
            config.rest(),
            config.rounds
        );
        Ok(self.snapshot())
    }

    /// Start from `Configuring`, or resume from `Paused`. No-op otherwise.
    pub fn start(&mut self) -> TimerSnapshot {
        match self.phase {
            TimerPhase::Configuring => {
                self.phase = TimerPhase::Active;
                self.is_work_phase = true;
                self.current_round = 1;
                self.secs_remaining = self.config.work_secs;
                tracing::info!(
                    "session started: work {}s x {} rounds",
                    self.config.work_secs,
                    self.config.rounds
                );
            }
            TimerPhase::Paused => {
                self.phase = TimerPhase::Active;
                tracing::debug!("resumed with {}s remaining", self.secs_remaining);
            }
            _ => {
                tracing::debug!("start ignored in {:?}", self.phase);
            }
        }
        self.snapshot()
    }

    /// Suspend an active countdown, preserving remaining time. No-op
    /// outside `Active`.
    pub fn pause(&mut self) -> TimerSnapshot {
        if self.phase == TimerPhase::Active {
            self.phase = TimerPhase::Paused;
            tracing::debug!("paused with {}s remaining", self.secs_remaining);
        } else {
            tracing::debug!("pause ignored in {:?}", self.phase);
        }
        self.snapshot()
    }

    /// Return to `Configuring` with round 1 and a full work countdown.
    /// Callable from every state; this is the abort/cancel path.
    pub fn reset(&mut self) -> TimerSnapshot {
        self.rewind();
        tracing::debug!("timer reset");
        self.snapshot()
    }

    /// User-initiated abort. Behaves like `reset` but is a separate
    /// entry point so callers can tell "cancelled" from "finished";
    /// no completion cue is played.
    pub fn stop(&mut self) -> TimerSnapshot {
        self.rewind();
        tracing::info!("session stopped before completion");
        self.snapshot()
    }

    /// Process one elapsed second. Ignored unless `Active`.
    ///
    /// A tick that would drive the countdown below zero instead crosses
    /// the phase boundary in the same step: the boundary cue fires, and
    /// the machine either enters the next phase or completes.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if self.phase != TimerPhase::Active {
            return events;
        }

        if self.secs_remaining > 1 {
            self.secs_remaining -= 1;
            if self.secs_remaining == self.config.warn_secs {
                self.signal_warning(&mut events);
            }
            return events;
        }

        // Final second of the phase: process the boundary now so the
        // countdown is never observed negative.
        let finished_work = self.is_work_phase;
        let finished_round = self.current_round;
        events.push(TimerEvent::PhaseBoundary {
            finished_work,
            round: finished_round,
            at: Utc::now(),
        });
        self.play(Cue::Boundary);

        match self.config.rest() {
            Some(rest_secs) if finished_work => {
                tracing::debug!("round {}: work expired, entering rest", finished_round);
                self.enter_phase(false, rest_secs, &mut events);
            }
            _ => {
                if self.current_round < self.config.rounds {
                    self.current_round += 1;
                    tracing::debug!("starting round {}", self.current_round);
                    self.enter_phase(true, self.config.work_secs, &mut events);
                } else {
                    self.phase = TimerPhase::SessionComplete;
                    self.secs_remaining = 0;
                    tracing::info!("session complete after {} rounds", self.config.rounds);
                    events.push(TimerEvent::SessionComplete {
                        rounds: self.config.rounds,
                        at: Utc::now(),
                    });
                    self.play(Cue::Completion);
                }
            }
        }

        events
    }

    /// Process `elapsed_secs` coalesced seconds as individual ticks.
    ///
    /// Used when the host delayed or batched its tick source: every
    /// boundary in the span is crossed exactly once, in order. Stops
    /// early once the session completes.
    pub fn catch_up(&mut self, elapsed_secs: u32) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        for _ in 0..elapsed_secs {
            if self.phase != TimerPhase::Active {
                break;
            }
            events.extend(self.tick());
        }
        events
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            is_work_phase: self.is_work_phase,
            current_round: self.current_round,
            total_rounds: self.config.rounds,
            secs_remaining: self.secs_remaining,
            phase_secs: self.phase_secs(),
            warn_secs: self.config.warn_secs,
        }
    }

    fn phase_secs(&self) -> u32 {
        match self.phase {
            TimerPhase::SessionComplete => 0,
            _ if self.is_work_phase => self.config.work_secs,
            _ => self.config.rest().unwrap_or(0),
        }
    }

    fn rewind(&mut self) {
        self.phase = TimerPhase::Configuring;
        self.is_work_phase = true;
        self.current_round = 1;
        self.secs_remaining = self.config.work_secs;
    }

    fn enter_phase(&mut self, work: bool, secs: u32, events: &mut Vec<TimerEvent>) {
        self.is_work_phase = work;
        self.secs_remaining = secs;
        // A phase no longer than the warning window starts inside it.
        if secs <= self.config.warn_secs {
            self.signal_warning(events);
        }
    }

    fn signal_warning(&mut self, events: &mut Vec<TimerEvent>) {
        events.push(TimerEvent::ThresholdWarning {
            secs_remaining: self.secs_remaining,
            at: Utc::now(),
        });
        self.play(Cue::Warning);
    }

    fn play(&mut self, cue: Cue) {
        if let Some(sink) = self.cue.as_mut() {
            sink.play(cue);
        }
    }
}
