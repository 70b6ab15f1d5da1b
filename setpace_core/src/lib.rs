#![forbid(unsafe_code)]

//! Core state machines for the Setpace workout session engine.
//!
//! This crate provides:
//! - The interval timer engine (phase/round countdowns with pause,
//!   resume, reset, and catch-up over coalesced ticks)
//! - The set progression tracker (reps, completion, cursor navigation)
//! - Timer presets, workout plan loading, and configuration
//!
//! Both components are single-user, presentation-agnostic state machines:
//! the caller supplies ticks and commands, reads back immutable
//! snapshots, and reacts to the emitted events. Audio, rendering, and
//! persistence belong to the presentation layer.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod plan;
pub mod presets;
pub mod timer;
pub mod tracker;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use events::{Cue, CueSink, SilentCues, TimerEvent};
pub use plan::{PlannedSet, WorkoutPlan};
pub use presets::{find_preset, get_default_presets, TimerPreset};
pub use timer::{IntervalTimer, TimerConfig, TimerPhase, TimerSnapshot};
pub use tracker::{SetProgress, SetTracker};
