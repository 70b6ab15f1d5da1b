//! Set progression tracker.
//!
//! Tracks advancement through an ordered sequence of planned sets. Purely
//! command-driven: there is no time-based component, and composition with
//! the rest timer (complete a set, start resting) happens in the
//! presentation layer.

use crate::plan::WorkoutPlan;
use crate::{Error, Result};
use serde::Serialize;

/// Progress against one planned set.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct SetProgress {
    /// Position in the plan, stable for the tracker's lifetime.
    pub set_index: usize,
    pub target_reps: u32,
    /// Display-only within the core; the tracker never computes with it.
    pub target_weight: f64,
    pub current_reps: u32,
    pub completed: bool,
}

impl SetProgress {
    fn from_plan(set_index: usize, target_reps: u32, target_weight: f64) -> Self {
        Self {
            set_index,
            target_reps,
            target_weight,
            current_reps: 0,
            completed: false,
        }
    }
}

/// Tracks rep counts and completion across a workout plan's sets.
///
/// Rep commands apply to the set under the cursor and clamp at
/// `[0, target_reps]`; commands beyond a bound are no-ops, never errors.
/// Navigation is independent of completion state so any set can be
/// reviewed at any time.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SetTracker {
    sets: Vec<SetProgress>,
    cursor: usize,
}

impl SetTracker {
    /// Build fresh tracking state from a plan: zero reps everywhere,
    /// nothing completed, cursor on the first set.
    ///
    /// Re-initializing for a new plan means constructing a new tracker;
    /// the plan itself stays immutable for this tracker's lifetime.
    pub fn new(plan: &WorkoutPlan) -> Result<Self> {
        if plan.sets.is_empty() {
            return Err(Error::Plan("plan has no sets".into()));
        }
        let sets = plan
            .sets
            .iter()
            .enumerate()
            .map(|(i, s)| SetProgress::from_plan(i, s.target_reps, s.target_weight))
            .collect();
        Ok(Self { sets, cursor: 0 })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current_set(&self) -> &SetProgress {
        &self.sets[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn sets(&self) -> &[SetProgress] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Count of completed sets, recomputed from the sequence on every
    /// call so it cannot drift from the underlying data.
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }

    pub fn remaining_sets(&self) -> usize {
        self.len() - self.completed_sets()
    }

    pub fn all_completed(&self) -> bool {
        self.sets.iter().all(|s| s.completed)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add one rep to the current set, clamped at its target.
    pub fn increment_reps(&mut self) -> &SetProgress {
        let set = &mut self.sets[self.cursor];
        if set.current_reps < set.target_reps {
            set.current_reps += 1;
        } else {
            tracing::debug!("set {}: already at target reps", set.set_index);
        }
        self.current_set()
    }

    /// Remove one rep from the current set, clamped at zero.
    pub fn decrement_reps(&mut self) -> &SetProgress {
        let set = &mut self.sets[self.cursor];
        if set.current_reps > 0 {
            set.current_reps -= 1;
        } else {
            tracing::debug!("set {}: rep count already zero", set.set_index);
        }
        self.current_set()
    }

    /// Mark the current set done, whether or not it reached its target
    /// (sets get cut short in real training). Advances the cursor unless
    /// this is the last set; staying on the final completed set is what
    /// signals "all sets done" without an out-of-range cursor.
    pub fn complete_set(&mut self) -> &SetProgress {
        let last = self.sets.len() - 1;
        let set = &mut self.sets[self.cursor];
        set.completed = true;
        tracing::info!(
            "set {} completed: {}/{} reps",
            set.set_index,
            set.current_reps,
            set.target_reps
        );
        if self.cursor < last {
            self.cursor += 1;
        }
        self.current_set()
    }

    /// Move the cursor forward one set, clamped at the last index.
    pub fn go_to_next_set(&mut self) -> &SetProgress {
        if self.cursor + 1 < self.sets.len() {
            self.cursor += 1;
        }
        self.current_set()
    }

    /// Move the cursor back one set, clamped at zero.
    pub fn go_to_previous_set(&mut self) -> &SetProgress {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.current_set()
    }

    /// Restore every set to its initial values and the cursor to the
    /// first set, keeping the plan.
    pub fn reset_session(&mut self) {
        for set in &mut self.sets {
            set.current_reps = 0;
            set.completed = false;
        }
        self.cursor = 0;
        tracing::debug!("session progress reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{PlannedSet, WorkoutPlan};

    fn plan(targets: &[(u32, f64)]) -> WorkoutPlan {
        WorkoutPlan {
            exercise: "back squat".into(),
            sets: targets
                .iter()
                .map(|&(target_reps, target_weight)| PlannedSet {
                    target_reps,
                    target_weight,
                })
                .collect(),
        }
    }

    fn three_by_eight() -> WorkoutPlan {
        plan(&[(8, 100.0), (8, 100.0), (8, 102.5)])
    }

    #[test]
    fn initialize_starts_clean() {
        let tracker = SetTracker::new(&three_by_eight()).unwrap();
        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.cursor(), 0);
        assert_eq!(tracker.completed_sets(), 0);
        assert_eq!(tracker.remaining_sets(), 3);
        assert_eq!(tracker.current_set().current_reps, 0);
        assert!(!tracker.current_set().completed);
    }

    #[test]
    fn empty_plan_is_rejected() {
        let result = SetTracker::new(&plan(&[]));
        assert!(matches!(result, Err(Error::Plan(_))));
    }

    #[test]
    fn increment_clamps_at_target() {
        let mut tracker = SetTracker::new(&three_by_eight()).unwrap();
        for _ in 0..8 + 5 {
            tracker.increment_reps();
        }
        assert_eq!(tracker.current_set().current_reps, 8);
    }

    #[test]
    fn decrement_clamps_at_zero() {
        let mut tracker = SetTracker::new(&three_by_eight()).unwrap();
        tracker.decrement_reps();
        assert_eq!(tracker.current_set().current_reps, 0);

        tracker.increment_reps();
        tracker.increment_reps();
        tracker.decrement_reps();
        assert_eq!(tracker.current_set().current_reps, 1);
    }

    #[test]
    fn complete_advances_except_on_last_set() {
        let mut tracker = SetTracker::new(&three_by_eight()).unwrap();

        tracker.increment_reps();
        tracker.complete_set();
        assert_eq!(tracker.cursor(), 1);
        assert!(tracker.sets()[0].completed);
        // Other sets untouched.
        assert!(!tracker.sets()[1].completed);
        assert_eq!(tracker.sets()[1].current_reps, 0);
        assert!(!tracker.sets()[2].completed);

        tracker.complete_set();
        assert_eq!(tracker.cursor(), 2);

        // Final set: completion does not move the cursor.
        tracker.complete_set();
        assert_eq!(tracker.cursor(), 2);
        assert_eq!(tracker.completed_sets(), 3);
        assert_eq!(tracker.remaining_sets(), 0);
        assert!(tracker.all_completed());
    }

    #[test]
    fn partial_completion_is_permitted() {
        let mut tracker = SetTracker::new(&three_by_eight()).unwrap();
        tracker.increment_reps();
        tracker.increment_reps();
        let snap = *tracker.sets().first().unwrap();
        tracker.complete_set();
        assert_eq!(snap.current_reps, 2);
        assert!(tracker.sets()[0].completed);
    }

    #[test]
    fn navigation_clamps_and_ignores_completion() {
        let mut tracker = SetTracker::new(&three_by_eight()).unwrap();

        tracker.go_to_previous_set();
        assert_eq!(tracker.cursor(), 0);

        tracker.go_to_next_set();
        tracker.go_to_next_set();
        assert_eq!(tracker.cursor(), 2);
        tracker.go_to_next_set();
        assert_eq!(tracker.cursor(), 2);

        // Review a completed set and adjust its count.
        tracker.go_to_previous_set();
        tracker.go_to_previous_set();
        tracker.increment_reps();
        tracker.complete_set();
        assert_eq!(tracker.cursor(), 1);
        tracker.go_to_previous_set();
        assert!(tracker.current_set().completed);
        tracker.decrement_reps();
        assert_eq!(tracker.current_set().current_reps, 0);
        assert!(tracker.current_set().completed);
    }

    #[test]
    fn reset_session_matches_fresh_initialize() {
        let plan = three_by_eight();
        let mut tracker = SetTracker::new(&plan).unwrap();

        tracker.increment_reps();
        tracker.increment_reps();
        tracker.complete_set();
        tracker.increment_reps();
        tracker.go_to_next_set();
        tracker.complete_set();
        tracker.go_to_previous_set();

        tracker.reset_session();
        assert_eq!(tracker, SetTracker::new(&plan).unwrap());
    }

    #[test]
    fn derived_counts_follow_the_sequence() {
        let mut tracker = SetTracker::new(&plan(&[(5, 60.0), (5, 60.0)])).unwrap();
        assert_eq!(tracker.completed_sets(), 0);
        tracker.complete_set();
        assert_eq!(tracker.completed_sets(), 1);
        assert_eq!(tracker.remaining_sets(), 1);
        tracker.complete_set();
        assert_eq!(tracker.completed_sets(), 2);
        assert_eq!(tracker.remaining_sets(), 0);
    }
}
