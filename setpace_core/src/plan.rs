//! Workout plan loading.
//!
//! Plans are ordered lists of target reps and weights, authored outside
//! this system (exported by the coach-facing tooling) and read here as
//! JSON.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One planned set: how many reps at what weight.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlannedSet {
    pub target_reps: u32,
    /// Weight in whatever unit the plan's author uses; display-only.
    pub target_weight: f64,
}

/// An ordered, immutable sequence of planned sets for one exercise.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub exercise: String,
    pub sets: Vec<PlannedSet>,
}

impl WorkoutPlan {
    /// Load a plan from a JSON file.
    ///
    /// Unlike optional signals, a missing or malformed plan is an error:
    /// there is nothing sensible to track without one.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Plan(format!("failed to read plan {:?}: {}", path, e))
        })?;
        let plan: WorkoutPlan = serde_json::from_str(&contents)
            .map_err(|e| Error::Plan(format!("failed to parse plan {:?}: {}", path, e)))?;
        plan.validate()?;
        tracing::info!(
            "loaded plan: {} ({} sets)",
            plan.exercise,
            plan.sets.len()
        );
        Ok(plan)
    }

    /// Reject plans the tracker cannot represent.
    pub fn validate(&self) -> Result<()> {
        if self.sets.is_empty() {
            return Err(Error::Plan("plan has no sets".into()));
        }
        Ok(())
    }
}
