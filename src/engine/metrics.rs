//! Derivation run metrics.
//!
//! Collected on every run; they cost a couple of `Instant::now()` calls per
//! stage and a few counters, so there is no separate opt-in path.
//!
//! ## Design notes
//!
//! - `rules_applied` counts every rule application, `rules_matched` only the
//!   ones that substituted at least once.
//! - Cache numbers are cumulative for the owning `Deriver`, not per run.

use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the derivation (validation included).
    pub total: Duration,
    /// One entry per stage, in execution order.
    pub stages: Vec<StageMetrics>,
    /// Compiled patterns held by the deriver after the run.
    pub cached_patterns: usize,
    /// Pattern cache `(hits, misses)` so far.
    pub cache: (usize, usize),
}

impl RunMetrics {
    pub fn rules_applied(&self) -> usize {
        self.stages.iter().map(|s| s.rules_applied).sum()
    }

    pub fn rules_matched(&self) -> usize {
        self.stages.iter().map(|s| s.rules_matched).sum()
    }
}

/// Timing and counters for a single stage.
#[derive(Debug, Default, Clone)]
pub struct StageMetrics {
    pub name: &'static str,
    pub duration: Duration,
    pub rules_applied: usize,
    pub rules_matched: usize,
    /// Inventory mutations performed by the stage.
    pub mutations: usize,
}
