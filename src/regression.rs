//! Compare derivations against attested outcomes.
//!
//! A regression run never stops at the first mismatch: every case is derived
//! and the failures are collected, so a rule change can be judged by how many
//! words it fixes or breaks.

use crate::error::DerivationError;
use crate::{Catalogue, Deriver};

/// One case that did not produce its expected form.
#[derive(Debug)]
pub struct Failure {
    pub input: &'static str,
    pub expected: &'static str,
    /// What the derivation produced instead, or why it failed.
    pub outcome: Result<String, DerivationError>,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            Ok(got) => write!(f, "{} > {} (expected {})", self.input, got, self.expected),
            Err(err) => write!(f, "{} failed: {}", self.input, err),
        }
    }
}

#[derive(Debug, Default)]
pub struct RegressionReport {
    pub passed: usize,
    pub failures: Vec<Failure>,
}

impl RegressionReport {
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures caused by an error rather than a wrong form.
    pub fn errors(&self) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(|f| f.outcome.is_err())
    }
}

/// Run `cases` through `derive` and collect the mismatches.
pub fn run_with<F>(cases: &[(&'static str, &'static str)], mut derive: F) -> RegressionReport
where
    F: FnMut(&str) -> Result<String, DerivationError>,
{
    let mut report = RegressionReport::default();
    for &(input, expected) in cases {
        let outcome = derive(input);
        if matches!(&outcome, Ok(got) if got == expected) {
            report.passed += 1;
            continue;
        }
        tracing::debug!(input, expected, ?outcome, "regression mismatch");
        report.failures.push(Failure { input, expected, outcome });
    }
    report
}

/// Run `cases` (already in the catalogue's input spelling) through
/// `catalogue`, reusing one deriver for the whole batch.
pub fn run(catalogue: &Catalogue, cases: &[(&'static str, &'static str)]) -> RegressionReport {
    let mut deriver = Deriver::new(catalogue);
    run_with(cases, |word| deriver.derive(word))
}
