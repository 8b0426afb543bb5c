extern crate self as phonoshift;

use regex::Captures;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
pub mod regression;
pub mod rules;

pub use api::{Options, evolve, evolve_latin, evolve_traced, evolve_using, evolve_with, normalize_latin};
pub use engine::{
    Derivation, Deriver, Inventory, Mutation, NullSink, RunMetrics, StageMetrics, StageSnapshot, TraceEvent,
    TraceFlags, TraceLog, TraceSink, TracingSink,
};
pub use error::{DerivationError, InputError, InventoryError, Location, TemplateError};

// --- Rule definitions -------------------------------------------------------

/// Extra check run on a candidate match once its contexts hold.
pub type Guard = fn(&Captures<'_>) -> bool;

/// Which side of the focus a [`Context`] inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Text to the left of the focus; the template must match a suffix of it.
    Before,
    /// Text to the right of the focus; the template must match a prefix of it.
    After,
}

/// A context condition attached to a rule.
///
/// Templates use `regex` syntax plus classification references (`{vowel}`,
/// `{consonant-n,m}`). Marker kinds the template does not mention are removed
/// from the inspected text before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub side: Side,
    pub template: &'static str,
    pub negated: bool,
}

impl Context {
    pub fn before(template: &'static str) -> Self {
        Context { side: Side::Before, template, negated: false }
    }

    pub fn not_before(template: &'static str) -> Self {
        Context { side: Side::Before, template, negated: true }
    }

    pub fn after(template: &'static str) -> Self {
        Context { side: Side::After, template, negated: false }
    }

    pub fn not_after(template: &'static str) -> Self {
        Context { side: Side::After, template, negated: true }
    }
}

/// One context-sensitive rewrite step.
///
/// `focus` is matched against the raw word form; `replacement` is a `regex`
/// expansion template (`${1}` is capture group 1). Classification references
/// are resolved every time the rule runs, never when it is defined.
pub struct Rule {
    pub name: &'static str,
    pub focus: &'static str,
    pub contexts: Vec<Context>,
    pub guard: Option<Guard>,
    pub replacement: &'static str,
    /// Report this rule to the trace sink when rule tracing is on.
    pub trace: bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("focus", &self.focus)
            .field("contexts", &self.contexts)
            .field("guard", &self.guard.map(|_| "<function>"))
            .field("replacement", &self.replacement)
            .finish()
    }
}

/// A single operation inside a [`Stage`].
#[derive(Debug)]
pub enum Step {
    Apply(Rule),
    Add { class: &'static str, symbols: Vec<&'static str> },
    Remove { class: &'static str, symbols: Vec<&'static str> },
}

/// A named historical period: rules and inventory mutations, run in order.
#[derive(Debug)]
pub struct Stage {
    pub name: &'static str,
    pub steps: Vec<Step>,
}

impl Stage {
    pub fn new(name: &'static str) -> Self {
        Stage { name, steps: Vec::new() }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.steps.push(Step::Apply(rule));
        self
    }

    /// Add `symbols` to `class`, creating the class if it does not exist yet.
    pub fn add(mut self, class: &'static str, symbols: &[&'static str]) -> Self {
        self.steps.push(Step::Add { class, symbols: symbols.to_vec() });
        self
    }

    pub fn remove(mut self, class: &'static str, symbols: &[&'static str]) -> Self {
        self.steps.push(Step::Remove { class, symbols: symbols.to_vec() });
        self
    }
}

/// Characters used for the inline stress and length markers, and the
/// classification whose members may carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerConvention {
    /// Written immediately before the stressed nucleus.
    pub stress: char,
    /// Written immediately after a long nucleus.
    pub length: char,
    pub nucleus: &'static str,
}

impl MarkerConvention {
    /// Whether `c` is the stress or the length marker.
    pub fn is_marker(&self, c: char) -> bool {
        c == self.stress || c == self.length
    }
}

impl Default for MarkerConvention {
    fn default() -> Self {
        MarkerConvention { stress: '/', length: ':', nucleus: "vowel" }
    }
}

/// Baseline classification membership, restored at the start of every run.
pub type Baseline = &'static [(&'static str, &'static [&'static str])];

/// A complete, totally ordered rule set: baseline classes, marker convention
/// and the stages in historical order.
#[derive(Debug)]
pub struct Catalogue {
    pub name: &'static str,
    pub markers: MarkerConvention,
    pub baseline: Baseline,
    pub stages: Vec<Stage>,
}

/// Identifies a rule application for traces and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId {
    pub stage: &'static str,
    /// Index of the step inside its stage.
    pub step: usize,
    pub name: &'static str,
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{} \"{}\"", self.stage, self.step, self.name)
    }
}
