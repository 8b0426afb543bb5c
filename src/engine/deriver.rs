//! Stage execution and the derivation engine.
//!
//! A [`Deriver`] owns the mutable state of a run (the [`Inventory`] and the
//! compiled pattern cache) and borrows an immutable [`Catalogue`]. One run is
//! a linear chain:
//!
//! ```text
//! reset inventory ─▶ validate markers ─▶ stage 1 ─▶ stage 2 ─▶ ... ─▶ output
//!                        │                  │
//!                        └─ InputError      └─ steps in definition order:
//!                           (nothing ran)      rule      -> apply_rule
//!                                              add/remove -> inventory, visible
//!                                                            to the next step
//! ```
//!
//! Any error aborts the run; the caller gets the error and its location,
//! never a partial form.
//!
//! Derivers are cheap to create and are not `Sync`-shared: run independent
//! words in parallel by giving each thread its own deriver.

use super::apply::{apply_rule, compile};
use super::cache::{Anchor, PatternCache};
use super::inventory::{Inventory, Mutation};
use super::markers::validate;
use super::metrics::{RunMetrics, StageMetrics};
use super::trace::{NullSink, TraceFlags, TraceSink};
use crate::error::{DerivationError, InventoryError, Location};
use crate::{Catalogue, RuleId, Stage, Step};
use std::time::Instant;

/// Form after a stage completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSnapshot {
    pub name: &'static str,
    pub form: String,
}

/// A finished derivation.
#[derive(Debug, Clone)]
pub struct Derivation {
    pub input: String,
    pub output: String,
    /// One snapshot per stage, in order. The last one equals `output`.
    pub stages: Vec<StageSnapshot>,
    pub metrics: RunMetrics,
}

#[derive(Debug)]
pub struct Deriver<'c> {
    catalogue: &'c Catalogue,
    inventory: Inventory,
    cache: PatternCache,
}

impl<'c> Deriver<'c> {
    pub fn new(catalogue: &'c Catalogue) -> Self {
        Deriver { catalogue, inventory: Inventory::new(catalogue.baseline), cache: PatternCache::new() }
    }

    pub fn catalogue(&self) -> &'c Catalogue {
        self.catalogue
    }

    /// Inventory as left by the last run (or the baseline after [`reset`](Self::reset)).
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn reset(&mut self) {
        self.inventory.reset();
    }

    /// Derive `word` through every stage and return the final form.
    pub fn derive(&mut self, word: &str) -> Result<String, DerivationError> {
        self.derive_traced(word, &mut NullSink, TraceFlags::empty())
    }

    pub fn derive_traced(
        &mut self,
        word: &str,
        sink: &mut dyn TraceSink,
        flags: TraceFlags,
    ) -> Result<String, DerivationError> {
        self.run(word, sink, flags).map(|d| d.output)
    }

    /// Derive `word`, returning per-stage forms and metrics as well.
    pub fn run(
        &mut self,
        word: &str,
        sink: &mut dyn TraceSink,
        flags: TraceFlags,
    ) -> Result<Derivation, DerivationError> {
        let total_start = Instant::now();
        let catalogue = self.catalogue;

        self.inventory.reset();
        validate(word, &catalogue.markers, &self.inventory)?;
        tracing::debug!(catalogue = catalogue.name, word, "derivation started");

        let mut form = word.to_string();
        let mut stages = Vec::with_capacity(catalogue.stages.len());
        let mut metrics = RunMetrics::default();

        for stage in &catalogue.stages {
            let stage_start = Instant::now();
            let mut stage_metrics = StageMetrics { name: stage.name, ..StageMetrics::default() };

            form = self.run_stage(stage, form, sink, flags, &mut stage_metrics)?;

            stage_metrics.duration = stage_start.elapsed();
            metrics.stages.push(stage_metrics);
            if flags.contains(TraceFlags::STAGES) {
                sink.stage_completed(stage.name, &form);
            }
            stages.push(StageSnapshot { name: stage.name, form: form.clone() });
        }

        metrics.total = total_start.elapsed();
        metrics.cached_patterns = self.cache.len();
        metrics.cache = self.cache.stats();
        tracing::debug!(
            catalogue = catalogue.name,
            word,
            output = %form,
            elapsed = ?metrics.total,
            "derivation finished"
        );

        Ok(Derivation { input: word.to_string(), output: form, stages, metrics })
    }

    fn run_stage(
        &mut self,
        stage: &Stage,
        mut form: String,
        sink: &mut dyn TraceSink,
        flags: TraceFlags,
        metrics: &mut StageMetrics,
    ) -> Result<String, DerivationError> {
        let catalogue = self.catalogue;
        let markers = &catalogue.markers;

        for (step, op) in stage.steps.iter().enumerate() {
            let Step::Apply(rule) = op else {
                for mutation in Mutation::from_step(op).unwrap_or_default() {
                    self.mutate(stage.name, step, &mutation)?;
                    metrics.mutations += 1;
                    if flags.contains(TraceFlags::INVENTORY) {
                        sink.inventory_changed(stage.name, &mutation);
                    }
                }
                continue;
            };

            let id = RuleId { stage: stage.name, step, name: rule.name };
            let applied = apply_rule(rule, id, &form, markers, &self.inventory, &mut self.cache)?;

            metrics.rules_applied += 1;
            if applied.matches > 0 {
                metrics.rules_matched += 1;
            }

            let reported = flags.contains(TraceFlags::RULES)
                && rule.trace
                && (!flags.contains(TraceFlags::CHANGES_ONLY) || applied.changed(&form));
            if reported {
                sink.emit(&applied.form, id);
            }
            form = applied.form;
        }

        Ok(form)
    }

    fn mutate(&mut self, stage: &'static str, step: usize, mutation: &Mutation) -> Result<(), DerivationError> {
        match self.inventory.apply(mutation) {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::debug!(stage, step, %mutation, "inventory mutation had no effect");
                Ok(())
            }
            Err(InventoryError::UnknownClass(class)) => {
                Err(DerivationError::UnknownClass { location: Location::Mutation { stage, step }, class })
            }
        }
    }

    /// Walk the catalogue without a word: replay every inventory mutation and
    /// resolve and compile every rule template in the inventory state it
    /// would see at run time.
    ///
    /// Leaves the inventory at the baseline.
    pub fn check(&mut self) -> Result<(), DerivationError> {
        let catalogue = self.catalogue;
        self.inventory.reset();
        let result = catalogue.stages.iter().try_for_each(|stage| self.check_stage(stage));
        self.inventory.reset();
        result
    }

    fn check_stage(&mut self, stage: &Stage) -> Result<(), DerivationError> {
        for (step, op) in stage.steps.iter().enumerate() {
            let Step::Apply(rule) = op else {
                for mutation in Mutation::from_step(op).unwrap_or_default() {
                    self.mutate(stage.name, step, &mutation)?;
                }
                continue;
            };

            let location = Location::Rule(RuleId { stage: stage.name, step, name: rule.name });
            compile(rule.focus, Anchor::None, location, &self.inventory, &mut self.cache)?;
            for context in &rule.contexts {
                let anchor = Anchor::for_side(context.side);
                compile(context.template, anchor, location, &self.inventory, &mut self.cache)?;
            }
        }
        Ok(())
    }
}

impl Catalogue {
    /// Check the whole catalogue for unknown classifications and patterns
    /// that fail to compile. See [`Deriver::check`].
    pub fn check(&self) -> Result<(), DerivationError> {
        Deriver::new(self).check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::trace::{TraceEvent, TraceLog};
    use crate::{Baseline, InputError, MarkerConvention};

    const BASELINE: Baseline = &[("vowel", &["a", "e", "i", "o", "u"]), ("consonant", &["k", "t", "m", "n", "r", "s"])];

    fn catalogue(stages: Vec<Stage>) -> Catalogue {
        catalogue_with(BASELINE, stages)
    }

    fn catalogue_with(baseline: Baseline, stages: Vec<Stage>) -> Catalogue {
        Catalogue { name: "test", markers: MarkerConvention::default(), baseline, stages }
    }

    fn glide() -> Stage {
        Stage::new("one").rule(rule! { name: "e before vowel", focus: "e", after: "{vowel}", to: "j" })
    }

    #[test]
    fn end_to_end_glide() {
        let cat = catalogue(vec![glide()]);
        let mut deriver = Deriver::new(&cat);

        assert_eq!(deriver.derive("mie").unwrap(), "mie");
        assert_eq!(deriver.derive("mea").unwrap(), "mja");
    }

    #[test]
    fn mutation_is_visible_to_later_rules_of_the_same_stage() {
        const SMALL: Baseline = &[("vowel", &["a", "e"]), ("consonant", &["t", "s"])];
        let rule = || rule! { name: "a before consonant", focus: "a", after: "{consonant}", to: "e" };

        let with_add = catalogue_with(SMALL, vec![Stage::new("one").add("consonant", &["k"]).rule(rule())]);
        assert_eq!(Deriver::new(&with_add).derive("ak").unwrap(), "ek");

        let without = catalogue_with(SMALL, vec![Stage::new("one").rule(rule())]);
        assert_eq!(Deriver::new(&without).derive("ak").unwrap(), "ak");

        let too_late = catalogue_with(SMALL, vec![Stage::new("one").rule(rule()).add("consonant", &["k"])]);
        assert_eq!(Deriver::new(&too_late).derive("ak").unwrap(), "ak");
    }

    #[test]
    fn later_stage_mutations_do_not_reach_back() {
        let cat = catalogue(vec![
            Stage::new("one").rule(rule! { name: "a before glide", focus: "a", after: "{consonant}", to: "e" }),
            Stage::new("two").add("consonant", &["w"]),
        ]);
        assert_eq!(Deriver::new(&cat).derive("aw").unwrap(), "aw");
    }

    #[test]
    fn new_classes_can_be_created_mid_run() {
        let cat = catalogue(vec![
            Stage::new("one").add("glide", &["j", "w"]),
            Stage::new("two").rule(rule! { name: "vowel before glide", focus: "a", after: "{glide}", to: "ɛ" }),
        ]);
        assert_eq!(Deriver::new(&cat).derive("taj").unwrap(), "tɛj");
    }

    #[test]
    fn reset_makes_runs_repeatable() {
        let cat = catalogue(vec![
            Stage::new("one").remove("vowel", &["a"]),
            Stage::new("two").rule(rule! { name: "e before vowel", focus: "e", after: "{vowel}", to: "j" }),
        ]);
        let mut deriver = Deriver::new(&cat);

        let first = deriver.derive("mea").unwrap();
        assert!(!deriver.inventory().is_member("vowel", "a").unwrap());

        deriver.reset();
        assert!(deriver.inventory().is_member("vowel", "a").unwrap());

        let second = deriver.derive("mea").unwrap();
        assert_eq!(first, "mea");
        assert_eq!(first, second);
        assert_eq!(deriver.derive("meo").unwrap(), "mjo");
    }

    #[test]
    fn invalid_input_is_rejected_before_any_stage() {
        let cat = catalogue(vec![glide()]);
        let mut log = TraceLog::new();
        let err = Deriver::new(&cat).derive_traced("m/k", &mut log, TraceFlags::all()).unwrap_err();

        assert!(matches!(err, DerivationError::Input(InputError::StressNotBeforeNucleus { position: 1, .. })));
        assert!(err.location().is_none());
        assert!(log.events.is_empty());
    }

    #[test]
    fn errors_abort_with_their_location() {
        let cat = catalogue(vec![
            glide(),
            Stage::new("two")
                .rule(rule! { name: "fine", focus: "m", to: "n" })
                .rule(rule! { name: "broken", focus: "a", after: "{glide}", to: "e" })
                .rule(rule! { name: "never reached", focus: "n", to: "m" }),
        ]);
        let mut log = TraceLog::new();
        let err = Deriver::new(&cat).derive_traced("mea", &mut log, TraceFlags::RULES).unwrap_err();

        let expected = RuleId { stage: "two", step: 1, name: "broken" };
        assert_eq!(err.location(), Some(Location::Rule(expected)));
        assert!(matches!(err, DerivationError::UnknownClass { ref class, .. } if class == "glide"));
        assert_eq!(log.rule_forms(), vec![("e before vowel", "mja"), ("fine", "nja")]);
    }

    #[test]
    fn removing_from_unknown_class_fails() {
        let cat = catalogue(vec![Stage::new("one").rule(glide_rule()).remove("liquid", &["r"])]);
        let err = Deriver::new(&cat).derive("mea").unwrap_err();
        assert_eq!(err.location(), Some(Location::Mutation { stage: "one", step: 1 }));
    }

    #[test]
    fn removing_a_non_member_is_tolerated() {
        let cat = catalogue(vec![Stage::new("one").remove("consonant", &["x"]).rule(glide_rule())]);
        assert_eq!(Deriver::new(&cat).derive("mea").unwrap(), "mja");
    }

    fn glide_rule() -> crate::Rule {
        rule! { name: "e before vowel", focus: "e", after: "{vowel}", to: "j" }
    }

    #[test]
    fn trace_reports_every_rule_in_order_including_no_ops() {
        let cat = catalogue(vec![
            Stage::new("one")
                .rule(rule! { name: "noop", focus: "x", to: "y" })
                .rule(glide_rule())
                .rule(rule! { name: "quiet", focus: "m", to: "n", trace: false }),
            Stage::new("two").add("consonant", &["j"]).rule(rule! { name: "a>e", focus: "a", to: "e" }),
        ]);
        let mut log = TraceLog::new();
        Deriver::new(&cat).derive_traced("mea", &mut log, TraceFlags::all() - TraceFlags::CHANGES_ONLY).unwrap();

        let expected = vec![
            TraceEvent::Rule { rule: RuleId { stage: "one", step: 0, name: "noop" }, form: "mea".into() },
            TraceEvent::Rule { rule: RuleId { stage: "one", step: 1, name: "e before vowel" }, form: "mja".into() },
            TraceEvent::Stage { stage: "one", form: "nja".into() },
            TraceEvent::Inventory { stage: "two", mutation: Mutation::Add { class: "consonant", symbol: "j" } },
            TraceEvent::Rule { rule: RuleId { stage: "two", step: 1, name: "a>e" }, form: "nje".into() },
            TraceEvent::Stage { stage: "two", form: "nje".into() },
        ];
        assert_eq!(log.events, expected);
    }

    #[test]
    fn changes_only_skips_unchanged_forms() {
        let cat = catalogue(vec![
            Stage::new("one").rule(rule! { name: "noop", focus: "x", to: "y" }).rule(glide_rule()),
        ]);
        let mut log = TraceLog::new();
        Deriver::new(&cat).derive_traced("mea", &mut log, TraceFlags::RULES | TraceFlags::CHANGES_ONLY).unwrap();
        assert_eq!(log.rule_forms(), vec![("e before vowel", "mja")]);
    }

    #[test]
    fn run_returns_snapshots_and_metrics() {
        let cat = catalogue(vec![
            glide(),
            Stage::new("two").rule(rule! { name: "noop", focus: "x", to: "y" }).add("vowel", &["ɛ"]),
        ]);
        let run = Deriver::new(&cat).run("mea", &mut NullSink, TraceFlags::empty()).unwrap();

        assert_eq!(run.input, "mea");
        assert_eq!(run.output, "mja");
        assert_eq!(
            run.stages,
            vec![StageSnapshot { name: "one", form: "mja".into() }, StageSnapshot { name: "two", form: "mja".into() }]
        );
        assert_eq!(run.metrics.stages.len(), 2);
        assert_eq!(run.metrics.rules_applied(), 2);
        assert_eq!(run.metrics.rules_matched(), 1);
        assert_eq!(run.metrics.stages[1].mutations, 1);
        assert!(run.metrics.total >= run.metrics.stages[0].duration);
    }

    #[test]
    fn check_replays_mutations_in_order() {
        let ok = catalogue(vec![
            Stage::new("one").add("glide", &["j"]),
            Stage::new("two").rule(rule! { name: "uses glide", focus: "{glide}", to: "i" }),
        ]);
        assert!(ok.check().is_ok());

        let bad = catalogue(vec![
            Stage::new("one").rule(rule! { name: "uses glide", focus: "{glide}", to: "i" }),
            Stage::new("two").add("glide", &["j"]),
        ]);
        let err = bad.check().unwrap_err();
        assert_eq!(err.location(), Some(Location::Rule(RuleId { stage: "one", step: 0, name: "uses glide" })));

        let broken = catalogue(vec![Stage::new("one").rule(rule! { name: "bad", focus: "a", before: "(", to: "" })]);
        assert!(matches!(broken.check(), Err(DerivationError::InvalidPattern { .. })));
    }

    #[test]
    fn derivers_are_independent() {
        let cat = catalogue(vec![Stage::new("one").remove("vowel", &["a"]), glide()]);
        let mut first = Deriver::new(&cat);
        first.derive("mea").unwrap();

        let second = Deriver::new(&cat);
        assert!(second.inventory().is_member("vowel", "a").unwrap());
    }
}
