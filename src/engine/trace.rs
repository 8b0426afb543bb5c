//! Diagnostic trace interface.
//!
//! The deriver reports what happens during a run to a caller-supplied
//! [`TraceSink`]. The engine never decides where the trace goes; it only
//! guarantees ordering: events arrive in exactly the order the steps run.
//!
//! Which events are produced is controlled by [`TraceFlags`]. With
//! `TraceFlags::empty()` the sink is never called.

use super::inventory::Mutation;
use crate::RuleId;

bitflags::bitflags! {
    /// Which events a derivation reports to its sink.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TraceFlags: u8 {
        /// One event per rule application (including zero-match ones).
        const RULES        = 1 << 0;
        /// One event per completed stage.
        const STAGES       = 1 << 1;
        /// One event per inventory mutation.
        const INVENTORY    = 1 << 2;
        /// Drop rule events whose application left the form unchanged.
        const CHANGES_ONLY = 1 << 3;
    }
}

/// Receives derivation events.
pub trait TraceSink {
    /// Called after a rule application with the form it produced.
    fn emit(&mut self, form: &str, rule: RuleId);

    fn stage_completed(&mut self, _stage: &'static str, _form: &str) {}

    fn inventory_changed(&mut self, _stage: &'static str, _mutation: &Mutation) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn emit(&mut self, _form: &str, _rule: RuleId) {}
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Rule { rule: RuleId, form: String },
    Stage { stage: &'static str, form: String },
    Inventory { stage: &'static str, mutation: Mutation },
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEvent::Rule { rule, form } => write!(f, "{form}  ({rule})"),
            TraceEvent::Stage { stage, form } => write!(f, "{form}  [{stage}]"),
            TraceEvent::Inventory { stage, mutation } => write!(f, "{mutation}  [{stage}]"),
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default, Clone)]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule events only, as `(rule name, form)` pairs.
    pub fn rule_forms(&self) -> Vec<(&'static str, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Rule { rule, form } => Some((rule.name, form.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, form: &str, rule: RuleId) {
        self.events.push(TraceEvent::Rule { rule, form: form.to_string() });
    }

    fn stage_completed(&mut self, stage: &'static str, form: &str) {
        self.events.push(TraceEvent::Stage { stage, form: form.to_string() });
    }

    fn inventory_changed(&mut self, stage: &'static str, mutation: &Mutation) {
        self.events.push(TraceEvent::Inventory { stage, mutation: mutation.clone() });
    }
}

/// Forwards events to `tracing` at debug level, target `phonoshift::trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&mut self, form: &str, rule: RuleId) {
        tracing::debug!(target: "phonoshift::trace", stage = rule.stage, step = rule.step, rule = rule.name, form);
    }

    fn stage_completed(&mut self, stage: &'static str, form: &str) {
        tracing::debug!(target: "phonoshift::trace", stage, form, "stage completed");
    }

    fn inventory_changed(&mut self, stage: &'static str, mutation: &Mutation) {
        tracing::debug!(target: "phonoshift::trace", stage, %mutation, "inventory changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &'static str) -> RuleId {
        RuleId { stage: "s", step: 0, name }
    }

    #[test]
    fn log_keeps_event_order() {
        let mut log = TraceLog::new();
        log.inventory_changed("s", &Mutation::Add { class: "consonant", symbol: "k" });
        log.emit("ak", id("first"));
        log.emit("ok", id("second"));
        log.stage_completed("s", "ok");

        assert_eq!(log.events.len(), 4);
        assert_eq!(log.rule_forms(), vec![("first", "ak"), ("second", "ok")]);
        assert!(matches!(log.events.last(), Some(TraceEvent::Stage { stage: "s", .. })));
    }

    #[test]
    fn events_render_for_humans() {
        let rule = TraceEvent::Rule { rule: id("glide"), form: "mja".into() };
        assert_eq!(rule.to_string(), "mja  (s#0 \"glide\")");

        let inv = TraceEvent::Inventory { stage: "s", mutation: Mutation::Remove { class: "vowel", symbol: "e" } };
        assert_eq!(inv.to_string(), "-e vowel  [s]");
    }

    #[test]
    fn default_flags_are_empty() {
        assert!(TraceFlags::default().is_empty());
        assert!(TraceFlags::all().contains(TraceFlags::RULES | TraceFlags::STAGES));
    }
}
