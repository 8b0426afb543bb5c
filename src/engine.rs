//! Sound-change engine.
//!
//! This module is the *public entry point* for running a word through a
//! [`Catalogue`](crate::Catalogue). The engine is split into focused
//! submodules under `src/engine/` while keeping public paths flat (for
//! example `crate::engine::Deriver` and `crate::engine::Inventory`).
//!
//! ## How the parts work together
//!
//! Deriving one word is a pipeline:
//!
//! ```text
//! word ── markers::validate ──┐                       (markers.rs)
//!                             v
//!              Deriver::run, stage by stage           (deriver.rs)
//!                │
//!                ├─ Step::Add / Step::Remove ─▶ Inventory           (inventory.rs)
//!                │
//!                └─ Step::Apply(rule) ─▶ apply_rule                 (apply.rs)
//!                       - template::resolve against the live
//!                         inventory                                 (template.rs)
//!                       - PatternCache::get                         (cache.rs)
//!                       - one left-to-right pass, contexts read
//!                         through a marker Projection               (markers.rs)
//!                       - TraceSink::emit                           (trace.rs)
//!                               │
//!                               v
//!                      Derivation { output, stages, metrics }       (metrics.rs)
//! ```
//!
//! The engine leans on **late resolution**: classification references are
//! turned into alternations immediately before every rule application, so a
//! symbol filed under a class by an earlier step is visible to the very next
//! rule. The pattern cache is keyed by resolved text, so it never serves a
//! stale alternation.
//!
//! ## Responsibilities by module
//!
//! - `inventory.rs`: the classification registry and its rendering.
//! - `template.rs`: `{class}` / `{class-x,y}` reference resolution.
//! - `markers.rs`: stress/length validation and marker-transparent views.
//! - `cache.rs`: compiled regexes keyed by resolved source.
//! - `apply.rs`: the single-pass rewrite primitive.
//! - `deriver.rs`: stage execution, run orchestration, catalogue checking.
//! - `trace.rs`: the diagnostic sink interface and stock sinks.
//! - `metrics.rs`: timing and counters for runs and stages.
//!
//! ## Debugging
//!
//! Set `PHONOSHIFT_DEBUG_RULES=1` to route every rule application through
//! [`TracingSink`] on the default API path, and `PHONOSHIFT_LOG=debug` to see
//! it in the CLI.

#[path = "engine/apply.rs"]
mod apply;
#[path = "engine/cache.rs"]
mod cache;
#[path = "engine/deriver.rs"]
mod deriver;
#[path = "engine/inventory.rs"]
mod inventory;
#[path = "engine/markers.rs"]
mod markers;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/template.rs"]
mod template;
#[path = "engine/trace.rs"]
mod trace;

#[allow(unused_imports)]
pub use deriver::{Derivation, Deriver, StageSnapshot};
#[allow(unused_imports)]
pub use inventory::{Inventory, Mutation};
#[allow(unused_imports)]
pub use metrics::{RunMetrics, StageMetrics};
#[allow(unused_imports)]
pub use trace::{NullSink, TraceEvent, TraceFlags, TraceLog, TraceSink, TracingSink};
