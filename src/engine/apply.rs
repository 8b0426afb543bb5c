//! Rule application primitive.
//!
//! Applying a rule is one left-to-right pass over the word form:
//!
//! ```text
//! resolve focus + contexts against the live inventory
//!        │
//!        ▼
//! cursor = 0
//! loop: leftmost focus match at or after cursor
//!         ├─ contexts hold and guard passes ─▶ substitute, cursor = match end
//!         ├─ another end at this start passes ▶ substitute that span instead
//!         └─ otherwise ─────────────────────▶ cursor = match start + 1 char
//! ```
//!
//! A rejected candidate is retried with every other end its focus can reach
//! from the same start, longest first. The regex engine has no lookaround, so
//! each end is pinned by matching against a copy of the word with a
//! [`SPAN_MARK`] inserted there (or with `$` when the end is the end of the
//! word).
//!
//! Contexts and guards are evaluated against the input form of *this*
//! application, and substituted spans are never revisited, so matches cannot
//! overlap and a rule whose output re-matches its own focus cannot loop.

use super::cache::{Anchor, PatternCache, SPAN_MARK};
use super::inventory::Inventory;
use super::markers::Projection;
use super::template;
use crate::error::{DerivationError, Location};
use crate::{Context, MarkerConvention, Rule, RuleId, Side};
use regex::Regex;
use std::borrow::Cow;

/// Outcome of one rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Applied {
    pub(crate) form: String,
    /// Number of substitutions performed.
    pub(crate) matches: usize,
}

impl Applied {
    pub(crate) fn changed(&self, input: &str) -> bool {
        self.form != input
    }
}

/// A context with its pattern resolved and compiled for this application.
struct ResolvedContext {
    side: Side,
    negated: bool,
    regex: Regex,
    projection: Projection,
}

impl ResolvedContext {
    fn holds(&self, word: &str, start: usize, end: usize) -> bool {
        let text = match self.side {
            Side::Before => &word[..start],
            Side::After => &word[end..],
        };
        self.regex.is_match(&self.projection.apply(text)) != self.negated
    }
}

/// Resolve `template` against the current inventory and compile it.
pub(super) fn compile(
    template: &str,
    anchor: Anchor,
    location: Location,
    inventory: &Inventory,
    cache: &mut PatternCache,
) -> Result<Regex, DerivationError> {
    let resolved = template::resolve(template, inventory).map_err(|e| DerivationError::from_template(location, e))?;
    compile_resolved(&resolved, anchor, location, cache)
}

fn compile_resolved(
    resolved: &str,
    anchor: Anchor,
    location: Location,
    cache: &mut PatternCache,
) -> Result<Regex, DerivationError> {
    cache.get(resolved, anchor).map_err(|(pattern, source)| DerivationError::InvalidPattern {
        location,
        pattern,
        source,
    })
}

fn resolve_context(
    context: &Context,
    location: Location,
    markers: &MarkerConvention,
    inventory: &Inventory,
    cache: &mut PatternCache,
) -> Result<ResolvedContext, DerivationError> {
    let anchor = Anchor::for_side(context.side);
    Ok(ResolvedContext {
        side: context.side,
        negated: context.negated,
        regex: compile(context.template, anchor, location, inventory, cache)?,
        projection: Projection::for_template(context.template, markers),
    })
}

/// Byte offset of the character after `pos`, or past the end of `word`.
fn step_past(word: &str, pos: usize) -> usize {
    word[pos..].chars().next().map_or(word.len() + 1, |c| pos + c.len_utf8())
}

/// Apply `rule` once to `word` using the inventory as it is right now.
pub(crate) fn apply_rule(
    rule: &Rule,
    id: RuleId,
    word: &str,
    markers: &MarkerConvention,
    inventory: &Inventory,
    cache: &mut PatternCache,
) -> Result<Applied, DerivationError> {
    let location = Location::Rule(id);
    let resolved =
        template::resolve(rule.focus, inventory).map_err(|e| DerivationError::from_template(location, e))?;
    let focus = compile_resolved(&resolved, Anchor::None, location, cache)?;
    let retry = can_vary(&resolved) && !word.contains(SPAN_MARK);
    let contexts = rule
        .contexts
        .iter()
        .map(|c| resolve_context(c, location, markers, inventory, cache))
        .collect::<Result<Vec<_>, _>>()?;

    let mut form = String::with_capacity(word.len());
    let mut copied = 0;
    let mut cursor = 0;
    let mut matches = 0;

    while cursor <= word.len() {
        let Some(caps) = focus.captures_at(word, cursor) else { break };
        let Some(m) = caps.get(0) else { break };

        let (start, end) = (m.start(), m.end());
        let accepted =
            contexts.iter().all(|c| c.holds(word, start, end)) && rule.guard.is_none_or(|guard| guard(&caps));

        let end = if accepted {
            form.push_str(&word[copied..start]);
            caps.expand(rule.replacement, &mut form);
            end
        } else {
            let span = Span { word, start, rejected: end };
            let retried = if retry { retry_span(rule, &resolved, &contexts, span, location, cache)? } else { None };
            match retried {
                Some((end, replacement)) => {
                    form.push_str(&word[copied..start]);
                    form.push_str(&replacement);
                    end
                }
                None => {
                    cursor = step_past(word, start);
                    continue;
                }
            }
        };

        copied = end;
        matches += 1;
        cursor = if end == start { step_past(word, end) } else { end };
    }

    form.push_str(&word[copied..]);
    Ok(Applied { form, matches })
}

/// A focus can reach more than one end from a start only through
/// alternation, optional parts or repetition.
fn can_vary(resolved: &str) -> bool {
    resolved.contains(['|', '?', '*', '+', '{'])
}

/// A rejected focus candidate.
#[derive(Clone, Copy)]
struct Span<'w> {
    word: &'w str,
    start: usize,
    rejected: usize,
}

/// Find another end for the focus at `span.start` whose span passes the
/// contexts and the guard. Returns the end and the expanded replacement.
fn retry_span(
    rule: &Rule,
    resolved: &str,
    contexts: &[ResolvedContext],
    span: Span<'_>,
    location: Location,
    cache: &mut PatternCache,
) -> Result<Option<(usize, String)>, DerivationError> {
    let Span { word, start, rejected } = span;
    let ends: Vec<usize> =
        word[start..].char_indices().map(|(i, _)| start + i).chain(std::iter::once(word.len())).collect();

    for &end in ends.iter().rev().filter(|&&end| end != rejected) {
        let (haystack, anchor) = if end == word.len() {
            (Cow::Borrowed(word), Anchor::End)
        } else {
            let mut marked = String::with_capacity(word.len() + SPAN_MARK.len_utf8());
            marked.push_str(&word[..end]);
            marked.push(SPAN_MARK);
            marked.push_str(&word[end..]);
            (Cow::Owned(marked), Anchor::Mark)
        };

        let pinned = compile_resolved(resolved, anchor, location, cache)?;
        let Some(caps) = pinned.captures_at(&haystack, start) else { continue };
        if caps.get(0).is_none_or(|m| m.start() != start) {
            continue;
        }
        if !contexts.iter().all(|c| c.holds(word, start, end)) || rule.guard.is_some_and(|guard| !guard(&caps)) {
            continue;
        }

        let mut replacement = String::new();
        caps.expand(rule.replacement, &mut replacement);
        replacement.retain(|c| c != SPAN_MARK);
        return Ok(Some((end, replacement)));
    }

    Ok(None)
}
