//! Compiled pattern cache.
//!
//! Rule templates are resolved against the live inventory on every
//! application, so the engine cannot compile rules once up front. What it can
//! do is remember the compiled form of every *resolved* pattern it has seen:
//! the key is the fully rendered text, so a membership change produces a new
//! key and a fresh compile, while repeated runs over the same inventory state
//! hit the cache.
//!
//! ## Invariants
//!
//! - The key is always a resolved pattern (no `{class}` references left).
//! - A cache belongs to one `Deriver`; it is never shared between threads.

use crate::Side;
use regex::Regex;
use std::collections::HashMap;

/// Placed into a copy of the word to pin where a focus match must end.
/// A noncharacter, so it never occurs in a validated form.
pub(crate) const SPAN_MARK: char = '\u{FFFF}';

/// Shape a resolved context template must be compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Anchor {
    /// Match anywhere (rule focus).
    None,
    /// Match must end at the end of the inspected text.
    End,
    /// Match must start at the beginning of the inspected text.
    Start,
    /// Match must end right before a [`SPAN_MARK`].
    Mark,
}

impl Anchor {
    pub(crate) fn for_side(side: Side) -> Self {
        match side {
            Side::Before => Anchor::End,
            Side::After => Anchor::Start,
        }
    }

    fn wrap(self, resolved: &str) -> String {
        match self {
            Anchor::None => resolved.to_string(),
            Anchor::End => format!("(?:{resolved})$"),
            Anchor::Start => format!("^(?:{resolved})"),
            Anchor::Mark => format!("(?:{resolved})\\x{{FFFF}}"),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct PatternCache {
    compiled: HashMap<String, Regex>,
    hits: usize,
    misses: usize,
}

impl PatternCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Compile (or fetch) `resolved` wrapped for `anchor`.
    ///
    /// On failure the error carries the full pattern text that was rejected.
    pub(crate) fn get(&mut self, resolved: &str, anchor: Anchor) -> Result<Regex, (String, regex::Error)> {
        let source = anchor.wrap(resolved);
        if let Some(re) = self.compiled.get(&source) {
            self.hits += 1;
            return Ok(re.clone());
        }

        self.misses += 1;
        tracing::trace!(pattern = %source, "compiling resolved pattern");
        match Regex::new(&source) {
            Ok(re) => {
                self.compiled.insert(source, re.clone());
                Ok(re)
            }
            Err(err) => Err((source, err)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.compiled.len()
    }

    /// `(hits, misses)` since the cache was created.
    pub(crate) fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_wrap_alternations_as_a_unit() {
        let mut cache = PatternCache::new();

        let end = cache.get("k|g", Anchor::End).unwrap();
        assert!(end.is_match("ak"));
        assert!(!end.is_match("ka"));
        assert_eq!(end.as_str(), "(?:k|g)$");

        let start = cache.get("r|l", Anchor::Start).unwrap();
        assert!(start.is_match("la"));
        assert!(!start.is_match("al"));

        let mark = cache.get("k|kt", Anchor::Mark).unwrap();
        assert_eq!(mark.as_str(), "(?:k|kt)\\x{FFFF}");
        assert_eq!(mark.find("kt\u{FFFF}a").map(|m| m.start()), Some(0));
        assert!(!mark.is_match("kta"));
    }

    #[test]
    fn reuses_compiled_patterns() {
        let mut cache = PatternCache::new();
        cache.get("a", Anchor::None).unwrap();
        cache.get("a", Anchor::None).unwrap();
        cache.get("a", Anchor::Start).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats(), (1, 2));
    }

    #[test]
    fn reports_rejected_source() {
        let mut cache = PatternCache::new();
        let (source, _) = cache.get("(a", Anchor::Start).unwrap_err();
        assert_eq!(source, "^(?:(a)");
        assert_eq!(cache.len(), 0);
    }
}
