//! Symbol inventory.
//!
//! The inventory maps a classification name (`"vowel"`, `"consonant"`, ...) to
//! the set of symbols currently filed under it. Symbols are strings, so a
//! digraph standing for one phoneme (`"kʷ"`) is a single member.
//!
//! An inventory is owned by exactly one [`Deriver`](super::Deriver) and is
//! restored to the catalogue baseline at the start of every run. Mutations are
//! visible to the very next step that reads the inventory.
//!
//! ## Rendering
//!
//! [`Inventory::render`] turns the *current* membership into a non-capturing
//! alternation, `(?:kʷ|b|d|...)`. Members are escaped and ordered longest
//! first so a multi-character symbol wins over its own prefix under
//! leftmost-first alternation. Ties are broken lexically, which keeps the
//! rendered text (and with it the pattern cache key) deterministic.

use crate::error::InventoryError;
use crate::{Baseline, Step};
use std::collections::{BTreeSet, HashMap};

/// Pattern text that can never match. Used when a classification renders to
/// no members, so the referencing rule vacuously matches nothing.
pub(crate) const NEVER: &str = r"[^\x00-\x{10FFFF}]";

/// An inventory change, as performed by a stage step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Add { class: &'static str, symbol: &'static str },
    Remove { class: &'static str, symbol: &'static str },
}

impl Mutation {
    /// Expand a stage step into individual mutations (`None` for rules).
    pub(crate) fn from_step(step: &Step) -> Option<Vec<Mutation>> {
        match step {
            Step::Apply(_) => None,
            Step::Add { class, symbols } => {
                Some(symbols.iter().map(|symbol| Mutation::Add { class: *class, symbol: *symbol }).collect())
            }
            Step::Remove { class, symbols } => {
                Some(symbols.iter().map(|symbol| Mutation::Remove { class: *class, symbol: *symbol }).collect())
            }
        }
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutation::Add { class, symbol } => write!(f, "+{symbol} {class}"),
            Mutation::Remove { class, symbol } => write!(f, "-{symbol} {class}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Inventory {
    baseline: Baseline,
    classes: HashMap<String, BTreeSet<String>>,
}

impl Inventory {
    /// Create an inventory seeded with `baseline`.
    pub fn new(baseline: Baseline) -> Self {
        let mut inventory = Inventory { baseline, classes: HashMap::new() };
        inventory.reset();
        inventory
    }

    /// Restore the baseline membership, dropping every class added since.
    pub fn reset(&mut self) {
        self.classes.clear();
        for (class, symbols) in self.baseline {
            let members = symbols.iter().map(|s| s.to_string()).collect();
            self.classes.insert(class.to_string(), members);
        }
    }

    pub fn contains_class(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    pub fn members(&self, class: &str) -> Result<&BTreeSet<String>, InventoryError> {
        self.classes.get(class).ok_or_else(|| InventoryError::UnknownClass(class.to_string()))
    }

    pub fn is_member(&self, class: &str, symbol: &str) -> Result<bool, InventoryError> {
        Ok(self.members(class)?.contains(symbol))
    }

    /// Add `symbol` to `class`. Adding to a class that does not exist yet
    /// creates it. Returns `false` when the symbol was already a member.
    pub fn add(&mut self, class: &str, symbol: &str) -> bool {
        self.classes.entry(class.to_string()).or_default().insert(symbol.to_string())
    }

    /// Remove `symbol` from `class`. Returns `false` when it was not a member.
    pub fn remove(&mut self, class: &str, symbol: &str) -> Result<bool, InventoryError> {
        let members =
            self.classes.get_mut(class).ok_or_else(|| InventoryError::UnknownClass(class.to_string()))?;
        Ok(members.remove(symbol))
    }

    pub(crate) fn apply(&mut self, mutation: &Mutation) -> Result<bool, InventoryError> {
        match mutation {
            Mutation::Add { class, symbol } => Ok(self.add(class, symbol)),
            Mutation::Remove { class, symbol } => self.remove(class, symbol),
        }
    }

    /// Render the current members of `class`, minus `excluded`, as a
    /// non-capturing alternation.
    pub fn render(&self, class: &str, excluded: &[&str]) -> Result<String, InventoryError> {
        let mut symbols: Vec<&str> =
            self.members(class)?.iter().map(String::as_str).filter(|s| !excluded.contains(s)).collect();

        if symbols.is_empty() {
            return Ok(NEVER.to_string());
        }

        symbols.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));

        let alternatives: Vec<String> = symbols.iter().map(|s| regex::escape(s)).collect();
        Ok(format!("(?:{})", alternatives.join("|")))
    }

    /// Longest member of `class` that `text` starts with.
    pub(crate) fn leading_member<'t>(&self, class: &str, text: &'t str) -> Result<Option<&'t str>, InventoryError> {
        let found = self.members(class)?.iter().filter(|m| text.starts_with(m.as_str())).map(String::len).max();
        Ok(found.map(|len| &text[..len]))
    }

    /// Longest member of `class` that `text` ends with.
    pub(crate) fn trailing_member<'t>(
        &self,
        class: &str,
        text: &'t str,
    ) -> Result<Option<&'t str>, InventoryError> {
        let found = self.members(class)?.iter().filter(|m| text.ends_with(m.as_str())).map(String::len).max();
        Ok(found.map(|len| &text[text.len() - len..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASELINE: Baseline = &[("vowel", &["a", "e"]), ("consonant", &["t", "s"])];

    #[test]
    fn render_orders_longest_first() {
        let mut inv = Inventory::new(BASELINE);
        inv.add("consonant", "kʷ");
        inv.add("consonant", "k");

        assert_eq!(inv.render("consonant", &[]).unwrap(), "(?:kʷ|k|s|t)");
        assert_eq!(inv.render("consonant", &["s", "kʷ"]).unwrap(), "(?:k|t)");
    }

    #[test]
    fn render_escapes_members() {
        let mut inv = Inventory::new(BASELINE);
        inv.add("punct", ".");
        assert_eq!(inv.render("punct", &[]).unwrap(), r"(?:\.)");
    }

    #[test]
    fn fully_excluded_class_never_matches() {
        let inv = Inventory::new(BASELINE);
        let rendered = inv.render("vowel", &["a", "e"]).unwrap();
        assert_eq!(rendered, NEVER);

        let re = regex::Regex::new(&rendered).unwrap();
        assert!(!re.is_match("ae"));
        assert!(!re.is_match(""));
    }

    #[test]
    fn unknown_class_is_an_error() {
        let mut inv = Inventory::new(BASELINE);
        assert_eq!(inv.render("glide", &[]), Err(InventoryError::UnknownClass("glide".to_string())));
        assert_eq!(inv.remove("glide", "j"), Err(InventoryError::UnknownClass("glide".to_string())));
        assert!(inv.members("glide").is_err());
    }

    #[test]
    fn add_creates_class_and_remove_reports_membership() {
        let mut inv = Inventory::new(BASELINE);
        assert!(inv.add("glide", "j"));
        assert!(!inv.add("glide", "j"));
        assert!(inv.is_member("glide", "j").unwrap());

        assert_eq!(inv.remove("glide", "j"), Ok(true));
        assert_eq!(inv.remove("glide", "j"), Ok(false));
        assert!(inv.contains_class("glide"));
    }

    #[test]
    fn reset_restores_baseline() {
        let mut inv = Inventory::new(BASELINE);
        inv.add("consonant", "k");
        inv.add("glide", "w");
        inv.remove("vowel", "a").unwrap();

        inv.reset();

        assert!(!inv.contains_class("glide"));
        assert!(inv.is_member("vowel", "a").unwrap());
        assert!(!inv.is_member("consonant", "k").unwrap());
        assert_eq!(inv.members("consonant").unwrap().len(), 2);
    }

    #[test]
    fn leading_and_trailing_members_prefer_longest() {
        let mut inv = Inventory::new(BASELINE);
        inv.add("vowel", "ae");

        assert_eq!(inv.leading_member("vowel", "aet").unwrap(), Some("ae"));
        assert_eq!(inv.leading_member("vowel", "ta").unwrap(), None);
        assert_eq!(inv.trailing_member("vowel", "tae").unwrap(), Some("ae"));
        assert_eq!(inv.trailing_member("vowel", "tea").unwrap(), Some("a"));
    }
}
