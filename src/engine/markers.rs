//! Stress and length markers.
//!
//! Markers are literal characters inside the word form. They are not members
//! of any classification, so two things have to happen around them:
//!
//! - **Validation**: before a run, every stress marker must sit immediately
//!   before a nucleus, every length marker immediately after one, and there
//!   may be at most one stress marker.
//! - **Projection**: a context only sees the marker kinds its template
//!   mentions. Every other marker is dropped from the inspected text, which
//!   makes markers transparent to adjacency checks without losing them from
//!   the form itself.

use super::cache::SPAN_MARK;
use super::inventory::Inventory;
use crate::MarkerConvention;
use crate::error::InputError;
use std::borrow::Cow;

/// Check marker placement in `word` against the nucleus classification.
///
/// The empty form is valid and derives to itself.
pub(crate) fn validate(word: &str, markers: &MarkerConvention, inventory: &Inventory) -> Result<(), InputError> {
    let nucleus = markers.nucleus;
    let mut stress_seen = false;

    for (pos, c) in word.char_indices() {
        if c == SPAN_MARK {
            return Err(InputError::ReservedCharacter { position: pos });
        }
        if !markers.is_marker(c) {
            continue;
        }

        if c == markers.stress {
            if stress_seen {
                return Err(InputError::MultipleStress { position: pos });
            }
            stress_seen = true;

            let rest = &word[pos + c.len_utf8()..];
            if !starts_with_member(inventory, nucleus, rest) {
                return Err(InputError::StressNotBeforeNucleus { position: pos, nucleus });
            }
        } else {
            let head = &word[..pos];
            if !ends_with_member(inventory, nucleus, head) {
                return Err(InputError::LengthNotAfterNucleus { position: pos, nucleus });
            }
        }
    }

    Ok(())
}

// An unknown nucleus class means nothing can carry a marker.
fn starts_with_member(inventory: &Inventory, class: &str, text: &str) -> bool {
    matches!(inventory.leading_member(class, text), Ok(Some(_)))
}

fn ends_with_member(inventory: &Inventory, class: &str, text: &str) -> bool {
    matches!(inventory.trailing_member(class, text), Ok(Some(_)))
}

/// Which marker characters a context strips before matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Projection {
    hidden: Vec<char>,
}

impl Projection {
    /// Hide every marker kind that `template` does not mention.
    pub(crate) fn for_template(template: &str, markers: &MarkerConvention) -> Self {
        let plain = strip_group_flags(template);
        let hidden =
            [markers.stress, markers.length].into_iter().filter(|m| !plain.contains(*m)).collect::<Vec<char>>();
        Projection { hidden }
    }

    pub(crate) fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.hidden.is_empty() || !text.contains(self.hidden.as_slice()) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(text.chars().filter(|c| !self.hidden.contains(c)).collect())
    }
}

// `(?:`, `(?i)`, `(?i:` and friends contain ':' without meaning a length mark.
fn strip_group_flags(template: &str) -> Cow<'_, str> {
    regex!(r"\(\?[A-Za-z-]*[:)]").replace_all(template, "(")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Baseline;

    const BASELINE: Baseline = &[("vowel", &["a", "e", "ɛ"]), ("consonant", &["k", "t"])];

    fn bang() -> MarkerConvention {
        MarkerConvention { stress: '!', length: ':', nucleus: "vowel" }
    }

    #[test]
    fn accepts_well_placed_markers() {
        let inv = Inventory::new(BASELINE);
        assert_eq!(validate("ka!e:t", &bang(), &inv), Ok(()));
        assert_eq!(validate("k!ɛ:t", &bang(), &inv), Ok(()));
        assert_eq!(validate("kat", &bang(), &inv), Ok(()));
        assert_eq!(validate("", &bang(), &inv), Ok(()));
    }

    #[test]
    fn rejects_misplaced_markers() {
        let inv = Inventory::new(BASELINE);
        assert_eq!(validate("ka\u{FFFF}", &bang(), &inv), Err(InputError::ReservedCharacter { position: 2 }));
        assert_eq!(
            validate("!ka", &bang(), &inv),
            Err(InputError::StressNotBeforeNucleus { position: 0, nucleus: "vowel" })
        );
        assert_eq!(
            validate("ka!", &bang(), &inv),
            Err(InputError::StressNotBeforeNucleus { position: 2, nucleus: "vowel" })
        );
        assert_eq!(
            validate("k:a", &bang(), &inv),
            Err(InputError::LengthNotAfterNucleus { position: 1, nucleus: "vowel" })
        );
        assert_eq!(
            validate("ka::", &bang(), &inv),
            Err(InputError::LengthNotAfterNucleus { position: 3, nucleus: "vowel" })
        );
        assert_eq!(validate("!ak!e", &bang(), &inv), Err(InputError::MultipleStress { position: 3 }));
    }

    #[test]
    fn projection_hides_unmentioned_markers() {
        let markers = MarkerConvention::default();

        let plain = Projection::for_template("{vowel}", &markers);
        assert_eq!(plain.apply("/a:t"), "at");

        let stress_aware = Projection::for_template("/?{vowel}", &markers);
        assert_eq!(stress_aware.apply("/a:t"), "/at");

        let length_aware = Projection::for_template("(?:e|i):", &markers);
        assert_eq!(length_aware.apply("/a:t"), "a:t");
    }

    #[test]
    fn group_syntax_is_not_a_length_mention() {
        let markers = MarkerConvention::default();
        let projection = Projection::for_template("(?:m|n)(?i:x)", &markers);
        assert_eq!(projection.apply("a:m"), "am");
    }

    #[test]
    fn projection_borrows_when_nothing_to_hide() {
        let markers = MarkerConvention::default();
        let projection = Projection::for_template("{vowel}", &markers);
        assert!(matches!(projection.apply("kat"), Cow::Borrowed(_)));
    }
}
