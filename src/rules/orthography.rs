//! Latin spelling to phonemic spelling.
//!
//! A small one-stage catalogue run ahead of [`french`](super::french) when
//! the caller hands in words as they are written in Latin. Stress and length
//! markers are carried through untouched.

use crate::{Baseline, Catalogue, MarkerConvention, Stage};

const BASELINE: Baseline = &[
    ("vowel", &["a", "e", "i", "o", "u", "y"]),
    (
        "consonant",
        &["b", "c", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "q", "r", "s", "t", "v", "w", "x", "z"],
    ),
];

pub fn catalogue() -> Catalogue {
    Catalogue {
        name: "latin orthography",
        markers: MarkerConvention::default(),
        baseline: BASELINE,
        stages: vec![spelling()],
    }
}

fn spelling() -> Stage {
    Stage::new("Spelling")
        .rule(rule! { name: "c is always /k/", focus: "c", to: "k" })
        .rule(rule! { name: "qu", focus: "qu", to: "kw" })
        .rule(rule! { name: "gu before a vowel", focus: "gu", after: "/?{vowel}", to: "gw" })
        .rule(rule! { name: "x", focus: "x", to: "ks" })
        .rule(rule! { name: "ae", focus: "ae", to: "aj" })
        .rule(rule! { name: "oe", focus: "oe", to: "oj" })
        .rule(rule! { name: "y", focus: "y", to: "i" })
        .rule(rule! { name: "au", focus: "au", to: "aw" })
}
