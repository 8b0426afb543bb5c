use crate::Stage;

pub(super) fn stage() -> Stage {
    Stage::new("Old French")
        .rule(rule! { name: "f, p, k lost before final s, t", focus: "f|p|k", after: "s$|t$", to: "" })
        .rule(rule! {
            name: "low vowels nasalize",
            focus: "((?:a|e|o|ɛ|ɔ|ɑ)(?:w|j)?)",
            after: "m|n|ɲ",
            to: "${1}~",
        })
        // Nasalization blocks the next three.
        .rule(rule! { name: "ej to oj", focus: "ej", not_after: "~", to: "oj" })
        .rule(rule! { name: "ow to ew", focus: "ow", not_after: "p|b|v|f|m|~", to: "ew" })
        .rule(rule! { name: "wɔ to wɛ", focus: "w(/?)ɔ", not_after: "~", to: "w${1}ɛ" })
        .rule(rule! { name: "a to ɑ before sibilants", focus: "a", after: "s|z", to: "ɑ" })
        .add("vowel", &["ɑ"])
        .rule(rule! { name: "θ, ð lost", focus: "θ|ð", to: "" })
        .rule(rule! { name: "a in hiatus to ə", focus: "a", after: "{vowel}", to: "ə" })
        .remove("consonant", &["θ", "ð"])
        .rule(rule! { name: "kʷ to k", focus: "kʷ", to: "k" })
        .rule(rule! { name: "gʷ to g", focus: "gʷ", to: "g" })
        .remove("consonant", &["kʷ", "gʷ"])
        .rule(rule! { name: "u to y", focus: "u", to: "y" })
        .add("vowel", &["y"])
        .rule(rule! { name: "stressed nasal e, ɛ to a", focus: "/(?:e|ɛ)", not_before: "j", after: "~", to: "/a" })
        .rule(rule! { name: "nasal e, ɛ to a", focus: "e|ɛ", not_before: "j|/", after: "~", to: "a" })
        .rule(rule! { name: "high vowels nasalize", focus: "((?:i|u|y)(?:w|j)?)", after: "m|n|ɲ", to: "${1}~" })
        .rule(rule! { name: "e, ɛ in hiatus to ə", focus: "e|ɛ", after: "/{vowel}|(?:w|j)/{vowel}", to: "ə" })
        .rule(rule! { name: "final rn, rm to r", focus: "r(?:n|m)$", to: "r" })
}
