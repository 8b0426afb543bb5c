use crate::Stage;

pub(super) fn stage() -> Stage {
    Stage::new("Modern French")
        .rule(rule! { name: "r to ʁ", focus: "r", to: "ʁ" })
        .remove("consonant", &["r"])
        .add("consonant", &["ʁ"])
        .rule(rule! { name: "ʎ to j", focus: "ʎ", to: "j" })
        .rule(rule! { name: "ə lost", focus: "ə", to: "" })
        .rule(rule! { name: "nasal i, e, y to ɛ", focus: "i|e|y", after: "~", to: "ɛ" })
        .rule(rule! { name: "ɑ to a", focus: "ɑ", to: "a" })
        .rule(rule! { name: "nasal a to ɑ", focus: "a~", to: "ɑ~" })
        .rule(rule! { name: "final ɔ to o", focus: "ɔ$", to: "o" })
        .rule(rule! { name: "final ɛ to e", focus: "ɛ$", to: "e" })
        .rule(rule! { name: "final œ to ø", focus: "œ$", to: "ø" })
        .rule(rule! { name: "E to ɛ", focus: "E", to: "ɛ" })
        .remove("vowel", &["E"])
}
