use crate::Stage;

pub(super) fn stage() -> Stage {
    Stage::new("Middle French")
        .rule(rule! { name: "aw to o", focus: "aw", to: "o" })
        .rule(rule! { name: "stressed ɛw to o", focus: "/ɛw", not_before: "j", to: "/o" })
        .rule(rule! { name: "ɛw to o", focus: "ɛw", not_before: "j|/", to: "o" })
        .rule(rule! { name: "front vowel and w to œ", focus: "(?:ɛ|e|œ)w", to: "œ" })
        .rule(rule! { name: "œ to ø", focus: "œ", after: "s|z|t", to: "ø" })
        .rule(rule! { name: "uw to u", focus: "uw", to: "u" })
        .rule(rule! { name: "ej to ɛ", focus: "ej", to: "ɛ" })
        .rule(rule! { name: "nasal u to ɔ", focus: "u~", to: "ɔ~" })
        .rule(rule! {
            name: "denasalization before nasal consonant",
            focus: "~",
            after: "(?:n|m|ɲ)(?:/?{vowel}|j|w)",
            to: "",
        })
        .rule(rule! { name: "nasal lost after nasal vowel", focus: "n|m|ɲ", before: "~", to: "" })
}
