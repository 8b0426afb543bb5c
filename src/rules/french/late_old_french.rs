use crate::Stage;

pub(super) fn stage() -> Stage {
    Stage::new("Late Old French")
        .rule(rule! { name: "o to u", focus: "o", not_after: "j", to: "u" })
        .rule(rule! { name: "ɔ to o before sibilants", focus: "ɔ", after: "s|z", to: "o" })
        .rule(rule! { name: "wɛ, ew to œ", focus: "w(/?)ɛ|ew", to: "${1}œ" })
        .rule(rule! {
            name: "stressed œ before ɫ to jœ",
            focus: "/œ",
            not_before: "m|p|b|v|f|k|g",
            after: "ɫ",
            to: "j/œ",
        })
        .rule(rule! { name: "œ before ɫ to jœ", focus: "œ", not_before: "m|p|b|v|f|k|g|/", after: "ɫ", to: "jœ" })
        .rule(rule! { name: "œ to ø", focus: "œ", after: "s|z|t", to: "ø" })
        .add("vowel", &["ø", "œ"])
        // Stress moves to the second element.
        .rule(rule! { name: "yj to ɥi", focus: "(/?)yj", to: "ɥ${1}i" })
        .rule(rule! { name: "y before vowel to ɥ", focus: "y", after: "/?{vowel}", to: "ɥ" })
        .add("consonant", &["ɥ"])
        .rule(rule! { name: "oj, ɔj to wɛ", focus: "(/?)(?:o|ɔ)j", to: "w${1}ɛ" })
        // ɛ from aj is written E until Modern French; it develops on its own.
        .rule(rule! { name: "aj to E", focus: "aj", to: "E" })
        .add("vowel", &["E"])
        .rule(rule! {
            name: "closed e to ɛ",
            focus: "e",
            after: "{consonant-j,ɫ}{2,}|{consonant-j,ɫ}$",
            to: "ɛ",
        })
        .rule(rule! { name: "ʦ to s", focus: "ʦ", to: "s" })
        .rule(rule! { name: "ʧ to ʃ", focus: "ʧ", to: "ʃ" })
        .rule(rule! { name: "ʤ to ʒ", focus: "ʤ", to: "ʒ" })
        .remove("consonant", &["ʦ", "ʧ", "ʤ"])
        .add("consonant", &["ʃ", "ʒ"])
        .rule(rule! { name: "ɫ to w", focus: "ɫ", to: "w" })
        .rule(rule! { name: "s before consonant lengthens", focus: "s", after: "{consonant-j,w,ɥ}", to: ":" })
}
