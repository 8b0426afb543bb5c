use crate::Stage;

pub(super) fn stage() -> Stage {
    Stage::new("Proto-Western-Romance")
        .rule(rule! { name: "kw to kʷ", focus: "kw", to: "kʷ" })
        .rule(rule! { name: "gw to gʷ", focus: "gw", to: "gʷ" })
        .add("consonant", &["kʷ", "gʷ"])
        .rule(rule! { name: "kʷ dissimilates", focus: "kʷ", after: ".+kʷ", to: "k" })
        .rule(rule! { name: "prothetic i", focus: "^", after: "s{consonant}", to: "i" })
        // Ten vowels become seven.
        .rule(rule! { name: "a: shortens", focus: "a:", to: "a" })
        .rule(rule! { name: "aj to ɛ", focus: "aj", after: "{consonant}|$", to: "ɛ" })
        .rule(rule! { name: "short e to ɛ", focus: "e", not_after: ":", to: "ɛ" })
        .rule(rule! { name: "oj to e", focus: "oj", after: "{consonant}|$", to: "e" })
        .rule(rule! { name: "e: to e", focus: "e:", to: "e" })
        .rule(rule! { name: "short i to e", focus: "i", not_after: ":", to: "e" })
        .rule(rule! { name: "i: to i", focus: "i:", to: "i" })
        .rule(rule! { name: "short o to ɔ", focus: "o", not_after: ":", to: "ɔ" })
        .rule(rule! { name: "short u to o", focus: "u", not_after: ":", to: "o" })
        .rule(rule! { name: "o: to o", focus: "o:", to: "o" })
        .rule(rule! { name: "u: to u", focus: "u:", to: "u" })
        .rule(rule! { name: "unstressed ɛ raises", focus: "ɛ", not_before: "/", to: "e" })
        .rule(rule! { name: "unstressed ɔ raises", focus: "ɔ", not_before: "/", to: "o" })
        .add("vowel", &["ɛ", "ɔ"])
        // Monosyllables keep the nasal.
        .rule(rule! {
            name: "final m lost",
            focus: "(?:m|n)$",
            before: "{vowel}{consonant}*/?{vowel}",
            to: "",
        })
        .rule(rule! { name: "final m to n", focus: "m$", to: "n" })
        .rule(rule! { name: "h lost", focus: "h", to: "" })
        .rule(rule! { name: "ns to s", focus: "ns", to: "s" })
        .rule(rule! { name: "rs to ss", focus: "rs", to: "ss" })
        .rule(rule! {
            name: "final er, or metathesis",
            focus: "(e|o)r$",
            before: "{vowel}{consonant}+",
            not_before: "/",
            to: "r${1}",
        })
        .rule(rule! {
            name: "syncope between velar and liquid",
            focus: "{vowel}",
            before: "k|g",
            not_before: "/",
            after: "r|l",
            to: "",
        })
        // Hiatus: front vowels become j and palatalize, stress moves forward.
        .rule(rule! { name: "e, i in hiatus to j", focus: "(/?)(?:e|i)", after: "/?{vowel}", to: "j${1}" })
        .rule(rule! { name: "j palatalizes consonant", focus: "j", before: "{consonant}", to: "ʲ" })
        .rule(rule! { name: "kʲ geminates", focus: "kʲ", not_before: "k", to: "kkʲ" })
        // Back vowels in hiatus become w, stress moves back when it can.
        .rule(rule! {
            name: "o, u in hiatus after vowel to w",
            focus: "({vowel})(/?)(?:o|u)",
            after: "/?{vowel}",
            to: "${1}${2}w",
        })
        .rule(rule! { name: "o, u in hiatus to w", focus: "(/?)(?:o|u)", after: "/?{vowel}", to: "w${1}" })
        .rule(rule! { name: "initial w to v", focus: "^w", to: "v" })
        .rule(rule! { name: "velars palatalize before front vowels", focus: "(/?(?:e|i|ɛ))", before: "k|g", to: "ʲ${1}" })
        .rule(rule! { name: "initial j, dʲ, gʲ, z to ɟ", focus: "^j|dʲ|gʲ|z", to: "ɟ" })
        .add("consonant", &["ɟ"])
}
