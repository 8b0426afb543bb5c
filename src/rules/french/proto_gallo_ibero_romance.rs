use crate::Stage;

pub(super) fn stage() -> Stage {
    Stage::new("Proto-Gallo-Ibero-Romance")
        .rule(rule! { name: "kkʲ to ttʲ", focus: "kkʲ", to: "ttʲ" })
        .rule(rule! { name: "kʲ, tʲ to ʦʲ", focus: "(?:k|t)ʲ", to: "ʦʲ" })
        .add("consonant", &["ʦ"])
        // ks keeps a long s: it never lenites to z.
        .rule(rule! { name: "ks to jss", focus: "k", after: "s", to: "js" })
        .rule(rule! { name: "kt to jt", focus: "k", after: "t", to: "j" })
        .rule(rule! { name: "gm to wm", focus: "gm", to: "wm" })
        // First diphthongization.
        .rule(rule! { name: "stressed ɛ to jɛ", focus: "/ɛ", after: "{consonant}ʲ?{vowel}|j", to: "j/ɛ" })
        .rule(rule! {
            name: "stressed ɔ to wɔ",
            focus: "/ɔ",
            not_before: "w",
            after: "(?:{consonant-n,m}|(?:p|b|t|d|g|k)(?:r|l))ʲ?{vowel}|j",
            to: "w/ɔ",
        })
        .rule(rule! {
            name: "stressed a rounds before back vowels",
            focus: "/a",
            after: "(?:o|u|ɔ)|w{vowel}|(?:g|k)(?:o|u|ɔ)",
            to: "/ɔ",
        })
        .rule(rule! { name: "aw rounds", focus: "aw", after: "(?:g|k)/?(?:o|u|ɔ)", to: "ɔ" })
        .rule(rule! { name: "intervocalic w to v", focus: "w", before: "{vowel-ɔ}", after: "/?{vowel}", to: "v" })
        // First lenition. A preceding diphthong still counts as a vowel.
        .rule(rule! { name: "b, f to v", focus: "b|f", before: "{vowel}w?j?", after: "r?ʲ?/?{vowel}", to: "v" })
        .rule(rule! { name: "p to b", focus: "p", before: "{vowel}w?j?", after: "(?:r|l)?ʲ?/?{vowel}", to: "b" })
        .rule(rule! { name: "d to ð", focus: "d", before: "{vowel}w?j?", after: "r?ʲ?/?{vowel}|$", to: "ð" })
        .rule(rule! { name: "t to d", focus: "t", before: "{vowel}w?j?", after: "r?ʲ?/?{vowel}|$", to: "d" })
        .rule(rule! { name: "s to z", focus: "s", before: "{vowel}w?j?", after: "ʲ?/?{vowel}", to: "z" })
        .rule(rule! { name: "ʦ to ʣ", focus: "ʦ", before: "{vowel}w?j?", after: "ʲ?/?{vowel}", to: "ʣ" })
        .rule(rule! { name: "velar to w after ɔ", focus: "g|k", before: "ɔ", after: "/?(?:o|u|ɔ|w)", to: "w" })
        .rule(rule! { name: "g lost before back vowels", focus: "g", before: "{vowel}", after: "/?(?:o|u|ɔ)", to: "" })
        .rule(rule! { name: "g lost between u and a", focus: "g", before: "u|w", after: "/?a", to: "" })
        .rule(rule! { name: "g to v between o and a", focus: "g", before: "o|ɔ", after: "/?a", to: "v" })
        .rule(rule! { name: "g to j", focus: "g", before: "{vowel}w?j?", after: "(?:n|r|l)?ʲ?/?{vowel}", to: "j" })
        .rule(rule! { name: "k to g", focus: "k", before: "{vowel}w?j?", after: "(?:r|l)?ʲ?/?{vowel}", to: "g" })
        .rule(rule! { name: "kʷ to w after front vowels", focus: "kʷ", before: "i|e|ɛ", after: "/?{vowel}", to: "w" })
        .add("consonant", &["ð", "ʣ"])
        .rule(rule! { name: "palatal nasal", focus: "jn|nj|nɟ|nʲ", to: "ɲ" })
        .rule(rule! { name: "palatal lateral", focus: "jl|gl|lʲ", to: "ʎ" })
        .add("consonant", &["ɲ", "ʎ"])
        .rule(rule! {
            name: "first vowel loss",
            focus: "{vowel-a}",
            before: "{vowel}{consonant}*",
            after: "{consonant}*(?:ʲ|j|w)?/{vowel}",
            to: "",
        })
}
