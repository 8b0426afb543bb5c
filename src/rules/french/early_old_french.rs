use super::predicates::same_symbol;
use crate::Stage;

pub(super) fn stage() -> Stage {
    Stage::new("Early Old French")
        .rule(rule! { name: "initial ɟ to ʤ", focus: "^ɟ", to: "ʤ" })
        .rule(rule! { name: "ɟ after consonant to ʤ", focus: "ɟ", before: "{consonant-w,j}ʲ?", to: "ʤ" })
        .rule(rule! { name: "ɟ to j", focus: "ɟ", to: "j" })
        .remove("consonant", &["ɟ"])
        .rule(rule! { name: "j palatalizes next consonant", focus: "j({consonant-ɲ,ʎ})", not_after: "ʲ", to: "j${1}ʲ" })
        // Depalatalization ejects a j.
        .rule(rule! { name: "bʲ, vʲ to ʤ", focus: "(?:b|v)ʲ", before: "{vowel}", after: "/?{vowel}", to: "ʤ" })
        .rule(rule! { name: "pʲ, fʲ to ʧ", focus: "(?:p|f)ʲ", before: "{vowel}", after: "/?{vowel}", to: "ʧ" })
        .rule(rule! { name: "mʲ to nʤ", focus: "mʲ", before: "{vowel}", after: "/?{vowel}", to: "nʤ" })
        .rule(rule! { name: "j moves through a", focus: "arʲ", after: "/?{vowel}", to: "jarʲ" })
        .rule(rule! {
            name: "palatal ejects j",
            focus: "((?:{consonant-r}|ss)ʲ)",
            before: "{vowel}",
            after: "/?{vowel}",
            to: "j${1}",
        })
        .rule(rule! {
            name: "palatal before stressed a, e ejects j",
            focus: "({consonant}ʲ|ʤ|ʧ)",
            after: "/(?:a|æ|e)j?w?(?:{consonant}ʲ?{vowel}|$)",
            to: "${1}j",
        })
        .rule(rule! { name: "depalatalization", focus: "ʲ", to: "" })
        .add("consonant", &["ʧ"])
        // Second diphthongization, open syllables only.
        .rule(rule! {
            name: "stressed e to ej",
            focus: "/e",
            after: "(?:{consonant-j}|(?:p|b|t|d|g|k)(?:r|l)){vowel}|$",
            to: "/ej",
        })
        .rule(rule! {
            name: "stressed o to ow",
            focus: "/o",
            after: "(?:{consonant-j,n,m,ɲ}|(?:p|b|t|d|g|k)(?:r|l)){vowel}|$",
            to: "/ow",
        })
        .rule(rule! {
            name: "stressed a to æ",
            focus: "/a",
            after: "(?:{consonant-j,ɲ}|(?:p|b|t|d|g|k)(?:r|l)){vowel}|$",
            to: "/æ",
        })
        .add("vowel", &["æ"])
        .rule(rule! { name: "ɔ absorbs back vowel", focus: "g?(?:o|u|ɔ)", before: "ɔ", to: "w" })
        .rule(rule! { name: "g lost before back vowels", focus: "g", before: "{vowel}", after: "/?(?:o|u|ɔ)", to: "" })
        .rule(rule! { name: "g lost before a", focus: "g", before: "o|u|ɔ|w", after: "/?a", to: "" })
        // Posttonic vowels other than a go; the rest reduce to ə after l velarizes.
        .rule(rule! { name: "posttonic vowel loss", focus: "{vowel-a}", before: "/{vowel}{consonant}*", to: "" })
        .rule(rule! { name: "lla to la", focus: "lla", to: "la" })
        .rule(rule! { name: "ll to ɫɫ", focus: "ll", to: "ɫɫ" })
        .rule(rule! { name: "l, ʎ velarize before consonants", focus: "l|ʎ", after: "{consonant-j,w}", to: "ɫ" })
        .add("consonant", &["ɫ"])
        .rule(rule! { name: "posttonic vowels to ə", focus: "{vowel}", before: "/{vowel}{consonant}*", to: "ə" })
        .add("vowel", &["ə"])
        .rule(rule! { name: "tl to kl", focus: "tl", to: "kl" })
        // Second lenition.
        .rule(rule! { name: "b, f to v", focus: "b|f", before: "{vowel}w?j?", after: "r?/?{vowel}", to: "v" })
        .rule(rule! { name: "p to b", focus: "p", before: "{vowel}w?j?", after: "(?:r|l)?/?{vowel}", to: "b" })
        .rule(rule! { name: "d to ð", focus: "d", before: "{vowel}w?j?", after: "r?/?{vowel}|$", to: "ð" })
        .rule(rule! { name: "t to d", focus: "t", before: "{vowel}w?j?", after: "r?/?{vowel}|$", to: "d" })
        .rule(rule! { name: "s to z", focus: "s", before: "{vowel}w?j?", after: "/?{vowel}", to: "z" })
        .rule(rule! { name: "ʦ to ʣ", focus: "ʦ", before: "{vowel}w?j?", after: "/?{vowel}", to: "ʣ" })
        .rule(rule! { name: "g to j", focus: "g", before: "{vowel}w?j?", after: "(?:n|r|l)?/?{vowel}", to: "j" })
        .rule(rule! { name: "k to g", focus: "k", before: "{vowel}w?j?", after: "(?:r|l)?/?{vowel}", to: "g" })
        .rule(rule! { name: "kʷ to w after front vowels", focus: "kʷ", before: "i|e|ɛ|æ", after: "/?{vowel}", to: "w" })
        .rule(rule! { name: "k to ʧ before a", focus: "k?k", after: "/?(?:a|æ)", to: "ʧ" })
        .rule(rule! { name: "g to ʤ before a", focus: "g?g", after: "/?(?:a|æ)", to: "ʤ" })
        .rule(rule! { name: "æ after palatal to jɛ", focus: "/æ", before: "ʧ|ʤ", after: "j|n|m|ɲ", to: "j/ɛ" })
        .rule(rule! { name: "æ before nasal to aj", focus: "/æ", not_before: "j", after: "n|m|ɲ", to: "/aj" })
        .rule(rule! { name: "æ to ɛ", focus: "æ", to: "ɛ" })
        .remove("vowel", &["æ"])
        .rule(rule! { name: "aw to ɔ", focus: "aw", to: "ɔ" })
        .rule(rule! {
            name: "degemination",
            focus: "({consonant-r})({consonant-r})",
            guard: same_symbol,
            to: "${1}",
        })
        // Final devoicing.
        .rule(rule! { name: "final b", focus: "b$", to: "p" })
        .rule(rule! { name: "final v", focus: "v$", to: "f" })
        .rule(rule! { name: "final d", focus: "d$", to: "t" })
        .rule(rule! { name: "final ð", focus: "ð$", to: "θ" })
        .rule(rule! { name: "final z", focus: "z$", to: "s" })
        .rule(rule! { name: "final ʣ", focus: "ʣ$", to: "ʦ" })
        .rule(rule! { name: "final g", focus: "g$", to: "k" })
        .add("consonant", &["θ"])
        .rule(rule! { name: "ʣ to z", focus: "ʣ", not_after: "$", to: "z" })
        .remove("consonant", &["ʣ"])
        .rule(rule! { name: "t inserted before s", focus: "(ɲ|ʎ)s", to: "${1}ʦ" })
        .rule(rule! { name: "ɲ before consonant to jn", focus: "ɲ", after: "{consonant}", to: "jn" })
        .rule(rule! { name: "ɲ after consonant to jn", focus: "ɲ", before: "{consonant-j}", to: "jn" })
        .rule(rule! { name: "final ɲ to jn", focus: "ɲ$", not_before: "j", to: "jn" })
        .rule(rule! { name: "ʎ after consonant to l", focus: "ʎ", before: "{consonant}", to: "l" })
        .rule(rule! { name: "final ʎ to l", focus: "ʎ$", to: "l" })
        .rule(rule! { name: "jaj, jɛj, jej to i", focus: "j(/?)(?:a|ɛ|e)j", to: "${1}i" })
        .rule(rule! { name: "wɔj to uj", focus: "w(/?)ɔj", to: "${1}uj" })
        .rule(rule! { name: "final a to ə", focus: "a$", to: "ə" })
}
