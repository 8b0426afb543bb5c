use crate::Stage;

pub(super) fn stage() -> Stage {
    Stage::new("Early Modern French")
        .rule(rule! { name: "length lost", focus: ":", to: "" })
        // r, l, f, k survive word-finally, as do the glides.
        .rule(rule! { name: "final consonants lost", focus: "{consonant-f,k,r,l,j,w,ɥ}+$", to: "" })
        .rule(rule! { name: "final l lost after high vowels", focus: "l$", before: "i|u|y", to: "" })
        .rule(rule! { name: "wɛ to wa", focus: "w(/?)ɛ", not_after: "~", to: "w${1}a" })
        .rule(rule! { name: "ɔw to u", focus: "ɔw", to: "u" })
        .rule(rule! { name: "h lost", focus: "h", to: "" })
        .remove("consonant", &["h"])
}
