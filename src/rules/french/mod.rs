//! Latin to Modern French.
//!
//! Eight stages in historical order. Words are written phonemically with
//! `/` before the stressed vowel and `:` after a long one; nasalization is
//! written `~` after the vowel it affects. Use
//! [`normalize_latin`](crate::normalize_latin) first for words in Latin
//! spelling.
//!
//! Symbols join the `vowel` and `consonant` classes as the stages introduce
//! them, and leave when they merge into something else. Rules further down a
//! stage rely on that, so the order of `add`/`remove` steps matters as much as
//! the order of the rules.

mod early_modern_french;
mod early_old_french;
mod late_old_french;
mod middle_french;
mod modern_french;
mod old_french;
mod predicates;
mod proto_gallo_ibero_romance;
mod proto_western_romance;


use crate::{Baseline, Catalogue, MarkerConvention};

const BASELINE: Baseline = &[
    ("vowel", &["a", "e", "i", "o", "u"]),
    ("consonant", &["b", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "r", "s", "t", "v", "w", "z"]),
];

pub fn catalogue() -> Catalogue {
    Catalogue {
        name: "french",
        markers: MarkerConvention::default(),
        baseline: BASELINE,
        stages: vec![
            proto_western_romance::stage(),
            proto_gallo_ibero_romance::stage(),
            early_old_french::stage(),
            old_french::stage(),
            late_old_french::stage(),
            middle_french::stage(),
            early_modern_french::stage(),
            modern_french::stage(),
        ],
    }
}

/// Attested `(Latin, Modern French)` pairs, Latin in Latin spelling.
///
/// Irregular developments (borrowings, analogy) are included; not every pair
/// is expected to come out of [`catalogue`] exactly.
pub const EXAMPLES: &[(&str, &str)] = &[
    ("p/artem", "p/aʁ"),
    ("b/assum", "b/a"),
    ("m/are", "m/ɛʁ"),
    ("am/a:tum", "am/e"),
    ("f/agum", "f/u"),
    ("b/auan", "b/u"),
    ("mediet/a:tem", "mwatj/e"),
    ("c/a:rum", "ʃ/ɛʁ"),
    ("s/eptem", "s/e"),
    ("h/eri", "j/ɛʁ"),
    ("p/edem", "pj/e"),
    ("s/iccum", "s/ɛk"),
    ("p/e:ram", "pw/aʁ"),
    ("vid/e:re", "vew/aʁ"),
    ("c/e:ram", "s/iʁ"),
    ("merc/e:dem", "mɛʁs/i"),
    ("v/i:tam", "v/i"),
    ("v/i:llam", "v/il"),
    ("p/ortam", "p/ɔʁt"),
    ("s/ottum", "s/o"),
    ("s/ottam", "s/ɔt"),
    ("gr/ossum", "gʁ/o"),
    ("gr/ossam", "gʁ/os"),
    ("n/ovum", "n/œf"),
    ("c/orem", "k/œʁ"),
    ("s/ubtus", "s/u"),
    ("s/urdum", "s/uʁ"),
    ("n/o:dum", "n/ø"),
    ("d/u:rum", "d/yʁ"),
    ("d/u:llam", "d/yl"),
    ("/aurum", "/ɔʁ"),
    ("c/ausam", "ʃ/ɔz"),
    ("tr/aucon", "tʁ/u"),
    ("/annum", "/ɑ~"),
    ("c/antum", "ʃ/ɑ~"),
    ("s/a:nam", "s/ɛn"),
    ("/amat", "/ɛm"),
    ("s/a:num", "s/ɛ~"),
    ("f/amem", "f/ɛ~"),
    ("c/anem", "ʃj/ɛ~"),
    ("t/enent", "tj/ɛ~"),
    ("b/ene", "bj/ɛ~"),
    ("t/enet", "tj/ɛ~"),
    ("l/ingua", "l/ɑ~g"),
    ("p/e:nam", "p/ɛn"),
    ("pl/e:num", "pl/ɛ~"),
    ("s/inum", "s/ɛ~"),
    ("rac/e:mum", "ʁɛz/ɛ~"),
    ("c/i:nque", "s/ɛ~k"),
    ("f/i:num", "f/ɛ~"),
    ("f/i:nam", "f/in"),
    ("p/ontem", "p/ɔ~"),
    ("b/onam", "b/ɔn"),
    ("b/onum", "b/ɔ~"),
    ("c/omes", "k/ɔ~"),
    ("d/o:num", "d/ɔ~"),
    ("d/o:nat", "d/ɔn"),
    ("/u:num", "/ɛ~"),
    ("perf/u:mum", "pɛʁf/ɛ~"),
    ("/u:nam", "/yn"),
    ("pl/u:mam", "pl/ym"),
    ("f/estam", "f/ɛt"),
    ("b/e:sta", "b/ɛt"),
    ("ab/y:smum", "av/i"),
    ("c/ostam", "k/ot"),
    ("c/o:nstat", "k/ut"),
    ("f/u:stis", "f/y"),
    ("f/alsum", "f/o"),
    ("p/almam", "p/om"),
    ("b/ellum", "b/o"),
    ("m/elius", "mj/ø"),
    ("cap/illum", "ʃav/ø"),
    ("f/iltrum", "f/øtʁ"),
    ("gent/i:lem", "ʒɑ~t/i"),
    ("f/ollem", "f/u"),
    ("c/olpum", "k/u"),
    ("v/olet", "v/ø"),
    ("p/ulsat", "p/us"),
    ("c/u:lum", "k/y"),
    ("f/actum", "f/ɛ"),
    ("pal/a:tium", "pal/ɛ"),
    ("pl/a:gam", "pl/ɛ"),
    ("pl/acet", "pl/ɛ"),
    ("p/aria", "pj/ɛʁ"),
    ("/iacet", "ʒ/i"),
    ("c/acat", "ʃ/i"),
    ("l/ectum", "l/i"),
    ("s/ex", "s/i"),
    ("p/eior", "p/iʁ"),
    ("t/e:ctum", "tw/a"),
    ("r/e:gem", "ʁw/a"),
    ("n/igrum", "nw/aʁ"),
    ("f/e:riam", "fw/aʁ"),
    ("n/octem", "nɥ/i"),
    ("h/odie", "ɥ/i"),
    ("c/oxam", "kɥ/is"),
    ("b/uxitam", "bw/at"),
    ("cr/ucem", "kʁw/a"),
    ("fr/u:ctum", "fʁɥ/i"),
    ("g/audia", "ʒw/a"),
    ("b/aneum", "b/ɛ~"),
    ("s/anctum", "s/ɛ~"),
    ("mont/a:neam", "mɔ~t/aɲ"),
    ("p/inctum", "p/ɛ~"),
    ("ins/igniam", "ez/ɛɲ"),
    ("l/i:neam", "l/iɲ"),
    ("l/onge", "lw/ɛ~"),
    ("fr/ogna", "fʁ/ɔɲ"),
    ("p/unctum", "pw/ɛ~"),
    ("c/uneum", "kw/ɛ~"),
    ("verec/undiam", "vɛʁk/ɔɲ"),
    ("i/u:nium", "ʒɥ/ɛ~"),
    ("sp/i:nam", "ɛp/in"),
    ("r/em", "ʁj/ɛ~"),
    ("d/orsum", "d/o"),
    ("/ursum", "/uʁ"),
    ("qu/attuor", "k/atʁ"),
    ("l/i:ber", "l/ivʁ"),
    ("t/ertium", "t/ɛʁ"),
    ("m/anica", "m/ɑ~ʃ"),
    ("gr/a:nica", "gʁ/ɑ~ʃ"),
    ("carric/a:re", "ʃaʁʃ/e"),
    ("vindic/a:re", "vɑ~ʒ/e"),
    ("impe:ior/a:re", "ɑ~pwaʁj/e"),
    ("co:git/a:re", "kwatj/e"),
    ("i/ungit", "ʒw/ɛ~"),
    ("oper/a:rium", "uvʁj/e"),
    ("/iungis", "ʒw/ɛ~"),
    ("f/i:lius", "f/i"),
    ("d/iurnum", "ʒ/uʁ"),
    ("v/ermum", "v/ɛʁ"),
    ("d/ormit", "d/ɔʁ"),
    ("f/e:minam", "f/em"),
];
