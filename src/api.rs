use crate::engine::{Derivation, Deriver, NullSink, TraceFlags, TraceSink, TracingSink};
use crate::error::DerivationError;
use crate::{Catalogue, rules};
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::thread::LocalKey;

static FRENCH: Lazy<Catalogue> = Lazy::new(rules::french::catalogue);
static ORTHOGRAPHY: Lazy<Catalogue> = Lazy::new(rules::orthography::catalogue);

// One deriver per thread and default catalogue, so the pattern cache
// survives between calls.
thread_local! {
    static FRENCH_DERIVER: RefCell<Deriver<'static>> = RefCell::new(Deriver::new(&FRENCH));
    static ORTHOGRAPHY_DERIVER: RefCell<Deriver<'static>> = RefCell::new(Deriver::new(&ORTHOGRAPHY));
}

fn with_deriver<R>(
    key: &'static LocalKey<RefCell<Deriver<'static>>>,
    catalogue: &'static Catalogue,
    f: impl FnOnce(&mut Deriver<'static>) -> R,
) -> R {
    key.with(|cell| match cell.try_borrow_mut() {
        Ok(mut deriver) => f(&mut deriver),
        // Re-entered from a trace sink: fall back to a throwaway deriver.
        Err(_) => f(&mut Deriver::new(catalogue)),
    })
}

/// Options that affect a derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Events reported to the sink passed to [`evolve_traced`].
    pub trace: TraceFlags,
    /// Run the Latin spelling normalization pass before the catalogue.
    pub normalize: bool,
}

fn debug_rules() -> bool {
    std::env::var_os("PHONOSHIFT_DEBUG_RULES").is_some()
}

/// Derive `word` (phonemic spelling, `/` stress, `:` length) into Modern
/// French.
///
/// # Example
/// ```
/// use phonoshift::evolve;
///
/// let out = evolve("m/are").unwrap();
/// assert!(!out.is_empty());
/// ```
pub fn evolve(word: &str) -> Result<String, DerivationError> {
    evolve_with(word, &FRENCH, &Options::default()).map(|d| d.output)
}

/// Like [`evolve`], but `word` is written in Latin spelling (`c`, `qu`, `x`,
/// `ae`, ...).
pub fn evolve_latin(word: &str) -> Result<String, DerivationError> {
    evolve_with(word, &FRENCH, &Options { normalize: true, ..Options::default() }).map(|d| d.output)
}

/// Derive `word` through `catalogue`.
///
/// No trace is collected unless `PHONOSHIFT_DEBUG_RULES` is set, in which case
/// every event is forwarded to `tracing`.
pub fn evolve_with(word: &str, catalogue: &Catalogue, options: &Options) -> Result<Derivation, DerivationError> {
    if debug_rules() {
        return evolve_traced(word, catalogue, &Options { trace: TraceFlags::all(), ..*options }, &mut TracingSink);
    }
    evolve_traced(word, catalogue, &Options { trace: TraceFlags::empty(), ..*options }, &mut NullSink)
}

/// Derive `word` through `catalogue`, reporting the events selected by
/// `options.trace` to `sink`.
///
/// The default French catalogue runs on a per-thread deriver that keeps its
/// compiled patterns. Any other catalogue gets a fresh deriver; use
/// [`evolve_using`] to keep one across calls.
pub fn evolve_traced(
    word: &str,
    catalogue: &Catalogue,
    options: &Options,
    sink: &mut dyn TraceSink,
) -> Result<Derivation, DerivationError> {
    if std::ptr::eq(catalogue, &*FRENCH) {
        return with_deriver(&FRENCH_DERIVER, &FRENCH, |deriver| evolve_using(deriver, word, options, sink));
    }
    evolve_using(&mut Deriver::new(catalogue), word, options, sink)
}

/// Derive `word` with a caller-owned `deriver`.
pub fn evolve_using(
    deriver: &mut Deriver<'_>,
    word: &str,
    options: &Options,
    sink: &mut dyn TraceSink,
) -> Result<Derivation, DerivationError> {
    let input = if options.normalize { normalize_latin(word)? } else { word.to_string() };
    let mut derivation = deriver.run(&input, sink, options.trace)?;
    derivation.input = word.to_string();
    Ok(derivation)
}

/// Rewrite Latin spelling into the phonemic spelling the French catalogue
/// expects. Input is lower-cased first.
///
/// ```
/// assert_eq!(phonoshift::normalize_latin("Quattuor").unwrap(), "kwattuor");
/// ```
pub fn normalize_latin(word: &str) -> Result<String, DerivationError> {
    let word = word.to_lowercase();
    with_deriver(&ORTHOGRAPHY_DERIVER, &ORTHOGRAPHY, |deriver| deriver.derive(&word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TraceLog;
    use crate::{MarkerConvention, Stage};

    fn glide() -> Catalogue {
        Catalogue {
            name: "glide",
            markers: MarkerConvention::default(),
            baseline: &[("vowel", &["a", "e", "i", "o", "u"]), ("consonant", &["k", "t", "m", "n", "r", "s"])],
            stages: vec![
                Stage::new("one").rule(rule! { name: "e before vowel", focus: "e", after: "{vowel}", to: "j" }),
            ],
        }
    }

    #[test]
    fn evolve_with_returns_stage_chain() {
        let cat = glide();
        let res = evolve_with("mea", &cat, &Options::default()).unwrap();

        assert_eq!(res.input, "mea");
        assert_eq!(res.output, "mja");
        assert_eq!(res.stages.len(), 1);
        assert!(res.metrics.total >= res.metrics.stages[0].duration);
    }

    #[test]
    fn evolve_traced_honours_flags() {
        let cat = glide();
        let mut log = TraceLog::new();
        evolve_traced("mea", &cat, &Options { trace: TraceFlags::RULES, normalize: false }, &mut log).unwrap();
        assert_eq!(log.rule_forms(), vec![("e before vowel", "mja")]);

        let mut silent = TraceLog::new();
        evolve_traced("mea", &cat, &Options::default(), &mut silent).unwrap();
        assert!(silent.events.is_empty());
    }

    #[test]
    fn normalization_keeps_original_input() {
        let cat = glide();
        let res = evolve_with("Mea", &cat, &Options { normalize: true, ..Options::default() }).unwrap();
        assert_eq!(res.input, "Mea");
        assert_eq!(res.output, "mja");
    }

    #[test]
    fn normalizes_latin_spelling() {
        assert_eq!(normalize_latin("c/aelum").unwrap(), "k/ajlum");
        assert_eq!(normalize_latin("s/ex").unwrap(), "s/eks");
        assert_eq!(normalize_latin("l/ingua").unwrap(), "l/ingwa");
        assert_eq!(normalize_latin("ab/y:smum").unwrap(), "ab/i:smum");
        assert_eq!(normalize_latin("/aurum").unwrap(), "/awrum");
    }

    #[test]
    fn invalid_input_is_an_error() {
        assert!(matches!(evolve("m/r"), Err(DerivationError::Input(_))));
        assert!(matches!(evolve("k/\u{FFFF}a"), Err(DerivationError::Input(_))));
    }

    #[test]
    fn empty_input_derives_to_empty() {
        assert_eq!(evolve("").unwrap(), "");
        assert_eq!(evolve_latin("").unwrap(), "");
    }

    #[test]
    fn default_catalogue_keeps_compiled_patterns() {
        let first = evolve_with("mediet/a:tem", &FRENCH, &Options::default()).unwrap();
        let second = evolve_with("mediet/a:tem", &FRENCH, &Options::default()).unwrap();

        assert_eq!(first.output, second.output);
        let ((hits_before, misses_before), (hits_after, misses_after)) = (first.metrics.cache, second.metrics.cache);
        assert_eq!(misses_after, misses_before);
        assert!(hits_after > hits_before);
    }

    #[test]
    fn reused_deriver_matches_fresh_one() {
        let cat = glide();
        let mut deriver = Deriver::new(&cat);
        for word in ["mea", "tea", "mie", "mea"] {
            let reused = evolve_using(&mut deriver, word, &Options::default(), &mut NullSink).unwrap();
            let fresh = evolve_with(word, &cat, &Options::default()).unwrap();
            assert_eq!(reused.output, fresh.output);
        }
        assert!(deriver.run("mea", &mut NullSink, TraceFlags::empty()).unwrap().metrics.cache.0 > 0);
    }

    #[test]
    fn default_catalogue_is_deterministic() {
        let first = evolve("mediet/a:tem").unwrap();
        let second = evolve("mediet/a:tem").unwrap();
        assert_eq!(first, second);
    }
}
