//! Context expression builder.
//!
//! Rule templates are `regex` syntax with embedded classification
//! references:
//!
//! ```text
//! {vowel}            any current member of "vowel"
//! {consonant-n,m}    any current member of "consonant" except "n" and "m"
//! ```
//!
//! A `{` only opens a reference when the next character can start an
//! identifier; everything else (`{2,}`) passes through untouched.
//!
//! Resolution happens immediately before each rule application and is never
//! cached, so a rule always sees membership as it stands at that moment.

use super::inventory::Inventory;
use crate::error::TemplateError;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Resolve every classification reference in `template` against `inventory`.
pub(crate) fn resolve(template: &str, inventory: &Inventory) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() * 2);
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        let opens_reference = c == '{' && chars.peek().is_some_and(|&(_, next)| is_ident_start(next));
        if !opens_reference {
            out.push(c);
            continue;
        }

        let body_start = pos + 1;
        let close = template[body_start..].find('}').ok_or(TemplateError::UnterminatedReference(pos))?;
        let body = &template[body_start..body_start + close];

        let (name, excluded) = parse_reference(body, pos)?;
        out.push_str(&inventory.render(name, &excluded)?);

        // Skip the reference body and its closing brace.
        while let Some((i, _)) = chars.peek() {
            if *i > body_start + close {
                break;
            }
            chars.next();
        }
    }

    Ok(out)
}

fn parse_reference(body: &str, pos: usize) -> Result<(&str, Vec<&str>), TemplateError> {
    let (name, rest) = match body.find('-') {
        Some(dash) => (&body[..dash], Some(&body[dash + 1..])),
        None => (body, None),
    };

    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(TemplateError::InvalidName(pos));
    }

    let excluded = rest
        .map(|list| list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    Ok((name, excluded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Baseline;

    const BASELINE: Baseline = &[("vowel", &["a", "e", "i"]), ("consonant", &["m", "n", "t"])];

    #[test]
    fn resolves_plain_and_excluding_references() {
        let inv = Inventory::new(BASELINE);
        assert_eq!(resolve("{vowel}{consonant}*", &inv).unwrap(), "(?:a|e|i)(?:m|n|t)*");
        assert_eq!(resolve("{consonant-n,m}", &inv).unwrap(), "(?:t)");
        assert_eq!(resolve("{consonant - n, m}", &inv).unwrap(), "(?:t)");
    }

    #[test]
    fn repetition_braces_pass_through() {
        let inv = Inventory::new(BASELINE);
        assert_eq!(resolve("{consonant}{2,}|x{1}", &inv).unwrap(), "(?:m|n|t){2,}|x{1}");
    }

    #[test]
    fn resolution_reflects_current_membership() {
        let mut inv = Inventory::new(BASELINE);
        let before = resolve("{consonant}", &inv).unwrap();
        inv.add("consonant", "k");
        let after = resolve("{consonant}", &inv).unwrap();

        assert_eq!(before, "(?:m|n|t)");
        assert_eq!(after, "(?:k|m|n|t)");
    }

    #[test]
    fn keeps_non_ascii_text_intact() {
        let inv = Inventory::new(BASELINE);
        assert_eq!(resolve("ʲ?/?{vowel}ɛ", &inv).unwrap(), "ʲ?/?(?:a|e|i)ɛ");
    }

    #[test]
    fn reports_malformed_references() {
        let inv = Inventory::new(BASELINE);
        assert_eq!(resolve("a{glide}", &inv), Err(TemplateError::UnknownClass("glide".to_string())));
        assert_eq!(resolve("a{vowel", &inv), Err(TemplateError::UnterminatedReference(1)));
        assert_eq!(resolve("{-a}", &inv), Ok("{-a}".to_string()));
        assert_eq!(resolve("{v!}", &inv), Err(TemplateError::InvalidName(0)));
    }
}
