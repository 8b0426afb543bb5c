use regex::Captures;

/// Capture groups 1 and 2 hold the same symbol (a geminate).
pub(super) fn same_symbol(caps: &Captures<'_>) -> bool {
    match (caps.get(1), caps.get(2)) {
        (Some(a), Some(b)) => a.as_str() == b.as_str(),
        _ => false,
    }
}
