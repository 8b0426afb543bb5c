#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Rule`](crate::Rule).
///
/// ```ignore
/// rule! {
///     name: "e in hiatus",
///     focus: "(/?)e",
///     after: "/?{vowel}",
///     to: "j${1}",
/// }
/// ```
///
/// Optional fields must appear in the order shown by the matcher below.
#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        focus: $focus:expr
        $(, before: $before:expr)?
        $(, not_before: $not_before:expr)?
        $(, after: $after:expr)?
        $(, not_after: $not_after:expr)?
        $(, guard: $guard:expr)?
        , to: $to:expr
        $(, trace: $trace:expr)?
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut contexts = ::std::vec::Vec::new();
        $(contexts.push($crate::Context::before($before));)?
        $(contexts.push($crate::Context::not_before($not_before));)?
        $(contexts.push($crate::Context::after($after));)?
        $(contexts.push($crate::Context::not_after($not_after));)?
        $crate::Rule {
            name: $name,
            focus: $focus,
            contexts,
            guard: { None::<$crate::Guard> $(.or(Some($guard as $crate::Guard)))? },
            replacement: $to,
            trace: { true $(&& $trace)? },
        }
    }};
}
