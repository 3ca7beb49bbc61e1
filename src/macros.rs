#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect("invalid rule pattern"));
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        intent: $intent:expr,
        pattern: $pat:literal
        $(, traits: $traits:expr)?
        , reply: |$caps:ident, $turn:ident| $body:block
        $(,)?
    ) => {{
        $crate::Rule {
            intent: $intent,
            pattern: $crate::regex!($pat),
            traits: { $crate::RuleTraits::empty() $(| $traits)? },
            handler: $crate::into_handler(move |$caps, $turn| -> String { $body }),
        }
    }};
}
