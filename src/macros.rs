// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, &str slices
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Process-wide compiled regex, built on first use.
///
/// `static NAME = "pattern";` expands to a `LazyLock<Regex>`. Patterns are
/// literals, so a failure to compile is a bug, not a runtime condition.
#[macro_export]
macro_rules! static_regex {
    ($(#[$meta:meta])* $vis:vis static $name:ident = $re:literal;) => {
        $(#[$meta])*
        $vis static $name: ::std::sync::LazyLock<::regex::Regex> =
            ::std::sync::LazyLock::new(|| {
                ::regex::Regex::new($re).expect(concat!("invalid static regex ", $re, " (bug)"))
            });
    };
}
