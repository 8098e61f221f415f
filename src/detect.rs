//! Textile signature detection.
//!
//! Classification is an ordered table of signature patterns, evaluated
//! with a short-circuit OR. A signature is only ever used to answer "is
//! this Textile?" — rewriting lives in [`crate::rewrite`] and uses its
//! own table.
//!
//! Each entry carries a trigger byte: the single byte that must appear
//! somewhere in the text for the pattern to possibly match. A `memchr`
//! scan for that byte is much cheaper than the regex engine, so plain
//! prose (the common case on the read path) is rejected without running
//! any pattern at all. The prescan can only skip work, never change the
//! result.

use std::sync::LazyLock;

use fancy_regex::Regex;
use memchr::memchr;

/// One classification rule: a named pattern plus its prescan byte.
struct Signature {
    name: &'static str,
    trigger: u8,
    pattern: Regex,
}

impl Signature {
    fn new(name: &'static str, trigger: u8, pattern: &str) -> Self {
        Signature {
            name,
            trigger,
            pattern: Regex::new(pattern).expect("valid signature pattern"),
        }
    }
}

/// Signature table, in documentation order. Order does not affect the
/// result (pure OR) but is kept stable for traceability.
static SIGNATURES: LazyLock<[Signature; 6]> = LazyLock::new(|| {
    [
        Signature::new("heading", b'h', r"(?m)^h[1-6]\.\s"),
        Signature::new("blockquote", b'q', r"(?m)^bq\.\s"),
        Signature::new("link", b':', r#""[^"]+":https?://"#),
        Signature::new("inline-code", b'@', r"@[^@]+@"),
        Signature::new("html-pre", b'<', r"(?i)<pre>"),
        Signature::new("html-blockquote", b'<', r"(?i)<blockquote>"),
    ]
});

/// Returns `true` if `text` exhibits any Textile markup signature.
///
/// Empty input and plain prose classify as `false`. The check never
/// fails: a pattern that cannot be evaluated simply counts as no match.
///
/// # Examples
///
/// ```
/// use textdown::classify;
///
/// assert!(classify("h1. Title"));
/// assert!(classify("bq. A quote"));
/// assert!(classify("\"Example\":https://example.com"));
/// assert!(!classify("# A Markdown heading"));
/// assert!(!classify(""));
/// ```
pub fn classify(text: &str) -> bool {
    let bytes = text.as_bytes();
    SIGNATURES.iter().any(|sig| {
        memchr(sig.trigger, bytes).is_some() && sig.pattern.is_match(text).unwrap_or(false)
    })
}

/// Names of the signatures that match `text`, in table order.
///
/// Diagnostic companion to [`classify`], surfaced in the CLI's JSON
/// report and handy when auditing a misclassified blob.
pub fn matching_signatures(text: &str) -> Vec<&'static str> {
    let bytes = text.as_bytes();
    SIGNATURES
        .iter()
        .filter(|sig| {
            memchr(sig.trigger, bytes).is_some() && sig.pattern.is_match(text).unwrap_or(false)
        })
        .map(|sig| sig.name)
        .collect()
}
