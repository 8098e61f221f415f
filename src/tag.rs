//! Stored format tags and the rules the storage and render layers share.
//!
//! Every text blob is persisted next to a format tag. The tag is owned by
//! the storage layer; this module only supplies the pure rules that keep
//! all consumers consistent: how a tag is derived from content, how a
//! legacy row is backfilled, and when the converter runs at render time.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::detect::classify;
use crate::rewrite::convert;

/// Persisted classification of a text blob.
///
/// Serialized (and parsed) as the lowercase column values the storage
/// layer uses: `"markdown"` and `"textile"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FormatTag {
    Markdown,
    Textile,
}

impl FormatTag {
    /// Classify `text`: [`FormatTag::Textile`] iff it exhibits a Textile
    /// markup signature.
    pub fn detect(text: &str) -> FormatTag {
        if classify(text) {
            FormatTag::Textile
        } else {
            FormatTag::Markdown
        }
    }

    /// Backfill rule for existing rows. One-directional: a `textile` tag
    /// is never downgraded, a `markdown` tag is upgraded when the
    /// content shows Textile signatures.
    ///
    /// ```
    /// use textdown::FormatTag;
    ///
    /// assert_eq!(FormatTag::Markdown.backfill("h1. Legacy"), FormatTag::Textile);
    /// assert_eq!(FormatTag::Markdown.backfill("# Native"), FormatTag::Markdown);
    /// // Already-tagged textile rows stay textile, whatever the content.
    /// assert_eq!(FormatTag::Textile.backfill("plain"), FormatTag::Textile);
    /// ```
    pub fn backfill(self, text: &str) -> FormatTag {
        match self {
            FormatTag::Textile => FormatTag::Textile,
            FormatTag::Markdown => FormatTag::detect(text),
        }
    }

    /// Render-time gate: produce Markdown-ready text for this tag.
    ///
    /// Textile content is converted; Markdown content is returned
    /// borrowed and untouched, bypassing the converter entirely.
    pub fn to_markdown(self, text: &str) -> Cow<'_, str> {
        match self {
            FormatTag::Textile => Cow::Owned(convert(text)),
            FormatTag::Markdown => Cow::Borrowed(text),
        }
    }

    /// The stored column value for this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Markdown => "markdown",
            FormatTag::Textile => "textile",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFormatTagError(String);

impl fmt::Display for ParseFormatTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown format tag: {:?}", self.0)
    }
}

impl std::error::Error for ParseFormatTagError {}

impl FromStr for FormatTag {
    type Err = ParseFormatTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(FormatTag::Markdown),
            "textile" => Ok(FormatTag::Textile),
            other => Err(ParseFormatTagError(other.to_string())),
        }
    }
}
