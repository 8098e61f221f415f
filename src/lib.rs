//! # textdown
//!
//! A small, fast library for detecting legacy [Textile] markup and
//! rewriting it into Markdown.
//!
//! Issue trackers that migrated from Textile-era tooling (Redmine and
//! friends) end up with a mix of Textile and Markdown blobs in the same
//! columns. This crate provides the two pure operations such a system
//! needs so that a single Markdown renderer can serve both:
//!
//! - [`classify`]: does this text exhibit Textile markup signatures?
//! - [`convert`]: rewrite Textile syntax into Markdown.
//!
//! Both are referentially transparent, never fail, and share no state, so
//! they can be called from any number of threads without coordination.
//!
//! ## Quick Start
//!
//! ```
//! use textdown::{classify, convert};
//!
//! assert!(classify("h2. Release notes"));
//! assert_eq!(convert("h2. Release notes"), "## Release notes");
//!
//! assert_eq!(
//!     convert("See \"the docs\":https://example.com for @setup()@ details."),
//!     "See [the docs](https://example.com) for `setup()` details.",
//! );
//!
//! // Plain Markdown is left alone.
//! assert!(!classify("# Already markdown"));
//! ```
//!
//! ## Tagged storage
//!
//! The storage layer persists a per-row [`FormatTag`]. [`FormatTag::backfill`]
//! upgrades untagged legacy rows (one-directional: a `textile` tag is never
//! downgraded) and [`FormatTag::to_markdown`] is the render-time gate that
//! only runs the converter when the tag says so:
//!
//! ```
//! use textdown::FormatTag;
//!
//! let tag = FormatTag::Markdown.backfill("bq. legacy content");
//! assert_eq!(tag, FormatTag::Textile);
//! assert_eq!(tag.to_markdown("bq. legacy content"), "> legacy content");
//! ```
//!
//! [Textile]: https://textile-lang.com/

pub mod detect;
pub mod rewrite;
pub mod tag;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use detect::classify;
pub use rewrite::convert;
pub use tag::FormatTag;
