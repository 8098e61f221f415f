//! WASM bindings for browser-based detection and conversion.
//!
//! This module exposes the core operations to JavaScript via wasm-bindgen,
//! so the front end can classify and convert content without a server
//! round trip.

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Returns `true` if the text exhibits Textile markup signatures.
#[wasm_bindgen]
pub fn contains_textile(text: &str) -> bool {
    crate::classify(text)
}

/// Rewrite Textile markup into Markdown.
///
/// Total and best-effort: text without Textile markup comes back
/// unchanged.
#[wasm_bindgen]
pub fn textile_to_markdown(text: &str) -> String {
    crate::convert(text)
}
