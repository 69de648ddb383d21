//! Error type for mounting effects in the browser.

use thiserror::Error;

/// Everything that can stop an effect from mounting.
///
/// None of these are surfaced to the visitor; callers log them and leave the
/// effect unrendered.
#[derive(Debug, Error)]
pub enum FxError {
	/// No global `window`.
	#[error("no global window")]
	NoWindow,

	/// The window has no document.
	#[error("no document on window")]
	NoDocument,

	/// The canvas returned no 2d context.
	#[error("canvas has no 2d rendering context")]
	NoContext,

	/// A browser API call failed.
	#[error("javascript error: {0}")]
	Js(String),

	/// A color string could not be parsed.
	#[error("invalid color: {0}")]
	Color(String),

	/// The config document is not valid JSON for [`FxConfig`](crate::FxConfig).
	#[error("invalid effect config: {0}")]
	Config(#[from] serde_json::Error),
}

impl From<wasm_bindgen::JsValue> for FxError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		FxError::Js(format!("{value:?}"))
	}
}
