//! Error types for mounting the particle field in a browser page.
//!
//! The simulation itself cannot fail; everything here describes a host
//! environment that is missing a piece the component needs.

use std::fmt;

use wasm_bindgen::JsValue;

/// Errors that can occur while attaching the field to the DOM.
#[derive(Debug)]
pub enum FieldError {
	/// No global `window` (not running in a browser main thread).
	NoWindow,
	/// The canvas refused to hand out a 2D rendering context.
	NoContext,
	/// A DOM or timer call threw a JavaScript exception.
	Js(String),
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldError::NoWindow => write!(f, "no global window available"),
			FieldError::NoContext => write!(f, "canvas has no 2d rendering context"),
			FieldError::Js(msg) => write!(f, "javascript error: {}", msg),
		}
	}
}

impl std::error::Error for FieldError {}

impl From<JsValue> for FieldError {
	fn from(value: JsValue) -> Self {
		FieldError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_names_the_missing_piece() {
		assert_eq!(FieldError::NoWindow.to_string(), "no global window available");
		assert_eq!(
			FieldError::Js("boom".into()).to_string(),
			"javascript error: boom"
		);
	}
}
