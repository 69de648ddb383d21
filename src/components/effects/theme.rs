//! Colors and palettes shared by the effects.

use serde::Deserialize;

use crate::error::FxError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Opacity in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with opacity `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Opaque white.
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	/// Fully transparent.
	pub const TRANSPARENT: Color = Color::rgba(255, 255, 255, 0.0);

	/// Same color with opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Scales the existing alpha, clamping the result to [0, 1].
	pub fn fade(self, factor: f64) -> Self {
		Self {
			a: (self.a * factor).clamp(0.0, 1.0),
			..self
		}
	}

	/// CSS color string.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Result<Self, FxError> {
		let s = color_str.trim();
		let invalid = || FxError::Color(color_str.to_string());

		if let Some(hex) = s.strip_prefix('#') {
			if hex.len() != 6 || !hex.is_ascii() {
				return Err(invalid());
			}
			let channel = |range: std::ops::Range<usize>| {
				u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
			};
			return Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
		}

		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))
			.and_then(|rest| rest.strip_suffix(')'))
			.ok_or_else(invalid)?;
		let nums: Vec<&str> = inner.split(',').map(str::trim).collect();
		if nums.len() != 3 && nums.len() != 4 {
			return Err(invalid());
		}
		let channel = |i: usize| nums[i].parse::<u8>().map_err(|_| invalid());
		let a = match nums.get(3) {
			Some(a) => a.parse::<f64>().map_err(|_| invalid())?.clamp(0.0, 1.0),
			None => 1.0,
		};
		Ok(Color::rgba(channel(0)?, channel(1)?, channel(2)?, a))
	}
}

impl TryFrom<String> for Color {
	type Error = FxError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Color::parse(&value)
	}
}

/// Neon node palette used by the neural field.
pub fn neon_palette() -> Vec<Color> {
	vec![
		Color::rgb(255, 0, 229),   // Magenta
		Color::rgb(0, 229, 255),   // Cyan
		Color::rgb(198, 255, 0),   // Lime
		Color::rgb(255, 107, 107), // Coral
		Color::rgb(224, 195, 252), // Lavender
	]
}

/// Brand violet used by the stream, trail and cursor.
pub const VIOLET: Color = Color::rgb(145, 94, 255);

/// Purple used for field connections and drifting equations.
pub const PURPLE: Color = Color::rgb(168, 85, 247);

/// Aqua used for signal pulses travelling along connections.
pub const AQUA: Color = Color::rgb(0, 255, 230);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex() {
		assert_eq!(Color::parse("#FF00E5").unwrap(), Color::rgb(255, 0, 229));
	}

	#[test]
	fn parses_rgba() {
		let c = Color::parse("rgba(145, 94, 255, 0.3)").unwrap();
		assert_eq!((c.r, c.g, c.b), (145, 94, 255));
		assert!((c.a - 0.3).abs() < 1e-9);
	}

	#[test]
	fn rejects_garbage() {
		assert!(Color::parse("#12345").is_err());
		assert!(Color::parse("hsl(1, 2, 3)").is_err());
		assert!(Color::parse("rgb(1, 2)").is_err());
	}

	#[test]
	fn css_output_drops_alpha_when_opaque() {
		assert_eq!(Color::rgb(0, 229, 255).to_css(), "#00e5ff");
		assert_eq!(VIOLET.with_alpha(0.5).to_css(), "rgba(145, 94, 255, 0.5)");
	}

	#[test]
	fn deserializes_from_string() {
		let c: Color = serde_json::from_str("\"#C6FF00\"").unwrap();
		assert_eq!(c, Color::rgb(198, 255, 0));
	}
}
