//! Visual theming for the particle field.
//!
//! Colours only. Motion and counts live in [`super::config`].

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Page background gradient, drawn corner to corner.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub from: Color,
	pub via: Color,
	pub to: Color,
}

/// Trail dot colour. Hue comes from each particle.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailColor {
	/// Percent.
	pub saturation: f64,
	/// Percent.
	pub lightness: f64,
}

impl TrailColor {
	pub fn to_css(&self, hue: f64, alpha: f64) -> String {
		format!(
			"hsla({:.1}, {}%, {}%, {:.3})",
			hue, self.saturation, self.lightness, alpha
		)
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	/// `None` leaves the canvas transparent so page content shows through.
	pub background: Option<BackgroundStyle>,
	pub particle: Color,
	/// Line stroke; its alpha is multiplied by each line's opacity.
	pub line: Color,
	pub trail: TrailColor,
}

impl Theme {
	/// Gray to blue to purple, as on the landing page (default).
	pub fn landing() -> Self {
		Self {
			name: "landing",
			background: Some(BackgroundStyle {
				from: Color::rgb(31, 41, 55),
				via: Color::rgb(30, 64, 175),
				to: Color::rgb(107, 33, 168),
			}),
			particle: Color::rgba(255, 255, 255, 0.5),
			line: Color::rgba(255, 255, 255, 0.1),
			trail: TrailColor {
				saturation: 100.0,
				lightness: 70.0,
			},
		}
	}

	/// Particles only, over whatever the page draws underneath.
	pub fn overlay() -> Self {
		Self {
			name: "overlay",
			background: None,
			..Self::landing()
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::landing()
	}
}
