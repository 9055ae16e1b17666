//! Tunable simulation parameters.
//!
//! All structs deserialize with `#[serde(default)]`, so a page can override a
//! single field in its `field-config` JSON and keep the rest of the defaults.

use serde::Deserialize;

/// Motion and size of the background particles.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleStyle {
	/// Multiplier on the base per-tick velocity range of `[-0.25, 0.25]`.
	pub speed: f64,
	/// Minimum particle radius.
	pub size_min: f64,
	/// Maximum particle radius.
	pub size_max: f64,
}

impl Default for ParticleStyle {
	fn default() -> Self {
		Self {
			speed: 1.0,
			size_min: 1.0,
			size_max: 4.0,
		}
	}
}

/// Pointer trail behaviour.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrailStyle {
	/// Chance that a single pointer-move event spawns a trail particle.
	pub spawn_probability: f64,
	/// Time from spawn to removal, in milliseconds.
	pub lifetime_ms: u32,
	pub size_min: f64,
	pub size_max: f64,
	/// Hue range in degrees. Defaults cover the blues.
	pub hue_min: f64,
	pub hue_max: f64,
}

impl ParticleStyle {
	/// Repair a non-finite speed and order the size range.
	pub fn sanitized(mut self) -> Self {
		let defaults = ParticleStyle::default();
		if !self.speed.is_finite() {
			self.speed = defaults.speed;
		}
		(self.size_min, self.size_max) = ordered(
			self.size_min.max(0.0),
			self.size_max.max(0.0),
			(defaults.size_min, defaults.size_max),
		);
		self
	}
}

impl Default for TrailStyle {
	fn default() -> Self {
		Self {
			spawn_probability: 0.2,
			lifetime_ms: 1000,
			size_min: 2.0,
			size_max: 6.0,
			hue_min: 200.0,
			hue_max: 260.0,
		}
	}
}

impl TrailStyle {
	/// Clamp the spawn probability into `[0, 1]`, hues into `[0, 360]`, and
	/// order both ranges.
	pub fn sanitized(mut self) -> Self {
		let defaults = TrailStyle::default();
		self.spawn_probability = if self.spawn_probability.is_finite() {
			self.spawn_probability.clamp(0.0, 1.0)
		} else {
			defaults.spawn_probability
		};
		(self.size_min, self.size_max) = ordered(
			self.size_min.max(0.0),
			self.size_max.max(0.0),
			(defaults.size_min, defaults.size_max),
		);
		(self.hue_min, self.hue_max) = ordered(
			self.hue_min.clamp(0.0, 360.0),
			self.hue_max.clamp(0.0, 360.0),
			(defaults.hue_min, defaults.hue_max),
		);
		self
	}
}

/// Complete field configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of background particles. Keep this in the tens: the connection
	/// pass is quadratic in this value.
	pub particle_count: usize,
	/// Pairs closer than this get a connection line.
	pub connection_distance: f64,
	/// Line opacity at zero distance.
	pub max_line_opacity: f64,
	/// Field tick cadence in milliseconds.
	pub tick_interval_ms: u32,
	pub particles: ParticleStyle,
	pub trail: TrailStyle,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle_count: 30,
			connection_distance: 100.0,
			max_line_opacity: 0.2,
			tick_interval_ms: 16,
			particles: ParticleStyle::default(),
			trail: TrailStyle::default(),
		}
	}
}

/// Returns `(lo, hi)` ordered, replacing non-finite bounds with `fallback`.
fn ordered(lo: f64, hi: f64, fallback: (f64, f64)) -> (f64, f64) {
	if !lo.is_finite() || !hi.is_finite() {
		return fallback;
	}
	if lo <= hi { (lo, hi) } else { (hi, lo) }
}

impl FieldConfig {
	/// Parse a JSON document, filling missing fields from the defaults.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<FieldConfig>(text).map(FieldConfig::sanitized)
	}

	/// Coerce hand-written values into something the simulation can run with.
	pub fn sanitized(mut self) -> Self {
		let defaults = FieldConfig::default();

		if !self.connection_distance.is_finite() || self.connection_distance < 0.0 {
			self.connection_distance = defaults.connection_distance;
		}
		self.max_line_opacity = if self.max_line_opacity.is_finite() {
			self.max_line_opacity.clamp(0.0, 1.0)
		} else {
			defaults.max_line_opacity
		};
		self.tick_interval_ms = self.tick_interval_ms.max(1);

		self.particles = self.particles.sanitized();
		self.trail = self.trail.sanitized();

		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config = FieldConfig::from_json(r#"{ "particle_count": 12, "trail": { "lifetime_ms": 500 } }"#)
			.unwrap();
		assert_eq!(config.particle_count, 12);
		assert_eq!(config.trail.lifetime_ms, 500);
		assert_eq!(config.trail.spawn_probability, 0.2);
		assert_eq!(config.connection_distance, 100.0);
		assert_eq!(config.particles, ParticleStyle::default());
	}

	#[test]
	fn empty_object_is_default() {
		assert_eq!(FieldConfig::from_json("{}").unwrap(), FieldConfig::default());
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(FieldConfig::from_json("{ particle_count: ").is_err());
	}

	#[test]
	fn sanitized_repairs_out_of_range_values() {
		let mut config = FieldConfig::default();
		config.tick_interval_ms = 0;
		config.max_line_opacity = 3.0;
		config.connection_distance = -5.0;
		config.particles.size_min = 5.0;
		config.particles.size_max = 2.0;
		config.trail.spawn_probability = 1.5;
		config.trail.hue_min = f64::NAN;

		let config = config.sanitized();
		assert_eq!(config.tick_interval_ms, 1);
		assert_eq!(config.max_line_opacity, 1.0);
		assert_eq!(config.connection_distance, 100.0);
		assert_eq!((config.particles.size_min, config.particles.size_max), (2.0, 5.0));
		assert_eq!(config.trail.spawn_probability, 1.0);
		assert_eq!((config.trail.hue_min, config.trail.hue_max), (200.0, 260.0));
	}

	#[test]
	fn style_sanitizers_stand_alone() {
		let particles = ParticleStyle {
			speed: f64::INFINITY,
			size_min: 4.0,
			size_max: 1.0,
		}
		.sanitized();
		assert_eq!(particles.speed, 1.0);
		assert_eq!((particles.size_min, particles.size_max), (1.0, 4.0));

		let trail = TrailStyle {
			spawn_probability: -0.5,
			size_min: f64::NAN,
			size_max: 3.0,
			hue_min: -f64::MAX,
			hue_max: f64::MAX,
			..TrailStyle::default()
		}
		.sanitized();
		assert_eq!(trail.spawn_probability, 0.0);
		// NaN lower bound collapses to zero through `max`.
		assert_eq!((trail.size_min, trail.size_max), (0.0, 3.0));
		assert_eq!((trail.hue_min, trail.hue_max), (0.0, 360.0));
	}
}
