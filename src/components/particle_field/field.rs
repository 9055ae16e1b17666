//! Ambient background particles: seeding, integration and edge bounce.

use rand::Rng;

use super::config::ParticleStyle;

/// Base per-tick velocity range per axis, before the style's speed factor.
const BASE_VELOCITY: f64 = 0.25;

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// A viewport is known once both dimensions are positive and finite.
	pub fn is_known(&self) -> bool {
		self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
	}
}

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Displacement per tick, not per second.
	pub dx: f64,
	pub dy: f64,
	pub size: f64,
}

/// Seed `count` particles uniformly inside the viewport.
///
/// Returns an empty set while the viewport is unknown. The style is sanitized
/// first, so a reversed or non-finite size range still seeds a valid set.
pub fn initialize<R: Rng>(
	viewport: Viewport,
	count: usize,
	style: &ParticleStyle,
	rng: &mut R,
) -> Vec<Particle> {
	if !viewport.is_known() {
		return Vec::new();
	}

	let style = style.clone().sanitized();
	let v = BASE_VELOCITY * style.speed.abs();
	(0..count)
		.map(|_| Particle {
			x: rng.gen_range(0.0..=viewport.width),
			y: rng.gen_range(0.0..=viewport.height),
			dx: rng.gen_range(-v..=v),
			dy: rng.gen_range(-v..=v),
			size: rng.gen_range(style.size_min..=style.size_max),
		})
		.collect()
}

/// Advance every particle by one tick.
///
/// A particle whose new coordinate leaves `[0, extent]` has that velocity
/// component negated. The position is left where it landed, so a particle can
/// sit outside the viewport for a single tick before heading back in.
pub fn tick(particles: &[Particle], viewport: Viewport) -> Vec<Particle> {
	particles
		.iter()
		.map(|p| {
			let (x, y) = (p.x + p.dx, p.y + p.dy);
			let dx = if x < 0.0 || x > viewport.width { -p.dx } else { p.dx };
			let dy = if y < 0.0 || y > viewport.height { -p.dy } else { p.dy };
			Particle { x, y, dx, dy, ..*p }
		})
		.collect()
}

/// Owns the live particle snapshot for one viewport.
///
/// The snapshot is replaced wholesale on every tick and every resize, so a
/// reader never observes a half-updated set.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	particles: Vec<Particle>,
	viewport: Viewport,
	/// Bumped each time the set is regenerated. Particles from different
	/// generations are unrelated.
	generation: u64,
}

impl ParticleField {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Adopt a new viewport size, regenerating the whole set if it changed.
	///
	/// Returns `true` when the particle set was replaced.
	pub fn resize<R: Rng>(
		&mut self,
		viewport: Viewport,
		count: usize,
		style: &ParticleStyle,
		rng: &mut R,
	) -> bool {
		if viewport == self.viewport {
			return false;
		}
		self.viewport = viewport;
		self.particles = initialize(viewport, count, style, rng);
		self.generation += 1;
		true
	}

	/// Advance the field one tick.
	pub fn step(&mut self) {
		self.particles = tick(&self.particles, self.viewport);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn particle(x: f64, y: f64, dx: f64, dy: f64) -> Particle {
		Particle { x, y, dx, dy, size: 2.0 }
	}

	#[test]
	fn initialize_stays_in_bounds() {
		let mut rng = SmallRng::seed_from_u64(7);
		let style = ParticleStyle::default();
		let particles = initialize(Viewport::new(800.0, 600.0), 5, &style, &mut rng);

		assert_eq!(particles.len(), 5);
		for p in &particles {
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
			assert!((1.0..=4.0).contains(&p.size));
			assert!(p.dx.abs() <= 0.25 && p.dy.abs() <= 0.25);
		}
	}

	#[test]
	fn speed_scales_velocity_range() {
		let mut rng = SmallRng::seed_from_u64(3);
		let style = ParticleStyle {
			speed: 4.0,
			..ParticleStyle::default()
		};
		let particles = initialize(Viewport::new(100.0, 100.0), 200, &style, &mut rng);
		assert!(particles.iter().all(|p| p.dx.abs() <= 1.0 && p.dy.abs() <= 1.0));
		assert!(particles.iter().any(|p| p.dx.abs() > 0.25));
	}

	#[test]
	fn unknown_viewport_spawns_nothing() {
		let mut rng = SmallRng::seed_from_u64(1);
		let style = ParticleStyle::default();
		assert!(initialize(Viewport::default(), 30, &style, &mut rng).is_empty());
		assert!(initialize(Viewport::new(800.0, 0.0), 30, &style, &mut rng).is_empty());
		assert!(initialize(Viewport::new(-5.0, 600.0), 30, &style, &mut rng).is_empty());
		assert!(initialize(Viewport::new(f64::INFINITY, 600.0), 30, &style, &mut rng).is_empty());
	}

	#[test]
	fn reversed_size_range_is_reordered() {
		let mut rng = SmallRng::seed_from_u64(4);
		let style = ParticleStyle {
			size_min: 4.0,
			size_max: 1.0,
			..ParticleStyle::default()
		};
		let mut field = ParticleField::new();
		assert!(field.resize(Viewport::new(800.0, 600.0), 30, &style, &mut rng));
		assert_eq!(field.particles().len(), 30);
		assert!(field.particles().iter().all(|p| (1.0..=4.0).contains(&p.size)));
	}

	#[test]
	fn non_finite_style_falls_back_to_defaults() {
		let mut rng = SmallRng::seed_from_u64(4);
		let style = ParticleStyle {
			speed: f64::NAN,
			size_min: f64::NAN,
			size_max: f64::INFINITY,
		};
		let particles = initialize(Viewport::new(100.0, 100.0), 20, &style, &mut rng);
		assert_eq!(particles.len(), 20);
		for p in &particles {
			assert!(p.dx.abs() <= 0.25 && p.dy.abs() <= 0.25);
			assert!((1.0..=4.0).contains(&p.size));
		}
	}

	#[test]
	fn tick_moves_by_velocity() {
		let next = tick(&[particle(10.0, 20.0, 0.5, -0.25)], Viewport::new(100.0, 100.0));
		assert_eq!(next[0], particle(10.5, 19.75, 0.5, -0.25));
	}

	#[test]
	fn tick_reflects_without_clamping() {
		let viewport = Viewport::new(100.0, 100.0);
		let next = tick(&[particle(99.9, 0.1, 0.25, -0.25)], viewport);

		// Both axes overshoot and flip, position is not pulled back.
		assert!(next[0].x > 100.0);
		assert!(next[0].y < 0.0);
		assert_eq!((next[0].dx, next[0].dy), (-0.25, 0.25));

		// The following tick brings it back inside.
		let back = tick(&next, viewport);
		assert!((0.0..=100.0).contains(&back[0].x));
		assert!((0.0..=100.0).contains(&back[0].y));
		assert_eq!((back[0].dx, back[0].dy), (-0.25, 0.25));
	}

	#[test]
	fn axes_reflect_independently() {
		let next = tick(&[particle(50.0, 99.9, 0.2, 0.2)], Viewport::new(100.0, 100.0));
		assert_eq!(next[0].dx, 0.2);
		assert_eq!(next[0].dy, -0.2);
	}

	#[test]
	fn long_run_keeps_particles_near_bounds() {
		let mut rng = SmallRng::seed_from_u64(42);
		let style = ParticleStyle::default();
		let viewport = Viewport::new(320.0, 240.0);
		let mut field = ParticleField::new();
		field.resize(viewport, 30, &style, &mut rng);

		for _ in 0..5_000 {
			let before = field.particles().to_vec();
			field.step();
			for (old, new) in before.iter().zip(field.particles()) {
				let in_x = (0.0..=viewport.width).contains(&new.x);
				let in_y = (0.0..=viewport.height).contains(&new.y);
				assert!(in_x || new.dx == -old.dx);
				assert!(in_y || new.dy == -old.dy);
				assert!(new.x >= -0.5 && new.x <= viewport.width + 0.5);
				assert!(new.y >= -0.5 && new.y <= viewport.height + 0.5);
			}
		}
	}

	#[test]
	fn resize_replaces_the_whole_set() {
		let mut rng = SmallRng::seed_from_u64(9);
		let style = ParticleStyle::default();
		let mut field = ParticleField::new();

		assert!(field.resize(Viewport::new(800.0, 600.0), 10, &style, &mut rng));
		let first = field.particles().to_vec();
		let first_generation = field.generation();

		assert!(field.resize(Viewport::new(400.0, 300.0), 10, &style, &mut rng));
		assert_eq!(field.generation(), first_generation + 1);
		assert_eq!(field.particles().len(), 10);
		assert!(field.particles().iter().all(|p| !first.contains(p)));
		assert!(
			field
				.particles()
				.iter()
				.all(|p| p.x <= 400.0 && p.y <= 300.0)
		);
	}

	#[test]
	fn resize_to_same_size_is_a_no_op() {
		let mut rng = SmallRng::seed_from_u64(9);
		let style = ParticleStyle::default();
		let mut field = ParticleField::new();
		field.resize(Viewport::new(800.0, 600.0), 10, &style, &mut rng);
		let snapshot = field.particles().to_vec();

		assert!(!field.resize(Viewport::new(800.0, 600.0), 10, &style, &mut rng));
		assert_eq!(field.particles(), snapshot.as_slice());
	}

	#[test]
	fn collapsing_viewport_empties_field() {
		let mut rng = SmallRng::seed_from_u64(5);
		let style = ParticleStyle::default();
		let mut field = ParticleField::new();
		field.resize(Viewport::new(800.0, 600.0), 10, &style, &mut rng);
		field.resize(Viewport::new(0.0, 600.0), 10, &style, &mut rng);
		assert!(field.particles().is_empty());
		field.step();
		assert!(field.particles().is_empty());
	}
}
