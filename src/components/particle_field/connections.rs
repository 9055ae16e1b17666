//! Proximity lines between nearby particles.
//!
//! Every unordered pair is checked each tick, which is quadratic in the
//! particle count. That is fine for the tens of particles a background uses;
//! a field of thousands would want a spatial grid, and that grid must still
//! produce exactly the pairs below the threshold.

use super::field::Particle;

/// A translucent segment between two particles.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	/// `(1 - distance / threshold) * max_opacity`
	pub opacity: f64,
}

/// Build the connection lines for the current snapshot.
///
/// Pairs at or beyond `threshold` produce nothing. The result carries no
/// ordering guarantee.
pub fn connections(particles: &[Particle], threshold: f64, max_opacity: f64) -> Vec<ConnectionLine> {
	let mut lines = Vec::new();
	if threshold <= 0.0 {
		return lines;
	}

	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let distance = (dx * dx + dy * dy).sqrt();
			if distance < threshold {
				lines.push(ConnectionLine {
					x1: a.x,
					y1: a.y,
					x2: b.x,
					y2: b.y,
					opacity: (1.0 - distance / threshold) * max_opacity,
				});
			}
		}
	}
	lines
}
