//! Short-lived dots that trail the pointer.
//!
//! A trail particle never moves. It exists from the pointer event that spawned
//! it until its own one-shot timer fires, and nothing can extend or restart
//! that timer. Timers go through [`Scheduler`] so the browser host can back
//! them with `setTimeout` and tests can drive them by hand.

use std::collections::HashMap;

use rand::Rng;

use super::config::TrailStyle;

/// Identity of a trail particle. Monotonic per [`CursorTrail`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrailId(pub u64);

/// A decorative dot left behind by the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct CursorParticle {
	pub id: TrailId,
	pub x: f64,
	pub y: f64,
	pub size: f64,
	/// Hue in degrees.
	pub hue: f64,
	/// Host clock reading at spawn, in milliseconds.
	pub born_ms: f64,
}

impl CursorParticle {
	/// Fraction of the lifetime already spent, clamped to `[0, 1]`.
	pub fn age_fraction(&self, now_ms: f64, lifetime_ms: u32) -> f64 {
		if lifetime_ms == 0 {
			return 1.0;
		}
		((now_ms - self.born_ms) / lifetime_ms as f64).clamp(0.0, 1.0)
	}
}

/// One-shot timer service used to remove trail particles.
pub trait Scheduler {
	/// Keeps the timer alive and identifies it for cancellation.
	type Handle;

	/// Arrange for `id` to be expired after `delay_ms`. `None` means the
	/// timer could not be created.
	fn schedule(&mut self, id: TrailId, delay_ms: u32) -> Option<Self::Handle>;

	/// Cancel a timer that has not fired yet.
	fn cancel(&mut self, handle: Self::Handle);
}

/// Live trail particles plus their pending removal timers.
pub struct CursorTrail<H> {
	style: TrailStyle,
	live: Vec<CursorParticle>,
	timers: HashMap<TrailId, H>,
	next_id: u64,
	pointer: Option<(f64, f64)>,
}

impl<H> CursorTrail<H> {
	/// The style is sanitized on the way in, so every later draw from its
	/// ranges is valid.
	pub fn new(style: TrailStyle) -> Self {
		Self {
			style: style.sanitized(),
			live: Vec::new(),
			timers: HashMap::new(),
			next_id: 0,
			pointer: None,
		}
	}

	pub fn style(&self) -> &TrailStyle {
		&self.style
	}

	/// Live particles in spawn order.
	pub fn particles(&self) -> &[CursorParticle] {
		&self.live
	}

	/// Last pointer position seen, if any.
	pub fn pointer(&self) -> Option<(f64, f64)> {
		self.pointer
	}

	/// Number of removal timers that have not fired yet.
	pub fn pending(&self) -> usize {
		self.timers.len()
	}

	/// Handle one pointer-move event.
	///
	/// Records the pointer position and, with the configured probability,
	/// spawns a particle at it and schedules its removal.
	pub fn on_pointer_move<R, S>(
		&mut self,
		x: f64,
		y: f64,
		now_ms: f64,
		rng: &mut R,
		scheduler: &mut S,
	) -> Option<TrailId>
	where
		R: Rng,
		S: Scheduler<Handle = H>,
	{
		self.pointer = Some((x, y));
		if !rng.gen_bool(self.style.spawn_probability) {
			return None;
		}

		let id = TrailId(self.next_id);
		self.next_id += 1;
		// A particle nobody will remove is worse than no particle.
		let handle = scheduler.schedule(id, self.style.lifetime_ms)?;
		self.timers.insert(id, handle);
		self.live.push(CursorParticle {
			id,
			x,
			y,
			size: rng.gen_range(self.style.size_min..=self.style.size_max),
			hue: rng.gen_range(self.style.hue_min..=self.style.hue_max),
			born_ms: now_ms,
		});
		Some(id)
	}

	/// Remove the particle whose timer fired. Unknown ids are ignored.
	pub fn expire(&mut self, id: TrailId) -> bool {
		// Dropped here, the handle has already done its job.
		self.timers.remove(&id);
		let before = self.live.len();
		self.live.retain(|p| p.id != id);
		self.live.len() != before
	}

	/// Cancel every pending timer and drop all live particles.
	pub fn cancel_all<S: Scheduler<Handle = H>>(&mut self, scheduler: &mut S) {
		for (_, handle) in self.timers.drain() {
			scheduler.cancel(handle);
		}
		self.live.clear();
	}
}
