//! Ordered release of browser resources.

/// Release actions, run last-in first-out when dropped.
///
/// Each action is registered right after its resource is acquired, so a
/// half-finished mount releases exactly what it got.
#[derive(Default)]
pub(crate) struct Teardown {
	actions: Vec<Box<dyn FnOnce()>>,
}

impl Teardown {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Register `release` to run when this is dropped.
	pub(crate) fn defer(&mut self, release: impl FnOnce() + 'static) {
		self.actions.push(Box::new(release));
	}

	pub(crate) fn len(&self) -> usize {
		self.actions.len()
	}
}

impl Drop for Teardown {
	fn drop(&mut self) {
		while let Some(release) = self.actions.pop() {
			release();
		}
	}
}
