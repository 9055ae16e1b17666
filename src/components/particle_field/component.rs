//! Leptos component wrapping the particle field canvas.
//!
//! The component mounts a fixed, full-viewport canvas that ignores pointer
//! input. Three browser triggers drive it: a `setInterval` that ticks the field,
//! the window `resize` event that regenerates it, and window `mousemove` events
//! that feed the pointer trail. Rendering runs separately on
//! `requestAnimationFrame`. Everything is owned by [`FieldRuntime`] and released
//! together when the component is cleaned up.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use log::{debug, error, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::connections::{ConnectionLine, connections};
use super::field::{ParticleField, Viewport};
use super::render::{self, Frame};
use super::teardown::Teardown;
use super::theme::Theme;
use super::trail::{CursorTrail, Scheduler, TrailId};
use crate::error::FieldError;

type SharedContext = Rc<RefCell<Option<FieldContext>>>;

/// A pending `setTimeout`. The callback lives exactly as long as this does.
struct Timeout {
	handle: i32,
	_callback: Closure<dyn FnMut()>,
}

/// `setTimeout`-backed removal timers for the pointer trail.
struct BrowserTimers {
	window: Window,
	target: Weak<RefCell<Option<FieldContext>>>,
}

impl Scheduler for BrowserTimers {
	type Handle = Timeout;

	fn schedule(&mut self, id: TrailId, delay_ms: u32) -> Option<Timeout> {
		let target = self.target.clone();
		let callback = Closure::<dyn FnMut()>::new(move || {
			let Some(cell) = target.upgrade() else {
				return;
			};
			if let Some(ref mut c) = *cell.borrow_mut() {
				c.trail.expire(id);
			}
		});
		let handle = self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				delay_ms.min(i32::MAX as u32) as i32,
			)
			.ok()?;
		Some(Timeout {
			handle,
			_callback: callback,
		})
	}

	fn cancel(&mut self, handle: Timeout) {
		self.window.clear_timeout_with_handle(handle.handle);
	}
}

/// All mutable state behind the canvas.
struct FieldContext {
	field: ParticleField,
	lines: Vec<ConnectionLine>,
	trail: CursorTrail<Timeout>,
	timers: BrowserTimers,
	config: FieldConfig,
	theme: Theme,
	rng: SmallRng,
}

impl FieldContext {
	fn refresh_lines(&mut self) {
		self.lines = connections(
			self.field.particles(),
			self.config.connection_distance,
			self.config.max_line_opacity,
		);
	}

	fn step(&mut self) {
		self.field.step();
		self.refresh_lines();
	}

	fn resize(&mut self, viewport: Viewport) {
		let count = self.config.particle_count;
		if self.field.resize(viewport, count, &self.config.particles, &mut self.rng) {
			debug!(
				"ambient-field: regenerated {} particles for {}x{} (generation {})",
				self.field.particles().len(),
				viewport.width,
				viewport.height,
				self.field.generation()
			);
			self.refresh_lines();
		}
	}

	fn pointer_moved(&mut self, x: f64, y: f64) {
		let FieldContext {
			trail, timers, rng, ..
		} = self;
		trail.on_pointer_move(x, y, js_sys::Date::now(), rng, timers);
	}

	fn draw(&self, ctx: &CanvasRenderingContext2d) {
		let frame = Frame {
			viewport: self.field.viewport(),
			particles: self.field.particles(),
			lines: &self.lines,
			trail: self.trail.particles(),
			trail_lifetime_ms: self.trail.style().lifetime_ms,
			now_ms: js_sys::Date::now(),
		};
		render::render(ctx, &frame, &self.theme);
	}
}

/// Seed for the field RNG. The browser gives us no seeded entropy API
/// without extra crates, so mix the clock with `Math.random`.
fn entropy_seed() -> u64 {
	let noise = (js_sys::Math::random() * u64::MAX as f64) as u64;
	noise ^ (js_sys::Date::now() as u64).rotate_left(32)
}

fn window_viewport(window: &Window) -> Result<Viewport, FieldError> {
	Ok(Viewport::new(
		window.inner_width()?.as_f64().unwrap_or(0.0),
		window.inner_height()?.as_f64().unwrap_or(0.0),
	))
}

fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
	canvas.set_width(viewport.width.max(0.0) as u32);
	canvas.set_height(viewport.height.max(0.0) as u32);
}

/// Owns every browser resource the field holds.
///
/// Dropping it stops the tick interval and the animation frame, detaches both
/// listeners and cancels outstanding trail timers. A mount that fails partway
/// releases whatever it had already acquired.
struct FieldRuntime {
	_teardown: Teardown,
}

impl FieldRuntime {
	fn mount(
		canvas: HtmlCanvasElement,
		config: FieldConfig,
		theme: Theme,
	) -> Result<Self, FieldError> {
		let window = web_sys::window().ok_or(FieldError::NoWindow)?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(FieldError::NoContext)?
			.dyn_into()
			.map_err(|_| FieldError::NoContext)?;

		let viewport = window_viewport(&window)?;
		size_canvas(&canvas, viewport);

		let tick_ms = config.tick_interval_ms.min(i32::MAX as u32) as i32;
		info!(
			"ambient-field: mounting {} particles, theme '{}', tick {}ms",
			config.particle_count, theme.name, tick_ms
		);

		let context: SharedContext = Rc::new(RefCell::new(None));
		let mut state = FieldContext {
			field: ParticleField::new(),
			lines: Vec::new(),
			trail: CursorTrail::new(config.trail.clone()),
			timers: BrowserTimers {
				window: window.clone(),
				target: Rc::downgrade(&context),
			},
			config,
			theme,
			rng: SmallRng::seed_from_u64(entropy_seed()),
		};
		state.resize(viewport);
		*context.borrow_mut() = Some(state);

		// Released last, after nothing can reach the context any more.
		let mut teardown = Teardown::new();
		let context_release = context.clone();
		teardown.defer(move || {
			if let Some(mut c) = context_release.borrow_mut().take() {
				let pending = c.trail.pending();
				c.trail.cancel_all(&mut c.timers);
				info!("ambient-field: torn down, cancelled {} trail timers", pending);
			}
		});

		let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
		let on_resize = Closure::<dyn FnMut()>::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let Ok(viewport) = window_viewport(&win) else {
				return;
			};
			size_canvas(&canvas_resize, viewport);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.resize(viewport);
			}
		});
		window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
		let win = window.clone();
		teardown.defer(move || {
			let _ = win.remove_event_listener_with_callback(
				"resize",
				on_resize.as_ref().unchecked_ref(),
			);
		});

		let context_pointer = context.clone();
		let on_pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			if let Some(ref mut c) = *context_pointer.borrow_mut() {
				c.pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
			}
		});
		window
			.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())?;
		let win = window.clone();
		teardown.defer(move || {
			let _ = win.remove_event_listener_with_callback(
				"mousemove",
				on_pointer.as_ref().unchecked_ref(),
			);
		});

		let context_tick = context.clone();
		let on_tick = Closure::<dyn FnMut()>::new(move || {
			if let Some(ref mut c) = *context_tick.borrow_mut() {
				c.step();
			}
		});
		let interval = window.set_interval_with_callback_and_timeout_and_arguments_0(
			on_tick.as_ref().unchecked_ref(),
			tick_ms,
		)?;
		let win = window.clone();
		teardown.defer(move || {
			win.clear_interval_with_handle(interval);
			drop(on_tick);
		});

		// The frame closure holds a handle to its own slot, so the release must
		// be registered before the first request can fail.
		let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let frame = Rc::new(Cell::new(None::<i32>));
		let (context_anim, animate_inner, frame_inner) =
			(context.clone(), animate.clone(), frame.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref c) = *context_anim.borrow() {
				c.draw(&ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
						frame_inner.set(Some(id));
					}
				}
			}
		}));
		let (win, animate_release, frame_release) =
			(window.clone(), animate.clone(), frame.clone());
		teardown.defer(move || {
			if let Some(id) = frame_release.take() {
				let _ = win.cancel_animation_frame(id);
			}
			animate_release.borrow_mut().take();
		});
		if let Some(ref cb) = *animate.borrow() {
			frame.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
		}

		debug!("ambient-field: mounted, {} resources to release", teardown.len());
		Ok(Self {
			_teardown: teardown,
		})
	}
}

/// Renders the ambient particle field behind the page.
///
/// The canvas is fixed to the viewport and transparent to pointer input, so it
/// can sit under any content. Pointer movement is read from the window.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(optional)] config: Option<FieldConfig>,
	#[prop(optional)] theme: Option<Theme>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let runtime: Rc<RefCell<Option<FieldRuntime>>> = Rc::new(RefCell::new(None));
	let runtime_init = runtime.clone();
	let config = config.unwrap_or_default().sanitized();
	let theme = theme.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if runtime_init.borrow().is_some() {
			return;
		}
		match FieldRuntime::mount(canvas.into(), config.clone(), theme.clone()) {
			Ok(rt) => *runtime_init.borrow_mut() = Some(rt),
			Err(e) => error!("ambient-field: failed to mount: {}", e),
		}
	});

	// Dropping the runtime releases everything, whether that happens here or
	// when the owner disposes the stored value.
	let teardown = StoredValue::new_local(runtime);
	on_cleanup(move || {
		drop(teardown.try_update_value(|rt| rt.borrow_mut().take()));
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; display: block; pointer-events: none;"
		/>
	}
}
