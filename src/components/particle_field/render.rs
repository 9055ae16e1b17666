//! Canvas rendering for the particle field.
//!
//! Draw order, back to front:
//! 1. Background gradient (optional)
//! 2. Connection lines
//! 3. Field particles
//! 4. Pointer trail

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::connections::ConnectionLine;
use super::field::{Particle, Viewport};
use super::theme::{BackgroundStyle, Theme};
use super::trail::CursorParticle;

/// Everything one frame needs, borrowed from the live state.
pub struct Frame<'a> {
	pub viewport: Viewport,
	pub particles: &'a [Particle],
	pub lines: &'a [ConnectionLine],
	pub trail: &'a [CursorParticle],
	pub trail_lifetime_ms: u32,
	pub now_ms: f64,
}

/// Renders a complete frame to the canvas.
pub fn render(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, theme: &Theme) {
	let Viewport { width, height } = frame.viewport;
	ctx.clear_rect(0.0, 0.0, width, height);

	if let Some(background) = &theme.background {
		draw_background(ctx, frame.viewport, background);
	}
	draw_lines(ctx, frame.lines, theme);
	draw_particles(ctx, frame.particles, theme);
	draw_trail(ctx, frame, theme);
}

fn draw_background(ctx: &CanvasRenderingContext2d, viewport: Viewport, style: &BackgroundStyle) {
	let gradient = ctx.create_linear_gradient(0.0, 0.0, viewport.width, viewport.height);
	let stops = [(0.0, style.from), (0.5, style.via), (1.0, style.to)];
	for (offset, color) in stops {
		if gradient.add_color_stop(offset, &color.to_css()).is_err() {
			return;
		}
	}

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
}

fn draw_lines(ctx: &CanvasRenderingContext2d, lines: &[ConnectionLine], theme: &Theme) {
	ctx.set_line_width(1.0);
	for line in lines {
		ctx.set_stroke_style_str(&theme.line.with_alpha(theme.line.a * line.opacity).to_css());
		ctx.begin_path();
		ctx.move_to(line.x1, line.y1);
		ctx.line_to(line.x2, line.y2);
		ctx.stroke();
	}
}

fn draw_particles(ctx: &CanvasRenderingContext2d, particles: &[Particle], theme: &Theme) {
	ctx.set_fill_style_str(&theme.particle.to_css());
	for p in particles {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.size, 0.0, PI * 2.0);
		ctx.fill();
	}
}

/// Trail dots fade out linearly over their lifetime.
fn draw_trail(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, theme: &Theme) {
	for p in frame.trail {
		let alpha = 1.0 - p.age_fraction(frame.now_ms, frame.trail_lifetime_ms);
		if alpha <= 0.0 {
			continue;
		}
		ctx.set_fill_style_str(&theme.trail.to_css(p.hue, alpha));
		ctx.begin_path();
		// `size` is a diameter.
		let _ = ctx.arc(p.x, p.y, p.size / 2.0, 0.0, PI * 2.0);
		ctx.fill();
	}
}
