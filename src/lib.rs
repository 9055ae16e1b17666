//! ambient-field: decorative particle background for a landing page.
//!
//! This crate provides a WASM canvas component that draws a drifting particle
//! field with proximity lines and a pointer trail behind regular page content.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::particle_field::{
	ConnectionLine, CursorParticle, CursorTrail, FieldConfig, Particle, ParticleField,
	ParticleFieldCanvas, ParticleStyle, Scheduler, Theme, TrailId, TrailStyle, Viewport,
	connections, initialize, tick,
};
pub use error::FieldError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-field: logging initialized");
}

/// Load field configuration from a script element with id="field-config".
/// Missing fields take their defaults; a missing element yields `None`.
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"ambient-field: loaded config, {} particles, link distance {}",
				config.particle_count, config.connection_distance
			);
			Some(config)
		}
		Err(e) => {
			warn!("ambient-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads the field configuration from the DOM and puts the particle field
/// behind the hero section.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Precise Trader" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="landing">
			<ParticleFieldCanvas config=config />
			<section class="hero">
				<h1>"Real-time Trading & Crypto Insights"</h1>
				<p class="subtitle">
					"Experience the future of trading with live market data, AI-powered analysis, and secure transactions."
				</p>
			</section>
		</main>
	}
}
