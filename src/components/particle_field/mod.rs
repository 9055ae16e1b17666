//! Ambient particle field with a pointer trail.
//!
//! Renders a decorative background on an HTML canvas:
//! - Particles drifting at a fixed per-tick velocity, bouncing off the
//!   viewport edges
//! - Translucent lines between particles closer than a threshold, fading with
//!   distance
//! - Short-lived coloured dots left behind by the pointer
//!
//! The simulation ([`field`], [`connections`], [`trail`]) is plain Rust with an
//! injectable RNG and timer service, so it runs and tests without a browser.
//! [`ParticleFieldCanvas`] wires it to the DOM.
//!
//! # Example
//!
//! ```ignore
//! use ambient_field::{FieldConfig, ParticleFieldCanvas};
//!
//! let config = FieldConfig { particle_count: 40, ..FieldConfig::default() };
//! view! { <ParticleFieldCanvas config=config /> }
//! ```
//!
//! Over a page that paints its own backdrop, pass [`Theme::overlay`] so the
//! canvas skips the gradient:
//!
//! ```ignore
//! view! { <ParticleFieldCanvas theme=Theme::overlay() /> }
//! ```

mod component;
pub mod config;
pub mod connections;
pub mod field;
mod render;
mod teardown;
pub mod theme;
pub mod trail;

pub use component::ParticleFieldCanvas;
pub use config::{FieldConfig, ParticleStyle, TrailStyle};
pub use connections::{ConnectionLine, connections};
pub use field::{Particle, ParticleField, Viewport, initialize, tick};
pub use theme::Theme;
pub use trail::{CursorParticle, CursorTrail, Scheduler, TrailId};
