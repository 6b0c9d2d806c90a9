//! Aquarelle is a generative watercolor painting engine.
//!
//! Given an anchor point and a color, it renders an organic, translucent
//! "bloom" of pigment onto a persistent CPU raster surface. One bloom is a
//! [`StrokeBundle`]: a random number of [`StrokeLayer`] polygons that all
//! start as the same single point, then diverge through rounds of random
//! midpoint deformation before being filled at very low alpha. Where the
//! deformed layers still overlap the pigment stays dense; where they
//! disagree it washes out.
//!
//! # Painting pipeline
//!
//! 1. **Anchor + color**: a pointer, tracked limb, palette click, or
//!    detected audio pitch picks where and what to paint ([`PaintSession`],
//!    [`Palette`], [`PitchDetector`]).
//! 2. **Bundle**: [`StrokeBundle::paint`] builds, deforms, and renders one
//!    bloom in a single synchronous call.
//! 3. **Surface**: [`PaintSurface`] accumulates every layer with
//!    premultiplied source-over blending and is never cleared implicitly.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit randomness**: every stochastic operation takes a caller
//!   supplied generator, so seeded runs are reproducible end-to-end
//!   ([`render_scene`]).
//! - **Premultiplied RGBA8** end-to-end: the surface stores premultiplied
//!   pixels and converts only on export.
#![forbid(unsafe_code)]

pub mod audio;
pub mod config;
pub mod foundation;
pub mod palette;
pub mod render;
pub mod scene;
pub mod session;
pub mod stroke;

pub use audio::pitch::{NOTE_NAMES, PitchDetector, pitch_class};
pub use config::{BrushConfig, LayerRange, RoundsPolicy};
pub use foundation::core::{BezPath, CanvasSize, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{AquarelleError, AquarelleResult};
pub use palette::Palette;
pub use render::surface::PaintSurface;
pub use scene::{Scene, StrokeEvent, render_scene};
pub use session::{InputEvent, LIMB_CONFIDENCE_THRESHOLD, PaintSession, SessionOptions};
pub use stroke::bundle::StrokeBundle;
pub use stroke::layer::StrokeLayer;
