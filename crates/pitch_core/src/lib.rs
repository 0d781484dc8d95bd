//! # pitch_core - Soccer pitch diagrams
//!
//! Draws a pitch with its standard markings and overlays player markers,
//! pass annotations and kernel-density heatmaps.
//!
//! ## Features
//! - Bounds-checked player and pass positions (never clamped)
//! - Closed pass-type enum with a fixed glyph table
//! - Per-canvas surface handle, no global figure state
//! - SVG presenter

pub mod canvas;
pub mod config;
pub mod density;
pub mod error;
pub mod markings;
pub mod pitch;
pub mod style;
pub mod surface;
pub mod svg;

pub use canvas::PitchCanvas;
pub use config::CanvasConfig;
pub use error::{Axis, PitchError, Result};
pub use markings::{MarkingKind, PitchMarking};
pub use pitch::{PitchDimensions, Position, ViewBounds};
pub use style::{Color, Glyph, LineDash, PassStyle, PassType};
pub use surface::{Element, ElementKind, Scene, SceneSurface, Surface};
pub use svg::{render_svg, SvgSurface};
