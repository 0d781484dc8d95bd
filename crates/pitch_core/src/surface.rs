//! Drawing surface abstraction
//!
//! A surface is a retained display list (`Scene`) plus a presenter. Each
//! `PitchCanvas` owns exactly one surface; nothing is shared between
//! instances.

use serde::Serialize;

use crate::density::DensityOverlay;
use crate::error::Result;
use crate::pitch::{Position, ViewBounds};
use crate::style::{Color, Glyph, LineDash};

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Rect {
        origin: Position,
        width: f64,
        height: f64,
        stroke: Color,
        fill: Option<Color>,
    },
    Circle {
        center: Position,
        radius: f64,
        stroke: Color,
        fill: Option<Color>,
    },
    /// Elliptical arc, angles in degrees counter-clockwise from +x
    Arc {
        center: Position,
        width: f64,
        height: f64,
        theta1: f64,
        theta2: f64,
        stroke: Color,
    },
    Segment {
        start: Position,
        end: Position,
        color: Color,
        dash: LineDash,
    },
    /// Straight data-space connector between two points
    Connector {
        start: Position,
        end: Position,
        color: Color,
    },
    Marker {
        at: Position,
        glyph: Glyph,
        color: Color,
        /// Glyph size in pixels, independent of the view scale
        size: f64,
    },
    Text {
        at: Position,
        text: String,
        /// Points
        font_size: f64,
        color: Color,
    },
    Density(DensityOverlay),
}

/// Element discriminant used for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Rect,
    Circle,
    Arc,
    Segment,
    Connector,
    Marker,
    Text,
    Density,
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Rect { .. } => ElementKind::Rect,
            Element::Circle { .. } => ElementKind::Circle,
            Element::Arc { .. } => ElementKind::Arc,
            Element::Segment { .. } => ElementKind::Segment,
            Element::Connector { .. } => ElementKind::Connector,
            Element::Marker { .. } => ElementKind::Marker,
            Element::Text { .. } => ElementKind::Text,
            Element::Density(_) => ElementKind::Density,
        }
    }
}

/// Figure-level settings applied once when the canvas is created
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub view: ViewBounds,
    /// Figure size in inches (width, height)
    pub figure_size: (f64, f64),
    pub axis_visible: bool,
}

/// Ordered display list; later elements draw on top
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub frame: Frame,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(frame: Frame) -> Self {
        Self { frame, elements: Vec::new() }
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Drawing target owned by a single canvas
pub trait Surface {
    /// Install frame settings. Called once during canvas construction.
    fn set_frame(&mut self, frame: Frame);

    /// Append elements atomically, preserving order
    fn extend(&mut self, elements: Vec<Element>);

    fn scene(&self) -> &Scene;

    /// Render the accumulated scene to the output target.
    ///
    /// Must not alter the scene.
    fn present(&mut self) -> Result<()>;
}

/// In-memory surface; presenting only logs a summary
#[derive(Debug, Clone)]
pub struct SceneSurface {
    scene: Scene,
    presented: usize,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self { scene: Scene::new(default_frame()), presented: 0 }
    }

    /// Number of completed `present` calls
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for SceneSurface {
    fn set_frame(&mut self, frame: Frame) {
        self.scene.frame = frame;
    }

    fn extend(&mut self, elements: Vec<Element>) {
        self.scene.elements.extend(elements);
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        tracing::info!(elements = self.scene.len(), "scene presented");
        Ok(())
    }
}

pub(crate) fn default_frame() -> Frame {
    Frame {
        view: ViewBounds { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 },
        figure_size: (12.0, 8.0),
        axis_visible: true,
    }
}
