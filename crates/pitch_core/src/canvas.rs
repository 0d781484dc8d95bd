//! PitchCanvas: pitch diagram with player, pass and heatmap overlays
//!
//! The canvas owns its surface. Static markings are installed once in the
//! constructor; every draw call validates first and only then appends to
//! the surface, so a failed call leaves the scene untouched.
//!
//! ## Usage
//!
//! ```rust
//! use pitch_core::{PassType, PitchCanvas, Position};
//!
//! let mut canvas = PitchCanvas::new();
//! canvas.draw_player(Position::new(30.0, 40.0), Some(9), None).unwrap();
//! canvas
//!     .draw_pass(Position::new(30.0, 40.0), Position::new(50.0, 60.0), PassType::Ground, None)
//!     .unwrap();
//! assert!(canvas.draw_player(Position::new(130.0, 40.0), None, None).is_err());
//! canvas.show().unwrap();
//! ```

use crate::config::CanvasConfig;
use crate::density::{DensityOverlay, Kde};
use crate::error::Result;
use crate::markings::{build_markings, PitchMarking};
use crate::pitch::{PitchDimensions, Position, ViewBounds};
use crate::style::{Color, PassType};
use crate::surface::{Element, Frame, SceneSurface, Surface};

pub struct PitchCanvas<S: Surface = SceneSurface> {
    config: CanvasConfig,
    view: ViewBounds,
    markings: Vec<PitchMarking>,
    surface: S,
}

impl PitchCanvas<SceneSurface> {
    /// Default 120x80 canvas on an in-memory surface
    pub fn new() -> Self {
        let config = CanvasConfig::default();
        let view = ViewBounds::padded(&config.dimensions, config.view_padding);
        let markings = build_markings(&config.dimensions);
        Self::install(config, view, markings, SceneSurface::new())
    }
}

impl Default for PitchCanvas<SceneSurface> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> PitchCanvas<S> {
    /// Build on `surface` from a validated config
    pub fn with_config(config: CanvasConfig, surface: S) -> Result<Self> {
        config.validate()?;
        let view = ViewBounds::padded(&config.dimensions, config.view_padding);
        let markings = build_markings(&config.dimensions);
        Ok(Self::install(config, view, markings, surface))
    }

    fn install(
        config: CanvasConfig,
        view: ViewBounds,
        markings: Vec<PitchMarking>,
        mut surface: S,
    ) -> Self {
        surface.set_frame(Frame { view, figure_size: config.figure_size, axis_visible: false });
        surface.extend(markings.iter().map(|m| m.element.clone()).collect());
        tracing::debug!(
            width = config.dimensions.width,
            height = config.dimensions.height,
            markings = markings.len(),
            "pitch canvas created"
        );
        Self { config, view, markings, surface }
    }

    pub fn dimensions(&self) -> &PitchDimensions {
        &self.config.dimensions
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewBounds {
        &self.view
    }

    pub fn markings(&self) -> &[PitchMarking] {
        &self.markings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Elements drawn after the static markings
    pub fn overlay_count(&self) -> usize {
        self.surface.scene().len() - self.markings.len()
    }

    /// Filled player marker, optionally labelled with a jersey number
    pub fn draw_player(
        &mut self,
        position: Position,
        number: Option<u32>,
        color: Option<Color>,
    ) -> Result<()> {
        self.config.dimensions.validate_position(position)?;

        let style = &self.config.player;
        let color = color.unwrap_or(style.color);
        let mut elements = vec![Element::Circle {
            center: position,
            radius: style.radius,
            stroke: color,
            fill: Some(color),
        }];
        if let Some(number) = number {
            let (dx, dy) = style.number_offset;
            elements.push(Element::Text {
                at: position.offset(dx, dy),
                text: number.to_string(),
                font_size: style.number_font_size,
                color: style.number_color,
            });
        }

        tracing::debug!(x = position.x, y = position.y, ?number, "draw player");
        self.surface.extend(elements);
        Ok(())
    }

    /// Pass line from `start` to `end` with a start glyph chosen by `pass_type`
    pub fn draw_pass(
        &mut self,
        start: Position,
        end: Position,
        pass_type: PassType,
        color: Option<Color>,
    ) -> Result<()> {
        let dims = &self.config.dimensions;
        dims.validate_position(start)?;
        dims.validate_position(end)?;

        let color = color.unwrap_or(self.config.pass.color);
        let style = pass_type.style();
        let elements = vec![
            Element::Segment { start, end, color, dash: style.dash },
            Element::Marker {
                at: start,
                glyph: style.start_glyph,
                color,
                size: self.config.pass.glyph_size,
            },
        ];

        tracing::debug!(%pass_type, ?start, ?end, "draw pass");
        self.surface.extend(elements);
        Ok(())
    }

    /// `draw_pass` with the pass type given as a tag ("low", "ground", "high")
    pub fn draw_pass_tagged(
        &mut self,
        start: Position,
        end: Position,
        tag: &str,
        color: Option<Color>,
    ) -> Result<()> {
        let pass_type: PassType = tag.parse()?;
        self.draw_pass(start, end, pass_type, color)
    }

    /// Shaded kernel-density overlay of `(xs[i], ys[i])` samples.
    ///
    /// Samples are not checked against the pitch bounds: off-pitch samples
    /// are legitimate and the smoothed surface extends past the lines anyway.
    pub fn draw_heatmap(&mut self, xs: &[f64], ys: &[f64], color: Option<Color>) -> Result<()> {
        let kde = Kde::fit(xs, ys)?;
        let heat = &self.config.heatmap;
        let grid = kde.grid(&self.view, heat.resolution)?;
        let overlay = DensityOverlay::new(grid, heat.levels, color.unwrap_or(heat.color));

        tracing::debug!(samples = xs.len(), degenerate = kde.is_degenerate(), "draw heatmap");
        self.surface.extend(vec![Element::Density(overlay)]);
        Ok(())
    }

    /// Present the accumulated scene. Drawn content is unchanged.
    pub fn show(&mut self) -> Result<()> {
        self.surface.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Axis, PitchError};
    use crate::surface::ElementKind;

    fn p(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_new_installs_markings_only() {
        let canvas = PitchCanvas::new();
        let scene = canvas.surface().scene();
        assert_eq!(scene.len(), 12);
        assert_eq!(canvas.overlay_count(), 0);
        assert!(!scene.frame.axis_visible);
        assert_eq!(scene.frame.view, ViewBounds::padded(canvas.dimensions(), 2.0));
        assert_eq!(scene.frame.figure_size, (12.0, 8.0));
    }

    #[test]
    fn test_draw_player_adds_one_marker() {
        let mut canvas = PitchCanvas::new();
        let circles = canvas.surface().scene().count(ElementKind::Circle);
        canvas.draw_player(p(30.0, 20.0), None, None).unwrap();

        let scene = canvas.surface().scene();
        assert_eq!(scene.count(ElementKind::Circle), circles + 1);
        assert_eq!(scene.count(ElementKind::Text), 0);
        match scene.elements.last().unwrap() {
            Element::Circle { center, radius, fill, .. } => {
                assert_eq!(*center, p(30.0, 20.0));
                assert_eq!(*radius, 1.5);
                assert_eq!(*fill, Some(Color::RED));
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_draw_player_number_offset() {
        let mut canvas = PitchCanvas::new();
        canvas.draw_player(p(30.0, 20.0), Some(10), Some(Color::BLUE)).unwrap();

        match canvas.surface().scene().elements.last().unwrap() {
            Element::Text { at, text, font_size, .. } => {
                assert!((at.x - 29.1).abs() < 1e-9);
                assert!((at.y - 19.7).abs() < 1e-9);
                assert_eq!(text, "10");
                assert_eq!(*font_size, 7.0);
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_draw_player_out_of_bounds_leaves_scene() {
        let mut canvas = PitchCanvas::new();
        let before = canvas.surface().scene().clone();

        let err = canvas.draw_player(p(121.0, 40.0), Some(7), None).unwrap_err();
        assert!(matches!(err, PitchError::OutOfBounds { axis: Axis::X, .. }));
        assert_eq!(canvas.surface().scene(), &before);
    }

    #[test]
    fn test_draw_pass_glyph_per_type() {
        let mut canvas = PitchCanvas::new();
        for pass_type in PassType::ALL {
            canvas.draw_pass(p(10.0, 10.0), p(20.0, 20.0), pass_type, None).unwrap();
            match canvas.surface().scene().elements.last().unwrap() {
                Element::Marker { at, glyph, color, .. } => {
                    assert_eq!(*at, p(10.0, 10.0));
                    assert_eq!(*glyph, pass_type.style().start_glyph);
                    assert_eq!(*color, Color::STEEL_BLUE);
                }
                other => panic!("unexpected element {:?}", other),
            }
        }
        assert_eq!(canvas.surface().scene().count(ElementKind::Segment), 3);
        assert_eq!(canvas.overlay_count(), 6);
    }

    #[test]
    fn test_draw_pass_checks_each_endpoint() {
        let mut canvas = PitchCanvas::new();

        let start_bad = canvas.draw_pass(p(-5.0, 10.0), p(20.0, 20.0), PassType::Low, None);
        assert!(matches!(start_bad, Err(PitchError::OutOfBounds { value, .. }) if value == -5.0));

        let end_bad = canvas.draw_pass(p(10.0, 10.0), p(200.0, 20.0), PassType::Low, None);
        assert!(matches!(end_bad, Err(PitchError::OutOfBounds { value, .. }) if value == 200.0));

        assert_eq!(canvas.overlay_count(), 0);
    }

    #[test]
    fn test_draw_pass_tagged() {
        let mut canvas = PitchCanvas::new();
        canvas.draw_pass_tagged(p(10.0, 10.0), p(20.0, 20.0), "low", None).unwrap();

        let err = canvas
            .draw_pass_tagged(p(10.0, 10.0), p(20.0, 20.0), "diagonal", None)
            .unwrap_err();
        assert!(matches!(err, PitchError::InvalidPassType(_)));
        assert_eq!(canvas.overlay_count(), 2);
    }

    #[test]
    fn test_draw_heatmap() {
        let mut canvas = PitchCanvas::new();
        canvas.draw_heatmap(&[10.0, 60.0, 100.0], &[20.0, 40.0, 70.0], None).unwrap();
        assert_eq!(canvas.surface().scene().count(ElementKind::Density), 1);

        let err = canvas.draw_heatmap(&[1.0, 2.0], &[1.0], None).unwrap_err();
        assert!(err.is_sample_error());
        assert_eq!(canvas.overlay_count(), 1);
    }

    #[test]
    fn test_heatmap_accepts_off_pitch_samples() {
        let mut canvas = PitchCanvas::new();
        canvas.draw_heatmap(&[-10.0, 130.0, 60.0], &[-5.0, 90.0, 40.0], Some(Color::RED)).unwrap();
        match canvas.surface().scene().elements.last().unwrap() {
            Element::Density(overlay) => {
                assert_eq!(overlay.levels, 50);
                assert_eq!(overlay.color, Color::RED);
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_show_is_idempotent() {
        let mut canvas = PitchCanvas::new();
        canvas.draw_player(p(60.0, 40.0), Some(1), None).unwrap();
        let before = canvas.surface().scene().clone();

        canvas.show().unwrap();
        canvas.show().unwrap();
        assert_eq!(canvas.surface().scene(), &before);
        assert_eq!(canvas.surface().presented(), 2);
    }

    #[test]
    fn test_with_config_rejects_bad_dimensions() {
        let mut config = CanvasConfig::default();
        config.dimensions.height = 0.0;
        let result = PitchCanvas::with_config(config, SceneSurface::new());
        assert!(matches!(result, Err(PitchError::Configuration(_))));
    }

    #[test]
    fn test_with_config_custom_pitch() {
        let config =
            CanvasConfig::from_json(r#"{"dimensions": {"width": 105.0, "height": 68.0}}"#).unwrap();
        let mut canvas = PitchCanvas::with_config(config, SceneSurface::new()).unwrap();
        assert_eq!(canvas.view().x_max, 107.0);
        assert!(canvas.draw_player(p(110.0, 30.0), None, None).is_err());
        assert!(canvas.draw_player(p(100.0, 30.0), None, None).is_ok());
    }
}
