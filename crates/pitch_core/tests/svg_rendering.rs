//! End-to-end rendering of a canvas through the SVG presenter

use pitch_core::{CanvasConfig, Color, PassType, PitchCanvas, Position, SvgSurface};

fn showcase(path: &std::path::Path) -> PitchCanvas<SvgSurface> {
    let config = CanvasConfig::default();
    let surface = SvgSurface::to_file(path, config.dpi);
    let mut canvas = PitchCanvas::with_config(config, surface).unwrap();

    canvas.draw_heatmap(&[40.0, 45.0, 50.0, 42.0], &[30.0, 35.0, 38.0, 44.0], None).unwrap();
    canvas.draw_player(Position::new(40.0, 30.0), Some(8), None).unwrap();
    canvas.draw_player(Position::new(70.0, 50.0), Some(9), Some(Color::BLUE)).unwrap();
    canvas
        .draw_pass(Position::new(40.0, 30.0), Position::new(70.0, 50.0), PassType::High, None)
        .unwrap();
    canvas
}

#[test]
fn test_show_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("showcase.svg");
    let mut canvas = showcase(&path);
    canvas.show().unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="1200" height="800""#));
    // Jersey numbers and the star glyph of the high pass
    assert!(svg.contains(">8</text>"));
    assert!(svg.contains(">9</text>"));
    assert!(svg.contains("<polygon"));
    assert!(svg.contains("stroke-dasharray"));
    assert!(svg.contains("fill-opacity"));
}

#[test]
fn test_repeated_show_renders_same_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("twice.svg");
    let mut canvas = showcase(&path);

    canvas.show().unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    canvas.show().unwrap();
    let second = std::fs::read_to_string(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_in_memory_surface() {
    let mut canvas =
        PitchCanvas::with_config(CanvasConfig::default(), SvgSurface::in_memory(50.0)).unwrap();
    assert!(canvas.surface().rendered().is_none());
    canvas.show().unwrap();

    let surface = canvas.into_surface();
    let svg = surface.rendered().unwrap();
    assert!(svg.contains(r#"width="600" height="400""#));
    assert!(surface.target().is_none());
}

#[test]
fn test_fine_heatmap_grid_renders() {
    let config = CanvasConfig::from_json(r#"{"heatmap": {"resolution": 400}}"#).unwrap();
    let mut canvas = PitchCanvas::with_config(config, SvgSurface::in_memory(50.0)).unwrap();
    canvas.draw_heatmap(&[40.0, 45.0, 50.0, 42.0], &[30.0, 35.0, 38.0, 44.0], None).unwrap();
    canvas.show().unwrap();

    let svg = canvas.surface().rendered().unwrap();
    assert!(svg.matches("fill-opacity").count() > 100);
}

#[test]
fn test_unbounded_resolution_rejected_before_drawing() {
    let mut config = CanvasConfig::default();
    config.heatmap.resolution = usize::MAX;
    let result = PitchCanvas::with_config(config, SvgSurface::in_memory(50.0));
    assert!(matches!(result, Err(pitch_core::PitchError::Configuration(_))));
}
