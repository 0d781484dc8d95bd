//! SVG presenter
//!
//! Renders a `Scene` to a standalone SVG document. Data space has y up;
//! the document has y down, so every y is flipped through `Projection`.

use std::fmt::Write as _;
use std::fs::{remove_file, rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::density::DensityOverlay;
use crate::error::Result;
use crate::pitch::{Position, ViewBounds};
use crate::style::{Color, Glyph, LineDash};
use crate::surface::{default_frame, Element, Frame, Scene, Surface};

const STROKE_WIDTH: f64 = 1.5;
const POINTS_PER_INCH: f64 = 72.0;

/// Data-space to pixel-space mapping
#[derive(Debug, Clone, Copy)]
struct Projection {
    view: ViewBounds,
    width_px: f64,
    height_px: f64,
    dpi: f64,
}

impl Projection {
    fn new(frame: &Frame, dpi: f64) -> Self {
        Self {
            view: frame.view,
            width_px: frame.figure_size.0 * dpi,
            height_px: frame.figure_size.1 * dpi,
            dpi,
        }
    }

    fn sx(&self) -> f64 {
        self.width_px / self.view.width()
    }

    fn sy(&self) -> f64 {
        self.height_px / self.view.height()
    }

    fn point(&self, p: Position) -> (f64, f64) {
        (
            (p.x - self.view.x_min) * self.sx(),
            self.height_px - (p.y - self.view.y_min) * self.sy(),
        )
    }

    fn font_px(&self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }
}

/// Render `scene` at `dpi` pixels per inch
pub fn render_svg(scene: &Scene, dpi: f64) -> String {
    let proj = Projection::new(&scene.frame, dpi);
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.2} {h:.2}">"#,
        w = proj.width_px,
        h = proj.height_px
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);
    if scene.frame.axis_visible {
        let _ = writeln!(
            out,
            r#"<rect x="0" y="0" width="{:.2}" height="{:.2}" fill="none" stroke="black"/>"#,
            proj.width_px, proj.height_px
        );
    }

    for element in &scene.elements {
        write_element(&mut out, &proj, element);
    }

    out.push_str("</svg>\n");
    out
}

fn write_element(out: &mut String, proj: &Projection, element: &Element) {
    match element {
        Element::Rect { origin, width, height, stroke, fill } => {
            // Top-left corner in pixel space is the data-space top edge
            let (x, y) = proj.point(origin.offset(0.0, *height));
            let _ = writeln!(
                out,
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                x,
                y,
                width * proj.sx(),
                height * proj.sy(),
                fill_attr(*fill),
                stroke,
                STROKE_WIDTH
            );
        }
        Element::Circle { center, radius, stroke, fill } => {
            let (cx, cy) = proj.point(*center);
            let _ = writeln!(
                out,
                r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                cx,
                cy,
                radius * proj.sx(),
                radius * proj.sy(),
                fill_attr(*fill),
                stroke,
                STROKE_WIDTH
            );
        }
        Element::Arc { center, width, height, theta1, theta2, stroke } => {
            write_arc(out, proj, *center, *width, *height, *theta1, *theta2, *stroke);
        }
        Element::Segment { start, end, color, dash } => {
            let (x1, y1) = proj.point(*start);
            let (x2, y2) = proj.point(*end);
            let dash_attr = match dash {
                LineDash::Solid => "",
                LineDash::Dashed => r#" stroke-dasharray="6,4""#,
            };
            let _ = writeln!(
                out,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"{}/>"#,
                x1, y1, x2, y2, color, STROKE_WIDTH, dash_attr
            );
        }
        Element::Connector { start, end, color } => {
            let (x1, y1) = proj.point(*start);
            let (x2, y2) = proj.point(*end);
            let _ = writeln!(
                out,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
                x1, y1, x2, y2, color, STROKE_WIDTH
            );
        }
        Element::Marker { at, glyph, color, size } => {
            write_marker(out, proj.point(*at), *glyph, *color, *size);
        }
        Element::Text { at, text, font_size, color } => {
            let (x, y) = proj.point(*at);
            let _ = writeln!(
                out,
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.2}" font-family="sans-serif" fill="{}">{}</text>"#,
                x,
                y,
                proj.font_px(*font_size),
                color,
                escape_xml(text)
            );
        }
        Element::Density(overlay) => write_density(out, proj, overlay),
    }
}

#[allow(clippy::too_many_arguments)]
fn write_arc(
    out: &mut String,
    proj: &Projection,
    center: Position,
    width: f64,
    height: f64,
    theta1: f64,
    theta2: f64,
    stroke: Color,
) {
    let (rx, ry) = (width * 0.5, height * 0.5);
    let at = |deg: f64| {
        let t = deg.to_radians();
        proj.point(center.offset(rx * t.cos(), ry * t.sin()))
    };
    let (x1, y1) = at(theta1);
    let (x2, y2) = at(theta2);
    let sweep = (theta2 - theta1).rem_euclid(360.0);
    let large_arc = u8::from(sweep > 180.0);
    // Counter-clockwise in data space is clockwise once y is flipped
    let _ = writeln!(
        out,
        r#"<path d="M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        x1,
        y1,
        rx * proj.sx(),
        ry * proj.sy(),
        large_arc,
        x2,
        y2,
        stroke,
        STROKE_WIDTH
    );
}

fn write_marker(out: &mut String, (x, y): (f64, f64), glyph: Glyph, color: Color, size: f64) {
    let r = size * 0.5;
    match glyph {
        Glyph::Circle => {
            let _ = writeln!(
                out,
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                x, y, r, color
            );
        }
        Glyph::Triangle => {
            let points = polygon_points(x, y, &[(0.0, -r), (r, r), (-r, r)]);
            let _ = writeln!(out, r#"<polygon points="{}" fill="{}"/>"#, points, color);
        }
        Glyph::Star => {
            let vertices: Vec<(f64, f64)> = (0..10)
                .map(|i| {
                    let radius = if i % 2 == 0 { r } else { r * 0.4 };
                    let t = std::f64::consts::PI * (i as f64) / 5.0 - std::f64::consts::FRAC_PI_2;
                    (radius * t.cos(), radius * t.sin())
                })
                .collect();
            let points = polygon_points(x, y, &vertices);
            let _ = writeln!(out, r#"<polygon points="{}" fill="{}"/>"#, points, color);
        }
    }
}

fn polygon_points(x: f64, y: f64, offsets: &[(f64, f64)]) -> String {
    offsets
        .iter()
        .map(|(dx, dy)| format!("{:.2},{:.2}", x + dx, y + dy))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_density(out: &mut String, proj: &Projection, overlay: &DensityOverlay) {
    let grid = &overlay.grid;
    let (w, h) = (grid.cell_width * proj.sx(), grid.cell_height * proj.sy());
    let _ = writeln!(out, r#"<g fill="{}" stroke="none">"#, overlay.color);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let level = overlay.level(col, row);
            if level == 0 {
                continue;
            }
            let center = grid.cell_center(col, row);
            let corner = center.offset(-grid.cell_width * 0.5, grid.cell_height * 0.5);
            let (x, y) = proj.point(corner);
            let _ = writeln!(
                out,
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill-opacity="{:.3}"/>"#,
                x,
                y,
                w,
                h,
                level as f64 / overlay.levels as f64
            );
        }
    }
    out.push_str("</g>\n");
}

fn fill_attr(fill: Option<Color>) -> String {
    fill.map(|c| c.to_hex()).unwrap_or_else(|| "none".to_string())
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Surface that renders to SVG when presented
#[derive(Debug, Clone)]
pub struct SvgSurface {
    scene: Scene,
    dpi: f64,
    target: Option<PathBuf>,
    rendered: Option<String>,
}

impl SvgSurface {
    /// Keep the rendered document in memory only
    pub fn in_memory(dpi: f64) -> Self {
        Self { scene: Scene::new(default_frame()), dpi, target: None, rendered: None }
    }

    /// Write the rendered document to `path` on every present
    pub fn to_file(path: impl Into<PathBuf>, dpi: f64) -> Self {
        Self { target: Some(path.into()), ..Self::in_memory(dpi) }
    }

    /// Document produced by the most recent present
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    pub fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }
}

impl Surface for SvgSurface {
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
        let svg = render_svg(&self.scene, self.dpi);
        if let Some(path) = &self.target {
            write_atomic(path, svg.as_bytes())?;
            tracing::info!(path = %path.display(), bytes = svg.len(), "svg written");
        } else {
            tracing::info!(bytes = svg.len(), "svg rendered");
        }
        self.rendered = Some(svg);
        Ok(())
    }
}

// Write to a sibling temp file, then rename over the target
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let temp_path = path.with_extension("svg.tmp");
    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(data)?;
        file.flush()?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|_| rename(&temp_path, path)) {
        let _ = remove_file(&temp_path);
        return Err(e.into());
    }
    tracing::debug!("Saved {} bytes to {:?}", data.len(), path);
    Ok(())
}
