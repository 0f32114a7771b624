//! Drawing surface abstraction and an SVG implementation.

use crate::model::dot::{Dot, Position, Size};
use crate::model::emotion::color_for;
use std::fmt::Write;

/// Stroke settings for connection lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub stroke: &'static str,
    pub width: f64,
}

/// Faint green stroke shared by every connection.
pub const CONNECTION_STYLE: LineStyle = LineStyle {
    stroke: "rgba(34, 197, 94, 0.2)",
    width: 1.0,
};

/// Full-viewport drawing surface redrawn once per frame.
pub trait Canvas {
    /// Resets the surface to transparent at the given size.
    fn clear(&mut self, viewport: Size);
    fn stroke_line(&mut self, from: Position, to: Position, style: &LineStyle);
    /// Draws one dot. Overlay-only canvases ignore dots.
    fn fill_dot(&mut self, _dot: &Dot, _hovered: bool) {}
}

/// Canvas that renders one frame as an SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgCanvas {
    viewport: Option<Size>,
    body: String,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the finished SVG document for the last cleared frame.
    pub fn finish(&self) -> String {
        let viewport = self.viewport.unwrap_or(Size::new(0.0, 0.0));
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="100%" height="100%" fill="black"/>{body}</svg>"#,
            w = fmt_num(viewport.width),
            h = fmt_num(viewport.height),
            body = self.body
        )
    }
}

impl Canvas for SvgCanvas {
    fn clear(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
        self.body.clear();
    }

    fn stroke_line(&mut self, from: Position, to: Position, style: &LineStyle) {
        let _ = write!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            style.stroke,
            fmt_num(style.width)
        );
    }

    fn fill_dot(&mut self, dot: &Dot, hovered: bool) {
        let color = color_for(dot.emotion);
        let opacity = if hovered { 0.9 } else { 0.4 };
        let _ = write!(
            self.body,
            r#"<circle data-footprint-id="{}" cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"><title>{}</title></circle>"#,
            escape_xml(&dot.id),
            fmt_num(dot.position.x),
            fmt_num(dot.position.y),
            fmt_num(dot.size * 0.375),
            color,
            opacity,
            escape_xml(&dot.content)
        );
    }
}

fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
