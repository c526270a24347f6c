//! Standalone SVG export.
//!
//! The document embeds the camera transform as an outer group so the
//! exported coordinates use the same world/camera math as the live
//! canvas. Erase strokes have no retroactive "destination-out" in SVG,
//! so the object sequence is partitioned at every erase: each erase
//! wraps all previously accumulated markup in a mask whose shape is the
//! erase path drawn as a wide black line.

use std::fmt::Write;

use kurbo::Point;
use sketchboard_core::{Board, ObjectGeometry, SceneObject};

use crate::ExportError;

/// Output viewport in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct SvgOptions {
    pub width: f64,
    pub height: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Half-extent of the white coverage rect inside erase masks. Must
/// comfortably contain any drawable world coordinate.
const MASK_EXTENT: f64 = 100_000.0;

/// Render the full board to a standalone SVG document.
pub fn render_svg(board: &Board, options: &SvgOptions) -> Result<String, ExportError> {
    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt(options.width),
        h = fmt(options.height),
    )?;

    let mut defs = String::new();
    let mut body = String::new();

    if let Some(bg) = &board.background {
        let center = bg.center();
        writeln!(
            body,
            r#"<g transform="translate({} {}) rotate({}) scale({}) translate({} {})"><image href="{}" width="{}" height="{}"/></g>"#,
            fmt(center.x),
            fmt(center.y),
            fmt(bg.rotation.to_degrees()),
            fmt(bg.scale),
            fmt(-bg.natural_width / 2.0),
            fmt(-bg.natural_height / 2.0),
            bg.data_url(),
            fmt(bg.natural_width),
            fmt(bg.natural_height),
        )?;
    }

    if let Some(overlay) = &board.overlay {
        let visible: Vec<&str> = overlay.visible_markup().collect();
        if !visible.is_empty() {
            write!(
                body,
                r#"<g transform="translate({} {}) rotate({}) scale({})">"#,
                fmt(overlay.position.x),
                fmt(overlay.position.y),
                fmt(overlay.rotation.to_degrees()),
                fmt(overlay.scale),
            )?;
            match &overlay.view_box {
                Some(vb) => write!(body, r#"<svg viewBox="{}" overflow="visible">"#, escape_xml(vb))?,
                None => body.push_str("<svg overflow=\"visible\">"),
            }
            for markup in visible {
                body.push_str(markup);
            }
            body.push_str("</svg></g>\n");
        }
    }

    // Object compositing with erase masks.
    let mut accumulated = String::new();
    let mut mask_count = 0usize;
    for object in &board.objects {
        if let SceneObject::Erase(erase) = object {
            if erase.points.is_empty() {
                continue;
            }
            mask_count += 1;
            let id = format!("erase{mask_count}");
            write!(
                defs,
                r#"<mask id="{id}"><rect x="{x}" y="{x}" width="{s}" height="{s}" fill="white"/>"#,
                x = fmt(-MASK_EXTENT),
                s = fmt(MASK_EXTENT * 2.0),
            )?;
            write!(
                defs,
                r#"<path d="{}" fill="none" stroke="black" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                polyline_path(&erase.points),
                fmt(erase.width),
            )?;
            defs.push_str("</mask>\n");
            accumulated = format!("<g mask=\"url(#{id})\">{accumulated}</g>\n");
        } else {
            render_object(&mut accumulated, object)?;
        }
    }
    body.push_str(&accumulated);

    if !defs.is_empty() {
        writeln!(out, "<defs>\n{defs}</defs>")?;
    }
    writeln!(
        out,
        r#"<g transform="translate({} {}) scale({})">"#,
        fmt(board.camera.offset.x),
        fmt(board.camera.offset.y),
        fmt(board.camera.zoom),
    )?;
    out.push_str(&body);
    out.push_str("</g>\n</svg>\n");
    log::debug!(
        "exported {} objects, {} erase masks, {} bytes",
        board.objects.len(),
        mask_count,
        out.len()
    );
    Ok(out)
}

fn render_object(out: &mut String, object: &SceneObject) -> Result<(), ExportError> {
    match object {
        SceneObject::Stroke(s) => {
            if s.points.is_empty() {
                return Ok(());
            }
            writeln!(
                out,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                polyline_path(&s.points),
                s.color.to_css(),
                fmt(s.width),
            )?;
        }
        SceneObject::Erase(_) => {} // handled by the caller
        SceneObject::Line(l) => {
            writeln!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                fmt(l.start.x),
                fmt(l.start.y),
                fmt(l.end.x),
                fmt(l.end.y),
                l.color.to_css(),
                fmt(l.width),
            )?;
        }
        SceneObject::Arrow(a) => {
            let mut d = format!(
                "M{} {} L{} {}",
                fmt(a.start.x),
                fmt(a.start.y),
                fmt(a.end.x),
                fmt(a.end.y)
            );
            if let Some([w1, w2]) = a.head_wings() {
                let tip = a.end;
                write!(
                    d,
                    " M{} {} L{} {} M{} {} L{} {}",
                    fmt(w1.x),
                    fmt(w1.y),
                    fmt(tip.x),
                    fmt(tip.y),
                    fmt(w2.x),
                    fmt(w2.y),
                    fmt(tip.x),
                    fmt(tip.y)
                )?;
            }
            writeln!(
                out,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                d,
                a.color.to_css(),
                fmt(a.width),
            )?;
        }
        SceneObject::Rectangle(r) => {
            let b = r.box_rect();
            let c = b.center();
            writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}" transform="rotate({} {} {})"/>"#,
                fmt(b.x0),
                fmt(b.y0),
                fmt(b.width()),
                fmt(b.height()),
                r.color.to_css(),
                fmt(r.width),
                fmt(r.rotation.to_degrees()),
                fmt(c.x),
                fmt(c.y),
            )?;
        }
        SceneObject::Ellipse(e) => {
            let c = e.center();
            let (rx, ry) = e.radii();
            writeln!(
                out,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="none" stroke="{}" stroke-width="{}" transform="rotate({} {} {})"/>"#,
                fmt(c.x),
                fmt(c.y),
                fmt(rx),
                fmt(ry),
                e.color.to_css(),
                fmt(e.width),
                fmt(e.rotation.to_degrees()),
                fmt(c.x),
                fmt(c.y),
            )?;
        }
        SceneObject::Text(t) => {
            let c = t.bounds().center();
            let line_height = t.font_size * 1.25;
            write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" fill="{}" transform="rotate({} {} {})">"#,
                fmt(t.position.x),
                fmt(t.position.y + t.font_size),
                fmt(t.font_size),
                t.color.to_css(),
                fmt(t.rotation.to_degrees()),
                fmt(c.x),
                fmt(c.y),
            )?;
            for (i, line) in t.content.lines().enumerate() {
                write!(
                    out,
                    r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                    fmt(t.position.x),
                    fmt(if i == 0 { 0.0 } else { line_height }),
                    escape_xml(line),
                )?;
            }
            out.push_str("</text>\n");
        }
    }
    Ok(())
}

fn polyline_path(points: &[Point]) -> String {
    let mut d = String::with_capacity(points.len() * 12);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{} {} ", cmd, fmt(p.x), fmt(p.y));
    }
    d.trim_end().to_string()
}

/// Compact numeric formatting: drop a trailing `.00`.
fn fmt(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.2}")
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchboard_core::{Erase, Rgba, Stroke};

    fn stroke(x: f64) -> SceneObject {
        let mut s = Stroke::new(Point::new(x, 0.0), 3.0, Rgba::black());
        s.add_point(Point::new(x + 50.0, 50.0));
        SceneObject::Stroke(s)
    }

    fn erase_at(x: f64) -> SceneObject {
        let mut e = Erase::new(Point::new(x, 0.0), 20.0);
        e.add_point(Point::new(x + 10.0, 10.0));
        SceneObject::Erase(e)
    }

    #[test]
    fn test_camera_as_outer_group() {
        let mut board = Board::new();
        board.camera.zoom = 2.0;
        board.camera.offset = kurbo::Vec2::new(10.0, 20.0);
        let svg = render_svg(&board, &SvgOptions::default()).unwrap();
        assert!(svg.contains(r#"<g transform="translate(10 20) scale(2)">"#));
    }

    #[test]
    fn test_erase_masks_only_prior_ink() {
        let mut board = Board::new();
        board.objects.push(stroke(0.0));
        board.objects.push(erase_at(10.0));
        board.objects.push(stroke(200.0));

        let svg = render_svg(&board, &SvgOptions::default()).unwrap();

        // One mask; the first stroke is wrapped, the second is not.
        assert_eq!(svg.matches("<mask id=\"erase1\">").count(), 1);
        let masked_group = svg.find("<g mask=\"url(#erase1)\">").unwrap();
        let first_stroke = svg.find("M0 0 L50 50").unwrap();
        let second_stroke = svg.find("M200 0 L250 50").unwrap();
        let group_end = svg[masked_group..].find("</g>").unwrap() + masked_group;
        assert!(first_stroke > masked_group && first_stroke < group_end);
        assert!(second_stroke > group_end);
    }

    #[test]
    fn test_stacked_erases_nest() {
        let mut board = Board::new();
        board.objects.push(stroke(0.0));
        board.objects.push(erase_at(10.0));
        board.objects.push(stroke(100.0));
        board.objects.push(erase_at(110.0));

        let svg = render_svg(&board, &SvgOptions::default()).unwrap();
        // The second mask wraps everything before it, including the
        // first masked group.
        let outer = svg.find("<g mask=\"url(#erase2)\">").unwrap();
        let inner = svg.find("<g mask=\"url(#erase1)\">").unwrap();
        assert!(outer < inner);
    }

    #[test]
    fn test_text_is_escaped() {
        let mut board = Board::new();
        board.objects.push(SceneObject::Text(sketchboard_core::Text::new(
            Point::new(5.0, 5.0),
            "a<b & \"c\"",
            20.0,
            Rgba::black(),
        )));
        let svg = render_svg(&board, &SvgOptions::default()).unwrap();
        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(!svg.contains("a<b"));
    }

    #[test]
    fn test_overlay_respects_reveal_state() {
        let mut board = Board::new();
        let src = r#"<svg viewBox="0 0 10 10"><rect id="n1" width="1" height="1"/><rect id="n2" width="1" height="1"/></svg>"#;
        let mut overlay = sketchboard_core::Overlay::from_source(src.to_string()).unwrap();
        overlay.step_cursor(1);
        board.overlay = Some(overlay);

        let svg = render_svg(&board, &SvgOptions::default()).unwrap();
        assert!(svg.contains(r#"id="n1""#));
        assert!(!svg.contains(r#"id="n2""#));
        assert!(svg.contains(r#"viewBox="0 0 10 10""#));
    }

    #[test]
    fn test_arrow_head_segments_present() {
        let mut board = Board::new();
        board.objects.push(SceneObject::Arrow(sketchboard_core::Arrow::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            2.0,
            Rgba::black(),
        )));
        let svg = render_svg(&board, &SvgOptions::default()).unwrap();
        // Shaft plus two wing segments: three M commands in the path.
        let path_start = svg.find("<path d=\"M0 0 L100 0").unwrap();
        let path = &svg[path_start..svg[path_start..].find("/>").unwrap() + path_start];
        assert_eq!(path.matches("M").count(), 3);
    }
}
