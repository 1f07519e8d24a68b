//! Replay toolkit draw lists through an egui painter.

use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Stroke, pos2};
use sofar_ui::{Align, Color, DrawCommand, Point, Rect};

/// Segments used to approximate a full turn of a ring.
const SEGMENTS_PER_TURN: f32 = 96.0;

/// Paint one command.
pub fn paint(painter: &Painter, command: &DrawCommand, font_size: f32) {
    match command {
        DrawCommand::Clear(color) => {
            painter.rect_filled(painter.clip_rect(), CornerRadius::ZERO, color32(*color));
        }
        DrawCommand::FillRect { rect, color } => {
            painter.rect_filled(egui_rect(*rect), CornerRadius::ZERO, color32(*color));
        }
        DrawCommand::FillCircle {
            center,
            radius,
            color,
        } => {
            painter.circle_filled(pos(*center), *radius, color32(*color));
        }
        DrawCommand::FillRingSegment {
            center,
            inner,
            outer,
            start,
            end,
            color,
        } => {
            draw_ring_segment(painter, pos(*center), *inner, *outer, *start, *end, color32(*color));
        }
        DrawCommand::Text {
            bounds,
            halign,
            valign,
            text,
            color,
        } => {
            let anchor = pos2(
                bounds.x as f32 + anchor_offset(*halign, bounds.width),
                bounds.y as f32 + anchor_offset(*valign, bounds.height),
            );
            painter.text(
                anchor,
                Align2([egui_align(*halign), egui_align(*valign)]),
                text,
                FontId::proportional(font_size),
                color32(*color),
            );
        }
    }
}

/// A ring segment is a thick arc along the mid radius.
fn draw_ring_segment(
    painter: &Painter,
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    end: f32,
    color: Color32,
) {
    let radius = (inner + outer) / 2.0;
    let width = (outer - inner).max(0.0);
    let sweep = end - start;
    let segments = ((sweep.abs() / std::f32::consts::TAU) * SEGMENTS_PER_TURN)
        .ceil()
        .max(1.0) as usize;

    let points: Vec<Pos2> = (0..=segments)
        .map(|i| {
            let angle = start + sweep * i as f32 / segments as f32;
            pos2(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            )
        })
        .collect();

    for window in points.windows(2) {
        painter.line_segment([window[0], window[1]], Stroke::new(width, color));
    }
}

fn anchor_offset(align: Align, extent: i32) -> f32 {
    align.factor() as f32 * extent as f32 / 2.0
}

fn egui_align(align: Align) -> egui::Align {
    match align {
        Align::Start => egui::Align::Min,
        Align::Center => egui::Align::Center,
        Align::End => egui::Align::Max,
    }
}

fn color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

fn pos(p: Point) -> Pos2 {
    pos2(p.x as f32, p.y as f32)
}

fn egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        pos2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}
