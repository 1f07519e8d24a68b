//! Rotary dial driven by vertical drag.
//!
//! Pressing a dial only focuses it. While focused, every pixel of upward
//! pointer motion adds one step and every pixel downwards removes one. There
//! is no absolute mapping from pointer to value.
//!
//! The indicator sweeps 240° clockwise, starting at 150° (lower left) for the
//! range start and ending at 30° (lower right) for the range end.

use std::f32::consts::TAU;

use crate::canvas::Canvas;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::style::ColorIndex;
use crate::widget::{
    Align, DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_WIDTH, EventCx, Propagation, RenderCx, Unit,
    ValueRange, Widget, format_value,
};

/// Thickness of the outer ring.
pub const DIAL_END_WIDTH: i32 = 6;
/// Indicator angle at the range start, in turns.
pub const DIAL_MIN_ANGLE: f32 = 0.416_666;
/// Indicator sweep across the whole range, in turns.
pub const DIAL_RANGE: f32 = 0.666_666;
/// Half the angular width of the indicator notch, in radians.
pub const DIAL_INDICATOR_HALF_WIDTH: f32 = 0.20;

/// Dial size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialRadius {
    /// 12 px.
    Small,
    /// 16 px.
    #[default]
    Normal,
    /// 20 px.
    Large,
}

impl DialRadius {
    /// Radius in pixels.
    pub const fn pixels(self) -> i32 {
        match self {
            DialRadius::Small => 12,
            DialRadius::Normal => 16,
            DialRadius::Large => 20,
        }
    }
}

/// A dial over a stepped range.
#[derive(Debug, Clone, PartialEq)]
pub struct Dial {
    range: ValueRange,
    position: f32,
    unit: Unit,
    color: ColorIndex,
    radius: DialRadius,
}

impl Dial {
    /// Create a normal-size dial resting at the range start.
    pub fn new(range: ValueRange) -> Self {
        Self {
            range,
            position: range.start(),
            unit: Unit::Plain,
            color: ColorIndex::Light2,
            radius: DialRadius::Normal,
        }
    }

    /// Set the display unit.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the accent colour.
    pub fn with_color(mut self, color: ColorIndex) -> Self {
        self.color = color;
        self
    }

    /// Set the size preset.
    pub fn with_radius(mut self, radius: DialRadius) -> Self {
        self.radius = radius;
        self
    }

    /// Value range.
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Current position.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Apply a vertical drag of `yrel` pixels (positive is downwards).
    pub fn drag(&mut self, yrel: i32) {
        let delta = -(yrel as f32) * self.range.step();
        self.position = self.range.quantize(self.position + delta);
    }

    /// Indicator angle in radians for the current position.
    pub fn indicator_angle(&self) -> f32 {
        (self.range.normalized(self.position) * DIAL_RANGE + DIAL_MIN_ANGLE) * TAU
    }
}

impl Widget for Dial {
    fn kind_name(&self) -> &'static str {
        "dial"
    }

    fn measure(&self) -> Size {
        let diameter = self.radius.pixels() * 2;
        Size::new(
            diameter.max(DEFAULT_TEXT_WIDTH),
            diameter + DEFAULT_TEXT_HEIGHT,
        )
    }

    fn handle_event(&mut self, rect: Rect, event: &Event, cx: &mut EventCx) -> Propagation {
        match *event {
            Event::Button {
                pressed: true,
                x,
                y,
                ..
            } if !cx.focus_held() && rect.contains(Point::new(x, y)) => {
                cx.grab_focus();
                cx.request_redraw();
                Propagation::Consumed
            }
            Event::Button { pressed: false, .. } if cx.is_focused() => {
                cx.release_focus();
                cx.request_redraw();
                Propagation::Consumed
            }
            Event::Motion { yrel, .. } if cx.is_focused() => {
                self.drag(yrel);
                cx.request_redraw();
                Propagation::Consumed
            }
            _ => Propagation::Continue,
        }
    }

    fn render(&self, rect: Rect, canvas: &mut Canvas, cx: &RenderCx<'_>) {
        let radius = self.radius.pixels();
        let center = Point::new(rect.x + rect.width / 2, rect.y + radius);
        let (base, inner) = if cx.focused {
            (self.color.lighter(), self.color)
        } else {
            (self.color, self.color.lighter())
        };
        let outer = radius as f32;
        let inner_radius = (radius - DIAL_END_WIDTH) as f32;

        canvas.fill_circle(center, outer, cx.style.color(base));
        canvas.fill_circle(center, inner_radius, cx.style.color(inner));

        let angle = self.indicator_angle();
        canvas.fill_ring_segment(
            center,
            inner_radius,
            outer,
            angle - DIAL_INDICATOR_HALF_WIDTH,
            angle + DIAL_INDICATOR_HALF_WIDTH,
            cx.style.color(inner),
        );

        canvas.text(
            Rect::from_origin_size(
                Point::new(rect.x, rect.y + radius * 2),
                Size::new(rect.width, DEFAULT_TEXT_HEIGHT),
            ),
            Align::Center,
            Align::Center,
            format_value(self.position, self.range.step(), self.unit),
            cx.style.color(ColorIndex::Light3),
        );
    }

    fn value(&self) -> Option<f32> {
        Some(self.position)
    }

    fn set_value(&mut self, value: f32) {
        self.position = self.range.quantize(value);
    }
}
