//! Horizontal slider with a value readout.
//!
//! ```text
//!  ├──────────── 200 slot ────────────┤├ 8 ┤├── value ──┤
//!  █                                        -3.2 dB
//!  ├────────── 194 travel ──────────┤
//! ```
//!
//! The handle's left edge maps linearly onto the range over the travel width.
//! Pointer positions past the travel clamp to the range end.

use crate::canvas::Canvas;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::style::ColorIndex;
use crate::widget::{
    Align, EventCx, Propagation, RenderCx, Unit, ValueRange, Widget, format_value,
};

/// Overall slider width.
pub const SLIDER_WIDTH: i32 = 256;
/// Overall slider height.
pub const SLIDER_HEIGHT: i32 = 32;
/// Handle width.
pub const SLIDER_CONTROL_WIDTH: i32 = 6;
/// Slot thickness.
pub const SLIDER_SLOT_WIDTH: i32 = 6;
/// Space reserved under the slot.
pub const SLIDER_LABEL_AREA: i32 = 12;
/// Width reserved for the value readout.
pub const SLIDER_VALUE_AREA: i32 = 56;
/// Gap between the slot and the readout.
pub const SLIDER_VALUE_SPACING: i32 = 8;
/// Distance the handle travels from range start to range end.
pub const SLIDER_TRAVEL: i32 = SLIDER_WIDTH - SLIDER_VALUE_AREA - SLIDER_CONTROL_WIDTH;

/// A slider over a stepped range.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    range: ValueRange,
    position: f32,
    unit: Unit,
    color: ColorIndex,
}

impl Slider {
    /// Create a slider resting at the range start.
    pub fn new(range: ValueRange) -> Self {
        Self {
            range,
            position: range.start(),
            unit: Unit::Plain,
            color: ColorIndex::Light2,
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

    /// Value range.
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Current position.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Move the handle under pointer `x`; ignored outside the horizontal extent.
    pub fn set_from_pointer(&mut self, rect: Rect, x: i32) {
        if !rect.contains_x(x) {
            return;
        }
        let t = (x - rect.x) as f32 / SLIDER_TRAVEL as f32;
        self.position = self.range.from_normalized(t);
    }
}

impl Widget for Slider {
    fn kind_name(&self) -> &'static str {
        "slider"
    }

    fn measure(&self) -> Size {
        Size::new(SLIDER_WIDTH, SLIDER_HEIGHT)
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
                self.set_from_pointer(rect, x);
                Propagation::Consumed
            }
            Event::Button { pressed: false, .. } if cx.is_focused() => {
                cx.release_focus();
                cx.request_redraw();
                Propagation::Consumed
            }
            Event::Motion { x, .. } if cx.is_focused() => {
                self.set_from_pointer(rect, x);
                cx.request_redraw();
                Propagation::Consumed
            }
            _ => Propagation::Continue,
        }
    }

    fn render(&self, rect: Rect, canvas: &mut Canvas, cx: &RenderCx<'_>) {
        let (slot, handle) = if cx.focused {
            (self.color.lighter(), self.color)
        } else {
            (self.color, self.color.lighter())
        };

        canvas.fill_rect(
            Rect::from_origin_size(
                Point::new(
                    rect.x,
                    rect.y + (SLIDER_HEIGHT - SLIDER_LABEL_AREA - SLIDER_SLOT_WIDTH) / 2,
                ),
                Size::new(SLIDER_WIDTH - SLIDER_VALUE_AREA, SLIDER_SLOT_WIDTH),
            ),
            cx.style.color(slot),
        );

        let offset = (self.range.normalized(self.position) * SLIDER_TRAVEL as f32).floor() as i32;
        canvas.fill_rect(
            Rect::from_origin_size(
                Point::new(rect.x + offset, rect.y),
                Size::new(SLIDER_CONTROL_WIDTH, SLIDER_HEIGHT - SLIDER_LABEL_AREA),
            ),
            cx.style.color(handle),
        );

        canvas.text(
            Rect::from_origin_size(
                Point::new(
                    rect.x + SLIDER_WIDTH - SLIDER_VALUE_AREA + SLIDER_VALUE_SPACING,
                    rect.y,
                ),
                Size::new(
                    SLIDER_VALUE_AREA - SLIDER_VALUE_SPACING,
                    SLIDER_HEIGHT - SLIDER_LABEL_AREA,
                ),
            ),
            Align::Start,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::style::Style;

    fn slider() -> Slider {
        Slider::new(ValueRange::new(1.0, 1.0, 5.0).unwrap()).with_color(ColorIndex::AccentRed)
    }

    fn rect() -> Rect {
        Rect::from_origin_size(Point::new(8, 40), Size::new(SLIDER_WIDTH, SLIDER_HEIGHT))
    }

    #[test]
    fn travel_matches_geometry() {
        assert_eq!(SLIDER_TRAVEL, 194);
    }

    #[test]
    fn press_maps_pointer_onto_range() {
        let mut s = slider();
        let mut cx = EventCx::new(false, false);
        s.handle_event(rect(), &Event::press(8 + 97, 50), &mut cx);
        assert!(cx.grabbed());
        assert_eq!(s.position(), 3.0);
    }

    #[test]
    fn pointer_past_travel_clamps_to_end() {
        let mut s = slider();
        s.set_from_pointer(rect(), 8 + 250);
        assert_eq!(s.position(), 5.0);
    }

    #[test]
    fn pointer_outside_extent_is_ignored() {
        let mut s = slider();
        s.set_value(4.0);
        s.set_from_pointer(rect(), 8);
        assert_eq!(s.position(), 4.0);
        s.set_from_pointer(rect(), 8 + SLIDER_WIDTH + 10);
        assert_eq!(s.position(), 4.0);
    }

    #[test]
    fn motion_without_focus_passes_through() {
        let mut s = slider();
        let mut cx = EventCx::new(false, false);
        assert_eq!(
            s.handle_event(rect(), &Event::motion(100, 50), &mut cx),
            Propagation::Continue
        );
    }

    #[test]
    fn focus_swaps_slot_and_handle_colours() {
        let style = Style::default();
        let s = slider();
        let mut canvas = Canvas::new();
        s.render(rect(), &mut canvas, &RenderCx { style: &style, focused: true });
        let DrawCommand::FillRect { color, .. } = canvas.commands()[0] else {
            panic!("expected slot rect");
        };
        assert_eq!(color, style.color(ColorIndex::AccentLightRed));
        assert_eq!(canvas.texts().next(), Some("1"));
    }
}
