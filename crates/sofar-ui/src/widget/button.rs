//! Momentary push button.

use crate::canvas::Canvas;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::style::ColorIndex;
use crate::widget::{
    Align, DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_WIDTH, EventCx, Propagation, RenderCx, Widget,
};

/// A text button that reads 1.0 while held and 0.0 otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    text: String,
    pressed: bool,
}

impl Button {
    /// Create a released button.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pressed: false,
        }
    }

    /// Caption.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True while held down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl Widget for Button {
    fn kind_name(&self) -> &'static str {
        "button"
    }

    fn measure(&self) -> Size {
        Size::new(DEFAULT_TEXT_WIDTH, DEFAULT_TEXT_HEIGHT)
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
                self.pressed = true;
                Propagation::Consumed
            }
            Event::Button { pressed: false, .. } if cx.is_focused() => {
                cx.release_focus();
                cx.request_redraw();
                self.pressed = false;
                Propagation::Consumed
            }
            Event::Motion { .. } if cx.is_focused() => Propagation::Consumed,
            _ => Propagation::Continue,
        }
    }

    fn render(&self, rect: Rect, canvas: &mut Canvas, cx: &RenderCx<'_>) {
        let face = if cx.focused {
            ColorIndex::Dark3
        } else {
            ColorIndex::Dark2
        };
        canvas.fill_rect(rect, cx.style.color(face));
        canvas.text(
            rect,
            Align::Center,
            Align::Center,
            self.text.as_str(),
            cx.style.color(ColorIndex::Light3),
        );
    }

    fn value(&self) -> Option<f32> {
        Some(if self.pressed { 1.0 } else { 0.0 })
    }

    fn set_value(&mut self, value: f32) {
        self.pressed = value >= 0.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::from_origin_size(Point::new(10, 10), Size::new(96, 24))
    }

    #[test]
    fn press_and_release_toggle_value() {
        let mut button = Button::new("Reset");
        let mut cx = EventCx::new(false, false);
        assert_eq!(
            button.handle_event(rect(), &Event::press(50, 20), &mut cx),
            Propagation::Consumed
        );
        assert!(cx.grabbed());
        assert_eq!(button.value(), Some(1.0));

        let mut cx = EventCx::new(true, true);
        button.handle_event(rect(), &Event::release(500, 500), &mut cx);
        assert!(cx.released());
        assert_eq!(button.value(), Some(0.0));
    }

    #[test]
    fn press_on_edge_is_ignored() {
        let mut button = Button::new("Reset");
        let mut cx = EventCx::new(false, false);
        assert_eq!(
            button.handle_event(rect(), &Event::press(10, 20), &mut cx),
            Propagation::Continue
        );
        assert!(!button.is_pressed());
    }
}
