//! Translate baseview input into toolkit [`Event`]s.
//!
//! Only pointer input reaches the toolkit. Motion carries absolute
//! coordinates; the window derives relative deltas itself. Button events
//! carry the last known pointer position, since baseview reports buttons
//! without one. Keyboard input is not used by any panel and is dropped.

use baseview::{MouseButton, MouseEvent, WindowEvent};
use sofar_ui::{ButtonCode, Event, Point};

/// Translate a baseview mouse event.
///
/// Updates `pointer` on motion. Coordinates are divided by `scale` so the
/// toolkit always works in logical pixels.
pub fn translate_mouse(event: &MouseEvent, scale: f64, pointer: &mut Point) -> Option<Event> {
    match event {
        MouseEvent::CursorMoved { position, .. } => {
            *pointer = Point::new(
                (position.x / scale).round() as i32,
                (position.y / scale).round() as i32,
            );
            Some(Event::motion(pointer.x, pointer.y))
        }
        MouseEvent::ButtonPressed { button, .. } => map_button(*button).map(|code| Event::Button {
            pressed: true,
            code,
            x: pointer.x,
            y: pointer.y,
        }),
        MouseEvent::ButtonReleased { button, .. } => {
            map_button(*button).map(|code| Event::Button {
                pressed: false,
                code,
                x: pointer.x,
                y: pointer.y,
            })
        }
        _ => None,
    }
}

/// Translate a baseview window event. Resizes and focus changes repaint.
pub fn translate_window(event: &WindowEvent) -> Option<Event> {
    match event {
        WindowEvent::Resized(_) | WindowEvent::Focused => Some(Event::Expose),
        _ => None,
    }
}

fn map_button(button: MouseButton) -> Option<ButtonCode> {
    match button {
        MouseButton::Left => Some(ButtonCode::Left),
        MouseButton::Middle => Some(ButtonCode::Middle),
        MouseButton::Right => Some(ButtonCode::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baseview::Point as BvPoint;
    use keyboard_types::Modifiers;

    #[test]
    fn motion_updates_pointer_in_logical_pixels() {
        let mut pointer = Point::ZERO;
        let event = MouseEvent::CursorMoved {
            position: BvPoint::new(200.0, 100.0),
            modifiers: Modifiers::empty(),
        };
        assert_eq!(
            translate_mouse(&event, 2.0, &mut pointer),
            Some(Event::motion(100, 50))
        );
        assert_eq!(pointer, Point::new(100, 50));
    }

    #[test]
    fn buttons_use_last_pointer_position() {
        let mut pointer = Point::new(12, 34);
        let event = MouseEvent::ButtonReleased {
            button: MouseButton::Right,
            modifiers: Modifiers::empty(),
        };
        assert_eq!(
            translate_mouse(&event, 1.0, &mut pointer),
            Some(Event::Button {
                pressed: false,
                code: ButtonCode::Right,
                x: 12,
                y: 34
            })
        );
    }

    #[test]
    fn extra_buttons_are_dropped() {
        let mut pointer = Point::ZERO;
        let event = MouseEvent::ButtonPressed {
            button: MouseButton::Back,
            modifiers: Modifiers::empty(),
        };
        assert_eq!(translate_mouse(&event, 1.0, &mut pointer), None);
    }
}
