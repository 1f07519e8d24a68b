//! Normalized input events.
//!
//! Backends translate their native events into [`Event`] values. Only the
//! four kinds the toolkit reacts to exist; everything else a windowing system
//! produces is dropped at translation time.

use crate::geometry::Point;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonCode {
    /// Primary button.
    #[default]
    Left,
    /// Middle button or wheel click.
    Middle,
    /// Secondary button.
    Right,
}

/// An input event addressed to one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The window became visible.
    Map,

    /// Part of the window needs repainting.
    Expose,

    /// A mouse button was pressed or released.
    Button {
        /// True on press, false on release.
        pressed: bool,
        /// Which button changed.
        code: ButtonCode,
        /// Pointer x in window pixels.
        x: i32,
        /// Pointer y in window pixels.
        y: i32,
    },

    /// The pointer moved.
    ///
    /// Backends report `xrel`/`yrel` as zero; the window fills them in from
    /// the last known pointer position before dispatch.
    Motion {
        /// Pointer x in window pixels.
        x: i32,
        /// Pointer y in window pixels.
        y: i32,
        /// Horizontal distance since the previous motion event.
        xrel: i32,
        /// Vertical distance since the previous motion event.
        yrel: i32,
    },
}

impl Event {
    /// Left-button press at `(x, y)`.
    pub const fn press(x: i32, y: i32) -> Self {
        Event::Button {
            pressed: true,
            code: ButtonCode::Left,
            x,
            y,
        }
    }

    /// Left-button release at `(x, y)`.
    pub const fn release(x: i32, y: i32) -> Self {
        Event::Button {
            pressed: false,
            code: ButtonCode::Left,
            x,
            y,
        }
    }

    /// Pointer motion to `(x, y)` with no relative delta.
    pub const fn motion(x: i32, y: i32) -> Self {
        Event::Motion {
            x,
            y,
            xrel: 0,
            yrel: 0,
        }
    }

    /// Pointer position carried by button and motion events.
    pub const fn pointer(&self) -> Option<Point> {
        match *self {
            Event::Button { x, y, .. } | Event::Motion { x, y, .. } => Some(Point::new(x, y)),
            Event::Map | Event::Expose => None,
        }
    }

    /// True for map and expose notifications.
    pub const fn is_repaint(&self) -> bool {
        matches!(self, Event::Map | Event::Expose)
    }
}
