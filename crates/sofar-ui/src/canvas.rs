//! Recorded draw lists.
//!
//! Widgets never talk to a native painter. They append [`DrawCommand`]s to a
//! [`Canvas`], and the backend's [`Surface`](crate::backend::Surface) replays
//! the list when the window presents a frame. Text is positioned by a
//! bounding rectangle plus alignment, so the engine needs no font metrics;
//! the painter measures glyphs at paint time.

use crate::geometry::{Point, Rect};
use crate::style::Color;
use crate::widget::Align;

/// One primitive drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear(Color),

    /// Fill an axis-aligned rectangle.
    FillRect {
        /// Rectangle to fill.
        rect: Rect,
        /// Fill colour.
        color: Color,
    },

    /// Fill a disc.
    FillCircle {
        /// Disc centre.
        center: Point,
        /// Radius in pixels.
        radius: f32,
        /// Fill colour.
        color: Color,
    },

    /// Fill the part of an annulus between two angles.
    ///
    /// Angles are in radians, measured clockwise from the positive x axis
    /// (y grows downwards). The segment runs from `start` to `end`.
    FillRingSegment {
        /// Ring centre.
        center: Point,
        /// Inner radius in pixels.
        inner: f32,
        /// Outer radius in pixels.
        outer: f32,
        /// Start angle in radians.
        start: f32,
        /// End angle in radians.
        end: f32,
        /// Fill colour.
        color: Color,
    },

    /// Draw a single line of text aligned inside a box.
    Text {
        /// Bounding box the text is aligned in.
        bounds: Rect,
        /// Horizontal alignment inside `bounds`.
        halign: Align,
        /// Vertical alignment inside `bounds`.
        valign: Align,
        /// Text to draw.
        text: String,
        /// Text colour.
        color: Color,
    },
}

/// A draw list for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    commands: Vec<DrawCommand>,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous frame and fill the surface with `color`.
    pub fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    /// Fill a disc.
    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    /// Fill a ring segment between `start` and `end` radians.
    pub fn fill_ring_segment(
        &mut self,
        center: Point,
        inner: f32,
        outer: f32,
        start: f32,
        end: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::FillRingSegment {
            center,
            inner,
            outer,
            start,
            end,
            color,
        });
    }

    /// Draw text aligned inside `bounds`.
    pub fn text(
        &mut self,
        bounds: Rect,
        halign: Align,
        valign: Align,
        text: impl Into<String>,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Text {
            bounds,
            halign,
            valign,
            text: text.into(),
            color,
        });
    }

    /// Recorded commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the text strings drawn this frame.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
