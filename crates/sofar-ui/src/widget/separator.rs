//! Spacer lines between box children.

use crate::canvas::Canvas;
use crate::geometry::{Point, Rect, Size};
use crate::style::ColorIndex;
use crate::widget::{Orientation, RenderCx, Widget};

/// A thin line of fixed length.
///
/// The separator takes part in layout as a 1×1 box; its line is drawn
/// centred on that box and may extend past it.
#[derive(Debug, Clone, PartialEq)]
pub struct Separator {
    orientation: Orientation,
    length: i32,
}

impl Separator {
    /// Create a separator.
    pub fn new(orientation: Orientation, length: i32) -> Self {
        Self {
            orientation,
            length: length.max(0),
        }
    }

    /// Line direction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Line length in pixels.
    pub fn length(&self) -> i32 {
        self.length
    }

    fn line(&self, rect: Rect) -> Rect {
        let center = rect.center();
        match self.orientation {
            Orientation::Vertical => Rect::from_origin_size(
                Point::new(rect.x, center.y - self.length / 2),
                Size::new(1, self.length),
            ),
            Orientation::Horizontal => Rect::from_origin_size(
                Point::new(center.x - self.length / 2, rect.y),
                Size::new(self.length, 1),
            ),
        }
    }
}

impl Widget for Separator {
    fn kind_name(&self) -> &'static str {
        "separator"
    }

    fn measure(&self) -> Size {
        Size::new(1, 1)
    }

    fn render(&self, rect: Rect, canvas: &mut Canvas, cx: &RenderCx<'_>) {
        if self.length > 0 {
            canvas.fill_rect(self.line(rect), cx.style.color(ColorIndex::Dark3));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_line_is_centred_on_its_box() {
        let sep = Separator::new(Orientation::Vertical, 280);
        let line = sep.line(Rect::from_origin_size(Point::new(100, 200), Size::new(1, 1)));
        assert_eq!(line, Rect::from_origin_size(Point::new(100, 60), Size::new(1, 280)));
    }

    #[test]
    fn negative_length_is_clamped() {
        assert_eq!(Separator::new(Orientation::Horizontal, -5).length(), 0);
    }
}
