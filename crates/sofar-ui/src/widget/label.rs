//! Static text.

use crate::canvas::Canvas;
use crate::geometry::{Rect, Size};
use crate::style::ColorIndex;
use crate::widget::{Align, DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_WIDTH, RenderCx, Widget};

/// A line of text inside the default text box.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    halign: Align,
    valign: Align,
}

impl Label {
    /// Create a centred label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            halign: Align::Center,
            valign: Align::Center,
        }
    }

    /// Align the text inside the label's box.
    pub fn with_align(mut self, halign: Align, valign: Align) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }

    /// Displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn kind_name(&self) -> &'static str {
        "label"
    }

    fn measure(&self) -> Size {
        Size::new(DEFAULT_TEXT_WIDTH, DEFAULT_TEXT_HEIGHT)
    }

    fn render(&self, rect: Rect, canvas: &mut Canvas, cx: &RenderCx<'_>) {
        canvas.text(
            rect,
            self.halign,
            self.valign,
            self.text.as_str(),
            cx.style.color(ColorIndex::Light3),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawCommand;
    use crate::geometry::Point;
    use crate::style::Style;

    #[test]
    fn renders_aligned_text() {
        let style = Style::default();
        let label = Label::new("Repeat Count").with_align(Align::Start, Align::Center);
        let rect = Rect::from_origin_size(Point::new(8, 8), label.measure());
        let mut canvas = Canvas::new();
        label.render(
            rect,
            &mut canvas,
            &RenderCx {
                style: &style,
                focused: false,
            },
        );
        assert!(matches!(
            &canvas.commands()[0],
            DrawCommand::Text { halign: Align::Start, text, .. } if text == "Repeat Count"
        ));
    }
}
