//! Two-pass layout.
//!
//! 1. **Size pass**, bottom-up. Leaves report their intrinsic size. A box sums
//!    its children along its axis, adding `spacing` between consecutive
//!    children, and takes the largest child on the cross axis. Once its own
//!    size is known the box assigns each child a relative offset: running
//!    along the axis, aligned across it by `factor * leftover / 2`.
//! 2. **Position pass**, top-down. Each child's absolute origin is its
//!    parent's absolute origin plus its relative offset.
//!
//! The root sits at `(spacing, spacing)` and the window is the root plus that
//! margin on every side. Layout runs once per panel; running it again on the
//! same tree reproduces the same geometry.

use crate::geometry::{Point, Size};
use crate::panel::{Panel, WidgetId};
use crate::style::Style;
use crate::widget::{Orientation, WidgetKind};

/// Fold child sizes into a box size.
pub fn fold_sizes(
    orientation: Orientation,
    sizes: impl IntoIterator<Item = Size>,
    spacing: i32,
) -> Size {
    let mut total = Size::ZERO;
    for (i, size) in sizes.into_iter().enumerate() {
        let gap = if i == 0 { 0 } else { spacing };
        match orientation {
            Orientation::Vertical => {
                total.width = total.width.max(size.width);
                total.height += gap + size.height;
            }
            Orientation::Horizontal => {
                total.height = total.height.max(size.height);
                total.width += gap + size.width;
            }
        }
    }
    total
}

/// Lay out the whole panel and return the window size.
pub fn layout(panel: &mut Panel, style: &Style) -> Size {
    let spacing = style.spacing;
    let root = measure(panel, Panel::ROOT, spacing);
    place(panel, Panel::ROOT, Point::new(spacing, spacing));
    let window = root.with_margin(spacing);
    tracing::debug!(width = window.width, height = window.height, "layout");
    window
}

fn measure(panel: &mut Panel, id: WidgetId, spacing: i32) -> Size {
    let orientation = match panel.kind(id) {
        WidgetKind::Box(container) => container.orientation(),
        leaf => {
            let size = leaf.as_widget().measure();
            panel.layout_mut(id).size = size;
            return size;
        }
    };

    for child in panel.children(id) {
        measure(panel, child, spacing);
    }
    let size = fold_sizes(
        orientation,
        panel.children(id).map(|child| panel.layout(child).size),
        spacing,
    );

    let mut running = 0;
    for child in panel.children(id) {
        let layout = panel.layout_mut(child);
        match orientation {
            Orientation::Vertical => {
                layout.relative = Point::new(
                    layout.halign.offset(size.width, layout.size.width),
                    running,
                );
                running += layout.size.height;
            }
            Orientation::Horizontal => {
                layout.relative = Point::new(
                    running,
                    layout.valign.offset(size.height, layout.size.height),
                );
                running += layout.size.width;
            }
        }
        running += spacing;
    }

    panel.layout_mut(id).size = size;
    size
}

fn place(panel: &mut Panel, id: WidgetId, origin: Point) {
    panel.layout_mut(id).absolute = origin;
    for child in panel.children(id) {
        let child_origin = origin.offset(panel.layout(child).relative);
        place(panel, child, child_origin);
    }
}
