//! Boxes: containers that stack children along one axis.

use crate::geometry::Size;
use crate::widget::{Orientation, Widget};

/// A box. Children live in the panel arena; the box only records direction.
///
/// Every operation on a box is carried out by the tree walkers, which visit
/// the children in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    orientation: Orientation,
}

impl Container {
    /// Create a box.
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// Stacking direction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl Widget for Container {
    fn kind_name(&self) -> &'static str {
        "box"
    }

    fn measure(&self) -> Size {
        Size::ZERO
    }
}
