//! Widget kinds and the capability set they share.
//!
//! Every node in a [`Panel`](crate::Panel) holds one [`WidgetKind`]. Each
//! variant wraps a concrete widget struct implementing [`Widget`], so the tree
//! walkers in [`layout`](crate::layout) and [`dispatch`](crate::dispatch) can
//! treat nodes uniformly through [`WidgetKind::as_widget`]. The variant is
//! chosen when the panel is built and never changes.
//!
//! | Kind | Size | Interactive | Holds a value |
//! |------|------|-------------|---------------|
//! | [`Label`] | 96×24 | no | no |
//! | [`Container`] | folded from children | delegates | no |
//! | [`Separator`] | 1×1 | no | no |
//! | [`Button`] | 96×24 | yes | pressed state |
//! | [`Slider`] | 256×32 | yes | stepped position |
//! | [`Dial`] | 2r wide (min 96) × 2r+24 | yes | stepped position |
//!
//! Teardown is ordinary `Drop`: a widget owns only its own strings and plain
//! numbers, so there is nothing to release explicitly.

mod button;
mod container;
mod dial;
mod label;
mod separator;
mod slider;
mod value;

pub use button::Button;
pub use container::Container;
pub use dial::{Dial, DialRadius};
pub use label::Label;
pub use separator::Separator;
pub use slider::Slider;
pub use value::{ValueRange, format_value};

use crate::canvas::Canvas;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::style::Style;

/// Width of the default text box used by labels, buttons and dial captions.
pub const DEFAULT_TEXT_WIDTH: i32 = 96;

/// Height of the default text box.
pub const DEFAULT_TEXT_HEIGHT: i32 = 24;

/// Alignment of a child along one axis of its parent box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Flush with the start (left or top).
    Start,
    /// Centred in the leftover space.
    #[default]
    Center,
    /// Flush with the end (right or bottom).
    End,
}

impl Align {
    /// Multiple of half the leftover space this alignment shifts by.
    pub const fn factor(self) -> i32 {
        match self {
            Align::Start => 0,
            Align::Center => 1,
            Align::End => 2,
        }
    }

    /// Offset of an item of extent `inner` aligned inside `outer`.
    pub const fn offset(self, outer: i32, inner: i32) -> i32 {
        self.factor() * (outer - inner) / 2
    }
}

/// Box and separator direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Children run left to right.
    Horizontal,
    /// Children run top to bottom.
    Vertical,
}

/// Display unit for slider and dial values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// No unit.
    #[default]
    Plain,
    /// Decibels.
    Decibel,
    /// Hertz, switching to kilohertz from 1000 up.
    Frequency,
}

/// Whether an event handler kept an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Offer the event to the next candidate.
    Continue,
    /// Stop dispatch here.
    Consumed,
}

/// Per-node layout state.
///
/// `size` and `relative` are written by the size pass, `absolute` by the
/// position pass. Alignments come from the panel definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    /// Horizontal alignment inside the parent box.
    pub halign: Align,
    /// Vertical alignment inside the parent box.
    pub valign: Align,
    /// Offset from the parent's origin.
    pub relative: Point,
    /// Window-space origin.
    pub absolute: Point,
    /// Final extent.
    pub size: Size,
}

impl Layout {
    /// Window-space bounding rectangle.
    pub const fn rect(&self) -> Rect {
        Rect::from_origin_size(self.absolute, self.size)
    }
}

/// Handle handed to a widget while it processes one event.
///
/// The widget reports focus and redraw requests through it; the dispatcher
/// applies them after the handler returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventCx {
    focused: bool,
    focus_held: bool,
    grab: bool,
    release: bool,
    redraw: bool,
}

impl EventCx {
    pub(crate) fn new(focused: bool, focus_held: bool) -> Self {
        Self {
            focused,
            focus_held,
            ..Self::default()
        }
    }

    /// True if this widget holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// True if any widget in the window holds focus.
    pub fn focus_held(&self) -> bool {
        self.focus_held
    }

    /// Take focus for this widget.
    pub fn grab_focus(&mut self) {
        self.grab = true;
    }

    /// Give up focus.
    pub fn release_focus(&mut self) {
        self.release = true;
    }

    /// Mark the window dirty.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub(crate) fn grabbed(&self) -> bool {
        self.grab
    }

    pub(crate) fn released(&self) -> bool {
        self.release
    }

    pub(crate) fn redraw_requested(&self) -> bool {
        self.redraw
    }
}

/// Read-only state handed to a widget while it renders.
#[derive(Debug, Clone, Copy)]
pub struct RenderCx<'a> {
    /// Process-wide style table.
    pub style: &'a Style,
    /// True if the widget being drawn holds focus.
    pub focused: bool,
}

/// Capability set shared by every widget kind.
///
/// Operations a kind does not need keep their no-op default.
pub trait Widget {
    /// Short kind name used in diagnostics.
    fn kind_name(&self) -> &'static str;

    /// Intrinsic size. Boxes report zero; layout folds their children instead.
    fn measure(&self) -> Size;

    /// React to an event. `rect` is the widget's window-space bounds.
    fn handle_event(&mut self, rect: Rect, event: &Event, cx: &mut EventCx) -> Propagation {
        let _ = (rect, event, cx);
        Propagation::Continue
    }

    /// Append draw commands. Must not change any state.
    fn render(&self, rect: Rect, canvas: &mut Canvas, cx: &RenderCx<'_>) {
        let _ = (rect, canvas, cx);
    }

    /// Current value, for widgets that hold one.
    fn value(&self) -> Option<f32> {
        None
    }

    /// Overwrite the value, clamped and quantized as the widget requires.
    fn set_value(&mut self, value: f32) {
        let _ = value;
    }
}

/// Tagged union over the concrete widget kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Static text.
    Label(Label),
    /// Container of child widgets.
    Box(Container),
    /// Spacer line.
    Separator(Separator),
    /// Momentary push button.
    Button(Button),
    /// Horizontal slider.
    Slider(Slider),
    /// Rotary dial.
    Dial(Dial),
}

impl WidgetKind {
    /// Borrow the variant as its capability set.
    pub fn as_widget(&self) -> &dyn Widget {
        match self {
            WidgetKind::Label(w) => w,
            WidgetKind::Box(w) => w,
            WidgetKind::Separator(w) => w,
            WidgetKind::Button(w) => w,
            WidgetKind::Slider(w) => w,
            WidgetKind::Dial(w) => w,
        }
    }

    /// Mutably borrow the variant as its capability set.
    pub fn as_widget_mut(&mut self) -> &mut dyn Widget {
        match self {
            WidgetKind::Label(w) => w,
            WidgetKind::Box(w) => w,
            WidgetKind::Separator(w) => w,
            WidgetKind::Button(w) => w,
            WidgetKind::Slider(w) => w,
            WidgetKind::Dial(w) => w,
        }
    }

    /// True for kinds a parameter can be bound to.
    pub fn is_bindable(&self) -> bool {
        matches!(
            self,
            WidgetKind::Button(_) | WidgetKind::Slider(_) | WidgetKind::Dial(_)
        )
    }

    /// Stepped range of a slider or dial.
    pub fn range(&self) -> Option<ValueRange> {
        match self {
            WidgetKind::Slider(s) => Some(s.range()),
            WidgetKind::Dial(d) => Some(d.range()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_offsets() {
        assert_eq!(Align::Start.offset(100, 40), 0);
        assert_eq!(Align::Center.offset(100, 40), 30);
        assert_eq!(Align::End.offset(100, 40), 60);
        // Integer halving truncates.
        assert_eq!(Align::Center.offset(25, 0), 12);
    }

    #[test]
    fn only_value_kinds_are_bindable() {
        assert!(!WidgetKind::Label(Label::new("x")).is_bindable());
        assert!(!WidgetKind::Separator(Separator::new(Orientation::Vertical, 10)).is_bindable());
        assert!(WidgetKind::Button(Button::new("x")).is_bindable());
    }

    #[test]
    fn event_cx_records_requests() {
        let mut cx = EventCx::new(false, false);
        assert!(!cx.is_focused() && !cx.focus_held());
        cx.grab_focus();
        cx.request_redraw();
        assert!(cx.grabbed() && cx.redraw_requested() && !cx.released());
    }
}
