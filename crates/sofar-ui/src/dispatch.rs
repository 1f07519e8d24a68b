//! Event routing and the single-focus state machine.
//!
//! ```text
//!              press inside interactive w
//!   Unfocused ───────────────────────────► Focused(w)
//!       ▲                                    │  │
//!       └──────── release (anywhere) ────────┘  │ motion: routed to w only
//!                                               ▼
//!                                          Focused(w)
//! ```
//!
//! While a widget holds focus every pointer event goes straight to it, with
//! no hit-testing against the rest of the tree. Otherwise the event walks the
//! tree top-down: a box offers it to its children in declaration order and
//! stops at the first one that consumes it. Map and expose notifications
//! never enter the tree; they only request a redraw.
//!
//! Focus is held as a [`WidgetId`], so clearing it leaves the widget alone.

use crate::event::Event;
use crate::panel::{Panel, WidgetId};
use crate::param_bridge::ParamIndex;
use crate::widget::{EventCx, Propagation, WidgetKind};

/// Which widget, if any, receives pointer drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// No widget holds focus.
    #[default]
    Unfocused,
    /// The given widget holds focus.
    Focused(WidgetId),
}

impl FocusState {
    /// Focused widget, if any.
    pub fn widget(self) -> Option<WidgetId> {
        match self {
            FocusState::Unfocused => None,
            FocusState::Focused(id) => Some(id),
        }
    }
}

/// A widget value that changed while handling an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange {
    /// Widget whose value moved.
    pub widget: WidgetId,
    /// Parameter bound to it.
    pub port: Option<ParamIndex>,
    /// New value.
    pub value: f32,
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DispatchOutcome {
    /// A widget kept the event.
    pub consumed: bool,
    /// The window must be redrawn.
    pub redraw: bool,
    /// Value change to forward to the host.
    pub change: Option<ValueChange>,
}

/// Routes events through a panel and tracks focus.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    focus: FocusState,
}

impl Dispatcher {
    /// Start unfocused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current focus.
    pub fn focus(&self) -> FocusState {
        self.focus
    }

    /// Drop focus without notifying the widget.
    pub fn clear_focus(&mut self) {
        self.focus = FocusState::Unfocused;
    }

    /// Dispatch one event.
    pub fn dispatch(&mut self, panel: &mut Panel, event: &Event) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        if event.is_repaint() {
            outcome.redraw = true;
            return outcome;
        }

        let propagation = match self.focus {
            FocusState::Focused(id) => self.deliver(panel, id, event, &mut outcome),
            FocusState::Unfocused => self.offer(panel, Panel::ROOT, event, &mut outcome),
        };
        outcome.consumed = propagation == Propagation::Consumed;

        if let (FocusState::Focused(id), Event::Button { pressed: false, .. }) = (self.focus, event)
        {
            tracing::debug!(widget = %id, "focus cleared");
            self.focus = FocusState::Unfocused;
            outcome.redraw = true;
        }

        tracing::trace!(?event, consumed = outcome.consumed, "dispatch");
        outcome
    }

    fn offer(
        &mut self,
        panel: &mut Panel,
        id: WidgetId,
        event: &Event,
        outcome: &mut DispatchOutcome,
    ) -> Propagation {
        if matches!(panel.kind(id), WidgetKind::Box(_)) {
            for child in panel.children(id) {
                if self.offer(panel, child, event, outcome) == Propagation::Consumed {
                    return Propagation::Consumed;
                }
            }
            return Propagation::Continue;
        }
        self.deliver(panel, id, event, outcome)
    }

    fn deliver(
        &mut self,
        panel: &mut Panel,
        id: WidgetId,
        event: &Event,
        outcome: &mut DispatchOutcome,
    ) -> Propagation {
        let rect = panel.rect(id);
        let before = panel.value(id);
        let focused = self.focus == FocusState::Focused(id);
        let mut cx = EventCx::new(focused, self.focus != FocusState::Unfocused);

        let propagation = panel
            .kind_mut(id)
            .as_widget_mut()
            .handle_event(rect, event, &mut cx);

        if cx.grabbed() && self.focus == FocusState::Unfocused {
            tracing::debug!(widget = %id, "focus taken");
            self.focus = FocusState::Focused(id);
        }
        if cx.released() && focused {
            self.focus = FocusState::Unfocused;
        }
        outcome.redraw |= cx.redraw_requested();

        if let Some(value) = panel.value(id).filter(|&after| Some(after) != before) {
            outcome.change = Some(ValueChange {
                widget: id,
                port: panel.port(id),
                value,
            });
        }
        propagation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::panel::{ElementDef, PanelDef};
    use crate::style::Style;

    fn two_dials() -> Panel {
        let mut panel = PanelDef::new(ElementDef::hbox([
            ElementDef::dial(0.0, 1.0, 100.0).port(1),
            ElementDef::dial(0.0, 1.0, 100.0).port(2),
        ]))
        .build()
        .unwrap();
        layout(&mut panel, &Style::default());
        panel
    }

    fn center(panel: &Panel, id: WidgetId) -> (i32, i32) {
        let c = panel.rect(id).center();
        (c.x, c.y)
    }

    #[test]
    fn repaint_requests_redraw_without_dispatch() {
        let mut panel = two_dials();
        let mut d = Dispatcher::new();
        let out = d.dispatch(&mut panel, &Event::Expose);
        assert!(out.redraw && !out.consumed);
        assert_eq!(d.focus(), FocusState::Unfocused);
    }

    #[test]
    fn press_focuses_first_hit_only() {
        let mut panel = two_dials();
        let ids: Vec<_> = panel.children(Panel::ROOT).collect();
        let mut d = Dispatcher::new();
        let (x, y) = center(&panel, ids[1]);
        let out = d.dispatch(&mut panel, &Event::press(x, y));
        assert!(out.consumed);
        assert_eq!(d.focus(), FocusState::Focused(ids[1]));
    }

    #[test]
    fn press_on_nothing_is_not_consumed() {
        let mut panel = two_dials();
        let mut d = Dispatcher::new();
        let out = d.dispatch(&mut panel, &Event::press(1, 1));
        assert!(!out.consumed);
        assert_eq!(d.focus(), FocusState::Unfocused);
    }

    #[test]
    fn motion_goes_only_to_focused_widget() {
        let mut panel = two_dials();
        let ids: Vec<_> = panel.children(Panel::ROOT).collect();
        let mut d = Dispatcher::new();
        let (x, y) = center(&panel, ids[0]);
        d.dispatch(&mut panel, &Event::press(x, y));

        let (bx, by) = center(&panel, ids[1]);
        let out = d.dispatch(
            &mut panel,
            &Event::Motion {
                x: bx,
                y: by,
                xrel: 0,
                yrel: -5,
            },
        );
        assert_eq!(
            out.change,
            Some(ValueChange {
                widget: ids[0],
                port: Some(ParamIndex(1)),
                value: 5.0
            })
        );
        assert_eq!(panel.value(ids[1]), Some(0.0));
    }

    #[test]
    fn release_anywhere_clears_focus() {
        let mut panel = two_dials();
        let ids: Vec<_> = panel.children(Panel::ROOT).collect();
        let mut d = Dispatcher::new();
        let (x, y) = center(&panel, ids[0]);
        d.dispatch(&mut panel, &Event::press(x, y));
        let out = d.dispatch(&mut panel, &Event::release(-50, 9000));
        assert!(out.redraw);
        assert_eq!(out.change, None);
        assert_eq!(d.focus(), FocusState::Unfocused);
    }

    #[test]
    fn unchanged_value_reports_no_change() {
        let mut panel = two_dials();
        let ids: Vec<_> = panel.children(Panel::ROOT).collect();
        let mut d = Dispatcher::new();
        let (x, y) = center(&panel, ids[0]);
        d.dispatch(&mut panel, &Event::press(x, y));
        // Dragging down at the range start stays clamped at 0.
        let out = d.dispatch(
            &mut panel,
            &Event::Motion {
                x,
                y,
                xrel: 0,
                yrel: 3,
            },
        );
        assert!(out.consumed);
        assert_eq!(out.change, None);
    }
}
