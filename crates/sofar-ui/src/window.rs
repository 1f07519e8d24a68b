//! A panel shown in one native window.
//!
//! [`Window`] ties together everything one panel instance needs: the laid-out
//! widget tree, its focus dispatcher and parameter bridge, the native window
//! and its drawing surface. The host drives it with three calls:
//!
//! - [`Window::update`] from its idle callback: drain pending events, advance
//!   the focus state machine, redraw when dirty.
//! - [`Window::port_event`] / [`Window::push_param`] when a parameter changes.
//! - dropping the window on teardown, which releases the surface, then the
//!   native window, then (for the last window) the backend connection.

use crate::backend::{NativeHandle, Surface, WindowKey};
use crate::context::UiContext;
use crate::dispatch::{Dispatcher, FocusState, ValueChange};
use crate::error::UiError;
use crate::event::Event;
use crate::geometry::{Point, Size};
use crate::layout::layout;
use crate::panel::Panel;
use crate::param_bridge::{HostWrite, ParamBridge, ParamIndex, decode_float_payload};
use crate::style::ColorIndex;

/// One live panel instance.
pub struct Window {
    ctx: UiContext,
    key: WindowKey,
    size: Size,
    surface: Option<Box<dyn Surface>>,
    panel: Panel,
    dispatcher: Dispatcher,
    bridge: ParamBridge,
    pointer: Point,
    dirty: bool,
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("key", &self.key)
            .field("size", &self.size)
            .field("focus", &self.dispatcher.focus())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Window {
    /// Lay out `panel` and open a window sized to fit it.
    ///
    /// Widget value changes are reported through `write`.
    pub fn open(
        ctx: &UiContext,
        mut panel: Panel,
        parent: Option<NativeHandle>,
        write: HostWrite,
    ) -> Result<Self, UiError> {
        let size = layout(&mut panel, ctx.style());
        if size.is_empty() {
            return Err(UiError::EmptyWindow {
                width: size.width,
                height: size.height,
            });
        }

        let key = ctx.acquire_window(parent, size)?;
        let surface = ctx
            .with_backend(|backend| backend.create_surface(key, size))
            .unwrap_or(Err(UiError::NoBackend));
        let surface = match surface {
            Ok(surface) => surface,
            Err(err) => {
                ctx.release_window(key);
                return Err(err);
            }
        };

        let bridge = ParamBridge::new(&panel, write);
        Ok(Self {
            ctx: ctx.clone(),
            key,
            size,
            surface: Some(surface),
            panel,
            dispatcher: Dispatcher::new(),
            bridge,
            pointer: Point::ZERO,
            dirty: false,
        })
    }

    /// Window size, including the outer margin.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Backend key of the native window.
    pub fn key(&self) -> WindowKey {
        self.key
    }

    /// Handle for embedding in the host.
    pub fn native_handle(&self) -> Option<NativeHandle> {
        let key = self.key;
        self.ctx
            .with_backend(|backend| backend.native_handle(key))
            .flatten()
    }

    /// Laid-out widget tree.
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Current focus.
    pub fn focus(&self) -> FocusState {
        self.dispatcher.focus()
    }

    /// True if the next update will redraw.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Value of the widget bound to `index`.
    pub fn param_value(&self, index: ParamIndex) -> Option<f32> {
        self.bridge
            .lookup(index)
            .and_then(|id| self.panel.value(id))
    }

    /// Drain pending events and redraw if needed. Returns true if a frame
    /// was presented.
    pub fn update(&mut self) -> bool {
        let key = self.key;
        while let Some(event) = self
            .ctx
            .with_backend(|backend| backend.poll_event(key))
            .flatten()
        {
            self.handle_event(event);
        }

        if !self.dirty {
            return false;
        }
        self.draw();
        self.dirty = false;
        true
    }

    /// Process one event as if it had been polled from the backend.
    pub fn handle_event(&mut self, event: Event) {
        let event = match event {
            Event::Motion { x, y, .. } => {
                let motion = Event::Motion {
                    x,
                    y,
                    xrel: x - self.pointer.x,
                    yrel: y - self.pointer.y,
                };
                self.pointer = Point::new(x, y);
                motion
            }
            Event::Button { x, y, .. } => {
                self.pointer = Point::new(x, y);
                event
            }
            other => other,
        };

        let outcome = self.dispatcher.dispatch(&mut self.panel, &event);
        self.dirty |= outcome.redraw;
        if let Some(ValueChange {
            port: Some(port),
            value,
            ..
        }) = outcome.change
        {
            self.bridge.notify(port, value);
        }
    }

    /// Repaint the whole panel and present it.
    pub fn draw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let style = self.ctx.style();
        let canvas = surface.canvas_mut();
        canvas.clear(style.color(ColorIndex::Dark0));
        self.panel
            .render(canvas, style, self.dispatcher.focus().widget());
        surface.present();
        tracing::trace!(window = %self.key, "frame presented");
    }

    /// Host to widget: set the widget bound to `index`.
    ///
    /// Never notifies the host back. Unbound indices are ignored.
    pub fn push_param(&mut self, index: ParamIndex, value: f32) {
        if self.bridge.push(&mut self.panel, index, value) {
            self.dirty = true;
        }
    }

    /// Host port event. Only plain-float payloads are interpreted.
    pub fn port_event(&mut self, port: u32, size: u32, format: u32, payload: &[u8]) {
        if let Some(value) = decode_float_payload(size, format, payload) {
            self.push_param(ParamIndex(port), value);
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.surface = None;
        self.ctx.release_window(self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessProbe;
    use crate::config::UiConfig;
    use crate::panel::{ElementDef, PanelDef};
    use crate::widget::Unit;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(ParamIndex, f32)>>>;

    fn open(probe: &HeadlessProbe, def: &PanelDef) -> (UiContext, Window, Log) {
        let ctx = UiContext::new(UiConfig::default());
        ctx.select_backend(probe.selection()).unwrap();
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        let window = Window::open(
            &ctx,
            def.build().unwrap(),
            None,
            Box::new(move |i, v| sink.borrow_mut().push((i, v))),
        )
        .unwrap();
        (ctx, window, log)
    }

    fn dial_panel() -> PanelDef {
        PanelDef::new(ElementDef::vbox([
            ElementDef::label("Gain"),
            ElementDef::dial(-12.0, 0.25, 12.0)
                .unit(Unit::Decibel)
                .port(6),
        ]))
    }

    #[test]
    fn map_marks_dirty_and_draws_once() {
        let probe = HeadlessProbe::new();
        let (_ctx, mut window, _) = open(&probe, &dial_panel());
        probe.inject(window.key(), Event::Map);
        assert!(window.update());
        assert!(!window.update());
        assert_eq!(probe.frame_count(), 1);
        let frame = probe.last_frame(window.key()).unwrap();
        assert_eq!(frame.texts(), ["Gain", "-12.0 dB"]);
    }

    #[test]
    fn motion_deltas_come_from_last_pointer() {
        let probe = HeadlessProbe::new();
        let (_ctx, mut window, log) = open(&probe, &dial_panel());
        let dial = window.panel().find_by_port(ParamIndex(6)).unwrap();
        let c = window.panel().rect(dial).center();

        window.handle_event(Event::motion(c.x, c.y));
        window.handle_event(Event::press(c.x, c.y));
        window.handle_event(Event::motion(c.x, c.y - 8));
        window.handle_event(Event::release(c.x, c.y - 8));

        assert_eq!(*log.borrow(), [(ParamIndex(6), -10.0)]);
        assert_eq!(window.focus(), FocusState::Unfocused);
    }

    #[test]
    fn press_sets_origin_for_first_motion() {
        let probe = HeadlessProbe::new();
        let def = PanelDef::new(ElementDef::vbox([ElementDef::dial(0.0, 1.0, 100.0).port(2)]));
        let (_ctx, mut window, log) = open(&probe, &def);
        let dial = window.panel().find_by_port(ParamIndex(2)).unwrap();
        let c = window.panel().rect(dial).center();

        window.handle_event(Event::press(c.x, c.y));
        window.handle_event(Event::motion(c.x, c.y - 1));

        assert_eq!(window.param_value(ParamIndex(2)), Some(1.0));
        assert_eq!(*log.borrow(), [(ParamIndex(2), 1.0)]);
    }

    #[test]
    fn host_push_redraws_without_echo() {
        let probe = HeadlessProbe::new();
        let (_ctx, mut window, log) = open(&probe, &dial_panel());
        window.port_event(6, 4, 0, &3.0f32.to_ne_bytes());
        assert!(window.is_dirty());
        assert_eq!(window.param_value(ParamIndex(6)), Some(3.0));
        assert!(window.update());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn ignored_port_events_leave_window_clean() {
        let probe = HeadlessProbe::new();
        let (_ctx, mut window, _) = open(&probe, &dial_panel());
        window.port_event(6, 4, 9, &3.0f32.to_ne_bytes());
        window.port_event(2, 4, 0, &3.0f32.to_ne_bytes());
        assert!(!window.is_dirty());
    }

    #[test]
    fn surface_failure_releases_window() {
        let probe = HeadlessProbe::new();
        let ctx = UiContext::new(UiConfig::default());
        ctx.select_backend(probe.selection()).unwrap();
        probe.fail_next_surface("no gl");
        let err = Window::open(
            &ctx,
            dial_panel().build().unwrap(),
            None,
            Box::new(|_, _| {}),
        )
        .unwrap_err();
        assert!(matches!(err, UiError::CreateSurface { .. }));
        assert!(probe.live_windows().is_empty());
        assert_eq!(ctx.window_count(), 0);
        assert!(!ctx.is_connected());
    }

    #[test]
    fn window_size_covers_layout_and_margin() {
        let probe = HeadlessProbe::new();
        let (_ctx, window, _) = open(&probe, &dial_panel());
        // 96 wide, 24 + 8 + 56 tall, plus 8 on every side.
        assert_eq!(window.size(), Size::new(112, 104));
        assert_eq!(probe.window_size(window.key()), Some(window.size()));
        assert!(window.native_handle().is_some());
    }
}
