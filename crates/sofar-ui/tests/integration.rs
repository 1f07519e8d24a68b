//! Integration tests for sofar-ui.
//!
//! Drives whole windows through the headless backend: lifecycle and backend
//! connection sharing, pointer interaction end to end, and the parameter
//! bridge in both directions.

use std::cell::RefCell;
use std::rc::Rc;

use sofar_ui::{
    Align, ElementDef, Event, FocusState, HeadlessProbe, PanelDef, ParamIndex, UiConfig,
    UiContext, UiError, Unit, Window,
};

type Writes = Rc<RefCell<Vec<(ParamIndex, f32)>>>;

fn context(probe: &HeadlessProbe) -> UiContext {
    let ctx = UiContext::new(UiConfig::default());
    ctx.select_backend(probe.selection()).unwrap();
    ctx
}

fn open(ctx: &UiContext, def: &PanelDef) -> (Window, Writes) {
    let writes: Writes = Rc::default();
    let sink = Rc::clone(&writes);
    let window = Window::open(
        ctx,
        def.build().unwrap(),
        None,
        Box::new(move |index, value| sink.borrow_mut().push((index, value))),
    )
    .unwrap();
    (window, writes)
}

fn repeat_panel() -> PanelDef {
    PanelDef::new(ElementDef::vbox([
        ElementDef::label("Repeat Count").halign(Align::Start),
        ElementDef::slider(1.0, 1.0, 5.0).port(0),
    ]))
}

// ============================================================================
// 1. Lifecycle
// ============================================================================

#[test]
fn windows_share_one_connection() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (a, _) = open(&ctx, &repeat_panel());
    let (b, _) = open(&ctx, &repeat_panel());
    assert_eq!(probe.connections(), 1);
    assert_eq!(ctx.window_count(), 2);
    assert_ne!(a.key(), b.key());

    drop(a);
    assert!(probe.is_connected());
    drop(b);
    assert!(!probe.is_connected());
    assert!(probe.live_windows().is_empty());

    let (_c, _) = open(&ctx, &repeat_panel());
    assert_eq!(probe.connections(), 2);
}

#[test]
fn parent_handle_reaches_backend() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (host, _) = open(&ctx, &repeat_panel());
    let parent = host.native_handle().unwrap();

    let child = Window::open(
        &ctx,
        repeat_panel().build().unwrap(),
        Some(parent),
        Box::new(|_, _| {}),
    )
    .unwrap();
    assert_eq!(probe.parent_of(child.key()), Some(parent));
}

#[test]
fn connect_failure_is_reported_and_retried() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    probe.fail_next_connect("display :9 unavailable");

    let err = Window::open(
        &ctx,
        repeat_panel().build().unwrap(),
        None,
        Box::new(|_, _| {}),
    )
    .unwrap_err();
    assert!(matches!(err, UiError::Connect { .. }));
    assert_eq!(ctx.window_count(), 0);

    let (_window, _) = open(&ctx, &repeat_panel());
    assert_eq!(probe.connections(), 1);
}

#[test]
fn empty_panel_opens_no_window() {
    let probe = HeadlessProbe::new();
    let mut config = UiConfig::default();
    config.style.spacing = 0;
    let ctx = UiContext::new(config);
    ctx.select_backend(probe.selection()).unwrap();

    let err = Window::open(
        &ctx,
        PanelDef::new(ElementDef::vbox([])).build().unwrap(),
        None,
        Box::new(|_, _| {}),
    )
    .unwrap_err();
    assert!(matches!(err, UiError::EmptyWindow { width: 0, height: 0 }));
    assert!(!ctx.is_connected());
    assert_eq!(probe.connections(), 0);
}

#[test]
fn backend_choice_is_permanent() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (window, _) = open(&ctx, &repeat_panel());
    drop(window);

    let other = sofar_ui::BackendSelection::new("x11", |_| Err(UiError::NoBackend));
    assert!(matches!(
        ctx.select_backend(other),
        Err(UiError::BackendConflict { .. })
    ));
}

// ============================================================================
// 2. Pointer interaction
// ============================================================================

#[test]
fn slider_press_after_host_push() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (mut window, writes) = open(&ctx, &repeat_panel());
    let slider = window.panel().find_by_port(ParamIndex(0)).unwrap();
    let rect = window.panel().rect(slider);

    window.push_param(ParamIndex(0), 3.0);
    assert!(window.is_dirty());
    assert!(writes.borrow().is_empty());
    assert!(window.update());

    probe.inject(window.key(), Event::press(rect.x + 128, rect.y + 10));
    window.update();
    assert_eq!(window.param_value(ParamIndex(0)), Some(4.0));
    assert_eq!(*writes.borrow(), [(ParamIndex(0), 4.0)]);
    assert_eq!(window.focus(), FocusState::Focused(slider));

    probe.inject(window.key(), Event::release(rect.x + 128, rect.y + 10));
    window.update();
    assert_eq!(window.focus(), FocusState::Unfocused);
    assert_eq!(writes.borrow().len(), 1);
}

#[test]
fn slider_drag_keeps_focus_outside_its_rect() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (mut window, writes) = open(&ctx, &repeat_panel());
    let slider = window.panel().find_by_port(ParamIndex(0)).unwrap();
    let rect = window.panel().rect(slider);

    window.handle_event(Event::press(rect.x + 1, rect.y + 10));
    assert_eq!(window.param_value(ParamIndex(0)), Some(1.0));
    // Far below the slider: still routed to it, x picks the value.
    window.handle_event(Event::motion(rect.x + 193, rect.y + 300));
    assert_eq!(window.param_value(ParamIndex(0)), Some(5.0));
    window.handle_event(Event::release(rect.x + 193, rect.y + 300));

    assert_eq!(*writes.borrow(), [(ParamIndex(0), 5.0)]);
}

#[test]
fn dial_drag_is_vertical_and_stepped() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let def = PanelDef::new(ElementDef::vbox([ElementDef::dial(-24.0, 0.5, 0.0)
        .unit(Unit::Decibel)
        .port(4)]));
    let (mut window, writes) = open(&ctx, &def);
    let dial = window.panel().find_by_port(ParamIndex(4)).unwrap();
    let c = window.panel().rect(dial).center();

    window.handle_event(Event::motion(c.x, c.y));
    window.handle_event(Event::press(c.x, c.y));
    window.handle_event(Event::motion(c.x + 40, c.y - 10));
    window.handle_event(Event::motion(c.x + 40, c.y - 30));
    window.handle_event(Event::release(c.x + 40, c.y - 30));

    assert_eq!(
        *writes.borrow(),
        [(ParamIndex(4), -19.0), (ParamIndex(4), -9.0)]
    );
    window.update();
    let frame = probe.last_frame(window.key()).unwrap();
    assert_eq!(frame.texts(), ["-9.0 dB"]);
}

#[test]
fn button_reports_press_and_release() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let def = PanelDef::new(ElementDef::hbox([
        ElementDef::label("Freeze"),
        ElementDef::button("Hold").port(9),
    ]));
    let (mut window, writes) = open(&ctx, &def);
    let button = window.panel().find_by_port(ParamIndex(9)).unwrap();
    let c = window.panel().rect(button).center();

    window.handle_event(Event::press(c.x, c.y));
    window.handle_event(Event::release(c.x, c.y));
    assert_eq!(
        *writes.borrow(),
        [(ParamIndex(9), 1.0), (ParamIndex(9), 0.0)]
    );
}

#[test]
fn press_outside_controls_changes_nothing() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (mut window, writes) = open(&ctx, &repeat_panel());
    window.handle_event(Event::press(2, 2));
    window.handle_event(Event::motion(100, 60));
    window.handle_event(Event::release(100, 60));
    assert!(writes.borrow().is_empty());
    assert_eq!(window.focus(), FocusState::Unfocused);
    assert_eq!(window.param_value(ParamIndex(0)), Some(1.0));
}

// ============================================================================
// 3. Rendering
// ============================================================================

#[test]
fn repaint_events_draw_current_values() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (mut window, _) = open(&ctx, &repeat_panel());
    window.port_event(0, 4, 0, &2.0f32.to_ne_bytes());

    probe.inject(window.key(), Event::Expose);
    probe.inject(window.key(), Event::Expose);
    assert!(window.update());
    assert_eq!(probe.frame_count(), 1);

    let frame = probe.last_frame(window.key()).unwrap();
    assert_eq!(frame.size, window.size());
    assert_eq!(frame.texts(), ["Repeat Count", "2"]);
}

#[test]
fn events_for_a_closed_window_are_discarded() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (mut keep, _) = open(&ctx, &repeat_panel());
    let (closing, _) = open(&ctx, &repeat_panel());
    probe.inject(closing.key(), Event::Map);
    drop(closing);

    assert!(!keep.update());
    assert_eq!(probe.frame_count(), 0);
}
