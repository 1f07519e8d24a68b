//! Host interface tests, driven through the headless backend.

use std::cell::RefCell;
use std::rc::Rc;

use sofar_plugin::host::{self, Extension, Feature, ResizeHost};
use sofar_plugin::panels::{BITCRUSHER_URI, EQ4BP_URI, PANELS};
use sofar_ui::{
    Event, FLOAT_PROTOCOL, HeadlessProbe, NativeHandle, ParamIndex, Size, UiConfig, UiContext,
};

type Writes = Rc<RefCell<Vec<(ParamIndex, f32)>>>;

fn context(probe: &HeadlessProbe) -> UiContext {
    let ctx = UiContext::new(UiConfig::default());
    ctx.select_backend(probe.selection()).unwrap();
    ctx
}

fn sink() -> (Writes, sofar_ui::HostWrite) {
    let writes: Writes = Rc::default();
    let log = Rc::clone(&writes);
    (
        writes,
        Box::new(move |index, value| log.borrow_mut().push((index, value))),
    )
}

fn headless(uri: &str) -> String {
    format!("{uri}#ui-headless")
}

#[derive(Default)]
struct ResizeLog(Vec<(i32, i32)>);

impl ResizeHost for ResizeLog {
    fn ui_resize(&mut self, width: i32, height: i32) -> i32 {
        self.0.push((width, height));
        0
    }
}

#[test]
fn instantiate_embeds_under_parent_and_announces_size() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (_, write) = sink();
    let mut resize = ResizeLog::default();

    let editor = host::instantiate(
        &ctx,
        &headless(BITCRUSHER_URI),
        write,
        [
            Feature::parent(NativeHandle(0x4200)),
            Feature::resize(&mut resize),
        ],
    )
    .unwrap();

    let key = editor.window().key();
    assert_eq!(probe.parent_of(key), Some(NativeHandle(0x4200)));
    assert_eq!(editor.size(), Size::new(272, 152));
    assert_eq!(resize.0, [(272, 152)]);
    assert!(editor.widget().is_some());
    assert_eq!(editor.descriptor().uri, BITCRUSHER_URI);
}

#[test]
fn no_parent_feature_opens_top_level() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (_, write) = sink();
    let editor = host::instantiate(&ctx, &headless(EQ4BP_URI), write, []).unwrap();
    assert_eq!(probe.parent_of(editor.window().key()), None);
}

#[test]
fn port_events_reach_widgets_without_echo() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (writes, write) = sink();
    let mut editor = host::instantiate(&ctx, &headless(BITCRUSHER_URI), write, []).unwrap();

    editor.port_event(1, 4, FLOAT_PROTOCOL, &8.0f32.to_ne_bytes());
    // Wrong format and wrong size are ignored.
    editor.port_event(0, 4, 7, &3.0f32.to_ne_bytes());
    editor.port_event(0, 8, FLOAT_PROTOCOL, &[0; 8]);
    assert_eq!(editor.idle(), 0);

    assert_eq!(editor.window().param_value(ParamIndex(1)), Some(8.0));
    assert_eq!(editor.window().param_value(ParamIndex(0)), Some(1.0));
    assert!(writes.borrow().is_empty());
    let frame = probe.last_frame(editor.window().key()).unwrap();
    assert!(frame.texts().contains(&"8"));
}

#[test]
fn idle_drives_pointer_input_to_host() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (writes, write) = sink();
    let mut editor = host::instantiate(&ctx, &headless(BITCRUSHER_URI), write, []).unwrap();
    let panel = editor.window().panel();
    let rect = panel.rect(panel.find_by_port(ParamIndex(0)).unwrap());
    let key = editor.window().key();

    probe.inject(key, Event::press(rect.x + 128, rect.y + 10));
    probe.inject(key, Event::release(rect.x + 128, rect.y + 10));
    assert_eq!(editor.idle(), 0);

    assert_eq!(*writes.borrow(), [(ParamIndex(0), 4.0)]);
}

#[test]
fn eq4bp_dials_follow_host_values() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (_, write) = sink();
    let mut editor = host::instantiate(&ctx, &headless(EQ4BP_URI), write, []).unwrap();

    editor.port_event(4, 4, FLOAT_PROTOCOL, &1000.0f32.to_ne_bytes());
    editor.port_event(6, 4, FLOAT_PROTOCOL, &40.0f32.to_ne_bytes());
    editor.idle();

    assert_eq!(editor.window().param_value(ParamIndex(4)), Some(1001.0));
    assert_eq!(editor.window().param_value(ParamIndex(6)), Some(12.0));
    let frame = probe.last_frame(editor.window().key()).unwrap();
    assert!(frame.texts().contains(&"1.0 kHz"));
    assert!(frame.texts().contains(&"12.0 dB"));
}

#[test]
fn unknown_editor_sets_last_error() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (_, write) = sink();
    let editor = host::instantiate(
        &ctx,
        "http://fanfavoritessofar.com/mixer-strip#ui-headless",
        write,
        [],
    );
    assert!(editor.is_none());
    assert_eq!(
        ctx.last_error().as_deref(),
        Some("unknown editor URI 'http://fanfavoritessofar.com/mixer-strip#ui-headless'")
    );
    assert_eq!(probe.connections(), 0);
}

#[test]
fn switching_backend_is_reported() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (_, write) = sink();
    let uri = PANELS[0].ui_uri("x11");
    assert!(host::instantiate(&ctx, &uri, write, []).is_none());
    let message = ctx.last_error().unwrap();
    assert!(message.contains("'headless' is already selected"), "{message}");
}

#[test]
fn window_failure_sets_last_error() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    probe.fail_next_window("no visual");
    let (_, write) = sink();
    assert!(host::instantiate(&ctx, &headless(EQ4BP_URI), write, []).is_none());
    assert_eq!(
        ctx.last_error().as_deref(),
        Some("can't create headless window: no visual")
    );
    assert!(!probe.is_connected());

    let (_, write) = sink();
    assert!(host::instantiate(&ctx, &headless(EQ4BP_URI), write, []).is_some());
}

#[test]
fn idle_extension_updates_instance() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (_, write) = sink();
    let mut editor = host::instantiate(&ctx, &headless(BITCRUSHER_URI), write, []).unwrap();
    let Some(Extension::Idle(table)) = host::extension_data(host::IDLE_INTERFACE) else {
        panic!("idle interface missing");
    };

    probe.inject(editor.window().key(), Event::Expose);
    assert_eq!((table.idle)(&mut editor), 0);
    assert_eq!(probe.frame_count(), 1);
}

#[test]
fn cleanup_releases_window_and_connection() {
    let probe = HeadlessProbe::new();
    let ctx = context(&probe);
    let (_, write_a) = sink();
    let (_, write_b) = sink();
    let a = host::instantiate(&ctx, &headless(EQ4BP_URI), write_a, []).unwrap();
    let b = host::instantiate(&ctx, &headless(BITCRUSHER_URI), write_b, []).unwrap();
    assert_eq!(probe.live_windows().len(), 2);
    assert_eq!(probe.connections(), 1);

    a.cleanup();
    assert_eq!(probe.live_windows().len(), 1);
    assert!(probe.is_connected());
    b.cleanup();
    assert!(probe.live_windows().is_empty());
    assert!(!probe.is_connected());
    assert_eq!(ctx.window_count(), 0);
}
