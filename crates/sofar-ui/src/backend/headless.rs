//! In-memory backend.
//!
//! [`HeadlessBackend`] has no display. Windows are bookkeeping entries,
//! surfaces keep the draw lists they are asked to present, and input comes
//! from events injected through a [`HeadlessProbe`]. The probe outlives any
//! single connection, so a test can observe the whole lifecycle: how often
//! the backend connected, which windows are live, what each frame drew.
//!
//! ```
//! use sofar_ui::{ElementDef, HeadlessProbe, PanelDef, UiConfig, UiContext, Window};
//!
//! let probe = HeadlessProbe::new();
//! let ctx = UiContext::new(UiConfig::default());
//! ctx.select_backend(probe.selection()).unwrap();
//!
//! let panel = PanelDef::new(ElementDef::vbox([ElementDef::label("Gain")]))
//!     .build()
//!     .unwrap();
//! let mut window = Window::open(&ctx, panel, None, Box::new(|_, _| {})).unwrap();
//! window.update();
//! assert_eq!(probe.live_windows().len(), 1);
//! drop(window);
//! assert!(!probe.is_connected());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::queue::{EventPump, EventSender, event_channel};
use crate::backend::{Backend, BackendSelection, NativeHandle, Surface, WindowKey};
use crate::canvas::{Canvas, DrawCommand};
use crate::config::UiConfig;
use crate::error::UiError;
use crate::event::Event;
use crate::geometry::Size;

const NAME: &str = "headless";

/// Native handles are window keys offset by this base.
const HANDLE_BASE: u64 = 0x1000;

/// One presented frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Window the frame was presented on.
    pub window: WindowKey,
    /// Surface size at present time.
    pub size: Size,
    /// Draw list replayed by the frame.
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Text strings drawn in this frame.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug)]
struct LiveWindow {
    key: WindowKey,
    parent: Option<NativeHandle>,
    size: Size,
}

#[derive(Debug, Default)]
struct ProbeState {
    next_key: u32,
    live: Vec<LiveWindow>,
    frames: Vec<Frame>,
    connections: usize,
    sender: Option<EventSender>,
    fail_connect: Option<String>,
    fail_window: Option<String>,
    fail_surface: Option<String>,
}

/// Test handle observing and driving headless backends.
#[derive(Debug, Clone, Default)]
pub struct HeadlessProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl HeadlessProbe {
    /// Create a probe with no connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend selection that connects headless backends reporting to this probe.
    pub fn selection(&self) -> BackendSelection {
        let probe = self.clone();
        BackendSelection::new(NAME, move |config| {
            HeadlessBackend::connect(probe.clone(), config)
                .map(|backend| Box::new(backend) as Box<dyn Backend>)
        })
    }

    /// Queue an input event for `window`. Returns false when no backend is
    /// connected or the event source is full.
    pub fn inject(&self, window: WindowKey, event: Event) -> bool {
        let state = self.state.lock();
        match &state.sender {
            Some(sender) => sender.send(window, event),
            None => false,
        }
    }

    /// Keys of windows not yet destroyed, in creation order.
    pub fn live_windows(&self) -> Vec<WindowKey> {
        self.state.lock().live.iter().map(|w| w.key).collect()
    }

    /// Parent handle `window` was created with.
    pub fn parent_of(&self, window: WindowKey) -> Option<NativeHandle> {
        let state = self.state.lock();
        state
            .live
            .iter()
            .find(|w| w.key == window)
            .and_then(|w| w.parent)
    }

    /// Size `window` was created with.
    pub fn window_size(&self, window: WindowKey) -> Option<Size> {
        let state = self.state.lock();
        state.live.iter().find(|w| w.key == window).map(|w| w.size)
    }

    /// Every frame presented so far.
    pub fn frames(&self) -> Vec<Frame> {
        self.state.lock().frames.clone()
    }

    /// Number of frames presented so far.
    pub fn frame_count(&self) -> usize {
        self.state.lock().frames.len()
    }

    /// Most recent frame presented on `window`.
    pub fn last_frame(&self, window: WindowKey) -> Option<Frame> {
        let state = self.state.lock();
        state.frames.iter().rev().find(|f| f.window == window).cloned()
    }

    /// Number of times a backend connected.
    pub fn connections(&self) -> usize {
        self.state.lock().connections
    }

    /// True while a backend is connected.
    pub fn is_connected(&self) -> bool {
        self.state.lock().sender.is_some()
    }

    /// Make the next connection attempt fail.
    pub fn fail_next_connect(&self, reason: impl Into<String>) {
        self.state.lock().fail_connect = Some(reason.into());
    }

    /// Make the next window creation fail.
    pub fn fail_next_window(&self, reason: impl Into<String>) {
        self.state.lock().fail_window = Some(reason.into());
    }

    /// Make the next surface creation fail.
    pub fn fail_next_surface(&self, reason: impl Into<String>) {
        self.state.lock().fail_surface = Some(reason.into());
    }
}

/// Backend rendering into memory.
#[derive(Debug)]
pub struct HeadlessBackend {
    probe: HeadlessProbe,
    pump: EventPump,
}

impl HeadlessBackend {
    /// Connect, reporting to `probe`.
    pub fn connect(probe: HeadlessProbe, config: &UiConfig) -> Result<Self, UiError> {
        let (sender, pump) = event_channel(config.event_capacity);
        {
            let mut state = probe.state.lock();
            if let Some(reason) = state.fail_connect.take() {
                return Err(UiError::connect(NAME, reason));
            }
            state.connections += 1;
            state.sender = Some(sender);
        }
        tracing::info!(backend = NAME, "display connected");
        Ok(Self { probe, pump })
    }
}

impl Drop for HeadlessBackend {
    fn drop(&mut self) {
        self.probe.state.lock().sender = None;
        tracing::info!(backend = NAME, "display closed");
    }
}

impl Backend for HeadlessBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn create_window(
        &mut self,
        parent: Option<NativeHandle>,
        size: Size,
    ) -> Result<WindowKey, UiError> {
        let mut state = self.probe.state.lock();
        if let Some(reason) = state.fail_window.take() {
            return Err(UiError::create_window(NAME, reason));
        }
        state.next_key += 1;
        let key = WindowKey(state.next_key);
        state.live.push(LiveWindow { key, parent, size });
        Ok(key)
    }

    fn create_surface(
        &mut self,
        window: WindowKey,
        size: Size,
    ) -> Result<Box<dyn Surface>, UiError> {
        let mut state = self.probe.state.lock();
        if let Some(reason) = state.fail_surface.take() {
            return Err(UiError::create_surface(NAME, reason));
        }
        if !state.live.iter().any(|w| w.key == window) {
            return Err(UiError::create_surface(NAME, format!("unknown window {window}")));
        }
        Ok(Box::new(HeadlessSurface {
            window,
            size,
            canvas: Canvas::new(),
            probe: self.probe.clone(),
        }))
    }

    fn native_handle(&self, window: WindowKey) -> Option<NativeHandle> {
        let state = self.probe.state.lock();
        state
            .live
            .iter()
            .any(|w| w.key == window)
            .then(|| NativeHandle(HANDLE_BASE + u64::from(window.0)))
    }

    fn poll_event(&mut self, window: WindowKey) -> Option<Event> {
        self.pump.poll(window)
    }

    fn destroy_window(&mut self, window: WindowKey) {
        self.pump.purge(window);
        self.probe.state.lock().live.retain(|w| w.key != window);
    }
}

struct HeadlessSurface {
    window: WindowKey,
    size: Size,
    canvas: Canvas,
    probe: HeadlessProbe,
}

impl Surface for HeadlessSurface {
    fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn present(&mut self) {
        let frame = Frame {
            window: self.window,
            size: self.size,
            commands: self.canvas.commands().to_vec(),
        };
        self.probe.state.lock().frames.push(frame);
    }

    fn size(&self) -> Size {
        self.size
    }
}
