//! Native backend: baseview windows painted with egui over OpenGL.
//!
//! # Architecture
//!
//! ```text
//! host parent window (NativeHandle)
//!     │
//!     ▼
//! baseview::Window (child window + GL context, own event thread)
//!     │  mouse input ──► EventSender ──┐
//!     │                                ▼
//!     │                       NativeBackend::poll_event (UI thread)
//!     │                                │
//!     │                        sofar_ui::Window::update
//!     │                                │
//!     │  ◄── SharedWindow::frame ◄── NativeSurface::present
//!     ▼
//! FrameHandler: draw list → egui shapes → egui_glow::Painter
//! ```
//!
//! Windows without a parent are opened top-level on a dedicated thread.

mod handler;
mod paint;
mod translate;

use std::sync::Arc;
use std::time::Duration;

use baseview::gl::GlConfig;
use baseview::{Size as BvSize, Window as BvWindow, WindowHandle, WindowOpenOptions, WindowScalePolicy};
use raw_window_handle::{HasRawWindowHandle, RawWindowHandle};
use sofar_ui::{
    Backend, BackendSelection, Canvas, Event, EventPump, EventSender, NativeHandle, Size, Surface,
    UiConfig, UiError, WindowKey, event_channel,
};

use handler::{FrameHandler, HandlerConfig, OpenResult, SharedWindow};

/// Backend name, as used in UI URIs.
pub const NAME: &str = "x11";

/// How long window creation waits for the window thread to report back.
const OPEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Selection connecting the native backend.
pub fn selection() -> BackendSelection {
    BackendSelection::new(NAME, |config| {
        Ok(Box::new(NativeBackend::connect(config)) as Box<dyn Backend>)
    })
}

struct NativeWindow {
    key: WindowKey,
    handle: NativeHandle,
    shared: Arc<SharedWindow>,
    window: Option<WindowHandle>,
}

/// Backend creating baseview windows.
pub struct NativeBackend {
    sender: EventSender,
    pump: EventPump,
    windows: Vec<NativeWindow>,
    next_key: u32,
    scale: f64,
    font_size: f32,
}

impl std::fmt::Debug for NativeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBackend")
            .field("windows", &self.windows.len())
            .finish_non_exhaustive()
    }
}

impl NativeBackend {
    /// Set up the shared event source.
    pub fn connect(config: &UiConfig) -> Self {
        let (sender, pump) = event_channel(config.event_capacity);
        if config.style.font_face != "sans-serif" {
            tracing::debug!(
                font = %config.style.font_face,
                "native painter uses egui's proportional font"
            );
        }
        tracing::info!(backend = NAME, "display connected");
        Self {
            sender,
            pump,
            windows: Vec::new(),
            next_key: 0,
            scale: 1.0,
            font_size: config.style.font_size,
        }
    }

    fn find(&self, key: WindowKey) -> Option<&NativeWindow> {
        self.windows.iter().find(|w| w.key == key)
    }

    /// Release a window that failed to open. Its handler may already have
    /// sent events under `key`.
    fn abandon(&mut self, key: WindowKey, shared: &SharedWindow, window: Option<WindowHandle>) {
        *shared.close.lock() = true;
        if let Some(mut handle) = window {
            handle.close();
        }
        self.pump.purge(key);
        tracing::debug!(backend = NAME, window = %key, "abandoned window");
    }
}

impl Drop for NativeBackend {
    fn drop(&mut self) {
        for key in self.windows.iter().map(|w| w.key).collect::<Vec<_>>() {
            self.destroy_window(key);
        }
        tracing::info!(backend = NAME, "display closed");
    }
}

impl Backend for NativeBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn create_window(
        &mut self,
        parent: Option<NativeHandle>,
        size: Size,
    ) -> Result<WindowKey, UiError> {
        let width = u32::try_from(size.width)
            .map_err(|_| UiError::create_window(NAME, format!("invalid width {}", size.width)))?;
        let height = u32::try_from(size.height)
            .map_err(|_| UiError::create_window(NAME, format!("invalid height {}", size.height)))?;

        self.next_key += 1;
        let key = WindowKey(self.next_key);
        let shared = Arc::new(SharedWindow::default());
        let (opened_tx, opened_rx) = crossbeam_channel::bounded::<OpenResult>(1);

        let config = HandlerConfig {
            key,
            width,
            height,
            scale: self.scale,
            font_size: self.font_size,
            events: self.sender.clone(),
            shared: Arc::clone(&shared),
            opened: opened_tx,
        };
        let options = WindowOpenOptions {
            title: "sofar".to_owned(),
            size: BvSize::new(f64::from(width), f64::from(height)),
            scale: WindowScalePolicy::ScaleFactor(self.scale),
            gl_config: Some(GlConfig {
                version: (3, 2),
                ..GlConfig::default()
            }),
        };
        let build = move |window: &mut BvWindow<'_>| FrameHandler::build(window, config);

        let window = match parent {
            Some(parent) => Some(BvWindow::open_parented(
                &ParentWindow(parent_handle(parent)),
                options,
                build,
            )),
            None => {
                std::thread::Builder::new()
                    .name(format!("sofar-{key}"))
                    .spawn(move || BvWindow::open_blocking(options, build))
                    .map_err(|err| UiError::create_window(NAME, err.to_string()))?;
                None
            }
        };

        let handle = match opened_rx.recv_timeout(OPEN_TIMEOUT) {
            Ok(Ok(handle)) => handle,
            Ok(Err(reason)) => {
                self.abandon(key, &shared, window);
                return Err(UiError::create_window(NAME, reason));
            }
            Err(_) => {
                self.abandon(key, &shared, window);
                return Err(UiError::create_window(NAME, "window thread did not respond"));
            }
        };

        self.windows.push(NativeWindow {
            key,
            handle,
            shared,
            window,
        });
        Ok(key)
    }

    fn create_surface(
        &mut self,
        window: WindowKey,
        size: Size,
    ) -> Result<Box<dyn Surface>, UiError> {
        let shared = self
            .find(window)
            .map(|w| Arc::clone(&w.shared))
            .ok_or_else(|| UiError::create_surface(NAME, format!("unknown window {window}")))?;
        Ok(Box::new(NativeSurface {
            size,
            canvas: Canvas::new(),
            shared,
        }))
    }

    fn native_handle(&self, window: WindowKey) -> Option<NativeHandle> {
        self.find(window).map(|w| w.handle)
    }

    fn poll_event(&mut self, window: WindowKey) -> Option<Event> {
        self.pump.poll(window)
    }

    fn destroy_window(&mut self, window: WindowKey) {
        self.pump.purge(window);
        let Some(index) = self.windows.iter().position(|w| w.key == window) else {
            return;
        };
        let mut closing = self.windows.swap_remove(index);
        *closing.shared.close.lock() = true;
        if let Some(handle) = closing.window.as_mut() {
            handle.close();
        }
    }
}

struct NativeSurface {
    size: Size,
    canvas: Canvas,
    shared: Arc<SharedWindow>,
}

impl Surface for NativeSurface {
    fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn present(&mut self) {
        *self.shared.frame.lock() = Some(self.canvas.commands().to_vec());
    }

    fn size(&self) -> Size {
        self.size
    }
}

/// Host parent window for `open_parented`, which wants a
/// [`HasRawWindowHandle`] (raw-window-handle 0.5).
struct ParentWindow(RawWindowHandle);

#[allow(unsafe_code)]
// SAFETY: HasRawWindowHandle is unsafe in rwh 0.5. The impl only returns a
// Copy value received from the host, which keeps the parent alive until the
// UI instance is cleaned up.
unsafe impl HasRawWindowHandle for ParentWindow {
    fn raw_window_handle(&self) -> RawWindowHandle {
        self.0
    }
}

#[cfg(target_os = "windows")]
fn parent_handle(parent: NativeHandle) -> RawWindowHandle {
    let mut handle = raw_window_handle::Win32WindowHandle::empty();
    handle.hwnd = parent.0 as usize as *mut std::ffi::c_void;
    RawWindowHandle::Win32(handle)
}

#[cfg(target_os = "macos")]
fn parent_handle(parent: NativeHandle) -> RawWindowHandle {
    let mut handle = raw_window_handle::AppKitWindowHandle::empty();
    handle.ns_view = parent.0 as usize as *mut std::ffi::c_void;
    RawWindowHandle::AppKit(handle)
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn parent_handle(parent: NativeHandle) -> RawWindowHandle {
    let mut handle = raw_window_handle::XlibWindowHandle::empty();
    handle.window = parent.0 as std::ffi::c_ulong;
    RawWindowHandle::Xlib(handle)
}
