//! Native backend abstraction.
//!
//! A [`Backend`] wraps one native windowing system: it creates windows and
//! drawing surfaces, exposes the handle a host embeds, and turns native input
//! into [`Event`]s. One backend is active per process. The
//! [`UiContext`](crate::UiContext) owns it, connects it lazily from a
//! [`BackendSelection`] when the first window opens, and drops it when the
//! last window closes.
//!
//! Two implementations exist: [`HeadlessBackend`] here, which renders into
//! memory and takes injected events, and the baseview/OpenGL backend in the
//! plugin crate.

mod headless;
mod queue;

pub use headless::{Frame, HeadlessBackend, HeadlessProbe};
pub use queue::{EventPump, EventSender, event_channel};

use std::fmt;

use crate::canvas::Canvas;
use crate::config::UiConfig;
use crate::error::UiError;
use crate::event::Event;
use crate::geometry::Size;

/// Opaque native window handle, as handed to the host for embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub u64);

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Backend-local identifier of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowKey(pub u32);

impl fmt::Display for WindowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// A drawing surface bound to one native window.
pub trait Surface {
    /// Draw list for the next frame.
    fn canvas_mut(&mut self) -> &mut Canvas;

    /// Hand the current draw list to the native painter.
    fn present(&mut self);

    /// Surface extent in pixels.
    fn size(&self) -> Size;
}

/// One native windowing system.
pub trait Backend {
    /// Short name used in URIs and diagnostics.
    fn name(&self) -> &'static str;

    /// Create a window, embedded in `parent` when given.
    fn create_window(
        &mut self,
        parent: Option<NativeHandle>,
        size: Size,
    ) -> Result<WindowKey, UiError>;

    /// Create the drawing surface for `window`.
    fn create_surface(&mut self, window: WindowKey, size: Size)
    -> Result<Box<dyn Surface>, UiError>;

    /// Handle the host embeds, or `None` for an unknown window.
    fn native_handle(&self, window: WindowKey) -> Option<NativeHandle>;

    /// Next pending event for `window`. Never blocks.
    fn poll_event(&mut self, window: WindowKey) -> Option<Event>;

    /// Release the native window. Events still queued for it are discarded.
    fn destroy_window(&mut self, window: WindowKey);
}

type ConnectFn = dyn Fn(&UiConfig) -> Result<Box<dyn Backend>, UiError>;

/// A named recipe for connecting a backend.
pub struct BackendSelection {
    name: &'static str,
    connect: Box<ConnectFn>,
}

impl BackendSelection {
    /// Pair a backend name with its connect function.
    pub fn new(
        name: &'static str,
        connect: impl Fn(&UiConfig) -> Result<Box<dyn Backend>, UiError> + 'static,
    ) -> Self {
        Self {
            name,
            connect: Box::new(connect),
        }
    }

    /// Backend name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Open the native connection.
    pub fn connect(&self, config: &UiConfig) -> Result<Box<dyn Backend>, UiError> {
        (self.connect)(config)
    }
}

impl fmt::Debug for BackendSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSelection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
