//! Process-scoped toolkit state.
//!
//! A [`UiContext`] carries everything that exists once per process: the
//! configuration and style table, the selected backend and its live
//! connection, the number of open windows, and the last-error slot. All
//! windows opened from one context share it; clones are cheap handles to the
//! same state.
//!
//! The context is single-threaded by construction (`Rc` + `RefCell`, neither
//! `Send` nor `Sync`). Hosts must call into the toolkit from one UI thread.
//!
//! # Backend lifecycle
//!
//! ```text
//! select_backend("x11") ──► first Window::open ──► connect ──► windows = 1
//!                                   ...                          ...
//!                          last Window dropped ──► disconnect ─► windows = 0
//! ```
//!
//! The selection itself is permanent: once a backend name has been chosen, a
//! request for a different one fails with [`UiError::BackendConflict`] even
//! after every window has closed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::{Backend, BackendSelection, NativeHandle, WindowKey};
use crate::config::UiConfig;
use crate::error::UiError;
use crate::geometry::Size;
use crate::style::Style;

/// Capacity of the last-error slot in bytes.
pub const ERROR_CAPACITY: usize = 256;

#[derive(Default)]
struct ContextState {
    selection: Option<BackendSelection>,
    backend: Option<Box<dyn Backend>>,
    windows: usize,
    last_error: Option<String>,
}

struct ContextInner {
    config: UiConfig,
    state: RefCell<ContextState>,
}

/// Shared handle to process-wide toolkit state.
#[derive(Clone)]
pub struct UiContext {
    inner: Rc<ContextInner>,
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("UiContext")
            .field("backend", &state.selection.as_ref().map(BackendSelection::name))
            .field("connected", &state.backend.is_some())
            .field("windows", &state.windows)
            .finish_non_exhaustive()
    }
}

impl UiContext {
    /// Create a context with no backend selected.
    pub fn new(config: UiConfig) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                config,
                state: RefCell::new(ContextState::default()),
            }),
        }
    }

    /// Configuration the context was created with.
    pub fn config(&self) -> &UiConfig {
        &self.inner.config
    }

    /// Style table.
    pub fn style(&self) -> &Style {
        &self.inner.config.style
    }

    /// Choose the backend for this process.
    ///
    /// Selecting the already-selected name again is a no-op.
    pub fn select_backend(&self, selection: BackendSelection) -> Result<(), UiError> {
        let mut state = self.inner.state.borrow_mut();
        match &state.selection {
            Some(current) if current.name() == selection.name() => Ok(()),
            Some(current) => Err(UiError::BackendConflict {
                selected: current.name(),
                requested: selection.name(),
            }),
            None => {
                tracing::info!(backend = selection.name(), "backend selected");
                state.selection = Some(selection);
                Ok(())
            }
        }
    }

    /// Name of the selected backend.
    pub fn backend_name(&self) -> Option<&'static str> {
        let state = self.inner.state.borrow();
        state.selection.as_ref().map(BackendSelection::name)
    }

    /// True while a backend connection is open.
    pub fn is_connected(&self) -> bool {
        self.inner.state.borrow().backend.is_some()
    }

    /// Number of open windows.
    pub fn window_count(&self) -> usize {
        self.inner.state.borrow().windows
    }

    /// Record a failure message, truncated to [`ERROR_CAPACITY`] bytes.
    pub fn set_error(&self, message: impl Into<String>) {
        let mut message = message.into();
        if message.len() >= ERROR_CAPACITY {
            let mut end = ERROR_CAPACITY - 1;
            while !message.is_char_boundary(end) {
                end -= 1;
            }
            message.truncate(end);
        }
        self.inner.state.borrow_mut().last_error = Some(message);
    }

    /// Most recent failure message.
    pub fn last_error(&self) -> Option<String> {
        self.inner.state.borrow().last_error.clone()
    }

    /// Connect if needed and create a native window.
    pub(crate) fn acquire_window(
        &self,
        parent: Option<NativeHandle>,
        size: Size,
    ) -> Result<WindowKey, UiError> {
        let mut guard = self.inner.state.borrow_mut();
        let state = &mut *guard;
        let selection = state.selection.as_ref().ok_or(UiError::NoBackend)?;

        if state.backend.is_none() {
            state.backend = Some(selection.connect(&self.inner.config)?);
        }
        let Some(backend) = state.backend.as_mut() else {
            return Err(UiError::NoBackend);
        };

        match backend.create_window(parent, size) {
            Ok(key) => {
                state.windows += 1;
                tracing::info!(
                    backend = backend.name(),
                    window = %key,
                    width = size.width,
                    height = size.height,
                    "window created"
                );
                Ok(key)
            }
            Err(err) => {
                if state.windows == 0 {
                    state.backend = None;
                }
                Err(err)
            }
        }
    }

    /// Destroy a native window and disconnect after the last one.
    pub(crate) fn release_window(&self, key: WindowKey) {
        let mut state = self.inner.state.borrow_mut();
        if let Some(backend) = state.backend.as_mut() {
            backend.destroy_window(key);
            tracing::info!(backend = backend.name(), window = %key, "window destroyed");
        }
        state.windows = state.windows.saturating_sub(1);
        if state.windows == 0 {
            state.backend = None;
        }
    }

    /// Run `f` against the live backend.
    pub(crate) fn with_backend<R>(&self, f: impl FnOnce(&mut dyn Backend) -> R) -> Option<R> {
        let mut state = self.inner.state.borrow_mut();
        state.backend.as_mut().map(|backend| f(backend.as_mut()))
    }
}
