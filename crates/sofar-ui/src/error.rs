//! Error types for toolkit construction.
//!
//! Two families exist:
//!
//! - [`UiError`]: configuration failures at window/backend construction.
//!   Fatal to the instantiation that hit them, never to the process.
//! - [`PanelError`]: an invalid panel definition, detected once when the
//!   widget tree is built.
//!
//! Protocol mismatches (unknown port-event formats, unbound indices) are not
//! errors at all; they are ignored where they arrive.

use thiserror::Error;

/// Errors raised while selecting a backend or creating a window.
#[derive(Debug, Error)]
pub enum UiError {
    /// A backend is already active for this process and a different one was requested.
    #[error("invalid backend: '{selected}' is already selected, cannot switch to '{requested}'")]
    BackendConflict {
        /// Name of the backend selected first.
        selected: &'static str,
        /// Name of the backend requested afterwards.
        requested: &'static str,
    },

    /// No backend has been selected on the context.
    #[error("no backend selected")]
    NoBackend,

    /// The backend could not reach its native display.
    #[error("can't connect to {backend} display: {reason}")]
    Connect {
        /// Backend name.
        backend: &'static str,
        /// Human-readable cause.
        reason: String,
    },

    /// The native window could not be created.
    #[error("can't create {backend} window: {reason}")]
    CreateWindow {
        /// Backend name.
        backend: &'static str,
        /// Human-readable cause.
        reason: String,
    },

    /// The drawing surface could not be created for an existing window.
    #[error("can't create {backend} drawing surface: {reason}")]
    CreateSurface {
        /// Backend name.
        backend: &'static str,
        /// Human-readable cause.
        reason: String,
    },

    /// The panel has no visible extent.
    #[error("window size {width}x{height} is empty")]
    EmptyWindow {
        /// Computed width.
        width: i32,
        /// Computed height.
        height: i32,
    },
}

impl UiError {
    /// Create a window-creation error.
    pub fn create_window(backend: &'static str, reason: impl Into<String>) -> Self {
        UiError::CreateWindow {
            backend,
            reason: reason.into(),
        }
    }

    /// Create a surface-creation error.
    pub fn create_surface(backend: &'static str, reason: impl Into<String>) -> Self {
        UiError::CreateSurface {
            backend,
            reason: reason.into(),
        }
    }

    /// Create a display-connection error.
    pub fn connect(backend: &'static str, reason: impl Into<String>) -> Self {
        UiError::Connect {
            backend,
            reason: reason.into(),
        }
    }
}

/// Errors in a panel definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    /// Label or button text exceeds the bounded text length.
    #[error("text '{preview}…' is {len} bytes, limit is {limit}")]
    TextTooLong {
        /// First characters of the offending text.
        preview: String,
        /// Actual length in bytes.
        len: usize,
        /// Maximum length in bytes.
        limit: usize,
    },

    /// Slider or dial range is empty, reversed, or not finite.
    #[error("invalid range [{start}, {end}]")]
    InvalidRange {
        /// Range start.
        start: f32,
        /// Range end.
        end: f32,
    },

    /// Slider or dial step is zero, negative, or not finite.
    #[error("invalid step {0}")]
    InvalidStep(f32),

    /// Parameter index is beyond the bridge lookup table.
    #[error("port {port} is out of range (table holds {limit} ports)")]
    PortOutOfRange {
        /// Requested port.
        port: u32,
        /// Table size.
        limit: usize,
    },

    /// Two widgets bind the same parameter index.
    #[error("port {0} is bound to more than one widget")]
    DuplicateBinding(u32),

    /// A port was attached to a widget that holds no value.
    #[error("{kind} widgets cannot be bound to a port (port {port})")]
    NotBindable {
        /// Widget kind name.
        kind: &'static str,
        /// Requested port.
        port: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_conflict_display() {
        let err = UiError::BackendConflict {
            selected: "x11",
            requested: "headless",
        };
        assert_eq!(
            err.to_string(),
            "invalid backend: 'x11' is already selected, cannot switch to 'headless'"
        );
    }

    #[test]
    fn factory_methods_produce_variants() {
        assert!(matches!(
            UiError::create_window("x11", "no visual"),
            UiError::CreateWindow {
                backend: "x11",
                ..
            }
        ));
        assert!(matches!(
            UiError::create_surface("x11", "gl"),
            UiError::CreateSurface { .. }
        ));
        let msg = UiError::connect("x11", "DISPLAY unset").to_string();
        assert_eq!(msg, "can't connect to x11 display: DISPLAY unset");
    }

    #[test]
    fn panel_error_display() {
        assert_eq!(
            PanelError::DuplicateBinding(4).to_string(),
            "port 4 is bound to more than one widget"
        );
        assert_eq!(
            PanelError::PortOutOfRange {
                port: 70,
                limit: 64
            }
            .to_string(),
            "port 70 is out of range (table holds 64 ports)"
        );
    }
}
