//! Host control-parameter bridge.
//!
//! The bridge connects widget values to the host's numbered control
//! parameters in both directions:
//!
//! ```text
//! host port event ──► decode_float_payload ──► ParamBridge::push ──► widget value
//!                                                                         │
//! host write callback ◄── ParamBridge::notify ◄── dispatcher (value changed)
//! ```
//!
//! Lookup is a fixed table of [`MAX_PARAMS`] slots indexed by parameter
//! number. Each slot holds at most one widget. Pushes to unbound or
//! out-of-table indices are ignored, and a push never produces a
//! notification, so the toolkit never echoes the host's own writes back.

use std::fmt;

use crate::panel::{Panel, WidgetId};

/// Size of the parameter lookup table.
pub const MAX_PARAMS: usize = 64;

/// Port-event format tag for a plain `f32` payload.
pub const FLOAT_PROTOCOL: u32 = 0;

/// Host control-parameter number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamIndex(pub u32);

impl ParamIndex {
    /// Table slot, or `None` when the index lies outside the table.
    pub fn slot(self) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|&slot| slot < MAX_PARAMS)
    }
}

impl fmt::Display for ParamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ParamIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Callback through which widget changes reach the host.
pub type HostWrite = Box<dyn FnMut(ParamIndex, f32)>;

/// Bidirectional map between parameter numbers and bound widgets.
pub struct ParamBridge {
    table: [Option<WidgetId>; MAX_PARAMS],
    write: HostWrite,
}

impl fmt::Debug for ParamBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamBridge")
            .field("bound", &self.bound_count())
            .finish_non_exhaustive()
    }
}

impl ParamBridge {
    /// Index the bindings of `panel`.
    pub fn new(panel: &Panel, write: HostWrite) -> Self {
        let mut table = [None; MAX_PARAMS];
        for (port, id) in panel.bindings() {
            if let Some(slot) = port.slot() {
                table[slot] = Some(id);
            }
        }
        Self { table, write }
    }

    /// Widget bound to `index`.
    pub fn lookup(&self, index: ParamIndex) -> Option<WidgetId> {
        index.slot().and_then(|slot| self.table[slot])
    }

    /// Number of bound slots.
    pub fn bound_count(&self) -> usize {
        self.table.iter().flatten().count()
    }

    /// Host to widget. Returns true if a widget was updated.
    pub fn push(&self, panel: &mut Panel, index: ParamIndex, value: f32) -> bool {
        let Some(id) = self.lookup(index) else {
            tracing::trace!(port = %index, "push to unbound port ignored");
            return false;
        };
        panel.set_value(id, value);
        tracing::debug!(port = %index, value, widget = %id, "host push");
        true
    }

    /// Widget to host.
    pub fn notify(&mut self, index: ParamIndex, value: f32) {
        tracing::debug!(port = %index, value, "notify host");
        (self.write)(index, value);
    }
}

/// Interpret a host port event. Only a 4-byte [`FLOAT_PROTOCOL`] payload in
/// native byte order is understood.
pub fn decode_float_payload(size: u32, format: u32, payload: &[u8]) -> Option<f32> {
    if format != FLOAT_PROTOCOL || size != 4 {
        tracing::trace!(size, format, "unsupported port event ignored");
        return None;
    }
    let bytes: [u8; 4] = payload.get(..4)?.try_into().ok()?;
    Some(f32::from_ne_bytes(bytes))
}
