//! Embedded control-surface toolkit for the sofar audio effect plugins.
//!
//! A plugin describes its editor as a small declarative tree of labels,
//! boxes, separators, buttons, sliders and dials, each control optionally
//! bound to one plugin parameter. The toolkit lays the tree out once, opens a
//! native window sized to fit, routes pointer input through a single-focus
//! state machine and keeps widget values and host parameters in sync.
//!
//! # Modules
//!
//! - [`panel`]: declarative element tree and the built widget arena
//! - [`widget`]: widget kinds, stepped value ranges and value formatting
//! - [`layout`]: two-pass box layout
//! - [`dispatch`]: event routing and focus tracking
//! - [`param_bridge`]: parameter index to widget binding, both directions
//! - [`window`]: one live panel instance
//! - [`context`]: process-wide backend selection and error slot
//! - [`backend`]: native backend trait and the in-memory backend
//! - [`canvas`], [`style`], [`config`]: drawing, colours, settings
//!
//! # Example
//!
//! ```
//! use sofar_ui::{ElementDef, HeadlessProbe, PanelDef, ParamIndex, UiConfig, UiContext, Window};
//!
//! let probe = HeadlessProbe::new();
//! let ctx = UiContext::new(UiConfig::default());
//! ctx.select_backend(probe.selection()).unwrap();
//!
//! let def = PanelDef::new(ElementDef::vbox([
//!     ElementDef::label("Mix"),
//!     ElementDef::dial(0.0, 0.25, 1.0).port(3),
//! ]));
//! let mut window = Window::open(&ctx, def.build().unwrap(), None, Box::new(|_, _| {})).unwrap();
//!
//! window.push_param(ParamIndex(3), 0.5);
//! assert!(window.update());
//! assert_eq!(window.param_value(ParamIndex(3)), Some(0.5));
//! ```

pub mod backend;
pub mod canvas;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod panel;
pub mod param_bridge;
pub mod style;
pub mod widget;
pub mod window;

pub use backend::{
    Backend, BackendSelection, EventPump, EventSender, Frame, HeadlessBackend, HeadlessProbe,
    NativeHandle, Surface, WindowKey, event_channel,
};
pub use canvas::{Canvas, DrawCommand};
pub use config::{CONFIG_ENV, ConfigError, UiConfig};
pub use context::UiContext;
pub use dispatch::{DispatchOutcome, Dispatcher, FocusState, ValueChange};
pub use error::{PanelError, UiError};
pub use event::{ButtonCode, Event};
pub use geometry::{Point, Rect, Size};
pub use layout::layout;
pub use panel::{ElementDef, MAX_TEXT_LEN, Panel, PanelDef, WidgetId};
pub use param_bridge::{FLOAT_PROTOCOL, HostWrite, MAX_PARAMS, ParamBridge, ParamIndex};
pub use style::{Color, ColorIndex, Palette, Style};
pub use widget::{Align, DialRadius, Orientation, Unit, ValueRange, Widget, WidgetKind};
pub use window::Window;
