//! Editor layer for the sofar effect plugins.
//!
//! Sits between a plugin host and the [`sofar_ui`] toolkit:
//!
//! - [`panels`]: the editor of each effect, addressed by UI URI.
//! - [`host`]: instantiate / port event / idle / cleanup and the extension
//!   query, with host feature parsing.
//! - [`native`]: the baseview backend (`#ui-x11`), painting through egui over
//!   OpenGL.
//!
//! # Example
//!
//! ```rust,no_run
//! use sofar_plugin::host::{self, Feature};
//! use sofar_ui::{NativeHandle, UiConfig, UiContext};
//!
//! let ctx = UiContext::new(UiConfig::default());
//! let uri = "http://fanfavoritessofar.com/bitcrusher#ui-x11";
//! let write = Box::new(|port, value| println!("{port} = {value}"));
//! if let Some(mut editor) = host::instantiate(&ctx, uri, write, [Feature::parent(NativeHandle(0x3a00007))]) {
//!     editor.idle();
//!     editor.cleanup();
//! } else {
//!     eprintln!("{:?}", ctx.last_error());
//! }
//! ```

pub mod host;
pub mod native;
pub mod panels;

pub use host::{
    Extension, Feature, FeatureData, IdleInterface, InstantiateError, ResizeHost, UiInstance,
    extension_data, instantiate, try_instantiate,
};
pub use native::NativeBackend;
pub use panels::{PANELS, PanelDescriptor};
