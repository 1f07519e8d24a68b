//! Host-facing editor interface.
//!
//! A host instantiates an editor by UI URI, passing a write callback and its
//! feature list, then drives the instance from its UI thread:
//!
//! ```text
//! instantiate ──► UiInstance ──► port_event / idle ... ──► cleanup
//! ```
//!
//! Every failure inside [`instantiate`] is logged, recorded in the context's
//! last-error slot and turned into `None`.

use sofar_ui::{HostWrite, NativeHandle, PanelError, Size, UiContext, UiError, Window};
use thiserror::Error;

use crate::native;
use crate::panels::{self, PanelDescriptor};

/// Feature carrying the host's parent window.
pub const PARENT_FEATURE: &str = "http://lv2plug.in/ns/extensions/ui#parent";

/// Feature letting the editor announce its size.
pub const RESIZE_FEATURE: &str = "http://lv2plug.in/ns/extensions/ui#resize";

/// Extension providing the idle callback.
pub const IDLE_INTERFACE: &str = "http://lv2plug.in/ns/extensions/ui#idleInterface";

/// Backend name of the headless backend, as used in UI URIs.
pub const HEADLESS_BACKEND: &str = "headless";

/// Host side of the resize feature.
pub trait ResizeHost {
    /// Tell the host the editor's size. Returns a host status code.
    fn ui_resize(&mut self, width: i32, height: i32) -> i32;
}

/// Payload of one host feature.
pub enum FeatureData<'a> {
    /// A native window handle.
    Handle(NativeHandle),
    /// The host's resize callback.
    Resize(&'a mut dyn ResizeHost),
    /// Anything this editor does not interpret.
    Opaque,
}

/// One entry of the host's feature list.
pub struct Feature<'a> {
    /// Feature URI.
    pub uri: &'a str,
    /// Feature payload.
    pub data: FeatureData<'a>,
}

impl<'a> Feature<'a> {
    /// Parent window feature.
    pub fn parent(handle: NativeHandle) -> Self {
        Self {
            uri: PARENT_FEATURE,
            data: FeatureData::Handle(handle),
        }
    }

    /// Resize feature.
    pub fn resize(host: &'a mut dyn ResizeHost) -> Self {
        Self {
            uri: RESIZE_FEATURE,
            data: FeatureData::Resize(host),
        }
    }
}

/// Features the editor uses, picked out of the host's list.
#[derive(Default)]
pub struct HostFeatures<'a> {
    /// Window to embed into. `None` opens a top-level window.
    pub parent: Option<NativeHandle>,
    /// Resize callback.
    pub resize: Option<&'a mut dyn ResizeHost>,
}

/// Scan the host's feature list. Unknown URIs and mismatched payloads are skipped.
pub fn parse_features<'a>(features: impl IntoIterator<Item = Feature<'a>>) -> HostFeatures<'a> {
    let mut parsed = HostFeatures::default();
    for feature in features {
        match (feature.uri, feature.data) {
            (PARENT_FEATURE, FeatureData::Handle(handle)) => parsed.parent = Some(handle),
            (RESIZE_FEATURE, FeatureData::Resize(host)) => parsed.resize = Some(host),
            (uri, _) => tracing::trace!(uri, "host feature ignored"),
        }
    }
    parsed
}

/// Reasons an editor cannot be instantiated.
#[derive(Debug, Error)]
pub enum InstantiateError {
    /// The UI URI names no known editor.
    #[error("unknown editor URI '{0}'")]
    UnknownPanel(String),

    /// The UI URI's backend suffix names no available backend.
    #[error("can't select appropriate backend for '{0}'")]
    UnsupportedBackend(String),

    /// The editor's panel definition is invalid.
    #[error(transparent)]
    Panel(#[from] PanelError),

    /// Backend or window construction failed.
    #[error(transparent)]
    Ui(#[from] UiError),
}

/// A live editor.
#[derive(Debug)]
pub struct UiInstance {
    descriptor: &'static PanelDescriptor,
    window: Window,
}

impl UiInstance {
    /// Native handle the host embeds.
    pub fn widget(&self) -> Option<NativeHandle> {
        self.window.native_handle()
    }

    /// Descriptor the instance was built from.
    pub fn descriptor(&self) -> &'static PanelDescriptor {
        self.descriptor
    }

    /// Editor window size.
    pub fn size(&self) -> Size {
        self.window.size()
    }

    /// The window behind this instance.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Host parameter change.
    pub fn port_event(&mut self, port: u32, size: u32, format: u32, payload: &[u8]) {
        self.window.port_event(port, size, format, payload);
    }

    /// Drain pending input and redraw when needed. Returns true if a frame
    /// was presented.
    pub fn update(&mut self) -> bool {
        self.window.update()
    }

    /// Idle callback. Always returns 0 (keep going).
    pub fn idle(&mut self) -> i32 {
        self.update();
        0
    }

    /// Tear the editor down, releasing its native resources.
    pub fn cleanup(self) {
        tracing::debug!(uri = self.descriptor.uri, "editor cleanup");
        drop(self);
    }
}

/// Instantiate the editor addressed by `ui_uri`.
///
/// Picks the backend from the URI suffix, builds the panel, opens its window
/// under the parent feature and announces the size through the resize
/// feature when one is offered.
pub fn try_instantiate<'a>(
    ctx: &UiContext,
    ui_uri: &str,
    write: HostWrite,
    features: impl IntoIterator<Item = Feature<'a>>,
) -> Result<UiInstance, InstantiateError> {
    let (plugin_uri, backend) = panels::split_ui_uri(ui_uri)
        .ok_or_else(|| InstantiateError::UnsupportedBackend(ui_uri.to_owned()))?;
    let descriptor = panels::find(plugin_uri)
        .ok_or_else(|| InstantiateError::UnknownPanel(ui_uri.to_owned()))?;

    select_backend(ctx, backend)?;

    let panel = (descriptor.build)().build()?;
    let features = parse_features(features);
    let window = Window::open(ctx, panel, features.parent, write)?;

    if let Some(resize) = features.resize {
        let size = window.size();
        let status = resize.ui_resize(size.width, size.height);
        tracing::debug!(width = size.width, height = size.height, status, "resize announced");
    }

    tracing::info!(uri = ui_uri, "editor instantiated");
    Ok(UiInstance { descriptor, window })
}

/// [`try_instantiate`], reporting failure through the context's last-error slot.
pub fn instantiate<'a>(
    ctx: &UiContext,
    ui_uri: &str,
    write: HostWrite,
    features: impl IntoIterator<Item = Feature<'a>>,
) -> Option<UiInstance> {
    match try_instantiate(ctx, ui_uri, write, features) {
        Ok(instance) => Some(instance),
        Err(err) => {
            tracing::error!(uri = ui_uri, error = %err, "editor instantiation failed");
            ctx.set_error(err.to_string());
            None
        }
    }
}

fn select_backend(ctx: &UiContext, name: &str) -> Result<(), InstantiateError> {
    // Keep a backend the caller already selected under this name.
    if ctx.backend_name() == Some(name) {
        return Ok(());
    }
    let selection = match name {
        native::NAME => native::selection(),
        HEADLESS_BACKEND => sofar_ui::HeadlessProbe::new().selection(),
        other => return Err(InstantiateError::UnsupportedBackend(other.to_owned())),
    };
    ctx.select_backend(selection)?;
    Ok(())
}

/// Table returned by [`extension_data`].
#[derive(Debug, Clone, Copy)]
pub struct IdleInterface {
    /// Idle callback.
    pub idle: fn(&mut UiInstance) -> i32,
}

/// Optional extension tables.
#[derive(Debug, Clone, Copy)]
pub enum Extension {
    /// Idle callback table.
    Idle(IdleInterface),
}

/// Look up an extension by URI. Only [`IDLE_INTERFACE`] is supported.
pub fn extension_data(uri: &str) -> Option<Extension> {
    (uri == IDLE_INTERFACE).then_some(Extension::Idle(IdleInterface {
        idle: UiInstance::idle,
    }))
}
