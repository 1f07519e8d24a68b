//! Baseview [`WindowHandler`] that paints presented frames with egui.
//!
//! Each native window runs its own handler on the window's event thread:
//!
//! 1. `on_event` translates pointer input and forwards it to the backend's
//!    event source.
//! 2. `on_frame` picks up the latest presented draw list, replays it through
//!    an egui painter, tessellates and renders via `egui_glow::Painter`.
//!
//! The handler never touches the widget tree. Everything it knows about the
//! panel arrives as a finished draw list.

use std::sync::Arc;

use baseview::{Event as BvEvent, EventStatus, Window, WindowHandler};
use crossbeam_channel::Sender;
use egui::{Context, LayerId, Pos2, RawInput, Rect, Vec2};
use parking_lot::Mutex;
use raw_window_handle::{HasRawWindowHandle, RawWindowHandle};
use sofar_ui::{DrawCommand, Event, EventSender, NativeHandle, Point, WindowKey};

use super::{paint, translate};

/// State shared between the backend on the UI thread and one handler.
#[derive(Debug, Default)]
pub struct SharedWindow {
    /// Latest frame presented and not yet painted.
    pub frame: Mutex<Option<Vec<DrawCommand>>>,
    /// Set when the window should close.
    pub close: Mutex<bool>,
}

/// What the handler reports once its window exists.
pub type OpenResult = Result<NativeHandle, String>;

/// Parameters fixed when the window is opened.
pub struct HandlerConfig {
    pub key: WindowKey,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub font_size: f32,
    pub events: EventSender,
    pub shared: Arc<SharedWindow>,
    pub opened: Sender<OpenResult>,
}

struct Gl {
    gl: Arc<glow::Context>,
    painter: egui_glow::Painter,
}

/// Handler for one toolkit window.
pub struct FrameHandler {
    config: HandlerConfig,
    ctx: Context,
    gl: Option<Gl>,
    commands: Vec<DrawCommand>,
    physical_width: u32,
    physical_height: u32,
    pointer: Point,
}

impl FrameHandler {
    /// Build the handler inside baseview's window-creation callback.
    ///
    /// GL setup failures are reported through `config.opened`; the handler
    /// then stays inert until the backend closes it.
    pub fn build(window: &mut Window<'_>, config: HandlerConfig) -> Self {
        let physical_width = (f64::from(config.width) * config.scale) as u32;
        let physical_height = (f64::from(config.height) * config.scale) as u32;

        let gl = match init_gl(window) {
            Ok(gl) => {
                let handle = native_handle(window.raw_window_handle());
                let _ = config.opened.send(Ok(handle));
                // The first frame only needs a repaint.
                config.events.send(config.key, Event::Map);
                Some(gl)
            }
            Err(reason) => {
                let _ = config.opened.send(Err(reason));
                None
            }
        };

        Self {
            config,
            ctx: Context::default(),
            gl,
            commands: Vec::new(),
            physical_width,
            physical_height,
            pointer: Point::ZERO,
        }
    }

    fn paint(&mut self, window: &mut Window<'_>) {
        let Some(gl) = self.gl.as_mut() else {
            return;
        };
        let Some(gl_context) = window.gl_context() else {
            return;
        };
        #[allow(unsafe_code)]
        // SAFETY: the context belongs to this window and is only made current
        // from its own event thread, once per frame.
        unsafe {
            gl_context.make_current();
        }

        let ppp = self.config.scale as f32;
        let raw_input = RawInput {
            screen_rect: Some(Rect::from_min_size(
                Pos2::ZERO,
                Vec2::new(
                    self.physical_width as f32 / ppp,
                    self.physical_height as f32 / ppp,
                ),
            )),
            ..RawInput::default()
        };

        let font_size = self.config.font_size;
        let commands = &self.commands;
        let full_output = self.ctx.run(raw_input, |ctx| {
            let painter = ctx.layer_painter(LayerId::background());
            for command in commands {
                paint::paint(&painter, command, font_size);
            }
        });
        let primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        #[allow(unsafe_code)]
        // SAFETY: the GL context was made current above on this thread.
        unsafe {
            use glow::HasContext;
            gl.gl
                .viewport(0, 0, self.physical_width as i32, self.physical_height as i32);
        }
        gl.painter.paint_and_update_textures(
            [self.physical_width, self.physical_height],
            full_output.pixels_per_point,
            &primitives,
            &full_output.textures_delta,
        );
        gl_context.swap_buffers();
    }
}

impl WindowHandler for FrameHandler {
    fn on_frame(&mut self, window: &mut Window<'_>) {
        if *self.config.shared.close.lock() {
            window.close();
            return;
        }
        let fresh = self.config.shared.frame.lock().take();
        if let Some(commands) = fresh {
            self.commands = commands;
            self.paint(window);
        }
    }

    fn on_event(&mut self, _window: &mut Window<'_>, event: BvEvent) -> EventStatus {
        let translated = match &event {
            BvEvent::Mouse(mouse) => {
                translate::translate_mouse(mouse, self.config.scale, &mut self.pointer)
            }
            BvEvent::Window(baseview::WindowEvent::Resized(info)) => {
                self.physical_width = info.physical_size().width;
                self.physical_height = info.physical_size().height;
                Some(Event::Expose)
            }
            BvEvent::Window(window_event) => translate::translate_window(window_event),
            BvEvent::Keyboard(_) => None,
        };
        match translated {
            Some(event) => {
                self.config.events.send(self.config.key, event);
                EventStatus::Captured
            }
            None => EventStatus::Ignored,
        }
    }
}

impl Drop for FrameHandler {
    fn drop(&mut self) {
        if let Some(gl) = self.gl.as_mut() {
            gl.painter.destroy();
        }
    }
}

fn init_gl(window: &mut Window<'_>) -> Result<Gl, String> {
    let gl_context = window
        .gl_context()
        .ok_or_else(|| "window has no OpenGL context".to_owned())?;

    #[allow(unsafe_code)]
    // SAFETY: the function pointers come from this window's GL context, which
    // outlives the glow context stored next to it in the handler.
    let gl = unsafe {
        gl_context.make_current();
        Arc::new(glow::Context::from_loader_function(|s| {
            gl_context.get_proc_address(s)
        }))
    };

    let painter = egui_glow::Painter::new(Arc::clone(&gl), "", None, false)
        .map_err(|err| format!("can't create egui painter: {err}"))?;
    Ok(Gl { gl, painter })
}

/// Numeric handle a host embeds, for the window systems baseview supports.
pub fn native_handle(raw: RawWindowHandle) -> NativeHandle {
    let value = match raw {
        RawWindowHandle::Xlib(h) => h.window as u64,
        RawWindowHandle::Xcb(h) => u64::from(h.window),
        RawWindowHandle::Win32(h) => h.hwnd as usize as u64,
        RawWindowHandle::AppKit(h) => h.ns_view as usize as u64,
        _ => 0,
    };
    NativeHandle(value)
}
