//! Declarative panel definitions and the arena-backed widget tree.
//!
//! A plugin describes its control surface once as a [`PanelDef`], a plain
//! nested value built from [`ElementDef`] constructors:
//!
//! ```
//! use sofar_ui::{Align, ColorIndex, ElementDef, PanelDef};
//!
//! let def = PanelDef::new(ElementDef::vbox([
//!     ElementDef::label("Repeat Count").halign(Align::Start),
//!     ElementDef::slider(1.0, 1.0, 5.0).color(ColorIndex::AccentRed).port(0),
//! ]));
//! let panel = def.build().unwrap();
//! assert_eq!(panel.len(), 3);
//! ```
//!
//! [`PanelDef::build`] validates the definition and flattens it into a
//! [`Panel`]: every node lives in one `Vec`, laid out breadth-first so the
//! children of a box occupy a contiguous index range. Nodes are addressed by
//! [`WidgetId`]. The shape never changes after the build; only widget values
//! and layout geometry are written afterwards.

use std::collections::VecDeque;
use std::fmt;

use crate::canvas::Canvas;
use crate::error::PanelError;
use crate::geometry::Rect;
use crate::param_bridge::{MAX_PARAMS, ParamIndex};
use crate::style::{ColorIndex, Style};
use crate::widget::{
    Align, Button, Container, Dial, DialRadius, Label, Layout, Orientation, RenderCx, Separator,
    Slider, Unit, ValueRange, WidgetKind,
};

/// Longest label or button text accepted, in bytes.
pub const MAX_TEXT_LEN: usize = 255;

/// Characters of offending text quoted in [`PanelError::TextTooLong`].
const PREVIEW_CHARS: usize = 16;

// ── Definitions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct ValueDef {
    start: f32,
    step: f32,
    end: f32,
    unit: Unit,
    color: ColorIndex,
}

impl ValueDef {
    fn new(start: f32, step: f32, end: f32) -> Self {
        Self {
            start,
            step,
            end,
            unit: Unit::Plain,
            color: ColorIndex::Light2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ElementKind {
    Label(String),
    Box {
        orientation: Orientation,
        children: Vec<ElementDef>,
    },
    Separator {
        orientation: Orientation,
        length: i32,
    },
    Button(String),
    Slider(ValueDef),
    Dial {
        value: ValueDef,
        radius: DialRadius,
    },
}

/// One element of a panel definition.
///
/// Modifiers that do not apply to an element's kind (a colour on a label, a
/// radius on a slider) are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDef {
    kind: ElementKind,
    halign: Align,
    valign: Align,
    port: Option<u32>,
}

impl ElementDef {
    fn with_kind(kind: ElementKind) -> Self {
        Self {
            kind,
            halign: Align::Center,
            valign: Align::Center,
            port: None,
        }
    }

    /// Static text.
    pub fn label(text: impl Into<String>) -> Self {
        Self::with_kind(ElementKind::Label(text.into()))
    }

    /// Box stacking `children` top to bottom.
    pub fn vbox(children: impl IntoIterator<Item = ElementDef>) -> Self {
        Self::with_kind(ElementKind::Box {
            orientation: Orientation::Vertical,
            children: children.into_iter().collect(),
        })
    }

    /// Box stacking `children` left to right.
    pub fn hbox(children: impl IntoIterator<Item = ElementDef>) -> Self {
        Self::with_kind(ElementKind::Box {
            orientation: Orientation::Horizontal,
            children: children.into_iter().collect(),
        })
    }

    /// Separator line of `length` pixels.
    pub fn separator(orientation: Orientation, length: i32) -> Self {
        Self::with_kind(ElementKind::Separator {
            orientation,
            length,
        })
    }

    /// Momentary push button.
    pub fn button(text: impl Into<String>) -> Self {
        Self::with_kind(ElementKind::Button(text.into()))
    }

    /// Slider over `[start, end]` in increments of `step`.
    pub fn slider(start: f32, step: f32, end: f32) -> Self {
        Self::with_kind(ElementKind::Slider(ValueDef::new(start, step, end)))
    }

    /// Dial over `[start, end]` in increments of `step`.
    pub fn dial(start: f32, step: f32, end: f32) -> Self {
        Self::with_kind(ElementKind::Dial {
            value: ValueDef::new(start, step, end),
            radius: DialRadius::Normal,
        })
    }

    /// Horizontal alignment inside the parent box.
    #[must_use]
    pub fn halign(mut self, align: Align) -> Self {
        self.halign = align;
        self
    }

    /// Vertical alignment inside the parent box.
    #[must_use]
    pub fn valign(mut self, align: Align) -> Self {
        self.valign = align;
        self
    }

    /// Bind to a host control-parameter index.
    #[must_use]
    pub fn port(mut self, port: u32) -> Self {
        self.port = Some(port);
        self
    }

    /// Accent colour of a slider or dial.
    #[must_use]
    pub fn color(mut self, color: ColorIndex) -> Self {
        if let Some(def) = self.value_def_mut() {
            def.color = color;
        }
        self
    }

    /// Display unit of a slider or dial.
    #[must_use]
    pub fn unit(mut self, unit: Unit) -> Self {
        if let Some(def) = self.value_def_mut() {
            def.unit = unit;
        }
        self
    }

    /// Size preset of a dial.
    #[must_use]
    pub fn radius(mut self, preset: DialRadius) -> Self {
        if let ElementKind::Dial { radius, .. } = &mut self.kind {
            *radius = preset;
        }
        self
    }

    fn value_def_mut(&mut self) -> Option<&mut ValueDef> {
        match &mut self.kind {
            ElementKind::Slider(def) | ElementKind::Dial { value: def, .. } => Some(def),
            _ => None,
        }
    }

    fn children(&self) -> &[ElementDef] {
        match &self.kind {
            ElementKind::Box { children, .. } => children,
            _ => &[],
        }
    }

    fn build_kind(&self) -> Result<WidgetKind, PanelError> {
        let kind = match &self.kind {
            ElementKind::Label(text) => {
                check_text(text)?;
                WidgetKind::Label(Label::new(text.as_str()).with_align(self.halign, self.valign))
            }
            ElementKind::Box { orientation, .. } => WidgetKind::Box(Container::new(*orientation)),
            ElementKind::Separator {
                orientation,
                length,
            } => WidgetKind::Separator(Separator::new(*orientation, *length)),
            ElementKind::Button(text) => {
                check_text(text)?;
                WidgetKind::Button(Button::new(text.as_str()))
            }
            ElementKind::Slider(def) => WidgetKind::Slider(
                Slider::new(ValueRange::new(def.start, def.step, def.end)?)
                    .with_unit(def.unit)
                    .with_color(def.color),
            ),
            ElementKind::Dial { value, radius } => WidgetKind::Dial(
                Dial::new(ValueRange::new(value.start, value.step, value.end)?)
                    .with_unit(value.unit)
                    .with_color(value.color)
                    .with_radius(*radius),
            ),
        };
        Ok(kind)
    }
}

fn check_text(text: &str) -> Result<(), PanelError> {
    if text.len() > MAX_TEXT_LEN {
        return Err(PanelError::TextTooLong {
            preview: text.chars().take(PREVIEW_CHARS).collect(),
            len: text.len(),
            limit: MAX_TEXT_LEN,
        });
    }
    Ok(())
}

/// A complete panel definition with a single root element.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelDef {
    root: ElementDef,
}

impl PanelDef {
    /// Wrap a root element.
    pub fn new(root: ElementDef) -> Self {
        Self { root }
    }

    /// Root element.
    pub fn root(&self) -> &ElementDef {
        &self.root
    }

    /// Validate and flatten into a widget tree.
    pub fn build(&self) -> Result<Panel, PanelError> {
        Panel::build(self)
    }
}

// ── Arena ───────────────────────────────────────────────────────────────────

/// Index of a node in a [`Panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u32);

impl WidgetId {
    /// Arena index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Self {
        // Panels are bounded by their static definitions, far below u32::MAX.
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    kind: WidgetKind,
    layout: Layout,
    port: Option<ParamIndex>,
    first_child: usize,
    child_count: usize,
}

/// A built widget tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    nodes: Vec<Node>,
}

impl Panel {
    /// The root node.
    pub const ROOT: WidgetId = WidgetId(0);

    /// Validate `def` and flatten it breadth-first.
    pub fn build(def: &PanelDef) -> Result<Self, PanelError> {
        let mut nodes = Vec::new();
        let mut bound = [false; MAX_PARAMS];
        let mut queue = VecDeque::new();

        nodes.push(make_node(&def.root, &mut bound)?);
        queue.push_back((&def.root, 0usize));

        while let Some((element, index)) = queue.pop_front() {
            let children = element.children();
            let first_child = nodes.len();
            for child in children {
                queue.push_back((child, nodes.len()));
                nodes.push(make_node(child, &mut bound)?);
            }
            let node = &mut nodes[index];
            node.first_child = first_child;
            node.child_count = children.len();
        }

        tracing::debug!(nodes = nodes.len(), "panel built");
        Ok(Self { nodes })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a panel has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        (0..self.nodes.len()).map(WidgetId::from_index)
    }

    /// Direct children of `id`, in declaration order.
    pub fn children(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + use<> {
        let node = &self.nodes[id.index()];
        (node.first_child..node.first_child + node.child_count).map(WidgetId::from_index)
    }

    /// Widget at `id`.
    pub fn kind(&self, id: WidgetId) -> &WidgetKind {
        &self.nodes[id.index()].kind
    }

    /// Mutable widget at `id`.
    pub fn kind_mut(&mut self, id: WidgetId) -> &mut WidgetKind {
        &mut self.nodes[id.index()].kind
    }

    /// Layout state of `id`.
    pub fn layout(&self, id: WidgetId) -> &Layout {
        &self.nodes[id.index()].layout
    }

    pub(crate) fn layout_mut(&mut self, id: WidgetId) -> &mut Layout {
        &mut self.nodes[id.index()].layout
    }

    /// Window-space bounds of `id`.
    pub fn rect(&self, id: WidgetId) -> Rect {
        self.layout(id).rect()
    }

    /// Parameter bound to `id`.
    pub fn port(&self, id: WidgetId) -> Option<ParamIndex> {
        self.nodes[id.index()].port
    }

    /// Every bound `(parameter, widget)` pair.
    pub fn bindings(&self) -> impl Iterator<Item = (ParamIndex, WidgetId)> + '_ {
        self.ids().filter_map(|id| self.port(id).map(|port| (port, id)))
    }

    /// Current value of `id`, for value-holding widgets.
    pub fn value(&self, id: WidgetId) -> Option<f32> {
        self.kind(id).as_widget().value()
    }

    /// Overwrite the value of `id`, clamped and quantized.
    pub fn set_value(&mut self, id: WidgetId, value: f32) {
        self.kind_mut(id).as_widget_mut().set_value(value);
    }

    /// Widget bound to `port`, if any.
    pub fn find_by_port(&self, port: ParamIndex) -> Option<WidgetId> {
        self.bindings().find(|(p, _)| *p == port).map(|(_, id)| id)
    }

    /// Draw the tree depth-first into `canvas`.
    pub fn render(&self, canvas: &mut Canvas, style: &Style, focus: Option<WidgetId>) {
        self.render_node(Self::ROOT, canvas, style, focus);
    }

    fn render_node(
        &self,
        id: WidgetId,
        canvas: &mut Canvas,
        style: &Style,
        focus: Option<WidgetId>,
    ) {
        let node = &self.nodes[id.index()];
        let cx = RenderCx {
            style,
            focused: focus == Some(id),
        };
        node.kind.as_widget().render(node.layout.rect(), canvas, &cx);
        for child in self.children(id) {
            self.render_node(child, canvas, style, focus);
        }
    }
}

fn make_node(element: &ElementDef, bound: &mut [bool; MAX_PARAMS]) -> Result<Node, PanelError> {
    let kind = element.build_kind()?;
    let port = match element.port {
        None => None,
        Some(port) => {
            let slot = usize::try_from(port)
                .ok()
                .filter(|&slot| slot < MAX_PARAMS)
                .ok_or(PanelError::PortOutOfRange {
                    port,
                    limit: MAX_PARAMS,
                })?;
            if !kind.is_bindable() {
                return Err(PanelError::NotBindable {
                    kind: kind.as_widget().kind_name(),
                    port,
                });
            }
            if std::mem::replace(&mut bound[slot], true) {
                return Err(PanelError::DuplicateBinding(port));
            }
            Some(ParamIndex(port))
        }
    };
    Ok(Node {
        kind,
        layout: Layout {
            halign: element.halign,
            valign: element.valign,
            ..Layout::default()
        },
        port,
        first_child: 0,
        child_count: 0,
    })
}
