//! Editor panels of the sofar effect family.
//!
//! Each effect ships one [`PanelDescriptor`]: the effect's plugin URI plus a
//! function building its panel definition. A host addresses an editor by the
//! UI URI `<plugin uri>#ui-<backend>`, for example
//! `http://fanfavoritessofar.com/eq4bp#ui-x11`.

use sofar_ui::{Align, ColorIndex, DialRadius, ElementDef, Orientation, PanelDef, Unit};

/// Separator between a UI URI's plugin part and its backend name.
pub const UI_URI_MARKER: &str = "#ui-";

/// Plugin URI of the four-band parametric equalizer.
pub const EQ4BP_URI: &str = "http://fanfavoritessofar.com/eq4bp";

/// Plugin URI of the bitcrusher.
pub const BITCRUSHER_URI: &str = "http://fanfavoritessofar.com/bitcrusher";

/// An effect's editor.
#[derive(Debug, Clone, Copy)]
pub struct PanelDescriptor {
    /// Effect plugin URI.
    pub uri: &'static str,
    /// Short name used on the command line.
    pub name: &'static str,
    /// Builds the panel definition.
    pub build: fn() -> PanelDef,
}

impl PanelDescriptor {
    /// UI URI of this editor on `backend`.
    pub fn ui_uri(&self, backend: &str) -> String {
        format!("{}{UI_URI_MARKER}{backend}", self.uri)
    }
}

/// Every editor, in descriptor order.
pub const PANELS: &[PanelDescriptor] = &[
    PanelDescriptor {
        uri: EQ4BP_URI,
        name: "eq4bp",
        build: eq4bp,
    },
    PanelDescriptor {
        uri: BITCRUSHER_URI,
        name: "bitcrusher",
        build: bitcrusher,
    },
];

/// Descriptor at `index`, as a host enumerates them.
pub fn descriptor(index: usize) -> Option<&'static PanelDescriptor> {
    PANELS.get(index)
}

/// Descriptor for a plugin URI.
pub fn find(uri: &str) -> Option<&'static PanelDescriptor> {
    PANELS.iter().find(|panel| panel.uri == uri)
}

/// Descriptor by short name.
pub fn find_by_name(name: &str) -> Option<&'static PanelDescriptor> {
    PANELS.iter().find(|panel| panel.name == name)
}

/// Split a UI URI into its plugin URI and backend name.
pub fn split_ui_uri(ui_uri: &str) -> Option<(&str, &str)> {
    let (plugin, backend) = ui_uri.rsplit_once(UI_URI_MARKER)?;
    (!plugin.is_empty() && !backend.is_empty()).then_some((plugin, backend))
}

const SEPARATOR_LENGTH: i32 = 280;

fn frequency_dial(port: u32, color: ColorIndex) -> ElementDef {
    ElementDef::dial(1.0, 20.0, 20000.0)
        .color(color)
        .unit(Unit::Frequency)
        .radius(DialRadius::Large)
        .port(port)
}

fn width_dial(port: u32, color: ColorIndex) -> ElementDef {
    ElementDef::dial(0.1, 0.025, 2.0)
        .color(color)
        .radius(DialRadius::Large)
        .port(port)
}

fn gain_dial(port: u32, color: ColorIndex) -> ElementDef {
    ElementDef::dial(-12.0, 0.25, 12.0)
        .color(color)
        .unit(Unit::Decibel)
        .radius(DialRadius::Large)
        .port(port)
}

/// Shelf filters have no width control.
fn shelf_column(frequency: u32, gain: u32, color: ColorIndex) -> ElementDef {
    ElementDef::vbox([
        ElementDef::label("Frequency"),
        frequency_dial(frequency, color),
        ElementDef::label("Gain"),
        gain_dial(gain, color),
    ])
}

fn bell_column(frequency: u32, width: u32, gain: u32, color: ColorIndex) -> ElementDef {
    ElementDef::vbox([
        ElementDef::label("Frequency"),
        frequency_dial(frequency, color),
        ElementDef::label("Width / Q"),
        width_dial(width, color),
        ElementDef::label("Gain"),
        gain_dial(gain, color),
    ])
}

/// Four filter columns followed by input and output gain.
pub fn eq4bp() -> PanelDef {
    let separator = || ElementDef::separator(Orientation::Vertical, SEPARATOR_LENGTH);
    PanelDef::new(ElementDef::vbox([ElementDef::hbox([
        shelf_column(4, 6, ColorIndex::AccentRed),
        separator(),
        bell_column(7, 8, 9, ColorIndex::AccentYellow),
        separator(),
        bell_column(10, 11, 12, ColorIndex::AccentSummerGreen),
        separator(),
        shelf_column(13, 15, ColorIndex::AccentBlue),
        separator(),
        ElementDef::vbox([
            ElementDef::label("Input"),
            ElementDef::dial(-12.0, 0.25, 12.0)
                .unit(Unit::Decibel)
                .port(16),
            ElementDef::label("Output"),
            ElementDef::dial(-12.0, 0.26, 12.0)
                .unit(Unit::Decibel)
                .port(17),
        ]),
    ])]))
}

/// Repeat count and bit rate sliders.
pub fn bitcrusher() -> PanelDef {
    PanelDef::new(ElementDef::vbox([
        ElementDef::label("Repeat Count").halign(Align::Start),
        ElementDef::slider(1.0, 1.0, 5.0)
            .color(ColorIndex::AccentRed)
            .port(0),
        ElementDef::label("Bit Rate").halign(Align::Start),
        ElementDef::slider(0.0, 1.0, 16.0)
            .color(ColorIndex::AccentYellow)
            .port(1),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sofar_ui::{ParamIndex, Size, Style, layout};

    #[test]
    fn every_panel_builds() {
        for panel in PANELS {
            let built = (panel.build)().build();
            assert!(built.is_ok(), "{}: {:?}", panel.name, built.err());
        }
    }

    #[test]
    fn eq4bp_binds_expected_ports() {
        let panel = eq4bp().build().unwrap();
        let mut ports: Vec<u32> = panel.bindings().map(|(port, _)| port.0).collect();
        ports.sort_unstable();
        assert_eq!(ports, [4, 6, 7, 8, 9, 10, 11, 12, 13, 15, 16, 17]);
    }

    #[test]
    fn bitcrusher_window_size() {
        let mut panel = bitcrusher().build().unwrap();
        assert_eq!(layout(&mut panel, &Style::default()), Size::new(272, 152));
        assert!(panel.find_by_port(ParamIndex(1)).is_some());
    }

    #[test]
    fn output_dial_tops_out_below_end() {
        let panel = eq4bp().build().unwrap();
        let id = panel.find_by_port(ParamIndex(17)).unwrap();
        let range = panel.kind(id).range().unwrap();
        let top = range.quantize(12.0);
        assert!((top - 11.92).abs() < 1e-3, "got {top}");
    }

    #[test]
    fn ui_uris_round_trip_through_split() {
        let uri = PANELS[0].ui_uri("x11");
        assert_eq!(uri, "http://fanfavoritessofar.com/eq4bp#ui-x11");
        assert_eq!(split_ui_uri(&uri), Some((EQ4BP_URI, "x11")));
        assert_eq!(split_ui_uri(EQ4BP_URI), None);
        assert_eq!(split_ui_uri("http://x#ui-"), None);
    }

    #[test]
    fn lookup_by_uri_index_and_name() {
        assert_eq!(find(BITCRUSHER_URI).map(|p| p.name), Some("bitcrusher"));
        assert_eq!(descriptor(0).map(|p| p.uri), Some(EQ4BP_URI));
        assert!(descriptor(2).is_none());
        assert_eq!(find_by_name("eq4bp").map(|p| p.uri), Some(EQ4BP_URI));
    }
}
