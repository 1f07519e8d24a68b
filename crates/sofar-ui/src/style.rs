//! Visual styling shared by every widget.
//!
//! The [`Style`] table is fixed for the lifetime of a [`UiContext`](crate::UiContext):
//! it is built once from [`UiConfig`](crate::UiConfig) and only read afterwards.
//! Widgets refer to colours by [`ColorIndex`] so panel definitions stay
//! independent of the concrete palette.

/// An RGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a colour from channel values.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from a packed `0xRRGGBB` value.
    pub const fn from_hex(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }

    /// Packed `0xRRGGBB` value.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Palette slot names.
///
/// Accent colours come in pairs: every accent is immediately followed by its
/// light variant, so [`ColorIndex::lighter`] is a step of one slot. Sliders and
/// dials rely on this to swap base and highlight colours while focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ColorIndex {
    /// Blue accent.
    AccentBlue = 0,
    /// Light blue accent.
    AccentLightBlue,
    /// Red accent.
    AccentRed,
    /// Light red accent.
    AccentLightRed,
    /// Summer green accent.
    AccentSummerGreen,
    /// Light summer green accent.
    AccentLightSummerGreen,
    /// Yellow accent.
    AccentYellow,
    /// Light yellow accent.
    AccentLightYellow,
    /// Winter green accent.
    AccentWinterGreen,
    /// Light winter green accent.
    AccentLightWinterGreen,
    /// Violet accent.
    AccentViolet,
    /// Light violet accent.
    AccentLightViolet,
    /// Window background.
    Dark0,
    /// Dark shade 1.
    Dark1,
    /// Dark shade 2.
    Dark2,
    /// Dark shade 3.
    Dark3,
    /// Light shade 0.
    Light0,
    /// Light shade 1.
    Light1,
    /// Light shade 2, the default control colour.
    #[default]
    Light2,
    /// Light shade 3, used for text.
    Light3,
}

impl ColorIndex {
    /// Number of palette slots.
    pub const COUNT: usize = 20;

    const ALL: [ColorIndex; Self::COUNT] = [
        ColorIndex::AccentBlue,
        ColorIndex::AccentLightBlue,
        ColorIndex::AccentRed,
        ColorIndex::AccentLightRed,
        ColorIndex::AccentSummerGreen,
        ColorIndex::AccentLightSummerGreen,
        ColorIndex::AccentYellow,
        ColorIndex::AccentLightYellow,
        ColorIndex::AccentWinterGreen,
        ColorIndex::AccentLightWinterGreen,
        ColorIndex::AccentViolet,
        ColorIndex::AccentLightViolet,
        ColorIndex::Dark0,
        ColorIndex::Dark1,
        ColorIndex::Dark2,
        ColorIndex::Dark3,
        ColorIndex::Light0,
        ColorIndex::Light1,
        ColorIndex::Light2,
        ColorIndex::Light3,
    ];

    /// The slot one step lighter, saturating at the last slot.
    pub const fn lighter(self) -> Self {
        let next = self as usize + 1;
        if next < Self::COUNT {
            Self::ALL[next]
        } else {
            self
        }
    }
}

/// The twenty palette colours, indexed by [`ColorIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette([Color; ColorIndex::COUNT]);

impl Palette {
    /// Colour at the given slot.
    pub fn get(&self, index: ColorIndex) -> Color {
        self.0[index as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.map(Color::from_hex))
    }
}

impl TryFrom<Vec<u32>> for Palette {
    type Error = crate::config::ConfigError;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        let len = values.len();
        let hex: [u32; ColorIndex::COUNT] = values
            .try_into()
            .map_err(|_| crate::config::ConfigError::PaletteLength {
                expected: ColorIndex::COUNT,
                found: len,
            })?;
        Ok(Self(hex.map(Color::from_hex)))
    }
}

const DEFAULT_PALETTE: [u32; ColorIndex::COUNT] = [
    0x608fbd, 0xaaccee, // blue
    0xbd608f, 0xeeaacc, // red
    0x8fbd60, 0xcceeaa, // summer green
    0xbd8f60, 0xeeccaa, // yellow
    0x60bd8f, 0xaaeecc, // winter green
    0x8f60bd, 0xccaaee, // violet
    0x202126, 0x28292f, 0x31333a, 0x383a42, // dark
    0xaeb5cd, 0xc3cbe7, 0xc8d0ec, 0xd7e0fe, // light
];

/// Process-wide style table.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Font family name handed to the native painter.
    pub font_face: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Palette colours.
    pub palette: Palette,
    /// Spacing between box children, also used as the outer window margin.
    pub spacing: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_face: "sans-serif".to_owned(),
            font_size: 13.0,
            palette: Palette::default(),
            spacing: 8,
        }
    }
}

impl Style {
    /// Resolve a palette slot.
    pub fn color(&self, index: ColorIndex) -> Color {
        self.palette.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let c = Color::from_hex(0x608fbd);
        assert_eq!(c, Color::from_rgb(0x60, 0x8f, 0xbd));
        assert_eq!(c.to_hex(), 0x608fbd);
    }

    #[test]
    fn lighter_steps_within_accent_pair() {
        assert_eq!(ColorIndex::AccentRed.lighter(), ColorIndex::AccentLightRed);
        assert_eq!(ColorIndex::Light2.lighter(), ColorIndex::Light3);
        assert_eq!(ColorIndex::Light3.lighter(), ColorIndex::Light3);
    }

    #[test]
    fn default_style_matches_reference_table() {
        let style = Style::default();
        assert_eq!(style.spacing, 8);
        assert_eq!(style.font_size, 13.0);
        assert_eq!(style.color(ColorIndex::Dark0).to_hex(), 0x202126);
        assert_eq!(style.color(ColorIndex::Light3).to_hex(), 0xd7e0fe);
        assert_eq!(style.color(ColorIndex::AccentViolet).to_hex(), 0x8f60bd);
    }

    #[test]
    fn palette_rejects_wrong_length() {
        let err = Palette::try_from(vec![0x000000; 3]).unwrap_err();
        assert!(err.to_string().contains("20"), "got: {err}");
    }
}
