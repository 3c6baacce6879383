//! Palette registry: the fixed catalog of named color schemes.
//!
//! Every palette carries one [`ColorSet`] per [`Mode`]. The registry is plain
//! static data; lookups are indexed by [`PaletteName`] and cannot fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ColorSet, Mode, RgbColor};

/// Identifier of one registered palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteName {
    /// Navy and signal green, the house palette
    #[default]
    Security,
    /// Electric blue and violet
    Tech,
    /// Teal and sea blue
    Ocean,
    /// Moss and pine greens
    Forest,
    /// Amber and coral
    Sunset,
    /// Deep indigo with lavender accents
    Midnight,
    /// Greyscale only
    Monochrome,
    /// Dark red and rose
    Crimson,
}

impl PaletteName {
    /// All palette names in registry order.
    pub const ALL: [Self; 8] = [
        Self::Security,
        Self::Tech,
        Self::Ocean,
        Self::Forest,
        Self::Sunset,
        Self::Midnight,
        Self::Monochrome,
        Self::Crimson,
    ];

    /// Identifier used for persistence and the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Tech => "tech",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
            Self::Sunset => "sunset",
            Self::Midnight => "midnight",
            Self::Monochrome => "monochrome",
            Self::Crimson => "crimson",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Returns the registry entry for this name.
    #[must_use]
    pub fn palette(self) -> &'static Palette {
        &PALETTES[self.index()]
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no registered palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown palette '{0}'")]
pub struct UnknownPalette(pub String);

impl FromStr for PaletteName {
    type Err = UnknownPalette;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownPalette(s.to_string()))
    }
}

/// One named color scheme with its dark and light variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Registry identifier
    pub name: PaletteName,
    /// Human-readable label
    pub display_name: &'static str,
    /// Colors used in dark mode
    pub dark: ColorSet,
    /// Colors used in light mode
    pub light: ColorSet,
}

impl Palette {
    /// Returns the color set for `mode`.
    #[must_use]
    pub const fn colors(&self, mode: Mode) -> &ColorSet {
        match mode {
            Mode::Dark => &self.dark,
            Mode::Light => &self.light,
        }
    }
}

#[allow(clippy::too_many_arguments)]
const fn set(
    background: u32,
    surface: u32,
    primary: u32,
    secondary: u32,
    accent: u32,
    text: u32,
    text_secondary: u32,
    border: u32,
) -> ColorSet {
    ColorSet {
        background: RgbColor::from_u32(background),
        surface: RgbColor::from_u32(surface),
        primary: RgbColor::from_u32(primary),
        secondary: RgbColor::from_u32(secondary),
        accent: RgbColor::from_u32(accent),
        text: RgbColor::from_u32(text),
        text_secondary: RgbColor::from_u32(text_secondary),
        border: RgbColor::from_u32(border),
    }
}

/// The palette registry, indexed by `PaletteName as usize`.
pub static PALETTES: [Palette; 8] = [
    Palette {
        name: PaletteName::Security,
        display_name: "Security",
        dark: set(
            0x0A_0F_1C, 0x13_1B_2E, 0x22_C5_5E, 0x38_BD_F8, 0xF5_9E_0B, 0xE2_E8_F0, 0x94_A3_B8,
            0x1E_29_3B,
        ),
        light: set(
            0xF8_FA_FC, 0xFF_FF_FF, 0x15_80_3D, 0x02_84_C7, 0xB4_53_09, 0x0F_17_2A, 0x47_55_69,
            0xCB_D5_E1,
        ),
    },
    Palette {
        name: PaletteName::Tech,
        display_name: "Tech",
        dark: set(
            0x0B_10_20, 0x16_1D_33, 0x3B_82_F6, 0x8B_5C_F6, 0x06_B6_D4, 0xF1_F5_F9, 0x9C_A3_AF,
            0x27_30_4A,
        ),
        light: set(
            0xF5_F7_FF, 0xFF_FF_FF, 0x1D_4E_D8, 0x6D_28_D9, 0x08_91_B2, 0x11_18_27, 0x4B_55_63,
            0xD1_D5_F0,
        ),
    },
    Palette {
        name: PaletteName::Ocean,
        display_name: "Ocean",
        dark: set(
            0x04_1C_24, 0x0B_2A_35, 0x14_B8_A6, 0x0E_A5_E9, 0x67_E8_F9, 0xE0_F2_FE, 0x8F_B8_C4,
            0x16_3B_48,
        ),
        light: set(
            0xF0_FD_FA, 0xFF_FF_FF, 0x0F_76_6E, 0x03_69_A1, 0x0E_74_90, 0x0C_2A_33, 0x40_5F_68,
            0xB9_E3_DF,
        ),
    },
    Palette {
        name: PaletteName::Forest,
        display_name: "Forest",
        dark: set(
            0x0C_17_10, 0x15_24_1A, 0x4A_DE_80, 0x84_CC_16, 0xFA_CC_15, 0xEC_FD_F5, 0x9D_B5_A4,
            0x23_3A_2A,
        ),
        light: set(
            0xF4_FA_F4, 0xFF_FF_FF, 0x16_65_34, 0x4D_7C_0F, 0xA1_62_07, 0x14_2A_1C, 0x4A_5E_50,
            0xC6_DD_CB,
        ),
    },
    Palette {
        name: PaletteName::Sunset,
        display_name: "Sunset",
        dark: set(
            0x1A_0F_0A, 0x2A_19_12, 0xF9_73_16, 0xF4_3F_5E, 0xFB_BF_24, 0xFF_F7_ED, 0xC4_A5_93,
            0x40_2A_1F,
        ),
        light: set(
            0xFF_FB_F5, 0xFF_FF_FF, 0xC2_41_0C, 0xBE_12_3C, 0xB4_53_09, 0x2B_17_0E, 0x6B_4E_3D,
            0xF1_D5_C0,
        ),
    },
    Palette {
        name: PaletteName::Midnight,
        display_name: "Midnight",
        dark: set(
            0x09_08_1A, 0x13_11_2B, 0x81_8C_F8, 0xC0_84_FC, 0xF4_72_B6, 0xED_E9_FE, 0xA5_A1_C8,
            0x24_20_45,
        ),
        light: set(
            0xF7_F6_FF, 0xFF_FF_FF, 0x43_38_CA, 0x7E_22_CE, 0xBE_18_5D, 0x1E_1B_4B, 0x52_50_75,
            0xD8_D4_F5,
        ),
    },
    Palette {
        name: PaletteName::Monochrome,
        display_name: "Monochrome",
        dark: set(
            0x0A_0A_0A, 0x17_17_17, 0xFA_FA_FA, 0xD4_D4_D4, 0xA3_A3_A3, 0xF5_F5_F5, 0xA3_A3_A3,
            0x26_26_26,
        ),
        light: set(
            0xFA_FA_FA, 0xFF_FF_FF, 0x17_17_17, 0x40_40_40, 0x52_52_52, 0x0A_0A_0A, 0x52_52_52,
            0xD4_D4_D4,
        ),
    },
    Palette {
        name: PaletteName::Crimson,
        display_name: "Crimson",
        dark: set(
            0x14_07_0A, 0x22_0E_13, 0xEF_44_44, 0xFB_71_85, 0xFD_BA_74, 0xFE_F2_F2, 0xB8_9A_A0,
            0x3B_18_20,
        ),
        light: set(
            0xFF_F7_F7, 0xFF_FF_FF, 0xB9_1C_1C, 0xBE_12_3C, 0xC2_41_0C, 0x2A_0B_10, 0x6B_4A_50,
            0xF2_CC_D2,
        ),
    },
];
