//! Seed → palette derivation and contrast rules.
//!
//! Everything here is a pure function of its arguments: the same seed picks the same theme
//! in every process, on every machine.

use crate::{
    foundation::math::Rng64,
    theme::color::Rgba8,
    theme::palette::{CLASSIC_THEMES, STUDIO_THEMES, Theme},
};

/// Family of preset palettes a scenario draws from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeSet {
    /// 3D hook palettes: neural, golden, quantum.
    #[default]
    Studio,
    /// Flat quiz palettes.
    Classic,
}

impl ThemeSet {
    /// Presets of this family.
    pub fn themes(self) -> &'static [Theme] {
        match self {
            Self::Studio => &STUDIO_THEMES,
            Self::Classic => &CLASSIC_THEMES,
        }
    }
}

/// How a seed maps onto an index of the theme set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeSelection {
    /// `seed % len`: consecutive seeds cycle through the set.
    #[default]
    Modulo,
    /// `floor(rng01(seed) * len)` from a SplitMix64 stream.
    Hashed,
}

/// Index into a set of `len` themes; `len` must be non-zero.
pub fn theme_index(seed: u64, len: usize, selection: ThemeSelection) -> usize {
    debug_assert!(len > 0);
    match selection {
        ThemeSelection::Modulo => usize::try_from(seed % len as u64).unwrap_or(0),
        ThemeSelection::Hashed => Rng64::for_purpose(seed, "theme").index(len),
    }
}

/// Preset of `set` picked by `seed`.
pub fn theme_for_seed(seed: u64, set: ThemeSet, selection: ThemeSelection) -> &'static Theme {
    let themes = set.themes();
    &themes[theme_index(seed, themes.len(), selection)]
}

/// Foreground tone picked for legibility over a background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTone {
    /// Dark text for light backgrounds.
    Black,
    /// Light text for dark backgrounds.
    White,
}

impl TextTone {
    /// Opaque color of this tone.
    pub fn color(self) -> Rgba8 {
        match self {
            Self::Black => Rgba8::BLACK,
            Self::White => Rgba8::WHITE,
        }
    }
}

/// Black on light backgrounds (luminance `> 0.5`), white otherwise.
pub fn contrast_text(background: Rgba8) -> TextTone {
    if background.luminance() > 0.5 {
        TextTone::Black
    } else {
        TextTone::White
    }
}

/// Contrast from hue (degrees) and lightness (`[0, 1]`) without converting to RGB.
///
/// Mid lightness is ambiguous; yellows and greens read lighter than their HSL value, so the
/// `[45, 200)` band gets black text.
pub fn contrast_for_hsl(hue: f64, lightness: f64) -> TextTone {
    if lightness > 0.6 {
        return TextTone::Black;
    }
    if lightness < 0.45 {
        return TextTone::White;
    }
    let hue = hue.rem_euclid(360.0);
    if (45.0..200.0).contains(&hue) {
        TextTone::Black
    } else {
        TextTone::White
    }
}

/// Seed-derived solid background for scenes without a preset palette.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GeneratedBackground {
    /// Degrees in `[0, 360)`.
    pub hue: f64,
    /// In `[0.55, 0.85)`.
    pub saturation: f64,
    /// In `[0.3, 0.7)`.
    pub lightness: f64,
    /// RGB form of the HSL triple.
    pub color: Rgba8,
    /// Legible text over `color`.
    pub text: TextTone,
}

/// Background for `seed`, drawn from its own random stream.
pub fn generated_background(seed: u64) -> GeneratedBackground {
    let mut rng = Rng64::for_purpose(seed, "background");
    let hue = rng.range_f64(0.0, 360.0);
    let saturation = rng.range_f64(0.55, 0.85);
    let lightness = rng.range_f64(0.3, 0.7);
    GeneratedBackground {
        hue,
        saturation,
        lightness,
        color: Rgba8::from_hsl(hue, saturation, lightness),
        text: contrast_for_hsl(hue, lightness),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/derive.rs"]
mod tests;
