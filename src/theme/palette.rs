use crate::theme::color::Rgba8;

/// Debris/tunnel primitive used by the 3D hook scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    /// Cube.
    Box,
    /// Four-faced pyramid.
    Tetrahedron,
    /// Ring.
    Torus,
}

/// One palette. Studio (3D hook) and classic (quiz overlay) presets share this shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Theme {
    /// Stable preset name.
    pub name: &'static str,
    /// Vertical background gradient, top then bottom.
    pub background: [Rgba8; 2],
    /// Light, slate and headline glow of the hook.
    pub accent_primary: Rgba8,
    /// Tunnel and debris tint.
    pub accent_secondary: Rgba8,
    /// Translucent card fill.
    pub surface: Rgba8,
    /// Front face of 3D text and card copy.
    pub text_face: Rgba8,
    /// Extrusion/outline color of 3D text.
    pub text_side: Rgba8,
    /// Hook banner, timer bar and CTA fill.
    pub highlight: Rgba8,
    /// Fill of the revealed correct option.
    pub correct: Rgba8,
    /// Debris primitive.
    pub particle_shape: ParticleShape,
    /// Exponential fog density of the 3D hook; `0` disables fog.
    pub fog_density: f64,
}

const CORRECT_GREEN: Rgba8 = Rgba8::rgb(0x22, 0xC5, 0x5E);

/// 3D hook palettes.
pub const STUDIO_THEMES: [Theme; 3] = [
    Theme {
        name: "neural",
        background: [Rgba8::rgb(0x05, 0x0A, 0x14), Rgba8::rgb(0x00, 0x00, 0x00)],
        accent_primary: Rgba8::rgb(0x00, 0xF0, 0xFF),
        accent_secondary: Rgba8::rgb(0x00, 0x55, 0xFF),
        surface: Rgba8::rgba(5, 10, 20, 179),
        text_face: Rgba8::WHITE,
        text_side: Rgba8::rgb(0x00, 0xF0, 0xFF),
        highlight: Rgba8::rgb(0x00, 0xF0, 0xFF),
        correct: CORRECT_GREEN,
        particle_shape: ParticleShape::Box,
        fog_density: 0.02,
    },
    Theme {
        name: "golden",
        background: [Rgba8::rgb(0x1A, 0x1A, 0x1A), Rgba8::rgb(0x0F, 0x0F, 0x0F)],
        accent_primary: Rgba8::rgb(0xFF, 0xD7, 0x00),
        accent_secondary: Rgba8::rgb(0xC5, 0xA0, 0x00),
        surface: Rgba8::rgba(26, 26, 26, 179),
        text_face: Rgba8::rgb(0xFF, 0xFD, 0xD0),
        text_side: Rgba8::rgb(0xB8, 0x86, 0x0B),
        highlight: Rgba8::rgb(0xFF, 0xD7, 0x00),
        correct: CORRECT_GREEN,
        particle_shape: ParticleShape::Tetrahedron,
        fog_density: 0.025,
    },
    Theme {
        name: "quantum",
        background: [Rgba8::rgb(0x02, 0x12, 0x05), Rgba8::rgb(0x00, 0x00, 0x00)],
        accent_primary: Rgba8::rgb(0x39, 0xFF, 0x14),
        accent_secondary: Rgba8::rgb(0xFF, 0x00, 0x7F),
        surface: Rgba8::rgba(2, 18, 5, 179),
        text_face: Rgba8::WHITE,
        text_side: Rgba8::rgb(0x39, 0xFF, 0x14),
        highlight: Rgba8::rgb(0x39, 0xFF, 0x14),
        correct: CORRECT_GREEN,
        particle_shape: ParticleShape::Torus,
        fog_density: 0.03,
    },
];

const fn classic(name: &'static str, bg: Rgba8, highlight: Rgba8, correct: Rgba8) -> Theme {
    Theme {
        name,
        background: [bg, bg],
        accent_primary: highlight,
        accent_secondary: correct,
        surface: Rgba8::rgba(bg.r, bg.g, bg.b, 217),
        text_face: Rgba8::WHITE,
        text_side: highlight,
        highlight,
        correct,
        particle_shape: ParticleShape::Box,
        fog_density: 0.0,
    }
}

/// Flat quiz palettes.
pub const CLASSIC_THEMES: [Theme; 5] = [
    classic(
        "energetic_yellow",
        Rgba8::rgb(15, 23, 42),
        Rgba8::rgb(0xFA, 0xCC, 0x15),
        Rgba8::rgb(0x22, 0xC5, 0x5E),
    ),
    classic(
        "calm_blue",
        Rgba8::rgb(13, 27, 42),
        Rgba8::rgb(0x38, 0xBD, 0xF8),
        Rgba8::rgb(0x34, 0xD3, 0x99),
    ),
    classic(
        "vibrant_purple",
        Rgba8::rgb(24, 7, 45),
        Rgba8::rgb(0xE8, 0x79, 0xF9),
        Rgba8::rgb(0xA7, 0x8B, 0xFA),
    ),
    classic(
        "fresh_green",
        Rgba8::rgb(7, 36, 19),
        Rgba8::rgb(0x84, 0xCC, 0x16),
        Rgba8::rgb(0x4A, 0xDE, 0x80),
    ),
    classic(
        "classic_red",
        Rgba8::rgb(28, 25, 23),
        Rgba8::rgb(0xFB, 0x92, 0x3C),
        Rgba8::rgb(0xF8, 0x71, 0x71),
    ),
];
