use super::*;

#[test]
fn modulo_cycles_through_studio_themes() {
    let names: Vec<_> = (0..6)
        .map(|s| theme_for_seed(s, ThemeSet::Studio, ThemeSelection::Modulo).name)
        .collect();
    assert_eq!(
        names,
        ["neural", "golden", "quantum", "neural", "golden", "quantum"]
    );
    assert_eq!(
        theme_for_seed(7, ThemeSet::Classic, ThemeSelection::Modulo).name,
        "vibrant_purple"
    );
}

#[test]
fn same_seed_same_theme_and_index_in_bounds() {
    for set in [ThemeSet::Studio, ThemeSet::Classic] {
        for selection in [ThemeSelection::Modulo, ThemeSelection::Hashed] {
            for seed in (0..500).chain([u64::MAX, u64::MAX - 1, 1 << 63]) {
                let len = set.themes().len();
                let idx = theme_index(seed, len, selection);
                assert!(idx < len);
                assert_eq!(idx, theme_index(seed, len, selection));
                assert_eq!(
                    theme_for_seed(seed, set, selection),
                    theme_for_seed(seed, set, selection)
                );
            }
        }
    }
}

#[test]
fn hashed_selection_uses_every_theme() {
    let mut hits = [0usize; 5];
    for seed in 0..200 {
        hits[theme_index(seed, 5, ThemeSelection::Hashed)] += 1;
    }
    assert!(hits.iter().all(|&h| h > 0), "{hits:?}");
}

#[test]
fn studio_palettes_carry_scene_parameters() {
    let golden = theme_for_seed(1, ThemeSet::Studio, ThemeSelection::Modulo);
    assert_eq!(golden.accent_primary.to_hex(), "#FFD700");
    assert_eq!(golden.particle_shape, crate::theme::palette::ParticleShape::Tetrahedron);
    assert_eq!(golden.fog_density, 0.025);
}

#[test]
fn contrast_text_follows_luminance() {
    assert_eq!(contrast_text(Rgba8::rgb(0xFA, 0xCC, 0x15)), TextTone::Black);
    assert_eq!(contrast_text(Rgba8::rgb(15, 23, 42)), TextTone::White);
    assert_eq!(contrast_text(Rgba8::rgb(128, 128, 128)), TextTone::Black);
    assert_eq!(contrast_text(Rgba8::rgb(127, 127, 127)), TextTone::White);
    assert_eq!(TextTone::Black.color(), Rgba8::BLACK);
}

#[test]
fn contrast_for_hsl_bands() {
    assert_eq!(contrast_for_hsl(250.0, 0.8), TextTone::Black);
    assert_eq!(contrast_for_hsl(60.0, 0.3), TextTone::White);
    assert_eq!(contrast_for_hsl(60.0, 0.5), TextTone::Black);
    assert_eq!(contrast_for_hsl(45.0, 0.5), TextTone::Black);
    assert_eq!(contrast_for_hsl(200.0, 0.5), TextTone::White);
    assert_eq!(contrast_for_hsl(-300.0, 0.5), TextTone::Black);
    assert_eq!(contrast_for_hsl(300.0, 0.55), TextTone::White);
}

#[test]
fn generated_background_is_deterministic() {
    let a = generated_background(99);
    assert_eq!(a, generated_background(99));
    assert_ne!(a.hue, generated_background(100).hue);
    assert!((0.0..360.0).contains(&a.hue));
    assert!((0.3..0.7).contains(&a.lightness));
    assert_eq!(a.text, contrast_for_hsl(a.hue, a.lightness));
    assert_eq!(a.color, Rgba8::from_hsl(a.hue, a.saturation, a.lightness));
}
