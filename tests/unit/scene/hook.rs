use super::*;
use crate::theme::palette::STUDIO_THEMES;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-9
}

#[test]
fn catmull_rom_passes_through_waypoints() {
    assert!(close(catmull_rom(&CAMERA_PATH, 0.0), CAMERA_PATH[0]));
    assert!(close(catmull_rom(&CAMERA_PATH, 1.0 / 3.0), CAMERA_PATH[1]));
    assert!(close(catmull_rom(&CAMERA_PATH, 2.0 / 3.0), CAMERA_PATH[2]));
    assert!(close(catmull_rom(&CAMERA_PATH, 1.0), CAMERA_PATH[3]));
    assert!(close(catmull_rom(&CAMERA_PATH, 7.0), CAMERA_PATH[3]));
    assert_eq!(catmull_rom(&[], 0.5), Vec3::ZERO);
    assert_eq!(catmull_rom(&[Vec3::ONE], 0.5), Vec3::ONE);
}

#[test]
fn catmull_rom_spaces_knots_by_chord_root() {
    let mid = catmull_rom(&CAMERA_PATH, 0.5);
    let expected = Vec3::new(-4.064650133345568, 2.733363666650156, -151.72829386281734);
    assert!((mid - expected).length() < 1e-6, "{mid:?}");
}

#[test]
fn catmull_rom_tolerates_repeated_waypoints() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    let q = Vec3::new(4.0, 2.0, 3.0);
    let path = [p, p, q];
    assert!(close(catmull_rom(&path, 0.5), p));
    assert!(close(catmull_rom(&path, 1.0), q));
    for u in [0.1, 0.25, 0.75, 0.9] {
        let v = catmull_rom(&path, u);
        assert!(v.x.is_finite() && v.y.is_finite() && v.z.is_finite(), "u={u}");
    }
}

#[test]
fn camera_reaches_headline_at_search_end() {
    let start = hook_state(0.0, fps30());
    assert_eq!(start.camera_progress, 0.0);
    assert!(close(start.camera_position, Vec3::ZERO));

    let arrived = hook_state(36.0, fps30());
    assert!((arrived.camera_progress - 1.0).abs() < 1e-9);
    assert!(close(arrived.camera_position, CAMERA_PATH[3]));
    assert_eq!(hook_state(200.0, fps30()).camera_progress, 1.0);
}

#[test]
fn headline_pops_in_before_search_end() {
    assert_eq!(hook_state(20.0, fps30()).text_scale, 0.0);
    assert_eq!(hook_state(26.0, fps30()).text_scale, 0.0);
    assert!((hook_state(36.0, fps30()).text_scale - TEXT_SCALE_MAX).abs() < 1e-9);
}

#[test]
fn slate_flies_through_headline_then_lands() {
    let before = hook_state(46.0, fps30());
    assert_eq!(before.slate_z, TARGET.z - 50.0);
    assert!(!before.collided);
    assert!(!before.playing);
    assert_eq!(before.explosion_progress, None);

    let landed = hook_state(76.0, fps30());
    assert_eq!(landed.slate_z, 0.0);
    assert!(landed.collided);
    assert!(landed.playing);
}

#[test]
fn explosion_runs_until_sixty_frames_after_search() {
    let mid = (50..96)
        .map(|f| hook_state(f as f64, fps30()))
        .find(|s| s.collided)
        .unwrap();
    assert!(mid.explosion_progress.is_some());
    let late = hook_state(90.0, fps30());
    assert_eq!(late.explosion_progress, Some(14.5));
    assert_eq!(hook_state(96.0, fps30()).explosion_progress, None);
}

#[test]
fn tunnel_is_seeded() {
    let theme = &STUDIO_THEMES[0];
    let a = tunnel_cubes(3, theme);
    assert_eq!(a.len(), CUBE_COUNT);
    assert_eq!(a, tunnel_cubes(3, theme));
    assert_ne!(a, tunnel_cubes(4, theme));
    for cube in &a {
        let p = cube.transform.position;
        assert!(p.x.abs() <= 50.0 && p.y.abs() <= 50.0);
        assert!((-TUNNEL_LENGTH..=0.0).contains(&p.z));
        assert!((0.5..2.5).contains(&cube.transform.scale.x));
    }
}

#[test]
fn scene_hides_headline_after_collision() {
    let theme = &STUDIO_THEMES[2];
    let tunnel = tunnel_cubes(1, theme);
    let scene = HookScene {
        seed: 1,
        theme,
        headline: "DID YOU KNOW?",
        slate_asset: Some("video_src.mp4"),
        tunnel: &tunnel,
    };

    let early = build_hook_scene(&scene, &hook_state(30.0, fps30()));
    assert!(early.is_visible("headline"));
    assert!(early.find("explosion").is_none());
    assert_eq!(early.find("tunnel").unwrap().children.len(), CUBE_COUNT);

    let burst = build_hook_scene(&scene, &hook_state(80.0, fps30()));
    assert!(!burst.is_visible("headline"));
    let explosion = burst.find("explosion").unwrap();
    assert_eq!(explosion.children.len(), DEBRIS_COUNT);
    match &burst.find("slate").unwrap().kind {
        NodeKind::Slate { playing, asset, .. } => {
            assert!(*playing);
            assert_eq!(asset.as_deref(), Some("video_src.mp4"));
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn scene_carries_fog_and_headline_colors() {
    let theme = &STUDIO_THEMES[0];
    let tunnel = tunnel_cubes(1, theme);
    let scene = HookScene {
        seed: 1,
        theme,
        headline: "DID YOU KNOW?",
        slate_asset: None,
        tunnel: &tunnel,
    };
    let root = build_hook_scene(&scene, &hook_state(30.0, fps30()));

    let fog = root.find("fog").unwrap();
    match &fog.kind {
        NodeKind::Fog { near, far, density } => {
            assert!(near < far);
            assert_eq!(*density, theme.fog_density);
        }
        other => panic!("unexpected kind {other:?}"),
    }
    assert_eq!(fog.material.color, theme.background[0]);

    let headline = root.find("headline").unwrap();
    match &headline.kind {
        NodeKind::Text3D { side_color, .. } => assert_eq!(*side_color, theme.text_side),
        other => panic!("unexpected kind {other:?}"),
    }
    assert_eq!(headline.material.color, theme.text_face);
    assert_eq!(headline.material.emissive_color, Some(theme.accent_primary));
}
