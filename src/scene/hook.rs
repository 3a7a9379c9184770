//! 3D "search and smash" hook.
//!
//! The camera swoops down a tunnel of cubes toward the hook headline, the headline pops in,
//! then a video slate flies through it and the headline bursts into debris. Every value is
//! a pure function of the frame offset into the hook phase.

use std::f64::consts::PI;

use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOptions, interpolate},
    foundation::core::{Fps, Transform3D, Vec3},
    foundation::math::Rng64,
    scene::graph::{Material, NodeKind, SceneNode},
    theme::palette::Theme,
};

/// World position of the headline.
pub const TARGET: Vec3 = Vec3::new(10.0, 5.0, -300.0);
/// Headline scale once popped in.
pub const TEXT_SCALE_MAX: f64 = 1.5;
/// Depth of the cube tunnel.
pub const TUNNEL_LENGTH: f64 = 1000.0;
/// Cubes in the tunnel.
pub const CUBE_COUNT: usize = 500;
/// Fragments in the headline burst.
pub const DEBRIS_COUNT: usize = 50;
/// Camera travel time to the headline.
pub const SEARCH_SECS: f64 = 1.2;
const SLATE_BACKOFF: f64 = 50.0;
const CAMERA_FOV_DEG: f64 = 75.0;
const FOG_NEAR: f64 = 10.0;
const FOG_FAR: f64 = 500.0;
const HEADLINE_GLOW: f64 = 0.5;

/// Waypoints of the camera flight; the last one stops short of the headline.
pub const CAMERA_PATH: [Vec3; 4] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(5.0, -5.0, -100.0),
    Vec3::new(-10.0, 10.0, -200.0),
    Vec3::new(TARGET.x, TARGET.y, TARGET.z + 40.0),
];

/// Centripetal Catmull-Rom spline through `points` at `u ∈ [0, 1]`.
///
/// `u` is split evenly across segments, not by arc length. Knots are spaced by the square
/// root of each chord, so uneven waypoints do not make the curve loop or cusp. Missing outer
/// neighbors are reflected across the endpoints.
pub fn catmull_rom(points: &[Vec3], u: f64) -> Vec3 {
    match points {
        [] => return Vec3::ZERO,
        [p] => return *p,
        _ => {}
    }
    let n = points.len();
    let t = u.clamp(0.0, 1.0) * (n - 1) as f64;
    let i = (t.floor() as usize).min(n - 2);
    let s = t - i as f64;

    let p1 = points[i];
    let p2 = points[i + 1];
    let p0 = if i == 0 { p1 * 2.0 - p2 } else { points[i - 1] };
    let p3 = if i + 2 < n {
        points[i + 2]
    } else {
        p2 * 2.0 - p1
    };

    let knot = |a: Vec3, b: Vec3| (a - b).length().sqrt();
    let dt1 = match knot(p1, p2) {
        d if d < 1e-4 => 1.0,
        d => d,
    };
    let dt0 = match knot(p0, p1) {
        d if d < 1e-4 => dt1,
        d => d,
    };
    let dt2 = match knot(p2, p3) {
        d if d < 1e-4 => dt1,
        d => d,
    };

    // Hermite tangents at p1 and p2, rescaled to the [p1, p2] knot interval.
    let m1 = ((p1 - p0) * (1.0 / dt0) - (p2 - p0) * (1.0 / (dt0 + dt1))
        + (p2 - p1) * (1.0 / dt1))
        * dt1;
    let m2 = ((p2 - p1) * (1.0 / dt1) - (p3 - p1) * (1.0 / (dt1 + dt2))
        + (p3 - p2) * (1.0 / dt2))
        * dt1;
    let c2 = p2 * 3.0 - p1 * 3.0 - m1 * 2.0 - m2;
    let c3 = p1 * 2.0 - p2 * 2.0 + m1 + m2;
    p1 + (m1 + (c2 + c3 * s) * s) * s
}

/// Animated quantities of the hook at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HookState {
    /// Eased `[0, 1]` position along [`CAMERA_PATH`].
    pub camera_progress: f64,
    /// Camera world position.
    pub camera_position: Vec3,
    /// Headline scale, `0` until the pop.
    pub text_scale: f64,
    /// Slate depth; it starts behind the headline and lands at `0`.
    pub slate_z: f64,
    /// The slate has passed the headline.
    pub collided: bool,
    /// The slate has landed and its video runs.
    pub playing: bool,
    /// Debris expansion, present while the burst is on screen.
    pub explosion_progress: Option<f64>,
}

/// Hook animation at `local_frame` frames after the hook phase starts.
pub fn hook_state(local_frame: f64, fps: Fps) -> HookState {
    let search = SEARCH_SECS * fps.as_f64();

    let camera_progress = interpolate(
        local_frame,
        [0.0, search],
        [0.0, 1.0],
        InterpolateOptions::clamp().with_easing(&Ease::SEARCH_PATH),
    );
    let text_scale = interpolate(
        local_frame,
        [search - 10.0, search],
        [0.0, TEXT_SCALE_MAX],
        InterpolateOptions::clamp().with_easing(&Ease::Elastic { bounciness: 1.0 }),
    );
    let slate_z = interpolate(
        local_frame,
        [search + 10.0, search + 40.0],
        [TARGET.z - SLATE_BACKOFF, 0.0],
        InterpolateOptions::clamp().with_easing(&Ease::Back { overshoot: 2.0 }),
    );

    let collided = slate_z > TARGET.z;
    let explosion_progress = (collided && local_frame < search + 60.0)
        .then(|| ((local_frame - (search + 25.0)) * 0.5).max(0.0));

    HookState {
        camera_progress,
        camera_position: catmull_rom(&CAMERA_PATH, camera_progress),
        text_scale,
        slate_z,
        collided,
        playing: slate_z >= 0.0,
        explosion_progress,
    }
}

/// Seed-placed tunnel cubes. Independent of the frame, so callers build it once.
pub fn tunnel_cubes(seed: u64, theme: &Theme) -> Vec<SceneNode> {
    let mut rng = Rng64::for_purpose(seed, "tunnel");
    let material = Material::glowing(theme.accent_secondary, 0.5);
    (0..CUBE_COUNT)
        .map(|i| {
            let x = (rng.next_f64_01() - 0.5) * 100.0;
            let y = (rng.next_f64_01() - 0.5) * 100.0;
            let z = -rng.next_f64_01() * TUNNEL_LENGTH;
            let scale = rng.range_f64(0.5, 2.5);
            let rotation = Vec3::new(rng.next_f64_01() * PI, rng.next_f64_01() * PI, 0.0);
            SceneNode::new(
                format!("tunnel_cube_{i}"),
                NodeKind::Mesh {
                    shape: theme.particle_shape,
                },
            )
            .with_transform(
                Transform3D::at(Vec3::new(x, y, z))
                    .with_uniform_scale(scale)
                    .with_rotation(rotation),
            )
            .with_material(material)
        })
        .collect()
}

fn debris(seed: u64, theme: &Theme, progress: f64) -> Vec<SceneNode> {
    let mut rng = Rng64::for_purpose(seed, "debris");
    let opacity = 1.0 - progress / 10.0;
    (0..DEBRIS_COUNT)
        .map(|i| {
            let dir = Vec3::new(
                rng.next_f64_01() - 0.5,
                rng.next_f64_01() - 0.5,
                rng.next_f64_01() - 0.5,
            )
            .normalize();
            let speed = rng.range_f64(1.0, 3.0);
            let scale = rng.next_f64_01() * 0.5;
            SceneNode::new(
                format!("debris_{i}"),
                NodeKind::Mesh {
                    shape: theme.particle_shape,
                },
            )
            .with_transform(
                Transform3D::at(dir * (progress * speed * 5.0))
                    .with_uniform_scale(scale)
                    .with_rotation(Vec3::new(progress, progress, 0.0)),
            )
            .with_material(Material::solid(theme.accent_secondary).with_opacity(opacity))
        })
        .collect()
}

/// Inputs of [`build_hook_scene`] that do not change per frame.
#[derive(Clone, Copy, Debug)]
pub struct HookScene<'a> {
    /// Scenario seed; places the debris.
    pub seed: u64,
    /// Palette of the 3D scene.
    pub theme: &'a Theme,
    /// Text that pops in at the end of the camera flight.
    pub headline: &'a str,
    /// Video on the slate's front face.
    pub slate_asset: Option<&'a str>,
    /// Output of [`tunnel_cubes`].
    pub tunnel: &'a [SceneNode],
}

/// `hook_3d` subtree for one evaluated [`HookState`].
pub fn build_hook_scene(scene: &HookScene<'_>, state: &HookState) -> SceneNode {
    let theme = scene.theme;

    let camera = SceneNode::new(
        "camera",
        NodeKind::Camera {
            fov_deg: CAMERA_FOV_DEG,
            look_at: TARGET,
        },
    )
    .with_transform(Transform3D::at(state.camera_position));

    let light = SceneNode::new(
        "target_light",
        NodeKind::PointLight {
            intensity: 2.0,
            distance: 100.0,
        },
    )
    .with_transform(Transform3D::at(TARGET))
    .with_material(Material::solid(theme.accent_primary));

    let fog = SceneNode::new(
        "fog",
        NodeKind::Fog {
            near: FOG_NEAR,
            far: FOG_FAR,
            density: theme.fog_density,
        },
    )
    .with_material(Material::solid(theme.background[0]));

    let headline = SceneNode::new(
        "headline",
        NodeKind::Text3D {
            text: scene.headline.to_owned(),
            size: 4.0,
            side_color: theme.text_side,
        },
    )
    .with_transform(Transform3D::at(TARGET).with_uniform_scale(state.text_scale))
    .with_material(
        Material::glowing(theme.text_face, HEADLINE_GLOW)
            .with_emissive_color(theme.accent_primary),
    )
    .with_visible(!state.collided);

    let slate = SceneNode::new(
        "slate",
        NodeKind::Slate {
            width: 16.0,
            height: 9.0,
            depth: 1.5,
            asset: scene.slate_asset.map(str::to_owned),
            playing: state.playing,
        },
    )
    .with_transform(Transform3D::at(Vec3::new(0.0, 0.0, state.slate_z)))
    .with_material(Material::glowing(
        theme.accent_primary,
        if state.playing { 0.5 } else { 2.0 },
    ));

    let mut root = SceneNode::group("hook_3d")
        .with_child(fog)
        .with_child(camera)
        .with_child(light)
        .with_child(SceneNode::group("tunnel").with_children(scene.tunnel.iter().cloned()))
        .with_child(headline);

    if let Some(progress) = state.explosion_progress {
        root = root.with_child(
            SceneNode::group("explosion")
                .with_transform(Transform3D::at(TARGET))
                .with_children(debris(scene.seed, theme, progress)),
        );
    }
    root.with_child(slate)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/hook.rs"]
mod tests;
