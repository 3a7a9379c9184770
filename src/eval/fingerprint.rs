use crate::{
    eval::evaluator::EvaluatedFrame,
    foundation::core::{Rect, Transform3D, Vec3},
    foundation::math::Fnv1a64,
    layout::text::LayoutResult,
    scene::graph::{Material, NodeKind, SceneNode},
    theme::color::Rgba8,
    theme::palette::ParticleShape,
};

/// 128-bit digest of an evaluated frame, built from two independently seeded FNV-1a lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    /// First lane.
    pub hi: u64,
    /// Second lane.
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Digest of everything in `frame`, including the full scene graph.
pub fn fingerprint_frame(frame: &EvaluatedFrame) -> FrameFingerprint {
    let mut h = Lanes::new();

    h.u64(frame.frame.0);
    h.f64(frame.time_s);
    match frame.active_phase {
        Some(kind) => {
            h.u8(1);
            h.str(kind.as_str());
        }
        None => h.u8(0),
    }
    h.u64(frame.phases.len() as u64);
    for kind in &frame.phases {
        h.str(kind.as_str());
    }
    h.str(frame.theme);
    for c in frame.background {
        h.color(c);
    }
    match &frame.hook {
        Some(s) => {
            h.u8(1);
            h.f64(s.camera_progress);
            h.vec3(s.camera_position);
            h.f64(s.text_scale);
            h.f64(s.slate_z);
            h.u8(u8::from(s.collided));
            h.u8(u8::from(s.playing));
            match s.explosion_progress {
                Some(p) => {
                    h.u8(1);
                    h.f64(p);
                }
                None => h.u8(0),
            }
        }
        None => h.u8(0),
    }
    h.node(&frame.root);

    FrameFingerprint {
        hi: h.a.finish(),
        lo: h.b.finish(),
    }
}

struct Lanes {
    a: Fnv1a64,
    b: Fnv1a64,
}

impl Lanes {
    fn new() -> Self {
        Self {
            a: Fnv1a64::new(Fnv1a64::OFFSET_BASIS),
            b: Fnv1a64::new(0x9ae1_6a3b_2f90_404f),
        }
    }

    fn u8(&mut self, v: u8) {
        self.a.write_u8(v);
        self.b.write_u8(v);
    }

    fn u64(&mut self, v: u64) {
        self.a.write_u64(v);
        self.b.write_u64(v);
    }

    fn f64(&mut self, v: f64) {
        self.a.write_f64(v);
        self.b.write_f64(v);
    }

    fn str(&mut self, s: &str) {
        self.a.write_str(s);
        self.b.write_str(s);
    }

    fn opt_str(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.u8(1);
                self.str(s);
            }
            None => self.u8(0),
        }
    }

    fn vec3(&mut self, v: Vec3) {
        self.f64(v.x);
        self.f64(v.y);
        self.f64(v.z);
    }

    fn rect(&mut self, r: Rect) {
        for v in [r.x0, r.y0, r.x1, r.y1] {
            self.f64(v);
        }
    }

    fn color(&mut self, c: Rgba8) {
        for v in [c.r, c.g, c.b, c.a] {
            self.u8(v);
        }
    }

    fn transform(&mut self, t: &Transform3D) {
        self.vec3(t.position);
        self.vec3(t.rotation);
        self.vec3(t.scale);
    }

    fn material(&mut self, m: &Material) {
        self.color(m.color);
        self.f64(m.emissive);
        self.f64(m.opacity);
        match m.emissive_color {
            Some(c) => {
                self.u8(1);
                self.color(c);
            }
            None => self.u8(0),
        }
    }

    fn layout(&mut self, l: &LayoutResult) {
        self.f64(l.font_size);
        self.f64(l.text_width);
        self.f64(l.line_height);
        self.u64(u64::from(l.lines));
        self.f64(l.box_height);
        self.u64(u64::from(l.chars_per_line));
    }

    fn shape(&mut self, s: ParticleShape) {
        self.u8(match s {
            ParticleShape::Box => 0,
            ParticleShape::Tetrahedron => 1,
            ParticleShape::Torus => 2,
        });
    }

    fn kind(&mut self, kind: &NodeKind) {
        match kind {
            NodeKind::Group => self.u8(0),
            NodeKind::Camera { fov_deg, look_at } => {
                self.u8(1);
                self.f64(*fov_deg);
                self.vec3(*look_at);
            }
            NodeKind::PointLight {
                intensity,
                distance,
            } => {
                self.u8(2);
                self.f64(*intensity);
                self.f64(*distance);
            }
            NodeKind::Text3D {
                text,
                size,
                side_color,
            } => {
                self.u8(3);
                self.str(text);
                self.f64(*size);
                self.color(*side_color);
            }
            NodeKind::Mesh { shape } => {
                self.u8(4);
                self.shape(*shape);
            }
            NodeKind::Slate {
                width,
                height,
                depth,
                asset,
                playing,
            } => {
                self.u8(5);
                self.f64(*width);
                self.f64(*height);
                self.f64(*depth);
                self.opt_str(asset.as_deref());
                self.u8(u8::from(*playing));
            }
            NodeKind::Panel {
                rect,
                corner_radius,
            } => {
                self.u8(6);
                self.rect(*rect);
                self.f64(*corner_radius);
            }
            NodeKind::Label {
                text,
                rect,
                layout,
                text_color,
            } => {
                self.u8(7);
                self.str(text);
                self.rect(*rect);
                self.layout(layout);
                self.color(*text_color);
            }
            NodeKind::Video { asset, rect } => {
                self.u8(8);
                self.opt_str(asset.as_deref());
                self.rect(*rect);
            }
            NodeKind::Fog { near, far, density } => {
                self.u8(9);
                self.f64(*near);
                self.f64(*far);
                self.f64(*density);
            }
        }
    }

    fn node(&mut self, node: &SceneNode) {
        self.str(&node.id);
        self.kind(&node.kind);
        self.transform(&node.transform);
        self.material(&node.material);
        self.u8(u8::from(node.visible));
        self.u64(node.children.len() as u64);
        for child in &node.children {
            self.node(child);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
