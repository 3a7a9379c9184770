use crate::{
    foundation::core::{Rect, Transform3D, Vec3},
    layout::text::LayoutResult,
    theme::color::Rgba8,
    theme::palette::ParticleShape,
};

/// Surface appearance of a node.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Material {
    /// Base (face) color.
    pub color: Rgba8,
    /// Self-illumination intensity; `0` for unlit overlay elements.
    pub emissive: f64,
    /// Glow tint; the base color glows when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_color: Option<Rgba8>,
    /// `[0, 1]`, multiplied down the tree by the renderer.
    pub opacity: f64,
}

impl Material {
    /// Unlit, opaque `color`.
    pub fn solid(color: Rgba8) -> Self {
        Self {
            color,
            emissive: 0.0,
            emissive_color: None,
            opacity: 1.0,
        }
    }

    /// Opaque `color` glowing at `emissive` intensity.
    pub fn glowing(color: Rgba8, emissive: f64) -> Self {
        Self {
            color,
            emissive,
            emissive_color: None,
            opacity: 1.0,
        }
    }

    /// Same material glowing in `tint` instead of its base color.
    pub fn with_emissive_color(self, tint: Rgba8) -> Self {
        Self {
            emissive_color: Some(tint),
            ..self
        }
    }

    /// Same material with `opacity` clamped to `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::solid(Rgba8::WHITE)
    }
}

/// What a node draws. 3D kinds live in world units; overlay kinds in canvas pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Draws nothing; carries children.
    Group,
    /// Perspective camera looking from its position toward `look_at`.
    Camera {
        /// Vertical field of view in degrees.
        fov_deg: f64,
        /// World point the camera faces.
        look_at: Vec3,
    },
    /// Point light tinted by the node's material color.
    PointLight {
        /// Light strength.
        intensity: f64,
        /// Falloff distance in world units.
        distance: f64,
    },
    /// Distance fog tinted by the node's material color. Applies to its whole parent scene.
    Fog {
        /// Distance where fog starts.
        near: f64,
        /// Distance where fog is opaque.
        far: f64,
        /// Exponential density for renderers that use density fog.
        density: f64,
    },
    /// Billboarded, extruded 3D text. The material colors the face.
    #[serde(rename = "text_3d")]
    Text3D {
        /// Glyphs to extrude.
        text: String,
        /// Glyph height in world units.
        size: f64,
        /// Extrusion and bevel color.
        side_color: Rgba8,
    },
    /// Instanced primitive (tunnel cubes, debris).
    Mesh {
        /// Primitive to instance.
        shape: ParticleShape,
    },
    /// Rounded slab whose front face shows a video asset.
    Slate {
        /// Slab width in world units.
        width: f64,
        /// Slab height in world units.
        height: f64,
        /// Slab thickness in world units.
        depth: f64,
        /// Video on the front face.
        asset: Option<String>,
        /// The video is running.
        playing: bool,
    },
    /// Overlay card in canvas pixels.
    Panel {
        /// Card bounds.
        rect: Rect,
        /// Corner rounding in pixels.
        corner_radius: f64,
    },
    /// Overlay text in canvas pixels.
    Label {
        /// Text as displayed.
        text: String,
        /// Box the text is laid out in.
        rect: Rect,
        /// Estimated fit of `text` in `rect`.
        layout: LayoutResult,
        /// Glyph color.
        text_color: Rgba8,
    },
    /// Overlay video region in canvas pixels.
    Video {
        /// Source video.
        asset: Option<String>,
        /// Region the video fills.
        rect: Rect,
    },
}

/// Node of the per-frame scene graph.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneNode {
    /// Stable identifier, unique within a frame.
    pub id: String,
    /// What the node draws.
    pub kind: NodeKind,
    /// Local transform relative to the parent.
    pub transform: Transform3D,
    /// Surface appearance.
    pub material: Material,
    /// Hidden nodes hide their whole subtree.
    pub visible: bool,
    /// Child nodes in draw order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Visible node with identity transform and the default material.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            transform: Transform3D::default(),
            material: Material::default(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Empty [`NodeKind::Group`].
    pub fn group(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Group)
    }

    /// Replace the transform.
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// Replace the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Append one child.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append children in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Depth-first lookup by id, including `self`.
    pub fn find(&self, id: &str) -> Option<&SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Total node count of this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// A node renders only when it and every ancestor are visible.
    pub fn is_visible(&self, id: &str) -> bool {
        fn walk(node: &SceneNode, id: &str) -> Option<bool> {
            if node.id == id {
                return Some(node.visible);
            }
            node.children
                .iter()
                .find_map(|c| walk(c, id))
                .map(|v| v && node.visible)
        }
        walk(self, id).unwrap_or(false)
    }

    /// Pre-order visit of every node with its depth.
    pub fn visit(&self, f: &mut dyn FnMut(&SceneNode, usize)) {
        fn go(node: &SceneNode, depth: usize, f: &mut dyn FnMut(&SceneNode, usize)) {
            f(node, depth);
            for c in &node.children {
                go(c, depth + 1, f);
            }
        }
        go(self, 0, f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
