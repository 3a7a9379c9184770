use crate::foundation::error::{ShortsceneError, ShortsceneResult};

pub use kurbo::{Point, Rect, Vec2};

/// Tolerance used when snapping second-based boundaries onto the frame grid.
const FRAME_SNAP_EPS: f64 = 1e-9;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Global 0-based frame counter.
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open frame range `[start, end)`.
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ShortsceneResult<Self> {
        if start.0 > end.0 {
            return Err(ShortsceneError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// True when the range covers no frame.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// True when `f` lies inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate. The frame clock of every scene.
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds).
    pub den: u32, // must be > 0
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> ShortsceneResult<Self> {
        if den == 0 {
            return Err(ShortsceneError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ShortsceneError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Elapsed seconds at the start of `frames`.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Elapsed seconds for a fractional (possibly negative) frame position.
    pub fn frame_f64_to_secs(self, frame: f64) -> f64 {
        frame * f64::from(self.den) / f64::from(self.num)
    }

    /// Last frame that starts at or before `secs`.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64() + FRAME_SNAP_EPS).floor().max(0.0) as u64
    }

    /// First frame that starts at or after `secs`.
    ///
    /// Boundaries authored in seconds (phase starts) snap here so `2.0s @ 30fps` is frame 60.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64() - FRAME_SNAP_EPS).ceil().max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output resolution in pixels.
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Height all pixel constants are authored against.
    pub const BASE_HEIGHT: f64 = 1920.0;

    /// Scale a value authored for a 1920px-tall canvas to this canvas.
    pub fn res_scale(self, value: f64) -> f64 {
        value * f64::from(self.height) / Self::BASE_HEIGHT
    }

    /// Map a normalized vertical unit (0 = top, 1 = bottom) to pixels.
    pub fn nvu_to_px(self, nvu: f64) -> f64 {
        nvu * f64::from(self.height)
    }

    /// Full-canvas rectangle.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// World-space 3D vector.
pub struct Vec3 {
    /// Right.
    pub x: f64,
    /// Up.
    pub y: f64,
    /// Toward the viewer.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit scale.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Build a vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Uniform vector `(v, v, v)`.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction; zero stays zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len <= f64::EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / len)
    }

    /// Linear blend between `a` and `b`.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Node transform: translate, Euler rotation (radians, XYZ order), scale.
pub struct Transform3D {
    /// Translation in world units (or pixels for overlay nodes, with `z = 0`).
    pub position: Vec3,
    /// Euler rotation in radians.
    pub rotation: Vec3,
    /// Per-axis scale, default `(1,1,1)`.
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    /// Pure translation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Same transform with a uniform scale.
    pub fn with_uniform_scale(self, s: f64) -> Self {
        Self {
            scale: Vec3::splat(s),
            ..self
        }
    }

    /// Same transform with the given rotation.
    pub fn with_rotation(self, rotation: Vec3) -> Self {
        Self { rotation, ..self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
