use crate::foundation::error::{ShortsceneError, ShortsceneResult};

/// Easing strategy: maps normalized progress `[0,1]` to eased progress.
///
/// Implementations must satisfy `ease(0) = 0` and `ease(1) = 1`. Curves may overshoot in
/// between (elastic, back). Call sites take `&dyn Easing`, so curves swap without edits.
pub trait Easing: Send + Sync {
    /// Eased progress for `t ∈ [0, 1]`.
    fn ease(&self, t: f64) -> f64;
}

/// Adapter turning any `Fn(f64) -> f64` into an [`Easing`].
#[derive(Clone, Copy)]
pub struct EaseFn<F>(pub F);

impl<F> Easing for EaseFn<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn ease(&self, t: f64) -> f64 {
        (self.0)(t)
    }
}

/// Built-in easing curves, serialized by snake_case name.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    Linear,
    /// `t²`.
    InQuad,
    /// Mirror of [`Ease::InQuad`].
    OutQuad,
    /// Quadratic in, quadratic out.
    InOutQuad,
    /// `t³`.
    InCubic,
    /// Mirror of [`Ease::InCubic`].
    OutCubic,
    /// Cubic in, cubic out.
    InOutCubic,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier {
        /// First control point, x in `[0, 1]`.
        x1: f64,
        /// First control point, y.
        y1: f64,
        /// Second control point, x in `[0, 1]`.
        x2: f64,
        /// Second control point, y.
        y2: f64,
    },
    /// Cosine-damped elastic entrance; `bounciness = 1` is a single wobble.
    Elastic {
        /// Wobble count scale, `>= 0`.
        bounciness: f64,
    },
    /// Exponentially decaying sine that settles on one.
    ElasticOut,
    /// Anticipating "back" curve that dips below zero before rising.
    Back {
        /// Depth of the dip.
        overshoot: f64,
    },
    /// Overshoots past one and settles; the heavy-spring halt.
    BackOut {
        /// Height of the overshoot.
        overshoot: f64,
    },
    /// Bouncing-ball landing.
    BounceOut,
}

impl Ease {
    /// Non-linear speed ramp used for camera search paths.
    pub const SEARCH_PATH: Self = Self::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    /// Eased value of `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
            Self::Elastic { bounciness } => elastic(t, bounciness),
            Self::ElasticOut => elastic_out(t),
            Self::Back { overshoot } => t * t * ((overshoot + 1.0) * t - overshoot),
            Self::BackOut { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
            }
            Self::BounceOut => bounce_out(t),
        }
    }

    /// Reject parameters that would make the curve non-finite or non-functional.
    pub fn validate(self) -> ShortsceneResult<()> {
        match self {
            Self::CubicBezier { x1, y1, x2, y2 } => {
                if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                    return Err(ShortsceneError::animation(
                        "cubic_bezier control points must be finite",
                    ));
                }
                if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                    return Err(ShortsceneError::animation(
                        "cubic_bezier x1/x2 must be within [0, 1]",
                    ));
                }
                Ok(())
            }
            Self::Elastic { bounciness } => {
                if !bounciness.is_finite() || bounciness < 0.0 {
                    return Err(ShortsceneError::animation(
                        "elastic bounciness must be finite and >= 0",
                    ));
                }
                Ok(())
            }
            Self::Back { overshoot } | Self::BackOut { overshoot } => {
                if !overshoot.is_finite() {
                    return Err(ShortsceneError::animation("back overshoot must be finite"));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Easing for Ease {
    fn ease(&self, t: f64) -> f64 {
        self.apply(t)
    }
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Solve u such that bx(u) = x, then return by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Newton-Raphson, then bisection refinement. Fixed iteration counts.
    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..16 {
        let x_t = sample_curve(x1, x2, t);
        if (x_t - x).abs() < 1e-12 {
            break;
        }
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

fn elastic(t: f64, bounciness: f64) -> f64 {
    let p = bounciness * std::f64::consts::PI;
    1.0 - (t * std::f64::consts::FRAC_PI_2).cos().powi(3) * (t * p).cos()
}

fn elastic_out(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let p = 0.3;
    (2f64).powf(-10.0 * t) * ((t - p / 4.0) * (2.0 * std::f64::consts::PI) / p).sin() + 1.0
}

fn bounce_out(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
