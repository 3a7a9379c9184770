use crate::foundation::{
    core::Fps,
    error::{ShortsceneError, ShortsceneResult},
};

/// Upper bound for [`spring_settle_frames`] scans, in seconds of animation.
const SETTLE_SCAN_SECS: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Damped harmonic oscillator parameters.
pub struct SpringConfig {
    /// Mass of the oscillator.
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Spring constant.
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Damping coefficient; must be positive for the spring to settle.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Cap the response at its target instead of overshooting.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

fn default_mass() -> f64 {
    1.0
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_damping() -> f64 {
    10.0
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: default_mass(),
            stiffness: default_stiffness(),
            damping: default_damping(),
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Reject non-finite values, non-positive mass or stiffness and negative damping.
    pub fn validate(&self) -> ShortsceneResult<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ShortsceneError::animation("spring mass must be finite and > 0"));
        }
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(ShortsceneError::animation(
                "spring stiffness must be finite and > 0",
            ));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(ShortsceneError::animation(
                "spring damping must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Damping ratio; `< 1` oscillates, `1` is critical, `> 1` creeps.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt()).max(1e-9)
    }
}

/// Spring response from 0 toward 1 at `frame`.
///
/// Closed-form step response with `x(0) = 0`, `v(0) = 0`, so any frame can be evaluated
/// in any order. Frames at or before zero return 0.
pub fn spring(frame: f64, fps: Fps, config: &SpringConfig) -> f64 {
    if frame <= 0.0 || !frame.is_finite() {
        return 0.0;
    }
    let t = fps.frame_f64_to_secs(frame);
    let v = spring_step(t, config.stiffness, config.damping, config.mass);
    if config.overshoot_clamping {
        v.min(1.0)
    } else {
        v
    }
}

/// First frame after which the spring stays within `threshold` of its target.
pub fn spring_settle_frames(
    fps: Fps,
    config: &SpringConfig,
    threshold: f64,
) -> ShortsceneResult<u64> {
    config.validate()?;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(ShortsceneError::animation(
            "spring settle threshold must be finite and > 0",
        ));
    }

    let max_frames = fps.secs_to_frames_ceil(SETTLE_SCAN_SECS);
    let mut last_outside = None;
    for f in 0..=max_frames {
        if (1.0 - spring(f as f64, fps, config)).abs() > threshold {
            last_outside = Some(f);
        }
    }
    match last_outside {
        None => Ok(0),
        Some(f) if f < max_frames => Ok(f + 1),
        Some(_) => Err(ShortsceneError::animation(format!(
            "spring does not settle within {SETTLE_SCAN_SECS}s at threshold {threshold}"
        ))),
    }
}

fn spring_step(t: f64, stiffness: f64, damping: f64, mass: f64) -> f64 {
    let k = stiffness.max(0.0);
    let c = damping.max(0.0);
    let m = mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return 1.0;
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // Underdamped.
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
