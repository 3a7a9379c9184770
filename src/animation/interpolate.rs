use crate::{
    animation::ease::{Ease, Easing},
    foundation::error::{ShortsceneError, ShortsceneResult},
};

static LINEAR: Ease = Ease::Linear;

/// Behavior of [`interpolate`] on one side of the input range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the boundary output.
    Clamp,
    /// Continue the linear projection past the boundary.
    Extend,
}

/// Per-call interpolation options.
///
/// No `Default`: every call names its extrapolation on both sides.
#[derive(Clone, Copy)]
pub struct InterpolateOptions<'a> {
    /// Curve applied to the normalized progress.
    pub easing: &'a dyn Easing,
    /// Behavior below the first input.
    pub extrapolate_left: Extrapolate,
    /// Behavior above the last input.
    pub extrapolate_right: Extrapolate,
}

impl std::fmt::Debug for InterpolateOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterpolateOptions")
            .field("extrapolate_left", &self.extrapolate_left)
            .field("extrapolate_right", &self.extrapolate_right)
            .finish_non_exhaustive()
    }
}

impl InterpolateOptions<'static> {
    /// Linear easing with explicit extrapolation per side.
    pub fn new(extrapolate_left: Extrapolate, extrapolate_right: Extrapolate) -> Self {
        Self {
            easing: &LINEAR,
            extrapolate_left,
            extrapolate_right,
        }
    }

    /// Linear easing, clamped on both sides.
    pub fn clamp() -> Self {
        Self::new(Extrapolate::Clamp, Extrapolate::Clamp)
    }

    /// Linear easing, extended on both sides.
    pub fn extend() -> Self {
        Self::new(Extrapolate::Extend, Extrapolate::Extend)
    }
}

impl<'a> InterpolateOptions<'a> {
    /// Same extrapolation, different easing strategy.
    pub fn with_easing<'b>(self, easing: &'b dyn Easing) -> InterpolateOptions<'b> {
        InterpolateOptions {
            easing,
            extrapolate_left: self.extrapolate_left,
            extrapolate_right: self.extrapolate_right,
        }
    }
}

/// Map `input` from `input_range` to `output_range`.
///
/// In-range progress goes through `options.easing`; each side outside the range is clamped
/// or linearly extended independently. A degenerate input range (`min == max`) acts as a
/// step at that point. Pure: no state survives the call.
pub fn interpolate(
    input: f64,
    input_range: [f64; 2],
    output_range: [f64; 2],
    options: InterpolateOptions<'_>,
) -> f64 {
    let [in_min, in_max] = input_range;
    let [out_min, out_max] = output_range;

    if in_max == in_min {
        return if input <= in_min { out_min } else { out_max };
    }

    let t = (input - in_min) / (in_max - in_min);
    let lerp = |p: f64| out_min + (out_max - out_min) * p;

    if t < 0.0 {
        return match options.extrapolate_left {
            Extrapolate::Clamp => out_min,
            Extrapolate::Extend => lerp(t),
        };
    }
    if t > 1.0 {
        return match options.extrapolate_right {
            Extrapolate::Clamp => out_max,
            Extrapolate::Extend => lerp(t),
        };
    }
    lerp(options.easing.ease(t))
}

/// Checked variant of [`interpolate`] for values coming from scenario data.
pub fn try_interpolate(
    input: f64,
    input_range: [f64; 2],
    output_range: [f64; 2],
    options: InterpolateOptions<'_>,
) -> ShortsceneResult<f64> {
    if !input.is_finite() {
        return Err(ShortsceneError::animation("interpolate input must be finite"));
    }
    if !input_range.iter().chain(output_range.iter()).all(|v| v.is_finite()) {
        return Err(ShortsceneError::animation(
            "interpolate ranges must contain finite values",
        ));
    }
    if input_range[0] > input_range[1] {
        return Err(ShortsceneError::animation(
            "interpolate input range must be non-decreasing",
        ));
    }
    Ok(interpolate(input, input_range, output_range, options))
}

/// Eased progress in `[0, 1]` (clamped on both sides) of `input` across `input_range`.
pub fn progress(input: f64, input_range: [f64; 2], easing: &dyn Easing) -> f64 {
    interpolate(
        input,
        input_range,
        [0.0, 1.0],
        InterpolateOptions::clamp().with_easing(easing),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
