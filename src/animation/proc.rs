use crate::foundation::math::Rng64;

/// Time-driven periodic/noise signals sampled from elapsed seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wave {
    /// `offset + amp * sin(2π f t + phase)`.
    Sine {
        /// Peak deviation from `offset`.
        amp: f64,
        /// Cycles per second.
        freq_hz: f64,
        /// Phase shift in radians.
        phase: f64,
        /// Center value.
        offset: f64,
    },
    /// Value-noise: seeded lattice values linearly blended.
    Noise1D {
        /// Peak deviation from `offset`.
        amp: f64,
        /// Lattice points per second.
        freq_hz: f64,
        /// Center value.
        offset: f64,
    },
    /// Symmetric triangle rising from `offset` to `offset + amp` mid-period.
    Triangle {
        /// Rise above `offset` at the peak.
        amp: f64,
        /// Seconds per full cycle.
        period_s: f64,
        /// Value at the start of each cycle.
        offset: f64,
    },
}

impl Wave {
    /// Value at `secs`; `seed` only affects [`Wave::Noise1D`].
    pub fn sample(&self, secs: f64, seed: u64) -> f64 {
        match *self {
            Self::Sine {
                amp,
                freq_hz,
                phase,
                offset,
            } => offset + amp * (std::f64::consts::TAU * freq_hz * secs + phase).sin(),
            Self::Noise1D {
                amp,
                freq_hz,
                offset,
            } => {
                let x = (secs * freq_hz).max(0.0);
                let i0 = x.floor();
                let t = x - i0;
                let i0u = i0 as u64;

                let a = noise01(seed, i0u) * 2.0 - 1.0;
                let b = noise01(seed, i0u + 1) * 2.0 - 1.0;
                offset + amp * (a + (b - a) * t)
            }
            Self::Triangle {
                amp,
                period_s,
                offset,
            } => {
                if period_s <= 0.0 {
                    return offset;
                }
                let phase = secs.rem_euclid(period_s) / period_s;
                offset + amp * (1.0 - (phase - 0.5).abs() * 2.0)
            }
        }
    }
}

fn noise01(seed: u64, x: u64) -> f64 {
    let mut rng = Rng64::new(seed ^ x.wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/proc.rs"]
mod tests;
