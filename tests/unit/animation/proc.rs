use super::*;

#[test]
fn noise_is_bounded_and_deterministic() {
    let wave = Wave::Noise1D {
        amp: 2.0,
        freq_hz: 1.0,
        offset: 0.5,
    };
    let v0 = wave.sample(0.0, 7);
    let v1 = wave.sample(1.0, 7);
    assert_ne!(v0, v1);
    for v in [v0, v1, wave.sample(0.37, 7)] {
        assert!(v >= -1.5);
        assert!(v <= 2.5);
    }
    assert_eq!(v0, wave.sample(0.0, 7));
}

#[test]
fn triangle_peaks_mid_period() {
    let pulse = Wave::Triangle {
        amp: 0.05,
        period_s: 1.0,
        offset: 1.0,
    };
    assert!((pulse.sample(0.0, 0) - 1.0).abs() < 1e-12);
    assert!((pulse.sample(0.5, 0) - 1.05).abs() < 1e-12);
    assert!((pulse.sample(2.5, 0) - 1.05).abs() < 1e-12);
    assert!((pulse.sample(0.25, 0) - 1.025).abs() < 1e-12);
}

#[test]
fn sine_matches_closed_form() {
    let wave = Wave::Sine {
        amp: 15.0,
        freq_hz: 0.5,
        phase: 0.0,
        offset: 150.0,
    };
    assert!((wave.sample(0.5, 0) - (150.0 + 15.0 * (std::f64::consts::FRAC_PI_2).sin())).abs() < 1e-9);
}
