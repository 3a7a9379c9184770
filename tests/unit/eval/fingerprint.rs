use super::*;
use crate::{
    eval::evaluator::{Evaluator, PreparedScenario},
    foundation::core::FrameIndex,
    scenario::model::Scenario,
};

const FIXTURE: &str = include_str!("../../data/quiz_scenario.json");

fn prepared_with_seed(seed: u64) -> PreparedScenario {
    let mut s = Scenario::from_json_str(FIXTURE).unwrap();
    s.meta.seed = seed;
    PreparedScenario::prepare(s).unwrap()
}

fn fp(p: &PreparedScenario, frame: u64) -> FrameFingerprint {
    fingerprint_frame(&Evaluator::eval_frame(p, FrameIndex(frame)).unwrap())
}

#[test]
fn fingerprint_is_deterministic_for_same_frame() {
    let a = prepared_with_seed(42);
    let b = prepared_with_seed(42);
    for frame in [0, 40, 200, 500] {
        assert_eq!(fp(&a, frame), fp(&b, frame));
    }
}

#[test]
fn fingerprint_changes_with_frame_and_seed() {
    let p = prepared_with_seed(42);
    assert_ne!(fp(&p, 100), fp(&p, 101));
    assert_ne!(fp(&p, 10), fp(&prepared_with_seed(43), 10));
}

#[test]
fn fingerprint_sees_single_node_changes() {
    let p = prepared_with_seed(42);
    let frame = Evaluator::eval_frame(&p, FrameIndex(300)).unwrap();
    let mut tweaked = frame.clone();
    tweaked.root.children[1].children[0].material.opacity = 0.5;
    assert_ne!(fingerprint_frame(&frame), fingerprint_frame(&tweaked));
}

#[test]
fn display_is_32_hex_digits() {
    let s = FrameFingerprint { hi: 1, lo: 0xab }.to_string();
    assert_eq!(s, "000000000000000100000000000000ab");
}
