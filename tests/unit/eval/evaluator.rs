use super::*;

const FIXTURE: &str = include_str!("../../data/quiz_scenario.json");

fn prepared() -> PreparedScenario {
    PreparedScenario::prepare(Scenario::from_json_str(FIXTURE).unwrap()).unwrap()
}

#[test]
fn prepare_resolves_static_state() {
    let p = prepared();
    assert_eq!(p.duration_frames(), 540);
    assert_eq!(p.theme().name, "neural");
    assert_eq!(p.timeline().phases().len(), 8);
    assert_eq!(p.layout().options[0].rect.y0, 1025.0);
    assert_eq!(p.canvas().width, 1080);
}

#[test]
fn hook_frames_carry_hook_state() {
    let p = prepared();
    let f = Evaluator::eval_frame(&p, FrameIndex(10)).unwrap();
    assert_eq!(f.active_phase, Some(PhaseKind::Hook));
    assert!(f.hook.is_some());
    assert!(f.root.is_visible("camera"));
    assert!(!f.root.is_visible("quiz_overlay"));
    assert_eq!(
        f.root.find("tunnel").unwrap().children.len(),
        crate::scene::hook::CUBE_COUNT
    );
}

#[test]
fn slate_falls_back_to_pip_asset() {
    let p = prepared();
    let f = Evaluator::eval_frame(&p, FrameIndex(10)).unwrap();
    match &f.root.find("slate").unwrap().kind {
        crate::scene::graph::NodeKind::Slate { asset, .. } => {
            assert_eq!(asset.as_deref(), Some("media/pip_loop.mp4"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn quiz_frames_hide_the_hook_subtree() {
    let p = prepared();
    let f = Evaluator::eval_frame(&p, FrameIndex(60)).unwrap();
    assert_eq!(f.active_phase, Some(PhaseKind::Question));
    assert_eq!(f.phases, vec![PhaseKind::Question]);
    assert!(f.hook.is_none());
    let hook = f.root.find("hook_3d").unwrap();
    assert!(!hook.visible);
    assert!(hook.children.is_empty());
    assert!(f.root.is_visible("question"));
    assert_eq!(f.time_s, 2.0);
}

#[test]
fn frames_past_the_end_are_rejected() {
    let p = prepared();
    assert!(Evaluator::eval_frame(&p, FrameIndex(539)).is_ok());
    let err = Evaluator::eval_frame(&p, FrameIndex(540)).unwrap_err();
    assert!(matches!(err, ShortsceneError::Evaluation(_)));
}

#[test]
fn evaluation_is_repeatable() {
    let p = prepared();
    for frame in [0, 45, 250, 400, 539] {
        assert_eq!(
            Evaluator::eval_frame(&p, FrameIndex(frame)).unwrap(),
            Evaluator::eval_frame(&p, FrameIndex(frame)).unwrap()
        );
    }
}

#[test]
fn prepare_rejects_layout_outside_safe_zone() {
    let mut s = Scenario::from_json_str(FIXTURE).unwrap();
    s.content.explanation = "Mitochondria ".repeat(40);
    s.layout.safe_zone.bottom = 400.0;
    let err = PreparedScenario::prepare(s).unwrap_err();
    assert!(err.is_fatal_layout(), "{err}");
}

#[test]
fn evaluated_frame_serializes() {
    let p = prepared();
    let f = Evaluator::eval_frame(&p, FrameIndex(300)).unwrap();
    let v = serde_json::to_value(&f).unwrap();
    assert_eq!(v["active_phase"], "explanation");
    assert_eq!(v["theme"], "neural");
    assert!(v.get("hook").is_none());
    assert_eq!(v["root"]["id"], "frame");
}

#[test]
fn cta_pop_length_follows_the_spring() {
    let p = prepared();
    let pop = p.cta_pop_frames();
    assert_eq!(
        pop,
        crate::animation::spring::spring_settle_frames(
            p.fps(),
            &p.scenario().animation.spring,
            crate::scene::quiz::CTA_SETTLE_THRESHOLD
        )
        .unwrap()
    );
    let cta_start = 390;
    let f = Evaluator::eval_frame(&p, FrameIndex(cta_start + pop)).unwrap();
    assert_eq!(f.root.find("cta").unwrap().transform.scale.x, 1.0);
}

#[test]
fn undamped_spring_is_rejected_at_prepare() {
    let mut s = Scenario::from_json_str(FIXTURE).unwrap();
    s.animation.spring.damping = 0.0;
    let err = PreparedScenario::prepare(s).unwrap_err();
    assert!(matches!(err, ShortsceneError::Animation(_)), "{err}");
}
