use super::*;
use crate::{
    foundation::core::{Canvas, Fps},
    layout::stack::{QuizLayoutConfig, StackTexts},
    theme::palette::STUDIO_THEMES,
    timeline::phase::PhaseSpec,
};

struct Fixture {
    layout: QuizLayout,
    timeline: Timeline,
    content: Content,
    animation: AnimationConfig,
    cta_pop: u64,
}

fn timeline(phases: &[(PhaseKind, f64)]) -> Timeline {
    let specs: Vec<_> = phases
        .iter()
        .map(|&(name, start)| PhaseSpec {
            name,
            start,
            end: None,
        })
        .collect();
    Timeline::new(&specs, Fps::new(30, 1).unwrap(), 18.0).unwrap()
}

fn full_timeline() -> Timeline {
    timeline(&[
        (PhaseKind::Hook, 0.0),
        (PhaseKind::Question, 2.0),
        (PhaseKind::Options, 3.0),
        (PhaseKind::Think, 5.0),
        (PhaseKind::Answer, 8.0),
        (PhaseKind::Explanation, 9.0),
        (PhaseKind::Cta, 13.0),
        (PhaseKind::Outro, 16.0),
    ])
}

fn fixture(timeline: Timeline) -> Fixture {
    let content = Content {
        hook: "QUICK QUIZ!".to_owned(),
        hook_3d: "DID YOU KNOW?".to_owned(),
        question: "Powerhouse of the cell?".to_owned(),
        options: ["Nucleus", "Mitochondria", "Ribosome", "Golgi"]
            .map(str::to_owned)
            .to_vec(),
        correct: OptionLetter::B,
        explanation: "Mitochondria make ATP.".to_owned(),
        cta: "SUBSCRIBE FOR MORE!".to_owned(),
    };
    let texts = StackTexts {
        hook: &content.hook,
        question: &content.question,
        options: ["Nucleus", "Mitochondria", "Ribosome", "Golgi"],
        explanation: &content.explanation,
        cta: &content.cta,
    };
    let layout = QuizLayout::compute(
        Canvas {
            width: 1080,
            height: 1920,
        },
        &QuizLayoutConfig::default(),
        &texts,
    )
    .unwrap();
    let animation = AnimationConfig::default();
    let cta_pop = cta_pop_frames(timeline.fps(), &animation.spring).unwrap();
    Fixture {
        layout,
        timeline,
        content,
        animation,
        cta_pop,
    }
}

impl Fixture {
    fn scene(&self, seed: u64) -> QuizScene<'_> {
        QuizScene {
            seed,
            layout: &self.layout,
            timeline: &self.timeline,
            theme: &STUDIO_THEMES[0],
            content: &self.content,
            animation: &self.animation,
            pip_asset: Some("pip.mp4"),
            cta_pop_frames: self.cta_pop,
        }
    }

    fn at(&self, frame: u64) -> SceneNode {
        build_quiz_overlay(&self.scene(0), FrameIndex(frame)).unwrap()
    }
}

fn pip_rect(root: &SceneNode) -> Rect {
    match &root.find("pip").unwrap().kind {
        NodeKind::Video { rect, .. } => *rect,
        other => panic!("pip is {other:?}"),
    }
}

#[test]
fn overlay_waits_for_question() {
    let f = fixture(full_timeline());
    assert!(!f.at(30).visible);
    assert!(!f.at(30).is_visible("question"));
    let root = f.at(60);
    assert!(root.visible);
    assert!(root.is_visible("question"));
    assert!(root.find("cta").is_some());
    assert!(!root.is_visible("cta"));
}

#[test]
fn options_enter_staggered_from_alternating_sides() {
    let f = fixture(full_timeline());

    let root = f.at(90);
    let a = root.find("option_a").unwrap();
    assert!(a.visible);
    assert_eq!(a.transform.position.x, -1080.0);
    assert!(!root.find("option_b").unwrap().visible);

    let root = f.at(100);
    assert!(!root.find("option_b").unwrap().visible);

    let root = f.at(110);
    let b = root.find("option_b").unwrap();
    assert!(b.visible);
    assert!(b.transform.position.x < 1080.0);

    let settled = f.at(200);
    for id in ["option_a", "option_b", "option_c", "option_d"] {
        let node = settled.find(id).unwrap();
        assert!(node.visible, "{id}");
        assert!(node.transform.position.x.abs() < 1e-6, "{id}");
    }
}

#[test]
fn option_labels_carry_their_letter() {
    let f = fixture(full_timeline());
    let root = f.at(200);
    match &root.find("option_c_text").unwrap().kind {
        NodeKind::Label { text, .. } => assert_eq!(text, "C) Ribosome"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn timer_counts_down_through_think() {
    let f = fixture(full_timeline());
    let count = |frame| match &f.at(frame).find("timer_count").unwrap().kind {
        NodeKind::Label { text, .. } => text.clone(),
        other => panic!("unexpected {other:?}"),
    };

    assert!(!f.at(149).find("timer").unwrap().visible);
    assert!(f.at(150).find("timer").unwrap().visible);
    assert_eq!(count(150), "3");
    assert_eq!(count(181), "2");
    assert_eq!(count(239), "1");
    assert!(!f.at(240).find("timer").unwrap().visible);

    let fill_width = |frame| match f.at(frame).find("timer_fill").unwrap().kind {
        NodeKind::Panel { rect, .. } => rect.width(),
        _ => unreachable!(),
    };
    assert_eq!(fill_width(150), 0.0);
    let bar = f.layout.timer_bar.width();
    assert!((fill_width(195) - bar * 0.5).abs() < 1e-9);
}

#[test]
fn answer_reveal_highlights_correct_and_dims_wrong() {
    let f = fixture(full_timeline());
    let theme = &STUDIO_THEMES[0];

    let before = f.at(239);
    assert_eq!(before.find("option_b").unwrap().material.color, theme.surface);
    assert!(!before.is_visible("answer_glow"));

    let root = f.at(255);
    let b = root.find("option_b").unwrap();
    assert_eq!(b.material.color, theme.correct);
    assert_eq!(b.material.opacity, 1.0);
    for id in ["option_a", "option_c", "option_d"] {
        let wrong = root.find(id).unwrap();
        assert!((wrong.material.opacity - f.animation.wrong_option_opacity).abs() < 1e-9);
    }

    let glow = root.find("answer_glow").unwrap();
    assert!(glow.visible);
    assert!((glow.transform.scale.x - ANSWER_GLOW_SCALE).abs() < 1e-9);
    match glow.kind {
        NodeKind::Panel { rect, .. } => assert_eq!(rect, f.layout.options[1].rect),
        _ => unreachable!(),
    }
}

#[test]
fn explanation_follows_its_phase_or_the_answer() {
    let f = fixture(full_timeline());
    assert!(!f.at(260).is_visible("explanation"));
    assert!(f.at(270).is_visible("explanation"));

    let without = fixture(timeline(&[
        (PhaseKind::Question, 2.0),
        (PhaseKind::Answer, 8.0),
    ]));
    assert!(without.at(240).is_visible("explanation"));
    assert!(!without.at(239).is_visible("explanation"));

    let mut empty = fixture(full_timeline());
    empty.content.explanation.clear();
    assert!(empty.at(300).find("explanation").is_none());
}

#[test]
fn cta_replaces_the_quiz_cards() {
    let f = fixture(full_timeline());
    let before = f.at(389);
    assert!(before.is_visible("question"));
    assert!(!before.is_visible("cta"));

    let root = f.at(390);
    assert!(root.is_visible("cta"));
    for id in ["question", "option_a", "explanation", "answer_glow"] {
        assert!(!root.is_visible(id), "{id}");
    }
    assert!(root.is_visible("pip"));
    assert!(root.is_visible("hook_banner"));
    assert_eq!(root.find("cta").unwrap().transform.scale.x, 0.0);
}

#[test]
fn cta_pulses_after_popping_in() {
    let f = fixture(full_timeline());
    let scale = |frame| f.at(frame).find("cta").unwrap().transform.scale.x;
    let settled = 390 + f.cta_pop;
    assert!(f.cta_pop > 0 && settled < 450);

    assert!((scale(settled - 1) - 1.0).abs() > CTA_SETTLE_THRESHOLD);
    assert_eq!(scale(settled), 1.0);
    assert_eq!(scale(settled + 30), 1.0);
    let peak = scale(settled + 15);
    assert!((peak - 1.0 - f.animation.cta_pulse_amp).abs() < 1e-9);
}

#[test]
fn stiffer_spring_settles_sooner() {
    let fps = Fps::new(30, 1).unwrap();
    let soft = AnimationConfig::default().spring;
    let stiff = crate::animation::spring::SpringConfig {
        stiffness: 400.0,
        damping: 30.0,
        ..soft
    };
    assert!(cta_pop_frames(fps, &stiff).unwrap() < cta_pop_frames(fps, &soft).unwrap());
}

#[test]
fn outro_fades_the_overlay_out() {
    let f = fixture(full_timeline());
    assert_eq!(f.at(479).material.opacity, 1.0);
    assert_eq!(f.at(495).material.opacity, 0.0);
}

#[test]
fn pip_drifts_across_with_a_wave() {
    let f = fixture(full_timeline());
    let start = pip_rect(&f.at(0));
    assert_eq!(start.x0, 50.0);
    assert!((start.y0 - f.layout.pip.y0).abs() < 1e-9);
    assert!((start.width() - f.layout.pip.width()).abs() < 1e-9);

    let end = pip_rect(&f.at(540));
    assert!((end.x0 - f.layout.pip_drift.right_x).abs() < 1e-9);
    assert!((end.y0 - f.layout.pip.y0).abs() < 1e-6);

    // Two wave cycles: back on the baseline at a quarter, near the crest at an eighth.
    let quarter = pip_rect(&f.at(135));
    assert!((quarter.y0 - f.layout.pip.y0).abs() < 1e-6);
    let eighth = pip_rect(&f.at(67));
    assert!(eighth.y0 > f.layout.pip.y0 + 14.0);

    let odd = build_quiz_overlay(&f.scene(1), FrameIndex(0)).unwrap();
    assert_eq!(pip_rect(&odd).x0, 150.0);
}

#[test]
fn options_fall_back_to_question_start() {
    let f = fixture(timeline(&[(PhaseKind::Question, 2.0)]));
    let w = f.scene(0).option_window(0).unwrap();
    assert_eq!(w.start(), FrameIndex(60));
    assert!(f.at(60).find("option_a").unwrap().visible);
}
