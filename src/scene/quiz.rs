//! 2D quiz overlay: PIP, question card, staggered options, countdown, answer reveal,
//! explanation and CTA, positioned by the static [`QuizLayout`].

use std::f64::consts::TAU;

use crate::{
    animation::ease::Ease,
    animation::interpolate::{InterpolateOptions, interpolate},
    animation::proc::Wave,
    animation::spring::{SpringConfig, spring, spring_settle_frames},
    foundation::core::{Fps, FrameIndex, Rect, Transform3D, Vec3},
    foundation::error::ShortsceneResult,
    layout::stack::{QuizLayout, TextBox},
    layout::text::LayoutResult,
    scenario::model::{AnimationConfig, Content, OptionLetter},
    scene::graph::{Material, NodeKind, SceneNode},
    theme::color::Rgba8,
    theme::derive::contrast_text,
    theme::palette::Theme,
    timeline::phase::{PhaseKind, PhaseWindow},
    timeline::schedule::Timeline,
};

const CARD_RADIUS: f64 = 24.0;
const CARD_SLIDE_PX: f64 = 40.0;
const ANSWER_GLOW_SCALE: f64 = 1.3;
const ANSWER_GLOW_OPACITY: f64 = 0.15;

/// The CTA pop counts as settled once the spring stays this close to full size.
pub const CTA_SETTLE_THRESHOLD: f64 = 0.005;

/// Length of the CTA pop-in before its pulse takes over.
pub fn cta_pop_frames(fps: Fps, spring: &SpringConfig) -> ShortsceneResult<u64> {
    spring_settle_frames(fps, spring, CTA_SETTLE_THRESHOLD)
}

/// Per-scenario inputs of [`build_quiz_overlay`].
#[derive(Clone, Copy, Debug)]
pub struct QuizScene<'a> {
    /// Scenario seed; picks the PIP drift direction.
    pub seed: u64,
    /// Static geometry from [`QuizLayout::compute`].
    pub layout: &'a QuizLayout,
    /// Resolved phases.
    pub timeline: &'a Timeline,
    /// Palette for every fill and text color.
    pub theme: &'a Theme,
    /// Quiz copy and the correct letter.
    pub content: &'a Content,
    /// Motion knobs.
    pub animation: &'a AnimationConfig,
    /// PIP source video, if the scenario names one.
    pub pip_asset: Option<&'a str>,
    /// From [`cta_pop_frames`]; computed once per scenario.
    pub cta_pop_frames: u64,
}

impl QuizScene<'_> {
    fn px(&self, authored: f64) -> f64 {
        self.layout.canvas.res_scale(authored)
    }

    fn entrance_frames(&self) -> f64 {
        self.animation.entrance_s * self.timeline.fps().as_f64()
    }

    /// Eased `[0, 1]` entrance progress of a window opening at `start`.
    fn entrance(&self, start: FrameIndex, frame: FrameIndex, ease: &Ease) -> f64 {
        let s = start.0 as f64;
        interpolate(
            frame.0 as f64,
            [s, s + self.entrance_frames()],
            [0.0, 1.0],
            InterpolateOptions::clamp().with_easing(ease),
        )
    }

    fn started(&self, kind: PhaseKind, frame: FrameIndex) -> bool {
        self.timeline.has_started(kind, frame)
    }

    /// False once the CTA takes over the lower half of the screen.
    fn before_cta(&self, frame: FrameIndex) -> bool {
        !self.started(PhaseKind::Cta, frame)
    }

    /// Entrance window of option `idx`, staggered after the options (or question) start.
    pub fn option_window(&self, idx: usize) -> ShortsceneResult<PhaseWindow> {
        let base = if self.timeline.phase(PhaseKind::Options).is_some() {
            PhaseKind::Options
        } else {
            PhaseKind::Question
        };
        self.timeline.sub_window(
            base,
            self.animation.option_stagger_s * idx as f64,
            self.animation.entrance_s,
        )
    }

    /// The explanation arrives with its own phase, or with the answer when none is declared.
    fn explanation_phase(&self) -> PhaseKind {
        if self.timeline.phase(PhaseKind::Explanation).is_some() {
            PhaseKind::Explanation
        } else {
            PhaseKind::Answer
        }
    }
}

fn card(id: &str, text_box: &TextBox, fill: Material, text: &str, text_color: Rgba8) -> SceneNode {
    SceneNode::new(
        id,
        NodeKind::Panel {
            rect: text_box.rect,
            corner_radius: CARD_RADIUS,
        },
    )
    .with_material(fill)
    .with_child(label(
        &format!("{id}_text"),
        text,
        text_box.rect,
        text_box.text,
        text_color,
    ))
}

fn label(id: &str, text: &str, rect: Rect, layout: LayoutResult, color: Rgba8) -> SceneNode {
    SceneNode::new(
        id,
        NodeKind::Label {
            text: text.to_owned(),
            rect,
            layout,
            text_color: color,
        },
    )
}

fn panel(id: &str, rect: Rect, fill: Material) -> SceneNode {
    SceneNode::new(
        id,
        NodeKind::Panel {
            rect,
            corner_radius: 0.0,
        },
    )
    .with_material(fill)
}

/// Horizontal drift across the screen with a two-cycle vertical wave over the whole video.
fn pip_node(scene: &QuizScene<'_>, frame: FrameIndex) -> SceneNode {
    let pip = scene.layout.pip;
    let drift = scene.layout.pip_drift;
    let (from_x, to_x) = if scene.seed % 2 == 0 {
        (drift.left_x, drift.right_x)
    } else {
        (drift.right_x, drift.left_x)
    };

    let total = scene.timeline.duration_frames().max(1) as f64;
    let t = (frame.0 as f64 / total).min(1.0);
    let x = from_x + (to_x - from_x) * t;
    let dy = (t * TAU * 2.0).sin() * drift.wave;
    let rect = Rect::new(x, pip.y0 + dy, x + pip.width(), pip.y1 + dy);

    SceneNode::new(
        "pip",
        NodeKind::Video {
            asset: scene.pip_asset.map(str::to_owned),
            rect,
        },
    )
    .with_material(Material::solid(scene.theme.accent_primary))
}

fn hook_banner(scene: &QuizScene<'_>, frame: FrameIndex) -> SceneNode {
    let theme = scene.theme;
    let question = scene
        .timeline
        .window(PhaseKind::Question)
        .map_or(FrameIndex(0), PhaseWindow::start);
    let e = scene.entrance(question, frame, &Ease::BackOut { overshoot: 1.70158 });
    card(
        "hook_banner",
        &scene.layout.hook,
        Material::solid(theme.highlight),
        &scene.content.hook,
        contrast_text(theme.highlight).color(),
    )
    .with_transform(Transform3D::default().with_uniform_scale(e))
}

fn question_card(scene: &QuizScene<'_>, frame: FrameIndex) -> SceneNode {
    let theme = scene.theme;
    let window = scene.timeline.window(PhaseKind::Question);
    let start = window.map_or(FrameIndex(0), PhaseWindow::start);
    let e = scene.entrance(start, frame, &Ease::OutCubic);
    card(
        "question",
        &scene.layout.question,
        Material::solid(theme.surface).with_opacity(e),
        &scene.content.question,
        theme.text_face,
    )
    .with_transform(Transform3D::at(Vec3::new(
        0.0,
        (1.0 - e) * scene.px(CARD_SLIDE_PX),
        0.0,
    )))
    .with_visible(scene.started(PhaseKind::Question, frame) && scene.before_cta(frame))
}

fn option_cards(scene: &QuizScene<'_>, frame: FrameIndex) -> ShortsceneResult<Vec<SceneNode>> {
    let theme = scene.theme;
    let correct = scene.content.correct;
    let canvas_w = f64::from(scene.layout.canvas.width);
    let answer = scene.timeline.window(PhaseKind::Answer);
    let revealed = answer.is_some_and(|w| w.has_started(frame));
    let reveal = answer.map_or(0.0, |w| scene.entrance(w.start(), frame, &Ease::OutCubic));

    let mut nodes = Vec::with_capacity(4);
    for (idx, letter) in OptionLetter::ALL.into_iter().enumerate() {
        let window = scene.option_window(idx)?;
        let e = scene.entrance(window.start(), frame, &Ease::ElasticOut);
        // Alternate sides: A and C slide in from the left, B and D from the right.
        let from = if idx % 2 == 0 { -canvas_w } else { canvas_w };

        let is_correct = letter == correct;
        let (fill, opacity) = match (revealed, is_correct) {
            (true, true) => (theme.correct, 1.0),
            (true, false) => (
                theme.surface,
                1.0 + (scene.animation.wrong_option_opacity - 1.0) * reveal,
            ),
            (false, _) => (theme.surface, 1.0),
        };
        let text = scene
            .content
            .options
            .get(idx)
            .map(String::as_str)
            .unwrap_or("");
        let text = format!("{}) {text}", letter.as_char());
        let text_color = if revealed && is_correct {
            contrast_text(theme.correct).color()
        } else {
            theme.text_face
        };

        nodes.push(
            card(
                &format!("option_{}", letter.as_char().to_ascii_lowercase()),
                &scene.layout.options[idx],
                Material::solid(fill).with_opacity(opacity),
                &text,
                text_color,
            )
            .with_transform(Transform3D::at(Vec3::new(from * (1.0 - e), 0.0, 0.0)))
            .with_visible(window.has_started(frame) && scene.before_cta(frame)),
        );
    }
    Ok(nodes)
}

fn timer(scene: &QuizScene<'_>, frame: FrameIndex) -> SceneNode {
    let theme = scene.theme;
    let fps = scene.timeline.fps();
    let window = scene.timeline.window(PhaseKind::Think);
    let active = window.is_some_and(|w| w.contains(frame));
    let (fill, remaining_s) = window.map_or((0.0, 0.0), |w| {
        let remaining = w.end().0.saturating_sub(frame.0.max(w.start().0));
        (w.progress(frame), fps.frames_to_secs(remaining))
    });

    let bar = scene.layout.timer_bar;
    let label_rect = scene.layout.timer_label;
    let count = remaining_s.ceil().max(0.0) as u64;
    let layout = LayoutResult {
        font_size: label_rect.height() * 0.8,
        text_width: 0.0,
        line_height: label_rect.height(),
        lines: 1,
        box_height: label_rect.height(),
        chars_per_line: 0,
    };

    SceneNode::group("timer")
        .with_visible(active)
        .with_child(panel("timer_track", bar, Material::solid(theme.surface)))
        .with_child(panel(
            "timer_fill",
            Rect::new(bar.x0, bar.y0, bar.x0 + bar.width() * fill, bar.y1),
            Material::solid(theme.correct),
        ))
        .with_child(label(
            "timer_count",
            &count.to_string(),
            label_rect,
            layout,
            theme.text_face,
        ))
}

fn answer_glow(scene: &QuizScene<'_>, frame: FrameIndex) -> Option<SceneNode> {
    let window = scene.timeline.window(PhaseKind::Answer)?;
    let rect = scene.layout.options[scene.content.correct.index()].rect;
    let grow = scene.entrance(window.start(), frame, &Ease::Linear);
    Some(
        panel(
            "answer_glow",
            rect,
            Material::glowing(scene.theme.correct, 1.0).with_opacity(ANSWER_GLOW_OPACITY),
        )
        .with_transform(
            Transform3D::default().with_uniform_scale(1.0 + (ANSWER_GLOW_SCALE - 1.0) * grow),
        )
        .with_visible(window.has_started(frame) && scene.before_cta(frame)),
    )
}

fn explanation_card(scene: &QuizScene<'_>, frame: FrameIndex) -> Option<SceneNode> {
    if scene.content.explanation.trim().is_empty() {
        return None;
    }
    let theme = scene.theme;
    let window = scene.timeline.window(scene.explanation_phase())?;
    let e = scene.entrance(window.start(), frame, &Ease::OutCubic);
    Some(
        card(
            "explanation",
            &scene.layout.explanation,
            Material::solid(theme.surface).with_opacity(e),
            &scene.content.explanation,
            theme.text_face,
        )
        .with_transform(Transform3D::at(Vec3::new(
            0.0,
            (1.0 - e) * scene.px(CARD_SLIDE_PX),
            0.0,
        )))
        .with_visible(window.has_started(frame) && scene.before_cta(frame)),
    )
}

/// Springs in, then pulses from its settled size once the pop window closes.
fn cta_banner(scene: &QuizScene<'_>, frame: FrameIndex) -> ShortsceneResult<Option<SceneNode>> {
    let theme = scene.theme;
    let Some(window) = scene.timeline.window(PhaseKind::Cta) else {
        return Ok(None);
    };
    let fps = scene.timeline.fps();
    let pop = scene
        .timeline
        .sub_window(PhaseKind::Cta, 0.0, fps.frames_to_secs(scene.cta_pop_frames))?;
    let scale = if frame < pop.end() {
        spring(window.elapsed(frame), fps, &scene.animation.spring)
    } else {
        Wave::Triangle {
            amp: scene.animation.cta_pulse_amp,
            period_s: 1.0,
            offset: 1.0,
        }
        .sample(fps.frames_to_secs(frame.0 - pop.end().0), scene.seed)
    };
    Ok(Some(
        card(
            "cta",
            &scene.layout.cta,
            Material::solid(theme.highlight),
            &scene.content.cta,
            contrast_text(theme.highlight).color(),
        )
        .with_transform(Transform3D::default().with_uniform_scale(scale))
        .with_visible(window.has_started(frame)),
    ))
}

/// Overlay subtree at `frame`. Hidden (but present) until the question phase starts.
pub fn build_quiz_overlay(scene: &QuizScene<'_>, frame: FrameIndex) -> ShortsceneResult<SceneNode> {
    let theme = scene.theme;
    let outro_fade = scene
        .timeline
        .window(PhaseKind::Outro)
        .map_or(0.0, |w| scene.entrance(w.start(), frame, &Ease::Linear));

    let mut root = SceneNode::group("quiz_overlay")
        .with_material(Material::solid(theme.background[0]).with_opacity(1.0 - outro_fade))
        .with_visible(scene.started(PhaseKind::Question, frame))
        .with_child(panel(
            "background",
            scene.layout.canvas.bounds(),
            Material::solid(theme.background[0]),
        ))
        .with_child(pip_node(scene, frame))
        .with_child(hook_banner(scene, frame))
        .with_child(question_card(scene, frame))
        .with_children(option_cards(scene, frame)?)
        .with_child(timer(scene, frame));

    root.children.extend(answer_glow(scene, frame));
    root.children.extend(explanation_card(scene, frame));
    root.children.extend(cta_banner(scene, frame)?);
    Ok(root)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/quiz.rs"]
mod tests;
