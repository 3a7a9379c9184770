use crate::{
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{ShortsceneError, ShortsceneResult},
    layout::stack::QuizLayout,
    scenario::model::Scenario,
    scene::graph::SceneNode,
    scene::hook::{HookScene, HookState, build_hook_scene, hook_state, tunnel_cubes},
    scene::quiz::{QuizScene, build_quiz_overlay, cta_pop_frames},
    theme::color::Rgba8,
    theme::palette::Theme,
    timeline::phase::PhaseKind,
    timeline::schedule::Timeline,
};

/// Asset key of the picture-in-picture source video.
pub const PIP_ASSET_KEY: &str = "pip";
/// Asset key of the video shown on the hook slate; falls back to the PIP video.
pub const SLATE_ASSET_KEY: &str = "slate";

/// A validated scenario with everything that does not depend on the frame resolved up front.
///
/// Read-only after [`PreparedScenario::prepare`]; share it by reference across threads.
#[derive(Clone, Debug)]
pub struct PreparedScenario {
    scenario: Scenario,
    fps: Fps,
    canvas: Canvas,
    theme: &'static Theme,
    timeline: Timeline,
    layout: QuizLayout,
    tunnel: Vec<SceneNode>,
    cta_pop_frames: u64,
}

impl PreparedScenario {
    /// Validate, resolve the timeline and theme, and compute the static quiz layout.
    ///
    /// Fails with [`ShortsceneError::SafeZone`] when the layout leaves the safe zone, with
    /// [`ShortsceneError::TextOverflow`] when a fixed card cannot hold its text, and with
    /// [`ShortsceneError::Animation`] when the configured spring never settles.
    pub fn prepare(scenario: Scenario) -> ShortsceneResult<Self> {
        scenario.validate()?;
        let fps = scenario.fps()?;
        let canvas = scenario.canvas();
        let timeline = scenario.timeline()?;
        let theme = scenario.theme();
        let layout = QuizLayout::compute(canvas, &scenario.layout, &scenario.stack_texts())?;
        let tunnel = tunnel_cubes(scenario.meta.seed, theme);
        let cta_pop_frames = cta_pop_frames(fps, &scenario.animation.spring)?;

        tracing::debug!(
            seed = scenario.meta.seed,
            theme = theme.name,
            width = canvas.width,
            height = canvas.height,
            fps = fps.as_f64(),
            frames = timeline.duration_frames(),
            phases = timeline.phases().len(),
            cta_pop_frames,
            "prepared scenario"
        );

        Ok(Self {
            scenario,
            fps,
            canvas,
            theme,
            timeline,
            layout,
            tunnel,
            cta_pop_frames,
        })
    }

    /// The scenario as loaded.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output resolution.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Palette picked from the seed.
    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    /// Phases on the frame grid.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Static overlay geometry.
    pub fn layout(&self) -> &QuizLayout {
        &self.layout
    }

    /// Frames the CTA spends springing in before it pulses.
    pub fn cta_pop_frames(&self) -> u64 {
        self.cta_pop_frames
    }

    /// Total frame count; valid frames are `0..duration_frames()`.
    pub fn duration_frames(&self) -> u64 {
        self.timeline.duration_frames()
    }

    fn asset(&self, key: &str) -> Option<&str> {
        self.scenario.assets.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything a renderer needs for one frame.
pub struct EvaluatedFrame {
    /// Frame this value was evaluated for.
    pub frame: FrameIndex,
    /// Start time of the frame in seconds.
    pub time_s: f64,
    /// Latest-starting phase containing the frame.
    pub active_phase: Option<PhaseKind>,
    /// Every phase containing the frame, in playback order.
    pub phases: Vec<PhaseKind>,
    /// Theme name.
    pub theme: &'static str,
    /// Background gradient, top then bottom.
    pub background: [Rgba8; 2],
    /// Hook animation values, present while the hook phase runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<HookState>,
    /// `frame` group holding the hook subtree and the quiz overlay.
    pub root: SceneNode,
}

/// Stateless evaluator from a prepared scenario to per-frame scene graphs.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(prepared))]
    /// Evaluate one frame. Frames may be requested in any order.
    pub fn eval_frame(
        prepared: &PreparedScenario,
        frame: FrameIndex,
    ) -> ShortsceneResult<EvaluatedFrame> {
        if frame.0 >= prepared.duration_frames() {
            return Err(ShortsceneError::evaluation(format!(
                "frame {} is out of bounds (duration {} frames)",
                frame.0,
                prepared.duration_frames()
            )));
        }

        let timeline = &prepared.timeline;
        let theme = prepared.theme;
        let content = &prepared.scenario.content;
        let seed = prepared.scenario.meta.seed;

        let hook_window = timeline
            .window(PhaseKind::Hook)
            .filter(|w| w.contains(frame));
        let hook = hook_window.map(|w| hook_state(w.elapsed(frame), prepared.fps));
        let hook_node = match &hook {
            Some(state) => build_hook_scene(
                &HookScene {
                    seed,
                    theme,
                    headline: &content.hook_3d,
                    slate_asset: prepared
                        .asset(SLATE_ASSET_KEY)
                        .or_else(|| prepared.asset(PIP_ASSET_KEY)),
                    tunnel: &prepared.tunnel,
                },
                state,
            ),
            None => SceneNode::group("hook_3d").with_visible(false),
        };

        let overlay = build_quiz_overlay(
            &QuizScene {
                seed,
                layout: &prepared.layout,
                timeline,
                theme,
                content,
                animation: &prepared.scenario.animation,
                pip_asset: prepared.asset(PIP_ASSET_KEY),
                cta_pop_frames: prepared.cta_pop_frames,
            },
            frame,
        )?;

        Ok(EvaluatedFrame {
            frame,
            time_s: prepared.fps.frames_to_secs(frame.0),
            active_phase: timeline.active_phase(frame),
            phases: timeline.active_phases(frame),
            theme: theme.name,
            background: theme.background,
            hook,
            root: SceneNode::group("frame")
                .with_child(hook_node)
                .with_child(overlay),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
