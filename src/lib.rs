//! shortscene evaluates programmatic quiz and fact shorts one frame at a time.
//!
//! A [`Scenario`] (JSON) describes one vertical video: seed, resolution, frame rate, phase
//! timings and the quiz text. Everything a renderer needs for a frame is a pure function of
//! `(scenario, frame)`.
//!
//! # Pipeline overview
//!
//! 1. **Prepare**: `Scenario -> PreparedScenario` (validation, timeline, theme, static quiz
//!    layout with its safe-zone check)
//! 2. **Evaluate**: `PreparedScenario + FrameIndex -> EvaluatedFrame` (phase resolution,
//!    animated values, scene graph)
//! 3. **Fingerprint** (optional): `EvaluatedFrame -> FrameFingerprint` for regression checks
//!
//! Frames can be evaluated in any order and in parallel ([`eval_frames`]); results do not
//! depend on evaluation order. Rasterization and encoding live outside this crate.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod eval;
mod foundation;
mod layout;
mod scenario;
mod scene;
mod theme;
mod timeline;

pub use animation::ease::{Ease, EaseFn, Easing};
pub use animation::interpolate::{
    Extrapolate, InterpolateOptions, interpolate, progress, try_interpolate,
};
pub use animation::proc::Wave;
pub use animation::spring::{SpringConfig, spring, spring_settle_frames};
pub use eval::evaluator::{
    EvaluatedFrame, Evaluator, PIP_ASSET_KEY, PreparedScenario, SLATE_ASSET_KEY,
};
pub use eval::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use eval::pipeline::{EvalThreading, eval_frames, fingerprint_frames};
pub use foundation::core::{
    Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Transform3D, Vec2, Vec3,
};
pub use foundation::error::{ShortsceneError, ShortsceneResult};
pub use foundation::math::Rng64;
pub use layout::stack::{
    PipDrift, QuizLayout, QuizLayoutConfig, SafeZone, StackMetrics, StackTexts, TextBox,
};
pub use layout::text::{LayoutResult, ShrinkPolicy, TextLayoutConfig, estimate_layout};
pub use scenario::model::{
    AnimationConfig, Content, FpsDef, Meta, OptionLetter, Scenario, Timings,
};
pub use scene::graph::{Material, NodeKind, SceneNode};
pub use scene::hook::{
    CAMERA_PATH, CUBE_COUNT, HookScene, HookState, SEARCH_SECS, build_hook_scene, catmull_rom,
    hook_state, tunnel_cubes,
};
pub use scene::quiz::{CTA_SETTLE_THRESHOLD, QuizScene, build_quiz_overlay, cta_pop_frames};
pub use theme::color::Rgba8;
pub use theme::derive::{
    GeneratedBackground, TextTone, ThemeSelection, ThemeSet, contrast_for_hsl, contrast_text,
    generated_background, theme_for_seed, theme_index,
};
pub use theme::palette::{CLASSIC_THEMES, ParticleShape, STUDIO_THEMES, Theme};
pub use timeline::phase::{PhaseKind, PhaseSpec, PhaseWindow};
pub use timeline::schedule::{ResolvedPhase, Timeline};
