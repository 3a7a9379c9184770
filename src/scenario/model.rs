use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::spring::SpringConfig,
    foundation::core::{Canvas, Fps},
    foundation::error::{ShortsceneError, ShortsceneResult},
    layout::stack::{QuizLayoutConfig, StackTexts},
    theme::derive::{ThemeSelection, ThemeSet, theme_for_seed},
    theme::palette::Theme,
    timeline::phase::{PhaseKind, PhaseSpec},
    timeline::schedule::Timeline,
};

/// One short: content, timing, seed and output format. Loaded once, never mutated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    /// Seed, resolution, frame rate and duration.
    pub meta: Meta,
    /// Media references (e.g. the PIP source video), carried through untouched.
    #[serde(default)]
    pub assets: BTreeMap<String, String>,
    /// Flat phase starts; exclusive with `timeline`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timings: Option<Timings>,
    /// Explicit phase list; exclusive with `timings`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<PhaseSpec>>,
    /// Quiz text.
    pub content: Content,
    /// Stack layout overrides.
    #[serde(default)]
    pub layout: QuizLayoutConfig,
    /// Motion overrides.
    #[serde(default)]
    pub animation: AnimationConfig,
}

/// Output format and the seed every derived choice hangs off.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Meta {
    /// Drives theme choice, tunnel layout and PIP drift direction.
    #[serde(alias = "theme_seed")]
    pub seed: u64,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: FpsDef,
    /// Video length in seconds.
    pub duration_s: f64,
    /// Palette family.
    #[serde(default)]
    pub theme_set: ThemeSet,
    /// How the seed maps to a palette.
    #[serde(default)]
    pub theme_selection: ThemeSelection,
}

/// Frame rate as a plain integer (`30`) or a ratio (`{"num": 30000, "den": 1001}`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FpsDef {
    /// Integer frames per second.
    Whole(u32),
    /// `num / den` frames per second.
    Ratio {
        /// Numerator.
        num: u32,
        /// Denominator.
        den: u32,
    },
}

impl FpsDef {
    /// Validated [`Fps`].
    pub fn to_fps(self) -> ShortsceneResult<Fps> {
        match self {
            Self::Whole(n) => Fps::new(n, 1),
            Self::Ratio { num, den } => Fps::new(num, den),
        }
    }
}

/// Phase start times in seconds, keyed the way the narration pipeline emits them.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timings {
    /// Hook start; required so the opening is never guessed.
    pub t_hook: f64,
    /// Question start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_title: Option<f64>,
    /// Options start; the options enter with the question when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_options: Option<f64>,
    /// Countdown start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_think: Option<f64>,
    /// Answer reveal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_answer: Option<f64>,
    /// Explanation start; the explanation arrives with the answer when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_explanation: Option<f64>,
    /// CTA start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_cta: Option<f64>,
    /// Outro fade start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_outro: Option<f64>,
}

impl Timings {
    /// Start of `kind` in seconds, if declared.
    pub fn get(&self, kind: PhaseKind) -> Option<f64> {
        match kind {
            PhaseKind::Hook => Some(self.t_hook),
            PhaseKind::Question => self.t_title,
            PhaseKind::Options => self.t_options,
            PhaseKind::Think => self.t_think,
            PhaseKind::Answer => self.t_answer,
            PhaseKind::Explanation => self.t_explanation,
            PhaseKind::Cta => self.t_cta,
            PhaseKind::Outro => self.t_outro,
        }
    }

    /// Declared phases in playback order.
    pub fn to_specs(&self) -> Vec<PhaseSpec> {
        PhaseKind::ALL
            .into_iter()
            .filter_map(|kind| {
                self.get(kind).map(|start| PhaseSpec {
                    name: kind,
                    start,
                    end: None,
                })
            })
            .collect()
    }
}

/// Letter of one of the four options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OptionLetter {
    /// First option.
    #[serde(alias = "a")]
    A,
    /// Second option.
    #[serde(alias = "b")]
    B,
    /// Third option.
    #[serde(alias = "c")]
    C,
    /// Fourth option.
    #[serde(alias = "d")]
    D,
}

impl OptionLetter {
    /// Every letter in display order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Zero-based position (A = 0).
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    /// Uppercase letter as shown on the option card.
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

/// Everything the viewer reads. Every field but `explanation` is required.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Content {
    /// Banner text above the question card.
    pub hook: String,
    /// Headline that flies in during the 3D hook.
    pub hook_3d: String,
    /// Question card text.
    pub question: String,
    /// Exactly four option texts, A to D.
    pub options: Vec<String>,
    /// The option revealed as correct.
    pub correct: OptionLetter,
    /// Explanation card text; no card is drawn when empty.
    #[serde(default)]
    pub explanation: String,
    /// Closing call-to-action banner text.
    pub cta: String,
}

/// Motion knobs shared by the scene builders.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Delay between consecutive option entrances.
    pub option_stagger_s: f64,
    /// Length of card fade/slide entrances.
    pub entrance_s: f64,
    /// Spring of the CTA pop-in.
    pub spring: SpringConfig,
    /// Amplitude of the CTA pulse around scale 1.
    pub cta_pulse_amp: f64,
    /// Opacity wrong options fade to once the answer is revealed.
    pub wrong_option_opacity: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            option_stagger_s: 0.4,
            entrance_s: 0.5,
            spring: SpringConfig::default(),
            cta_pulse_amp: 0.05,
            wrong_option_opacity: 0.3,
        }
    }
}

impl AnimationConfig {
    /// Reject negative durations, a bad spring or an out-of-range opacity.
    pub fn validate(&self) -> ShortsceneResult<()> {
        self.spring.validate()?;
        for (name, v) in [
            ("option_stagger_s", self.option_stagger_s),
            ("entrance_s", self.entrance_s),
            ("cta_pulse_amp", self.cta_pulse_amp),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ShortsceneError::validation(format!(
                    "animation.{name} must be finite and >= 0"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.wrong_option_opacity) {
            return Err(ShortsceneError::validation(
                "animation.wrong_option_opacity must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

impl Scenario {
    /// Parse scenario JSON from any reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ShortsceneResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ShortsceneError::validation(format!("parse scenario JSON: {e}")))
    }

    /// Parse a scenario JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ShortsceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ShortsceneError::validation(format!("open scenario JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse scenario JSON from a string.
    pub fn from_json_str(s: &str) -> ShortsceneResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ShortsceneError::validation(format!("parse scenario JSON: {e}")))
    }

    /// Fail fast on anything that would make evaluation ill-defined.
    pub fn validate(&self) -> ShortsceneResult<()> {
        self.fps()?;
        if self.meta.width == 0 || self.meta.height == 0 {
            return Err(ShortsceneError::validation(
                "meta.width/height must be > 0",
            ));
        }
        if !self.meta.duration_s.is_finite() || self.meta.duration_s <= 0.0 {
            return Err(ShortsceneError::validation(
                "meta.duration_s must be finite and > 0",
            ));
        }

        let c = &self.content;
        for (name, text) in [
            ("hook", &c.hook),
            ("hook_3d", &c.hook_3d),
            ("question", &c.question),
            ("cta", &c.cta),
        ] {
            if text.trim().is_empty() {
                return Err(ShortsceneError::validation(format!(
                    "content.{name} must be non-empty"
                )));
            }
        }
        if c.options.len() != 4 {
            return Err(ShortsceneError::validation(format!(
                "content.options must have exactly 4 entries, got {}",
                c.options.len()
            )));
        }
        for (letter, text) in OptionLetter::ALL.iter().zip(&c.options) {
            if text.trim().is_empty() {
                return Err(ShortsceneError::validation(format!(
                    "content option {} must be non-empty",
                    letter.as_char()
                )));
            }
        }

        self.layout.validate()?;
        self.animation.validate()?;

        let timeline = self.timeline()?;
        if timeline.phase(PhaseKind::Question).is_none() {
            return Err(ShortsceneError::validation(
                "timeline must declare a question phase (timings.t_title)",
            ));
        }
        Ok(())
    }

    /// Frame rate from `meta.fps`.
    pub fn fps(&self) -> ShortsceneResult<Fps> {
        self.meta.fps.to_fps()
    }

    /// Output resolution from `meta`.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.meta.width,
            height: self.meta.height,
        }
    }

    /// Phases from exactly one of `timings` or `timeline`.
    pub fn phase_specs(&self) -> ShortsceneResult<Vec<PhaseSpec>> {
        match (&self.timings, &self.timeline) {
            (Some(_), Some(_)) => Err(ShortsceneError::validation(
                "scenario must not declare both `timings` and `timeline`",
            )),
            (None, None) => Err(ShortsceneError::validation(
                "scenario must declare `timings` or `timeline`",
            )),
            (Some(t), None) => Ok(t.to_specs()),
            (None, Some(specs)) => Ok(specs.clone()),
        }
    }

    /// Phases resolved onto the frame grid.
    pub fn timeline(&self) -> ShortsceneResult<Timeline> {
        Timeline::new(&self.phase_specs()?, self.fps()?, self.meta.duration_s)
    }

    /// Palette picked from the seed, set and selection rule.
    pub fn theme(&self) -> &'static Theme {
        theme_for_seed(
            self.meta.seed,
            self.meta.theme_set,
            self.meta.theme_selection,
        )
    }

    /// Text fields for the quiz stack layout. Call after [`Scenario::validate`].
    pub fn stack_texts(&self) -> StackTexts<'_> {
        let c = &self.content;
        let option = |i: usize| c.options.get(i).map(String::as_str).unwrap_or("");
        StackTexts {
            hook: &c.hook,
            question: &c.question,
            options: [option(0), option(1), option(2), option(3)],
            explanation: &c.explanation,
            cta: &c.cta,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/model.rs"]
mod tests;
