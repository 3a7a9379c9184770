use crate::foundation::core::{FrameIndex, FrameRange, Fps};

/// Named interval of a quiz/fact short, in playback order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// 3D search-and-smash opener.
    Hook,
    /// Question card.
    Question,
    /// Staggered answer options.
    Options,
    /// Countdown.
    Think,
    /// Correct option revealed.
    Answer,
    /// Explanation card.
    Explanation,
    /// Call to action.
    Cta,
    /// Tail after the CTA.
    Outro,
}

impl PhaseKind {
    /// Every phase in playback order.
    pub const ALL: [Self; 8] = [
        Self::Hook,
        Self::Question,
        Self::Options,
        Self::Think,
        Self::Answer,
        Self::Explanation,
        Self::Cta,
        Self::Outro,
    ];

    /// snake_case name, as used in scenario JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hook => "hook",
            Self::Question => "question",
            Self::Options => "options",
            Self::Think => "think",
            Self::Answer => "answer",
            Self::Explanation => "explanation",
            Self::Cta => "cta",
            Self::Outro => "outro",
        }
    }

    /// Key of this phase's start time in a scenario `timings` object.
    pub fn timing_key(self) -> &'static str {
        match self {
            Self::Hook => "t_hook",
            Self::Question => "t_title",
            Self::Options => "t_options",
            Self::Think => "t_think",
            Self::Answer => "t_answer",
            Self::Explanation => "t_explanation",
            Self::Cta => "t_cta",
            Self::Outro => "t_outro",
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared phase: `{ "name": "question", "start": 2.0, "end": 6.0 }`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseSpec {
    /// Which phase this is.
    pub name: PhaseKind,
    /// Start time in seconds.
    pub start: f64,
    /// Explicit end time in seconds; defaults to the next phase start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

/// Half-open frame window `[start, end)` with local-time helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PhaseWindow {
    /// Frames the window covers.
    pub range: FrameRange,
}

impl PhaseWindow {
    /// Window over `range`.
    pub fn new(range: FrameRange) -> Self {
        Self { range }
    }

    /// First frame.
    pub fn start(self) -> FrameIndex {
        self.range.start
    }

    /// One past the last frame.
    pub fn end(self) -> FrameIndex {
        self.range.end
    }

    /// `start <= frame < end`.
    pub fn contains(self, frame: FrameIndex) -> bool {
        self.range.contains(frame)
    }

    /// True from the first frame of the window onward, including after it ends.
    pub fn has_started(self, frame: FrameIndex) -> bool {
        frame.0 >= self.range.start.0
    }

    /// Frames since the window opened, or `None` before it.
    pub fn local_frame(self, frame: FrameIndex) -> Option<u64> {
        frame.0.checked_sub(self.range.start.0)
    }

    /// Signed frame offset from the window start; negative before it opens.
    pub fn elapsed(self, frame: FrameIndex) -> f64 {
        frame.0 as f64 - self.range.start.0 as f64
    }

    /// [`PhaseWindow::elapsed`] in seconds.
    pub fn local_secs(self, frame: FrameIndex, fps: Fps) -> f64 {
        fps.frame_f64_to_secs(self.elapsed(frame))
    }

    /// Linear progress through the window, clamped to `[0, 1]`.
    pub fn progress(self, frame: FrameIndex) -> f64 {
        let len = self.range.len_frames();
        if len == 0 {
            return if self.has_started(frame) { 1.0 } else { 0.0 };
        }
        (self.elapsed(frame) / len as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phase.rs"]
mod tests;
