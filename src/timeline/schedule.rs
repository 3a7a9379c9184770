use crate::{
    foundation::core::{FrameIndex, FrameRange, Fps},
    foundation::error::{ShortsceneError, ShortsceneResult},
    timeline::phase::{PhaseKind, PhaseSpec, PhaseWindow},
};

/// A declared phase resolved onto the frame grid.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedPhase {
    /// Which phase this is.
    pub kind: PhaseKind,
    /// Authored start in seconds.
    pub start_s: f64,
    /// Resolved end in seconds.
    pub end_s: f64,
    /// Snapped frame window.
    pub window: PhaseWindow,
}

/// Ordered, non-overlapping phases of one video.
///
/// Phase boundaries snap up onto the frame grid (`ceil(start * fps)`), so a phase authored
/// at `2.0s` at 30 fps owns frame 60 and not frame 59. A phase without an explicit end runs
/// until the next phase starts, and the last one runs until the end of the video.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    fps: Fps,
    duration_s: f64,
    duration_frames: u64,
    phases: Vec<ResolvedPhase>,
}

impl Timeline {
    /// Resolve `specs`, given in playback order, against the video length.
    ///
    /// Fails on duplicate, out-of-order or overlapping phases and on starts past the end.
    pub fn new(specs: &[PhaseSpec], fps: Fps, duration_s: f64) -> ShortsceneResult<Self> {
        if !duration_s.is_finite() || duration_s <= 0.0 {
            return Err(ShortsceneError::validation(
                "timeline duration must be finite and > 0",
            ));
        }
        if specs.is_empty() {
            return Err(ShortsceneError::validation(
                "timeline must declare at least one phase",
            ));
        }
        let duration_frames = fps.secs_to_frames_ceil(duration_s);

        let mut seen = Vec::<PhaseKind>::with_capacity(specs.len());
        let mut prev_start = f64::NEG_INFINITY;
        for spec in specs {
            if seen.contains(&spec.name) {
                return Err(ShortsceneError::validation(format!(
                    "timeline phase '{}' declared more than once",
                    spec.name
                )));
            }
            seen.push(spec.name);

            if !spec.start.is_finite() || spec.start < 0.0 {
                return Err(ShortsceneError::validation(format!(
                    "timeline phase '{}' start must be finite and >= 0",
                    spec.name
                )));
            }
            if spec.start < prev_start {
                return Err(ShortsceneError::validation(format!(
                    "timeline phase '{}' starts at {}s, before the previous phase ({}s)",
                    spec.name, spec.start, prev_start
                )));
            }
            if spec.start > duration_s {
                return Err(ShortsceneError::validation(format!(
                    "timeline phase '{}' starts at {}s, after the video ends ({}s)",
                    spec.name, spec.start, duration_s
                )));
            }
            if let Some(end) = spec.end
                && (!end.is_finite() || end < spec.start)
            {
                return Err(ShortsceneError::validation(format!(
                    "timeline phase '{}' end must be finite and >= its start",
                    spec.name
                )));
            }
            prev_start = spec.start;
        }
        for pair in specs.windows(2) {
            if let Some(end) = pair[0].end
                && end > pair[1].start
            {
                return Err(ShortsceneError::validation(format!(
                    "timeline phase '{}' ends at {end}s, after '{}' starts ({}s)",
                    pair[0].name, pair[1].name, pair[1].start
                )));
            }
        }

        let mut phases = Vec::with_capacity(specs.len());
        for (idx, spec) in specs.iter().enumerate() {
            let end_s = spec
                .end
                .or_else(|| specs.get(idx + 1).map(|next| next.start))
                .unwrap_or(duration_s)
                .min(duration_s);
            let start = fps.secs_to_frames_ceil(spec.start).min(duration_frames);
            let end = fps.secs_to_frames_ceil(end_s).clamp(start, duration_frames);
            phases.push(ResolvedPhase {
                kind: spec.name,
                start_s: spec.start,
                end_s,
                window: PhaseWindow::new(FrameRange::new(FrameIndex(start), FrameIndex(end))?),
            });
        }

        Ok(Self {
            fps,
            duration_s,
            duration_frames,
            phases,
        })
    }

    /// Frame rate the phases were snapped to.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Video length in seconds.
    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    /// Video length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.duration_frames
    }

    /// Phases in playback order.
    pub fn phases(&self) -> &[ResolvedPhase] {
        &self.phases
    }

    /// Declared phase of `kind`.
    pub fn phase(&self, kind: PhaseKind) -> Option<&ResolvedPhase> {
        self.phases.iter().find(|p| p.kind == kind)
    }

    /// Frame window of `kind`, if declared.
    pub fn window(&self, kind: PhaseKind) -> Option<PhaseWindow> {
        self.phase(kind).map(|p| p.window)
    }

    /// `start_frame(kind) <= frame < end_frame(kind)`; undeclared phases are never active.
    pub fn is_active(&self, kind: PhaseKind, frame: FrameIndex) -> bool {
        self.window(kind).is_some_and(|w| w.contains(frame))
    }

    /// True once `kind` has started, for elements that persist after their phase.
    pub fn has_started(&self, kind: PhaseKind, frame: FrameIndex) -> bool {
        self.window(kind).is_some_and(|w| w.has_started(frame))
    }

    /// The last declared phase whose window contains `frame`.
    pub fn active_phase(&self, frame: FrameIndex) -> Option<PhaseKind> {
        self.phases
            .iter()
            .rev()
            .find(|p| p.window.contains(frame))
            .map(|p| p.kind)
    }

    /// Every phase whose window contains `frame`, in declaration order.
    pub fn active_phases(&self, frame: FrameIndex) -> Vec<PhaseKind> {
        self.phases
            .iter()
            .filter(|p| p.window.contains(frame))
            .map(|p| p.kind)
            .collect()
    }

    /// An explicit window layered inside (or past) a phase: opens `offset_s` after the phase
    /// starts and lasts `duration_s`, clipped to the video length.
    pub fn sub_window(
        &self,
        kind: PhaseKind,
        offset_s: f64,
        duration_s: f64,
    ) -> ShortsceneResult<PhaseWindow> {
        if !offset_s.is_finite() || !duration_s.is_finite() || duration_s < 0.0 {
            return Err(ShortsceneError::validation(format!(
                "sub-window of '{kind}' needs a finite offset and a finite duration >= 0"
            )));
        }
        let phase = self.phase(kind).ok_or_else(|| {
            ShortsceneError::validation(format!("timeline has no '{kind}' phase"))
        })?;
        let start_s = (phase.start_s + offset_s).max(0.0);
        let start = self
            .fps
            .secs_to_frames_ceil(start_s)
            .min(self.duration_frames);
        let end = self
            .fps
            .secs_to_frames_ceil(start_s + duration_s)
            .clamp(start, self.duration_frames);
        Ok(PhaseWindow::new(FrameRange::new(
            FrameIndex(start),
            FrameIndex(end),
        )?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
