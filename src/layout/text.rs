//! Headless text-fit estimation.
//!
//! Estimates how a run of text wraps inside a fixed-width box using an average glyph width,
//! then shrinks the font when the estimated block is taller than its budget. No font files
//! are read and no shaping happens, so the result is identical on every machine.

use crate::foundation::error::{ShortsceneError, ShortsceneResult};

const FIT_EPS: f64 = 1e-9;

/// How the font shrinks when the estimated block exceeds its height budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkPolicy {
    /// Fixed multipliers by line count: `> 5` lines ×0.65, `> 3` lines ×0.8.
    Staged,
    /// Solve `lines * size * line_height == budget` for the size, then snap to whole lines.
    #[default]
    Solve,
}

/// Constants of the glyph-width text estimator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLayoutConfig {
    /// Average glyph advance as a fraction of the font size.
    #[serde(default = "default_char_width_factor")]
    pub char_width_factor: f64,
    /// Line pitch as a fraction of the font size.
    #[serde(default = "default_line_height_factor")]
    pub line_height_factor: f64,
    /// Shrinking never goes below this size.
    #[serde(default = "default_min_font_size")]
    pub min_font_size: f64,
    /// Upper clamp on any requested size.
    #[serde(default = "default_max_font_size")]
    pub max_font_size: f64,
    /// Height budget in pixels; `None` never shrinks.
    #[serde(default)]
    pub max_height: Option<f64>,
    /// How to shrink when the block is over budget.
    #[serde(default)]
    pub policy: ShrinkPolicy,
}

fn default_char_width_factor() -> f64 {
    0.6
}

fn default_line_height_factor() -> f64 {
    1.2
}

fn default_min_font_size() -> f64 {
    18.0
}

fn default_max_font_size() -> f64 {
    120.0
}

impl Default for TextLayoutConfig {
    fn default() -> Self {
        Self {
            char_width_factor: default_char_width_factor(),
            line_height_factor: default_line_height_factor(),
            min_font_size: default_min_font_size(),
            max_font_size: default_max_font_size(),
            max_height: None,
            policy: ShrinkPolicy::default(),
        }
    }
}

/// Estimated block metrics for one text run at its final font size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutResult {
    /// Final font size after shrinking and clamping.
    pub font_size: f64,
    /// Width of the widest estimated line.
    pub text_width: f64,
    /// Line pitch at `font_size`.
    pub line_height: f64,
    /// Wrapped line count; `0` for empty text.
    pub lines: u32,
    /// `lines * line_height`.
    pub box_height: f64,
    /// Glyphs that fit on one line at `font_size`.
    pub chars_per_line: u32,
}

impl LayoutResult {
    /// True when the block fits inside `budget` pixels of height.
    pub fn fits(&self, budget: f64) -> bool {
        self.box_height <= budget + FIT_EPS
    }
}

impl TextLayoutConfig {
    /// Same config with a height budget.
    pub fn with_budget(self, max_height: f64) -> Self {
        Self {
            max_height: Some(max_height),
            ..self
        }
    }

    /// Same config with both font bounds multiplied by `k`.
    ///
    /// Stack layouts author the bounds at 1920px height and pass the canvas scale here, so a
    /// smaller canvas gets a proportionally smaller floor.
    pub fn with_font_scale(self, k: f64) -> Self {
        Self {
            min_font_size: self.min_font_size * k,
            max_font_size: self.max_font_size * k,
            ..self
        }
    }

    /// Reject non-positive factors, inverted font bounds and bad budgets.
    pub fn validate(&self) -> ShortsceneResult<()> {
        for (name, v) in [
            ("char_width_factor", self.char_width_factor),
            ("line_height_factor", self.line_height_factor),
            ("min_font_size", self.min_font_size),
            ("max_font_size", self.max_font_size),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ShortsceneError::validation(format!(
                    "text layout {name} must be finite and > 0"
                )));
            }
        }
        if self.min_font_size > self.max_font_size {
            return Err(ShortsceneError::validation(
                "text layout min_font_size must be <= max_font_size",
            ));
        }
        if let Some(h) = self.max_height
            && (!h.is_finite() || h <= 0.0)
        {
            return Err(ShortsceneError::validation(
                "text layout max_height must be finite and > 0 when set",
            ));
        }
        Ok(())
    }

    /// Estimate font size, wrapping and block height for `text`.
    ///
    /// Never fails: empty text or a degenerate container yields a zero-height layout.
    pub fn estimate(&self, text: &str, container_width: f64, base_font_size: f64) -> LayoutResult {
        let text_len = text.trim().chars().count();
        let base_ok = base_font_size.is_finite() && base_font_size > 0.0;
        let width_ok = container_width.is_finite() && container_width > 0.0;

        if text_len == 0 || !width_ok || !base_ok {
            let font_size = self.clamp_font(if base_ok {
                base_font_size
            } else {
                self.min_font_size
            });
            return LayoutResult {
                font_size,
                text_width: 0.0,
                line_height: font_size * self.line_height_factor,
                lines: 0,
                box_height: 0.0,
                chars_per_line: 0,
            };
        }

        let first = self.measure(text_len, container_width, base_font_size);
        let mut font_size = base_font_size;
        if let Some(budget) = self.max_height
            && budget.is_finite()
            && budget > 0.0
            && first.box_height > budget
        {
            font_size = match self.policy {
                ShrinkPolicy::Staged => {
                    if first.lines > 5 {
                        font_size * 0.65
                    } else if first.lines > 3 {
                        font_size * 0.8
                    } else {
                        font_size
                    }
                }
                ShrinkPolicy::Solve => {
                    let solved = (budget * container_width
                        / (text_len as f64 * self.char_width_factor * self.line_height_factor))
                        .sqrt();
                    // Whole lines can push the solved block past the budget; shrinking to the
                    // solved line count can only reduce the line count further.
                    let solved_lines = self.measure(text_len, container_width, solved).lines;
                    solved.min(budget / (f64::from(solved_lines) * self.line_height_factor))
                }
            };
        }

        self.measure(text_len, container_width, self.clamp_font(font_size))
    }

    fn clamp_font(&self, size: f64) -> f64 {
        size.max(self.min_font_size).min(self.max_font_size)
    }

    fn measure(&self, text_len: usize, container_width: f64, font_size: f64) -> LayoutResult {
        let glyph_w = font_size * self.char_width_factor;
        let chars_per_line = ((container_width / glyph_w).floor() as usize).max(1);
        let lines = text_len.div_ceil(chars_per_line);
        let line_height = font_size * self.line_height_factor;
        LayoutResult {
            font_size,
            text_width: (text_len.min(chars_per_line) as f64 * glyph_w).min(container_width),
            line_height,
            lines: u32::try_from(lines).unwrap_or(u32::MAX),
            box_height: lines as f64 * line_height,
            chars_per_line: u32::try_from(chars_per_line).unwrap_or(u32::MAX),
        }
    }
}

/// [`TextLayoutConfig::estimate`] with default constants.
pub fn estimate_layout(text: &str, container_width: f64, base_font_size: f64) -> LayoutResult {
    TextLayoutConfig::default().estimate(text, container_width, base_font_size)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
