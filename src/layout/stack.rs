use crate::{
    foundation::core::{Canvas, Rect},
    foundation::error::{ShortsceneError, ShortsceneResult},
    layout::text::{LayoutResult, TextLayoutConfig},
};

/// Vertical rhythm of the quiz overlay, authored in pixels for a 1080x1920 canvas.
///
/// Every value is scaled by [`Canvas::res_scale`] before use.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StackMetrics {
    /// Top edge of the PIP box at rest.
    pub pip_y: f64,
    /// PIP box height; the width follows at 16:9.
    pub pip_height: f64,
    /// Closest the drifting PIP gets to either side of the canvas.
    pub pip_edge: f64,
    /// Amplitude of the PIP's vertical wave.
    pub pip_wave: f64,
    /// Left and right inset of every card.
    pub side_margin: f64,
    /// Inner padding between a card's edge and its text.
    pub card_padding: f64,
    /// Gap between the PIP and the hook banner.
    pub pip_to_hook: f64,
    /// Fixed hook banner height.
    pub hook_height: f64,
    /// Gap between the hook banner and the question card.
    pub hook_to_question: f64,
    /// The question card never gets shorter than this.
    pub question_min_height: f64,
    /// Text budget of the question card before the font starts to shrink.
    pub question_max_height: f64,
    /// Gap between the question card and the first option.
    pub question_to_options: f64,
    /// Fixed height of each option row.
    pub option_height: f64,
    /// Gap between option rows.
    pub option_spacing: f64,
    /// Gap between the last option and the countdown label.
    pub options_to_timer: f64,
    /// Countdown label height.
    pub timer_label_height: f64,
    /// Gap between the countdown label and its bar.
    pub timer_label_to_bar: f64,
    /// Countdown bar height.
    pub timer_bar_height: f64,
    /// Gap between the last option and the explanation card.
    pub options_to_explanation: f64,
    /// Distance from the bottom canvas edge to the top of the CTA banner.
    pub cta_from_bottom: f64,
    /// Fixed CTA banner height.
    pub cta_height: f64,
    /// Hook banner font size before shrink-to-fit.
    pub hook_font: f64,
    /// Question font size before shrink-to-fit.
    pub question_font: f64,
    /// Option font size before shrink-to-fit.
    pub option_font: f64,
    /// Explanation font size before shrink-to-fit.
    pub explanation_font: f64,
    /// CTA font size before shrink-to-fit.
    pub cta_font: f64,
}

impl Default for StackMetrics {
    fn default() -> Self {
        Self {
            pip_y: 150.0,
            pip_height: 495.0,
            pip_edge: 50.0,
            pip_wave: 15.0,
            side_margin: 50.0,
            card_padding: 20.0,
            pip_to_hook: 20.0,
            hook_height: 130.0,
            hook_to_question: 30.0,
            question_min_height: 150.0,
            question_max_height: 300.0,
            question_to_options: 50.0,
            option_height: 100.0,
            option_spacing: 30.0,
            options_to_timer: 40.0,
            timer_label_height: 80.0,
            timer_label_to_bar: 30.0,
            timer_bar_height: 50.0,
            options_to_explanation: 60.0,
            cta_from_bottom: 420.0,
            cta_height: 110.0,
            hook_font: 52.0,
            question_font: 55.0,
            option_font: 40.0,
            explanation_font: 56.0,
            cta_font: 48.0,
        }
    }
}

/// Margins (authored at 1920px height) that no overlay element may enter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SafeZone {
    /// Reserved band below the top edge.
    pub top: f64,
    /// Platform UI (captions, buttons) occupies the bottom of vertical shorts.
    pub bottom: f64,
    /// Reserved band on the left and on the right.
    pub side: f64,
}

impl Default for SafeZone {
    fn default() -> Self {
        Self {
            top: 100.0,
            bottom: 180.0,
            side: 40.0,
        }
    }
}

/// User-tunable layout knobs, read from the scenario's optional `layout` object.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QuizLayoutConfig {
    /// Gaps, heights and base fonts.
    pub metrics: StackMetrics,
    /// Margins checked after the stack is placed.
    pub safe_zone: SafeZone,
    /// Text-fit constants; font bounds are authored at 1920px height like the metrics.
    pub text: TextLayoutConfig,
}

impl QuizLayoutConfig {
    /// Reject negative or non-finite metrics and bad text-fit constants.
    pub fn validate(&self) -> ShortsceneResult<()> {
        self.text.validate()?;
        let m = &self.metrics;
        for (name, v) in [
            ("pip_y", m.pip_y),
            ("pip_height", m.pip_height),
            ("pip_edge", m.pip_edge),
            ("pip_wave", m.pip_wave),
            ("side_margin", m.side_margin),
            ("card_padding", m.card_padding),
            ("pip_to_hook", m.pip_to_hook),
            ("hook_height", m.hook_height),
            ("hook_to_question", m.hook_to_question),
            ("question_min_height", m.question_min_height),
            ("question_max_height", m.question_max_height),
            ("question_to_options", m.question_to_options),
            ("option_height", m.option_height),
            ("option_spacing", m.option_spacing),
            ("options_to_timer", m.options_to_timer),
            ("timer_label_height", m.timer_label_height),
            ("timer_label_to_bar", m.timer_label_to_bar),
            ("timer_bar_height", m.timer_bar_height),
            ("options_to_explanation", m.options_to_explanation),
            ("cta_from_bottom", m.cta_from_bottom),
            ("cta_height", m.cta_height),
            ("safe_zone.top", self.safe_zone.top),
            ("safe_zone.bottom", self.safe_zone.bottom),
            ("safe_zone.side", self.safe_zone.side),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ShortsceneError::validation(format!(
                    "layout.{name} must be finite and >= 0"
                )));
            }
        }
        for (name, v) in [
            ("hook_font", m.hook_font),
            ("question_font", m.question_font),
            ("option_font", m.option_font),
            ("explanation_font", m.explanation_font),
            ("cta_font", m.cta_font),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ShortsceneError::validation(format!(
                    "layout.{name} must be finite and > 0"
                )));
            }
        }
        if m.question_max_height < m.question_min_height {
            return Err(ShortsceneError::validation(
                "layout.question_max_height must be >= question_min_height",
            ));
        }
        Ok(())
    }
}

/// Text fields placed by the stack layout.
#[derive(Clone, Copy, Debug)]
pub struct StackTexts<'a> {
    /// Hook banner copy.
    pub hook: &'a str,
    /// Question card copy.
    pub question: &'a str,
    /// Option texts A to D, without their letter prefix.
    pub options: [&'a str; 4],
    /// Explanation card copy; may be empty.
    pub explanation: &'a str,
    /// CTA banner copy.
    pub cta: &'a str,
}

/// A card box together with the estimated layout of the text inside it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextBox {
    /// Card bounds in canvas pixels.
    pub rect: Rect,
    /// Estimated text block inside the card's padding.
    pub text: LayoutResult,
}

/// Horizontal drift range and vertical wave of the PIP, in canvas pixels.
///
/// The PIP travels from one end of `[left_x, right_x]` to the other over the whole video
/// while bobbing by up to `wave` around its resting `y`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipDrift {
    /// Leftmost `x0` of the PIP box.
    pub left_x: f64,
    /// Rightmost `x0` of the PIP box; never less than `left_x`.
    pub right_x: f64,
    /// Peak vertical offset from the resting box.
    pub wave: f64,
}

/// Static pixel geometry of the quiz overlay, resolved once per scenario.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuizLayout {
    /// Canvas the geometry was resolved for.
    pub canvas: Canvas,
    /// Resting PIP box, centered horizontally.
    pub pip: Rect,
    /// How far the PIP moves away from `pip` while playing.
    pub pip_drift: PipDrift,
    /// Hook banner.
    pub hook: TextBox,
    /// Question card, grown to its estimated text height.
    pub question: TextBox,
    /// Option rows A to D.
    pub options: [TextBox; 4],
    /// Countdown digits.
    pub timer_label: Rect,
    /// Countdown track; the fill grows inside it.
    pub timer_bar: Rect,
    /// Explanation card, grown to its estimated text height.
    pub explanation: TextBox,
    /// CTA banner, anchored to the bottom edge.
    pub cta: TextBox,
}

impl QuizLayout {
    /// Flow the overlay downward from the PIP box and check it against the safe zone.
    ///
    /// Returns [`ShortsceneError::SafeZone`] when any element, including the full sweep of
    /// the drifting PIP, ends up outside the safe zone, and [`ShortsceneError::TextOverflow`]
    /// when text cannot fit a fixed-height card even at the minimum font size. Callers must
    /// treat both as fatal.
    pub fn compute(
        canvas: Canvas,
        config: &QuizLayoutConfig,
        texts: &StackTexts<'_>,
    ) -> ShortsceneResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ShortsceneError::validation(
                "layout canvas width/height must be > 0",
            ));
        }
        let m = &config.metrics;
        let s = |v: f64| canvas.res_scale(v);
        let text_cfg = config.text.with_font_scale(canvas.res_scale(1.0));
        let canvas_w = f64::from(canvas.width);
        let canvas_h = f64::from(canvas.height);

        let pad = s(m.card_padding);
        let x0 = s(m.side_margin);
        let x1 = canvas_w - s(m.side_margin);
        let inner_w = (x1 - x0 - 2.0 * pad).max(0.0);
        let safe_bottom = canvas_h - s(config.safe_zone.bottom);
        let budget = |h: f64| (h - 2.0 * pad).max(1.0);

        let pip_h = s(m.pip_height);
        let pip_w = pip_h * 16.0 / 9.0;
        let pip_x = (canvas_w - pip_w) * 0.5;
        let pip = Rect::new(pip_x, s(m.pip_y), pip_x + pip_w, s(m.pip_y) + pip_h);
        let left_x = s(m.pip_edge);
        let pip_drift = PipDrift {
            left_x,
            right_x: (canvas_w - pip_w - left_x).max(left_x),
            wave: s(m.pip_wave),
        };

        let hook_y = pip.y1 + s(m.pip_to_hook);
        let hook_h = s(m.hook_height);
        let hook = TextBox {
            rect: Rect::new(x0, hook_y, x1, hook_y + hook_h),
            text: text_cfg
                .with_budget(budget(hook_h))
                .estimate(texts.hook, inner_w, s(m.hook_font)),
        };

        let question_y = hook.rect.y1 + s(m.hook_to_question);
        let question_text = text_cfg
            .with_budget(budget(s(m.question_max_height)))
            .estimate(texts.question, inner_w, s(m.question_font));
        let question_h = (question_text.box_height + 2.0 * pad).max(s(m.question_min_height));
        let question = TextBox {
            rect: Rect::new(x0, question_y, x1, question_y + question_h),
            text: question_text,
        };

        let options_y = question.rect.y1 + s(m.question_to_options);
        let option_h = s(m.option_height);
        let option_step = option_h + s(m.option_spacing);
        let option_cfg = text_cfg.with_budget(budget(option_h));
        let options: [TextBox; 4] = std::array::from_fn(|i| {
            let y = options_y + option_step * i as f64;
            TextBox {
                rect: Rect::new(x0, y, x1, y + option_h),
                text: option_cfg.estimate(texts.options[i], inner_w, s(m.option_font)),
            }
        });
        let options_bottom = options[3].rect.y1;

        let timer_label_y = options_bottom + s(m.options_to_timer);
        let timer_label = Rect::new(x0, timer_label_y, x1, timer_label_y + s(m.timer_label_height));
        let timer_bar_y = timer_label.y1 + s(m.timer_label_to_bar);
        let timer_bar = Rect::new(x0, timer_bar_y, x1, timer_bar_y + s(m.timer_bar_height));

        // The explanation may grow down to the safe-zone edge; past that only the min font
        // clamp can make it overflow.
        let explanation_y = options_bottom + s(m.options_to_explanation);
        let explanation_text = text_cfg
            .with_budget(budget(safe_bottom - explanation_y))
            .estimate(texts.explanation, inner_w, s(m.explanation_font));
        let explanation = TextBox {
            rect: Rect::new(
                x0,
                explanation_y,
                x1,
                explanation_y + explanation_text.box_height + 2.0 * pad,
            ),
            text: explanation_text,
        };

        let cta_y = canvas_h - s(m.cta_from_bottom);
        let cta_h = s(m.cta_height);
        let cta = TextBox {
            rect: Rect::new(x0, cta_y, x1, cta_y + cta_h),
            text: text_cfg
                .with_budget(budget(cta_h))
                .estimate(texts.cta, inner_w, s(m.cta_font)),
        };

        let layout = Self {
            canvas,
            pip,
            pip_drift,
            hook,
            question,
            options,
            timer_label,
            timer_bar,
            explanation,
            cta,
        };
        layout.check_safe_zone(&config.safe_zone)?;

        for (name, text_box) in layout.fixed_cards() {
            let limit = budget(text_box.rect.height());
            if !text_box.text.fits(limit) {
                return Err(ShortsceneError::text_overflow(
                    name,
                    text_box.text.box_height,
                    limit,
                ));
            }
        }
        Ok(layout)
    }

    /// Union of every box the PIP occupies while drifting and bobbing.
    pub fn pip_bounds(&self) -> Rect {
        let d = &self.pip_drift;
        let w = self.pip.width();
        Rect::new(
            self.pip.x0.min(d.left_x),
            self.pip.y0 - d.wave,
            self.pip.x1.max(d.right_x + w),
            self.pip.y1 + d.wave,
        )
    }

    /// Every placed element with a stable name, in stacking order.
    ///
    /// The PIP is reported with its full motion envelope.
    pub fn elements(&self) -> Vec<(&'static str, Rect)> {
        vec![
            ("pip", self.pip_bounds()),
            ("hook", self.hook.rect),
            ("question", self.question.rect),
            ("option_a", self.options[0].rect),
            ("option_b", self.options[1].rect),
            ("option_c", self.options[2].rect),
            ("option_d", self.options[3].rect),
            ("timer_label", self.timer_label),
            ("timer_bar", self.timer_bar),
            ("explanation", self.explanation.rect),
            ("cta", self.cta.rect),
        ]
    }

    /// Cards whose height does not follow their text.
    fn fixed_cards(&self) -> [(&'static str, &TextBox); 6] {
        [
            ("hook", &self.hook),
            ("option_a", &self.options[0]),
            ("option_b", &self.options[1]),
            ("option_c", &self.options[2]),
            ("option_d", &self.options[3]),
            ("cta", &self.cta),
        ]
    }

    /// Fail on the first element that leaves the safe zone or the canvas.
    pub fn check_safe_zone(&self, zone: &SafeZone) -> ShortsceneResult<()> {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let top = self.canvas.res_scale(zone.top);
        let bottom = h - self.canvas.res_scale(zone.bottom);
        let left = self.canvas.res_scale(zone.side);
        let right = w - left;

        for (name, r) in self.elements() {
            if r.y0 < top {
                return Err(ShortsceneError::safe_zone(name, "top", r.y0, top));
            }
            if r.y1 > bottom {
                return Err(ShortsceneError::safe_zone(name, "bottom", r.y1, bottom));
            }
            if r.x0 < left {
                return Err(ShortsceneError::safe_zone(name, "left", r.x0, left));
            }
            if r.x1 > right {
                return Err(ShortsceneError::safe_zone(name, "right", r.x1, right));
            }
        }
        Ok(())
    }

    /// Box of option `idx` (0 = A); `None` past D.
    pub fn option_rect(&self, idx: usize) -> Option<Rect> {
        self.options.get(idx).map(|o| o.rect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/stack.rs"]
mod tests;
