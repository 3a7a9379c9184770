/// Convenience result type used across shortscene.
pub type ShortsceneResult<T> = Result<T, ShortsceneError>;

/// Top-level error taxonomy used by scenario, animation and evaluation APIs.
#[derive(thiserror::Error, Debug)]
pub enum ShortsceneError {
    /// Invalid, malformed or missing scenario data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid curve or spring parameters.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating a frame or a frame range.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// An element's geometry falls outside the declared safe zone.
    ///
    /// Fatal: the scenario produced an impossible layout and must be fixed upstream.
    #[error(
        "safe zone violation: {element} {edge} edge at {actual_px:.1}px exceeds limit {limit_px:.1}px"
    )]
    SafeZone {
        /// Element whose box escaped the safe zone.
        element: String,
        /// Which edge of the element was checked (`top`, `bottom`, `left` or `right`).
        edge: &'static str,
        /// Offending edge position in canvas pixels.
        actual_px: f64,
        /// Safe-zone boundary in canvas pixels.
        limit_px: f64,
    },

    /// Text does not fit its fixed-height card even at the minimum font size.
    ///
    /// Fatal for the same reason as [`ShortsceneError::SafeZone`].
    #[error(
        "text overflow: {element} needs {needed_px:.1}px of height but its card allows {budget_px:.1}px"
    )]
    TextOverflow {
        /// Card whose text spills.
        element: String,
        /// Estimated text block height in canvas pixels.
        needed_px: f64,
        /// Height available inside the card's padding.
        budget_px: f64,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShortsceneError {
    /// Build a [`ShortsceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShortsceneError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ShortsceneError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ShortsceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`ShortsceneError::SafeZone`] value.
    pub fn safe_zone(
        element: impl Into<String>,
        edge: &'static str,
        actual_px: f64,
        limit_px: f64,
    ) -> Self {
        Self::SafeZone {
            element: element.into(),
            edge,
            actual_px,
            limit_px,
        }
    }

    /// Build a [`ShortsceneError::TextOverflow`] value.
    pub fn text_overflow(element: impl Into<String>, needed_px: f64, budget_px: f64) -> Self {
        Self::TextOverflow {
            element: element.into(),
            needed_px,
            budget_px,
        }
    }

    /// True for errors that must abort a render rather than be recovered locally.
    pub fn is_fatal_layout(&self) -> bool {
        matches!(self, Self::SafeZone { .. } | Self::TextOverflow { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
