//! Widget errors.
//!
//! Hue assignment is the only validated input; everything coming from the
//! host (pointer positions, sizes) is clamped instead of rejected so a
//! stray event can never take the UI down.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PickerError {
    /// Hue assigned outside [0, 360]. The widget's state is left unchanged.
    #[error("hue value should be between 0 and 360, got {0}")]
    InvalidHue(f64),
}
