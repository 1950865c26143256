//! Saved widget state for restore across window resize or recreation.
//!
//! Snapshots store the indicator's *normalized* factors, never pixels: the
//! restored view may come back at any size, and pixel positions are only
//! re-derived once bounds exist again. Widgets whose factors alone cannot
//! reconstruct their scalar state carry that scalar alongside (the picker's
//! hue, the alpha slider's base color).
//!
//! All types are serde-serializable so the host can stash them in whatever
//! save-state mechanism it uses.

use serde::{Deserialize, Serialize};

/// Base snapshot shared by every track widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSnapshot {
    /// Normalized indicator position along x, in [0, 1].
    pub factor_x: f64,
    /// Normalized indicator position along y, in [0, 1]. Zero for 1D bars.
    pub factor_y: f64,
}

/// Alpha slider state: track factors plus the base color its gradient runs
/// to (0xAARRGGBB).
#[cfg(feature = "alpha")]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaSliderSnapshot {
    pub track: SliderSnapshot,
    pub selected_color: u32,
}

/// Composite picker state. Hue is stored explicitly: the picker's own
/// factors only encode saturation/value, so hue is not reconstructible from
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickerSnapshot {
    pub track: SliderSnapshot,
    /// Hue in degrees [0, 360].
    pub hue: f64,
    /// Alpha in [0, 1].
    pub alpha: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_snapshot_survives_json() {
        let snap = PickerSnapshot {
            track: SliderSnapshot {
                factor_x: 0.625,
                factor_y: 0.125,
            },
            hue: 210.0,
            alpha: 0.5,
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: PickerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
