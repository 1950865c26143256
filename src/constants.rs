//! Sizing and styling defaults for the widgets.

/// Intrinsic 1D slider height (density-independent units).
pub const SLIDER_SIZE: f32 = 48.0;

/// Intrinsic picker side length.
pub const PICKER_SIZE: f32 = 320.0;

/// Indicator radius on 1D sliders.
pub const THUMB_RADIUS: f64 = 12.0;

/// Indicator radius on the 2D picker.
pub const PICKER_INDICATOR_RADIUS: f64 = 12.0;

/// Ring width between the indicator's stroke disc and its color fill.
pub const STROKE_SIZE: f64 = 2.0;

/// Hue strip raster width: one column per degree.
pub const HUE_RASTER_WIDTH: u32 = 360;

/// Side length of the rasterized saturation/value plane.
pub const SV_RASTER_SIZE: u32 = 256;

/// Checkerboard cell size (for alpha backgrounds).
#[cfg(feature = "alpha")]
pub const CHECKER_CELL: f64 = 5.0;
