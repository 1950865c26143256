//! Track geometry and the shared slider state machine.
//!
//! Every widget in this crate is a gradient track with a circular indicator
//! riding on it. [`SliderTrack`] owns the indicator's pixel position, the
//! usable pixel bounds, and the drag lifecycle; what the position *means*
//! (hue, alpha, saturation/value) is the widget's business, via the pure
//! functions in [`crate::mapping`].
//!
//! The indicator's normalized position is authoritative across layout
//! changes: a resize re-derives the pixel position from the previous
//! normalized factors, so the indicator never visually jumps.

use log::{debug, warn};

/// Pixel bounds of the usable drawing region, inset from the view edges by
/// the indicator radius so the indicator never clips.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackBounds {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl TrackBounds {
    pub fn width(&self) -> f64 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> f64 {
        self.end_y - self.start_y
    }

    /// Clamp a pixel position into the bounds.
    fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x.clamp(self.start_x, self.end_x),
            y.clamp(self.start_y, self.end_y),
        )
    }
}

/// Capability record distinguishing the two track variants. Drives bounds
/// derivation and nothing else; there is no widget subclassing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TrackShape {
    /// Horizontal 1D bar; the indicator rides the vertical center line.
    Bar,
    /// 2D plane; x and y are independent axes.
    Plane,
}

impl TrackShape {
    fn derive_bounds(self, width: f64, height: f64, indicator_radius: f64) -> TrackBounds {
        let r = indicator_radius;
        match self {
            TrackShape::Bar => {
                let center_y = height / 2.0;
                TrackBounds {
                    start_x: r,
                    start_y: center_y,
                    end_x: (width - r).max(r),
                    end_y: center_y,
                }
            }
            TrackShape::Plane => TrackBounds {
                start_x: r,
                start_y: r,
                end_x: (width - r).max(r),
                end_y: (height - r).max(r),
            },
        }
    }
}

/// Layout/drag lifecycle of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Never laid out; the indicator position is meaningless.
    Fresh,
    /// Bounds known, no active pointer.
    Laid,
    /// Active pointer gesture.
    Dragging,
}

/// Pending re-derivation of the indicator from stored normalized factors,
/// applied at the next bounds computation.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Resync {
    None,
    /// Factors restored from a saved snapshot.
    Restore { fx: f64, fy: f64 },
    /// Factors from a programmatic value set.
    Set { fx: f64, fy: f64 },
}

/// Indicator position + bounds + drag state shared by all widgets.
pub(crate) struct SliderTrack {
    shape: TrackShape,
    indicator_radius: f64,
    bounds: TrackBounds,
    view_width: f64,
    view_height: f64,
    /// Indicator pixel position, always inside `bounds` once laid out.
    x: f64,
    y: f64,
    phase: Phase,
    pending: Resync,
}

impl SliderTrack {
    pub fn new(shape: TrackShape, indicator_radius: f64) -> Self {
        Self {
            shape,
            indicator_radius,
            bounds: TrackBounds::default(),
            view_width: 0.0,
            view_height: 0.0,
            x: 0.0,
            y: 0.0,
            phase: Phase::Fresh,
            pending: Resync::None,
        }
    }

    pub fn bounds(&self) -> TrackBounds {
        self.bounds
    }

    /// Indicator pixel position.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn indicator_radius(&self) -> f64 {
        self.indicator_radius
    }

    pub fn is_fresh(&self) -> bool {
        self.phase == Phase::Fresh
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Normalized indicator position under the current bounds, clamped to
    /// [0, 1]. Degenerate axes (a bar's y) report 0.
    pub fn factors(&self) -> (f64, f64) {
        let fx = if self.bounds.width() > 0.0 {
            ((self.x - self.bounds.start_x) / self.bounds.width()).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let fy = if self.bounds.height() > 0.0 {
            ((self.y - self.bounds.start_y) / self.bounds.height()).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (fx, fy)
    }

    /// The host view's size changed; recompute bounds and re-derive the
    /// indicator position.
    pub fn viewport_resized(&mut self, width: f64, height: f64) {
        self.view_width = width;
        self.view_height = height;
        self.recompute_bounds();
    }

    /// Change the indicator radius, re-deriving bounds under the current
    /// viewport when one exists.
    pub fn set_indicator_radius(&mut self, radius: f64) {
        self.indicator_radius = radius;
        if !self.is_fresh() {
            self.recompute_bounds();
        }
    }

    /// Pointer down/move at `(ex, ey)`: clamp into bounds, enter `Dragging`.
    pub fn drag_to(&mut self, ex: f64, ey: f64) {
        let (x, y) = self.bounds.clamp(ex.floor(), ey.floor());
        self.x = x;
        self.y = y;
        self.phase = Phase::Dragging;
    }

    /// Pointer up / cancel: the gesture is over.
    pub fn end_drag(&mut self) {
        if self.phase == Phase::Dragging {
            self.phase = Phase::Laid;
        }
    }

    /// Arm a re-derivation from restored snapshot factors. Applied at the
    /// next bounds computation; pixel positions mean nothing until then.
    pub fn restore_factors(&mut self, fx: f64, fy: f64) {
        self.pending = Resync::Restore {
            fx: fx.clamp(0.0, 1.0),
            fy: fy.clamp(0.0, 1.0),
        };
        // A restored track is no longer fresh even before its first layout:
        // the default-corner placement must not beat the saved position.
        if self.phase == Phase::Fresh {
            debug!("restore armed before first layout (fx={fx:.3}, fy={fy:.3})");
        }
        if !self.is_fresh() {
            self.recompute_bounds();
        }
    }

    /// Place the indicator at normalized factors programmatically. Applied
    /// immediately when a viewport exists, otherwise at the first layout.
    pub fn set_factors(&mut self, fx: f64, fy: f64) {
        self.pending = Resync::Set {
            fx: fx.clamp(0.0, 1.0),
            fy: fy.clamp(0.0, 1.0),
        };
        if !self.is_fresh() {
            self.recompute_bounds();
        }
    }

    fn recompute_bounds(&mut self) {
        let previous = self.factors();
        self.bounds = self
            .shape
            .derive_bounds(self.view_width, self.view_height, self.indicator_radius);
        if self.bounds.width() <= 0.0 {
            warn!(
                "degenerate track bounds for {:.0}x{:.0} viewport",
                self.view_width, self.view_height
            );
        }

        match std::mem::replace(&mut self.pending, Resync::None) {
            Resync::Restore { fx, fy } | Resync::Set { fx, fy } => {
                debug!("re-deriving indicator from factors ({fx:.3}, {fy:.3})");
                self.place_at_factors(fx, fy);
                if self.phase == Phase::Fresh {
                    self.phase = Phase::Laid;
                }
            }
            Resync::None if self.phase == Phase::Fresh => {
                // First layout: top-right corner, the maximum of both axes.
                self.x = self.bounds.end_x;
                self.y = self.bounds.start_y;
                self.phase = Phase::Laid;
            }
            Resync::None => {
                // Plain resize: keep the normalized position, not the pixels.
                self.place_at_factors(previous.0, previous.1);
            }
        }
    }

    fn place_at_factors(&mut self, fx: f64, fy: f64) {
        self.x = self.bounds.start_x + self.bounds.width() * fx;
        self.y = self.bounds.start_y + self.bounds.height() * fy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_bar() -> SliderTrack {
        let mut t = SliderTrack::new(TrackShape::Bar, 10.0);
        t.viewport_resized(220.0, 48.0);
        t
    }

    #[test]
    fn first_layout_places_indicator_at_top_right() {
        let mut t = SliderTrack::new(TrackShape::Plane, 12.0);
        assert!(t.is_fresh());
        t.viewport_resized(320.0, 320.0);
        assert!(!t.is_fresh());
        let b = t.bounds();
        assert_eq!(t.position(), (b.end_x, b.start_y));
        assert_eq!(t.factors(), (1.0, 0.0));
    }

    #[test]
    fn bar_bounds_ride_the_center_line() {
        let t = laid_bar();
        let b = t.bounds();
        assert_eq!(b.start_x, 10.0);
        assert_eq!(b.end_x, 210.0);
        assert_eq!(b.start_y, 24.0);
        assert_eq!(b.height(), 0.0);
    }

    #[test]
    fn drag_clamps_to_bounds_and_floors() {
        let mut t = laid_bar();
        t.drag_to(-50.0, 300.0);
        assert_eq!(t.position().0, 10.0);
        assert!(t.is_dragging());
        t.drag_to(1000.0, 0.0);
        assert_eq!(t.position().0, 210.0);
        t.drag_to(110.7, 24.0);
        assert_eq!(t.position().0, 110.0);
        t.end_drag();
        assert!(!t.is_dragging());
    }

    #[test]
    fn resize_preserves_normalized_position() {
        let mut t = laid_bar();
        t.drag_to(60.0, 24.0);
        t.end_drag();
        let (fx, _) = t.factors();
        assert!((fx - 0.25).abs() < 1e-9);

        t.viewport_resized(420.0, 48.0);
        let (fx2, _) = t.factors();
        assert!((fx - fx2).abs() < 1e-9);
        // Pixel position moved with the new bounds.
        assert!((t.position().0 - (10.0 + 400.0 * 0.25)).abs() < 1e-9);
    }

    #[test]
    fn restore_before_first_layout_beats_default_corner() {
        let mut t = SliderTrack::new(TrackShape::Plane, 10.0);
        t.restore_factors(0.5, 0.25);
        t.viewport_resized(210.0, 210.0);
        let (fx, fy) = t.factors();
        assert!((fx - 0.5).abs() < 1e-9);
        assert!((fy - 0.25).abs() < 1e-9);

        // The pending tag is consumed; the next resize preserves normally.
        t.viewport_resized(410.0, 410.0);
        let (fx, fy) = t.factors();
        assert!((fx - 0.5).abs() < 1e-9);
        assert!((fy - 0.25).abs() < 1e-9);
    }

    #[test]
    fn save_restore_round_trip() {
        let mut a = laid_bar();
        a.drag_to(137.0, 24.0);
        a.end_drag();
        let (fx, fy) = a.factors();

        let mut b = SliderTrack::new(TrackShape::Bar, 10.0);
        b.restore_factors(fx, fy);
        b.viewport_resized(220.0, 48.0);
        let (fx2, fy2) = b.factors();
        assert!((fx - fx2).abs() < 1e-9);
        assert!((fy - fy2).abs() < 1e-9);
        assert!((b.position().0 - 137.0).abs() < 1e-9);
    }

    #[test]
    fn programmatic_set_applies_immediately_once_laid() {
        let mut t = laid_bar();
        t.set_factors(0.75, 0.0);
        assert!((t.position().0 - (10.0 + 200.0 * 0.75)).abs() < 1e-9);
    }

    #[test]
    fn programmatic_set_before_layout_waits_for_bounds() {
        let mut t = SliderTrack::new(TrackShape::Bar, 10.0);
        t.set_factors(0.3, 0.0);
        t.viewport_resized(110.0, 48.0);
        let (fx, _) = t.factors();
        assert!((fx - 0.3).abs() < 1e-9);
    }

    #[test]
    fn degenerate_viewport_does_not_panic() {
        let mut t = SliderTrack::new(TrackShape::Bar, 10.0);
        t.viewport_resized(0.0, 0.0);
        t.drag_to(5.0, 5.0);
        assert_eq!(t.factors(), (0.0, 0.0));
    }
}
