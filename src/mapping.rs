//! Pure position↔color mapping along a track.
//!
//! These functions translate a pixel position inside a track's usable
//! region into a color component and back. They carry no widget state;
//! clamping policy is noted per function because it differs (the drag path
//! deliberately leaves saturation/value raw, see [`position_to_sv`]).

use crate::track::TrackBounds;

/// Pixel x → hue in degrees.
///
/// `floor(360 * (ex - start) / (end - start))`. Not clamped here: the
/// rightmost pixel yields 360, and callers clamp or wrap into [0, 360).
pub fn position_to_hue(ex: f64, track_start: f64, track_end: f64) -> f64 {
    let span = track_end - track_start;
    if span <= 0.0 {
        return 0.0;
    }
    (360.0 * (ex - track_start) / span).floor()
}

/// Hue in degrees → normalized track factor (hue / 360).
pub fn hue_to_position_factor(hue: f64) -> f64 {
    hue / 360.0
}

/// Pixel x → alpha, clamped to [0, 1].
pub fn position_to_alpha(ex: f64, track_start: f64, track_end: f64) -> f64 {
    let span = track_end - track_start;
    if span <= 0.0 {
        return 0.0;
    }
    ((ex - track_start) / span).clamp(0.0, 1.0)
}

/// Pixel position → (saturation, value) on a 2D plane.
///
/// Raw linear mapping, top-right = (1, 1). Not clamped here: during a drag
/// the pixel position is already clamped to the bounds upstream, and the
/// factors are clamped separately whenever the bounds are recomputed. Both
/// layers are kept.
pub fn position_to_sv(ex: f64, ey: f64, bounds: &TrackBounds) -> (f64, f64) {
    let sx = bounds.end_x - bounds.start_x;
    let sy = bounds.end_y - bounds.start_y;
    if sx <= 0.0 || sy <= 0.0 {
        return (1.0, 1.0);
    }
    let saturation = (ex - bounds.start_x) / sx;
    let value = 1.0 - (ey - bounds.start_y) / sy;
    (saturation, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> TrackBounds {
        TrackBounds {
            start_x: 10.0,
            start_y: 20.0,
            end_x: 110.0,
            end_y: 220.0,
        }
    }

    #[test]
    fn alpha_is_monotonic_and_bounded() {
        let mut last = -1.0;
        for i in 0..=100 {
            let ex = 10.0 + i as f64;
            let a = position_to_alpha(ex, 10.0, 110.0);
            assert!((0.0..=1.0).contains(&a));
            assert!(a >= last);
            last = a;
        }
        // Outside the track clamps rather than extrapolates.
        assert_eq!(position_to_alpha(-50.0, 10.0, 110.0), 0.0);
        assert_eq!(position_to_alpha(500.0, 10.0, 110.0), 1.0);
    }

    #[test]
    fn hue_at_track_end_is_raw_360() {
        assert_eq!(position_to_hue(10.0, 10.0, 110.0), 0.0);
        assert_eq!(position_to_hue(110.0, 10.0, 110.0), 360.0);
        assert_eq!(position_to_hue(60.0, 10.0, 110.0), 180.0);
    }

    #[test]
    fn hue_factor_round_trip_within_one_degree() {
        let (start, end) = (0.0, 777.0);
        for hue0 in 0..360 {
            let f = hue_to_position_factor(hue0 as f64);
            let ex = start + f * (end - start);
            let hue = position_to_hue(ex, start, end);
            assert!(
                (hue - hue0 as f64).abs() <= 1.0,
                "hue0={hue0} came back as {hue}"
            );
        }
    }

    #[test]
    fn sv_mapping_is_raw() {
        let b = bounds();
        let (s, v) = position_to_sv(110.0, 20.0, &b);
        assert_eq!((s, v), (1.0, 1.0));
        let (s, v) = position_to_sv(10.0, 220.0, &b);
        assert_eq!((s, v), (0.0, 0.0));
        // No clamping inside the formula itself.
        let (s, v) = position_to_sv(210.0, -180.0, &b);
        assert_eq!((s, v), (2.0, 2.0));
    }

    #[test]
    fn degenerate_spans_do_not_panic() {
        assert_eq!(position_to_hue(5.0, 5.0, 5.0), 0.0);
        assert_eq!(position_to_alpha(5.0, 5.0, 5.0), 0.0);
        let b = TrackBounds {
            start_x: 5.0,
            start_y: 5.0,
            end_x: 5.0,
            end_y: 5.0,
        };
        assert_eq!(position_to_sv(5.0, 5.0, &b), (1.0, 1.0));
    }
}
