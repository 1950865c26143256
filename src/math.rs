//! Color math — direct conversions without external dependencies.
//!
//! Hue is in degrees; saturation, value, and RGB channels are normalized
//! f64 in 0.0–1.0. Hue inputs outside [0, 360) are wrapped.

/// HSV → RGB. Hue in degrees (wrapped), s/v in 0.0–1.0.
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = (h / 60.0).rem_euclid(6.0);
    let i = h6.floor() as u32;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// RGB → HSV. Channels in 0.0–1.0, hue out in degrees [0, 360).
pub(crate) fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (h, s, v)
}

/// Wrap an arbitrary hue into [0, 360). 360 itself maps to 0.
pub(crate) fn wrap_hue(h: f64) -> f64 {
    h.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn primaries_round_trip() {
        for (h, r, g, b) in [
            (0.0, 1.0, 0.0, 0.0),
            (120.0, 0.0, 1.0, 0.0),
            (240.0, 0.0, 0.0, 1.0),
        ] {
            let (cr, cg, cb) = hsv_to_rgb(h, 1.0, 1.0);
            assert!(close(cr, r) && close(cg, g) && close(cb, b), "hue {h}");
            let (h2, s2, v2) = rgb_to_hsv(cr, cg, cb);
            assert!(close(h2, h) && close(s2, 1.0) && close(v2, 1.0));
        }
    }

    #[test]
    fn zero_saturation_is_gray() {
        let (r, g, b) = hsv_to_rgb(200.0, 0.0, 0.4);
        assert!(close(r, 0.4) && close(g, 0.4) && close(b, 0.4));
        let (h, s, _) = rgb_to_hsv(r, g, b);
        assert!(close(h, 0.0) && close(s, 0.0));
    }

    #[test]
    fn hue_wrapping() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert!(close(wrap_hue(360.0), 0.0));
        assert!(close(wrap_hue(-30.0), 330.0));
        assert!(close(wrap_hue(400.0), 40.0));
    }
}
