//! 2D saturation/value picker, optionally composed with a hue slider and
//! an alpha slider.
//!
//! The picker owns the authoritative color: hue plus the saturation/value
//! the indicator sits on, with alpha tracked separately and folded in only
//! when the color is read. Attached sliders sync one way on drags (slider →
//! picker); the picker pushes back to them only when its color is set
//! programmatically.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use floem::kurbo::{Circle, Rect};
use floem::peniko::{self, Blob, Color};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

#[cfg(feature = "alpha")]
use crate::alpha_slider::AlphaSlider;
use crate::color::HsvaColor;
use crate::constants;
use crate::error::PickerError;
use crate::events::Callbacks;
use crate::hue_slider::HueSlider;
use crate::mapping;
use crate::snapshot::{PickerSnapshot, SliderSnapshot};
use crate::track::{SliderTrack, TrackShape};

/// Payload for picker `changed`/`change_end` events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorChanged {
    /// The composed color, alpha included.
    pub color: HsvaColor,
}

struct PickerState {
    track: SliderTrack,
    /// Validated to [0, 360]; 360 (from a hue slider's rightmost pixel)
    /// wraps to red when composed.
    hue: f64,
    /// Raw during a drag; clamped whenever a color is composed.
    saturation: f64,
    value: f64,
    /// Tracked separately from the HSV triple, folded in at read time.
    alpha: f64,
    stroke_color: HsvaColor,
    stroke_size: f64,
    hue_slider: Option<HueSlider>,
    #[cfg(feature = "alpha")]
    alpha_slider: Option<AlphaSlider>,
}

impl PickerState {
    /// Re-derive saturation/value from the indicator and return the
    /// composed color at full alpha.
    fn recalculate(&mut self) -> HsvaColor {
        if self.track.is_fresh() {
            self.saturation = 1.0;
            self.value = 1.0;
        } else {
            let (x, y) = self.track.position();
            let bounds = self.track.bounds();
            let (s, v) = mapping::position_to_sv(x, y, &bounds);
            self.saturation = s;
            self.value = v;
        }
        HsvaColor::new(self.hue, self.saturation, self.value, 1.0)
    }
}

/// Composite color picker state, shared between the host and its view.
///
/// Cheap to clone; clones refer to the same widget.
#[derive(Clone)]
pub struct ColorPicker {
    state: Rc<RefCell<PickerState>>,
    changed: Rc<Callbacks<ColorChanged>>,
    change_end: Rc<Callbacks<ColorChanged>>,
    invalidated: Rc<Callbacks<()>>,
}

/// Finalize the picker's own state, then notify: push the full-alpha color
/// to an attached alpha slider so its gradient tracks the hue, emit
/// `changed` with the composed color, and request a repaint. State is
/// always settled before any listener runs.
fn refresh(
    state: &Rc<RefCell<PickerState>>,
    changed: &Callbacks<ColorChanged>,
    invalidated: &Callbacks<()>,
) {
    #[cfg(feature = "alpha")]
    let (full, composed, alpha_slider) = {
        let mut s = state.borrow_mut();
        let full = s.recalculate();
        (full, full.with_alpha(s.alpha), s.alpha_slider.clone())
    };
    #[cfg(not(feature = "alpha"))]
    let composed = {
        let mut s = state.borrow_mut();
        let full = s.recalculate();
        full.with_alpha(s.alpha)
    };

    #[cfg(feature = "alpha")]
    if let Some(slider) = alpha_slider {
        slider.set_selected_color(full);
    }

    changed.emit(&ColorChanged { color: composed });
    invalidated.emit(&());
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPicker {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(PickerState {
                track: SliderTrack::new(TrackShape::Plane, constants::PICKER_INDICATOR_RADIUS),
                hue: 0.0,
                saturation: 1.0,
                value: 1.0,
                alpha: 1.0,
                stroke_color: HsvaColor::new(0.0, 0.0, 1.0, 1.0),
                stroke_size: constants::STROKE_SIZE,
                hue_slider: None,
                #[cfg(feature = "alpha")]
                alpha_slider: None,
            })),
            changed: Rc::new(Callbacks::new()),
            change_end: Rc::new(Callbacks::new()),
            invalidated: Rc::new(Callbacks::new()),
        }
    }

    /// The selected color, recomposed live from hue/saturation/value and
    /// the separately tracked alpha.
    pub fn color(&self) -> HsvaColor {
        let s = self.state.borrow();
        HsvaColor::new(s.hue, s.saturation, s.value, s.alpha)
    }

    /// Hue in degrees [0, 360].
    pub fn hue(&self) -> f64 {
        self.state.borrow().hue
    }

    /// Saturation as last derived from the indicator (raw during a drag).
    pub fn saturation(&self) -> f64 {
        self.state.borrow().saturation
    }

    /// Value as last derived from the indicator (raw during a drag).
    pub fn value(&self) -> f64 {
        self.state.borrow().value
    }

    /// Alpha in [0, 1].
    pub fn alpha_value(&self) -> f64 {
        self.state.borrow().alpha
    }

    /// Set the hue, keeping the indicator (saturation/value) where it is.
    ///
    /// Fails on hue outside [0, 360] without touching any state.
    pub fn set_hue(&self, hue: f64) -> Result<(), PickerError> {
        if !(0.0..=360.0).contains(&hue) {
            return Err(PickerError::InvalidHue(hue));
        }
        self.state.borrow_mut().hue = hue;
        refresh(&self.state, &self.changed, &self.invalidated);
        Ok(())
    }

    /// Set the full color from a packed 0xAARRGGBB value.
    ///
    /// Decomposes to HSVA, moves the indicator, pushes hue and alpha to any
    /// attached sliders, and fires `changed` once with the composed color.
    /// This is the one path where the picker actively writes to both
    /// attached sliders.
    pub fn set_color(&self, argb: u32) {
        let c = HsvaColor::from_argb(argb);
        let hue_slider;
        #[cfg(feature = "alpha")]
        let alpha_slider;
        {
            let mut s = self.state.borrow_mut();
            s.hue = c.hue();
            s.alpha = c.alpha();
            s.track.set_factors(c.saturation(), 1.0 - c.value());
            hue_slider = s.hue_slider.clone();
            #[cfg(feature = "alpha")]
            {
                alpha_slider = s.alpha_slider.clone();
            }
        }
        if let Some(slider) = hue_slider {
            // In range by construction; the slider move is silent.
            let _ = slider.set_hue(c.hue());
        }
        #[cfg(feature = "alpha")]
        if let Some(slider) = alpha_slider {
            slider.set_alpha_value(c.alpha());
        }
        refresh(&self.state, &self.changed, &self.invalidated);
    }

    /// Attach a hue slider: adopt its current hue now, then follow its
    /// drags. The picker never writes back on its own plane drags.
    pub fn attach_hue_slider(&self, slider: &HueSlider) {
        {
            let mut s = self.state.borrow_mut();
            s.hue_slider = Some(slider.clone());
            s.hue = slider.hue().clamp(0.0, 360.0);
        }
        refresh(&self.state, &self.changed, &self.invalidated);

        let state: Weak<RefCell<PickerState>> = Rc::downgrade(&self.state);
        let changed = self.changed.clone();
        let invalidated = self.invalidated.clone();
        slider.on_changed(move |ev| {
            let Some(state) = state.upgrade() else { return };
            // The slider's rightmost pixel reports a raw 360; clamp on
            // consumption, composition wraps it to red.
            state.borrow_mut().hue = ev.hue.clamp(0.0, 360.0);
            refresh(&state, &changed, &invalidated);
        });
    }

    /// Attach an alpha slider: seed its gradient with the current
    /// full-alpha color, then follow its drags.
    #[cfg(feature = "alpha")]
    pub fn attach_alpha_slider(&self, slider: &AlphaSlider) {
        let full = {
            let mut s = self.state.borrow_mut();
            s.alpha_slider = Some(slider.clone());
            s.recalculate()
        };
        slider.set_selected_color(full);

        let state: Weak<RefCell<PickerState>> = Rc::downgrade(&self.state);
        let changed = self.changed.clone();
        let invalidated = self.invalidated.clone();
        slider.on_changed(move |ev| {
            let Some(state) = state.upgrade() else { return };
            let composed = {
                let mut s = state.borrow_mut();
                s.alpha = ev.alpha;
                HsvaColor::new(s.hue, s.saturation, s.value, s.alpha)
            };
            changed.emit(&ColorChanged { color: composed });
            invalidated.emit(&());
        });
    }

    pub fn indicator_radius(&self) -> f64 {
        self.state.borrow().track.indicator_radius()
    }

    pub fn set_indicator_radius(&self, radius: f64) {
        self.state.borrow_mut().track.set_indicator_radius(radius);
        self.invalidated.emit(&());
    }

    pub fn stroke_color(&self) -> HsvaColor {
        self.state.borrow().stroke_color
    }

    pub fn set_stroke_color(&self, color: HsvaColor) {
        self.state.borrow_mut().stroke_color = color;
        self.invalidated.emit(&());
    }

    pub fn stroke_size(&self) -> f64 {
        self.state.borrow().stroke_size
    }

    pub fn set_stroke_size(&self, size: f64) {
        self.state.borrow_mut().stroke_size = size;
        self.invalidated.emit(&());
    }

    /// Subscribe to per-move changes during a drag (and programmatic sets).
    pub fn on_changed(&self, callback: impl Fn(&ColorChanged) + 'static) {
        self.changed.subscribe(callback);
    }

    /// Subscribe to the commit event at the end of a gesture.
    pub fn on_change_end(&self, callback: impl Fn(&ColorChanged) + 'static) {
        self.change_end.subscribe(callback);
    }

    /// Capture the normalized indicator position plus the hue and alpha
    /// scalars (the factors alone cannot reconstruct hue).
    pub fn save_state(&self) -> PickerSnapshot {
        let s = self.state.borrow();
        let (factor_x, factor_y) = s.track.factors();
        PickerSnapshot {
            track: SliderSnapshot { factor_x, factor_y },
            hue: s.hue,
            alpha: s.alpha,
        }
    }

    /// Re-arm the picker from a snapshot; the indicator's pixel position is
    /// re-derived at the next layout. Attached sliders restore themselves
    /// from their own snapshots.
    pub fn restore_state(&self, snapshot: &PickerSnapshot) {
        {
            let mut s = self.state.borrow_mut();
            s.hue = snapshot.hue.clamp(0.0, 360.0);
            s.alpha = snapshot.alpha.clamp(0.0, 1.0);
            s.track
                .restore_factors(snapshot.track.factor_x, snapshot.track.factor_y);
        }
        refresh(&self.state, &self.changed, &self.invalidated);
    }

    pub(crate) fn viewport_resized(&self, width: f64, height: f64) {
        self.state.borrow_mut().track.viewport_resized(width, height);
        refresh(&self.state, &self.changed, &self.invalidated);
    }

    pub(crate) fn pointer_changed(&self, ex: f64, ey: f64) {
        self.state.borrow_mut().track.drag_to(ex, ey);
        refresh(&self.state, &self.changed, &self.invalidated);
    }

    pub(crate) fn pointer_released(&self, ex: f64, ey: f64) {
        self.pointer_changed(ex, ey);
        self.state.borrow_mut().track.end_drag();
        self.change_end.emit(&ColorChanged {
            color: self.color(),
        });
    }

    pub(crate) fn gesture_cancelled(&self) {
        self.state.borrow_mut().track.end_drag();
        self.change_end.emit(&ColorChanged {
            color: self.color(),
        });
    }

    pub(crate) fn on_invalidate(&self, callback: impl Fn() + 'static) {
        self.invalidated.subscribe(move |_| callback());
    }

    pub(crate) fn track_geometry(&self) -> (crate::track::TrackBounds, (f64, f64), f64) {
        let s = self.state.borrow();
        (
            s.track.bounds(),
            s.track.position(),
            s.track.indicator_radius(),
        )
    }

    /// The full-alpha color under the indicator, for painting.
    pub(crate) fn indicator_color(&self) -> HsvaColor {
        let s = self.state.borrow();
        HsvaColor::new(s.hue, s.saturation, s.value, 1.0)
    }
}

/// Rasterize the saturation/value plane for `hue`: white→hue left to
/// right, fading to black top to bottom.
fn rasterize_sv_plane(hue: f64, size: u32) -> Vec<u8> {
    let mut buf = vec![0u8; (size * size * 4) as usize];
    let max = (size - 1).max(1) as f64;
    for py in 0..size {
        let v = 1.0 - py as f64 / max;
        let row_offset = (py * size * 4) as usize;
        for px in 0..size {
            let s = px as f64 / max;
            let (r, g, b) = crate::math::hsv_to_rgb(hue, s, v);
            let offset = row_offset + (px * 4) as usize;
            buf[offset] = (r * 255.0 + 0.5) as u8;
            buf[offset + 1] = (g * 255.0 + 0.5) as u8;
            buf[offset + 2] = (b * 255.0 + 0.5) as u8;
            buf[offset + 3] = 255;
        }
    }
    buf
}

pub struct ColorPickerView {
    id: ViewId,
    picker: ColorPicker,
    held: bool,
    size: floem::taffy::prelude::Size<f32>,
    /// Cached SV plane image, regenerated when the hue moves.
    plane_img: Option<peniko::Image>,
    plane_hash: Vec<u8>,
    cached_hue_key: u32,
}

/// Creates the 2D saturation/value picker view over `picker`.
pub fn color_picker(picker: &ColorPicker) -> ColorPickerView {
    let id = ViewId::new();

    picker.on_invalidate(move || id.request_layout());

    ColorPickerView {
        id,
        picker: picker.clone(),
        held: false,
        size: Default::default(),
        plane_img: None,
        plane_hash: Vec::new(),
        cached_hue_key: u32::MAX,
    }
    .style(|s| {
        s.size(constants::PICKER_SIZE, constants::PICKER_SIZE)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl ColorPickerView {
    fn ensure_plane_image(&mut self) {
        // Tenth-of-a-degree resolution is plenty for the backdrop.
        let hue = self.picker.hue();
        let key = (hue * 10.0).round() as u32;
        if self.plane_img.is_some() && key == self.cached_hue_key {
            return;
        }
        let size = constants::SV_RASTER_SIZE;
        let pixels = rasterize_sv_plane(hue, size);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, size, size);
        self.plane_hash = blob.id().to_le_bytes().to_vec();
        self.plane_img = Some(img);
        self.cached_hue_key = key;
    }
}

impl View for ColorPickerView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                self.picker.pointer_changed(e.pos.x, e.pos.y);
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    self.picker.pointer_changed(e.pos.x, e.pos.y);
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                if self.held {
                    self.held = false;
                    self.picker.pointer_released(e.pos.x, e.pos.y);
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                if self.held {
                    self.held = false;
                    self.picker.gesture_cancelled();
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        if layout.size != self.size {
            self.size = layout.size;
            self.picker
                .viewport_resized(layout.size.width as f64, layout.size.height as f64);
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let (bounds, (ix, iy), radius) = self.picker.track_geometry();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }

        let plane_rect = Rect::new(bounds.start_x, bounds.start_y, bounds.end_x, bounds.end_y);
        self.ensure_plane_image();
        if let Some(ref img) = self.plane_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.plane_hash,
                },
                plane_rect,
            );
        }

        // Indicator: stroke-colored disc with the full-alpha color inside.
        let stroke = self.picker.stroke_size();
        let (sr, sg, sb, sa) = self.picker.stroke_color().to_rgba_f64();
        let center = (ix, iy);
        cx.fill(&Circle::new(center, radius), Color::rgba(sr, sg, sb, sa), 0.0);
        let (r, g, b, _) = self.picker.indicator_color().to_rgba_f64();
        cx.fill(
            &Circle::new(center, (radius - stroke).max(0.0)),
            Color::rgba(r, g, b, 1.0),
            0.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Picker laid out 344x344: 12px indicator radius gives bounds
    /// 12..=332 on both axes, span 320.
    fn laid_picker() -> ColorPicker {
        let p = ColorPicker::new();
        p.viewport_resized(344.0, 344.0);
        p
    }

    fn laid_hue_slider() -> HueSlider {
        let s = HueSlider::new();
        s.viewport_resized(360.0, 48.0);
        s
    }

    #[cfg(feature = "alpha")]
    fn laid_alpha_slider() -> AlphaSlider {
        let s = AlphaSlider::new();
        s.viewport_resized(224.0, 48.0);
        s
    }

    #[test]
    fn first_layout_selects_max_saturation_and_value() {
        let p = laid_picker();
        assert_eq!(p.saturation(), 1.0);
        assert_eq!(p.value(), 1.0);
        let (bounds, (x, y), _) = p.track_geometry();
        assert_eq!((x, y), (bounds.end_x, bounds.start_y));
    }

    #[test]
    fn drag_derives_saturation_and_value() {
        let p = laid_picker();
        // Center of the plane.
        p.pointer_changed(172.0, 172.0);
        assert!((p.saturation() - 0.5).abs() < 1e-9);
        assert!((p.value() - 0.5).abs() < 1e-9);
        // Bottom-left corner.
        p.pointer_released(12.0, 332.0);
        assert_eq!(p.saturation(), 0.0);
        assert_eq!(p.value(), 0.0);
    }

    #[test]
    fn set_hue_rejects_out_of_range_without_mutation() {
        let p = laid_picker();
        p.set_hue(90.0).unwrap();
        let before = p.color();
        assert_eq!(p.set_hue(400.0), Err(PickerError::InvalidHue(400.0)));
        assert_eq!(p.set_hue(-0.5), Err(PickerError::InvalidHue(-0.5)));
        assert_eq!(p.hue(), 90.0);
        assert_eq!(p.color(), before);
    }

    #[test]
    fn attach_adopts_the_sliders_current_hue() {
        let p = laid_picker();
        let hs = laid_hue_slider();
        hs.set_hue(200.0).unwrap();
        p.attach_hue_slider(&hs);
        assert!((p.hue() - 200.0).abs() <= 1.0);
    }

    #[test]
    fn hue_slider_drag_drives_the_picker() {
        let p = laid_picker();
        let hs = laid_hue_slider();
        p.attach_hue_slider(&hs);

        let changes = Rc::new(Cell::new(0));
        let c = changes.clone();
        p.on_changed(move |_| c.set(c.get() + 1));

        // Track runs 12..=348; halfway is hue 180.
        hs.pointer_changed(180.0, 24.0);
        assert_eq!(p.hue(), 180.0);
        assert_eq!(changes.get(), 1);

        // Rightmost pixel reports a raw 360; the picker clamps on
        // consumption and composes it as red.
        hs.pointer_changed(348.0, 24.0);
        assert_eq!(hs.hue(), 360.0);
        assert_eq!(p.hue(), 360.0);
        assert_eq!(p.color().to_rgb8(), (255, 0, 0));
    }

    #[test]
    #[cfg(feature = "alpha")]
    fn alpha_slider_drag_updates_picker_alpha() {
        let p = laid_picker();
        let als = laid_alpha_slider();
        p.attach_alpha_slider(&als);

        let last = Rc::new(Cell::new(0.0f64));
        let l = last.clone();
        p.on_changed(move |ev| l.set(ev.color.alpha()));

        als.pointer_changed(112.0, 24.0);
        assert!((p.alpha_value() - 0.5).abs() < 1e-9);
        assert!((last.get() - 0.5).abs() < 1e-9);
    }

    #[test]
    #[cfg(feature = "alpha")]
    fn plane_drag_reseeds_alpha_slider_gradient_but_not_hue_slider() {
        let p = laid_picker();
        let hs = laid_hue_slider();
        let als = laid_alpha_slider();
        p.attach_hue_slider(&hs);
        p.attach_alpha_slider(&als);
        p.set_hue(240.0).unwrap();
        let hue_before = hs.hue();

        p.pointer_changed(172.0, 172.0);
        // Alpha slider's gradient follows the picker's full-alpha color.
        assert_eq!(als.selected_color().alpha(), 1.0);
        assert!((als.selected_color().hue() - 240.0).abs() < 1.0);
        // No write-back into the hue slider on plane drags.
        assert_eq!(hs.hue(), hue_before);
    }

    #[test]
    #[cfg(feature = "alpha")]
    fn set_color_pushes_to_both_sliders_and_fires_once() {
        let p = laid_picker();
        let hs = laid_hue_slider();
        let als = laid_alpha_slider();
        p.attach_hue_slider(&hs);
        p.attach_alpha_slider(&als);

        let fires = Rc::new(Cell::new(0));
        let last = Rc::new(Cell::new(HsvaColor::default()));
        let f = fires.clone();
        let l = last.clone();
        p.on_changed(move |ev| {
            f.set(f.get() + 1);
            l.set(ev.color);
        });

        // Pure green at half alpha.
        p.set_color(0x8000FF00);

        assert!((p.hue() - 120.0).abs() < 1e-9);
        assert_eq!(p.saturation(), 1.0);
        assert_eq!(p.value(), 1.0);
        assert!((p.alpha_value() - 128.0 / 255.0).abs() < 1e-9);
        assert!((als.alpha_value() - 128.0 / 255.0).abs() < 1e-9);
        assert!((hs.hue() - 120.0).abs() <= 1.0);
        assert_eq!(fires.get(), 1);
        assert_eq!(last.get().to_argb(), 0x8000FF00);
    }

    #[test]
    fn resize_preserves_the_normalized_indicator() {
        let p = laid_picker();
        p.pointer_changed(92.0, 252.0);
        p.pointer_released(92.0, 252.0);
        let (s, v) = (p.saturation(), p.value());
        p.viewport_resized(664.0, 664.0);
        assert!((p.saturation() - s).abs() < 1e-9);
        assert!((p.value() - v).abs() < 1e-9);
    }

    #[test]
    fn snapshot_round_trip() {
        let p = laid_picker();
        p.set_hue(210.0).unwrap();
        p.pointer_changed(92.0, 252.0);
        p.pointer_released(92.0, 252.0);
        let snap = p.save_state();

        let restored = ColorPicker::new();
        restored.restore_state(&snap);
        restored.viewport_resized(664.0, 664.0);
        assert_eq!(restored.hue(), 210.0);
        assert!((restored.saturation() - p.saturation()).abs() < 1e-9);
        assert!((restored.value() - p.value()).abs() < 1e-9);
        assert!((restored.alpha_value() - p.alpha_value()).abs() < 1e-9);
    }

    #[test]
    fn change_end_fires_on_release_only() {
        let p = laid_picker();
        let ends = Rc::new(Cell::new(0));
        let e = ends.clone();
        p.on_change_end(move |_| e.set(e.get() + 1));
        p.pointer_changed(100.0, 100.0);
        p.pointer_changed(110.0, 110.0);
        assert_eq!(ends.get(), 0);
        p.pointer_released(120.0, 120.0);
        assert_eq!(ends.get(), 1);
    }
}
