//! Hue slider (0–360 degrees).
//!
//! A horizontal bar painted with the full hue sweep, one raster column per
//! degree, scaled by the renderer to whatever width the track gets. The
//! raw mapped value at the rightmost pixel is 360 (pre-clamp, see
//! [`crate::mapping::position_to_hue`]); consumers wrap it.

use std::cell::RefCell;
use std::rc::Rc;
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

use crate::color::HsvaColor;
use crate::constants;
use crate::events::Callbacks;
use crate::mapping;
use crate::snapshot::SliderSnapshot;
use crate::track::{SliderTrack, TrackShape};

/// Payload for hue slider `changed`/`change_end` events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueChanged {
    /// Raw mapped hue; 360 at the rightmost pixel.
    pub hue: f64,
    /// The hue at full saturation/value, opaque.
    pub color: HsvaColor,
}

struct HueSliderState {
    track: SliderTrack,
    hue: f64,
    stroke_color: HsvaColor,
    stroke_size: f64,
}

/// Hue slider widget state, shared between the host and its view.
///
/// Cheap to clone; clones refer to the same widget.
#[derive(Clone)]
pub struct HueSlider {
    state: Rc<RefCell<HueSliderState>>,
    changed: Rc<Callbacks<HueChanged>>,
    change_end: Rc<Callbacks<HueChanged>>,
    invalidated: Rc<Callbacks<()>>,
}

impl Default for HueSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl HueSlider {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HueSliderState {
                track: SliderTrack::new(TrackShape::Bar, constants::THUMB_RADIUS),
                hue: 360.0,
                stroke_color: HsvaColor::new(0.0, 0.0, 1.0, 1.0),
                stroke_size: constants::STROKE_SIZE,
            })),
            changed: Rc::new(Callbacks::new()),
            change_end: Rc::new(Callbacks::new()),
            invalidated: Rc::new(Callbacks::new()),
        }
    }

    /// Current hue. Raw: a drag to the track end reports 360.
    pub fn hue(&self) -> f64 {
        self.state.borrow().hue
    }

    /// Move the indicator to `hue` without firing `changed`.
    ///
    /// Fails on hue outside [0, 360], leaving the slider untouched.
    pub fn set_hue(&self, hue: f64) -> Result<(), crate::PickerError> {
        if !(0.0..=360.0).contains(&hue) {
            return Err(crate::PickerError::InvalidHue(hue));
        }
        {
            let mut s = self.state.borrow_mut();
            s.track
                .set_factors(mapping::hue_to_position_factor(hue), 0.0);
            s.hue = Self::hue_at_indicator(&s.track).unwrap_or(hue);
        }
        self.invalidated.emit(&());
        Ok(())
    }

    /// The color under the indicator: the hue at full saturation/value.
    pub fn indicator_color(&self) -> HsvaColor {
        HsvaColor::new(self.state.borrow().hue, 1.0, 1.0, 1.0)
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

    /// Subscribe to per-move changes during a drag.
    pub fn on_changed(&self, callback: impl Fn(&HueChanged) + 'static) {
        self.changed.subscribe(callback);
    }

    /// Subscribe to the commit event at the end of a gesture.
    pub fn on_change_end(&self, callback: impl Fn(&HueChanged) + 'static) {
        self.change_end.subscribe(callback);
    }

    /// Capture the normalized indicator position.
    pub fn save_state(&self) -> SliderSnapshot {
        let (factor_x, factor_y) = self.state.borrow().track.factors();
        SliderSnapshot { factor_x, factor_y }
    }

    /// Re-arm the indicator from a snapshot; pixel position is re-derived
    /// at the next layout.
    pub fn restore_state(&self, snapshot: &SliderSnapshot) {
        {
            let mut s = self.state.borrow_mut();
            s.track
                .restore_factors(snapshot.factor_x, snapshot.factor_y);
            if let Some(hue) = Self::hue_at_indicator(&s.track) {
                s.hue = hue;
            }
        }
        self.invalidated.emit(&());
    }

    fn hue_at_indicator(track: &SliderTrack) -> Option<f64> {
        if track.is_fresh() {
            return None;
        }
        let b = track.bounds();
        Some(mapping::position_to_hue(
            track.position().0,
            b.start_x,
            b.end_x,
        ))
    }

    fn event(&self) -> HueChanged {
        let s = self.state.borrow();
        HueChanged {
            hue: s.hue,
            color: HsvaColor::new(s.hue, 1.0, 1.0, 1.0),
        }
    }

    pub(crate) fn viewport_resized(&self, width: f64, height: f64) {
        let mut s = self.state.borrow_mut();
        s.track.viewport_resized(width, height);
        if let Some(hue) = Self::hue_at_indicator(&s.track) {
            s.hue = hue;
        }
    }

    pub(crate) fn pointer_changed(&self, ex: f64, ey: f64) {
        {
            let mut s = self.state.borrow_mut();
            s.track.drag_to(ex, ey);
            if let Some(hue) = Self::hue_at_indicator(&s.track) {
                s.hue = hue;
            }
        }
        self.changed.emit(&self.event());
        self.invalidated.emit(&());
    }

    pub(crate) fn pointer_released(&self, ex: f64, ey: f64) {
        self.pointer_changed(ex, ey);
        self.state.borrow_mut().track.end_drag();
        self.change_end.emit(&self.event());
    }

    pub(crate) fn gesture_cancelled(&self) {
        self.state.borrow_mut().track.end_drag();
        self.change_end.emit(&self.event());
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
}

/// Rasterize the hue sweep, one column per degree.
fn rasterize_hue_strip() -> Vec<u8> {
    let width = constants::HUE_RASTER_WIDTH;
    let mut buf = vec![0u8; (width * 4) as usize];
    for px in 0..width {
        let (r, g, b) = crate::math::hsv_to_rgb(px as f64, 1.0, 1.0);
        let offset = (px * 4) as usize;
        buf[offset] = (r * 255.0 + 0.5) as u8;
        buf[offset + 1] = (g * 255.0 + 0.5) as u8;
        buf[offset + 2] = (b * 255.0 + 0.5) as u8;
        buf[offset + 3] = 255;
    }
    buf
}

pub struct HueSliderView {
    id: ViewId,
    slider: HueSlider,
    held: bool,
    size: floem::taffy::prelude::Size<f32>,
    /// Cached hue strip image, rasterized once.
    strip_img: Option<peniko::Image>,
    strip_hash: Vec<u8>,
}

/// Creates a horizontal hue slider view over `slider`.
pub fn hue_slider(slider: &HueSlider) -> HueSliderView {
    let id = ViewId::new();

    slider.on_invalidate(move || id.request_layout());

    HueSliderView {
        id,
        slider: slider.clone(),
        held: false,
        size: Default::default(),
        strip_img: None,
        strip_hash: Vec::new(),
    }
    .style(|s| {
        s.height(constants::SLIDER_SIZE)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl HueSliderView {
    fn ensure_strip_image(&mut self) {
        if self.strip_img.is_some() {
            return;
        }
        let pixels = rasterize_hue_strip();
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob, peniko::Format::Rgba8, constants::HUE_RASTER_WIDTH, 1);
        self.strip_hash = b"hue-strip".to_vec();
        self.strip_img = Some(img);
    }
}

impl View for HueSliderView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                self.slider.pointer_changed(e.pos.x, e.pos.y);
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    self.slider.pointer_changed(e.pos.x, e.pos.y);
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                if self.held {
                    self.held = false;
                    self.slider.pointer_released(e.pos.x, e.pos.y);
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                if self.held {
                    self.held = false;
                    self.slider.gesture_cancelled();
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
            self.slider
                .viewport_resized(layout.size.width as f64, layout.size.height as f64);
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let (bounds, (ix, iy), radius) = self.slider.track_geometry();
        if bounds.width() <= 0.0 {
            return;
        }

        let h = self.size.height as f64;
        // Track thickness is half the view height, matching the default
        // indicator overhang.
        let thickness = h / 2.0;
        let track_rect = Rect::new(
            bounds.start_x,
            bounds.start_y - thickness / 2.0,
            bounds.end_x,
            bounds.start_y + thickness / 2.0,
        );
        let rrect = track_rect.to_rounded_rect(thickness / 2.0);

        cx.save();
        cx.clip(&rrect);
        self.ensure_strip_image();
        if let Some(ref img) = self.strip_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.strip_hash,
                },
                track_rect,
            );
        }
        cx.restore();

        // Indicator: stroke-colored disc with the current hue inside.
        let stroke = self.slider.stroke_size();
        let (sr, sg, sb, sa) = self.slider.stroke_color().to_rgba_f64();
        let center = (ix, iy);
        cx.fill(&Circle::new(center, radius), Color::rgba(sr, sg, sb, sa), 0.0);
        let (r, g, b, _) = self.slider.indicator_color().to_rgba_f64();
        cx.fill(
            &Circle::new(center, (radius - stroke).max(0.0)),
            Color::rgba(r, g, b, 1.0),
            0.0,
        );
    }
}
