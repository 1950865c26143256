//! Alpha slider (0.0–1.0) with checkerboard background and a
//! transparent-to-opaque gradient of the selected base color.
//!
//! The base color only drives the gradient and the indicator fill; the
//! slider's own value is just the alpha factor along the track (transparent
//! at the start, opaque at the end).

use std::cell::RefCell;
use std::rc::Rc;

use floem::kurbo::{Circle, Rect, Shape};
use floem::peniko::{Color, Gradient};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::checkerboard;
use crate::color::HsvaColor;
use crate::constants;
use crate::events::Callbacks;
use crate::mapping;
use crate::snapshot::AlphaSliderSnapshot;
use crate::track::{SliderTrack, TrackShape};

/// Payload for alpha slider `changed`/`change_end` events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaChanged {
    /// Alpha in [0, 1].
    pub alpha: f64,
}

struct AlphaSliderState {
    track: SliderTrack,
    alpha: f64,
    selected_color: HsvaColor,
    stroke_color: HsvaColor,
    stroke_size: f64,
}

/// Alpha slider widget state, shared between the host and its view.
///
/// Cheap to clone; clones refer to the same widget.
#[derive(Clone)]
pub struct AlphaSlider {
    state: Rc<RefCell<AlphaSliderState>>,
    changed: Rc<Callbacks<AlphaChanged>>,
    change_end: Rc<Callbacks<AlphaChanged>>,
    invalidated: Rc<Callbacks<()>>,
}

impl Default for AlphaSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl AlphaSlider {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(AlphaSliderState {
                track: SliderTrack::new(TrackShape::Bar, constants::THUMB_RADIUS),
                alpha: 1.0,
                selected_color: HsvaColor::default(),
                stroke_color: HsvaColor::new(0.0, 0.0, 1.0, 1.0),
                stroke_size: constants::STROKE_SIZE,
            })),
            changed: Rc::new(Callbacks::new()),
            change_end: Rc::new(Callbacks::new()),
            invalidated: Rc::new(Callbacks::new()),
        }
    }

    /// Current alpha in [0, 1].
    pub fn alpha_value(&self) -> f64 {
        self.state.borrow().alpha
    }

    /// Move the indicator to `alpha` (clamped) without firing `changed`.
    pub fn set_alpha_value(&self, alpha: f64) {
        {
            let mut s = self.state.borrow_mut();
            s.track.set_factors(alpha.clamp(0.0, 1.0), 0.0);
            s.alpha = Self::alpha_at_indicator(&s.track).unwrap_or_else(|| alpha.clamp(0.0, 1.0));
        }
        self.invalidated.emit(&());
    }

    /// The base color the gradient runs to (always opaque).
    pub fn selected_color(&self) -> HsvaColor {
        self.state.borrow().selected_color
    }

    /// Change the gradient's base color. The alpha value is unaffected.
    pub fn set_selected_color(&self, color: HsvaColor) {
        {
            let mut s = self.state.borrow_mut();
            let opaque = color.opaque();
            if s.selected_color == opaque {
                return;
            }
            s.selected_color = opaque;
        }
        self.invalidated.emit(&());
    }

    /// The selected color with the current alpha applied.
    pub fn indicator_color(&self) -> HsvaColor {
        let s = self.state.borrow();
        s.selected_color.with_alpha(s.alpha)
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
    pub fn on_changed(&self, callback: impl Fn(&AlphaChanged) + 'static) {
        self.changed.subscribe(callback);
    }

    /// Subscribe to the commit event at the end of a gesture.
    pub fn on_change_end(&self, callback: impl Fn(&AlphaChanged) + 'static) {
        self.change_end.subscribe(callback);
    }

    /// Capture the normalized indicator position and the base color.
    pub fn save_state(&self) -> AlphaSliderSnapshot {
        let s = self.state.borrow();
        let (factor_x, factor_y) = s.track.factors();
        AlphaSliderSnapshot {
            track: crate::snapshot::SliderSnapshot { factor_x, factor_y },
            selected_color: s.selected_color.to_argb(),
        }
    }

    /// Re-arm the slider from a snapshot; pixel position is re-derived at
    /// the next layout.
    pub fn restore_state(&self, snapshot: &AlphaSliderSnapshot) {
        {
            let mut s = self.state.borrow_mut();
            s.selected_color = HsvaColor::from_argb(snapshot.selected_color).opaque();
            s.track
                .restore_factors(snapshot.track.factor_x, snapshot.track.factor_y);
            if let Some(alpha) = Self::alpha_at_indicator(&s.track) {
                s.alpha = alpha;
            }
        }
        self.invalidated.emit(&());
    }

    fn alpha_at_indicator(track: &SliderTrack) -> Option<f64> {
        if track.is_fresh() {
            return None;
        }
        let b = track.bounds();
        Some(mapping::position_to_alpha(
            track.position().0,
            b.start_x,
            b.end_x,
        ))
    }

    pub(crate) fn viewport_resized(&self, width: f64, height: f64) {
        let mut s = self.state.borrow_mut();
        s.track.viewport_resized(width, height);
        if let Some(alpha) = Self::alpha_at_indicator(&s.track) {
            s.alpha = alpha;
        }
    }

    pub(crate) fn pointer_changed(&self, ex: f64, ey: f64) {
        let alpha = {
            let mut s = self.state.borrow_mut();
            s.track.drag_to(ex, ey);
            if let Some(alpha) = Self::alpha_at_indicator(&s.track) {
                s.alpha = alpha;
            }
            s.alpha
        };
        self.changed.emit(&AlphaChanged { alpha });
        self.invalidated.emit(&());
    }

    pub(crate) fn pointer_released(&self, ex: f64, ey: f64) {
        self.pointer_changed(ex, ey);
        let alpha = {
            let mut s = self.state.borrow_mut();
            s.track.end_drag();
            s.alpha
        };
        self.change_end.emit(&AlphaChanged { alpha });
    }

    pub(crate) fn gesture_cancelled(&self) {
        let alpha = {
            let mut s = self.state.borrow_mut();
            s.track.end_drag();
            s.alpha
        };
        self.change_end.emit(&AlphaChanged { alpha });
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

pub struct AlphaSliderView {
    id: ViewId,
    slider: AlphaSlider,
    held: bool,
    size: floem::taffy::prelude::Size<f32>,
}

/// Creates a horizontal alpha slider view over `slider`.
pub fn alpha_slider(slider: &AlphaSlider) -> AlphaSliderView {
    let id = ViewId::new();

    slider.on_invalidate(move || id.request_layout());

    AlphaSliderView {
        id,
        slider: slider.clone(),
        held: false,
        size: Default::default(),
    }
    .style(|s| {
        s.height(constants::SLIDER_SIZE)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl View for AlphaSliderView {
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
        checkerboard::paint_checkerboard(cx, track_rect);

        // Transparent (start) → opaque selected color (end).
        let (r, g, b, _) = self.slider.selected_color().to_rgba_f64();
        let transparent = Color::rgba(r, g, b, 0.0);
        let solid = Color::rgba(r, g, b, 1.0);
        let cy = bounds.start_y;
        let gradient = Gradient::new_linear((track_rect.x0, cy), (track_rect.x1, cy))
            .with_stops([transparent, solid]);
        // Convert to BezPath so the vello renderer uses the general path
        // handler (its Rect fast-path only supports solid colors).
        let path = track_rect.to_path(0.1);
        cx.fill(&path, &gradient, 0.0);
        cx.restore();

        // Indicator: stroke-colored disc with the selected color at the
        // current alpha inside.
        let stroke = self.slider.stroke_size();
        let (sr, sg, sb, sa) = self.slider.stroke_color().to_rgba_f64();
        let center = (ix, iy);
        cx.fill(&Circle::new(center, radius), Color::rgba(sr, sg, sb, sa), 0.0);
        let (r, g, b, a) = self.slider.indicator_color().to_rgba_f64();
        cx.fill(
            &Circle::new(center, (radius - stroke).max(0.0)),
            Color::rgba(r, g, b, a),
            0.0,
        );
    }
}
