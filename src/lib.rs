//! # floem-hsva
//!
//! Track-style HSVA color picker widgets for [Floem](https://github.com/lapce/floem):
//! a hue slider, an alpha slider, and a 2D saturation/value picker, each a
//! gradient track with a draggable circular indicator.
//!
//! Widget state is a cheap-to-clone handle ([`HueSlider`], [`AlphaSlider`],
//! [`ColorPicker`]) shared between the host and the corresponding view.
//! The picker composes with the sliders via [`ColorPicker::attach_hue_slider`]
//! and [`ColorPicker::attach_alpha_slider`]; sync is one-directional
//! (slider → picker on drags, picker → sliders only on programmatic color
//! sets). Indicator positions are tracked as normalized factors, so widgets
//! resize without the indicator jumping, and snapshots restore across
//! view recreation at any size.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem_hsva::{color_picker, hue_slider, ColorPicker, HueSlider};
//!
//! let picker = ColorPicker::new();
//! let hue = HueSlider::new();
//! picker.attach_hue_slider(&hue);
//! picker.on_changed(|ev| println!("color: {}", ev.color.to_hex()));
//! // Place `color_picker(&picker)` and `hue_slider(&hue)` in a Floem
//! // view tree.
//! ```

#[cfg(feature = "alpha")]
mod alpha_slider;
#[cfg(feature = "alpha")]
mod checkerboard;
mod color;
mod constants;
mod error;
mod events;
mod hue_slider;
pub mod mapping;
mod math;
mod picker;
mod snapshot;
mod track;

#[cfg(feature = "alpha")]
pub use alpha_slider::{alpha_slider, AlphaChanged, AlphaSlider, AlphaSliderView};
pub use color::HsvaColor;
pub use error::PickerError;
pub use hue_slider::{hue_slider, HueChanged, HueSlider, HueSliderView};
pub use picker::{color_picker, ColorChanged, ColorPicker, ColorPickerView};
#[cfg(feature = "alpha")]
pub use snapshot::AlphaSliderSnapshot;
pub use snapshot::{PickerSnapshot, SliderSnapshot};
pub use track::TrackBounds;
