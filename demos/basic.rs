//! Standalone demo: a picker with hue and alpha sliders attached.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_hsva::{alpha_slider, color_picker, hue_slider, AlphaSlider, ColorPicker, HueSlider};

fn main() {
    env_logger::init();

    let picker = ColorPicker::new();
    let hue = HueSlider::new();
    let alpha = AlphaSlider::new();
    picker.attach_hue_slider(&hue);
    picker.attach_alpha_slider(&alpha);
    picker.on_change_end(|ev| println!("picked #{}", ev.color.to_hex()));

    floem::Application::new()
        .window(
            move |_| {
                v_stack((
                    color_picker(&picker),
                    hue_slider(&hue),
                    alpha_slider(&alpha),
                ))
                .style(|s| s.padding(12.0).gap(8.0))
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((344.0, 480.0))
                    .title("floem-hsva"),
            ),
        )
        .run();
}
