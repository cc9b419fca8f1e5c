//! Standalone demo: opens a window with the sliders picker.
//!
//! Pass a TOML file path to load the baseline, e.g.
//! `initial_color = "#80FF0000"` and `transparency = true`.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_sliders::{ColorPickerSliders, InitialConfig};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| InitialConfig::from_toml_str(&text).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{path}: {e}; using defaults");
                InitialConfig::default()
            }
        },
        None => InitialConfig {
            transparency: true,
            ..InitialConfig::default()
        },
    };

    let picker = ColorPickerSliders::new(config);
    picker.on_confirm(|c| println!("#{}", c.to_hex()));

    floem::Application::new()
        .window(
            move |_| {
                picker
                    .view()
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((280.0, 240.0))
                    .title("floem-sliders"),
            ),
        )
        .run();
}
