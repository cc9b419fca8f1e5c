//! # floem-sliders
//!
//! An HSB slider color picker for [Floem](https://github.com/lapce/floem).
//!
//! Shows hue, saturation, brightness and (optionally) alpha sliders whose
//! tracks follow the current color, plus a "before" patch showing the
//! baseline and an "after" patch showing the selection. Clicking the before
//! patch resets to the baseline.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem_sliders::{ArgbColor, ColorPickerSliders, InitialConfig};
//!
//! let picker = ColorPickerSliders::new(InitialConfig {
//!     initial_color: ArgbColor::from_argb(0xFF3B82F6),
//!     transparency: true,
//! });
//! picker.on_confirm(|c| println!("picked #{}", c.to_hex()));
//! // Use `picker.view()` in your Floem view tree; read `picker.get_color()`.
//! ```

mod checkerboard;
mod color;
mod config;
mod constants;
mod gradient;
mod math;
mod patch;
mod patch_view;
mod slider;
mod sliders_view;
mod state;

pub use color::ArgbColor;
pub use config::ConfigError;
pub use gradient::TrackGradient;
pub use patch::{render_patch, PatchImage, PatchSide, PatchStyle};
pub use slider::{channel_slider, ChannelSlider, SliderHandle, SliderRange};
pub use sliders_view::ColorPickerSliders;
pub use state::{
    Channel, ChannelUpdate, ColorController, ColorState, InitialConfig, Phase, Refresh,
};
