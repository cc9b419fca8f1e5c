//! Sliders picker: hue, saturation, brightness and alpha sliders above a
//! before/after patch pair.
//!
//! [`ColorPickerSliders`] is the host-facing handle. It owns the
//! [`ColorController`] and pushes each [`Refresh`] to the slider and patch
//! views it built. Slider listeners only feed user-originated progress back
//! into the controller.

use std::cell::RefCell;
use std::rc::Rc;

use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};

use crate::color::ArgbColor;
use crate::constants;
use crate::gradient::TrackGradient;
use crate::patch::PatchSide;
use crate::patch_view::{patch_view, PatchHandle};
use crate::slider::{channel_slider, ChannelSlider, SliderHandle, SliderRange};
use crate::state::{Channel, ColorController, ColorState, InitialConfig, Phase, Refresh};

type ConfirmHook = Rc<RefCell<Option<Rc<dyn Fn(ArgbColor)>>>>;

/// Views the controller pushes updates to.
#[derive(Clone, Copy)]
struct Targets {
    sliders: [SliderHandle; 4],
    before: PatchHandle,
    after: PatchHandle,
}

impl Targets {
    fn slider(&self, channel: Channel) -> SliderHandle {
        match channel {
            Channel::Hue => self.sliders[0],
            Channel::Saturation => self.sliders[1],
            Channel::Brightness => self.sliders[2],
            Channel::Alpha => self.sliders[3],
        }
    }
}

/// Handle to a sliders color picker.
///
/// Clones share the same state. Build the UI with [`ColorPickerSliders::view`].
#[derive(Clone)]
pub struct ColorPickerSliders {
    controller: Rc<RefCell<ColorController>>,
    targets: Rc<RefCell<Option<Targets>>>,
    transparency: RwSignal<bool>,
    before_text: RwSignal<String>,
    after_text: RwSignal<String>,
    on_confirm: ConfirmHook,
}

impl ColorPickerSliders {
    pub fn new(config: InitialConfig) -> Self {
        let controller = ColorController::new(config);
        let transparency = controller.transparency();
        let before_text = controller.initial_state().summary(transparency);
        let after_text = controller.state().summary(transparency);
        Self {
            controller: Rc::new(RefCell::new(controller)),
            targets: Rc::new(RefCell::new(None)),
            transparency: RwSignal::new(transparency),
            before_text: RwSignal::new(before_text),
            after_text: RwSignal::new(after_text),
            on_confirm: Rc::new(RefCell::new(None)),
        }
    }

    /// Replace the baseline and the current selection.
    pub fn set_initial_parameters(&self, color: impl Into<ArgbColor>, transparency: bool) {
        let refresh = self
            .controller
            .borrow_mut()
            .set_initial_parameters(color.into(), transparency);
        self.apply(&refresh);
    }

    /// Current color as packed `0xAARRGGBB`.
    pub fn get_color(&self) -> u32 {
        self.color().argb()
    }

    pub fn color(&self) -> ArgbColor {
        self.controller.borrow().color()
    }

    pub fn state(&self) -> ColorState {
        self.controller.borrow().state()
    }

    pub fn phase(&self) -> Phase {
        self.controller.borrow().phase()
    }

    /// Restore the baseline, as a click on the before patch does.
    pub fn reset(&self) {
        let refresh = self.controller.borrow_mut().reset();
        self.apply(&refresh);
    }

    /// Register the action for a click on the after patch.
    pub fn on_confirm(&self, hook: impl Fn(ArgbColor) + 'static) {
        *self.on_confirm.borrow_mut() = Some(Rc::new(hook));
    }

    fn confirm(&self) {
        let color = self.color();
        // Released before the call so the hook may replace itself.
        let hook = self.on_confirm.borrow().clone();
        if let Some(hook) = hook {
            hook(color);
        }
    }

    fn handle_progress(&self, channel: Channel, raw: u32, from_user: bool) {
        if !from_user {
            return;
        }
        let normalized = SliderRange::for_channel(channel).normalize(raw);
        let refresh = self.controller.borrow_mut().drag(channel, normalized);
        self.apply(&refresh);
    }

    fn handle_slider_layout(&self, channel: Channel, slider: SliderHandle) {
        let gradient = match channel {
            Channel::Hue => TrackGradient::hue(),
            _ => self.controller.borrow().state().gradient(channel),
        };
        slider.change_gradient(gradient);
    }

    fn handle_layout(&self, width: f64, height: f64) {
        let refresh = self.controller.borrow_mut().layout(width, height);
        if let Some(refresh) = refresh {
            self.apply(&refresh);
        }
    }

    fn apply(&self, refresh: &Refresh) {
        let controller = self.controller.borrow();
        let state = controller.state();
        let transparency = controller.transparency();

        if self.transparency.get_untracked() != transparency {
            self.transparency.set(transparency);
        }
        self.after_text.set(state.summary(transparency));
        if refresh.repaint_before {
            self.before_text
                .set(controller.initial_state().summary(transparency));
        }

        let Some(targets) = *self.targets.borrow() else {
            return;
        };
        for channel in Channel::ALL {
            let slider = targets.slider(channel);
            if refresh.sync_positions {
                slider.set_progress(state.progress(channel));
            }
            slider.set_color_filter(state.color_filter(channel));
        }
        for &channel in &refresh.regenerate {
            targets.slider(channel).change_gradient(state.gradient(channel));
        }
        targets.after.set_color(state.to_color());
        if refresh.repaint_before {
            targets.before.set_color(controller.initial_state().to_color());
        }
    }

    fn build_slider(&self, channel: Channel) -> ChannelSlider {
        let on_progress = self.clone();
        let on_layout = self.clone();
        channel_slider(SliderRange::for_channel(channel), channel == Channel::Alpha)
            .on_progress_change(move |raw, from_user| {
                on_progress.handle_progress(channel, raw, from_user)
            })
            .on_layout_change(move |slider| on_layout.handle_slider_layout(channel, slider))
    }

    /// Builds the picker view tree.
    pub fn view(&self) -> impl IntoView {
        let [hue, saturation, brightness, alpha] = Channel::ALL.map(|c| self.build_slider(c));

        let (initial, current) = {
            let controller = self.controller.borrow();
            (controller.initial_state().to_color(), controller.color())
        };
        let before = patch_view(PatchSide::Before, initial);
        let after = patch_view(PatchSide::After, current);

        *self.targets.borrow_mut() = Some(Targets {
            sliders: [
                hue.handle(),
                saturation.handle(),
                brightness.handle(),
                alpha.handle(),
            ],
            before: before.handle(),
            after: after.handle(),
        });

        let transparency = self.transparency;
        let before_text = self.before_text;
        let after_text = self.after_text;
        let reset_patch = self.clone();
        let reset_label = self.clone();
        let confirm_patch = self.clone();
        let confirm_label = self.clone();
        let layout = self.clone();

        v_stack((
            slider_row("H", hue),
            slider_row("S", saturation),
            slider_row("B", brightness),
            slider_row("A", alpha).style(move |s| s.apply_if(!transparency.get(), |s| s.hide())),
            h_stack((
                before
                    .on_click_stop(move |_| reset_patch.reset())
                    .style(|s| s.flex_grow(1.0).height(constants::PATCH_HEIGHT)),
                after
                    .on_click_stop(move |_| confirm_patch.confirm())
                    .style(|s| s.flex_grow(1.0).height(constants::PATCH_HEIGHT)),
            ))
            .style(|s| s.width_full().margin_top(constants::GAP)),
            h_stack((
                summary_label(before_text).on_click_stop(move |_| reset_label.reset()),
                summary_label(after_text).on_click_stop(move |_| confirm_label.confirm()),
            ))
            .style(|s| s.width_full()),
        ))
        .on_resize(move |rect| layout.handle_layout(rect.width(), rect.height()))
        .style(|s| {
            s.gap(constants::GAP)
                .padding(constants::PADDING)
                .size_full()
                .background(Color::rgb8(242, 242, 242))
        })
    }
}

impl Default for ColorPickerSliders {
    fn default() -> Self {
        Self::new(InitialConfig::default())
    }
}

fn slider_row(name: &'static str, slider: ChannelSlider) -> impl View {
    h_stack((
        label(move || name).style(|s| {
            s.width(constants::LABEL_WIDTH)
                .font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
        }),
        slider.style(|s| s.flex_grow(1.0)),
    ))
    .style(|s| s.items_center().gap(constants::GAP / 2.0).width_full())
}

fn summary_label(text: RwSignal<String>) -> impl View {
    label(move || text.get()).style(|s| {
        s.width_pct(50.0)
            .font_size(constants::SUMMARY_FONT)
            .color(Color::rgb8(80, 80, 80))
            .cursor(floem::style::CursorStyle::Pointer)
    })
}
