//! Channel slider: a horizontal track showing a [`TrackGradient`] with a
//! tinted ring thumb.
//!
//! Progress is kept in integer steps (`0..=max`). Pointer input reports
//! `(raw, true)`; programmatic [`SliderHandle::set_progress`] reports
//! `(raw, false)` so listeners can ignore their own updates.

use std::sync::Arc;

use floem::kurbo::{Circle, Rect, Shape, Stroke};
use floem::peniko::{self, Blob, Color};

use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::checkerboard;
use crate::color::ArgbColor;
use crate::constants;
use crate::gradient::TrackGradient;
use crate::state::Channel;

/// Integer step range of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRange {
    max: u32,
}

impl SliderRange {
    pub const fn new(max: u32) -> Self {
        Self { max }
    }

    /// Degrees for hue, percent for the rest.
    pub const fn for_channel(channel: Channel) -> Self {
        match channel {
            Channel::Hue => Self::new(360),
            _ => Self::new(100),
        }
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Raw progress → 0.0–1.0.
    pub fn normalize(&self, raw: u32) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        raw.min(self.max) as f64 / self.max as f64
    }

    /// 0.0–1.0 → nearest raw step.
    pub fn raw(&self, normalized: f64) -> u32 {
        (normalized.clamp(0.0, 1.0) * self.max as f64).round() as u32
    }

    /// Raw step under pointer `x` on a track `width` wide.
    fn raw_at(&self, x: f64, width: f64) -> Option<u32> {
        let r = constants::THUMB_RADIUS;
        let usable = width - 2.0 * r;
        (usable > 0.0).then(|| self.raw((x - r) / usable))
    }
}

enum SliderUpdate {
    Progress(f64),
    Gradient(TrackGradient),
    ColorFilter(ArgbColor),
}

/// Cheap handle for driving a [`ChannelSlider`] from outside its view.
#[derive(Debug, Clone, Copy)]
pub struct SliderHandle {
    id: ViewId,
    range: SliderRange,
}

impl SliderHandle {
    /// Move the thumb to `normalized` without counting as user input.
    pub fn set_progress(&self, normalized: f64) {
        self.id.update_state(SliderUpdate::Progress(normalized));
    }

    pub fn normalize(&self, raw: u32) -> f64 {
        self.range.normalize(raw)
    }

    /// Tint the thumb.
    pub fn set_color_filter(&self, color: ArgbColor) {
        self.id.update_state(SliderUpdate::ColorFilter(color));
    }

    /// Replace the track gradient.
    pub fn change_gradient(&self, gradient: TrackGradient) {
        self.id.update_state(SliderUpdate::Gradient(gradient));
    }
}

type ProgressListener = Box<dyn Fn(u32, bool)>;
type LayoutListener = Box<dyn Fn(SliderHandle)>;

pub struct ChannelSlider {
    id: ViewId,
    held: bool,
    range: SliderRange,
    raw: u32,
    gradient: TrackGradient,
    tint: ArgbColor,
    /// Draw a checkerboard under the track (alpha channel).
    checkered: bool,
    size: floem::taffy::prelude::Size<f32>,
    on_progress: Option<ProgressListener>,
    on_layout: Option<LayoutListener>,
    /// Cached gradient image.
    grad_img: Option<peniko::Image>,
    grad_hash: Vec<u8>,
    cached_gradient: Option<TrackGradient>,
    cached_dims: (u32, u32),
}

/// Creates a horizontal channel slider with `range` steps.
pub fn channel_slider(range: SliderRange, checkered: bool) -> ChannelSlider {
    ChannelSlider {
        id: ViewId::new(),
        held: false,
        range,
        raw: 0,
        gradient: TrackGradient::new(vec![ArgbColor::BLACK]),
        tint: ArgbColor::from_argb(0xFFFF_FFFF),
        checkered,
        size: Default::default(),
        on_progress: None,
        on_layout: None,
        grad_img: None,
        grad_hash: Vec::new(),
        cached_gradient: None,
        cached_dims: (0, 0),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl ChannelSlider {
    pub fn handle(&self) -> SliderHandle {
        SliderHandle {
            id: self.id,
            range: self.range,
        }
    }

    /// Called with `(raw, from_user)` whenever the progress changes.
    pub fn on_progress_change(mut self, listener: impl Fn(u32, bool) + 'static) -> Self {
        self.on_progress = Some(Box::new(listener));
        self
    }

    /// Called whenever the track gets a new non-empty size.
    pub fn on_layout_change(mut self, listener: impl Fn(SliderHandle) + 'static) -> Self {
        self.on_layout = Some(Box::new(listener));
        self
    }

    fn notify_progress(&self, from_user: bool) {
        if let Some(cb) = &self.on_progress {
            cb(self.raw, from_user);
        }
    }

    fn update_from_pointer(&mut self, x: f64) -> bool {
        match self.range.raw_at(x, self.size.width as f64) {
            Some(raw) if raw != self.raw => {
                self.raw = raw;
                true
            }
            _ => false,
        }
    }

    fn ensure_gradient_image(&mut self, scale: f64) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }

        let dims = (pw, ph);
        if self.cached_dims == dims && self.cached_gradient.as_ref() == Some(&self.gradient) {
            return;
        }

        let pixels = self.gradient.rasterize(pw, ph);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        self.grad_hash = blob.id().to_le_bytes().to_vec();
        self.grad_img = Some(img);
        self.cached_gradient = Some(self.gradient.clone());
        self.cached_dims = dims;
    }
}

impl View for ChannelSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<SliderUpdate>() {
            match *update {
                SliderUpdate::Progress(normalized) => {
                    self.raw = self.range.raw(normalized);
                    self.notify_progress(false);
                }
                SliderUpdate::Gradient(gradient) => self.gradient = gradient,
                SliderUpdate::ColorFilter(color) => self.tint = color,
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.held = true;
                if self.update_from_pointer(e.pos.x) {
                    self.notify_progress(true);
                }
                self.id.request_layout();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    if self.update_from_pointer(e.pos.x) {
                        self.notify_progress(true);
                    }
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.held = false;
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        let changed = layout.size != self.size;
        self.size = layout.size;
        if changed && self.size.width > 0.0 && self.size.height > 0.0 {
            if let Some(cb) = &self.on_layout {
                cb(self.handle());
            }
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        cx.save();
        cx.clip(&rrect);
        if self.checkered {
            checkerboard::paint_checkerboard(cx, rect);
        }
        let scale = cx.scale();
        self.ensure_gradient_image(scale);
        if let Some(ref img) = self.grad_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.grad_hash,
                },
                rect,
            );
        }
        cx.restore();

        cx.stroke(&rrect, constants::OUTLINE.to_peniko(), &Stroke::new(1.0));

        // Thumb (left = 0, right = max), filled with the color filter
        let radius = constants::THUMB_RADIUS;
        let t = self.range.normalize(self.raw);
        let thumb_x = radius + t * (w - 2.0 * radius);
        let thumb_cy = h / 2.0;
        let inner = Circle::new((thumb_x, thumb_cy), radius - 1.5);
        cx.fill(&inner.to_path(0.1), self.tint.to_peniko(), 0.0);
        let circle = Circle::new((thumb_x, thumb_cy), radius);
        cx.stroke(&circle, Color::rgba8(0, 0, 0, 80), &Stroke::new(1.0));
        cx.stroke(&inner, Color::WHITE, &Stroke::new(2.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_range_is_degrees() {
        let r = SliderRange::for_channel(Channel::Hue);
        assert_eq!(r.max(), 360);
        assert_eq!(r.normalize(120), 120.0 / 360.0);
        assert_eq!(r.raw(0.5), 180);
    }

    #[test]
    fn percent_ranges() {
        for channel in [Channel::Saturation, Channel::Brightness, Channel::Alpha] {
            let r = SliderRange::for_channel(channel);
            assert_eq!(r.normalize(25), 0.25);
            assert_eq!(r.raw(0.333), 33);
        }
    }

    #[test]
    fn raw_clamps() {
        let r = SliderRange::new(100);
        assert_eq!(r.raw(-0.2), 0);
        assert_eq!(r.raw(1.7), 100);
        assert_eq!(r.normalize(250), 1.0);
        assert_eq!(SliderRange::new(0).normalize(3), 0.0);
    }

    #[test]
    fn pointer_maps_inside_thumb_margins() {
        let r = SliderRange::new(100);
        let t = constants::THUMB_RADIUS;
        let w = 2.0 * t + 200.0;
        assert_eq!(r.raw_at(0.0, w), Some(0));
        assert_eq!(r.raw_at(t + 100.0, w), Some(50));
        assert_eq!(r.raw_at(w, w), Some(100));
        assert_eq!(r.raw_at(5.0, 2.0 * t), None);
    }
}
