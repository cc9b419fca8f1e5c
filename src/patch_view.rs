//! View that shows a before/after patch, rasterized at physical resolution.

use std::sync::Arc;

use floem::kurbo::Rect;
use floem::peniko::{self, Blob};
use floem::{
    context::{ComputeLayoutCx, PaintCx, UpdateCx},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::ArgbColor;
use crate::patch::{render_patch, PatchSide, PatchStyle};

struct PatchColor(ArgbColor);

#[derive(Debug, Clone, Copy)]
pub(crate) struct PatchHandle {
    id: ViewId,
}

impl PatchHandle {
    pub(crate) fn set_color(&self, color: ArgbColor) {
        self.id.update_state(PatchColor(color));
    }
}

pub(crate) struct PatchView {
    id: ViewId,
    side: PatchSide,
    color: ArgbColor,
    size: floem::taffy::prelude::Size<f32>,
    img: Option<peniko::Image>,
    img_hash: Vec<u8>,
    /// Color and physical size the cached image was rendered for.
    cached: Option<(ArgbColor, (u32, u32))>,
}

pub(crate) fn patch_view(side: PatchSide, color: ArgbColor) -> PatchView {
    PatchView {
        id: ViewId::new(),
        side,
        color,
        size: Default::default(),
        img: None,
        img_hash: Vec::new(),
        cached: None,
    }
}

impl PatchView {
    pub(crate) fn handle(&self) -> PatchHandle {
        PatchHandle { id: self.id }
    }

    /// Re-render when color or physical size changed. An empty target leaves
    /// the previous image in place until the next layout.
    fn ensure_image(&mut self, scale: f64) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        let key = (self.color, (pw, ph));
        if self.cached == Some(key) {
            return;
        }
        let Some(patch) = render_patch(pw, ph, self.color, self.side, &PatchStyle::scaled(s))
        else {
            return;
        };

        let blob = Blob::new(Arc::new(patch.pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);
        self.img_hash = blob.id().to_le_bytes().to_vec();
        self.img = Some(img);
        self.cached = Some(key);
    }
}

impl View for PatchView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<PatchColor>() {
            self.color = update.0;
            self.id.request_layout();
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let scale = cx.scale();
        self.ensure_image(scale);
        if let Some(ref img) = self.img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.img_hash,
                },
                Rect::new(0.0, 0.0, w, h),
            );
        }
    }
}
