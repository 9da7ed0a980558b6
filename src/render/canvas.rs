use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::{
    assets::decode::PreparedFrame,
    foundation::core::{Affine, Rect, Rgba8Premul, Viewport},
    foundation::error::{HausError, HausResult},
};

/// A surface snapshot as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert premultiplied pixels to straight alpha in place.
    pub fn unpremultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }

    /// Write as PNG (straight alpha), creating parent directories.
    pub fn save_png(&self, path: &Path) -> HausResult<()> {
        let mut straight = self.clone();
        straight.unpremultiply();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &straight.data,
            straight.width,
            straight.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Drawing surface a [`crate::FrameRenderer`] paints into.
pub trait FrameCanvas {
    /// Current surface size in device pixels.
    fn viewport(&self) -> Viewport;

    /// Reallocate for a new size. Contents are discarded.
    fn resize(&mut self, viewport: Viewport) -> HausResult<()>;

    /// Reset every pixel to the surface's clear color.
    fn clear(&mut self);

    /// Paint `frame` scaled into `dst` (surface coordinates; may extend past the edges).
    fn draw_frame(&mut self, frame: &PreparedFrame, dst: Rect) -> HausResult<()>;
}

/// CPU raster surface backed by `vello_cpu`.
pub struct CpuCanvas {
    viewport: Viewport,
    clear_color: Rgba8Premul,
    pixmap: Option<vello_cpu::Pixmap>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("viewport", &self.viewport)
            .field("clear_color", &self.clear_color)
            .finish()
    }
}

impl CpuCanvas {
    /// A surface of `viewport` size; an empty viewport allocates nothing and ignores draws.
    pub fn new(viewport: Viewport) -> HausResult<Self> {
        let mut out = Self {
            viewport: Viewport::default(),
            clear_color: Rgba8Premul::transparent(),
            pixmap: None,
            ctx: None,
        };
        out.resize(viewport)?;
        Ok(out)
    }

    pub fn with_clear_color(mut self, color: Rgba8Premul) -> Self {
        self.clear_color = color;
        self.clear();
        self
    }

    /// Copy the current pixels out.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.viewport.width,
            height: self.viewport.height,
            data: self
                .pixmap
                .as_ref()
                .map(|p| p.data_as_u8_slice().to_vec())
                .unwrap_or_default(),
            premultiplied: true,
        }
    }
}

impl FrameCanvas for CpuCanvas {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) -> HausResult<()> {
        let pixmap = if viewport.is_empty() {
            None
        } else {
            let (w, h) = viewport.to_u16()?;
            Some(vello_cpu::Pixmap::new(w, h))
        };
        self.viewport = viewport;
        self.ctx = None;
        self.pixmap = pixmap;
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        let rgba = self.clear_color.to_array();
        if let Some(pixmap) = self.pixmap.as_mut() {
            for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    fn draw_frame(&mut self, frame: &PreparedFrame, dst: Rect) -> HausResult<()> {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return Ok(());
        };
        if frame.width == 0 || frame.height == 0 {
            return Err(HausError::render("cannot draw a zero-sized frame"));
        }

        let (w, h) = (pixmap.width(), pixmap.height());
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();

        let fw = f64::from(frame.width);
        let fh = f64::from(frame.height);
        let placement = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / fw, dst.height() / fh);
        ctx.set_transform(vello_cpu::kurbo::Affine::new(placement.as_coeffs()));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&frame.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, fw, fh));
        ctx.flush();
        ctx.render_to_pixmap(pixmap);

        self.ctx = Some(ctx);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
