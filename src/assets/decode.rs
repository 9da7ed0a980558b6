use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Size;
use crate::foundation::error::{HausError, HausResult};

/// One decoded frame, ready to be painted by the CPU backend.
#[derive(Clone, Debug)]
pub struct PreparedFrame {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Premultiplied pixels, shared between the store and any surface painting it.
    pub pixmap: Arc<vello_cpu::Pixmap>,
}

impl PreparedFrame {
    /// Wrap premultiplied row-major RGBA8 bytes.
    pub fn from_premul_rgba8(bytes: &[u8], width: u32, height: u32) -> HausResult<Self> {
        let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
        Ok(Self {
            width,
            height,
            pixmap: Arc::new(pixmap),
        })
    }

    pub fn natural_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Decode encoded image bytes (JPEG, PNG, ...) into a premultiplied frame.
pub fn decode_frame(bytes: &[u8]) -> HausResult<PreparedFrame> {
    let dyn_img = image::load_from_memory(bytes).context("decode frame from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(HausError::load("decoded frame has zero size"));
    }

    let mut premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut premul);
    PreparedFrame::from_premul_rgba8(&premul, width, height)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = crate::foundation::math::mul_div255_u8(u16::from(*c), a);
        }
    }
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> HausResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| HausError::load("frame width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| HausError::load("frame height exceeds u16"))?;
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if bytes.len() != expected {
        return Err(HausError::load(format!(
            "frame byte len mismatch: got {}, expected {expected}",
            bytes.len()
        )));
    }

    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    let opaque = bytes.chunks_exact(4).all(|px| px[3] == 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, !opaque,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
