use crate::foundation::core::{Rect, Size};

/// Destination rectangle that scales `image` to cover `surface`, preserving aspect ratio.
///
/// The overflowing axis is cropped symmetrically, so the result always satisfies
/// `width >= surface.width` and `height >= surface.height`. Returns `None` when either size is
/// non-finite or not strictly positive; callers skip the draw in that case.
pub fn cover_rect(surface: Size, image: Size) -> Option<Rect> {
    let dims = [surface.width, surface.height, image.width, image.height];
    if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
        return None;
    }

    let image_aspect = image.width / image.height;
    let surface_aspect = surface.width / surface.height;

    let (x, y, w, h) = if surface_aspect > image_aspect {
        let h = surface.width / image_aspect;
        (0.0, (surface.height - h) / 2.0, surface.width, h)
    } else {
        let w = surface.height * image_aspect;
        ((surface.width - w) / 2.0, 0.0, w, surface.height)
    };
    Some(Rect::new(x, y, x + w, y + h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
