use super::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PreparedFrame {
    let bytes = rgba
        .iter()
        .copied()
        .cycle()
        .take((w * h * 4) as usize)
        .collect::<Vec<_>>();
    PreparedFrame::from_premul_rgba8(&bytes, w, h).unwrap()
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn new_canvas_is_cleared_to_clear_color() {
    let c = CpuCanvas::new(Viewport::new(4, 3))
        .unwrap()
        .with_clear_color(Rgba8Premul::from_straight_rgba(26, 26, 26, 255));
    let snap = c.snapshot();
    assert_eq!((snap.width, snap.height), (4, 3));
    assert_eq!(snap.data.len(), 4 * 3 * 4);
    assert!(snap.data.chunks_exact(4).all(|px| px == [26, 26, 26, 255]));
}

#[test]
fn draw_covers_center_with_frame_color() {
    let mut c = CpuCanvas::new(Viewport::new(16, 16)).unwrap();
    let frame = solid(8, 4, [255, 0, 0, 255]);
    let dst = crate::render::fit::cover_rect(c.viewport().size(), frame.natural_size()).unwrap();
    c.draw_frame(&frame, dst).unwrap();

    let snap = c.snapshot();
    let [r, g, b, a] = pixel(&snap, 8, 8);
    assert!(r >= 250, "r={r}");
    assert!(g <= 5 && b <= 5);
    assert!(a >= 250, "a={a}");
}

#[test]
fn empty_viewport_ignores_draws() {
    let mut c = CpuCanvas::new(Viewport::new(0, 0)).unwrap();
    let frame = solid(2, 2, [255, 255, 255, 255]);
    c.draw_frame(&frame, Rect::new(0.0, 0.0, 2.0, 2.0)).unwrap();
    assert!(c.snapshot().data.is_empty());
}

#[test]
fn resize_reallocates_and_rejects_oversize() {
    let mut c = CpuCanvas::new(Viewport::new(2, 2)).unwrap();
    c.resize(Viewport::new(5, 7)).unwrap();
    assert_eq!(c.viewport(), Viewport::new(5, 7));
    assert_eq!(c.snapshot().data.len(), 5 * 7 * 4);
    assert!(c.resize(Viewport::new(100_000, 2)).is_err());
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let mut f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 32, 0, 128],
        premultiplied: true,
    };
    f.unpremultiply();
    assert_eq!(f.data, vec![128, 64, 0, 128]);
    assert!(!f.premultiplied);
}

#[test]
fn save_png_writes_readable_file() {
    let dir = std::env::temp_dir().join(format!("haus_scroll_canvas_{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    let c = CpuCanvas::new(Viewport::new(3, 2))
        .unwrap()
        .with_clear_color(Rgba8Premul::from_straight_rgba(0, 255, 0, 255));
    c.snapshot().save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(1, 1).0, [0, 255, 0, 255]);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn failed_resize_keeps_previous_surface() {
    let mut c = CpuCanvas::new(Viewport::new(6, 4)).unwrap();
    assert!(c.resize(Viewport::new(70_000, 4)).is_err());
    assert_eq!(c.viewport(), Viewport::new(6, 4));
    let snap = c.snapshot();
    assert_eq!((snap.width, snap.height), (6, 4));
    assert_eq!(snap.data.len(), 6 * 4 * 4);

    let frame = solid(2, 2, [0, 0, 255, 255]);
    c.draw_frame(&frame, Rect::new(0.0, 0.0, 6.0, 4.0)).unwrap();
    let [_, _, b, _] = pixel(&c.snapshot(), 3, 2);
    assert!(b >= 250, "b={b}");
}
