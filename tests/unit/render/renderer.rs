use super::*;
use crate::assets::decode::PreparedFrame;
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::HausResult;
use crate::sequence::descriptor::{FrameNaming, SequenceDescriptor};

#[derive(Default)]
struct RecordingCanvas {
    viewport: Viewport,
    clears: usize,
    draws: Vec<(u32, u32, Rect)>,
}

impl FrameCanvas for RecordingCanvas {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) -> HausResult<()> {
        self.viewport = viewport;
        Ok(())
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn draw_frame(&mut self, frame: &PreparedFrame, dst: Rect) -> HausResult<()> {
        self.draws.push((frame.width, frame.height, dst));
        Ok(())
    }
}

fn canvas(w: u32, h: u32) -> RecordingCanvas {
    RecordingCanvas {
        viewport: Viewport::new(w, h),
        ..RecordingCanvas::default()
    }
}

fn frame(w: u32, h: u32) -> PreparedFrame {
    PreparedFrame::from_premul_rgba8(&vec![255u8; (w * h * 4) as usize], w, h).unwrap()
}

fn store(frames: Vec<Option<PreparedFrame>>) -> FrameStore {
    let d = SequenceDescriptor::new(frames.len(), FrameNaming::new("f-", "jpg")).unwrap();
    FrameStore::from_frames(d, frames).unwrap()
}

fn full_store(n: usize) -> FrameStore {
    store((0..n).map(|_| Some(frame(16, 9))).collect())
}

#[test]
fn same_index_updates_paint_once() {
    let s = full_store(288);
    let mut c = canvas(1600, 900);
    let mut r = FrameRenderer::new(true);

    // 0.5000 and 0.5010 both map to floor(p * 287) = 143.
    assert_eq!(r.request_progress(0.5, &s), FrameIndex(143));
    assert_eq!(
        r.on_animation_frame(&s, Some(&mut c)),
        PaintOutcome::Painted(FrameIndex(143))
    );
    assert_eq!(r.request_progress(0.501, &s), FrameIndex(143));
    assert_eq!(
        r.on_animation_frame(&s, Some(&mut c)),
        PaintOutcome::Suppressed(FrameIndex(143))
    );
    assert_eq!(c.draws.len(), 1);
    assert_eq!(r.stats().paints, 1);
    assert_eq!(r.stats().suppressed, 1);
}

#[test]
fn requests_between_frames_are_coalesced() {
    let s = full_store(10);
    let mut c = canvas(160, 90);
    let mut r = FrameRenderer::new(false);
    r.request(FrameIndex(1));
    r.request(FrameIndex(4));
    r.request(FrameIndex(7));
    assert_eq!(
        r.on_animation_frame(&s, Some(&mut c)),
        PaintOutcome::Painted(FrameIndex(7))
    );
    assert_eq!(r.on_animation_frame(&s, Some(&mut c)), PaintOutcome::Idle);
    assert_eq!(c.draws.len(), 1);
    assert_eq!(c.clears, 0);
}

#[test]
fn draw_uses_cover_rect() {
    let s = full_store(2);
    let mut c = canvas(1600, 1600);
    let mut r = FrameRenderer::new(true);
    r.request(FrameIndex(0));
    r.on_animation_frame(&s, Some(&mut c));
    let (w, h, dst) = c.draws[0];
    assert_eq!((w, h), (16, 9));
    assert_eq!(dst.y0, 0.0);
    assert_eq!(dst.height(), 1600.0);
    assert!(dst.width() > 1600.0);
    assert_eq!(c.clears, 1);
}

#[test]
fn failed_frame_leaves_surface_untouched() {
    let s = store(vec![Some(frame(4, 4)), None, Some(frame(4, 4))]);
    let mut c = canvas(8, 8);
    let mut r = FrameRenderer::new(true);
    r.paint(FrameIndex(0), &s, Some(&mut c));
    let out = r.paint(FrameIndex(1), &s, Some(&mut c));
    assert_eq!(
        out,
        PaintOutcome::Skipped(FrameIndex(1), SkipReason::FrameUnavailable)
    );
    assert_eq!(c.clears, 1);
    assert_eq!(c.draws.len(), 1);
    assert_eq!(r.last_painted(), Some(FrameIndex(0)));
    // Returning to the frame still on screen is a no-op.
    assert!(matches!(
        r.paint(FrameIndex(0), &s, Some(&mut c)),
        PaintOutcome::Suppressed(_)
    ));
}

#[test]
fn unknown_aspect_when_frame_zero_failed() {
    let s = store(vec![None, Some(frame(4, 4))]);
    let mut c = canvas(8, 8);
    let mut r = FrameRenderer::new(false);
    assert_eq!(
        r.paint(FrameIndex(1), &s, Some(&mut c)),
        PaintOutcome::Skipped(FrameIndex(1), SkipReason::UnknownAspect)
    );
    assert!(c.draws.is_empty());
}

#[test]
fn not_ready_store_skips() {
    let d = SequenceDescriptor::new(3, FrameNaming::new("f-", "jpg")).unwrap();
    let s = FrameStore::pending(d);
    let mut c = canvas(8, 8);
    let mut r = FrameRenderer::new(false);
    assert_eq!(
        r.paint(FrameIndex(0), &s, Some(&mut c)),
        PaintOutcome::Skipped(FrameIndex(0), SkipReason::NotReady)
    );
}

#[test]
fn missing_or_empty_surface_is_a_no_op() {
    let s = full_store(3);
    let mut r = FrameRenderer::new(false);
    assert_eq!(
        r.paint(FrameIndex(0), &s, None),
        PaintOutcome::Skipped(FrameIndex(0), SkipReason::NoSurface)
    );
    let mut c = canvas(0, 10);
    assert_eq!(
        r.paint(FrameIndex(0), &s, Some(&mut c)),
        PaintOutcome::Skipped(FrameIndex(0), SkipReason::NoSurface)
    );
    assert_eq!(r.stats().skipped, 2);
}

#[test]
fn invalidate_repaints_current_target() {
    let s = full_store(5);
    let mut c = canvas(10, 10);
    let mut r = FrameRenderer::new(false);
    r.request(FrameIndex(3));
    r.on_animation_frame(&s, Some(&mut c));
    r.invalidate();
    assert!(r.has_pending());
    assert_eq!(
        r.on_animation_frame(&s, Some(&mut c)),
        PaintOutcome::Painted(FrameIndex(3))
    );
    assert_eq!(c.draws.len(), 2);
}

#[test]
fn cancel_drops_pending_request() {
    let s = full_store(5);
    let mut c = canvas(10, 10);
    let mut r = FrameRenderer::new(false);
    r.request(FrameIndex(2));
    r.cancel();
    assert_eq!(r.on_animation_frame(&s, Some(&mut c)), PaintOutcome::Idle);
    assert_eq!(r.target(), Some(FrameIndex(2)));
}
