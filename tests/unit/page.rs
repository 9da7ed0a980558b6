use super::*;
use crate::assets::decode::PreparedFrame;
use crate::assets::store::FrameStore;
use crate::config::site::SequenceConfig;

fn solid(rgba: [u8; 4]) -> PreparedFrame {
    let bytes = rgba.iter().copied().cycle().take(4 * 4 * 4).collect::<Vec<_>>();
    PreparedFrame::from_premul_rgba8(&bytes, 4, 4).unwrap()
}

fn small_config() -> SiteConfig {
    let mut cfg = SiteConfig::onenine();
    cfg.stone.descriptor.frame_count = 4;
    cfg.reveal.descriptor.frame_count = 4;
    cfg
}

fn bind(cfg: &SequenceConfig) -> ScrollSequence {
    let frames = (0..cfg.descriptor.frame_count)
        .map(|i| Some(solid([i as u8 * 60, 0, 0, 255])))
        .collect();
    let store = FrameStore::from_frames(cfg.descriptor.clone(), frames).unwrap();
    let canvas = CpuCanvas::new(Viewport::new(8, 8)).unwrap();
    ScrollSequence::with_store(cfg, store, canvas).unwrap()
}

// 8px viewport: stone spans scroll 0..24, reveal (top 40, height 16) spans 32..48.
fn page() -> HausPage {
    let cfg = small_config();
    let stone = bind(&cfg.stone).with_overlays(cfg.overlays.clone());
    let reveal = bind(&cfg.reveal);
    HausPage::from_sequences(cfg, stone, reveal).unwrap()
}

#[test]
fn first_tick_paints_both_sequences() {
    let mut p = page();
    let (stone, reveal) = p.on_animation_frame(16.0);
    assert_eq!(stone, PaintOutcome::Painted(crate::FrameIndex(0)));
    assert_eq!(reveal, PaintOutcome::Painted(crate::FrameIndex(0)));
}

#[test]
fn hero_follows_raw_scroll() {
    let mut p = page();
    p.on_scroll(150.0);
    let s = p.state();
    assert!((s.hero.opacity - 0.5).abs() < 1e-9);
    assert_eq!(s.stone.progress, 1.0);
}

#[test]
fn reveal_progress_drives_its_effects() {
    let mut p = page();
    p.on_scroll(40.0);
    let s = p.state();
    assert_eq!(s.reveal.progress, 0.5);
    assert_eq!(s.reveal_effects.canvas_opacity, 1.0);
    assert!((s.reveal_effects.fade_overlay_opacity - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(s.reveal_effects.left_opacity, 0.0);
}

#[test]
fn scroll_complete_is_sticky() {
    let mut p = page();
    p.on_scroll(12.0);
    assert!(!p.state().scroll_complete);
    p.on_scroll(24.0);
    assert!(p.state().scroll_complete);
    p.on_scroll(0.0);
    assert!(p.state().scroll_complete);
}

#[test]
fn parallax_yields_to_scroll_and_returns_at_top() {
    let mut p = page();
    assert!(p.state().parallax.visible);
    p.on_scroll(60.0);
    let s = p.state();
    assert!(s.scroll_started);
    assert!(!s.parallax.visible);

    p.on_scroll(0.0);
    let s = p.state();
    assert!(s.scroll_started);
    assert!(s.parallax.visible);
}

#[test]
fn scroll_started_needs_more_than_fifty_pixels_and_sticks() {
    let mut p = page();
    p.on_scroll(50.0);
    assert!(!p.state().scroll_started);
    p.on_scroll(51.0);
    assert!(p.state().scroll_started);
    p.on_scroll(0.0);
    assert!(p.state().scroll_started);
    p.on_scroll(120.0);
    assert!(p.state().scroll_started);
}

#[test]
fn wheel_disengage_holds_while_near_top() {
    let mut p = page();
    p.on_wheel(40.0);
    p.on_scroll(5.0);
    assert!(!p.state().parallax.visible);
}

#[test]
fn belief_index_needs_layout() {
    let mut p = page();
    assert_eq!(p.state().belief_index, None);
    p.relayout_beliefs(ContainerGeometry::new(100.0, 20.0).unwrap());
    for (y, expected) in [(0.0, 0), (106.0, 1), (300.0, 2), (5000.0, 2)] {
        p.on_scroll(y);
        assert_eq!(p.state().belief_index, Some(expected), "scroll {y}");
    }
}

#[test]
fn destroy_makes_callbacks_inert() {
    let mut p = page();
    p.destroy();
    p.on_scroll(20.0);
    assert!(p.on_resize(Viewport::new(16, 16)).is_ok());
    assert_eq!(p.on_animation_frame(16.0), (PaintOutcome::Idle, PaintOutcome::Idle));
    assert!(p.stone().canvas().is_none());
}
