use super::*;

#[test]
fn viewport_empty_and_size() {
    assert!(Viewport::new(0, 10).is_empty());
    assert!(Viewport::new(10, 0).is_empty());
    let v = Viewport::new(1920, 1080);
    assert!(!v.is_empty());
    assert_eq!(v.size(), Size::new(1920.0, 1080.0));
}

#[test]
fn viewport_to_u16_rejects_oversized() {
    assert_eq!(Viewport::new(640, 480).to_u16().unwrap(), (640, 480));
    assert!(Viewport::new(70_000, 10).to_u16().is_err());
}

#[test]
fn premul_from_straight() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.b, 0);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}
