use super::*;

#[test]
fn onenine_preset_matches_the_site() {
    let cfg = SiteConfig::onenine();
    cfg.validate().unwrap();

    assert_eq!(cfg.stone.descriptor.frame_count, 288);
    assert_eq!(
        cfg.stone.descriptor.locator(crate::FrameIndex(0)),
        "/sequence/ezgif-frame-001.jpg"
    );
    assert!(cfg.stone.clear_before_draw);
    assert_eq!(cfg.stone.range, ScrollRange::pinned());

    assert_eq!(cfg.reveal.descriptor.frame_count, 160);
    assert_eq!(
        cfg.reveal.descriptor.locator(crate::FrameIndex(159)),
        "/logo_sequence/ezgif-frame-160.jpg"
    );
    assert_eq!(cfg.reveal.descriptor.mapping, IndexMapping::Bucketed);
    assert!(!cfg.reveal.clear_before_draw);

    assert_eq!(cfg.overlays.len(), 5);
    assert!(cfg.overlays[4].cta);
    assert!(overlapping_plateaus(&cfg.overlays).is_empty());
}

#[test]
fn json_round_trip_preserves_config() {
    let cfg = SiteConfig::onenine();
    let s = cfg.to_json_pretty().unwrap();
    let back = SiteConfig::from_json_str(&s).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn minimal_json_fills_defaults() {
    let s = r#"{
        "stone": { "descriptor": { "frame_count": 4, "naming": { "prefix": "/s/f-" } } },
        "reveal": {
            "descriptor": { "frame_count": 2, "naming": { "prefix": "/r/f-", "extension": "png" },
                            "mapping": "bucketed" },
            "range": { "enter": "start end", "exit": "end end" },
            "height_vh": 2.0
        }
    }"#;
    let cfg = SiteConfig::from_json_str(s).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.stone.descriptor.naming.extension, "jpg");
    assert_eq!(cfg.stone.descriptor.naming.pad_width, 3);
    assert_eq!(cfg.stone.range, ScrollRange::pinned());
    assert_eq!(cfg.stone.height_vh, 1.0);
    assert_eq!(cfg.reveal.range, ScrollRange::entering());
    assert!(cfg.overlays.is_empty());
    assert_eq!(cfg.hero, HeroEffects::onenine());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SiteConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, HausError::Serde(_)));

    let bad_offset = r#"{
        "stone": { "descriptor": { "frame_count": 4, "naming": { "prefix": "a" } },
                   "range": { "enter": "top start", "exit": "end end" } },
        "reveal": { "descriptor": { "frame_count": 4, "naming": { "prefix": "b" } } }
    }"#;
    assert!(SiteConfig::from_json_str(bad_offset).is_err());
}

#[test]
fn validate_rejects_bad_sequences() {
    let mut cfg = SiteConfig::onenine();
    cfg.stone.descriptor.frame_count = 0;
    let msg = cfg.validate().unwrap_err().to_string();
    assert!(msg.contains("stone"), "{msg}");

    let mut cfg = SiteConfig::onenine();
    cfg.reveal.height_vh = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SiteConfig::onenine();
    cfg.overlays[0].lines.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn overlapping_overlays_still_validate() {
    let mut cfg = SiteConfig::onenine();
    cfg.overlays[1].window = ActivationWindow::new(0.05, 0.4).unwrap();
    assert!(!overlapping_plateaus(&cfg.overlays).is_empty());
    assert!(cfg.validate().is_ok());
}

#[test]
fn container_scales_with_viewport() {
    let cfg = SiteConfig::onenine();
    let c = cfg.stone.container(Viewport::new(1280, 800)).unwrap();
    assert_eq!(c.top, 0.0);
    assert_eq!(c.height, 3200.0);
    let r = cfg.reveal.container(Viewport::new(1280, 800)).unwrap();
    assert_eq!(r.top, 4000.0);
    assert_eq!(r.height, 1600.0);
}

#[test]
fn from_path_reports_missing_file() {
    let err = SiteConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open site JSON"));
}
