use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    effects::overlay::{ActivationWindow, TextAlign, TextOverlay, overlapping_plateaus},
    effects::parallax::ParallaxConfig,
    effects::presets::{HeroEffects, RevealEffects, StoneEffects},
    foundation::core::Viewport,
    foundation::error::{HausError, HausResult},
    scroll::mapper::{ContainerGeometry, ScrollRange},
    sequence::descriptor::{FrameNaming, IndexMapping, SequenceDescriptor},
};

fn default_height_vh() -> f64 {
    1.0
}

/// One scroll-driven frame sequence and the container that drives it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceConfig {
    pub descriptor: SequenceDescriptor,
    #[serde(default)]
    pub range: ScrollRange,
    /// Wipe the surface before each paint instead of painting over the previous frame.
    #[serde(default)]
    pub clear_before_draw: bool,
    /// Container top, in viewport heights from the document top.
    #[serde(default)]
    pub top_vh: f64,
    /// Container height, in viewport heights.
    #[serde(default = "default_height_vh")]
    pub height_vh: f64,
}

impl SequenceConfig {
    pub fn validate(&self) -> HausResult<()> {
        self.descriptor.validate()?;
        if !self.top_vh.is_finite() {
            return Err(HausError::validation("sequence top_vh must be finite"));
        }
        if !(self.height_vh.is_finite() && self.height_vh > 0.0) {
            return Err(HausError::validation("sequence height_vh must be > 0"));
        }
        Ok(())
    }

    /// Container geometry for `viewport`, from the configured viewport multiples.
    pub fn container(&self, viewport: Viewport) -> HausResult<ContainerGeometry> {
        let vh = f64::from(viewport.height);
        ContainerGeometry::viewport_multiple(self.top_vh * vh, self.height_vh, viewport)
    }
}

/// Static site configuration: both sequences, stone overlays, and effect curves.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SiteConfig {
    pub stone: SequenceConfig,
    pub reveal: SequenceConfig,
    #[serde(default)]
    pub overlays: Vec<TextOverlay>,
    #[serde(default)]
    pub stone_effects: StoneEffects,
    #[serde(default)]
    pub reveal_effects: RevealEffects,
    #[serde(default)]
    pub hero: HeroEffects,
    #[serde(default)]
    pub parallax: ParallaxConfig,
}

impl SiteConfig {
    /// Parse a site config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HausResult<Self> {
        serde_json::from_reader(r).map_err(|e| HausError::serde(format!("parse site JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> HausResult<Self> {
        serde_json::from_str(s).map_err(|e| HausError::serde(format!("parse site JSON: {e}")))
    }

    /// Parse a site config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HausResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HausError::validation(format!("open site JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> HausResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| HausError::serde(e.to_string()))
    }

    /// Check every sequence and the parallax tuning.
    ///
    /// Overlay plateaus that overlap are logged, not rejected.
    pub fn validate(&self) -> HausResult<()> {
        self.stone
            .validate()
            .map_err(|e| HausError::validation(format!("stone: {e}")))?;
        self.reveal
            .validate()
            .map_err(|e| HausError::validation(format!("reveal: {e}")))?;
        self.parallax.validate()?;
        for (i, o) in self.overlays.iter().enumerate() {
            if o.lines.is_empty() {
                return Err(HausError::validation(format!("overlay {i} has no lines")));
            }
        }
        for (a, b) in overlapping_plateaus(&self.overlays) {
            tracing::warn!(a, b, "overlay plateaus overlap");
        }
        Ok(())
    }

    /// The OneNine Innovation Haus site.
    pub fn onenine() -> Self {
        Self {
            stone: SequenceConfig {
                descriptor: SequenceDescriptor {
                    frame_count: 288,
                    naming: FrameNaming::new("/sequence/ezgif-frame-", "jpg"),
                    mapping: IndexMapping::Stretch,
                },
                range: ScrollRange::pinned(),
                clear_before_draw: true,
                top_vh: 0.0,
                height_vh: 4.0,
            },
            reveal: SequenceConfig {
                descriptor: SequenceDescriptor {
                    frame_count: 160,
                    naming: FrameNaming::new("/logo_sequence/ezgif-frame-", "jpg"),
                    mapping: IndexMapping::Bucketed,
                },
                range: ScrollRange::entering(),
                clear_before_draw: false,
                top_vh: 5.0,
                height_vh: 2.0,
            },
            overlays: onenine_overlays(),
            stone_effects: StoneEffects::onenine(),
            reveal_effects: RevealEffects::onenine(),
            hero: HeroEffects::onenine(),
            parallax: ParallaxConfig::default(),
        }
    }
}

fn onenine_overlays() -> Vec<TextOverlay> {
    let table: [(&[&str], TextAlign, f64, f64, bool); 5] = [
        (
            &["Ideas are not discovered.", "They are broken open."],
            TextAlign::Center,
            0.0,
            0.15,
            false,
        ),
        (&["Pressure reveals structure."], TextAlign::Left, 0.18, 0.35, false),
        (&["Complexity is intentional."], TextAlign::Right, 0.43, 0.58, false),
        (
            &["Innovation lives in the fracture."],
            TextAlign::Center,
            0.68,
            0.82,
            false,
        ),
        (&["Enter the system."], TextAlign::Center, 0.85, 0.98, true),
    ];
    table
        .into_iter()
        .filter_map(|(lines, align, start, end, cta)| {
            let window = ActivationWindow::new(start, end).ok()?;
            let o = TextOverlay::new(lines, align, window);
            Some(if cta { o.with_cta() } else { o })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/config/site.rs"]
mod tests;
