use crate::foundation::core::FrameIndex;
use crate::foundation::error::{HausError, HausResult};
use crate::foundation::math::clamp01;

/// Zero-pad width used by the shipped asset packs (`...001.jpg`).
pub const DEFAULT_PAD_WIDTH: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Strategy for turning a progress scalar into a frame index.
pub enum IndexMapping {
    /// `floor(p * (N - 1))`: the last frame is reached exactly at `p = 1`.
    #[default]
    Stretch,
    /// `min(floor(p * N), N - 1)`: every frame owns an equal slice of the range.
    Bucketed,
}

impl IndexMapping {
    /// Map `progress` onto `[0, frame_count - 1]`.
    ///
    /// Progress outside `[0, 1]` (or NaN) saturates. `frame_count == 0` yields index 0.
    pub fn index_for(self, progress: f64, frame_count: usize) -> FrameIndex {
        if frame_count == 0 {
            return FrameIndex(0);
        }
        let last = frame_count - 1;
        let p = clamp01(progress);
        let raw = match self {
            Self::Stretch => (p * last as f64).floor(),
            Self::Bucketed => (p * frame_count as f64).floor(),
        };
        FrameIndex((raw.max(0.0) as usize).min(last))
    }
}

/// Path template for frame resources: `<prefix><index + 1, zero-padded>.<extension>`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameNaming {
    pub prefix: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_pad_width")]
    pub pad_width: usize,
}

fn default_extension() -> String {
    "jpg".to_string()
}

fn default_pad_width() -> usize {
    DEFAULT_PAD_WIDTH
}

impl FrameNaming {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
            pad_width: DEFAULT_PAD_WIDTH,
        }
    }

    /// Resource locator for zero-based `index` (frame numbers on disk are one-based).
    pub fn locator(&self, index: FrameIndex) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            index.0 + 1,
            self.extension,
            width = self.pad_width
        )
    }
}

/// Immutable description of one frame sequence.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SequenceDescriptor {
    pub frame_count: usize,
    pub naming: FrameNaming,
    #[serde(default)]
    pub mapping: IndexMapping,
}

impl SequenceDescriptor {
    pub fn new(frame_count: usize, naming: FrameNaming) -> HausResult<Self> {
        let out = Self {
            frame_count,
            naming,
            mapping: IndexMapping::Stretch,
        };
        out.validate()?;
        Ok(out)
    }

    pub fn with_mapping(mut self, mapping: IndexMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn validate(&self) -> HausResult<()> {
        if self.frame_count == 0 {
            return Err(HausError::validation("sequence frame_count must be > 0"));
        }
        if self.naming.extension.is_empty() {
            return Err(HausError::validation("sequence extension must be non-empty"));
        }
        if self.naming.extension.contains('/') || self.naming.extension.starts_with('.') {
            return Err(HausError::validation(
                "sequence extension must be a bare suffix like 'jpg'",
            ));
        }
        if self.naming.pad_width == 0 {
            return Err(HausError::validation("sequence pad_width must be > 0"));
        }
        Ok(())
    }

    pub fn locator(&self, index: FrameIndex) -> String {
        self.naming.locator(index)
    }

    /// Frame to show at `progress`, always within `[0, frame_count - 1]`.
    pub fn frame_for_progress(&self, progress: f64) -> FrameIndex {
        self.mapping.index_for(progress, self.frame_count)
    }

    pub fn last_index(&self) -> FrameIndex {
        FrameIndex(self.frame_count.saturating_sub(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/descriptor.rs"]
mod tests;
