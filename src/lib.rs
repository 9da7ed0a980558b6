//! Scroll-driven image-sequence playback.
//!
//! A tall scroll container drives a normalized progress value, which selects one frame of a
//! preloaded image sequence; the frame is painted cover-fit into a drawing surface at most once
//! per animation frame. The public API is sequence-oriented:
//!
//! - Describe a sequence with a [`SequenceDescriptor`] (or load a whole [`SiteConfig`])
//! - Start loading with [`FrameStore::load`], or bind everything with [`ScrollSequence::create`]
//! - Feed scroll, resize and animation-frame events; read [`SequenceOutputs`] for overlays
//!
//! [`HausPage`] wires both sequences of the OneNine site together with the hero, parallax and
//! carousel effects driven from the same scroll offset.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod effects;
mod foundation;
mod page;
mod render;
mod scroll;
mod sequence;

pub use crate::foundation::core::{Affine, FrameIndex, Rect, Rgba8Premul, Size, Vec2, Viewport};
pub use crate::foundation::error::{HausError, HausResult};
pub use crate::foundation::math::clamp01;

pub use crate::assets::decode::{PreparedFrame, decode_frame};
pub use crate::assets::source::{DirFrameSource, FrameSource, MemoryFrameSource, normalize_locator};
pub use crate::assets::store::{
    FrameAsset, FrameStore, LoadProgress, ReadinessReport, build_loader_pool,
};
pub use crate::config::site::{SequenceConfig, SiteConfig};
pub use crate::effects::overlay::{
    ActivationWindow, FADE_WIDTH, OverlayState, TextAlign, TextOverlay, overlapping_plateaus,
    overlay_opacity, overlay_states,
};
pub use crate::effects::parallax::{
    ParallaxConfig, ParallaxLayers, PointerParallax, Spring, SpringParams, float_offset,
    normalize_pointer, shadow_scale,
};
pub use crate::effects::presets::{
    HeroEffectValues, HeroEffects, RevealEffectValues, RevealEffects, StoneEffectValues,
    StoneEffects,
};
pub use crate::effects::ramp::{Ramp, RampStop};
pub use crate::page::{BELIEF_COUNT, HausPage, PageState};
pub use crate::render::canvas::{CpuCanvas, FrameCanvas, FrameRGBA};
pub use crate::render::fit::cover_rect;
pub use crate::render::renderer::{FrameRenderer, PaintOutcome, RenderStats, SkipReason};
pub use crate::scroll::latch::ThresholdLatch;
pub use crate::scroll::mapper::{
    ContainerGeometry, Edge, ScrollOffset, ScrollRange, ScrollTracker, SubscriptionId,
    progress_at,
};
pub use crate::scroll::stepper::{DEFAULT_STEP_PX, stepped_index, stepped_index_at};
pub use crate::sequence::descriptor::{
    DEFAULT_PAD_WIDTH, FrameNaming, IndexMapping, SequenceDescriptor,
};
pub use crate::sequence::player::{ScrollSequence, ScrollUpdate, SequenceOutputs};
