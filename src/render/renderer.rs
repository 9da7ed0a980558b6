use crate::{
    assets::store::FrameStore,
    foundation::core::FrameIndex,
    render::canvas::FrameCanvas,
    render::fit::cover_rect,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Why a paint did not happen.
pub enum SkipReason {
    /// The frame store has not settled yet.
    NotReady,
    /// Frame 0 never loaded, so the sequence aspect ratio is unknown.
    UnknownAspect,
    /// The requested frame failed to load.
    FrameUnavailable,
    /// The surface has no pixels or has been torn down.
    NoSurface,
    /// The backend rejected the draw.
    Backend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Result of one paint attempt.
pub enum PaintOutcome {
    /// The frame was drawn.
    Painted(FrameIndex),
    /// The frame is already on the surface.
    Suppressed(FrameIndex),
    /// Nothing was drawn; the surface keeps whatever it showed before.
    Skipped(FrameIndex, SkipReason),
    /// No request was pending.
    Idle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Paint counters for one renderer.
pub struct RenderStats {
    /// Paint calls issued to the surface.
    pub paints: u64,
    /// Requests dropped because the index was already painted.
    pub suppressed: u64,
    /// Requests that could not be painted.
    pub skipped: u64,
}

/// Paints frames from a [`FrameStore`] with a cover fit, at most once per animation frame.
///
/// Progress updates only record the most recent target ([`FrameRenderer::request`]); the paint
/// happens in [`FrameRenderer::on_animation_frame`]. A target equal to the last painted index is
/// never repainted.
#[derive(Clone, Debug, Default)]
pub struct FrameRenderer {
    clear_before_draw: bool,
    pending: Option<FrameIndex>,
    target: Option<FrameIndex>,
    last_painted: Option<FrameIndex>,
    stats: RenderStats,
}

impl FrameRenderer {
    pub fn new(clear_before_draw: bool) -> Self {
        Self {
            clear_before_draw,
            ..Self::default()
        }
    }

    /// Schedule `index` for the next animation frame, replacing any earlier request.
    pub fn request(&mut self, index: FrameIndex) {
        self.pending = Some(index);
        self.target = Some(index);
    }

    /// Schedule the frame for `progress` and return it.
    pub fn request_progress(&mut self, progress: f64, store: &FrameStore) -> FrameIndex {
        let index = store.descriptor().frame_for_progress(progress);
        self.request(index);
        index
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Most recently requested index.
    pub fn target(&self) -> Option<FrameIndex> {
        self.target
    }

    pub fn last_painted(&self) -> Option<FrameIndex> {
        self.last_painted
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Surface contents were lost (resize, reallocation): repaint the current target next frame.
    pub fn invalidate(&mut self) {
        self.last_painted = None;
        if let Some(target) = self.target {
            self.pending = Some(target);
        }
    }

    /// Drop any pending request without painting.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Animation-frame tick: paint the pending request, if any.
    pub fn on_animation_frame(
        &mut self,
        store: &FrameStore,
        canvas: Option<&mut dyn FrameCanvas>,
    ) -> PaintOutcome {
        let Some(index) = self.pending.take() else {
            return PaintOutcome::Idle;
        };
        self.paint(index, store, canvas)
    }

    /// Paint `index` now, subject to redundant-draw suppression.
    pub fn paint(
        &mut self,
        index: FrameIndex,
        store: &FrameStore,
        canvas: Option<&mut dyn FrameCanvas>,
    ) -> PaintOutcome {
        if self.last_painted == Some(index) {
            self.stats.suppressed += 1;
            return PaintOutcome::Suppressed(index);
        }
        match self.try_paint(index, store, canvas) {
            Ok(()) => {
                self.last_painted = Some(index);
                self.stats.paints += 1;
                PaintOutcome::Painted(index)
            }
            Err(reason) => {
                self.stats.skipped += 1;
                tracing::debug!(index = index.0, ?reason, "frame paint skipped");
                PaintOutcome::Skipped(index, reason)
            }
        }
    }

    fn try_paint(
        &self,
        index: FrameIndex,
        store: &FrameStore,
        canvas: Option<&mut dyn FrameCanvas>,
    ) -> Result<(), SkipReason> {
        if !store.is_ready() {
            return Err(SkipReason::NotReady);
        }
        if store.natural_size().is_none() {
            return Err(SkipReason::UnknownAspect);
        }
        let canvas = canvas.ok_or(SkipReason::NoSurface)?;
        let viewport = canvas.viewport();
        if viewport.is_empty() {
            return Err(SkipReason::NoSurface);
        }
        let frame = store
            .get(index)
            .and_then(|asset| asset.frame())
            .ok_or(SkipReason::FrameUnavailable)?;
        let dst =
            cover_rect(viewport.size(), frame.natural_size()).ok_or(SkipReason::UnknownAspect)?;

        if self.clear_before_draw {
            canvas.clear();
        }
        canvas.draw_frame(frame, dst).map_err(|err| {
            tracing::warn!(index = index.0, error = %err, "frame draw failed");
            SkipReason::Backend
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
