use std::sync::Arc;

use crate::{
    assets::source::FrameSource,
    assets::store::{FrameStore, LoadProgress, ReadinessReport},
    config::site::SequenceConfig,
    effects::overlay::{OverlayState, TextOverlay, overlay_states},
    foundation::core::{FrameIndex, Viewport},
    foundation::error::HausResult,
    render::canvas::{CpuCanvas, FrameCanvas},
    render::renderer::{FrameRenderer, PaintOutcome, RenderStats},
    scroll::latch::ThresholdLatch,
    scroll::mapper::{ContainerGeometry, ScrollTracker, SubscriptionId},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Result of feeding one scroll offset to a [`ScrollSequence`].
pub struct ScrollUpdate {
    pub progress: f64,
    /// Frame scheduled for the next animation frame; `None` until the store is ready.
    pub frame: Option<FrameIndex>,
    /// `true` only on the update that carried progress across the completion threshold.
    pub completed_now: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the presentation layer needs for one sequence at the current progress.
pub struct SequenceOutputs {
    pub progress: f64,
    pub frame: FrameIndex,
    pub overlays: Vec<OverlayState>,
    pub load: LoadProgress,
    pub ready: bool,
    pub completed: bool,
}

/// One scroll-driven frame sequence bound to a drawing surface.
///
/// Scroll and resize callbacks only record a target; the paint happens in
/// [`ScrollSequence::on_animation_frame`]. After [`ScrollSequence::destroy`] every callback is a
/// no-op.
pub struct ScrollSequence<C: FrameCanvas = CpuCanvas> {
    config: SequenceConfig,
    tracker: ScrollTracker,
    store: FrameStore,
    renderer: FrameRenderer,
    canvas: Option<C>,
    overlays: Vec<TextOverlay>,
    completion: ThresholdLatch,
    was_ready: bool,
    destroyed: bool,
}

impl<C: FrameCanvas> std::fmt::Debug for ScrollSequence<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSequence")
            .field("tracker", &self.tracker)
            .field("store", &self.store)
            .field("renderer", &self.renderer)
            .field("has_canvas", &self.canvas.is_some())
            .field("overlays", &self.overlays.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl<C: FrameCanvas> ScrollSequence<C> {
    /// Start loading every frame and bind to `canvas`.
    #[tracing::instrument(skip_all, fields(frames = config.descriptor.frame_count))]
    pub fn create(
        config: &SequenceConfig,
        source: Arc<dyn FrameSource>,
        canvas: C,
    ) -> HausResult<Self> {
        config.validate()?;
        let store = FrameStore::load(config.descriptor.clone(), source);
        Self::with_store(config, store, canvas)
    }

    /// Bind an existing store (loading or settled) to `canvas`.
    pub fn with_store(config: &SequenceConfig, store: FrameStore, canvas: C) -> HausResult<Self> {
        config.validate()?;
        let viewport = canvas.viewport();
        let container = config.container(viewport)?;
        Ok(Self {
            config: config.clone(),
            tracker: ScrollTracker::new(config.range, container, viewport),
            store,
            renderer: FrameRenderer::new(config.clear_before_draw),
            canvas: Some(canvas),
            overlays: Vec::new(),
            completion: ThresholdLatch::completion(),
            was_ready: false,
            destroyed: false,
        })
    }

    pub fn with_overlays(mut self, overlays: Vec<TextOverlay>) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn on_scroll(&mut self, scroll_y: f64) -> ScrollUpdate {
        if self.destroyed {
            return self.idle_update();
        }
        let progress = self.tracker.scroll_to(scroll_y);
        self.after_progress(progress)
    }

    /// Container moved or changed height. Holds until the next resize.
    pub fn relayout(&mut self, container: ContainerGeometry) -> ScrollUpdate {
        if self.destroyed {
            return self.idle_update();
        }
        let progress = self.tracker.relayout(container);
        self.after_progress(progress)
    }

    /// Window resized: reallocate the surface and repaint the current frame.
    pub fn on_resize(&mut self, viewport: Viewport) -> HausResult<ScrollUpdate> {
        if self.destroyed {
            return Ok(self.idle_update());
        }
        let container = self.config.container(viewport)?;
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(viewport)?;
        }
        let progress = self.tracker.set_layout(container, viewport);
        let update = self.after_progress(progress);
        self.renderer.invalidate();
        Ok(update)
    }

    fn after_progress(&mut self, progress: f64) -> ScrollUpdate {
        let frame = self
            .store
            .is_ready()
            .then(|| self.renderer.request_progress(progress, &self.store));
        let completed_now = self.completion.update(progress);
        if completed_now {
            tracing::debug!(progress, "sequence scroll complete");
        }
        ScrollUpdate {
            progress,
            frame,
            completed_now,
        }
    }

    fn idle_update(&self) -> ScrollUpdate {
        ScrollUpdate {
            progress: self.tracker.progress(),
            frame: None,
            completed_now: false,
        }
    }

    /// Animation-frame tick: absorb finished loads, then paint at most one frame.
    pub fn on_animation_frame(&mut self) -> PaintOutcome {
        if self.destroyed {
            return PaintOutcome::Idle;
        }
        self.store.poll();
        if !self.was_ready && self.store.is_ready() {
            self.was_ready = true;
            let progress = self.tracker.progress();
            let index = self.renderer.request_progress(progress, &self.store);
            tracing::debug!(index = index.0, progress, "sequence ready, drawing current frame");
        }
        self.renderer.on_animation_frame(
            &self.store,
            self.canvas.as_mut().map(|c| c as &mut dyn FrameCanvas),
        )
    }

    /// Block until every frame settled.
    pub fn wait_ready(&mut self) -> ReadinessReport {
        self.store.wait_ready()
    }

    pub fn outputs(&self) -> SequenceOutputs {
        let progress = self.tracker.progress();
        SequenceOutputs {
            progress,
            frame: self.store.descriptor().frame_for_progress(progress),
            overlays: overlay_states(&self.overlays, progress),
            load: self.store.progress(),
            ready: self.store.is_ready(),
            completed: self.completion.is_fired(),
        }
    }

    /// Observe every progress recomputation.
    pub fn subscribe(&mut self, observer: impl FnMut(f64) + 'static) -> Option<SubscriptionId> {
        if self.destroyed {
            return None;
        }
        Some(self.tracker.subscribe(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.tracker.unsubscribe(id)
    }

    /// Release every subscription and the drawing surface. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.tracker.clear_observers();
        self.renderer.cancel();
        self.canvas = None;
        tracing::debug!("sequence destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn progress(&self) -> f64 {
        self.tracker.progress()
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn render_stats(&self) -> RenderStats {
        self.renderer.stats()
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/player.rs"]
mod tests;
