use std::sync::Arc;

use crate::{
    assets::source::FrameSource,
    config::site::SiteConfig,
    effects::parallax::{ParallaxLayers, PointerParallax},
    effects::presets::{HeroEffectValues, RevealEffectValues, StoneEffectValues},
    foundation::core::Viewport,
    foundation::error::HausResult,
    render::canvas::{CpuCanvas, FrameCanvas},
    render::renderer::PaintOutcome,
    scroll::latch::ThresholdLatch,
    scroll::mapper::ContainerGeometry,
    scroll::stepper::stepped_index_at,
    sequence::player::{ScrollSequence, SequenceOutputs},
};

/// Number of entries in the philosophy carousel.
pub const BELIEF_COUNT: usize = 3;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Derived page state for one document scroll offset.
pub struct PageState {
    pub scroll_y: f64,
    pub hero: HeroEffectValues,
    pub stone: SequenceOutputs,
    pub stone_effects: StoneEffectValues,
    pub reveal: SequenceOutputs,
    pub reveal_effects: RevealEffectValues,
    pub parallax: ParallaxLayers,
    pub scroll_started: bool,
    pub scroll_complete: bool,
    /// Active carousel entry, once its container has been laid out.
    pub belief_index: Option<usize>,
}

/// Both sequences of the site plus everything driven from the same document scroll.
pub struct HausPage<C: FrameCanvas = CpuCanvas> {
    config: SiteConfig,
    viewport: Viewport,
    scroll_y: f64,
    stone: ScrollSequence<C>,
    reveal: ScrollSequence<C>,
    parallax: PointerParallax,
    started: ThresholdLatch,
    scroll_started: bool,
    scroll_complete: bool,
    beliefs: Option<ContainerGeometry>,
}

impl<C: FrameCanvas> std::fmt::Debug for HausPage<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HausPage")
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("stone", &self.stone)
            .field("reveal", &self.reveal)
            .field("scroll_started", &self.scroll_started)
            .field("scroll_complete", &self.scroll_complete)
            .finish()
    }
}

impl<C: FrameCanvas> HausPage<C> {
    /// Start loading both sequences from `source`, each painting into its own surface.
    #[tracing::instrument(skip_all)]
    pub fn create(
        config: SiteConfig,
        source: Arc<dyn FrameSource>,
        stone_canvas: C,
        reveal_canvas: C,
    ) -> HausResult<Self> {
        config.validate()?;
        let stone = ScrollSequence::create(&config.stone, Arc::clone(&source), stone_canvas)?
            .with_overlays(config.overlays.clone());
        let reveal = ScrollSequence::create(&config.reveal, source, reveal_canvas)?;
        Ok(Self::assemble(config, stone, reveal))
    }

    /// Assemble from already-bound sequences.
    pub fn from_sequences(
        config: SiteConfig,
        stone: ScrollSequence<C>,
        reveal: ScrollSequence<C>,
    ) -> HausResult<Self> {
        config.validate()?;
        Ok(Self::assemble(config, stone, reveal))
    }

    fn assemble(config: SiteConfig, stone: ScrollSequence<C>, reveal: ScrollSequence<C>) -> Self {
        let viewport = stone
            .canvas()
            .map(FrameCanvas::viewport)
            .unwrap_or_default();
        Self {
            parallax: PointerParallax::new(config.parallax),
            config,
            viewport,
            scroll_y: 0.0,
            stone,
            reveal,
            started: ThresholdLatch::scroll_started(),
            scroll_started: false,
            scroll_complete: false,
            beliefs: None,
        }
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        if !scroll_y.is_finite() {
            return;
        }
        self.scroll_y = scroll_y;
        if self.stone.on_scroll(scroll_y).completed_now {
            self.scroll_complete = true;
        }
        self.reveal.on_scroll(scroll_y);
        self.parallax.on_scroll(scroll_y);

        if self.started.update(scroll_y) && !self.scroll_started {
            self.scroll_started = true;
            tracing::debug!(scroll_y, "page scroll started");
        }
        // Back at the top: the intro parallax comes back. `scroll_started` stays set.
        let at_top = !self.started.is_fired();
        if at_top != self.parallax.is_active() {
            self.parallax.set_active(at_top);
        }
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        self.parallax.on_wheel(delta_y);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.parallax.pointer_move(x, y, self.viewport);
    }

    pub fn on_resize(&mut self, viewport: Viewport) -> HausResult<()> {
        self.viewport = viewport;
        self.stone.on_resize(viewport)?;
        self.reveal.on_resize(viewport)?;
        Ok(())
    }

    /// The reveal container's real position, as measured by the layout shell.
    pub fn relayout_reveal(&mut self, container: ContainerGeometry) {
        self.reveal.relayout(container);
    }

    /// The philosophy carousel container's position, as measured by the layout shell.
    pub fn relayout_beliefs(&mut self, container: ContainerGeometry) {
        self.beliefs = Some(container);
    }

    /// Animation-frame tick of `dt_ms`: advance the parallax and paint both sequences.
    pub fn on_animation_frame(&mut self, dt_ms: f64) -> (PaintOutcome, PaintOutcome) {
        self.parallax.tick(dt_ms);
        (
            self.stone.on_animation_frame(),
            self.reveal.on_animation_frame(),
        )
    }

    pub fn state(&self) -> PageState {
        let stone = self.stone.outputs();
        let reveal = self.reveal.outputs();
        PageState {
            scroll_y: self.scroll_y,
            hero: self.config.hero.sample(self.scroll_y),
            stone_effects: self.config.stone_effects.sample(stone.progress),
            reveal_effects: self.config.reveal_effects.sample(reveal.progress),
            stone,
            reveal,
            parallax: self.parallax.layers(),
            scroll_started: self.scroll_started,
            scroll_complete: self.scroll_complete,
            belief_index: self.beliefs.map(|c| {
                stepped_index_at(
                    self.scroll_y,
                    c,
                    f64::from(self.viewport.height),
                    BELIEF_COUNT,
                )
            }),
        }
    }

    pub fn stone(&self) -> &ScrollSequence<C> {
        &self.stone
    }

    pub fn reveal(&self) -> &ScrollSequence<C> {
        &self.reveal
    }

    pub fn wait_ready(&mut self) {
        self.stone.wait_ready();
        self.reveal.wait_ready();
    }

    /// Tear down both sequences. Later callbacks are no-ops for them.
    pub fn destroy(&mut self) {
        self.stone.destroy();
        self.reveal.destroy();
    }
}

#[cfg(test)]
#[path = "../tests/unit/page.rs"]
mod tests;
