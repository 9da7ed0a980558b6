use std::sync::{Arc, mpsc};

use crate::{
    assets::decode::{PreparedFrame, decode_frame},
    assets::source::FrameSource,
    foundation::core::{FrameIndex, Size},
    foundation::error::HausResult,
    sequence::descriptor::SequenceDescriptor,
};

#[derive(Clone, Debug)]
/// Load state of one frame slot.
pub enum FrameAsset {
    /// Fetch or decode still in flight.
    Pending,
    /// Decoded and ready to paint.
    Loaded(PreparedFrame),
    /// Fetch or decode failed; painting this slot is a no-op.
    Failed,
}

impl FrameAsset {
    /// Decoded frame, if this slot loaded successfully.
    pub fn frame(&self) -> Option<&PreparedFrame> {
        match self {
            Self::Loaded(f) => Some(f),
            Self::Pending | Self::Failed => None,
        }
    }

    /// `true` once the slot reached a terminal state.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Snapshot of loading progress.
pub struct LoadProgress {
    /// Total slots in the sequence.
    pub total: usize,
    /// Slots that loaded successfully.
    pub loaded: usize,
    /// Slots that failed.
    pub failed: usize,
}

impl LoadProgress {
    /// Slots in a terminal state.
    pub fn settled(self) -> usize {
        self.loaded + self.failed
    }

    /// `true` once every slot settled.
    pub fn is_complete(self) -> bool {
        self.settled() >= self.total
    }

    /// Whole-number percentage of settled slots, as shown by a loading indicator.
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.settled() as f64 / self.total as f64) * 100.0).round() as u8
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Final outcome of an all-settled load.
pub struct ReadinessReport {
    /// Total slots in the sequence.
    pub total: usize,
    /// Slots that loaded successfully.
    pub loaded: usize,
    /// Indices that failed, ascending.
    pub failed: Vec<FrameIndex>,
    /// Natural size of frame 0, if it loaded.
    pub natural_size: Option<(u32, u32)>,
}

struct FrameLoadMsg {
    index: usize,
    result: HausResult<PreparedFrame>,
}

/// Ordered frame slots filled concurrently by loader workers.
///
/// The store is `ready` once every slot settled (loaded or failed). Until then [`FrameStore::get`]
/// returns `None`; afterwards the slots never change.
pub struct FrameStore {
    descriptor: SequenceDescriptor,
    slots: Vec<FrameAsset>,
    loaded: usize,
    failed: usize,
    rx: Option<mpsc::Receiver<FrameLoadMsg>>,
}

impl std::fmt::Debug for FrameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameStore")
            .field("frame_count", &self.descriptor.frame_count)
            .field("loaded", &self.loaded)
            .field("failed", &self.failed)
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl FrameStore {
    /// Start loading every frame of `descriptor` on the global rayon pool.
    #[tracing::instrument(skip(source), fields(frames = descriptor.frame_count))]
    pub fn load(descriptor: SequenceDescriptor, source: Arc<dyn FrameSource>) -> Self {
        Self::start(descriptor, source, |job| rayon::spawn(job))
    }

    /// Start loading every frame of `descriptor` on a dedicated pool.
    #[tracing::instrument(skip(pool, source), fields(frames = descriptor.frame_count))]
    pub fn load_in(
        pool: &rayon::ThreadPool,
        descriptor: SequenceDescriptor,
        source: Arc<dyn FrameSource>,
    ) -> Self {
        Self::start(descriptor, source, |job| pool.spawn(job))
    }

    /// Build an already-settled store from decoded frames; `None` entries become failed slots.
    pub fn from_frames(
        descriptor: SequenceDescriptor,
        frames: Vec<Option<PreparedFrame>>,
    ) -> HausResult<Self> {
        descriptor.validate()?;
        if frames.len() != descriptor.frame_count {
            return Err(crate::HausError::validation(format!(
                "expected {} frames, got {}",
                descriptor.frame_count,
                frames.len()
            )));
        }
        let mut out = Self::pending(descriptor);
        for (i, f) in frames.into_iter().enumerate() {
            let result = f.ok_or_else(|| crate::HausError::load("frame not provided"));
            out.record(i, result);
        }
        Ok(out)
    }

    fn start(
        descriptor: SequenceDescriptor,
        source: Arc<dyn FrameSource>,
        spawn: impl Fn(Box<dyn FnOnce() + Send + 'static>),
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        for index in 0..descriptor.frame_count {
            let tx = tx.clone();
            let source = Arc::clone(&source);
            let locator = descriptor.locator(FrameIndex(index));
            spawn(Box::new(move || {
                let result = source.fetch(&locator).and_then(|bytes| decode_frame(&bytes));
                // The receiver is gone once the store is dropped; nothing left to report to.
                let _ = tx.send(FrameLoadMsg { index, result });
            }));
        }

        let mut out = Self::pending(descriptor);
        out.rx = Some(rx);
        out
    }

    pub(crate) fn pending(descriptor: SequenceDescriptor) -> Self {
        let slots = vec![FrameAsset::Pending; descriptor.frame_count];
        Self {
            descriptor,
            slots,
            loaded: 0,
            failed: 0,
            rx: None,
        }
    }

    /// Settle slot `index`. Records for already-settled slots are ignored.
    pub(crate) fn record(&mut self, index: usize, result: HausResult<PreparedFrame>) {
        let Some(slot) = self.slots.get_mut(index) else {
            tracing::warn!(index, "frame load reported for out-of-range index");
            return;
        };
        if slot.is_settled() {
            return;
        }
        match result {
            Ok(frame) => {
                *slot = FrameAsset::Loaded(frame);
                self.loaded += 1;
            }
            Err(err) => {
                tracing::warn!(
                    index,
                    locator = %self.descriptor.locator(FrameIndex(index)),
                    error = %err,
                    "frame failed to load"
                );
                *slot = FrameAsset::Failed;
                self.failed += 1;
            }
        }
        if self.is_ready() {
            self.rx = None;
            tracing::debug!(
                loaded = self.loaded,
                failed = self.failed,
                "frame store ready"
            );
        }
    }

    /// Workers vanished without reporting: settle what is left as failed.
    fn abandon_pending(&mut self) {
        let pending = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_settled())
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        for i in pending {
            self.record(i, Err(crate::HausError::load("loader exited without reporting")));
        }
        self.rx = None;
    }

    /// Absorb every load that settled since the last call, without blocking.
    pub fn poll(&mut self) -> LoadProgress {
        loop {
            let Some(rx) = self.rx.as_ref() else {
                break;
            };
            match rx.try_recv() {
                Ok(msg) => self.record(msg.index, msg.result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => self.abandon_pending(),
            }
        }
        self.progress()
    }

    /// Block until every slot settled, then report the outcome.
    pub fn wait_ready(&mut self) -> ReadinessReport {
        while !self.is_ready() {
            let Some(rx) = self.rx.as_ref() else {
                self.abandon_pending();
                break;
            };
            match rx.recv() {
                Ok(msg) => self.record(msg.index, msg.result),
                Err(mpsc::RecvError) => self.abandon_pending(),
            }
        }
        self.report()
    }

    pub fn descriptor(&self) -> &SequenceDescriptor {
        &self.descriptor
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        self.loaded + self.failed == self.slots.len()
    }

    pub fn progress(&self) -> LoadProgress {
        LoadProgress {
            total: self.slots.len(),
            loaded: self.loaded,
            failed: self.failed,
        }
    }

    /// Slot at `index`; `None` before readiness or out of range.
    pub fn get(&self, index: FrameIndex) -> Option<&FrameAsset> {
        if !self.is_ready() {
            return None;
        }
        self.slots.get(index.0)
    }

    /// Natural size of frame 0, once it has loaded.
    pub fn natural_size(&self) -> Option<Size> {
        self.slots
            .first()
            .and_then(FrameAsset::frame)
            .map(PreparedFrame::natural_size)
    }

    pub fn report(&self) -> ReadinessReport {
        ReadinessReport {
            total: self.slots.len(),
            loaded: self.loaded,
            failed: self
                .slots
                .iter()
                .enumerate()
                .filter(|(_, s)| matches!(s, FrameAsset::Failed))
                .map(|(i, _)| FrameIndex(i))
                .collect(),
            natural_size: self
                .slots
                .first()
                .and_then(FrameAsset::frame)
                .map(|f| (f.width, f.height)),
        }
    }
}

/// Dedicated loader pool; `None` lets rayon pick the thread count.
pub fn build_loader_pool(threads: Option<usize>) -> HausResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(crate::HausError::validation(
            "loader 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("haus-load-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| crate::HausError::Other(anyhow::anyhow!("build loader pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
