use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Viewport;
use crate::foundation::error::{HausError, HausResult};
use crate::foundation::math::clamp01;

#[derive(Clone, Copy, Debug, PartialEq)]
/// A line across an element, expressed as a fraction of its height from the top.
pub enum Edge {
    /// Top edge (`0`).
    Start,
    /// Vertical midpoint (`0.5`).
    Center,
    /// Bottom edge (`1`).
    End,
    /// Arbitrary fraction of the height.
    Fraction(f64),
}

impl Edge {
    pub fn fraction(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
            Self::Fraction(f) => f,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Center => f.write_str("center"),
            Self::End => f.write_str("end"),
            Self::Fraction(v) => write!(f, "{v}"),
        }
    }
}

impl FromStr for Edge {
    type Err = HausError;

    fn from_str(s: &str) -> HausResult<Self> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => {
                let v = other
                    .parse::<f64>()
                    .map_err(|_| HausError::validation(format!("unknown scroll edge '{other}'")))?;
                if !v.is_finite() {
                    return Err(HausError::validation("scroll edge fraction must be finite"));
                }
                Ok(Self::Fraction(v))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
/// "When `container` edge meets `viewport` edge", written `"<container> <viewport>"`.
pub struct ScrollOffset {
    pub container: Edge,
    pub viewport: Edge,
}

impl ScrollOffset {
    pub const fn new(container: Edge, viewport: Edge) -> Self {
        Self {
            container,
            viewport,
        }
    }

    /// Document scroll position at which this offset is met.
    pub fn scroll_position(self, container: ContainerGeometry, viewport_height: f64) -> f64 {
        container.top + self.container.fraction() * container.height
            - self.viewport.fraction() * viewport_height
    }
}

impl fmt::Display for ScrollOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.container, self.viewport)
    }
}

impl FromStr for ScrollOffset {
    type Err = HausError;

    fn from_str(s: &str) -> HausResult<Self> {
        let mut parts = s.split_whitespace();
        let (Some(c), Some(v), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(HausError::validation(format!(
                "scroll offset '{s}' must be '<container edge> <viewport edge>'"
            )));
        };
        Ok(Self::new(c.parse()?, v.parse()?))
    }
}

impl TryFrom<String> for ScrollOffset {
    type Error = HausError;

    fn try_from(s: String) -> HausResult<Self> {
        s.parse()
    }
}

impl From<ScrollOffset> for String {
    fn from(o: ScrollOffset) -> Self {
        o.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Progress reads 0 at `enter` and 1 at `exit`.
pub struct ScrollRange {
    pub enter: ScrollOffset,
    pub exit: ScrollOffset,
}

impl ScrollRange {
    /// Container top at viewport top through container bottom at viewport bottom.
    pub const fn pinned() -> Self {
        Self {
            enter: ScrollOffset::new(Edge::Start, Edge::Start),
            exit: ScrollOffset::new(Edge::End, Edge::End),
        }
    }

    /// Container top entering at the viewport bottom through container bottom at viewport bottom.
    pub const fn entering() -> Self {
        Self {
            enter: ScrollOffset::new(Edge::Start, Edge::End),
            exit: ScrollOffset::new(Edge::End, Edge::End),
        }
    }

    /// Scroll positions where progress reads 0 and 1.
    pub fn bounds(self, container: ContainerGeometry, viewport_height: f64) -> (f64, f64) {
        (
            self.enter.scroll_position(container, viewport_height),
            self.exit.scroll_position(container, viewport_height),
        )
    }
}

impl Default for ScrollRange {
    fn default() -> Self {
        Self::pinned()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Container bounding box along the scroll axis, in document pixels.
pub struct ContainerGeometry {
    pub top: f64,
    pub height: f64,
}

impl ContainerGeometry {
    pub fn new(top: f64, height: f64) -> HausResult<Self> {
        if !top.is_finite() || !height.is_finite() || height < 0.0 {
            return Err(HausError::validation(
                "container geometry must be finite with height >= 0",
            ));
        }
        Ok(Self { top, height })
    }

    /// A container `multiple` viewports tall, as in `h-[400vh]`.
    pub fn viewport_multiple(top: f64, multiple: f64, viewport: Viewport) -> HausResult<Self> {
        Self::new(top, multiple * f64::from(viewport.height))
    }

    pub fn center(self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Normalized progress for `scroll_y`; a pure function of its inputs, clamped to `[0, 1]`.
///
/// A degenerate range (exit at or before enter) reads as a step: 0 before `enter`, 1 from it.
pub fn progress_at(
    scroll_y: f64,
    container: ContainerGeometry,
    viewport_height: f64,
    range: ScrollRange,
) -> f64 {
    let (s0, s1) = range.bounds(container, viewport_height);
    let span = s1 - s0;
    if span.is_nan() || span <= 0.0 {
        return if scroll_y >= s0 { 1.0 } else { 0.0 };
    }
    clamp01((scroll_y - s0) / span)
}

/// Handle returned by [`ScrollTracker::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(f64)>;

/// Stateful progress source for one container.
///
/// Every scroll, resize or relayout recomputes progress and synchronously invokes each
/// subscriber, in subscription order, with the new value. Recomputation is idempotent, so
/// callers may feed it more events than there are animation frames.
pub struct ScrollTracker {
    range: ScrollRange,
    container: ContainerGeometry,
    viewport: Viewport,
    scroll_y: f64,
    progress: f64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl fmt::Debug for ScrollTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollTracker")
            .field("range", &self.range)
            .field("container", &self.container)
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("progress", &self.progress)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ScrollTracker {
    pub fn new(range: ScrollRange, container: ContainerGeometry, viewport: Viewport) -> Self {
        let mut out = Self {
            range,
            container,
            viewport,
            scroll_y: 0.0,
            progress: 0.0,
            observers: Vec::new(),
            next_id: 0,
        };
        out.progress = out.compute();
        out
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn container(&self) -> ContainerGeometry {
        self.container
    }

    pub fn range(&self) -> ScrollRange {
        self.range
    }

    /// Document scrolled to `scroll_y`.
    pub fn scroll_to(&mut self, scroll_y: f64) -> f64 {
        if scroll_y.is_finite() {
            self.scroll_y = scroll_y;
        }
        self.recompute()
    }

    /// Window resized.
    pub fn resize(&mut self, viewport: Viewport) -> f64 {
        self.viewport = viewport;
        self.recompute()
    }

    /// Container moved or changed height.
    pub fn relayout(&mut self, container: ContainerGeometry) -> f64 {
        self.container = container;
        self.recompute()
    }

    /// Viewport and container changed together (a window resize reflows the container).
    ///
    /// Subscribers are notified once, with the final value.
    pub fn set_layout(&mut self, container: ContainerGeometry, viewport: Viewport) -> f64 {
        self.container = container;
        self.viewport = viewport;
        self.recompute()
    }

    /// Recompute from current inputs and notify every subscriber.
    pub fn recompute(&mut self) -> f64 {
        self.progress = self.compute();
        let p = self.progress;
        for (_, observer) in &mut self.observers {
            observer(p);
        }
        p
    }

    fn compute(&self) -> f64 {
        progress_at(
            self.scroll_y,
            self.container,
            f64::from(self.viewport.height),
            self.range,
        )
    }

    pub fn subscribe(&mut self, observer: impl FnMut(f64) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/mapper.rs"]
mod tests;
