/// Edge-triggered threshold detector.
///
/// Fires once when the watched value crosses `threshold` and re-arms when it falls back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdLatch {
    threshold: f64,
    inclusive: bool,
    fired: bool,
}

impl ThresholdLatch {
    /// Fires at `value >= threshold`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            inclusive: true,
            fired: false,
        }
    }

    /// Fires only at `value > threshold`.
    pub fn exclusive(threshold: f64) -> Self {
        Self {
            inclusive: false,
            ..Self::new(threshold)
        }
    }

    /// Progress at or past the end of a sequence.
    pub fn completion() -> Self {
        Self::new(0.99)
    }

    /// Page scrolled beyond the first 50 pixels.
    pub fn scroll_started() -> Self {
        Self::exclusive(50.0)
    }

    fn crossed(&self, value: f64) -> bool {
        if self.inclusive {
            value >= self.threshold
        } else {
            value > self.threshold
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Feed a new value; returns `true` only on the update that crosses the threshold.
    pub fn update(&mut self, value: f64) -> bool {
        if self.crossed(value) {
            if self.fired {
                return false;
            }
            self.fired = true;
            return true;
        }
        self.fired = false;
        false
    }

    pub fn reset(&mut self) {
        self.fired = false;
    }
}
