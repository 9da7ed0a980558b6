use crate::foundation::error::{HausError, HausResult};
use crate::foundation::math::clamp01;

/// Width, in progress units, of the fade-in and fade-out zones of an overlay window.
pub const FADE_WIDTH: f64 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Horizontal placement of overlay text.
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
/// Progress window `[start, end]` during which an overlay is visible.
pub struct ActivationWindow {
    start: f64,
    end: f64,
}

impl ActivationWindow {
    pub fn new(start: f64, end: f64) -> HausResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(HausError::validation("overlay window bounds must be finite"));
        }
        if start > end {
            return Err(HausError::validation(format!(
                "overlay window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(self) -> f64 {
        self.start
    }

    pub fn end(self) -> f64 {
        self.end
    }

    /// Fully visible part of the window, or `None` when the fades meet.
    pub fn plateau(self, fade: f64) -> Option<(f64, f64)> {
        let a = self.start + fade;
        let b = self.end - fade;
        (a <= b).then_some((a, b))
    }

    pub fn opacity_at(self, progress: f64) -> f64 {
        overlay_opacity(self, progress, FADE_WIDTH)
    }
}

impl TryFrom<[f64; 2]> for ActivationWindow {
    type Error = HausError;

    fn try_from([start, end]: [f64; 2]) -> HausResult<Self> {
        Self::new(start, end)
    }
}

impl From<ActivationWindow> for [f64; 2] {
    fn from(w: ActivationWindow) -> Self {
        [w.start, w.end]
    }
}

/// Opacity of an overlay at `progress`: linear fade in over `fade` after `start`, full plateau,
/// linear fade out over `fade` before `end`, and 0 outside the window.
pub fn overlay_opacity(window: ActivationWindow, progress: f64, fade: f64) -> f64 {
    let (start, end) = (window.start, window.end);
    if progress.is_nan() || progress < start || progress > end {
        return 0.0;
    }
    if fade <= 0.0 {
        return 1.0;
    }
    let v = if progress < start + fade {
        (progress - start) / fade
    } else if progress > end - fade {
        (end - progress) / fade
    } else {
        1.0
    };
    clamp01(v)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One block of text shown over the sequence for part of its progress range.
pub struct TextOverlay {
    pub lines: Vec<String>,
    #[serde(default)]
    pub align: TextAlign,
    pub window: ActivationWindow,
    /// Styled as a call to action; no effect on timing.
    #[serde(default)]
    pub cta: bool,
}

impl TextOverlay {
    pub fn new(lines: &[&str], align: TextAlign, window: ActivationWindow) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            align,
            window,
            cta: false,
        }
    }

    pub fn with_cta(mut self) -> Self {
        self.cta = true;
        self
    }

    pub fn opacity_at(&self, progress: f64) -> f64 {
        self.window.opacity_at(progress)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Overlay state at a given progress, as consumed by presentation.
pub struct OverlayState {
    pub index: usize,
    pub opacity: f64,
    pub align: TextAlign,
    pub cta: bool,
}

/// Per-overlay opacities at `progress`, in declaration order.
pub fn overlay_states(overlays: &[TextOverlay], progress: f64) -> Vec<OverlayState> {
    overlays
        .iter()
        .enumerate()
        .map(|(index, o)| OverlayState {
            index,
            opacity: o.opacity_at(progress),
            align: o.align,
            cta: o.cta,
        })
        .collect()
}

/// Pairs of overlays whose fully visible plateaus overlap.
///
/// Overlapping plateaus are an authoring mistake rather than an error, so this only reports.
pub fn overlapping_plateaus(overlays: &[TextOverlay]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for (i, a) in overlays.iter().enumerate() {
        let Some((a0, a1)) = a.window.plateau(FADE_WIDTH) else {
            continue;
        };
        for (j, b) in overlays.iter().enumerate().skip(i + 1) {
            let Some((b0, b1)) = b.window.plateau(FADE_WIDTH) else {
                continue;
            };
            if a0 < b1 && b0 < a1 {
                out.push((i, j));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/overlay.rs"]
mod tests;
