use crate::effects::ramp::Ramp;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Progress-driven effects of the pinned stone sequence.
pub struct StoneEffects {
    pub canvas_opacity: Ramp,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct StoneEffectValues {
    pub canvas_opacity: f64,
}

impl Default for StoneEffects {
    fn default() -> Self {
        Self::onenine()
    }
}

impl StoneEffects {
    /// Canvas fades out over the last 8% of the pinned range.
    pub fn onenine() -> Self {
        Self {
            canvas_opacity: Ramp::from_stops(&[(0.92, 1.0), (1.0, 0.0)]),
        }
    }

    pub fn sample(&self, progress: f64) -> StoneEffectValues {
        StoneEffectValues {
            canvas_opacity: self.canvas_opacity.sample(progress),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Progress-driven effects of the logo reveal: two copy blocks slide in over the canvas,
/// which itself fades in from under a full-cover overlay.
pub struct RevealEffects {
    pub left_opacity: Ramp,
    pub left_y: Ramp,
    pub right_opacity: Ramp,
    pub right_y: Ramp,
    pub fade_overlay_opacity: Ramp,
    pub canvas_opacity: Ramp,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct RevealEffectValues {
    pub left_opacity: f64,
    pub left_y: f64,
    pub right_opacity: f64,
    pub right_y: f64,
    pub fade_overlay_opacity: f64,
    pub canvas_opacity: f64,
}

impl Default for RevealEffects {
    fn default() -> Self {
        Self::onenine()
    }
}

impl RevealEffects {
    pub fn onenine() -> Self {
        Self {
            left_opacity: Ramp::from_stops(&[(0.7, 0.0), (0.8, 1.0)]),
            left_y: Ramp::from_stops(&[(0.7, 6.0), (0.8, 0.0)]),
            right_opacity: Ramp::from_stops(&[(0.75, 0.0), (0.85, 1.0)]),
            right_y: Ramp::from_stops(&[(0.75, 6.0), (0.85, 0.0)]),
            fade_overlay_opacity: Ramp::from_stops(&[(0.0, 1.0), (0.4, 1.0), (0.55, 0.0)]),
            canvas_opacity: Ramp::from_stops(&[(0.35, 0.0), (0.5, 1.0)]),
        }
    }

    pub fn sample(&self, progress: f64) -> RevealEffectValues {
        RevealEffectValues {
            left_opacity: self.left_opacity.sample(progress),
            left_y: self.left_y.sample(progress),
            right_opacity: self.right_opacity.sample(progress),
            right_y: self.right_y.sample(progress),
            fade_overlay_opacity: self.fade_overlay_opacity.sample(progress),
            canvas_opacity: self.canvas_opacity.sample(progress),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Hero block transforms, driven by raw document scroll in pixels rather than progress.
pub struct HeroEffects {
    pub opacity: Ramp,
    pub scale: Ramp,
    pub y: Ramp,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HeroEffectValues {
    pub opacity: f64,
    pub scale: f64,
    pub y: f64,
}

impl Default for HeroEffects {
    fn default() -> Self {
        Self::onenine()
    }
}

impl HeroEffects {
    pub fn onenine() -> Self {
        Self {
            opacity: Ramp::from_stops(&[(0.0, 1.0), (300.0, 0.0)]),
            scale: Ramp::from_stops(&[(0.0, 1.0), (400.0, 0.95)]),
            y: Ramp::from_stops(&[(0.0, 0.0), (400.0, -50.0)]),
        }
    }

    pub fn sample(&self, scroll_y: f64) -> HeroEffectValues {
        HeroEffectValues {
            opacity: self.opacity.sample(scroll_y),
            scale: self.scale.sample(scroll_y),
            y: self.y.sample(scroll_y),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/presets.rs"]
mod tests;
