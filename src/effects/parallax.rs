use std::f64::consts::TAU;

use crate::foundation::core::{Vec2, Viewport};
use crate::foundation::error::{HausError, HausResult};

/// Largest integration step, in seconds. Longer ticks are split.
const MAX_SUBSTEP_S: f64 = 1.0 / 1000.0;
const REST_DELTA: f64 = 0.01;
const REST_SPEED: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,
}

impl SpringParams {
    pub fn validate(self) -> HausResult<()> {
        let ok = [self.damping, self.stiffness, self.mass]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
        if !ok || self.mass <= 0.0 {
            return Err(HausError::validation(
                "spring params must be finite and non-negative with mass > 0",
            ));
        }
        Ok(())
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping: 35.0,
            stiffness: 150.0,
            mass: 0.8,
        }
    }
}

/// Damped spring chasing a target value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    params: SpringParams,
    position: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(params: SpringParams, initial: f64) -> Self {
        Self {
            params,
            position: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }

    /// Advance by `dt` seconds. Returns `true` once at rest on the target.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.is_settled() {
            return true;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return false;
        }

        let SpringParams {
            damping,
            stiffness,
            mass,
        } = self.params;
        let steps = (dt / MAX_SUBSTEP_S).ceil().max(1.0) as u32;
        let h = dt / f64::from(steps);
        for _ in 0..steps {
            let force = -stiffness * (self.position - self.target) - damping * self.velocity;
            self.velocity += force / mass * h;
            self.position += self.velocity * h;
        }

        let settled = (self.position - self.target).abs() < REST_DELTA
            && self.velocity.abs() < REST_SPEED;
        if settled {
            self.position = self.target;
            self.velocity = 0.0;
        }
        settled
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Tuning of the intro parallax shown before the visitor starts scrolling.
pub struct ParallaxConfig {
    /// Max background offset in px at either pointer extreme.
    pub background_range: f64,
    /// Max stone offset in px at either pointer extreme.
    pub stone_range: f64,
    pub spring: SpringParams,
    pub float_amplitude: f64,
    pub float_period_ms: f64,
    /// Shadow shrink per px of float.
    pub shadow_factor: f64,
    /// Document scroll past which the parallax disengages.
    pub scroll_disengage_px: f64,
    /// Downward wheel delta past which the parallax disengages.
    pub wheel_disengage_delta: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            background_range: 10.0,
            stone_range: 30.0,
            spring: SpringParams::default(),
            float_amplitude: 10.0,
            float_period_ms: 4000.0,
            shadow_factor: 0.008,
            scroll_disengage_px: 50.0,
            wheel_disengage_delta: 10.0,
        }
    }
}

impl ParallaxConfig {
    pub fn validate(&self) -> HausResult<()> {
        self.spring.validate()?;
        if !(self.float_period_ms.is_finite() && self.float_period_ms > 0.0) {
            return Err(HausError::validation("parallax float period must be > 0"));
        }
        let finite = [
            self.background_range,
            self.stone_range,
            self.float_amplitude,
            self.shadow_factor,
            self.scroll_disengage_px,
            self.wheel_disengage_delta,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(HausError::validation("parallax config values must be finite"));
        }
        Ok(())
    }
}

/// Pointer position mapped to `[-1, 1]` on both axes, centre at 0.
pub fn normalize_pointer(x: f64, y: f64, viewport: Viewport) -> Vec2 {
    if viewport.is_empty() {
        return Vec2::ZERO;
    }
    let nx = (x / f64::from(viewport.width)) * 2.0 - 1.0;
    let ny = (y / f64::from(viewport.height)) * 2.0 - 1.0;
    Vec2::new(nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0))
}

/// Sinusoidal bob: `sin(2π * (t mod period) / period) * amplitude`.
pub fn float_offset(elapsed_ms: f64, amplitude: f64, period_ms: f64) -> f64 {
    if period_ms.is_nan() || period_ms <= 0.0 || !elapsed_ms.is_finite() {
        return 0.0;
    }
    let phase = elapsed_ms.rem_euclid(period_ms) / period_ms;
    (phase * TAU).sin() * amplitude
}

pub fn shadow_scale(float_y: f64, factor: f64) -> f64 {
    1.0 - float_y * factor
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Layer transforms for one animation frame.
pub struct ParallaxLayers {
    pub background: Vec2,
    pub stone: Vec2,
    pub float_y: f64,
    pub shadow_scale: f64,
    /// `false` once disengaged; the layers should be hidden.
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SpringPair {
    x: Spring,
    y: Spring,
}

impl SpringPair {
    fn new(params: SpringParams) -> Self {
        Self {
            x: Spring::new(params, 0.0),
            y: Spring::new(params, 0.0),
        }
    }

    fn set_target(&mut self, t: Vec2) {
        self.x.set_target(t.x);
        self.y.set_target(t.y);
    }

    fn step(&mut self, dt: f64) {
        self.x.step(dt);
        self.y.step(dt);
    }

    fn value(&self) -> Vec2 {
        Vec2::new(self.x.position(), self.y.position())
    }
}

/// Pointer-driven two-layer parallax with a floating foreground.
///
/// Layers move opposite to the pointer. The first significant scroll or downward wheel gesture
/// disengages it; [`PointerParallax::set_active`] with `true` re-arms it.
#[derive(Clone, Debug)]
pub struct PointerParallax {
    config: ParallaxConfig,
    active: bool,
    disengaged: bool,
    background: SpringPair,
    stone: SpringPair,
    float_elapsed_ms: f64,
    float_y: f64,
}

impl PointerParallax {
    pub fn new(config: ParallaxConfig) -> Self {
        Self {
            background: SpringPair::new(config.spring),
            stone: SpringPair::new(config.spring),
            config,
            active: true,
            disengaged: false,
            float_elapsed_ms: 0.0,
            float_y: 0.0,
        }
    }

    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_engaged(&self) -> bool {
        self.active && !self.disengaged
    }

    pub fn set_active(&mut self, active: bool) {
        if active && !self.active {
            self.float_elapsed_ms = 0.0;
        }
        self.active = active;
        if active {
            self.disengaged = false;
        }
    }

    /// Pointer moved to client coordinates `(x, y)`; ignored while disengaged.
    pub fn pointer_move(&mut self, x: f64, y: f64, viewport: Viewport) {
        if !self.is_engaged() {
            return;
        }
        let n = normalize_pointer(x, y, viewport);
        self.background.set_target(-n * self.config.background_range);
        self.stone.set_target(-n * self.config.stone_range);
    }

    /// Returns `true` if this scroll disengaged the parallax.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.disengage_if(scroll_y > self.config.scroll_disengage_px)
    }

    /// Returns `true` if this wheel gesture disengaged the parallax.
    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        self.disengage_if(delta_y > self.config.wheel_disengage_delta)
    }

    fn disengage_if(&mut self, cond: bool) -> bool {
        if !cond || !self.is_engaged() {
            return false;
        }
        self.disengaged = true;
        tracing::debug!("pointer parallax disengaged");
        true
    }

    /// Advance springs and float by `dt_ms`. The float holds still while disengaged.
    pub fn tick(&mut self, dt_ms: f64) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let dt = dt_ms / 1000.0;
        self.background.step(dt);
        self.stone.step(dt);
        if self.is_engaged() {
            self.float_elapsed_ms += dt_ms;
            self.float_y = float_offset(
                self.float_elapsed_ms,
                self.config.float_amplitude,
                self.config.float_period_ms,
            );
        }
    }

    pub fn layers(&self) -> ParallaxLayers {
        ParallaxLayers {
            background: self.background.value(),
            stone: self.stone.value(),
            float_y: self.float_y,
            shadow_scale: shadow_scale(self.float_y, self.config.shadow_factor),
            visible: self.is_engaged(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/parallax.rs"]
mod tests;
