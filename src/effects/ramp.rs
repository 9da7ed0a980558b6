use crate::foundation::error::{HausError, HausResult};
use crate::foundation::math::lerp;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RampStop {
    pub input: f64,
    pub output: f64,
}

/// Piecewise-linear map from a scroll-derived input to an output value.
///
/// Inputs before the first stop read the first output; inputs after the last stop read the last.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RampDef", into = "RampDef")]
pub struct Ramp {
    stops: Vec<RampStop>, // sorted by input
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct RampDef {
    input: Vec<f64>,
    output: Vec<f64>,
}

impl TryFrom<RampDef> for Ramp {
    type Error = HausError;

    fn try_from(def: RampDef) -> HausResult<Self> {
        Self::new(&def.input, &def.output)
    }
}

impl From<Ramp> for RampDef {
    fn from(r: Ramp) -> Self {
        Self {
            input: r.stops.iter().map(|s| s.input).collect(),
            output: r.stops.iter().map(|s| s.output).collect(),
        }
    }
}

impl Ramp {
    pub fn new(input: &[f64], output: &[f64]) -> HausResult<Self> {
        if input.is_empty() {
            return Err(HausError::validation("ramp must have at least one stop"));
        }
        if input.len() != output.len() {
            return Err(HausError::validation(format!(
                "ramp has {} inputs but {} outputs",
                input.len(),
                output.len()
            )));
        }
        if input.iter().chain(output).any(|v| !v.is_finite()) {
            return Err(HausError::validation("ramp stops must be finite"));
        }
        if !input.windows(2).all(|w| w[0] <= w[1]) {
            return Err(HausError::validation("ramp inputs must be sorted ascending"));
        }
        Ok(Self {
            stops: input
                .iter()
                .zip(output)
                .map(|(&input, &output)| RampStop { input, output })
                .collect(),
        })
    }

    /// Two-stop ramp `[a, b] -> [from, to]`.
    pub fn linear(a: f64, b: f64, from: f64, to: f64) -> HausResult<Self> {
        Self::new(&[a, b], &[from, to])
    }

    /// Built-in curves with known-good stops; skips validation.
    pub(crate) fn from_stops(stops: &[(f64, f64)]) -> Self {
        Self {
            stops: stops
                .iter()
                .map(|&(input, output)| RampStop { input, output })
                .collect(),
        }
    }

    pub fn stops(&self) -> &[RampStop] {
        &self.stops
    }

    pub fn sample(&self, x: f64) -> f64 {
        let Some(first) = self.stops.first() else {
            return 0.0;
        };
        if x.is_nan() {
            return first.output;
        }
        let idx = self.stops.partition_point(|s| s.input <= x);
        if idx == 0 {
            return first.output;
        }
        if idx >= self.stops.len() {
            return self.stops[self.stops.len() - 1].output;
        }

        let a = self.stops[idx - 1];
        let b = self.stops[idx];
        let denom = b.input - a.input;
        if denom <= 0.0 {
            return b.output;
        }
        lerp(a.output, b.output, (x - a.input) / denom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/ramp.rs"]
mod tests;
