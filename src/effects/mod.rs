pub(crate) mod overlay;
pub(crate) mod parallax;
pub(crate) mod presets;
pub(crate) mod ramp;
