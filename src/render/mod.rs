pub(crate) mod canvas;
pub(crate) mod fit;
pub(crate) mod renderer;
