pub(crate) mod latch;
pub(crate) mod mapper;
pub(crate) mod stepper;
