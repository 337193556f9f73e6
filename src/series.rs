//! Numeric core: target functions, coefficient estimation and partial-sum synthesis.

pub(crate) mod coefficients;
pub(crate) mod metrics;
pub(crate) mod synth;
pub(crate) mod target;
