//! Frame sinks.
//!
//! Sinks consume frames in harmonic order and are driven by [`crate::run_series`].

pub(crate) mod gif;
pub(crate) mod png_seq;
pub(crate) mod report;
pub(crate) mod sink;
