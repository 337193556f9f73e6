use std::path::Path;

use crate::foundation::core::Interval;
use crate::foundation::error::{FourierError, FourierResult};
use crate::series::synth::Frame;

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinkConfig {
    /// Number of frames the run will push.
    pub total_frames: u32,
    /// Sample points per frame.
    pub num_points: usize,
    /// Integration limits of the series.
    pub interval: Interval,
    /// Zeroth coefficient of the series.
    pub offset: f64,
}

/// Sink contract for consuming frames in harmonic order.
///
/// Ordering contract: `begin` is called once, then `push_frame` with strictly increasing
/// `Frame::harmonic` starting at 1, then `end`. `end` is not called when the run fails.
pub trait FrameSink {
    /// Prepare for a run.
    fn begin(&mut self, cfg: SinkConfig) -> FourierResult<()>;
    /// Consume the next frame.
    fn push_frame(&mut self, frame: &Frame) -> FourierResult<()>;
    /// Flush outputs after the last frame.
    fn end(&mut self) -> FourierResult<()>;
}

/// Tracks the ordering contract on behalf of a sink.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FrameOrder {
    cfg: Option<SinkConfig>,
    last: u32,
}

impl FrameOrder {
    pub(crate) fn begin(&mut self, cfg: SinkConfig) {
        self.cfg = Some(cfg);
        self.last = 0;
    }

    pub(crate) fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub(crate) fn accept(&mut self, frame: &Frame) -> FourierResult<SinkConfig> {
        let cfg = self
            .cfg
            .ok_or_else(|| FourierError::encode("push_frame called before begin"))?;
        if frame.harmonic != self.last + 1 {
            return Err(FourierError::encode(format!(
                "frame for k = {} pushed after k = {}",
                frame.harmonic, self.last
            )));
        }
        if frame.len() != cfg.num_points {
            return Err(FourierError::encode(format!(
                "frame has {} points, run declared {}",
                frame.len(),
                cfg.num_points
            )));
        }
        self.last = frame.harmonic;
        Ok(cfg)
    }

    pub(crate) fn finish(&mut self) -> FourierResult<(SinkConfig, u32)> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| FourierError::encode("end called before begin"))?;
        Ok((cfg, self.last))
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    order: FrameOrder,
    /// Frames in harmonic order.
    pub frames: Vec<Frame>,
    /// Whether `end` has been called for the current run.
    pub finished: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration of the current run, if begun.
    pub fn config(&self) -> Option<SinkConfig> {
        self.order.config()
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FourierResult<()> {
        self.order.begin(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &Frame) -> FourierResult<()> {
        self.order.accept(frame)?;
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> FourierResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Forwards every call to each inner sink in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn FrameSink>>,
}

impl FanoutSink {
    /// Sink with no outputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an output.
    pub fn with(mut self, sink: impl FrameSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Append a boxed output.
    pub fn push(&mut self, sink: Box<dyn FrameSink>) {
        self.sinks.push(sink);
    }

    /// Number of outputs.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether there are no outputs.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl FrameSink for FanoutSink {
    fn begin(&mut self, cfg: SinkConfig) -> FourierResult<()> {
        self.sinks.iter_mut().try_for_each(|s| s.begin(cfg))
    }

    fn push_frame(&mut self, frame: &Frame) -> FourierResult<()> {
        self.sinks.iter_mut().try_for_each(|s| s.push_frame(frame))
    }

    fn end(&mut self) -> FourierResult<()> {
        self.sinks.iter_mut().try_for_each(|s| s.end())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn begin(&mut self, cfg: SinkConfig) -> FourierResult<()> {
        (**self).begin(cfg)
    }

    fn push_frame(&mut self, frame: &Frame) -> FourierResult<()> {
        (**self).push_frame(frame)
    }

    fn end(&mut self) -> FourierResult<()> {
        (**self).end()
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> FourierResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
