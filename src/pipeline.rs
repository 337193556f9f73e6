use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::RunConfig;
use crate::encode::gif::GifSink;
use crate::encode::png_seq::PngSequenceSink;
use crate::encode::report::{ReportSink, ReportTarget, SeriesReport};
use crate::encode::sink::{FanoutSink, FrameSink, SinkConfig};
use crate::foundation::core::SampleDomain;
use crate::foundation::error::FourierResult;
use crate::series::synth::{PartialSums, synthesize};

/// Statistics of one completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames delivered to the sink.
    pub frames: u32,
    /// Wall time from `begin` to the end of `end`.
    pub elapsed: Duration,
}

/// Drive `frames` into `sink`.
///
/// The sink sees `begin`, one `push_frame` per harmonic, then `end`. The first error aborts the
/// run and `end` is not called.
pub fn run_series<F>(
    frames: PartialSums<'_, F>,
    sink: &mut dyn FrameSink,
) -> FourierResult<RunStats>
where
    F: Fn(f64) -> f64,
{
    let started = Instant::now();
    sink.begin(SinkConfig {
        total_frames: frames.total_harmonics(),
        num_points: frames.domain().len(),
        interval: frames.limits(),
        offset: frames.offset(),
    })?;

    let mut stats = RunStats::default();
    for frame in frames {
        let frame = frame?;
        sink.push_frame(&frame)?;
        stats.frames += 1;
    }

    sink.end()?;
    stats.elapsed = started.elapsed();
    Ok(stats)
}

/// Validate `cfg`, synthesize its series and stream it into `sink`.
#[tracing::instrument(skip_all, fields(function = %cfg.function, harmonics = cfg.total_harmonics))]
pub fn run_config(cfg: &RunConfig, sink: &mut dyn FrameSink) -> FourierResult<RunStats> {
    cfg.validate()?;
    let limits = cfg.interval()?;
    let domain = SampleDomain::linspace(limits, cfg.num_points)?;
    let quadrature = cfg.quadrature()?;
    let function = cfg.function;

    let frames = synthesize(
        &quadrature,
        move |t| function.eval(t),
        limits,
        cfg.total_harmonics,
        &domain,
    )?;
    let stats = run_series(frames, sink)?;
    tracing::info!(
        frames = stats.frames,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "series complete"
    );
    Ok(stats)
}

/// Write the animated GIF described by `cfg`, plus its JSON report when `cfg.report` is set.
pub fn render_animation(cfg: &RunConfig) -> FourierResult<RunStats> {
    let mut sink = FanoutSink::new().with(GifSink::new(cfg.gif_opts()));
    if let Some(path) = &cfg.report {
        sink.push(Box::new(ReportSink::new(ReportTarget::File(path.clone()))));
    }
    run_config(cfg, &mut sink)
}

/// Write one PNG per harmonic count into `out_dir`.
pub fn render_frames(cfg: &RunConfig, out_dir: &Path) -> FourierResult<RunStats> {
    let mut sink = PngSequenceSink::new(out_dir, cfg.plot_style())
        .with_title(cfg.function.formula());
    run_config(cfg, &mut sink)
}

/// Compute the convergence report of `cfg` and deliver it to `target`.
pub fn series_report(cfg: &RunConfig, target: ReportTarget) -> FourierResult<SeriesReport> {
    let mut sink = ReportSink::new(target);
    run_config(cfg, &mut sink)?;
    Ok(sink.report().clone())
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
