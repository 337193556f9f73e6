use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig};
use crate::foundation::error::{FourierError, FourierResult};
use crate::render::plot::{PlotRenderer, PlotStyle};
use crate::series::synth::Frame;

/// Writes each frame as `frame_0001.png`, `frame_0002.png`, ... into a directory.
///
/// Files are written as frames arrive.
pub struct PngSequenceSink {
    out_dir: PathBuf,
    style: PlotStyle,
    title: Option<String>,
    order: FrameOrder,
    renderer: Option<PlotRenderer>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `out_dir`, created on `begin` if missing.
    pub fn new(out_dir: impl Into<PathBuf>, style: PlotStyle) -> Self {
        Self {
            out_dir: out_dir.into(),
            style,
            title: None,
            order: FrameOrder::default(),
            renderer: None,
            written: Vec::new(),
        }
    }

    /// Title drawn above the plot.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Files written by the current run, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name used for harmonic count `k`.
    pub fn frame_file_name(k: u32) -> String {
        format!("frame_{k:04}.png")
    }

    fn frame_path(&self, k: u32) -> PathBuf {
        self.out_dir.join(Self::frame_file_name(k))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> FourierResult<()> {
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("create frame dir '{}'", self.out_dir.display()))?;
        let mut renderer = PlotRenderer::new(self.style.clone())?;
        if let Some(title) = &self.title {
            renderer = renderer.with_title(title.clone());
        }
        self.renderer = Some(renderer);
        self.written.clear();
        self.order.begin(cfg);
        Ok(())
    }

    fn push_frame(&mut self, frame: &Frame) -> FourierResult<()> {
        self.order.accept(frame)?;
        let path = self.frame_path(frame.harmonic);
        let renderer = self
            .renderer
            .as_mut()
            .ok_or_else(|| FourierError::encode("png sink has no renderer"))?;
        let rgba = renderer.render(frame)?;
        write_png(&path, &rgba.data, rgba.width, rgba.height)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> FourierResult<()> {
        let (_, last) = self.order.finish()?;
        self.renderer = None;
        tracing::info!(dir = %self.out_dir.display(), frames = last, "wrote png sequence");
        Ok(())
    }
}

fn write_png(path: &Path, rgba: &[u8], width: u32, height: u32) -> FourierResult<()> {
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png_seq.rs"]
mod tests;
