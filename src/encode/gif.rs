use std::io::{BufWriter, Write as _};
use std::path::PathBuf;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig, ensure_parent_dir};
use crate::foundation::error::{FourierError, FourierResult};
use crate::render::FrameRGBA;
use crate::render::plot::{PlotRenderer, PlotStyle};
use crate::series::synth::Frame;

/// Options for [`GifSink`].
#[derive(Clone, Debug, PartialEq)]
pub struct GifSinkOpts {
    /// Output file.
    pub out_path: PathBuf,
    /// Display time of each frame.
    pub frame_delay_ms: u32,
    /// Plot appearance.
    pub style: PlotStyle,
    /// Title drawn above the plot.
    pub title: Option<String>,
}

impl GifSinkOpts {
    /// Default output path, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "animation.gif";
    /// Default per-frame delay.
    pub const DEFAULT_DELAY_MS: u32 = 200;
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(Self::DEFAULT_PATH),
            frame_delay_ms: Self::DEFAULT_DELAY_MS,
            style: PlotStyle::default(),
            title: None,
        }
    }
}

/// Renders frames and writes them as an endlessly looping animated GIF.
///
/// Rendered frames are held in memory and encoded at `end`, so a failed run never leaves a
/// truncated file behind. A run with no frames writes nothing.
pub struct GifSink {
    opts: GifSinkOpts,
    order: FrameOrder,
    renderer: Option<PlotRenderer>,
    frames: Vec<image::Frame>,
}

impl GifSink {
    /// Sink writing to `opts.out_path`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            order: FrameOrder::default(),
            renderer: None,
            frames: Vec::new(),
        }
    }

    /// Output path.
    pub fn out_path(&self) -> &std::path::Path {
        &self.opts.out_path
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> FourierResult<()> {
        if self.opts.frame_delay_ms == 0 {
            return Err(FourierError::validation("gif frame delay must be > 0"));
        }
        let mut renderer = PlotRenderer::new(self.opts.style.clone())?;
        if let Some(title) = &self.opts.title {
            renderer = renderer.with_title(title.clone());
        }
        self.renderer = Some(renderer);
        self.frames.clear();
        self.frames.reserve(cfg.total_frames as usize);
        self.order.begin(cfg);
        Ok(())
    }

    fn push_frame(&mut self, frame: &Frame) -> FourierResult<()> {
        self.order.accept(frame)?;
        let renderer = self
            .renderer
            .as_mut()
            .ok_or_else(|| FourierError::encode("gif sink has no renderer"))?;
        let rgba = renderer.render(frame)?;
        self.frames
            .push(to_gif_frame(rgba, self.opts.frame_delay_ms)?);
        Ok(())
    }

    fn end(&mut self) -> FourierResult<()> {
        let (_, last) = self.order.finish()?;
        self.renderer = None;
        if self.frames.is_empty() {
            tracing::warn!(
                path = %self.opts.out_path.display(),
                "no frames to encode, gif not written"
            );
            return Ok(());
        }

        let path = &self.opts.out_path;
        ensure_parent_dir(path)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create gif '{}'", path.display()))?;
        let mut w = BufWriter::new(file);
        {
            let mut encoder = GifEncoder::new_with_speed(&mut w, 10);
            encoder
                .set_repeat(Repeat::Infinite)
                .context("configure gif looping")?;
            encoder
                .encode_frames(self.frames.drain(..))
                .with_context(|| format!("encode gif '{}'", path.display()))?;
        }
        w.flush()
            .with_context(|| format!("flush gif '{}'", path.display()))?;

        tracing::info!(path = %path.display(), frames = last, "wrote gif");
        Ok(())
    }
}

fn to_gif_frame(rgba: FrameRGBA, delay_ms: u32) -> FourierResult<image::Frame> {
    if rgba.premultiplied {
        return Err(FourierError::encode("gif frames must use straight alpha"));
    }
    let img = image::RgbaImage::from_raw(rgba.width, rgba.height, rgba.data)
        .ok_or_else(|| FourierError::encode("frame byte length does not match its size"))?;
    Ok(image::Frame::from_parts(
        img,
        0,
        0,
        image::Delay::from_numer_denom_ms(delay_ms, 1),
    ))
}
