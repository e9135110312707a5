mod ansi;
mod ascii;
mod layout;

use log::debug;
use serde::{Deserialize, Deserializer};

pub use ansi::{
    escape::{strip_escapes, visible_width, ColorCode, PenState, ESC, HALF_BLOCK, RESET},
    frame::TermFrame,
    glyphs::encode_glyphs,
    half_block::encode_half_blocks,
};
pub use ascii::{
    grid::{LumaGrid, PaletteGrid, PixelGrid},
    ramp::GlyphRamp,
    series::{FrameSeries, TimedFrame},
};
pub use layout::geometry::{
    validate_font_aspect, FitPolicy, ImageSize, Padding, Viewport, DEFAULT_FONT_ASPECT,
};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{columns}x{rows} image does not fit the {viewport_columns}x{viewport_rows} viewport")]
    InvalidGeometry { viewport_columns: u16, viewport_rows: u16, columns: u16, rows: u16 },
    #[error(
        "cannot fit a {source_width}x{source_height} source into a \
         {viewport_columns}x{viewport_rows} viewport"
    )]
    NothingToFit {
        source_width: u32,
        source_height: u32,
        viewport_columns: u16,
        viewport_rows: u16,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("pixel buffer holds {actual} samples, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("glyph rendering requires a luminance buffer")]
    MissingLuminance,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// One ramp glyph per pixel, colored by palette index.
    #[default]
    Glyphs,
    /// Two pixel rows per cell using the upper half block.
    HalfBlocks,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// Palette code used for padding around the image.
    pub background: ColorCode,
    pub ramp: GlyphRamp,
    /// Font aspect ratio (cell height / cell width) used when fitting images.
    #[serde(deserialize_with = "deserialize_font_aspect")]
    pub font_aspect: f32,
}

fn deserialize_font_aspect<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let value = f32::deserialize(deserializer)?;
    validate_font_aspect(value).map_err(serde::de::Error::custom)
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            background: ColorCode(16),
            ramp: GlyphRamp::default(),
            font_aspect: DEFAULT_FONT_ASPECT,
        }
    }
}

/// Quantized image ready for encoding.
#[derive(Clone, Debug)]
pub struct PaletteFrame {
    pub colors: PaletteGrid,
    /// Required by [`RenderMode::Glyphs`], ignored by half blocks.
    pub luma: Option<LumaGrid>,
}

impl PaletteFrame {
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.colors.width(), self.colors.height())
    }
}

#[derive(Clone, Debug, Default)]
pub struct TermRenderer {
    options: RenderOptions,
}

impl TermRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Sizing rule the caller should resize source images with.
    pub fn fit_policy(&self) -> FitPolicy {
        let font_aspect = self.options.font_aspect;
        match self.options.mode {
            RenderMode::Glyphs => FitPolicy::Glyph { font_aspect },
            RenderMode::HalfBlocks => FitPolicy::HalfBlock { font_aspect },
        }
    }

    /// Target size for a `source_width x source_height` image in `viewport`.
    ///
    /// A bad font aspect is a configuration error; an empty source or
    /// viewport is [`RenderError::NothingToFit`].
    pub fn fit_image(
        &self,
        source_width: u32,
        source_height: u32,
        viewport: Viewport,
    ) -> Result<ImageSize, RenderError> {
        validate_font_aspect(self.options.font_aspect)?;
        self.fit_policy().fit(source_width, source_height, viewport).ok_or(
            RenderError::NothingToFit {
                source_width,
                source_height,
                viewport_columns: viewport.columns,
                viewport_rows: viewport.rows,
            },
        )
    }

    pub fn render(
        &self,
        frame: &PaletteFrame,
        viewport: Viewport,
    ) -> Result<TermFrame, RenderError> {
        let image = frame.size();
        debug!(
            "rendering {}x{} image as {:?} into {}x{} viewport",
            image.columns, image.rows, self.options.mode, viewport.columns, viewport.rows
        );

        match self.options.mode {
            RenderMode::Glyphs => {
                let luma = frame.luma.as_ref().ok_or(RenderError::MissingLuminance)?;
                encode_glyphs(
                    &frame.colors,
                    luma,
                    self.options.background,
                    &self.options.ramp,
                    viewport,
                    image,
                )
            },
            RenderMode::HalfBlocks => {
                encode_half_blocks(&frame.colors, self.options.background, viewport, image)
            },
        }
    }

    pub fn blank(&self, viewport: Viewport) -> TermFrame {
        TermFrame::blank(self.options.background, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u16, height: u16, luma: bool) -> PaletteFrame {
        let colors = PaletteGrid::from_fn(width, height, |x, y| (x + y) as u8);
        let luma = luma.then(|| LumaGrid::from_fn(width, height, |x, _| (x * 60) as u8));
        PaletteFrame { colors, luma }
    }

    #[test]
    fn glyph_mode_needs_luminance() {
        let renderer = TermRenderer::default();
        let err = renderer.render(&frame(2, 2, false), Viewport::new(4, 4)).unwrap_err();
        assert!(matches!(err, RenderError::MissingLuminance));
    }

    #[test]
    fn dispatches_by_mode() {
        let viewport = Viewport::new(6, 3);
        let glyphs = TermRenderer::default().render(&frame(4, 2, true), viewport).unwrap();
        assert!(!glyphs.to_string().contains(HALF_BLOCK));

        let options = RenderOptions { mode: RenderMode::HalfBlocks, ..RenderOptions::default() };
        let blocks = TermRenderer::new(options).render(&frame(4, 2, false), viewport).unwrap();
        assert_eq!(blocks.to_string().matches(HALF_BLOCK).count(), 4);
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn fit_policy_follows_mode() {
        let options = RenderOptions { mode: RenderMode::HalfBlocks, ..RenderOptions::default() };
        assert_eq!(
            TermRenderer::new(options).fit_policy(),
            FitPolicy::HalfBlock { font_aspect: DEFAULT_FONT_ASPECT }
        );
    }

    #[test]
    fn fit_image_tells_bad_aspect_from_empty_viewport() {
        let options = RenderOptions { font_aspect: 0.0, ..RenderOptions::default() };
        let renderer = TermRenderer::new(options);
        let err = renderer.fit_image(320, 200, Viewport::new(80, 24)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfiguration(_)));

        let err = TermRenderer::default().fit_image(320, 200, Viewport::new(0, 24)).unwrap_err();
        assert!(matches!(err, RenderError::NothingToFit { viewport_columns: 0, .. }));

        let size = TermRenderer::default().fit_image(320, 200, Viewport::new(80, 24)).unwrap();
        assert!(size.columns <= 80 && size.rows <= 24);
    }
}
