use crate::RenderError;

/// Font aspect ratio (cell height / cell width) assumed by default.
pub const DEFAULT_FONT_ASPECT: f32 = 2.25;

/// Accepts a font aspect ratio only if it is finite and positive.
pub fn validate_font_aspect(font_aspect: f32) -> Result<f32, RenderError> {
    if font_aspect.is_finite() && font_aspect > 0.0 {
        Ok(font_aspect)
    } else {
        Err(RenderError::InvalidConfiguration(format!(
            "font aspect must be finite and positive, got {font_aspect}"
        )))
    }
}

/// Character grid the output has to fill exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub columns: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }
}

/// Image dimensions in source pixels, already scaled to fit the viewport.
///
/// In glyph mode one pixel is one cell. In half-block mode two pixel rows
/// share one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub columns: u16,
    pub rows: u16,
}

impl ImageSize {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }
}

/// Background fill surrounding the centered image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    pub top: u16,
    pub left: u16,
    pub right: u16,
}

impl Padding {
    /// Centers a `columns x content_rows` block inside `viewport`.
    ///
    /// Rounding remainders go to the right and bottom edges.
    pub fn centered(
        viewport: Viewport,
        columns: u16,
        content_rows: u16,
    ) -> Result<Self, RenderError> {
        let spare_columns = viewport.columns.checked_sub(columns);
        let spare_rows = viewport.rows.checked_sub(content_rows);

        let (Some(spare_columns), Some(spare_rows)) = (spare_columns, spare_rows) else {
            return Err(RenderError::InvalidGeometry {
                viewport_columns: viewport.columns,
                viewport_rows: viewport.rows,
                columns,
                rows: content_rows,
            });
        };

        let left = spare_columns / 2;
        Ok(Self { top: spare_rows / 2, left, right: spare_columns - left })
    }
}

/// How a source image is scaled into the viewport before quantization.
///
/// Only the target size is computed here; resampling is up to the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitPolicy {
    Glyph { font_aspect: f32 },
    HalfBlock { font_aspect: f32 },
}

impl FitPolicy {
    /// Largest size preserving the source aspect that fits `viewport`.
    pub fn fit(
        &self,
        source_width: u32,
        source_height: u32,
        viewport: Viewport,
    ) -> Option<ImageSize> {
        if source_width == 0 || source_height == 0 || viewport.columns == 0 || viewport.rows == 0 {
            return None;
        }

        let (ratio, max_rows) = match *self {
            FitPolicy::Glyph { font_aspect } => (font_aspect, f32::from(viewport.rows)),
            FitPolicy::HalfBlock { font_aspect } => {
                (font_aspect / 2.0, f32::from(viewport.rows) * 2.0)
            },
        };
        if !(ratio.is_finite() && ratio > 0.0) {
            return None;
        }

        let source_width = source_width as f32;
        let source_height = source_height as f32;
        let max_columns = f32::from(viewport.columns);

        let mut columns = max_columns;
        let mut rows = (source_height * max_columns / (source_width * ratio)).floor();
        if rows > max_rows {
            rows = max_rows;
            columns = (source_width * (max_rows / source_height) * ratio).floor().min(max_columns);
        }

        let columns = (columns as u16).max(1);
        let rows = match self {
            FitPolicy::Glyph { .. } => (rows as u16).max(1),
            FitPolicy::HalfBlock { .. } => ((rows as u16) & !1).max(2),
        };

        Some(ImageSize { columns, rows })
    }
}

impl Default for FitPolicy {
    fn default() -> Self {
        FitPolicy::Glyph { font_aspect: DEFAULT_FONT_ASPECT }
    }
}
