use log::trace;

use super::escape::{push_bg, ColorCode, PenState, RESET};
use super::frame::{blank_row, push_spaces, TermFrame};
use crate::ascii::grid::{LumaGrid, PaletteGrid};
use crate::ascii::ramp::GlyphRamp;
use crate::layout::geometry::{ImageSize, Padding, Viewport};
use crate::RenderError;

/// Encodes one glyph per pixel: the ramp glyph follows luminance and the
/// foreground color carries the palette index.
pub fn encode_glyphs(
    colors: &PaletteGrid,
    luma: &LumaGrid,
    background: ColorCode,
    ramp: &GlyphRamp,
    viewport: Viewport,
    image: ImageSize,
) -> Result<TermFrame, RenderError> {
    if ramp.is_empty() {
        return Err(RenderError::InvalidConfiguration("glyph ramp is empty".into()));
    }
    if luma.width() != colors.width() || luma.height() != colors.height() {
        return Err(RenderError::BufferSize {
            expected: colors.cells().len(),
            actual: luma.cells().len(),
        });
    }
    colors.ensure_covers(image.columns, image.rows)?;

    let padding = Padding::centered(viewport, image.columns, image.rows)?;
    let blank = blank_row(background, viewport.columns);
    let mut lines = Vec::with_capacity(usize::from(viewport.rows));
    let mut escapes = 0;

    for _ in 0..padding.top {
        lines.push(blank.clone());
    }

    for y in 0..image.rows {
        let mut line = String::with_capacity(blank.len() + usize::from(image.columns) * 12);
        let mut pen = PenState::new();

        if padding.left > 0 {
            push_bg(&mut line, background);
            push_spaces(&mut line, padding.left);
        }

        let color_row = colors.row(y).unwrap_or_default();
        let luma_row = luma.row(y).unwrap_or_default();
        for (&index, &lum) in color_row.iter().zip(luma_row).take(usize::from(image.columns)) {
            pen.set_fg(&mut line, ColorCode::from_index(index));
            line.push(ramp.glyph_for(lum));
        }

        if padding.right > 0 {
            push_bg(&mut line, background);
            push_spaces(&mut line, padding.right);
        }

        line.push_str(RESET);
        escapes += pen.emitted();
        lines.push(line);
    }

    while lines.len() < usize::from(viewport.rows) {
        lines.push(blank.clone());
    }

    trace!(
        "encoded {}x{} glyph image into {}x{} viewport with {escapes} color escapes",
        image.columns,
        image.rows,
        viewport.columns,
        viewport.rows
    );

    Ok(TermFrame::from_lines(lines))
}
