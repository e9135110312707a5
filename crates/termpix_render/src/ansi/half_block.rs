use log::trace;

use super::escape::{push_bg, ColorCode, PenState, HALF_BLOCK, RESET};
use super::frame::{blank_row, push_spaces, TermFrame};
use crate::ascii::grid::PaletteGrid;
use crate::layout::geometry::{ImageSize, Padding, Viewport};
use crate::RenderError;

/// Encodes two pixel rows per terminal row with the upper half block:
/// foreground is the top pixel, background the bottom pixel.
///
/// With an odd `image.rows` the last pixel row has no partner and is dropped.
pub fn encode_half_blocks(
    colors: &PaletteGrid,
    background: ColorCode,
    viewport: Viewport,
    image: ImageSize,
) -> Result<TermFrame, RenderError> {
    colors.ensure_covers(image.columns, image.rows)?;

    let cell_rows = image.rows / 2;
    let padding = Padding::centered(viewport, image.columns, cell_rows)?;
    let blank = blank_row(background, viewport.columns);
    let mut lines = Vec::with_capacity(usize::from(viewport.rows));
    let mut escapes = 0;

    for _ in 0..padding.top {
        lines.push(blank.clone());
    }

    for pair in 0..cell_rows {
        let y = pair * 2;
        let mut line = String::with_capacity(blank.len() + usize::from(image.columns) * 24);
        let mut pen = PenState::new();

        if padding.left > 0 {
            push_bg(&mut line, background);
            push_spaces(&mut line, padding.left);
        }

        let top_row = colors.row(y).unwrap_or_default();
        let bottom_row = colors.row(y + 1).unwrap_or_default();
        for (&top, &bottom) in top_row.iter().zip(bottom_row).take(usize::from(image.columns)) {
            pen.set_fg(&mut line, ColorCode::from_index(top));
            pen.set_bg(&mut line, ColorCode::from_index(bottom));
            line.push(HALF_BLOCK);
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
        "encoded {}x{} half-block image into {}x{} viewport with {escapes} color escapes",
        image.columns,
        image.rows,
        viewport.columns,
        viewport.rows
    );

    Ok(TermFrame::from_lines(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_rows_into_cells() {
        let colors = PaletteGrid::new(2, 2, vec![1, 1, 2, 3]).unwrap();
        let frame =
            encode_half_blocks(&colors, ColorCode(16), Viewport::new(2, 1), ImageSize::new(2, 2))
                .unwrap();
        assert_eq!(
            frame.lines(),
            ["\x1b[38;5;17m\x1b[48;5;18m▀\x1b[48;5;19m▀\x1b[0m"]
        );
    }

    #[test]
    fn odd_final_row_is_dropped() {
        let colors = PaletteGrid::new(1, 3, vec![0, 1, 2]).unwrap();
        let frame =
            encode_half_blocks(&colors, ColorCode(7), Viewport::new(1, 3), ImageSize::new(1, 3))
                .unwrap();

        let blank = "\x1b[48;5;7m \x1b[0m";
        // One cell row, centered: (3 - 1) / 2 = 1 row of padding above.
        assert_eq!(frame.lines(), [blank, "\x1b[38;5;16m\x1b[48;5;17m▀\x1b[0m", blank]);
        assert!(!frame.to_string().contains("48;5;18m"));
    }

    #[test]
    fn oversized_image_is_invalid_geometry() {
        let colors = PaletteGrid::new(3, 2, vec![0; 6]).unwrap();
        let err =
            encode_half_blocks(&colors, ColorCode(16), Viewport::new(2, 4), ImageSize::new(3, 2))
                .unwrap_err();
        assert!(matches!(err, RenderError::InvalidGeometry { .. }));
    }

    #[test]
    fn single_row_image_renders_only_padding() {
        let colors = PaletteGrid::new(2, 1, vec![5, 5]).unwrap();
        let frame =
            encode_half_blocks(&colors, ColorCode(16), Viewport::new(2, 2), ImageSize::new(2, 1))
                .unwrap();
        assert_eq!(frame, TermFrame::blank(ColorCode(16), Viewport::new(2, 2)));
    }
}
