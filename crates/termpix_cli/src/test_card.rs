//! Synthetic palette image used to preview the encoders without a decoder.

use termpix_render::{ImageSize, LumaGrid, PaletteFrame, PaletteGrid};

/// Channel levels of the 6x6x6 color cube occupying palette indices 0..216.
const CUBE_LEVELS: [u32; 6] = [0, 95, 135, 175, 215, 255];

/// Number of grayscale ramp entries after the cube.
const GRAY_STEPS: u16 = 24;

/// Builds a color-cube sweep with a grayscale strip along the bottom row.
///
/// `phase` shifts the sweep horizontally, which is how the animation scrolls.
pub fn build(size: ImageSize, phase: usize) -> PaletteFrame {
    let width = usize::from(size.columns.max(1));
    let height = usize::from(size.rows.max(1));

    let sample = |x: u16, y: u16| -> (u8, u8) {
        let x = (usize::from(x) + phase) % width;
        let y = usize::from(y);

        if height > 2 && y == height - 1 {
            let step = (x * usize::from(GRAY_STEPS) / width) as u16;
            let index = 216 + step.min(GRAY_STEPS - 1);
            let level = 8 + 10 * u32::from(step);
            return (index as u8, level.min(255) as u8);
        }

        let r = x * 5 / width.saturating_sub(1).max(1);
        let g = y * 5 / height.saturating_sub(1).max(1);
        let b = 5 - r.min(5);
        let index = 36 * r.min(5) + 6 * g.min(5) + b;
        (index as u8, luma(r.min(5), g.min(5), b))
    };

    let colors = PaletteGrid::from_fn(size.columns, size.rows, |x, y| sample(x, y).0);
    let luma = LumaGrid::from_fn(size.columns, size.rows, |x, y| sample(x, y).1);

    PaletteFrame { colors, luma: Some(luma) }
}

/// BT.601 luminance of a cube entry.
fn luma(r: usize, g: usize, b: usize) -> u8 {
    let value = 299 * CUBE_LEVELS[r] + 587 * CUBE_LEVELS[g] + 114 * CUBE_LEVELS[b];
    (value / 1000) as u8
}
