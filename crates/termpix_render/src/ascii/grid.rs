use crate::RenderError;

/// Row-major buffer of per-pixel samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid<T> {
    width: u16,
    height: u16,
    cells: Vec<T>,
}

/// Quantized palette indices in `[0, 239]`, offset by 16 when emitted.
pub type PaletteGrid = PixelGrid<u8>;

/// Perceptual brightness per pixel in `[0, 255]`.
pub type LumaGrid = PixelGrid<u8>;

impl<T: Copy> PixelGrid<T> {
    pub fn new(width: u16, height: u16, cells: Vec<T>) -> Result<Self, RenderError> {
        let expected = usize::from(width) * usize::from(height);
        if cells.len() != expected {
            return Err(RenderError::BufferSize { expected, actual: cells.len() });
        }
        Ok(Self { width, height, cells })
    }

    pub fn from_fn<F>(width: u16, height: u16, mut sample: F) -> Self
    where
        F: FnMut(u16, u16) -> T,
    {
        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..height {
            for x in 0..width {
                cells.push(sample(x, y));
            }
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn get(&self, x: u16, y: u16) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(usize::from(y) * usize::from(self.width) + usize::from(x)).copied()
    }

    pub fn row(&self, y: u16) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let width = usize::from(self.width);
        let start = usize::from(y) * width;
        self.cells.get(start..start + width)
    }

    /// Fails unless the grid covers `columns x rows`.
    pub(crate) fn ensure_covers(&self, columns: u16, rows: u16) -> Result<(), RenderError> {
        if self.width < columns || self.height < rows {
            return Err(RenderError::BufferSize {
                expected: usize::from(columns) * usize::from(rows),
                actual: self.cells.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_buffer() {
        let err = PaletteGrid::new(2, 2, vec![0; 3]).unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 4, actual: 3 }));
    }

    #[test]
    fn addresses_row_major() {
        let grid = PixelGrid::from_fn(3, 2, |x, y| (y * 10 + x) as u8);
        assert_eq!(grid.get(2, 1), Some(12));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.row(1), Some(&[10, 11, 12][..]));
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn coverage_check() {
        let grid = LumaGrid::new(4, 3, vec![0; 12]).unwrap();
        assert!(grid.ensure_covers(4, 3).is_ok());
        assert!(grid.ensure_covers(2, 1).is_ok());
        assert!(grid.ensure_covers(5, 3).is_err());
    }
}
