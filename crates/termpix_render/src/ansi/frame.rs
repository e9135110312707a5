use std::fmt;

use super::escape::{push_bg, ColorCode, RESET};
use crate::layout::geometry::Viewport;

/// Encoded screen: one string per terminal row, each ending in a reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TermFrame {
    lines: Vec<String>,
}

impl TermFrame {
    pub(crate) fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Screen filled with the background color only.
    pub fn blank(background: ColorCode, viewport: Viewport) -> Self {
        let row = blank_row(background, viewport.columns);
        Self { lines: vec![row; usize::from(viewport.rows)] }
    }

    /// Appends a single line of `text` on the background color, for a status
    /// or control bar drawn under the image.
    ///
    /// The text is not truncated; callers reserve one viewport row for it.
    pub fn with_status_line(mut self, background: ColorCode, text: &str) -> Self {
        let mut line = String::with_capacity(text.len() + 16);
        push_bg(&mut line, background);
        line.push_str(text);
        line.push_str(RESET);
        self.lines.push(line);
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for TermFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// A full-width row of background-colored spaces.
pub(crate) fn blank_row(background: ColorCode, columns: u16) -> String {
    let mut row = String::with_capacity(usize::from(columns) + 16);
    push_bg(&mut row, background);
    push_spaces(&mut row, columns);
    row.push_str(RESET);
    row
}

pub(crate) fn push_spaces(out: &mut String, count: u16) {
    out.extend(std::iter::repeat(' ').take(usize::from(count)));
}
