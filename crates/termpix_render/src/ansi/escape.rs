use std::fmt::{self, Write};

use serde::Deserialize;

pub const ESC: char = '\x1b';
pub const RESET: &str = "\x1b[0m";

/// Upper half block: foreground paints the top pixel, background the bottom one.
pub const HALF_BLOCK: char = '▀';

/// A code from the 256-color terminal palette.
///
/// Codes are written verbatim; values past 255 are the terminal's problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ColorCode(pub u16);

impl ColorCode {
    /// Number of standard and bright ANSI slots skipped by quantized indices.
    pub const ANSI_OFFSET: u16 = 16;

    /// Maps a quantized palette index onto its terminal color code.
    pub fn from_index(index: u8) -> Self {
        Self(u16::from(index) + Self::ANSI_OFFSET)
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn push_fg(out: &mut String, color: ColorCode) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{ESC}[38;5;{color}m");
}

pub fn push_bg(out: &mut String, color: ColorCode) {
    let _ = write!(out, "{ESC}[48;5;{color}m");
}

/// Last foreground and background emitted on the current row.
///
/// A fresh pen has nothing active, so the first cell of every row always
/// emits its colors.
#[derive(Clone, Copy, Debug, Default)]
pub struct PenState {
    fg: Option<ColorCode>,
    bg: Option<ColorCode>,
    emitted: usize,
}

impl PenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fg(&mut self, out: &mut String, color: ColorCode) {
        if self.fg != Some(color) {
            push_fg(out, color);
            self.fg = Some(color);
            self.emitted += 1;
        }
    }

    pub fn set_bg(&mut self, out: &mut String, color: ColorCode) {
        if self.bg != Some(color) {
            push_bg(out, color);
            self.bg = Some(color);
            self.emitted += 1;
        }
    }

    /// Escape sequences written through this pen so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

/// Visible cell count of `line` once CSI escape sequences are removed.
pub fn visible_width(line: &str) -> usize {
    strip_escapes(line).chars().count()
}

/// Removes every `ESC [ ... <final byte>` sequence from `line`.
pub fn strip_escapes(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != ESC {
            out.push(ch);
            continue;
        }

        if chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&next) {
                    break;
                }
            }
        }
    }

    out
}
