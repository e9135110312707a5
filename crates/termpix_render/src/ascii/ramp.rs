use serde::Deserialize;

use crate::RenderError;

/// Glyphs ordered from sparse/dark (index 0) to dense/bright.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct GlyphRamp {
    chars: Vec<char>,
}

impl GlyphRamp {
    pub fn new(chars: impl Into<String>) -> Result<Self, RenderError> {
        let chars: Vec<char> = chars.into().chars().collect();
        if chars.is_empty() {
            return Err(RenderError::InvalidConfiguration("glyph ramp is empty".into()));
        }
        Ok(Self { chars })
    }

    /// Builds a ramp from a preset literal known to be non-empty.
    fn preset(chars: &str) -> Self {
        Self { chars: chars.chars().collect() }
    }

    pub fn terminal() -> Self {
        Self::preset("  ..',;:c*loexk#O0XNW")
    }

    pub fn standard() -> Self {
        Self::preset(" .:-=+*#%@")
    }

    pub fn detailed() -> Self {
        Self::preset(" .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$")
    }

    pub fn blocks() -> Self {
        Self::preset(" ░▒▓█")
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Ramp slot for `luminance`: `luminance * len / 255`, clamped to the last
    /// slot since full brightness lands one past the end.
    pub fn index_for(&self, luminance: u8) -> usize {
        let len = self.chars.len();
        let index = usize::from(luminance) * len / 255;
        index.min(len - 1)
    }

    pub fn glyph_for(&self, luminance: u8) -> char {
        self.chars[self.index_for(luminance)]
    }
}

impl TryFrom<String> for GlyphRamp {
    type Error = RenderError;

    fn try_from(chars: String) -> Result<Self, Self::Error> {
        Self::new(chars)
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ramp_is_rejected() {
        assert!(matches!(GlyphRamp::new(""), Err(RenderError::InvalidConfiguration(_))));
    }

    #[test]
    fn full_brightness_clamps_to_last_glyph() {
        let ramp = GlyphRamp::new("abcd").unwrap();
        assert_eq!(ramp.index_for(255), 3);
        assert_eq!(ramp.glyph_for(255), 'd');
    }

    #[test]
    fn index_follows_floor_division() {
        let ramp = GlyphRamp::new("abcd").unwrap();
        assert_eq!(ramp.index_for(0), 0);
        assert_eq!(ramp.index_for(63), 0);
        assert_eq!(ramp.index_for(64), 1);
        assert_eq!(ramp.index_for(128), 2);
        assert_eq!(ramp.index_for(191), 2);
        assert_eq!(ramp.index_for(192), 3);
    }

    #[test]
    fn single_glyph_ramp() {
        let ramp = GlyphRamp::new("#").unwrap();
        assert_eq!(ramp.glyph_for(0), '#');
        assert_eq!(ramp.glyph_for(255), '#');
    }

    #[test]
    fn presets_start_sparse() {
        for ramp in [
            GlyphRamp::terminal(),
            GlyphRamp::standard(),
            GlyphRamp::detailed(),
            GlyphRamp::blocks(),
        ] {
            assert_eq!(ramp.chars()[0], ' ');
            assert!(ramp.len() >= 5);
        }
    }
}
