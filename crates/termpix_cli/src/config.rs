//! Render settings loaded from an optional TOML file.
//!
//! Missing keys keep their defaults; command-line flags are applied on top.

use std::path::Path;

use anyhow::{Context, Result};
use termpix_render::RenderOptions;

pub fn load(path: Option<&Path>) -> Result<RenderOptions> {
    let Some(path) = path else {
        return Ok(RenderOptions::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {:?}", path))?;
    let options: RenderOptions = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {:?}", path))?;
    log::debug!("loaded render options from {:?}", path);
    Ok(options)
}
