pub mod escape;
pub mod frame;
pub mod glyphs;
pub mod half_block;
