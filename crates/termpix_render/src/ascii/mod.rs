pub mod grid;
pub mod ramp;
pub mod series;
