#![forbid(unsafe_code)]

pub mod characteristics;
pub mod classifier;
pub mod ph1sentinel;
pub mod prng;
pub mod sample_size;
pub mod series;
pub mod stats;
pub mod trigger;
