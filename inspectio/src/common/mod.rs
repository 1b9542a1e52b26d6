mod buffer2;

pub use buffer2::Buffer2;

/// Single-channel 8-bit raster, one byte per sample.
pub type Raster = Buffer2<u8>;
