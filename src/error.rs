use thiserror::Error;

/// A sensor frame whose buffer does not match its declared shape. The frame
/// should be dropped; nothing downstream ever indexes into it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("depth buffer has {actual} bytes; expected {expected} (2 bytes per pixel)")]
    DepthLength { expected: usize, actual: usize },

    #[error("colour frame uses {0} bytes per pixel; at least 3 are needed")]
    ColorPixelSize(usize),

    #[error("colour frame stride {stride} is too small for {width} pixels of {bytes_per_pixel} bytes")]
    ColorStride {
        stride: usize,
        width: usize,
        bytes_per_pixel: usize,
    },

    #[error("colour frame declares an empty shape ({width}x{height}, stride {stride})")]
    ColorEmpty {
        width: usize,
        height: usize,
        stride: usize,
    },

    #[error("colour frame shape {width}x{height} overflows the addressable size")]
    ColorOverflow { width: usize, height: usize },

    #[error("colour frame has {actual} bytes; expected {expected} (stride x height)")]
    ColorLength { expected: usize, actual: usize },

    #[error("depth image has {actual} bytes; expected {expected} (3 bytes per pixel)")]
    ImageLength { expected: usize, actual: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("depthThreshTwo ({two}) must be larger than depthThreshOne ({one})")]
    ThresholdOrder { one: i32, two: i32 },

    #[error("dragScale must not be zero")]
    ZeroDragScale,

    #[error("elevationStep must be positive, got {0}")]
    ElevationStep(i32),
}
