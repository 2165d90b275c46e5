/// Smallest side of a synthesized carrier, in pixels.
pub const DEFAULT_MIN_SIDE: u32 = 32;

/// Neutral fill colour of a synthesized carrier.
pub const DEFAULT_FILL: [u8; 3] = [12, 12, 12];

/// Controls how carriers are synthesized when no base image is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierConfig {
    /// Minimum width and height of a synthesized carrier.
    pub min_side: u32,
    /// RGB value every synthesized pixel starts with.
    pub fill: [u8; 3],
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            min_side: DEFAULT_MIN_SIDE,
            fill: DEFAULT_FILL,
        }
    }
}
