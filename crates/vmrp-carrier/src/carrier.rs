use std::iter::FusedIterator;

use tracing::debug;

use crate::config::CarrierConfig;
use crate::error::{CarrierError, Result};

/// Usable channels per pixel.
pub const CHANNELS: usize = 3;

/// Colour channel of a pixel, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    R = 0,
    G = 1,
    B = 2,
}

impl Channel {
    /// All channels in traversal order.
    pub const ALL: [Channel; CHANNELS] = [Channel::R, Channel::G, Channel::B];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Byte layout of one pixel in the backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// `R G B`
    Rgb,
    /// `R G B A`; alpha is never read or written by the codec.
    Rgba,
}

impl PixelLayout {
    /// Bytes per pixel.
    pub fn stride(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// An in-memory grid of 8-bit pixels whose channel LSBs carry data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) layout: PixelLayout,
    pub(crate) data: Vec<u8>,
}

impl Carrier {
    /// Wrap an existing row-major pixel buffer.
    pub fn from_raw(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height, layout)?;
        if data.len() != expected {
            return Err(CarrierError::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// An RGB carrier with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Result<Self> {
        let len = buffer_len(width, height, PixelLayout::Rgb)?;
        let data = color.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            layout: PixelLayout::Rgb,
            data,
        })
    }

    /// Allocate a square carrier able to hold `required_bits`.
    ///
    /// The side is `max(min_side, ceil(sqrt(ceil(required_bits / 3))))`, so
    /// the result always satisfies `capacity_bits() >= required_bits`.
    pub fn synthesize(required_bits: usize, config: &CarrierConfig) -> Result<Self> {
        let pixels_needed = required_bits.div_ceil(CHANNELS) as u64;
        let side = ceil_sqrt(pixels_needed).max(u64::from(config.min_side));
        let side = u32::try_from(side).map_err(|_| CarrierError::InvalidDimensions {
            width: side,
            height: side,
        })?;

        debug!(required_bits, side, "synthesizing carrier");
        Self::filled(side, side, config.fill)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of channel LSBs available: `width * height * 3`.
    pub fn capacity_bits(&self) -> usize {
        self.pixel_count() * CHANNELS
    }

    /// Raw row-major pixel bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Value of one channel of one pixel.
    pub fn channel(&self, pixel_index: usize, channel: Channel) -> Option<u8> {
        if pixel_index >= self.pixel_count() {
            return None;
        }
        self.data
            .get(pixel_index * self.layout.stride() + channel.index())
            .copied()
    }

    /// Set the LSB of one channel, leaving its upper 7 bits untouched.
    pub fn write_bit_at(&mut self, pixel_index: usize, channel: Channel, bit: u8) -> Result<()> {
        let pixels = self.pixel_count();
        if pixel_index >= pixels {
            return Err(CarrierError::OutOfBounds {
                index: pixel_index,
                pixels,
            });
        }
        let offset = pixel_index * self.layout.stride() + channel.index();
        let value = &mut self.data[offset];
        *value = (*value & 0xFE) | (bit & 1);
        Ok(())
    }

    /// Channel LSBs in traversal order: row-major pixels, then `R, G, B`.
    pub fn lsb_bits(&self) -> LsbBits<'_> {
        LsbBits {
            data: &self.data,
            stride: self.layout.stride(),
            pos: 0,
            end: self.capacity_bits(),
        }
    }

    /// Write `bits` into the channel LSBs in traversal order.
    ///
    /// Capacity is checked before anything is written, so a failed call
    /// leaves the carrier unchanged. Channels past the last written bit keep
    /// their original values. Returns the number of bits written.
    pub fn embed<I>(&mut self, bits: I) -> Result<usize>
    where
        I: ExactSizeIterator<Item = u8>,
    {
        let required = bits.len();
        let available = self.capacity_bits();
        if required > available {
            return Err(CarrierError::InsufficientCapacity {
                required,
                available,
            });
        }

        let stride = self.layout.stride();
        let mut written = 0usize;
        for (pos, bit) in bits.take(available).enumerate() {
            let value = &mut self.data[(pos / CHANNELS) * stride + pos % CHANNELS];
            *value = (*value & 0xFE) | (bit & 1);
            written += 1;
        }

        debug!(written, available, "embedded bits into carrier");
        Ok(written)
    }
}

/// Iterator over a carrier's channel LSBs.
#[derive(Debug, Clone)]
pub struct LsbBits<'a> {
    data: &'a [u8],
    stride: usize,
    pos: usize,
    end: usize,
}

impl Iterator for LsbBits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.pos >= self.end {
            return None;
        }
        let value = self.data[(self.pos / CHANNELS) * self.stride + self.pos % CHANNELS];
        self.pos += 1;
        Some(value & 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LsbBits<'_> {}

impl FusedIterator for LsbBits<'_> {}

fn buffer_len(width: u32, height: u32, layout: PixelLayout) -> Result<usize> {
    let invalid = || CarrierError::InvalidDimensions {
        width: u64::from(width),
        height: u64::from(height),
    };
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(layout.stride()))
        .ok_or_else(invalid)
}

fn ceil_sqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root.saturating_mul(root) < n {
        root += 1;
    }
    while root > 0 && (root - 1).saturating_mul(root - 1) >= n {
        root -= 1;
    }
    root
}
