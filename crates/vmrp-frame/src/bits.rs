//! MSB-first conversion between bytes and single bits.
//!
//! Bits are carried as `u8` values of `0` or `1`. Any iterator over such
//! values can act as a bit source; [`bytes_from`] treats running out of bits
//! as [`FrameError::TruncatedStream`] rather than a silent end.

use std::iter::FusedIterator;

use crate::error::{FrameError, Result};

/// Lazy bit view over a byte slice, most-significant bit of each byte first.
#[derive(Debug, Clone)]
pub struct BitsOf<'a> {
    bytes: &'a [u8],
    pos: usize,
}

/// Iterate the bits of `bytes`, MSB first, in input byte order.
///
/// The iterator always yields exactly `8 * bytes.len()` items.
pub fn bits_of(bytes: &[u8]) -> BitsOf<'_> {
    BitsOf { bytes, pos: 0 }
}

impl Iterator for BitsOf<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos / 8)?;
        let shift = 7 - (self.pos % 8);
        self.pos += 1;
        Some((byte >> shift) & 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() * 8 - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitsOf<'_> {}

impl FusedIterator for BitsOf<'_> {}

/// Fill exactly `count` bytes from a bit source.
///
/// Consumes `8 * count` bits. Only the lowest bit of each item is used.
/// Fails with [`FrameError::TruncatedStream`] if the source is exhausted
/// first. When the source reports an upper bound that is already too small
/// the call fails without consuming anything.
pub fn bytes_from<I>(bits: &mut I, count: usize) -> Result<Vec<u8>>
where
    I: Iterator<Item = u8> + ?Sized,
{
    let needed_bits = count.saturating_mul(8);
    let upper = bits.size_hint().1;
    if let Some(available_bits) = upper {
        if available_bits < needed_bits {
            return Err(FrameError::TruncatedStream {
                needed_bits,
                available_bits,
            });
        }
    }

    // Sources without an upper bound get a bounded up-front allocation.
    let reserve = if upper.is_some() { count } else { count.min(64 * 1024) };
    let mut out = Vec::with_capacity(reserve);

    for filled in 0..count {
        let mut byte = 0u8;
        for offset in 0..8 {
            let Some(bit) = bits.next() else {
                return Err(FrameError::TruncatedStream {
                    needed_bits,
                    available_bits: filled * 8 + offset,
                });
            };
            byte = (byte << 1) | (bit & 1);
        }
        out.push(byte);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_msb_first() {
        let bits: Vec<u8> = bits_of(&[0b1000_0001, 0b0110_0000]).collect();
        assert_eq!(bits, vec![1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn bit_count_is_eight_per_byte() {
        let data = b"VMRP\0payload";
        let iter = bits_of(data);
        assert_eq!(iter.len(), data.len() * 8);
        assert_eq!(iter.count(), data.len() * 8);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(bits_of(&[]).next(), None);
    }

    #[test]
    fn size_hint_shrinks_as_consumed() {
        let mut iter = bits_of(&[0xff, 0x00]);
        iter.next();
        iter.next();
        assert_eq!(iter.size_hint(), (14, Some(14)));
    }

    #[test]
    fn bytes_from_reassembles_in_order() {
        let data = [0xde, 0xad, 0xbe, 0xef];
        let mut bits = bits_of(&data);
        assert_eq!(bytes_from(&mut bits, 2).unwrap(), vec![0xde, 0xad]);
        assert_eq!(bytes_from(&mut bits, 2).unwrap(), vec![0xbe, 0xef]);
        assert_eq!(bits.next(), None);
    }

    #[test]
    fn bytes_from_zero_count_consumes_nothing() {
        let mut bits = bits_of(&[0x01]);
        assert!(bytes_from(&mut bits, 0).unwrap().is_empty());
        assert_eq!(bits.len(), 8);
    }

    #[test]
    fn bytes_from_ignores_high_bits_of_items() {
        // Carrier sources may hand over raw channel values; only bit 0 counts.
        let mut bits = [3u8, 2, 3, 2, 3, 2, 3, 2].into_iter();
        assert_eq!(bytes_from(&mut bits, 1).unwrap(), vec![0b1010_1010]);
    }

    #[test]
    fn bytes_from_fails_early_on_known_short_source() {
        let mut bits = bits_of(&[0xaa]);
        let err = bytes_from(&mut bits, 2).unwrap_err();
        assert!(matches!(
            err,
            FrameError::TruncatedStream {
                needed_bits: 16,
                available_bits: 8
            }
        ));
        // Nothing consumed when the bound already rules the read out.
        assert_eq!(bits.len(), 8);
    }

    #[test]
    fn bytes_from_reports_truncation_for_unbounded_sources() {
        let mut bits = std::iter::from_fn({
            let mut left = 12u32;
            move || {
                if left == 0 {
                    None
                } else {
                    left -= 1;
                    Some(1)
                }
            }
        });
        let err = bytes_from(&mut bits, 2).unwrap_err();
        assert!(matches!(
            err,
            FrameError::TruncatedStream {
                needed_bits: 16,
                available_bits: 12
            }
        ));
    }
}
