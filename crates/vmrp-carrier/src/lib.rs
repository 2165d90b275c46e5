//! Lossless pixel carriers for LSB embedding.
//!
//! A [`Carrier`] is a rectangular grid of 8-bit RGB pixels (optionally with
//! an alpha channel that is carried through untouched). Each colour channel
//! contributes one usable bit, its least-significant bit, visited in
//! row-major pixel order and `R, G, B` channel order.
//!
//! Reading and writing image files requires the `png` feature. Use
//! [`is_available`] to probe for it before touching persistent storage.

pub mod carrier;
pub mod config;
pub mod error;
pub mod io;

pub use carrier::{Carrier, Channel, LsbBits, PixelLayout, CHANNELS};
pub use config::{CarrierConfig, DEFAULT_FILL, DEFAULT_MIN_SIDE};
pub use error::{CarrierError, Result};
pub use io::{ensure_available, is_available, CODEC_NAME};
