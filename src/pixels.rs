//! Module for pixel data structures.

use bytemuck::{Pod, Zeroable};

/// Red/Green/Blue/Alpha, u8 per channel.
///
/// This is the output pixel of the decoder. Casting a slice of these to bytes
/// gives the usual `r, g, b, a` byte order regardless of target endianness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGBA8888 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
impl RGBA8888 {
  /// Makes an opaque pixel from three color channels.
  #[inline]
  #[must_use]
  pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: u8::MAX }
  }
}
impl From<[u8; 4]> for RGBA8888 {
  #[inline]
  fn from([r, g, b, a]: [u8; 4]) -> Self {
    Self { r, g, b, a }
  }
}
impl From<RGBA8888> for [u8; 4] {
  #[inline]
  fn from(RGBA8888 { r, g, b, a }: RGBA8888) -> Self {
    [r, g, b, a]
  }
}
