use super::*;

/// Settings for [`decode_png_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PngDecodeOptions {
  /// Images wider than this are rejected before decompression.
  pub max_width: u32,
  /// Images taller than this are rejected before decompression.
  pub max_height: u32,
  /// Reject any image that the RGBA assembly can't map correctly.
  ///
  /// When this is off, every image with a valid header goes through the
  /// same unfilter and assembly steps no matter what its color type, bit
  /// depth, or interlacing is, and the pixels come out however they come
  /// out.
  pub strict_profile: bool,
}
impl Default for PngDecodeOptions {
  #[inline]
  fn default() -> Self {
    Self { max_width: 16_384, max_height: 16_384, strict_profile: true }
  }
}
impl PngDecodeOptions {
  /// Sets the maximum width and height.
  #[inline]
  #[must_use]
  pub const fn with_max_dimensions(self, max_width: u32, max_height: u32) -> Self {
    Self { max_width, max_height, ..self }
  }

  /// Sets if the decoder rejects images outside the RGBA assembly profile.
  #[inline]
  #[must_use]
  pub const fn with_strict_profile(self, strict_profile: bool) -> Self {
    Self { strict_profile, ..self }
  }

  /// Checks a header against these options.
  ///
  /// ## Failure
  /// * [`PngError::ImageTooLarge`] if either dimension is over the limit.
  /// * [`PngError::UnsupportedProfile`] if `strict_profile` is on and the
  ///   header isn't 8-bit non-interlaced RGB or RGBA.
  pub fn check_header(&self, ihdr: &IHDR) -> Result<(), PngError> {
    if ihdr.width > self.max_width || ihdr.height > self.max_height {
      return Err(PngError::ImageTooLarge { width: ihdr.width, height: ihdr.height });
    }
    if self.strict_profile && !ihdr.is_rgba_assembly_profile() {
      return Err(PngError::UnsupportedProfile {
        color_type: ihdr.color_type as u8,
        bit_depth: ihdr.bit_depth,
        interlaced: ihdr.is_interlaced,
      });
    }
    Ok(())
  }
}
