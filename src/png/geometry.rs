use super::*;

/// Gets the bits per pixel for a color type and bit depth.
///
/// This works for every color type and any bit depth, it doesn't check that
/// the depth is one PNG actually allows for the color type (the [`IHDR`]
/// parser does that).
///
/// ## Failure
/// * [`PngError::UnknownColorType`] for a color type other than 0, 2, 3, 4,
///   or 6.
#[inline]
pub fn bits_per_pixel(color_type: u8, bit_depth: u8) -> Result<usize, PngError> {
  let color_type = PngColorType::try_from(color_type)?;
  Ok(color_type.channel_count() * (bit_depth as usize))
}

/// Bytes per pixel, rounded up.
///
/// This is the distance back to the "left" byte when unfiltering. Pixels of
/// less than 8 bits still count as a 1 byte stride.
#[inline]
#[must_use]
pub const fn bytes_per_pixel(bits_per_pixel: usize) -> usize {
  (bits_per_pixel + 7) / 8
}

/// Bytes for one filtered line: the filter type byte plus the pixel data.
///
/// When pixels are less than 8 bits it's possible to end up with a partial
/// byte on the end of the line, so we must round up.
#[inline]
#[must_use]
pub const fn bytes_per_filterline(bits_per_pixel: usize, width: u32) -> usize {
  1 + bits_per_pixel.saturating_mul(width as usize).saturating_add(7) / 8
}
