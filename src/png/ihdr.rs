use super::*;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }

  /// The bit depths that PNG allows for this color type.
  #[inline]
  #[must_use]
  pub const fn allowed_bit_depths(self) -> &'static [u8] {
    match self {
      Self::Y => &[1, 2, 4, 8, 16],
      Self::Index => &[1, 2, 4, 8],
      Self::RGB | Self::YA | Self::RGBA => &[8, 16],
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(PngError::UnknownColorType(value)),
    })
  }
}

/// Image Header
///
/// This is always the first chunk, and it's fixed once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// if the image data is stored interlaced.
  ///
  /// please don't make new interlaced images, they're terrible.
  pub is_interlaced: bool,
}
impl IHDR {
  /// Bits per pixel, see [`bits_per_pixel`].
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// Bytes per pixel for filtering purposes, see [`bytes_per_pixel`].
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    bytes_per_pixel(self.bits_per_pixel())
  }

  /// Gets the number of bytes the zlib data should decompress into.
  ///
  /// This is only accurate for non-interlaced images.
  #[inline]
  #[must_use]
  pub fn get_zlib_decompression_requirement(&self) -> usize {
    bytes_per_filterline(self.bits_per_pixel(), self.width).saturating_mul(self.height as usize)
  }

  /// If the pixel assembly stage maps this image's samples correctly.
  ///
  /// That's 8-bit truecolor, with or without alpha, and not interlaced.
  #[inline]
  #[must_use]
  pub const fn is_rgba_assembly_profile(&self) -> bool {
    self.bit_depth == 8
      && matches!(self.color_type, PngColorType::RGB | PngColorType::RGBA)
      && !self.is_interlaced
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] =>
      {
        if *compression_method != 0 {
          return Err(PngError::UnknownCompressionMethod(*compression_method));
        }
        if *filter_method != 0 {
          return Err(PngError::UnknownFilterMethod(*filter_method));
        }
        let width = u32::from_be_bytes([*w0, *w1, *w2, *w3]);
        let height = u32::from_be_bytes([*h0, *h1, *h2, *h3]);
        if width == 0 || height == 0 {
          return Err(PngError::ImageDimensionsZero);
        }
        let color_type_ = PngColorType::try_from(*color_type)?;
        if !color_type_.allowed_bit_depths().contains(bit_depth) {
          return Err(PngError::IllegalColorTypeBitDepthCombination {
            color_type: *color_type,
            bit_depth: *bit_depth,
          });
        }
        Ok(Self {
          width,
          height,
          bit_depth: *bit_depth,
          color_type: color_type_,
          is_interlaced: match interlace_method {
            0 => false,
            1 => true,
            _ => return Err(PngError::UnknownInterlaceMethod(*interlace_method)),
          },
        })
      }
      _ => Err(PngError::IhdrIllegalLength),
    }
  }
}
