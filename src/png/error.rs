use super::*;

/// An error from PNG decoding.
///
/// Every error aborts the decode. Nothing in this crate hands back a partial
/// image alongside an error, because a half-unfiltered scanline buffer is
/// meaningless (later rows depend on earlier ones).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PngError {
  /// The first 8 bytes aren't the PNG signature.
  BytesAreNotPng,
  /// The first chunk after the signature must be `IHDR`.
  FirstChunkNotIhdr,
  /// The `IHDR` chunk's payload must be exactly 13 bytes.
  IhdrIllegalLength,
  /// Only compression method 0 (zlib) is defined.
  UnknownCompressionMethod(u8),
  /// Only filter method 0 (the five adaptive filters) is defined.
  UnknownFilterMethod(u8),
  /// Interlace method must be 0 or 1.
  UnknownInterlaceMethod(u8),
  /// Color type must be 0, 2, 3, 4, or 6.
  UnknownColorType(u8),
  /// Each color type only allows particular bit depths.
  IllegalColorTypeBitDepthCombination { color_type: u8, bit_depth: u8 },
  /// The declared width and/or height of this image is 0.
  ImageDimensionsZero,
  /// A chunk's declared length runs past the end of the data.
  TruncatedChunk,
  /// The data ended without an `IEND` chunk.
  MissingIend,
  /// A scanline started with a filter type byte other than 0 through 4.
  IllegalFilterType { row: u32, filter_type: u8 },
  /// The zlib decompressor rejected the `IDAT` data.
  IdatDecompressionFailed,
  /// The decompressed data has fewer bytes than the header's geometry needs.
  ScanlinesTooShort { expected: usize, actual: usize },
  /// The unfiltered data has fewer bytes than the pixel assembly needs.
  PixelDataTooShort { expected: usize, actual: usize },
  /// The image is bigger than the configured decode limits.
  ImageTooLarge { width: u32, height: u32 },
  /// The header describes a pixel layout the RGBA assembly can't map.
  ///
  /// Only given when [`PngDecodeOptions::strict_profile`] is on.
  UnsupportedProfile { color_type: u8, bit_depth: u8, interlaced: bool },
}

/// The broad category of a [`PngError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PngErrorKind {
  /// The bytes don't follow the PNG format.
  Format,
  /// The compressed image data is corrupt or truncated.
  Decompression,
  /// A buffer is shorter than the image geometry implies.
  Range,
  /// The image is well formed but outside the configured limits.
  Limit,
}

impl PngError {
  /// Which category of failure this is.
  #[must_use]
  pub const fn kind(&self) -> PngErrorKind {
    match self {
      Self::BytesAreNotPng
      | Self::FirstChunkNotIhdr
      | Self::IhdrIllegalLength
      | Self::UnknownCompressionMethod(_)
      | Self::UnknownFilterMethod(_)
      | Self::UnknownInterlaceMethod(_)
      | Self::UnknownColorType(_)
      | Self::IllegalColorTypeBitDepthCombination { .. }
      | Self::ImageDimensionsZero
      | Self::TruncatedChunk
      | Self::MissingIend
      | Self::IllegalFilterType { .. } => PngErrorKind::Format,
      Self::IdatDecompressionFailed => PngErrorKind::Decompression,
      Self::ScanlinesTooShort { .. } | Self::PixelDataTooShort { .. } => PngErrorKind::Range,
      Self::ImageTooLarge { .. } | Self::UnsupportedProfile { .. } => PngErrorKind::Limit,
    }
  }
}

impl core::fmt::Display for PngError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::BytesAreNotPng => write!(f, "not a PNG"),
      Self::FirstChunkNotIhdr => write!(f, "first chunk is not IHDR"),
      Self::IhdrIllegalLength => write!(f, "IHDR chunk must be 13 bytes"),
      Self::UnknownCompressionMethod(m) => write!(f, "unknown compression method {m}"),
      Self::UnknownFilterMethod(m) => write!(f, "unknown filter method {m}"),
      Self::UnknownInterlaceMethod(m) => write!(f, "unknown interlace method {m}"),
      Self::UnknownColorType(c) => write!(f, "unknown color type {c}"),
      Self::IllegalColorTypeBitDepthCombination { color_type, bit_depth } => {
        write!(f, "bit depth {bit_depth} is not allowed for color type {color_type}")
      }
      Self::ImageDimensionsZero => write!(f, "image width and height must be non-zero"),
      Self::TruncatedChunk => write!(f, "chunk runs past the end of the data"),
      Self::MissingIend => write!(f, "data ended before the IEND chunk"),
      Self::IllegalFilterType { row, filter_type } => {
        write!(f, "bad filter type {filter_type} on row {row}")
      }
      Self::IdatDecompressionFailed => write!(f, "zlib decompression of IDAT data failed"),
      Self::ScanlinesTooShort { expected, actual } => {
        write!(f, "decompressed data is {actual} bytes, expected at least {expected}")
      }
      Self::PixelDataTooShort { expected, actual } => {
        write!(f, "pixel data is {actual} bytes, expected at least {expected}")
      }
      Self::ImageTooLarge { width, height } => {
        write!(f, "image of {width}x{height} exceeds the decode limits")
      }
      Self::UnsupportedProfile { color_type, bit_depth, interlaced } => write!(
        f,
        "color type {color_type} at bit depth {bit_depth} (interlaced: {interlaced}) can't be assembled to RGBA"
      ),
    }
  }
}

impl core::error::Error for PngError {}
