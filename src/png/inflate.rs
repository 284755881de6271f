use super::*;

/// Anything that can decompress a zlib data stream.
///
/// The decoder doesn't care which zlib implementation is used. With the
/// `miniz_oxide` feature there's [`MinizInflater`], and any closure of the
/// right shape works too.
pub trait ZlibInflate {
  /// Decompresses a zlib stream.
  ///
  /// `needed` is how many output bytes the caller will actually use (see
  /// [`IHDR::get_zlib_decompression_requirement`]). Output past that point
  /// is thrown away, so an implementation should stop there and return at
  /// most `needed` bytes rather than inflate the whole stream.
  ///
  /// ## Failure
  /// * [`PngError::IdatDecompressionFailed`] if the stream is corrupt or
  ///   truncated.
  fn inflate(&self, compressed: &[u8], needed: usize) -> Result<Vec<u8>, PngError>;
}

impl<F> ZlibInflate for F
where
  F: Fn(&[u8], usize) -> Result<Vec<u8>, PngError>,
{
  #[inline]
  fn inflate(&self, compressed: &[u8], needed: usize) -> Result<Vec<u8>, PngError> {
    self(compressed, needed)
  }
}

/// Zlib decompression using the `miniz_oxide` crate.
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinizInflater {
  /// Decompression stops with an error if the caller needs more than this
  /// many output bytes.
  ///
  /// Inflation is always cut off at the `needed` amount as well, this is an
  /// extra hard cap on top of that.
  pub max_output: usize,
}
#[cfg(feature = "miniz_oxide")]
impl Default for MinizInflater {
  #[inline]
  fn default() -> Self {
    Self { max_output: usize::MAX }
  }
}
#[cfg(feature = "miniz_oxide")]
impl ZlibInflate for MinizInflater {
  fn inflate(&self, compressed: &[u8], needed: usize) -> Result<Vec<u8>, PngError> {
    use miniz_oxide::inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus};
    let limit = needed.min(self.max_output);
    match decompress_to_vec_zlib_with_limit(compressed, limit) {
      Ok(output) => Ok(output),
      // the stream keeps going past what the image uses, so keep just the
      // part that's needed.
      Err(e)
        if e.status == TINFLStatus::HasMoreOutput
          && needed <= self.max_output
          && e.output.len() >= needed =>
      {
        log::debug!("png: zlib stream has data past {} bytes, ignoring it", needed);
        let mut output = e.output;
        output.truncate(needed);
        Ok(output)
      }
      Err(e) => {
        log::warn!("png: zlib decompression failed: {:?}", e.status);
        Err(PngError::IdatDecompressionFailed)
      }
    }
  }
}
