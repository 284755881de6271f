use super::*;

/// The four byte tag that says what kind of data a chunk holds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngRawChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngRawChunkType {
  /// Image header, always the first chunk.
  pub const IHDR: Self = Self(*b"IHDR");
  /// Image data, possibly split over several chunks.
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end, always the last chunk.
  pub const IEND: Self = Self(*b"IEND");

  /// Critical chunks have an uppercase first letter (bit 5 clear).
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 0b0010_0000) == 0
  }
}
impl Debug for PngRawChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// An unparsed chunk from a PNG.
///
/// The CRC is carried along as it was declared in the data, but nothing in
/// this crate checks it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  pub(crate) type_: PngRawChunkType,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl Debug for PngRawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("type_", &self.type_)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> PngRawChunk<'b> {
  /// The chunk's type tag.
  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> PngRawChunkType {
    self.type_
  }
  /// The chunk's payload.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC value that follows the payload.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  /// If a decoder must understand this chunk to decode the image.
  #[inline]
  #[must_use]
  pub const fn is_critical(&self) -> bool {
    self.type_.is_critical()
  }
}

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// As an `Iterator` this is lenient: it just stops at the first chunk that
/// doesn't fit in the remaining bytes. Use
/// [`try_next_chunk`](Self::try_next_chunk) to find out *why* it stopped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngRawChunkIter<'b>(pub(crate) &'b [u8]);
impl<'b> PngRawChunkIter<'b> {
  /// Pass the full PNG bytes, it will remove the PNG signature automatically.
  ///
  /// The signature isn't checked, see [`is_png_signature_correct`].
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self(rest),
      _ => Self(&[]),
    }
  }

  /// The bytes that haven't been read yet.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> &'b [u8] {
    self.0
  }

  #[inline]
  fn take(&mut self, count: usize) -> Option<&'b [u8]> {
    if self.0.len() >= count {
      let (head, rest) = self.0.split_at(count);
      self.0 = rest;
      Some(head)
    } else {
      None
    }
  }

  #[inline]
  fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
    self.take(N).and_then(|head| head.try_into().ok())
  }

  /// Reads the next chunk.
  ///
  /// * `Ok(None)` when there's no bytes left at all.
  /// * `Err(TruncatedChunk)` when there's *some* bytes left, but not enough
  ///   for the length, type, declared payload, and CRC of a whole chunk.
  ///
  /// On error the iterator is left empty.
  pub fn try_next_chunk(&mut self) -> Result<Option<PngRawChunk<'b>>, PngError> {
    if self.0.is_empty() {
      return Ok(None);
    }
    let out = self.read_chunk();
    if out.is_none() {
      self.0 = &[];
    }
    out.map(Some).ok_or(PngError::TruncatedChunk)
  }

  fn read_chunk(&mut self) -> Option<PngRawChunk<'b>> {
    let chunk_len = u32::from_be_bytes(self.take_array()?);
    let type_ = PngRawChunkType(self.take_array()?);
    let data = self.take(usize::try_from(chunk_len).ok()?)?;
    let declared_crc = u32::from_be_bytes(self.take_array()?);
    Some(PngRawChunk { type_, data, declared_crc })
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngRawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.try_next_chunk().ok().flatten()
  }
}
