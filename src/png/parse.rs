use super::*;

/// Progress reports from [`parse_png_stream_with`].
///
/// These are purely informational, the parse result doesn't depend on what
/// the callback does with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ChunkEvent<'b> {
  /// The header was read and validated.
  Header(IHDR),
  /// A chunk after the header was read. Unknown chunk types are skipped.
  Chunk { chunk_type: PngRawChunkType, length: usize, data: &'b [u8] },
  /// The `IEND` chunk was found.
  Finished { compressed_len: usize },
}

/// Forwards a [`ChunkEvent`] to the `log` crate.
pub fn log_chunk_event(event: ChunkEvent<'_>) {
  match event {
    ChunkEvent::Header(ihdr) => log::debug!(
      "png: width: {} height: {} depth: {} color type: {:?} interlace: {}",
      ihdr.width,
      ihdr.height,
      ihdr.bit_depth,
      ihdr.color_type,
      ihdr.is_interlaced
    ),
    ChunkEvent::Chunk { chunk_type, length, .. } => {
      log::trace!("png: chunk {:?} ({} bytes)", chunk_type, length)
    }
    ChunkEvent::Finished { compressed_len } => {
      log::debug!("png: compressed data length: {}", compressed_len)
    }
  }
}

/// The result of the chunk parsing stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPng {
  /// The image header.
  pub ihdr: IHDR,
  /// Every `IDAT` payload, concatenated in stream order.
  ///
  /// This is a single zlib data stream.
  pub compressed: Vec<u8>,
}

/// Parses PNG bytes into the header and the compressed image data, logging
/// each chunk through [`log_chunk_event`].
#[inline]
pub fn parse_png_stream(bytes: &[u8]) -> Result<ParsedPng, PngError> {
  parse_png_stream_with(bytes, log_chunk_event)
}

/// Parses PNG bytes into the header and the compressed image data.
///
/// The `on_event` callback sees the header, then every following chunk
/// (including `IDAT` and `IEND`), then a final event with the compressed
/// length.
///
/// Ancillary chunks are skipped without looking inside them. `PLTE` is also
/// skipped, since the RGBA assembly doesn't use a palette.
///
/// ## Failure
/// * [`PngError::BytesAreNotPng`] if the signature is wrong. This is checked
///   before any chunk is read.
/// * [`PngError::FirstChunkNotIhdr`], or any header error from
///   [`IHDR::try_from`], if the first chunk is a bad header.
/// * [`PngError::TruncatedChunk`] if a chunk's length runs off the end.
/// * [`PngError::MissingIend`] if the data ends before an `IEND` chunk.
pub fn parse_png_stream_with<F>(bytes: &[u8], mut on_event: F) -> Result<ParsedPng, PngError>
where
  F: FnMut(ChunkEvent<'_>),
{
  if !is_png_signature_correct(bytes) {
    return Err(PngError::BytesAreNotPng);
  }
  let mut it = PngRawChunkIter::new(bytes);

  let ihdr = match it.try_next_chunk()? {
    Some(raw) if raw.chunk_type() == PngRawChunkType::IHDR => IHDR::try_from(raw.data())?,
    Some(_) => return Err(PngError::FirstChunkNotIhdr),
    None => return Err(PngError::MissingIend),
  };
  on_event(ChunkEvent::Header(ihdr));

  let mut compressed: Vec<u8> = Vec::new();
  loop {
    let raw = it.try_next_chunk()?.ok_or(PngError::MissingIend)?;
    on_event(ChunkEvent::Chunk {
      chunk_type: raw.chunk_type(),
      length: raw.data().len(),
      data: raw.data(),
    });
    match raw.chunk_type() {
      PngRawChunkType::IDAT => compressed.extend_from_slice(raw.data()),
      PngRawChunkType::IEND => break,
      _ => continue,
    }
  }
  on_event(ChunkEvent::Finished { compressed_len: compressed.len() });

  Ok(ParsedPng { ihdr, compressed })
}
