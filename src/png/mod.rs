#![forbid(unsafe_code)]

//! Holds all the tools for decoding PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Automatic Decoding
//!
//! Just call [`decode_png`] and you get a [`Bitmap`] of [`RGBA8888`] pixels.
//! This requires the `miniz_oxide` crate feature (on by default). If you'd
//! rather use some other zlib implementation, or change the decode limits,
//! call [`decode_png_with`] instead.
//!
//! ## Decoding Stages
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! There's an 8 byte signature, then a header chunk, then some other chunks,
//! then an end chunk. Each stage of decoding goes fully into its own output
//! buffer before the next stage begins:
//!
//! 1) [`parse_png_stream`] checks the signature, reads the [`IHDR`], and
//!    gathers up all the `IDAT` payloads. All other chunks are skipped.
//! 2) A [`ZlibInflate`] decompresses the gathered data. This gives you
//!    *filtered* data, not the final data you want.
//! 3) [`unfilter_scanlines`] reverses the filter on each line. Every line has
//!    an extra byte on the front saying which filter was used for that line,
//!    and filters can refer to the line above, so lines have to be done in
//!    order.
//! 4) [`assemble_rgba8888`] maps the unfiltered bytes into the final pixels.
//!
//! ## Limitations
//!
//! The unfiltering works for any color type and bit depth, but the pixel
//! assembly only understands 8-bit RGB and RGBA, and always outputs opaque
//! pixels. Interlaced images aren't de-interlaced. By default
//! [`decode_png_with`] rejects images outside of that profile up front, see
//! [`PngDecodeOptions::strict_profile`].
//!
//! Neither of the checksum systems (CRC32 checks on individual chunks, and
//! Adler32 checking on the Zlib compressed image data) is checked here. The
//! Adler32 is up to the [`ZlibInflate`] in use.

use core::fmt::{Debug, Write};

use alloc::{vec, vec::Vec};

use crate::{image::*, pixels::RGBA8888};

mod error;
pub use error::*;

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

mod geometry;
pub use geometry::*;

mod parse;
pub use parse::*;

mod inflate;
pub use inflate::*;

mod unfilter;
pub use unfilter::*;

mod assemble;
pub use assemble::*;

mod options;
pub use options::*;


/// Decodes PNG bytes to RGBA8888 with the default options.
///
/// See [`decode_png_with`].
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[inline]
pub fn decode_png(bytes: &[u8]) -> Result<Bitmap<RGBA8888>, PngError> {
  decode_png_with(bytes, &PngDecodeOptions::default(), &MinizInflater::default())
}

/// Decodes PNG bytes to RGBA8888.
///
/// Chunk progress is logged through the `log` crate, see
/// [`log_chunk_event`].
///
/// ## Failure
/// Any failure from any stage ends the decode, and no image is returned:
/// * Format errors from [`parse_png_stream`] and [`unfilter_scanlines`].
/// * Limit errors from [`PngDecodeOptions::check_header`]. These happen
///   before decompression.
/// * Whatever error the `inflater` gives. The inflater is only asked for
///   [`IHDR::get_zlib_decompression_requirement`] bytes, so a small file
///   can't inflate into a huge allocation.
/// * Range errors if the decompressed data is too short for the image.
pub fn decode_png_with<Z: ZlibInflate + ?Sized>(
  bytes: &[u8], options: &PngDecodeOptions, inflater: &Z,
) -> Result<Bitmap<RGBA8888>, PngError> {
  let ParsedPng { ihdr, compressed } = parse_png_stream(bytes)?;
  options.check_header(&ihdr)?;

  let needed = ihdr.get_zlib_decompression_requirement();
  let decompressed = inflater.inflate(&compressed, needed)?;
  log::debug!("png: uncompressed data length: {}", decompressed.len());

  let bits_per_pixel = ihdr.bits_per_pixel();
  let bytes_per_pixel = ihdr.bytes_per_pixel();
  let unfiltered =
    unfilter_scanlines(&decompressed, ihdr.width, ihdr.height, bits_per_pixel, bytes_per_pixel)?;
  log::debug!("png: unfiltered data length: {}", unfiltered.len());

  assemble_rgba8888(&unfiltered, ihdr.width, ihdr.height, bytes_per_pixel)
}
