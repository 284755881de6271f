use super::*;

/// Assembles unfiltered pixel data into an opaque RGBA8888 bitmap.
///
/// For each pixel, the first three bytes of its `bytes_per_pixel` bytes are
/// taken as red, green, and blue, and alpha is always set to 255.
///
/// ## Precondition
/// This is only a *correct* color mapping for 8-bit truecolor data (PNG color
/// type 2 or 6 at bit depth 8, see [`IHDR::is_rgba_assembly_profile`]):
/// * An alpha sample, when present, is skipped over rather than copied.
/// * Greyscale, indexed, and 16-bit data aren't converted, their bytes just
///   get read as if they were RGB.
///
/// ## Failure
/// * [`PngError::PixelDataTooShort`] if `raw` has fewer than
///   `bytes_per_pixel * width * height` bytes, or if a pixel's three color
///   bytes would run off the end (only possible with `bytes_per_pixel < 3`).
pub fn assemble_rgba8888(
  raw: &[u8], width: u32, height: u32, bytes_per_pixel: usize,
) -> Result<Bitmap<RGBA8888>, PngError> {
  let pixel_count = (width as usize).saturating_mul(height as usize);
  let expected = bytes_per_pixel.saturating_mul(pixel_count);
  if raw.len() < expected {
    return Err(PngError::PixelDataTooShort { expected, actual: raw.len() });
  }

  let mut pixels: Vec<RGBA8888> = Vec::with_capacity(pixel_count);
  for y in 0..height {
    for x in 0..width {
      let offset = bytes_per_pixel * xy_width_to_index(x, y, width);
      match raw.get(offset..offset + 3) {
        Some([r, g, b]) => pixels.push(RGBA8888::opaque(*r, *g, *b)),
        _ => {
          return Err(PngError::PixelDataTooShort { expected: offset + 3, actual: raw.len() })
        }
      }
    }
  }
  Ok(Bitmap { width, height, pixels })
}
