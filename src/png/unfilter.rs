use super::*;

/// The filter applied to a single scanline, given by the line's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngFilterType {
  /// No change.
  None = 0,
  /// Difference from the byte one pixel to the left.
  Sub = 1,
  /// Difference from the byte above.
  Up = 2,
  /// Difference from the floored mean of left and above.
  Average = 3,
  /// Difference from the Paeth predictor of left, above, and upper left.
  Paeth = 4,
}
impl TryFrom<u8> for PngFilterType {
  type Error = u8;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => return Err(other),
    })
  }
}

/// Picks whichever of left (`a`), above (`b`), or upper left (`c`) is closest
/// to `a + b - c`.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // Note(Lokathor): The PNG spec is extremely specific that you shall not,
  // under any circumstances, alter the order of evaluation of this
  // expression's tests.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reverses one scanline's filter in place.
///
/// * `line` is the pixel bytes of the line, *without* the filter type byte.
/// * `previous` is the already unfiltered line above this one (all zeroes for
///   the first line).
/// * `bytes_per_pixel` is the distance back to the "left" byte, so each byte
///   of a multi-byte pixel only ever looks at the same byte of other pixels.
///
/// ## Panics
/// * If `previous` is shorter than `line`.
pub fn unfilter_line(
  filter: PngFilterType, line: &mut [u8], previous: &[u8], bytes_per_pixel: usize,
) {
  assert!(
    previous.len() >= line.len(),
    "previous line is {} bytes, but the line is {} bytes",
    previous.len(),
    line.len()
  );
  let bpp = bytes_per_pixel.max(1);
  let head = bpp.min(line.len());
  match filter {
    PngFilterType::None => (),
    PngFilterType::Sub => {
      for i in bpp..line.len() {
        line[i] = line[i].wrapping_add(line[i - bpp]);
      }
    }
    PngFilterType::Up => {
      line.iter_mut().zip(previous.iter().copied()).for_each(|(p, b)| *p = p.wrapping_add(b));
    }
    PngFilterType::Average => {
      // the first pixel has no left, so `a` is 0
      line[..head]
        .iter_mut()
        .zip(previous.iter().copied())
        .for_each(|(p, b)| *p = p.wrapping_add(b / 2));
      for i in bpp..line.len() {
        let a = line[i - bpp] as u32;
        let b = previous[i] as u32;
        line[i] = line[i].wrapping_add(((a + b) / 2) as u8);
      }
    }
    PngFilterType::Paeth => {
      // the first pixel has no left or upper left, so `a` and `c` are 0
      line[..head]
        .iter_mut()
        .zip(previous.iter().copied())
        .for_each(|(p, b)| *p = p.wrapping_add(paeth_predict(0, b, 0)));
      for i in bpp..line.len() {
        let a = line[i - bpp];
        let b = previous[i];
        let c = previous[i - bpp];
        line[i] = line[i].wrapping_add(paeth_predict(a, b, c));
      }
    }
  }
}

/// Unfilters all the scanlines of a non-interlaced image.
///
/// The `decompressed` data is `height` filter lines, each of which is one
/// filter type byte and then `ceil(bits_per_pixel * width / 8)` bytes of
/// filtered pixel data. The output is just the unfiltered pixel data of every
/// line, one after the other, without the filter type bytes.
///
/// Lines are processed strictly top to bottom, keeping only the line above as
/// extra state. Any bytes past the end of the last line are ignored.
///
/// ## Failure
/// * [`PngError::ScanlinesTooShort`] if `decompressed` doesn't hold `height`
///   full filter lines.
/// * [`PngError::IllegalFilterType`] if any line's filter type byte is more
///   than 4. No partial output is returned.
pub fn unfilter_scanlines(
  decompressed: &[u8], width: u32, height: u32, bits_per_pixel: usize, bytes_per_pixel: usize,
) -> Result<Vec<u8>, PngError> {
  let bytes_per_filterline = bytes_per_filterline(bits_per_pixel, width);
  let line_len = bytes_per_filterline - 1;
  let expected = bytes_per_filterline.saturating_mul(height as usize);
  if decompressed.len() < expected {
    return Err(PngError::ScanlinesTooShort { expected, actual: decompressed.len() });
  }

  let mut out: Vec<u8> = Vec::with_capacity(line_len * (height as usize));
  // The line above the first line is an implied line of zeroes.
  let mut previous: Vec<u8> = vec![0; line_len];
  let mut current: Vec<u8> = vec![0; line_len];
  for (row, filterline) in (0..height).zip(decompressed.chunks_exact(bytes_per_filterline)) {
    let (filter_byte, pixels) = filterline.split_at(1);
    let filter = PngFilterType::try_from(filter_byte[0])
      .map_err(|filter_type| PngError::IllegalFilterType { row, filter_type })?;
    current.copy_from_slice(pixels);
    unfilter_line(filter, &mut current, &previous, bytes_per_pixel);
    out.extend_from_slice(&current);
    core::mem::swap(&mut previous, &mut current);
  }
  Ok(out)
}
