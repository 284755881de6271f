#![forbid(unsafe_code)]

//! Provides the heap-allocated image type that decoding produces.

use alloc::vec::Vec;

use bytemuck::Pod;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// You don't ever need to call this function yourself, but it's how the image
/// container converts 2d coordinates into index values within its payload
/// vector.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// A direct-color image.
///
/// Pixels are row-major, top row first, and there's no padding between rows.
/// The fields are public, but if you put them together weirdly the methods of
/// this type will return `None` rather than the pixel you expected.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct Bitmap<P> {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<P>,
}
impl<P> Bitmap<P> {
  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<&P> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut P> {
    if x < self.width && y < self.height {
      self.pixels.get_mut(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// Flips the image top to bottom.
  #[inline]
  pub fn vertical_flip(&mut self) {
    let width = self.width as usize;
    if width == 0 {
      return;
    }
    let mut data: &mut [P] = self.pixels.as_mut_slice();
    while data.len() >= 2 * width {
      let (low, mid) = data.split_at_mut(width);
      let (mid, high) = mid.split_at_mut(mid.len() - width);
      low.swap_with_slice(high);
      data = mid;
    }
  }
}
impl<P: Pod> Bitmap<P> {
  /// Views the pixel data as raw bytes.
  ///
  /// For a `Bitmap<RGBA8888>` this is `width * 4` bytes per row, which is the
  /// layout most image encoders and GPU upload calls expect.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.pixels)
  }
}

#[test]
fn test_vertical_flip() {
  use alloc::vec;
  let mut bitmap = Bitmap { width: 2, height: 3, pixels: vec![1, 2, 3, 4, 5, 6] };
  bitmap.vertical_flip();
  assert_eq!(bitmap.pixels, vec![5, 6, 3, 4, 1, 2]);
  assert_eq!(bitmap.get(1, 0), Some(&6));
  assert_eq!(bitmap.get(2, 0), None);
  assert_eq!(bitmap.get(0, 3), None);
}
