use scanpng::{png::*, RGBA8888};
use walkdir::WalkDir;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn push_chunk(out: &mut Vec<u8>, type_: &[u8; 4], data: &[u8]) {
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(type_);
  out.extend_from_slice(data);
  out.extend_from_slice(&0_u32.to_be_bytes());
}

fn filter_line(filter: u8, line: &[u8], previous: &[u8], bpp: usize) -> Vec<u8> {
  (0..line.len())
    .map(|i| {
      let a = if i >= bpp { line[i - bpp] } else { 0 };
      let b = previous[i];
      let c = if i >= bpp { previous[i - bpp] } else { 0 };
      let predicted = match filter {
        0 => 0,
        1 => a,
        2 => b,
        3 => ((a as u16 + b as u16) / 2) as u8,
        4 => paeth_predict(a, b, c),
        _ => unreachable!(),
      };
      line[i].wrapping_sub(predicted)
    })
    .collect()
}

/// A minimal 8-bit truecolor PNG encoder. Row `y` uses filter `filters[y %
/// filters.len()]`, and the image data gets split over `idat_count` chunks.
fn encode_png(
  width: u32, height: u32, color_type: u8, raw: &[u8], filters: &[u8], idat_count: usize,
) -> Vec<u8> {
  let bpp = if color_type == 6 { 4 } else { 3 };
  let line_len = bpp * width as usize;
  assert_eq!(raw.len(), line_len * height as usize);
  let mut filtered = Vec::new();
  let zeroes = vec![0; line_len];
  let mut previous: &[u8] = &zeroes;
  for (y, line) in raw.chunks_exact(line_len).enumerate() {
    let filter = filters[y % filters.len()];
    filtered.push(filter);
    filtered.extend(filter_line(filter, line, previous, bpp));
    previous = line;
  }
  let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, 6);

  let mut ihdr = Vec::new();
  ihdr.extend_from_slice(&width.to_be_bytes());
  ihdr.extend_from_slice(&height.to_be_bytes());
  ihdr.extend_from_slice(&[8, color_type, 0, 0, 0]);

  let mut out = SIGNATURE.to_vec();
  push_chunk(&mut out, b"IHDR", &ihdr);
  push_chunk(&mut out, b"sRGB", &[0]);
  let per_chunk = (compressed.len() / idat_count.max(1)).max(1);
  for part in compressed.chunks(per_chunk) {
    push_chunk(&mut out, b"IDAT", part);
  }
  push_chunk(&mut out, b"IEND", &[]);
  out
}

fn gradient(width: u32, height: u32, bpp: usize) -> Vec<u8> {
  let mut out = Vec::new();
  for y in 0..height {
    for x in 0..width {
      for c in 0..bpp {
        out.push((x * 37 + y * 11 + c as u32 * 101) as u8 ^ (x * y) as u8);
      }
    }
  }
  out
}

#[test]
fn test_end_to_end_2x2_rgb() {
  let raw = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120];
  let png = encode_png(2, 2, 2, &raw, &[0], 1);
  let bitmap = decode_png(&png).unwrap();
  assert_eq!((bitmap.width, bitmap.height), (2, 2));
  assert_eq!(
    bitmap.pixels,
    [
      RGBA8888::opaque(10, 20, 30),
      RGBA8888::opaque(40, 50, 60),
      RGBA8888::opaque(70, 80, 90),
      RGBA8888::opaque(100, 110, 120),
    ]
  );
}

#[test]
fn test_round_trip_no_filter() {
  let (width, height) = (13, 7);
  let raw = gradient(width, height, 3);
  let bitmap = decode_png(&encode_png(width, height, 2, &raw, &[0], 3)).unwrap();
  let expected: Vec<u8> =
    raw.chunks_exact(3).flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255]).collect();
  assert_eq!(bitmap.as_bytes(), &expected[..]);
}

#[test]
fn test_round_trip_every_filter_rgb_and_rgba() {
  let (width, height) = (9, 10);
  for (color_type, bpp) in [(2, 3), (6, 4)] {
    let raw = gradient(width, height, bpp);
    let png = encode_png(width, height, color_type, &raw, &[0, 1, 2, 3, 4], 2);
    let bitmap = decode_png(&png).unwrap();
    for (i, pixel) in bitmap.pixels.iter().enumerate() {
      let sample = &raw[i * bpp..];
      // alpha isn't carried over, the output is always opaque
      assert_eq!(*pixel, RGBA8888::opaque(sample[0], sample[1], sample[2]), "pixel {i}");
    }
  }
}

#[test]
fn test_random_pixels_round_trip() {
  let (width, height) = (31, 17);
  let raw = super::rand_bytes((width * height * 3) as usize);
  for filter in 0..=4 {
    let bitmap = decode_png(&encode_png(width, height, 2, &raw, &[filter], 1)).unwrap();
    for (pixel, rgb) in bitmap.pixels.iter().zip(raw.chunks_exact(3)) {
      assert_eq!([pixel.r, pixel.g, pixel.b, pixel.a], [rgb[0], rgb[1], rgb[2], 255]);
    }
  }
}

#[test]
fn test_corrupt_zlib_is_decompression_error() {
  let raw = gradient(4, 4, 3);
  let png = encode_png(4, 4, 2, &raw, &[1], 1);
  // the IDAT data starts after the signature, IHDR, and sRGB chunks
  let idat_data_start = 8 + 25 + 13 + 8;
  let mut bad = png.clone();
  bad[idat_data_start] = 0xFF;
  bad[idat_data_start + 1] = 0xFF;
  let err = decode_png(&bad).unwrap_err();
  assert_eq!(err, PngError::IdatDecompressionFailed);
  assert_eq!(err.kind(), PngErrorKind::Decompression);
}

#[test]
fn test_inflater_output_limit() {
  let raw = gradient(8, 8, 3);
  let png = encode_png(8, 8, 2, &raw, &[0], 1);
  let tiny = MinizInflater { max_output: 10 };
  assert_eq!(
    decode_png_with(&png, &PngDecodeOptions::default(), &tiny),
    Err(PngError::IdatDecompressionFailed)
  );
}

#[test]
fn test_oversized_idat_stops_at_image_size() {
  // a 1x1 RGB image only uses 4 bytes of image data, but this IDAT inflates
  // to 4 MiB of zeroes.
  let mut ihdr = Vec::new();
  ihdr.extend_from_slice(&1_u32.to_be_bytes());
  ihdr.extend_from_slice(&1_u32.to_be_bytes());
  ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
  let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&vec![0; 4 << 20], 6);
  let mut png = SIGNATURE.to_vec();
  push_chunk(&mut png, b"IHDR", &ihdr);
  push_chunk(&mut png, b"IDAT", &compressed);
  push_chunk(&mut png, b"IEND", &[]);
  assert!(png.len() < 64 * 1024);

  let asked_for = std::cell::Cell::new(0);
  let inflated = std::cell::Cell::new(0);
  let spy = |bytes: &[u8], needed: usize| -> Result<Vec<u8>, PngError> {
    asked_for.set(needed);
    let out = MinizInflater::default().inflate(bytes, needed)?;
    inflated.set(out.len());
    Ok(out)
  };
  let bitmap = decode_png_with(&png, &PngDecodeOptions::default(), &spy).unwrap();
  assert_eq!(asked_for.get(), 4);
  assert_eq!(inflated.get(), 4);
  assert_eq!(bitmap.pixels, vec![RGBA8888::opaque(0, 0, 0)]);

  assert_eq!(decode_png(&png).unwrap().pixels, vec![RGBA8888::opaque(0, 0, 0)]);
}

#[test]
fn test_miniz_inflater_cuts_off_at_needed() {
  let data: Vec<u8> = (0..5000_u32).map(|i| (i * 7) as u8).collect();
  let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&data, 6);
  let inflater = MinizInflater::default();
  assert_eq!(inflater.inflate(&compressed, 10).unwrap(), &data[..10]);
  assert_eq!(inflater.inflate(&compressed, data.len()).unwrap(), data);
  // asking for more than is there gives what is there, and the short data
  // gets caught by the unfilter step.
  assert_eq!(inflater.inflate(&compressed, data.len() * 2).unwrap(), data);
  // the hard cap still fails when the image needs more than it allows.
  let capped = MinizInflater { max_output: 100 };
  assert_eq!(capped.inflate(&compressed, 200), Err(PngError::IdatDecompressionFailed));
  assert_eq!(capped.inflate(&compressed, 50).unwrap(), &data[..50]);
}

#[test]
fn test_chunk_events_in_order() {
  let raw = gradient(3, 3, 3);
  let png = encode_png(3, 3, 2, &raw, &[0], 2);
  let mut names: Vec<String> = Vec::new();
  let parsed = parse_png_stream_with(&png, |event| match event {
    ChunkEvent::Header(ihdr) => names.push(format!("header {}x{}", ihdr.width, ihdr.height)),
    ChunkEvent::Chunk { chunk_type, .. } => names.push(format!("{chunk_type:?}")),
    ChunkEvent::Finished { .. } => names.push("finished".to_string()),
  })
  .unwrap();
  assert_eq!(names.first().map(String::as_str), Some("header 3x3"));
  assert_eq!(names[1], "sRGB");
  assert_eq!(&names[names.len() - 2..], ["IEND", "finished"]);
  assert!(names.iter().filter(|n| *n == "IDAT").count() >= 2);
  assert_eq!(parsed.ihdr.color_type, PngColorType::RGB);
}

#[test]
fn test_PngRawChunkIter_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    for _ in PngRawChunkIter::new(&v) {
      //
    }
    assert!(decode_png(&v).is_err());
  }
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in PngRawChunkIter::new(&v) {
      //
    }
  }
}

#[test]
fn test_decode_random_data_no_panics() {
  let raw = gradient(5, 5, 3);
  let png = encode_png(5, 5, 2, &raw, &[4], 1);
  for _ in 0..50 {
    // a valid signature and header, then garbage
    let mut v = png[..33].to_vec();
    v.extend(super::rand_bytes(200));
    let _ = decode_png(&v);
    // random damage to an otherwise good image
    let mut v = png.clone();
    for (i, r) in super::rand_bytes(4).into_iter().enumerate() {
      let at = (r as usize * 7 + i * 13) % v.len();
      v[at] ^= r | 1;
    }
    let _ = decode_png(&v);
  }
}
