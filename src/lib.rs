#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! A crate for decoding PNG data into RGBA8888 pixels.
//!
//! The decoder is deliberately narrow: it parses the chunk stream, inflates
//! the image data, reverses the per-scanline filters, and then assembles
//! 8-bit truecolor samples into an opaque [`Bitmap`] of [`RGBA8888`]. See the
//! [`png`] module docs for the individual stages.

extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod pixels;
pub use pixels::*;

pub mod image;
pub use image::*;

pub mod png;
