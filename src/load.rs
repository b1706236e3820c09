//! Turning input files into the flat pixel samples a `QuadTree` is built from.
//!
//! Two kinds of input are understood: raw bit-packed buffers (one bit per
//! pixel, most significant bit first, rows not padded) and any raster image
//! the `image` crate can decode, which is thresholded to black and white.

use std::path::Path;

use bitvec::prelude::*;
use tracing::debug;

use crate::node::error::LoadError;

/// Default luma threshold for raster images.
pub const DEFAULT_LEVEL: u8 = 128;

/// Pixel samples of a square image, ready for `QuadTree::from_pixels`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Samples {
	pub pixels: Vec<bool>,
	pub side_length: usize,
}

/// Unpacks the first `side_length * side_length` bits of `bytes`, most
/// significant bit first. Trailing bits are ignored.
pub fn unpack_bits(bytes: &[u8], side_length: usize) -> Result<Vec<bool>, LoadError> {
	let needed = side_length.checked_mul(side_length)
		.ok_or(LoadError::TooLarge(side_length))?;
	let bits = bytes.view_bits::<Msb0>();
	if bits.len() < needed {
		return Err(LoadError::InsufficientData { needed, found: bits.len() });
	}
	Ok(bits[..needed].iter().by_vals().collect())
}

/// Infers the side length of a raw buffer.
///
/// This is the largest power of two whose square fits in the buffer's
/// bits; the buffer must be exactly as long as needed to hold that many
/// bits. Ambiguous for single byte buffers, which are read as 2x2.
pub fn side_length_for(bytes: &[u8]) -> Result<usize, LoadError> {
	let bits = bytes.len().checked_mul(8).ok_or(LoadError::UnknownSide(bytes.len()))?;
	if bits == 0 {
		return Err(LoadError::UnknownSide(0));
	}
	let mut side = 1usize;
	while let Some(next) = side.checked_mul(2) {
		match next.checked_mul(next) {
			Some(area) if area <= bits => side = next,
			_ => break,
		}
	}
	if (side * side + 7) / 8 != bytes.len() {
		return Err(LoadError::UnknownSide(bytes.len()));
	}
	Ok(side)
}

/// Converts a grayscale image to samples, row by row from the top.
///
/// Pixels darker than `level` are set (black).
pub fn threshold(img: &image::GrayImage, level: u8) -> Vec<bool> {
	img.pixels().map(|p| p.0[0] < level).collect()
}

/// Reads an input file.
///
/// Files ending in `.raw` or `.bin` are bit-packed buffers whose side
/// length is `side_length`, or inferred with `side_length_for` if that is
/// `None`. Anything else is decoded as an image and thresholded at `level`;
/// a `side_length` given for such an image must match its width.
pub fn open<Q: AsRef<Path>>(
	path: Q,
	side_length: Option<usize>,
	level: u8
) -> Result<Samples, LoadError> {
	let path = path.as_ref();
	let raw = matches!(
		path.extension().and_then(|e| e.to_str()),
		Some("raw") | Some("bin")
	);
	if raw {
		let bytes = std::fs::read(path)?;
		let side_length = match side_length {
			Some(s) => s,
			None => side_length_for(&bytes)?,
		};
		debug!(path = %path.display(), bytes = bytes.len(), side_length, "read raw image");
		Ok(Samples { pixels: unpack_bits(&bytes, side_length)?, side_length })
	} else {
		let img = image::open(path)?.to_luma8();
		if img.width() != img.height() {
			return Err(LoadError::NonSquare { width: img.width(), height: img.height() });
		}
		if let Some(given) = side_length.filter(|&s| s != img.width() as usize) {
			return Err(LoadError::SideMismatch { given, actual: img.width() });
		}
		debug!(path = %path.display(), side_length = img.width(), level, "decoded raster image");
		Ok(Samples { pixels: threshold(&img, level), side_length: img.width() as usize })
	}
}
