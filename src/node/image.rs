use std::convert::TryFrom;

use super::error::*;
use super::{Color, QuadNode, Quadrant};
use crate::tree::QuadTree;

/// Luma value drawn for black leaves.
pub const BLACK_LUMA: u8 = 0;
/// Luma value drawn for white leaves.
pub const WHITE_LUMA: u8 = 255;

impl QuadNode {
	/// Renders this node and everything below it into a new grayscale
	/// image of the node's own side length.
	pub fn to_image(&self) -> Result<image::GrayImage, DrawError> {
		if !self.is_initialized() {
			return Err(DrawError::Uninitialized);
		}
		let side = u32::try_from(self.side_length())
			.map_err(|_| DrawError::TooLarge(self.side_length()))?;
		let mut img = image::GrayImage::new(side, side);
		self.draw(&mut img, (0, 0))?;
		Ok(img)
	}

	/// Draws this node into `img` with its upper left corner at `start_pos`.
	///
	/// Leaves are drawn as solid squares. Branches pass the position of
	/// each quadrant down to their sections.
	pub fn draw(&self, img: &mut image::GrayImage, start_pos: (u32, u32)) -> Result<(), DrawError> {
		let size = self.side_length();
		let (x, y) = (start_pos.0 as usize, start_pos.1 as usize);
		if x + size > img.width() as usize || y + size > img.height() as usize {
			return Err(DrawError::OutOfBounds(x, y));
		}

		match self.children() {
			None => {
				let luma = match self.color() {
					_ if !self.is_initialized() => return Err(DrawError::Uninitialized),
					Color::Black => BLACK_LUMA,
					Color::White => WHITE_LUMA,
					Color::Mixed => return Err(DrawError::MixedLeaf(x, y)),
				};
				let size = size as u32;
				image::imageops::replace(
					img,
					&image::GrayImage::from_pixel(size, size, image::Luma([luma])),
					start_pos.0,
					start_pos.1,
				);
			},
			Some(_) => {
				for (section, (sx, sy)) in self.placed_sections((x, y))? {
					section.draw(img, (sx as u32, sy as u32))?;
				}
			},
		}
		Ok(())
	}

	/// Pairs each section of a branch at `pos` with its own position.
	///
	/// Every section must cover exactly one quarter of this node, otherwise
	/// `DrawError::SizeMismatch` is returned with the section's position.
	/// Leaves have no sections.
	pub(crate) fn placed_sections(
		&self,
		pos: (usize, usize)
	) -> Result<Vec<(&QuadNode, (usize, usize))>, DrawError> {
		let sects = match self.children() {
			Some(sects) => sects,
			None => return Ok(Vec::new()),
		};
		let half = self.side_length() / 2;
		Quadrant::ALL.iter()
			.map(|quadrant| {
				let (col, row) = quadrant.offset();
				let section = &sects[quadrant.index()];
				let section_pos = (pos.0 + col * half, pos.1 + row * half);
				if section.side_length() != half {
					return Err(DrawError::SizeMismatch(section_pos.0, section_pos.1));
				}
				Ok((section, section_pos))
			})
			.collect()
	}
}

impl QuadTree {
	/// Analyzes a grayscale image into a quadtree.
	///
	/// Pixels darker than `level` are treated as black, the rest as white.
	/// The image must be square, with a power of two side length.
	pub fn from_image(img: &image::GrayImage, level: u8) -> Result<Self, BuildError> {
		if img.width() != img.height() {
			return Err(BuildError::NonSquareImage { width: img.width(), height: img.height() });
		}
		let pixels = crate::load::threshold(img, level);
		QuadTree::from_pixels(&pixels, img.width() as usize)
	}
}
