//! Plain text visualization of a quadtree, one character per pixel.

use crate::node::error::DrawError;
use crate::node::{Color, QuadNode};
use crate::tree::QuadTree;

pub const BLACK: char = '#';
pub const WHITE: char = '.';

/// Renders `tree` as one line per pixel row, with `black` and `white`
/// standing for the two colors. Every line, including the last, ends in
/// a newline.
pub fn render(tree: &QuadTree, black: char, white: char) -> Result<String, DrawError> {
	let root = tree.root();
	if !root.is_initialized() {
		return Err(DrawError::Uninitialized);
	}
	let side = root.side_length();
	let mut grid = vec![vec![white; side]; side];
	fill(root, &mut grid, (0, 0), black, white)?;

	let mut out = String::with_capacity(side * (side + 1));
	for row in grid.iter() {
		out.extend(row.iter());
		out.push('\n');
	}
	Ok(out)
}

/// Renders `tree` with `BLACK` and `WHITE`.
pub fn render_default(tree: &QuadTree) -> Result<String, DrawError> {
	render(tree, BLACK, WHITE)
}

fn fill(
	node: &QuadNode,
	grid: &mut [Vec<char>],
	pos: (usize, usize),
	black: char,
	white: char
) -> Result<(), DrawError> {
	let size = node.side_length();
	let (x, y) = pos;
	if y + size > grid.len() || grid.first().map_or(0, Vec::len) < x + size {
		return Err(DrawError::OutOfBounds(x, y));
	}
	match node.children() {
		Some(_) => {
			for (section, section_pos) in node.placed_sections(pos)? {
				fill(section, grid, section_pos, black, white)?;
			}
		},
		None => {
			let c = match node.color() {
				_ if !node.is_initialized() => return Err(DrawError::Uninitialized),
				Color::Black => black,
				Color::White => white,
				Color::Mixed => return Err(DrawError::MixedLeaf(x, y)),
			};
			for row in grid[y..y + size].iter_mut() {
				for cell in row[x..x + size].iter_mut() {
					*cell = c;
				}
			}
		},
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn draws_each_pixel() {
		let pixels = [false, true, true, true];
		let tree = QuadTree::from_pixels(&pixels, 2).unwrap();
		assert_eq!(render_default(&tree).unwrap(), ".#\n##\n");
		assert_eq!(render(&tree, 'X', ' ').unwrap(), " X\nXX\n");
	}

	#[test]
	fn uninitialized_tree_has_no_drawing() {
		assert_eq!(render_default(&QuadTree::new()), Err(DrawError::Uninitialized));
	}
}
