use tracing::{debug, trace};

use crate::node::error::BuildError;
use crate::node::{Color, QuadNode, Quadrant};

/// Quadtree representation of a square binary image.
///
/// A tree starts out uninitialized and is built in one pass from a flat
/// sequence of pixel samples by `init` or `from_pixels`. If the samples
/// can't be decomposed, the tree stays uninitialized and `is_valid`
/// reports false; no partially built tree is ever kept.
#[derive(Clone, Debug, Default)]
pub struct QuadTree {
	root: QuadNode,
}

impl QuadTree {
	/// Creates an uninitialized tree.
	pub fn new() -> Self {
		Default::default()
	}

	/// Wraps an existing node (and everything below it) as a tree.
	pub fn from_root(root: QuadNode) -> Self {
		QuadTree { root }
	}

	/// Builds the quadtree of a binary image.
	///
	/// `pixels` is the flattened image, row by row, with set samples being
	/// black and cleared samples white. Which end of the image comes first
	/// is up to the caller as long as it is consistent; the first rows are
	/// treated as the upper half.
	pub fn from_pixels(pixels: &[bool], side_length: usize) -> Result<Self, BuildError> {
		let mut tree = QuadTree::new();
		tree.init(pixels, side_length)?;
		Ok(tree)
	}

	/// (Re)builds this tree from pixel samples; see `from_pixels`.
	///
	/// On error the tree is left uninitialized.
	pub fn init(&mut self, pixels: &[bool], side_length: usize) -> Result<(), BuildError> {
		self.root = QuadNode::Uninitialized;
		if let Err(e) = check_shape(pixels.len(), side_length) {
			debug!(len = pixels.len(), side_length, error = %e, "rejected pixel data");
			return Err(e);
		}
		let rows = parse_rows(pixels, side_length);
		let root = build_node(&rows, 0, 0, side_length)?;
		debug!(
			side_length,
			nodes = root.node_count(),
			leaves = root.leaf_count(),
			"built quadtree"
		);
		self.root = root;
		Ok(())
	}

	/// The root node; uninitialized if the tree was never built.
	pub fn root(&self) -> &QuadNode {
		&self.root
	}

	/// Takes the root node out of the tree.
	pub fn into_root(self) -> QuadNode {
		self.root
	}

	/// Side length of the whole image; 0 if uninitialized.
	pub fn side_length(&self) -> usize {
		self.root.side_length()
	}

	/// Returns true iff the root and every subtree below it are valid.
	pub fn is_valid(&self) -> bool {
		subtree_is_valid(&self.root)
	}

	/// Number of levels below the root; 0 for a single leaf.
	pub fn depth(&self) -> usize {
		self.root.depth()
	}

	/// Number of leaves, i.e. homogeneous regions, in the tree.
	pub fn leaf_count(&self) -> usize {
		self.root.leaf_count()
	}

	/// Number of nodes in the tree; 0 if uninitialized.
	pub fn node_count(&self) -> usize {
		self.root.node_count()
	}
}

/// Two trees are equal if neither was initialized, or if both are valid and
/// every pair of corresponding subtrees has matching side lengths and
/// colors. A leaf never equals a branch.
impl PartialEq for QuadTree {
	fn eq(&self, other: &Self) -> bool {
		subtree_eq(&self.root, &other.root)
	}
}

/// Validity of the subtree rooted at `node`, with each child checked again
/// as a tree of its own.
fn subtree_is_valid(node: &QuadNode) -> bool {
	if !node.is_valid() {
		return false;
	}
	node.children()
		.map(|sects| sects.iter().all(subtree_is_valid))
		.unwrap_or(true)
}

fn subtree_eq(a: &QuadNode, b: &QuadNode) -> bool {
	// If either tree is uninitialized, they are only equal if both are
	if !a.is_initialized() || !b.is_initialized() {
		return a.is_initialized() == b.is_initialized();
	}
	if !subtree_is_valid(a) || !subtree_is_valid(b) {
		return false;
	}
	if a.side_length() != b.side_length() || a.color() != b.color() {
		return false;
	}
	match (a.children(), b.children()) {
		(None, None) => true,
		(Some(sa), Some(sb)) => Quadrant::ALL.iter()
			.all(|q| subtree_eq(&sa[q.index()], &sb[q.index()])),
		_ => false,
	}
}

/// Rejects pixel counts and side lengths that can't be recursively halved
/// down to single pixels.
fn check_shape(len: usize, side_length: usize) -> Result<(), BuildError> {
	if len == 0 {
		return Err(BuildError::Empty);
	}
	let root = integer_sqrt(len);
	if root * root != len {
		return Err(BuildError::NonSquare { len });
	}
	if side_length != root {
		return Err(BuildError::LengthMismatch { len, side_length });
	}
	if !side_length.is_power_of_two() {
		return Err(BuildError::NonPowerOfTwo(side_length));
	}
	Ok(())
}

fn integer_sqrt(n: usize) -> usize {
	let mut root = (n as f64).sqrt() as usize;
	// Correct for floating point rounding on large inputs
	while root.checked_mul(root).map_or(true, |sq| sq > n) {
		root -= 1;
	}
	while (root + 1).checked_mul(root + 1).map_or(false, |sq| sq <= n) {
		root += 1;
	}
	root
}

/// Splits flat pixel data into rows of `side_length` samples.
fn parse_rows(pixels: &[bool], side_length: usize) -> Vec<&[bool]> {
	pixels.chunks_exact(side_length).collect()
}

/// Makes a node for the square block of `side_length` samples starting at
/// `(x_off, y_off)`: a leaf of its color if the block is homogeneous, a
/// `Mixed` node otherwise.
fn make_node(rows: &[&[bool]], x_off: usize, y_off: usize, side_length: usize) -> QuadNode {
	let first = rows[y_off][x_off];
	let homogeneous = rows[y_off..y_off + side_length].iter()
		.all(|row| row[x_off..x_off + side_length].iter().all(|&s| s == first));
	if homogeneous {
		QuadNode::new(side_length, Color::from_sample(first))
	} else {
		QuadNode::new(side_length, Color::Mixed)
	}
}

/// Builds the node for a block and, if it is mixed, all of its quadrants.
///
/// Recursion stops at homogeneous blocks; a single sample always is one.
fn build_node(
	rows: &[&[bool]],
	x_off: usize,
	y_off: usize,
	side_length: usize
) -> Result<QuadNode, BuildError> {
	let mut node = make_node(rows, x_off, y_off, side_length);
	if node.color() == Color::Mixed {
		trace!(x_off, y_off, side_length, "subdividing mixed block");
		let half = side_length / 2;
		let mut sections = Vec::with_capacity(4);
		for quadrant in Quadrant::ALL.iter() {
			let (col, row) = quadrant.offset();
			sections.push(build_node(rows, x_off + col * half, y_off + row * half, half)?);
		}
		node.set_children(sections)?;
	}
	Ok(node)
}

#[cfg(test)]
mod tests {
	use super::*;

	const B: bool = true;
	const W: bool = false;

	#[test]
	fn uninitialized_tree_is_invalid() {
		let tree = QuadTree::new();
		assert!(!tree.is_valid());
		assert_eq!(tree.side_length(), 0);
		assert_eq!(tree, QuadTree::default());
	}

	#[test]
	fn shape_errors() {
		assert_eq!(QuadTree::from_pixels(&[], 0).unwrap_err(), BuildError::Empty);
		assert_eq!(
			QuadTree::from_pixels(&[W; 3], 2).unwrap_err(),
			BuildError::NonSquare { len: 3 }
		);
		assert_eq!(
			QuadTree::from_pixels(&[W; 16], 2).unwrap_err(),
			BuildError::LengthMismatch { len: 16, side_length: 2 }
		);
		assert_eq!(
			QuadTree::from_pixels(&[W; 9], 3).unwrap_err(),
			BuildError::NonPowerOfTwo(3)
		);
	}

	#[test]
	fn failed_init_resets_tree() {
		let mut tree = QuadTree::from_pixels(&[B; 4], 2).unwrap();
		assert!(tree.is_valid());
		assert!(tree.init(&[B; 5], 2).is_err());
		assert!(!tree.is_valid());
		assert!(!tree.root().is_initialized());
	}

	#[test]
	fn single_pixel() {
		for &sample in &[B, W] {
			let tree = QuadTree::from_pixels(&[sample], 1).unwrap();
			assert!(tree.is_valid());
			assert!(tree.root().is_leaf());
			assert_eq!(tree.side_length(), 1);
			assert_eq!(tree.root().color(), Color::from_sample(sample));
		}
	}

	#[test]
	fn decomposes_mixed_image() {
		#[rustfmt::skip]
		let pixels = [
			W, W, B, W,
			W, W, W, B,
			B, B, B, B,
			W, W, B, B,
		];
		let tree = QuadTree::from_pixels(&pixels, 4).unwrap();
		assert!(tree.is_valid());
		assert_eq!(tree.depth(), 2);
		let root = tree.root();
		assert_eq!(root.color(), Color::Mixed);

		let q2 = root.child(Quadrant::Q2).unwrap();
		assert!(q2.is_leaf());
		assert_eq!((q2.side_length(), q2.color()), (2, Color::White));
		let q4 = root.child(Quadrant::Q4).unwrap();
		assert!(q4.is_leaf());
		assert_eq!((q4.side_length(), q4.color()), (2, Color::Black));

		let colors = |q| root.child(q).unwrap()
			.children().unwrap()
			.iter()
			.map(|n| { assert_eq!(n.side_length(), 1); n.color() })
			.collect::<Vec<_>>();
		assert_eq!(root.child(Quadrant::Q1).unwrap().color(), Color::Mixed);
		assert_eq!(colors(Quadrant::Q1), vec![Color::White, Color::Black, Color::White, Color::Black]);
		assert_eq!(root.child(Quadrant::Q3).unwrap().color(), Color::Mixed);
		assert_eq!(colors(Quadrant::Q3), vec![Color::Black, Color::Black, Color::White, Color::White]);
	}

	#[test]
	fn leaf_never_equals_branch() {
		let mut branch = QuadNode::new(2, Color::Black);
		branch.set_children((0..4).map(|_| QuadNode::new(1, Color::Black))).unwrap();
		let leaf = QuadTree::from_pixels(&[B; 4], 2).unwrap();
		assert_ne!(leaf, QuadTree::from_root(branch));
		assert_ne!(leaf, QuadTree::new());
		assert_eq!(leaf.clone().into_root(), QuadNode::new(2, Color::Black));
	}

	#[test]
	fn integer_sqrt_is_exact() {
		assert_eq!(integer_sqrt(1), 1);
		assert_eq!(integer_sqrt(15), 3);
		assert_eq!(integer_sqrt(16), 4);
		assert_eq!(integer_sqrt(1 << 40), 1 << 20);
	}
}
