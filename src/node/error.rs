use thiserror::Error;

use super::Quadrant;

/// Reason why a set of children couldn't be attached to a node.
///
/// Whenever one of these is returned, the node has been left a leaf.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ChildrenError {
	/// Fewer than four children were supplied.
	#[error("expected four children, found {found}")]
	Incomplete { found: usize },
	/// More than four children were supplied.
	#[error("expected four children, found more")]
	TooMany,
	/// A supplied child is not itself a valid node.
	#[error("child in quadrant {} is not valid", .0.compass())]
	InvalidChild(Quadrant),
	/// Children can't be attached to a node that has no size or color.
	#[error("cannot attach children to an uninitialized node")]
	UninitializedParent,
}

/// Reason why pixel data couldn't be made into a quadtree.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
	/// There are no pixels at all.
	#[error("image contains no pixels")]
	Empty,
	/// The number of pixels isn't a perfect square.
	#[error("{len} pixels cannot form a square image")]
	NonSquare { len: usize },
	/// The image buffer's dimensions are not equal.
	#[error("image is {width}x{height}, not square")]
	NonSquareImage { width: u32, height: u32 },
	/// The side length doesn't match the number of pixels.
	#[error("side length {side_length} does not match {len} pixels")]
	LengthMismatch { len: usize, side_length: usize },
	/// The side length is not a power of two.
	#[error("side length {0} is not a power of two")]
	NonPowerOfTwo(usize),
	/// A node refused its children during construction.
	#[error("malformed subdivision: {0}")]
	Children(#[from] ChildrenError),
}

/// Reason why a quadtree couldn't be rendered.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DrawError {
	/// The tree, or one of its nodes, was never initialized.
	#[error("quadtree is not initialized")]
	Uninitialized,
	/// A leaf carries `Color::Mixed`, which has no pixel color.
	#[error("leaf at ({0}, {1}) has no pixel color")]
	MixedLeaf(usize, usize),
	/// A node reaches outside of the area of its root.
	#[error("node at ({0}, {1}) lies outside the image")]
	OutOfBounds(usize, usize),
	/// A section doesn't cover exactly one quarter of its parent.
	#[error("section at ({0}, {1}) is not half the side of its parent")]
	SizeMismatch(usize, usize),
	/// The tree is too large for an image buffer.
	#[error("side length {0} is too large to draw")]
	TooLarge(usize),
}

/// Reason why an input file couldn't be turned into pixel samples.
#[derive(Debug, Error)]
pub enum LoadError {
	/// File not found or could not be read.
	#[error("could not read input: {0}")]
	Io(#[from] std::io::Error),
	/// The `image` crate could not decode the file.
	#[error("could not decode image: {0}")]
	Image(#[from] image::ImageError),
	/// A raw buffer holds fewer bits than the image needs.
	#[error("expected {needed} bits of pixel data, found {found}")]
	InsufficientData { needed: usize, found: usize },
	/// The side length of a raw buffer couldn't be inferred from its size.
	#[error("cannot infer a square side length from {0} bytes")]
	UnknownSide(usize),
	/// A raster image isn't square.
	#[error("image is {width}x{height}, not square")]
	NonSquare { width: u32, height: u32 },
	/// A side length was given that doesn't match a raster image.
	#[error("side length {given} given for a {actual}x{actual} image")]
	SideMismatch { given: usize, actual: u32 },
	/// The requested side length overflows.
	#[error("side length {0} is too large")]
	TooLarge(usize),
}
