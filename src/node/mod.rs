pub mod error;
pub mod image;

use std::convert::TryInto;

use error::ChildrenError;

/// Fill color of a quadrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
	Black,
	White,
	/// The quadrant is not homogeneous and had to be subdivided.
	///
	/// Only meaningful on a branch node; it is never a pixel color.
	Mixed,
}

impl Color {
	/// Maps a two-valued sample to a color. Set samples are black,
	/// cleared samples are white.
	pub fn from_sample(sample: bool) -> Self {
		if sample { Color::Black } else { Color::White }
	}
}

/// Position of a child inside its parent.
///
/// Quadrants are numbered following Cartesian conventions, starting from
/// the upper right and going counterclockwise. "Upper" refers to the rows
/// that come first in the scan order of the source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
	/// Upper right (NE).
	Q1,
	/// Upper left (NW).
	Q2,
	/// Lower left (SW).
	Q3,
	/// Lower right (SE).
	Q4,
}

impl Quadrant {
	/// All quadrants, in the order children are stored.
	pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];

	/// Index of this quadrant in a node's child array.
	pub fn index(self) -> usize {
		match self {
			Quadrant::Q1 => 0,
			Quadrant::Q2 => 1,
			Quadrant::Q3 => 2,
			Quadrant::Q4 => 3,
		}
	}

	/// `(column, row)` offset of this quadrant inside its parent, in units
	/// of the child's side length.
	pub fn offset(self) -> (usize, usize) {
		match self {
			Quadrant::Q1 => (1, 0),
			Quadrant::Q2 => (0, 0),
			Quadrant::Q3 => (0, 1),
			Quadrant::Q4 => (1, 1),
		}
	}

	/// Compass name of the quadrant.
	pub fn compass(self) -> &'static str {
		match self {
			Quadrant::Q1 => "NE",
			Quadrant::Q2 => "NW",
			Quadrant::Q3 => "SW",
			Quadrant::Q4 => "SE",
		}
	}
}

/// Node in a quadtree for storing a binary image.
///
/// An initialized node is either a leaf (no sections, and a `Black` or
/// `White` color) or a branch with exactly four sections ordered as
/// `Quadrant::ALL`. Sections are owned exclusively by their parent and
/// hold no reference back to it.
///
/// Equality is structural: side length, color and sections must match,
/// regardless of where the nodes sit in a larger tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuadNode {
	/// Placeholder state of a node that hasn't been given a size or color.
	Uninitialized,
	Initialized {
		side_length: usize,
		color: Color,
		sections: Option<Box<[QuadNode; 4]>>,
	},
}

impl Default for QuadNode {
	fn default() -> Self {
		QuadNode::Uninitialized
	}
}

impl QuadNode {
	/// Creates an initialized leaf node.
	///
	/// `side_length` is the length of this quadrant's sides in pixels.
	pub fn new(side_length: usize, color: Color) -> Self {
		QuadNode::Initialized { side_length, color, sections: None }
	}

	/// Creates a node in the uninitialized placeholder state.
	pub fn uninitialized() -> Self {
		QuadNode::Uninitialized
	}

	/// Initializes this node as if it had been created with `new`.
	///
	/// Existing sections of an already initialized node are kept.
	pub fn init(&mut self, side_length: usize, color: Color) {
		match self {
			QuadNode::Initialized { side_length: s, color: c, .. } => {
				*s = side_length;
				*c = color;
			},
			QuadNode::Uninitialized => *self = QuadNode::new(side_length, color),
		}
	}

	/// Length of this quadrant's sides in pixels; 0 if uninitialized.
	pub fn side_length(&self) -> usize {
		match self {
			QuadNode::Initialized { side_length, .. } => *side_length,
			QuadNode::Uninitialized => 0,
		}
	}

	/// Color of this quadrant; `Mixed` if uninitialized.
	///
	/// This has no pixel meaning unless the node is a leaf.
	pub fn color(&self) -> Color {
		match self {
			QuadNode::Initialized { color, .. } => *color,
			QuadNode::Uninitialized => Color::Mixed,
		}
	}

	/// Returns true iff this node has been given a size and color.
	pub fn is_initialized(&self) -> bool {
		matches!(self, QuadNode::Initialized { .. })
	}

	/// Returns true iff this node has no children.
	pub fn is_leaf(&self) -> bool {
		self.children().is_none()
	}

	/// Returns true iff this node is initialized and either is a leaf or
	/// has four valid children.
	pub fn is_valid(&self) -> bool {
		match self {
			QuadNode::Uninitialized => false,
			QuadNode::Initialized { sections: None, .. } => true,
			QuadNode::Initialized { sections: Some(sects), .. } =>
				sects.iter().all(QuadNode::is_valid),
		}
	}

	/// Read-only view of this node's children, or `None` for a leaf.
	pub fn children(&self) -> Option<&[QuadNode; 4]> {
		match self {
			QuadNode::Initialized { sections: Some(sects), .. } => Some(sects),
			_ => None,
		}
	}

	/// The child in the given quadrant, if this node is a branch.
	pub fn child(&self, quadrant: Quadrant) -> Option<&QuadNode> {
		self.children().map(|sects| &sects[quadrant.index()])
	}

	/// Installs `children` (in `Quadrant::ALL` order) as this node's
	/// sections, taking ownership of them.
	///
	/// Exactly four valid nodes must be supplied. On any failure the
	/// node's previous sections are dropped as well and it is left a leaf,
	/// so a partially populated branch is never observable.
	pub fn set_children<I>(&mut self, children: I) -> Result<(), ChildrenError>
	where
		I: IntoIterator<Item = QuadNode>,
	{
		let sections = match self {
			QuadNode::Initialized { sections, .. } => sections,
			QuadNode::Uninitialized => return Err(ChildrenError::UninitializedParent),
		};
		*sections = None;
		*sections = Some(collect_children(children)?);
		Ok(())
	}

	/// Drops all children, turning this node into a leaf.
	pub fn clear_children(&mut self) {
		if let QuadNode::Initialized { sections, .. } = self {
			*sections = None;
		}
	}

	/// Number of levels below this node; 0 for a leaf.
	pub fn depth(&self) -> usize {
		self.children()
			.map(|sects| 1 + sects.iter().map(QuadNode::depth).max().unwrap_or(0))
			.unwrap_or(0)
	}

	/// Number of leaves in the subtree rooted at this node.
	pub fn leaf_count(&self) -> usize {
		match self.children() {
			Some(sects) => sects.iter().map(QuadNode::leaf_count).sum(),
			None => if self.is_initialized() { 1 } else { 0 },
		}
	}

	/// Number of initialized nodes in the subtree rooted at this node.
	pub fn node_count(&self) -> usize {
		match self.children() {
			Some(sects) => 1 + sects.iter().map(QuadNode::node_count).sum::<usize>(),
			None => if self.is_initialized() { 1 } else { 0 },
		}
	}
}

/// Gathers exactly four valid nodes into a section array.
fn collect_children<I>(children: I) -> Result<Box<[QuadNode; 4]>, ChildrenError>
where
	I: IntoIterator<Item = QuadNode>,
{
	let mut iter = children.into_iter();
	let found = iter.by_ref().take(4).collect::<Vec<_>>();
	if iter.next().is_some() {
		return Err(ChildrenError::TooMany);
	}
	let sects: Box<[QuadNode; 4]> = found.into_boxed_slice()
		.try_into()
		.map_err(|rest: Box<[QuadNode]>| ChildrenError::Incomplete { found: rest.len() })?;
	if let Some(quadrant) = Quadrant::ALL.iter().find(|q| !sects[q.index()].is_valid()) {
		return Err(ChildrenError::InvalidChild(*quadrant));
	}
	Ok(sects)
}
