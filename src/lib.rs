//! Quadtree decomposition of square binary images.
//!
//! Homogeneous regions of an image are stored as a single leaf, and
//! heterogeneous regions are split into four quadrants until every region
//! is homogeneous. See `QuadTree` for construction and `QuadNode` for the
//! structure of the result.

pub mod ascii;
pub mod load;
pub mod node;
pub mod tree;

pub use node::*;
pub use tree::QuadTree;
