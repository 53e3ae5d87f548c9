//! # B+Tree Node Layout
//!
//! Typed views over page buffers. At this stage the tree is a single root
//! leaf; the node header nevertheless carries the type, root flag, and
//! parent pointer fields an internal node will need, so the format does not
//! change when the tree grows past one page.

mod leaf;

pub use leaf::{LeafNode, LeafNodeMut, NodeHeader, NodeType};
