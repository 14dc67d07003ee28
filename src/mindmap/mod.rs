//! Mindmap construction: flat node/edge graph, nested tree, markdown outline.

pub mod build;
pub mod graph;
pub mod id;

pub use build::{build_mindmap, StatusMeanings};
pub use graph::{Edge, NestedNode, Node};
