use crate::id::ElementId;

/// A set of different errors that can occur when editing the scene graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
	#[error("No item with path {0:?} exists")]
	ItemNotFound(Vec<ElementId>),
	#[error("The item at {0:?} is not a group")]
	NotAGroup(Vec<ElementId>),
	#[error("The path is empty")]
	InvalidPath,
	#[error("Both paths must be non-empty, have the same length and share a parent")]
	MismatchedPaths,
	#[error("Index {index} is out of bounds for a length of {len}")]
	IndexOutOfBounds { index: usize, len: usize },
	#[error("An item with id {0} is already present in this group")]
	DuplicateId(ElementId),
}
