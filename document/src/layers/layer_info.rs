use super::group_layer::Group;
use super::metadata::ItemMetadata;
use super::shape_layer::Shape;
use crate::bounds::Bounds;
use crate::id::ElementId;

use glam::DVec2;
use std::sync::Arc;

/// A placeable node of the scene graph.
///
/// Children are reference counted, so cloning an item is cheap and an unedited subtree can be shared between any
/// number of document snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
	Group(Arc<Group>),
	Shape(Arc<Shape>),
}

impl From<Group> for Item {
	fn from(group: Group) -> Self {
		Self::Group(Arc::new(group))
	}
}

impl From<Shape> for Item {
	fn from(shape: Shape) -> Self {
		Self::Shape(Arc::new(shape))
	}
}

impl Item {
	pub fn id(&self) -> ElementId {
		match self {
			Item::Group(group) => group.id(),
			Item::Shape(shape) => shape.id(),
		}
	}

	pub fn bounds(&self) -> Bounds {
		match self {
			Item::Group(group) => group.bounds(),
			Item::Shape(shape) => shape.bounds(),
		}
	}

	pub fn metadata(&self) -> Option<&ItemMetadata> {
		match self {
			Item::Group(group) => group.metadata(),
			Item::Shape(shape) => shape.metadata(),
		}
	}

	pub fn name(&self) -> Option<&str> {
		self.metadata().and_then(|metadata| metadata.name.as_deref())
	}

	pub fn center(&self) -> DVec2 {
		self.bounds().center()
	}

	#[must_use]
	pub fn with_metadata(&self, metadata: Option<ItemMetadata>) -> Self {
		match self {
			Item::Group(group) => group.with_metadata(metadata).into(),
			Item::Shape(shape) => shape.with_metadata(metadata).into(),
		}
	}

	/// Copies the item under a fresh id. Children of a group keep their ids.
	#[must_use]
	pub fn clone_with_new_id(&self) -> Self {
		match self {
			Item::Group(group) => group.clone_with_new_id().into(),
			Item::Shape(shape) => shape.clone_with_new_id().into(),
		}
	}

	pub fn as_group(&self) -> Option<&Group> {
		match self {
			Item::Group(group) => Some(group.as_ref()),
			Item::Shape(_) => None,
		}
	}

	pub fn as_shape(&self) -> Option<&Shape> {
		match self {
			Item::Shape(shape) => Some(shape.as_ref()),
			Item::Group(_) => None,
		}
	}

	pub fn is_group(&self) -> bool {
		matches!(self, Item::Group(_))
	}

	pub fn is_shape(&self) -> bool {
		matches!(self, Item::Shape(_))
	}

	/// True if both items point at the same allocation, meaning the subtree is shared rather than merely equal.
	pub fn ptr_eq(&self, other: &Item) -> bool {
		match (self, other) {
			(Item::Group(a), Item::Group(b)) => Arc::ptr_eq(a, b),
			(Item::Shape(a), Item::Shape(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}
}

// ===============
// DescendantsIter
// ===============

/// Depth-first, pre-order walk over every item below a group, yielding the path of each item along with it.
#[derive(Debug, Clone)]
pub struct DescendantsIter<'a> {
	stack: Vec<(Vec<ElementId>, &'a Item)>,
}

impl<'a> DescendantsIter<'a> {
	pub(crate) fn new(group: &'a Group) -> Self {
		let mut iter = Self { stack: Vec::new() };
		iter.push_children(&[], group);
		iter
	}

	fn push_children(&mut self, parent_path: &[ElementId], group: &'a Group) {
		self.stack.extend(group.items().iter().rev().map(|item| {
			let mut path = parent_path.to_vec();
			path.push(item.id());
			(path, item)
		}));
	}
}

impl<'a> Iterator for DescendantsIter<'a> {
	type Item = (Vec<ElementId>, &'a Item);

	fn next(&mut self) -> Option<Self::Item> {
		let (path, item) = self.stack.pop()?;
		if let Item::Group(group) = item {
			self.push_children(&path, group);
		}
		Some((path, item))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn variant_accessors() {
		let shape: Item = Shape::default().into();
		let group: Item = Group::new().into();

		assert!(shape.is_shape() && shape.as_group().is_none());
		assert!(group.is_group() && group.as_shape().is_none());
		assert!(!shape.ptr_eq(&group));
		assert!(shape.ptr_eq(&shape.clone()));
	}

	#[test]
	fn metadata_edits_keep_identity() {
		let item: Item = Shape::default().into();
		let named = item.with_metadata(Some(ItemMetadata::named("Circle")));
		assert_eq!(named.id(), item.id());
		assert_eq!(named.name(), Some("Circle"));
		assert_eq!(item.name(), None);
		assert!(!named.ptr_eq(&item));

		assert_ne!(item.clone_with_new_id().id(), item.id());
	}

	#[test]
	fn descendants_are_visited_in_pre_order() {
		let a: Item = Shape::default().into();
		let b: Item = Shape::default().into();
		let c: Item = Shape::default().into();
		let inner: Item = Group::from_items([b.clone()]).unwrap().into();
		let root = Group::from_items([a.clone(), inner.clone(), c.clone()]).unwrap();

		let visited: Vec<_> = root.descendants().map(|(path, item)| (path, item.id())).collect();
		assert_eq!(
			visited,
			vec![
				(vec![a.id()], a.id()),
				(vec![inner.id()], inner.id()),
				(vec![inner.id(), b.id()], b.id()),
				(vec![c.id()], c.id()),
			]
		);
	}
}
