use super::layer_info::{DescendantsIter, Item};
use super::metadata::ItemMetadata;
use crate::bounds::Bounds;
use crate::error::DocumentError;
use crate::id::ElementId;

use log::warn;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Position of an item within its parent, paired with the item itself.
pub type LookupEntry = (usize, Item);

/// An ordered container of child items with an id index on the side.
///
/// For every position `i`, `item_lookup[items[i].id()]` is `(i, items[i])` and the lookup holds no other ids. Every
/// method returns a new group and leaves `self` untouched; children are shared with the new group by reference.
///
/// Paths are slices of ids relative to this group. The last id names the target and every earlier id names a group to
/// descend into.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
	id: ElementId,
	bounds: Bounds,
	metadata: Option<ItemMetadata>,
	items: Vec<Item>,
	item_lookup: BTreeMap<ElementId, LookupEntry>,
}

impl Default for Group {
	fn default() -> Self {
		Self::new()
	}
}

impl Group {
	pub fn new() -> Self {
		Self::new_with_id(ElementId::new())
	}

	pub fn new_with_id(id: ElementId) -> Self {
		Self {
			id,
			bounds: Bounds::NONE,
			metadata: None,
			items: Vec::new(),
			item_lookup: BTreeMap::new(),
		}
	}

	pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, DocumentError> {
		Self::new().add_items(items)
	}

	pub fn id(&self) -> ElementId {
		self.id
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn metadata(&self) -> Option<&ItemMetadata> {
		self.metadata.as_ref()
	}

	pub fn items(&self) -> &[Item] {
		&self.items
	}

	pub fn item_lookup(&self) -> &BTreeMap<ElementId, LookupEntry> {
		&self.item_lookup
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn contains(&self, id: ElementId) -> bool {
		self.item_lookup.contains_key(&id)
	}

	pub fn descendants(&self) -> DescendantsIter<'_> {
		DescendantsIter::new(self)
	}

	// ===================
	// Reads at this level
	// ===================

	pub fn get_by_id(&self, id: ElementId) -> Option<&Item> {
		self.item_lookup.get(&id).map(|(_, item)| item)
	}

	pub fn get_by_id_with_index(&self, id: ElementId) -> Option<(usize, &Item)> {
		self.item_lookup.get(&id).map(|(index, item)| (*index, item))
	}

	pub fn get_by_index(&self, index: usize) -> Option<&Item> {
		self.items.get(index)
	}

	pub fn index_of(&self, id: ElementId) -> Option<usize> {
		self.item_lookup.get(&id).map(|(index, _)| *index)
	}

	// ==============
	// Reads by path
	// ==============

	/// Walks down the path and returns the group it ends at. The empty path is this group.
	pub fn group_at_path(&self, path: &[ElementId]) -> Result<&Group, DocumentError> {
		let mut group = self;
		for (depth, id) in path.iter().enumerate() {
			let item = group.get_by_id(*id).ok_or_else(|| DocumentError::ItemNotFound(path[..=depth].to_vec()))?;
			group = item.as_group().ok_or_else(|| DocumentError::NotAGroup(path[..=depth].to_vec()))?;
		}
		Ok(group)
	}

	pub fn get_by_path(&self, path: &[ElementId]) -> Result<&Item, DocumentError> {
		self.get_by_path_with_index(path).map(|(_, item)| item)
	}

	/// Returns the target item along with its position inside its parent group.
	pub fn get_by_path_with_index(&self, path: &[ElementId]) -> Result<(usize, &Item), DocumentError> {
		let (parent_path, id) = split_path(path)?;
		self.group_at_path(parent_path)?.get_by_id_with_index(id).ok_or_else(|| DocumentError::ItemNotFound(path.to_vec()))
	}

	// ====================
	// Writes at this level
	// ====================

	pub fn add_item(&self, item: Item) -> Result<Self, DocumentError> {
		self.add_items([item])
	}

	/// Appends items in order. No existing item changes position.
	pub fn add_items(&self, new_items: impl IntoIterator<Item = Item>) -> Result<Self, DocumentError> {
		let mut items = self.items.clone();
		let mut item_lookup = self.item_lookup.clone();

		for item in new_items {
			if item_lookup.contains_key(&item.id()) {
				return Err(DocumentError::DuplicateId(item.id()));
			}
			item_lookup.insert(item.id(), (items.len(), item.clone()));
			items.push(item);
		}

		Ok(self.rebuilt(items, item_lookup, None))
	}

	/// Inserts before `index`, shifting every later item back by one. `index == len` appends.
	pub fn insert_item(&self, index: usize, item: Item) -> Result<Self, DocumentError> {
		if index > self.items.len() {
			return Err(DocumentError::IndexOutOfBounds { index, len: self.items.len() });
		}
		if self.contains(item.id()) {
			return Err(DocumentError::DuplicateId(item.id()));
		}

		let mut items = self.items.clone();
		items.insert(index, item);
		let mut item_lookup = self.item_lookup.clone();
		reindex(&mut item_lookup, &items, index..items.len());

		Ok(self.rebuilt(items, item_lookup, None))
	}

	/// Removes the item with the given id. An absent id is not an error and yields an unchanged copy.
	#[must_use]
	pub fn remove_item(&self, id: ElementId) -> Self {
		let Some(index) = self.index_of(id) else { return self.clone() };

		let mut items = self.items.clone();
		items.remove(index);
		let mut item_lookup = self.item_lookup.clone();
		item_lookup.remove(&id);
		reindex(&mut item_lookup, &items, index..items.len());

		self.rebuilt(items, item_lookup, None)
	}

	/// Replaces the item at `index`. If the replacement has a different id, the old id leaves the lookup.
	///
	/// The bounds are kept when the replacement has exactly the same bounds as the item it replaces.
	pub fn set_item(&self, index: usize, item: Item) -> Result<Self, DocumentError> {
		let old_item = self.items.get(index).ok_or(DocumentError::IndexOutOfBounds { index, len: self.items.len() })?;

		let mut item_lookup = self.item_lookup.clone();
		if item.id() != old_item.id() {
			if item_lookup.contains_key(&item.id()) {
				return Err(DocumentError::DuplicateId(item.id()));
			}
			item_lookup.remove(&old_item.id());
		}
		let bounds = (item.bounds() == old_item.bounds()).then_some(self.bounds);

		item_lookup.insert(item.id(), (index, item.clone()));
		let mut items = self.items.clone();
		items[index] = item;

		Ok(self.rebuilt(items, item_lookup, bounds))
	}

	pub fn set_item_by_id(&self, id: ElementId, item: Item) -> Result<Self, DocumentError> {
		let index = self.index_of(id).ok_or_else(|| DocumentError::ItemNotFound(vec![id]))?;
		self.set_item(index, item)
	}

	/// Moves the item at `old_index` to the insertion slot `new_index`, counted before the item is taken out.
	///
	/// So `new_index` ranges over `0..=len`, and moving an item forward lands it at `new_index - 1`. Reordering never
	/// changes the bounds.
	pub fn reorder_item(&self, old_index: usize, new_index: usize) -> Result<Self, DocumentError> {
		let len = self.items.len();
		if old_index >= len {
			return Err(DocumentError::IndexOutOfBounds { index: old_index, len });
		}
		if new_index > len {
			return Err(DocumentError::IndexOutOfBounds { index: new_index, len });
		}

		let destination = if new_index > old_index { new_index - 1 } else { new_index };
		if destination == old_index {
			return Ok(self.clone());
		}

		let mut items = self.items.clone();
		let item = items.remove(old_index);
		items.insert(destination, item);
		let mut item_lookup = self.item_lookup.clone();
		reindex(&mut item_lookup, &items, old_index.min(destination)..old_index.max(destination) + 1);

		Ok(self.rebuilt(items, item_lookup, Some(self.bounds)))
	}

	/// Exchanges two items. Swapping an item with itself yields an unchanged copy.
	pub fn swap_item(&self, a: usize, b: usize) -> Result<Self, DocumentError> {
		let len = self.items.len();
		for index in [a, b] {
			if index >= len {
				return Err(DocumentError::IndexOutOfBounds { index, len });
			}
		}
		if a == b {
			return Ok(self.clone());
		}

		let mut items = self.items.clone();
		items.swap(a, b);
		let mut item_lookup = self.item_lookup.clone();
		reindex(&mut item_lookup, &items, [a, b]);

		Ok(self.rebuilt(items, item_lookup, Some(self.bounds)))
	}

	/// Replaces every child, rebuilding the lookup and the bounds.
	pub fn with_items(&self, items: Vec<Item>) -> Result<Self, DocumentError> {
		let item_lookup = build_lookup(&items)?;
		Ok(self.rebuilt(items, item_lookup, None))
	}

	/// Replaces every child but keeps the current bounds.
	///
	/// The caller guarantees that the union of the new children's bounds is the same as before. This is not checked, so
	/// a wrong guarantee leaves a stale bounding box behind.
	pub fn with_items_assuming_same_bounds(&self, items: Vec<Item>) -> Result<Self, DocumentError> {
		let item_lookup = build_lookup(&items)?;
		Ok(self.rebuilt(items, item_lookup, Some(self.bounds)))
	}

	#[must_use]
	pub fn with_metadata(&self, metadata: Option<ItemMetadata>) -> Self {
		Self { metadata, ..self.clone() }
	}

	/// Copies this group under a fresh id. The children are shared and keep their ids.
	#[must_use]
	pub fn clone_with_new_id(&self) -> Self {
		self.clone_with_id(ElementId::new())
	}

	#[must_use]
	pub fn clone_with_id(&self, id: ElementId) -> Self {
		Self { id, ..self.clone() }
	}

	// ===============
	// Writes by path
	// ===============

	/// Appends an item to the group at `path`. The empty path appends to this group.
	pub fn add_at_path(&self, path: &[ElementId], item: Item) -> Result<Self, DocumentError> {
		self.edit_group_at_path(path, |group| group.add_item(item))
	}

	pub fn add_items_at_path(&self, path: &[ElementId], items: impl IntoIterator<Item = Item>) -> Result<Self, DocumentError> {
		self.edit_group_at_path(path, |group| group.add_items(items))
	}

	pub fn insert_at_path(&self, path: &[ElementId], index: usize, item: Item) -> Result<Self, DocumentError> {
		self.edit_group_at_path(path, |group| group.insert_item(index, item))
	}

	/// Removes the item at `path`. Like [`Self::remove_item`], a missing target is not an error, but every group along
	/// the way has to exist.
	pub fn remove_at_path(&self, path: &[ElementId]) -> Result<Self, DocumentError> {
		let (parent_path, id) = split_path(path)?;
		self.edit_group_at_path(parent_path, |group| Ok(group.remove_item(id)))
	}

	pub fn set_at_path(&self, path: &[ElementId], item: Item) -> Result<Self, DocumentError> {
		let (parent_path, id) = split_path(path)?;
		self.edit_group_at_path(parent_path, |group| {
			let index = group.index_of(id).ok_or_else(|| DocumentError::ItemNotFound(path.to_vec()))?;
			group.set_item(index, item)
		})
	}

	pub fn reorder_at_path(&self, path: &[ElementId], old_index: usize, new_index: usize) -> Result<Self, DocumentError> {
		self.edit_group_at_path(path, |group| group.reorder_item(old_index, new_index))
	}

	/// Swaps two siblings. Both paths must be non-empty and differ only in their last id.
	pub fn swap_paths(&self, a: &[ElementId], b: &[ElementId]) -> Result<Self, DocumentError> {
		let (parent_path, id_a, id_b) = match (a.split_last(), b.split_last()) {
			(Some((id_a, parent_a)), Some((id_b, parent_b))) if parent_a == parent_b => (parent_a, *id_a, *id_b),
			_ => return Err(DocumentError::MismatchedPaths),
		};

		self.edit_group_at_path(parent_path, |group| {
			let index_a = group.index_of(id_a).ok_or_else(|| DocumentError::ItemNotFound(a.to_vec()))?;
			let index_b = group.index_of(id_b).ok_or_else(|| DocumentError::ItemNotFound(b.to_vec()))?;
			group.swap_item(index_a, index_b)
		})
	}

	/// Applies `edit` to the group at `path` and rebuilds every group above it. Everything off that spine is shared.
	fn edit_group_at_path<F>(&self, path: &[ElementId], edit: F) -> Result<Self, DocumentError>
	where
		F: FnOnce(&Group) -> Result<Group, DocumentError>,
	{
		self.edit_group_at_depth(path, 0, edit).inspect_err(|error| warn!("Editing the group at {path:?} failed: {error}"))
	}

	fn edit_group_at_depth<F>(&self, path: &[ElementId], depth: usize, edit: F) -> Result<Self, DocumentError>
	where
		F: FnOnce(&Group) -> Result<Group, DocumentError>,
	{
		let Some(&child_id) = path.get(depth) else { return edit(self) };

		let (index, item) = self.get_by_id_with_index(child_id).ok_or_else(|| DocumentError::ItemNotFound(path[..=depth].to_vec()))?;
		let child = item.as_group().ok_or_else(|| DocumentError::NotAGroup(path[..=depth].to_vec()))?;

		let new_child = child.edit_group_at_depth(path, depth + 1, edit)?;
		self.set_item(index, Item::Group(Arc::new(new_child)))
	}

	// =========
	// Internals
	// =========

	/// Assembles a group with the same identity and metadata. `None` bounds are recomputed from the children.
	fn rebuilt(&self, items: Vec<Item>, item_lookup: BTreeMap<ElementId, LookupEntry>, bounds: Option<Bounds>) -> Self {
		let group = Self {
			id: self.id,
			bounds: bounds.unwrap_or_else(|| Self::calc_bounds(&items)),
			metadata: self.metadata.clone(),
			items,
			item_lookup,
		};
		debug_assert!(group.check_lookup_invariant(), "Item lookup of group {} is out of sync", group.id);
		group
	}

	/// Whether every item is found in the lookup at its own position, and the lookup holds nothing else.
	pub fn check_lookup_invariant(&self) -> bool {
		self.items.len() == self.item_lookup.len()
			&& self
				.items
				.iter()
				.enumerate()
				.all(|(index, item)| self.item_lookup.get(&item.id()).is_some_and(|(stored_index, stored)| *stored_index == index && stored.ptr_eq(item)))
	}

	pub fn calc_bounds(items: &[Item]) -> Bounds {
		Bounds::union_all(items.iter().map(Item::bounds))
	}
}

fn split_path(path: &[ElementId]) -> Result<(&[ElementId], ElementId), DocumentError> {
	let (id, parent_path) = path.split_last().ok_or(DocumentError::InvalidPath)?;
	Ok((parent_path, *id))
}

fn build_lookup(items: &[Item]) -> Result<BTreeMap<ElementId, LookupEntry>, DocumentError> {
	let mut item_lookup = BTreeMap::new();
	for (index, item) in items.iter().enumerate() {
		if item_lookup.insert(item.id(), (index, item.clone())).is_some() {
			return Err(DocumentError::DuplicateId(item.id()));
		}
	}
	Ok(item_lookup)
}

/// Rewrites the lookup entries for the given positions of `items`.
fn reindex(item_lookup: &mut BTreeMap<ElementId, LookupEntry>, items: &[Item], positions: impl IntoIterator<Item = usize>) {
	for index in positions {
		let item = &items[index];
		item_lookup.insert(item.id(), (index, item.clone()));
	}
}
