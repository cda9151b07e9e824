use crate::consts::FIRST_ELEMENT_ID;
use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL_ID_GENERATOR: IdGenerator = IdGenerator::new();

/// Identity shared by every item, curve and node in the scene graph.
///
/// Two live values only share an id when one is a clone of the other. The "with" methods on each entity keep the id,
/// while `clone_with_new_id` hands out a fresh one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ElementId(u64);

impl ElementId {
	/// Draws the next id from the process-wide generator.
	pub fn new() -> Self {
		GLOBAL_ID_GENERATOR.next_id()
	}

	pub const fn from_raw(id: u64) -> Self {
		Self(id)
	}

	pub const fn as_raw(&self) -> u64 {
		self.0
	}
}

impl Default for ElementId {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Display for ElementId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Monotonically increasing, thread-safe id source.
///
/// The entity constructors without an explicit id use a single global generator. Tests and importers that need a
/// deterministic sequence create their own generator and pass its ids to the `new_with_id` constructors.
#[derive(Debug)]
pub struct IdGenerator {
	next: AtomicU64,
}

impl IdGenerator {
	pub const fn new() -> Self {
		Self::starting_at(FIRST_ELEMENT_ID)
	}

	pub const fn starting_at(first: u64) -> Self {
		Self { next: AtomicU64::new(first) }
	}

	pub fn next_id(&self) -> ElementId {
		ElementId(self.next.fetch_add(1, Ordering::Relaxed))
	}

	/// The id that the next call to [`Self::next_id`] will return.
	pub fn peek(&self) -> ElementId {
		ElementId(self.next.load(Ordering::Relaxed))
	}
}

impl Default for IdGenerator {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::BTreeSet;
	use std::sync::Arc;

	#[test]
	fn isolated_generators_are_deterministic() {
		let a = IdGenerator::new();
		let b = IdGenerator::new();

		assert_eq!(a.next_id(), ElementId::from_raw(FIRST_ELEMENT_ID));
		assert_eq!(a.next_id(), ElementId::from_raw(FIRST_ELEMENT_ID + 1));
		assert_eq!(b.next_id(), ElementId::from_raw(FIRST_ELEMENT_ID));
		assert_eq!(a.peek(), ElementId::from_raw(FIRST_ELEMENT_ID + 2));
	}

	#[test]
	fn starting_at() {
		let generator = IdGenerator::starting_at(100);
		assert_eq!(generator.next_id().as_raw(), 100);
		assert_eq!(generator.next_id().as_raw(), 101);
	}

	#[test]
	fn concurrent_allocation_never_collides() {
		let generator = Arc::new(IdGenerator::new());
		let handles: Vec<_> = (0..4)
			.map(|_| {
				let generator = generator.clone();
				std::thread::spawn(move || (0..1000).map(|_| generator.next_id()).collect::<Vec<_>>())
			})
			.collect();

		let mut seen = BTreeSet::new();
		for handle in handles {
			for id in handle.join().unwrap() {
				assert!(seen.insert(id), "id {id} was handed out twice");
			}
		}
		assert_eq!(seen.len(), 4000);
	}

	#[test]
	fn global_ids_are_unique() {
		let a = ElementId::new();
		let b = ElementId::new();
		assert_ne!(a, b);
	}
}
