use crate::consts::DEFAULT_DOCUMENT_NAME;
use crate::layers::Group;

use log::{debug, trace};
use std::collections::VecDeque;

/// How many snapshots a [`Document`] keeps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryLimit {
	#[default]
	Unbounded,
	/// Drops the oldest snapshots once more than this many are stored. Values below one are treated as one.
	MaxSnapshots(usize),
}

/// A linear undo history of root group snapshots with a cursor pointing at the current root.
///
/// Consecutive snapshots share every subtree that was not edited between them, so keeping the history costs roughly one
/// root-to-leaf spine per commit.
#[derive(Debug, Clone)]
pub struct Document {
	pub name: String,
	history: VecDeque<Group>,
	root_index: usize,
	history_limit: HistoryLimit,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates a document whose history holds a single empty group.
	pub fn new() -> Self {
		Self::with_root(Group::new())
	}

	pub fn with_root(root: Group) -> Self {
		Self {
			name: DEFAULT_DOCUMENT_NAME.to_string(),
			history: VecDeque::from([root]),
			root_index: 0,
			history_limit: HistoryLimit::default(),
		}
	}

	pub fn root(&self) -> &Group {
		&self.history[self.root_index]
	}

	pub fn root_index(&self) -> usize {
		self.root_index
	}

	pub fn history(&self) -> &VecDeque<Group> {
		&self.history
	}

	pub fn history_limit(&self) -> HistoryLimit {
		self.history_limit
	}

	pub fn set_history_limit(&mut self, history_limit: HistoryLimit) {
		self.history_limit = history_limit;
		self.enforce_history_limit();
	}

	pub fn can_undo(&self) -> bool {
		self.root_index > 0
	}

	pub fn can_redo(&self) -> bool {
		self.root_index + 1 < self.history.len()
	}

	/// Makes `root` the current snapshot. Anything that was undone before is discarded and can no longer be redone.
	pub fn commit(&mut self, root: Group) {
		if self.can_redo() {
			debug!("Discarding {} undone snapshot(s) of '{}'", self.history.len() - self.root_index - 1, self.name);
			self.history.truncate(self.root_index + 1);
		}

		self.history.push_back(root);
		self.root_index += 1;
		self.enforce_history_limit();

		debug!("Committed snapshot {} of '{}' with {} top level item(s)", self.root_index, self.name, self.root().len());
	}

	/// Steps the cursor back. Returns false when already at the oldest snapshot.
	pub fn undo(&mut self) -> bool {
		if !self.can_undo() {
			trace!("Nothing to undo in '{}'", self.name);
			return false;
		}
		self.root_index -= 1;
		trace!("Undo in '{}', now at snapshot {}", self.name, self.root_index);
		true
	}

	/// Steps the cursor forward. Returns false when already at the newest snapshot.
	pub fn redo(&mut self) -> bool {
		if !self.can_redo() {
			trace!("Nothing to redo in '{}'", self.name);
			return false;
		}
		self.root_index += 1;
		trace!("Redo in '{}', now at snapshot {}", self.name, self.root_index);
		true
	}

	fn enforce_history_limit(&mut self) {
		let HistoryLimit::MaxSnapshots(max_snapshots) = self.history_limit else { return };
		let max_snapshots = max_snapshots.max(1);

		while self.history.len() > max_snapshots && self.root_index > 0 {
			self.history.pop_front();
			self.root_index -= 1;
		}
		// The cursor is at the front now, so any excess lies in the redo branch
		self.history.truncate(max_snapshots);
	}
}
