use smallvec::{SmallVec, smallvec};

use crate::coord::BufferCoord;


/// One selected region: the fixed `anchor` end and the moving `cursor` end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
	pub anchor: BufferCoord,
	pub cursor: BufferCoord,
}

impl Selection {
	pub const fn new(anchor: BufferCoord, cursor: BufferCoord) -> Self {
		Self { anchor, cursor }
	}

	/// A single-cell selection at `coord`.
	pub const fn point(coord: BufferCoord) -> Self {
		Self::new(coord, coord)
	}

	pub fn min(&self) -> BufferCoord {
		self.anchor.min(self.cursor)
	}

	pub fn max(&self) -> BufferCoord {
		self.anchor.max(self.cursor)
	}
}

/// The selection set of a document view, with a designated main selection.
///
/// A list always holds at least one selection. The main selection drives
/// cursor placement and scrolling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionList {
	selections: SmallVec<[Selection; 1]>,
	main: usize,
}

impl Default for SelectionList {
	fn default() -> Self {
		Self::single(Selection::default())
	}
}

impl SelectionList {
	pub fn single(selection: Selection) -> Self {
		Self {
			selections: smallvec![selection],
			main: 0,
		}
	}

	/// Builds a list from `selections`, `main` indexing the main one.
	///
	/// # Panics
	///
	/// Panics if `selections` is empty or `main` is out of bounds.
	pub fn from_vec(selections: Vec<Selection>, main: usize) -> Self {
		assert!(!selections.is_empty(), "selection list cannot be empty");
		assert!(main < selections.len(), "main index ({main}) out of bounds for {} selections", selections.len());
		Self {
			selections: selections.into_iter().collect(),
			main,
		}
	}

	pub fn main(&self) -> Selection {
		self.selections[self.main]
	}

	pub fn main_index(&self) -> usize {
		self.main
	}

	pub fn set_main(&mut self, index: usize) {
		assert!(index < self.selections.len(), "main index ({index}) out of bounds for {} selections", self.selections.len());
		self.main = index;
	}

	#[allow(clippy::len_without_is_empty, reason = "a selection list is never empty")]
	pub fn len(&self) -> usize {
		self.selections.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Selection> {
		self.selections.iter()
	}

	pub fn push(&mut self, selection: Selection) {
		self.selections.push(selection);
	}

	/// Replaces every selection with the main one.
	pub fn keep_main(&mut self) {
		let main = self.main();
		self.selections = smallvec![main];
		self.main = 0;
	}

	/// Applies `f` to every selection in place.
	pub fn update(&mut self, mut f: impl FnMut(&mut Selection)) {
		for selection in &mut self.selections {
			f(selection);
		}
	}
}
