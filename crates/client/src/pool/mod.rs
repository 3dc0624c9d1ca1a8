//! Pool of detached document views.
//!
//! When a session stops displaying a document its view and selection set
//! are parked here, so switching back restores scroll position, options and
//! selections. Borrow and return are the only operations sessions perform.

use quire_primitives::SelectionList;

use crate::document::{Document, DocumentId};
use crate::view::{DocumentView, ViewFactory};


struct DetachedView {
	view: Box<dyn DocumentView>,
	selections: SelectionList,
}

pub struct ViewPool {
	free: Vec<DetachedView>,
	factory: Box<dyn ViewFactory>,
}

impl ViewPool {
	pub fn new(factory: Box<dyn ViewFactory>) -> Self {
		Self { free: Vec::new(), factory }
	}

	/// Takes the most recently returned view of `document`, or creates one
	/// with a default selection set.
	pub fn borrow_or_create(&mut self, document: &Document) -> (Box<dyn DocumentView>, SelectionList) {
		let id = document.id();
		if let Some(index) = self.free.iter().rposition(|entry| entry.view.document_id() == id) {
			let DetachedView { view, selections } = self.free.remove(index);
			tracing::trace!(view = %view.id(), doc = %id, "reusing detached view");
			return (view, selections);
		}
		(self.factory.create(document), SelectionList::default())
	}

	/// Parks a detached view with its selections.
	pub fn give_back(&mut self, view: Box<dyn DocumentView>, selections: SelectionList) {
		debug_assert!(view.watcher().is_none(), "view returned to the pool while still watched");
		tracing::trace!(view = %view.id(), doc = %view.document_id(), "view returned to pool");
		self.free.push(DetachedView { view, selections });
	}

	/// Drops every detached view of `document`, returning how many were
	/// dropped.
	pub fn discard_document(&mut self, document: DocumentId) -> usize {
		let before = self.free.len();
		self.free.retain(|entry| entry.view.document_id() != document);
		before - self.free.len()
	}

	pub fn contains(&self, document: DocumentId) -> bool {
		self.free.iter().any(|entry| entry.view.document_id() == document)
	}

	pub fn len(&self) -> usize {
		self.free.len()
	}

	pub fn is_empty(&self) -> bool {
		self.free.is_empty()
	}
}
