//! Document view boundary.
//!
//! A document view is a renderable projection of one document. Views are
//! owned by exactly one session while attached and by the
//! [`ViewPool`](crate::pool::ViewPool) otherwise.

use std::fmt;

use quire_primitives::{BufferCoord, DisplayBuffer, DisplayCoord, SelectionList};

use crate::document::{Document, DocumentId};
use crate::options::SessionOptions;
use crate::session::SessionId;

mod window;

pub use window::{Window, WindowFactory};

/// Identity of one view instance, stable across detach/attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "view#{}", self.0)
	}
}

pub trait DocumentView {
	fn id(&self) -> ViewId;

	fn document_id(&self) -> DocumentId;

	fn options(&self) -> &SessionOptions;

	fn options_mut(&mut self) -> &mut SessionOptions;

	/// Session notified of option changes, if any.
	fn watcher(&self) -> Option<SessionId>;

	fn set_watcher(&mut self, watcher: Option<SessionId>);

	fn dimensions(&self) -> DisplayCoord;

	fn set_dimensions(&mut self, dimensions: DisplayCoord);

	/// True when the document, selections or geometry changed since the
	/// last [`update_display_buffer`](Self::update_display_buffer).
	fn needs_redraw(&self, document: &Document, selections: &SelectionList) -> bool;

	/// Lays out the content and records it as seen.
	fn update_display_buffer(&mut self, document: &Document, selections: &SelectionList) -> DisplayBuffer;

	/// Surface position of `coord` under the current layout, `None` when off
	/// screen.
	fn display_position(&self, coord: BufferCoord) -> Option<DisplayCoord>;
}

/// Creates views for documents that have no detached view in the pool.
pub trait ViewFactory {
	fn create(&mut self, document: &Document) -> Box<dyn DocumentView>;
}
