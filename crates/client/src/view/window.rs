use quire_primitives::{BufferCoord, DisplayBuffer, DisplayCoord, DisplayLine, Face, SelectionList};

use super::{DocumentView, ViewFactory, ViewId};
use crate::document::{Document, DocumentId};
use crate::options::SessionOptions;
use crate::session::SessionId;

/// What a window last drew, used to detect unseen changes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DrawStamp {
	version: u64,
	dimensions: DisplayCoord,
	top_line: usize,
	selections: SelectionList,
}

/// Reference [`DocumentView`]: a vertically scrolling projection of the
/// document's lines, truncated to the window width.
#[derive(Debug)]
pub struct Window {
	id: ViewId,
	document: DocumentId,
	options: SessionOptions,
	watcher: Option<SessionId>,
	dimensions: DisplayCoord,
	top_line: usize,
	last_drawn: Option<DrawStamp>,
}

impl Window {
	pub fn new(id: ViewId, document: DocumentId, options: SessionOptions) -> Self {
		Self {
			id,
			document,
			options,
			watcher: None,
			dimensions: DisplayCoord::default(),
			top_line: 0,
			last_drawn: None,
		}
	}

	/// First visible document line.
	pub fn top_line(&self) -> usize {
		self.top_line
	}

	fn rows(&self) -> usize {
		usize::from(self.dimensions.line).max(1)
	}

	/// Top line that keeps the main cursor visible.
	fn scrolled_top(&self, selections: &SelectionList) -> usize {
		let cursor = selections.main().cursor.line;
		let rows = self.rows();
		if cursor < self.top_line {
			cursor
		} else if cursor >= self.top_line + rows {
			cursor + 1 - rows
		} else {
			self.top_line
		}
	}
}

impl DocumentView for Window {
	fn id(&self) -> ViewId {
		self.id
	}

	fn document_id(&self) -> DocumentId {
		self.document
	}

	fn options(&self) -> &SessionOptions {
		&self.options
	}

	fn options_mut(&mut self) -> &mut SessionOptions {
		&mut self.options
	}

	fn watcher(&self) -> Option<SessionId> {
		self.watcher
	}

	fn set_watcher(&mut self, watcher: Option<SessionId>) {
		self.watcher = watcher;
	}

	fn dimensions(&self) -> DisplayCoord {
		self.dimensions
	}

	fn set_dimensions(&mut self, dimensions: DisplayCoord) {
		self.dimensions = dimensions;
	}

	fn needs_redraw(&self, document: &Document, selections: &SelectionList) -> bool {
		match &self.last_drawn {
			None => true,
			Some(stamp) => {
				stamp.version != document.version()
					|| stamp.dimensions != self.dimensions
					|| stamp.top_line != self.scrolled_top(selections)
					|| &stamp.selections != selections
			}
		}
	}

	fn update_display_buffer(&mut self, document: &Document, selections: &SelectionList) -> DisplayBuffer {
		self.top_line = self.scrolled_top(selections);
		let text = document.text();
		let width = usize::from(self.dimensions.column);

		let buffer = (self.top_line..self.top_line + usize::from(self.dimensions.line))
			.map(|line| {
				if line >= text.len_lines() {
					return DisplayLine::styled("~", Face::BufferPadding);
				}
				let content: String = text.line(line).chars().filter(|&c| c != '\n' && c != '\r').take(width).collect();
				DisplayLine::styled(content, Face::Default)
			})
			.collect();

		self.last_drawn = Some(DrawStamp {
			version: document.version(),
			dimensions: self.dimensions,
			top_line: self.top_line,
			selections: selections.clone(),
		});
		buffer
	}

	fn display_position(&self, coord: BufferCoord) -> Option<DisplayCoord> {
		let rows = usize::from(self.dimensions.line);
		let columns = usize::from(self.dimensions.column);
		if coord.line < self.top_line || coord.line >= self.top_line + rows || coord.column >= columns {
			return None;
		}
		let line = u16::try_from(coord.line - self.top_line).ok()?;
		let column = u16::try_from(coord.column).ok()?;
		Some(DisplayCoord::new(line, column))
	}
}

/// Creates [`Window`]s carrying a copy of the default options.
#[derive(Debug, Default)]
pub struct WindowFactory {
	defaults: SessionOptions,
	next_id: u64,
}

impl WindowFactory {
	pub fn new(defaults: SessionOptions) -> Self {
		Self { defaults, next_id: 0 }
	}
}

impl ViewFactory for WindowFactory {
	fn create(&mut self, document: &Document) -> Box<dyn DocumentView> {
		let id = ViewId(self.next_id);
		self.next_id += 1;
		tracing::trace!(view = %id, doc = %document.id(), "creating window");
		Box::new(Window::new(id, document.id(), self.defaults.clone()))
	}
}
