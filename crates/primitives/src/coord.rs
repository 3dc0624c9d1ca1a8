//! Coordinates in document space and on the display surface.

/// A position inside a document: zero-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BufferCoord {
	pub line: usize,
	pub column: usize,
}

impl BufferCoord {
	pub const fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}
}

/// A cell on the display surface, relative to the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayCoord {
	pub line: u16,
	pub column: u16,
}

impl DisplayCoord {
	pub const fn new(line: u16, column: u16) -> Self {
		Self { line, column }
	}
}
