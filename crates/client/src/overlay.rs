//! Menu and info overlay state.
//!
//! Overlays keep their document anchor plus the surface anchor it resolved to
//! when last shown, so a content redraw can tell whether an inline overlay
//! has to move.

use quire_primitives::{BufferCoord, DisplayCoord, DisplayLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuStyle {
	/// Floating, attached to the prompt.
	#[default]
	Prompt,
	/// Floating, attached to a search prompt.
	Search,
	/// Drawn next to its document anchor.
	Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InfoStyle {
	#[default]
	Prompt,
	Inline,
	InlineAbove,
	InlineBelow,
	/// Documentation for the selected menu entry.
	MenuDoc,
	/// Blocks other info requests until force-hidden.
	Modal,
}

impl InfoStyle {
	/// Styles positioned relative to a document anchor.
	pub fn is_inline(self) -> bool {
		matches!(self, InfoStyle::Inline | InfoStyle::InlineAbove | InfoStyle::InlineBelow)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
	pub items: Vec<DisplayLine>,
	pub anchor: BufferCoord,
	pub ui_anchor: DisplayCoord,
	pub style: MenuStyle,
	pub selected: Option<usize>,
}

impl Menu {
	pub fn is_visible(&self) -> bool {
		!self.items.is_empty()
	}

	pub fn is_inline(&self) -> bool {
		self.style == MenuStyle::Inline
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Info {
	pub title: String,
	pub content: String,
	pub anchor: BufferCoord,
	pub ui_anchor: DisplayCoord,
	pub style: InfoStyle,
}

impl Info {
	pub fn is_visible(&self) -> bool {
		!self.content.is_empty()
	}

	pub fn is_modal(&self) -> bool {
		self.style == InfoStyle::Modal
	}
}
