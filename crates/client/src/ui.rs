//! Display surface boundary.

use quire_primitives::{DisplayBuffer, DisplayCoord, DisplayLine, Face};

use crate::dirty::Dirty;
use crate::input::InputSender;
use crate::options::UiOptions;
use crate::overlay::{InfoStyle, MenuStyle};

/// Where the text cursor lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorMode {
	/// On the prompt/status line.
	Prompt,
	/// Inside the document content.
	#[default]
	Buffer,
}

/// A display surface a session draws to.
///
/// Implementations may buffer every call until [`refresh`](Self::refresh).
/// Input flows the other way through the [`InputSender`] handed over at
/// session construction.
pub trait UserInterface {
	/// Usable content area in rows and columns.
	fn dimensions(&self) -> DisplayCoord;

	fn draw(&mut self, buffer: &DisplayBuffer, default_face: Face, padding_face: Face);

	fn draw_status(&mut self, status_line: &DisplayLine, mode_line: &DisplayLine, face: Face);

	fn menu_show(&mut self, items: &[DisplayLine], anchor: DisplayCoord, fg: Face, bg: Face, style: MenuStyle);

	fn menu_select(&mut self, selected: Option<usize>);

	fn menu_hide(&mut self);

	fn info_show(&mut self, title: &str, content: &str, anchor: DisplayCoord, face: Face, style: InfoStyle);

	fn info_hide(&mut self);

	fn set_cursor(&mut self, mode: CursorMode, coord: DisplayCoord);

	/// Flushes to the physical device. `dirty` always contains
	/// [`Dirty::REFRESH`] plus the regions touched since the last flush.
	fn refresh(&mut self, dirty: Dirty);

	fn set_ui_options(&mut self, options: &UiOptions);

	/// Installs the sender input events must be pushed into.
	fn set_input_sender(&mut self, sender: InputSender);
}
