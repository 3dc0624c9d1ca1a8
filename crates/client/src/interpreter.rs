//! Input interpreter boundary.
//!
//! The interpreter turns keys into editing effects against the attached
//! view. Modal one-shot interception (prompts that must see the very next
//! key) is not part of this trait: the session owns that routing decision,
//! see [`KeyRoute`](crate::session::KeyRoute).

use quire_primitives::{DisplayCoord, DisplayLine, Key, SelectionList};

use crate::document::Document;
use crate::error::EditError;
use crate::ui::CursorMode;
use crate::view::DocumentView;

/// Everything a key may edit.
pub struct InputContext<'a> {
	pub document: &'a mut Document,
	pub view: &'a mut dyn DocumentView,
	pub selections: &'a mut SelectionList,
	/// Name of the session the key arrived on.
	pub session: &'a str,
}

pub trait InputInterpreter {
	/// Handles one key. An error aborts this key only.
	fn handle_key(&mut self, key: Key, cx: &mut InputContext<'_>) -> Result<(), EditError>;

	/// Drops any pending mode state and returns to the baseline mode.
	fn reset_normal_mode(&mut self);

	/// Mode description shown as the `mode_info` mode line atom.
	fn mode_line(&self) -> DisplayLine;

	/// Register being recorded into, if recording.
	fn recording_register(&self) -> Option<char>;

	fn is_recording(&self) -> bool {
		self.recording_register().is_some()
	}

	/// Where the text cursor should be drawn. Defaults to the main
	/// selection's cursor inside the content area.
	fn cursor_info(&self, view: &dyn DocumentView, selections: &SelectionList) -> (CursorMode, DisplayCoord) {
		let coord = view.display_position(selections.main().cursor).unwrap_or_default();
		(CursorMode::Buffer, coord)
	}
}
