//! Switching the displayed document.

use super::{Session, SessionEnv};
use crate::document::DocumentId;
use crate::error::{ClientError, Result};
use crate::hooks::Hook;
use crate::options::DebugFlags;

impl Session {
	/// Displays `target`, parking the current view in the pool.
	///
	/// The view and selections come back from the pool when `target` was
	/// displayed before, so scroll position and selections survive a round
	/// trip. Switching to the document already displayed keeps the attached
	/// view as is.
	pub fn change_buffer(&mut self, target: DocumentId, env: &mut SessionEnv<'_>) -> Result<()> {
		let Some(document) = env.documents.get(target) else {
			return Err(ClientError::NoSuchDocument(target));
		};
		let document_name = document.name().to_string();

		self.close_reload_dialog_if_open();

		let current = self.view.document_id();
		self.last_document = env.documents.contains(current).then_some(current);

		if current != target {
			let (view, selections) = env.pool.borrow_or_create(document);
			let mut previous = std::mem::replace(&mut self.view, view);
			let previous_selections = std::mem::replace(&mut self.selections, selections);
			previous.set_watcher(None);
			env.pool.give_back(previous, previous_selections);
		}

		self.view.set_watcher(Some(self.id));
		self.ui.set_ui_options(&self.view.options().ui_options);
		self.view.set_dimensions(self.ui.dimensions());
		self.debug_keys = self.view.options().debug.contains(DebugFlags::KEYS);

		tracing::debug!(session = %self.name, from = %current, to = %target, view = %self.view.id(), "document switched");
		self.run_hook(env, Hook::WinDisplay, &document_name);
		self.force_redraw();
		Ok(())
	}
}
