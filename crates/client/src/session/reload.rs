//! External-modification prompt.
//!
//! When a file document changes on disk the session either reloads it right
//! away or opens a modal prompt and routes the next key to
//! [`Session::on_reload_key`]. Answering the prompt resolves the conflict for
//! every session displaying the same document.

use quire_primitives::{BufferCoord, DisplayLine, Face, Key};

use super::{KeyRoute, NextKeyHandler, Session, SessionEffect, SessionEnv};
use crate::document::{DocumentFlags, fs_timestamp};
use crate::error::Result;
use crate::options::Autoreload;
use crate::overlay::InfoStyle;

/// Outcome of [`Session::check_if_buffer_needs_reloading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadCheck {
	/// Nothing to do.
	Unchanged,
	/// A prompt is already waiting for an answer.
	Pending,
	/// A prompt was opened.
	Prompted,
	/// The document was reloaded without asking.
	Reloaded,
}

impl Session {
	/// Compares the attached document's recorded timestamp with the disk.
	///
	/// Only file documents are checked, and only when the `autoreload`
	/// option is not `no`. An unreadable timestamp counts as unchanged.
	pub fn check_if_buffer_needs_reloading(&mut self, env: &mut SessionEnv<'_>) -> Result<ReloadCheck> {
		if self.reload_dialog_open {
			return Ok(ReloadCheck::Pending);
		}

		let policy = self.view.options().autoreload;
		let document = self.attached_document(env.documents);
		if !document.flags().contains(DocumentFlags::FILE) || policy == Autoreload::No {
			return Ok(ReloadCheck::Unchanged);
		}
		let Some(path) = document.path() else {
			return Ok(ReloadCheck::Unchanged);
		};
		let Some(timestamp) = fs_timestamp(path) else {
			return Ok(ReloadCheck::Unchanged);
		};
		if document.fs_timestamp() == Some(timestamp) {
			return Ok(ReloadCheck::Unchanged);
		}

		let name = document.display_name().to_string();
		tracing::debug!(session = %self.name, doc = %document.id(), ?policy, "document modified externally");
		if policy == Autoreload::Yes {
			self.reload_buffer(env)?;
			return Ok(ReloadCheck::Reloaded);
		}

		self.info_show(
			format!("reload '{name}' ?"),
			format!("'{name}' was modified externally\npress <ret> or y to reload, <esc> or n to keep"),
			BufferCoord::default(),
			InfoStyle::Modal,
		);
		self.reload_dialog_open = true;
		self.key_route = KeyRoute::NextKey(NextKeyHandler::ReloadPrompt);
		Ok(ReloadCheck::Prompted)
	}

	/// Reloads the attached document from disk.
	fn reload_buffer(&mut self, env: &mut SessionEnv<'_>) -> Result<()> {
		let document = self.attached_document_mut(env.documents);
		document.reload()?;
		let status = format!("'{}' reloaded", document.display_name());
		self.print_status(DisplayLine::styled(status, Face::Information), false);
		Ok(())
	}

	/// Answers the reload prompt with `key`.
	///
	/// A failed reload closes this session's prompt only; the next check
	/// asks again.
	pub(super) fn on_reload_key(&mut self, key: Key, env: &mut SessionEnv<'_>) -> Result<()> {
		if key.is_char('y') || key.is_enter() {
			if let Err(err) = self.reload_buffer(env) {
				self.close_reload_dialog();
				return Err(err);
			}
		} else if key.is_char('n') || key.is_escape() {
			let document = self.attached_document_mut(env.documents);
			let timestamp = document.path().and_then(fs_timestamp);
			document.set_fs_timestamp(timestamp);
			let status = format!("'{}' kept", document.display_name());
			self.print_status(DisplayLine::styled(status, Face::Information), false);
		} else {
			self.print_status(DisplayLine::styled(format!("'{key}' is not a valid choice"), Face::Error), false);
			self.key_route = KeyRoute::NextKey(NextKeyHandler::ReloadPrompt);
			return Ok(());
		}

		self.close_reload_dialog();
		env.effects.push(SessionEffect::ReloadResolved(self.document_id()));
		Ok(())
	}

	/// Closes an open reload prompt, returning whether one was open.
	pub(crate) fn close_reload_dialog_if_open(&mut self) -> bool {
		if !self.reload_dialog_open {
			return false;
		}
		self.close_reload_dialog();
		true
	}

	fn close_reload_dialog(&mut self) {
		debug_assert!(self.reload_dialog_open, "no reload prompt to close");
		self.reload_dialog_open = false;
		self.key_route = KeyRoute::Normal;
		self.info_hide(true);
		self.interpreter.reset_normal_mode();
	}
}
