//! Input dispatch loop.

use quire_primitives::{DisplayLine, Face, Key};

use super::{KeyRoute, NextKeyHandler, Session, SessionEnv};
use crate::error::Result;
use crate::hooks::Hook;
use crate::input::InputEvent;
use crate::interpreter::InputContext;

impl Session {
	/// Handles every event queued when the call starts, in order.
	///
	/// A failing event is reported on the status line and through the
	/// `RuntimeError` hook without affecting the events after it. Returns
	/// whether anything was processed.
	pub fn process_pending_inputs(&mut self, env: &mut SessionEnv<'_>) -> bool {
		let events = self.input.take_snapshot();
		for &event in &events {
			let text = event.to_string();
			if self.debug_keys {
				env.debug.write(format!("Client '{}' got key '{}'", self.name, text));
			}
			match self.handle_event(event, env) {
				Ok(()) => self.run_hook(env, Hook::RawKey, &text),
				Err(err) => {
					let message = err.to_string();
					tracing::debug!(session = %self.name, event = %text, error = %message, "input event failed");
					self.print_status(DisplayLine::styled(message.clone(), Face::Error), false);
					self.run_hook(env, Hook::RuntimeError, &message);
				}
			}
		}
		!events.is_empty()
	}

	fn handle_event(&mut self, event: InputEvent, env: &mut SessionEnv<'_>) -> Result<()> {
		match event {
			InputEvent::FocusIn => self.run_hook(env, Hook::FocusIn, &self.name),
			InputEvent::FocusOut => self.run_hook(env, Hook::FocusOut, &self.name),
			InputEvent::Resize => {
				let dimensions = self.ui.dimensions();
				self.view.set_dimensions(dimensions);
				self.force_redraw();
			}
			InputEvent::Key(key) => self.route_key(key, env)?,
		}
		Ok(())
	}

	/// Sends `key` to the armed one-shot handler if any, the interpreter
	/// otherwise.
	fn route_key(&mut self, key: Key, env: &mut SessionEnv<'_>) -> Result<()> {
		match std::mem::take(&mut self.key_route) {
			KeyRoute::NextKey(NextKeyHandler::ReloadPrompt) => self.on_reload_key(key, env),
			KeyRoute::Normal => {
				let document = self.attached_document_mut(env.documents);
				let mut cx = InputContext {
					document,
					view: &mut *self.view,
					selections: &mut self.selections,
					session: &self.name,
				};
				self.interpreter.handle_key(key, &mut cx)?;
				Ok(())
			}
		}
	}
}
