//! The session core: one display surface bound to one document view.
//!
//! * [`dispatch`] drains the input queue with per-event error isolation.
//! * [`redraw`] owns the dirty mask, the overlays and the mode line.
//! * [`reload`] runs the external-modification prompt.
//! * [`handoff`] switches the attached document view.

use std::fmt;

use quire_primitives::{DisplayCoord, DisplayLine, Face, SelectionList};
use rustc_hash::FxHashMap;

use crate::debug::DebugLog;
use crate::dirty::Dirty;
use crate::document::{Document, DocumentId, Documents};
use crate::hooks::{Hook, HookContext, HookSink};
use crate::input::{InputQueue, InputSender};
use crate::interpreter::InputInterpreter;
use crate::options::{DebugFlags, OptionKey};
use crate::overlay::{Info, Menu};
use crate::pool::ViewPool;
use crate::ui::UserInterface;
use crate::view::DocumentView;

mod dispatch;
mod handoff;
mod redraw;
mod reload;

pub use reload::ReloadCheck;

/// Key of a session in its manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub usize);

impl fmt::Display for SessionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "session#{}", self.0)
	}
}

/// Handler armed to consume the next key instead of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextKeyHandler {
	/// Answer to the external-modification prompt.
	ReloadPrompt,
}

/// Who receives the next key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyRoute {
	#[default]
	Normal,
	NextKey(NextKeyHandler),
}

/// Consequence of a session operation that other sessions must observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
	/// The external-modification conflict on this document was answered.
	ReloadResolved(DocumentId),
}

/// Process-wide state a session operation may touch.
pub struct SessionEnv<'a> {
	pub documents: &'a mut Documents,
	pub pool: &'a mut ViewPool,
	pub hooks: &'a mut dyn HookSink,
	pub debug: &'a mut DebugLog,
	/// Name of the server process, exposed as `%val{session}`.
	pub server_name: &'a str,
	pub effects: &'a mut Vec<SessionEffect>,
}

pub struct Session {
	id: SessionId,
	name: String,
	ui: Box<dyn UserInterface>,
	view: Box<dyn DocumentView>,
	selections: SelectionList,
	interpreter: Box<dyn InputInterpreter>,
	input: InputQueue,
	key_route: KeyRoute,
	dirty: Dirty,
	status_line: DisplayLine,
	mode_line: DisplayLine,
	menu: Menu,
	info: Info,
	env_vars: FxHashMap<String, String>,
	reload_dialog_open: bool,
	last_document: Option<DocumentId>,
	hooks_disabled: bool,
	debug_keys: bool,
}

impl Session {
	/// Attaches `view` to a new session and schedules a full redraw.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		id: SessionId,
		name: impl Into<String>,
		mut ui: Box<dyn UserInterface>,
		interpreter: Box<dyn InputInterpreter>,
		mut view: Box<dyn DocumentView>,
		selections: SelectionList,
		env_vars: FxHashMap<String, String>,
		env: &mut SessionEnv<'_>,
	) -> Self {
		let input = InputQueue::new();
		view.set_watcher(Some(id));
		view.set_dimensions(ui.dimensions());
		ui.set_ui_options(&view.options().ui_options);
		ui.set_input_sender(input.sender());
		let debug_keys = view.options().debug.contains(DebugFlags::KEYS);

		let mut session = Self {
			id,
			name: name.into(),
			ui,
			view,
			selections,
			interpreter,
			input,
			key_route: KeyRoute::Normal,
			dirty: Dirty::empty(),
			status_line: DisplayLine::new(),
			mode_line: DisplayLine::new(),
			menu: Menu::default(),
			info: Info::default(),
			env_vars,
			reload_dialog_open: false,
			last_document: None,
			hooks_disabled: false,
			debug_keys,
		};

		let document_name = session.attached_document(env.documents).name().to_string();
		session.run_hook(env, Hook::WinDisplay, &document_name);
		session.force_redraw();
		tracing::debug!(session = %session.name, doc = %session.view.document_id(), "session attached");
		session
	}

	/// Detaches the view into the pool, then drops the interpreter.
	///
	/// Selections reach the pool before the interpreter is dropped.
	pub fn teardown(self, pool: &mut ViewPool) {
		let Session {
			name,
			mut view,
			selections,
			interpreter,
			..
		} = self;
		view.set_watcher(None);
		pool.give_back(view, selections);
		drop(interpreter);
		tracing::debug!(session = %name, "session torn down");
	}

	pub fn id(&self) -> SessionId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn view(&self) -> &dyn DocumentView {
		&*self.view
	}

	pub(crate) fn view_mut(&mut self) -> &mut dyn DocumentView {
		&mut *self.view
	}

	pub fn document_id(&self) -> DocumentId {
		self.view.document_id()
	}

	pub fn selections(&self) -> &SelectionList {
		&self.selections
	}

	pub fn interpreter(&self) -> &dyn InputInterpreter {
		&*self.interpreter
	}

	/// A new sender feeding this session's input queue.
	pub fn input_sender(&self) -> InputSender {
		self.input.sender()
	}

	/// Returns and clears a pending Ctrl-C interrupt.
	pub fn take_interrupt(&self) -> bool {
		self.input.take_interrupt()
	}

	pub fn key_route(&self) -> KeyRoute {
		self.key_route
	}

	/// Flags accumulated since the last flush.
	pub fn pending_dirty(&self) -> Dirty {
		self.dirty
	}

	pub fn status_line(&self) -> &DisplayLine {
		&self.status_line
	}

	/// Mode line as of the last reconciliation.
	pub fn mode_line(&self) -> &DisplayLine {
		&self.mode_line
	}

	pub fn menu(&self) -> &Menu {
		&self.menu
	}

	pub fn info(&self) -> &Info {
		&self.info
	}

	pub fn is_reload_dialog_open(&self) -> bool {
		self.reload_dialog_open
	}

	/// Document displayed before the last switch, if it still existed then.
	pub fn last_document(&self) -> Option<DocumentId> {
		self.last_document
	}

	/// Drops `document` from the last-document slot.
	pub(crate) fn forget_document(&mut self, document: DocumentId) {
		if self.last_document == Some(document) {
			self.last_document = None;
		}
	}

	pub fn env_var(&self, name: &str) -> Option<&str> {
		self.env_vars.get(name).map(String::as_str)
	}

	pub fn hooks_disabled(&self) -> bool {
		self.hooks_disabled
	}

	pub fn set_hooks_disabled(&mut self, disabled: bool) {
		self.hooks_disabled = disabled;
	}

	pub fn dimensions(&self) -> DisplayCoord {
		self.ui.dimensions()
	}

	/// Replaces the status line. `immediate` draws and refreshes right away
	/// instead of waiting for the next reconciliation.
	pub fn print_status(&mut self, status_line: DisplayLine, immediate: bool) {
		self.status_line = status_line;
		if immediate {
			self.ui.draw_status(&self.status_line, &self.mode_line, Face::StatusLine);
			self.ui.refresh(Dirty::REFRESH | Dirty::STATUS_LINE);
		} else {
			self.dirty.insert(Dirty::STATUS_LINE);
		}
	}

	/// Reacts to a change of an option on the attached view.
	pub fn on_option_changed(&mut self, key: OptionKey) {
		match key {
			OptionKey::UiOptions => {
				self.ui.set_ui_options(&self.view.options().ui_options);
				self.dirty.insert(Dirty::DRAW);
			}
			OptionKey::Debug => {
				self.debug_keys = self.view.options().debug.contains(DebugFlags::KEYS);
			}
			OptionKey::ModelineFmt | OptionKey::Autoreload => {}
		}
	}

	/// The attached document.
	///
	/// # Panics
	///
	/// Panics if the document was removed from the universe while attached,
	/// which the manager never allows.
	pub(crate) fn attached_document<'d>(&self, documents: &'d Documents) -> &'d Document {
		let id = self.view.document_id();
		documents
			.get(id)
			.unwrap_or_else(|| panic!("session '{}' displays unregistered document {id}", self.name))
	}

	/// Mutable variant of [`attached_document`](Self::attached_document).
	pub(crate) fn attached_document_mut<'d>(&self, documents: &'d mut Documents) -> &'d mut Document {
		let id = self.view.document_id();
		documents
			.get_mut(id)
			.unwrap_or_else(|| panic!("session '{}' displays unregistered document {id}", self.name))
	}

	pub(crate) fn run_hook(&self, env: &mut SessionEnv<'_>, hook: Hook, param: &str) {
		if self.hooks_disabled {
			return;
		}
		if self.view.options().debug.contains(DebugFlags::HOOKS) {
			env.debug.write(format!("hook {hook}/{param}"));
		}
		let cx = HookContext {
			session: &self.name,
			document: self.view.document_id(),
		};
		env.hooks.run_hook(hook, param, &cx);
	}
}
