//! Process-wide session registry.
//!
//! The manager owns every session together with the state they share: the
//! document universe, the pool of detached views, the hook sink and the
//! debug log. Each per-session call lends that state to the session through
//! a [`SessionEnv`] and applies the [`SessionEffect`]s it produced before
//! returning.

use quire_primitives::{DisplayLine, Face};
use rustc_hash::FxHashMap;
use slab::Slab;

use crate::debug::DebugLog;
use crate::document::{DocumentId, Documents};
use crate::error::{ClientError, Result};
use crate::hooks::HookSink;
use crate::interpreter::InputInterpreter;
use crate::options::OptionValue;
use crate::pool::ViewPool;
use crate::session::{ReloadCheck, Session, SessionEffect, SessionEnv, SessionId};
use crate::ui::UserInterface;
use crate::view::ViewFactory;

pub struct SessionManager {
	sessions: Slab<Session>,
	documents: Documents,
	pool: ViewPool,
	hooks: Box<dyn HookSink>,
	debug: DebugLog,
	server_name: String,
}

impl SessionManager {
	pub fn new(factory: Box<dyn ViewFactory>, hooks: Box<dyn HookSink>, server_name: impl Into<String>) -> Self {
		Self {
			sessions: Slab::new(),
			documents: Documents::new(),
			pool: ViewPool::new(factory),
			hooks,
			debug: DebugLog::new(),
			server_name: server_name.into(),
		}
	}

	/// Creates a session displaying `document`.
	///
	/// An empty `name` picks the first free `clientN`.
	pub fn create_session(
		&mut self,
		name: &str,
		ui: Box<dyn UserInterface>,
		interpreter: Box<dyn InputInterpreter>,
		document: DocumentId,
		env_vars: FxHashMap<String, String>,
	) -> Result<SessionId> {
		let name = if name.is_empty() {
			(0..)
				.map(|n| format!("client{n}"))
				.find(|candidate| self.find_session(candidate).is_none())
				.unwrap_or_default()
		} else if self.find_session(name).is_some() {
			return Err(ClientError::SessionNameTaken(name.to_string()));
		} else {
			name.to_string()
		};
		let Some(doc) = self.documents.get(document) else {
			return Err(ClientError::NoSuchDocument(document));
		};

		let (view, selections) = self.pool.borrow_or_create(doc);
		let entry = self.sessions.vacant_entry();
		let id = SessionId(entry.key());
		let mut effects = Vec::new();
		let mut env = SessionEnv {
			documents: &mut self.documents,
			pool: &mut self.pool,
			hooks: &mut *self.hooks,
			debug: &mut self.debug,
			server_name: &self.server_name,
			effects: &mut effects,
		};
		let session = Session::new(id, name, ui, interpreter, view, selections, env_vars, &mut env);
		tracing::info!(session = %session.name(), %id, "session created");
		entry.insert(session);
		self.apply_effects(effects);
		Ok(id)
	}

	/// Tears a session down, parking its view in the pool.
	pub fn remove_session(&mut self, id: SessionId) -> Result<()> {
		let session = self.sessions.try_remove(id.0).ok_or(ClientError::NoSuchSession(id))?;
		tracing::info!(session = %session.name(), %id, "session removed");
		session.teardown(&mut self.pool);
		Ok(())
	}

	pub fn session(&self, id: SessionId) -> Option<&Session> {
		self.sessions.get(id.0)
	}

	pub fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
		self.sessions.get_mut(id.0)
	}

	pub fn find_session(&self, name: &str) -> Option<SessionId> {
		self.sessions
			.iter()
			.find(|(_, session)| session.name() == name)
			.map(|(key, _)| SessionId(key))
	}

	pub fn sessions(&self) -> impl Iterator<Item = &Session> {
		self.sessions.iter().map(|(_, session)| session)
	}

	pub fn len(&self) -> usize {
		self.sessions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sessions.is_empty()
	}

	pub fn documents(&self) -> &Documents {
		&self.documents
	}

	pub fn documents_mut(&mut self) -> &mut Documents {
		&mut self.documents
	}

	pub fn pool(&self) -> &ViewPool {
		&self.pool
	}

	pub fn debug_log(&self) -> &DebugLog {
		&self.debug
	}

	/// Runs `f` on one session with the shared state lent to it, then
	/// applies the effects it produced.
	fn with_session<R>(&mut self, id: SessionId, f: impl FnOnce(&mut Session, &mut SessionEnv<'_>) -> R) -> Result<R> {
		let session = self.sessions.get_mut(id.0).ok_or(ClientError::NoSuchSession(id))?;
		let mut effects = Vec::new();
		let mut env = SessionEnv {
			documents: &mut self.documents,
			pool: &mut self.pool,
			hooks: &mut *self.hooks,
			debug: &mut self.debug,
			server_name: &self.server_name,
			effects: &mut effects,
		};
		let out = f(session, &mut env);
		self.apply_effects(effects);
		Ok(out)
	}

	fn apply_effects(&mut self, effects: Vec<SessionEffect>) {
		for effect in effects {
			match effect {
				SessionEffect::ReloadResolved(document) => {
					for (_, session) in self.sessions.iter_mut() {
						if session.document_id() == document && session.close_reload_dialog_if_open() {
							tracing::debug!(session = %session.name(), doc = %document, "reload prompt closed");
						}
					}
				}
			}
		}
	}

	pub fn process_pending_inputs(&mut self, id: SessionId) -> Result<bool> {
		self.with_session(id, |session, env| session.process_pending_inputs(env))
	}

	pub fn redraw(&mut self, id: SessionId) -> Result<()> {
		self.with_session(id, |session, env| session.redraw_ifn(env))
	}

	pub fn check_reload(&mut self, id: SessionId) -> Result<ReloadCheck> {
		self.with_session(id, |session, env| session.check_if_buffer_needs_reloading(env))?
	}

	pub fn change_buffer(&mut self, id: SessionId, document: DocumentId) -> Result<()> {
		self.with_session(id, |session, env| session.change_buffer(document, env))?
	}

	/// Sets an option on the view attached to session `id` and notifies
	/// the view's watcher.
	pub fn set_option(&mut self, id: SessionId, value: OptionValue) -> Result<()> {
		let session = self.sessions.get_mut(id.0).ok_or(ClientError::NoSuchSession(id))?;
		let key = session.view_mut().options_mut().apply(value);
		tracing::debug!(session = %session.name(), option = key.name(), "option changed");
		if session.view().watcher() == Some(id) {
			session.on_option_changed(key);
		}
		Ok(())
	}

	/// Removes a document from the universe along with its detached views.
	///
	/// Fails while any session displays it.
	pub fn close_document(&mut self, document: DocumentId) -> Result<()> {
		let Some(doc) = self.documents.get(document) else {
			return Err(ClientError::NoSuchDocument(document));
		};
		if let Some(session) = self.sessions().find(|session| session.document_id() == document) {
			return Err(ClientError::DocumentInUse {
				document: doc.name().to_string(),
				session: session.name().to_string(),
			});
		}

		let discarded = self.pool.discard_document(document);
		for (_, session) in self.sessions.iter_mut() {
			session.forget_document(document);
		}
		self.documents.remove(document);
		tracing::debug!(doc = %document, discarded, "document closed");
		Ok(())
	}

	/// One loop iteration: drain every session's input, check for external
	/// modifications, then reconcile every display.
	///
	/// Reload failures are shown on the affected session's status line.
	/// Returns whether any input was processed.
	pub fn run_once(&mut self) -> bool {
		let ids: Vec<SessionId> = self.sessions.iter().map(|(key, _)| SessionId(key)).collect();

		let mut processed = false;
		for &id in &ids {
			processed |= self.process_pending_inputs(id).unwrap_or(false);
		}

		for &id in &ids {
			if let Ok(Err(err)) = self.with_session(id, |session, env| session.check_if_buffer_needs_reloading(env)) {
				tracing::warn!(%id, error = %err, "reload check failed");
				if let Some(session) = self.sessions.get_mut(id.0) {
					session.print_status(DisplayLine::styled(err.to_string(), Face::Error), false);
				}
			}
		}

		for &id in &ids {
			let _ = self.redraw(id);
		}
		processed
	}
}
