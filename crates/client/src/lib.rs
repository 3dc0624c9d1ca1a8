#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Per-session editing client.
//!
//! A [`Session`] binds one display surface to one document view. It owns the
//! pending-input queue, the dirty-state mask, and the menu/info/status
//! overlays, and turns any number of logical state changes into at most one
//! physical refresh per [`Session::redraw_ifn`] call.
//!
//! # Architecture
//!
//! ```text
//! SessionManager
//! ├── sessions: Slab<Session>        // one per display surface
//! ├── documents: Documents           // document universe
//! ├── pool: ViewPool                 // detached views + selections
//! ├── hooks: Box<dyn HookSink>
//! └── debug: DebugLog                // the *debug* buffer
//! ```
//!
//! Session operations that touch process-wide state take a [`SessionEnv`]
//! borrowed from the manager. Consequences that reach other sessions (a
//! resolved reload prompt) come back as [`SessionEffect`] values which the
//! manager applies after the call.

/// User-visible diagnostic log.
pub mod debug;
/// Dirty-state flags.
pub mod dirty;
/// Reference document model and the document universe.
pub mod document;
/// Error types.
pub mod error;
/// Named hooks fired by sessions.
pub mod hooks;
/// Input events and the per-session input channel.
pub mod input;
/// Input interpreter boundary.
pub mod interpreter;
/// Process-wide session registry.
pub mod manager;
/// Mode line composition.
pub mod modeline;
/// Typed options scoped to a document view.
pub mod options;
/// Menu and info overlay state.
pub mod overlay;
/// Detached view pool.
pub mod pool;
/// The session core.
pub mod session;
/// Display surface boundary.
pub mod ui;
/// Document view boundary and the reference window.
pub mod view;

pub use debug::DebugLog;
pub use dirty::Dirty;
pub use document::{Document, DocumentFlags, DocumentId, Documents, fs_timestamp};
pub use error::{ClientError, EditError, Result};
pub use hooks::{Hook, HookContext, HookSink, TracingHooks};
pub use input::{InputEvent, InputQueue, InputSender};
pub use interpreter::{InputContext, InputInterpreter};
pub use manager::SessionManager;
pub use modeline::{ContextInfo, ModelineError};
pub use options::{Autoreload, DebugFlags, OptionKey, OptionValue, OptionsError, SessionOptions, UiOptions};
pub use overlay::{Info, InfoStyle, Menu, MenuStyle};
pub use pool::ViewPool;
pub use session::{KeyRoute, NextKeyHandler, ReloadCheck, Session, SessionEffect, SessionEnv, SessionId};
pub use ui::{CursorMode, UserInterface};
pub use view::{DocumentView, ViewFactory, ViewId, Window, WindowFactory};
