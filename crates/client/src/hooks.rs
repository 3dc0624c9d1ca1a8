//! Named extension points fired by sessions.
//!
//! Hook handling (matching, expression evaluation) belongs to whoever
//! implements [`HookSink`]; sessions only decide when a hook fires and with
//! which parameter.

use std::fmt;

use crate::document::DocumentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
	/// A document view was attached to a session. Parameter: document name.
	WinDisplay,
	/// Parameter: session name.
	FocusIn,
	/// Parameter: session name.
	FocusOut,
	/// Fired after every processed input event. Parameter: textual event.
	RawKey,
	/// A recoverable error aborted one input event. Parameter: message.
	RuntimeError,
}

impl Hook {
	pub const fn name(self) -> &'static str {
		match self {
			Hook::WinDisplay => "WinDisplay",
			Hook::FocusIn => "FocusIn",
			Hook::FocusOut => "FocusOut",
			Hook::RawKey => "RawKey",
			Hook::RuntimeError => "RuntimeError",
		}
	}
}

impl fmt::Display for Hook {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Scope a hook runs in.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
	pub session: &'a str,
	pub document: DocumentId,
}

pub trait HookSink {
	fn run_hook(&mut self, hook: Hook, param: &str, cx: &HookContext<'_>);
}

/// Sink that only traces hook invocations.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHooks;

impl HookSink for TracingHooks {
	fn run_hook(&mut self, hook: Hook, param: &str, cx: &HookContext<'_>) {
		tracing::trace!(%hook, param, session = cx.session, doc = %cx.document, "hook");
	}
}
