//! Error types for session operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentId;
use crate::options::OptionsError;
use crate::session::SessionId;

/// Recoverable error raised while an input interpreter handles one key.
///
/// Reported on the status line and through the `RuntimeError` hook; the
/// dispatch loop moves on to the next queued event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EditError {
	message: String,
}

impl EditError {
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Errors produced by session and manager operations.
#[derive(Debug, Error)]
pub enum ClientError {
	#[error(transparent)]
	Edit(#[from] EditError),

	#[error("no such document: {0}")]
	NoSuchDocument(DocumentId),

	#[error("no such session: {0}")]
	NoSuchSession(SessionId),

	#[error("a session named '{0}' already exists")]
	SessionNameTaken(String),

	/// The document is still attached to a live session.
	#[error("document '{document}' is displayed by session '{session}'")]
	DocumentInUse { document: String, session: String },

	#[error("unable to reload '{name}': {source}")]
	Reload {
		name: String,
		#[source]
		source: std::io::Error,
	},

	#[error("I/O error on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Options(#[from] OptionsError),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, ClientError>;
