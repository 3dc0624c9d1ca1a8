//! Reference document model and the document universe.
//!
//! Text storage is deliberately thin: a [`Rope`], a version counter for
//! change detection, and the filesystem timestamp recorded at the last
//! load, save or "keep" decision.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use ropey::Rope;
use rustc_hash::FxHashMap;

use crate::error::{ClientError, Result};


/// Stable identity of a document within one [`Documents`] universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

bitflags::bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct DocumentFlags: u8 {
		/// Backed by a file on disk.
		const FILE = 1 << 0;
		/// Created for a path that did not exist yet.
		const NEW = 1 << 1;
		/// Fed by a streaming source.
		const FIFO = 1 << 2;
	}
}

/// Reads the modification time of `path`.
///
/// `None` is the "unavailable" sentinel: the file is missing, unreadable, or
/// the platform does not report modification times.
pub fn fs_timestamp(path: &Path) -> Option<SystemTime> {
	std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

#[derive(Debug)]
pub struct Document {
	id: DocumentId,
	name: String,
	path: Option<PathBuf>,
	flags: DocumentFlags,
	text: Rope,
	version: u64,
	saved_version: u64,
	fs_timestamp: Option<SystemTime>,
}

impl Document {
	pub fn id(&self) -> DocumentId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Short name for prompts and status messages: the file name for file
	/// documents, the full name otherwise.
	pub fn display_name(&self) -> &str {
		self.path
			.as_deref()
			.and_then(Path::file_name)
			.and_then(|name| name.to_str())
			.unwrap_or(&self.name)
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	pub fn flags(&self) -> DocumentFlags {
		self.flags
	}

	pub fn text(&self) -> &Rope {
		&self.text
	}

	/// Monotonic counter bumped by every mutation, including reloads.
	pub fn version(&self) -> u64 {
		self.version
	}

	pub fn is_modified(&self) -> bool {
		self.version != self.saved_version
	}

	/// Timestamp recorded at the last load, save or keep decision.
	pub fn fs_timestamp(&self) -> Option<SystemTime> {
		self.fs_timestamp
	}

	pub fn set_fs_timestamp(&mut self, timestamp: Option<SystemTime>) {
		self.fs_timestamp = timestamp;
	}

	/// Applies `f` to the text and bumps the version.
	pub fn edit<R>(&mut self, f: impl FnOnce(&mut Rope) -> R) -> R {
		let result = f(&mut self.text);
		self.version += 1;
		result
	}

	/// Records the current content as saved.
	pub fn mark_saved(&mut self) {
		self.saved_version = self.version;
		self.flags.remove(DocumentFlags::NEW);
		if let Some(path) = &self.path {
			self.fs_timestamp = fs_timestamp(path);
		}
	}

	/// Replaces the content with the file on disk and re-stamps the timestamp.
	pub fn reload(&mut self) -> Result<()> {
		let Some(path) = self.path.clone() else {
			return Ok(());
		};
		let content = std::fs::read_to_string(&path).map_err(|source| ClientError::Reload {
			name: self.display_name().to_string(),
			source,
		})?;
		self.text = Rope::from_str(&content);
		self.version += 1;
		self.saved_version = self.version;
		self.flags.remove(DocumentFlags::NEW);
		self.fs_timestamp = fs_timestamp(&path);
		tracing::debug!(doc = %self.id, name = %self.name, "document reloaded from disk");
		Ok(())
	}
}

/// The document universe: every live document, keyed by id.
#[derive(Debug, Default)]
pub struct Documents {
	documents: FxHashMap<DocumentId, Document>,
	next_id: u64,
}

impl Documents {
	pub fn new() -> Self {
		Self::default()
	}

	fn insert(&mut self, name: String, path: Option<PathBuf>, flags: DocumentFlags, text: &str) -> DocumentId {
		let id = DocumentId(self.next_id);
		self.next_id += 1;
		let fs_timestamp = path.as_deref().and_then(fs_timestamp);
		self.documents.insert(
			id,
			Document {
				id,
				name,
				path,
				flags,
				text: Rope::from_str(text),
				version: 0,
				saved_version: 0,
				fs_timestamp,
			},
		);
		id
	}

	/// Opens `path` as a file document, or creates a new-file document when
	/// nothing exists there yet.
	pub fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<DocumentId> {
		let path = path.into();
		let name = path.to_string_lossy().into_owned();
		match std::fs::read_to_string(&path) {
			Ok(content) => Ok(self.insert(name, Some(path), DocumentFlags::FILE, &content)),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				Ok(self.insert(name, Some(path), DocumentFlags::FILE | DocumentFlags::NEW, ""))
			}
			Err(source) => Err(ClientError::Io { path, source }),
		}
	}

	/// Creates an in-memory document.
	pub fn create_scratch(&mut self, name: impl Into<String>, text: &str) -> DocumentId {
		self.insert(name.into(), None, DocumentFlags::empty(), text)
	}

	/// Creates an empty document fed by a streaming source.
	pub fn create_fifo(&mut self, name: impl Into<String>) -> DocumentId {
		self.insert(name.into(), None, DocumentFlags::FIFO, "")
	}

	pub fn get(&self, id: DocumentId) -> Option<&Document> {
		self.documents.get(&id)
	}

	pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
		self.documents.get_mut(&id)
	}

	pub fn contains(&self, id: DocumentId) -> bool {
		self.documents.contains_key(&id)
	}

	pub fn find_by_name(&self, name: &str) -> Option<DocumentId> {
		self.documents.values().find(|doc| doc.name == name).map(Document::id)
	}

	pub(crate) fn remove(&mut self, id: DocumentId) -> Option<Document> {
		self.documents.remove(&id)
	}

	pub fn len(&self) -> usize {
		self.documents.len()
	}

	pub fn is_empty(&self) -> bool {
		self.documents.is_empty()
	}
}
