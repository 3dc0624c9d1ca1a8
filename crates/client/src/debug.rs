//! The `*debug*` log: a user-visible sink for traces and diagnostics.
//!
//! Every line is also emitted as a `tracing` event so a subscriber sees the
//! same stream.

#[derive(Debug, Default)]
pub struct DebugLog {
	lines: Vec<String>,
}

impl DebugLog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn write(&mut self, line: impl Into<String>) {
		let line = line.into();
		tracing::debug!(target: "quire::debug", "{line}");
		self.lines.push(line);
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	/// Returns true if any line contains `needle`.
	pub fn contains(&self, needle: &str) -> bool {
		self.lines.iter().any(|line| line.contains(needle))
	}

	pub fn clear(&mut self) {
		self.lines.clear();
	}
}
