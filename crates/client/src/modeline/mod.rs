//! Mode line composition.
//!
//! A mode line template mixes literal text with three kinds of markup:
//!
//! * `%val{name}` expands a session value (`bufname`, `client`, ...);
//! * `{{name}}` inserts a computed atom (`mode_info`, `context_info`) with
//!   its own faces;
//! * `{Face}` switches the face of the text that follows, `{default}` resets.
//!
//! A backslash makes the next character literal.

use std::fmt;
use std::str::FromStr;

use quire_primitives::{DisplayAtom, DisplayLine, Face};
use thiserror::Error;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelineError {
	#[error("no such value: '%val{{{0}}}'")]
	UnknownValue(String),
	#[error("no such atom: '{{{{{0}}}}}'")]
	UnknownAtom(String),
	#[error("no such face: '{0}'")]
	UnknownFace(String),
	#[error("unterminated '{opener}' at offset {offset}")]
	Unterminated { opener: &'static str, offset: usize },
}

/// Document and session state summarized by the `context_info` atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextInfo {
	pub modified: bool,
	pub recording: Option<char>,
	pub new_file: bool,
	pub hooks_disabled: bool,
	pub fifo: bool,
}

impl fmt::Display for ContextInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.modified {
			f.write_str("[+]")?;
		}
		if let Some(register) = self.recording {
			write!(f, "[recording ({register})]")?;
		}
		if self.new_file {
			f.write_str("[new file]")?;
		}
		if self.hooks_disabled {
			f.write_str("[no-hooks]")?;
		}
		if self.fifo {
			f.write_str("[fifo]")?;
		}
		Ok(())
	}
}

struct LineBuilder {
	line: DisplayLine,
	text: String,
	face: Face,
}

impl LineBuilder {
	fn flush(&mut self) {
		if !self.text.is_empty() {
			self.line.push(DisplayAtom::new(std::mem::take(&mut self.text), self.face));
		}
	}
}

/// Finds the `closer` that ends a construct opened at `offset`.
fn closing(template: &str, from: usize, closer: &str, opener: &'static str, offset: usize) -> Result<usize, ModelineError> {
	template[from..]
		.find(closer)
		.map(|pos| from + pos)
		.ok_or(ModelineError::Unterminated { opener, offset })
}

/// Expands `template` into a display line.
pub fn expand(
	template: &str,
	atoms: &[(&str, &DisplayLine)],
	values: impl Fn(&str) -> Option<String>,
) -> Result<DisplayLine, ModelineError> {
	let mut out = LineBuilder {
		line: DisplayLine::new(),
		text: String::new(),
		face: Face::Default,
	};
	let mut pos = 0;

	while pos < template.len() {
		let rest = &template[pos..];
		if let Some(escaped) = rest.strip_prefix('\\') {
			match escaped.chars().next() {
				Some(c) => {
					out.text.push(c);
					pos += 1 + c.len_utf8();
				}
				None => pos += 1,
			}
		} else if rest.starts_with("%val{") {
			let start = pos + "%val{".len();
			let end = closing(template, start, "}", "%val{", pos)?;
			let name = &template[start..end];
			let value = values(name).ok_or_else(|| ModelineError::UnknownValue(name.to_string()))?;
			out.text.push_str(&value);
			pos = end + 1;
		} else if rest.starts_with("{{") {
			let start = pos + 2;
			let end = closing(template, start, "}}", "{{", pos)?;
			let name = &template[start..end];
			let (_, atom) = atoms
				.iter()
				.find(|(atom_name, _)| *atom_name == name)
				.ok_or_else(|| ModelineError::UnknownAtom(name.to_string()))?;
			out.flush();
			out.line.extend(atom);
			pos = end + 2;
		} else if rest.starts_with('{') {
			let start = pos + 1;
			let end = closing(template, start, "}", "{", pos)?;
			let name = &template[start..end];
			let face = Face::from_str(name).map_err(|_| ModelineError::UnknownFace(name.to_string()))?;
			out.flush();
			out.face = face;
			pos = end + 1;
		} else {
			let Some(c) = rest.chars().next() else { break };
			out.text.push(c);
			pos += c.len_utf8();
		}
	}

	out.flush();
	Ok(out.line)
}
