//! Key representation.
//!
//! Keys render to the bracketed textual form used by hooks and traces:
//! plain characters print as themselves, everything else as `<name>` with
//! `c-`/`a-`/`s-` modifier prefixes (`<c-x>`, `<ret>`, `<a-s-tab>`).

use std::fmt;

mod modifiers;

pub use modifiers::Modifiers;

/// Physical key identity, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	Char(char),
	Enter,
	Esc,
	Tab,
	Backspace,
	Delete,
	Insert,
	Home,
	End,
	PageUp,
	PageDown,
	Up,
	Down,
	Left,
	Right,
	F(u8),
}

impl KeyCode {
	fn name(self) -> Option<&'static str> {
		Some(match self {
			Self::Char(' ') => "space",
			Self::Char('<') => "lt",
			Self::Char('>') => "gt",
			Self::Char('-') => "minus",
			Self::Char(_) | Self::F(_) => return None,
			Self::Enter => "ret",
			Self::Esc => "esc",
			Self::Tab => "tab",
			Self::Backspace => "backspace",
			Self::Delete => "del",
			Self::Insert => "ins",
			Self::Home => "home",
			Self::End => "end",
			Self::PageUp => "pageup",
			Self::PageDown => "pagedown",
			Self::Up => "up",
			Self::Down => "down",
			Self::Left => "left",
			Self::Right => "right",
		})
	}
}

/// A key with optional modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl Key {
	/// Creates a key from a character with no modifiers.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c))
	}

	/// Creates a key from a key code with no modifiers.
	pub const fn new(code: KeyCode) -> Self {
		Self {
			code,
			modifiers: Modifiers::NONE,
		}
	}

	/// Creates a Ctrl-modified character key.
	pub const fn ctrl(c: char) -> Self {
		Self {
			code: KeyCode::Char(c),
			modifiers: Modifiers::CTRL,
		}
	}

	/// Creates an Alt-modified character key.
	pub const fn alt(c: char) -> Self {
		Self {
			code: KeyCode::Char(c),
			modifiers: Modifiers::ALT,
		}
	}

	/// Returns true for the unmodified character `c`.
	pub fn is_char(&self, c: char) -> bool {
		self.modifiers.is_empty() && self.code == KeyCode::Char(c)
	}

	/// Returns true for an unmodified Escape.
	pub fn is_escape(&self) -> bool {
		self.modifiers.is_empty() && self.code == KeyCode::Esc
	}

	/// Returns true for an unmodified Enter.
	pub fn is_enter(&self) -> bool {
		self.modifiers.is_empty() && self.code == KeyCode::Enter
	}

	/// Returns the character if this is an unmodified character key.
	pub fn codepoint(&self) -> Option<char> {
		match self.code {
			KeyCode::Char(c) if self.modifiers.is_empty() => Some(c),
			_ => None,
		}
	}
}

impl From<char> for Key {
	fn from(c: char) -> Self {
		Self::char(c)
	}
}

impl From<KeyCode> for Key {
	fn from(code: KeyCode) -> Self {
		Self::new(code)
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let named = self.code.name();
		if let (KeyCode::Char(c), None, true) = (self.code, named, self.modifiers.is_empty()) {
			return write!(f, "{c}");
		}

		let mut out = String::from("<");
		self.modifiers.write_prefix(&mut out);
		match (self.code, named) {
			(_, Some(name)) => out.push_str(name),
			(KeyCode::F(n), None) => out.push_str(&format!("F{n}")),
			(KeyCode::Char(c), None) => out.push(c),
			_ => unreachable!("every non-char, non-function key has a name"),
		}
		out.push('>');
		f.write_str(&out)
	}
}
