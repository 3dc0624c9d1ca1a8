//! Styled text handed to a display surface.
//!
//! The surface owns the actual colors; this side only names the [`Face`]
//! each atom is drawn with.

use std::fmt;
use std::str::FromStr;

/// Named face resolved to concrete colors by the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Face {
	#[default]
	Default,
	BufferPadding,
	StatusLine,
	Information,
	Error,
	MenuForeground,
	MenuBackground,
}

impl Face {
	pub const ALL: [Face; 7] = [
		Face::Default,
		Face::BufferPadding,
		Face::StatusLine,
		Face::Information,
		Face::Error,
		Face::MenuForeground,
		Face::MenuBackground,
	];

	pub const fn name(self) -> &'static str {
		match self {
			Face::Default => "Default",
			Face::BufferPadding => "BufferPadding",
			Face::StatusLine => "StatusLine",
			Face::Information => "Information",
			Face::Error => "Error",
			Face::MenuForeground => "MenuForeground",
			Face::MenuBackground => "MenuBackground",
		}
	}
}

impl fmt::Display for Face {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Error returned when parsing an unknown face name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFace(pub String);

impl fmt::Display for UnknownFace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "no such face: '{}'", self.0)
	}
}

impl std::error::Error for UnknownFace {}

impl FromStr for Face {
	type Err = UnknownFace;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.eq_ignore_ascii_case("default") {
			return Ok(Face::Default);
		}
		Face::ALL.into_iter().find(|face| face.name() == s).ok_or_else(|| UnknownFace(s.to_string()))
	}
}

/// A run of text drawn with a single face.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayAtom {
	pub content: String,
	pub face: Face,
}

impl DisplayAtom {
	pub fn new(content: impl Into<String>, face: Face) -> Self {
		Self {
			content: content.into(),
			face,
		}
	}
}

/// One line of styled atoms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayLine {
	atoms: Vec<DisplayAtom>,
}

impl DisplayLine {
	pub fn new() -> Self {
		Self::default()
	}

	/// A line made of a single atom.
	pub fn styled(content: impl Into<String>, face: Face) -> Self {
		Self {
			atoms: vec![DisplayAtom::new(content, face)],
		}
	}

	pub fn atoms(&self) -> &[DisplayAtom] {
		&self.atoms
	}

	pub fn push(&mut self, atom: DisplayAtom) {
		self.atoms.push(atom);
	}

	/// Appends every atom of `other`.
	pub fn extend(&mut self, other: &DisplayLine) {
		self.atoms.extend(other.atoms.iter().cloned());
	}

	pub fn is_empty(&self) -> bool {
		self.atoms.iter().all(|atom| atom.content.is_empty())
	}

	/// Concatenated text of all atoms, faces dropped.
	pub fn text(&self) -> String {
		self.atoms.iter().map(|atom| atom.content.as_str()).collect()
	}
}

impl From<Vec<DisplayAtom>> for DisplayLine {
	fn from(atoms: Vec<DisplayAtom>) -> Self {
		Self { atoms }
	}
}

impl FromIterator<DisplayAtom> for DisplayLine {
	fn from_iter<I: IntoIterator<Item = DisplayAtom>>(iter: I) -> Self {
		Self {
			atoms: iter.into_iter().collect(),
		}
	}
}

/// Rendered content of a document view, one entry per visible line.
pub type DisplayBuffer = Vec<DisplayLine>;
