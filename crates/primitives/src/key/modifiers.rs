//! Key modifier set (Ctrl, Alt, Shift).

/// Modifiers held while a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt is held.
	pub alt: bool,
	/// Whether Shift is held.
	pub shift: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
	};

	/// Only Ctrl pressed.
	pub const CTRL: Self = Self { ctrl: true, ..Self::NONE };

	/// Only Alt pressed.
	pub const ALT: Self = Self { alt: true, ..Self::NONE };

	/// Only Shift pressed.
	pub const SHIFT: Self = Self { shift: true, ..Self::NONE };

	/// Returns true if no modifiers are set.
	pub const fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift
	}

	/// Writes the `c-`/`a-`/`s-` prefixes used by the textual key form.
	pub(crate) fn write_prefix(self, out: &mut String) {
		if self.ctrl {
			out.push_str("c-");
		}
		if self.alt {
			out.push_str("a-");
		}
		if self.shift {
			out.push_str("s-");
		}
	}
}
