//! Typed options scoped to a document view.
//!
//! Options are parsed from TOML text:
//!
//! ```toml
//! modelinefmt = "{{mode_info}} %val{bufname}"
//! autoreload = "ask"
//! debug = ["keys", "hooks"]
//!
//! [ui_options]
//! assistant = "none"
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;


/// Default mode line template.
pub const DEFAULT_MODELINEFMT: &str =
	"%val{bufname} %val{cursor_line}:%val{cursor_char_column} {{context_info}} {{mode_info}} - %val{client}@[%val{session}]";

/// Free-form key/value options forwarded to the display surface.
pub type UiOptions = BTreeMap<String, String>;

/// What to do when a file document changes on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Autoreload {
	/// Reload without asking.
	Yes,
	/// Never check.
	No,
	/// Prompt the user.
	#[default]
	Ask,
}

bitflags::bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct DebugFlags: u8 {
		const HOOKS = 1 << 0;
		const SHELL = 1 << 1;
		const PROFILE = 1 << 2;
		/// Trace every input event to the debug log.
		const KEYS = 1 << 3;
		const COMMANDS = 1 << 4;
	}
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DebugFlag {
	Hooks,
	Shell,
	Profile,
	Keys,
	Commands,
}

impl From<DebugFlag> for DebugFlags {
	fn from(flag: DebugFlag) -> Self {
		match flag {
			DebugFlag::Hooks => DebugFlags::HOOKS,
			DebugFlag::Shell => DebugFlags::SHELL,
			DebugFlag::Profile => DebugFlags::PROFILE,
			DebugFlag::Keys => DebugFlags::KEYS,
			DebugFlag::Commands => DebugFlags::COMMANDS,
		}
	}
}

/// Errors from parsing option text.
#[derive(Debug, Error)]
pub enum OptionsError {
	#[error("invalid options: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Identifies one option, as reported to watchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
	ModelineFmt,
	Autoreload,
	UiOptions,
	Debug,
}

impl OptionKey {
	pub const fn name(self) -> &'static str {
		match self {
			OptionKey::ModelineFmt => "modelinefmt",
			OptionKey::Autoreload => "autoreload",
			OptionKey::UiOptions => "ui_options",
			OptionKey::Debug => "debug",
		}
	}
}

/// A new value for one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
	ModelineFmt(String),
	Autoreload(Autoreload),
	UiOptions(UiOptions),
	Debug(DebugFlags),
}

impl OptionValue {
	pub fn key(&self) -> OptionKey {
		match self {
			OptionValue::ModelineFmt(_) => OptionKey::ModelineFmt,
			OptionValue::Autoreload(_) => OptionKey::Autoreload,
			OptionValue::UiOptions(_) => OptionKey::UiOptions,
			OptionValue::Debug(_) => OptionKey::Debug,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawOptions {
	modelinefmt: Option<String>,
	autoreload: Option<Autoreload>,
	ui_options: UiOptions,
	debug: Vec<DebugFlag>,
}

/// Options read by a session from its attached view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
	pub modelinefmt: String,
	pub autoreload: Autoreload,
	pub ui_options: UiOptions,
	pub debug: DebugFlags,
}

impl Default for SessionOptions {
	fn default() -> Self {
		Self {
			modelinefmt: DEFAULT_MODELINEFMT.to_string(),
			autoreload: Autoreload::default(),
			ui_options: UiOptions::new(),
			debug: DebugFlags::empty(),
		}
	}
}

impl SessionOptions {
	/// Parses options from TOML; omitted keys keep their defaults.
	pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
		let raw: RawOptions = toml::from_str(text)?;
		let defaults = Self::default();
		Ok(Self {
			modelinefmt: raw.modelinefmt.unwrap_or(defaults.modelinefmt),
			autoreload: raw.autoreload.unwrap_or(defaults.autoreload),
			ui_options: raw.ui_options,
			debug: raw.debug.into_iter().map(DebugFlags::from).collect(),
		})
	}

	/// Stores `value`, returning the key that changed.
	pub fn apply(&mut self, value: OptionValue) -> OptionKey {
		let key = value.key();
		match value {
			OptionValue::ModelineFmt(fmt) => self.modelinefmt = fmt,
			OptionValue::Autoreload(policy) => self.autoreload = policy,
			OptionValue::UiOptions(options) => self.ui_options = options,
			OptionValue::Debug(flags) => self.debug = flags,
		}
		key
	}
}
