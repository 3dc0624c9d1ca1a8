//! Dirty-state reconciliation, overlays and mode line.

use quire_primitives::{BufferCoord, DisplayCoord, DisplayLine, Face};

use super::{Session, SessionEnv};
use crate::debug::DebugLog;
use crate::dirty::Dirty;
use crate::document::{Document, DocumentFlags};
use crate::modeline::{self, ContextInfo};
use crate::overlay::{Info, InfoStyle, Menu, MenuStyle};
use crate::view::DocumentView;

/// Shown instead of the mode line when its template fails to expand.
const MODELINE_FALLBACK: &str = "modelinefmt error, see *debug* buffer";

/// Surface anchor for `anchor`, the origin when it is off screen.
fn resolve_anchor(view: &dyn DocumentView, anchor: BufferCoord) -> DisplayCoord {
	view.display_position(anchor).unwrap_or_default()
}

impl Session {
	/// Reconciles pending state with the display surface.
	///
	/// Issues at most one [`refresh`](crate::ui::UserInterface::refresh),
	/// and none at all when nothing changed since the last call.
	pub fn redraw_ifn(&mut self, env: &mut SessionEnv<'_>) {
		let document = self.attached_document(env.documents);
		if self.view.needs_redraw(document, &self.selections) {
			self.dirty.insert(Dirty::DRAW);
		}

		let mode_line = self.generate_mode_line(document, env.server_name, env.debug);
		if mode_line != self.mode_line {
			self.dirty.insert(Dirty::STATUS_LINE);
			self.mode_line = mode_line;
		}

		if self.dirty.is_empty() {
			return;
		}

		if self.dirty.contains(Dirty::DRAW) {
			let buffer = self.view.update_display_buffer(document, &self.selections);
			self.ui.draw(&buffer, Face::Default, Face::BufferPadding);

			if self.menu.is_visible()
				&& self.menu.is_inline()
				&& self.menu.ui_anchor != resolve_anchor(&*self.view, self.menu.anchor)
			{
				self.dirty.insert(Dirty::MENU_SHOW | Dirty::MENU_SELECT);
			}
			if self.info.is_visible()
				&& self.info.style.is_inline()
				&& self.info.ui_anchor != resolve_anchor(&*self.view, self.info.anchor)
			{
				self.dirty.insert(Dirty::INFO_SHOW);
			}
		}

		if self.dirty.contains(Dirty::MENU_SHOW) {
			self.menu.ui_anchor = if self.menu.is_inline() {
				resolve_anchor(&*self.view, self.menu.anchor)
			} else {
				DisplayCoord::default()
			};
			self.ui.menu_show(
				&self.menu.items,
				self.menu.ui_anchor,
				Face::MenuForeground,
				Face::MenuBackground,
				self.menu.style,
			);
		}
		if self.dirty.contains(Dirty::MENU_SELECT) {
			self.ui.menu_select(self.menu.selected);
		}
		if self.dirty.contains(Dirty::MENU_HIDE) {
			self.ui.menu_hide();
		}

		if self.dirty.contains(Dirty::INFO_SHOW) {
			self.info.ui_anchor = if self.info.style.is_inline() {
				resolve_anchor(&*self.view, self.info.anchor)
			} else {
				DisplayCoord::default()
			};
			self.ui.info_show(
				&self.info.title,
				&self.info.content,
				self.info.ui_anchor,
				Face::Information,
				self.info.style,
			);
		}
		if self.dirty.contains(Dirty::INFO_HIDE) {
			self.ui.info_hide();
		}

		if self.dirty.contains(Dirty::STATUS_LINE) {
			self.ui.draw_status(&self.status_line, &self.mode_line, Face::StatusLine);
		}

		let (mode, coord) = self.interpreter.cursor_info(&*self.view, &self.selections);
		self.ui.set_cursor(mode, coord);

		tracing::trace!(session = %self.name, dirty = ?self.dirty, "refresh");
		self.ui.refresh(self.dirty | Dirty::REFRESH);
		self.dirty = Dirty::empty();
	}

	/// Schedules a full redraw re-asserting the current overlays.
	pub fn force_redraw(&mut self) {
		self.dirty |= Dirty::forced(self.menu.is_visible(), self.info.is_visible());
	}

	/// Expands the `modelinefmt` option of the attached view.
	///
	/// Expansion failures are written to the debug log and replaced by a
	/// single error-faced line.
	pub(super) fn generate_mode_line(
		&self,
		document: &Document,
		server_name: &str,
		debug: &mut DebugLog,
	) -> DisplayLine {
		let mode_info = self.interpreter.mode_line();
		let context = ContextInfo {
			modified: document.is_modified(),
			recording: self.interpreter.recording_register(),
			new_file: document.flags().contains(DocumentFlags::NEW),
			hooks_disabled: self.hooks_disabled,
			fifo: document.flags().contains(DocumentFlags::FIFO),
		};
		let context_info = DisplayLine::styled(context.to_string(), Face::Information);
		let atoms = [("mode_info", &mode_info), ("context_info", &context_info)];

		let template = &self.view.options().modelinefmt;
		match modeline::expand(template, &atoms, |name| self.mode_line_value(name, document, server_name)) {
			Ok(line) => line,
			Err(err) => {
				tracing::warn!(session = %self.name, error = %err, "modelinefmt expansion failed");
				debug.write(format!("Error while parsing modelinefmt: {err}"));
				DisplayLine::styled(MODELINE_FALLBACK, Face::Error)
			}
		}
	}

	/// Value of `%val{name}` in the mode line.
	fn mode_line_value(&self, name: &str, document: &Document, server_name: &str) -> Option<String> {
		let cursor = self.selections.main().cursor;
		let value = match name {
			"bufname" => document.display_name().to_string(),
			"buffile" => document.name().to_string(),
			"buf_line_count" => document.text().len_lines().to_string(),
			"modified" => document.is_modified().to_string(),
			"cursor_line" => (cursor.line + 1).to_string(),
			"cursor_char_column" => (cursor.column + 1).to_string(),
			"cursor_column" => {
				let text = document.text();
				let bytes = if cursor.line < text.len_lines() {
					text.line(cursor.line).chars().take(cursor.column).map(char::len_utf8).sum::<usize>()
				} else {
					0
				};
				(bytes + 1).to_string()
			}
			"selection_count" => self.selections.len().to_string(),
			"client" => self.name.clone(),
			"session" => server_name.to_string(),
			_ => return None,
		};
		Some(value)
	}

	/// Replaces the menu. Nothing is selected until [`menu_select`](Self::menu_select).
	pub fn menu_show(&mut self, items: Vec<DisplayLine>, anchor: BufferCoord, style: MenuStyle) {
		self.menu = Menu {
			items,
			anchor,
			ui_anchor: DisplayCoord::default(),
			style,
			selected: None,
		};
		self.dirty.mark_menu_show();
	}

	pub fn menu_select(&mut self, selected: Option<usize>) {
		self.menu.selected = selected;
		self.dirty.mark_menu_select();
	}

	pub fn menu_hide(&mut self) {
		self.menu = Menu::default();
		self.dirty.mark_menu_hide();
	}

	/// Replaces the info box, unless a modal one is open.
	pub fn info_show(&mut self, title: impl Into<String>, content: impl Into<String>, anchor: BufferCoord, style: InfoStyle) {
		if self.info.is_modal() {
			tracing::trace!(session = %self.name, "info request dropped behind modal info");
			return;
		}
		self.info = Info {
			title: title.into(),
			content: content.into(),
			anchor,
			ui_anchor: DisplayCoord::default(),
			style,
		};
		self.dirty.mark_info_show();
	}

	/// Clears the info box. A modal box only goes away with `even_modal`.
	pub fn info_hide(&mut self, even_modal: bool) {
		if !even_modal && self.info.is_modal() {
			return;
		}
		self.info = Info::default();
		self.dirty.mark_info_hide();
	}
}
