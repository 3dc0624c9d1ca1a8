//! Pending UI work accumulated between two flushes.


bitflags::bitflags! {
	/// Regions of the display surface that need work on the next flush.
	///
	/// Show and hide of the same overlay are mutually exclusive: the setters
	/// below clear the opposite flag.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Dirty: u16 {
		/// Standing flag carried by every physical refresh.
		const REFRESH = 1 << 0;
		/// Full content redraw.
		const DRAW = 1 << 1;
		const STATUS_LINE = 1 << 2;
		const MENU_SHOW = 1 << 3;
		const MENU_SELECT = 1 << 4;
		const MENU_HIDE = 1 << 5;
		const INFO_SHOW = 1 << 6;
		const INFO_HIDE = 1 << 7;
	}
}

impl Dirty {
	pub fn mark_menu_show(&mut self) {
		self.insert(Self::MENU_SHOW);
		self.remove(Self::MENU_HIDE);
	}

	pub fn mark_menu_select(&mut self) {
		self.insert(Self::MENU_SELECT);
		self.remove(Self::MENU_HIDE);
	}

	pub fn mark_menu_hide(&mut self) {
		self.insert(Self::MENU_HIDE);
		self.remove(Self::MENU_SHOW | Self::MENU_SELECT);
	}

	pub fn mark_info_show(&mut self) {
		self.insert(Self::INFO_SHOW);
		self.remove(Self::INFO_HIDE);
	}

	pub fn mark_info_hide(&mut self) {
		self.insert(Self::INFO_HIDE);
		self.remove(Self::INFO_SHOW);
	}

	/// Flags for a full redraw that re-asserts current overlay visibility.
	pub fn forced(menu_visible: bool, info_visible: bool) -> Self {
		let menu = if menu_visible {
			Self::MENU_SHOW | Self::MENU_SELECT
		} else {
			Self::MENU_HIDE
		};
		let info = if info_visible { Self::INFO_SHOW } else { Self::INFO_HIDE };
		Self::REFRESH | Self::DRAW | Self::STATUS_LINE | menu | info
	}
}
