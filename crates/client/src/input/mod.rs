//! Input events and the per-session input channel.
//!
//! The display surface holds an [`InputSender`] and pushes events at any
//! time. The owning session drains the [`InputQueue`] once per pass, taking
//! only the events present when the pass started.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quire_primitives::Key;
use tokio::sync::mpsc;


/// One raw input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
	Key(Key),
	/// The surface changed size; the new size is read back from the surface.
	Resize,
	FocusIn,
	FocusOut,
}

impl From<Key> for InputEvent {
	fn from(key: Key) -> Self {
		InputEvent::Key(key)
	}
}

impl fmt::Display for InputEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			InputEvent::Key(key) => fmt::Display::fmt(key, f),
			InputEvent::Resize => f.write_str("<resize>"),
			InputEvent::FocusIn => f.write_str("<focus_in>"),
			InputEvent::FocusOut => f.write_str("<focus_out>"),
		}
	}
}

/// Writer side of a session's input channel.
///
/// Ctrl-C is never queued: it raises the interrupt flag so the owner can
/// cancel whatever long-running work it has in flight.
#[derive(Debug, Clone)]
pub struct InputSender {
	tx: mpsc::UnboundedSender<InputEvent>,
	interrupt: Arc<AtomicBool>,
}

impl InputSender {
	/// Pushes `event`. Returns false once the session is gone.
	pub fn send(&self, event: impl Into<InputEvent>) -> bool {
		let event = event.into();
		if event == InputEvent::Key(Key::ctrl('c')) {
			self.interrupt.store(true, Ordering::Release);
			return !self.tx.is_closed();
		}
		self.tx.send(event).is_ok()
	}
}

/// Reader side of a session's input channel.
#[derive(Debug)]
pub struct InputQueue {
	rx: mpsc::UnboundedReceiver<InputEvent>,
	tx: mpsc::UnboundedSender<InputEvent>,
	interrupt: Arc<AtomicBool>,
}

impl Default for InputQueue {
	fn default() -> Self {
		Self::new()
	}
}

impl InputQueue {
	pub fn new() -> Self {
		let (tx, rx) = mpsc::unbounded_channel();
		Self {
			rx,
			tx,
			interrupt: Arc::new(AtomicBool::new(false)),
		}
	}

	pub fn sender(&self) -> InputSender {
		InputSender {
			tx: self.tx.clone(),
			interrupt: Arc::clone(&self.interrupt),
		}
	}

	/// Number of events waiting.
	pub fn len(&self) -> usize {
		self.rx.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rx.is_empty()
	}

	/// Takes every event queued so far. Events sent after this call stay
	/// queued for the next snapshot.
	pub fn take_snapshot(&mut self) -> Vec<InputEvent> {
		let pending = self.rx.len();
		let mut events = Vec::with_capacity(pending);
		for _ in 0..pending {
			match self.rx.try_recv() {
				Ok(event) => events.push(event),
				Err(_) => break,
			}
		}
		events
	}

	/// Returns and clears the interrupt flag.
	pub fn take_interrupt(&self) -> bool {
		self.interrupt.swap(false, Ordering::AcqRel)
	}
}
