use serde::{Deserialize, Serialize};

use crate::host::ElementId;

/// A class of host signal the controller can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
	/// Pointer activation on the editing root.
	Activate,
	/// Document content changed.
	ContentChanged,
	/// Key released anywhere in the document.
	KeyUp,
	/// Raw input on the editing root.
	Input,
	/// The editing container scrolled.
	Scroll,
	/// Pointer press/move/release outside the editing root, used by overlay UI.
	Pointer,
}

bitflags::bitflags! {
	/// A set of registered signals.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct SignalSet: u8 {
		const ACTIVATE = 1 << 0;
		const CONTENT_CHANGED = 1 << 1;
		const KEY_UP = 1 << 2;
		const INPUT = 1 << 3;
		const SCROLL = 1 << 4;
		const POINTER = 1 << 5;
	}
}

impl Signal {
	pub const ALL: [Signal; 6] = [
		Self::Activate,
		Self::ContentChanged,
		Self::KeyUp,
		Self::Input,
		Self::Scroll,
		Self::Pointer,
	];

	/// Returns the bitflag for this signal.
	pub const fn as_set(self) -> SignalSet {
		match self {
			Self::Activate => SignalSet::ACTIVATE,
			Self::ContentChanged => SignalSet::CONTENT_CHANGED,
			Self::KeyUp => SignalSet::KEY_UP,
			Self::Input => SignalSet::INPUT,
			Self::Scroll => SignalSet::SCROLL,
			Self::Pointer => SignalSet::POINTER,
		}
	}
}

impl From<Signal> for SignalSet {
	fn from(signal: Signal) -> Self {
		signal.as_set()
	}
}

impl FromIterator<Signal> for SignalSet {
	fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
		iter.into_iter().fold(SignalSet::empty(), |set, s| set | s.as_set())
	}
}

impl SignalSet {
	/// Iterates the individual signals in this set, in [`Signal::ALL`] order.
	pub fn signals(self) -> impl Iterator<Item = Signal> {
		Signal::ALL.into_iter().filter(move |s| self.contains(s.as_set()))
	}
}

/// A released key, classified by what the controller cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum KeyCode {
	Backspace,
	Delete,
	Other(u32),
}

impl KeyCode {
	pub const BACKSPACE_CODE: u32 = 8;
	pub const DELETE_CODE: u32 = 46;

	pub const fn from_code(code: u32) -> Self {
		match code {
			Self::BACKSPACE_CODE => Self::Backspace,
			Self::DELETE_CODE => Self::Delete,
			other => Self::Other(other),
		}
	}

	pub const fn code(self) -> u32 {
		match self {
			Self::Backspace => Self::BACKSPACE_CODE,
			Self::Delete => Self::DELETE_CODE,
			Self::Other(code) => code,
		}
	}

	/// Keys that remove the selected image before deselecting.
	pub const fn is_deletion(self) -> bool {
		matches!(self, Self::Backspace | Self::Delete)
	}
}

impl From<u32> for KeyCode {
	fn from(code: u32) -> Self {
		Self::from_code(code)
	}
}

impl From<KeyCode> for u32 {
	fn from(key: KeyCode) -> Self {
		key.code()
	}
}

/// Pointer interaction with overlay UI, x in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PointerEvent {
	Down { target: ElementId, x: f64 },
	Move { x: f64 },
	Up,
}

/// A signal delivered by the host, already classified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
	/// Pointer activation; `target` is the element under the pointer.
	Activate { target: Option<ElementId> },
	ContentChanged,
	KeyUp { key: KeyCode },
	Input,
	Scroll,
	Pointer { pointer: PointerEvent },
}

impl HostEvent {
	pub const fn signal(&self) -> Signal {
		match self {
			Self::Activate { .. } => Signal::Activate,
			Self::ContentChanged => Signal::ContentChanged,
			Self::KeyUp { .. } => Signal::KeyUp,
			Self::Input => Signal::Input,
			Self::Scroll => Signal::Scroll,
			Self::Pointer { .. } => Signal::Pointer,
		}
	}
}
