#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Value types shared between the session core and its collaborators:
//! keys, buffer/display coordinates, display lines and selection sets.

/// Buffer and display coordinates.
pub mod coord;
/// Faces and display lines handed to a display surface.
pub mod display;
/// Key event types.
pub mod key;
/// Cursor/selection sets attached to a document view.
pub mod selection;

pub use coord::{BufferCoord, DisplayCoord};
pub use display::{DisplayAtom, DisplayBuffer, DisplayLine, Face};
pub use key::{Key, KeyCode, Modifiers};
pub use selection::{Selection, SelectionList};
