//! Pointer and keyboard input, normalized for the editor state

pub mod keyboard;
pub mod pointer;

pub use keyboard::EditorKey;
pub use pointer::{LongPress, PointerRelease, PointerTracker};
