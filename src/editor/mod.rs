//! Rope-backed input buffer for the edit pane.

mod buffer;

pub use buffer::{Cursor, Direction, InputBuffer};
