//! Editor state types.

mod editor;
mod toast;

pub use editor::{Cursor, Direction, EditorAction};
pub use toast::{Toast, ToastType};
