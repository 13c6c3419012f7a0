//! View-mode preference storage for the photo gallery.
//!
//! The gallery keeps exactly one user setting, the card layout. It is read and
//! written through the [`PreferenceStore`] port so the core never touches
//! ambient globals, and it can be mirrored into a shareable URL query
//! parameter.

mod error;
mod mode;
mod preference;
mod store;

pub use error::{Error, Result};
pub use mode::ViewMode;
pub use preference::{VIEW_MODE_KEY, VIEW_PARAM, ViewModePreference, read_view_param, with_view_param};
pub use store::{FileStore, MemoryStore, PreferenceStore, atomic_write};
