//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod item;
pub mod key_action;

// Re-export for convenience
pub use error::{AppError, InputError, ParseError};
pub use item::{InvalidItemKey, Item, ItemKey};
pub use key_action::KeyAction;
