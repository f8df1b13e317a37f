/// Shared kernel - errors, result alias and small helpers used by every layer
pub mod error;
pub mod result;
pub mod security;
pub mod text;

pub use result::Result;
