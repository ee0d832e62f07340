//! Crate-internal prelude.
//!
//! Brings the derive_more `Display` derive into scope for the value types.

pub use derive_more::Display;
