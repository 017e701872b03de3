//! Core types for evercount
//!
//! This crate defines the foundational types used throughout the system:
//! - ActorId: Opaque identity of a caller, module, or controller
//! - StoreId: Unique identifier for value cells
//! - TypeTag: Self-describing type discriminator for cells
//! - Value: Typed cell payload (unsigned integer or boolean)
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{ActorId, StoreId, TypeTag};
pub use value::Value;
