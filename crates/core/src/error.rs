//! Error types for evercount
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Every failure is terminal for the triggering call: the call aborts
//! with no state change, and the error propagates to the top-level
//! caller.

use crate::types::{ActorId, TypeTag};
use thiserror::Error;

/// Result type alias for evercount operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the evercount system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Caller does not hold the capability the operation requires
    #[error("unauthorized: caller {caller} is not the {required}")]
    Unauthorized {
        /// Identity that attempted the call
        caller: ActorId,
        /// Capability the operation requires ("store owner",
        /// "module admin", or "controller owner")
        required: &'static str,
    },

    /// A supplied store reference failed type validation
    #[error("incompatible storage: expected {expected} cell, found {actual}")]
    IncompatibleStorage {
        /// Tag the caller expected the cell to carry
        expected: TypeTag,
        /// Tag the cell actually carries
        actual: TypeTag,
    },

    /// A mutation strategy overflowed the cell's integer range
    #[error("overflow applying {strategy} to {current}")]
    Overflow {
        /// Name of the strategy whose arithmetic overflowed
        strategy: &'static str,
        /// Cell value the strategy was applied to
        current: u64,
    },

    /// Counter operation invoked before any logic module was activated
    #[error("no active logic module")]
    NoActiveModule,
}
