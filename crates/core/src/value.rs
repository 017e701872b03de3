//! Value types for evercount
//!
//! This module defines:
//! - Value: Typed payload held by a cell
//!
//! ## Type Rules
//!
//! - Two types only: Uint and Bool
//! - No implicit type coercions
//! - Different types are NEVER equal: `Uint(0) != Bool(false)`
//! - Every Value knows its own TypeTag

use crate::types::TypeTag;
use serde::{Deserialize, Serialize};

/// Typed payload of a value cell
///
/// The two variants mirror the two cell types the system supports.
/// A cell's tag fixes which variant it may hold; attempting to store
/// the other variant is rejected before anything is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Unsigned 64-bit integer
    Uint(u64),
    /// Boolean
    Bool(bool),
}

impl Value {
    /// Get the TypeTag describing this value's type
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Uint(_) => TypeTag::Uint,
            Value::Bool(_) => TypeTag::Bool,
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Uint(_) => "Uint",
            Value::Bool(_) => "Bool",
        }
    }

    /// The zero value for a given tag: `Uint(0)` or `Bool(false)`
    ///
    /// Freshly created cells start at this value.
    pub fn zero(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Uint => Value::Uint(0),
            TypeTag::Bool => Value::Bool(false),
        }
    }

    /// Check if this is an unsigned integer value
    pub fn is_uint(&self) -> bool {
        matches!(self, Value::Uint(_))
    }

    /// Check if this is a boolean value
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Get as u64 if this is a Uint value
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
