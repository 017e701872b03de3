//! Identity and type-tag types
//!
//! This module defines:
//! - ActorId: Opaque identity of a caller, module, or controller
//! - StoreId: Unique identifier for value cells
//! - TypeTag: Type discriminator for cell validation

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity of an actor
///
/// An ActorId is a wrapper around a UUID v4, identifying the entity
/// behind a call: an external caller, a logic module, or a controller.
/// Every capability check in the system compares ActorIds; holding the
/// right ActorId is what authorizes a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Create a new random ActorId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ActorId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse an ActorId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the raw bytes of this ActorId
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a value cell
///
/// A StoreId is a wrapper around a UUID v4. It identifies a cell in
/// diagnostics and logs; it carries no authority. Cells are authorized
/// by their owner ActorId, not by knowing the StoreId.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(Uuid);

impl StoreId {
    /// Create a new random StoreId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a StoreId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse a StoreId from a string representation
    ///
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the raw bytes of this StoreId
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for StoreId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type discriminator for value cells
///
/// Cells are self-describing: a module asks a cell for its TypeTag
/// before trusting it. The tag is fixed when a cell is created and
/// never changes, so a boolean cell can never masquerade as an
/// integer cell.
///
/// ## TypeTag Values
///
/// - `Uint = 0x01`: unsigned 64-bit integer cells
/// - `Bool = 0x02`: boolean cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeTag {
    /// Unsigned integer cells
    Uint = 0x01,
    /// Boolean cells
    Bool = 0x02,
}

impl TypeTag {
    /// Get the tag as its u8 discriminant
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse a tag from its u8 discriminant
    ///
    /// Returns None for unknown discriminants.
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(TypeTag::Uint),
            0x02 => Some(TypeTag::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Uint => write!(f, "Uint"),
            TypeTag::Bool => write!(f, "Bool"),
        }
    }
}
