//! Value store layer for evercount
//!
//! This crate implements the owned cell that holds the counter's
//! durable state:
//! - ValueStore: one typed value guarded by a single RwLock, with
//!   owner-gated writes and transferable ownership
//! - CellSnapshot: versioned read view of a cell
//!
//! ## Design Principle: Check Under the Lock
//!
//! Authorization and mutation share one write-guard scope. Ownership
//! is re-read on every mutating call, never cached, so a module that
//! has been migrated away from a cell cannot write to it even if it
//! still holds a reference.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cell;
pub mod snapshot;

pub use cell::ValueStore;
pub use snapshot::CellSnapshot;
