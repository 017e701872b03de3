//! Controller layer for evercount
//!
//! This crate implements the single entry point callers use:
//! - CounterController: owns one cell, tracks which logic module is
//!   active, and delegates reads and increments to it
//!
//! Every controller call desugars to exactly one module or store call;
//! the controller adds owner-gating on module swaps and nothing else.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;

pub use controller::CounterController;
