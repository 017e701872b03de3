//! Logic module layer for evercount
//!
//! This crate implements the replaceable half of the counter:
//! - MutationStrategy: the trait each counter version implements
//! - BasicIncrement / BulkIncrement / SquaringIncrement: the shipped
//!   strategy versions
//! - LogicModule: a strategy bound to an identity that can hold store
//!   ownership, validate storage, and migrate a cell to a successor
//!
//! ## Design Principle: Stateless Facades
//!
//! A LogicModule holds no counter state of its own. All durable state
//! lives in the ValueStore; the module contributes only its identity
//! and its mutation function. Swapping modules therefore never loses
//! accumulated state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod module;
pub mod strategy;

pub use module::LogicModule;
pub use strategy::{BasicIncrement, BulkIncrement, MutationStrategy, SquaringIncrement};
