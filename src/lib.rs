//! Evercount: upgradeable counter with capability-gated storage
//!
//! Evercount separates a counter's durable state from the logic that
//! mutates it. A [`ValueStore`] holds one typed value and enforces
//! that only its current owner may write; a [`LogicModule`] binds a
//! versioned mutation strategy to an identity that can hold that
//! ownership; a [`CounterController`] tracks which module is active
//! and routes calls to it. Replacing the logic migrates write
//! authorization to the successor without losing the accumulated
//! value.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use evercount::{ActorId, CounterController, LogicModule};
//!
//! let owner = ActorId::new();
//! let controller = CounterController::new(owner);
//!
//! // Phase one: +1 per call
//! let basic = Arc::new(LogicModule::basic(controller.id()));
//! controller.update_counter(owner, basic)?;
//! controller.increase_counter()?;
//! assert_eq!(controller.get_counter()?, 1);
//!
//! // Phase two: +10 per call; the value survives the swap
//! let bulk = Arc::new(LogicModule::bulk(controller.id()));
//! controller.update_counter(owner, bulk)?;
//! controller.increase_counter()?;
//! assert_eq!(controller.get_counter()?, 11);
//! # Ok::<(), evercount::Error>(())
//! ```
//!
//! # Architecture
//!
//! Data flow is Controller → active LogicModule → ValueStore. Module
//! swaps are owner-gated and migrate store ownership atomically, so
//! the cell always has exactly one authorized writer.

pub use evercount_controller::CounterController;
pub use evercount_core::{ActorId, Error, Result, StoreId, TypeTag, Value};
pub use evercount_logic::{
    BasicIncrement, BulkIncrement, LogicModule, MutationStrategy, SquaringIncrement,
};
pub use evercount_store::{CellSnapshot, ValueStore};
