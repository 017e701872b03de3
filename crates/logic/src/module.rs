//! LogicModule: a mutation strategy bound to an identity
//!
//! ## Design
//!
//! The module's `id` is the identity that holds store ownership; the
//! store only accepts writes carrying that id. A separate `admin`
//! identity gates administrative operations (admin transfer,
//! migration). The two are distinct on purpose: the admin decides
//! *when* a store moves to a successor, while the id is *what* the
//! store recognizes as its writer.
//!
//! ## Lifecycle per (module, store) pair
//!
//! A module starts unbound, becomes bound when it receives ownership
//! of a store (at store creation or via migration from a predecessor),
//! and is permanently outdated for that store once it migrates the
//! store to a successor. The store itself enforces the terminal state:
//! it rejects writes from identities it no longer recognizes.

use crate::strategy::{BasicIncrement, BulkIncrement, MutationStrategy, SquaringIncrement};
use evercount_core::{ActorId, Error, Result, TypeTag, Value};
use evercount_store::ValueStore;
use parking_lot::RwLock;
use tracing::{debug, info};

/// A replaceable counter version: one strategy, one identity
pub struct LogicModule {
    id: ActorId,
    admin: RwLock<ActorId>,
    strategy: Box<dyn MutationStrategy>,
}

impl LogicModule {
    /// Create a module with the given administrative owner and strategy
    pub fn new(admin: ActorId, strategy: Box<dyn MutationStrategy>) -> Self {
        let id = ActorId::new();
        info!(
            target: "evercount::logic",
            module = %id,
            admin = %admin,
            strategy = strategy.name(),
            "logic module created"
        );
        Self {
            id,
            admin: RwLock::new(admin),
            strategy,
        }
    }

    /// Create a basic-increment module (+1 per call)
    pub fn basic(admin: ActorId) -> Self {
        Self::new(admin, Box::new(BasicIncrement))
    }

    /// Create a bulk-increment module (+10 per call)
    pub fn bulk(admin: ActorId) -> Self {
        Self::new(admin, Box::new(BulkIncrement))
    }

    /// Create a squaring module (value becomes value * value)
    pub fn squaring(admin: ActorId) -> Self {
        Self::new(admin, Box::new(SquaringIncrement))
    }

    /// The identity this module presents to stores
    ///
    /// A store owned by this id accepts this module's writes.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The current administrative owner
    pub fn admin(&self) -> ActorId {
        *self.admin.read()
    }

    /// Name of this module's strategy
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Transfer administrative ownership of this module
    ///
    /// Handing a module's admin to a controller is what allows the
    /// controller to later retire it via [`migrate_storage_to`].
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if `caller` is not the current admin.
    ///
    /// [`migrate_storage_to`]: LogicModule::migrate_storage_to
    pub fn transfer_admin(&self, caller: ActorId, new_admin: ActorId) -> Result<()> {
        let mut admin = self.admin.write();
        if caller != *admin {
            return Err(Error::Unauthorized {
                caller,
                required: "module admin",
            });
        }
        let previous = *admin;
        *admin = new_admin;
        info!(
            target: "evercount::logic",
            module = %self.id,
            from = %previous,
            to = %new_admin,
            "module admin transferred"
        );
        Ok(())
    }

    /// Check that `store` is a genuine, type-compatible cell
    ///
    /// Every shipped strategy mutates unsigned integers, so the cell
    /// must carry the Uint tag. Run this before trusting any store
    /// handle supplied by an external party; migration runs it
    /// implicitly.
    ///
    /// # Errors
    ///
    /// Returns `IncompatibleStorage` if the cell carries any other tag.
    pub fn validate_storage(&self, store: &ValueStore) -> Result<()> {
        let actual = store.type_tag();
        if actual != TypeTag::Uint {
            return Err(Error::IncompatibleStorage {
                expected: TypeTag::Uint,
                actual,
            });
        }
        Ok(())
    }

    /// Read the counter value from `store`
    ///
    /// No authorization required.
    ///
    /// # Errors
    ///
    /// Returns `IncompatibleStorage` if the cell is not a Uint cell.
    pub fn current_value(&self, store: &ValueStore) -> Result<u64> {
        let value = store.read();
        value.as_uint().ok_or(Error::IncompatibleStorage {
            expected: TypeTag::Uint,
            actual: value.type_tag(),
        })
    }

    /// Apply this module's strategy to the counter
    ///
    /// Read, strategy, and write run inside the store's single
    /// write-guard scope as one indivisible step. The store re-checks
    /// ownership at that moment, so a module that has migrated the
    /// store away fails here with `Unauthorized` no matter what it
    /// believes about its own state.
    ///
    /// Returns the committed counter value.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if this module does not currently own `store`
    /// - `IncompatibleStorage` if the cell is not a Uint cell
    /// - `Overflow` if the strategy's arithmetic overflows
    pub fn increment(&self, store: &ValueStore) -> Result<u64> {
        let committed = store.update(self.id, |current| {
            let n = current.as_uint().ok_or(Error::IncompatibleStorage {
                expected: TypeTag::Uint,
                actual: current.type_tag(),
            })?;
            Ok(Value::Uint(self.strategy.apply(n)?))
        })?;
        debug!(
            target: "evercount::logic",
            module = %self.id,
            store = %store.id(),
            strategy = self.strategy.name(),
            "counter incremented"
        );
        match committed {
            Value::Uint(n) => Ok(n),
            other => Err(Error::IncompatibleStorage {
                expected: TypeTag::Uint,
                actual: other.type_tag(),
            }),
        }
    }

    /// Hand write authorization over `store` to `successor`
    ///
    /// Restricted to this module's admin. Validates the store first;
    /// the ownership transfer itself then either commits atomically or
    /// fails with no effect, so the store never ends up ownerless.
    /// After success this module is outdated for `store`: its
    /// increments fail `Unauthorized` because the store no longer
    /// recognizes it.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` is not the module admin, or if
    ///   this module does not currently own `store`
    /// - `IncompatibleStorage` if the store fails validation
    pub fn migrate_storage_to(
        &self,
        caller: ActorId,
        store: &ValueStore,
        successor: &LogicModule,
    ) -> Result<()> {
        if caller != self.admin() {
            return Err(Error::Unauthorized {
                caller,
                required: "module admin",
            });
        }
        self.validate_storage(store)?;
        store.transfer_ownership(self.id, successor.id())?;
        info!(
            target: "evercount::logic",
            store = %store.id(),
            from = %self.id,
            to = %successor.id(),
            successor_strategy = successor.strategy_name(),
            "storage migrated to successor module"
        );
        Ok(())
    }
}

impl std::fmt::Debug for LogicModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogicModule")
            .field("id", &self.id)
            .field("admin", &*self.admin.read())
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
