//! CounterController: owner-gated module swaps over one owned cell
//!
//! ## Design
//!
//! The controller has two identities in play: `owner` (the external
//! party allowed to swap modules) and `id` (the controller's own
//! actor identity). The cell created at construction is owned by `id`
//! until the first activation hands it to a module; from then on the
//! cell's owner is always the active module's id.
//!
//! ## Swap Atomicity
//!
//! `update_counter` holds the active-module write lock across
//! validate + migrate + switch. Validation precedes any ownership
//! movement and the transfer itself is a single atomic reassignment,
//! so a failed swap leaves both the active module and the cell's
//! owner exactly as they were. The cell never ends up without an
//! authorized writer.

use std::sync::Arc;

use evercount_core::{ActorId, Error, Result};
use evercount_logic::LogicModule;
use evercount_store::ValueStore;
use parking_lot::RwLock;
use tracing::info;

/// Single entry point tracking the active logic module
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use evercount_controller::CounterController;
/// use evercount_core::ActorId;
/// use evercount_logic::LogicModule;
///
/// let owner = ActorId::new();
/// let controller = CounterController::new(owner);
///
/// let basic = Arc::new(LogicModule::basic(controller.id()));
/// controller.update_counter(owner, basic).unwrap();
///
/// assert_eq!(controller.increase_counter().unwrap(), 1);
/// assert_eq!(controller.get_counter().unwrap(), 1);
/// ```
pub struct CounterController {
    id: ActorId,
    owner: ActorId,
    store: Arc<ValueStore>,
    active: RwLock<Option<Arc<LogicModule>>>,
}

impl CounterController {
    /// Create a controller with a fresh zero-valued cell
    ///
    /// The cell is owned by the controller's own identity until the
    /// first `update_counter` hands it to a module. No module is
    /// active yet.
    pub fn new(owner: ActorId) -> Self {
        let id = ActorId::new();
        let store = Arc::new(ValueStore::uint(id));
        info!(
            target: "evercount::controller",
            controller = %id,
            owner = %owner,
            store = %store.id(),
            "controller created"
        );
        Self {
            id,
            owner,
            store,
            active: RwLock::new(None),
        }
    }

    /// The controller's own actor identity
    ///
    /// Modules handed to `update_counter` must have this identity as
    /// their admin, or the controller cannot retire them later.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The external owner allowed to swap modules
    pub fn owner(&self) -> ActorId {
        self.owner
    }

    /// The cell this controller created and routes all calls to
    pub fn store(&self) -> &Arc<ValueStore> {
        &self.store
    }

    /// Identity of the active module, if any
    pub fn counter(&self) -> Option<ActorId> {
        self.active.read().as_ref().map(|module| module.id())
    }

    /// Strategy name of the active module, if any
    pub fn active_strategy(&self) -> Option<&'static str> {
        self.active.read().as_ref().map(|module| module.strategy_name())
    }

    /// Swap the active logic module
    ///
    /// Restricted to the controller owner. The incoming module
    /// validates the cell first; then the outgoing module (if any)
    /// migrates the cell to the incoming one, or the controller hands
    /// over its own initial ownership. Only after authorization has
    /// moved does the module become active.
    ///
    /// Migration requires the outgoing module's admin to be this
    /// controller: transfer each module's admin to `controller.id()`
    /// before activating it.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` is not the controller owner, or
    ///   if the outgoing module's admin is not this controller
    /// - `IncompatibleStorage` if the incoming module rejects the cell
    ///
    /// On any error the active module and cell ownership are
    /// unchanged.
    pub fn update_counter(&self, caller: ActorId, new_module: Arc<LogicModule>) -> Result<()> {
        if caller != self.owner {
            return Err(Error::Unauthorized {
                caller,
                required: "controller owner",
            });
        }

        // Lock held across migrate + switch: no interleaving can
        // observe a half-swapped controller.
        let mut active = self.active.write();

        new_module.validate_storage(&self.store)?;
        match active.as_ref() {
            Some(current) => {
                current.migrate_storage_to(self.id, &self.store, &new_module)?;
            }
            None => {
                self.store.transfer_ownership(self.id, new_module.id())?;
            }
        }

        info!(
            target: "evercount::controller",
            controller = %self.id,
            module = %new_module.id(),
            strategy = new_module.strategy_name(),
            "active module updated"
        );
        *active = Some(new_module);
        Ok(())
    }

    /// Apply the active module's mutation to the counter
    ///
    /// Returns the committed counter value; propagates any failure
    /// from the module or the cell.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveModule` if no module has been activated yet.
    pub fn increase_counter(&self) -> Result<u64> {
        let active = self.active.read();
        let module = active.as_ref().ok_or(Error::NoActiveModule)?;
        module.increment(&self.store)
    }

    /// Read the current counter value via the active module
    ///
    /// # Errors
    ///
    /// Returns `NoActiveModule` if no module has been activated yet.
    pub fn get_counter(&self) -> Result<u64> {
        let active = self.active.read();
        let module = active.as_ref().ok_or(Error::NoActiveModule)?;
        module.current_value(&self.store)
    }
}

impl std::fmt::Debug for CounterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterController")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("store", &self.store.id())
            .field("active", &self.counter())
            .finish()
    }
}
