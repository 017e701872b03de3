//! ValueStore: single typed cell with owner-gated writes
//!
//! ## Design
//!
//! Each store holds exactly one typed value and the identity of its
//! current owner. The `(value, owner, version, updated_at)` tuple
//! lives behind one `parking_lot::RwLock`; every mutating operation
//! takes the write guard once, checks the caller against the owner
//! under that guard, and either commits fully or fails with no
//! observable side effect.
//!
//! ## Key Design
//!
//! - The type tag is fixed at creation and immutable thereafter.
//! - Reads need no authorization and never block writers for long;
//!   the guarded state is a handful of words.
//! - `update` runs read + compute + write inside one guard scope, so
//!   no other writer can interleave with an in-flight mutation.

use crate::snapshot::CellSnapshot;
use chrono::Utc;
use evercount_core::{ActorId, Error, Result, StoreId, TypeTag, Value};
use parking_lot::RwLock;
use tracing::{debug, info};

/// Guarded cell state
///
/// Owner lives inside the lock: authorization is decided by the same
/// guard that commits the mutation.
#[derive(Debug)]
struct CellState {
    value: Value,
    owner: ActorId,
    version: u64,
    updated_at: chrono::DateTime<Utc>,
}

/// One typed value with transferable, exclusive write authorization
///
/// ## Example
///
/// ```
/// use evercount_core::{ActorId, Value};
/// use evercount_store::ValueStore;
///
/// let owner = ActorId::new();
/// let store = ValueStore::uint(owner);
///
/// assert_eq!(store.read(), Value::Uint(0));
/// store.write(owner, Value::Uint(7)).unwrap();
/// assert_eq!(store.read(), Value::Uint(7));
///
/// // A non-owner cannot write
/// let stranger = ActorId::new();
/// assert!(store.write(stranger, Value::Uint(9)).is_err());
/// ```
#[derive(Debug)]
pub struct ValueStore {
    id: StoreId,
    tag: TypeTag,
    // parking_lot::RwLock doesn't poison on panic, preventing cascade failures
    state: RwLock<CellState>,
}

impl ValueStore {
    /// Create a new cell holding the zero value for `tag`
    ///
    /// The creator becomes the first owner.
    pub fn new(owner: ActorId, tag: TypeTag) -> Self {
        let id = StoreId::new();
        debug!(target: "evercount::store", store = %id, tag = %tag, owner = %owner, "cell created");
        Self {
            id,
            tag,
            state: RwLock::new(CellState {
                value: Value::zero(tag),
                owner,
                version: 1,
                updated_at: Utc::now(),
            }),
        }
    }

    /// Create an unsigned-integer cell starting at 0
    pub fn uint(owner: ActorId) -> Self {
        Self::new(owner, TypeTag::Uint)
    }

    /// Create a boolean cell starting at false
    pub fn boolean(owner: ActorId) -> Self {
        Self::new(owner, TypeTag::Bool)
    }

    /// Get this cell's identifier
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Get this cell's type tag
    ///
    /// This is the self-description query modules use to validate a
    /// cell before trusting it. The tag is fixed at creation.
    pub fn type_tag(&self) -> TypeTag {
        self.tag
    }

    /// Get the current owner
    ///
    /// Observable for auditing; knowing the owner confers no
    /// authority.
    pub fn owner(&self) -> ActorId {
        self.state.read().owner
    }

    /// Read the current value
    ///
    /// No authorization required; always succeeds.
    pub fn read(&self) -> Value {
        self.state.read().value
    }

    /// Read the current value with its version and write timestamp
    ///
    /// All three fields come from one lock acquisition and are
    /// mutually consistent.
    pub fn snapshot(&self) -> CellSnapshot {
        let state = self.state.read();
        CellSnapshot {
            value: state.value,
            version: state.version,
            updated_at: state.updated_at,
        }
    }

    /// Get the current version
    ///
    /// Versions start at 1 and increase by one per committed write.
    pub fn version(&self) -> u64 {
        self.state.read().version
    }

    /// Replace the value
    ///
    /// Succeeds only if `caller` is the current owner; the check runs
    /// under the same guard that commits the write. The new value must
    /// match the cell's type tag.
    ///
    /// Returns the version assigned to this write.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` is not the current owner
    /// - `IncompatibleStorage` if `new_value` has the wrong type
    pub fn write(&self, caller: ActorId, new_value: Value) -> Result<u64> {
        let mut state = self.state.write();
        if caller != state.owner {
            return Err(Error::Unauthorized {
                caller,
                required: "store owner",
            });
        }
        if new_value.type_tag() != self.tag {
            return Err(Error::IncompatibleStorage {
                expected: self.tag,
                actual: new_value.type_tag(),
            });
        }
        state.value = new_value;
        state.version += 1;
        state.updated_at = Utc::now();
        debug!(target: "evercount::store", store = %self.id, version = state.version, "cell written");
        Ok(state.version)
    }

    /// Atomically read, compute, and replace the value
    ///
    /// The closure sees the current value and returns its replacement.
    /// Read, compute, and write happen inside one write-guard scope:
    /// no other mutation of this cell can interleave, and the owner is
    /// re-checked at the moment of the write rather than cached from
    /// an earlier call.
    ///
    /// Returns the committed value.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` is not the current owner
    /// - `IncompatibleStorage` if the closure returns a value of the
    ///   wrong type
    /// - Any error the closure itself returns; nothing is committed
    pub fn update<F>(&self, caller: ActorId, f: F) -> Result<Value>
    where
        F: FnOnce(&Value) -> Result<Value>,
    {
        let mut state = self.state.write();
        if caller != state.owner {
            return Err(Error::Unauthorized {
                caller,
                required: "store owner",
            });
        }
        let new_value = f(&state.value)?;
        if new_value.type_tag() != self.tag {
            return Err(Error::IncompatibleStorage {
                expected: self.tag,
                actual: new_value.type_tag(),
            });
        }
        state.value = new_value;
        state.version += 1;
        state.updated_at = Utc::now();
        debug!(target: "evercount::store", store = %self.id, version = state.version, "cell updated");
        Ok(new_value)
    }

    /// Transfer ownership to another identity
    ///
    /// Succeeds only if `caller` is the current owner. The
    /// reassignment is atomic: there is never a moment with zero or
    /// two owners.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if `caller` is not the current owner.
    pub fn transfer_ownership(&self, caller: ActorId, new_owner: ActorId) -> Result<()> {
        let mut state = self.state.write();
        if caller != state.owner {
            return Err(Error::Unauthorized {
                caller,
                required: "store owner",
            });
        }
        let previous = state.owner;
        state.owner = new_owner;
        info!(
            target: "evercount::store",
            store = %self.id,
            from = %previous,
            to = %new_owner,
            "ownership transferred"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_starts_at_zero() {
        let owner = ActorId::new();
        let store = ValueStore::uint(owner);
        assert_eq!(store.read(), Value::Uint(0));
        assert_eq!(store.version(), 1);
        assert_eq!(store.owner(), owner);
    }

    #[test]
    fn test_boolean_cell_starts_false() {
        let store = ValueStore::boolean(ActorId::new());
        assert_eq!(store.read(), Value::Bool(false));
        assert_eq!(store.type_tag(), TypeTag::Bool);
    }

    #[test]
    fn test_write_by_owner() {
        let owner = ActorId::new();
        let store = ValueStore::uint(owner);

        let version = store.write(owner, Value::Uint(100)).unwrap();
        assert_eq!(version, 2);
        assert_eq!(store.read(), Value::Uint(100));
    }

    #[test]
    fn test_write_by_non_owner_fails() {
        let owner = ActorId::new();
        let stranger = ActorId::new();
        let store = ValueStore::uint(owner);

        let result = store.write(stranger, Value::Uint(100));
        assert!(matches!(result, Err(Error::Unauthorized { .. })));
        // No partial effect
        assert_eq!(store.read(), Value::Uint(0));
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_write_wrong_type_fails() {
        let owner = ActorId::new();
        let store = ValueStore::uint(owner);

        let result = store.write(owner, Value::Bool(true));
        assert!(matches!(
            result,
            Err(Error::IncompatibleStorage {
                expected: TypeTag::Uint,
                actual: TypeTag::Bool,
            })
        ));
        assert_eq!(store.read(), Value::Uint(0));
    }

    #[test]
    fn test_transfer_then_previous_owner_rejected() {
        let first = ActorId::new();
        let second = ActorId::new();
        let store = ValueStore::uint(first);

        store.write(first, Value::Uint(11)).unwrap();
        store.transfer_ownership(first, second).unwrap();

        let result = store.write(first, Value::Uint(100_500));
        assert!(matches!(result, Err(Error::Unauthorized { .. })));

        // New owner writes; accumulated value survived the transfer
        assert_eq!(store.read(), Value::Uint(11));
        store.write(second, Value::Uint(12)).unwrap();
        assert_eq!(store.read(), Value::Uint(12));
    }

    #[test]
    fn test_transfer_by_non_owner_fails() {
        let owner = ActorId::new();
        let stranger = ActorId::new();
        let store = ValueStore::uint(owner);

        let result = store.transfer_ownership(stranger, stranger);
        assert!(matches!(result, Err(Error::Unauthorized { .. })));
        assert_eq!(store.owner(), owner);
    }

    #[test]
    fn test_update_applies_closure_atomically() {
        let owner = ActorId::new();
        let store = ValueStore::uint(owner);

        let committed = store
            .update(owner, |current| {
                let n = current.as_uint().unwrap();
                Ok(Value::Uint(n + 10))
            })
            .unwrap();
        assert_eq!(committed, Value::Uint(10));
        assert_eq!(store.read(), Value::Uint(10));
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_update_by_non_owner_never_runs_closure() {
        let owner = ActorId::new();
        let stranger = ActorId::new();
        let store = ValueStore::uint(owner);

        let mut ran = false;
        let result = store.update(stranger, |_| {
            ran = true;
            Ok(Value::Uint(1))
        });
        assert!(matches!(result, Err(Error::Unauthorized { .. })));
        assert!(!ran);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_update_closure_error_commits_nothing() {
        let owner = ActorId::new();
        let store = ValueStore::uint(owner);
        store.write(owner, Value::Uint(5)).unwrap();

        let result: Result<Value> = store.update(owner, |_| Err(Error::NoActiveModule));
        assert!(result.is_err());
        assert_eq!(store.read(), Value::Uint(5));
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_version_monotonicity() {
        let owner = ActorId::new();
        let store = ValueStore::uint(owner);

        for i in 1..=10u64 {
            let version = store.write(owner, Value::Uint(i)).unwrap();
            assert_eq!(version, i + 1);
        }
        assert_eq!(store.version(), 11);
    }

    #[test]
    fn test_snapshot_consistency() {
        let owner = ActorId::new();
        let store = ValueStore::uint(owner);
        store.write(owner, Value::Uint(3)).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.value, Value::Uint(3));
        assert_eq!(snapshot.version, 2);
    }

    #[test]
    fn test_repeated_reads_identical() {
        let store = ValueStore::uint(ActorId::new());
        let first = store.snapshot();
        let second = store.snapshot();
        assert_eq!(first, second);
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValueStore>();
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Only the owner ever writes; everyone else fails with
            /// Unauthorized and changes nothing.
            #[test]
            fn prop_write_succeeds_iff_caller_is_owner(
                owner_bytes in any::<[u8; 16]>(),
                caller_bytes in any::<[u8; 16]>(),
                n in any::<u64>(),
            ) {
                let owner = ActorId::from_bytes(owner_bytes);
                let caller = ActorId::from_bytes(caller_bytes);
                let store = ValueStore::uint(owner);

                let result = store.write(caller, Value::Uint(n));
                if caller == owner {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(store.read(), Value::Uint(n));
                } else {
                    let is_unauthorized = matches!(result, Err(Error::Unauthorized { .. }));
                    prop_assert!(is_unauthorized);
                    prop_assert_eq!(store.read(), Value::Uint(0));
                }
            }

            /// Transfer hands off exclusivity: the previous owner loses
            /// write access the moment the new owner gains it.
            #[test]
            fn prop_transfer_is_exclusive_handoff(n in any::<u64>()) {
                let first = ActorId::new();
                let second = ActorId::new();
                let store = ValueStore::uint(first);

                store.transfer_ownership(first, second).unwrap();
                prop_assert!(store.write(first, Value::Uint(n)).is_err());
                prop_assert!(store.write(second, Value::Uint(n)).is_ok());
            }
        }
    }
}
