//! Reentrancy guard for claim and withdrawal flows.
//!
//! All ledger mutations are committed before any outbound transfer, and this
//! guard rejects nested entry into any operation that moves value out of
//! custody. Uses a single process-wide lock in instance storage.

use crate::errors::VestLockError;
use soroban_sdk::{symbol_short, Env};

/// Runs a closure with the payment reentrancy guard held.
///
/// At entry, if the lock is already set, returns `Err(OperationNotAllowed)`.
/// Otherwise sets the lock, runs `f`, then clears the lock on success or
/// failure.
///
/// # Errors
/// * `VestLockError::OperationNotAllowed` if called while another payment
///   operation is in progress (re-entrant call).
pub fn with_payment_guard<F, R>(env: &Env, f: F) -> Result<R, VestLockError>
where
    F: FnOnce() -> Result<R, VestLockError>,
{
    let key = symbol_short!("pay_lock");
    if env.storage().instance().get(&key).unwrap_or(false) {
        return Err(VestLockError::OperationNotAllowed);
    }
    env.storage().instance().set(&key, &true);
    let result = f();
    env.storage().instance().set(&key, &false);
    result
}
