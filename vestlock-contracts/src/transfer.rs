//! Ownership transfer of vesting positions.
//!
//! Two-phase by default: the current recipient proposes a new owner, who must
//! accept before the position moves. `direct_transfer` bypasses the pending
//! phase for new owners that cannot call `accept` themselves. Per identifier
//! the state machine is `None -> Pending(new_owner) -> None`, resolving via
//! accept, cancel, or a direct transfer that clears a stale proposal.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::VestLockError;
use crate::events;
use crate::init::LedgerConfig;
use crate::recipients::RecipientIndex;
use crate::schedule::VestingRecord;
use crate::vesting::VestingStorage;

const PENDING_TRANSFER_KEY: Symbol = symbol_short!("xfer_pnd");

pub struct TransferWorkflow;

impl TransferWorkflow {
    fn key(vesting_id: u64) -> (Symbol, u64) {
        (PENDING_TRANSFER_KEY, vesting_id)
    }

    /// The proposed new owner, if a transfer is pending.
    pub fn pending(env: &Env, vesting_id: u64) -> Option<Address> {
        env.storage().persistent().get(&Self::key(vesting_id))
    }

    fn set_pending(env: &Env, vesting_id: u64, new_owner: &Address) {
        env.storage().persistent().set(&Self::key(vesting_id), new_owner);
    }

    fn clear_pending(env: &Env, vesting_id: u64) {
        env.storage().persistent().remove(&Self::key(vesting_id));
    }

    /// Propose transferring an active vesting to `new_owner`.
    ///
    /// # Errors
    /// * `NotVestingOwner` when the caller is not the current recipient
    /// * `InvalidAddress` when `new_owner` already owns the vesting
    /// * `PendingTransferExists` when a proposal is already open
    pub fn initiate(
        env: &Env,
        caller: &Address,
        vesting_id: u64,
        new_owner: &Address,
    ) -> Result<(), VestLockError> {
        caller.require_auth();
        LedgerConfig::require_initialized(env)?;

        let record = VestingStorage::get_active(env, vesting_id)?;
        if record.recipient != *caller {
            return Err(VestLockError::NotVestingOwner);
        }
        if *new_owner == record.recipient {
            return Err(VestLockError::InvalidAddress);
        }
        if Self::pending(env, vesting_id).is_some() {
            return Err(VestLockError::PendingTransferExists);
        }

        Self::set_pending(env, vesting_id, new_owner);
        events::emit_transfer_initiated(env, vesting_id, caller, new_owner);
        Ok(())
    }

    /// Withdraw an open transfer proposal.
    pub fn cancel(env: &Env, caller: &Address, vesting_id: u64) -> Result<(), VestLockError> {
        caller.require_auth();
        LedgerConfig::require_initialized(env)?;

        let record = VestingStorage::get_existing(env, vesting_id)?;
        if record.recipient != *caller {
            return Err(VestLockError::NotVestingOwner);
        }
        if Self::pending(env, vesting_id).is_none() {
            return Err(VestLockError::NoPendingTransfer);
        }

        Self::clear_pending(env, vesting_id);
        events::emit_transfer_cancelled(env, vesting_id, caller);
        Ok(())
    }

    /// Accept an open proposal as the proposed new owner.
    ///
    /// # Errors
    /// * `NotAuthorizedForTransfer` when no proposal is open or the caller is
    ///   not the proposed owner
    pub fn accept(env: &Env, caller: &Address, vesting_id: u64) -> Result<(), VestLockError> {
        caller.require_auth();
        LedgerConfig::require_initialized(env)?;

        let mut record = VestingStorage::get_active(env, vesting_id)?;
        let pending = Self::pending(env, vesting_id)
            .ok_or(VestLockError::NotAuthorizedForTransfer)?;
        if pending != *caller {
            return Err(VestLockError::NotAuthorizedForTransfer);
        }

        let previous = record.recipient.clone();
        Self::migrate(env, &mut record, &pending)?;
        Self::clear_pending(env, vesting_id);
        events::emit_vesting_transferred(env, vesting_id, &previous, &pending);
        Ok(())
    }

    /// Transfer an active vesting without the pending phase. Clears any
    /// stale proposal left behind by an earlier `initiate`.
    pub fn direct_transfer(
        env: &Env,
        caller: &Address,
        vesting_id: u64,
        new_owner: &Address,
    ) -> Result<(), VestLockError> {
        caller.require_auth();
        LedgerConfig::require_initialized(env)?;

        let mut record = VestingStorage::get_active(env, vesting_id)?;
        if record.recipient != *caller {
            return Err(VestLockError::NotVestingOwner);
        }
        if *new_owner == record.recipient {
            return Err(VestLockError::InvalidAddress);
        }

        let previous = record.recipient.clone();
        Self::migrate(env, &mut record, new_owner)?;
        Self::clear_pending(env, vesting_id);
        events::emit_vesting_transferred(env, vesting_id, &previous, new_owner);
        Ok(())
    }

    // Move the index entry from the old recipient to the new one and rewrite
    // the record's ownership.
    fn migrate(
        env: &Env,
        record: &mut VestingRecord,
        new_owner: &Address,
    ) -> Result<(), VestLockError> {
        RecipientIndex::remove(env, &record.recipient, record.id)?;
        RecipientIndex::add(env, new_owner, record.id);
        record.recipient = new_owner.clone();
        VestingStorage::update(env, record);
        Ok(())
    }
}
