//! Bidirectional recipient index.
//!
//! Maps each recipient to the ordered list of their vesting identifiers and
//! maintains the global set of recipients with at least one vesting. Reverse
//! position maps (storing position + 1, with 0 meaning absent) give O(1)
//! membership checks and O(1) removal by swapping the last element into the
//! vacated slot. The swap-and-pop invariant lives entirely in this module;
//! callers only see `add`, `remove`, and the read surface.
//!
//! Invariant: a recipient is in the global set if and only if their vesting
//! list is non-empty.

use crate::errors::VestLockError;
use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

const RECIPIENTS_KEY: Symbol = symbol_short!("rcp_all");
const RECIPIENT_POS_KEY: Symbol = symbol_short!("rcp_pos");
const VESTINGS_KEY: Symbol = symbol_short!("rcp_vst");
const VESTING_POS_KEY: Symbol = symbol_short!("vst_pos");

pub struct RecipientIndex;

impl RecipientIndex {
    fn recipients(env: &Env) -> Vec<Address> {
        env.storage()
            .persistent()
            .get(&RECIPIENTS_KEY)
            .unwrap_or(Vec::new(env))
    }

    fn save_recipients(env: &Env, recipients: &Vec<Address>) {
        env.storage().persistent().set(&RECIPIENTS_KEY, recipients);
    }

    /// Ordered vesting identifiers for a recipient (empty when unknown).
    pub fn ids_for(env: &Env, recipient: &Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&(VESTINGS_KEY, recipient.clone()))
            .unwrap_or(Vec::new(env))
    }

    fn save_ids(env: &Env, recipient: &Address, ids: &Vec<u64>) {
        let key = (VESTINGS_KEY, recipient.clone());
        if ids.is_empty() {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, ids);
        }
    }

    // Position + 1 of the recipient in the global set; 0 when absent.
    fn recipient_pos(env: &Env, recipient: &Address) -> u32 {
        env.storage()
            .persistent()
            .get(&(RECIPIENT_POS_KEY, recipient.clone()))
            .unwrap_or(0)
    }

    fn set_recipient_pos(env: &Env, recipient: &Address, pos_plus_one: u32) {
        let key = (RECIPIENT_POS_KEY, recipient.clone());
        if pos_plus_one == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &pos_plus_one);
        }
    }

    // Position + 1 of the identifier in the recipient's list; 0 when absent.
    fn vesting_pos(env: &Env, recipient: &Address, vesting_id: u64) -> u32 {
        env.storage()
            .persistent()
            .get(&(VESTING_POS_KEY, recipient.clone(), vesting_id))
            .unwrap_or(0)
    }

    fn set_vesting_pos(env: &Env, recipient: &Address, vesting_id: u64, pos_plus_one: u32) {
        let key = (VESTING_POS_KEY, recipient.clone(), vesting_id);
        if pos_plus_one == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &pos_plus_one);
        }
    }

    /// Append a vesting identifier to a recipient's list, registering the
    /// recipient in the global set on their first vesting.
    pub fn add(env: &Env, recipient: &Address, vesting_id: u64) {
        let mut ids = Self::ids_for(env, recipient);
        ids.push_back(vesting_id);
        Self::set_vesting_pos(env, recipient, vesting_id, ids.len());
        Self::save_ids(env, recipient, &ids);

        if Self::recipient_pos(env, recipient) == 0 {
            let mut recipients = Self::recipients(env);
            recipients.push_back(recipient.clone());
            Self::set_recipient_pos(env, recipient, recipients.len());
            Self::save_recipients(env, &recipients);
        }
    }

    /// Remove a vesting identifier from a recipient's list in O(1) by
    /// swapping the last identifier into the vacated slot. Drops the
    /// recipient from the global set (same technique) when their list
    /// empties.
    pub fn remove(
        env: &Env,
        recipient: &Address,
        vesting_id: u64,
    ) -> Result<(), VestLockError> {
        let pos_plus_one = Self::vesting_pos(env, recipient, vesting_id);
        if pos_plus_one == 0 {
            return Err(VestLockError::NotVestingOwner);
        }
        let index = pos_plus_one - 1;

        let mut ids = Self::ids_for(env, recipient);
        let last_index = ids.len() - 1;
        if index != last_index {
            let moved = ids
                .get(last_index)
                .ok_or(VestLockError::OperationNotAllowed)?;
            ids.set(index, moved);
            Self::set_vesting_pos(env, recipient, moved, index + 1);
        }
        ids.pop_back();
        Self::set_vesting_pos(env, recipient, vesting_id, 0);
        Self::save_ids(env, recipient, &ids);

        if ids.is_empty() {
            Self::remove_recipient(env, recipient)?;
        }
        Ok(())
    }

    fn remove_recipient(env: &Env, recipient: &Address) -> Result<(), VestLockError> {
        let pos_plus_one = Self::recipient_pos(env, recipient);
        if pos_plus_one == 0 {
            return Ok(());
        }
        let index = pos_plus_one - 1;

        let mut recipients = Self::recipients(env);
        let last_index = recipients.len() - 1;
        if index != last_index {
            let moved = recipients
                .get(last_index)
                .ok_or(VestLockError::OperationNotAllowed)?;
            recipients.set(index, moved.clone());
            Self::set_recipient_pos(env, &moved, index + 1);
        }
        recipients.pop_back();
        Self::set_recipient_pos(env, recipient, 0);
        Self::save_recipients(env, &recipients);
        Ok(())
    }

    /// Number of recipients currently holding at least one vesting.
    pub fn recipient_count(env: &Env) -> u32 {
        Self::recipients(env).len()
    }

    /// Half-open page `[from, to)` of the global recipient set.
    ///
    /// # Errors
    /// * `InvalidRange` when `from >= to` or `to` exceeds the set length
    pub fn recipients_slice(
        env: &Env,
        from: u32,
        to: u32,
    ) -> Result<Vec<Address>, VestLockError> {
        let recipients = Self::recipients(env);
        if from >= to || to > recipients.len() {
            return Err(VestLockError::InvalidRange);
        }
        Ok(recipients.slice(from..to))
    }
}
