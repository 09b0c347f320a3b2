//! Event emission helpers for the VestLock contract.
//!
//! Every state transition publishes one event carrying the identifiers and
//! amounts needed to reconstruct ledger state from the event log. Topics are
//! short symbols; payloads are flat tuples ending with the ledger timestamp.

use soroban_sdk::{symbol_short, Address, Env};

/// Emitted when a vesting record is created.
pub fn emit_vesting_created(
    env: &Env,
    vesting_id: u64,
    recipient: &Address,
    total_amount: i128,
    start_time: u64,
    end_time: u64,
) {
    env.events().publish(
        (symbol_short!("vest_new"),),
        (
            vesting_id,
            recipient.clone(),
            total_amount,
            start_time,
            end_time,
            env.ledger().timestamp(),
        ),
    );
}

/// Emitted on each funding increment with the new cumulative funded total.
pub fn emit_vesting_funded(env: &Env, vesting_id: u64, funded_total: i128, total_required: i128) {
    env.events().publish(
        (symbol_short!("vest_fund"),),
        (
            vesting_id,
            funded_total,
            total_required,
            env.ledger().timestamp(),
        ),
    );
}

/// Emitted when vested value is paid out to a recipient.
pub fn emit_claimed(env: &Env, vesting_id: u64, recipient: &Address, amount: i128, fee: i128) {
    env.events().publish(
        (symbol_short!("claimed"),),
        (
            vesting_id,
            recipient.clone(),
            amount,
            fee,
            env.ledger().timestamp(),
        ),
    );
}

/// Emitted when a vesting is revoked, carrying the withheld amount.
pub fn emit_vesting_revoked(
    env: &Env,
    vesting_id: u64,
    recipient: &Address,
    amount_withheld: i128,
    deactivation_time: u64,
) {
    env.events().publish(
        (symbol_short!("vest_rvk"),),
        (
            vesting_id,
            recipient.clone(),
            amount_withheld,
            deactivation_time,
        ),
    );
}

/// Emitted when a two-phase ownership transfer is initiated.
pub fn emit_transfer_initiated(env: &Env, vesting_id: u64, from: &Address, to: &Address) {
    env.events().publish(
        (symbol_short!("xfer_init"),),
        (
            vesting_id,
            from.clone(),
            to.clone(),
            env.ledger().timestamp(),
        ),
    );
}

/// Emitted when a pending ownership transfer is cancelled.
pub fn emit_transfer_cancelled(env: &Env, vesting_id: u64, recipient: &Address) {
    env.events().publish(
        (symbol_short!("xfer_cncl"),),
        (vesting_id, recipient.clone(), env.ledger().timestamp()),
    );
}

/// Emitted when ownership of a vesting changes hands (accept or direct).
pub fn emit_vesting_transferred(env: &Env, vesting_id: u64, from: &Address, to: &Address) {
    env.events().publish(
        (symbol_short!("vest_xfer"),),
        (
            vesting_id,
            from.clone(),
            to.clone(),
            env.ledger().timestamp(),
        ),
    );
}

/// Emitted when the admin withdraws unreserved surplus.
pub fn emit_admin_withdrawn(env: &Env, admin: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("adm_wdrw"),),
        (admin.clone(), amount, env.ledger().timestamp()),
    );
}

/// Emitted when the fee collector withdraws accrued claim fees.
pub fn emit_gas_fee_withdrawn(env: &Env, collector: &Address, recipient: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("fee_wdrw"),),
        (
            collector.clone(),
            recipient.clone(),
            amount,
            env.ledger().timestamp(),
        ),
    );
}

/// Emitted when the fee collector role is handed over.
pub fn emit_fee_collector_updated(env: &Env, old_collector: &Address, new_collector: &Address) {
    env.events().publish(
        (symbol_short!("fee_coll"),),
        (
            old_collector.clone(),
            new_collector.clone(),
            env.ledger().timestamp(),
        ),
    );
}
