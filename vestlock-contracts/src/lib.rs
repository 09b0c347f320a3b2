#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

mod admin;
mod errors;
mod events;
mod funding;
mod init;
mod payments;
mod recipients;
mod reentrancy;
mod schedule;
mod transfer;
mod vesting;

#[cfg(test)]
mod test_funding;
#[cfg(test)]
mod test_init;
#[cfg(test)]
mod test_withdraw;

use admin::{AdminStorage, FeeCollectorStorage};
use errors::VestLockError;
use funding::{FundingLedger, FundingMode};
use init::{InitializationParams, LedgerConfig};
use recipients::RecipientIndex;
use schedule::{VestingParams, VestingRecord};
use transfer::TransferWorkflow;
use vesting::{Vesting, VestingStorage};

#[contract]
pub struct VestLockContract;

#[contractimpl]
impl VestLockContract {
    // ============================================================================
    // Initialization & Roles
    // ============================================================================

    /// Initialize the vesting treasury (one-time setup).
    pub fn initialize(env: Env, params: InitializationParams) -> Result<(), VestLockError> {
        params.admin.require_auth();
        LedgerConfig::initialize(&env, &params)
    }

    /// Check if the contract has been initialized.
    pub fn is_initialized(env: Env) -> bool {
        LedgerConfig::is_initialized(&env)
    }

    /// Get the current admin address.
    pub fn get_admin(env: Env) -> Option<Address> {
        AdminStorage::get_admin(&env)
    }

    /// Transfer the admin role to a new address (current admin only).
    pub fn transfer_admin(env: Env, new_admin: Address) -> Result<(), VestLockError> {
        let current_admin = AdminStorage::get_admin(&env).ok_or(VestLockError::NotAdmin)?;
        AdminStorage::set_admin(&env, &current_admin, &new_admin)
    }

    /// Get the current fee collector address.
    pub fn get_fee_collector(env: Env) -> Option<Address> {
        FeeCollectorStorage::get_collector(&env)
    }

    /// Hand the fee collector role to a new address (current collector only,
    /// single step).
    pub fn transfer_fee_collector_role(
        env: Env,
        new_collector: Address,
    ) -> Result<(), VestLockError> {
        let current = FeeCollectorStorage::get_collector(&env)
            .ok_or(VestLockError::NotFeeCollector)?;
        FeeCollectorStorage::transfer_role(&env, &current, &new_collector)
    }

    /// The deployment-wide funding regime.
    pub fn get_funding_mode(env: Env) -> FundingMode {
        FundingLedger::mode(&env)
    }

    /// The fixed per-claim fee.
    pub fn get_claim_fee(env: Env) -> i128 {
        LedgerConfig::claim_fee(&env)
    }

    // ============================================================================
    // Vesting Creation & Funding
    // ============================================================================

    /// Create a vesting record for `recipient` (admin only). Under full
    /// funding `deposit` must equal the schedule total; under partial
    /// funding it must be zero.
    pub fn create_vesting(
        env: Env,
        admin: Address,
        recipient: Address,
        params: VestingParams,
        deposit: i128,
    ) -> Result<u64, VestLockError> {
        Vesting::create_vesting(&env, &admin, recipient, params, deposit)
    }

    /// Create many vesting records atomically (admin only). `recipients`
    /// and `params_list` are parallel vectors; `deposit` must cover the
    /// aggregate schedule total under full funding.
    pub fn create_vesting_batch(
        env: Env,
        admin: Address,
        recipients: Vec<Address>,
        params_list: Vec<VestingParams>,
        deposit: i128,
    ) -> Result<Vec<u64>, VestLockError> {
        Vesting::create_vesting_batch(&env, &admin, recipients, params_list, deposit)
    }

    /// Fund a vesting under the partial regime (admin only).
    pub fn fund_vesting(
        env: Env,
        admin: Address,
        vesting_id: u64,
        amount: i128,
    ) -> Result<(), VestLockError> {
        Vesting::fund_vesting(&env, &admin, vesting_id, amount)
    }

    /// Fund many vestings atomically (admin only). `deposit` must equal the
    /// sum of `amounts`; zero-amount entries are skipped.
    pub fn fund_vesting_batch(
        env: Env,
        admin: Address,
        vesting_ids: Vec<u64>,
        amounts: Vec<i128>,
        deposit: i128,
    ) -> Result<(), VestLockError> {
        Vesting::fund_vesting_batch(&env, &admin, vesting_ids, amounts, deposit)
    }

    // ============================================================================
    // Claims
    // ============================================================================

    /// Claim vested value as the recipient, paying the per-claim fee.
    /// Returns the amount paid out.
    pub fn claim(
        env: Env,
        caller: Address,
        vesting_id: u64,
        fee_payment: i128,
    ) -> Result<i128, VestLockError> {
        Vesting::claim(&env, &caller, vesting_id, fee_payment)
    }

    /// Trigger a payout to the recipient on their behalf, with the admin
    /// covering the claim fee (admin only).
    pub fn admin_claim(
        env: Env,
        admin: Address,
        vesting_id: u64,
        fee_payment: i128,
    ) -> Result<i128, VestLockError> {
        Vesting::admin_claim(&env, &admin, vesting_id, fee_payment)
    }

    /// Sponsored claims for many vestings (admin only). `fee_payment` must
    /// equal the per-claim fee times the batch size.
    pub fn batch_admin_claim(
        env: Env,
        admin: Address,
        vesting_ids: Vec<u64>,
        fee_payment: i128,
    ) -> Result<Vec<i128>, VestLockError> {
        Vesting::batch_admin_claim(&env, &admin, vesting_ids, fee_payment)
    }

    // ============================================================================
    // Revocation & Withdrawals
    // ============================================================================

    /// Revoke a revocable vesting, withholding the unvested remainder
    /// (admin only).
    pub fn revoke_vesting(env: Env, admin: Address, vesting_id: u64) -> Result<(), VestLockError> {
        Vesting::revoke_vesting(&env, &admin, vesting_id)
    }

    /// Revoke many vestings atomically (admin only).
    pub fn batch_revoke_vestings(
        env: Env,
        admin: Address,
        vesting_ids: Vec<u64>,
    ) -> Result<(), VestLockError> {
        Vesting::batch_revoke_vestings(&env, &admin, vesting_ids)
    }

    /// Withdraw custody balance not reserved for vestings or fees
    /// (admin only).
    pub fn withdraw_admin(env: Env, admin: Address, amount: i128) -> Result<(), VestLockError> {
        Vesting::withdraw_admin(&env, &admin, amount)
    }

    /// Withdraw accrued claim fees to `recipient` (fee collector only).
    /// An `amount` of zero withdraws everything accrued; returns the amount
    /// transferred.
    pub fn withdraw_gas_fee(
        env: Env,
        collector: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<i128, VestLockError> {
        Vesting::withdraw_gas_fee(&env, &collector, &recipient, amount)
    }

    // ============================================================================
    // Ownership Transfer
    // ============================================================================

    /// Propose transferring a vesting to a new owner (current recipient
    /// only).
    pub fn initiate_transfer(
        env: Env,
        caller: Address,
        vesting_id: u64,
        new_owner: Address,
    ) -> Result<(), VestLockError> {
        TransferWorkflow::initiate(&env, &caller, vesting_id, &new_owner)
    }

    /// Withdraw an open transfer proposal (current recipient only).
    pub fn cancel_transfer(env: Env, caller: Address, vesting_id: u64) -> Result<(), VestLockError> {
        TransferWorkflow::cancel(&env, &caller, vesting_id)
    }

    /// Accept an open transfer proposal (proposed owner only).
    pub fn accept_transfer(env: Env, caller: Address, vesting_id: u64) -> Result<(), VestLockError> {
        TransferWorkflow::accept(&env, &caller, vesting_id)
    }

    /// Transfer a vesting without the pending phase (current recipient
    /// only).
    pub fn direct_transfer(
        env: Env,
        caller: Address,
        vesting_id: u64,
        new_owner: Address,
    ) -> Result<(), VestLockError> {
        TransferWorkflow::direct_transfer(&env, &caller, vesting_id, &new_owner)
    }

    /// The proposed new owner for a vesting, if a transfer is pending.
    pub fn pending_transfer(env: Env, vesting_id: u64) -> Option<Address> {
        TransferWorkflow::pending(&env, vesting_id)
    }

    // ============================================================================
    // Queries
    // ============================================================================

    /// Fetch a vesting record.
    pub fn get_vesting(env: Env, vesting_id: u64) -> Option<VestingRecord> {
        VestingStorage::get(&env, vesting_id)
    }

    /// Cumulative amount funded into a vesting.
    pub fn get_funding(env: Env, vesting_id: u64) -> i128 {
        FundingLedger::funded(&env, vesting_id)
    }

    /// Number of vesting identifiers handed out so far.
    pub fn vesting_count(env: Env) -> u64 {
        VestingStorage::count(&env)
    }

    /// Amount claimable right now (vested minus claimed, clamped by
    /// funding).
    pub fn claimable_amount(env: Env, vesting_id: u64) -> Result<i128, VestLockError> {
        Vesting::claimable_amount(&env, vesting_id)
    }

    /// Vested amount of a vesting at an arbitrary reference time.
    pub fn vested_amount_at(
        env: Env,
        vesting_id: u64,
        reference_time: u64,
    ) -> Result<i128, VestLockError> {
        let record = VestingStorage::get_existing(&env, vesting_id)?;
        schedule::vested_amount(&record, reference_time)
    }

    /// Custody amount owed to active funded vestings, not yet claimed.
    pub fn reserved_for_vesting(env: Env) -> i128 {
        FundingLedger::reserved_for_vesting(&env)
    }

    /// Claim fees accrued for the fee collector.
    pub fn reserved_for_fees(env: Env) -> i128 {
        FundingLedger::reserved_for_fees(&env)
    }

    /// Custody balance above both reserves (admin-withdrawable surplus).
    pub fn withdrawable_amount(env: Env) -> Result<i128, VestLockError> {
        Vesting::withdrawable_amount(&env)
    }

    /// Half-open page `[from, to)` of the recipients holding vestings.
    pub fn get_recipients(env: Env, from: u32, to: u32) -> Result<Vec<Address>, VestLockError> {
        RecipientIndex::recipients_slice(&env, from, to)
    }

    /// Number of recipients holding at least one vesting.
    pub fn recipient_count(env: Env) -> u32 {
        RecipientIndex::recipient_count(&env)
    }

    /// Vesting identifiers currently owned by `recipient`.
    pub fn get_vestings_for(env: Env, recipient: Address) -> Vec<u64> {
        RecipientIndex::ids_for(&env, &recipient)
    }
}
