//! Vesting ledger: record creation, funding, claims, revocation, and
//! treasury withdrawals.
//!
//! Composes the schedule calculator, the funding accountant, and the
//! recipient index. Every value-moving operation follows
//! checks-effects-interactions: ledger state is committed before any token
//! leaves custody, and the outbound paths run under the payment guard.

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::admin::{AdminStorage, FeeCollectorStorage};
use crate::errors::VestLockError;
use crate::events;
use crate::funding::{FundingLedger, FundingMode};
use crate::init::LedgerConfig;
use crate::payments::{custody_balance, transfer_funds};
use crate::recipients::RecipientIndex;
use crate::reentrancy::with_payment_guard;
use crate::schedule::{self, VestingParams, VestingRecord};

const VESTING_COUNTER_KEY: Symbol = symbol_short!("vest_cnt");
const VESTING_KEY: Symbol = symbol_short!("vest");

pub struct VestingStorage;

impl VestingStorage {
    fn next_id(env: &Env) -> u64 {
        let next: u64 = env
            .storage()
            .instance()
            .get(&VESTING_COUNTER_KEY)
            .unwrap_or(0);
        let new_next = next.saturating_add(1);
        env.storage().instance().set(&VESTING_COUNTER_KEY, &new_next);
        new_next
    }

    fn key(vesting_id: u64) -> (Symbol, u64) {
        (VESTING_KEY, vesting_id)
    }

    pub fn store(env: &Env, record: &VestingRecord) {
        env.storage().persistent().set(&Self::key(record.id), record);
    }

    pub fn get(env: &Env, vesting_id: u64) -> Option<VestingRecord> {
        env.storage().persistent().get(&Self::key(vesting_id))
    }

    pub fn update(env: &Env, record: &VestingRecord) {
        env.storage().persistent().set(&Self::key(record.id), record);
    }

    /// Identifiers handed out so far.
    pub fn count(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&VESTING_COUNTER_KEY)
            .unwrap_or(0)
    }

    /// Fetch a record for claim/read paths; an absent identifier is an
    /// empty vesting slot.
    pub fn get_existing(env: &Env, vesting_id: u64) -> Result<VestingRecord, VestLockError> {
        Self::get(env, vesting_id).ok_or(VestLockError::EmptyVesting)
    }

    /// Fetch a record for operations that require it not to be revoked.
    pub fn get_active(env: &Env, vesting_id: u64) -> Result<VestingRecord, VestLockError> {
        let record = Self::get(env, vesting_id).ok_or(VestLockError::VestingNotActive)?;
        if !record.is_active() {
            return Err(VestLockError::VestingNotActive);
        }
        Ok(record)
    }
}

pub struct Vesting;

impl Vesting {
    /// Create a single vesting record.
    ///
    /// Under full funding the admin must supply a `deposit` equal to the
    /// schedule total, pulled into custody before the record exists; under
    /// partial funding the deposit must be zero.
    ///
    /// # Security
    /// - Requires admin authorization
    pub fn create_vesting(
        env: &Env,
        admin: &Address,
        recipient: Address,
        params: VestingParams,
        deposit: i128,
    ) -> Result<u64, VestLockError> {
        admin.require_auth();
        LedgerConfig::require_initialized(env)?;
        AdminStorage::require_admin(env, admin)?;

        Self::validate_recipient(env, &recipient)?;
        schedule::validate_params(&params)?;

        let total_required = params.total_required()?;
        if deposit != FundingLedger::required_creation_deposit(env, total_required) {
            return Err(VestLockError::InsufficientBalance);
        }

        transfer_funds(env, admin, &env.current_contract_address(), deposit)?;
        Self::create_one(env, recipient, params)
    }

    /// Create many vesting records atomically.
    ///
    /// The aggregate deposit is validated against the sum of all schedule
    /// totals and pulled in a single transfer before any record is created,
    /// so a mid-batch failure cannot leave funds partially applied.
    pub fn create_vesting_batch(
        env: &Env,
        admin: &Address,
        recipients: Vec<Address>,
        params_list: Vec<VestingParams>,
        deposit: i128,
    ) -> Result<Vec<u64>, VestLockError> {
        admin.require_auth();
        LedgerConfig::require_initialized(env)?;
        AdminStorage::require_admin(env, admin)?;

        if recipients.is_empty() {
            return Err(VestLockError::EmptyArray);
        }
        if recipients.len() != params_list.len() {
            return Err(VestLockError::ArrayLengthMismatch);
        }

        // Upfront validation pass: every schedule and the aggregate deposit.
        let mut total_batch: i128 = 0;
        for (recipient, params) in recipients.iter().zip(params_list.iter()) {
            Self::validate_recipient(env, &recipient)?;
            schedule::validate_params(&params)?;
            total_batch = total_batch
                .checked_add(params.total_required()?)
                .ok_or(VestLockError::InvalidVestedAmount)?;
        }
        if deposit != FundingLedger::required_creation_deposit(env, total_batch) {
            return Err(VestLockError::InsufficientBalance);
        }

        transfer_funds(env, admin, &env.current_contract_address(), deposit)?;

        let mut ids = Vec::new(env);
        for (recipient, params) in recipients.iter().zip(params_list.iter()) {
            ids.push_back(Self::create_one(env, recipient, params)?);
        }
        Ok(ids)
    }

    fn validate_recipient(env: &Env, recipient: &Address) -> Result<(), VestLockError> {
        if *recipient == env.current_contract_address() {
            return Err(VestLockError::InvalidAddress);
        }
        Ok(())
    }

    // Deposit has already been validated and pulled into custody.
    fn create_one(
        env: &Env,
        recipient: Address,
        params: VestingParams,
    ) -> Result<u64, VestLockError> {
        let id = VestingStorage::next_id(env);
        let total_required = params.total_required()?;

        FundingLedger::record_creation(env, id, total_required)?;

        let record = VestingRecord {
            id,
            recipient: recipient.clone(),
            start_time: params.start_time,
            end_time: params.end_time,
            deactivation_time: 0,
            timelock: params.timelock,
            initial_unlock: params.initial_unlock,
            cliff_release_time: params.cliff_release_time,
            cliff_amount: params.cliff_amount,
            release_interval_seconds: params.release_interval_seconds,
            linear_vest_amount: params.linear_vest_amount,
            claimed_amount: 0,
            is_revocable: params.is_revocable,
        };
        VestingStorage::store(env, &record);
        RecipientIndex::add(env, &recipient, id);

        events::emit_vesting_created(
            env,
            id,
            &recipient,
            total_required,
            params.start_time,
            params.end_time,
        );
        Ok(id)
    }

    /// Fund a partially funded vesting.
    ///
    /// # Security
    /// - Requires admin authorization
    pub fn fund_vesting(
        env: &Env,
        admin: &Address,
        vesting_id: u64,
        amount: i128,
    ) -> Result<(), VestLockError> {
        admin.require_auth();
        LedgerConfig::require_initialized(env)?;
        AdminStorage::require_admin(env, admin)?;

        let record =
            VestingStorage::get(env, vesting_id).ok_or(VestLockError::VestingNotActive)?;
        let funded_total = FundingLedger::apply_funding(env, &record, amount)?;
        transfer_funds(env, admin, &env.current_contract_address(), amount)?;

        events::emit_vesting_funded(env, vesting_id, funded_total, record.total_required()?);
        Ok(())
    }

    /// Fund many vestings atomically. The aggregate deposit must equal the
    /// sum of all amounts and is pulled in one transfer; zero-amount entries
    /// are skipped; any per-item failure aborts the whole batch.
    pub fn fund_vesting_batch(
        env: &Env,
        admin: &Address,
        vesting_ids: Vec<u64>,
        amounts: Vec<i128>,
        deposit: i128,
    ) -> Result<(), VestLockError> {
        admin.require_auth();
        LedgerConfig::require_initialized(env)?;
        AdminStorage::require_admin(env, admin)?;

        if vesting_ids.is_empty() {
            return Err(VestLockError::EmptyArray);
        }
        if vesting_ids.len() != amounts.len() {
            return Err(VestLockError::ArrayLengthMismatch);
        }

        let mut total: i128 = 0;
        for amount in amounts.iter() {
            total = total
                .checked_add(amount)
                .ok_or(VestLockError::InvalidVestedAmount)?;
        }
        if deposit != total {
            return Err(VestLockError::InsufficientBalance);
        }

        transfer_funds(env, admin, &env.current_contract_address(), deposit)?;

        for (vesting_id, amount) in vesting_ids.iter().zip(amounts.iter()) {
            if amount == 0 {
                continue;
            }
            let record =
                VestingStorage::get(env, vesting_id).ok_or(VestLockError::VestingNotActive)?;
            let funded_total = FundingLedger::apply_funding(env, &record, amount)?;
            events::emit_vesting_funded(env, vesting_id, funded_total, record.total_required()?);
        }
        Ok(())
    }

    /// Claim vested value as the recipient.
    ///
    /// The fee payment is pulled from the caller and accrued for the fee
    /// collector; the claimable amount is paid out to the recipient.
    pub fn claim(
        env: &Env,
        caller: &Address,
        vesting_id: u64,
        fee_payment: i128,
    ) -> Result<i128, VestLockError> {
        caller.require_auth();
        LedgerConfig::require_initialized(env)?;

        with_payment_guard(env, || {
            let mut record = VestingStorage::get_existing(env, vesting_id)?;
            if record.recipient != *caller {
                return Err(VestLockError::NotVestingOwner);
            }
            Self::settle_claim(env, caller, &mut record, fee_payment)
        })
    }

    /// Privileged claim that still pays out to the recipient, with the admin
    /// covering the fee (gas sponsorship).
    pub fn admin_claim(
        env: &Env,
        admin: &Address,
        vesting_id: u64,
        fee_payment: i128,
    ) -> Result<i128, VestLockError> {
        admin.require_auth();
        LedgerConfig::require_initialized(env)?;
        AdminStorage::require_admin(env, admin)?;

        with_payment_guard(env, || {
            let mut record = VestingStorage::get_existing(env, vesting_id)?;
            Self::settle_claim(env, admin, &mut record, fee_payment)
        })
    }

    /// Sponsored claims for many vestings. The fee payment must equal the
    /// per-claim fee times the batch size; any per-item failure aborts the
    /// whole batch.
    pub fn batch_admin_claim(
        env: &Env,
        admin: &Address,
        vesting_ids: Vec<u64>,
        fee_payment: i128,
    ) -> Result<Vec<i128>, VestLockError> {
        admin.require_auth();
        LedgerConfig::require_initialized(env)?;
        AdminStorage::require_admin(env, admin)?;

        if vesting_ids.is_empty() {
            return Err(VestLockError::EmptyArray);
        }
        let fee = LedgerConfig::claim_fee(env);
        let expected = fee
            .checked_mul(i128::from(vesting_ids.len()))
            .ok_or(VestLockError::InvalidVestedAmount)?;
        if fee_payment != expected {
            return Err(VestLockError::FeeTooLow);
        }

        with_payment_guard(env, || {
            let mut claimed = Vec::new(env);
            for vesting_id in vesting_ids.iter() {
                let mut record = VestingStorage::get_existing(env, vesting_id)?;
                claimed.push_back(Self::settle_claim(env, admin, &mut record, fee)?);
            }
            Ok(claimed)
        })
    }

    // Shared claim settlement. The payer covers the fee; the payout always
    // goes to the record's recipient. State is committed before either
    // transfer runs.
    fn settle_claim(
        env: &Env,
        payer: &Address,
        record: &mut VestingRecord,
        fee_payment: i128,
    ) -> Result<i128, VestLockError> {
        let now = env.ledger().timestamp();
        if now < record.timelock {
            return Err(VestLockError::TimelockEnabled);
        }
        if fee_payment < LedgerConfig::claim_fee(env) {
            return Err(VestLockError::InsufficientFee);
        }

        let vested = schedule::effective_vested_amount(record, now)?;
        let raw_claimable = vested - record.claimed_amount;
        if raw_claimable <= 0 {
            return Err(VestLockError::EmptyVesting);
        }
        let claimable =
            FundingLedger::claimable_ceiling(env, record.id, raw_claimable, record.claimed_amount);
        if claimable <= 0 {
            return Err(VestLockError::InsufficientFunding);
        }

        record.claimed_amount = record
            .claimed_amount
            .checked_add(claimable)
            .ok_or(VestLockError::InvalidVestedAmount)?;
        FundingLedger::sub_reserved_vesting(env, claimable)?;
        FundingLedger::add_reserved_fees(env, fee_payment)?;
        VestingStorage::update(env, record);

        let contract = env.current_contract_address();
        transfer_funds(env, payer, &contract, fee_payment)?;
        transfer_funds(env, &contract, &record.recipient, claimable)?;

        events::emit_claimed(env, record.id, &record.recipient, claimable, fee_payment);
        Ok(claimable)
    }

    /// Revoke a vesting, withholding the not-yet-vested remainder. The
    /// recipient keeps the right to claim whatever had vested before the
    /// revocation timestamp.
    ///
    /// # Security
    /// - Requires admin authorization
    pub fn revoke_vesting(
        env: &Env,
        admin: &Address,
        vesting_id: u64,
    ) -> Result<(), VestLockError> {
        admin.require_auth();
        LedgerConfig::require_initialized(env)?;
        AdminStorage::require_admin(env, admin)?;
        Self::revoke_one(env, vesting_id)
    }

    /// Revoke many vestings; any per-item failure aborts the whole batch.
    pub fn batch_revoke_vestings(
        env: &Env,
        admin: &Address,
        vesting_ids: Vec<u64>,
    ) -> Result<(), VestLockError> {
        admin.require_auth();
        LedgerConfig::require_initialized(env)?;
        AdminStorage::require_admin(env, admin)?;

        if vesting_ids.is_empty() {
            return Err(VestLockError::EmptyArray);
        }
        for vesting_id in vesting_ids.iter() {
            Self::revoke_one(env, vesting_id)?;
        }
        Ok(())
    }

    fn revoke_one(env: &Env, vesting_id: u64) -> Result<(), VestLockError> {
        let mut record = VestingStorage::get_active(env, vesting_id)?;

        let now = env.ledger().timestamp();
        if now >= record.end_time {
            return Err(VestLockError::FullyVested);
        }
        if !record.is_revocable {
            return Err(VestLockError::VestingNotRevocable);
        }

        let vested_now = schedule::vested_amount(&record, now)?;
        let total_required = record.total_required()?;
        let mut amount_withheld = total_required - vested_now;
        if FundingLedger::mode(env) == FundingMode::Partial {
            let funded_headroom =
                (FundingLedger::funded(env, vesting_id) - vested_now).max(0);
            amount_withheld = amount_withheld.min(funded_headroom);
        }

        record.deactivation_time = now;
        VestingStorage::update(env, &record);
        FundingLedger::sub_reserved_vesting(env, amount_withheld)?;

        events::emit_vesting_revoked(env, vesting_id, &record.recipient, amount_withheld, now);
        Ok(())
    }

    /// Withdraw unreserved surplus from custody.
    ///
    /// # Security
    /// - Requires admin authorization
    pub fn withdraw_admin(
        env: &Env,
        admin: &Address,
        amount: i128,
    ) -> Result<(), VestLockError> {
        admin.require_auth();
        LedgerConfig::require_initialized(env)?;
        AdminStorage::require_admin(env, admin)?;

        with_payment_guard(env, || {
            if amount <= 0 {
                return Err(VestLockError::InsufficientBalance);
            }
            let withdrawable = Self::withdrawable_amount(env)?;
            if amount > withdrawable {
                return Err(VestLockError::InsufficientBalance);
            }

            transfer_funds(env, &env.current_contract_address(), admin, amount)?;
            events::emit_admin_withdrawn(env, admin, amount);
            Ok(())
        })
    }

    /// Withdraw accrued claim fees to `recipient`. An `amount` of zero means
    /// withdraw everything accrued.
    ///
    /// # Security
    /// - Requires fee collector authorization (a role distinct from admin)
    pub fn withdraw_gas_fee(
        env: &Env,
        collector: &Address,
        recipient: &Address,
        amount: i128,
    ) -> Result<i128, VestLockError> {
        collector.require_auth();
        LedgerConfig::require_initialized(env)?;
        FeeCollectorStorage::require_collector(env, collector)?;

        with_payment_guard(env, || {
            let accrued = FundingLedger::reserved_for_fees(env);
            let requested = if amount == 0 { accrued } else { amount };
            if requested < 0 || requested > accrued {
                return Err(VestLockError::InsufficientBalance);
            }

            FundingLedger::sub_reserved_fees(env, requested)?;
            transfer_funds(env, &env.current_contract_address(), recipient, requested)?;
            events::emit_gas_fee_withdrawn(env, collector, recipient, requested);
            Ok(requested)
        })
    }

    /// Claimable amount right now: vested minus claimed, clamped by funding.
    pub fn claimable_amount(env: &Env, vesting_id: u64) -> Result<i128, VestLockError> {
        let record = VestingStorage::get_existing(env, vesting_id)?;
        let vested = schedule::effective_vested_amount(&record, env.ledger().timestamp())?;
        let raw_claimable = (vested - record.claimed_amount).max(0);
        Ok(FundingLedger::claimable_ceiling(
            env,
            vesting_id,
            raw_claimable,
            record.claimed_amount,
        ))
    }

    /// Custody balance not owed to recipients or the fee collector.
    pub fn withdrawable_amount(env: &Env) -> Result<i128, VestLockError> {
        let balance = custody_balance(env)?;
        let reserved = FundingLedger::reserved_for_vesting(env)
            .checked_add(FundingLedger::reserved_for_fees(env))
            .ok_or(VestLockError::InvalidVestedAmount)?;
        Ok(balance - reserved)
    }
}
