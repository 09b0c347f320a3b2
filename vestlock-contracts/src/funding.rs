//! Funding accountant: per-vesting funding records and ledger-wide reserves.
//!
//! Two deployment-wide regimes exist. Under `Full` funding the entire
//! schedule total is deposited when a vesting is created. Under `Partial`
//! funding the issuer deposits incrementally and claimable amounts are capped
//! by what has actually arrived. In both regimes the reserves guarantee
//! `custody balance >= reserved_for_vesting + reserved_for_fees`; only the
//! surplus above that line is admin-withdrawable.

use crate::errors::VestLockError;
use crate::schedule::VestingRecord;
use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

const FUNDING_MODE_KEY: Symbol = symbol_short!("fund_mode");
const FUNDING_KEY: Symbol = symbol_short!("vst_fnd");
const RESERVED_VESTING_KEY: Symbol = symbol_short!("rsv_vest");
const RESERVED_FEES_KEY: Symbol = symbol_short!("rsv_fees");

/// Funding regime, fixed per deployment at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FundingMode {
    /// The full schedule total must be deposited at creation time.
    Full,
    /// Deposits arrive incrementally; claims are capped by funding.
    Partial,
}

/// Funding state and reserve accounting.
pub struct FundingLedger;

impl FundingLedger {
    pub fn set_mode(env: &Env, mode: FundingMode) {
        env.storage().instance().set(&FUNDING_MODE_KEY, &mode);
    }

    pub fn mode(env: &Env) -> FundingMode {
        env.storage()
            .instance()
            .get(&FUNDING_MODE_KEY)
            .unwrap_or(FundingMode::Full)
    }

    fn funding_key(vesting_id: u64) -> (Symbol, u64) {
        (FUNDING_KEY, vesting_id)
    }

    /// Cumulative amount funded into a vesting so far.
    pub fn funded(env: &Env, vesting_id: u64) -> i128 {
        env.storage()
            .persistent()
            .get(&Self::funding_key(vesting_id))
            .unwrap_or(0)
    }

    fn set_funded(env: &Env, vesting_id: u64, amount: i128) {
        env.storage()
            .persistent()
            .set(&Self::funding_key(vesting_id), &amount);
    }

    pub fn reserved_for_vesting(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&RESERVED_VESTING_KEY)
            .unwrap_or(0)
    }

    pub fn reserved_for_fees(env: &Env) -> i128 {
        env.storage().instance().get(&RESERVED_FEES_KEY).unwrap_or(0)
    }

    pub fn add_reserved_vesting(env: &Env, amount: i128) -> Result<(), VestLockError> {
        let updated = Self::reserved_for_vesting(env)
            .checked_add(amount)
            .ok_or(VestLockError::InvalidVestedAmount)?;
        env.storage().instance().set(&RESERVED_VESTING_KEY, &updated);
        Ok(())
    }

    pub fn sub_reserved_vesting(env: &Env, amount: i128) -> Result<(), VestLockError> {
        let current = Self::reserved_for_vesting(env);
        if amount > current {
            return Err(VestLockError::InsufficientBalance);
        }
        env.storage()
            .instance()
            .set(&RESERVED_VESTING_KEY, &(current - amount));
        Ok(())
    }

    pub fn add_reserved_fees(env: &Env, amount: i128) -> Result<(), VestLockError> {
        let updated = Self::reserved_for_fees(env)
            .checked_add(amount)
            .ok_or(VestLockError::InvalidVestedAmount)?;
        env.storage().instance().set(&RESERVED_FEES_KEY, &updated);
        Ok(())
    }

    pub fn sub_reserved_fees(env: &Env, amount: i128) -> Result<(), VestLockError> {
        let current = Self::reserved_for_fees(env);
        if amount > current {
            return Err(VestLockError::InsufficientBalance);
        }
        env.storage()
            .instance()
            .set(&RESERVED_FEES_KEY, &(current - amount));
        Ok(())
    }

    /// The deposit a creation call must supply for a schedule totalling
    /// `total_required`: the whole total under `Full`, nothing under
    /// `Partial`.
    pub fn required_creation_deposit(env: &Env, total_required: i128) -> i128 {
        match Self::mode(env) {
            FundingMode::Full => total_required,
            FundingMode::Partial => 0,
        }
    }

    /// Record the funding state of a freshly created vesting. Under `Full`
    /// the record is marked fully funded and the whole total is reserved;
    /// under `Partial` it starts at zero.
    pub fn record_creation(
        env: &Env,
        vesting_id: u64,
        total_required: i128,
    ) -> Result<(), VestLockError> {
        match Self::mode(env) {
            FundingMode::Full => {
                Self::set_funded(env, vesting_id, total_required);
                Self::add_reserved_vesting(env, total_required)
            }
            FundingMode::Partial => {
                Self::set_funded(env, vesting_id, 0);
                Ok(())
            }
        }
    }

    /// Apply one funding increment, returning the new cumulative total.
    ///
    /// # Errors
    /// * `VestingFullyFunded` under `Full` mode, on a revoked record, or when
    ///   the record already holds its full total
    /// * `InsufficientBalance` when no positive amount is supplied
    /// * `FundingLimitExceeded` when `amount` overshoots the remaining gap
    pub fn apply_funding(
        env: &Env,
        record: &VestingRecord,
        amount: i128,
    ) -> Result<i128, VestLockError> {
        if Self::mode(env) == FundingMode::Full {
            return Err(VestLockError::VestingFullyFunded);
        }
        if !record.is_active() {
            return Err(VestLockError::VestingFullyFunded);
        }

        let total_required = record.total_required()?;
        let current = Self::funded(env, record.id);
        if current >= total_required {
            return Err(VestLockError::VestingFullyFunded);
        }
        if amount <= 0 {
            return Err(VestLockError::InsufficientBalance);
        }
        if amount > total_required - current {
            return Err(VestLockError::FundingLimitExceeded);
        }

        let updated = current + amount;
        Self::set_funded(env, record.id, updated);
        Self::add_reserved_vesting(env, amount)?;
        Ok(updated)
    }

    /// Clamp a raw claimable amount by what has actually been funded. Under
    /// `Full` mode funding always covers the vested amount by construction,
    /// so no clamp applies.
    pub fn claimable_ceiling(
        env: &Env,
        vesting_id: u64,
        raw_claimable: i128,
        claimed_amount: i128,
    ) -> i128 {
        match Self::mode(env) {
            FundingMode::Full => raw_claimable,
            FundingMode::Partial => {
                let funded_headroom = (Self::funded(env, vesting_id) - claimed_amount).max(0);
                raw_claimable.min(funded_headroom)
            }
        }
    }
}
