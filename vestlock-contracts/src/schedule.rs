//! Release-schedule mathematics for vesting records.
//!
//! A schedule combines three unlock mechanisms: an initial unlock available
//! at `start_time`, an optional cliff lump sum at `cliff_release_time`, and a
//! linear portion released in whole steps of `release_interval_seconds`.
//! `vested_amount` is a pure function of a record and a reference time so the
//! same math backs claims, revocations, and read-only queries.

use crate::errors::VestLockError;
use soroban_sdk::{contracttype, Address};

/// One vesting position. Schedule fields are immutable after creation; only
/// `claimed_amount` grows and `deactivation_time` receives a single terminal
/// write on revocation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingRecord {
    pub id: u64,
    pub recipient: Address,
    pub start_time: u64,
    pub end_time: u64,
    /// 0 while active; the revocation timestamp once revoked.
    pub deactivation_time: u64,
    /// Absolute floor below which no claim is permitted, independent of the
    /// vesting math.
    pub timelock: u64,
    pub initial_unlock: i128,
    /// 0 means no cliff (and forces `cliff_amount` to 0).
    pub cliff_release_time: u64,
    pub cliff_amount: i128,
    pub release_interval_seconds: u64,
    pub linear_vest_amount: i128,
    pub claimed_amount: i128,
    pub is_revocable: bool,
}

/// Schedule parameters supplied at creation time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingParams {
    pub start_time: u64,
    pub end_time: u64,
    pub timelock: u64,
    pub initial_unlock: i128,
    pub cliff_release_time: u64,
    pub cliff_amount: i128,
    pub release_interval_seconds: u64,
    pub linear_vest_amount: i128,
    pub is_revocable: bool,
}

impl VestingRecord {
    /// Active means not revoked. Fully-claimed records stay "active" but
    /// become inert because nothing remains to claim.
    pub fn is_active(&self) -> bool {
        self.deactivation_time == 0
    }

    pub fn has_cliff(&self) -> bool {
        self.cliff_release_time != 0
    }

    /// `initial_unlock + cliff_amount + linear_vest_amount`, invariant after
    /// creation.
    pub fn total_required(&self) -> Result<i128, VestLockError> {
        schedule_total(self.initial_unlock, self.cliff_amount, self.linear_vest_amount)
    }
}

impl VestingParams {
    pub fn total_required(&self) -> Result<i128, VestLockError> {
        schedule_total(self.initial_unlock, self.cliff_amount, self.linear_vest_amount)
    }
}

fn schedule_total(
    initial_unlock: i128,
    cliff_amount: i128,
    linear_vest_amount: i128,
) -> Result<i128, VestLockError> {
    initial_unlock
        .checked_add(cliff_amount)
        .and_then(|sum| sum.checked_add(linear_vest_amount))
        .ok_or(VestLockError::InvalidVestedAmount)
}

/// Validate creation parameters against the schedule invariants.
///
/// Checks, in order: all three unlock components non-negative and not all
/// zero, `start_time > 0`, `start_time <= end_time` (strictly below when a
/// linear amount exists), a positive release interval, cliff consistency,
/// and that the interval evenly divides the linear span.
pub fn validate_params(params: &VestingParams) -> Result<(), VestLockError> {
    if params.initial_unlock < 0 || params.cliff_amount < 0 || params.linear_vest_amount < 0 {
        return Err(VestLockError::InvalidVestedAmount);
    }
    if params.total_required()? == 0 {
        return Err(VestLockError::InvalidVestedAmount);
    }
    if params.start_time == 0 {
        return Err(VestLockError::InvalidStartTimestamp);
    }
    if params.start_time > params.end_time {
        return Err(VestLockError::InvalidEndTimestamp);
    }
    if params.start_time == params.end_time && params.linear_vest_amount != 0 {
        return Err(VestLockError::InvalidEndTimestamp);
    }
    if params.release_interval_seconds == 0 {
        return Err(VestLockError::InvalidReleaseInterval);
    }

    if params.cliff_release_time == 0 {
        if params.cliff_amount != 0 {
            return Err(VestLockError::InvalidCliffAmount);
        }
        if (params.end_time - params.start_time) % params.release_interval_seconds != 0 {
            return Err(VestLockError::InvalidIntervalLength);
        }
    } else {
        if params.cliff_release_time <= params.start_time
            || params.cliff_release_time >= params.end_time
        {
            return Err(VestLockError::InvalidCliffRelease);
        }
        if params.cliff_amount == 0 {
            return Err(VestLockError::InvalidCliffAmount);
        }
        if (params.end_time - params.cliff_release_time) % params.release_interval_seconds != 0 {
            return Err(VestLockError::InvalidIntervalLength);
        }
    }

    Ok(())
}

/// Total amount vested by `reference_time`.
///
/// Monotonically non-decreasing in `reference_time` and capped at the
/// schedule total once `end_time` is reached. The linear portion accrues in
/// whole interval steps only: elapsed time below one full interval
/// contributes nothing (integer truncation, no rounding).
pub fn vested_amount(record: &VestingRecord, reference_time: u64) -> Result<i128, VestLockError> {
    if reference_time < record.start_time {
        return Ok(0);
    }

    let mut amount = record.initial_unlock;

    if record.has_cliff() && reference_time >= record.cliff_release_time {
        amount = amount
            .checked_add(record.cliff_amount)
            .ok_or(VestLockError::InvalidVestedAmount)?;
    }

    let linear_start = if record.has_cliff() {
        record.cliff_release_time
    } else {
        record.start_time
    };

    if record.linear_vest_amount > 0 && reference_time >= linear_start {
        if record.release_interval_seconds == 0 {
            return Err(VestLockError::InvalidReleaseInterval);
        }
        let accrued = if record.end_time <= linear_start {
            // Degenerate span: everything vests at once.
            record.linear_vest_amount
        } else {
            let total_steps = (record.end_time - linear_start) / record.release_interval_seconds;
            let elapsed_steps =
                ((reference_time - linear_start) / record.release_interval_seconds).min(total_steps);
            record
                .linear_vest_amount
                .checked_mul(i128::from(elapsed_steps))
                .ok_or(VestLockError::InvalidVestedAmount)?
                / i128::from(total_steps)
        };
        amount = amount
            .checked_add(accrued)
            .ok_or(VestLockError::InvalidVestedAmount)?;
    }

    Ok(amount)
}

/// Vested amount at the reference time that claims settle against: `now` for
/// an active record, the revocation timestamp for a revoked one.
pub fn effective_vested_amount(record: &VestingRecord, now: u64) -> Result<i128, VestLockError> {
    let reference_time = if record.is_active() {
        now
    } else {
        record.deactivation_time
    };
    vested_amount(record, reference_time)
}
