//! Contract initialization for the VestLock vesting treasury.
//!
//! One-time setup of the roles, the custody token, the funding regime, and
//! the per-claim fee. The funding mode is fixed per deployment; it is not a
//! per-vesting choice.
//!
//! # Initialization Flow
//!
//! 1. Call `initialize()` with all required parameters
//! 2. Inputs are validated and the initialization flag is checked
//! 3. On success, all configuration is stored atomically
//!
//! Re-initialization fails, and every state-changing entrypoint requires
//! initialization to have happened first.

use crate::admin::{AdminStorage, FeeCollectorStorage};
use crate::errors::VestLockError;
use crate::funding::{FundingLedger, FundingMode};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

/// Storage key for the initialization flag
const INITIALIZED_KEY: Symbol = symbol_short!("vl_init");

/// Storage key for the custody token address
const TOKEN_KEY: Symbol = symbol_short!("token");

/// Storage key for the fixed per-claim fee
const CLAIM_FEE_KEY: Symbol = symbol_short!("claim_fee");

/// Initialization parameters, bundled so setup is atomic.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializationParams {
    /// Privileged caller for create/fund/revoke/sponsor/withdraw operations
    pub admin: Address,
    /// Role allowed to withdraw accrued claim fees
    pub fee_collector: Address,
    /// The single fungible asset held in custody
    pub token: Address,
    /// Full (prepaid at creation) or Partial (incremental) funding regime
    pub funding_mode: FundingMode,
    /// Fixed fee charged on every claim, accrued for the fee collector
    pub claim_fee: i128,
}

/// Deployment-wide configuration storage.
pub struct LedgerConfig;

impl LedgerConfig {
    /// Initialize the contract with all required configuration.
    ///
    /// # Returns
    /// * `Ok(())` if initialization succeeds
    /// * `Err(VestLockError::OperationNotAllowed)` if already initialized
    /// * `Err(VestLockError::FeeTooLow)` if the claim fee is negative
    pub fn initialize(env: &Env, params: &InitializationParams) -> Result<(), VestLockError> {
        if Self::is_initialized(env) {
            return Err(VestLockError::OperationNotAllowed);
        }
        if params.claim_fee < 0 {
            return Err(VestLockError::FeeTooLow);
        }

        AdminStorage::initialize(env, &params.admin)?;
        FeeCollectorStorage::initialize(env, &params.fee_collector);
        FundingLedger::set_mode(env, params.funding_mode.clone());

        env.storage().instance().set(&TOKEN_KEY, &params.token);
        env.storage().instance().set(&CLAIM_FEE_KEY, &params.claim_fee);
        env.storage().instance().set(&INITIALIZED_KEY, &true);

        Ok(())
    }

    /// Check if the contract has been initialized.
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().get(&INITIALIZED_KEY).unwrap_or(false)
    }

    /// Reject operations before initialization has happened.
    pub fn require_initialized(env: &Env) -> Result<(), VestLockError> {
        if !Self::is_initialized(env) {
            return Err(VestLockError::OperationNotAllowed);
        }
        Ok(())
    }

    /// The custody token address.
    pub fn token(env: &Env) -> Result<Address, VestLockError> {
        env.storage()
            .instance()
            .get(&TOKEN_KEY)
            .ok_or(VestLockError::OperationNotAllowed)
    }

    /// The fixed per-claim fee.
    pub fn claim_fee(env: &Env) -> i128 {
        env.storage().instance().get(&CLAIM_FEE_KEY).unwrap_or(0)
    }
}
