//! Role management for the VestLock vesting treasury.
//!
//! Two privileged roles exist:
//!
//! - **Admin**: creates, funds, and revokes vestings, sponsors claims, and
//!   withdraws the unreserved surplus.
//! - **Fee collector**: withdraws accrued claim fees. Deliberately distinct
//!   from the admin so fee custody can be delegated without granting
//!   schedule control.
//!
//! # Storage Design
//!
//! Uses instance storage for:
//! - Admin address (single source of truth)
//! - Fee collector address
//! - Initialization flag (prevents re-initialization)

use crate::errors::VestLockError;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

/// Storage keys for role management
pub const ADMIN_KEY: Symbol = symbol_short!("admin");
pub const ADMIN_INITIALIZED_KEY: Symbol = symbol_short!("adm_init");
pub const FEE_COLLECTOR_KEY: Symbol = symbol_short!("collector");

/// Admin storage and management operations
pub struct AdminStorage;

impl AdminStorage {
    /// Initialize the admin address (can only be called once).
    ///
    /// # Returns
    /// * `Ok(())` if initialization succeeds
    /// * `Err(VestLockError::OperationNotAllowed)` if admin was already set
    pub fn initialize(env: &Env, admin: &Address) -> Result<(), VestLockError> {
        // Auth is handled by LedgerConfig::initialize

        let is_initialized: bool = env
            .storage()
            .instance()
            .get(&ADMIN_INITIALIZED_KEY)
            .unwrap_or(false);

        if is_initialized {
            return Err(VestLockError::OperationNotAllowed);
        }

        env.storage().instance().set(&ADMIN_KEY, admin);
        env.storage().instance().set(&ADMIN_INITIALIZED_KEY, &true);

        emit_admin_set(env, admin);

        Ok(())
    }

    /// Transfer the admin role to a new address.
    ///
    /// # Security
    /// - Requires authorization from the current admin
    /// - Emits an event for the audit trail
    pub fn set_admin(
        env: &Env,
        current_admin: &Address,
        new_admin: &Address,
    ) -> Result<(), VestLockError> {
        current_admin.require_auth();

        if !Self::is_admin(env, current_admin) {
            return Err(VestLockError::NotAdmin);
        }
        if new_admin == current_admin {
            return Err(VestLockError::InvalidAddress);
        }

        env.storage().instance().set(&ADMIN_KEY, new_admin);

        emit_admin_transferred(env, current_admin, new_admin);

        Ok(())
    }

    /// Get the current admin address, if set.
    pub fn get_admin(env: &Env) -> Option<Address> {
        env.storage().instance().get(&ADMIN_KEY)
    }

    /// Check if an address is the admin.
    pub fn is_admin(env: &Env, address: &Address) -> bool {
        if let Some(admin) = Self::get_admin(env) {
            admin == *address
        } else {
            false
        }
    }

    /// Require that an address is the admin (authorization helper).
    ///
    /// # Usage
    /// ```ignore
    /// AdminStorage::require_admin(&env, &caller)?;
    /// ```
    pub fn require_admin(env: &Env, address: &Address) -> Result<(), VestLockError> {
        if !Self::is_admin(env, address) {
            return Err(VestLockError::NotAdmin);
        }
        Ok(())
    }
}

/// Fee collector storage and management operations
pub struct FeeCollectorStorage;

impl FeeCollectorStorage {
    /// Set the initial fee collector. Called once during initialization.
    pub fn initialize(env: &Env, collector: &Address) {
        env.storage().instance().set(&FEE_COLLECTOR_KEY, collector);
    }

    /// Get the current fee collector address, if set.
    pub fn get_collector(env: &Env) -> Option<Address> {
        env.storage().instance().get(&FEE_COLLECTOR_KEY)
    }

    /// Require that an address is the fee collector.
    pub fn require_collector(env: &Env, address: &Address) -> Result<(), VestLockError> {
        match Self::get_collector(env) {
            Some(collector) if collector == *address => Ok(()),
            _ => Err(VestLockError::NotFeeCollector),
        }
    }

    /// Single-step handover of the fee collector role (no accept phase).
    ///
    /// # Security
    /// - Requires authorization from the current collector
    pub fn transfer_role(
        env: &Env,
        current_collector: &Address,
        new_collector: &Address,
    ) -> Result<(), VestLockError> {
        current_collector.require_auth();
        Self::require_collector(env, current_collector)?;

        if new_collector == current_collector {
            return Err(VestLockError::InvalidAddress);
        }

        env.storage().instance().set(&FEE_COLLECTOR_KEY, new_collector);

        crate::events::emit_fee_collector_updated(env, current_collector, new_collector);

        Ok(())
    }
}

/// Emit event when admin is first initialized
fn emit_admin_set(env: &Env, admin: &Address) {
    env.events().publish(
        (symbol_short!("adm_set"),),
        (admin.clone(), env.ledger().timestamp()),
    );
}

/// Emit event when admin role is transferred
fn emit_admin_transferred(env: &Env, old_admin: &Address, new_admin: &Address) {
    env.events().publish(
        (symbol_short!("adm_trf"),),
        (
            old_admin.clone(),
            new_admin.clone(),
            env.ledger().timestamp(),
        ),
    );
}
