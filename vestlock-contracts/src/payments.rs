//! Custody transfers of the configured token.
//!
//! All value movement goes through `transfer_funds` so the token client and
//! the configured asset stay in one place.

use crate::errors::VestLockError;
use crate::init::LedgerConfig;
use soroban_sdk::{token, Address, Env};

/// Move `amount` of the custody token between two addresses.
///
/// A zero amount is a no-op; a negative amount fails with `TransferFailed`
/// before reaching the token contract.
pub fn transfer_funds(
    env: &Env,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), VestLockError> {
    if amount < 0 {
        return Err(VestLockError::TransferFailed);
    }
    if amount == 0 {
        return Ok(());
    }

    let asset = LedgerConfig::token(env)?;
    let client = token::Client::new(env, &asset);
    client.transfer(from, to, &amount);
    Ok(())
}

/// Balance of the custody token held by this contract.
pub fn custody_balance(env: &Env) -> Result<i128, VestLockError> {
    let asset = LedgerConfig::token(env)?;
    let client = token::Client::new(env, &asset);
    Ok(client.balance(&env.current_contract_address()))
}
