#![cfg(test)]
//! Initialization flow: one-time setup, configuration getters, and the
//! pre-initialization gate on mutating entrypoints.

use crate::errors::VestLockError;
use crate::funding::FundingMode;
use crate::init::InitializationParams;
use crate::schedule::VestingParams;
use crate::{VestLockContract, VestLockContractClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};

fn params(env: &Env, claim_fee: i128) -> InitializationParams {
    InitializationParams {
        admin: Address::generate(env),
        fee_collector: Address::generate(env),
        token: Address::generate(env),
        funding_mode: FundingMode::Full,
        claim_fee,
    }
}

fn register() -> (Env, VestLockContractClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);
    let contract_id = env.register(VestLockContract, ());
    let client = VestLockContractClient::new(&env, &contract_id);
    (env, client)
}

#[test]
fn test_initialize_stores_configuration() {
    let (env, client) = register();
    let init = params(&env, 7);

    assert!(!client.is_initialized());
    client.initialize(&init);

    assert!(client.is_initialized());
    assert_eq!(client.get_admin(), Some(init.admin.clone()));
    assert_eq!(client.get_fee_collector(), Some(init.fee_collector.clone()));
    assert_eq!(client.get_funding_mode(), FundingMode::Full);
    assert_eq!(client.get_claim_fee(), 7);
}

#[test]
fn test_reinitialize_fails() {
    let (env, client) = register();
    client.initialize(&params(&env, 0));

    let result = client.try_initialize(&params(&env, 0));
    assert_eq!(result, Err(Ok(VestLockError::OperationNotAllowed)));
}

#[test]
fn test_negative_claim_fee_rejected() {
    let (env, client) = register();

    let result = client.try_initialize(&params(&env, -1));
    assert_eq!(result, Err(Ok(VestLockError::FeeTooLow)));
    assert!(!client.is_initialized());
}

#[test]
fn test_operations_require_initialization() {
    let (env, client) = register();
    let caller = Address::generate(&env);
    let recipient = Address::generate(&env);

    let schedule = VestingParams {
        start_time: 2_000,
        end_time: 3_000,
        timelock: 0,
        initial_unlock: 100,
        cliff_release_time: 0,
        cliff_amount: 0,
        release_interval_seconds: 100,
        linear_vest_amount: 0,
        is_revocable: true,
    };

    let create = client.try_create_vesting(&caller, &recipient, &schedule, &100);
    assert_eq!(create, Err(Ok(VestLockError::OperationNotAllowed)));

    let claim = client.try_claim(&caller, &1, &0);
    assert_eq!(claim, Err(Ok(VestLockError::OperationNotAllowed)));

    let revoke = client.try_revoke_vesting(&caller, &1);
    assert_eq!(revoke, Err(Ok(VestLockError::OperationNotAllowed)));

    let withdraw = client.try_withdraw_admin(&caller, &1);
    assert_eq!(withdraw, Err(Ok(VestLockError::OperationNotAllowed)));
}

#[test]
fn test_partial_mode_stored() {
    let (env, client) = register();
    let mut init = params(&env, 0);
    init.funding_mode = FundingMode::Partial;
    client.initialize(&init);

    assert_eq!(client.get_funding_mode(), FundingMode::Partial);
}
