#![cfg(test)]
//! Incremental funding under the partial regime: caps, gap validation,
//! reserve accounting, and atomic batch funding.

use crate::errors::VestLockError;
use crate::funding::FundingMode;
use crate::init::InitializationParams;
use crate::schedule::VestingParams;
use crate::{VestLockContract, VestLockContractClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, vec, Address, Env};

const ADMIN_BALANCE: i128 = 1_000_000;

fn setup(
    mode: FundingMode,
) -> (
    Env,
    VestLockContractClient<'static>,
    Address,
    Address,
    token::Client<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let contract_id = env.register(VestLockContract, ());
    let client = VestLockContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let recipient = Address::generate(&env);

    let token_admin = Address::generate(&env);
    let token_id = env
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    token::StellarAssetClient::new(&env, &token_id).mint(&admin, &ADMIN_BALANCE);

    client.initialize(&InitializationParams {
        admin: admin.clone(),
        fee_collector: Address::generate(&env),
        token: token_id.clone(),
        funding_mode: mode,
        claim_fee: 0,
    });

    let token_client = token::Client::new(&env, &token_id);
    (env, client, admin, recipient, token_client)
}

// 1_200 linear over 12 intervals, nothing else.
fn schedule() -> VestingParams {
    VestingParams {
        start_time: 2_000,
        end_time: 3_200,
        timelock: 0,
        initial_unlock: 0,
        cliff_release_time: 0,
        cliff_amount: 0,
        release_interval_seconds: 100,
        linear_vest_amount: 1_200,
        is_revocable: true,
    }
}

#[test]
fn test_fund_increments_and_reserves() {
    let (_env, client, admin, recipient, token_client) = setup(FundingMode::Partial);
    let id = client.create_vesting(&admin, &recipient, &schedule(), &0);

    client.fund_vesting(&admin, &id, &400);
    assert_eq!(client.get_funding(&id), 400);
    assert_eq!(client.reserved_for_vesting(), 400);
    assert_eq!(token_client.balance(&client.address), 400);

    client.fund_vesting(&admin, &id, &300);
    assert_eq!(client.get_funding(&id), 700);
    assert_eq!(client.reserved_for_vesting(), 700);
    assert_eq!(token_client.balance(&client.address), 700);
}

#[test]
fn test_fund_rejects_overshoot_then_accepts_exact_gap() {
    let (_env, client, admin, recipient, _token_client) = setup(FundingMode::Partial);
    let id = client.create_vesting(&admin, &recipient, &schedule(), &0);

    client.fund_vesting(&admin, &id, &1_000);

    // 201 overshoots the remaining 200.
    let result = client.try_fund_vesting(&admin, &id, &201);
    assert_eq!(result, Err(Ok(VestLockError::FundingLimitExceeded)));

    // The exact remaining gap succeeds and closes the record.
    client.fund_vesting(&admin, &id, &200);
    assert_eq!(client.get_funding(&id), 1_200);

    let result = client.try_fund_vesting(&admin, &id, &1);
    assert_eq!(result, Err(Ok(VestLockError::VestingFullyFunded)));
}

#[test]
fn test_fund_rejects_full_mode() {
    let (_env, client, admin, recipient, _token_client) = setup(FundingMode::Full);
    let id = client.create_vesting(&admin, &recipient, &schedule(), &1_200);

    let result = client.try_fund_vesting(&admin, &id, &100);
    assert_eq!(result, Err(Ok(VestLockError::VestingFullyFunded)));
}

#[test]
fn test_fund_rejects_zero_amount() {
    let (_env, client, admin, recipient, _token_client) = setup(FundingMode::Partial);
    let id = client.create_vesting(&admin, &recipient, &schedule(), &0);

    let result = client.try_fund_vesting(&admin, &id, &0);
    assert_eq!(result, Err(Ok(VestLockError::InsufficientBalance)));
}

#[test]
fn test_fund_rejects_revoked_and_unknown_records() {
    let (_env, client, admin, recipient, _token_client) = setup(FundingMode::Partial);
    let id = client.create_vesting(&admin, &recipient, &schedule(), &0);
    client.revoke_vesting(&admin, &id);

    // A revoked record counts as fully funded for the accountant.
    let revoked = client.try_fund_vesting(&admin, &id, &100);
    assert_eq!(revoked, Err(Ok(VestLockError::VestingFullyFunded)));

    let unknown = client.try_fund_vesting(&admin, &99, &100);
    assert_eq!(unknown, Err(Ok(VestLockError::VestingNotActive)));
}

#[test]
fn test_fund_requires_admin() {
    let (env, client, admin, recipient, _token_client) = setup(FundingMode::Partial);
    let id = client.create_vesting(&admin, &recipient, &schedule(), &0);

    let intruder = Address::generate(&env);
    let result = client.try_fund_vesting(&intruder, &id, &100);
    assert_eq!(result, Err(Ok(VestLockError::NotAdmin)));
}

#[test]
fn test_batch_fund_applies_and_skips_zero_entries() {
    let (env, client, admin, recipient, token_client) = setup(FundingMode::Partial);
    let first = client.create_vesting(&admin, &recipient, &schedule(), &0);
    let second = client.create_vesting(&admin, &recipient, &schedule(), &0);
    let third = client.create_vesting(&admin, &recipient, &schedule(), &0);

    client.fund_vesting_batch(
        &admin,
        &vec![&env, first, second, third],
        &vec![&env, 500, 0, 700],
        &1_200,
    );

    assert_eq!(client.get_funding(&first), 500);
    assert_eq!(client.get_funding(&second), 0);
    assert_eq!(client.get_funding(&third), 700);
    assert_eq!(client.reserved_for_vesting(), 1_200);
    assert_eq!(token_client.balance(&client.address), 1_200);
}

#[test]
fn test_batch_fund_validates_inputs() {
    let (env, client, admin, recipient, _token_client) = setup(FundingMode::Partial);
    let id = client.create_vesting(&admin, &recipient, &schedule(), &0);

    let empty = client.try_fund_vesting_batch(&admin, &vec![&env], &vec![&env], &0);
    assert_eq!(empty, Err(Ok(VestLockError::EmptyArray)));

    let mismatched =
        client.try_fund_vesting_batch(&admin, &vec![&env, id], &vec![&env, 100, 200], &300);
    assert_eq!(mismatched, Err(Ok(VestLockError::ArrayLengthMismatch)));

    let wrong_deposit =
        client.try_fund_vesting_batch(&admin, &vec![&env, id], &vec![&env, 100], &99);
    assert_eq!(wrong_deposit, Err(Ok(VestLockError::InsufficientBalance)));
}

#[test]
fn test_batch_fund_aborts_atomically() {
    let (env, client, admin, recipient, token_client) = setup(FundingMode::Partial);
    let first = client.create_vesting(&admin, &recipient, &schedule(), &0);
    let second = client.create_vesting(&admin, &recipient, &schedule(), &0);

    // Second entry overshoots its schedule total; the whole batch must roll
    // back, including the first entry's already-applied increment.
    let result = client.try_fund_vesting_batch(
        &admin,
        &vec![&env, first, second],
        &vec![&env, 500, 1_300],
        &1_800,
    );
    assert_eq!(result, Err(Ok(VestLockError::FundingLimitExceeded)));

    assert_eq!(client.get_funding(&first), 0);
    assert_eq!(client.get_funding(&second), 0);
    assert_eq!(client.reserved_for_vesting(), 0);
    assert_eq!(token_client.balance(&client.address), 0);
}
