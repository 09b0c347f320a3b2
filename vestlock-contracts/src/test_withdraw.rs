#![cfg(test)]
//! Treasury withdrawals: the admin surplus line, fee-collector withdrawals,
//! and the fee-collector role handover.

use crate::errors::VestLockError;
use crate::funding::FundingMode;
use crate::init::InitializationParams;
use crate::schedule::VestingParams;
use crate::{VestLockContract, VestLockContractClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, Address, Env};

const CLAIM_FEE: i128 = 5;
const ADMIN_BALANCE: i128 = 1_000_000;

struct TreasuryContext {
    env: Env,
    client: VestLockContractClient<'static>,
    admin: Address,
    collector: Address,
    recipient: Address,
    token: token::Client<'static>,
    sac: token::StellarAssetClient<'static>,
}

fn setup() -> TreasuryContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let contract_id = env.register(VestLockContract, ());
    let client = VestLockContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let collector = Address::generate(&env);
    let recipient = Address::generate(&env);

    let token_admin = Address::generate(&env);
    let token_id = env
        .register_stellar_asset_contract_v2(token_admin.clone())
        .address();
    let sac = token::StellarAssetClient::new(&env, &token_id);
    sac.mint(&admin, &ADMIN_BALANCE);
    sac.mint(&recipient, &1_000);

    client.initialize(&InitializationParams {
        admin: admin.clone(),
        fee_collector: collector.clone(),
        token: token_id.clone(),
        funding_mode: FundingMode::Full,
        claim_fee: CLAIM_FEE,
    });

    let token = token::Client::new(&env, &token_id);
    TreasuryContext {
        env,
        client,
        admin,
        collector,
        recipient,
        token,
        sac,
    }
}

fn schedule() -> VestingParams {
    VestingParams {
        start_time: 2_000,
        end_time: 3_200,
        timelock: 0,
        initial_unlock: 100,
        cliff_release_time: 0,
        cliff_amount: 0,
        release_interval_seconds: 100,
        linear_vest_amount: 1_200,
        is_revocable: true,
    }
}

#[test]
fn test_admin_cannot_withdraw_reserved_funds() {
    let ctx = setup();
    ctx.client
        .create_vesting(&ctx.admin, &ctx.recipient, &schedule(), &1_300);

    // Everything in custody is reserved for the vesting.
    assert_eq!(ctx.client.withdrawable_amount(), 0);
    let result = ctx.client.try_withdraw_admin(&ctx.admin, &1);
    assert_eq!(result, Err(Ok(VestLockError::InsufficientBalance)));
}

#[test]
fn test_admin_withdraws_surplus_only() {
    let ctx = setup();
    ctx.client
        .create_vesting(&ctx.admin, &ctx.recipient, &schedule(), &1_300);

    // Stray donation above the reserve line.
    ctx.sac.mint(&ctx.client.address, &500);
    assert_eq!(ctx.client.withdrawable_amount(), 500);

    let too_much = ctx.client.try_withdraw_admin(&ctx.admin, &501);
    assert_eq!(too_much, Err(Ok(VestLockError::InsufficientBalance)));

    ctx.client.withdraw_admin(&ctx.admin, &500);
    assert_eq!(ctx.client.withdrawable_amount(), 0);
    assert_eq!(
        ctx.token.balance(&ctx.admin),
        ADMIN_BALANCE - 1_300 + 500
    );
}

#[test]
fn test_withdraw_admin_requires_admin() {
    let ctx = setup();
    ctx.sac.mint(&ctx.client.address, &500);

    let result = ctx.client.try_withdraw_admin(&ctx.recipient, &100);
    assert_eq!(result, Err(Ok(VestLockError::NotAdmin)));
}

#[test]
fn test_fee_withdrawal_flow() {
    let ctx = setup();
    let id = ctx
        .client
        .create_vesting(&ctx.admin, &ctx.recipient, &schedule(), &1_300);

    ctx.env.ledger().set_timestamp(2_000);
    ctx.client.claim(&ctx.recipient, &id, &CLAIM_FEE);
    ctx.env.ledger().set_timestamp(2_100);
    ctx.client.claim(&ctx.recipient, &id, &CLAIM_FEE);
    assert_eq!(ctx.client.reserved_for_fees(), 2 * CLAIM_FEE);

    // Fees are not admin surplus.
    assert_eq!(ctx.client.withdrawable_amount(), 0);

    let not_collector = ctx
        .client
        .try_withdraw_gas_fee(&ctx.admin, &ctx.admin, &CLAIM_FEE);
    assert_eq!(not_collector, Err(Ok(VestLockError::NotFeeCollector)));

    let too_much = ctx
        .client
        .try_withdraw_gas_fee(&ctx.collector, &ctx.collector, &(2 * CLAIM_FEE + 1));
    assert_eq!(too_much, Err(Ok(VestLockError::InsufficientBalance)));

    let payout_target = Address::generate(&ctx.env);
    let taken = ctx
        .client
        .withdraw_gas_fee(&ctx.collector, &payout_target, &CLAIM_FEE);
    assert_eq!(taken, CLAIM_FEE);
    assert_eq!(ctx.client.reserved_for_fees(), CLAIM_FEE);
    assert_eq!(ctx.token.balance(&payout_target), CLAIM_FEE);
}

#[test]
fn test_zero_amount_withdraws_all_fees() {
    let ctx = setup();
    let id = ctx
        .client
        .create_vesting(&ctx.admin, &ctx.recipient, &schedule(), &1_300);

    ctx.env.ledger().set_timestamp(2_000);
    ctx.client.claim(&ctx.recipient, &id, &CLAIM_FEE);

    let taken = ctx
        .client
        .withdraw_gas_fee(&ctx.collector, &ctx.collector, &0);
    assert_eq!(taken, CLAIM_FEE);
    assert_eq!(ctx.client.reserved_for_fees(), 0);
    assert_eq!(ctx.token.balance(&ctx.collector), CLAIM_FEE);
}

#[test]
fn test_fee_collector_role_handover() {
    let ctx = setup();

    let unchanged = ctx.client.try_transfer_fee_collector_role(&ctx.collector);
    assert_eq!(unchanged, Err(Ok(VestLockError::InvalidAddress)));

    let successor = Address::generate(&ctx.env);
    ctx.client.transfer_fee_collector_role(&successor);
    assert_eq!(ctx.client.get_fee_collector(), Some(successor.clone()));

    // The old collector can no longer withdraw.
    let id = ctx
        .client
        .create_vesting(&ctx.admin, &ctx.recipient, &schedule(), &1_300);
    ctx.env.ledger().set_timestamp(2_000);
    ctx.client.claim(&ctx.recipient, &id, &CLAIM_FEE);

    let old = ctx
        .client
        .try_withdraw_gas_fee(&ctx.collector, &ctx.collector, &0);
    assert_eq!(old, Err(Ok(VestLockError::NotFeeCollector)));

    let taken = ctx.client.withdraw_gas_fee(&successor, &successor, &0);
    assert_eq!(taken, CLAIM_FEE);
}

#[test]
fn test_admin_role_handover() {
    let ctx = setup();

    let successor = Address::generate(&ctx.env);
    ctx.sac.mint(&successor, &10_000);
    ctx.client.transfer_admin(&successor);
    assert_eq!(ctx.client.get_admin(), Some(successor.clone()));

    // Only the new admin can create vestings now.
    let result = ctx
        .client
        .try_create_vesting(&ctx.admin, &ctx.recipient, &schedule(), &1_300);
    assert_eq!(result, Err(Ok(VestLockError::NotAdmin)));
    ctx.client
        .create_vesting(&successor, &ctx.recipient, &schedule(), &1_300);
}
