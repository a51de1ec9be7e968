//! Scenario Tests
//!
//! End-to-end flows across the ledger, the security gate and the admin
//! controller, driven through the public `YieldPool` surface.

use crate::test_support::*;
use crate::YieldPool;
use yieldpool_common::errors::PoolError;
use yieldpool_common::events::{EventLog, EventType};

const YEAR: u64 = 52_560;
const ONE_MILLION: u64 = 1_000_000;

// ============================================================================
// Yield Accrual
// ============================================================================

#[test]
fn test_reference_yield_and_claim() {
    let mut pool = test_pool();

    // 1. Deposit one million at height 0, 500 bps
    pool.deposit(ALICE, ONE_MILLION, 0).unwrap();

    // 2. A tenth of a year later the pending yield is 5_000
    assert_eq!(pool.preview_pending_yield(&ALICE, 5_256).unwrap(), Some(5_000));

    // 3. Claim pays it out and resets the position
    let paid_before = pool.get_pool_stats().total_yield_paid;
    assert_eq!(pool.claim_yield(ALICE, 5_256).unwrap(), 5_000);

    let p = pool.get_user_position(&ALICE).unwrap();
    assert_eq!(p.accumulated_yield, 0);
    assert_eq!(p.last_settlement_height, 5_256);
    assert_eq!(p.principal_amount, ONE_MILLION);
    assert_eq!(pool.get_pool_stats().total_yield_paid, paid_before + 5_000);

    // 4. Claiming again at the same height pays nothing
    assert_eq!(pool.claim_yield(ALICE, 5_256).unwrap(), 0);
}

#[test]
fn test_rate_change_applies_to_whole_unsettled_interval() {
    let mut pool = test_pool();
    pool.deposit(ALICE, ONE_MILLION, 0).unwrap();

    // halfway through the year the rate doubles; ALICE has not settled
    pool.set_yield_rate(OWNER, 1_000, YEAR / 2).unwrap();

    // the full year accrues at the new rate: 1_000_000 * 10%
    assert_eq!(pool.claim_yield(ALICE, YEAR).unwrap(), 100_000);
}

#[test]
fn test_settling_before_rate_change_locks_old_rate() {
    let mut pool = test_pool();
    pool.deposit(ALICE, ONE_MILLION, 0).unwrap();

    // a claim settles the first half at 5%
    assert_eq!(pool.claim_yield(ALICE, YEAR / 2).unwrap(), 25_000);
    pool.set_yield_rate(OWNER, 1_000, YEAR / 2).unwrap();
    assert_eq!(pool.claim_yield(ALICE, YEAR).unwrap(), 50_000);

    assert_eq!(pool.get_pool_stats().total_yield_paid, 75_000);
}

#[test]
fn test_yield_survives_deposits_and_withdrawals() {
    let mut pool = test_pool();
    pool.deposit(ALICE, ONE_MILLION, 0).unwrap();

    // each balance change settles what accrued on the old principal
    pool.deposit(ALICE, ONE_MILLION, YEAR / 10).unwrap(); // +5_000
    pool.withdraw(ALICE, 1_500_000, YEAR / 5).unwrap(); // +10_000
    let claimed = pool.claim_yield(ALICE, YEAR / 5 + YEAR / 10).unwrap(); // +2_500

    assert_eq!(claimed, 17_500);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_deposit_boundaries() {
    let mut pool = test_pool();

    // minimum
    assert!(matches!(pool.deposit(ALICE, 99, 1), Err(PoolError::BelowMinDeposit { .. })));
    pool.deposit(ALICE, 100, 1).unwrap();

    // fill the pool to one below the cap across two depositors
    pool.deposit(ALICE, 1_999_900, 2).unwrap();
    pool.deposit(BOB, 999_999, 3).unwrap();
    assert_eq!(pool.get_pool_stats().available_capacity, 1);

    // one over fails; exactly at the cap succeeds
    assert!(matches!(pool.deposit(BOB, 101, 4), Err(PoolError::PoolFull { .. })));
    pool.set_pool_parameters(OWNER, 1, 2_000_000, 3_000_000, 5).unwrap();
    pool.deposit(BOB, 1, 6).unwrap();
    assert_eq!(pool.get_pool_stats().total_liquidity, 3_000_000);
    assert_eq!(pool.get_pool_stats().available_capacity, 0);
}

#[test]
fn test_over_withdraw_leaves_state_untouched() {
    let mut pool = test_pool();
    pool.deposit(ALICE, 5_000, 1).unwrap();

    let before = pool.state_digest().unwrap();
    assert_eq!(
        pool.withdraw(ALICE, 5_001, 10_000),
        Err(PoolError::InsufficientBalance { available: 5_000, requested: 5_001 })
    );
    assert_eq!(pool.state_digest().unwrap(), before);
    assert_eq!(pool.event_count(), 1);
}

// ============================================================================
// Security Gate
// ============================================================================

#[test]
fn test_pause_cooldown_resume() {
    let mut pool = test_pool();
    pool.deposit(ALICE, 1_000, 1).unwrap();

    // 1. Pause at 100
    pool.emergency_pause(OWNER, 100).unwrap();
    assert!(pool.security_state().emergency_paused);

    // 2. Immediate resume fails
    assert_eq!(
        pool.emergency_resume(OWNER, 100),
        Err(PoolError::CooldownActive { remaining: 144, current: 100 })
    );

    // 3. One block short of the cooldown still fails
    assert_eq!(
        pool.emergency_resume(OWNER, 243),
        Err(PoolError::CooldownActive { remaining: 1, current: 243 })
    );

    // 4. Exactly at the cooldown succeeds
    pool.emergency_resume(OWNER, 244).unwrap();
    assert!(!pool.security_state().emergency_paused);
    assert_eq!(pool.security_state().last_emergency_action_height, 244);

    // 5. Users are back in
    pool.withdraw(ALICE, 1_000, 245).unwrap();
}

#[test]
fn test_operator_pause_owner_resume() {
    let mut pool = test_pool();
    pool.add_operator(OWNER, OPERATOR, 1).unwrap();

    pool.emergency_pause(OPERATOR, 10).unwrap();
    assert_eq!(pool.deposit(ALICE, 1_000, 11), Err(PoolError::Paused));
    pool.emergency_resume(OWNER, 154).unwrap();
    pool.deposit(ALICE, 1_000, 155).unwrap();

    let pauses = pool.events().filter_by_type(EventType::EmergencyPause);
    assert_eq!(pauses.len(), 1);
    assert_eq!(pauses[0].actor, OPERATOR);
}

#[test]
fn test_inactive_reported_before_paused() {
    let mut pool = test_pool();
    pool.emergency_pause(OWNER, 1).unwrap();
    pool.set_pool_active(OWNER, false, 2).unwrap();

    assert_eq!(pool.deposit(ALICE, 1_000, 3), Err(PoolError::PoolInactive));
}

#[test]
fn test_yield_accrues_through_pause() {
    let mut pool = test_pool();
    pool.deposit(ALICE, ONE_MILLION, 0).unwrap();
    pool.emergency_pause(OWNER, 1_000).unwrap();
    pool.emergency_resume(OWNER, 5_000).unwrap();

    assert_eq!(pool.claim_yield(ALICE, YEAR).unwrap(), 50_000);
}

// ============================================================================
// Event Log
// ============================================================================

#[test]
fn test_event_ids_are_sequential() {
    let mut pool = test_pool();
    let first = pool.deposit(ALICE, 1_000, 1).unwrap().event_id;
    let second = pool.set_yield_rate(OWNER, 600, 2).unwrap();
    let third = pool.withdraw(ALICE, 500, 3).unwrap().event_id;
    let fourth = pool.emergency_pause(OWNER, 4).unwrap();

    assert_eq!((first, second, third, fourth), (0, 1, 2, 3));
    for (expected, event) in pool.events().events().iter().enumerate() {
        assert_eq!(event.id, expected as u64);
    }
}

#[test]
fn test_failed_operations_emit_nothing() {
    let mut pool = test_pool();
    pool.deposit(ALICE, 1_000, 1).unwrap();

    let _ = pool.deposit(ALICE, 1, 2);
    let _ = pool.withdraw(BOB, 1, 2);
    let _ = pool.set_yield_rate(MALLORY, 1, 2);
    let _ = pool.emergency_resume(OWNER, 2);

    assert_eq!(pool.event_count(), 1);
    assert_eq!(pool.deposit(ALICE, 1_000, 3).unwrap().event_id, 1);
}

#[test]
fn test_full_log_aborts_without_state_change() {
    let mut pool = YieldPool::genesis(OWNER, &test_config())
        .unwrap()
        .with_event_log(EventLog::bounded(2))
        .unwrap();

    pool.deposit(ALICE, 1_000, 1).unwrap();
    pool.deposit(BOB, 1_000, 2).unwrap();

    let before = pool.state_digest().unwrap();
    let exhausted = PoolError::LogFailure { next_id: 2 };

    assert_eq!(pool.deposit(ALICE, 1_000, 3), Err(exhausted.clone()));
    assert_eq!(pool.withdraw(ALICE, 1_000, 3), Err(exhausted.clone()));
    assert_eq!(pool.claim_yield(ALICE, 3), Err(exhausted.clone()));
    assert_eq!(pool.set_yield_rate(OWNER, 700, 3), Err(exhausted.clone()));
    assert_eq!(pool.emergency_pause(OWNER, 3), Err(exhausted));

    assert_eq!(pool.state_digest().unwrap(), before);
    assert_eq!(pool.snapshot_count(), 0);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_multi_depositor_lifecycle() {
    let mut pool = test_pool();

    pool.deposit(ALICE, ONE_MILLION, 0).unwrap();
    pool.deposit(BOB, 500_000, 0).unwrap();
    assert_eq!(pool.get_pool_stats().depositor_count, 2);
    assert_eq!(pool.get_pool_stats().total_liquidity, 1_500_000);
    assert_eq!(principal_sum(&pool), 1_500_000);

    pool.withdraw(BOB, 500_000, YEAR).unwrap();
    assert_eq!(pool.claim_yield(ALICE, YEAR).unwrap(), 50_000);
    assert_eq!(pool.claim_yield(BOB, YEAR).unwrap(), 25_000);

    let stats = pool.get_pool_stats();
    assert_eq!(stats.total_liquidity, ONE_MILLION);
    assert_eq!(stats.total_yield_paid, 75_000);
    // BOB keeps a zero-balance position
    assert_eq!(stats.depositor_count, 2);
    assert_eq!(principal_sum(&pool), stats.total_liquidity);

    let bob = pool.get_user_position(&BOB).unwrap();
    assert_eq!(bob.lifetime_deposits, 500_000);
    assert_eq!(bob.lifetime_withdrawals, 500_000);
}
