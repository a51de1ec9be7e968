//! Property Tests
//!
//! Random operation sequences against the ledger, checking the
//! conservation and monotonicity properties after every step.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::test_support::*;
use crate::YieldPool;
use yieldpool_common::errors::PoolResult;
use yieldpool_common::types::{Address, Position};

const USERS: [Address; 3] = [ALICE, BOB, MALLORY];

#[derive(Debug, Clone)]
enum Op {
    Deposit(usize, u64),
    Withdraw(usize, u64),
    Claim(usize),
    SetRate(bool, u64),
    Pause(bool),
    Resume(bool),
    SetActive(bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..USERS.len(), 0u64..=2_500_000).prop_map(|(u, a)| Op::Deposit(u, a)),
        3 => (0..USERS.len(), 0u64..=2_500_000).prop_map(|(u, a)| Op::Withdraw(u, a)),
        2 => (0..USERS.len()).prop_map(Op::Claim),
        1 => (any::<bool>(), 0u64..=12_000).prop_map(|(o, r)| Op::SetRate(o, r)),
        1 => any::<bool>().prop_map(Op::Pause),
        1 => any::<bool>().prop_map(Op::Resume),
        1 => any::<bool>().prop_map(Op::SetActive),
    ]
}

/// Steps of (operation, blocks advanced before it)
fn sequence_strategy() -> impl Strategy<Value = Vec<(Op, u64)>> {
    prop::collection::vec((op_strategy(), 0u64..400), 1..60)
}

fn admin(as_owner: bool) -> Address {
    if as_owner {
        OWNER
    } else {
        MALLORY
    }
}

/// Apply `op`; returns the identity whose yield a successful claim reset
fn apply(pool: &mut YieldPool, op: &Op, now: u64) -> PoolResult<Option<Address>> {
    match *op {
        Op::Deposit(u, amount) => pool.deposit(USERS[u], amount, now).map(|_| None),
        Op::Withdraw(u, amount) => pool.withdraw(USERS[u], amount, now).map(|_| None),
        Op::Claim(u) => pool.claim_yield(USERS[u], now).map(|_| Some(USERS[u])),
        Op::SetRate(o, rate) => pool.set_yield_rate(admin(o), rate, now).map(|_| None),
        Op::Pause(o) => pool.emergency_pause(admin(o), now).map(|_| None),
        Op::Resume(o) => pool.emergency_resume(admin(o), now).map(|_| None),
        Op::SetActive(active) => pool.set_pool_active(OWNER, active, now).map(|_| None),
    }
}

fn snapshot_positions(pool: &YieldPool) -> BTreeMap<Address, Position> {
    pool.positions().map(|(a, p)| (*a, p.clone())).collect()
}

proptest! {
    #[test]
    fn prop_ledger_invariants_hold(steps in sequence_strategy()) {
        let mut pool = test_pool();
        let mut now = 0u64;

        for (op, advance) in &steps {
            now += advance;

            let before_positions = snapshot_positions(&pool);
            let before_stats = pool.get_pool_stats();
            let before_digest = pool.state_digest().unwrap();

            let result = apply(&mut pool, op, now);
            let stats = pool.get_pool_stats();

            // conservation
            prop_assert_eq!(stats.total_liquidity, principal_sum(&pool));
            prop_assert!(stats.total_liquidity <= stats.max_pool_size);

            match &result {
                Ok(_) => prop_assert_eq!(stats.event_count, before_stats.event_count + 1),
                Err(_) => {
                    prop_assert_eq!(stats.event_count, before_stats.event_count);
                    prop_assert_eq!(pool.state_digest().unwrap(), before_digest);
                }
            }

            // lifetime counters never go backwards
            prop_assert!(stats.total_yield_paid >= before_stats.total_yield_paid);
            prop_assert!(stats.depositor_count >= before_stats.depositor_count);

            let claimed_by = result.ok().flatten();
            for (identity, old) in &before_positions {
                let new = pool.get_user_position(identity);
                prop_assert!(new.is_some(), "positions are never removed");
                let new = new.unwrap();

                prop_assert!(new.lifetime_deposits >= old.lifetime_deposits);
                prop_assert!(new.lifetime_withdrawals >= old.lifetime_withdrawals);
                prop_assert!(new.last_settlement_height <= now);
                prop_assert_eq!(
                    new.principal_amount,
                    new.lifetime_deposits - new.lifetime_withdrawals
                );

                if claimed_by == Some(*identity) {
                    prop_assert_eq!(new.accumulated_yield, 0);
                } else {
                    prop_assert!(new.accumulated_yield >= old.accumulated_yield);
                }
            }
        }
    }

    #[test]
    fn prop_claim_pays_previewed_amount(
        amount in 100u64..=2_000_000,
        elapsed in 0u64..200_000,
        rate in 0u64..=10_000,
    ) {
        let mut pool = test_pool();
        pool.set_yield_rate(OWNER, rate, 0).unwrap();
        pool.deposit(ALICE, amount, 0).unwrap();

        let preview = pool.preview_pending_yield(&ALICE, elapsed).unwrap();
        let claimed = pool.claim_yield(ALICE, elapsed).unwrap();

        prop_assert_eq!(preview, Some(claimed));
        prop_assert_eq!(pool.get_pool_stats().total_yield_paid, claimed);
        // a second claim at the same height finds nothing left
        prop_assert_eq!(pool.claim_yield(ALICE, elapsed).unwrap(), 0);
    }
}
