//! End-to-end pool sequences against an in-memory vault.
//!
//! `Ledger` runs the same state transitions as the instruction handlers and,
//! like the runtime, commits an operation only if every step succeeds. Ledger
//! entries are kept as raw account data and read back through the same
//! loaders the handlers use, so an account that never deposited looks like a
//! missing PDA.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use proptest::prelude::*;

use crate::error::PoolError;
use crate::state::{Pool, RoleRegistry, Staker};
use crate::test_utils::{assert_pool_error, entry_data, AccountInfoBuf};

/// One whole token with 9 decimals
const TOKEN: u64 = 1_000_000_000;

struct Ledger {
    pool: Pool,
    roles: RoleRegistry,
    /// Entry account data by owner, absent until the first deposit
    stakers: BTreeMap<Pubkey, Vec<u8>>,
    vault: u64,
    clock: i64,
}

impl Ledger {
    fn new(admin: Pubkey) -> Self {
        let mut roles = RoleRegistry {
            admin,
            ..Default::default()
        };
        roles.grant_distributor(admin).unwrap();

        Self {
            pool: Pool::default(),
            roles,
            stakers: BTreeMap::new(),
            vault: 0,
            clock: 0,
        }
    }

    fn tick(&mut self) -> i64 {
        self.clock += 1;
        self.clock
    }

    /// The entry account of `user` as the runtime would hand it over
    fn entry(&self, user: &Pubkey) -> AccountInfoBuf {
        match self.stakers.get(user) {
            Some(data) => AccountInfoBuf::new(crate::ID, data.clone()),
            None => AccountInfoBuf::new(system_program::ID, Vec::new()),
        }
    }

    fn deposit(&mut self, user: Pubkey, amount: u64) -> Result<()> {
        let now = self.tick();
        let mut pool = self.pool.clone();
        let mut staker = Staker::load(&self.entry(&user).info())?.unwrap_or(Staker {
            owner: user,
            ..Default::default()
        });

        let new_staker = !staker.has_active_stake();
        staker.record_deposit(amount, pool.distribution_rate, now)?;
        pool.record_deposit(amount, new_staker)?;
        let vault = self.vault.checked_add(amount).ok_or(PoolError::MathOverflow)?;

        self.pool = pool;
        self.stakers.insert(user, entry_data(&staker));
        self.vault = vault;
        Ok(())
    }

    fn distribute(&mut self, caller: Pubkey, amount: u64) -> Result<()> {
        self.roles.require_distributor(&caller)?;

        let now = self.tick();
        let mut pool = self.pool.clone();
        pool.record_distribution(amount, now)?;
        let vault = self.vault.checked_add(amount).ok_or(PoolError::MathOverflow)?;

        self.pool = pool;
        self.vault = vault;
        Ok(())
    }

    fn withdraw(&mut self, user: Pubkey) -> Result<u64> {
        let mut pool = self.pool.clone();
        let mut staker = Staker::load_active(&self.entry(&user).info())?;
        require!(staker.owner == user, PoolError::InvalidAuthority);

        let (stake, reward) = staker.settle_withdrawal(pool.distribution_rate)?;
        pool.record_withdrawal(stake)?;
        let payout = stake.checked_add(reward).ok_or(PoolError::MathOverflow)?;
        let vault = self.vault.checked_sub(payout).ok_or(PoolError::MathUnderflow)?;

        self.pool = pool;
        self.stakers.insert(user, entry_data(&staker));
        self.vault = vault;
        Ok(payout)
    }

    fn current_reward(&self, user: &Pubkey) -> u64 {
        Staker::reward_at(&self.entry(user).info(), self.pool.distribution_rate).unwrap()
    }

    fn active_stake(&self, user: &Pubkey) -> u64 {
        Staker::load(&self.entry(user).info())
            .unwrap()
            .map_or(0, |s| s.active_stake)
    }

    /// vault - (total stake + every pending reward), panics if negative
    fn dust(&self) -> u64 {
        let owed: u64 = self.pool.total_active_stake
            + self
                .stakers
                .keys()
                .map(|k| self.current_reward(k))
                .sum::<u64>();
        assert!(owed <= self.vault, "owed {} exceeds vault {}", owed, self.vault);
        self.vault - owed
    }
}

fn accounts() -> (Pubkey, Pubkey, Pubkey) {
    (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique())
}

#[test]
fn two_stakers_share_one_distribution() {
    let (team, a, b) = accounts();
    let mut ledger = Ledger::new(team);

    ledger.deposit(a, 100 * TOKEN).unwrap();
    ledger.deposit(b, 300 * TOKEN).unwrap();
    ledger.distribute(team, 200 * TOKEN).unwrap();

    assert_eq!(ledger.current_reward(&a), 50 * TOKEN);
    assert_eq!(ledger.current_reward(&b), 150 * TOKEN);

    assert_eq!(ledger.withdraw(a).unwrap(), 150 * TOKEN);
    assert_eq!(ledger.withdraw(b).unwrap(), 450 * TOKEN);
    assert_eq!(ledger.vault, 0);
    assert_eq!(ledger.pool.total_active_stake, 0);
    assert_eq!(ledger.pool.staker_count, 0);
}

#[test]
fn second_deposit_does_not_change_reward() {
    let (team, a, b) = accounts();
    let mut ledger = Ledger::new(team);

    ledger.deposit(a, 100 * TOKEN).unwrap();
    ledger.deposit(b, 100 * TOKEN).unwrap();
    ledger.distribute(team, 50 * TOKEN).unwrap();
    assert_eq!(ledger.current_reward(&a), 25 * TOKEN);

    ledger.deposit(a, 100 * TOKEN).unwrap();
    assert_eq!(ledger.active_stake(&a), 200 * TOKEN);
    assert_eq!(ledger.current_reward(&a), 25 * TOKEN);
}

#[test]
fn distribution_into_empty_pool_changes_nothing() {
    let (team, _, _) = accounts();
    let mut ledger = Ledger::new(team);

    assert_pool_error(ledger.distribute(team, 10 * TOKEN), PoolError::NoActiveStakers);
    assert_eq!(ledger.pool.distribution_rate, 0);
    assert_eq!(ledger.vault, 0);
}

#[test]
fn zero_deposit_changes_nothing() {
    let (team, a, _) = accounts();
    let mut ledger = Ledger::new(team);
    ledger.deposit(a, 5 * TOKEN).unwrap();

    assert_pool_error(ledger.deposit(a, 0), PoolError::InvalidAmount);
    assert_eq!(ledger.active_stake(&a), 5 * TOKEN);
    assert_eq!(ledger.pool.total_active_stake, 5 * TOKEN);
    assert_eq!(ledger.vault, 5 * TOKEN);
}

#[test]
fn distribution_requires_role() {
    let (team, a, b) = accounts();
    let mut ledger = Ledger::new(team);
    ledger.deposit(a, 100 * TOKEN).unwrap();

    assert_pool_error(ledger.distribute(b, 10 * TOKEN), PoolError::Unauthorized);
    assert_eq!(ledger.pool.distribution_rate, 0);

    ledger.roles.grant_distributor(b).unwrap();
    ledger.distribute(b, 10 * TOKEN).unwrap();
    assert_eq!(ledger.current_reward(&a), 10 * TOKEN);
}

#[test]
fn withdraw_without_stake_is_rejected() {
    let (team, a, _) = accounts();
    let mut ledger = Ledger::new(team);

    assert_pool_error(ledger.withdraw(a), PoolError::NoActiveStake);

    ledger.deposit(a, TOKEN).unwrap();
    ledger.withdraw(a).unwrap();
    assert_pool_error(ledger.withdraw(a), PoolError::NoActiveStake);
}

#[test]
fn two_distributions_leave_only_dust() {
    let (team, a, b) = accounts();
    let mut ledger = Ledger::new(team);

    ledger.deposit(a, 200 * TOKEN).unwrap();
    ledger.deposit(b, 400 * TOKEN).unwrap();
    ledger.distribute(team, 100 * TOKEN).unwrap();
    ledger.distribute(team, 300 * TOKEN).unwrap();

    assert_eq!(ledger.withdraw(a).unwrap(), 333_333_333_333);
    assert_eq!(ledger.withdraw(b).unwrap(), 666_666_666_666);
    assert_eq!(ledger.vault, 1);
}

#[test]
fn reentering_after_withdraw_starts_fresh() {
    let (team, a, b) = accounts();
    let mut ledger = Ledger::new(team);

    ledger.deposit(a, 200 * TOKEN).unwrap();
    ledger.deposit(b, 800 * TOKEN).unwrap();
    ledger.distribute(team, 200 * TOKEN).unwrap();
    assert_eq!(ledger.withdraw(a).unwrap(), 240 * TOKEN);

    ledger.distribute(team, 300 * TOKEN).unwrap();
    ledger.deposit(a, 100 * TOKEN).unwrap();
    assert_eq!(ledger.current_reward(&a), 0);

    assert_eq!(ledger.withdraw(b).unwrap(), 1260 * TOKEN);
    assert_eq!(ledger.withdraw(a).unwrap(), 100 * TOKEN);
    assert_eq!(ledger.vault, 0);
}

#[test]
fn repeat_deposits_before_distribution() {
    let (team, a, b) = accounts();
    let mut ledger = Ledger::new(team);

    ledger.deposit(a, 100 * TOKEN).unwrap();
    ledger.deposit(a, 100 * TOKEN).unwrap();
    ledger.deposit(b, 100 * TOKEN).unwrap();
    ledger.distribute(team, 100 * TOKEN).unwrap();

    assert_eq!(ledger.withdraw(a).unwrap(), 266_666_666_666);
    assert_eq!(ledger.withdraw(b).unwrap(), 133_333_333_333);
    assert_eq!(ledger.vault, 1);
}

#[test]
fn never_staked_account_owes_and_is_owed_nothing() {
    let (team, a, b) = accounts();
    let mut ledger = Ledger::new(team);

    ledger.deposit(b, 100 * TOKEN).unwrap();
    ledger.distribute(team, 50 * TOKEN).unwrap();
    assert_eq!(ledger.current_reward(&a), 0);

    // joining after the distribution earns none of it
    ledger.deposit(a, 100 * TOKEN).unwrap();
    assert_eq!(ledger.current_reward(&a), 0);
}

#[test]
fn single_unit_deposits_cannot_overdraw_vault() {
    let (team, a, b) = accounts();
    let mut ledger = Ledger::new(team);

    ledger.deposit(b, 2).unwrap();
    ledger.distribute(team, 1).unwrap();
    ledger.deposit(a, 1).unwrap();
    ledger.deposit(a, 1).unwrap();

    assert_eq!(ledger.current_reward(&a), 0);
    assert_eq!(ledger.current_reward(&b), 1);
    assert_eq!(ledger.dust(), 0);

    assert_eq!(ledger.withdraw(b).unwrap(), 3);
    assert_eq!(ledger.withdraw(a).unwrap(), 2);
    assert_eq!(ledger.vault, 0);
}

#[derive(Debug, Clone)]
enum Op {
    Deposit(usize, u64),
    Distribute(u64),
    Withdraw(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4, 1u64..1_000 * TOKEN).prop_map(|(who, amt)| Op::Deposit(who, amt)),
        (1u64..500 * TOKEN).prop_map(Op::Distribute),
        (0usize..4).prop_map(Op::Withdraw),
    ]
}

proptest! {
    #[test]
    fn value_is_conserved(ops in proptest::collection::vec(op_strategy(), 1..64)) {
        let team = Pubkey::new_unique();
        let users: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let mut ledger = Ledger::new(team);
        let mut rounding_steps = 0u64;

        for op in ops {
            let rate_before = ledger.pool.distribution_rate;

            match op {
                Op::Deposit(who, amount) => {
                    ledger.deposit(users[who], amount).unwrap();
                }
                Op::Distribute(amount) => {
                    if ledger.pool.total_active_stake == 0 {
                        prop_assert!(ledger.distribute(team, amount).is_err());
                    } else {
                        ledger.distribute(team, amount).unwrap();
                        rounding_steps += 1;
                    }
                }
                Op::Withdraw(who) => {
                    let stake = ledger.active_stake(&users[who]);
                    let reward = ledger.current_reward(&users[who]);
                    match ledger.withdraw(users[who]) {
                        Ok(payout) => {
                            prop_assert_eq!(payout, stake + reward);
                            prop_assert_eq!(ledger.active_stake(&users[who]), 0);
                            prop_assert_eq!(ledger.current_reward(&users[who]), 0);
                            rounding_steps += 1;
                        }
                        Err(_) => prop_assert_eq!(stake, 0),
                    }
                }
            }

            prop_assert!(ledger.pool.distribution_rate >= rate_before);

            let summed: u64 = ledger.stakers.keys().map(|k| ledger.active_stake(k)).sum();
            prop_assert_eq!(summed, ledger.pool.total_active_stake);

            // each distribution and each payout may strand less than one unit,
            // plus under one unit per open position
            let dust = ledger.dust();
            prop_assert!(dust <= rounding_steps + users.len() as u64);
        }
    }
}
