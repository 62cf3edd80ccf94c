#![no_std]

//! # Delegatable Token
//!
//! Fungible registry token whose holders delegate their balance through any
//! number of delegation trackers at once (up to `max_user_delegations`).
//!
//! The token drives each tracker directly:
//! - `delegate` hands the tracker the holder's current balance with the
//!   chosen delegatee.
//! - Every mint, burn and transfer is forwarded to the trackers of both
//!   sides.
//! - `undelegate` clears the holder at the tracker.
//!
//! Tracker calls are best-effort. A tracker that reverts loses the
//! notification and the token operation itself goes through. Running out of
//! budget inside a tracker aborts the whole transaction, so holders can
//! always leave a tracker with `force_undelegate` / `force_undelegate_all`,
//! which drop the membership without calling it.

pub mod events;

use common::best_effort;
use common::fanout;
use common::ledger::{self, LedgerError};
use common::member_set::{MemberSet, MemberSetError};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

// ── Storage key constants ─────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const NAME: Symbol = symbol_short!("NAME");
const SYMBOL: Symbol = symbol_short!("SYMBOL");
const MAX_USER_DELEGATIONS: Symbol = symbol_short!("MAX_DLG");

const TRACKERS: MemberSet = MemberSet::new(symbol_short!("USR_DLG"), symbol_short!("USR_IDX"));

const DECIMALS: u32 = 7;

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    DelegationNotExist = 20,
    SameDelegateeAssigned = 30,
    InvalidAmount = 31,
    InvalidDelegationAddress = 32,
    MaxUserDelegationsReached = 40,
    InsufficientBalance = 50,
    BalanceOverflow = 51,
}

fn map_ledger_error(err: LedgerError) -> ContractError {
    match err {
        LedgerError::NegativeAmount => ContractError::InvalidAmount,
        LedgerError::InsufficientBalance => ContractError::InsufficientBalance,
        LedgerError::Overflow => ContractError::BalanceOverflow,
    }
}

fn map_member_set_error(err: MemberSetError) -> ContractError {
    match err {
        MemberSetError::CapacityReached => ContractError::MaxUserDelegationsReached,
    }
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct DelegatableTokenContract;

#[contractimpl]
impl DelegatableTokenContract {
    pub fn initialize(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
        max_user_delegations: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage()
            .instance()
            .set(&MAX_USER_DELEGATIONS, &max_user_delegations);
        env.storage().instance().set(&INITIALIZED, &true);
        common::extend_instance(&env);

        events::publish_initialized(&env, &admin, max_user_delegations);
        Ok(())
    }

    // ── Supply and transfers ──────────────────────────────────────────────────

    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), ContractError> {
        let admin = Self::require_admin(&env)?;
        admin.require_auth();
        Self::move_balance(&env, None, Some(&to), amount)
    }

    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        Self::move_balance(&env, Some(&from), None, amount)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        Self::move_balance(&env, Some(&from), Some(&to), amount)
    }

    // ── Delegation ────────────────────────────────────────────────────────────

    /// Delegate `account`'s balance to `delegatee` through `tracker`.
    ///
    /// A tracker the account already uses is redelegated in place and does
    /// not count against the cap.
    pub fn delegate(
        env: Env,
        account: Address,
        tracker: Address,
        delegatee: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        if tracker == env.current_contract_address() {
            return Err(ContractError::InvalidDelegationAddress);
        }

        if TRACKERS.contains(&env, &account, &tracker) {
            if best_effort::delegated(&env, &tracker, &account) == Some(Some(delegatee.clone())) {
                return Err(ContractError::SameDelegateeAssigned);
            }
        } else {
            TRACKERS
                .insert(&env, &account, &tracker, Self::max_user_delegations(env.clone()))
                .map_err(map_member_set_error)?;
            events::publish_delegation_added(&env, &account, &tracker);
        }
        common::extend_instance(&env);

        let balance = ledger::balance_of(&env, &account);
        best_effort::set_delegate(&env, &tracker, &account, Some(&delegatee), balance);
        Ok(())
    }

    /// Stop delegating through `tracker`.
    pub fn undelegate(env: Env, account: Address, tracker: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        if !TRACKERS.remove(&env, &account, &tracker) {
            return Err(ContractError::DelegationNotExist);
        }
        Self::detach(&env, &account, &tracker);
        Ok(())
    }

    /// Stop delegating through every tracker.
    pub fn undelegate_all(env: Env, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        for tracker in TRACKERS.clear(&env, &account).iter() {
            Self::detach(&env, &account, &tracker);
        }
        Ok(())
    }

    /// Drop `tracker` from the holder's delegations without calling it.
    ///
    /// The tracker keeps whatever it last recorded for the holder and stops
    /// receiving the holder's balance changes.
    pub fn force_undelegate(
        env: Env,
        account: Address,
        tracker: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        if !TRACKERS.remove(&env, &account, &tracker) {
            return Err(ContractError::DelegationNotExist);
        }
        events::publish_delegation_forced_out(&env, &account, &tracker);
        Ok(())
    }

    /// Drop every tracker without calling any of them.
    pub fn force_undelegate_all(env: Env, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        for tracker in TRACKERS.clear(&env, &account).iter() {
            events::publish_delegation_forced_out(&env, &account, &tracker);
        }
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn user_is_delegating(env: Env, account: Address, tracker: Address) -> bool {
        TRACKERS.contains(&env, &account, &tracker)
    }

    pub fn user_delegations_count(env: Env, account: Address) -> u32 {
        TRACKERS.len(&env, &account)
    }

    pub fn user_delegations_at(env: Env, account: Address, index: u32) -> Option<Address> {
        TRACKERS.at(&env, &account, index)
    }

    pub fn user_delegations(env: Env, account: Address) -> Vec<Address> {
        TRACKERS.members(&env, &account)
    }

    pub fn max_user_delegations(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MAX_USER_DELEGATIONS)
            .unwrap_or(0)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        ledger::balance_of(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        ledger::total_supply(&env)
    }

    pub fn name(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&NAME)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&SYMBOL)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn move_balance(
        env: &Env,
        from: Option<&Address>,
        to: Option<&Address>,
        amount: i128,
    ) -> Result<(), ContractError> {
        ledger::move_balance(env, from, to, amount).map_err(map_ledger_error)?;
        common::extend_instance(env);
        common::events::publish_balance_moved(env, from, to, amount);

        let empty = Vec::new(env);
        let from_trackers = from
            .map(|account| TRACKERS.members(env, account))
            .unwrap_or_else(|| empty.clone());
        let to_trackers = to
            .map(|account| TRACKERS.members(env, account))
            .unwrap_or(empty);
        fanout::dispatch(env, &from_trackers, &to_trackers, from, to, amount);
        Ok(())
    }

    fn detach(env: &Env, account: &Address, tracker: &Address) {
        events::publish_delegation_removed(env, account, tracker);
        let balance = ledger::balance_of(env, account);
        best_effort::set_delegate(env, tracker, account, None, balance);
    }

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }
}
