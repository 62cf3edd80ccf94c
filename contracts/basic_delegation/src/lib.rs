#![no_std]

//! # Basic Delegation
//!
//! Direct-call delegation tracker (also used for voting power). The owner,
//! normally a registry token, tells the tracker who delegates to whom and
//! forwards every balance change of its holders. The tracker mirrors each
//! holder's balance into the balance of the holder's delegatee.
//!
//! - `set_delegate` repointing a holder to its current target is an error.
//! - Delegatee balances are non-transferable: `transfer`, `transfer_from`
//!   and `approve` always fail with `MethodDisabled`.

pub mod events;

use common::delegation::{self, CoreError};
use common::ledger::{self, LedgerError};
use common::ownable::{self, OwnershipError};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol};

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NAME: Symbol = symbol_short!("NAME");
const SYMBOL: Symbol = symbol_short!("SYMBOL");

const DECIMALS: u32 = 7;

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 10,
    SameDelegateeAssigned = 30,
    InvalidAmount = 31,
    MethodDisabled = 40,
    BalanceUnderflow = 50,
    BalanceOverflow = 51,
}

fn map_ledger_error(err: LedgerError) -> ContractError {
    match err {
        LedgerError::NegativeAmount => ContractError::InvalidAmount,
        LedgerError::InsufficientBalance => ContractError::BalanceUnderflow,
        LedgerError::Overflow => ContractError::BalanceOverflow,
    }
}

fn map_core_error(err: CoreError) -> ContractError {
    match err {
        CoreError::SameDelegatee => ContractError::SameDelegateeAssigned,
        CoreError::Ledger(err) => map_ledger_error(err),
    }
}

fn map_ownership_error(err: OwnershipError) -> ContractError {
    match err {
        OwnershipError::AlreadySet => ContractError::AlreadyInitialized,
        OwnershipError::NotSet => ContractError::NotInitialized,
        OwnershipError::NotOwner => ContractError::NotOwner,
    }
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct BasicDelegationContract;

#[contractimpl]
impl BasicDelegationContract {
    /// Bootstrap the tracker. `owner` is the only address allowed to call
    /// `set_delegate` and `update_balances`.
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        ownable::set_owner_once(&env, &owner).map_err(map_ownership_error)?;
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage().instance().set(&INITIALIZED, &true);
        common::extend_instance(&env);

        events::publish_initialized(&env, &owner);
        Ok(())
    }

    // ── Owner-driven state changes ────────────────────────────────────────────

    /// Point `account` at `delegatee` (`None` clears the delegation).
    ///
    /// `tracked_balance` is the account's balance on the owner's ledger; it
    /// is moved from the previous delegatee to the new one.
    pub fn set_delegate(
        env: Env,
        caller: Address,
        account: Address,
        delegatee: Option<Address>,
        tracked_balance: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        ownable::require_owner(&env, &caller).map_err(map_ownership_error)?;
        if tracked_balance < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let previous =
            delegation::redelegate(&env, &account, delegatee.as_ref(), tracked_balance)
                .map_err(map_core_error)?;
        common::extend_instance(&env);

        match delegatee {
            Some(delegatee) => events::publish_delegate(&env, &account, &delegatee),
            None => events::publish_undelegate(&env, &account, previous),
        }
        Ok(())
    }

    /// Apply a balance change of `amount` from `from` to `to` on the owner's
    /// ledger. `None` stands for mint (`from`) or burn (`to`).
    pub fn update_balances(
        env: Env,
        caller: Address,
        from: Option<Address>,
        to: Option<Address>,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        ownable::require_owner(&env, &caller).map_err(map_ownership_error)?;

        delegation::update_balances(&env, from.as_ref(), to.as_ref(), amount)
            .map_err(map_ledger_error)?;
        Ok(())
    }

    // ── Disabled token mutators ───────────────────────────────────────────────

    pub fn transfer(
        _env: Env,
        _from: Address,
        _to: Address,
        _amount: i128,
    ) -> Result<(), ContractError> {
        Err(ContractError::MethodDisabled)
    }

    pub fn transfer_from(
        _env: Env,
        _spender: Address,
        _from: Address,
        _to: Address,
        _amount: i128,
    ) -> Result<(), ContractError> {
        Err(ContractError::MethodDisabled)
    }

    pub fn approve(
        _env: Env,
        _from: Address,
        _spender: Address,
        _amount: i128,
        _expiration_ledger: u32,
    ) -> Result<(), ContractError> {
        Err(ContractError::MethodDisabled)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn delegated(env: Env, account: Address) -> Option<Address> {
        delegation::delegated(&env, &account)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        ledger::balance_of(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        ledger::total_supply(&env)
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        ownable::owner(&env).map_err(map_ownership_error)
    }

    pub fn name(env: Env) -> Result<String, ContractError> {
        Self::require_initialized(&env)?;
        env.storage()
            .instance()
            .get(&NAME)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, ContractError> {
        Self::require_initialized(&env)?;
        env.storage()
            .instance()
            .get(&SYMBOL)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }
}
