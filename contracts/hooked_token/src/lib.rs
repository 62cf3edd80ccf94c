#![no_std]

//! # Hooked Token
//!
//! Fungible host token whose holders can attach hooks: contracts that are
//! told about every change of the holder's balance. Notification is
//! best-effort, so a failing hook never blocks a mint, burn or transfer.
//!
//! - **Attach**: `add_hook` seeds the hook with the holder's full balance.
//! - **Detach**: `remove_hook` / `remove_all_hooks` withdraw it again.
//! - **Cap**: at most `max_hooks` hooks per holder.

pub mod events;

use common::hooks::{self, HookError};
use common::ledger::{self, LedgerError};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

// ── Storage key constants ─────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
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
    HookNotFound = 20,
    InvalidAmount = 31,
    HookAlreadyAdded = 42,
    HooksLimitReached = 43,
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

fn map_hook_error(err: HookError) -> ContractError {
    match err {
        HookError::AlreadyAdded => ContractError::HookAlreadyAdded,
        HookError::NotFound => ContractError::HookNotFound,
        HookError::LimitReached => ContractError::HooksLimitReached,
    }
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct HookedTokenContract;

#[contractimpl]
impl HookedTokenContract {
    pub fn initialize(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
        max_hooks: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        hooks::set_max_hooks(&env, max_hooks);
        env.storage().instance().set(&INITIALIZED, &true);
        common::extend_instance(&env);

        events::publish_initialized(&env, &admin, max_hooks);
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

    // ── Hook attachment ───────────────────────────────────────────────────────

    pub fn add_hook(env: Env, account: Address, hook: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        hooks::add_hook(&env, &account, &hook).map_err(map_hook_error)
    }

    pub fn remove_hook(env: Env, account: Address, hook: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        hooks::remove_hook(&env, &account, &hook).map_err(map_hook_error)
    }

    pub fn remove_all_hooks(env: Env, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        hooks::remove_all_hooks(&env, &account);
        Ok(())
    }

    /// Detach `hook` without calling it.
    pub fn force_remove_hook(env: Env, account: Address, hook: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        hooks::force_remove_hook(&env, &account, &hook).map_err(map_hook_error)
    }

    pub fn force_remove_all_hooks(env: Env, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        hooks::force_remove_all_hooks(&env, &account);
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn hooks(env: Env, account: Address) -> Vec<Address> {
        hooks::hooks(&env, &account)
    }

    pub fn hooks_count(env: Env, account: Address) -> u32 {
        hooks::hooks_count(&env, &account)
    }

    pub fn hook_at(env: Env, account: Address, index: u32) -> Option<Address> {
        hooks::hook_at(&env, &account, index)
    }

    pub fn has_hook(env: Env, account: Address, hook: Address) -> bool {
        hooks::has_hook(&env, &account, &hook)
    }

    pub fn hook_balance_of(env: Env, hook: Address, account: Address) -> i128 {
        hooks::hook_balance_of(&env, &hook, &account)
    }

    pub fn max_hooks(env: Env) -> u32 {
        hooks::max_hooks(&env)
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
        hooks::notify_balance_change(env, from, to, amount);
        Ok(())
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
