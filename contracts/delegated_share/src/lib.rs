#![no_std]

//! # Delegated Share
//!
//! Share token of one registered delegatee. Only the owning delegation
//! tracker may mint and burn; it does so in lockstep with the delegated
//! balance it attributes to each holder. Holders can attach farms (hooks)
//! to their share balance, and the owner can attach the delegatee's default
//! farm on a holder's behalf. Shares are not transferable.

pub mod events;

use common::hooks::{self, HookError};
use common::ledger::{self, LedgerError};
use common::ownable::{self, OwnershipError};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

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
    HookNotFound = 20,
    InvalidAmount = 31,
    TransferDisabled = 40,
    ApproveDisabled = 41,
    HookAlreadyAdded = 42,
    HooksLimitReached = 43,
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

fn map_hook_error(err: HookError) -> ContractError {
    match err {
        HookError::AlreadyAdded => ContractError::HookAlreadyAdded,
        HookError::NotFound => ContractError::HookNotFound,
        HookError::LimitReached => ContractError::HooksLimitReached,
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
pub struct DelegatedShareContract;

#[contractimpl]
impl DelegatedShareContract {
    /// Bootstrap the share token. `owner` is the delegation tracker that
    /// will mint and burn; `max_farms` caps the farms per holder.
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        max_farms: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        ownable::set_owner_once(&env, &owner).map_err(map_ownership_error)?;
        hooks::set_max_hooks(&env, max_farms);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage().instance().set(&INITIALIZED, &true);
        common::extend_instance(&env);

        events::publish_initialized(&env, &owner, max_farms);
        Ok(())
    }

    // ── Owner-only supply changes ─────────────────────────────────────────────

    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        ownable::require_owner(&env, &caller).map_err(map_ownership_error)?;
        ledger::increase(&env, &to, amount).map_err(map_ledger_error)?;
        common::events::publish_balance_moved(&env, None, Some(&to), amount);
        hooks::notify_balance_change(&env, None, Some(&to), amount);
        Ok(())
    }

    pub fn burn(
        env: Env,
        caller: Address,
        from: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        ownable::require_owner(&env, &caller).map_err(map_ownership_error)?;
        ledger::decrease(&env, &from, amount).map_err(map_ledger_error)?;
        common::events::publish_balance_moved(&env, Some(&from), None, amount);
        hooks::notify_balance_change(&env, Some(&from), None, amount);
        Ok(())
    }

    /// Attach `farm` to `account` unless it is already attached.
    pub fn add_default_farm_if_needed(
        env: Env,
        caller: Address,
        account: Address,
        farm: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        ownable::require_owner(&env, &caller).map_err(map_ownership_error)?;
        if hooks::has_hook(&env, &account, &farm) {
            return Ok(());
        }
        hooks::add_hook(&env, &account, &farm).map_err(map_hook_error)?;
        events::publish_default_farm_added(&env, &account, &farm);
        Ok(())
    }

    // ── Farm attachment ───────────────────────────────────────────────────────

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

    // ── Disabled token mutators ───────────────────────────────────────────────

    pub fn transfer(
        _env: Env,
        _from: Address,
        _to: Address,
        _amount: i128,
    ) -> Result<(), ContractError> {
        Err(ContractError::TransferDisabled)
    }

    pub fn transfer_from(
        _env: Env,
        _spender: Address,
        _from: Address,
        _to: Address,
        _amount: i128,
    ) -> Result<(), ContractError> {
        Err(ContractError::TransferDisabled)
    }

    pub fn approve(
        _env: Env,
        _from: Address,
        _spender: Address,
        _amount: i128,
        _expiration_ledger: u32,
    ) -> Result<(), ContractError> {
        Err(ContractError::ApproveDisabled)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        ownable::owner(&env).map_err(map_ownership_error)
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

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }
}
