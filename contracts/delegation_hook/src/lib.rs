#![no_std]

//! # Delegation Hook
//!
//! Notifier-driven delegation tracker. Holders choose their delegatee
//! themselves; balances arrive through the host token's hook mechanism:
//!
//! 1. The holder attaches this contract as a hook on the host token; the
//!    host reports the holder's full balance, which lands on the current
//!    delegatee.
//! 2. Every later mint, burn or transfer of the holder is forwarded by the
//!    host through `update_balances`.
//! 3. Detaching reports the full balance leaving again.
//!
//! Redelegating to the current delegatee is a silent no-op.

pub mod events;

use common::delegation;
use common::interfaces::HookHostClient;
use common::ledger::{self, LedgerError};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol};

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
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
    NotHost = 11,
    InvalidAmount = 31,
    TransferDisabled = 40,
    ApproveDisabled = 41,
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

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct DelegationHookContract;

#[contractimpl]
impl DelegationHookContract {
    /// Bootstrap the tracker for host `token`.
    pub fn initialize(
        env: Env,
        token: Address,
        name: String,
        symbol: String,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage().instance().set(&INITIALIZED, &true);
        common::extend_instance(&env);

        events::publish_initialized(&env, &token);
        Ok(())
    }

    /// Point the caller's balance at `delegatee` (`None` to undelegate).
    pub fn delegate(
        env: Env,
        account: Address,
        delegatee: Option<Address>,
    ) -> Result<(), ContractError> {
        let token = Self::token(env.clone())?;
        account.require_auth();

        let previous = delegation::delegated(&env, &account);
        if previous == delegatee {
            return Ok(());
        }
        let balance = HookHostClient::new(&env, &token)
            .hook_balance_of(&env.current_contract_address(), &account);
        delegation::apply(&env, &account, previous.as_ref(), delegatee.as_ref(), balance)
            .map_err(map_ledger_error)?;
        common::extend_instance(&env);

        match delegatee {
            Some(delegatee) => events::publish_delegated(&env, &account, &delegatee),
            None => events::publish_undelegated(&env, &account, previous),
        }
        Ok(())
    }

    /// Balance-change callback; only the host token may call it.
    pub fn update_balances(
        env: Env,
        caller: Address,
        from: Option<Address>,
        to: Option<Address>,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_host(&env, &caller)?;
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

    pub fn token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn delegated(env: Env, account: Address) -> Option<Address> {
        delegation::delegated(&env, &account)
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

    fn require_host(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let token = Self::token(env.clone())?;
        caller.require_auth();
        if *caller != token {
            return Err(ContractError::NotHost);
        }
        Ok(())
    }
}
