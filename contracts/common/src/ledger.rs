//! Checked balance ledger.
//!
//! One ledger per contract: delegation trackers keep delegatee aggregates in
//! it, token contracts keep holder balances in it. Balances are only ever
//! changed through [`increase`], [`decrease`] and [`move_balance`]; the total
//! supply is maintained alongside so that `total_supply == Σ balances`.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{TTL_EXTEND_TO, TTL_THRESHOLD};

// ── Storage key prefixes ─────────────────────────────────────────────────────

const BALANCE: Symbol = symbol_short!("BALANCE");
const SUPPLY: Symbol = symbol_short!("SUPPLY");

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedgerError {
    NegativeAmount,
    InsufficientBalance,
    Overflow,
}

fn balance_key(account: &Address) -> (Symbol, Address) {
    (BALANCE, account.clone())
}

pub fn balance_of(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&balance_key(account))
        .unwrap_or(0)
}

pub fn total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&SUPPLY).unwrap_or(0)
}

fn write_balance(env: &Env, account: &Address, amount: i128) {
    let key = balance_key(account);
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Adds `amount` to `account` and to the total supply.
pub fn increase(env: &Env, account: &Address, amount: i128) -> Result<(), LedgerError> {
    if amount < 0 {
        return Err(LedgerError::NegativeAmount);
    }
    if amount == 0 {
        return Ok(());
    }
    let balance = balance_of(env, account)
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;
    let supply = total_supply(env)
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;
    write_balance(env, account, balance);
    env.storage().instance().set(&SUPPLY, &supply);
    Ok(())
}

/// Subtracts `amount` from `account` and from the total supply.
///
/// Fails with [`LedgerError::InsufficientBalance`] instead of going negative.
pub fn decrease(env: &Env, account: &Address, amount: i128) -> Result<(), LedgerError> {
    if amount < 0 {
        return Err(LedgerError::NegativeAmount);
    }
    if amount == 0 {
        return Ok(());
    }
    let current = balance_of(env, account);
    if current < amount {
        return Err(LedgerError::InsufficientBalance);
    }
    let supply = total_supply(env)
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientBalance)?;
    write_balance(env, account, current - amount);
    env.storage().instance().set(&SUPPLY, &supply);
    Ok(())
}

/// Moves `amount` between two optional accounts.
///
/// `None` on the sending side mints, `None` on the receiving side burns.
/// Identical sides or a zero amount leave the ledger untouched.
pub fn move_balance(
    env: &Env,
    from: Option<&Address>,
    to: Option<&Address>,
    amount: i128,
) -> Result<(), LedgerError> {
    if amount < 0 {
        return Err(LedgerError::NegativeAmount);
    }
    if amount == 0 || from == to {
        return Ok(());
    }
    if let Some(from) = from {
        decrease(env, from, amount)?;
    }
    if let Some(to) = to {
        increase(env, to, amount)?;
    }
    Ok(())
}
