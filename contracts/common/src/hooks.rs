//! Hook attachment for host tokens.
//!
//! An account opts a hook (any [`BalanceHook`] receiver) into its balance
//! changes. Attaching seeds the hook with the account's full balance,
//! detaching removes it, and every later balance change of the account is
//! forwarded through [`fanout::dispatch`]. All hook calls are best-effort.
//!
//! Host contracts call [`notify_balance_change`] after every mint, burn and
//! transfer that went through the [`ledger`].
//!
//! A hook that exhausts the transaction budget cannot be isolated by a
//! try-call. [`force_remove_hook`] and [`force_remove_all_hooks`] detach
//! without calling the hook so an account is never stuck with it.
//!
//! [`BalanceHook`]: crate::interfaces::BalanceHook
//! [`ledger`]: crate::ledger

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::best_effort;
use crate::events;
use crate::fanout;
use crate::ledger;
use crate::member_set::{MemberSet, MemberSetError};

const HOOKS: MemberSet = MemberSet::new(symbol_short!("HOOKS"), symbol_short!("HOOK_IDX"));
const MAX_HOOKS: Symbol = symbol_short!("MAX_HOOK");

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HookError {
    AlreadyAdded,
    NotFound,
    LimitReached,
}

pub fn set_max_hooks(env: &Env, max: u32) {
    env.storage().instance().set(&MAX_HOOKS, &max);
}

pub fn max_hooks(env: &Env) -> u32 {
    env.storage().instance().get(&MAX_HOOKS).unwrap_or(0)
}

pub fn hooks(env: &Env, account: &Address) -> Vec<Address> {
    HOOKS.members(env, account)
}

pub fn hooks_count(env: &Env, account: &Address) -> u32 {
    HOOKS.len(env, account)
}

pub fn hook_at(env: &Env, account: &Address, index: u32) -> Option<Address> {
    HOOKS.at(env, account, index)
}

pub fn has_hook(env: &Env, account: &Address, hook: &Address) -> bool {
    HOOKS.contains(env, account, hook)
}

/// Balance of `account` as seen by `hook`: zero unless attached.
pub fn hook_balance_of(env: &Env, hook: &Address, account: &Address) -> i128 {
    if has_hook(env, account, hook) {
        ledger::balance_of(env, account)
    } else {
        0
    }
}

pub fn add_hook(env: &Env, account: &Address, hook: &Address) -> Result<(), HookError> {
    let added = HOOKS
        .insert(env, account, hook, max_hooks(env))
        .map_err(|err| match err {
            MemberSetError::CapacityReached => HookError::LimitReached,
        })?;
    if !added {
        return Err(HookError::AlreadyAdded);
    }
    events::publish_hook_added(env, account, hook);
    let balance = ledger::balance_of(env, account);
    if balance > 0 {
        best_effort::update_balances(env, hook, None, Some(account), balance);
    }
    Ok(())
}

pub fn remove_hook(env: &Env, account: &Address, hook: &Address) -> Result<(), HookError> {
    if !HOOKS.remove(env, account, hook) {
        return Err(HookError::NotFound);
    }
    detached(env, account, hook);
    Ok(())
}

pub fn remove_all_hooks(env: &Env, account: &Address) {
    for hook in HOOKS.clear(env, account).iter() {
        detached(env, account, &hook);
    }
}

/// Detaches `hook` without notifying it.
pub fn force_remove_hook(env: &Env, account: &Address, hook: &Address) -> Result<(), HookError> {
    if !HOOKS.remove(env, account, hook) {
        return Err(HookError::NotFound);
    }
    events::publish_hook_forced_out(env, account, hook);
    Ok(())
}

/// Detaches every hook of `account` without notifying any of them.
pub fn force_remove_all_hooks(env: &Env, account: &Address) {
    for hook in HOOKS.clear(env, account).iter() {
        events::publish_hook_forced_out(env, account, &hook);
    }
}

fn detached(env: &Env, account: &Address, hook: &Address) {
    events::publish_hook_removed(env, account, hook);
    let balance = ledger::balance_of(env, account);
    if balance > 0 {
        best_effort::update_balances(env, hook, Some(account), None, balance);
    }
}

/// Forwards a completed balance change to the hooks of both sides.
pub fn notify_balance_change(
    env: &Env,
    from: Option<&Address>,
    to: Option<&Address>,
    amount: i128,
) -> u32 {
    let empty = Vec::new(env);
    let from_hooks = from.map(|account| hooks(env, account)).unwrap_or_else(|| empty.clone());
    let to_hooks = to.map(|account| hooks(env, account)).unwrap_or(empty);
    fanout::dispatch(env, &from_hooks, &to_hooks, from, to, amount)
}
