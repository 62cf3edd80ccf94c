//! Client interfaces for cross-contract calls.
//!
//! Only the clients are generated here; the contracts implementing these
//! functions live in their own crates. Privileged functions take the calling
//! contract's address as `caller` so the callee can check it against its
//! stored capability.

use soroban_sdk::{contractclient, Address, Env, String};

/// Receiver side of a host's balance-change notifications.
#[contractclient(name = "BalanceHookClient")]
pub trait BalanceHook {
    fn update_balances(
        env: Env,
        caller: Address,
        from: Option<Address>,
        to: Option<Address>,
        amount: i128,
    );
}

/// A tracker driven directly by a registry token.
#[contractclient(name = "DelegationTrackerClient")]
pub trait DelegationTracker {
    fn set_delegate(
        env: Env,
        caller: Address,
        account: Address,
        delegatee: Option<Address>,
        tracked_balance: i128,
    );

    fn delegated(env: Env, account: Address) -> Option<Address>;
}

/// Queries a notifier-driven tracker makes against its host token.
#[contractclient(name = "HookHostClient")]
pub trait HookHost {
    fn hook_balance_of(env: Env, hook: Address, account: Address) -> i128;

    fn has_hook(env: Env, account: Address, hook: Address) -> bool;
}

/// Contract error code a share token raises when a holder's farm list is
/// full.
pub const SHARE_HOOKS_LIMIT_REACHED: u32 = 43;

/// Share token owned by a rewardable/farming tracker.
#[contractclient(name = "ShareTokenClient")]
pub trait ShareToken {
    fn initialize(env: Env, owner: Address, name: String, symbol: String, max_farms: u32);

    fn owner(env: Env) -> Address;

    fn mint(env: Env, caller: Address, to: Address, amount: i128);

    fn burn(env: Env, caller: Address, from: Address, amount: i128);

    fn add_default_farm_if_needed(env: Env, caller: Address, account: Address, farm: Address);
}
