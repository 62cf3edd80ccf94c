#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

/// A best-effort call into `receiver` failed and was discarded.
pub fn publish_notification_dropped(env: &Env, receiver: &Address, call: Symbol) {
    env.events()
        .publish((symbol_short!("NOTIFYDRP"), receiver.clone()), call);
}

pub fn publish_hook_added(env: &Env, account: &Address, hook: &Address) {
    env.events()
        .publish((symbol_short!("HOOK_ADD"), account.clone()), hook.clone());
}

pub fn publish_hook_removed(env: &Env, account: &Address, hook: &Address) {
    env.events()
        .publish((symbol_short!("HOOK_RM"), account.clone()), hook.clone());
}

pub fn publish_hook_forced_out(env: &Env, account: &Address, hook: &Address) {
    env.events()
        .publish((symbol_short!("HOOK_FRC"), account.clone()), hook.clone());
}

/// Standard token topics: `("transfer", from, to)`, `("mint", to)`,
/// `("burn", from)` with the amount as data.
pub fn publish_balance_moved(
    env: &Env,
    from: Option<&Address>,
    to: Option<&Address>,
    amount: i128,
) {
    match (from, to) {
        (Some(from), Some(to)) => env.events().publish(
            (symbol_short!("transfer"), from.clone(), to.clone()),
            amount,
        ),
        (None, Some(to)) => env
            .events()
            .publish((symbol_short!("mint"), to.clone()), amount),
        (Some(from), None) => env
            .events()
            .publish((symbol_short!("burn"), from.clone()), amount),
        (None, None) => {}
    }
}
