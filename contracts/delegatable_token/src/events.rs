#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, admin: &Address, max_user_delegations: u32) {
    env.events()
        .publish((symbol_short!("INIT"), admin.clone()), max_user_delegations);
}

pub fn publish_delegation_added(env: &Env, account: &Address, tracker: &Address) {
    env.events()
        .publish((symbol_short!("DLG_ADD"), account.clone()), tracker.clone());
}

pub fn publish_delegation_removed(env: &Env, account: &Address, tracker: &Address) {
    env.events()
        .publish((symbol_short!("DLG_RM"), account.clone()), tracker.clone());
}

/// Membership dropped without notifying the tracker.
pub fn publish_delegation_forced_out(env: &Env, account: &Address, tracker: &Address) {
    env.events()
        .publish((symbol_short!("DLG_FRC"), account.clone()), tracker.clone());
}
