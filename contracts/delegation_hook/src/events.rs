#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, token: &Address) {
    env.events()
        .publish((symbol_short!("INIT"),), token.clone());
}

pub fn publish_delegated(env: &Env, account: &Address, delegatee: &Address) {
    env.events()
        .publish((symbol_short!("DELEGATED"), account.clone()), delegatee.clone());
}

pub fn publish_undelegated(env: &Env, account: &Address, previous: Option<Address>) {
    env.events()
        .publish((symbol_short!("UNDELEGTD"), account.clone()), previous);
}
