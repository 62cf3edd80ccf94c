#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, owner: &Address) {
    env.events()
        .publish((symbol_short!("INIT"),), owner.clone());
}

pub fn publish_delegate(env: &Env, account: &Address, delegatee: &Address) {
    env.events()
        .publish((symbol_short!("DELEGATE"), account.clone()), delegatee.clone());
}

pub fn publish_undelegate(env: &Env, account: &Address, previous: Option<Address>) {
    env.events()
        .publish((symbol_short!("UNDELEGAT"), account.clone()), previous);
}
