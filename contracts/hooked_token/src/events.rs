#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, admin: &Address, max_hooks: u32) {
    env.events()
        .publish((symbol_short!("INIT"), admin.clone()), max_hooks);
}
