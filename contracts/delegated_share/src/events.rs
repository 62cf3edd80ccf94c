#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, owner: &Address, max_farms: u32) {
    env.events()
        .publish((symbol_short!("INIT"), owner.clone()), max_farms);
}

pub fn publish_default_farm_added(env: &Env, account: &Address, farm: &Address) {
    env.events()
        .publish((symbol_short!("DEF_FARM"), account.clone()), farm.clone());
}
