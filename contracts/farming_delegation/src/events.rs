#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, token: &Address, max_farms: u32) {
    env.events()
        .publish((symbol_short!("INIT"), token.clone()), max_farms);
}

pub fn publish_registered(env: &Env, delegatee: &Address, share_token: &Address) {
    env.events()
        .publish((symbol_short!("REG_DLGT"), delegatee.clone()), share_token.clone());
}

pub fn publish_default_farm_set(env: &Env, delegatee: &Address, farm: &Address) {
    env.events()
        .publish((symbol_short!("DEF_FARM"), delegatee.clone()), farm.clone());
}

pub fn publish_delegated(env: &Env, account: &Address, delegatee: &Address) {
    env.events()
        .publish((symbol_short!("DELEGATED"), account.clone()), delegatee.clone());
}

pub fn publish_undelegated(env: &Env, account: &Address, previous: Option<Address>) {
    env.events()
        .publish((symbol_short!("UNDELEGTD"), account.clone()), previous);
}
