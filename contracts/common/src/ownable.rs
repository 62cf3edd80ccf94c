//! Single owner capability.
//!
//! The owner is written once, at initialisation, and cannot be reassigned.
//! Privileged entry points pass the calling address explicitly and check it
//! with [`require_owner`].

use soroban_sdk::{symbol_short, Address, Env, Symbol};

const OWNER: Symbol = symbol_short!("OWNER");

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OwnershipError {
    AlreadySet,
    NotSet,
    NotOwner,
}

pub fn set_owner_once(env: &Env, owner: &Address) -> Result<(), OwnershipError> {
    if env.storage().instance().has(&OWNER) {
        return Err(OwnershipError::AlreadySet);
    }
    env.storage().instance().set(&OWNER, owner);
    Ok(())
}

pub fn owner(env: &Env) -> Result<Address, OwnershipError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(OwnershipError::NotSet)
}

/// Authenticates `caller` and checks it holds the owner capability.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), OwnershipError> {
    caller.require_auth();
    if owner(env)? != *caller {
        return Err(OwnershipError::NotOwner);
    }
    Ok(())
}
