//! Delegatee → share token registry for rewardable and farming trackers.
//!
//! ## Rules
//! - A delegatee registers at most once.
//! - A share token is claimed by at most one delegatee.
//! - Registrations are never removed or reassigned.

use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

use crate::interfaces::ShareTokenClient;
use crate::{TTL_EXTEND_TO, TTL_THRESHOLD};

const REGISTRATION: Symbol = symbol_short!("REG");
const CLAIMED_BY: Symbol = symbol_short!("REG_TOK");
const SALT_NONCE: Symbol = symbol_short!("REG_SALT");

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegistrationError {
    AlreadyRegistered,
    AnotherDelegateeToken,
}

fn registration_key(delegatee: &Address) -> (Symbol, Address) {
    (REGISTRATION, delegatee.clone())
}

fn claim_key(token: &Address) -> (Symbol, Address) {
    (CLAIMED_BY, token.clone())
}

pub fn registration(env: &Env, delegatee: &Address) -> Option<Address> {
    env.storage().persistent().get(&registration_key(delegatee))
}

pub fn is_registered(env: &Env, delegatee: &Address) -> bool {
    env.storage().persistent().has(&registration_key(delegatee))
}

/// Delegatee that claimed `token`, if any.
pub fn claimed_by(env: &Env, token: &Address) -> Option<Address> {
    env.storage().persistent().get(&claim_key(token))
}

pub fn ensure_unregistered(env: &Env, delegatee: &Address) -> Result<(), RegistrationError> {
    if is_registered(env, delegatee) {
        return Err(RegistrationError::AlreadyRegistered);
    }
    Ok(())
}

/// Records `token` as the share token of `delegatee`.
pub fn claim(env: &Env, delegatee: &Address, token: &Address) -> Result<(), RegistrationError> {
    ensure_unregistered(env, delegatee)?;
    if claimed_by(env, token).is_some() {
        return Err(RegistrationError::AnotherDelegateeToken);
    }
    let reg_key = registration_key(delegatee);
    let tok_key = claim_key(token);
    env.storage().persistent().set(&reg_key, token);
    env.storage().persistent().set(&tok_key, delegatee);
    env.storage()
        .persistent()
        .extend_ttl(&reg_key, TTL_THRESHOLD, TTL_EXTEND_TO);
    env.storage()
        .persistent()
        .extend_ttl(&tok_key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(())
}

/// Deploys a fresh contract from `wasm_hash` with a salt unique to this
/// controller.
pub fn deploy_share(env: &Env, wasm_hash: &BytesN<32>) -> Address {
    let nonce: u64 = env.storage().instance().get(&SALT_NONCE).unwrap_or(0);
    env.storage()
        .instance()
        .set(&SALT_NONCE, &nonce.saturating_add(1));

    let mut salt = [0u8; 32];
    salt[24..].copy_from_slice(&nonce.to_be_bytes());
    env.deployer()
        .with_current_contract(BytesN::from_array(env, &salt))
        .deploy_v2(wasm_hash.clone(), ())
}

/// Whether `token` reports the current contract as its owner. A contract
/// that does not answer `owner` is not a share token of ours.
pub fn is_owned_share(env: &Env, token: &Address) -> bool {
    matches!(
        ShareTokenClient::new(env, token).try_owner(),
        Ok(Ok(owner)) if owner == env.current_contract_address()
    )
}

/// Mints `amount` shares of `delegatee`'s token to `holder`.
pub fn mint_shares(env: &Env, delegatee: &Address, holder: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    if let Some(token) = registration(env, delegatee) {
        ShareTokenClient::new(env, &token).mint(&env.current_contract_address(), holder, &amount);
    }
}

/// Burns `amount` shares of `delegatee`'s token from `holder`.
pub fn burn_shares(env: &Env, delegatee: &Address, holder: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    if let Some(token) = registration(env, delegatee) {
        ShareTokenClient::new(env, &token).burn(&env.current_contract_address(), holder, &amount);
    }
}

/// Mirrors a tracked-balance movement between two holders onto the share
/// tokens of the delegatees they resolved to.
pub fn mirror_shares(
    env: &Env,
    from: Option<(&Address, &Address)>,
    to: Option<(&Address, &Address)>,
    amount: i128,
) {
    if let Some((holder, delegatee)) = from {
        burn_shares(env, delegatee, holder, amount);
    }
    if let Some((holder, delegatee)) = to {
        mint_shares(env, delegatee, holder, amount);
    }
}
