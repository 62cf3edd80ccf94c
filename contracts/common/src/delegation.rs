//! Holder → delegatee edges and the balance-moving state machine.
//!
//! Every tracker variant stores at most one delegatee per holder and keeps
//! the aggregate of its delegators' tracked balances in the [`ledger`].
//!
//! ## Rules
//! - Changing a holder's delegatee moves exactly the holder's tracked
//!   balance from the previous delegatee to the new one.
//! - A balance change of a holder moves `amount` between the delegatees of
//!   the two sides; holders that are not delegating contribute nothing.
//! - [`redelegate`] rejects a repeat of the current target. Variants that
//!   treat a repeat as a no-op compare with [`delegated`] first and call
//!   [`apply`] directly.
//!
//! [`ledger`]: crate::ledger

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ledger::{self, LedgerError};
use crate::{TTL_EXTEND_TO, TTL_THRESHOLD};

const DELEGATE_TO: Symbol = symbol_short!("DEL_TO");

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreError {
    SameDelegatee,
    Ledger(LedgerError),
}

impl From<LedgerError> for CoreError {
    fn from(err: LedgerError) -> Self {
        CoreError::Ledger(err)
    }
}

fn edge_key(holder: &Address) -> (Symbol, Address) {
    (DELEGATE_TO, holder.clone())
}

pub fn delegated(env: &Env, holder: &Address) -> Option<Address> {
    env.storage().persistent().get(&edge_key(holder))
}

fn write_edge(env: &Env, holder: &Address, delegatee: Option<&Address>) {
    let key = edge_key(holder);
    match delegatee {
        Some(delegatee) => {
            env.storage().persistent().set(&key, delegatee);
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
        None => env.storage().persistent().remove(&key),
    }
}

/// Moves `holder` from `previous` to `delegatee`, carrying
/// `tracked_balance` along. `previous` must be the stored delegatee.
pub fn apply(
    env: &Env,
    holder: &Address,
    previous: Option<&Address>,
    delegatee: Option<&Address>,
    tracked_balance: i128,
) -> Result<(), LedgerError> {
    ledger::move_balance(env, previous, delegatee, tracked_balance)?;
    write_edge(env, holder, delegatee);
    Ok(())
}

/// Points `holder` at `delegatee`, failing on a repeat of the current
/// target. Returns the previous delegatee.
pub fn redelegate(
    env: &Env,
    holder: &Address,
    delegatee: Option<&Address>,
    tracked_balance: i128,
) -> Result<Option<Address>, CoreError> {
    let previous = delegated(env, holder);
    if previous.as_ref() == delegatee {
        return Err(CoreError::SameDelegatee);
    }
    apply(env, holder, previous.as_ref(), delegatee, tracked_balance)?;
    Ok(previous)
}

/// Applies a tracked-balance change of `amount` from `from` to `to`.
///
/// Returns the delegatees the two sides resolved to so that variants can
/// mirror the movement elsewhere (share tokens).
pub fn update_balances(
    env: &Env,
    from: Option<&Address>,
    to: Option<&Address>,
    amount: i128,
) -> Result<(Option<Address>, Option<Address>), LedgerError> {
    let from_delegatee = from.and_then(|holder| delegated(env, holder));
    let to_delegatee = to.and_then(|holder| delegated(env, holder));
    ledger::move_balance(env, from_delegatee.as_ref(), to_delegatee.as_ref(), amount)?;
    Ok((from_delegatee, to_delegatee))
}
