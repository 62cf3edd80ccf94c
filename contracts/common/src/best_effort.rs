//! Fault-isolated calls into untrusted contracts.
//!
//! Every call goes through the generated `try_*` client method. A trap or
//! contract error inside the callee rolls back the callee's frame and comes
//! back here as a value; it is recorded as a `NOTIFYDRP` event and otherwise
//! discarded, and the caller's own operation continues. Budget exhaustion is
//! the exception: it aborts the whole transaction, so callers offer forced
//! exits that skip the call entirely.

use soroban_sdk::{symbol_short, Address, Env, InvokeError, Symbol};

use crate::events;
use crate::interfaces::{BalanceHookClient, DelegationTrackerClient};

/// What happened to a best-effort call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Delivery {
    Delivered,
    Dropped,
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

fn settle<T, C, E>(
    env: &Env,
    receiver: &Address,
    call: Symbol,
    outcome: Result<Result<T, C>, Result<E, InvokeError>>,
) -> Option<T> {
    match outcome {
        Ok(Ok(value)) => Some(value),
        _ => {
            events::publish_notification_dropped(env, receiver, call);
            None
        }
    }
}

/// Notifies `receiver` that `amount` moved from `from` to `to`.
pub fn update_balances(
    env: &Env,
    receiver: &Address,
    from: Option<&Address>,
    to: Option<&Address>,
    amount: i128,
) -> Delivery {
    let outcome = BalanceHookClient::new(env, receiver).try_update_balances(
        &env.current_contract_address(),
        &from.cloned(),
        &to.cloned(),
        &amount,
    );
    match settle(env, receiver, symbol_short!("upd_bal"), outcome) {
        Some(()) => Delivery::Delivered,
        None => Delivery::Dropped,
    }
}

/// Asks `tracker` to point `account` at `delegatee`.
pub fn set_delegate(
    env: &Env,
    tracker: &Address,
    account: &Address,
    delegatee: Option<&Address>,
    tracked_balance: i128,
) -> Delivery {
    let outcome = DelegationTrackerClient::new(env, tracker).try_set_delegate(
        &env.current_contract_address(),
        account,
        &delegatee.cloned(),
        &tracked_balance,
    );
    match settle(env, tracker, symbol_short!("set_dlg"), outcome) {
        Some(()) => Delivery::Delivered,
        None => Delivery::Dropped,
    }
}

/// Reads `tracker`'s current delegatee for `account`; `None` if the query
/// itself failed.
pub fn delegated(env: &Env, tracker: &Address, account: &Address) -> Option<Option<Address>> {
    let outcome = DelegationTrackerClient::new(env, tracker).try_delegated(account);
    settle(env, tracker, symbol_short!("delegated"), outcome)
}
