//! Balance-change fan-out from a host token to its attached receivers.

use soroban_sdk::{Address, Env, Vec};

use crate::best_effort::{self, Delivery};

/// Notifies every receiver attached to either side of a balance change.
///
/// A receiver attached to both sides gets a single `(from, to)` call; one
/// attached to a single side gets the one-legged call (`to`/`from` = `None`).
/// A zero amount or a self-transfer notifies nobody. Returns the number of
/// dropped notifications.
pub fn dispatch(
    env: &Env,
    from_receivers: &Vec<Address>,
    to_receivers: &Vec<Address>,
    from: Option<&Address>,
    to: Option<&Address>,
    amount: i128,
) -> u32 {
    if amount == 0 || from == to {
        return 0;
    }
    let mut dropped = 0u32;
    for receiver in from_receivers.iter() {
        let delivery = if to_receivers.contains(&receiver) {
            best_effort::update_balances(env, &receiver, from, to, amount)
        } else {
            best_effort::update_balances(env, &receiver, from, None, amount)
        };
        if delivery == Delivery::Dropped {
            dropped += 1;
        }
    }
    for receiver in to_receivers.iter() {
        if from_receivers.contains(&receiver) {
            continue;
        }
        if best_effort::update_balances(env, &receiver, None, to, amount) == Delivery::Dropped {
            dropped += 1;
        }
    }
    dropped
}
