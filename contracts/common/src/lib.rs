//! Shared building blocks for the delegation contract suite.
//!
//! This crate provides:
//! - [`ledger`]: checked balance ledger backing delegatee aggregates and
//!   token balances.
//! - [`delegation`]: the holder → delegatee edge and the balance-moving
//!   state machine shared by every tracker variant.
//! - [`member_set`]: per-account ordered set with a cap and swap-remove.
//! - [`registration`]: delegatee → share token registry.
//! - [`hooks`] / [`fanout`]: hook attachment and balance-change fan-out for
//!   host tokens.
//! - [`best_effort`]: fault-isolated calls into untrusted contracts.
//! - [`ownable`]: single owner capability, set once.
//! - [`interfaces`]: client traits for cross-contract calls.
//!
//! Contracts map the small error enums of these modules into their own
//! `ContractError` codes.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod best_effort;
pub mod delegation;
pub mod events;
pub mod fanout;
pub mod hooks;
pub mod interfaces;
pub mod ledger;
pub mod member_set;
pub mod ownable;
pub mod registration;

use soroban_sdk::Env;

/// Persistent entries are bumped when they drop below this many ledgers.
pub const TTL_THRESHOLD: u32 = 1_036_800;
/// Persistent entries are extended to this many ledgers on write.
pub const TTL_EXTEND_TO: u32 = 2_073_600;

/// Bumps the instance storage TTL. Called by every state-changing entry point.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
