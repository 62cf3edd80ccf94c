//! # Balance-Accounting Invariants
//!
//! Invariants that must hold after every transition of a registry token
//! and its trackers. They are checked after each action during state
//! exploration and composed through `InvariantSet`.
//!
//! ## Complexity
//!
//! Each check is O(T·D·H) for T trackers, D delegatees and H holders; the
//! harness keeps all three small.

extern crate std;

use std::string::{String, ToString};
use std::vec::Vec;

use super::DelegationSnapshot;

// ── Invariant Trait ──────────────────────────────────────────────────────────

/// A named invariant verified against a state snapshot.
pub trait Invariant {
    fn name(&self) -> &str;

    /// `Err(description)` on violation.
    fn check(&self, snapshot: &DelegationSnapshot) -> Result<(), String>;
}

// ── Built-in Invariants ──────────────────────────────────────────────────────

/// **Delegated balance conservation**: at every tracker, each delegatee's
/// balance equals the sum of its delegators' token balances.
///
/// The central accounting property. A violation means a delegation change
/// or a transfer moved the wrong amount or missed a side.
pub struct DelegationConservation;

impl Invariant for DelegationConservation {
    fn name(&self) -> &str {
        "delegatee balance == sum(delegator balances)"
    }

    fn check(&self, snapshot: &DelegationSnapshot) -> Result<(), String> {
        for (index, tracker) in snapshot.trackers.iter().enumerate() {
            for (delegatee, balance) in &tracker.delegatee_balances {
                let expected = snapshot.expected_delegated(tracker, delegatee);
                if *balance != expected {
                    return Err(std::format!(
                        "Tracker #{} delegatee {:?}: balance {} != delegated {}",
                        index, delegatee, balance, expected
                    ));
                }
            }
        }
        Ok(())
    }
}

/// **Tracker supply**: `tracker.total_supply == Σ delegatee balances`.
pub struct TrackerSupplyConsistency;

impl Invariant for TrackerSupplyConsistency {
    fn name(&self) -> &str {
        "tracker total_supply == sum(delegatee balances)"
    }

    fn check(&self, snapshot: &DelegationSnapshot) -> Result<(), String> {
        for (index, tracker) in snapshot.trackers.iter().enumerate() {
            let sum = tracker.sum_delegatee_balances();
            if tracker.total_supply != sum {
                return Err(std::format!(
                    "Tracker #{} total supply ({}) != sum of delegatee balances ({})",
                    index, tracker.total_supply, sum
                ));
            }
        }
        Ok(())
    }
}

/// **Token supply**: `token.total_supply == Σ holder balances`.
///
/// Holds as long as every holder that ever received tokens is tracked.
pub struct TokenSupplyConsistency;

impl Invariant for TokenSupplyConsistency {
    fn name(&self) -> &str {
        "token total_supply == sum(holder balances)"
    }

    fn check(&self, snapshot: &DelegationSnapshot) -> Result<(), String> {
        let sum = snapshot.sum_holder_balances();
        if snapshot.token_supply != sum {
            return Err(std::format!(
                "Token supply ({}) != sum of holder balances ({})",
                snapshot.token_supply, sum
            ));
        }
        Ok(())
    }
}

/// **No delegation, no weight**: a tracker records a delegatee for a holder
/// exactly when the registry lists the tracker among the holder's
/// delegations.
pub struct EdgeMembershipAgreement;

impl Invariant for EdgeMembershipAgreement {
    fn name(&self) -> &str {
        "tracker edge exists <=> registry lists tracker"
    }

    fn check(&self, snapshot: &DelegationSnapshot) -> Result<(), String> {
        for (index, tracker) in snapshot.trackers.iter().enumerate() {
            for (holder, target, listed) in &tracker.edges {
                if target.is_some() != *listed {
                    return Err(std::format!(
                        "Tracker #{} holder {:?}: edge {:?} but listed = {}",
                        index, holder, target, listed
                    ));
                }
            }
        }
        Ok(())
    }
}

/// **Non-negative balances** for holders and delegatees.
pub struct NonNegativeBalances;

impl Invariant for NonNegativeBalances {
    fn name(&self) -> &str {
        "all balances >= 0"
    }

    fn check(&self, snapshot: &DelegationSnapshot) -> Result<(), String> {
        for (holder, balance) in &snapshot.holder_balances {
            if *balance < 0 {
                return Err(std::format!("Holder {:?} has negative balance: {}", holder, balance));
            }
        }
        for tracker in &snapshot.trackers {
            for (delegatee, balance) in &tracker.delegatee_balances {
                if *balance < 0 {
                    return Err(std::format!(
                        "Delegatee {:?} has negative balance: {}",
                        delegatee, balance
                    ));
                }
            }
        }
        Ok(())
    }
}

/// **Delegation cap**: no holder uses more trackers than allowed.
pub struct DelegationCapRespected;

impl Invariant for DelegationCapRespected {
    fn name(&self) -> &str {
        "user_delegations_count <= max_user_delegations"
    }

    fn check(&self, snapshot: &DelegationSnapshot) -> Result<(), String> {
        for (holder, count) in &snapshot.delegation_counts {
            if *count > snapshot.max_user_delegations {
                return Err(std::format!(
                    "Holder {:?} uses {} trackers (cap {})",
                    holder, count, snapshot.max_user_delegations
                ));
            }
        }
        Ok(())
    }
}

// ── Invariant Set ────────────────────────────────────────────────────────────

/// A composable set of invariants checked together.
pub struct InvariantSet {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantSet {
    pub fn new() -> Self {
        Self {
            invariants: Vec::new(),
        }
    }

    /// All built-in delegation invariants.
    pub fn delegation_defaults() -> Self {
        let mut set = Self::new();
        set.add(Box::new(DelegationConservation));
        set.add(Box::new(TrackerSupplyConsistency));
        set.add(Box::new(TokenSupplyConsistency));
        set.add(Box::new(EdgeMembershipAgreement));
        set.add(Box::new(NonNegativeBalances));
        set.add(Box::new(DelegationCapRespected));
        set
    }

    pub fn add(&mut self, invariant: Box<dyn Invariant>) {
        self.invariants.push(invariant);
    }

    /// (invariant_name, violation_message) for every failure.
    pub fn check_all(&self, snapshot: &DelegationSnapshot) -> Vec<(String, String)> {
        let mut violations = Vec::new();
        for inv in &self.invariants {
            if let Err(msg) = inv.check(snapshot) {
                violations.push((inv.name().to_string(), msg));
            }
        }
        violations
    }

    /// Panics with a report when any invariant fails.
    pub fn assert_all(&self, snapshot: &DelegationSnapshot) {
        let violations = self.check_all(snapshot);
        if !violations.is_empty() {
            let mut report = String::from("Invariant violations detected:\n");
            for (name, msg) in &violations {
                report.push_str(&std::format!("  ✗ [{}]: {}\n", name, msg));
            }
            panic!("{}", report);
        }
    }

    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

impl Default for InvariantSet {
    fn default() -> Self {
        Self::new()
    }
}

// ── Transition Invariants ────────────────────────────────────────────────────

/// Invariants relating two consecutive snapshots.
pub trait TransitionInvariant {
    fn name(&self) -> &str;
    fn check(&self, before: &DelegationSnapshot, after: &DelegationSnapshot) -> Result<(), String>;
}

/// **Supply delta**: minting `amount` (negative for a burn) changes the
/// token supply by exactly `amount`.
pub struct SupplyDelta {
    pub amount: i128,
}

impl TransitionInvariant for SupplyDelta {
    fn name(&self) -> &str {
        "token supply changes by the minted/burned amount"
    }

    fn check(&self, before: &DelegationSnapshot, after: &DelegationSnapshot) -> Result<(), String> {
        let expected = before.token_supply.saturating_add(self.amount);
        if after.token_supply != expected {
            return Err(std::format!(
                "After supply change of {}: expected {}, got {}",
                self.amount, expected, after.token_supply
            ));
        }
        Ok(())
    }
}

/// **Transfers move weight, never create it**: a transfer between two
/// holders that delegate through the same trackers leaves every tracker's
/// supply unchanged.
pub struct TrackerSupplyPreserved;

impl TransitionInvariant for TrackerSupplyPreserved {
    fn name(&self) -> &str {
        "tracker supply unchanged"
    }

    fn check(&self, before: &DelegationSnapshot, after: &DelegationSnapshot) -> Result<(), String> {
        for (index, (b, a)) in before.trackers.iter().zip(after.trackers.iter()).enumerate() {
            if b.total_supply != a.total_supply {
                return Err(std::format!(
                    "Tracker #{} supply changed: {} -> {}",
                    index, b.total_supply, a.total_supply
                ));
            }
        }
        Ok(())
    }
}

/// Composite checker for transition invariants.
pub struct TransitionInvariantSet {
    invariants: Vec<Box<dyn TransitionInvariant>>,
}

impl TransitionInvariantSet {
    pub fn new() -> Self {
        Self {
            invariants: Vec::new(),
        }
    }

    pub fn add(&mut self, invariant: Box<dyn TransitionInvariant>) {
        self.invariants.push(invariant);
    }

    pub fn check_all(
        &self,
        before: &DelegationSnapshot,
        after: &DelegationSnapshot,
    ) -> Vec<(String, String)> {
        let mut violations = Vec::new();
        for inv in &self.invariants {
            if let Err(msg) = inv.check(before, after) {
                violations.push((inv.name().to_string(), msg));
            }
        }
        violations
    }

    pub fn assert_all(&self, before: &DelegationSnapshot, after: &DelegationSnapshot) {
        let violations = self.check_all(before, after);
        if !violations.is_empty() {
            let mut report = String::from("Transition invariant violations:\n");
            for (name, msg) in &violations {
                report.push_str(&std::format!("  ✗ [{}]: {}\n", name, msg));
            }
            panic!("{}", report);
        }
    }
}

impl Default for TransitionInvariantSet {
    fn default() -> Self {
        Self::new()
    }
}
