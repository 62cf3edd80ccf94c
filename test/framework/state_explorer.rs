//! # State Space Explorer
//!
//! Executes registry-token action sequences and verifies the balance
//! invariants after every transition.
//!
//! ## Complexity
//!
//! - Time: O(S × I) contract calls plus invariant checks, where S is bounded
//!   by `max_steps` and I is the invariant cost (see `invariants`).
//! - Space: O(S) snapshots when `record_snapshots` is on, O(1) otherwise.

extern crate std;

use soroban_sdk::Address;
use std::string::String;
use std::vec::Vec;

use super::generators::DelegationAction;
use super::invariants::InvariantSet;
use super::{ActionOutcome, DelegationHarness, DelegationSnapshot, TestRunSummary};

// ── Explorer Configuration ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Maximum number of actions executed in one run.
    pub max_steps: usize,
    /// Halt on the first invariant violation.
    pub fail_fast: bool,
    /// Keep a snapshot after every step.
    pub record_snapshots: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100,
            fail_fast: true,
            record_snapshots: false,
        }
    }
}

// ── Exploration Result ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ExplorationResult {
    pub summary: TestRunSummary,
    pub snapshots: Vec<DelegationSnapshot>,
    pub action_log: Vec<(DelegationAction, ActionOutcome)>,
}

impl ExplorationResult {
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Number of actions the contracts rejected with a contract error.
    pub fn rejected_actions(&self) -> usize {
        self.action_log
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ActionOutcome::ExpectedError(_)))
            .count()
    }
}

// ── State Space Explorer ─────────────────────────────────────────────────────

/// Runs action sequences against a `DelegationHarness`, checking invariants
/// after every transition.
pub struct StateExplorer<'a> {
    harness: &'a DelegationHarness<'a>,
    invariants: InvariantSet,
    config: ExplorerConfig,
    holders: Vec<Address>,
}

impl<'a> StateExplorer<'a> {
    pub fn new(
        harness: &'a DelegationHarness<'a>,
        invariants: InvariantSet,
        config: ExplorerConfig,
        holders: Vec<Address>,
    ) -> Self {
        Self {
            harness,
            invariants,
            config,
            holders,
        }
    }

    /// Default configuration with the built-in invariants.
    pub fn with_defaults(harness: &'a DelegationHarness<'a>, holders: Vec<Address>) -> Self {
        Self::new(
            harness,
            InvariantSet::delegation_defaults(),
            ExplorerConfig::default(),
            holders,
        )
    }

    pub fn explore(&mut self, actions: &[DelegationAction]) -> ExplorationResult {
        let mut summary = TestRunSummary::new();
        let mut snapshots = Vec::new();
        let mut action_log = Vec::new();

        if self.config.record_snapshots {
            snapshots.push(self.harness.snapshot(&self.holders));
        }

        let steps = actions.len().min(self.config.max_steps);

        for action in actions.iter().take(steps) {
            let outcome = self.execute_action(action);
            summary.entry_points_hit.insert(action_entry_point(action));
            summary.actions_executed += 1;
            summary.transitions_observed += 1;
            if let ActionOutcome::UnexpectedError(err) = &outcome {
                summary.invariant_violations.push(std::format!(
                    "Action #{} ({:?}) failed outside the contract: {}",
                    summary.actions_executed, action, err
                ));
            }
            action_log.push((action.clone(), outcome));

            let snapshot = self.harness.snapshot(&self.holders);
            let violations = self.invariants.check_all(&snapshot);
            summary.invariant_checks += 1;

            for (name, msg) in violations {
                summary.invariant_violations.push(std::format!(
                    "After action #{} ({:?}): [{}] {}",
                    summary.actions_executed, action, name, msg
                ));
            }

            if self.config.record_snapshots {
                snapshots.push(snapshot);
            }
            if self.config.fail_fast && !summary.passed() {
                break;
            }
        }

        ExplorationResult {
            summary,
            snapshots,
            action_log,
        }
    }

    fn holder(&self, index: usize) -> &Address {
        &self.holders[index % self.holders.len()]
    }

    fn tracker(&self, index: usize) -> Address {
        let honest = self.harness.trackers.len();
        match index % (honest + 1) {
            i if i == honest => self.harness.faulty_tracker.clone(),
            i => self.harness.tracker_address(i),
        }
    }

    fn delegatee(&self, index: usize) -> &Address {
        &self.harness.delegatees[index % self.harness.delegatees.len()]
    }

    fn execute_action(&self, action: &DelegationAction) -> ActionOutcome {
        let token = &self.harness.token;
        let result = match action {
            DelegationAction::Mint { holder, amount } => token.try_mint(self.holder(*holder), amount),
            DelegationAction::Burn { holder, amount } => token.try_burn(self.holder(*holder), amount),
            DelegationAction::Transfer { from, to, amount } => {
                token.try_transfer(self.holder(*from), self.holder(*to), amount)
            }
            DelegationAction::Delegate {
                holder,
                tracker,
                delegatee,
            } => token.try_delegate(
                self.holder(*holder),
                &self.tracker(*tracker),
                self.delegatee(*delegatee),
            ),
            DelegationAction::Undelegate { holder, tracker } => {
                token.try_undelegate(self.holder(*holder), &self.tracker(*tracker))
            }
            DelegationAction::UndelegateAll { holder } => {
                token.try_undelegate_all(self.holder(*holder))
            }
        };
        match result {
            Ok(_) => ActionOutcome::Ok,
            Err(Ok(e)) => ActionOutcome::ExpectedError(e as u32),
            Err(Err(e)) => ActionOutcome::UnexpectedError(std::format!("{:?}", e)),
        }
    }
}

/// Entry point name of `action`, for coverage tracking.
fn action_entry_point(action: &DelegationAction) -> String {
    match action {
        DelegationAction::Mint { .. } => "mint".into(),
        DelegationAction::Burn { .. } => "burn".into(),
        DelegationAction::Transfer { .. } => "transfer".into(),
        DelegationAction::Delegate { .. } => "delegate".into(),
        DelegationAction::Undelegate { .. } => "undelegate".into(),
        DelegationAction::UndelegateAll { .. } => "undelegate_all".into(),
    }
}

/// The state-changing entry points of the registry token.
pub const REGISTRY_ENTRY_POINTS: &[&str] = &[
    "mint",
    "burn",
    "transfer",
    "delegate",
    "undelegate",
    "undelegate_all",
];
