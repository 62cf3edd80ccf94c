//! # Scenario DSL
//!
//! Builder API for readable Given-When-Then scenarios against a
//! `DelegationHarness`.
//!
//! ## Example
//!
//! ```rust,ignore
//! Scenario::new("Transfer between delegating holders")
//!     .given(|ctx| {
//!         let alice = ctx.harness.create_holder(1_000);
//!         ctx.holders.push(alice);
//!     })
//!     .when("alice delegates", |ctx| {
//!         ctx.harness.delegate(&ctx.holders[0], 0, &ctx.harness.delegatees[0]);
//!     })
//!     .then("the delegatee carries her balance", |ctx| {
//!         assert_eq!(ctx.harness.tracked_balance(0, &ctx.harness.delegatees[0]), 1_000);
//!     })
//!     .run();
//! ```

extern crate std;

use soroban_sdk::Address;
use std::string::String;
use std::vec::Vec;

use super::invariants::InvariantSet;
use super::{DelegationHarness, TestEnv};

// ── Scenario Context ─────────────────────────────────────────────────────────

/// Mutable context passed to scenario steps.
pub struct ScenarioContext<'a, 'b> {
    pub harness: &'a DelegationHarness<'b>,
    pub holders: Vec<Address>,
    /// Named values carried between steps.
    pub data: std::collections::HashMap<String, i128>,
}

impl<'a, 'b> ScenarioContext<'a, 'b> {
    fn new(harness: &'a DelegationHarness<'b>) -> Self {
        Self {
            harness,
            holders: Vec::new(),
            data: std::collections::HashMap::new(),
        }
    }

    pub fn store(&mut self, key: &str, value: i128) {
        self.data.insert(key.into(), value);
    }

    pub fn load(&self, key: &str) -> i128 {
        *self
            .data
            .get(key)
            .unwrap_or_else(|| panic!("Scenario variable '{}' not found", key))
    }

    /// Shorthand for the `i`-th delegatee of the harness pool.
    pub fn delegatee(&self, i: usize) -> Address {
        self.harness.delegatees[i].clone()
    }
}

// ── Step Types ───────────────────────────────────────────────────────────────

type StepFn = Box<dyn FnOnce(&mut ScenarioContext<'_, '_>)>;

struct GivenStep {
    action: StepFn,
}

struct WhenStep {
    #[allow(dead_code)]
    description: String,
    action: StepFn,
}

struct ThenStep {
    #[allow(dead_code)]
    description: String,
    assertion: StepFn,
}

// ── Scenario Builder ─────────────────────────────────────────────────────────

/// A Given-When-Then scenario. Steps run in order during `run()`; attached
/// invariants are checked between the When and Then phases.
pub struct Scenario {
    name: String,
    num_trackers: usize,
    max_user_delegations: u32,
    given_steps: Vec<GivenStep>,
    when_steps: Vec<WhenStep>,
    then_steps: Vec<ThenStep>,
    invariants: Option<InvariantSet>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            num_trackers: 1,
            max_user_delegations: 3,
            given_steps: Vec::new(),
            when_steps: Vec::new(),
            then_steps: Vec::new(),
            invariants: None,
        }
    }

    pub fn with_trackers(mut self, num_trackers: usize) -> Self {
        self.num_trackers = num_trackers;
        self
    }

    pub fn with_max_user_delegations(mut self, max: u32) -> Self {
        self.max_user_delegations = max;
        self
    }

    pub fn given<F>(mut self, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.given_steps.push(GivenStep {
            action: Box::new(action),
        });
        self
    }

    pub fn when<F>(mut self, description: &str, action: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.when_steps.push(WhenStep {
            description: description.into(),
            action: Box::new(action),
        });
        self
    }

    pub fn then<F>(mut self, description: &str, assertion: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.then_steps.push(ThenStep {
            description: description.into(),
            assertion: Box::new(assertion),
        });
        self
    }

    pub fn with_invariants(mut self, invariants: InvariantSet) -> Self {
        self.invariants = Some(invariants);
        self
    }

    /// Builds a fresh harness and runs every step. Panics on failure.
    pub fn run(self) {
        let mut env = TestEnv::new();
        let harness = DelegationHarness::new(&mut env, self.num_trackers, self.max_user_delegations);
        let mut ctx = ScenarioContext::new(&harness);

        for step in self.given_steps {
            (step.action)(&mut ctx);
        }

        for step in self.when_steps {
            (step.action)(&mut ctx);
        }

        if let Some(ref invariants) = self.invariants {
            let snapshot = harness.snapshot(&ctx.holders);
            let violations = invariants.check_all(&snapshot);
            if !violations.is_empty() {
                let mut report = std::format!(
                    "Scenario '{}': invariant violations after actions:\n",
                    self.name
                );
                for (name, msg) in &violations {
                    report.push_str(&std::format!("  ✗ [{}]: {}\n", name, msg));
                }
                panic!("{}", report);
            }
        }

        for step in self.then_steps {
            (step.assertion)(&mut ctx);
        }
    }
}

// ── Assertion Helpers ────────────────────────────────────────────────────────

/// Assert that a `try_*` call failed with the expected contract error.
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected:expr) => {
        match $result {
            Err(Ok(e)) => assert_eq!(
                e, $expected,
                "Expected error {:?}, got {:?}",
                $expected, e
            ),
            Err(Err(e)) => panic!("Unexpected SDK error: {:?}", e),
            Ok(_) => panic!("Expected error {:?}, but operation succeeded", $expected),
        }
    };
}

// ── Batch Scenario Runner ────────────────────────────────────────────────────

/// Runs every scenario; returns (passed, failed).
pub fn run_scenarios(scenarios: Vec<Scenario>) -> (usize, usize) {
    let total = scenarios.len();
    let mut failures = 0;

    for scenario in scenarios {
        let name = scenario.name.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            scenario.run();
        }));

        match result {
            Ok(()) => {
                std::eprintln!("  ✓ {}", name);
            }
            Err(_) => {
                std::eprintln!("  ✗ {}", name);
                failures += 1;
            }
        }
    }

    (total - failures, failures)
}
