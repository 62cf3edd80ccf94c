#![no_main]

use arbitrary::Arbitrary;
use basic_delegation::{BasicDelegationContract, BasicDelegationContractClient};
use delegatable_token::{DelegatableTokenContract, DelegatableTokenContractClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Env, String};

/// Actions covering every state-changing entry point of the registry token.
///
/// Selectors are small indices reduced modulo the holder, tracker and
/// delegatee pools so most actions reach the accounting code.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Mint { holder: u8, amount: u32 },
    Burn { holder: u8, amount: u32 },
    Transfer { from: u8, to: u8, amount: u32 },
    Delegate { holder: u8, tracker: u8, delegatee: u8 },
    Undelegate { holder: u8, tracker: u8 },
    UndelegateAll { holder: u8 },
}

const HOLDERS: usize = 4;
const TRACKERS: usize = 3;
const DELEGATEES: usize = 3;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();

    let admin = Address::generate(&env);
    let token_id = env.register(DelegatableTokenContract, ());
    let token = DelegatableTokenContractClient::new(&env, &token_id);
    if token
        .try_initialize(
            &admin,
            &String::from_str(&env, "Delegatable"),
            &String::from_str(&env, "DLG"),
            &2u32,
        )
        .is_err()
    {
        return;
    }

    let trackers: Vec<BasicDelegationContractClient> = (0..TRACKERS)
        .map(|_| {
            let tracker = BasicDelegationContractClient::new(
                &env,
                &env.register(BasicDelegationContract, ()),
            );
            tracker.initialize(
                &token_id,
                &String::from_str(&env, "Votes"),
                &String::from_str(&env, "VOTE"),
            );
            tracker
        })
        .collect();
    let holders: Vec<Address> = (0..HOLDERS).map(|_| Address::generate(&env)).collect();
    let delegatees: Vec<Address> = (0..DELEGATEES).map(|_| Address::generate(&env)).collect();

    let holder = |i: u8| &holders[i as usize % HOLDERS];
    let tracker = |i: u8| &trackers[i as usize % TRACKERS].address;
    let delegatee = |i: u8| &delegatees[i as usize % DELEGATEES];

    for action in actions {
        match action {
            FuzzAction::Mint { holder: h, amount } => {
                let _ = token.try_mint(holder(h), &(amount as i128));
            }
            FuzzAction::Burn { holder: h, amount } => {
                let _ = token.try_burn(holder(h), &(amount as i128));
            }
            FuzzAction::Transfer { from, to, amount } => {
                let _ = token.try_transfer(holder(from), holder(to), &(amount as i128));
            }
            FuzzAction::Delegate {
                holder: h,
                tracker: t,
                delegatee: d,
            } => {
                let _ = token.try_delegate(holder(h), tracker(t), delegatee(d));
            }
            FuzzAction::Undelegate { holder: h, tracker: t } => {
                let _ = token.try_undelegate(holder(h), tracker(t));
            }
            FuzzAction::UndelegateAll { holder: h } => {
                let _ = token.try_undelegate_all(holder(h));
            }
        }

        // ── Post-action invariant checks ──
        let supply: i128 = holders.iter().map(|h| token.balance(h)).sum();
        assert_eq!(supply, token.total_supply(), "INVARIANT VIOLATION: token supply drifted");

        for t in &trackers {
            let mut tracked = 0i128;
            for d in &delegatees {
                let expected: i128 = holders
                    .iter()
                    .filter(|h| t.delegated(h).as_ref() == Some(d))
                    .map(|h| token.balance(h))
                    .sum();
                let balance = t.balance(d);
                assert_eq!(balance, expected, "INVARIANT VIOLATION: delegatee balance != delegated");
                tracked += balance;
            }
            assert_eq!(tracked, t.total_supply(), "INVARIANT VIOLATION: tracker supply drifted");
        }

        for h in &holders {
            assert!(
                token.user_delegations_count(h) <= 2,
                "INVARIANT VIOLATION: delegation cap exceeded"
            );
        }
    }
});
