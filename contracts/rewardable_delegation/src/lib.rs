#![no_std]

//! # Rewardable Delegation
//!
//! Direct-call delegation tracker whose delegatees must register first.
//! Registration binds a delegatee to a share token owned by this tracker;
//! the tracker then mints shares to every holder delegating to that
//! delegatee (and burns them on the way out) in lockstep with the tracked
//! balance it attributes to the holder. Farms attach to the share tokens.
//!
//! A delegatee either lets the tracker deploy a fresh share token
//! (`register`) or hands over one it deployed itself with this tracker as
//! owner (`register_token`).

pub mod events;

use common::delegation::{self, CoreError};
use common::interfaces::ShareTokenClient;
use common::ledger::{self, LedgerError};
use common::ownable::{self, OwnershipError};
use common::registration::{self, RegistrationError};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, String, Symbol};

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NAME: Symbol = symbol_short!("NAME");
const SYMBOL: Symbol = symbol_short!("SYMBOL");
const SHARE_WASM: Symbol = symbol_short!("SHR_WASM");

const DECIMALS: u32 = 7;

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 10,
    NotRegisteredDelegatee = 20,
    SameDelegateeAssigned = 30,
    InvalidAmount = 31,
    MethodDisabled = 40,
    AlreadyRegistered = 41,
    AnotherDelegateeToken = 42,
    ShareTokenNotOwned = 43,
    BalanceUnderflow = 50,
    BalanceOverflow = 51,
}

fn map_ledger_error(err: LedgerError) -> ContractError {
    match err {
        LedgerError::NegativeAmount => ContractError::InvalidAmount,
        LedgerError::InsufficientBalance => ContractError::BalanceUnderflow,
        LedgerError::Overflow => ContractError::BalanceOverflow,
    }
}

fn map_core_error(err: CoreError) -> ContractError {
    match err {
        CoreError::SameDelegatee => ContractError::SameDelegateeAssigned,
        CoreError::Ledger(err) => map_ledger_error(err),
    }
}

fn map_ownership_error(err: OwnershipError) -> ContractError {
    match err {
        OwnershipError::AlreadySet => ContractError::AlreadyInitialized,
        OwnershipError::NotSet => ContractError::NotInitialized,
        OwnershipError::NotOwner => ContractError::NotOwner,
    }
}

fn map_registration_error(err: RegistrationError) -> ContractError {
    match err {
        RegistrationError::AlreadyRegistered => ContractError::AlreadyRegistered,
        RegistrationError::AnotherDelegateeToken => ContractError::AnotherDelegateeToken,
    }
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardableDelegationContract;

#[contractimpl]
impl RewardableDelegationContract {
    /// Bootstrap the tracker. `share_wasm` is the installed wasm hash used
    /// by `register` to deploy share tokens.
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        share_wasm: BytesN<32>,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        ownable::set_owner_once(&env, &owner).map_err(map_ownership_error)?;
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage().instance().set(&SHARE_WASM, &share_wasm);
        env.storage().instance().set(&INITIALIZED, &true);
        common::extend_instance(&env);

        events::publish_initialized(&env, &owner);
        Ok(())
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Deploy a share token for `delegatee` and register it.
    pub fn register(
        env: Env,
        delegatee: Address,
        name: String,
        symbol: String,
        max_farms: u32,
    ) -> Result<Address, ContractError> {
        Self::require_initialized(&env)?;
        delegatee.require_auth();
        registration::ensure_unregistered(&env, &delegatee).map_err(map_registration_error)?;

        let wasm_hash: BytesN<32> = env
            .storage()
            .instance()
            .get(&SHARE_WASM)
            .ok_or(ContractError::NotInitialized)?;
        let share_token = registration::deploy_share(&env, &wasm_hash);
        ShareTokenClient::new(&env, &share_token).initialize(
            &env.current_contract_address(),
            &name,
            &symbol,
            &max_farms,
        );

        registration::claim(&env, &delegatee, &share_token).map_err(map_registration_error)?;
        events::publish_registered(&env, &delegatee, &share_token);
        Ok(share_token)
    }

    /// Register an already deployed share token owned by this tracker.
    pub fn register_token(
        env: Env,
        delegatee: Address,
        token: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        delegatee.require_auth();
        registration::ensure_unregistered(&env, &delegatee).map_err(map_registration_error)?;
        if registration::claimed_by(&env, &token).is_some() {
            return Err(ContractError::AnotherDelegateeToken);
        }
        if !registration::is_owned_share(&env, &token) {
            return Err(ContractError::ShareTokenNotOwned);
        }

        registration::claim(&env, &delegatee, &token).map_err(map_registration_error)?;
        events::publish_registered(&env, &delegatee, &token);
        Ok(())
    }

    pub fn registration(env: Env, delegatee: Address) -> Option<Address> {
        registration::registration(&env, &delegatee)
    }

    // ── Owner-driven state changes ────────────────────────────────────────────

    /// Point `account` at the registered `delegatee` (`None` clears the
    /// delegation), moving `tracked_balance` and the matching shares.
    pub fn set_delegate(
        env: Env,
        caller: Address,
        account: Address,
        delegatee: Option<Address>,
        tracked_balance: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        ownable::require_owner(&env, &caller).map_err(map_ownership_error)?;
        if tracked_balance < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if let Some(delegatee) = &delegatee {
            if !registration::is_registered(&env, delegatee) {
                return Err(ContractError::NotRegisteredDelegatee);
            }
        }

        let previous =
            delegation::redelegate(&env, &account, delegatee.as_ref(), tracked_balance)
                .map_err(map_core_error)?;
        registration::mirror_shares(
            &env,
            previous.as_ref().map(|previous| (&account, previous)),
            delegatee.as_ref().map(|delegatee| (&account, delegatee)),
            tracked_balance,
        );
        common::extend_instance(&env);

        match delegatee {
            Some(delegatee) => events::publish_delegate(&env, &account, &delegatee),
            None => events::publish_undelegate(&env, &account, previous),
        }
        Ok(())
    }

    /// Apply a balance change of `amount` from `from` to `to` on the owner's
    /// ledger and move the holders' shares along.
    pub fn update_balances(
        env: Env,
        caller: Address,
        from: Option<Address>,
        to: Option<Address>,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        ownable::require_owner(&env, &caller).map_err(map_ownership_error)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if from == to {
            return Ok(());
        }

        let (from_delegatee, to_delegatee) =
            delegation::update_balances(&env, from.as_ref(), to.as_ref(), amount)
                .map_err(map_ledger_error)?;
        registration::mirror_shares(
            &env,
            from.as_ref().zip(from_delegatee.as_ref()),
            to.as_ref().zip(to_delegatee.as_ref()),
            amount,
        );
        Ok(())
    }

    // ── Disabled token mutators ───────────────────────────────────────────────

    pub fn transfer(
        _env: Env,
        _from: Address,
        _to: Address,
        _amount: i128,
    ) -> Result<(), ContractError> {
        Err(ContractError::MethodDisabled)
    }

    pub fn transfer_from(
        _env: Env,
        _spender: Address,
        _from: Address,
        _to: Address,
        _amount: i128,
    ) -> Result<(), ContractError> {
        Err(ContractError::MethodDisabled)
    }

    pub fn approve(
        _env: Env,
        _from: Address,
        _spender: Address,
        _amount: i128,
        _expiration_ledger: u32,
    ) -> Result<(), ContractError> {
        Err(ContractError::MethodDisabled)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn delegated(env: Env, account: Address) -> Option<Address> {
        delegation::delegated(&env, &account)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        ledger::balance_of(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        ledger::total_supply(&env)
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        ownable::owner(&env).map_err(map_ownership_error)
    }

    pub fn name(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&NAME)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&SYMBOL)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }
}
