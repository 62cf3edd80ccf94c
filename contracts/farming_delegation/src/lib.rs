#![no_std]

//! # Farming Delegation
//!
//! Notifier-driven delegation tracker with per-delegatee share tokens.
//!
//! Holders attach this tracker as a hook on the host token and choose a
//! registered delegatee. The tracker mirrors each holder's hooked balance
//! into the delegatee's balance and mints the same amount of the
//! delegatee's share token to the holder. A delegatee may name a default
//! farm; holders delegating to it get the farm attached to their shares.

pub mod events;

use common::delegation;
use common::interfaces::{HookHostClient, ShareTokenClient, SHARE_HOOKS_LIMIT_REACHED};
use common::ledger::{self, LedgerError};
use common::registration::{self, RegistrationError};
use common::{TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, BytesN, Env, Error, String, Symbol,
};

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const NAME: Symbol = symbol_short!("NAME");
const SYMBOL: Symbol = symbol_short!("SYMBOL");
const SHARE_WASM: Symbol = symbol_short!("SHR_WASM");
const MAX_FARMS: Symbol = symbol_short!("MAX_FARM");
const DEFAULT_FARM: Symbol = symbol_short!("DEF_FARM");

const DECIMALS: u32 = 7;

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotHost = 11,
    NotRegisteredDelegatee = 20,
    InvalidAmount = 31,
    TransferDisabled = 40,
    ApproveDisabled = 41,
    AlreadyRegistered = 42,
    AnotherDelegateeToken = 43,
    ShareTokenNotOwned = 44,
    HooksLimitReached = 45,
    DefaultFarmRejected = 46,
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

fn map_registration_error(err: RegistrationError) -> ContractError {
    match err {
        RegistrationError::AlreadyRegistered => ContractError::AlreadyRegistered,
        RegistrationError::AnotherDelegateeToken => ContractError::AnotherDelegateeToken,
    }
}

fn default_farm_key(delegatee: &Address) -> (Symbol, Address) {
    (DEFAULT_FARM, delegatee.clone())
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct FarmingDelegationContract;

#[contractimpl]
impl FarmingDelegationContract {
    /// Bootstrap the tracker for host `token`. Share tokens deployed by
    /// `register` come from `share_wasm` and allow `max_farms` farms per
    /// holder.
    pub fn initialize(
        env: Env,
        token: Address,
        name: String,
        symbol: String,
        share_wasm: BytesN<32>,
        max_farms: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage().instance().set(&SHARE_WASM, &share_wasm);
        env.storage().instance().set(&MAX_FARMS, &max_farms);
        env.storage().instance().set(&INITIALIZED, &true);
        common::extend_instance(&env);

        events::publish_initialized(&env, &token, max_farms);
        Ok(())
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Deploy a share token for `delegatee` and register it.
    pub fn register(
        env: Env,
        delegatee: Address,
        name: String,
        symbol: String,
    ) -> Result<Address, ContractError> {
        Self::token(env.clone())?;
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
            &Self::max_farms(env.clone()),
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
        Self::token(env.clone())?;
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

    /// Name the farm attached to the shares of every holder that delegates
    /// to `delegatee` from now on.
    pub fn set_default_farm(
        env: Env,
        delegatee: Address,
        farm: Address,
    ) -> Result<(), ContractError> {
        Self::token(env.clone())?;
        delegatee.require_auth();
        if !registration::is_registered(&env, &delegatee) {
            return Err(ContractError::NotRegisteredDelegatee);
        }
        let key = default_farm_key(&delegatee);
        env.storage().persistent().set(&key, &farm);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_default_farm_set(&env, &delegatee, &farm);
        Ok(())
    }

    pub fn default_farm(env: Env, delegatee: Address) -> Option<Address> {
        env.storage().persistent().get(&default_farm_key(&delegatee))
    }

    // ── Holder-driven state changes ───────────────────────────────────────────

    /// Point the caller's hooked balance at `delegatee` (`None` to
    /// undelegate). Repeating the current target is a silent no-op.
    pub fn delegate(
        env: Env,
        account: Address,
        delegatee: Option<Address>,
    ) -> Result<(), ContractError> {
        let token = Self::token(env.clone())?;
        account.require_auth();
        if let Some(delegatee) = &delegatee {
            if !registration::is_registered(&env, delegatee) {
                return Err(ContractError::NotRegisteredDelegatee);
            }
        }

        let previous = delegation::delegated(&env, &account);
        if previous == delegatee {
            return Ok(());
        }
        let balance = HookHostClient::new(&env, &token)
            .hook_balance_of(&env.current_contract_address(), &account);
        delegation::apply(&env, &account, previous.as_ref(), delegatee.as_ref(), balance)
            .map_err(map_ledger_error)?;
        registration::mirror_shares(
            &env,
            previous.as_ref().map(|previous| (&account, previous)),
            delegatee.as_ref().map(|delegatee| (&account, delegatee)),
            balance,
        );
        if let Some(delegatee) = &delegatee {
            Self::attach_default_farm(&env, &account, delegatee)?;
        }
        common::extend_instance(&env);

        match delegatee {
            Some(delegatee) => events::publish_delegated(&env, &account, &delegatee),
            None => events::publish_undelegated(&env, &account, previous),
        }
        Ok(())
    }

    /// Balance-change callback; only the host token may call it.
    pub fn update_balances(
        env: Env,
        caller: Address,
        from: Option<Address>,
        to: Option<Address>,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_host(&env, &caller)?;
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
        Err(ContractError::TransferDisabled)
    }

    pub fn transfer_from(
        _env: Env,
        _spender: Address,
        _from: Address,
        _to: Address,
        _amount: i128,
    ) -> Result<(), ContractError> {
        Err(ContractError::TransferDisabled)
    }

    pub fn approve(
        _env: Env,
        _from: Address,
        _spender: Address,
        _amount: i128,
        _expiration_ledger: u32,
    ) -> Result<(), ContractError> {
        Err(ContractError::ApproveDisabled)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn max_farms(env: Env) -> u32 {
        env.storage().instance().get(&MAX_FARMS).unwrap_or(0)
    }

    pub fn delegated(env: Env, account: Address) -> Option<Address> {
        delegation::delegated(&env, &account)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        ledger::balance_of(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        ledger::total_supply(&env)
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

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_host(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let token = Self::token(env.clone())?;
        caller.require_auth();
        if *caller != token {
            return Err(ContractError::NotHost);
        }
        Ok(())
    }

    /// A full farm list surfaces as `HooksLimitReached`; any other refusal
    /// by the share token as `DefaultFarmRejected`.
    fn attach_default_farm(
        env: &Env,
        account: &Address,
        delegatee: &Address,
    ) -> Result<(), ContractError> {
        let farm: Option<Address> = env.storage().persistent().get(&default_farm_key(delegatee));
        let (Some(farm), Some(share_token)) = (farm, registration::registration(env, delegatee))
        else {
            return Ok(());
        };
        match ShareTokenClient::new(env, &share_token).try_add_default_farm_if_needed(
            &env.current_contract_address(),
            account,
            &farm,
        ) {
            Ok(Ok(())) => Ok(()),
            Err(Ok(err)) if err == Error::from_contract_error(SHARE_HOOKS_LIMIT_REACHED) => {
                Err(ContractError::HooksLimitReached)
            }
            _ => Err(ContractError::DefaultFarmRejected),
        }
    }
}
