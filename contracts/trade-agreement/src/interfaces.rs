//! Client interfaces for the contracts the engine calls into.

use soroban_sdk::{contractclient, Address, Env, String};

use crate::types::{RiskAssessment, Role};

/// Identity registry, consulted to gate both parties of a trade.
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn is_verified(env: Env, address: Address) -> bool;

    /// Fails for addresses the registry has never seen.
    fn get_role(env: Env, address: Address) -> Role;
}

/// Escrow vault arena. The engine opens one vault per trade with itself as the
/// controller, forwards the importer's funding into it and drains it on completion.
#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn open_vault(env: Env, controller: Address, beneficiary: Address) -> u64;

    fn deposit(env: Env, vault_id: u64, from: Address, amount: i128);

    fn withdraw(env: Env, vault_id: u64, caller: Address) -> i128;

    fn get_balance(env: Env, vault_id: u64) -> i128;
}

/// Advisory service scoring a trade's description and ESG data.
///
/// The service is non-authoritative: it is only ever called through the fallible
/// `try_assess`, and the engine never depends on its answer.
#[contractclient(name = "AdvisorClient")]
pub trait AdvisorInterface {
    fn assess(env: Env, description: String, esg_data: String) -> RiskAssessment;
}
