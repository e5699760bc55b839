/*!
 * Escrow Vault Smart Contract
 *
 * Custodies the value staked for each trade until its controller releases it.
 * Key features:
 * - One vault record per trade, opened by the trade engine that will control it
 * - Open deposits: any party may top up a vault, the engine only ever deposits from
 *   the importer
 * - Single controlled payout: the full balance goes to the beneficiary, once
 *
 * Security features:
 * - Controller authentication through Soroban's `require_auth`
 * - Balance is zeroed and persisted before the outgoing transfer
 *   (checks-effects-interactions), plus an instance-level reentrancy guard
 * - A second withdrawal fails with `EmptyVault`, so the beneficiary is paid once
 */

#![no_std]

mod reentrancy_guard;
mod types;


use soroban_sdk::{contract, contractimpl, log, token, Address, Env};

pub use types::{DataKey, Error, Vault, DEPOSITED, VAULT_OPENED, WITHDRAWN};

#[contract]
pub struct EscrowVaultContract;

#[contractimpl]
impl EscrowVaultContract {
    /// Binds the vault contract to its settlement asset.
    /// This function can only be called once.
    ///
    /// # Arguments
    /// * `token` - The Stellar asset contract holding custodied value (native XLM in production)
    ///
    /// # Errors
    /// - AlreadyInitialized: If a token is already configured
    pub fn initialize(env: Env, token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Token) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::VaultCount, &0u64);
        Ok(())
    }

    fn _token_client(env: &Env) -> Result<token::Client<'_>, Error> {
        let token_id: Address = env
            .storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)?;
        Ok(token::Client::new(env, &token_id))
    }

    fn _load(env: &Env, vault_id: u64) -> Result<Vault, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Vault(vault_id))
            .ok_or(Error::VaultNotFound)
    }

    fn _save(env: &Env, vault_id: u64, vault: &Vault) {
        env.storage().persistent().set(&DataKey::Vault(vault_id), vault);
    }

    /// Opens an empty vault for a new trade.
    ///
    /// The controller must authorize the call, so a vault is always opened by the
    /// party that will control it. When the trade engine calls this directly, its own
    /// contract address is the controller and is authorized implicitly.
    ///
    /// # Arguments
    /// * `controller` - The only address that may later trigger the payout
    /// * `beneficiary` - The address that receives the payout
    ///
    /// # Returns
    /// The id of the new vault, starting at 1
    ///
    /// # Errors
    /// - NotInitialized: If no settlement token is configured
    pub fn open_vault(env: Env, controller: Address, beneficiary: Address) -> Result<u64, Error> {
        if !env.storage().instance().has(&DataKey::Token) {
            return Err(Error::NotInitialized);
        }
        controller.require_auth();

        let vault_id: u64 = env
            .storage()
            .instance()
            .get::<_, u64>(&DataKey::VaultCount)
            .unwrap_or(0)
            + 1;

        let vault = Vault {
            controller: controller.clone(),
            beneficiary: beneficiary.clone(),
            balance: 0,
        };
        Self::_save(&env, vault_id, &vault);
        env.storage().instance().set(&DataKey::VaultCount, &vault_id);

        env.events()
            .publish((VAULT_OPENED, controller), (vault_id, beneficiary));

        Ok(vault_id)
    }

    /// Deposits value into a vault.
    ///
    /// There is no role check: any party may top up a vault. Deposits accumulate.
    ///
    /// # Arguments
    /// * `vault_id` - The vault receiving the value
    /// * `from` - The address paying in (must sign)
    /// * `amount` - Amount in base units of the settlement asset
    ///
    /// # Errors
    /// - InvalidAmount: If amount is zero or negative
    /// - VaultNotFound: If the vault does not exist
    /// - TransferFailed: If the token refused the transfer (for example insufficient balance)
    /// - ReentrantCall: If a fund movement is already executing
    pub fn deposit(env: Env, vault_id: u64, from: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        reentrancy_guard::acquire(&env)?;

        let mut vault = Self::_load(&env, vault_id)?;
        let token_client = Self::_token_client(&env)?;

        if token_client
            .try_transfer(&from, &env.current_contract_address(), &amount)
            .is_err()
        {
            log!(&env, "Deposit of {} into vault {} failed", amount, vault_id);
            return Err(Error::TransferFailed);
        }

        vault.balance = vault
            .balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        Self::_save(&env, vault_id, &vault);

        env.events().publish((DEPOSITED, from), (vault_id, amount));

        reentrancy_guard::release(&env);
        Ok(())
    }

    /// Releases the full balance of a vault to its beneficiary.
    ///
    /// # Security Features
    /// - Only the controller recorded at opening may withdraw, the beneficiary included
    ///   gets `Unauthorized`
    /// - The balance is zeroed and persisted before the outgoing transfer, so a
    ///   re-entrant call can only ever observe an empty vault
    ///
    /// # Arguments
    /// * `vault_id` - The vault to drain
    /// * `caller` - The address requesting the payout (must sign)
    ///
    /// # Returns
    /// The amount paid to the beneficiary
    ///
    /// # Errors
    /// - VaultNotFound: If the vault does not exist
    /// - Unauthorized: If caller is not the controller
    /// - EmptyVault: If the vault holds nothing (including after a previous withdrawal)
    /// - TransferFailed: If the token refused the payout
    /// - ReentrantCall: If a fund movement is already executing
    pub fn withdraw(env: Env, vault_id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();

        reentrancy_guard::acquire(&env)?;

        let mut vault = Self::_load(&env, vault_id)?;
        if caller != vault.controller {
            return Err(Error::Unauthorized);
        }
        if vault.balance == 0 {
            return Err(Error::EmptyVault);
        }

        // Effects before interactions.
        let amount = vault.balance;
        vault.balance = 0;
        Self::_save(&env, vault_id, &vault);

        let token_client = Self::_token_client(&env)?;
        if token_client
            .try_transfer(&env.current_contract_address(), &vault.beneficiary, &amount)
            .is_err()
        {
            log!(&env, "Payout of {} from vault {} failed", amount, vault_id);
            return Err(Error::TransferFailed);
        }

        env.events()
            .publish((WITHDRAWN, vault.beneficiary.clone()), (vault_id, amount));

        reentrancy_guard::release(&env);
        Ok(amount)
    }

    /// Returns the amount currently custodied by a vault.
    pub fn get_balance(env: Env, vault_id: u64) -> Result<i128, Error> {
        Self::_load(&env, vault_id).map(|vault| vault.balance)
    }

    /// Returns the full vault record.
    pub fn get_vault(env: Env, vault_id: u64) -> Result<Vault, Error> {
        Self::_load(&env, vault_id)
    }

    /// Returns how many vaults have been opened; the most recent id equals this count.
    pub fn vault_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::VaultCount)
            .unwrap_or(0)
    }

    /// Returns the settlement token every vault holds.
    pub fn get_token(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)
    }
}
