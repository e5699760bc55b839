/*!
 * Type Definitions for the Escrow Vault Contract
 *
 * The escrow vault contract is an arena of custodial records. Each record holds the
 * value staked for exactly one trade and can only be released by its controller, to
 * its beneficiary, in one piece.
 */

use soroban_sdk::{contracterror, contracttype, symbol_short, Address, Symbol};

// ================================================================================================
// CORE DATA STRUCTURES
// ================================================================================================

/// Custodial record for one trade's staked value.
///
/// The vault state is implicit in the balance: a vault is Empty when `balance == 0`
/// and Holding otherwise. Deposits move it to Holding (accumulating), the single
/// authorized withdrawal drains it back to Empty.
///
/// # Invariants
/// - `controller` and `beneficiary` are fixed when the vault is opened
/// - `balance` only increases through deposits and only decreases through a
///   withdrawal by `controller`, which pays the whole balance to `beneficiary`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vault {
    /// The only address allowed to trigger the payout (the trade engine)
    pub controller: Address,

    /// The address that receives the payout (the exporter)
    pub beneficiary: Address,

    /// Currently custodied amount, in base units of the settlement asset
    pub balance: i128,
}

/// Storage keys.
///
/// Configuration, the id counter and the reentrancy flag live in instance storage;
/// vault records live in persistent storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Token,
    VaultCount,
    Vault(u64),
    ReentrancyGuard,
}

// ================================================================================================
// ERROR DEFINITIONS
// ================================================================================================

/// Error codes for the escrow vault.
///
/// # Error Code Ranges
/// - 1-2: Lifecycle of the contract itself
/// - 3-6: Vault access and accounting
/// - 7-8: Token movement and call safety
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// No settlement token has been configured
    NotInitialized = 1,

    /// `initialize` was already called
    AlreadyInitialized = 2,

    /// No vault exists under the requested id
    VaultNotFound = 3,

    /// Caller is not the vault's controller
    Unauthorized = 4,

    /// Withdrawal attempted on a vault holding nothing
    EmptyVault = 5,

    /// Deposit amount is zero or negative
    InvalidAmount = 6,

    /// The settlement token rejected the transfer
    TransferFailed = 7,

    /// A deposit or withdrawal is already executing
    ReentrantCall = 8,
}

// ================================================================================================
// EVENT CONSTANTS
// ================================================================================================

/// Event emitted when a vault is opened
/// Topics: (VAULT_OPENED, controller)
/// Data: (vault_id, beneficiary)
pub const VAULT_OPENED: Symbol = symbol_short!("vlt_open");

/// Event emitted when value is deposited into a vault
/// Topics: (DEPOSITED, sender)
/// Data: (vault_id, amount)
pub const DEPOSITED: Symbol = symbol_short!("deposit");

/// Event emitted when a vault is drained to its beneficiary
/// Topics: (WITHDRAWN, beneficiary)
/// Data: (vault_id, amount)
pub const WITHDRAWN: Symbol = symbol_short!("withdrawn");
