/*!
 * Type Definitions for the Identity Registry Contract
 *
 * Participant records, roles, storage keys, errors and event symbols used by the
 * registry. The registry is the KYC gate of the trade system: only its administrator
 * can admit a participant, and the trade engine trusts its verification answers.
 */

use soroban_sdk::{contracterror, contracttype, symbol_short, Address, String, Symbol};

// ================================================================================================
// CORE DATA STRUCTURES
// ================================================================================================

/// Role a participant plays in the trade system.
///
/// Roles are recorded at registration and never change. The trade engine only needs
/// the verified flag to gate importers, but the role is exposed for clients that
/// tailor their views per participant.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Sells goods and receives the escrowed payment on completion
    Exporter,
    /// Buys goods, funds the escrow and confirms receipt
    Importer,
    /// Operational identity with no trading rights of its own
    Admin,
}

/// A registered, role-tagged identity.
///
/// # Invariants
/// - At most one record per address
/// - `is_verified` is set on registration and never unset
/// - Records are immutable once written; there is no update or deregistration path
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participant {
    /// The identity key of the participant
    pub address: Address,

    /// Display name (for example the registered company name)
    pub name: String,

    /// The role the administrator admitted this participant under
    pub role: Role,

    /// Whether the participant passed the off-chain KYC gate
    pub is_verified: bool,

    /// Ledger timestamp (seconds since epoch) at which the record was created
    pub registration_date: u64,
}

/// Storage keys.
///
/// `Admin` lives in instance storage with the contract; participant records live in
/// persistent storage, one entry per address.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Participant(Address),
}

// ================================================================================================
// ERROR DEFINITIONS
// ================================================================================================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// The registry has no administrator yet
    NotInitialized = 1,

    /// `initialize` was already called
    AlreadyInitialized = 2,

    /// The address already has a participant record
    AlreadyRegistered = 3,

    /// The address has no participant record
    NotRegistered = 4,
}

// ================================================================================================
// EVENT CONSTANTS
// ================================================================================================

/// Event emitted when a participant is admitted
/// Topics: (PARTICIPANT_REGISTERED, address)
/// Data: (name, role)
pub const PARTICIPANT_REGISTERED: Symbol = symbol_short!("part_reg");

/// Event emitted when the administrator identity changes
/// Topics: (ADMIN_TRANSFERRED, old_admin)
/// Data: new_admin
pub const ADMIN_TRANSFERRED: Symbol = symbol_short!("adm_xfer");
