/*!
 * Type Definitions for the Trade Agreement Contract
 *
 * Trades, their lifecycle status, engine configuration, advisory annotations,
 * storage keys, errors and event symbols.
 */

use soroban_sdk::{contracterror, contracttype, symbol_short, Address, String, Symbol};

// ================================================================================================
// CORE DATA STRUCTURES
// ================================================================================================

/// One escrow-backed deal between an exporter and an importer.
///
/// A trade is created by the exporter against a verified importer and is bound to
/// exactly one escrow vault at creation. Trades are never deleted, so the full
/// record stays available as an audit trail.
///
/// # Invariants
/// - `id` is assigned sequentially from 1 and never reused
/// - `exporter != importer` and `value > 0`
/// - `escrow_vault` is fixed at creation and never rebound
/// - `status` only moves along the lifecycle transition table
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trade {
    pub id: u64,

    /// The creator of the trade; receives the escrowed value on completion
    pub exporter: Address,

    /// The verified counterparty who funds the escrow and confirms receipt
    pub importer: Address,

    /// Agreed settlement amount in base units of the settlement asset
    pub value: i128,

    /// Free-text description of the goods
    pub description: String,

    /// Opaque sustainability metrics (typically JSON), consumed by the advisory
    /// service and never interpreted by the engine
    pub esg_data: String,

    pub status: TradeStatus,

    /// Most recent shipment note written by the exporter, empty until the first update
    pub latest_shipment_update: String,

    /// Id of the vault record custodying this trade's value
    pub escrow_vault: u64,

    /// Ledger timestamp at which the trade was created
    pub created_at: u64,
}

/// Lifecycle status of a trade.
///
/// # State Transition Rules
/// - Created → Funded (importer pays exactly the agreed value)
/// - Funded → InTransit, InTransit → InTransit (exporter posts shipment updates)
/// - Funded | InTransit → Completed (importer confirms receipt, escrow pays out)
/// - Created → Cancelled (either party, before any value is escrowed)
///
/// Completed and Cancelled are terminal. The discriminants match the numeric status
/// codes shown to clients.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TradeStatus {
    Created = 0,
    Funded = 1,
    InTransit = 2,
    Completed = 3,
    Cancelled = 4,
}

/// Participant role as recorded by the identity registry.
///
/// Mirrors the registry's own `Role` so that `get_role` answers decode directly.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Exporter,
    Importer,
    Admin,
}

/// Addresses the engine is wired to, fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TradeConfig {
    /// May configure the advisory service
    pub admin: Address,

    /// Identity registry gating importers
    pub registry: Address,

    /// Escrow vault contract custodying trade value
    pub vault: Address,
}

/// Non-binding risk annotation produced by the advisory service.
///
/// `risk_score` ranges from 0 (no risk) to 10 (high risk); `-1` means the service
/// could not be consulted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RiskAssessment {
    pub risk_score: i32,
    pub explanation: String,
}

/// Storage keys.
///
/// Configuration, the advisory address and the trade counter live in instance
/// storage; trade records live in persistent storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Advisor,
    TradeCounter,
    Trade(u64),
}

/// Sentinel score returned when the advisory service is unreachable.
pub const ADVISORY_UNAVAILABLE: i32 = -1;

/// Upper bound of the advisory risk scale.
pub const MAX_RISK_SCORE: i32 = 10;

// ================================================================================================
// ERROR DEFINITIONS
// ================================================================================================

/// Error codes for the trade lifecycle engine.
///
/// # Error Code Ranges
/// - 1-2: Engine configuration
/// - 3-4: Trade creation
/// - 5-8: Lifecycle transitions
/// - 9: Escrow vault interaction
/// - 10: Trade creation (exporter side)
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// The engine has not been wired to its registry and vault yet
    NotInitialized = 1,

    /// `initialize` was already called
    AlreadyInitialized = 2,

    /// The importer is unknown to the registry, unverified or not registered as an importer
    ImporterNotVerified = 3,

    /// The trade value is zero or negative
    InvalidValue = 4,

    /// No trade exists under the requested id
    NotFound = 5,

    /// The caller does not hold the role this operation requires
    Unauthorized = 6,

    /// The operation is not allowed in the trade's current status
    WrongStatus = 7,

    /// The funded amount differs from the agreed trade value
    ValueMismatch = 8,

    /// The escrow vault rejected an open, deposit or payout request
    EscrowCallFailed = 9,

    /// The exporter is unknown to the registry, unverified or not registered as an exporter
    ExporterNotVerified = 10,
}

// ================================================================================================
// EVENT CONSTANTS
// ================================================================================================

/// Event emitted when a trade is created
/// Topics: (TRADE_CREATED, exporter)
/// Data: (trade_id, importer, value)
pub const TRADE_CREATED: Symbol = symbol_short!("trd_crt");

/// Event emitted when the importer funds the escrow
/// Topics: (TRADE_FUNDED, importer)
/// Data: (trade_id, amount)
pub const TRADE_FUNDED: Symbol = symbol_short!("trd_fund");

/// Event emitted on every shipment update
/// Topics: (SHIPMENT_UPDATED, exporter)
/// Data: (trade_id, update)
pub const SHIPMENT_UPDATED: Symbol = symbol_short!("shp_upd");

/// Event emitted when the importer confirms receipt
/// Topics: (TRADE_COMPLETED, importer)
/// Data: (trade_id,)
pub const TRADE_COMPLETED: Symbol = symbol_short!("trd_comp");

/// Event emitted when a trade is cancelled before funding
/// Topics: (TRADE_CANCELLED, participant)
/// Data: (trade_id,)
pub const TRADE_CANCELLED: Symbol = symbol_short!("trd_canc");
