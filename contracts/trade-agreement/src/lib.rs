/*!
 * Trade Agreement Smart Contract
 *
 * Lifecycle engine for escrow-backed cross-border trades between an exporter and an
 * importer who do not trust each other.
 * Key features:
 * - Both parties are gated by the identity registry before a trade can be created
 * - Every trade gets its own escrow vault, opened atomically with the trade and
 *   controlled only by this contract
 * - Funding must match the agreed value exactly
 * - Payment is released to the exporter only when the importer confirms receipt
 * - An optional advisory service annotates trades with a non-binding risk score
 *
 * Security features:
 * - Authorization (`require_auth`) on every actor argument
 * - Role and status guards centralized in the lifecycle transition table
 * - Status is committed before any external value transfer
 *
 * Business Logic:
 * 1. A verified exporter creates a trade against a verified importer
 * 2. Importer funds the escrow with exactly the trade value
 * 3. Exporter posts shipment updates
 * 4. Importer confirms receipt and the escrow pays the exporter
 * 5. Either party can cancel a trade that was never funded
 */

#![no_std]

mod interfaces;
mod lifecycle;
mod types;


use soroban_sdk::{contract, contractimpl, log, Address, Env, String};

pub use interfaces::{AdvisorClient, RegistryClient, VaultClient};
pub use lifecycle::Action;
pub use types::{
    DataKey, Error, RiskAssessment, Role, Trade, TradeConfig, TradeStatus, ADVISORY_UNAVAILABLE,
    MAX_RISK_SCORE, SHIPMENT_UPDATED, TRADE_CANCELLED, TRADE_COMPLETED, TRADE_CREATED,
    TRADE_FUNDED,
};

#[contract]
pub struct TradeAgreementContract;

#[contractimpl]
impl TradeAgreementContract {
    /// Wires the engine to its collaborators.
    /// This function can only be called once.
    ///
    /// # Arguments
    /// * `admin` - The address allowed to configure the advisory service
    /// * `registry` - The identity registry gating importers
    /// * `vault` - The escrow vault contract custodying trade value
    ///
    /// # Errors
    /// - AlreadyInitialized: If the engine is already configured
    pub fn initialize(env: Env, admin: Address, registry: Address, vault: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }

        let config = TradeConfig { admin, registry, vault };
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::TradeCounter, &0u64);

        Ok(())
    }

    fn _config(env: &Env) -> Result<TradeConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    fn _load_trade(env: &Env, trade_id: u64) -> Result<Trade, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Trade(trade_id))
            .ok_or(Error::NotFound)
    }

    fn _save_trade(env: &Env, trade: &Trade) {
        env.storage()
            .persistent()
            .set(&DataKey::Trade(trade.id), trade);
    }

    /// True when the registry holds a verified record for `address` with the given role.
    fn _is_verified_as(registry: &RegistryClient, address: &Address, role: Role) -> bool {
        registry.is_verified(address)
            && matches!(registry.try_get_role(address), Ok(Ok(registered)) if registered == role)
    }

    /// Loads a trade, runs the requested action through the transition table and
    /// returns the trade with its new status. Nothing is persisted here.
    fn _transition(env: &Env, trade_id: u64, actor: &Address, action: Action) -> Result<Trade, Error> {
        let mut trade = Self::_load_trade(env, trade_id)?;
        match lifecycle::next_status(&trade, actor, &action) {
            Ok(status) => trade.status = status,
            Err(err) => {
                log!(env, "Trade {} rejected with code {} in status {}", trade_id, err as u32, trade.status as u32);
                return Err(err);
            }
        }
        Ok(trade)
    }

    /// Creates a new trade with the caller as exporter.
    ///
    /// # Business Flow
    /// 1. Verifies the importer against the identity registry
    /// 2. Validates the value and that the parties differ
    /// 3. Verifies the exporter against the identity registry
    /// 4. Opens a fresh escrow vault controlled by this contract, paying the exporter
    /// 5. Stores the trade in `Created` status under the next sequential id
    ///
    /// Trade and vault are created in the same invocation, so they either both exist
    /// or neither does.
    ///
    /// # Arguments
    /// * `exporter` - The creator of the trade (must sign, registered as `Exporter`)
    /// * `importer` - The counterparty (registered as `Importer`)
    /// * `value` - Agreed settlement amount
    /// * `description` - Description of the goods
    /// * `esg_data` - Opaque sustainability metrics
    ///
    /// # Returns
    /// The id of the new trade, starting at 1
    ///
    /// # Errors
    /// - NotInitialized: If the engine is not configured
    /// - ImporterNotVerified: If the importer is unknown, unverified or not an `Importer`
    /// - InvalidValue: If value is zero or negative
    /// - Unauthorized: If the exporter names itself as importer
    /// - ExporterNotVerified: If the exporter is unknown, unverified or not an `Exporter`
    /// - EscrowCallFailed: If the vault contract could not open a vault
    pub fn create_trade(
        env: Env,
        exporter: Address,
        importer: Address,
        value: i128,
        description: String,
        esg_data: String,
    ) -> Result<u64, Error> {
        exporter.require_auth();
        let config = Self::_config(&env)?;

        let registry = RegistryClient::new(&env, &config.registry);
        if !Self::_is_verified_as(&registry, &importer, Role::Importer) {
            return Err(Error::ImporterNotVerified);
        }
        if value <= 0 {
            return Err(Error::InvalidValue);
        }
        if exporter == importer {
            return Err(Error::Unauthorized);
        }
        if !Self::_is_verified_as(&registry, &exporter, Role::Exporter) {
            return Err(Error::ExporterNotVerified);
        }

        let vault = VaultClient::new(&env, &config.vault);
        let escrow_vault = match vault.try_open_vault(&env.current_contract_address(), &exporter) {
            Ok(Ok(vault_id)) => vault_id,
            _ => {
                log!(&env, "Escrow vault could not be opened for exporter {}", exporter);
                return Err(Error::EscrowCallFailed);
            }
        };

        let trade_id: u64 = env
            .storage()
            .instance()
            .get::<_, u64>(&DataKey::TradeCounter)
            .unwrap_or(0)
            + 1;

        let trade = Trade {
            id: trade_id,
            exporter: exporter.clone(),
            importer: importer.clone(),
            value,
            description,
            esg_data,
            status: TradeStatus::Created,
            latest_shipment_update: String::from_str(&env, ""),
            escrow_vault,
            created_at: env.ledger().timestamp(),
        };
        Self::_save_trade(&env, &trade);
        env.storage().instance().set(&DataKey::TradeCounter, &trade_id);

        env.events()
            .publish((TRADE_CREATED, exporter), (trade_id, importer, value));

        Ok(trade_id)
    }

    /// Funds a trade's escrow.
    ///
    /// The attached amount must equal the trade value exactly; partial or excess
    /// funding is rejected. The status is committed before the value is forwarded
    /// into the bound vault.
    ///
    /// # Arguments
    /// * `trade_id` - The trade to fund
    /// * `importer` - The trade's importer (must sign)
    /// * `amount` - The amount paid into escrow
    ///
    /// # Errors
    /// - NotFound: If the trade doesn't exist
    /// - WrongStatus: If the trade is not in `Created` status
    /// - Unauthorized: If the caller is not the trade's importer
    /// - ValueMismatch: If amount differs from the trade value
    /// - EscrowCallFailed: If the vault rejected the deposit (for example insufficient funds)
    pub fn fund_trade(env: Env, trade_id: u64, importer: Address, amount: i128) -> Result<(), Error> {
        importer.require_auth();
        let config = Self::_config(&env)?;

        let trade = Self::_transition(&env, trade_id, &importer, Action::Fund(amount))?;
        Self::_save_trade(&env, &trade);

        let vault = VaultClient::new(&env, &config.vault);
        if !matches!(vault.try_deposit(&trade.escrow_vault, &importer, &amount), Ok(Ok(()))) {
            log!(&env, "Escrow deposit of {} for trade {} failed", amount, trade_id);
            return Err(Error::EscrowCallFailed);
        }

        env.events()
            .publish((TRADE_FUNDED, importer), (trade_id, amount));

        Ok(())
    }

    /// Records a shipment update from the exporter.
    ///
    /// The first update moves a funded trade to `InTransit`; later updates keep the
    /// status and only overwrite the latest note.
    ///
    /// # Errors
    /// - NotFound: If the trade doesn't exist
    /// - Unauthorized: If the caller is not the trade's exporter
    /// - WrongStatus: If the trade is neither `Funded` nor `InTransit`
    pub fn update_shipment_status(
        env: Env,
        trade_id: u64,
        exporter: Address,
        update: String,
    ) -> Result<(), Error> {
        exporter.require_auth();
        Self::_config(&env)?;

        let mut trade = Self::_transition(&env, trade_id, &exporter, Action::UpdateShipment)?;
        trade.latest_shipment_update = update.clone();
        Self::_save_trade(&env, &trade);

        env.events()
            .publish((SHIPMENT_UPDATED, exporter), (trade_id, update));

        Ok(())
    }

    /// Confirms the goods arrived and releases the escrow to the exporter.
    ///
    /// # Security Features
    /// - Only the importer can confirm
    /// - `Completed` is persisted before the vault pays out, so the trade cannot be
    ///   completed twice
    /// - This contract is the vault's controller; nobody else can trigger the payout
    ///
    /// # Errors
    /// - NotFound: If the trade doesn't exist
    /// - Unauthorized: If the caller is not the trade's importer
    /// - WrongStatus: If the trade is neither `Funded` nor `InTransit`
    /// - EscrowCallFailed: If the vault refused the payout
    pub fn confirm_receipt(env: Env, trade_id: u64, importer: Address) -> Result<(), Error> {
        importer.require_auth();
        let config = Self::_config(&env)?;

        let trade = Self::_transition(&env, trade_id, &importer, Action::ConfirmReceipt)?;
        Self::_save_trade(&env, &trade);

        env.events()
            .publish((TRADE_COMPLETED, importer), (trade_id,));

        let vault = VaultClient::new(&env, &config.vault);
        match vault.try_withdraw(&trade.escrow_vault, &env.current_contract_address()) {
            Ok(Ok(paid)) => {
                log!(&env, "Trade {} released {} to exporter", trade_id, paid);
            }
            _ => {
                log!(&env, "Escrow payout for trade {} failed", trade_id);
                return Err(Error::EscrowCallFailed);
            }
        }

        Ok(())
    }

    /// Cancels a trade that was never funded.
    ///
    /// Either party may back out while the trade is still `Created`. No value is
    /// escrowed at that point, so nothing moves.
    ///
    /// # Errors
    /// - NotFound: If the trade doesn't exist
    /// - Unauthorized: If the caller is neither exporter nor importer
    /// - WrongStatus: If the trade has already been funded or closed
    pub fn cancel_trade(env: Env, trade_id: u64, participant: Address) -> Result<(), Error> {
        participant.require_auth();
        Self::_config(&env)?;

        let trade = Self::_transition(&env, trade_id, &participant, Action::Cancel)?;
        Self::_save_trade(&env, &trade);

        env.events()
            .publish((TRADE_CANCELLED, participant), (trade_id,));

        Ok(())
    }

    /// Points the engine at an advisory service. Admin only.
    pub fn set_advisor(env: Env, advisor: Address) -> Result<(), Error> {
        let config = Self::_config(&env)?;
        config.admin.require_auth();
        env.storage().instance().set(&DataKey::Advisor, &advisor);
        Ok(())
    }

    /// Asks the advisory service to score a trade's description and ESG data.
    ///
    /// The answer is informational only. When no advisor is configured, the call
    /// fails, or the score falls outside 0..=10, the sentinel assessment with
    /// `risk_score = -1` is returned instead of an error.
    ///
    /// # Errors
    /// - NotFound: If the trade doesn't exist
    pub fn get_risk_assessment(env: Env, trade_id: u64) -> Result<RiskAssessment, Error> {
        let trade = Self::_load_trade(&env, trade_id)?;

        let advisor: Option<Address> = env.storage().instance().get(&DataKey::Advisor);
        let Some(advisor) = advisor else {
            return Ok(Self::_advisory_unavailable(&env));
        };

        match AdvisorClient::new(&env, &advisor).try_assess(&trade.description, &trade.esg_data) {
            Ok(Ok(assessment))
                if (0..=MAX_RISK_SCORE).contains(&assessment.risk_score) =>
            {
                Ok(assessment)
            }
            _ => {
                log!(&env, "Advisory service unavailable for trade {}", trade_id);
                Ok(Self::_advisory_unavailable(&env))
            }
        }
    }

    fn _advisory_unavailable(env: &Env) -> RiskAssessment {
        RiskAssessment {
            risk_score: ADVISORY_UNAVAILABLE,
            explanation: String::from_str(env, "advisory unavailable"),
        }
    }

    // ================================================================================================
    // READ ACCESSORS
    // ================================================================================================

    /// Returns a trade by id.
    pub fn get_trade(env: Env, trade_id: u64) -> Result<Trade, Error> {
        Self::_load_trade(&env, trade_id)
    }

    /// Returns the number of trades created so far; the most recent id equals this count.
    pub fn trade_counter(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TradeCounter)
            .unwrap_or(0)
    }

    /// Returns the amount currently held in escrow for a trade.
    pub fn get_escrow_balance(env: Env, trade_id: u64) -> Result<i128, Error> {
        let config = Self::_config(&env)?;
        let trade = Self::_load_trade(&env, trade_id)?;
        Ok(VaultClient::new(&env, &config.vault).get_balance(&trade.escrow_vault))
    }

    /// Returns the admin, registry and vault the engine was initialized with.
    pub fn get_config(env: Env) -> Result<TradeConfig, Error> {
        Self::_config(&env)
    }

    /// Returns the configured advisory service, if any.
    pub fn get_advisor(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Advisor)
    }
}
