//! Trade lifecycle transition table.
//!
//! Every state-changing operation on a trade goes through [`next_status`], which
//! matches exhaustively on the requested action and the current status and applies
//! the role and value guards in one place.

use soroban_sdk::Address;

use crate::types::{Error, Trade, TradeStatus};

/// A lifecycle operation requested against a trade.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Importer pays the attached amount into escrow
    Fund(i128),
    /// Exporter posts a shipment update
    UpdateShipment,
    /// Importer confirms the goods arrived, releasing escrow
    ConfirmReceipt,
    /// Either party withdraws from a trade that was never funded
    Cancel,
}

/// Computes the status a trade moves to when `actor` requests `action`.
///
/// Funding checks status before the caller; every other action checks the caller
/// first.
pub fn next_status(trade: &Trade, actor: &Address, action: &Action) -> Result<TradeStatus, Error> {
    match action {
        Action::Fund(amount) => match trade.status {
            TradeStatus::Created => {
                require_party(actor, &trade.importer)?;
                if *amount != trade.value {
                    return Err(Error::ValueMismatch);
                }
                Ok(TradeStatus::Funded)
            }
            TradeStatus::Funded
            | TradeStatus::InTransit
            | TradeStatus::Completed
            | TradeStatus::Cancelled => Err(Error::WrongStatus),
        },
        Action::UpdateShipment => {
            require_party(actor, &trade.exporter)?;
            match trade.status {
                TradeStatus::Funded | TradeStatus::InTransit => Ok(TradeStatus::InTransit),
                TradeStatus::Created | TradeStatus::Completed | TradeStatus::Cancelled => {
                    Err(Error::WrongStatus)
                }
            }
        }
        Action::ConfirmReceipt => {
            require_party(actor, &trade.importer)?;
            match trade.status {
                TradeStatus::Funded | TradeStatus::InTransit => Ok(TradeStatus::Completed),
                TradeStatus::Created | TradeStatus::Completed | TradeStatus::Cancelled => {
                    Err(Error::WrongStatus)
                }
            }
        }
        Action::Cancel => {
            if *actor != trade.exporter && *actor != trade.importer {
                return Err(Error::Unauthorized);
            }
            match trade.status {
                TradeStatus::Created => Ok(TradeStatus::Cancelled),
                TradeStatus::Funded
                | TradeStatus::InTransit
                | TradeStatus::Completed
                | TradeStatus::Cancelled => Err(Error::WrongStatus),
            }
        }
    }
}

fn require_party(actor: &Address, expected: &Address) -> Result<(), Error> {
    if actor != expected {
        return Err(Error::Unauthorized);
    }
    Ok(())
}
