//! Calculate service fees
//!
//! The service fee is a percentage of the amount, clamped to a fixed minimum
//! and maximum, and apportioned between payer and receiver according to the
//! selected [`FeeMode`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::Amount;

/// Minimum service fee charged on any transaction
pub const MIN_SERVICE_FEE: Amount = Amount::from_units(25);

/// Maximum service fee charged on any transaction
pub const MAX_SERVICE_FEE: Amount = Amount::from_units(2500);

/// Fee Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown fee mode name
    #[error("Unknown fee mode: `{0}`")]
    UnknownFeeMode(String),
}

/// Who bears the service fee
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeMode {
    /// The payer pays the whole fee
    #[default]
    #[serde(rename = "you", alias = "payer")]
    PayerPays,
    /// The receiver pays the whole fee
    #[serde(rename = "receiver", alias = "customer")]
    ReceiverPays,
    /// Payer and receiver pay half each
    #[serde(rename = "split", alias = "both", alias = "shared")]
    Split,
}

impl FeeMode {
    /// Split the nominal fee rate into payer and receiver rates
    pub fn shares(&self, fee_rate: Decimal) -> FeeShares {
        match self {
            FeeMode::PayerPays => FeeShares {
                payer_rate: fee_rate,
                receiver_rate: Decimal::ZERO,
            },
            FeeMode::ReceiverPays => FeeShares {
                payer_rate: Decimal::ZERO,
                receiver_rate: fee_rate,
            },
            FeeMode::Split => {
                let half = fee_rate / Decimal::TWO;
                FeeShares {
                    payer_rate: half,
                    receiver_rate: half,
                }
            }
        }
    }
}

impl FromStr for FeeMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "you" | "payer" => Ok(Self::PayerPays),
            "receiver" | "customer" => Ok(Self::ReceiverPays),
            "split" | "both" | "shared" => Ok(Self::Split),
            other => Err(Error::UnknownFeeMode(other.to_string())),
        }
    }
}

impl fmt::Display for FeeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeMode::PayerPays => write!(f, "you"),
            FeeMode::ReceiverPays => write!(f, "receiver"),
            FeeMode::Split => write!(f, "split"),
        }
    }
}

/// Payer and receiver portions of the nominal fee rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeShares {
    /// Rate borne by the payer
    pub payer_rate: Decimal,
    /// Rate borne by the receiver
    pub receiver_rate: Decimal,
}

impl FeeShares {
    /// No fee context selected
    pub const NONE: FeeShares = FeeShares {
        payer_rate: Decimal::ZERO,
        receiver_rate: Decimal::ZERO,
    };

    /// Whether neither side carries any rate
    pub fn is_none(&self) -> bool {
        self.payer_rate.is_zero() && self.receiver_rate.is_zero()
    }
}

/// Result of a single fee computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Fee actually charged after clamping
    pub actual_service_fee: Amount,
    /// Payer's share of the charged fee
    pub payer_fee: Amount,
    /// Receiver's share of the charged fee
    pub receiver_fee: Amount,
    /// The minimum fee was applied
    pub is_below_minimum: bool,
    /// The maximum fee was applied
    pub is_above_maximum: bool,
}

impl FeeBreakdown {
    /// Whether the charged fee differs from the nominal percentage
    pub fn is_clamped(&self) -> bool {
        self.is_below_minimum || self.is_above_maximum
    }
}

/// Minimum and maximum bounds applied to the nominal fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Lowest fee charged
    pub min_fee: Amount,
    /// Highest fee charged
    pub max_fee: Amount,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            min_fee: MIN_SERVICE_FEE,
            max_fee: MAX_SERVICE_FEE,
        }
    }
}

impl FeeSchedule {
    /// Compute the fee for `amount` at `fee_rate` split according to `shares`.
    ///
    /// A zero amount is charged the minimum fee. Shares keep the ratio of the
    /// nominal rates even when the charged fee has been clamped.
    #[instrument(skip(self))]
    pub fn compute(&self, amount: Amount, shares: FeeShares, fee_rate: Decimal) -> FeeBreakdown {
        // an overflowing nominal fee is above any maximum
        let nominal_fee = amount.checked_mul(fee_rate);

        let is_below_minimum = amount.value().is_zero()
            || nominal_fee.is_some_and(|fee| fee > Amount::ZERO && fee < self.min_fee);
        let is_above_maximum =
            !is_below_minimum && nominal_fee.is_none_or(|fee| fee > self.max_fee);

        let actual_service_fee = match nominal_fee {
            _ if is_below_minimum => self.min_fee,
            Some(fee) if !is_above_maximum => fee,
            _ => self.max_fee,
        };

        let (payer_fee, receiver_fee) = if shares.is_none() || fee_rate.is_zero() {
            (Amount::ZERO, Amount::ZERO)
        } else {
            (
                actual_service_fee * (shares.payer_rate / fee_rate),
                actual_service_fee * (shares.receiver_rate / fee_rate),
            )
        };

        FeeBreakdown {
            actual_service_fee,
            payer_fee,
            receiver_fee,
            is_below_minimum,
            is_above_maximum,
        }
    }
}

/// Fee for `amount` using the default [`FeeSchedule`]
pub fn compute_fees(
    amount: Amount,
    payer_rate: Decimal,
    receiver_rate: Decimal,
    fee_rate: Decimal,
) -> FeeBreakdown {
    FeeSchedule::default().compute(
        amount,
        FeeShares {
            payer_rate,
            receiver_rate,
        },
        fee_rate,
    )
}
