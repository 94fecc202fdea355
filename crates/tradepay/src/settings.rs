//! Engine settings
//!
//! Every constant the engine applies lives here so a deployment can override
//! it from configuration. [`Settings::default`] reproduces the product's
//! published rates and limits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fees::FeeSchedule;
use crate::{Amount, Currency, FlowKind};

/// Settings Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Minimum fee above the maximum fee
    #[error("Minimum fee {min} is above maximum fee {max}")]
    FeeBoundsInverted {
        /// Configured minimum fee
        min: Amount,
        /// Configured maximum fee
        max: Amount,
    },
    /// Negative fee bound
    #[error("Fee bound cannot be negative: {0}")]
    NegativeFee(Amount),
    /// Fee rate at or below zero
    #[error("Fee rate for {flow} must be positive, got {rate}")]
    NonPositiveRate {
        /// Flow the rate applies to
        flow: FlowKind,
        /// Configured rate
        rate: Decimal,
    },
    /// Flow minimum at or above the per-transaction maximum
    #[error("Minimum amount for {flow} ({minimum}) must be below the maximum ({maximum})")]
    LimitsInverted {
        /// Flow the minimum applies to
        flow: FlowKind,
        /// Configured minimum
        minimum: Amount,
        /// Configured maximum
        maximum: Amount,
    },
}

/// Nominal fee rate per payment flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRates {
    /// Rate applied on the send-payment flow
    pub send: Decimal,
    /// Rate applied on the request-payment flow
    pub request: Decimal,
}

impl Default for FeeRates {
    fn default() -> Self {
        Self {
            // 1.00%
            send: Decimal::new(1, 2),
            // 0.50%
            request: Decimal::new(5, 3),
        }
    }
}

impl FeeRates {
    /// Rate for a flow
    pub fn for_flow(&self, flow: FlowKind) -> Decimal {
        match flow {
            FlowKind::Send => self.send,
            FlowKind::Request => self.request,
        }
    }
}

/// Per-transaction amount limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Smallest amount accepted on the send-payment flow
    pub min_send: Amount,
    /// Smallest amount accepted on the request-payment flow
    pub min_request: Amount,
    /// Amounts at or above this value are rejected
    pub max_per_transaction: Amount,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_send: Amount::from_units(50),
            min_request: Amount::from_units(60),
            max_per_transaction: Amount::from_units(1_000_000),
        }
    }
}

impl Limits {
    /// Minimum for a flow
    pub fn min_for_flow(&self, flow: FlowKind) -> Amount {
        match flow {
            FlowKind::Send => self.min_send,
            FlowKind::Request => self.min_request,
        }
    }
}

/// Currencies involved in a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currencies {
    /// Currency the payee is always paid in
    pub payee: Currency,
    /// Payer currency whose use requires accepting the conversion terms
    pub conversion_disclosure: Currency,
}

impl Default for Currencies {
    fn default() -> Self {
        Self {
            payee: Currency::Usd,
            conversion_disclosure: Currency::Usdt,
        }
    }
}

/// Tradepay engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Service fee bounds
    pub fees: FeeSchedule,
    /// Nominal rates per flow
    pub rates: FeeRates,
    /// Per-transaction amount limits
    pub limits: Limits,
    /// Payee and disclosure currencies
    pub currencies: Currencies,
}

impl Settings {
    /// Whether paying from `currency` requires the conversion consent checkbox
    pub fn requires_conversion_consent(&self, currency: &Currency) -> bool {
        *currency == self.currencies.conversion_disclosure
    }

    /// Check the settings are consistent
    pub fn validate(&self) -> Result<(), Error> {
        let fees = &self.fees;
        for bound in [fees.min_fee, fees.max_fee] {
            if bound < Amount::ZERO {
                return Err(Error::NegativeFee(bound));
            }
        }
        if fees.min_fee > fees.max_fee {
            return Err(Error::FeeBoundsInverted {
                min: fees.min_fee,
                max: fees.max_fee,
            });
        }

        for flow in [FlowKind::Send, FlowKind::Request] {
            let rate = self.rates.for_flow(flow);
            if rate <= Decimal::ZERO {
                return Err(Error::NonPositiveRate { flow, rate });
            }

            let minimum = self.limits.min_for_flow(flow);
            if minimum >= self.limits.max_per_transaction {
                return Err(Error::LimitsInverted {
                    flow,
                    minimum,
                    maximum: self.limits.max_per_transaction,
                });
            }
        }

        Ok(())
    }
}
