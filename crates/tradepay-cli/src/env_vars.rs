//! Environment variable overrides

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use tradepay::fees::FeeSchedule;
use tradepay::settings::{Currencies, FeeRates, Limits};
use tradepay::{Amount, Currency, Settings};

pub const ENV_MIN_FEE: &str = "TRADEPAY_MIN_FEE";
pub const ENV_MAX_FEE: &str = "TRADEPAY_MAX_FEE";
pub const ENV_SEND_FEE_RATE: &str = "TRADEPAY_SEND_FEE_RATE";
pub const ENV_REQUEST_FEE_RATE: &str = "TRADEPAY_REQUEST_FEE_RATE";
pub const ENV_MIN_SEND: &str = "TRADEPAY_MIN_SEND";
pub const ENV_MIN_REQUEST: &str = "TRADEPAY_MIN_REQUEST";
pub const ENV_MAX_PER_TRANSACTION: &str = "TRADEPAY_MAX_PER_TRANSACTION";
pub const ENV_PAYEE_CURRENCY: &str = "TRADEPAY_PAYEE_CURRENCY";
pub const ENV_CONVERSION_DISCLOSURE_CURRENCY: &str = "TRADEPAY_CONVERSION_DISCLOSURE_CURRENCY";

/// Override a settings section with environment variables
pub trait FromEnv: Sized {
    /// Apply every set variable; a set but unparsable variable is an error
    fn from_env(&self) -> Result<Self>;
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| anyhow!("Invalid {name} `{value}`: {err}")),
        Err(_) => Ok(None),
    }
}

impl FromEnv for FeeSchedule {
    fn from_env(&self) -> Result<Self> {
        let mut schedule = *self;

        if let Some(min_fee) = parse_var::<Amount>(ENV_MIN_FEE)? {
            schedule.min_fee = min_fee;
        }

        if let Some(max_fee) = parse_var::<Amount>(ENV_MAX_FEE)? {
            schedule.max_fee = max_fee;
        }

        Ok(schedule)
    }
}

impl FromEnv for FeeRates {
    fn from_env(&self) -> Result<Self> {
        let mut rates = *self;

        if let Some(send) = parse_var::<Decimal>(ENV_SEND_FEE_RATE)? {
            rates.send = send;
        }

        if let Some(request) = parse_var::<Decimal>(ENV_REQUEST_FEE_RATE)? {
            rates.request = request;
        }

        Ok(rates)
    }
}

impl FromEnv for Limits {
    fn from_env(&self) -> Result<Self> {
        let mut limits = *self;

        if let Some(min_send) = parse_var::<Amount>(ENV_MIN_SEND)? {
            limits.min_send = min_send;
        }

        if let Some(min_request) = parse_var::<Amount>(ENV_MIN_REQUEST)? {
            limits.min_request = min_request;
        }

        if let Some(max) = parse_var::<Amount>(ENV_MAX_PER_TRANSACTION)? {
            limits.max_per_transaction = max;
        }

        Ok(limits)
    }
}

impl FromEnv for Currencies {
    fn from_env(&self) -> Result<Self> {
        let mut currencies = self.clone();

        if let Some(payee) = parse_var::<Currency>(ENV_PAYEE_CURRENCY)? {
            currencies.payee = payee;
        }

        if let Some(disclosure) = parse_var::<Currency>(ENV_CONVERSION_DISCLOSURE_CURRENCY)? {
            currencies.conversion_disclosure = disclosure;
        }

        Ok(currencies)
    }
}

impl FromEnv for Settings {
    fn from_env(&self) -> Result<Self> {
        Ok(Settings {
            fees: self.fees.from_env()?,
            rates: self.rates.from_env()?,
            limits: self.limits.from_env()?,
            currencies: self.currencies.from_env()?,
        })
    }
}
