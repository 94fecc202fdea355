//! Settlement currencies

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Currency of a payer account or of the payee
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Currency {
    /// US dollar
    #[default]
    Usd,
    /// Tether USD stablecoin
    Usdt,
    /// Any other currency code
    Custom(String),
}

impl FromStr for Currency {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper_value = value.trim().to_uppercase();
        match upper_value.as_str() {
            "USD" => Ok(Self::Usd),
            "USDT" => Ok(Self::Usdt),
            _ => Ok(Self::Custom(upper_value)),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Currency::Usd => "USD",
            Currency::Usdt => "USDT",
            Currency::Custom(code) => code,
        };
        if let Some(width) = f.width() {
            write!(f, "{s:width$}")
        } else {
            write!(f, "{s}")
        }
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let currency: String = String::deserialize(deserializer)?;
        Self::from_str(&currency).map_err(|_| serde::de::Error::custom("Unsupported currency"))
    }
}
